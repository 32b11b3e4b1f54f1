mod handlers;
mod middleware;
mod router;
mod state;

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tower_http::compression::CompressionLayer;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use sysctld_core::collector::SysctlReader;
#[cfg(target_os = "linux")]
use sysctld_core::collector::{ProcSysctl, RealFs};

use middleware::AllowedOrigins;
use state::Endpoints;

// ============================================================
// CLI
// ============================================================

#[derive(Parser)]
#[command(name = "sysctld", about = "Serves sysctl values as JSON over HTTP", version = sysctld_core::VERSION)]
struct Args {
    /// Address to listen on (host:port, or :port for all interfaces).
    #[arg(long, default_value = "0.0.0.0:8080", env = "SYSCTLD_ADDRESS")]
    address: String,

    /// Root of the sysctl tree.
    #[arg(long, default_value = "/proc/sys", env = "SYSCTLD_SYSCTL_ROOT")]
    sysctl_root: PathBuf,

    /// Comma-separated list of origins allowed to read cross-origin.
    /// If not specified, any origin is echoed back.
    #[arg(long, env = "SYSCTLD_CORS_ALLOW_ORIGIN", value_delimiter = ',')]
    cors_allow_origin: Vec<String>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` is honored; the level for sysctld's own crates comes from -v/-q.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["sysctld", "sysctld_core"] {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Expands the `:port` shorthand to all interfaces.
fn listen_address(raw: &str) -> String {
    if raw.starts_with(':') {
        format!("0.0.0.0{raw}")
    } else {
        raw.to_owned()
    }
}

// ============================================================
// Main
// ============================================================

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(async_main(args)) {
        error!(error = %e, "server error");
        process::exit(1);
    }
}

async fn async_main(args: Args) -> io::Result<()> {
    info!(version = sysctld_core::VERSION, "starting sysctld");

    let endpoints = Endpoints::new(create_reader(&args)?);

    let allowed = AllowedOrigins::from_list(args.cors_allow_origin.clone());
    match &allowed {
        AllowedOrigins::Any => info!("CORS: echoing any origin"),
        AllowedOrigins::List(origins) => info!(?origins, "CORS: origin allow-list enabled"),
    }

    let app = router::build_router(&endpoints, Arc::new(allowed)).layer(CompressionLayer::new());
    let app = app.into_make_service_with_connect_info::<SocketAddr>();

    let address = listen_address(&args.address);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| io::Error::new(e.kind(), format!("failed to bind {address}: {e}")))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Builds the reader for this host's sysctls.
///
/// Only the Linux `/proc/sys` tree is supported; elsewhere startup fails
/// rather than serving values that are not the host's.
fn create_reader(args: &Args) -> io::Result<Arc<dyn SysctlReader>> {
    #[cfg(target_os = "linux")]
    {
        info!(root = %args.sysctl_root.display(), "reading sysctls");
        Ok(Arc::new(ProcSysctl::new(RealFs::new(), args.sysctl_root.clone())))
    }
    #[cfg(not(target_os = "linux"))]
    {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!(
                "sysctl root {} requires Linux /proc/sys; {} is not supported",
                args.sysctl_root.display(),
                std::env::consts::OS
            ),
        ))
    }
}

/// Resolves on Ctrl-C or SIGTERM; in-flight requests are allowed to finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("received shutdown signal");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_address() {
        assert_eq!(listen_address(":8080"), "0.0.0.0:8080");
        assert_eq!(listen_address("127.0.0.1:9000"), "127.0.0.1:9000");
        assert_eq!(listen_address("[::1]:8080"), "[::1]:8080");
        assert_eq!(listen_address("localhost:8080"), "localhost:8080");
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["sysctld"]).unwrap();
        assert_eq!(args.address, "0.0.0.0:8080");
        assert_eq!(args.sysctl_root, PathBuf::from("/proc/sys"));
        assert!(args.cors_allow_origin.is_empty());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_args_cors_list() {
        let args = Args::try_parse_from([
            "sysctld",
            "--address",
            ":9090",
            "--cors-allow-origin",
            "a.example,b.example",
            "-vv",
        ])
        .unwrap();
        assert_eq!(listen_address(&args.address), "0.0.0.0:9090");
        assert_eq!(args.cors_allow_origin, vec!["a.example", "b.example"]);
        assert_eq!(args.verbose, 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_create_reader_uses_sysctl_root() {
        let dir = std::env::temp_dir().join(format!("sysctld-root-{}", process::id()));
        std::fs::create_dir_all(dir.join("kernel")).unwrap();
        std::fs::write(dir.join("kernel").join("hostname"), "node-7\n").unwrap();

        let root = dir.to_str().unwrap();
        let args = Args::try_parse_from(["sysctld", "--sysctl-root", root]).unwrap();
        let reader = create_reader(&args).unwrap();
        assert_eq!(reader.read_string("kernel.hostname").unwrap(), "node-7");
        // nothing outside the configured root is served
        assert!(reader.read_string("kernel.ostype").is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_create_reader_unsupported_platform() {
        let args = Args::try_parse_from(["sysctld"]).unwrap();
        let err = create_reader(&args).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }
}
