//! Pre-built mock `/proc/sys` trees for testing.

use super::filesystem::MockFs;

/// Sysctl root used by the pre-built scenarios.
const PROC_SYS: &str = "/proc/sys";

impl MockFs {
    /// Creates the `/proc/sys` tree of a typical small Linux host.
    ///
    /// Includes string leaves (hostname, ostype, osrelease), integer leaves
    /// (pid_max, swappiness, somaxconn) and vector leaves (printk, file-nr)
    /// that neither kind can serve.
    pub fn typical_host() -> Self {
        let mut fs = Self::new();

        fs.add_sysctl(PROC_SYS, "kernel.hostname", "web-01\n");
        fs.add_sysctl(PROC_SYS, "kernel.domainname", "(none)\n");
        fs.add_sysctl(PROC_SYS, "kernel.ostype", "Linux\n");
        fs.add_sysctl(PROC_SYS, "kernel.osrelease", "6.8.0-45-generic\n");
        fs.add_sysctl(
            PROC_SYS,
            "kernel.version",
            "#45-Ubuntu SMP PREEMPT_DYNAMIC Fri Aug 30 12:02:04 UTC 2024\n",
        );
        fs.add_sysctl(
            PROC_SYS,
            "kernel.random.boot_id",
            "0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0\n",
        );
        fs.add_sysctl(PROC_SYS, "kernel.pid_max", "4194304\n");
        fs.add_sysctl(PROC_SYS, "kernel.threads-max", "126906\n");
        fs.add_sysctl(PROC_SYS, "kernel.panic", "0\n");
        fs.add_sysctl(PROC_SYS, "kernel.printk", "4\t4\t1\t7\n");

        fs.add_sysctl(PROC_SYS, "vm.swappiness", "60\n");
        fs.add_sysctl(PROC_SYS, "vm.overcommit_memory", "0\n");
        fs.add_sysctl(PROC_SYS, "vm.overcommit_ratio", "50\n");

        fs.add_sysctl(PROC_SYS, "fs.file-max", "9223372036854775807\n");
        fs.add_sysctl(PROC_SYS, "fs.file-nr", "2048\t0\t9223372036854775807\n");

        fs.add_sysctl(PROC_SYS, "net.core.somaxconn", "4096\n");
        fs.add_sysctl(PROC_SYS, "net.ipv4.ip_forward", "0\n");
        fs.add_sysctl(PROC_SYS, "net.ipv4.tcp_congestion_control", "cubic\n");
        fs.add_sysctl(PROC_SYS, "net.ipv4.ip_local_port_range", "32768\t60999\n");

        fs
    }
}

#[cfg(test)]
mod tests {
    use crate::collector::traits::FileSystem;

    use super::*;
    use std::path::Path;

    #[test]
    fn test_typical_host_layout() {
        let fs = MockFs::typical_host();

        let hostname = fs
            .read_to_string(Path::new("/proc/sys/kernel/hostname"))
            .unwrap();
        assert_eq!(hostname, "web-01\n");
        assert!(fs.read_to_string(Path::new("/proc/sys/net/ipv4")).is_err());
    }
}
