//! Request-to-value resolution: URL path translation and kind-bound reads.

use std::fmt;
use std::sync::Arc;

use crate::collector::{SysctlError, SysctlReader};
use crate::models::{Kind, SysctlValue};

/// Translates the URL path left after the routing prefix into a sysctl name.
///
/// Every `/` becomes `.`; nothing else is validated or rewritten.
pub fn translate(path: &str) -> String {
    path.replace('/', ".")
}

type ReadFn = fn(&dyn SysctlReader, &str) -> Result<SysctlValue, SysctlError>;

fn read_string(reader: &dyn SysctlReader, name: &str) -> Result<SysctlValue, SysctlError> {
    reader.read_string(name).map(SysctlValue::String)
}

fn read_integer(reader: &dyn SysctlReader, name: &str) -> Result<SysctlValue, SysctlError> {
    reader.read_int64(name).map(SysctlValue::Integer)
}

/// Reads sysctls of one fixed kind.
///
/// The accessor is bound once at construction; one resolver backs each
/// endpoint and is shared by all of its requests.
#[derive(Clone)]
pub struct Resolver {
    kind: Kind,
    reader: Arc<dyn SysctlReader>,
    read: ReadFn,
}

impl Resolver {
    pub fn new(kind: Kind, reader: Arc<dyn SysctlReader>) -> Self {
        let read: ReadFn = match kind {
            Kind::String => read_string,
            Kind::Integer => read_integer,
        };
        Self { kind, reader, read }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Reads `name`. A successful value always has this resolver's kind.
    pub fn resolve(&self, name: &str) -> Result<SysctlValue, SysctlError> {
        (self.read)(self.reader.as_ref(), name)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").field("kind", &self.kind).finish()
    }
}
