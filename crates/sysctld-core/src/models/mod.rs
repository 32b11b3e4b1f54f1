//! Data model shared by the resolver and the HTTP layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar type an endpoint is statically configured to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
}

impl Kind {
    /// Lowercase name, as used in the URL prefix (`/sysctl/<kind>/`).
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
        }
    }

    /// Value reported when a read of this kind fails.
    pub fn zero_value(self) -> SysctlValue {
        match self {
            Kind::String => SysctlValue::String(String::new()),
            Kind::Integer => SysctlValue::Integer(0),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sysctl value: JSON number for integers, JSON string for strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SysctlValue {
    Integer(i64),
    String(String),
}

impl SysctlValue {
    pub fn kind(&self) -> Kind {
        match self {
            SysctlValue::Integer(_) => Kind::Integer,
            SysctlValue::String(_) => Kind::String,
        }
    }
}

/// Response document for one sysctl request.
///
/// Built fresh per request and never mutated after construction. `error` is
/// empty exactly when the read succeeded; on failure `value` holds the zero
/// value of the endpoint's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SysctlResult {
    /// Dotted sysctl name that was requested.
    pub name: String,
    pub value: SysctlValue,
    /// RFC 1123 time at which the read was attempted.
    pub timestamp: String,
    pub error: String,
}

impl SysctlResult {
    /// Result of a successful read.
    pub fn found(name: String, value: SysctlValue, timestamp: String) -> Self {
        Self {
            name,
            value,
            timestamp,
            error: String::new(),
        }
    }

    /// Result of a failed read on an endpoint of `kind`.
    pub fn not_found(name: String, kind: Kind, timestamp: String, error: String) -> Self {
        Self {
            name,
            value: kind.zero_value(),
            timestamp,
            error,
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}
