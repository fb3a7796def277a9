use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a structured message.
///
/// Ordered from least to most severe:
/// `Trace < Debug < Information < Warning < Error < Critical`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    /// Finest-grained diagnostic detail.
    Trace,
    /// Diagnostic detail for development.
    Debug,
    /// Normal operational messages.
    #[default]
    Information,
    /// Something unexpected, but the operation continues.
    Warning,
    /// An operation failed.
    Error,
    /// The whole system is in trouble.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Information => "Information",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Critical => "Critical",
        };
        write!(f, "{name}")
    }
}
