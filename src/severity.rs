//! Severity levels for recorded events

use std::fmt;

use serde::{Deserialize, Serialize};

/// Urgency of a recorded event
///
/// Declaration order is ascending urgency, so the derived ordering gives
/// `Info < Warning < Error < Alert < Emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Alert,
    Emergency,
}

impl Severity {
    /// All recognized severities, in ascending urgency
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Alert,
        Severity::Emergency,
    ];

    /// Get the display name for this severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Alert => "ALERT",
            Severity::Emergency => "EMERGENCY",
        }
    }

    /// Parse a severity name, case-insensitively
    ///
    /// Unrecognized names yield `None`; callers at the string boundary drop
    /// such events rather than failing.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "INFO" => Some(Severity::Info),
            "WARNING" => Some(Severity::Warning),
            "ERROR" => Some(Severity::Error),
            "ALERT" => Some(Severity::Alert),
            "EMERGENCY" => Some(Severity::Emergency),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
