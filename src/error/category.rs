//! Error category classification.
//!
//! Categories let callers decide how to react to a failure without matching
//! on every concrete variant: whether to tell the user the daemon is down,
//! whether a fresh attempt might succeed, or whether a setting is wrong.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The daemon could not be reached or the connection broke.
    /// Generally transient.
    Network,

    /// The daemon answered with a non-success status.
    /// Transient only for server-side (5xx) statuses.
    Daemon,

    /// The daemon sent data that does not match the expected format.
    Protocol,

    /// The client was configured with an unusable endpoint.
    Configuration,

    /// The caller ended the operation.
    Cancelled,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Daemon => "daemon",
            ErrorCategory::Protocol => "protocol",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Cancelled => "cancelled",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the daemon is running and reachable",
            ErrorCategory::Daemon => "Inspect the daemon's error message and logs",
            ErrorCategory::Protocol => "The daemon may speak an incompatible API version",
            ErrorCategory::Configuration => "Check the configured daemon endpoint",
            ErrorCategory::Cancelled => "No action needed",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
