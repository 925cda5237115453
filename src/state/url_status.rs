/// Result status definitions for discovered URLs
use std::fmt;

/// Status code written for URLs without a recorded HTTP response
pub const NO_RESPONSE: u16 = 0;

/// Represents the result status of a URL in the visited registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlStatus {
    /// Discovered and queued, not fetched yet
    Pending,

    /// Fetched, with the HTTP status code of the response
    Fetched(u16),

    /// Fetch attempted but failed at the transport level (connection, DNS, timeout)
    ///
    /// Never retried, and never written to the progress file.
    Unreachable,
}

impl UrlStatus {
    /// Returns true once a fetch has been attempted
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true if an HTTP response was received
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    /// The status code as written to the progress file
    ///
    /// Pending and unreachable URLs both report [`NO_RESPONSE`].
    pub fn code(&self) -> u16 {
        match self {
            Self::Fetched(code) => *code,
            Self::Pending | Self::Unreachable => NO_RESPONSE,
        }
    }
}

impl fmt::Display for UrlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Fetched(code) => write!(f, "{}", code),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}
