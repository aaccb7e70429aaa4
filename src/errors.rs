/// All error types that can occur when talking to a Key Light.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The device address could not be used as a base URL.
    #[error("invalid device address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The HTTP request could not be completed (connection refused, reset, ...).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The deadline expired before the device answered.
    #[error("operation timed out")]
    Timeout,

    /// The device answered with a non-success status code.
    #[error("unexpected HTTP status {status} from {path}")]
    Status { status: u16, path: String },

    /// Failed to serialize a request body.
    #[error("failed to dump json: {0}")]
    JsonDump(#[source] serde_json::Error),

    /// The device answered with a body that is not the expected JSON.
    #[error("failed to load json: {0}")]
    JsonLoad(#[source] serde_json::Error),

    /// A step of a command run failed.
    #[error("failed to {action}: {source}")]
    Step {
        action: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a new invalid address error
    pub fn invalid_address(address: &str, reason: &str) -> Self {
        Error::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Wrap an error with the action that was being performed
    pub fn step(action: &str, err: Error) -> Self {
        Error::Step {
            action: action.to_string(),
            source: Box::new(err),
        }
    }

    /// The innermost error, looking through any [`Error::Step`] wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// Bad address or flags.
    pub fn is_configuration(&self) -> bool {
        matches!(self.root(), Error::InvalidAddress { .. })
    }

    /// Connection failures, including an expired deadline.
    pub fn is_network(&self) -> bool {
        matches!(self.root(), Error::Network(_) | Error::Timeout)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.root(), Error::Timeout)
    }

    /// The device answered, but not with something we understand.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self.root(),
            Error::Status { .. } | Error::JsonDump(_) | Error::JsonLoad(_)
        )
    }
}

/// Compares rendered messages; the wrapped library errors have no `PartialEq`.
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
