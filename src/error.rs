use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single upstream provider call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("No pairs found")]
    NoPairs,

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl FetchError {
    /// Maps a reqwest failure, keeping timeouts distinguishable.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("missing contract address")]
    MissingArgument,

    #[error("{security} | {market}")]
    AllSourcesFailed {
        security: FetchError,
        market: FetchError,
    },

    #[error("Report error: {0}")]
    Report(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddressError {
    #[error("address is not valid base58: {0}")]
    Encoding(String),

    #[error("address decodes to {0} bytes, expected 32")]
    Length(usize),
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP 404");
        assert_eq!(FetchError::NoPairs.to_string(), "No pairs found");
        assert_eq!(
            FetchError::Timeout(Duration::from_secs(10)).to_string(),
            "request timed out after 10s"
        );
        assert_eq!(
            FetchError::Timeout(Duration::from_millis(200)).to_string(),
            "request timed out after 200ms"
        );
    }

    #[test]
    fn test_combined_error_message() {
        let err = AuditError::AllSourcesFailed {
            security: FetchError::Status(502),
            market: FetchError::NoPairs,
        };
        assert_eq!(err.to_string(), "HTTP 502 | No pairs found");
    }
}
