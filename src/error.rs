//! # Error Types
//!
//! Every fallible operation in the library returns [`Result`], built on a
//! small closed set of error kinds. Callers decide what is fatal by matching
//! on the kind rather than by inspecting messages:
//!
//! - [`Error::Configuration`] - bad run mode or config, nothing was attempted
//! - [`Error::ApiStatus`], [`Error::ApiTransport`], [`Error::ApiResponse`] -
//!   the player's control API failed (see [`Error::is_api`])
//! - [`Error::InvalidUri`] - the current media URI is not a usable path
//! - [`Error::FileSystem`] - moving or deleting the media file failed
//! - [`Error::AdvancementStalled`] - duplicate skipping hit its bound

use std::path::PathBuf;

/// Result type alias for curator operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or missing run mode, or an unusable configuration value
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The control API answered with a non-success status
    #[error("control API returned HTTP {status}: {body}")]
    ApiStatus { status: u16, body: String },

    /// The control API could not be reached
    #[error("control API unreachable: {0}")]
    ApiTransport(String),

    /// The control API answered with something we could not parse
    #[error("malformed control API response: {0}")]
    ApiResponse(String),

    #[error("cannot turn media URI '{uri}' into a path: {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("file operation failed on {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The player kept landing on already visited entries
    #[error("advancement stalled after skipping {skips} duplicate entries")]
    AdvancementStalled { skips: usize },
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// True for every failure of the control API itself.
    pub fn is_api(&self) -> bool {
        matches!(
            self,
            Self::ApiStatus { .. } | Self::ApiTransport(_) | Self::ApiResponse(_)
        )
    }

    /// HTTP status carried by the error, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                Self::ApiStatus { status, body }
            }
            ureq::Error::Transport(transport) => Self::ApiTransport(transport.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_kinds_are_grouped() {
        let status = Error::ApiStatus { status: 500, body: "boom".into() };
        assert!(status.is_api());
        assert_eq!(status.status(), Some(500));
        assert!(Error::ApiTransport("refused".into()).is_api());
        assert!(Error::ApiResponse("eof".into()).is_api());

        assert!(!Error::configuration("no mode").is_api());
        assert!(!Error::AdvancementStalled { skips: 3 }.is_api());
        let fs = Error::file_system("/tmp/x", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!fs.is_api());
        assert_eq!(fs.status(), None);
    }

    #[test]
    fn test_messages_carry_details() {
        let err = Error::ApiStatus { status: 401, body: "Unauthorized".into() };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Unauthorized"));

        let err = Error::file_system("/music/a.mkv", std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(err.to_string().contains("/music/a.mkv"));
    }
}
