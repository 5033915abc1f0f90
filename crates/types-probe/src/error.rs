use std::path::PathBuf;
use thiserror::Error;

/// Error types for the types-probe application.
///
/// Resolution failures are not represented here: they are ordinary outcomes
/// (see [`crate::outcome::ResolutionFailure`]) and are rendered, not raised.
/// These are the errors that stop a command before or around resolution.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Core(#[from] types_probe_core::CoreError),

    #[error(transparent)]
    Npm(#[from] types_probe_npm::NpmError),

    #[error(transparent)]
    Presentation(#[from] PresentationError),

    #[error("navigation watcher stopped before rendering {0}")]
    WatcherStopped(String),
}

/// Failures while writing an annotation into the host page.
///
/// Fatal for the invocation that hit it; the navigation watcher keeps running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
    #[error("Not found {0}")]
    AnchorNotFound(String),

    #[error("Anchor {0} has no child element")]
    AnchorEmpty(String),
}

/// Convenience type alias for `Result<T, ProbeError>`.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_error_display() {
        let error = PresentationError::AnchorNotFound("#top".into());
        assert_eq!(error.to_string(), "Not found #top");

        let error = PresentationError::AnchorEmpty("#top".into());
        assert_eq!(error.to_string(), "Anchor #top has no child element");
    }

    #[test]
    fn test_config_read_error() {
        let error = ProbeError::ConfigRead {
            path: PathBuf::from("/etc/types-probe.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(
            error
                .to_string()
                .contains("failed to read config file /etc/types-probe.json")
        );
    }

    #[test]
    fn test_npm_error_is_transparent() {
        let error: ProbeError = types_probe_npm::NpmError::InvalidUrl("ftp://x".into()).into();
        assert_eq!(error.to_string(), "Invalid registry URL: ftp://x");
    }
}
