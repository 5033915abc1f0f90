use thiserror::Error;

/// Core error types for types-probe.
///
/// Only failures of the transport itself live here. A registry answering with
/// an unexpected status or body is not an error at this layer; shape checks
/// belong to the ecosystem crates.
///
/// # Examples
///
/// ```
/// use types_probe_core::error::{CoreError, Result};
///
/// fn require_https(url: &str) -> Result<()> {
///     if !url.starts_with("https://") {
///         return Err(CoreError::InvalidUrl(url.into()));
///     }
///     Ok(())
/// }
///
/// assert!(require_https("http://registry.npmjs.com").is_err());
/// ```
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl CoreError {
    /// Returns `true` for failures that happened on the wire.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Convenience type alias for `Result<T, CoreError>`.
pub type Result<T> = std::result::Result<T, CoreError>;
