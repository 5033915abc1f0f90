//! Errors raised while looking packages up on the npm registry.
//!
//! Transport failures and shape failures are separate variants so callers can
//! tell "the registry could not be reached" from "the registry answered with
//! something that is not a packument".

use thiserror::Error;

/// Errors specific to npm registry lookups.
#[derive(Error, Debug)]
pub enum NpmError {
    /// Network-level failure reaching the registry
    #[error("npm registry request failed for '{package}': {source}")]
    Transport {
        package: String,
        #[source]
        source: types_probe_core::CoreError,
    },

    /// Response body is not valid JSON, or not the expected structure
    #[error("Failed to parse npm registry response for '{package}': {source}")]
    MalformedResponse {
        package: String,
        #[source]
        source: serde_json::Error,
    },

    /// Response parsed but has no `dist-tags` (e.g. a "not found" document)
    #[error("Registry response for '{package}' is not a packument: {body}")]
    NotAPackument {
        package: String,
        body: serde_json::Value,
    },

    /// Requested version is not published in the packument
    #[error("Version '{version}' of '{package}' not found")]
    VersionNotFound { package: String, version: String },

    /// Packument has no `latest` dist-tag to default to
    #[error("Packument for '{package}' has no latest dist-tag")]
    MissingLatestTag { package: String },

    /// Registry base URL is unusable
    #[error("Invalid registry URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for npm operations.
pub type Result<T> = std::result::Result<T, NpmError>;

impl NpmError {
    /// Create a transport error.
    pub fn transport(package: impl Into<String>, source: types_probe_core::CoreError) -> Self {
        Self::Transport {
            package: package.into(),
            source,
        }
    }

    /// Create a malformed response error.
    pub fn malformed_response(package: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedResponse {
            package: package.into(),
            source,
        }
    }

    /// Create a not-a-packument error carrying the raw parsed body.
    pub fn not_a_packument(package: impl Into<String>, body: serde_json::Value) -> Self {
        Self::NotAPackument {
            package: package.into(),
            body,
        }
    }

    /// Create a version-not-found error.
    pub fn version_not_found(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self::VersionNotFound {
            package: package.into(),
            version: version.into(),
        }
    }

    /// Create a missing-latest-tag error.
    pub fn missing_latest_tag(package: impl Into<String>) -> Self {
        Self::MissingLatestTag {
            package: package.into(),
        }
    }

    /// Returns `true` if the registry could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` if the registry answered with a non-packument document.
    pub fn is_not_a_packument(&self) -> bool {
        matches!(self, Self::NotAPackument { .. })
    }
}
