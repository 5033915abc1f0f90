//! npm registry client.
//!
//! Fetches packuments from the package metadata API
//! (<https://registry.npmjs.com/{package}>). Every successfully validated
//! packument is memoized for the lifetime of the client's cache; a hit never
//! touches the network.

use crate::error::{NpmError, Result};
use crate::types::{PackageVersion, Packument};
use async_trait::async_trait;
use std::sync::Arc;
use types_probe_core::{HttpClient, MemoCache};

/// Default registry metadata endpoint.
pub const REGISTRY_BASE: &str = "https://registry.npmjs.com";

/// Field whose presence marks a document as a packument.
const DIST_TAGS_FIELD: &str = "dist-tags";

/// Source of packuments.
///
/// `NpmRegistry` is the production implementation; resolution logic is
/// written against this trait so it can run on any source.
#[async_trait]
pub trait PackumentSource: Send + Sync {
    /// Fetches the packument for `name`.
    ///
    /// # Errors
    ///
    /// Returns `NpmError::Transport`, `NpmError::MalformedResponse` or
    /// `NpmError::NotAPackument`.
    async fn fetch_packument(&self, name: &str) -> Result<Arc<Packument>>;
}

/// Escapes a package name for use as a registry path segment.
///
/// Only `/` is escaped (as `%2F`); scoped names are otherwise sent verbatim.
pub fn escape_package_name(name: &str) -> String {
    name.replace('/', "%2F")
}

/// Returns the metadata URL for `name` under `base`.
///
/// # Examples
///
/// ```
/// use types_probe_npm::registry::packument_url;
///
/// assert_eq!(
///     packument_url("https://registry.npmjs.com", "@types/node"),
///     "https://registry.npmjs.com/@types%2Fnode"
/// );
/// ```
pub fn packument_url(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), escape_package_name(name))
}

/// Client for the npm registry metadata API.
///
/// Cloning shares both the HTTP connection pool and the packument cache.
#[derive(Clone)]
pub struct NpmRegistry {
    http: HttpClient,
    base_url: String,
    cache: Arc<MemoCache<Packument>>,
}

impl NpmRegistry {
    /// Creates a client for `base_url` with a fresh, empty cache.
    ///
    /// # Errors
    ///
    /// Returns `NpmError::InvalidUrl` if `base_url` is not an http(s) URL.
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self> {
        Self::with_cache(http, base_url, Arc::new(MemoCache::new()))
    }

    /// Creates a client that reads and fills the given cache.
    pub fn with_cache(
        http: HttpClient,
        base_url: &str,
        cache: Arc<MemoCache<Packument>>,
    ) -> Result<Self> {
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(NpmError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of packuments memoized so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Fetches the packument for `name`, consulting the cache first.
    ///
    /// On a miss the registry is queried once; the response is parsed and
    /// validated before being cached. Failed lookups are not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the request fails at the network level (`Transport`)
    /// - the body is not JSON (`MalformedResponse`)
    /// - the JSON has no `dist-tags` field (`NotAPackument`)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use types_probe_npm::NpmRegistry;
    /// # use types_probe_core::HttpClient;
    /// # #[tokio::main]
    /// # async fn main() {
    /// let registry = NpmRegistry::new(HttpClient::new().unwrap(), "https://registry.npmjs.com").unwrap();
    /// let packument = registry.fetch_packument("left-pad").await.unwrap();
    /// assert!(packument.latest().is_some());
    /// # }
    /// ```
    pub async fn fetch_packument(&self, name: &str) -> Result<Arc<Packument>> {
        if let Some(cached) = self.cache.get(name) {
            tracing::debug!("packument cache hit: {}", name);
            return Ok(cached);
        }

        let url = packument_url(&self.base_url, name);
        let response = self
            .http
            .get(&url)
            .await
            .map_err(|e| NpmError::transport(name, e))?;

        let packument = parse_packument(name, &response.body)?;
        tracing::debug!(
            "cached packument for {} ({} versions)",
            name,
            packument.versions.len()
        );

        Ok(self.cache.insert(name, packument))
    }
}

#[async_trait]
impl PackumentSource for NpmRegistry {
    async fn fetch_packument(&self, name: &str) -> Result<Arc<Packument>> {
        self.fetch_packument(name).await
    }
}

/// Parses a registry response body into a validated packument.
pub fn parse_packument(name: &str, body: &[u8]) -> Result<Packument> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| NpmError::malformed_response(name, e))?;
    validate_packument(name, value)
}

/// Checks the shape of an already parsed registry document.
///
/// A document without `dist-tags` (the registry's "not found" answer, for
/// instance) is rejected with `NotAPackument` and handed back untouched. A
/// document that has `dist-tags` but does not fit the packument structure is
/// reported as `MalformedResponse`.
pub fn validate_packument(name: &str, value: serde_json::Value) -> Result<Packument> {
    let has_dist_tags = value
        .as_object()
        .is_some_and(|object| object.contains_key(DIST_TAGS_FIELD));
    if !has_dist_tags {
        return Err(NpmError::not_a_packument(name, value));
    }

    serde_json::from_value(value).map_err(|e| NpmError::malformed_response(name, e))
}

/// Returns the manifest of `version`, or of the `latest` dist-tag when
/// `version` is `None` or empty.
///
/// Only the selected manifest is decoded.
///
/// # Errors
///
/// Returns `NpmError::MissingLatestTag` if no version was asked for and the
/// packument has no `latest` tag, `NpmError::VersionNotFound` if the version
/// is not present, and `NpmError::MalformedResponse` if its manifest is not
/// an object.
pub fn get_version(packument: &Packument, version: Option<&str>) -> Result<PackageVersion> {
    let requested = match version.filter(|v| !v.is_empty()) {
        Some(v) => v,
        None => packument
            .latest()
            .ok_or_else(|| NpmError::missing_latest_tag(&packument.name))?,
    };

    packument
        .manifest(requested)
        .ok_or_else(|| NpmError::version_not_found(&packument.name, requested))?
        .map_err(|e| NpmError::malformed_response(&packument.name, e))
}
