//! Package page path parsing.
//!
//! npmjs.com serves package pages at:
//! - `/package/foo`
//! - `/package/@scope/foo`
//! - `/package/foo/v/1.0.0`
//! - `/package/@scope/foo/v/1.0.0`

use crate::types::PackageIdentity;

/// Separator between the package name and an explicit version.
const VERSION_SEPARATOR: &str = "/v/";

/// Number of leading segments (`""` and `"package"`) before the name.
const ROUTE_PREFIX_SEGMENTS: usize = 2;

/// Extracts the package name and optional version from a page path.
///
/// The name is everything after the routing prefix up to `/v/`, so scoped
/// names keep their inner `/`. No validation happens: a path that does not
/// carry a name yields an empty `name`.
///
/// # Examples
///
/// ```
/// use types_probe_npm::path::parse_package_path;
///
/// let identity = parse_package_path("/package/@scope/foo/v/1.0.0");
/// assert_eq!(identity.name, "@scope/foo");
/// assert_eq!(identity.version.as_deref(), Some("1.0.0"));
///
/// assert_eq!(parse_package_path("/").name, "");
/// ```
pub fn parse_package_path(pathname: &str) -> PackageIdentity {
    let mut parts = pathname.split(VERSION_SEPARATOR);
    let name_part = parts.next().unwrap_or_default();
    let version = parts.next();

    let name = name_part
        .split('/')
        .skip(ROUTE_PREFIX_SEGMENTS)
        .collect::<Vec<_>>()
        .join("/");

    PackageIdentity::new(name, version)
}

/// Path of the package page for `name` on the registry website.
pub fn package_page_path(name: &str) -> String {
    format!("/package/{}", name)
}
