//! npm ecosystem support for types-probe.
//!
//! This crate turns a package page path into a package identity, applies the
//! DefinitelyTyped naming rules, and fetches packuments from the npm registry.

pub mod error;
pub mod identity;
pub mod path;
pub mod registry;
pub mod types;

pub use error::{NpmError, Result};
pub use identity::{is_scoped, is_type_declaration_package, to_type_declaration_package_name};
pub use path::{package_page_path, parse_package_path};
pub use registry::{NpmRegistry, PackumentSource, REGISTRY_BASE, get_version, packument_url};
pub use types::{PackageIdentity, PackageVersion, Packument};
