//! Type support classification.
//!
//! The checks run in a fixed order and the first match wins:
//!
//! 1. no package name in the path
//! 2. the package is itself an `@types` package
//! 3. the packument cannot be fetched
//! 4. the manifest bundles declarations
//! 5. the manifest depends on the `@types` counterpart
//! 6. the `@types` packument cannot be fetched
//! 7. otherwise the `@types` package is available
//!
//! Steps 1 and 2 never touch the network, and the `@types` packument is only
//! requested once steps 4 and 5 have both failed.

use crate::outcome::{ResolutionFailure, ResolutionOutcome, TypeSupport};
use types_probe_npm::{
    NpmError, PackumentSource, get_version, is_type_declaration_package, parse_package_path,
    to_type_declaration_package_name,
};

/// Classifies the package shown at a page path.
///
/// Holds no state of its own besides the packument source; every call to
/// [`resolve`](Self::resolve) is independent and performs no retries.
pub struct TypeSupportResolver<S> {
    source: S,
}

impl<S: PackumentSource> TypeSupportResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolves the type support status for `pathname`.
    ///
    /// Every registry or lookup error is mapped onto a [`ResolutionFailure`];
    /// nothing is propagated past this call.
    pub async fn resolve(&self, pathname: &str) -> ResolutionOutcome {
        let identity = parse_package_path(pathname);
        if !identity.has_name() {
            return Err(ResolutionFailure::MissingPackageName);
        }
        if is_type_declaration_package(&identity.name) {
            return Err(ResolutionFailure::TypeDeclarationPackage);
        }

        let packument = self
            .source
            .fetch_packument(&identity.name)
            .await
            .map_err(|e| {
                tracing::warn!("failed to fetch {}: {}", identity.name, e);
                ResolutionFailure::PackageUnavailable
            })?;

        let version = get_version(&packument, identity.version.as_deref()).map_err(|e| {
            tracing::warn!("{}", e);
            match e {
                NpmError::VersionNotFound { version, .. } => {
                    ResolutionFailure::VersionNotFound(version)
                }
                _ => ResolutionFailure::PackageUnavailable,
            }
        })?;

        if version.has_type_declaration() {
            return Ok(TypeSupport::OwnDeclarations);
        }

        let type_package = to_type_declaration_package_name(&identity.name);
        if version.declares_dependency(&type_package) {
            return Ok(TypeSupport::DependsOn { type_package });
        }

        let types_packument = self
            .source
            .fetch_packument(&type_package)
            .await
            .map_err(|e| {
                tracing::debug!("no declaration package for {}: {}", identity.name, e);
                ResolutionFailure::NoTypeSupport
            })?;

        // A declaration package without a resolvable latest release offers
        // nothing to link to.
        let release = get_version(&types_packument, None).map_err(|e| {
            tracing::debug!("{}", e);
            ResolutionFailure::NoTypeSupport
        })?;

        Ok(TypeSupport::External {
            release_id: release.release_id(),
            type_package,
        })
    }
}
