//! Result of classifying one package page.

use thiserror::Error;

/// Successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSupport {
    /// The manifest has a `types` or `typings` field.
    OwnDeclarations,
    /// The package depends on its `@types` counterpart.
    DependsOn { type_package: String },
    /// An `@types` package exists on the registry.
    External {
        type_package: String,
        /// `<name>@<version>` of the declaration package's latest release.
        release_id: String,
    },
}

impl TypeSupport {
    /// Declaration package the outcome links to, if any.
    pub fn type_package(&self) -> Option<&str> {
        match self {
            Self::OwnDeclarations => None,
            Self::DependsOn { type_package } | Self::External { type_package, .. } => {
                Some(type_package.as_str())
            }
        }
    }
}

/// Terminal failures of a resolution.
///
/// The `Display` text is what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    #[error("Not found package name")]
    MissingPackageName,

    #[error("Package is type definitions")]
    TypeDeclarationPackage,

    #[error("Failed to get package")]
    PackageUnavailable,

    #[error("Version {0} not found")]
    VersionNotFound(String),

    #[error("Does not support types")]
    NoTypeSupport,
}

/// Outcome of one resolution: exactly one per navigation.
pub type ResolutionOutcome = Result<TypeSupport, ResolutionFailure>;
