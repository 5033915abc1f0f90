use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Package name and optional version, as derived from a package page path.
///
/// # Examples
///
/// ```
/// use types_probe_npm::types::PackageIdentity;
///
/// let identity = PackageIdentity::new("@scope/name", Some("1.0.0"));
/// assert!(identity.is_scoped());
/// assert_eq!(identity.version.as_deref(), Some("1.0.0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    pub name: String,
    pub version: Option<String>,
}

impl PackageIdentity {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            version: version.map(String::from),
        }
    }

    /// An empty name means the path did not point at a package.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_scoped(&self) -> bool {
        crate::identity::is_scoped(&self.name)
    }
}

/// Full registry record for one package name ("packument").
///
/// Retrieved from `https://registry.npmjs.com/{package}`. Only the fields
/// needed to classify declaration support are kept.
///
/// # Examples
///
/// ```
/// use types_probe_npm::types::Packument;
///
/// let json = r#"{
///     "name": "left-pad",
///     "dist-tags": { "latest": "1.3.0" },
///     "versions": {
///         "1.3.0": { "_id": "left-pad@1.3.0", "name": "left-pad", "version": "1.3.0" }
///     }
/// }"#;
///
/// let packument: Packument = serde_json::from_str(json).unwrap();
/// assert_eq!(packument.latest(), Some("1.3.0"));
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Packument {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "dist-tags")]
    pub dist_tags: HashMap<String, Value>,
    /// Raw manifests keyed by version. Each one is decoded on demand by
    /// [`manifest`](Self::manifest), so a legacy manifest elsewhere in the
    /// history does not spoil the whole document.
    #[serde(default, deserialize_with = "lenient")]
    pub versions: HashMap<String, Value>,
}

impl Packument {
    /// Version string the `latest` dist-tag points at.
    pub fn latest(&self) -> Option<&str> {
        self.dist_tags.get("latest").and_then(Value::as_str)
    }

    /// Decodes the manifest published as `version`.
    ///
    /// Returns `None` if the version is absent. A present manifest that is
    /// not a JSON object is a decode error.
    pub fn manifest(&self, version: &str) -> Option<serde_json::Result<PackageVersion>> {
        self.versions
            .get(version)
            .map(|raw| PackageVersion::deserialize(raw))
    }
}

/// Manifest fields of one published version.
///
/// Mirrors the version object of the registry API. Every field is optional,
/// and a field with an unexpected shape (old manifests carry `"dependencies": []`,
/// for one) reads as absent.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PackageVersion {
    /// `<name>@<version>`
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient")]
    pub types: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub typings: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dependencies: Option<HashMap<String, Value>>,
}

impl PackageVersion {
    /// `true` iff the manifest points at bundled declarations.
    pub fn has_type_declaration(&self) -> bool {
        let non_empty = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        non_empty(&self.types) || non_empty(&self.typings)
    }

    /// `true` iff `dependencies` has a non-empty range for `dep_name`.
    pub fn declares_dependency(&self, dep_name: &str) -> bool {
        self.dependencies
            .as_ref()
            .and_then(|deps| deps.get(dep_name))
            .and_then(Value::as_str)
            .is_some_and(|range| !range.is_empty())
    }

    /// Release identifier, falling back to `<name>@<version>` when `_id` is absent.
    pub fn release_id(&self) -> String {
        if self.id.is_empty() {
            format!("{}@{}", self.name, self.version)
        } else {
            self.id.clone()
        }
    }
}

/// Reads a field of any shape, falling back to the default when it does not
/// fit `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
