//! Naming rules for DefinitelyTyped declaration packages.
//!
//! - `foo` -> `@types/foo`
//! - `@scope/foo` -> `@types/scope__foo`

/// Scope that hosts external declaration packages.
pub const TYPES_SCOPE_PREFIX: &str = "@types/";

/// `true` iff `name` is itself a declaration package.
pub fn is_type_declaration_package(name: &str) -> bool {
    name.starts_with(TYPES_SCOPE_PREFIX)
}

/// `true` iff `name` is scoped (`@scope/name`).
pub fn is_scoped(name: &str) -> bool {
    name.starts_with('@')
}

/// Name of the declaration package that would cover `name`.
///
/// Scoped names drop the leading `@` and have their first `/` replaced with
/// `__`. Only the first `/` is replaced.
///
/// # Examples
///
/// ```
/// use types_probe_npm::identity::to_type_declaration_package_name;
///
/// assert_eq!(to_type_declaration_package_name("react"), "@types/react");
/// assert_eq!(to_type_declaration_package_name("@babel/core"), "@types/babel__core");
/// ```
pub fn to_type_declaration_package_name(name: &str) -> String {
    match name.strip_prefix('@') {
        Some(scoped) => format!("{}{}", TYPES_SCOPE_PREFIX, scoped.replacen('/', "__", 1)),
        None => format!("{}{}", TYPES_SCOPE_PREFIX, name),
    }
}
