//! Shared fixtures for integration tests.
//!
//! Registry documents are served by a `mockito` server; helpers here build
//! the JSON bodies and wire a resolver to the server.

use serde_json::{Value, json};
use types_probe_core::HttpClient;
use types_probe_npm::NpmRegistry;
use types_probe_npm::registry::escape_package_name;

/// Registry's answer for unknown packages.
pub(crate) const NOT_FOUND_BODY: &str = r#"{"error":"Not found"}"#;

/// A packument with a single published version.
pub(crate) fn single_version_packument(name: &str, version: &str, extra: Value) -> String {
    let mut manifest = json!({
        "_id": format!("{}@{}", name, version),
        "name": name,
        "version": version,
    });
    if let (Some(target), Value::Object(fields)) = (manifest.as_object_mut(), extra) {
        target.extend(fields);
    }

    json!({
        "name": name,
        "dist-tags": { "latest": version },
        "versions": { version: manifest },
    })
    .to_string()
}

/// Request path the registry client uses for `name`.
pub(crate) fn registry_path(name: &str) -> String {
    format!("/{}", escape_package_name(name))
}

/// Registry client pointed at the mock server.
#[allow(dead_code)] // Used in resolution tests
pub(crate) fn registry_for(server: &mockito::Server) -> NpmRegistry {
    NpmRegistry::new(HttpClient::new().unwrap(), &server.url()).unwrap()
}

/// Mocks a `200` packument response for `name`, expecting `hits` requests.
#[allow(dead_code)] // Used in resolution tests
pub(crate) async fn mock_packument(
    server: &mut mockito::Server,
    name: &str,
    body: String,
    hits: usize,
) -> mockito::Mock {
    server
        .mock("GET", registry_path(name).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}

/// Mocks the registry's `404` "not found" document for `name`.
#[allow(dead_code)] // Used in resolution tests
pub(crate) async fn mock_not_found(
    server: &mut mockito::Server,
    name: &str,
    hits: usize,
) -> mockito::Mock {
    server
        .mock("GET", registry_path(name).as_str())
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(NOT_FOUND_BODY)
        .expect(hits)
        .create_async()
        .await
}
