//! Runs the `types-probe` binary against a mock registry.

mod common;

use common::{NOT_FOUND_BODY, registry_path, single_version_packument};
use serde_json::json;
use std::process::{Command, Output};

fn run_probe(registry: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_types-probe"))
        .arg("--registry")
        .arg(registry)
        .args(args)
        .env_remove("TYPES_PROBE_REGISTRY")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run types-probe binary")
}

#[test]
fn test_prints_one_line_per_location() {
    let mut server = mockito::Server::new();
    let _react = server
        .mock("GET", registry_path("react").as_str())
        .with_status(200)
        .with_body(single_version_packument(
            "react",
            "18.2.0",
            json!({ "dependencies": { "loose-envify": "^1.1.0" } }),
        ))
        .create();
    let _types_react = server
        .mock("GET", registry_path("@types/react").as_str())
        .with_status(200)
        .with_body(single_version_packument("@types/react", "18.2.45", json!({})))
        .create();
    let _zod = server
        .mock("GET", registry_path("zod").as_str())
        .with_status(200)
        .with_body(single_version_packument(
            "zod",
            "3.22.4",
            json!({ "types": "index.d.ts" }),
        ))
        .create();

    let output = run_probe(
        &server.url(),
        &[
            "https://www.npmjs.com/package/react",
            "/package/zod",
            "/package/@types/react",
            "/",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "TYPE: @types/react@18.2.45",
            "TYPE: Package contains type definitions",
            "TYPE: Package is type definitions",
            "TYPE: Not found package name",
        ]
    );
}

#[test]
fn test_html_output() {
    let mut server = mockito::Server::new();
    let _missing = server
        .mock("GET", registry_path("missing-pkg").as_str())
        .with_status(404)
        .with_body(NOT_FOUND_BODY)
        .create();

    let output = run_probe(&server.url(), &["--html", "/package/missing-pkg"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim_end(),
        r#"<p id="npm-package-support"><span style="color:green">TYPE: </span>Failed to get package</p>"#
    );
}

#[test]
fn test_invalid_registry_url_fails() {
    let output = run_probe("not-a-url", &["/package/react"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
