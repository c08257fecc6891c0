//! End-to-end tests for the apimtemplate CLI

use std::path::PathBuf;
use std::process::Command;

use serde_json::Value as JsonValue;

fn fixture(name: &str) -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join("tests/fixtures/openapi")
        .join(name)
}

fn apimtemplate() -> Command {
    Command::new(env!("CARGO_BIN_EXE_apimtemplate"))
}

#[test]
fn test_create_writes_deployment_template() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("operations.template.json");

    let status = apimtemplate()
        .arg("create")
        .arg("--openapi")
        .arg(fixture("petstore.yaml"))
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let template: JsonValue =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let resources = template["resources"].as_array().unwrap();
    let names: Vec<_> = resources
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["listPets", "createPet", "showPetById"]);

    let list = &resources[0];
    assert_eq!(list["type"], "Microsoft.ApiManagement/service/apis/operations");
    assert_eq!(list["apiVersion"], "2018-06-01-preview");
    assert_eq!(list["properties"]["method"], "Get");
    assert_eq!(list["properties"]["displayName"], "List all pets");
    assert_eq!(
        list["properties"]["request"]["queryParameters"][0]["defaultValue"],
        "5"
    );
    assert_eq!(
        list["properties"]["request"]["headers"][0]["name"],
        "X-Request-Id"
    );
    let responses = list["properties"]["responses"].as_array().unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["statusCode"], "200");
    assert_eq!(
        responses[0]["representations"][0]["sample"],
        r#"[{"name":"Rex"},{"name":"Tom"}]"#
    );
    assert_eq!(responses[1]["statusCode"], "default");
    assert_eq!(responses[1]["description"], "Unexpected error");

    let create = &resources[1];
    let form = &create["properties"]["request"]["representations"][0];
    assert_eq!(form["contentType"], "application/x-www-form-urlencoded");
    assert_eq!(form["formParameters"][0]["name"], "name");
    assert_eq!(form["formParameters"][0]["required"], true);
    assert_eq!(form["formParameters"][1]["name"], "tag");
    assert_eq!(form["formParameters"][1]["required"], false);
    assert_eq!(create["properties"]["responses"][0]["statusCode"], "201");

    assert_eq!(resources[2]["properties"]["urlTemplate"], "/pets/{petId}");
}

#[test]
fn test_create_overrides_api_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    let status = apimtemplate()
        .args(["create", "--api-version", "2022-08-01", "--openapi"])
        .arg(fixture("petstore.yaml"))
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let template: JsonValue =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(template["resources"][0]["apiVersion"], "2022-08-01");
}

#[test]
fn test_create_requires_source_without_config() {
    let status = apimtemplate()
        .args(["create", "--output", "unused.json"])
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn test_missing_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let status = apimtemplate()
        .arg("create")
        .arg("--openapi")
        .arg(dir.path().join("missing.yaml"))
        .arg("--output")
        .arg(dir.path().join("out.json"))
        .status()
        .unwrap();
    assert!(!status.success());
}
