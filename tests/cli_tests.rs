//! End-to-end tests for the populate and describe commands.

use seedfill::args::{DescribeArgs, PopulateArgs};
use seedfill::{load_schema, run_describe, run_populate};
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const SEED: u64 = 42;
const SCHEMA: &str = "tests/fixtures/people_schema.yaml";

fn populate_args(output: PathBuf, count: u64) -> PopulateArgs {
    PopulateArgs {
        schema: PathBuf::from(SCHEMA),
        type_name: "person".to_string(),
        count,
        seed: Some(SEED),
        output: Some(output),
        exclude: Vec::new(),
        depth: None,
    }
}

fn read_lines(path: &PathBuf) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_fixture_schema_loads() {
    let schema = load_schema(SCHEMA.as_ref()).unwrap();
    assert_eq!(schema.type_names(), vec!["person", "address"]);
    assert_eq!(schema.parameters.seed, Some(SEED));
}

#[test]
fn test_missing_schema_reports_path() {
    let err = load_schema("tests/fixtures/missing.yaml".as_ref()).unwrap_err();
    assert!(format!("{err:#}").contains("missing.yaml"));
}

#[test]
fn test_populate_writes_jsonl() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("people.jsonl");

    let metrics = run_populate(&populate_args(output.clone(), 20)).unwrap();
    assert_eq!(metrics.objects_written, 20);

    let people = read_lines(&output);
    assert_eq!(people.len(), 20);

    for (i, person) in people.iter().enumerate() {
        assert_eq!(person["email"], format!("user_{i}@example.com"));

        let age = person["age"].as_i64().unwrap();
        assert!((18..=80).contains(&age));

        let day = person["birth_day"].as_i64().unwrap();
        assert!((1..=31).contains(&day));

        let month = person["birth_month"].as_i64().unwrap();
        assert!((1..=12).contains(&month));

        // Unregistered generator falls back to a plain integer
        assert!(person["lucky_number"].is_i64());

        let id = person["id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let nicknames = person["nicknames"].as_array().unwrap();
        assert!((1..=3).contains(&nicknames.len()));

        let city = person["address"]["city"].as_str().unwrap();
        assert!(["Paris", "Oslo", "Lima"].contains(&city));
        assert!(person["address"]["moved_in"].is_string());
    }
}

#[test]
fn test_populate_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.jsonl");
    let second = temp_dir.path().join("second.jsonl");

    run_populate(&populate_args(first.clone(), 10)).unwrap();
    run_populate(&populate_args(second.clone(), 10)).unwrap();

    assert_eq!(
        std::fs::read_to_string(&first).unwrap(),
        std::fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn test_populate_exclusions_and_depth() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("people.jsonl");

    let mut args = populate_args(output.clone(), 5);
    args.exclude = vec!["person.email".to_string(), "status".to_string()];
    args.depth = Some(0);
    run_populate(&args).unwrap();

    for person in read_lines(&output) {
        assert!(person["email"].is_null());
        assert!(person["status"].is_null());
        assert!(person["address"].is_null());
        assert!(!person["age"].is_null());
    }
}

#[test]
fn test_populate_unknown_type_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = populate_args(temp_dir.path().join("out.jsonl"), 1);
    args.type_name = "order".to_string();

    let err = run_populate(&args).unwrap_err();
    assert!(format!("{err:#}").contains("order"));
}

#[test]
fn test_describe_lists_registries() {
    let args = DescribeArgs {
        schema: PathBuf::from(SCHEMA),
        type_name: None,
    };
    let mut buffer = Vec::new();
    run_describe(&args, &mut buffer).unwrap();
    let report = String::from_utf8(buffer).unwrap();

    let line = |path: &str| {
        report
            .lines()
            .find(|l| l.split_whitespace().next() == Some(path))
            .unwrap_or_else(|| panic!("no line for {path}"))
            .to_string()
    };

    assert!(line("person.id").ends_with("internal"));
    assert!(line("person.birth_day").ends_with("metadata"));
    assert!(line("person.joined").ends_with("time"));
    assert!(line("person.address").ends_with("(nested object)"));
    assert!(line("person.nicknames").ends_with("(collection)"));
    assert!(line("address.moved_in").ends_with("time"));
    // The unregistered generator is reported and the field falls back
    assert!(line("person.lucky_number").ends_with("internal"));
    assert!(report.contains("not_registered"));
}

#[test]
fn test_binary_writes_jsonl_to_stdout() {
    let output = Command::new(env!("CARGO_BIN_EXE_seedfill"))
        .args(["populate", "--schema", SCHEMA, "--type", "address", "--count", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        let address: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(address["street"].is_string());
    }
}

#[test]
fn test_binary_reports_errors() {
    let output = Command::new(env!("CARGO_BIN_EXE_seedfill"))
        .args(["describe", "--schema", "tests/fixtures/missing.yaml"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error: "));
}
