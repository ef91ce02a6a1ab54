// ABOUTME: Test-vector runner for the CBOR stream decoder.
// ABOUTME: Parses JSON vector files, validates their structure, and checks decode results.
// ABOUTME: Each vector gives hex input and either the decoded stream or an error type.

use cbor_stream::{decode, Error, Value};
use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Known error types produced by the decoder.
const KNOWN_ERROR_TYPES: &[&str] = &[
    "invalid_length",
    "unsupported_length",
    "reserved_length",
    "truncated",
    "incomplete_container",
    "invalid_utf8",
    "odd_pair_count",
    "max_depth_exceeded",
    "max_document_size_exceeded",
    "duplicate_key",
];

/// Structural problems with a vector file itself (as opposed to decoder failures).
#[derive(Debug)]
enum ValidationError {
    Structural(String),
}

fn vector_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vectors")
        .join(name)
}

/// Convert a hex string (with optional spaces) to bytes.
fn hex_to_bytes(s: &str) -> Vec<u8> {
    let hex: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

/// Convert a JSON value to the expected decoded Value.
///
/// `{"$bytes": "hex"}` is a byte string and `{"$map": [[k, v], ...]}` a map
/// with non-text keys; every other object is a map with text keys.
fn json_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                Value::NegInt(n.as_i64().expect("vector numbers must be integers"))
            }
        }
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(arr) => Value::Array(arr.iter().map(json_to_value).collect()),
        JsonValue::Object(obj) => {
            if let Some(hex) = obj.get("$bytes").and_then(JsonValue::as_str) {
                return Value::Bytes(hex_to_bytes(hex));
            }
            if let Some(pairs) = obj.get("$map").and_then(JsonValue::as_array) {
                let map = pairs
                    .iter()
                    .map(|pair| (json_to_value(&pair[0]), json_to_value(&pair[1])))
                    .collect();
                return Value::Map(map);
            }
            let map: BTreeMap<Value, Value> = obj
                .iter()
                .map(|(k, v)| (Value::Text(k.clone()), json_to_value(v)))
                .collect();
            Value::Map(map)
        }
        JsonValue::Null | JsonValue::Bool(_) => {
            panic!("null and booleans are not decoded values: {json}")
        }
    }
}

fn validate_version(file: &JsonValue) -> Result<(), ValidationError> {
    let version_str = file
        .get("version")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ValidationError::Structural("missing version".into()))?;
    let semver_pattern = Regex::new(r"^\d+\.\d+\.\d+$").unwrap();
    if !semver_pattern.is_match(version_str) {
        return Err(ValidationError::Structural(format!(
            "invalid version format '{version_str}'"
        )));
    }
    Ok(())
}

fn validate_test_name(name: &str, seen_names: &mut HashSet<String>) -> Result<(), ValidationError> {
    let name_pattern = Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
    if !name_pattern.is_match(name) {
        return Err(ValidationError::Structural(format!(
            "invalid test name '{name}' (must match ^[a-z][a-z0-9_]*$)"
        )));
    }
    if !seen_names.insert(name.to_owned()) {
        return Err(ValidationError::Structural(format!("duplicate test name '{name}'")));
    }
    Ok(())
}

fn validate_hex_string(s: &str) -> Result<(), ValidationError> {
    let hex_pattern = Regex::new(r"^(?:[0-9a-fA-F]{2}\s*)*$").unwrap();
    if !hex_pattern.is_match(s.trim()) {
        return Err(ValidationError::Structural(format!("malformed hex string: '{s}'")));
    }
    Ok(())
}

fn validate_test(test: &JsonValue, seen_names: &mut HashSet<String>) -> Result<(), ValidationError> {
    let name = test
        .get("name")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ValidationError::Structural("test without name".into()))?;
    validate_test_name(name, seen_names)?;

    let input = test
        .get("input")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ValidationError::Structural(format!("{name}: missing input")))?;
    validate_hex_string(input)?;

    match (test.get("expected"), test.get("expected_error")) {
        (Some(JsonValue::Array(_)), None) => Ok(()),
        (None, Some(JsonValue::String(err))) if KNOWN_ERROR_TYPES.contains(&err.as_str()) => Ok(()),
        (None, Some(err)) => Err(ValidationError::Structural(format!(
            "{name}: unknown error type {err}"
        ))),
        _ => Err(ValidationError::Structural(format!(
            "{name}: needs exactly one of an 'expected' array or 'expected_error'"
        ))),
    }
}

fn run_test(test: &JsonValue) -> Result<(), String> {
    let name = test["name"].as_str().unwrap_or("<unnamed>");
    let input = hex_to_bytes(test["input"].as_str().unwrap_or_default());
    let result = decode(&input);

    if let Some(expected) = test.get("expected") {
        let expected: Vec<Value> = expected
            .as_array()
            .map(|arr| arr.iter().map(json_to_value).collect())
            .unwrap_or_default();
        return match result {
            Ok(values) if values == expected => Ok(()),
            Ok(values) => Err(format!("{name}: expected {expected:?}, got {values:?}")),
            Err(err) => Err(format!("{name}: unexpected error {err}")),
        };
    }

    let expected_error = test["expected_error"].as_str().unwrap_or_default();
    match result {
        Err(err) if err.error_type() == expected_error => Ok(()),
        Err(err) => Err(format!(
            "{name}: expected error {expected_error}, got {}",
            err.error_type()
        )),
        Ok(values) => Err(format!("{name}: expected error {expected_error}, decoded {values:?}")),
    }
}

/// Run every vector in a file, returning (passed, failures).
fn run_test_file(path: &Path) -> (usize, Vec<String>) {
    let text = fs::read_to_string(path).unwrap_or_else(|e| panic!("reading {path:?}: {e}"));
    let file: JsonValue = serde_json::from_str(&text).unwrap_or_else(|e| panic!("parsing {path:?}: {e}"));

    if let Err(ValidationError::Structural(msg)) = validate_version(&file) {
        return (0, vec![format!("{path:?}: {msg}")]);
    }

    let tests = file["tests"].as_array().cloned().unwrap_or_default();
    let mut seen_names = HashSet::new();
    let mut passed = 0;
    let mut failures = Vec::new();

    for test in &tests {
        if let Err(ValidationError::Structural(msg)) = validate_test(test, &mut seen_names) {
            failures.push(msg);
            continue;
        }
        match run_test(test) {
            Ok(()) => passed += 1,
            Err(msg) => failures.push(msg),
        }
    }
    (passed, failures)
}

fn assert_vector_file(file: &str) {
    let (passed, failures) = run_test_file(&vector_path(file));
    for failure in &failures {
        eprintln!("{failure}");
    }
    assert!(failures.is_empty(), "{} failures in {file}", failures.len());
    assert!(passed > 0, "no vectors ran in {file}");
    eprintln!("{file}: {passed} passed");
}

#[test]
fn test_conformance_integers() {
    assert_vector_file("integers.json");
}

#[test]
fn test_conformance_strings() {
    assert_vector_file("strings.json");
}

#[test]
fn test_conformance_containers() {
    assert_vector_file("containers.json");
}

#[test]
fn test_conformance_skipped_types() {
    assert_vector_file("skipped.json");
}

#[test]
fn test_runner_validation_structural_errors() {
    let mut seen = HashSet::new();
    let bad_name = serde_json::json!({"name": "Bad-Name", "input": "00", "expected": [0]});
    assert!(validate_test(&bad_name, &mut seen).is_err());

    let bad_hex = serde_json::json!({"name": "bad_hex", "input": "0g", "expected": [0]});
    assert!(validate_test(&bad_hex, &mut seen).is_err());

    let odd_hex = serde_json::json!({"name": "odd_hex", "input": "001", "expected": [0]});
    assert!(validate_test(&odd_hex, &mut seen).is_err());

    let unknown_error = serde_json::json!({"name": "unknown", "input": "00", "expected_error": "nope"});
    assert!(validate_test(&unknown_error, &mut seen).is_err());

    let both = serde_json::json!({"name": "both", "input": "00", "expected": [0], "expected_error": "truncated"});
    assert!(validate_test(&both, &mut seen).is_err());

    let good = serde_json::json!({"name": "good", "input": "00", "expected": [0]});
    assert!(validate_test(&good, &mut seen).is_ok());
    assert!(validate_test(&good, &mut seen).is_err(), "duplicate names are rejected");
}

#[test]
fn test_known_error_types_match_decoder() {
    let samples = [
        Error::InvalidLength(3),
        Error::UnsupportedLength(27),
        Error::ReservedLength(28),
        Error::Truncated,
        Error::IncompleteContainer { expected: 1, found: 0 },
        Error::InvalidUtf8,
        Error::OddPairCount(1),
        Error::MaxDepthExceeded,
        Error::MaxDocumentSizeExceeded,
        Error::DuplicateKey,
    ];
    for err in &samples {
        assert!(KNOWN_ERROR_TYPES.contains(&err.error_type()), "{err}");
    }
}

#[test]
fn test_unsigned_range_sweep() {
    // Minimal encodings across every width boundary.
    let mut n: u64 = 0;
    while n <= u64::from(u32::MAX) {
        let n32 = u32::try_from(n).unwrap();
        let mut bytes = Vec::new();
        match n32 {
            0..=23 => bytes.push(n32 as u8),
            24..=0xff => bytes.extend_from_slice(&[0x18, n32 as u8]),
            0x100..=0xffff => {
                bytes.push(0x19);
                bytes.extend_from_slice(&(n32 as u16).to_be_bytes());
            }
            _ => {
                bytes.push(0x1a);
                bytes.extend_from_slice(&n32.to_be_bytes());
            }
        }
        assert_eq!(decode(&bytes).unwrap(), vec![Value::UInt(n)]);

        // Negative counterpart: major type 1 with the same argument.
        bytes[0] |= 0x20;
        assert_eq!(decode(&bytes).unwrap(), vec![Value::NegInt(-1 - n as i64)]);

        n = n * 3 + 1;
    }
}
