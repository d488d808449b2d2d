//! Sessions built from YAML configuration files.

use arbitraries::testing::init_logging;
use arbitraries::{GenConfig, GenError, GenValue, Session, TypeShape};
use std::io::Write;
use tempfile::NamedTempFile;

const CONFIG: &str = r#"
version: 1
seed: 42
min_size: 1
max_size: 6

synthesis:
  max_depth: 2
  none_probability: 0.0

generators:
  - type: uint8
    generator:
      type: int_range
      min: 18
      max: 80

  - type: text
    generator:
      type: pattern
      pattern: "user_{index}"

  - type:
      type: sequence
      element: text
    generator:
      type: sample_array
      pool: [rust, go, zig]
      min_length: 1
      max_length: 2

  - type:
      type: enum
      values: [draft, published]
    generator:
      type: one_of
      values: [published]
"#;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_session_from_file() {
    init_logging();

    let file = config_file(CONFIG);
    let mut session = Session::from_file(file.path()).unwrap();

    assert_eq!(session.sample::<u8>().map(|age| (18..=80).contains(&age)), Ok(true));
    assert_eq!(session.sample::<String>(), Ok("user_1".to_string()));

    let langs = session.sample::<Vec<String>>().unwrap();
    assert!((1..=2).contains(&langs.len()));
    assert!(langs
        .iter()
        .all(|lang| ["rust", "go", "zig"].contains(&lang.as_str())));

    let status = TypeShape::enumeration(["draft", "published"]);
    assert_eq!(
        session.sample_shape(&status),
        Ok(GenValue::Text("published".to_string()))
    );
}

#[test]
fn test_configured_generators_used_in_records() {
    let file = config_file(CONFIG);
    let mut session = Session::from_file(file.path()).unwrap();

    let shape = TypeShape::record(
        "Member",
        [
            ("name", TypeShape::Text),
            ("age", TypeShape::optional(TypeShape::UInt8)),
        ],
    );
    let value = session.sample_shape(&shape).unwrap();
    assert!(value.conforms_to(&shape));
    assert_eq!(value.field("name"), Some(&GenValue::Text("user_0".to_string())));
    let age = value.field("age").and_then(GenValue::as_u64).unwrap();
    assert!((18..=80).contains(&age));
}

#[test]
fn test_same_config_same_samples() {
    let config = GenConfig::from_yaml(CONFIG).unwrap();
    let mut first = Session::from_config(config.clone()).unwrap();
    let mut second = Session::from_config(config).unwrap();
    assert_eq!(first.seed(), second.seed());

    let shape = TypeShape::map(
        TypeShape::Int16,
        TypeShape::sequence(TypeShape::optional(TypeShape::Float64)),
    );
    for _ in 0..10 {
        assert_eq!(first.sample_shape(&shape), second.sample_shape(&shape));
        assert_eq!(
            first.sample::<Vec<u8>>(),
            second.sample::<Vec<u8>>()
        );
    }
}

#[test]
fn test_size_bounds_from_config() {
    let file = config_file(CONFIG);
    let mut session = Session::from_file(file.path()).unwrap();

    for _ in 0..30 {
        let values = session.sample::<Vec<i64>>().unwrap();
        assert!((1..=6).contains(&values.len()));
    }
}

#[test]
fn test_missing_file_reports_path() {
    let err = Session::from_file("/nonexistent/arbitraries.yaml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/arbitraries.yaml"));
}

#[test]
fn test_invalid_config_rejected() {
    let inverted = r#"
generators:
  - type: float64
    generator:
      type: float_range
      min: 10.0
      max: 1.0
"#;
    assert!(Session::from_file(config_file(inverted).path()).is_err());

    let bad_weight = r#"
generators:
  - type: bool
    generator:
      type: weighted_bool
      true_weight: 1.5
"#;
    assert!(Session::from_file(config_file(bad_weight).path()).is_err());

    let bad_probability = r#"
synthesis:
  none_probability: -0.1
"#;
    assert!(Session::from_file(config_file(bad_probability).path()).is_err());
}

#[test]
fn test_opaque_sample_fails_without_poisoning_session() {
    let mut session = Session::new(7);
    let result = session.sample_shape(&TypeShape::opaque("mutex"));
    assert!(matches!(result, Err(GenError::UnsupportedKind { .. })));
    assert!(session.sample::<bool>().is_ok());
}
