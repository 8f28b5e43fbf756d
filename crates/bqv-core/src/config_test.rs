use super::*;
use std::io::Write;

#[test]
fn test_parse_empty_mapping_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(
        config.api_base_url,
        "https://bigquery.googleapis.com/bigquery/v2"
    );
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.page_size, 1000);
    assert!(config.qualify_tables);
    assert!(config.include_header);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
api_base_url: "http://localhost:9050/bigquery/v2"
timeout_secs: 5
page_size: 50
access_token_command: ["print-token", "--quiet"]
qualify_tables: false
include_header: false
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.api_base_url, "http://localhost:9050/bigquery/v2");
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.page_size, 50);
    assert_eq!(config.access_token_command, vec!["print-token", "--quiet"]);
    assert!(!config.qualify_tables);
    assert!(!config.include_header);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(&dir.path().join("bqv.yml"));
    assert!(matches!(result, Err(CoreError::ConfigNotFound { .. })));
}

#[test]
fn test_load_from_dir_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bqv.yml"), "page_size: 10\n").unwrap();
    std::fs::write(dir.path().join("bqv.yaml"), "page_size: 20\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.page_size, 10);
}

#[test]
fn test_load_empty_file_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\n").unwrap();
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_rejects_zero_page_size() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"page_size: 0\n").unwrap();
    match Config::load(file.path()) {
        Err(CoreError::ConfigInvalid { message }) => assert!(message.contains("page_size")),
        other => panic!("Expected ConfigInvalid, got: {:?}", other),
    }
}

#[test]
fn test_load_rejects_empty_token_command() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"access_token_command: []\n").unwrap();
    assert!(matches!(
        Config::load(file.path()),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_load_malformed_yaml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"timeout_secs: [unclosed\n").unwrap();
    assert!(matches!(
        Config::load(file.path()),
        Err(CoreError::ConfigParseError(_))
    ));
}
