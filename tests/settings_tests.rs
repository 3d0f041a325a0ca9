use day_planner::{Settings, SettingsError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn load_reads_json_file() {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(
        file,
        r#"{{ "log_filter": "day_planner=debug", "show_prompt": false, "echo_conflicts": false }}"#
    )
    .unwrap();

    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(
        settings,
        Settings {
            log_filter: "day_planner=debug".to_string(),
            show_prompt: false,
            echo_conflicts: false,
        }
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io { .. }));
}

#[test]
fn malformed_file_is_a_json_error() {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "not json").unwrap();
    let err = Settings::load(file.path()).unwrap_err();
    assert!(matches!(err, SettingsError::Json { .. }));
    assert!(err.to_string().starts_with("invalid settings JSON in "));
}
