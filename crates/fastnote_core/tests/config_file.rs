use fastnote_core::{AppConfig, ConfigError};

const CONFIG_YAML: &str = "\
window:
  theme: light
  title: FastNotes
  size: 400x600
  icon: assets/icon.ico
editor:
  font: Consolas 11
  size: 500x400
  wrap: word
shortcuts:
  new_note: Ctrl+N
";

fn write_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, CONFIG_YAML).unwrap();
    path
}

#[test]
fn missing_config_is_reported_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::load(dir.path().join("config.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
    assert!(err.to_string().contains("config.yaml"));
}

#[test]
fn malformed_config_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "window: [unclosed").unwrap();

    assert!(matches!(
        AppConfig::load(&path).unwrap_err(),
        ConfigError::Parse(_)
    ));
}

#[test]
fn load_reads_window_and_editor_sections() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(write_config(&dir)).unwrap();

    assert_eq!(config.window.theme, "light");
    assert_eq!(config.window.title, "FastNotes");
    assert_eq!(config.window.size, "400x600");
    assert_eq!(config.editor.font.as_str(), Some("Consolas 11"));
    assert_eq!(config.editor.size, "500x400");
}

#[test]
fn toggled_theme_is_persisted_with_unknown_keys_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir);

    let mut config = AppConfig::load(&path).unwrap();
    assert_eq!(config.toggle_theme(), "dark");
    config.save(&path).unwrap();

    let reloaded = AppConfig::load(&path).unwrap();
    assert_eq!(reloaded.window.theme, "dark");
    assert!(reloaded.extra.contains_key("shortcuts"));
    assert_eq!(
        reloaded.window.extra.get("icon").and_then(|v| v.as_str()),
        Some("assets/icon.ico")
    );
    assert_eq!(
        reloaded.editor.extra.get("wrap").and_then(|v| v.as_str()),
        Some("word")
    );
    assert_eq!(reloaded, config);
}
