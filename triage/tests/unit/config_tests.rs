use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;
use tracing::Level;
use triage::config::{
    ConfigError, ConfigFile, ConfigStore, DEFAULT_BASE_URL, Overrides, Settings,
};
use triage_markup::Theme;

fn write_config(root: &Path, body: &str) {
    fs::create_dir_all(root).unwrap();
    fs::write(root.join("config.toml"), body).unwrap();
}

#[test]
fn defaults_apply_without_any_file() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::with_roots(dir.path().join("local"), None);

    let file = store.load_files(None).unwrap();
    assert_eq!(file, ConfigFile::default());

    let settings = Settings::resolve(file, &Overrides::default()).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.request_timeout, Duration::from_secs(60));
}

#[test]
fn local_file_overrides_global() {
    let dir = tempdir().unwrap();
    let local = dir.path().join("local");
    let global = dir.path().join("global");
    write_config(
        &global,
        "base_url = \"http://global:5000\"\ntheme = \"dark\"\n",
    );
    write_config(&local, "base_url = \"http://local:5000/\"\n");

    let store = ConfigStore::with_roots(&local, Some(global));
    let settings = Settings::resolve(store.load_files(None).unwrap(), &Overrides::default()).unwrap();

    assert_eq!(settings.base_url, "http://local:5000");
    assert_eq!(settings.theme, Theme::Dark);
}

#[test]
fn explicit_file_overrides_local() {
    let dir = tempdir().unwrap();
    let local = dir.path().join("local");
    write_config(&local, "request_timeout_secs = 10\nlog_level = \"info\"\n");
    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "request_timeout_secs = 5\n").unwrap();

    let store = ConfigStore::with_roots(&local, None);
    let file = store.load_files(Some(&explicit)).unwrap();

    assert_eq!(file.request_timeout_secs, Some(5));
    assert_eq!(file.log_level.as_deref(), Some("info"));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::with_roots(dir.path().join("local"), None);
    let result = store.load_files(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let local = dir.path().join("local");
    write_config(&local, "base_url = [\n");
    let store = ConfigStore::with_roots(&local, None);
    assert!(matches!(store.load_files(None), Err(ConfigError::Parse { .. })));
}

#[test]
fn command_line_beats_files() {
    let file = ConfigFile {
        base_url: Some("http://file:5000".to_string()),
        request_timeout_secs: Some(30),
        ..ConfigFile::default()
    };
    let overrides = Overrides {
        base_url: Some("https://cli.example".to_string()),
        timeout_secs: Some(7),
        verbose: 0,
    };

    let settings = Settings::resolve(file, &overrides).unwrap();
    assert_eq!(settings.base_url, "https://cli.example");
    assert_eq!(settings.request_timeout, Duration::from_secs(7));
}

#[test]
fn invalid_values_are_rejected() {
    let bad_theme = ConfigFile {
        theme: Some("neon".to_string()),
        ..ConfigFile::default()
    };
    assert!(matches!(
        Settings::resolve(bad_theme, &Overrides::default()),
        Err(ConfigError::Invalid { key: "theme", .. })
    ));

    let zero_timeout = Overrides {
        timeout_secs: Some(0),
        ..Overrides::default()
    };
    assert!(matches!(
        Settings::resolve(ConfigFile::default(), &zero_timeout),
        Err(ConfigError::Invalid { key: "request_timeout_secs", .. })
    ));

    let no_scheme = Overrides {
        base_url: Some("localhost:5000".to_string()),
        ..Overrides::default()
    };
    assert!(matches!(
        Settings::resolve(ConfigFile::default(), &no_scheme),
        Err(ConfigError::Invalid { key: "base_url", .. })
    ));
}

#[test]
fn verbosity_raises_the_configured_level() {
    let file = ConfigFile {
        log_level: Some("info".to_string()),
        ..ConfigFile::default()
    };
    let overrides = Overrides {
        verbose: 1,
        ..Overrides::default()
    };
    assert_eq!(
        Settings::resolve(file, &overrides).unwrap().log_level,
        Level::DEBUG
    );

    let loud = Overrides {
        verbose: 9,
        ..Overrides::default()
    };
    assert_eq!(
        Settings::resolve(ConfigFile::default(), &loud).unwrap().log_level,
        Level::TRACE
    );
}

#[test]
fn merge_keeps_lower_layer_where_upper_is_silent() {
    let lower = ConfigFile {
        base_url: Some("http://lower".to_string()),
        insecure_tls: Some(true),
        ..ConfigFile::default()
    };
    let upper = ConfigFile {
        base_url: Some("http://upper".to_string()),
        ..ConfigFile::default()
    };
    let merged = lower.merge(upper);
    assert_eq!(merged.base_url.as_deref(), Some("http://upper"));
    assert_eq!(merged.insecure_tls, Some(true));
}
