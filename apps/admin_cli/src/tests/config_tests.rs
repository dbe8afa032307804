use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = Settings::default();
    assert_eq!(settings.api_url, "http://localhost:8080");
    assert_eq!(settings.token, None);
    assert_eq!(settings.page_size.get(), 20);
    assert_eq!(settings.pagination, PaginationMode::Client);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    settings
        .apply_file(
            r#"
api_url = "https://admin.example.com"
page_size = 50
server_pagination = true
"#,
        )
        .expect("parse");

    assert_eq!(settings.api_url, "https://admin.example.com");
    assert_eq!(settings.page_size.get(), 50);
    assert_eq!(settings.pagination, PaginationMode::Server);
    assert_eq!(settings.token, None);
}

#[test]
fn zero_page_size_in_file_is_rejected() {
    let mut settings = Settings::default();
    assert!(settings.apply_file("page_size = 0").is_err());
    assert!(settings.apply_file("api_uri = \"typo\"").is_err());
}

#[test]
fn app_prefixed_env_wins_over_short_names() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[
        ("ADMIN_API_URL", "http://short.example"),
        ("APP__API_URL", "http://app.example"),
        ("ADMIN_TOKEN", "short-token"),
        ("APP__PAGE_SIZE", "10"),
    ]));

    assert_eq!(settings.api_url, "http://app.example");
    assert_eq!(settings.token.as_deref(), Some("short-token"));
    assert_eq!(settings.page_size.get(), 10);
}

#[test]
fn invalid_env_values_are_ignored() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[
        ("APP__PAGE_SIZE", "zero"),
        ("APP__SERVER_PAGINATION", "sometimes"),
    ]));

    assert_eq!(settings, Settings::default());
}

#[test]
fn explicit_config_file_is_loaded_and_must_exist() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("admin_cli_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("create temp dir");
    let path = temp_root.join("admin.toml");
    fs::write(&path, "token = \"file-token\"\npage_size = 5\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.page_size.get(), 5);

    let missing = temp_root.join("missing.toml");
    assert!(load_settings(Some(&missing)).is_err());

    fs::remove_dir_all(temp_root).expect("cleanup");
}
