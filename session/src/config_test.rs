use super::*;

#[test]
fn default_points_at_local_development_api() {
    let config = ApiConfig::default();
    assert_eq!(config.base_url(), "http://localhost:8000/api/");
}

#[test]
fn from_env_value_falls_back_when_absent_or_blank() {
    assert_eq!(ApiConfig::from_env_value(None).unwrap(), ApiConfig::default());
    assert_eq!(ApiConfig::from_env_value(Some("   ")).unwrap(), ApiConfig::default());
}

#[test]
fn from_env_value_uses_override() {
    let config = ApiConfig::from_env_value(Some("https://gecos.example.edu/api")).unwrap();
    assert_eq!(config.base_url(), "https://gecos.example.edu/api/");
}

#[test]
fn new_collapses_trailing_slashes() {
    let config = ApiConfig::new("http://127.0.0.1:8000/api///").unwrap();
    assert_eq!(config.base_url(), "http://127.0.0.1:8000/api/");
}

#[test]
fn new_accepts_root_relative_path() {
    let config = ApiConfig::new("/api").unwrap();
    assert_eq!(config.base_url(), "/api/");
    assert_eq!(config.endpoint("login/"), "/api/login/");
}

#[test]
fn new_rejects_empty_value() {
    assert!(matches!(ApiConfig::new("  "), Err(ConfigError::Empty)));
}

#[test]
fn new_rejects_garbage() {
    assert!(matches!(
        ApiConfig::new("not a url"),
        Err(ConfigError::InvalidUrl { .. })
    ));
}

#[test]
fn new_rejects_non_http_scheme() {
    assert!(matches!(
        ApiConfig::new("ftp://files.example.edu/api"),
        Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
    ));
}

#[test]
fn endpoint_strips_leading_slash_from_path() {
    let config = ApiConfig::default();
    assert_eq!(config.endpoint("/salones/3/"), "http://localhost:8000/api/salones/3/");
    assert_eq!(config.endpoint("salones/"), "http://localhost:8000/api/salones/");
}
