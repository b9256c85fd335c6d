//! Environment-driven configuration tests
//!
//! These mutate process environment variables, so they are serialized.

use serial_test::serial;

use clearmind_engine::config::{Config, LogFormat};

const ENV_VARS: &[&str] = &[
    "ANTHROPIC_API_KEY",
    "ANTHROPIC_BASE_URL",
    "ANALYSIS_MODEL",
    "REQUEST_TIMEOUT_MS",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "FALLBACK_CONFIDENCE",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_without_any_env() {
    clear_env();
    let config = Config::from_env().expect("config");

    assert!(config.backend.api_key.is_none());
    assert_eq!(config.backend.base_url, "https://api.anthropic.com");
    assert_eq!(config.backend.model, "claude-3-haiku-20240307");
    assert_eq!(config.request.timeout_ms, 30000);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.limits.max_distortions, 3);
    assert_eq!(config.limits.max_reframes, 2);
    assert_eq!(config.limits.fallback_confidence, 0.6);
    assert_eq!(config.limits.min_analysis_chars, 10);
}

#[test]
#[serial]
fn env_overrides_are_applied() {
    clear_env();
    std::env::set_var("ANTHROPIC_API_KEY", "sk-test-123");
    std::env::set_var("ANTHROPIC_BASE_URL", "http://localhost:9999");
    std::env::set_var("ANALYSIS_MODEL", "claude-3-5-sonnet-latest");
    std::env::set_var("REQUEST_TIMEOUT_MS", "1500");
    std::env::set_var("LOG_FORMAT", "json");
    std::env::set_var("FALLBACK_CONFIDENCE", "0.5");

    let config = Config::from_env().expect("config");

    assert_eq!(config.backend.api_key.as_deref(), Some("sk-test-123"));
    assert_eq!(config.backend.base_url, "http://localhost:9999");
    assert_eq!(config.backend.model, "claude-3-5-sonnet-latest");
    assert_eq!(config.request.timeout_ms, 1500);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.limits.fallback_confidence, 0.5);

    clear_env();
}

#[test]
#[serial]
fn placeholder_api_key_is_treated_as_unconfigured() {
    clear_env();
    std::env::set_var("ANTHROPIC_API_KEY", "your_api_key_here");

    let config = Config::from_env().expect("config");
    assert!(config.backend.api_key.is_none());

    clear_env();
}

#[test]
#[serial]
fn blank_api_key_is_treated_as_unconfigured() {
    clear_env();
    std::env::set_var("ANTHROPIC_API_KEY", "   ");

    let config = Config::from_env().expect("config");
    assert!(config.backend.api_key.is_none());

    clear_env();
}

#[test]
#[serial]
fn unparseable_timeout_falls_back_to_default() {
    clear_env();
    std::env::set_var("REQUEST_TIMEOUT_MS", "not-a-number");

    let config = Config::from_env().expect("config");
    assert_eq!(config.request.timeout_ms, 30000);

    clear_env();
}
