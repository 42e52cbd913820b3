// ABOUTME: Tests for environment-based server configuration loading
// ABOUTME: Covers defaults, overrides, validation failures and credential redaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::env;

use pet_chat_relay::config::{Environment, LogFormat, ServerConfig};
use pet_chat_relay::errors::{AppResult, ErrorCode};
use serial_test::serial;

fn load(vars: &[(&str, &str)]) -> AppResult<ServerConfig> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    ServerConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn test_defaults_with_only_api_key() {
    let config = load(&[("GEMINI_API_KEY", "secret")]).unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.bind_address(), "127.0.0.1:8081");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.gemini.api_key, "secret");
    assert_eq!(config.gemini.model, "gemini-1.5-flash");
    assert_eq!(
        config.gemini.base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert_eq!(config.gemini.timeout_secs, 60);
    assert_eq!(
        config.cors.allowed_origins,
        vec!["http://localhost:3000", "http://localhost:5173"]
    );
}

#[test]
fn test_missing_api_key_is_fatal() {
    let err = load(&[("HTTP_PORT", "9000")]).unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigError);
    assert!(err.message.contains("GEMINI_API_KEY"));
}

#[test]
fn test_blank_api_key_is_fatal() {
    let err = load(&[("GEMINI_API_KEY", "   ")]).unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigError);
}

#[test]
fn test_overrides_are_applied() {
    let config = load(&[
        ("GEMINI_API_KEY", " key "),
        ("GEMINI_MODEL", "gemini-2.0-flash"),
        ("GEMINI_BASE_URL", "http://localhost:9999/v1beta/"),
        ("GEMINI_TIMEOUT_SECS", "15"),
        ("HOST", "0.0.0.0"),
        ("HTTP_PORT", "3001"),
        ("ALLOWED_ORIGINS", " https://app.example/ , ,https://admin.example"),
    ])
    .unwrap();

    assert_eq!(config.gemini.api_key, "key");
    assert_eq!(config.gemini.model, "gemini-2.0-flash");
    assert_eq!(config.gemini.base_url, "http://localhost:9999/v1beta");
    assert_eq!(config.gemini.timeout_secs, 15);
    assert_eq!(config.bind_address(), "0.0.0.0:3001");
    assert_eq!(
        config.cors.allowed_origins,
        vec!["https://app.example", "https://admin.example"]
    );
}

#[test]
fn test_production_defaults_to_json_logs() {
    let config = load(&[("GEMINI_API_KEY", "k"), ("ENVIRONMENT", "production")]).unwrap();

    assert!(config.environment.is_production());
    assert_eq!(config.logging.format, LogFormat::Json);

    let config = load(&[
        ("GEMINI_API_KEY", "k"),
        ("ENVIRONMENT", "prod"),
        ("LOG_FORMAT", "pretty"),
    ])
    .unwrap();
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        ("HTTP_PORT", "eighty"),
        ("HTTP_PORT", "70000"),
        ("GEMINI_TIMEOUT_SECS", "-1"),
        ("GEMINI_TIMEOUT_SECS", "0"),
        ("ENVIRONMENT", "staging"),
        ("LOG_FORMAT", "xml"),
    ];

    for (key, value) in cases {
        let err = load(&[("GEMINI_API_KEY", "k"), (key, value)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError, "{key}={value}");
    }
}

#[test]
fn test_debug_redacts_api_key() {
    let config = load(&[("GEMINI_API_KEY", "super-secret-value")]).unwrap();

    let rendered = format!("{config:?}");

    assert!(!rendered.contains("super-secret-value"));
    assert!(rendered.contains("[REDACTED]"));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    env::set_var("GEMINI_API_KEY", "env-key");
    env::set_var("HTTP_PORT", "8099");

    let config = ServerConfig::from_env().unwrap();

    env::remove_var("GEMINI_API_KEY");
    env::remove_var("HTTP_PORT");

    assert_eq!(config.gemini.api_key, "env-key");
    assert_eq!(config.http_port, 8099);
}

#[test]
#[serial]
fn test_from_env_without_key_fails() {
    env::remove_var("GEMINI_API_KEY");

    let err = ServerConfig::from_env().unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigError);
}

#[test]
fn test_bind_address_brackets_ipv6_hosts() {
    let ipv6 = load(&[("GEMINI_API_KEY", "k"), ("HOST", "::1"), ("HTTP_PORT", "9000")]).unwrap();
    let named = load(&[("GEMINI_API_KEY", "k"), ("HOST", "localhost")]).unwrap();

    assert_eq!(ipv6.bind_address(), "[::1]:9000");
    assert_eq!(named.bind_address(), "localhost:8081");
}
