// ABOUTME: Environment-based configuration for host, port, CORS, logging and the Gemini backend
// ABOUTME: A missing provider credential is a fatal configuration error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-only configuration
//!
//! All settings come from process environment variables (see
//! [`crate::constants::env_vars`]). [`ServerConfig::from_lookup`] takes an
//! arbitrary lookup function so the parsing rules can be exercised without
//! touching the real environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};

/// Deployment environment
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
}

impl Environment {
    /// Whether this is a production deployment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" | "" => Ok(Self::Development),
            other => Err(AppError::config(format!(
                "Invalid {}: '{other}' (expected development or production)",
                env_vars::ENVIRONMENT
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Log output format
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field output
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(AppError::config(format!(
                "Invalid {}: '{other}' (expected json or pretty)",
                env_vars::LOG_FORMAT
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
}

/// Gemini backend configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Model id, e.g. `gemini-1.5-flash`
    pub model: String,
    /// REST API root without trailing slash
    pub base_url: String,
    /// Outbound call timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Cross-origin request filtering
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API
    pub allowed_origins: Vec<String>,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Generation backend settings
    pub gemini: GeminiConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `GEMINI_API_KEY` is missing or any
    /// variable has an invalid value
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is missing or any value
    /// fails to parse
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key = get(env_vars::GEMINI_API_KEY).ok_or_else(|| {
            AppError::config(format!(
                "{} environment variable is required",
                env_vars::GEMINI_API_KEY
            ))
        })?;

        let environment = get(env_vars::ENVIRONMENT)
            .map(|raw| raw.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();

        let format = match get(env_vars::LOG_FORMAT) {
            Some(raw) => raw.parse::<LogFormat>()?,
            None if environment.is_production() => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        let http_port = parse_or(get(env_vars::HTTP_PORT), env_vars::HTTP_PORT, defaults::HTTP_PORT)?;
        let timeout_secs = parse_or(
            get(env_vars::GEMINI_TIMEOUT_SECS),
            env_vars::GEMINI_TIMEOUT_SECS,
            defaults::GEMINI_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                env_vars::GEMINI_TIMEOUT_SECS
            )));
        }

        let base_url = get(env_vars::GEMINI_BASE_URL)
            .unwrap_or_else(|| defaults::GEMINI_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let allowed_origins = parse_origins(
            &get(env_vars::ALLOWED_ORIGINS).unwrap_or_else(|| defaults::ALLOWED_ORIGINS.to_owned()),
        );

        Ok(Self {
            host: get(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_owned()),
            http_port,
            environment,
            logging: LoggingConfig { format },
            gemini: GeminiConfig {
                api_key,
                model: get(env_vars::GEMINI_MODEL)
                    .unwrap_or_else(|| defaults::GEMINI_MODEL.to_owned()),
                base_url,
                timeout_secs,
            },
            cors: CorsConfig { allowed_origins },
        })
    }

    /// `host:port` string the server binds to, with IPv6 literals bracketed
    #[must_use]
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.http_port)
        } else {
            format!("{}:{}", self.host, self.http_port)
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, name: &str, default: T) -> AppResult<T> {
    raw.map_or(Ok(default), |value| {
        value
            .parse::<T>()
            .map_err(|_| AppError::config(format!("Invalid {name}: '{value}'")))
    })
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}
