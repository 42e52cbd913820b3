// ABOUTME: Application constants for the relay: service identity, defaults and generation parameters
// ABOUTME: Generation parameters are fixed values, never per-request configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identity reported by the health endpoint and logs
pub mod service_names {
    /// Name of this service
    pub const PET_CHAT_RELAY: &str = "pet-chat-relay";
    /// Name of the generation backend used in error messages
    pub const GEMINI: &str = "Gemini";
}

/// Fixed sampling parameters sent with every generation call
pub mod generation {
    /// Upper bound on generated tokens
    pub const MAX_OUTPUT_TOKENS: u32 = 2048;
    /// Sampling temperature
    pub const TEMPERATURE: f32 = 0.7;
    /// Nucleus sampling probability mass
    pub const TOP_P: f32 = 0.8;
    /// Top-k sampling cutoff
    pub const TOP_K: u32 = 40;
}

/// Placeholders used when pet or sensor context is missing
pub mod prompt_defaults {
    /// Substituted for a missing pet name
    pub const UNKNOWN_NAME: &str = "your pet";
    /// Substituted for a missing breed
    pub const UNKNOWN_BREED: &str = "pet of unknown breed";
    /// Rendered when the birthdate is missing or unparseable
    pub const UNKNOWN_AGE: &str = "unknown age";
    /// Rendered when the sensor reports no activity label
    pub const UNKNOWN_ACTIVITY: &str = "unknown";
    /// Rendered when the sensor reports no heart rate
    pub const NO_HEART_RATE: &str = "no data";
    /// Clause used when no sensor snapshot was supplied
    pub const NO_SENSOR_DATA: &str = "No sensor data available.";
    /// Days per year used for age computation
    pub const DAYS_PER_YEAR: f64 = 365.25;
}

/// Environment-backed configuration defaults
pub mod defaults {
    /// Default Gemini model id
    pub const GEMINI_MODEL: &str = "gemini-1.5-flash";
    /// Default Gemini REST API root
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Default outbound call timeout in seconds
    pub const GEMINI_TIMEOUT_SECS: u64 = 60;
    /// Default bind host
    pub const HOST: &str = "127.0.0.1";
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default CORS allow-list (comma separated)
    pub const ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
    /// Maximum accepted request body size in bytes
    pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
}

/// Environment variable names
pub mod env_vars {
    /// Provider credential
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Model id override
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// API root override
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    /// Outbound timeout override
    pub const GEMINI_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";
    /// Bind host
    pub const HOST: &str = "HOST";
    /// Bind port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Comma-separated CORS allow-list
    pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Log output format (`json` or `pretty`)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}
