// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration
//!
//! Values come from code or from `VIESTI_*` environment variables.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::http::{TransportOptions, DEFAULT_USER_AGENT};

/// Default request timeout (milliseconds)
pub const REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Default business success code
pub const SUCCESS_CODE: i64 = 0;

/// Default prefix of the mock backend routes
pub const MOCK_PREFIX: &str = "/mock";

/// Default login entry point used for redirects on logout
pub const LOGIN_PATH: &str = "/login";

/// Environment variable names
pub mod env {
    pub const API_BASE_PATH: &str = "VIESTI_API_BASE_PATH";
    pub const REQUEST_TIMEOUT_MS: &str = "VIESTI_REQUEST_TIMEOUT_MS";
    pub const SUCCESS_CODE: &str = "VIESTI_SUCCESS_CODE";
    pub const TRANSFORM_REQUEST_DATA: &str = "VIESTI_TRANSFORM_REQUEST_DATA";
    pub const USE_MOCK: &str = "VIESTI_USE_MOCK";
    pub const MOCK_PREFIX: &str = "VIESTI_MOCK_PREFIX";
}

/// Request layer configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Prefix applied to every relative request path
    pub base_path: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Business code that signals success
    pub success_code: i64,
    /// Convert plain bodies to multipart when the content type asks for it
    pub transform_request_data: bool,
    /// Running against the mock backend
    pub use_mock: bool,
    /// Path prefix stripped from tracking keys when `use_mock` is set
    pub mock_prefix: String,
    /// User agent string
    pub user_agent: String,
    /// Headers sent with every request
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            success_code: SUCCESS_CODE,
            transform_request_data: true,
            use_mock: false,
            mock_prefix: MOCK_PREFIX.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: vec![],
        }
    }
}

impl ClientConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_path) = lookup(env::API_BASE_PATH) {
            config.base_path = base_path;
        }
        if let Some(raw) = lookup(env::REQUEST_TIMEOUT_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                Error::config(format!("{} must be milliseconds, got {:?}", env::REQUEST_TIMEOUT_MS, raw))
            })?;
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(env::SUCCESS_CODE) {
            config.success_code = raw.trim().parse().map_err(|_| {
                Error::config(format!("{} must be an integer, got {:?}", env::SUCCESS_CODE, raw))
            })?;
        }
        if let Some(raw) = lookup(env::TRANSFORM_REQUEST_DATA) {
            config.transform_request_data = parse_flag(env::TRANSFORM_REQUEST_DATA, &raw)?;
        }
        if let Some(raw) = lookup(env::USE_MOCK) {
            config.use_mock = parse_flag(env::USE_MOCK, &raw)?;
        }
        if let Some(prefix) = lookup(env::MOCK_PREFIX) {
            config.mock_prefix = prefix;
        }

        Ok(config)
    }

    /// Set base path
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set success code
    pub fn success_code(mut self, code: i64) -> Self {
        self.success_code = code;
        self
    }

    /// Enable/disable multipart body transformation
    pub fn transform_request_data(mut self, enabled: bool) -> Self {
        self.transform_request_data = enabled;
        self
    }

    /// Run against the mock backend
    pub fn use_mock(mut self, enabled: bool) -> Self {
        self.use_mock = enabled;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add default header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Prefix stripped from tracking keys, if any
    pub fn tracking_prefix(&self) -> Option<&str> {
        if self.use_mock && !self.mock_prefix.is_empty() {
            Some(&self.mock_prefix)
        } else {
            None
        }
    }

    /// Options for building the transport
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            base_path: self.base_path.clone(),
            timeout: self.timeout,
            user_agent: self.user_agent.clone(),
            default_headers: self.default_headers.clone(),
        }
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::config(format!("{} must be a boolean, got {:?}", key, raw))),
    }
}
