// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Server response envelope
//!
//! The backend wraps every non-stream response as `{ code, data?, message? }`.
//! `code` is a business status distinct from the HTTP status. Some endpoints
//! send it as a numeric string, so both forms are accepted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::AUTH_EXPIRED_CODE;

/// Response envelope as sent on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Business status code
    #[serde(deserialize_with = "deserialize_code")]
    pub code: i64,
    /// Payload, shape depends on the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Human-readable message, present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Classified envelope
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Success code; holds the unwrapped `data` (`null` when absent)
    Success(Value),
    /// Business code 401
    AuthExpired(Envelope),
    /// Any other code
    Failure(Envelope),
}

/// A decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Body carried a `code` field
    Envelope(Envelope),
    /// Plain JSON without an envelope
    Raw(Value),
}

impl Envelope {
    /// Build a success envelope
    pub fn success(code: i64, data: Value) -> Self {
        Self {
            code,
            data: Some(data),
            message: None,
        }
    }

    /// Build a failure envelope
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Classify against the configured success code
    pub fn classify(self, success_code: i64) -> Outcome {
        if self.code == success_code {
            Outcome::Success(self.data.unwrap_or(Value::Null))
        } else if self.code == AUTH_EXPIRED_CODE {
            Outcome::AuthExpired(self)
        } else {
            Outcome::Failure(self)
        }
    }

    /// Message or a fallback
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
    }
}

impl Decoded {
    /// Decode a response body. An empty body decodes to `Raw(Null)`.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Decoded::Raw(Value::Null));
        }
        let value: Value = serde_json::from_slice(body)?;
        Ok(Self::from_value(value))
    }

    /// Decode an already parsed JSON value
    pub fn from_value(value: Value) -> Self {
        let has_code = value
            .as_object()
            .map(|obj| obj.contains_key("code"))
            .unwrap_or(false);
        if !has_code {
            return Decoded::Raw(value);
        }
        match serde_json::from_value::<Envelope>(value.clone()) {
            Ok(envelope) => Decoded::Envelope(envelope),
            Err(_) => Decoded::Raw(value),
        }
    }

    /// The envelope, if the body had one
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Decoded::Envelope(envelope) => Some(envelope),
            Decoded::Raw(_) => None,
        }
    }
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Int(i64),
        Text(String),
    }

    match Code::deserialize(deserializer)? {
        Code::Int(code) => Ok(code),
        Code::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("non-numeric code: {}", text))),
    }
}
