// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

/// What a settled request resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Unwrapped envelope `data`
    Json(Value),
    /// Raw body of a blob request
    Blob(Bytes),
}

impl Payload {
    /// Deserialize the JSON payload
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Payload::Json(value) => serde_json::from_value(value).map_err(Error::from),
            Payload::Blob(_) => Err(Error::other("expected JSON payload, got blob")),
        }
    }

    /// JSON payload, if any
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Blob(_) => None,
        }
    }

    /// Raw bytes; JSON payloads are re-serialized
    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            Payload::Blob(bytes) => Ok(bytes),
            Payload::Json(value) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
        }
    }
}

/// HTTP response as received by the transport
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Set by the envelope stage
    pub payload: Option<Payload>,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
            payload: None,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Take the payload set by the envelope stage.
    ///
    /// Falls back to the raw body when no stage produced one.
    pub fn into_payload(self) -> Payload {
        self.payload.unwrap_or(Payload::Blob(self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: &'static str) -> Response {
        Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from(body),
            Url::parse("https://example.com/api").unwrap(),
            12,
        )
    }

    #[test]
    fn test_response_status() {
        let resp = response("");
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
    }

    #[test]
    fn test_into_payload_defaults_to_blob() {
        let resp = response("raw");
        assert_eq!(resp.into_payload(), Payload::Blob(Bytes::from("raw")));
    }

    #[test]
    fn test_payload_into_json() {
        #[derive(serde::Deserialize)]
        struct Page {
            total: u32,
        }
        let page: Page = Payload::Json(json!({"total": 7})).into_json().unwrap();
        assert_eq!(page.total, 7);
        assert!(Payload::Blob(Bytes::new()).into_json::<Page>().is_err());
    }
}
