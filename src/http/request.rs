// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Outbound request types and the caller-facing request config

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use super::content_type;
use super::multipart::MultipartForm;
use crate::cancel::{AbortSignal, ReleaseGuard, Ticket};
use crate::error::{Error, Result};

/// How the response body should be handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Decode the envelope
    #[default]
    Json,
    /// Raw bytes, e.g. file downloads
    Blob,
}

/// Request body
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    /// Structured body, sent as JSON unless the encoding stage rewrites it
    Json(Value),
    /// Already encoded body
    Text(String),
    /// Native multipart container
    Multipart(MultipartForm),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Body::Multipart(_))
    }
}

/// Tracking data attached by the tracking stage
#[derive(Debug, Clone)]
pub struct Tracking {
    /// Registry key
    pub key: String,
    /// Identity of the registered handle
    pub ticket: Ticket,
    /// Abort signal raced against the network call
    pub signal: AbortSignal,
    /// Releases the entry once the last copy of the request is dropped
    pub guard: Arc<ReleaseGuard>,
}

/// Outbound request, mutated by the interceptor chain before dispatch
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Path relative to the base path (or an absolute URL)
    pub path: String,
    /// Query parameters, folded into `path` by the encoding stage
    pub params: Map<String, Value>,
    /// Request body
    pub body: Body,
    /// Request headers
    pub headers: HeaderMap,
    /// Expected response type
    pub response_type: ResponseType,
    /// Per-request timeout override
    pub timeout: Option<Duration>,
    /// Set by the tracking stage
    pub tracking: Option<Tracking>,
    /// Session token the auth stage attached, if any
    pub sent_token: Option<String>,
}

impl Request {
    /// Create a new request with arbitrary method
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Map::new(),
            body: Body::Empty,
            headers: HeaderMap::new(),
            response_type: ResponseType::Json,
            timeout: None,
            tracking: None,
            sent_token: None,
        }
    }

    /// Create a new GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a new POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Set a header. Invalid names or values are ignored.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set multiple headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            self = self.header(name, value);
        }
        self
    }

    /// Set a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the body
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.body = Body::Json(serde_json::to_value(data)?);
        Ok(self)
    }

    /// Set response type
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Declared content type, without parameters
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(super::headers::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
    }

    /// Whether the content type is form-urlencoded
    pub fn is_form_urlencoded(&self) -> bool {
        self.content_type()
            .map(|ct| ct.eq_ignore_ascii_case(content_type::FORM_URLENCODED))
            .unwrap_or(false)
    }

    /// Whether the content type is multipart
    pub fn is_multipart(&self) -> bool {
        self.content_type()
            .map(|ct| ct.eq_ignore_ascii_case(content_type::MULTIPART))
            .unwrap_or(false)
    }

    /// Body-bearing write method
    pub fn is_write(&self) -> bool {
        self.method == Method::POST || self.method == Method::PUT || self.method == Method::PATCH
    }

    /// Path without its query string
    pub fn path_without_query(&self) -> &str {
        self.path.split('?').next().unwrap_or(&self.path)
    }

    /// Tracking key, once the tracking stage ran
    pub fn tracking_key(&self) -> Option<&str> {
        self.tracking.as_ref().map(|t| t.key.as_str())
    }
}

/// Pre-request hook; runs before the interceptor chain and may mutate the request
pub type RequestHook = Arc<dyn Fn(&mut Request) + Send + Sync>;

/// Caller-facing request description
#[derive(Clone, Default)]
pub struct RequestConfig {
    /// Request path
    pub url: String,
    /// Query parameters (JSON object or null)
    pub params: Value,
    /// Request body
    pub data: Body,
    /// Header overrides
    pub headers: HashMap<String, String>,
    /// Expected response type
    pub response_type: ResponseType,
    /// Per-request timeout override
    pub timeout: Option<Duration>,
    /// Optional pre-request hook
    pub hook: Option<RequestHook>,
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("url", &self.url)
            .field("params", &self.params)
            .field("data", &self.data)
            .field("headers", &self.headers)
            .field("response_type", &self.response_type)
            .field("timeout", &self.timeout)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl RequestConfig {
    /// Create a config for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set query parameters from any serializable map-like value
    pub fn params<T: Serialize>(mut self, params: &T) -> Result<Self> {
        self.params = serde_json::to_value(params)?;
        Ok(self)
    }

    /// Set a structured body
    pub fn data<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.data = Body::Json(serde_json::to_value(data)?);
        Ok(self)
    }

    /// Set a multipart body
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.data = Body::Multipart(form);
        self
    }

    /// Add a header override
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set response type
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the pre-request hook
    pub fn hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Request) + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Build the outbound request
    pub fn into_request(self, method: Method) -> Result<Request> {
        let params = match self.params {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(Error::other(format!(
                    "query parameters must be an object, got {}",
                    other
                )))
            }
        };

        let mut request = Request::new(method, self.url)
            .headers(self.headers)
            .body(self.data)
            .response_type(self.response_type);
        request.params = params;
        request.timeout = self.timeout;
        Ok(request)
    }
}

impl From<&str> for RequestConfig {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for RequestConfig {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}
