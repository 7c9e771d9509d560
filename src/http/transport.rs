// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport: the one configured connection every request goes through

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use super::request::{Body, Request};
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};
use crate::interceptor::encode_query;

/// Transport options
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Prefix applied to relative paths
    pub base_path: String,
    /// Default per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Headers sent with every request
    pub default_headers: Vec<(String, String)>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            timeout: Duration::from_secs(60),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: vec![],
        }
    }
}

/// Reusable transport over a single `reqwest::Client`
#[derive(Clone)]
pub struct Transport {
    client: Client,
    options: TransportOptions,
}

impl Transport {
    /// Build the transport. No retries happen at this layer.
    pub fn create(options: TransportOptions) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &options.default_headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| Error::config(format!("Invalid header name {:?}: {}", name, e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| Error::config(format!("Invalid header value for {}: {}", name, e)))?;
            default_headers.insert(name, value);
        }

        let client = Client::builder()
            .user_agent(&options.user_agent)
            .timeout(options.timeout)
            .redirect(Policy::limited(10))
            .default_headers(default_headers)
            .cookie_store(true)
            .build()?;

        Ok(Self { client, options })
    }

    /// Transport options
    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    /// Resolve a request path against the base path
    pub fn resolve(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }

        let base = self.options.base_path.trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };
        Url::parse(&joined).map_err(|e| {
            Error::config(format!(
                "Cannot resolve {:?} against base path {:?}: {}",
                path, self.options.base_path, e
            ))
        })
    }

    /// Send a request.
    ///
    /// Races the network call against the request's abort signal. Non-2xx
    /// statuses come back as [`Error::Status`].
    pub async fn send(&self, request: &Request) -> Result<Response> {
        // Parameters left over after encoding (non-GET methods) still go on the query string
        let url = if request.params.is_empty() {
            self.resolve(&request.path)?
        } else {
            self.resolve(&encode_query(&request.path, &request.params))?
        };
        let mut headers = request.headers.clone();

        let mut builder = self.client.request(request.method.clone(), url.clone());
        match &request.body {
            Body::Empty => {}
            Body::Json(value) => {
                builder = builder.json(value);
            }
            Body::Text(text) => {
                builder = builder.body(text.clone());
            }
            Body::Multipart(form) => {
                // reqwest writes its own content type with the boundary
                headers.remove(CONTENT_TYPE);
                builder = builder.multipart(form.clone().into_reqwest()?);
            }
        }
        builder = builder.headers(headers);

        let timeout = request.timeout.unwrap_or(self.options.timeout);
        if let Some(t) = request.timeout {
            builder = builder.timeout(t);
        }

        let start = Instant::now();
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let final_url = response.url().clone();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(Response::new(
                status,
                headers,
                body,
                final_url,
                start.elapsed().as_millis() as u64,
            ))
        };

        let result = match &request.tracking {
            Some(tracking) => {
                let mut signal = tracking.signal.clone();
                tokio::select! {
                    biased;
                    _ = signal.aborted() => return Err(Error::cancelled(tracking.key.clone())),
                    res = exchange => res,
                }
            }
            None => exchange.await,
        };

        let response = result.map_err(|e| {
            if e.is_timeout() {
                Error::timeout_with_url("request", timeout.as_millis() as u64, url.as_str())
            } else {
                Error::Http(e)
            }
        })?;

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status_code(),
                message: status_message(&response),
                body: response.body,
            });
        }
        Ok(response)
    }
}

/// Message for a failed status: the body's `message` field or the reason phrase
fn status_message(response: &Response) -> String {
    response
        .json::<serde_json::Value>()
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            format!(
                "Request failed with status code {}",
                response.status.as_u16()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> Transport {
        Transport::create(TransportOptions {
            base_path: base.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_resolve_relative() {
        let t = transport("http://localhost:8080/api/");
        assert_eq!(
            t.resolve("/tel/customer/list?page=1").unwrap().as_str(),
            "http://localhost:8080/api/tel/customer/list?page=1"
        );
        assert_eq!(
            t.resolve("logout").unwrap().as_str(),
            "http://localhost:8080/api/logout"
        );
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let t = transport("http://localhost:8080/api");
        assert_eq!(
            t.resolve("https://cdn.example.com/file.xlsx").unwrap().as_str(),
            "https://cdn.example.com/file.xlsx"
        );
    }

    #[test]
    fn test_resolve_without_host_fails() {
        let t = transport("/api");
        assert!(matches!(t.resolve("/x"), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_default_header() {
        let res = Transport::create(TransportOptions {
            default_headers: vec![("bad header".to_string(), "v".to_string())],
            ..Default::default()
        });
        assert!(matches!(res, Err(Error::Config(_))));
    }
}
