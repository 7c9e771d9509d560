// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request logger interceptor

use async_trait::async_trait;

use super::chain::{InterceptAction, RequestInterceptor};
use crate::error::{Error, Result};
use crate::http::{Body, Request, Response};

/// Request logger interceptor
#[derive(Debug, Default)]
pub struct RequestLogger {
    /// Log request bodies
    pub log_bodies: bool,
    /// Log response bodies
    pub log_responses: bool,
    /// Filter by path substring
    pub path_filter: Option<String>,
}

#[async_trait]
impl RequestInterceptor for RequestLogger {
    fn name(&self) -> &'static str {
        "logger"
    }

    fn should_intercept(&self, request: &Request) -> bool {
        match self.path_filter {
            Some(ref filter) => request.path.contains(filter),
            None => true,
        }
    }

    async fn before_request(&self, request: &mut Request) -> Result<InterceptAction> {
        tracing::info!(
            method = %request.method,
            path = %request.path,
            "Request"
        );

        if self.log_bodies {
            match &request.body {
                Body::Json(value) => tracing::debug!(body = %value, "Request body"),
                Body::Text(text) => tracing::debug!(body = %text, "Request body"),
                Body::Multipart(form) => tracing::debug!(fields = form.len(), "Multipart body"),
                Body::Empty => {}
            }
        }

        Ok(InterceptAction::Continue)
    }

    async fn after_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        tracing::info!(
            path = %request.path,
            status = %response.status,
            time_ms = response.response_time_ms,
            "Response"
        );

        if self.log_responses {
            tracing::debug!(body = %response.text_lossy(), "Response body");
        }

        Ok(())
    }

    async fn on_error(&self, request: &Request, error: &Error) {
        if error.is_cancelled() {
            tracing::debug!(path = %request.path, "Request cancelled");
        } else {
            tracing::warn!(path = %request.path, error = %error, "Request failed");
        }
    }

    fn priority(&self) -> i32 {
        -100 // Low priority - run logging last
    }
}
