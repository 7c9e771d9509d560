// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Auth header stage

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

use super::chain::{InterceptAction, RequestInterceptor};
use crate::error::Result;
use crate::http::Request;
use crate::session::SessionState;

/// Attaches the session token to every outbound request
pub struct AuthHeaderStage {
    session: Arc<dyn SessionState>,
}

impl AuthHeaderStage {
    pub fn new(session: Arc<dyn SessionState>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl RequestInterceptor for AuthHeaderStage {
    fn name(&self) -> &'static str {
        "auth-header"
    }

    async fn before_request(&self, request: &mut Request) -> Result<InterceptAction> {
        let token = self.session.token();
        if token.is_empty() {
            return Ok(InterceptAction::Continue);
        }

        let key = self.session.token_key();
        match (
            HeaderName::try_from(key.as_str()),
            HeaderValue::try_from(token.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                // Caller overrides win
                if !request.headers.contains_key(&name) {
                    request.headers.insert(name, value);
                    request.sent_token = Some(token.clone());
                }
            }
            _ => tracing::warn!(key = %key, "Session token is not a valid header, not attached"),
        }
        Ok(InterceptAction::Continue)
    }

    fn priority(&self) -> i32 {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;

    #[tokio::test]
    async fn test_token_attached() {
        let session = Arc::new(MemorySession::new());
        session.set_token("t-1");
        let stage = AuthHeaderStage::new(session);

        let mut request = Request::get("/corporation/login/user");
        stage.before_request(&mut request).await.unwrap();

        assert_eq!(
            request.headers.get("authorization").and_then(|v| v.to_str().ok()),
            Some("t-1")
        );
        assert_eq!(request.sent_token.as_deref(), Some("t-1"));
    }

    #[tokio::test]
    async fn test_no_token_no_header() {
        let stage = AuthHeaderStage::new(Arc::new(MemorySession::new()));
        let mut request = Request::get("/tel/login/login");
        stage.before_request(&mut request).await.unwrap();
        assert!(request.headers.is_empty());
    }

    #[tokio::test]
    async fn test_caller_header_wins() {
        let session = Arc::new(MemorySession::new());
        session.set_token("t-1");
        let stage = AuthHeaderStage::new(session);

        let mut request = Request::get("/x").header("Authorization", "other");
        stage.before_request(&mut request).await.unwrap();

        assert_eq!(
            request.headers.get("authorization").and_then(|v| v.to_str().ok()),
            Some("other")
        );
        assert!(request.sent_token.is_none());
    }
}
