// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Envelope normalization stage

use std::sync::Arc;

use async_trait::async_trait;

use super::chain::RequestInterceptor;
use crate::envelope::{Decoded, Outcome};
use crate::error::{Error, ExpiryTrigger, Result};
use crate::http::{Payload, Request, Response, ResponseType};
use crate::notice::Notifier;
use crate::session::ExpiryPolicy;

/// Fallback notice for failures without a message
const REQUEST_FAILED: &str = "Request failed";

/// Unwraps success envelopes and rejects everything else
pub struct EnvelopeStage {
    success_code: i64,
    policy: Arc<ExpiryPolicy>,
    notifier: Arc<dyn Notifier>,
}

impl EnvelopeStage {
    pub fn new(success_code: i64, policy: Arc<ExpiryPolicy>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            success_code,
            policy,
            notifier,
        }
    }
}

#[async_trait]
impl RequestInterceptor for EnvelopeStage {
    fn name(&self) -> &'static str {
        "envelope"
    }

    async fn after_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        if request.response_type == ResponseType::Blob {
            response.payload = Some(Payload::Blob(response.body.clone()));
            return Ok(());
        }

        let envelope = match Decoded::from_slice(&response.body)? {
            // Plain JSON behind a 2xx status, nothing to unwrap
            Decoded::Raw(value) => {
                response.payload = Some(Payload::Json(value));
                return Ok(());
            }
            Decoded::Envelope(envelope) => envelope,
        };

        match envelope.classify(self.success_code) {
            Outcome::Success(data) => {
                response.payload = Some(Payload::Json(data));
                Ok(())
            }
            Outcome::AuthExpired(envelope) => Err(self.policy.expire(
                ExpiryTrigger::Envelope,
                request.sent_token.as_deref(),
                Some(response.status_code()),
                Some(envelope),
                None,
            )),
            Outcome::Failure(envelope) => {
                self.notifier.error(envelope.message_or(REQUEST_FAILED));
                Err(Error::business(envelope))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::MemoryNotifier;
    use crate::session::{MemorySession, SessionState};
    use bytes::Bytes;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use serde_json::json;
    use url::Url;

    struct Fixture {
        session: Arc<MemorySession>,
        notifier: Arc<MemoryNotifier>,
        stage: EnvelopeStage,
    }

    fn fixture() -> Fixture {
        let session = Arc::new(MemorySession::new());
        session.set_token("t-1");
        let notifier = Arc::new(MemoryNotifier::new());
        let policy = Arc::new(ExpiryPolicy::new(session.clone(), notifier.clone()));
        let stage = EnvelopeStage::new(0, policy, notifier.clone());
        Fixture {
            session,
            notifier,
            stage,
        }
    }

    fn response(body: serde_json::Value) -> Response {
        Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from(body.to_string()),
            Url::parse("http://localhost/api/x").unwrap(),
            1,
        )
    }

    #[tokio::test]
    async fn test_success_unwraps() {
        let f = fixture();
        let mut resp = response(json!({"code": 0, "data": {"total": 3}}));
        f.stage.after_response(&Request::get("/x"), &mut resp).await.unwrap();
        assert_eq!(resp.into_payload(), Payload::Json(json!({"total": 3})));
    }

    #[tokio::test]
    async fn test_business_failure_notifies() {
        let f = fixture();
        let mut resp = response(json!({"code": 500, "message": "Customer not found"}));
        let err = f
            .stage
            .after_response(&Request::get("/x"), &mut resp)
            .await
            .unwrap_err();

        assert_eq!(err.business_code(), Some(500));
        assert_eq!(f.notifier.messages(), vec!["Customer not found"]);
        assert_eq!(f.session.logout_count(), 0);
    }

    #[tokio::test]
    async fn test_expired_logs_out() {
        let f = fixture();
        let mut resp = response(json!({"code": 401, "message": "Token expired!"}));
        let err = f
            .stage
            .after_response(&Request::get("/x"), &mut resp)
            .await
            .unwrap_err();

        assert!(err.is_auth_expired());
        assert_eq!(err.business_code(), Some(401));
        assert_eq!(err.envelope().and_then(|e| e.message.as_deref()), Some("Token expired!"));
        assert_eq!(f.session.logout_count(), 1);
        assert!(f.session.token().is_empty());
    }

    #[tokio::test]
    async fn test_blob_passthrough() {
        let f = fixture();
        let mut resp = response(json!({"code": 500}));
        let request = Request::get("/export").response_type(ResponseType::Blob);
        f.stage.after_response(&request, &mut resp).await.unwrap();
        assert!(matches!(resp.into_payload(), Payload::Blob(_)));
        assert!(f.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_raw_json_passthrough() {
        let f = fixture();
        let mut resp = response(json!([1, 2]));
        f.stage.after_response(&Request::get("/x"), &mut resp).await.unwrap();
        assert_eq!(resp.into_payload(), Payload::Json(json!([1, 2])));
    }
}
