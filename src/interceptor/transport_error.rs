// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport-level error handler
//!
//! Handles failures below the envelope layer: HTTP errors, network errors
//! and timeouts. Business failures never reach this handler.

use std::sync::Arc;

use crate::envelope::Decoded;
use crate::error::{Error, ExpiryTrigger};
use crate::http::Request;
use crate::notice::Notifier;
use crate::session::ExpiryPolicy;

/// Maps transport failures to caller-facing errors
pub struct TransportErrorHandler {
    policy: Arc<ExpiryPolicy>,
    notifier: Arc<dyn Notifier>,
}

impl TransportErrorHandler {
    pub fn new(policy: Arc<ExpiryPolicy>, notifier: Arc<dyn Notifier>) -> Self {
        Self { policy, notifier }
    }

    /// Handle a failed request and return the error to reject with
    pub fn handle(&self, request: &Request, error: Error) -> Error {
        match error {
            Error::Cancelled { .. } => error,
            Error::Status {
                status: 401,
                ref body,
                ref message,
            } => {
                let envelope = Decoded::from_slice(body)
                    .ok()
                    .and_then(|d| d.envelope().cloned());
                self.policy.expire(
                    ExpiryTrigger::TransportStatus,
                    request.sent_token.as_deref(),
                    Some(401),
                    envelope,
                    Some(message.as_str()),
                )
            }
            other => {
                self.notifier.error(&other.notice());
                other
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::MemoryNotifier;
    use crate::session::{MemorySession, SessionState, LOGIN_EXPIRED_NOTICE};
    use bytes::Bytes;

    fn handler() -> (Arc<MemorySession>, Arc<MemoryNotifier>, TransportErrorHandler) {
        let session = Arc::new(MemorySession::new());
        session.set_token("t-1");
        let notifier = Arc::new(MemoryNotifier::new());
        let policy = Arc::new(ExpiryPolicy::new(session.clone(), notifier.clone()));
        let handler = TransportErrorHandler::new(policy, notifier.clone());
        (session, notifier, handler)
    }

    #[test]
    fn test_401_with_envelope() {
        let (session, notifier, handler) = handler();
        let err = handler.handle(&Request::get("/corporation/login/user"), Error::Status {
            status: 401,
            message: "Token expired!".to_string(),
            body: Bytes::from(r#"{"code":401,"message":"Token expired!"}"#),
        });

        assert!(err.is_auth_expired());
        assert_eq!(err.business_code(), Some(401));
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(session.logout_count(), 1);
        assert!(session.token().is_empty());
        assert_eq!(notifier.messages(), vec![LOGIN_EXPIRED_NOTICE]);
    }

    #[test]
    fn test_401_without_body_still_logs_out() {
        let (session, _, handler) = handler();
        let err = handler.handle(&Request::get("/corporation/login/user"), Error::Status {
            status: 401,
            message: "Request failed with status code 401".to_string(),
            body: Bytes::new(),
        });

        assert!(err.is_auth_expired());
        assert_eq!(err.business_code(), Some(401));
        assert!(err.envelope().is_none());
        assert_eq!(session.logout_count(), 1);
    }

    #[test]
    fn test_401_for_replaced_token_is_stale() {
        let (session, notifier, handler) = handler();
        session.set_token("t-2");
        let mut request = Request::get("/corporation/login/user");
        request.sent_token = Some("t-1".to_string());

        let err = handler.handle(&request, Error::Status {
            status: 401,
            message: "Token expired!".to_string(),
            body: Bytes::new(),
        });

        assert!(err.is_auth_expired());
        assert_eq!(session.logout_count(), 0);
        assert_eq!(session.token(), "t-2");
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_other_status_notifies() {
        let (session, notifier, handler) = handler();
        let err = handler.handle(&Request::get("/corporation/login/user"), Error::Status {
            status: 502,
            message: "Bad gateway".to_string(),
            body: Bytes::new(),
        });

        assert_eq!(err.status_code(), Some(502));
        assert_eq!(notifier.messages(), vec!["Bad gateway"]);
        assert_eq!(session.logout_count(), 0);
    }

    #[test]
    fn test_cancelled_is_silent() {
        let (_, notifier, handler) = handler();
        let err = handler.handle(&Request::get("/corporation/login/user"), Error::cancelled("/tel/customer/list"));
        assert!(err.is_cancelled());
        assert!(notifier.messages().is_empty());
    }
}
