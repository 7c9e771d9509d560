// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authentication expiry policy
//!
//! Both the envelope stage (business code 401) and the transport error
//! handler (HTTP 401) report expiry here. Logout runs once per expiry
//! event. A rejection for a request sent with a token the session no longer
//! holds is stale: the session was already logged out, or a new login
//! happened while the request was in flight.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;
use regex::Regex;

use super::SessionState;
use crate::envelope::Envelope;
use crate::error::{Error, ExpiryTrigger};
use crate::notice::Notifier;

/// Notice shown when the session expired
pub const LOGIN_EXPIRED_NOTICE: &str = "Login expired, please sign in again";

lazy_static! {
    static ref EXPIRY_PHRASE: Regex = Regex::new(r"(?i)token\s*expired").unwrap();
}

/// Whether a server message says the token expired
pub fn is_expiry_message(message: &str) -> bool {
    EXPIRY_PHRASE.is_match(message)
}

/// Forces logout on authentication expiry
pub struct ExpiryPolicy {
    session: Arc<dyn SessionState>,
    notifier: Arc<dyn Notifier>,
    /// Token observed right after the last forced logout
    handled: Mutex<Option<String>>,
}

impl ExpiryPolicy {
    pub fn new(session: Arc<dyn SessionState>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            handled: Mutex::new(None),
        }
    }

    /// Handle an expiry and build the rejection for the caller.
    ///
    /// `sent_token` is the token the rejected request carried. The caller
    /// still gets an error; notice and logout are side effects.
    pub fn expire(
        &self,
        trigger: ExpiryTrigger,
        sent_token: Option<&str>,
        status: Option<u16>,
        envelope: Option<Envelope>,
        fallback_message: Option<&str>,
    ) -> Error {
        let message = envelope
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .or(fallback_message)
            .filter(|m| !m.is_empty())
            .unwrap_or(LOGIN_EXPIRED_NOTICE)
            .to_string();

        let notice = if is_expiry_message(&message) {
            LOGIN_EXPIRED_NOTICE
        } else {
            message.as_str()
        };
        if self.logout_once(sent_token, notice) {
            tracing::warn!(trigger = %trigger, message = %message, "Authentication expired, logged out");
        } else {
            tracing::debug!(trigger = %trigger, "Authentication expiry already handled");
        }

        Error::auth_expired(trigger, status, envelope, message)
    }

    /// Show the notice and run logout, unless this expiry is stale
    fn logout_once(&self, sent_token: Option<&str>, notice: &str) -> bool {
        let mut handled = self.handled.lock();
        let current = self.session.token();
        let stale = match sent_token {
            Some(sent) => sent != current,
            None => handled.as_deref() == Some(current.as_str()),
        };
        if stale {
            return false;
        }

        self.notifier.error(notice);
        self.session.logout();
        *handled = Some(self.session.token());
        true
    }
}
