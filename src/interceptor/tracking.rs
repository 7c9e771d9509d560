// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Tracking stage: registers every request for cancellation

use std::sync::Arc;

use async_trait::async_trait;

use super::chain::{InterceptAction, RequestInterceptor};
use crate::cancel::{AbortHandle, CancellationRegistry, ReleaseGuard};
use crate::error::{Error, Result};
use crate::http::{Request, Response, Tracking};

/// Registers an abort handle per request and releases it on settlement
pub struct TrackingStage {
    registry: Arc<CancellationRegistry>,
    /// Stripped from keys when running against the mock backend
    strip_prefix: Option<String>,
}

impl TrackingStage {
    pub fn new(registry: Arc<CancellationRegistry>, strip_prefix: Option<&str>) -> Self {
        Self {
            registry,
            strip_prefix: strip_prefix.map(String::from),
        }
    }

    /// Tracking key for a request path: the path without its query string,
    /// mock prefix stripped. Only the key is stripped; the network path is
    /// left alone.
    pub fn key_for(&self, path: &str) -> String {
        let path = path.split('?').next().unwrap_or(path);
        match self.strip_prefix.as_deref() {
            Some(prefix) => match path.strip_prefix(prefix) {
                Some(rest) if rest.starts_with('/') => rest.to_string(),
                _ => path.to_string(),
            },
            None => path.to_string(),
        }
    }

    fn release(&self, request: &Request) {
        if let Some(tracking) = &request.tracking {
            self.registry.release(&tracking.key, tracking.ticket);
        }
    }
}

#[async_trait]
impl RequestInterceptor for TrackingStage {
    fn name(&self) -> &'static str {
        "tracking"
    }

    async fn before_request(&self, request: &mut Request) -> Result<InterceptAction> {
        let key = self.key_for(request.path_without_query());
        let (handle, signal) = AbortHandle::pair();
        let ticket = self.registry.register(key.clone(), handle);
        tracing::debug!(key = %key, ticket = %ticket, "Request tracked");
        request.tracking = Some(Tracking {
            guard: Arc::new(ReleaseGuard::new(self.registry.clone(), key.clone(), ticket)),
            key,
            ticket,
            signal,
        });
        Ok(InterceptAction::Continue)
    }

    async fn after_response(&self, request: &Request, _response: &mut Response) -> Result<()> {
        self.release(request);
        Ok(())
    }

    async fn on_error(&self, request: &Request, _error: &Error) {
        self.release(request);
    }

    fn priority(&self) -> i32 {
        300
    }
}
