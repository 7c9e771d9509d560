// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/Response interceptor trait and chain

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::{Request, Response};

/// Request interceptor trait
///
/// Stages see the outbound request before dispatch and the response after it.
///
/// # Example
///
/// ```rust,no_run
/// use viesti::interceptor::{InterceptAction, RequestInterceptor};
/// use viesti::http::Request;
/// use viesti::Result;
/// use async_trait::async_trait;
///
/// struct TenantHeader {
///     tenant: String,
/// }
///
/// #[async_trait]
/// impl RequestInterceptor for TenantHeader {
///     fn name(&self) -> &'static str {
///         "tenant"
///     }
///
///     async fn before_request(&self, req: &mut Request) -> Result<InterceptAction> {
///         req.headers.insert("x-tenant", self.tenant.parse().unwrap());
///         Ok(InterceptAction::Continue)
///     }
/// }
/// ```
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Stage name, used in logs
    fn name(&self) -> &'static str;

    /// Called before a request is sent
    ///
    /// Can modify the request, abort it, or answer it locally.
    async fn before_request(&self, _request: &mut Request) -> Result<InterceptAction> {
        Ok(InterceptAction::Continue)
    }

    /// Called after a 2xx response is received
    ///
    /// Returning an error rejects the request; later stages are skipped.
    async fn after_response(&self, _request: &Request, _response: &mut Response) -> Result<()> {
        Ok(())
    }

    /// Called when the request fails at any point after dispatch started
    async fn on_error(&self, _request: &Request, _error: &Error) {}

    /// Filter - return true if this interceptor should handle the request
    fn should_intercept(&self, _request: &Request) -> bool {
        true
    }

    /// Priority - higher priority interceptors run first
    fn priority(&self) -> i32 {
        0
    }
}

/// Action to take after interception
#[derive(Debug, Clone)]
pub enum InterceptAction {
    /// Continue with the (possibly modified) request
    Continue,
    /// Abort the request with an error
    Abort(String),
    /// Answer with this response instead of touching the network
    MockResponse(Response),
}

/// Interceptor chain - manages multiple interceptors
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor
    pub fn add<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.add_shared(Arc::new(interceptor));
    }

    /// Add a shared interceptor
    pub fn add_shared(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptors.push(interceptor);
        // Stable: equal priorities keep insertion order
        self.interceptors.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Stage names in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Process request through all interceptors
    pub async fn process_request(&self, request: &mut Request) -> Result<InterceptAction> {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(request) {
                continue;
            }

            match interceptor.before_request(request).await? {
                InterceptAction::Continue => continue,
                action => {
                    tracing::debug!(stage = interceptor.name(), path = %request.path, "Request short-circuited");
                    return Ok(action);
                }
            }
        }
        Ok(InterceptAction::Continue)
    }

    /// Process response through all interceptors
    pub async fn process_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(request) {
                continue;
            }
            interceptor.after_response(request, response).await?;
        }
        Ok(())
    }

    /// Notify interceptors of an error
    pub async fn notify_error(&self, request: &Request, error: &Error) {
        for interceptor in &self.interceptors {
            if interceptor.should_intercept(request) {
                interceptor.on_error(request, error).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct Recorder {
        name: &'static str,
        priority: i32,
        seen: Arc<Mutex<Vec<&'static str>>>,
        abort: bool,
    }

    #[async_trait]
    impl RequestInterceptor for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn before_request(&self, _request: &mut Request) -> Result<InterceptAction> {
            self.seen.lock().push(self.name);
            if self.abort {
                Ok(InterceptAction::Abort("blocked".to_string()))
            } else {
                Ok(InterceptAction::Continue)
            }
        }

        fn priority(&self) -> i32 {
            self.priority
        }
    }

    fn recorder(
        name: &'static str,
        priority: i32,
        seen: &Arc<Mutex<Vec<&'static str>>>,
        abort: bool,
    ) -> Recorder {
        Recorder {
            name,
            priority,
            seen: seen.clone(),
            abort,
        }
    }

    #[tokio::test]
    async fn test_priority_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = InterceptorChain::new();
        chain.add(recorder("low", -10, &seen, false));
        chain.add(recorder("high", 10, &seen, false));
        chain.add(recorder("mid-a", 0, &seen, false));
        chain.add(recorder("mid-b", 0, &seen, false));

        assert_eq!(chain.names(), vec!["high", "mid-a", "mid-b", "low"]);

        let mut request = Request::get("/x");
        let action = chain.process_request(&mut request).await.unwrap();
        assert!(matches!(action, InterceptAction::Continue));
        assert_eq!(*seen.lock(), vec!["high", "mid-a", "mid-b", "low"]);
    }

    #[tokio::test]
    async fn test_abort_stops_chain() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = InterceptorChain::new();
        chain.add(recorder("first", 10, &seen, true));
        chain.add(recorder("second", 0, &seen, false));

        let mut request = Request::get("/x");
        let action = chain.process_request(&mut request).await.unwrap();
        assert!(matches!(action, InterceptAction::Abort(reason) if reason == "blocked"));
        assert_eq!(*seen.lock(), vec!["first"]);
    }
}
