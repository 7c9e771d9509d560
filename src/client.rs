// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request facade
//!
//! [`Client`] is the single entry point for outbound calls. It owns the
//! transport, the interceptor chain and the cancellation registry, and
//! resolves every call to either the unwrapped payload or an [`Error`].

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::cancel::CancellationRegistry;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{Payload, Request, RequestConfig, Response, Transport};
use crate::interceptor::{
    AuthHeaderStage, EncodingStage, EnvelopeStage, InterceptAction, InterceptorChain,
    RequestInterceptor, RequestLogger, TrackingStage, TransportErrorHandler,
};
use crate::notice::{Notifier, TracingNotifier};
use crate::session::{ExpiryPolicy, MemorySession, SessionState};

struct Inner {
    config: ClientConfig,
    transport: Transport,
    chain: InterceptorChain,
    registry: Arc<CancellationRegistry>,
    errors: TransportErrorHandler,
    session: Arc<dyn SessionState>,
}

/// Shared request client
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

/// Builder wiring the collaborators into a [`Client`]
pub struct ClientBuilder {
    config: ClientConfig,
    session: Option<Arc<dyn SessionState>>,
    notifier: Option<Arc<dyn Notifier>>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
    logger: Option<RequestLogger>,
}

impl ClientBuilder {
    /// Start from a configuration
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            session: None,
            notifier: None,
            interceptors: Vec::new(),
            logger: Some(RequestLogger::default()),
        }
    }

    /// Session collaborator; defaults to an empty [`MemorySession`]
    pub fn session(mut self, session: Arc<dyn SessionState>) -> Self {
        self.session = Some(session);
        self
    }

    /// Notice sink; defaults to [`TracingNotifier`]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Add a custom interceptor
    pub fn interceptor<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Replace or disable the request logger
    pub fn logger(mut self, logger: Option<RequestLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Client> {
        let transport = Transport::create(self.config.transport_options())?;
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(MemorySession::new()));
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier));

        let registry = Arc::new(CancellationRegistry::new());
        let policy = Arc::new(ExpiryPolicy::new(session.clone(), notifier.clone()));

        let mut chain = InterceptorChain::new();
        chain.add(TrackingStage::new(
            registry.clone(),
            self.config.tracking_prefix(),
        ));
        chain.add(EncodingStage::new(self.config.transform_request_data));
        chain.add(AuthHeaderStage::new(session.clone()));
        chain.add(EnvelopeStage::new(
            self.config.success_code,
            policy.clone(),
            notifier.clone(),
        ));
        if let Some(logger) = self.logger {
            chain.add(logger);
        }
        for interceptor in self.interceptors {
            chain.add_shared(interceptor);
        }
        tracing::debug!(stages = ?chain.names(), base_path = %self.config.base_path, "Client ready");

        Ok(Client {
            inner: Arc::new(Inner {
                config: self.config,
                transport,
                chain,
                registry,
                errors: TransportErrorHandler::new(policy, notifier),
                session,
            }),
        })
    }
}

impl Client {
    /// Create a client with default collaborators
    pub fn new(config: ClientConfig) -> Result<Self> {
        ClientBuilder::new(config).build()
    }

    /// Start a builder
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Execute a request
    pub async fn request(
        &self,
        method: Method,
        config: impl Into<RequestConfig>,
    ) -> Result<Payload> {
        let config = config.into();
        let hook = config.hook.clone();
        let mut request = config.into_request(method)?;
        if let Some(hook) = hook {
            hook(&mut request);
        }

        let chain = &self.inner.chain;
        match chain.process_request(&mut request).await {
            Ok(InterceptAction::Continue) => {}
            Ok(InterceptAction::MockResponse(response)) => {
                return self.settle(&request, Ok(response)).await;
            }
            Ok(InterceptAction::Abort(reason)) => {
                let err = Error::Aborted(reason);
                chain.notify_error(&request, &err).await;
                return Err(err);
            }
            Err(err) => {
                chain.notify_error(&request, &err).await;
                return Err(err);
            }
        }

        let result = self.inner.transport.send(&request).await;
        self.settle(&request, result).await
    }

    /// Run the response side of the chain
    async fn settle(&self, request: &Request, result: Result<Response>) -> Result<Payload> {
        let chain = &self.inner.chain;
        match result {
            Ok(mut response) => match chain.process_response(request, &mut response).await {
                Ok(()) => Ok(response.into_payload()),
                Err(err) => {
                    chain.notify_error(request, &err).await;
                    Err(err)
                }
            },
            Err(err) => {
                chain.notify_error(request, &err).await;
                Err(self.inner.errors.handle(request, err))
            }
        }
    }

    /// GET request
    pub async fn get(&self, config: impl Into<RequestConfig>) -> Result<Payload> {
        self.request(Method::GET, config).await
    }

    /// POST request
    pub async fn post(&self, config: impl Into<RequestConfig>) -> Result<Payload> {
        self.request(Method::POST, config).await
    }

    /// PUT request
    pub async fn put(&self, config: impl Into<RequestConfig>) -> Result<Payload> {
        self.request(Method::PUT, config).await
    }

    /// PATCH request
    pub async fn patch(&self, config: impl Into<RequestConfig>) -> Result<Payload> {
        self.request(Method::PATCH, config).await
    }

    /// DELETE request
    pub async fn delete(&self, config: impl Into<RequestConfig>) -> Result<Payload> {
        self.request(Method::DELETE, config).await
    }

    /// GET and deserialize the payload
    pub async fn get_json<T: DeserializeOwned>(&self, config: impl Into<RequestConfig>) -> Result<T> {
        self.get(config).await?.into_json()
    }

    /// POST and deserialize the payload
    pub async fn post_json<T: DeserializeOwned>(&self, config: impl Into<RequestConfig>) -> Result<T> {
        self.post(config).await?.into_json()
    }

    /// PUT and deserialize the payload
    pub async fn put_json<T: DeserializeOwned>(&self, config: impl Into<RequestConfig>) -> Result<T> {
        self.put(config).await?.into_json()
    }

    /// DELETE and deserialize the payload
    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        config: impl Into<RequestConfig>,
    ) -> Result<T> {
        self.delete(config).await?.into_json()
    }

    /// Cancel in-flight requests by tracking key
    pub fn cancel_request<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.inner.registry.cancel(keys)
    }

    /// Cancel every in-flight request
    pub fn cancel_all_requests(&self) -> usize {
        self.inner.registry.cancel_all()
    }

    /// Cancellation registry
    pub fn registry(&self) -> &CancellationRegistry {
        &self.inner.registry
    }

    /// Session collaborator
    pub fn session(&self) -> &Arc<dyn SessionState> {
        &self.inner.session
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Stage names in execution order
    pub fn stages(&self) -> Vec<&'static str> {
        self.inner.chain.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Body;
    use async_trait::async_trait;
    use bytes::Bytes;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use serde_json::json;
    use url::Url;

    /// Answers locally with a canned envelope, recording the dispatched path
    struct CannedBackend {
        body: serde_json::Value,
        seen: Arc<parking_lot::Mutex<Vec<(String, Body)>>>,
    }

    #[async_trait]
    impl RequestInterceptor for CannedBackend {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn before_request(&self, request: &mut Request) -> Result<InterceptAction> {
            self.seen
                .lock()
                .push((request.path.clone(), request.body.clone()));
            Ok(InterceptAction::MockResponse(Response::new(
                StatusCode::OK,
                HeaderMap::new(),
                Bytes::from(self.body.to_string()),
                Url::parse("http://localhost/").unwrap(),
                0,
            )))
        }

        fn priority(&self) -> i32 {
            -200
        }
    }

    fn client_with(
        body: serde_json::Value,
    ) -> (Client, Arc<parking_lot::Mutex<Vec<(String, Body)>>>) {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let client = Client::builder(ClientConfig::new().base_path("http://localhost"))
            .interceptor(CannedBackend {
                body,
                seen: seen.clone(),
            })
            .build()
            .unwrap();
        (client, seen)
    }

    #[test]
    fn test_stage_order() {
        let client = Client::new(ClientConfig::new().base_path("http://localhost")).unwrap();
        assert_eq!(
            client.stages(),
            vec!["tracking", "encoding", "auth-header", "envelope", "logger"]
        );
    }

    #[tokio::test]
    async fn test_mock_response_goes_through_response_side() {
        let (client, seen) = client_with(json!({"code": 0, "data": {"list": []}}));

        let payload = client
            .get(
                RequestConfig::new("/tel/customer/bill")
                    .params(&json!({"page": 1, "size": 10}))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(payload, Payload::Json(json!({"list": []})));
        assert_eq!(seen.lock()[0].0, "/tel/customer/bill?page=1&size=10");
        assert!(client.registry().is_empty());
    }

    #[tokio::test]
    async fn test_hook_runs_before_chain() {
        let (client, seen) = client_with(json!({"code": 0}));

        client
            .get(RequestConfig::new("/a").hook(|req| req.path = "/b".to_string()))
            .await
            .unwrap();

        assert_eq!(seen.lock()[0].0, "/b");
    }

    #[tokio::test]
    async fn test_business_failure_releases_tracking() {
        let (client, _) = client_with(json!({"code": 500, "message": "nope"}));

        let err = client.post("/tel/sop/addTask").await.unwrap_err();

        assert!(err.is_business());
        assert!(client.registry().is_empty());
    }

    /// Never answers, like a backend that outlives the caller's patience
    struct Stalled;

    #[async_trait]
    impl RequestInterceptor for Stalled {
        fn name(&self) -> &'static str {
            "stalled"
        }

        async fn before_request(&self, _request: &mut Request) -> Result<InterceptAction> {
            std::future::pending::<()>().await;
            Ok(InterceptAction::Continue)
        }

        fn priority(&self) -> i32 {
            -200
        }
    }

    #[tokio::test]
    async fn test_dropped_call_releases_tracking() {
        let client = Client::builder(ClientConfig::new().base_path("http://localhost"))
            .interceptor(Stalled)
            .build()
            .unwrap();

        for i in 0..5 {
            let call = client.get(format!("/item/{}", i));
            let res = tokio::time::timeout(std::time::Duration::from_millis(10), call).await;
            assert!(res.is_err());
        }

        assert!(client.registry().is_empty());
        assert_eq!(client.cancel_all_requests(), 0);
    }
}
