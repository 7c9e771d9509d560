// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Viesti - Request Layer for the Customer Console
//!
//! A single configured HTTP client that every backend call goes through.
//! Responses arrive in a `{code, data, message}` envelope; the layer unwraps
//! them, turns failures into typed errors and user notices, forces logout on
//! authentication expiry and lets callers cancel in-flight requests by path.
//!
//! ## Features
//!
//! - Envelope unwrapping: success yields `data`, failure yields [`Error::Business`]
//! - Auth expiry: business or HTTP 401 logs the session out exactly once
//! - Cancellation: abort in-flight requests by tracking key, or all of them
//! - Encoding: GET query folding, form-urlencoded and multipart bodies
//! - Interceptor chain: pluggable request/response stages ordered by priority
//! - Typed endpoint wrappers for login, customers, bills and SOP data
//!
//! ## Example
//!
//! ```rust,no_run
//! use viesti::{Client, ClientConfig, RequestConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> viesti::Result<()> {
//!     let client = Client::new(ClientConfig::from_env()?)?;
//!
//!     let list: serde_json::Value = client
//!         .get_json(RequestConfig::new("/tel/customer/list").params(&json!({"page": 1, "size": 10}))?)
//!         .await?;
//!     println!("{}", list);
//!
//!     // Abort anything still pending for this path
//!     client.cancel_request(["/tel/customer/list"]);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cancel;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod notice;
pub mod session;

// Client
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;

// Errors
pub use error::{Error, ErrorContext, ExpiryTrigger, Result};

// Envelope
pub use envelope::{Decoded, Envelope, Outcome};

// HTTP
pub use http::{
    Body, Method, MultipartForm, Part, Payload, Request, RequestConfig, Response, ResponseType,
};

// Cancellation
pub use cancel::{AbortHandle, AbortSignal, CancellationRegistry, Ticket};

// Interceptors
pub use interceptor::{InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger};

// Session
pub use session::{Credentials, ExpiryPolicy, MemorySession, SessionState, UserProfile};

// Notices
pub use notice::{MemoryNotifier, Notifier, TracingNotifier};

/// Viesti version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
