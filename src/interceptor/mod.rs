// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor chain and the built-in stages
//!
//! Stages run in descending priority on both the request and the response
//! side. The built-in order is:
//!
//! | priority | stage                      |
//! |---------:|----------------------------|
//! | 300      | [`TrackingStage`]          |
//! | 200      | [`EncodingStage`]          |
//! | 100      | [`AuthHeaderStage`]        |
//! | 0        | [`EnvelopeStage`]          |
//! | -100     | [`RequestLogger`]          |
//!
//! Transport failures bypass the response side and go through
//! [`TransportErrorHandler`] after the chain's `on_error` hooks.

mod auth;
mod chain;
mod encoding;
mod envelope;
mod logger;
mod tracking;
mod transport_error;

pub use auth::AuthHeaderStage;
pub use chain::{InterceptAction, InterceptorChain, RequestInterceptor};
pub use encoding::{encode_form, encode_query, EncodingStage};
pub use envelope::EnvelopeStage;
pub use logger::RequestLogger;
pub use tracking::TrackingStage;
pub use transport_error::TransportErrorHandler;
