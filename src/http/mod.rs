// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer
//!
//! Request/response types, the multipart container and the reqwest-backed
//! transport every call goes through.

mod multipart;
mod request;
mod response;
mod transport;

pub use multipart::{MultipartForm, Part};
pub use request::{Body, Request, RequestConfig, RequestHook, ResponseType, Tracking};
pub use response::{Payload, Response};
pub use transport::{Transport, TransportOptions};

pub use reqwest::Method;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("viesti/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const USER_AGENT: &str = "user-agent";
    pub const AUTHORIZATION: &str = "authorization";
}

/// Content types the encoding stage reacts to
pub mod content_type {
    pub const JSON: &str = "application/json";
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
    pub const MULTIPART: &str = "multipart/form-data";
}
