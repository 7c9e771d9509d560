// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session state boundary
//!
//! The request layer reads the token from a [`SessionState`] and calls its
//! `logout` when authentication expires. Everything else about the session
//! lifecycle belongs to the collaborator.

mod expiry;
mod memory;
mod profile;

pub use expiry::{is_expiry_message, ExpiryPolicy, LOGIN_EXPIRED_NOTICE};
pub use memory::{LogoutHook, MemorySession};
pub use profile::{Credentials, Permissions, UserProfile};

/// Default header the token is sent under
pub const DEFAULT_TOKEN_KEY: &str = "Authorization";

/// What the request layer needs from the session owner
pub trait SessionState: Send + Sync {
    /// Current token; empty when unauthenticated
    fn token(&self) -> String;

    /// Header name the token is sent under
    fn token_key(&self) -> String {
        DEFAULT_TOKEN_KEY.to_string()
    }

    /// Clear token, profile and navigation state and redirect to login
    fn logout(&self);
}
