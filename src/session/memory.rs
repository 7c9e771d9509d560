// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory session store

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::profile::{Credentials, UserProfile};
use super::{SessionState, DEFAULT_TOKEN_KEY};
use crate::api;
use crate::client::Client;
use crate::config::LOGIN_PATH;
use crate::error::{Error, Result};

/// Called on logout with the login entry path to redirect to
pub type LogoutHook = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, Default)]
struct SessionData {
    token: String,
    socket_token: String,
    profile: Option<UserProfile>,
    role_routes: Vec<String>,
    remember_me: bool,
    login_info: Option<Credentials>,
    logged_in_at: Option<DateTime<Utc>>,
}

/// Session held in process memory
pub struct MemorySession {
    data: RwLock<SessionData>,
    token_key: String,
    login_path: String,
    on_logout: Option<LogoutHook>,
    logouts: AtomicUsize,
}

impl fmt::Debug for MemorySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.read();
        f.debug_struct("MemorySession")
            .field("authenticated", &!data.token.is_empty())
            .field("user", &data.profile.as_ref().map(|p| p.display_name().to_string()))
            .field("token_key", &self.token_key)
            .field("login_path", &self.login_path)
            .finish()
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySession {
    /// Create an unauthenticated session
    pub fn new() -> Self {
        Self {
            data: RwLock::new(SessionData {
                remember_me: true,
                ..Default::default()
            }),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_path: LOGIN_PATH.to_string(),
            on_logout: None,
            logouts: AtomicUsize::new(0),
        }
    }

    /// Set the header name the token is sent under
    pub fn with_token_key(mut self, token_key: impl Into<String>) -> Self {
        self.token_key = token_key.into();
        self
    }

    /// Set the login entry point passed to the logout hook
    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    /// Register the redirect callback run on logout
    pub fn on_logout<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_logout = Some(Arc::new(hook));
        self
    }

    /// Log in through the API and store the returned profile
    pub async fn login(&self, client: &Client, credentials: Credentials) -> Result<UserProfile> {
        let profile = api::login::login(client, &credentials).await?;
        if profile.token.as_deref().unwrap_or("").is_empty() {
            return Err(Error::other("login response carried no token"));
        }

        let remember = credentials.remember_me.unwrap_or(self.remember_me());
        {
            let mut data = self.data.write();
            data.remember_me = remember;
            data.login_info = remember.then_some(credentials);
        }
        self.establish(profile.clone());
        tracing::info!(user = %profile.display_name(), "Logged in");
        Ok(profile)
    }

    /// Adopt a profile obtained elsewhere (QR login, restored session)
    pub fn establish(&self, profile: UserProfile) {
        let mut data = self.data.write();
        data.token = profile.token.clone().unwrap_or_default();
        data.socket_token = profile.socket_token.clone().unwrap_or_default();
        data.profile = Some(profile);
        data.logged_in_at = Some(Utc::now());
    }

    /// Replace the token only
    pub fn set_token(&self, token: impl Into<String>) {
        self.data.write().token = token.into();
    }

    /// Token for the realtime channel
    pub fn socket_token(&self) -> String {
        self.data.read().socket_token.clone()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.data.read().profile.clone()
    }

    pub fn set_role_routes(&self, routes: Vec<String>) {
        self.data.write().role_routes = routes;
    }

    pub fn role_routes(&self) -> Vec<String> {
        self.data.read().role_routes.clone()
    }

    pub fn remember_me(&self) -> bool {
        self.data.read().remember_me
    }

    /// Credentials kept for "remember me"
    pub fn login_info(&self) -> Option<Credentials> {
        self.data.read().login_info.clone()
    }

    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        self.data.read().logged_in_at
    }

    pub fn is_authenticated(&self) -> bool {
        !self.data.read().token.is_empty()
    }

    /// How many times logout ran
    pub fn logout_count(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        {
            let mut data = self.data.write();
            data.token.clear();
            data.socket_token.clear();
            data.profile = None;
            data.role_routes.clear();
            data.logged_in_at = None;
        }
        if let Some(hook) = &self.on_logout {
            hook(&self.login_path);
        }
    }
}

impl SessionState for MemorySession {
    fn token(&self) -> String {
        self.data.read().token.clone()
    }

    fn token_key(&self) -> String {
        self.token_key.clone()
    }

    fn logout(&self) {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.reset();
        tracing::info!(redirect = %self.login_path, "Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn profile() -> UserProfile {
        UserProfile {
            account: Some("admin".to_string()),
            token: Some("t-1".to_string()),
            socket_token: Some("s-1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_establish() {
        let session = MemorySession::new();
        assert!(!session.is_authenticated());

        session.establish(profile());

        assert!(session.is_authenticated());
        assert_eq!(session.token(), "t-1");
        assert_eq!(session.socket_token(), "s-1");
        assert!(session.logged_in_at().is_some());
    }

    #[test]
    fn test_logout_resets_and_redirects() {
        let redirects = Arc::new(Mutex::new(Vec::new()));
        let seen = redirects.clone();
        let session = MemorySession::new()
            .with_login_path("/auth/login")
            .on_logout(move |path| seen.lock().push(path.to_string()));
        session.establish(profile());
        session.set_role_routes(vec!["/dashboard".to_string()]);

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.profile().is_none());
        assert!(session.role_routes().is_empty());
        assert!(session.socket_token().is_empty());
        assert_eq!(session.logout_count(), 1);
        assert_eq!(*redirects.lock(), vec!["/auth/login".to_string()]);
    }

    #[test]
    fn test_custom_token_key() {
        let session = MemorySession::new().with_token_key("X-Token");
        assert_eq!(session.token_key(), "X-Token");
    }
}
