// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! User profile and login credentials

use std::fmt;

use serde::{Deserialize, Serialize};

/// Permission list; the backend sends either one string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permissions {
    List(Vec<String>),
    Single(String),
}

impl Permissions {
    /// Whether `permission` is granted. `*:*:*` grants everything.
    pub fn allows(&self, permission: &str) -> bool {
        let check = |p: &str| p == "*:*:*" || p == permission;
        match self {
            Permissions::List(list) => list.iter().any(|p| check(p)),
            Permissions::Single(p) => check(p),
        }
    }
}

/// Logged-in user as returned by the login and user-info endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub account: Option<String>,
    pub username: Option<String>,
    pub nick: Option<String>,
    pub avatar: Option<String>,
    pub openid: Option<String>,
    pub role: Option<String>,
    pub role_id: Option<String>,
    pub token: Option<String>,
    /// Token for the realtime channel
    pub socket_token: Option<String>,
    pub permissions: Option<Permissions>,
    pub user_id: Option<i64>,
    pub cid: Option<i64>,
    pub corporation: Option<String>,
    pub corporation_id: Option<i64>,
    pub create_time: Option<String>,
    pub logo: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    /// Best display name available
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.nick.as_deref())
            .or(self.account.as_deref())
            .unwrap_or("")
    }
}

/// Account/password login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub account: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<bool>,
}

impl Credentials {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
            remember_me: None,
        }
    }

    pub fn remember_me(mut self, remember: bool) -> Self {
        self.remember_me = Some(remember);
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"***")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_from_login_payload() {
        let profile: UserProfile = serde_json::from_value(json!({
            "account": "admin",
            "username": "Administrator",
            "token": "t-1",
            "socketToken": "s-1",
            "roleId": "1",
            "permissions": ["*:*:*"],
            "corporationId": 42,
        }))
        .unwrap();

        assert_eq!(profile.socket_token.as_deref(), Some("s-1"));
        assert_eq!(profile.corporation_id, Some(42));
        assert!(profile.permissions.unwrap().allows("customer:upload"));
    }

    #[test]
    fn test_single_permission() {
        let perms: Permissions = serde_json::from_value(json!("bill:view")).unwrap();
        assert!(perms.allows("bill:view"));
        assert!(!perms.allows("bill:edit"));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("admin", "secret");
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn test_display_name_fallback() {
        let profile = UserProfile {
            account: Some("admin".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "admin");
    }
}
