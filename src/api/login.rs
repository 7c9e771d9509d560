// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Login and account endpoints

use serde_json::{json, Value};

use super::types::{AppInfo, CheckLogin, LoginQr, PageQuery, PageResult};
use crate::client::Client;
use crate::error::Result;
use crate::http::RequestConfig;
use crate::session::{Credentials, UserProfile};

pub const LOGIN: &str = "/tel/login/login";
pub const USER_INFO: &str = "/corporation/login/user";
pub const GH_APPS: &str = "/corporation/oauth2/ghApps";
pub const LOGIN_QR: &str = "/corporation/oauth2/loginQr";
pub const CHECK_LOGIN: &str = "/corporation/oauth2/checkLogin";
pub const BIND_INVITE_CODE: &str = "/corporation/employee/bindingInviteCode";
pub const BIND_EMPLOYEE: &str = "/corporation/employee/bindingEmployee";
pub const LOGOUT: &str = "/logout";
pub const SWITCH_CORP: &str = "/corporation/login/switchCorp";
pub const USER_LIST: &str = "/admin/user/list";

/// Account/password login
pub async fn login(client: &Client, credentials: &Credentials) -> Result<UserProfile> {
    client
        .post_json(RequestConfig::new(LOGIN).data(credentials)?)
        .await
}

/// Current user
pub async fn user_info(client: &Client) -> Result<UserProfile> {
    client.get_json(USER_INFO).await
}

/// Official accounts available for QR login
pub async fn gh_apps(client: &Client) -> Result<Vec<AppInfo>> {
    client.get_json(GH_APPS).await
}

/// Request a login QR code
pub async fn login_qr(client: &Client, appid: Option<&str>) -> Result<LoginQr> {
    client
        .get_json(RequestConfig::new(LOGIN_QR).params(&json!({ "appid": appid }))?)
        .await
}

/// Poll a QR login session
pub async fn check_login(client: &Client, sessionid: &str) -> Result<CheckLogin> {
    client
        .get_json(RequestConfig::new(CHECK_LOGIN).params(&json!({ "sessionid": sessionid }))?)
        .await
}

/// Bind a WeChat identity through an invite code
pub async fn bind_invite_code(client: &Client, invite_code: &str, openid: &str) -> Result<UserProfile> {
    client
        .post_json(
            RequestConfig::new(BIND_INVITE_CODE)
                .data(&json!({ "inviteCode": invite_code, "openid": openid }))?,
        )
        .await
}

/// Bind a WeChat identity to an existing account
pub async fn bind_employee(
    client: &Client,
    credentials: &Credentials,
    openid: &str,
) -> Result<UserProfile> {
    let data = json!({
        "account": credentials.account,
        "password": credentials.password,
        "openid": openid,
    });
    client
        .post_json(RequestConfig::new(BIND_EMPLOYEE).data(&data)?)
        .await
}

/// Server-side logout
pub async fn logout(client: &Client) -> Result<()> {
    client.post(LOGOUT).await?;
    Ok(())
}

/// Corporations the user can switch to
pub async fn corporations(client: &Client) -> Result<Vec<Value>> {
    client.get_json(SWITCH_CORP).await
}

/// Admin user list
pub async fn users(client: &Client, page: PageQuery) -> Result<PageResult<UserProfile>> {
    client
        .get_json(RequestConfig::new(USER_LIST).params(&page)?)
        .await
}
