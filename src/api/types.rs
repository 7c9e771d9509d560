// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/response shapes shared by the API wrappers

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageResult<T> {
    pub list: Vec<T>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            total: None,
            page: None,
            size: None,
        }
    }
}

/// Paging parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
}

impl PageQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

/// Bill line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDetail {
    pub name: String,
    pub create_time: String,
    pub customer_id: i64,
    pub minutes: i64,
    pub rest: String,
    #[serde(rename = "type")]
    pub kind: i64,
}

/// Customer record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub assign_time: String,
    pub phone: String,
    pub doc_id: Option<String>,
    pub birth_date: String,
    pub create_time: String,
    pub creator: String,
    pub doctor: String,
    pub status: String,
    pub plan: String,
    pub age: i64,
}

/// Customer list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub page: u32,
    pub size: u32,
    pub name: Option<String>,
    pub mobile: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<i64>,
    pub type_id: Option<i64>,
}

/// Upload history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHistory {
    pub create_time: String,
    pub count: i64,
    pub item: String,
    pub desc: String,
}

/// Upload target: SOP task (1) or SOP arrange (2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Task,
    Arrange,
}

impl UploadTarget {
    pub fn code(self) -> i64 {
        match self {
            UploadTarget::Task => 1,
            UploadTarget::Arrange => 2,
        }
    }
}

/// SOP template (menu entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SopTemplate {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: i64,
    pub type_id: i64,
}

/// SOP task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SopTask {
    pub id: i64,
    pub name: String,
    pub status: i64,
    pub count: i64,
    pub days: i64,
    #[serde(default)]
    pub time_start: Option<String>,
    #[serde(default)]
    pub time_end: Option<String>,
}

/// SOP arrange; only `id` is fixed, the rest varies per template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SopArrange {
    pub id: i64,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

/// New SOP task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub group_id: i64,
    pub name: String,
    pub time_start: String,
    pub time_end: String,
    pub status: bool,
}

/// New SOP arrange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArrange {
    pub task_id: i64,
    pub status: bool,
    pub notice: String,
    pub days: i64,
}

/// WeChat official account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    pub appid: String,
    pub name: String,
}

/// QR login ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginQr {
    pub url: String,
    pub sessionid: String,
}

/// QR login poll result; `token` is set once the user scanned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckLogin {
    pub token: Option<String>,
    pub socket_token: Option<String>,
    pub avatar: Option<String>,
    pub nick: Option<String>,
    pub openid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_result_defaults() {
        let page: PageResult<BillDetail> = serde_json::from_value(json!({"list": []})).unwrap();
        assert!(page.list.is_empty());
        assert!(page.total.is_none());
    }

    #[test]
    fn test_arrange_keeps_extra_fields() {
        let arrange: SopArrange =
            serde_json::from_value(json!({"id": 4, "notice": "call back", "days": 3})).unwrap();
        assert_eq!(arrange.id, 4);
        assert_eq!(arrange.fields.get("days"), Some(&json!(3)));
    }

    #[test]
    fn test_customer_query_null_filters() {
        let query = CustomerQuery {
            page: 1,
            size: 10,
            kind: Some(2),
            ..Default::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["type"], json!(2));
        assert!(value["name"].is_null());
    }
}
