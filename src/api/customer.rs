// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Customer data and upload endpoints

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use super::types::{Customer, CustomerQuery, FileHistory, PageResult, UploadTarget};
use crate::client::Client;
use crate::error::Result;
use crate::http::{content_type, headers, MultipartForm, RequestConfig};

pub const CUSTOMER_LIST: &str = "/tel/customer/list";
pub const CUSTOMER_UPLOAD: &str = "/tel/customer/upload";
pub const FILE_HISTORY: &str = "/tel/customer/fileHistory";

/// Spreadsheet to import
#[derive(Debug, Clone)]
pub struct CustomerUpload {
    pub file_name: String,
    pub bytes: Bytes,
    pub target: UploadTarget,
    pub type_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryQuery {
    page: u32,
    size: u32,
    #[serde(rename = "type")]
    kind: i64,
    type_id: i64,
}

/// Customer list, filtered and paged
pub async fn customers(client: &Client, query: &CustomerQuery) -> Result<PageResult<Customer>> {
    client
        .get_json(RequestConfig::new(CUSTOMER_LIST).params(query)?)
        .await
}

/// Upload a customer spreadsheet
pub async fn upload_customers(client: &Client, upload: CustomerUpload) -> Result<Value> {
    let form = MultipartForm::new()
        .file("file", upload.file_name, None, upload.bytes)
        .text("type", upload.target.code().to_string())
        .text("typeId", upload.type_id.to_string());
    client
        .post_json(
            RequestConfig::new(CUSTOMER_UPLOAD)
                .header(headers::CONTENT_TYPE, content_type::MULTIPART)
                .multipart(form),
        )
        .await
}

/// Upload history for an SOP task or arrange
pub async fn file_history(
    client: &Client,
    page: u32,
    size: u32,
    target: UploadTarget,
    type_id: i64,
) -> Result<PageResult<FileHistory>> {
    let query = HistoryQuery {
        page,
        size,
        kind: target.code(),
        type_id,
    };
    client
        .get_json(RequestConfig::new(FILE_HISTORY).params(&query)?)
        .await
}
