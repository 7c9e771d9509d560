// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Billing endpoints

use super::types::{BillDetail, PageQuery, PageResult};
use crate::client::Client;
use crate::error::Result;
use crate::http::RequestConfig;

pub const BILL_DETAILS: &str = "/tel/customer/bill";

/// Bill line items, paged
pub async fn bill_details(client: &Client, page: PageQuery) -> Result<PageResult<BillDetail>> {
    client
        .get_json(RequestConfig::new(BILL_DETAILS).params(&page)?)
        .await
}
