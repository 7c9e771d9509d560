// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! SOP template, task and arrange endpoints

use serde_json::{json, Value};

use super::types::{NewArrange, NewTask, PageQuery, PageResult, SopArrange, SopTask, SopTemplate};
use crate::client::Client;
use crate::error::Result;
use crate::http::RequestConfig;

pub const TEMPLATES: &str = "/tel/sop/templates";
pub const TASKS: &str = "/tel/sop/tasks";
pub const ARRANGES: &str = "/tel/sop/arranges";
pub const ADD_TASK: &str = "/tel/sop/addTask";
pub const UPDATE_TASK_STATUS: &str = "/tel/sop/updateTaskStatus";
pub const DELETE_TASK: &str = "/tel/sop/deleteTask";
pub const ADD_ARRANGE: &str = "/tel/sop/addArrange";
pub const UPDATE_ARRANGE_STATUS: &str = "/tel/sop/updateArrangeStatus";
pub const DELETE_ARRANGE: &str = "/tel/sop/deleteArrange";

/// Templates shown in the side menu
pub async fn templates(client: &Client) -> Result<PageResult<SopTemplate>> {
    client.get_json(TEMPLATES).await
}

/// Tasks of a template group
pub async fn tasks(client: &Client, group_id: i64) -> Result<PageResult<SopTask>> {
    client
        .get_json(RequestConfig::new(TASKS).params(&json!({ "groupId": group_id }))?)
        .await
}

/// Arranges of a task, paged
pub async fn arranges(
    client: &Client,
    task_id: i64,
    page: PageQuery,
) -> Result<PageResult<SopArrange>> {
    let params = json!({ "taskId": task_id, "page": page.page, "size": page.size });
    client
        .get_json(RequestConfig::new(ARRANGES).params(&params)?)
        .await
}

pub async fn add_task(client: &Client, task: &NewTask) -> Result<Value> {
    client
        .post_json(RequestConfig::new(ADD_TASK).data(task)?)
        .await
}

pub async fn update_task_status(client: &Client, id: i64, status: bool) -> Result<Value> {
    client
        .post_json(
            RequestConfig::new(UPDATE_TASK_STATUS).data(&json!({ "id": id, "status": status }))?,
        )
        .await
}

pub async fn delete_task(client: &Client, id: i64) -> Result<Value> {
    client
        .delete_json(format!("{}?id={}", DELETE_TASK, id))
        .await
}

pub async fn add_arrange(client: &Client, arrange: &NewArrange) -> Result<Value> {
    client
        .post_json(
            RequestConfig::new(format!("{}?taskId={}", ADD_ARRANGE, arrange.task_id))
                .data(arrange)?,
        )
        .await
}

pub async fn update_arrange_status(client: &Client, arrange_id: i64, status: bool) -> Result<Value> {
    client
        .post_json(
            RequestConfig::new(UPDATE_ARRANGE_STATUS)
                .data(&json!({ "arrangeId": arrange_id, "status": status }))?,
        )
        .await
}

pub async fn delete_arrange(client: &Client, arrange_id: i64) -> Result<Value> {
    client
        .delete_json(format!("{}?arrangeId={}", DELETE_ARRANGE, arrange_id))
        .await
}
