// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Encoding stage: body wire formats and query folding

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};

use super::chain::{InterceptAction, RequestInterceptor};
use crate::error::Result;
use crate::http::{Body, MultipartForm, Request};

/// Rewrites bodies and folds GET parameters into the path
pub struct EncodingStage {
    /// Convert plain bodies into multipart when asked to
    transform_request_data: bool,
}

impl EncodingStage {
    pub fn new(transform_request_data: bool) -> Self {
        Self {
            transform_request_data,
        }
    }
}

#[async_trait]
impl RequestInterceptor for EncodingStage {
    fn name(&self) -> &'static str {
        "encoding"
    }

    async fn before_request(&self, request: &mut Request) -> Result<InterceptAction> {
        if request.is_write() {
            if let Body::Json(value) = &request.body {
                if request.is_form_urlencoded() {
                    request.body = Body::Text(encode_form(value));
                } else if self.transform_request_data && request.is_multipart() {
                    request.body = Body::Multipart(MultipartForm::from_value(value)?);
                }
            }
        }

        if request.method == Method::GET && !request.params.is_empty() {
            request.path = encode_query(&request.path, &request.params);
            // Folded into the path; the transport must not encode them again
            request.params.clear();
        }

        Ok(InterceptAction::Continue)
    }

    fn priority(&self) -> i32 {
        200
    }
}

/// Append non-null parameters to `path` as a percent-encoded query string
pub fn encode_query(path: &str, params: &Map<String, Value>) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_component(key),
                encode_component(&scalar_text(value))
            )
        })
        .collect();

    if pairs.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, pairs.join("&"))
}

/// Percent-encode a query component, leaving `!'()*` literal the way
/// browsers' `encodeURIComponent` does
fn encode_component(raw: &str) -> String {
    let encoded = urlencoding::encode(raw);
    if !encoded.contains("%2") {
        return encoded.into_owned();
    }
    encoded
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Serialize a structured body as `application/x-www-form-urlencoded`.
///
/// Nested values use bracket notation (`user[name]=x`, `ids[0]=1`).
pub fn encode_form(value: &Value) -> String {
    let mut pairs = Vec::new();
    match value {
        Value::Object(obj) => {
            for (key, value) in obj {
                flatten(key, value, &mut pairs);
            }
        }
        Value::Null => {}
        other => pairs.push(urlencoding::encode(&scalar_text(other)).into_owned()),
    }
    pairs.join("&")
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(obj) => {
            for (key, value) in obj {
                flatten(&format!("{}[{}]", prefix, key), value, out);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten(&format!("{}[{}]", prefix, index), value, out);
            }
        }
        Value::Null => out.push(format!("{}=", urlencoding::encode(prefix))),
        other => out.push(format!(
            "{}={}",
            urlencoding::encode(prefix),
            urlencoding::encode(&scalar_text(other))
        )),
    }
}

/// Text form of a parameter value
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_query_drops_null_and_encodes() {
        let path = encode_query("/search", &params(json!({"a": 1, "b": null, "c": "x y"})));
        assert_eq!(path, "/search?a=1&c=x%20y");
    }

    #[test]
    fn test_query_keeps_component_safe_marks() {
        let path = encode_query("/search", &params(json!({"q": "hi!(x)*'y' 50%21"})));
        assert_eq!(path, "/search?q=hi!(x)*'y'%2050%2521");
    }

    #[test]
    fn test_query_all_null_leaves_path() {
        assert_eq!(encode_query("/list", &params(json!({"b": null}))), "/list");
    }

    #[test]
    fn test_query_appends_to_existing() {
        let path = encode_query("/tel/sop/addArrange?taskId=3", &params(json!({"page": 2})));
        assert_eq!(path, "/tel/sop/addArrange?taskId=3&page=2");
    }

    #[test]
    fn test_query_array_joined() {
        let path = encode_query("/x", &params(json!({"ids": [1, 2, 3]})));
        assert_eq!(path, "/x?ids=1%2C2%2C3");
    }

    #[test]
    fn test_form_nested() {
        let body = encode_form(&json!({
            "account": "admin",
            "user": {"name": "a b"},
            "ids": [1, 2],
        }));
        assert_eq!(
            body,
            "account=admin&ids%5B0%5D=1&ids%5B1%5D=2&user%5Bname%5D=a%20b"
        );
    }

    #[tokio::test]
    async fn test_stage_folds_get_params() {
        let stage = EncodingStage::new(true);
        let mut request = Request::get("/tel/customer/list")
            .param("page", 1)
            .param("size", 10)
            .param("name", Value::Null);

        stage.before_request(&mut request).await.unwrap();

        assert_eq!(request.path, "/tel/customer/list?page=1&size=10");
        assert!(request.params.is_empty());
    }

    #[tokio::test]
    async fn test_stage_form_urlencoded() {
        let stage = EncodingStage::new(true);
        let mut request = Request::post("/tel/login/login")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .json(&json!({"account": "admin", "password": "p w"}))
            .unwrap();

        stage.before_request(&mut request).await.unwrap();

        assert_eq!(
            request.body,
            Body::Text("account=admin&password=p%20w".to_string())
        );
    }

    #[tokio::test]
    async fn test_stage_multipart_conversion() {
        let stage = EncodingStage::new(true);
        let mut request = Request::post("/tel/customer/upload")
            .header("Content-Type", "multipart/form-data")
            .json(&json!({"type": 1, "name": "batch"}))
            .unwrap();

        stage.before_request(&mut request).await.unwrap();

        match &request.body {
            Body::Multipart(form) => {
                assert_eq!(form.text_value("type"), Some("1"));
                assert_eq!(form.text_value("name"), Some("batch"));
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stage_multipart_disabled() {
        let stage = EncodingStage::new(false);
        let mut request = Request::post("/tel/customer/upload")
            .header("Content-Type", "multipart/form-data")
            .json(&json!({"type": 1}))
            .unwrap();

        stage.before_request(&mut request).await.unwrap();
        assert!(matches!(request.body, Body::Json(_)));
    }

    #[tokio::test]
    async fn test_stage_keeps_native_multipart() {
        let stage = EncodingStage::new(true);
        let form = MultipartForm::new().file("file", "a.csv", Some("text/csv"), &b"a,b"[..]);
        let mut request = Request::post("/tel/customer/upload")
            .header("Content-Type", "multipart/form-data")
            .body(Body::Multipart(form.clone()));

        stage.before_request(&mut request).await.unwrap();
        assert_eq!(request.body, Body::Multipart(form));
    }
}
