// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Inspectable multipart container
//!
//! `reqwest::multipart::Form` is write-only, so requests carry this type
//! until the transport converts it at send time.

use bytes::Bytes;
use serde_json::Value;

use crate::error::{Error, Result};

/// One multipart field
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Plain text field
    Text(String),
    /// File upload
    File {
        file_name: String,
        mime: Option<String>,
        bytes: Bytes,
    },
}

/// Ordered multipart form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<(String, Part)>,
}

impl MultipartForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from a JSON object, one text field per key.
    ///
    /// Strings are sent as-is, other scalars in their JSON text form, and
    /// arrays/objects as JSON. `null` fields are skipped.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(Error::other(format!(
                    "multipart body must be an object, got {}",
                    other
                )))
            }
        };

        let mut form = Self::new();
        for (key, value) in obj {
            match value {
                Value::Null => {}
                Value::String(s) => form = form.text(key.clone(), s.clone()),
                other => form = form.text(key.clone(), other.to_string()),
            }
        }
        Ok(form)
    }

    /// Append a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), Part::Text(value.into())));
        self
    }

    /// Append a file field
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<&str>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        self.parts.push((
            name.into(),
            Part::File {
                file_name: file_name.into(),
                mime: mime.map(String::from),
                bytes: bytes.into(),
            },
        ));
        self
    }

    /// First part with this name
    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    /// First text value with this name
    pub fn text_value(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Part::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Part)> {
        self.parts.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Convert into a reqwest form for sending
    pub fn into_reqwest(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, part) in self.parts {
            form = match part {
                Part::Text(value) => form.text(name, value),
                Part::File {
                    file_name,
                    mime,
                    bytes,
                } => {
                    let mut part =
                        reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(file_name);
                    if let Some(mime) = mime {
                        part = part.mime_str(&mime)?;
                    }
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_keeps_pairs() {
        let form = MultipartForm::from_value(&json!({
            "name": "alice",
            "age": 30,
            "vip": true,
            "note": null,
        }))
        .unwrap();

        assert_eq!(form.len(), 3);
        assert_eq!(form.text_value("name"), Some("alice"));
        assert_eq!(form.text_value("age"), Some("30"));
        assert_eq!(form.text_value("vip"), Some("true"));
        assert!(form.get("note").is_none());
    }

    #[test]
    fn test_from_value_rejects_array() {
        assert!(MultipartForm::from_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_file_part() {
        let form = MultipartForm::new()
            .text("type", "1")
            .file("file", "customers.xlsx", None, &b"PK"[..]);

        assert!(matches!(
            form.get("file"),
            Some(Part::File { file_name, .. }) if file_name == "customers.xlsx"
        ));
        assert!(form.into_reqwest().is_ok());
    }
}
