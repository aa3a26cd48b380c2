//! RFC 7807 problem-details error model
//!
//! This module provides:
//! - `AppError`: Application error carrying the problem fields plus a
//!   `catastrophic` classification
//! - `Problem`: The serializable problem-details document
//!
//! An `AppError` is constructed wherever the failure is understood;
//! the request id is attached later, when `to_problem` snapshots the
//! error inside (or outside) a request scope. The same error therefore
//! serializes correctly no matter where it was raised.

use crate::core::context::RequestContext;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Problem type URI for errors with no more specific classification.
pub const ABOUT_BLANK: &str = "about:blank";

/// Application error in problem-details shape.
///
/// `catastrophic` marks errors the process must not survive: the
/// handler reports them and then begins shutdown instead of carrying
/// on.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{title} (status {status})")]
pub struct AppError {
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    pub detail: Option<String>,
    pub instance: Option<String>,
    pub catastrophic: bool,
    pub extensions: Map<String, Value>,
}

impl AppError {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: u16) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status,
            detail: None,
            instance: None,
            catastrophic: false,
            extensions: Map::new(),
        }
    }

    /// Client error: malformed or unprocessable request.
    pub fn bad_request(title: impl Into<String>) -> Self {
        Self::new(ABOUT_BLANK, title, 400)
    }

    /// Client error: the requested resource does not exist.
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::new(ABOUT_BLANK, title, 404)
    }

    /// Server error with no more specific classification.
    pub fn internal(title: impl Into<String>) -> Self {
        Self::new(ABOUT_BLANK, title, 500)
    }

    /// Mark this error as one the process must not survive.
    #[must_use]
    pub fn catastrophic(mut self) -> Self {
        self.catastrophic = true;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Attach an extension member to the problem document.
    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }

    /// Snapshot this error as a wire-shape problem document.
    ///
    /// The request id is read from the ambient context at snapshot
    /// time and attached as the `requestId` extension when present;
    /// outside a request scope no extension is added.
    pub fn to_problem(&self, context: &dyn RequestContext) -> Problem {
        let mut extensions = self.extensions.clone();
        if let Some(request_id) = context.request_id() {
            extensions.insert("requestId".to_string(), Value::String(request_id));
        }
        Problem {
            type_uri: self.type_uri.clone(),
            title: self.title.clone(),
            status: self.status,
            detail: self.detail.clone(),
            instance: self.instance.clone(),
            extensions: if extensions.is_empty() {
                None
            } else {
                Some(extensions)
            },
        }
    }
}

/// Wire-shape problem-details document.
///
/// `type`, `title` and `status` are always present; the optional
/// fields are omitted from the serialized form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}
