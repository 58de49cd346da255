use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uploader_core::{Failure, Msg, Operation, DEFAULT_UPLOAD_MESSAGE};

/// Body of `POST {endpoint}`. `file_content` is plain base64, no data-URL prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    #[serde(rename = "fileContent")]
    pub file_content: String,
}

/// Body of a successful POST. `message` is shown as-is, whatever its JSON type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl UploadResponse {
    /// Text for the success line. Null, empty or missing falls back to the default.
    pub fn confirmation(self) -> String {
        let text = match self.message {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(text)) => text,
            Some(other) => other.to_string(),
        };
        if text.trim().is_empty() {
            DEFAULT_UPLOAD_MESSAGE.to_string()
        } else {
            text
        }
    }
}

/// Body of a successful `GET {endpoint}`. A missing or null `files` is an empty listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

impl ListingResponse {
    pub fn into_files(self) -> Vec<String> {
        self.files.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ListingCompleted {
        result: Result<Vec<String>, ApiError>,
        fetched_utc: String,
    },
    UploadCompleted {
        filename: String,
        result: Result<String, ApiError>,
    },
}

impl EngineEvent {
    /// Converts a completion into the message the core expects.
    pub fn into_msg(self) -> Msg {
        match self {
            EngineEvent::ListingCompleted {
                result,
                fetched_utc,
            } => Msg::ListingFinished {
                result: result.map_err(|err| failure_for(Operation::Listing, &err)),
                fetched_utc: Some(fetched_utc),
            },
            EngineEvent::UploadCompleted { result, .. } => Msg::UploadFinished(
                result.map_err(|err| failure_for(Operation::Upload, &err)),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus { code: u16, reason: String },
    Timeout,
    Network,
    InvalidBody,
    FileRead,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus { code, reason } => write!(f, "http status {code} {reason}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::FileRead => write!(f, "file read error"),
        }
    }
}

/// Maps an engine error onto the core's failure categories.
pub fn failure_for(operation: Operation, err: &ApiError) -> Failure {
    match (&err.kind, operation) {
        (FailureKind::HttpStatus { code, reason }, Operation::Upload) => Failure::UploadRejected {
            status: *code,
            reason: reason.clone(),
        },
        (FailureKind::HttpStatus { code, reason }, Operation::Listing) => Failure::FetchRejected {
            status: *code,
            reason: reason.clone(),
        },
        _ => Failure::NetworkOrParse {
            operation,
            detail: err.to_string(),
        },
    }
}
