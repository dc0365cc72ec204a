//! Error types for the Tx API client.
//!
//! # Design
//! A single `TxError` covers local failures (bad documents, encoding) and
//! remote ones. Remote failures carry an `ApiFailure`, built in one place by
//! `ApiFailure::build` so that status, code, message and request body are
//! derived the same way for every operation. When a secondary step (geocode,
//! index) fails after parsing succeeded, the failure also carries the parsed
//! document in `usable` so the caller can still use it.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::envelope::ApiResponseInfoLite;
use crate::models::parse::{ParseJobResponseValue, ParseResumeResponseValue};

/// Error code used when the server's envelope could not be read.
pub const UNKNOWN_ERROR_CODE: &str = "Unknown Error";

/// Message used when no error info is available at all.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response object from API";

/// Status reported when no HTTP response was obtained.
pub const INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Debug, Error)]
pub enum TxError {
    /// The API rejected the call, or no usable response was received.
    #[error(transparent)]
    Api(Box<ApiFailure>),

    /// A document was rejected locally before any request was made.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// An index or document id that cannot be used as a URL path segment.
    #[error("invalid {kind} {id:?}: expected letters, digits, '_' or '-'")]
    InvalidId { kind: &'static str, id: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A success envelope whose `Value` did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("optional value has no value")]
    AbsentValue,
}

impl TxError {
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            TxError::Api(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ApiFailure> for TxError {
    fn from(failure: ApiFailure) -> Self {
        TxError::Api(Box::new(failure))
    }
}

/// Which family of failure an `ApiFailure` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Generic,
    UsableResume,
    UsableJob,
}

/// The step that failed while the rest of the document came back intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    Parse,
    Geocode,
    Index,
}

/// A partially successful result attached to an `ApiFailure`.
#[derive(Debug, Clone)]
pub enum UsableResult {
    Resume {
        stage: FailedStage,
        value: Box<ParseResumeResponseValue>,
    },
    Job {
        stage: FailedStage,
        value: Box<ParseJobResponseValue>,
    },
}

impl UsableResult {
    pub fn stage(&self) -> FailedStage {
        match self {
            UsableResult::Resume { stage, .. } | UsableResult::Job { stage, .. } => *stage,
        }
    }
}

/// A failed API call.
#[derive(Debug, Clone, Error)]
#[error("{error_code} (HTTP {http_status}): {message}")]
pub struct ApiFailure {
    pub http_status: u16,
    pub error_code: String,
    pub message: String,
    pub transaction_id: Option<String>,
    /// The JSON that was sent. Only kept when the client was configured to
    /// show request bodies in errors.
    pub request_body: Option<String>,
    /// Transport-level detail when no response was received.
    pub transport_error: Option<String>,
    pub usable: Option<UsableResult>,
}

/// Inputs to `ApiFailure::build`.
#[derive(Debug, Default)]
pub(crate) struct FailureParts<'a> {
    pub request_body: Option<&'a str>,
    pub show_request_body: bool,
    pub http_status: Option<u16>,
    pub info: Option<&'a ApiResponseInfoLite>,
    pub transaction_id: Option<String>,
}

impl ApiFailure {
    pub(crate) fn build(parts: FailureParts<'_>) -> Self {
        let (error_code, message) = match parts.info {
            Some(info) => (
                info.code.to_string(),
                info.message.clone().unwrap_or_default(),
            ),
            None => (
                UNKNOWN_ERROR_CODE.to_string(),
                INVALID_RESPONSE_MESSAGE.to_string(),
            ),
        };
        let request_body = if parts.show_request_body {
            parts.request_body.map(str::to_string)
        } else {
            None
        };

        ApiFailure {
            http_status: parts.http_status.unwrap_or(INTERNAL_SERVER_ERROR),
            error_code,
            message,
            transaction_id: parts.transaction_id,
            request_body,
            transport_error: None,
            usable: None,
        }
    }

    pub(crate) fn with_usable(mut self, usable: UsableResult) -> Self {
        self.usable = Some(usable);
        self
    }

    pub(crate) fn with_transport_error(mut self, detail: String) -> Self {
        self.transport_error = Some(detail);
        self
    }

    pub fn kind(&self) -> FailureKind {
        match &self.usable {
            None => FailureKind::Generic,
            Some(UsableResult::Resume { .. }) => FailureKind::UsableResume,
            Some(UsableResult::Job { .. }) => FailureKind::UsableJob,
        }
    }

    /// The parsed resume that survived a geocode or index failure.
    pub fn usable_resume(&self) -> Option<&ParseResumeResponseValue> {
        match &self.usable {
            Some(UsableResult::Resume { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// The parsed job that survived a geocode or index failure.
    pub fn usable_job(&self) -> Option<&ParseJobResponseValue> {
        match &self.usable {
            Some(UsableResult::Job { value, .. }) => Some(value),
            _ => None,
        }
    }
}
