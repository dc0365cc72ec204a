//! Documents submitted for parsing.
//!
//! Validation happens here, when the `Document` is built, so a bad input
//! never costs a round-trip.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::TxError;
use crate::models::parse::{ParseOptions, ParseRequest};

/// A file's contents plus the date it was last modified.
///
/// The last-modified date anchors relative dates found in the document
/// ("present", "3 years ago"), so placeholder dates are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    bytes: Vec<u8>,
    last_modified: NaiveDate,
}

impl Document {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, last_modified: NaiveDate) -> Result<Self, TxError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TxError::InvalidDocument("document has no content".to_string()));
        }
        if is_placeholder_date(last_modified) {
            return Err(TxError::InvalidDocument(format!(
                "{last_modified} is not a real last-modified date"
            )));
        }
        Ok(Self { bytes, last_modified })
    }

    /// Read a file, using its modification time as the last-modified date.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TxError> {
        let path = path.as_ref();
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|source| TxError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let last_modified = DateTime::<Utc>::from(modified).date_naive();
        Self::from_path_with_date(path, last_modified)
    }

    pub fn from_path_with_date(path: impl AsRef<Path>, last_modified: NaiveDate) -> Result<Self, TxError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes, last_modified)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn last_modified(&self) -> NaiveDate {
        self.last_modified
    }

    pub fn as_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn into_parse_request(self, options: ParseOptions) -> ParseRequest {
        ParseRequest {
            document_as_base64_string: self.as_base64(),
            document_last_modified: self.last_modified,
            options,
        }
    }
}

fn is_placeholder_date(date: NaiveDate) -> bool {
    date == NaiveDate::MIN
        || NaiveDate::from_ymd_opt(1, 1, 1) == Some(date)
        || NaiveDate::from_ymd_opt(1970, 1, 1) == Some(date)
}
