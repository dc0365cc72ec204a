//! Resume formatting.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::TxError;
use crate::models::resume::ParsedResume;

crate::wire_enum! {
    /// Output document type.
    pub enum ResumeFormatType {
        Docx = "DOCX",
        Pdf = "PDF",
    }
}

crate::wire_enum! {
    pub enum ResumeTemplate {
        Standard = "DEFAULT",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormatResumeRequest {
    pub resume_data: ParsedResume,
    #[serde(default)]
    pub desired_document_type: ResumeFormatType,
    #[serde(rename = "ResumeType", default)]
    pub template: ResumeTemplate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormatResumeResponseValue {
    pub document_as_base64_string: String,
}

impl FormatResumeResponseValue {
    /// The formatted document's bytes.
    pub fn decode_document(&self) -> Result<Vec<u8>, TxError> {
        STANDARD
            .decode(&self.document_as_base64_string)
            .map_err(|e| TxError::Deserialization(format!("formatted document is not base64: {e}")))
    }
}
