//! Parse requests and their results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FailedStage;
use crate::models::common::{ConversionMetadata, Conversions, ParsingMetadata};
use crate::models::envelope::ApiResponseInfoLite;
use crate::models::geocode::GeocodeOptions;
use crate::models::index::IndexingOptions;
use crate::models::job::ParsedJob;
use crate::models::professions::ProfessionsSettings;
use crate::models::resume::ParsedResume;
use crate::models::skills::SkillsSettings;

/// Body of `/parser/resume` and `/parser/joborder`.
///
/// Build one from a validated `Document` with
/// `Document::into_parse_request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParseRequest {
    pub document_as_base64_string: String,
    pub document_last_modified: NaiveDate,
    #[serde(flatten)]
    pub options: ParseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParseOptions {
    /// Raw parser configuration string, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_settings: Option<SkillsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professions_settings: Option<ProfessionsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode_options: Option<GeocodeOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_options: Option<IndexingOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_html: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_rtf: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_pdf: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_candidate_image: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_llm_parser: Option<bool>,
}

/// Result of `/parser/resume`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParseResumeResponseValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_data: Option<ParsedResume>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redacted_resume_data: Option<ParsedResume>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_metadata: Option<ConversionMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversions: Option<Conversions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsing_metadata: Option<ParsingMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsing_response: Option<ApiResponseInfoLite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode_response: Option<ApiResponseInfoLite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_response: Option<ApiResponseInfoLite>,
}

/// Result of `/parser/joborder`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParseJobResponseValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_data: Option<ParsedJob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_metadata: Option<ConversionMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversions: Option<Conversions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsing_metadata: Option<ParsingMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsing_response: Option<ApiResponseInfoLite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode_response: Option<ApiResponseInfoLite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_response: Option<ApiResponseInfoLite>,
}

/// First secondary step that reported a failure, in processing order.
fn first_failed_stage<'a>(
    parsing: Option<&'a ApiResponseInfoLite>,
    geocode: Option<&'a ApiResponseInfoLite>,
    indexing: Option<&'a ApiResponseInfoLite>,
) -> Option<(FailedStage, &'a ApiResponseInfoLite)> {
    [
        (FailedStage::Parse, parsing),
        (FailedStage::Geocode, geocode),
        (FailedStage::Index, indexing),
    ]
    .into_iter()
    .find_map(|(stage, info)| info.filter(|i| !i.is_success()).map(|i| (stage, i)))
}

impl ParseResumeResponseValue {
    pub fn failed_stage(&self) -> Option<(FailedStage, &ApiResponseInfoLite)> {
        first_failed_stage(
            self.parsing_response.as_ref(),
            self.geocode_response.as_ref(),
            self.indexing_response.as_ref(),
        )
    }
}

impl ParseJobResponseValue {
    pub fn failed_stage(&self) -> Option<(FailedStage, &ApiResponseInfoLite)> {
        first_failed_stage(
            self.parsing_response.as_ref(),
            self.geocode_response.as_ref(),
            self.indexing_response.as_ref(),
        )
    }
}
