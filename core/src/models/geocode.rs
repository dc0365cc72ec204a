//! Geocoding requests and responses.

use serde::{Deserialize, Serialize};

use crate::models::common::{Address, GeoCoordinates};
use crate::models::envelope::ApiResponseInfoLite;
use crate::models::index::IndexingOptions;
use crate::models::job::ParsedJob;
use crate::models::parse::{ParseJobResponseValue, ParseResumeResponseValue};
use crate::models::resume::ParsedResume;

crate::wire_enum! {
    /// Geocoding backend. `Google` and `Bing` require a provider key.
    pub enum GeocodeProvider {
        Unspecified = "None",
        Google,
        Bing,
    }
}

/// How to geocode a document.
///
/// With neither `postal_address` nor `geo_coordinates` set, the address found
/// in the document is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeOptions {
    #[serde(default)]
    pub include_geocoding: bool,
    #[serde(default)]
    pub provider: GeocodeProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_coordinates: Option<GeoCoordinates>,
}

impl GeocodeOptions {
    pub fn with_provider(provider: GeocodeProvider, provider_key: Option<String>) -> Self {
        Self {
            include_geocoding: true,
            provider,
            provider_key,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeResumeRequest {
    pub resume_data: ParsedResume,
    #[serde(flatten)]
    pub options: GeocodeOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeJobRequest {
    pub job_data: ParsedJob,
    #[serde(flatten)]
    pub options: GeocodeOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeResumeResponseValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_data: Option<ParsedResume>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeJobResponseValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_data: Option<ParsedJob>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeAndIndexResumeRequest {
    pub resume_data: ParsedResume,
    pub geocode_options: GeocodeOptions,
    pub indexing_options: IndexingOptions,
    #[serde(default)]
    pub index_if_geocode_fails: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeAndIndexJobRequest {
    pub job_data: ParsedJob,
    pub geocode_options: GeocodeOptions,
    pub indexing_options: IndexingOptions,
    #[serde(default)]
    pub index_if_geocode_fails: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeAndIndexResumeResponseValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode_response: Option<ApiResponseInfoLite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_response: Option<ApiResponseInfoLite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_data: Option<ParsedResume>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeAndIndexJobResponseValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode_response: Option<ApiResponseInfoLite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_response: Option<ApiResponseInfoLite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_data: Option<ParsedJob>,
}

// A geocode-and-index result is a parse result without the parse step, so a
// failure can hand it back through the same usable-result slot.
impl From<GeocodeAndIndexResumeResponseValue> for ParseResumeResponseValue {
    fn from(value: GeocodeAndIndexResumeResponseValue) -> Self {
        ParseResumeResponseValue {
            resume_data: value.resume_data,
            geocode_response: value.geocode_response,
            indexing_response: value.indexing_response,
            ..Default::default()
        }
    }
}

impl From<GeocodeAndIndexJobResponseValue> for ParseJobResponseValue {
    fn from(value: GeocodeAndIndexJobResponseValue) -> Self {
        ParseJobResponseValue {
            job_data: value.job_data,
            geocode_response: value.geocode_response,
            indexing_response: value.indexing_response,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocode_request_flattens_options() {
        let req = GeocodeResumeRequest {
            resume_data: ParsedResume::default(),
            options: GeocodeOptions {
                postal_address: Some(Address {
                    postal_code: Some("10001".to_string()),
                    ..Default::default()
                }),
                ..GeocodeOptions::with_provider(GeocodeProvider::Google, Some("key".to_string()))
            },
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "ResumeData": {},
                "IncludeGeocoding": true,
                "Provider": "Google",
                "ProviderKey": "key",
                "PostalAddress": {"PostalCode": "10001"}
            })
        );
    }

    #[test]
    fn geocode_and_index_value_converts() {
        let value = GeocodeAndIndexResumeResponseValue {
            indexing_response: Some(ApiResponseInfoLite {
                code: "DataNotFound".into(),
                message: None,
            }),
            resume_data: Some(ParsedResume::default()),
            ..Default::default()
        };
        let parsed: ParseResumeResponseValue = value.into();
        assert!(parsed.resume_data.is_some());
        assert!(parsed.parsing_response.is_none());
        assert_eq!(parsed.indexing_response.unwrap().code.as_str(), "DataNotFound");
    }
}
