//! Shapes shared by resumes, jobs and the request options.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codec::lenient_int;

/// A date as found in a document, with the parts the parser actually saw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TxDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current_date: bool,
    #[serde(default)]
    pub found_year: bool,
    #[serde(default)]
    pub found_month: bool,
    #[serde(default)]
    pub found_day: bool,
}

/// A raw string and the taxonomy-normalized form of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedString {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<GeocodeSource>,
}

crate::wire_enum! {
    /// Where a set of coordinates came from.
    pub enum GeocodeSource {
        Unspecified = "None",
        Google,
        Bing,
        Cached,
        Raw,
    }
}

/// A location found in, or attached to, a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub street_address_lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_coordinates: Option<GeoCoordinates>,
}

impl Location {
    pub fn has_address(&self) -> bool {
        self.postal_code.is_some() || self.municipality.is_some() || !self.regions.is_empty()
    }
}

/// A postal address supplied by the caller for geocoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConversionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_file_extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_validity_code: Option<String>,
    #[serde(default, with = "lenient_int")]
    pub elapsed_milliseconds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_hash: Option<String>,
}

/// Alternate renderings of the submitted document, when requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Conversions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_image_extension: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParsingMetadata {
    #[serde(default, with = "lenient_int")]
    pub elapsed_milliseconds: i64,
    #[serde(default, with = "lenient_int")]
    pub time_remaining_milliseconds: i64,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "lenient_int::option")]
    pub timed_out_at_milliseconds: Option<i64>,
}

/// Metadata common to parsed resumes and jobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_culture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_settings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_last_modified: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_date_reads_partial_dates() {
        let d: TxDate =
            serde_json::from_str(r#"{"Date":"2019-01-01","FoundYear":true,"FoundMonth":false}"#).unwrap();
        assert_eq!(d.date, NaiveDate::from_ymd_opt(2019, 1, 1));
        assert!(d.found_year);
        assert!(!d.found_month);
        assert!(!d.is_current_date);
    }

    #[test]
    fn empty_location_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Location::default()).unwrap(), "{}");
    }

    #[test]
    fn geocode_source_reads_names() {
        let g: GeoCoordinates =
            serde_json::from_str(r#"{"Latitude":1.5,"Longitude":-2.0,"Source":"Google"}"#).unwrap();
        assert_eq!(g.source, Some(GeocodeSource::Google));
    }
}
