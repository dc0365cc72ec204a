//! Professions taxonomy requests and responses.

use serde::{Deserialize, Serialize};

use crate::codec::lenient_int;

/// Professions options for parse requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfessionsSettings {
    #[serde(default)]
    pub normalize: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizeProfessionsRequest {
    pub job_titles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfessionClassification {
    #[serde(with = "lenient_int")]
    pub code_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedProfession {
    pub input_job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<ProfessionClassification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<ProfessionClassification>,
    #[serde(default)]
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizeProfessionsResponseValue {
    #[serde(default)]
    pub professions: Vec<NormalizedProfession>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_normalized_professions() {
        let v: NormalizeProfessionsResponseValue = serde_json::from_str(
            r#"{"Professions":[{"InputJobTitle":"rust dev","Profession":{"CodeId":2001.0,"Description":"Software Developer"},"Confidence":0.8}]}"#,
        )
        .unwrap();
        let p = &v.professions[0];
        assert_eq!(p.profession.as_ref().unwrap().code_id, 2001);
        assert!(p.group.is_none());
    }
}
