//! Skills taxonomy requests and responses.

use serde::{Deserialize, Serialize};

use crate::codec::lenient_int;

crate::wire_enum! {
    /// Skills taxonomy generation. Sent as a bare version number.
    pub enum SkillsTaxonomyVersion {
        V1 = "1",
        V2 = "2",
    }
}

/// Skills options for parse requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkillsSettings {
    #[serde(default)]
    pub normalize: bool,
    #[serde(default)]
    pub taxonomy_version: SkillsTaxonomyVersion,
}

/// A skill in the taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Skill {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub skill_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutocompleteSkillsRequest {
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkillsResponseValue {
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LookupSkillsRequest {
    pub skill_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizeSkillsRequest {
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedSkill {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub skill_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizeSkillsResponseValue {
    #[serde(default)]
    pub skills: Vec<NormalizedSkill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractSkillsRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_language: Option<String>,
    /// Minimum confidence, 0.0 to 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSkillOccurrence {
    pub value: String,
    #[serde(default, with = "lenient_int")]
    pub start_offset: i32,
    #[serde(default, with = "lenient_int")]
    pub end_offset: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractedSkill {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub skill_type: Option<String>,
    #[serde(default)]
    pub score: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_skills: Vec<RawSkillOccurrence>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractSkillsResponseValue {
    #[serde(default)]
    pub skills: Vec<ExtractedSkill>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_version_uses_numeric_label() {
        let settings = SkillsSettings {
            normalize: true,
            taxonomy_version: SkillsTaxonomyVersion::V2,
        };
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            serde_json::json!({"Normalize": true, "TaxonomyVersion": "2"})
        );
        let back: SkillsSettings = serde_json::from_str(r#"{"Normalize":false,"TaxonomyVersion":""}"#).unwrap();
        assert_eq!(back.taxonomy_version, SkillsTaxonomyVersion::V1);
        assert!(serde_json::from_str::<SkillsSettings>(r#"{"TaxonomyVersion":"V2"}"#).is_err());
    }

    #[test]
    fn extract_offsets_tolerate_floats() {
        let v: ExtractSkillsResponseValue = serde_json::from_str(
            r#"{"Skills":[{"Id":"KS1","Score":0.9,"RawSkills":[{"Value":"rust","StartOffset":4.0,"EndOffset":8}]}]}"#,
        )
        .unwrap();
        assert_eq!(v.skills[0].raw_skills[0].start_offset, 4);
    }
}
