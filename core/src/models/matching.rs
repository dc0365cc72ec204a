//! Search, match and bimetric scoring.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codec::lenient_int;
use crate::models::common::Location;
use crate::models::job::ParsedJob;
use crate::models::resume::ParsedResume;
use crate::primitive::OptionalValue;

crate::wire_enum! {
    pub enum DistanceUnit {
        Miles,
        Kilometers,
    }
}

crate::wire_enum! {
    /// Scoring categories used in match weights.
    pub enum MatchCategory {
        Education,
        JobTitles,
        Skills,
        Industries,
        Languages,
        Certifications,
        ExecutiveType,
        ManagementLevel,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationCriteria {
    pub locations: Vec<Location>,
    #[serde(with = "lenient_int")]
    pub distance: i32,
    #[serde(default)]
    pub distance_unit: DistanceUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkillFilter {
    pub skill_name: String,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub is_current: OptionalValue<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobTitleFilter {
    pub title: String,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub is_current: OptionalValue<bool>,
}

/// Constraints shared by search and match.
///
/// The boolean flags are tri-state: absent means "don't filter on it".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_date_range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub document_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<SkillFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_titles: Vec<JobTitleFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_defined_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_criteria: Option<LocationCriteria>,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub is_top_student: OptionalValue<bool>,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub is_current_student: OptionalValue<bool>,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub is_recent_graduate: OptionalValue<bool>,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub is_military: OptionalValue<bool>,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub has_patents: OptionalValue<bool>,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub has_security_credentials: OptionalValue<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchMatchSettings {
    #[serde(default)]
    pub position_titles_must_have_an_exact_match: bool,
    #[serde(default)]
    pub position_titles_must_be_current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaginationSettings {
    pub skip: u32,
    pub take: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_criteria: Option<FilterCriteria>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchRequest {
    pub index_ids_to_search_into: Vec<String>,
    pub query: SearchQuery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SearchMatchSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_settings: Option<PaginationSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResult {
    pub id: String,
    pub index_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponseValue {
    #[serde(default, with = "lenient_int")]
    pub current_count: i32,
    #[serde(default, with = "lenient_int")]
    pub total_count: i32,
    #[serde(default)]
    pub matches: Vec<SearchResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryWeight {
    pub category: MatchCategory,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchResumeRequest {
    pub resume_data: ParsedResume,
    pub index_ids_to_search_into: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_category_weights: Vec<CategoryWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_criteria: Option<FilterCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SearchMatchSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchJobRequest {
    pub job_data: ParsedJob,
    pub index_ids_to_search_into: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_category_weights: Vec<CategoryWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_criteria: Option<FilterCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SearchMatchSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
}

/// Match using a document already stored in an index as the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchByDocumentIdRequest {
    pub index_ids_to_search_into: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_category_weights: Vec<CategoryWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_criteria: Option<FilterCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryScore {
    pub category: MatchCategory,
    #[serde(with = "lenient_int")]
    pub unweighted_score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_id: Option<String>,
    #[serde(with = "lenient_int")]
    pub weighted_score: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category_scores: Vec<CategoryScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchResponseValue {
    #[serde(default, with = "lenient_int")]
    pub current_count: i32,
    #[serde(default, with = "lenient_int")]
    pub total_count: i32,
    #[serde(default)]
    pub matches: Vec<MatchResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied_category_weights: Vec<CategoryWeight>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_category_weights: Vec<CategoryWeight>,
}

/// A resume with the caller's identifier, for bimetric scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScoredResume {
    pub id: String,
    pub resume_data: ParsedResume,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BimetricScoreResumeRequest {
    pub source_resume: ScoredResume,
    pub target_resumes: Vec<ScoredResume>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_category_weights: Vec<CategoryWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SearchMatchSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BimetricScoreResponseValue {
    #[serde(default)]
    pub matches: Vec<MatchResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied_category_weights: Vec<CategoryWeight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_tri_state_flags_are_omitted() {
        let criteria = FilterCriteria {
            is_military: OptionalValue::present(false),
            job_titles: vec![JobTitleFilter {
                title: "Engineer".to_string(),
                is_current: OptionalValue::Absent,
            }],
            ..Default::default()
        };
        let req = SearchRequest {
            index_ids_to_search_into: vec!["resumes".to_string()],
            query: SearchQuery {
                search_expression: None,
                filter_criteria: Some(criteria),
            },
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"IndexIdsToSearchInto":["resumes"],"Query":{"FilterCriteria":{"JobTitles":[{"Title":"Engineer"}],"IsMilitary":{"Value":false}}}}"#
        );
        assert!(!json.contains("null"));
        assert!(!json.contains("IsCurrent"));
    }

    #[test]
    fn match_scores_tolerate_floats() {
        let v: MatchResponseValue = serde_json::from_str(
            r#"{"CurrentCount":1,"TotalCount":1.0,"Matches":[{"Id":"r1","WeightedScore":87.6,
                "CategoryScores":[{"Category":"Skills","UnweightedScore":90}]}],
                "AppliedCategoryWeights":[{"Category":"JobTitles","Weight":0.25}]}"#,
        )
        .unwrap();
        assert_eq!(v.total_count, 1);
        assert_eq!(v.matches[0].weighted_score, 87);
        assert_eq!(v.matches[0].category_scores[0].category, MatchCategory::Skills);
        assert_eq!(v.applied_category_weights[0].category, MatchCategory::JobTitles);
    }

    #[test]
    fn category_weights_are_optional() {
        let v: BimetricScoreResponseValue = serde_json::from_str(r#"{"Matches":[]}"#).unwrap();
        assert!(v.applied_category_weights.is_empty());
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"Matches":[]}"#);

        let v: MatchResponseValue = serde_json::from_str(r#"{"Matches":[]}"#).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert!(!json.contains("CategoryWeights"));
        assert_eq!(
            serde_json::to_string(&SearchMatchSettings::default()).unwrap(),
            r#"{"PositionTitlesMustHaveAnExactMatch":false,"PositionTitlesMustBeCurrent":false}"#
        );
    }
}
