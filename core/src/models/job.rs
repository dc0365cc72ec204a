//! Parsed job order data.

use serde::{Deserialize, Serialize};

use crate::codec::lenient_int;
use crate::models::common::{DocumentMetadata, Location, TxDate};
use crate::models::resume::{Certification, Degree};
use crate::primitive::OptionalValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParsedJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_titles: Option<JobTitles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_names: Option<EmployerNames>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degrees: Vec<Degree>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<Certification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub language_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<JobSkills>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<TxDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<TxDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_description: Option<String>,
    #[serde(
        default,
        with = "lenient_int::optional",
        skip_serializing_if = "OptionalValue::is_absent"
    )]
    pub minimum_years: OptionalValue<i32>,
    #[serde(
        default,
        with = "lenient_int::optional",
        skip_serializing_if = "OptionalValue::is_absent"
    )]
    pub maximum_years: OptionalValue<i32>,
    #[serde(
        default,
        with = "lenient_int::optional",
        skip_serializing_if = "OptionalValue::is_absent"
    )]
    pub minimum_years_management: OptionalValue<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_metadata: Option<DocumentMetadata>,
}

impl ParsedJob {
    pub fn main_job_title(&self) -> Option<&str> {
        self.job_titles.as_ref()?.main_job_title.as_deref()
    }

    /// Raw skill names in document order.
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .flat_map(|s| s.raw.iter())
            .map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobTitles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_title: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployerNames {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_employer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employer_name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobSkills {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw: Vec<JobRawSkill>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub normalized: Vec<JobNormalizedSkill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobRawSkill {
    pub name: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobNormalizedSkill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub skill_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_skills: Vec<String>,
}
