//! Parsed resume data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codec::lenient_int;
use crate::models::common::{DocumentMetadata, Location, NormalizedString, TxDate};
use crate::primitive::OptionalValue;

crate::open_string! {
    /// Kind of web address found in contact information.
    pub struct WebAddressType {
        PERSONAL_WEBSITE = "PersonalWebsite",
        LINKED_IN = "LinkedIn",
        TWITTER = "Twitter",
        FACEBOOK = "Facebook",
        INSTAGRAM = "Instagram",
        SKYPE = "Skype",
        WE_CHAT = "WeChat",
        UNKNOWN = "Unknown",
    }
}

crate::open_string! {
    /// Severity of a resume quality finding.
    pub struct ResumeQualityLevel {
        FATAL_PROBLEM = "Fatal Problem",
        MAJOR_ISSUE = "Major Issue",
        DATA_MISSING = "Data Missing",
        SUGGESTED_IMPROVEMENT = "Suggested Improvement",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParsedResume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<ContactInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_history: Option<EmploymentHistory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<ResumeSkills>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<Certification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub language_competencies: Vec<LanguageCompetency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_metadata: Option<ResumeMetadata>,
}

impl ParsedResume {
    pub fn candidate_name(&self) -> Option<&str> {
        self.contact_information
            .as_ref()?
            .candidate_name
            .as_ref()?
            .formatted_name
            .as_deref()
    }

    /// Raw skill names in document order.
    pub fn raw_skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .flat_map(|s| s.raw.iter())
            .map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<CandidateName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telephones: Vec<Telephone>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub web_addresses: Vec<WebAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CandidateName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Telephone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebAddress {
    pub address: String,
    #[serde(rename = "Type", default)]
    pub address_type: WebAddressType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_degree: Option<Degree>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education_details: Vec<EducationDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Degree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NormalizedString>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub degree_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EducationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<NormalizedString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<Degree>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub majors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minors: Vec<String>,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub graduated: OptionalValue<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<TxDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<TxDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmploymentHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_summary: Option<ExperienceSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExperienceSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "lenient_int")]
    pub months_of_work_experience: i32,
    #[serde(default, with = "lenient_int")]
    pub months_of_management_experience: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_type: Option<String>,
    #[serde(default, with = "lenient_int")]
    pub average_months_per_employer: i32,
    #[serde(default, with = "lenient_int")]
    pub fulltime_directhire_predictive_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_management_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<Employer>,
    #[serde(default)]
    pub is_self_employed: bool,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<JobTitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<TxDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<TxDate>,
    #[serde(
        default,
        with = "lenient_int::optional",
        skip_serializing_if = "OptionalValue::is_absent"
    )]
    pub number_employees_supervised: OptionalValue<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NormalizedString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobTitle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResumeSkills {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw: Vec<ResumeRawSkill>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub normalized: Vec<ResumeNormalizedSkill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResumeRawSkill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub found_in: Vec<FoundIn>,
    #[serde(
        default,
        with = "lenient_int::optional",
        skip_serializing_if = "OptionalValue::is_absent"
    )]
    pub months_experience: OptionalValue<i32>,
    #[serde(default, skip_serializing_if = "OptionalValue::is_absent")]
    pub last_used: OptionalValue<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResumeNormalizedSkill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub skill_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_skills: Vec<String>,
    #[serde(
        default,
        with = "lenient_int::optional",
        skip_serializing_if = "OptionalValue::is_absent"
    )]
    pub months_experience: OptionalValue<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FoundIn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub matched_from_list: bool,
    #[serde(default)]
    pub is_variation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageCompetency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_in_context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResumeMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub found_sections: Vec<FoundSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resume_quality: Vec<ResumeQualityAssessment>,
    #[serde(flatten)]
    pub document: DocumentMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FoundSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_text_found: Option<String>,
    #[serde(default, with = "lenient_int")]
    pub first_line_number: i32,
    #[serde(default, with = "lenient_int")]
    pub last_line_number: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResumeQualityAssessment {
    pub level: ResumeQualityLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<ResumeQualityFinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResumeQualityFinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section_identifiers: Vec<FoundIn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
