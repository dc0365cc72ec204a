//! Index management requests and responses.

use serde::{Deserialize, Serialize};

use crate::models::job::ParsedJob;
use crate::models::resume::ParsedResume;

crate::wire_enum! {
    /// What kind of document an index holds.
    pub enum IndexType {
        Resume,
        Job,
    }
}

crate::wire_enum! {
    /// How `update_user_defined_tags` applies the supplied tags.
    pub enum UserDefinedTagsMethod {
        Add,
        Remove,
        Overwrite,
        Delete,
    }
}

/// Index the parsed document in the same transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexingOptions {
    pub index_id: String,
    pub document_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_defined_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateIndexRequest {
    pub index_type: IndexType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Index {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub name: String,
    pub index_type: IndexType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexResumeRequest {
    pub resume_data: ParsedResume,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_defined_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexJobRequest {
    pub job_data: ParsedJob,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_defined_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserDefinedTagsRequest {
    pub user_defined_tags: Vec<String>,
    pub method: UserDefinedTagsMethod,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMultipleDocumentsRequest {
    pub document_ids: Vec<String>,
}

/// A resume stored in an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetResumeResponseValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_data: Option<ParsedResume>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_defined_tags: Vec<String>,
}

/// A job stored in an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetJobResponseValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_data: Option<ParsedJob>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_defined_tags: Vec<String>,
}
