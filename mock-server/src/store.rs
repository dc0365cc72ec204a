use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value;

/// What an index holds, as sent on the wire (`"Resume"` / `"Job"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum IndexKind {
    Resume,
    Job,
}

impl IndexKind {
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "Resume" => Some(Self::Resume),
            "Job" => Some(Self::Job),
            _ => None,
        }
    }

    /// Property the stored document lives under in request and response bodies.
    pub fn data_key(self) -> &'static str {
        match self {
            Self::Resume => "ResumeData",
            Self::Job => "JobData",
        }
    }
}

#[derive(Clone, Debug)]
pub struct StoredDocument {
    pub data: Value,
    pub tags: Vec<String>,
}

#[derive(Debug)]
pub struct StoredIndex {
    pub kind: IndexKind,
    pub documents: HashMap<String, StoredDocument>,
}

/// Indexes keyed by id. `BTreeMap` keeps `GET /index` stable.
#[derive(Debug, Default)]
pub struct Store {
    pub indexes: BTreeMap<String, StoredIndex>,
    pub credits_used: u64,
}

/// Why an indexing call could not store the document.
#[derive(Debug, PartialEq, Eq)]
pub enum IndexRejection {
    MissingIndex,
    WrongKind(IndexKind),
}

impl IndexRejection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingIndex => "DataNotFound",
            Self::WrongKind(_) => "InvalidParameter",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MissingIndex => "No index found with the given id.".to_string(),
            Self::WrongKind(kind) => format!("The index only holds {kind:?} documents."),
        }
    }
}

impl Store {
    pub fn put(
        &mut self,
        index_id: &str,
        document_id: &str,
        kind: IndexKind,
        data: Value,
        tags: Vec<String>,
    ) -> Result<(), IndexRejection> {
        let index = self.indexes.get_mut(index_id).ok_or(IndexRejection::MissingIndex)?;
        if index.kind != kind {
            return Err(IndexRejection::WrongKind(index.kind));
        }
        index.documents.insert(document_id.to_string(), StoredDocument { data, tags });
        Ok(())
    }

    pub fn document(&self, index_id: &str, document_id: &str) -> Option<(IndexKind, &StoredDocument)> {
        let index = self.indexes.get(index_id)?;
        index.documents.get(document_id).map(|doc| (index.kind, doc))
    }
}
