//! Index and document management.

use crate::error::TxError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::index::{
    CreateIndexRequest, DeleteMultipleDocumentsRequest, GetJobResponseValue, GetResumeResponseValue,
    Index, IndexJobRequest, IndexResumeRequest, IndexType, UpdateUserDefinedTagsRequest,
    UserDefinedTagsMethod,
};
use crate::models::job::ParsedJob;
use crate::models::resume::ParsedResume;

use super::{path_id, TxClient};

fn index_path(index_id: &str) -> Result<String, TxError> {
    Ok(format!("/index/{}", path_id("index id", index_id)?))
}

fn document_path(index_id: &str, document_id: &str) -> Result<String, TxError> {
    Ok(format!("{}/documents/{}", index_path(index_id)?, path_id("document id", document_id)?))
}

impl TxClient {
    pub fn build_create_index(&self, index_id: &str, index_type: IndexType) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, &index_path(index_id)?, &CreateIndexRequest { index_type })
    }

    pub fn read_create_index(&self, request: &HttpRequest, response: HttpResponse) -> Result<(), TxError> {
        self.read_empty(request, response)
    }

    pub fn build_delete_index(&self, index_id: &str) -> Result<HttpRequest, TxError> {
        Ok(self.request(HttpMethod::Delete, &index_path(index_id)?))
    }

    pub fn read_delete_index(&self, request: &HttpRequest, response: HttpResponse) -> Result<(), TxError> {
        self.read_empty(request, response)
    }

    pub fn build_get_all_indexes(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/index")
    }

    pub fn read_get_all_indexes(&self, request: &HttpRequest, response: HttpResponse) -> Result<Vec<Index>, TxError> {
        self.read_value(request, response)
    }

    pub fn build_index_resume(
        &self,
        index_id: &str,
        document_id: &str,
        resume: &ParsedResume,
        user_defined_tags: &[String],
    ) -> Result<HttpRequest, TxError> {
        let body = IndexResumeRequest {
            resume_data: resume.clone(),
            user_defined_tags: user_defined_tags.to_vec(),
        };
        self.request_with_body(HttpMethod::Post, &document_path(index_id, document_id)?, &body)
    }

    pub fn build_index_job(
        &self,
        index_id: &str,
        document_id: &str,
        job: &ParsedJob,
        user_defined_tags: &[String],
    ) -> Result<HttpRequest, TxError> {
        let body = IndexJobRequest {
            job_data: job.clone(),
            user_defined_tags: user_defined_tags.to_vec(),
        };
        self.request_with_body(HttpMethod::Post, &document_path(index_id, document_id)?, &body)
    }

    /// Shared by `build_index_resume` and `build_index_job`.
    pub fn read_index_document(&self, request: &HttpRequest, response: HttpResponse) -> Result<(), TxError> {
        self.read_empty(request, response)
    }

    /// Also used for jobs: the path is the same for both document types.
    pub fn build_get_document(&self, index_id: &str, document_id: &str) -> Result<HttpRequest, TxError> {
        Ok(self.request(HttpMethod::Get, &document_path(index_id, document_id)?))
    }

    pub fn read_get_resume(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<GetResumeResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn read_get_job(&self, request: &HttpRequest, response: HttpResponse) -> Result<GetJobResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn build_delete_document(&self, index_id: &str, document_id: &str) -> Result<HttpRequest, TxError> {
        Ok(self.request(HttpMethod::Delete, &document_path(index_id, document_id)?))
    }

    pub fn read_delete_document(&self, request: &HttpRequest, response: HttpResponse) -> Result<(), TxError> {
        self.read_empty(request, response)
    }

    pub fn build_delete_multiple_documents(
        &self,
        index_id: &str,
        document_ids: &[String],
    ) -> Result<HttpRequest, TxError> {
        let body = DeleteMultipleDocumentsRequest {
            document_ids: document_ids.to_vec(),
        };
        self.request_with_body(HttpMethod::Delete, &format!("{}/documents", index_path(index_id)?), &body)
    }

    pub fn read_delete_multiple_documents(&self, request: &HttpRequest, response: HttpResponse) -> Result<(), TxError> {
        self.read_empty(request, response)
    }

    pub fn build_update_user_defined_tags(
        &self,
        index_id: &str,
        document_id: &str,
        user_defined_tags: &[String],
        method: UserDefinedTagsMethod,
    ) -> Result<HttpRequest, TxError> {
        let body = UpdateUserDefinedTagsRequest {
            user_defined_tags: user_defined_tags.to_vec(),
            method,
        };
        self.request_with_body(HttpMethod::Patch, &document_path(index_id, document_id)?, &body)
    }

    pub fn read_update_user_defined_tags(&self, request: &HttpRequest, response: HttpResponse) -> Result<(), TxError> {
        self.read_empty(request, response)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{client, failure, response};
    use super::*;

    #[test]
    fn create_index_request() {
        let req = client().build_create_index("resumes", IndexType::Resume).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/index/resumes");
        assert_eq!(req.body.as_deref(), Some(r#"{"IndexType":"Resume"}"#));
    }

    #[test]
    fn document_paths() {
        let c = client();
        assert_eq!(
            c.build_get_document("i", "d").unwrap().url,
            "http://localhost:3000/index/i/documents/d"
        );
        let del = c.build_delete_document("i", "d").unwrap();
        assert_eq!(del.method, HttpMethod::Delete);
        assert!(del.body.is_none());

        let many = c
            .build_delete_multiple_documents("i", &["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(many.url, "http://localhost:3000/index/i/documents");
        assert_eq!(many.body.as_deref(), Some(r#"{"DocumentIds":["a","b"]}"#));

        let tags = c
            .build_update_user_defined_tags("i", "d", &["vip".to_string()], UserDefinedTagsMethod::Add)
            .unwrap();
        assert_eq!(tags.method, HttpMethod::Patch);
        assert_eq!(tags.body.as_deref(), Some(r#"{"UserDefinedTags":["vip"],"Method":"Add"}"#));
    }

    #[test]
    fn index_resume_omits_empty_tags() {
        let req = client()
            .build_index_resume("i", "d", &ParsedResume::default(), &[])
            .unwrap();
        assert_eq!(req.body.as_deref(), Some(r#"{"ResumeData":{}}"#));
    }

    #[test]
    fn read_all_indexes() {
        let c = client();
        let req = c.build_get_all_indexes();
        let body = r#"{"Info":{"Code":"Success"},"Value":[{"Name":"jobs","IndexType":"Job"}]}"#;
        let indexes = c.read_get_all_indexes(&req, response(200, body)).unwrap();
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].index_type, IndexType::Job);
    }

    #[test]
    fn missing_index_reports_data_not_found() {
        let c = client();
        let req = c.build_delete_index("nope").unwrap();
        let body = r#"{"Info":{"Code":"DataNotFound","Message":"No index found with the given id."}}"#;
        let f = failure(c.read_delete_index(&req, response(404, body)).unwrap_err());
        assert_eq!(f.http_status, 404);
        assert_eq!(f.error_code, "DataNotFound");
    }

    #[test]
    fn duplicate_index_reports_conflict() {
        let c = client();
        let req = c.build_create_index("resumes", IndexType::Resume).unwrap();
        let body = r#"{"Info":{"Code":"DuplicateAsset","Message":"exists"}}"#;
        let f = failure(c.read_create_index(&req, response(409, body)).unwrap_err());
        assert_eq!(f.error_code, "DuplicateAsset");
    }

    #[test]
    fn read_stored_resume_with_tags() {
        let c = client();
        let req = c.build_get_document("i", "d").unwrap();
        let body = r#"{"Info":{"Code":"Success"},"Value":{"ResumeData":{},"UserDefinedTags":["vip"]}}"#;
        let value = c.read_get_resume(&req, response(200, body)).unwrap();
        assert!(value.resume_data.is_some());
        assert_eq!(value.user_defined_tags, vec!["vip".to_string()]);
    }

    #[test]
    fn ids_that_would_change_the_path_are_rejected() {
        let c = client();
        for bad in ["", "doc#1", "doc?x=1", "a/b", "../../index/other", "doc 1", "é"] {
            let err = c.build_delete_document("idx", bad).unwrap_err();
            assert!(
                matches!(err, TxError::InvalidId { kind: "document id", .. }),
                "{bad:?}: {err}"
            );
            let err = c.build_delete_index(bad).unwrap_err();
            assert!(matches!(err, TxError::InvalidId { kind: "index id", .. }), "{bad:?}");
        }
        assert!(c.build_get_document("a/b", "d").is_err());
        assert!(c.build_create_index("x#", IndexType::Job).is_err());
        assert!(c.build_delete_multiple_documents("", &["d".to_string()]).is_err());
        assert!(c
            .build_update_user_defined_tags("i", "d?", &[], UserDefinedTagsMethod::Add)
            .is_err());
        assert!(c.build_index_resume("i", "d/e", &ParsedResume::default(), &[]).is_err());
    }

    #[test]
    fn ids_with_dashes_and_underscores_are_accepted() {
        let req = client().build_delete_document("my_index-2", "Doc-1_a").unwrap();
        assert_eq!(req.url, "http://localhost:3000/index/my_index-2/documents/Doc-1_a");
    }
}
