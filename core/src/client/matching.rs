//! Search, match and bimetric scoring.

use crate::error::TxError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::matching::{
    BimetricScoreResponseValue, BimetricScoreResumeRequest, MatchByDocumentIdRequest, MatchJobRequest,
    MatchResponseValue, MatchResumeRequest, SearchRequest, SearchResponseValue,
};

use super::{path_id, TxClient};

impl TxClient {
    pub fn build_search(&self, body: &SearchRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/searcher", body)
    }

    pub fn read_search(&self, request: &HttpRequest, response: HttpResponse) -> Result<SearchResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn build_match_resume(&self, body: &MatchResumeRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/matcher/resume", body)
    }

    pub fn build_match_job(&self, body: &MatchJobRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/matcher/joborder", body)
    }

    /// Match against the document stored at `index_id`/`document_id`.
    pub fn build_match_indexed_document(
        &self,
        index_id: &str,
        document_id: &str,
        body: &MatchByDocumentIdRequest,
    ) -> Result<HttpRequest, TxError> {
        let path = format!(
            "/matcher/indexes/{}/documents/{}",
            path_id("index id", index_id)?,
            path_id("document id", document_id)?
        );
        self.request_with_body(HttpMethod::Post, &path, body)
    }

    /// Reads the result of any of the three match requests.
    pub fn read_match(&self, request: &HttpRequest, response: HttpResponse) -> Result<MatchResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn build_bimetric_score_resume(&self, body: &BimetricScoreResumeRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/scorer/bimetric/resume", body)
    }

    pub fn read_bimetric_score(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<BimetricScoreResponseValue, TxError> {
        self.read_value(request, response)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{client, failure, response};
    use super::*;
    use crate::models::matching::SearchQuery;

    #[test]
    fn search_request_shape() {
        let body = SearchRequest {
            index_ids_to_search_into: vec!["resumes".to_string()],
            query: SearchQuery {
                search_expression: Some("rust".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let req = client().build_search(&body).unwrap();
        assert_eq!(req.url, "http://localhost:3000/searcher");
        assert_eq!(
            req.body.as_deref(),
            Some(r#"{"IndexIdsToSearchInto":["resumes"],"Query":{"SearchExpression":"rust"}}"#)
        );
    }

    #[test]
    fn read_search_with_float_counts() {
        let c = client();
        let req = c.build_search(&SearchRequest::default()).unwrap();
        let body = r#"{"Info":{"Code":"Success"},"Value":{"CurrentCount":1.0,"TotalCount":7,"Matches":[{"Id":"d1","IndexId":"resumes"}]}}"#;
        let value = c.read_search(&req, response(200, body)).unwrap();
        assert_eq!(value.current_count, 1);
        assert_eq!(value.total_count, 7);
        assert_eq!(value.matches[0].id, "d1");
    }

    #[test]
    fn match_indexed_document_path() {
        let req = client()
            .build_match_indexed_document("jobs", "j1", &MatchByDocumentIdRequest::default())
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/matcher/indexes/jobs/documents/j1");

        let err = client()
            .build_match_indexed_document("jobs", "j1#frag", &MatchByDocumentIdRequest::default())
            .unwrap_err();
        assert!(matches!(err, TxError::InvalidId { kind: "document id", .. }));
    }

    #[test]
    fn read_match_scores() {
        let c = client();
        let req = c.build_match_job(&MatchJobRequest::default()).unwrap();
        let body = r#"{"Info":{"Code":"Success"},"Value":{"CurrentCount":1,"TotalCount":1,"Matches":[{"Id":"r1","WeightedScore":87.6}]}}"#;
        let value = c.read_match(&req, response(200, body)).unwrap();
        assert_eq!(value.matches[0].weighted_score, 87);
    }

    #[test]
    fn bimetric_missing_target_is_failure() {
        let c = client();
        let req = c.build_bimetric_score_resume(&BimetricScoreResumeRequest::default()).unwrap();
        assert!(req.url.ends_with("/scorer/bimetric/resume"));
        let body = r#"{"Info":{"Code":"MissingParameter","Message":"TargetResumes is required"}}"#;
        let f = failure(c.read_bimetric_score(&req, response(400, body)).unwrap_err());
        assert_eq!(f.error_code, "MissingParameter");
        assert_eq!(f.http_status, 400);
    }
}
