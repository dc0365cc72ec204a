//! Parsing and formatting operations.

use crate::error::TxError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::formatter::{FormatResumeRequest, FormatResumeResponseValue};
use crate::models::parse::{ParseJobResponseValue, ParseRequest, ParseResumeResponseValue};

use super::TxClient;

impl TxClient {
    pub fn build_parse_resume(&self, body: &ParseRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/parser/resume", body)
    }

    /// A parse that succeeded but whose geocode or index step failed comes
    /// back as an `ApiFailure` carrying the parsed resume.
    pub fn read_parse_resume(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<ParseResumeResponseValue, TxError> {
        let status = response.status;
        let envelope = self.read_envelope::<ParseResumeResponseValue>(request, response)?;
        self.check_resume_stages(request, status, envelope.info.transaction_id, envelope.value.unwrap_or_default())
    }

    pub fn build_parse_job(&self, body: &ParseRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/parser/joborder", body)
    }

    pub fn read_parse_job(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<ParseJobResponseValue, TxError> {
        let status = response.status;
        let envelope = self.read_envelope::<ParseJobResponseValue>(request, response)?;
        self.check_job_stages(request, status, envelope.info.transaction_id, envelope.value.unwrap_or_default())
    }

    pub fn build_format_resume(&self, body: &FormatResumeRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/formatter/resume/template", body)
    }

    pub fn read_format_resume(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<FormatResumeResponseValue, TxError> {
        self.read_value(request, response)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::super::tests::{client, failure, response};
    use crate::document::Document;
    use crate::error::{FailedStage, FailureKind};
    use crate::models::parse::ParseOptions;

    fn parse_request() -> crate::models::parse::ParseRequest {
        Document::from_bytes("Jane Doe", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .unwrap()
            .into_parse_request(ParseOptions::default())
    }

    #[test]
    fn build_parse_resume_posts_document() {
        let req = client().build_parse_resume(&parse_request()).unwrap();
        assert_eq!(req.method, crate::http::HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/parser/resume");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["DocumentAsBase64String"], "SmFuZSBEb2U=");
        assert_eq!(body["DocumentLastModified"], "2024-03-01");
    }

    #[test]
    fn read_parse_resume_success() {
        let c = client();
        let req = c.build_parse_resume(&parse_request()).unwrap();
        let body = r#"{
            "Info": {"Code": "WarningsFoundDuringParsing", "TransactionId": "p1"},
            "Value": {
                "ResumeData": {"ContactInformation": {"CandidateName": {"FormattedName": "Jane Doe"}}},
                "ParsingResponse": {"Code": "Success"}
            }
        }"#;
        let value = c.read_parse_resume(&req, response(200, body)).unwrap();
        let resume = value.resume_data.unwrap();
        assert_eq!(resume.candidate_name(), Some("Jane Doe"));
    }

    #[test]
    fn failed_index_step_yields_usable_resume() {
        let c = client();
        let req = c.build_parse_resume(&parse_request()).unwrap();
        let body = r#"{
            "Info": {"Code": "Success", "TransactionId": "p2"},
            "Value": {
                "ResumeData": {"ContactInformation": {"CandidateName": {"FormattedName": "Jane Doe"}}},
                "ParsingResponse": {"Code": "Success"},
                "IndexingResponse": {"Code": "DataNotFound", "Message": "index missing"}
            }
        }"#;
        let f = failure(c.read_parse_resume(&req, response(200, body)).unwrap_err());
        assert_eq!(f.kind(), FailureKind::UsableResume);
        assert_eq!(f.error_code, "DataNotFound");
        assert_eq!(f.message, "index missing");
        assert_eq!(f.http_status, 200);
        assert_eq!(f.transaction_id.as_deref(), Some("p2"));
        assert_eq!(f.usable.as_ref().map(|u| u.stage()), Some(FailedStage::Index));
        let resume = f.usable_resume().and_then(|v| v.resume_data.as_ref()).unwrap();
        assert_eq!(resume.candidate_name(), Some("Jane Doe"));
    }

    #[test]
    fn failed_geocode_step_yields_usable_job() {
        let c = client();
        let req = c.build_parse_job(&parse_request()).unwrap();
        assert!(req.url.ends_with("/parser/joborder"));
        let body = r#"{
            "Info": {"Code": "Success"},
            "Value": {
                "JobData": {"JobTitles": {"MainJobTitle": "Engineer"}},
                "GeocodeResponse": {"Code": "InsufficientData", "Message": "no address"}
            }
        }"#;
        let f = failure(c.read_parse_job(&req, response(200, body)).unwrap_err());
        assert_eq!(f.kind(), FailureKind::UsableJob);
        assert_eq!(f.error_code, "InsufficientData");
        assert_eq!(f.usable.as_ref().map(|u| u.stage()), Some(FailedStage::Geocode));
        assert!(f.usable_job().is_some());
    }

    #[test]
    fn conversion_failure_is_generic() {
        let c = client();
        let req = c.build_parse_resume(&parse_request()).unwrap();
        let body = r#"{"Info":{"Code":"ConversionException","Message":"not a document"}}"#;
        let f = failure(c.read_parse_resume(&req, response(422, body)).unwrap_err());
        assert_eq!(f.kind(), FailureKind::Generic);
        assert_eq!(f.error_code, "ConversionException");
    }
}
