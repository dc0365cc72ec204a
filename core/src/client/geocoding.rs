//! Geocoding, with and without indexing.

use crate::error::TxError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::geocode::{
    GeocodeAndIndexJobRequest, GeocodeAndIndexJobResponseValue, GeocodeAndIndexResumeRequest,
    GeocodeAndIndexResumeResponseValue, GeocodeJobRequest, GeocodeJobResponseValue, GeocodeResumeRequest,
    GeocodeResumeResponseValue,
};
use crate::models::parse::{ParseJobResponseValue, ParseResumeResponseValue};

use super::TxClient;

impl TxClient {
    pub fn build_geocode_resume(&self, body: &GeocodeResumeRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/geocoder/resume", body)
    }

    pub fn read_geocode_resume(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<GeocodeResumeResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn build_geocode_job(&self, body: &GeocodeJobRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/geocoder/joborder", body)
    }

    pub fn read_geocode_job(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<GeocodeJobResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn build_geocode_and_index_resume(&self, body: &GeocodeAndIndexResumeRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/geocodeAndIndex/resume", body)
    }

    /// Returned as a parse result so a failed step can carry the resume the
    /// same way `read_parse_resume` does.
    pub fn read_geocode_and_index_resume(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<ParseResumeResponseValue, TxError> {
        let status = response.status;
        let envelope = self.read_envelope::<GeocodeAndIndexResumeResponseValue>(request, response)?;
        let value = envelope.value.unwrap_or_default().into();
        self.check_resume_stages(request, status, envelope.info.transaction_id, value)
    }

    pub fn build_geocode_and_index_job(&self, body: &GeocodeAndIndexJobRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/geocodeAndIndex/joborder", body)
    }

    pub fn read_geocode_and_index_job(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<ParseJobResponseValue, TxError> {
        let status = response.status;
        let envelope = self.read_envelope::<GeocodeAndIndexJobResponseValue>(request, response)?;
        let value = envelope.value.unwrap_or_default().into();
        self.check_job_stages(request, status, envelope.info.transaction_id, value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{client, failure, response};
    use super::*;
    use crate::error::{FailedStage, FailureKind};
    use crate::models::geocode::{GeocodeOptions, GeocodeProvider};
    use crate::models::index::IndexingOptions;

    #[test]
    fn geocode_resume_flattens_options() {
        let body = GeocodeResumeRequest {
            options: GeocodeOptions::with_provider(GeocodeProvider::Google, Some("k".to_string())),
            ..Default::default()
        };
        let req = client().build_geocode_resume(&body).unwrap();
        assert_eq!(req.url, "http://localhost:3000/geocoder/resume");
        let json: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(json["Provider"], "Google");
        assert_eq!(json["ProviderKey"], "k");
        assert!(json.get("GeocodeOptions").is_none());
    }

    #[test]
    fn insufficient_data_is_generic_failure() {
        let c = client();
        let req = c.build_geocode_job(&GeocodeJobRequest::default()).unwrap();
        let body = r#"{"Info":{"Code":"InsufficientData","Message":"no address"}}"#;
        let f = failure(c.read_geocode_job(&req, response(422, body)).unwrap_err());
        assert_eq!(f.kind(), FailureKind::Generic);
        assert_eq!(f.error_code, "InsufficientData");
    }

    #[test]
    fn geocode_and_index_success() {
        let c = client();
        let body = GeocodeAndIndexResumeRequest {
            indexing_options: IndexingOptions {
                index_id: "i".to_string(),
                document_id: "d".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let req = c.build_geocode_and_index_resume(&body).unwrap();
        let resp = r#"{"Info":{"Code":"Success"},"Value":{"GeocodeResponse":{"Code":"Success"},"IndexingResponse":{"Code":"Success"},"ResumeData":{}}}"#;
        let value = c.read_geocode_and_index_resume(&req, response(200, resp)).unwrap();
        assert!(value.resume_data.is_some());
    }

    #[test]
    fn geocode_failure_carries_job() {
        let c = client();
        let req = c.build_geocode_and_index_job(&GeocodeAndIndexJobRequest::default()).unwrap();
        assert!(req.url.ends_with("/geocodeAndIndex/joborder"));
        let resp = r#"{"Info":{"Code":"Success","TransactionId":"g1"},"Value":{"GeocodeResponse":{"Code":"CoordinatesNotFound","Message":"nowhere"},"IndexingResponse":{"Code":"Success"},"JobData":{}}}"#;
        let f = failure(c.read_geocode_and_index_job(&req, response(200, resp)).unwrap_err());
        assert_eq!(f.kind(), FailureKind::UsableJob);
        assert_eq!(f.error_code, "CoordinatesNotFound");
        assert_eq!(f.transaction_id.as_deref(), Some("g1"));
        assert_eq!(f.usable.as_ref().map(|u| u.stage()), Some(FailedStage::Geocode));
        assert!(f.usable_job().and_then(|j| j.job_data.as_ref()).is_some());
    }
}
