//! Async host for `tx-core`.
//!
//! # Design
//! `TxService` owns an I/O-free `TxClient` and a pooled `reqwest::Client`.
//! Every operation is the same three steps: the core builds an
//! `HttpRequest`, the service sends it, the core reads the `HttpResponse`.
//! The network await is the only suspension point, so dropping the returned
//! future cancels the request. Nothing is retried.
//!
//! Transport failures (connect, timeout, reading the body) are reported the
//! same way the core reports a missing response: `TxError::Api` with status
//! 500 and the transport detail attached.

pub mod config;

use reqwest::Method;
use tx_core::models::envelope::AccountInfo;
use tx_core::models::formatter::{FormatResumeRequest, FormatResumeResponseValue};
use tx_core::models::geocode::{
    GeocodeAndIndexJobRequest, GeocodeAndIndexResumeRequest, GeocodeJobRequest, GeocodeJobResponseValue,
    GeocodeResumeRequest, GeocodeResumeResponseValue,
};
use tx_core::models::index::{GetJobResponseValue, GetResumeResponseValue, Index, IndexType, UserDefinedTagsMethod};
use tx_core::models::job::ParsedJob;
use tx_core::models::matching::{
    BimetricScoreResponseValue, BimetricScoreResumeRequest, MatchByDocumentIdRequest, MatchJobRequest,
    MatchResponseValue, MatchResumeRequest, SearchRequest, SearchResponseValue,
};
use tx_core::models::parse::{ParseJobResponseValue, ParseRequest, ParseResumeResponseValue};
use tx_core::models::professions::{NormalizeProfessionsRequest, NormalizeProfessionsResponseValue};
use tx_core::models::resume::ParsedResume;
use tx_core::models::skills::{
    AutocompleteSkillsRequest, ExtractSkillsRequest, ExtractSkillsResponseValue, LookupSkillsRequest,
    NormalizeSkillsRequest, NormalizeSkillsResponseValue, SkillsResponseValue,
};
use tx_core::{HttpMethod, HttpRequest, HttpResponse, TxClient, TxError};

pub use config::{ClientConfig, ConfigError};

/// Executes Tx operations over HTTP.
#[derive(Debug, Clone)]
pub struct TxService {
    core: TxClient,
    http: reqwest::Client,
}

impl TxService {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_client(config.client(), http))
    }

    /// Use an existing `reqwest::Client`, e.g. one shared with other services.
    pub fn with_http_client(core: TxClient, http: reqwest::Client) -> Self {
        Self { core, http }
    }

    pub fn core(&self) -> &TxClient {
        &self.core
    }

    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TxError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        };
        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.core.transport_failure(request, e))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| self.core.transport_failure(request, e))?;
        Ok(HttpResponse { status, headers, body })
    }

    async fn call<T>(
        &self,
        operation: &'static str,
        request: HttpRequest,
        read: impl FnOnce(&TxClient, &HttpRequest, HttpResponse) -> Result<T, TxError>,
    ) -> Result<T, TxError> {
        tracing::debug!(operation, method = request.method.as_str(), url = %request.url, "sending request");
        let result = match self.execute(&request).await {
            Ok(response) => {
                let status = response.status;
                let transaction_id = response.transaction_id();
                let result = read(&self.core, &request, response);
                if result.is_ok() {
                    tracing::info!(operation, status, transaction_id = transaction_id.as_deref(), "request completed");
                }
                result
            }
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            match e.api_failure() {
                Some(failure) => tracing::warn!(
                    operation,
                    status = failure.http_status,
                    code = %failure.error_code,
                    transaction_id = failure.transaction_id.as_deref(),
                    transport = failure.transport_error.as_deref(),
                    "request failed"
                ),
                None => tracing::warn!(operation, error = %e, "request failed"),
            }
        }
        result
    }

    pub async fn account(&self) -> Result<AccountInfo, TxError> {
        self.call("account", self.core.build_account(), TxClient::read_account)
            .await
    }

    // Parsing and formatting

    pub async fn parse_resume(&self, body: &ParseRequest) -> Result<ParseResumeResponseValue, TxError> {
        let request = self.core.build_parse_resume(body)?;
        self.call("parse_resume", request, TxClient::read_parse_resume).await
    }

    pub async fn parse_job(&self, body: &ParseRequest) -> Result<ParseJobResponseValue, TxError> {
        let request = self.core.build_parse_job(body)?;
        self.call("parse_job", request, TxClient::read_parse_job).await
    }

    pub async fn format_resume(&self, body: &FormatResumeRequest) -> Result<FormatResumeResponseValue, TxError> {
        let request = self.core.build_format_resume(body)?;
        self.call("format_resume", request, TxClient::read_format_resume).await
    }

    // Indexes and documents

    pub async fn create_index(&self, index_id: &str, index_type: IndexType) -> Result<(), TxError> {
        let request = self.core.build_create_index(index_id, index_type)?;
        self.call("create_index", request, TxClient::read_create_index).await
    }

    pub async fn delete_index(&self, index_id: &str) -> Result<(), TxError> {
        let request = self.core.build_delete_index(index_id)?;
        self.call("delete_index", request, TxClient::read_delete_index).await
    }

    pub async fn get_all_indexes(&self) -> Result<Vec<Index>, TxError> {
        let request = self.core.build_get_all_indexes();
        self.call("get_all_indexes", request, TxClient::read_get_all_indexes)
            .await
    }

    pub async fn index_resume(
        &self,
        index_id: &str,
        document_id: &str,
        resume: &ParsedResume,
        user_defined_tags: &[String],
    ) -> Result<(), TxError> {
        let request = self
            .core
            .build_index_resume(index_id, document_id, resume, user_defined_tags)?;
        self.call("index_resume", request, TxClient::read_index_document).await
    }

    pub async fn index_job(
        &self,
        index_id: &str,
        document_id: &str,
        job: &ParsedJob,
        user_defined_tags: &[String],
    ) -> Result<(), TxError> {
        let request = self
            .core
            .build_index_job(index_id, document_id, job, user_defined_tags)?;
        self.call("index_job", request, TxClient::read_index_document).await
    }

    pub async fn get_resume(&self, index_id: &str, document_id: &str) -> Result<GetResumeResponseValue, TxError> {
        let request = self.core.build_get_document(index_id, document_id)?;
        self.call("get_resume", request, TxClient::read_get_resume).await
    }

    pub async fn get_job(&self, index_id: &str, document_id: &str) -> Result<GetJobResponseValue, TxError> {
        let request = self.core.build_get_document(index_id, document_id)?;
        self.call("get_job", request, TxClient::read_get_job).await
    }

    pub async fn delete_document(&self, index_id: &str, document_id: &str) -> Result<(), TxError> {
        let request = self.core.build_delete_document(index_id, document_id)?;
        self.call("delete_document", request, TxClient::read_delete_document)
            .await
    }

    pub async fn delete_multiple_documents(&self, index_id: &str, document_ids: &[String]) -> Result<(), TxError> {
        let request = self.core.build_delete_multiple_documents(index_id, document_ids)?;
        self.call(
            "delete_multiple_documents",
            request,
            TxClient::read_delete_multiple_documents,
        )
        .await
    }

    pub async fn update_user_defined_tags(
        &self,
        index_id: &str,
        document_id: &str,
        user_defined_tags: &[String],
        method: UserDefinedTagsMethod,
    ) -> Result<(), TxError> {
        let request = self
            .core
            .build_update_user_defined_tags(index_id, document_id, user_defined_tags, method)?;
        self.call(
            "update_user_defined_tags",
            request,
            TxClient::read_update_user_defined_tags,
        )
        .await
    }

    // Geocoding

    pub async fn geocode_resume(&self, body: &GeocodeResumeRequest) -> Result<GeocodeResumeResponseValue, TxError> {
        let request = self.core.build_geocode_resume(body)?;
        self.call("geocode_resume", request, TxClient::read_geocode_resume).await
    }

    pub async fn geocode_job(&self, body: &GeocodeJobRequest) -> Result<GeocodeJobResponseValue, TxError> {
        let request = self.core.build_geocode_job(body)?;
        self.call("geocode_job", request, TxClient::read_geocode_job).await
    }

    pub async fn geocode_and_index_resume(
        &self,
        body: &GeocodeAndIndexResumeRequest,
    ) -> Result<ParseResumeResponseValue, TxError> {
        let request = self.core.build_geocode_and_index_resume(body)?;
        self.call(
            "geocode_and_index_resume",
            request,
            TxClient::read_geocode_and_index_resume,
        )
        .await
    }

    pub async fn geocode_and_index_job(
        &self,
        body: &GeocodeAndIndexJobRequest,
    ) -> Result<ParseJobResponseValue, TxError> {
        let request = self.core.build_geocode_and_index_job(body)?;
        self.call(
            "geocode_and_index_job",
            request,
            TxClient::read_geocode_and_index_job,
        )
        .await
    }

    // Search and match

    pub async fn search(&self, body: &SearchRequest) -> Result<SearchResponseValue, TxError> {
        let request = self.core.build_search(body)?;
        self.call("search", request, TxClient::read_search).await
    }

    pub async fn match_resume(&self, body: &MatchResumeRequest) -> Result<MatchResponseValue, TxError> {
        let request = self.core.build_match_resume(body)?;
        self.call("match_resume", request, TxClient::read_match).await
    }

    pub async fn match_job(&self, body: &MatchJobRequest) -> Result<MatchResponseValue, TxError> {
        let request = self.core.build_match_job(body)?;
        self.call("match_job", request, TxClient::read_match).await
    }

    pub async fn match_indexed_document(
        &self,
        index_id: &str,
        document_id: &str,
        body: &MatchByDocumentIdRequest,
    ) -> Result<MatchResponseValue, TxError> {
        let request = self
            .core
            .build_match_indexed_document(index_id, document_id, body)?;
        self.call("match_indexed_document", request, TxClient::read_match).await
    }

    pub async fn bimetric_score_resume(
        &self,
        body: &BimetricScoreResumeRequest,
    ) -> Result<BimetricScoreResponseValue, TxError> {
        let request = self.core.build_bimetric_score_resume(body)?;
        self.call("bimetric_score_resume", request, TxClient::read_bimetric_score)
            .await
    }

    // Taxonomies

    pub async fn skills_autocomplete(&self, body: &AutocompleteSkillsRequest) -> Result<SkillsResponseValue, TxError> {
        let request = self.core.build_skills_autocomplete(body)?;
        self.call("skills_autocomplete", request, TxClient::read_skills_autocomplete)
            .await
    }

    pub async fn skills_lookup(&self, body: &LookupSkillsRequest) -> Result<SkillsResponseValue, TxError> {
        let request = self.core.build_skills_lookup(body)?;
        self.call("skills_lookup", request, TxClient::read_skills_lookup).await
    }

    pub async fn skills_normalize(&self, body: &NormalizeSkillsRequest) -> Result<NormalizeSkillsResponseValue, TxError> {
        let request = self.core.build_skills_normalize(body)?;
        self.call("skills_normalize", request, TxClient::read_skills_normalize)
            .await
    }

    pub async fn skills_extract(&self, body: &ExtractSkillsRequest) -> Result<ExtractSkillsResponseValue, TxError> {
        let request = self.core.build_skills_extract(body)?;
        self.call("skills_extract", request, TxClient::read_skills_extract).await
    }

    pub async fn professions_normalize(
        &self,
        body: &NormalizeProfessionsRequest,
    ) -> Result<NormalizeProfessionsResponseValue, TxError> {
        let request = self.core.build_professions_normalize(body)?;
        self.call(
            "professions_normalize",
            request,
            TxClient::read_professions_normalize,
        )
        .await
    }
}
