//! Stateless request builder and response reader for the Tx API.
//!
//! # Design
//! `TxClient` holds credentials, the data center and the error-reporting
//! toggle, and carries no mutable state between calls. Each operation is a
//! `build_*` method that produces an `HttpRequest` and a `read_*` method that
//! consumes the matching `HttpResponse`. The caller executes the HTTP
//! round-trip in between; no retries happen here.
//!
//! Every `read_*` goes through `read_envelope`, which decides between the
//! typed value and an `ApiFailure`:
//! 1. Body parses as `{Info, Value}`, status is 2xx and `Info.Code` is a
//!    success code: the value is returned.
//! 2. Otherwise the code/message come from whatever envelope can be read,
//!    falling back to `"<status> - <reason>"` when the body is not one.

mod geocoding;
mod indexes;
mod matching;
mod parsing;
mod taxonomy;

use std::fmt;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::codec;
use crate::data_center::DataCenter;
use crate::error::{ApiFailure, FailureParts, TxError, UsableResult, UNKNOWN_ERROR_CODE};
use crate::http::{reason_phrase, HttpMethod, HttpRequest, HttpResponse};
use crate::models::envelope::{AccountInfo, ApiResponse, ApiResponseInfoLite, ErrorEnvelope, ResponseCode};
use crate::models::parse::{ParseJobResponseValue, ParseResumeResponseValue};

pub const ACCOUNT_ID_HEADER: &str = "Tx-AccountId";
pub const SERVICE_KEY_HEADER: &str = "Tx-ServiceKey";
pub const TRACKING_TAG_HEADER: &str = "Tx-TrackingTag";

/// An id placed in the URL path: non-empty, `[A-Za-z0-9_-]` only.
fn path_id<'a>(kind: &'static str, id: &'a str) -> Result<&'a str, TxError> {
    let valid = !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(id)
    } else {
        Err(TxError::InvalidId {
            kind,
            id: id.to_string(),
        })
    }
}

/// Client for the Tx API.
///
/// Builds `HttpRequest` values and reads `HttpResponse` values without
/// touching the network. Cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct TxClient {
    account_id: String,
    service_key: String,
    data_center: DataCenter,
    show_request_body: bool,
    tracking_tags: Vec<String>,
}

impl TxClient {
    pub fn new(account_id: &str, service_key: &str, data_center: DataCenter) -> Self {
        Self {
            account_id: account_id.to_string(),
            service_key: service_key.to_string(),
            data_center,
            show_request_body: false,
            tracking_tags: Vec::new(),
        }
    }

    /// Keep the outgoing JSON on `ApiFailure::request_body`. Off by default:
    /// request bodies contain candidate PII.
    pub fn show_full_request_body_in_exceptions(mut self, show: bool) -> Self {
        self.show_request_body = show;
        self
    }

    /// Tags sent with every request for usage reporting.
    pub fn tracking_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tracking_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn data_center(&self) -> &DataCenter {
        &self.data_center
    }

    pub fn shows_request_body(&self) -> bool {
        self.show_request_body
    }

    // -----------------------------------------------------------------------
    // Account
    // -----------------------------------------------------------------------

    pub fn build_account(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/account")
    }

    /// Account details are carried in `Info.CustomerDetails`; there is no
    /// `Value`.
    pub fn read_account(&self, request: &HttpRequest, response: HttpResponse) -> Result<AccountInfo, TxError> {
        let envelope = self.read_envelope::<IgnoredAny>(request, response)?;
        Ok(envelope.info.customer_details.unwrap_or_default())
    }

    // -----------------------------------------------------------------------
    // Shared plumbing
    // -----------------------------------------------------------------------

    fn headers(&self, has_body: bool) -> Vec<(String, String)> {
        let mut headers = vec![
            (ACCOUNT_ID_HEADER.to_string(), self.account_id.clone()),
            (SERVICE_KEY_HEADER.to_string(), self.service_key.clone()),
        ];
        if !self.tracking_tags.is_empty() {
            headers.push((TRACKING_TAG_HEADER.to_string(), self.tracking_tags.join(",")));
        }
        if has_body {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        headers
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: self.data_center.endpoint(path),
            headers: self.headers(false),
            body: None,
        }
    }

    fn request_with_body<B: Serialize>(&self, method: HttpMethod, path: &str, body: &B) -> Result<HttpRequest, TxError> {
        let body = codec::to_body(body)?;
        Ok(HttpRequest {
            method,
            url: self.data_center.endpoint(path),
            headers: self.headers(true),
            body: Some(body),
        })
    }

    fn failure(
        &self,
        request: &HttpRequest,
        http_status: Option<u16>,
        info: Option<&ApiResponseInfoLite>,
        transaction_id: Option<String>,
    ) -> ApiFailure {
        ApiFailure::build(FailureParts {
            request_body: request.body.as_deref(),
            show_request_body: self.show_request_body,
            http_status,
            info,
            transaction_id,
        })
    }

    /// The error for a request that never produced a response (connection
    /// refused, timeout, TLS failure, unreadable body).
    pub fn transport_failure(&self, request: &HttpRequest, detail: impl fmt::Display) -> TxError {
        self.failure(request, None, None, None)
            .with_transport_error(detail.to_string())
            .into()
    }

    fn read_envelope<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<ApiResponse<T>, TxError> {
        let status = response.status;
        let full_error = match serde_json::from_str::<ApiResponse<T>>(&response.body) {
            Ok(envelope) if response.is_success() && envelope.info.code.is_success() => return Ok(envelope),
            Ok(envelope) => {
                let info = envelope.info.lite();
                return Err(self
                    .failure(request, Some(status), Some(&info), envelope.info.transaction_id)
                    .into());
            }
            Err(e) => e,
        };

        match serde_json::from_str::<ErrorEnvelope>(&response.body) {
            Ok(ErrorEnvelope { info: Some(info) }) => {
                if response.is_success() && info.code.is_success() {
                    return Err(TxError::Deserialization(full_error.to_string()));
                }
                let lite = info.lite();
                Err(self.failure(request, Some(status), Some(&lite), info.transaction_id).into())
            }
            _ => {
                tracing::debug!(status, url = %request.url, "response body is not a Tx envelope");
                let info = ApiResponseInfoLite {
                    code: ResponseCode::new(UNKNOWN_ERROR_CODE),
                    message: Some(format!("{status} - {}", reason_phrase(status))),
                };
                Err(self.failure(request, Some(status), Some(&info), None).into())
            }
        }
    }

    fn read_value<T: DeserializeOwned + Default>(&self, request: &HttpRequest, response: HttpResponse) -> Result<T, TxError> {
        Ok(self.read_envelope::<T>(request, response)?.value.unwrap_or_default())
    }

    fn read_empty(&self, request: &HttpRequest, response: HttpResponse) -> Result<(), TxError> {
        self.read_envelope::<IgnoredAny>(request, response).map(|_| ())
    }

    /// Turn a resume whose geocode or index step failed into a failure that
    /// still carries it.
    fn check_resume_stages(
        &self,
        request: &HttpRequest,
        status: u16,
        transaction_id: Option<String>,
        value: ParseResumeResponseValue,
    ) -> Result<ParseResumeResponseValue, TxError> {
        let Some((stage, info)) = value.failed_stage() else {
            return Ok(value);
        };
        tracing::debug!(?stage, code = %info.code, "resume returned with a failed step");
        let info = info.clone();
        Err(self
            .failure(request, Some(status), Some(&info), transaction_id)
            .with_usable(UsableResult::Resume {
                stage,
                value: Box::new(value),
            })
            .into())
    }

    fn check_job_stages(
        &self,
        request: &HttpRequest,
        status: u16,
        transaction_id: Option<String>,
        value: ParseJobResponseValue,
    ) -> Result<ParseJobResponseValue, TxError> {
        let Some((stage, info)) = value.failed_stage() else {
            return Ok(value);
        };
        tracing::debug!(?stage, code = %info.code, "job returned with a failed step");
        let info = info.clone();
        Err(self
            .failure(request, Some(status), Some(&info), transaction_id)
            .with_usable(UsableResult::Job {
                stage,
                value: Box::new(value),
            })
            .into())
    }
}

impl fmt::Debug for TxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxClient")
            .field("account_id", &self.account_id)
            .field("service_key", &"<redacted>")
            .field("data_center", &self.data_center)
            .field("show_request_body", &self.show_request_body)
            .field("tracking_tags", &self.tracking_tags)
            .finish()
    }
}
