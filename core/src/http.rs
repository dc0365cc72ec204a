//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! The core crate builds `HttpRequest` values and reads `HttpResponse` values
//! without touching the network. Whoever executes the request (the async
//! host in `tx-client`, or a test using a blocking agent) converts to and
//! from these plain-data types.

use serde::Deserialize;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `body` holds the exact JSON that is sent, which is also what ends up in
/// `ApiFailure::request_body` when the client is configured to keep it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `Info.TransactionId` from the body, if it is an envelope that has one.
    pub fn transaction_id(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct Info {
            #[serde(rename = "TransactionId")]
            transaction_id: Option<String>,
        }
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(rename = "Info")]
            info: Option<Info>,
        }
        serde_json::from_str::<Envelope>(&self.body)
            .ok()?
            .info?
            .transaction_id
    }
}

/// Canonical reason phrase for a status code, e.g. `Not Found` for 404.
pub fn reason_phrase(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
}
