//! In-memory fake of the Tx REST API.
//!
//! Every response is wrapped in the `{Info, Value}` envelope. Parsing,
//! geocoding, matching and the taxonomies are faked with trivial text rules
//! (see `engine`) so clients can be exercised end-to-end without the real
//! engines.

mod engine;
mod handlers;
mod store;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

use store::Store;

pub const ACCOUNT_ID: &str = "12345";
pub const SERVICE_KEY: &str = "mock-service-key";

const ENGINE_VERSION: &str = "mock-1.0";
const API_VERSION: &str = "10.0.0";

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub account_id: String,
    pub service_key: String,
    pub credits_remaining: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            account_id: ACCOUNT_ID.to_string(),
            service_key: SERVICE_KEY.to_string(),
            credits_remaining: 1000.0,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<MockConfig>,
    store: Arc<RwLock<Store>>,
}

/// A handler's reply: status plus envelope.
pub(crate) type Reply = (StatusCode, Json<Value>);

pub(crate) fn info(code: &str, message: &str) -> Value {
    json!({
        "Code": code,
        "Message": message,
        "TransactionId": Uuid::new_v4().to_string(),
        "EngineVersion": ENGINE_VERSION,
        "ApiVersion": API_VERSION,
        // The service sends some counters as floats.
        "TotalElapsedMilliseconds": 3.0,
        "TransactionCost": 0.0,
    })
}

pub(crate) fn success(value: Option<Value>) -> Reply {
    let mut body = json!({ "Info": info("Success", "Success") });
    if let Some(value) = value {
        body["Value"] = value;
    }
    (StatusCode::OK, Json(body))
}

pub(crate) fn failure(status: StatusCode, code: &str, message: &str) -> Reply {
    (status, Json(json!({ "Info": info(code, message) })))
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(RwLock::new(Store::default())),
    };
    Router::new()
        .route("/account", get(handlers::account))
        .route("/parser/resume", post(handlers::parse_resume))
        .route("/parser/joborder", post(handlers::parse_job))
        .route("/index", get(handlers::list_indexes))
        .route("/index/{index_id}", post(handlers::create_index).delete(handlers::delete_index))
        .route("/index/{index_id}/documents", delete(handlers::delete_documents))
        .route(
            "/index/{index_id}/documents/{document_id}",
            post(handlers::index_document)
                .get(handlers::get_document)
                .delete(handlers::delete_document)
                .patch(handlers::update_tags),
        )
        .route("/geocoder/resume", post(handlers::geocode_resume))
        .route("/geocoder/joborder", post(handlers::geocode_job))
        .route("/geocodeAndIndex/resume", post(handlers::geocode_and_index_resume))
        .route("/geocodeAndIndex/joborder", post(handlers::geocode_and_index_job))
        .route("/searcher", post(handlers::search))
        .route("/matcher/resume", post(handlers::match_resume))
        .route("/matcher/joborder", post(handlers::match_job))
        .route(
            "/matcher/indexes/{index_id}/documents/{document_id}",
            post(handlers::match_indexed_document),
        )
        .route("/scorer/bimetric/resume", post(handlers::bimetric_score))
        .route("/formatter/resume/template", post(handlers::format_resume))
        .route("/skills/autocomplete", post(handlers::skills_autocomplete))
        .route("/skills/lookup", post(handlers::skills_lookup))
        .route("/skills/normalize", post(handlers::skills_normalize))
        .route("/skills/extract", post(handlers::skills_extract))
        .route("/professions/normalize", post(handlers::professions_normalize))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_credentials))
        .fallback(not_found)
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_credentials(State(state): State<AppState>, request: Request, next: Next) -> Response {
    // The header borrow must end before `next.run` takes the request.
    let authorized = {
        let header = |name: &str| request.headers().get(name).and_then(|v| v.to_str().ok());
        header("Tx-AccountId") == Some(state.config.account_id.as_str())
            && header("Tx-ServiceKey") == Some(state.config.service_key.as_str())
    };
    if !authorized {
        return failure(
            StatusCode::UNAUTHORIZED,
            "AuthenticationError",
            "Invalid account id or service key",
        )
        .into_response();
    }
    next.run(request).await
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_has_info_and_value() {
        let (status, Json(body)) = success(Some(json!([1, 2])));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Info"]["Code"], "Success");
        assert_eq!(body["Value"], json!([1, 2]));
        assert!(body["Info"]["TransactionId"].as_str().is_some());
    }

    #[test]
    fn success_without_value_omits_it() {
        let (_, Json(body)) = success(None);
        assert!(body.get("Value").is_none());
    }

    #[test]
    fn failure_envelope_carries_code() {
        let (status, Json(body)) = failure(StatusCode::NOT_FOUND, "DataNotFound", "gone");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["Info"]["Code"], "DataNotFound");
        assert_eq!(body["Info"]["Message"], "gone");
    }

    #[test]
    fn transaction_ids_are_unique() {
        assert_ne!(info("Success", "")["TransactionId"], info("Success", "")["TransactionId"]);
    }
}
