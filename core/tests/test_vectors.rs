//! Verify build/read methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use chrono::NaiveDate;
use tx_core::models::index::{Index, IndexType, UserDefinedTagsMethod};
use tx_core::models::parse::ParseOptions;
use tx_core::{ApiFailure, DataCenter, Document, HttpMethod, HttpRequest, HttpResponse, TxClient, TxError};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> TxClient {
    TxClient::new("12345", "secret-key", DataCenter::self_hosted(BASE_URL))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn str_field<'a>(case: &'a serde_json::Value, key: &str) -> &'a str {
    case[key].as_str().unwrap()
}

fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected["headers"].as_array() {
        let expected_headers: Vec<(String, String)> = headers
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match &expected["body"] {
        serde_json::Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
        body => {
            let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
    }
}

fn assert_failure(name: &str, failure: &ApiFailure, expected: &serde_json::Value) {
    assert_eq!(failure.http_status as u64, expected["http_status"].as_u64().unwrap(), "{name}: status");
    assert_eq!(failure.error_code, expected["error_code"].as_str().unwrap(), "{name}: code");
    if let Some(message) = expected["message"].as_str() {
        assert_eq!(failure.message, message, "{name}: message");
    }
    assert_eq!(
        failure.transaction_id.as_deref(),
        expected["transaction_id"].as_str(),
        "{name}: transaction id"
    );
    if let Some(kind) = expected["kind"].as_str() {
        assert_eq!(format!("{:?}", failure.kind()), kind, "{name}: kind");
    }
    if let Some(stage) = expected["stage"].as_str() {
        let actual = failure.usable.as_ref().map(|u| format!("{:?}", u.stage()));
        assert_eq!(actual.as_deref(), Some(stage), "{name}: stage");
    }
}

fn api_failure(name: &str, err: TxError) -> ApiFailure {
    match err {
        TxError::Api(f) => *f,
        other => panic!("{name}: expected an API failure, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Parse resume
// ---------------------------------------------------------------------------

#[test]
fn parse_resume_test_vectors() {
    let raw = include_str!("../../test-vectors/parse_resume.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = str_field(case, "name");
        let last_modified: NaiveDate = str_field(case, "last_modified").parse().unwrap();
        let options: ParseOptions = serde_json::from_value(case["options"].clone()).unwrap();
        let document = Document::from_bytes(str_field(case, "document_text"), last_modified).unwrap();

        // Verify build
        let req = c.build_parse_resume(&document.into_parse_request(options)).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        // Verify read
        let result = c.read_parse_resume(&req, simulated(case));
        let expected_name = case["expected_candidate_name"].as_str();
        match case.get("expected_error") {
            Some(expected) => {
                let failure = api_failure(name, result.unwrap_err());
                assert_failure(name, &failure, expected);
                if let Some(expected_name) = expected_name {
                    let resume = failure.usable_resume().and_then(|v| v.resume_data.as_ref()).unwrap();
                    assert_eq!(resume.candidate_name(), Some(expected_name), "{name}: usable resume");
                }
            }
            None => {
                let value = result.unwrap();
                let resume = value.resume_data.unwrap();
                assert_eq!(resume.candidate_name(), expected_name, "{name}: candidate");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope classification
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    let req = c.build_get_all_indexes();
    for case in vectors["cases"].as_array().unwrap() {
        let name = str_field(case, "name");
        let result = c.read_get_all_indexes(&req, simulated(case));

        match case.get("expected_error") {
            Some(expected) => assert_failure(name, &api_failure(name, result.unwrap_err()), expected),
            None => {
                let expected: Vec<Index> = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = str_field(case, "name");
        let strings = |key: &str| -> Vec<String> {
            case[key]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap().to_string())
                .collect()
        };

        let req = match str_field(case, "op") {
            "account" => c.build_account(),
            "get_all_indexes" => c.build_get_all_indexes(),
            "create_index" => {
                let index_type: IndexType = str_field(case, "index_type").parse().unwrap();
                c.build_create_index(str_field(case, "index_id"), index_type).unwrap()
            }
            "delete_index" => c.build_delete_index(str_field(case, "index_id")).unwrap(),
            "get_document" => c
                .build_get_document(str_field(case, "index_id"), str_field(case, "document_id"))
                .unwrap(),
            "delete_document" => c
                .build_delete_document(str_field(case, "index_id"), str_field(case, "document_id"))
                .unwrap(),
            "delete_multiple_documents" => c
                .build_delete_multiple_documents(str_field(case, "index_id"), &strings("document_ids"))
                .unwrap(),
            "update_user_defined_tags" => {
                let method: UserDefinedTagsMethod = str_field(case, "method").parse().unwrap();
                c.build_update_user_defined_tags(
                    str_field(case, "index_id"),
                    str_field(case, "document_id"),
                    &strings("tags"),
                    method,
                )
                .unwrap()
            }
            other => panic!("{name}: unknown op {other}"),
        };
        assert_request(name, &req, &case["expected_request"]);
    }
}
