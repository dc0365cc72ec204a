//! `TxService` against the mock server on an ephemeral port.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::net::TcpListener;
use tx_client::{ClientConfig, TxService};
use tx_core::models::index::{IndexType, IndexingOptions, UserDefinedTagsMethod};
use tx_core::models::matching::{MatchByDocumentIdRequest, SearchQuery, SearchRequest};
use tx_core::models::parse::ParseOptions;
use tx_core::models::skills::ExtractSkillsRequest;
use tx_core::{DataCenter, Document, FailedStage, FailureKind, TxError};

async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    addr
}

fn config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(
        mock_server::ACCOUNT_ID,
        mock_server::SERVICE_KEY,
        DataCenter::self_hosted(&format!("http://{addr}")),
    )
}

fn parse_options(index_id: &str, document_id: &str) -> ParseOptions {
    ParseOptions {
        indexing_options: Some(IndexingOptions {
            index_id: index_id.to_string(),
            document_id: document_id.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn document(text: &str) -> Document {
    Document::from_bytes(text, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap()
}

#[tokio::test]
async fn account_details() {
    let service = TxService::new(&config(start_server().await)).unwrap();
    let account = service.account().await.unwrap();
    assert_eq!(account.account_id.as_deref(), Some(mock_server::ACCOUNT_ID));
    assert_eq!(account.credits_used, 0);
    assert_eq!(account.maximum_concurrent_requests, 4);
}

#[tokio::test]
async fn parse_index_and_match() {
    let service = TxService::new(&config(start_server().await)).unwrap();
    service.create_index("people", IndexType::Resume).await.unwrap();

    for (id, text) in [
        ("jane", "Jane Doe\nSkills: Rust, SQL\n"),
        ("john", "John Roe\nSkills: Rust\n"),
    ] {
        let parsed = service
            .parse_resume(&document(text).into_parse_request(parse_options("people", id)))
            .await
            .unwrap();
        assert!(parsed.resume_data.is_some());
    }

    service
        .update_user_defined_tags("people", "john", &["remote".to_string()], UserDefinedTagsMethod::Overwrite)
        .await
        .unwrap();
    let john = service.get_resume("people", "john").await.unwrap();
    assert_eq!(john.user_defined_tags, vec!["remote"]);

    let found = service
        .search(&SearchRequest {
            index_ids_to_search_into: vec!["people".to_string()],
            query: SearchQuery {
                search_expression: Some("rust".to_string()),
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.total_count, 2);

    let matched = service
        .match_indexed_document(
            "people",
            "jane",
            &MatchByDocumentIdRequest {
                index_ids_to_search_into: vec!["people".to_string()],
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(matched.matches[0].id, "john");

    service.delete_document("people", "john").await.unwrap();
    let err = service.get_resume("people", "john").await.unwrap_err();
    assert_eq!(err.api_failure().unwrap().error_code, "DataNotFound");

    assert_eq!(service.account().await.unwrap().credits_used, 2);
}

#[tokio::test]
async fn index_failure_keeps_parsed_resume() {
    let service = TxService::new(&config(start_server().await)).unwrap();
    let err = service
        .parse_resume(&document("Jane Doe\n").into_parse_request(parse_options("missing", "jane")))
        .await
        .unwrap_err();
    let failure = err.api_failure().unwrap();
    assert_eq!(failure.kind(), FailureKind::UsableResume);
    assert_eq!(failure.usable.as_ref().unwrap().stage(), FailedStage::Index);
    assert!(failure.transaction_id.is_some());
    let resume = failure.usable_resume().unwrap().resume_data.as_ref().unwrap();
    assert_eq!(resume.candidate_name(), Some("Jane Doe"));
}

#[tokio::test]
async fn skills_extract_reports_spans() {
    let service = TxService::new(&config(start_server().await)).unwrap();
    let extracted = service
        .skills_extract(&ExtractSkillsRequest {
            text: "Wrote Rust and more Rust".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(extracted.skills.len(), 1);
    let spans: Vec<(i32, i32)> = extracted.skills[0]
        .raw_skills
        .iter()
        .map(|r| (r.start_offset, r.end_offset))
        .collect();
    assert_eq!(spans, vec![(6, 10), (20, 24)]);
}

#[tokio::test]
async fn wrong_key_is_authentication_error() {
    let addr = start_server().await;
    let mut config = config(addr);
    config.service_key = "nope".to_string();
    let service = TxService::new(&config).unwrap();
    let err = service.get_all_indexes().await.unwrap_err();
    let failure = err.api_failure().unwrap();
    assert_eq!(failure.http_status, 401);
    assert_eq!(failure.error_code, "AuthenticationError");
    assert!(failure.request_body.is_none());
}

#[tokio::test]
async fn timeout_is_transport_failure() {
    // Accepts connections but never answers.
    let silent = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut config = config(silent.local_addr().unwrap());
    config.timeout = Duration::from_millis(200);
    let service = TxService::new(&config).unwrap();

    let err = service.account().await.unwrap_err();
    let failure = err.api_failure().unwrap();
    assert_eq!(failure.http_status, 500);
    assert_eq!(failure.error_code, "Unknown Error");
    assert_eq!(failure.message, "Invalid response object from API");
    assert!(failure.transport_error.is_some());
    drop(silent);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn clones_share_one_pool_across_tasks() {
    let service = TxService::new(&config(start_server().await)).unwrap();
    service.create_index("people", IndexType::Resume).await.unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8 {
        let service = service.clone();
        tasks.spawn(async move {
            let id = format!("person-{i}");
            let text = format!("Person {i}\nSkills: Rust\n");
            service
                .parse_resume(&document(&text).into_parse_request(parse_options("people", &id)))
                .await
                .map(|parsed| (id, parsed.resume_data.is_some()))
        });
    }
    let mut ids = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (id, has_resume) = joined.unwrap().unwrap();
        assert!(has_resume);
        ids.push(id);
    }
    ids.sort();
    assert_eq!(ids.len(), 8);

    let search = SearchRequest {
        index_ids_to_search_into: vec!["people".to_string()],
        query: SearchQuery {
            search_expression: Some("rust".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let (account, first, second) = tokio::join!(service.account(), service.search(&search), service.search(&search));
    assert_eq!(account.unwrap().credits_used, 8);
    assert_eq!(first.unwrap().total_count, 8);
    assert_eq!(second.unwrap().total_count, 8);
}

#[tokio::test]
async fn bad_document_id_fails_before_sending() {
    // Nothing listens here, so any request would be a transport failure.
    let unused = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = unused.local_addr().unwrap();
    drop(unused);
    let service = TxService::new(&config(addr)).unwrap();

    let err = service.delete_document("people", "../jane").await.unwrap_err();
    assert!(err.api_failure().is_none());
    assert!(matches!(err, TxError::InvalidId { kind: "document id", .. }));
}
