//! Integration tests for the ESearch executor using mocked HTTP responses
//!
//! Every failure here is fatal for a survey run, so each one must surface
//! as an error instead of an empty identifier list.

mod common;

use std::time::Duration;

use common::{YEAR_2000_IDS, create_mock_client, esearch_xml_response};
use multiomics_survey::{ClientConfig, PubMedClient, PubMedError};
use rstest::rstest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn esearch_url(mock_server: &MockServer) -> String {
    format!("{}/esearch.fcgi?db=pubmed&retmax=100000", mock_server.uri())
}

#[tokio::test]
async fn test_ids_extracted_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esearch_xml_response(15, 100000, &YEAR_2000_IDS)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let outcome = client.search_ids(&esearch_url(&mock_server)).await.unwrap();

    assert_eq!(outcome.count, 15);
    assert_eq!(outcome.ret_max, 100000);
    assert_eq!(outcome.ids, YEAR_2000_IDS.to_vec());
    assert!(!outcome.is_truncated());
}

#[tokio::test]
async fn test_ids_are_trimmed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<eSearchResult><Count>2</Count><RetMax>20</RetMax>\
             <IdList><Id>\n  111\n</Id><Id>\t222 </Id></IdList></eSearchResult>",
        ))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let outcome = client.search_ids(&esearch_url(&mock_server)).await.unwrap();
    assert_eq!(outcome.ids, vec!["111", "222"]);
}

#[tokio::test]
async fn test_truncated_results_still_returned() {
    let mock_server = MockServer::start().await;
    let ids: Vec<String> = (0..100).map(|i| format!("{}", 20_000_000 + i)).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_xml_response(200, 100, &id_refs)),
        )
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let outcome = client
        .search_ids(&esearch_url(&mock_server))
        .await
        .expect("truncation must not be an error");

    assert!(outcome.is_truncated());
    assert_eq!(outcome.ids.len(), 100);
}

#[rstest]
#[case(400)]
#[case(404)]
#[case(429)]
#[case(500)]
#[case(503)]
#[tokio::test]
async fn test_http_error_status(#[case] status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search_ids(&esearch_url(&mock_server))
        .await
        .unwrap_err();

    match err {
        PubMedError::ApiError { status: got, .. } => assert_eq!(got, status),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_xml_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<eSearchResult><Count>3</Count><IdList><Id>1</Count>"),
        )
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.search_ids(&esearch_url(&mock_server)).await;
    assert!(matches!(result, Err(PubMedError::XmlError(_))));
}

#[tokio::test]
async fn test_ncbi_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<?xml version=\"1.0\" ?><eSearchResult><ERROR>Empty term and query_key - nothing todo</ERROR></eSearchResult>",
        ))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search_ids(&esearch_url(&mock_server))
        .await
        .unwrap_err();
    assert!(matches!(err, PubMedError::ApiError { status: 200, .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    let config = ClientConfig::new()
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(2));
    let client = PubMedClient::with_config(config).unwrap();

    let result = client
        .search_ids("http://127.0.0.1:1/esearch.fcgi?db=pubmed")
        .await;
    assert!(matches!(result, Err(PubMedError::RequestError(_))));
    assert_eq!(client.rate_limiter().requests_in_window(), 1);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esearch_xml_response(0, 20, &[]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_timeout(Duration::from_millis(200));
    let client = PubMedClient::with_config(config).unwrap();

    match client.search_ids(&esearch_url(&mock_server)).await {
        Err(PubMedError::RequestError(err)) => assert!(err.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}
