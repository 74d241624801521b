//! Rate limiting tests against a mocked server, using the real clock

mod common;

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use common::{create_mock_client_with_rate, esearch_xml_response};
use multiomics_survey::{Keyword, MultiomicsSurvey, SurveyConfig};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_empty_results(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_xml_response(0, 100000, &[])),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_requests_within_budget_are_not_delayed() {
    let mock_server = MockServer::start().await;
    mount_empty_results(&mock_server).await;

    let window = Duration::from_millis(1500);
    let client = create_mock_client_with_rate(&mock_server, 3, window);
    let url = format!("{}/esearch.fcgi", mock_server.uri());

    let start = Instant::now();
    for _ in 0..3 {
        client.search_ids(&url).await.unwrap();
    }

    assert!(start.elapsed() < window);
}

#[tokio::test]
async fn test_exhausted_budget_waits_one_window() {
    let mock_server = MockServer::start().await;
    mount_empty_results(&mock_server).await;

    let window = Duration::from_millis(300);
    let client = create_mock_client_with_rate(&mock_server, 2, window);
    let url = format!("{}/esearch.fcgi", mock_server.uri());

    let start = Instant::now();
    for _ in 0..6 {
        client.search_ids(&url).await.unwrap();
    }

    // 2 + 2 + 2 requests: two full-window waits
    assert!(start.elapsed() >= window * 2);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_survey_shares_one_limiter_across_combinations() {
    let mock_server = MockServer::start().await;
    mount_empty_results(&mock_server).await;

    let window = Duration::from_millis(250);
    let client = create_mock_client_with_rate(&mock_server, 3, window);
    let config = SurveyConfig::new()
        .with_date_range(
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2000, 12, 31).unwrap(),
        )
        .with_keywords(vec![
            Keyword::Genomics,
            Keyword::Proteomics,
            Keyword::Lipidomics,
        ]);
    let survey = MultiomicsSurvey::new(client, config).unwrap();

    let start = Instant::now();
    survey.run(&mut Vec::new()).await.unwrap();

    // Four combinations with a budget of three: the fourth waits a window
    assert!(start.elapsed() >= window);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 4);
}
