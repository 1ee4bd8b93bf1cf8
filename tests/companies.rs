//! Execution tests for company listing and lookup.
//!
//! Uses wiremock to mock the Procore API and test actual execution flow.

use procore_api::{find_company, get_companies, Find, List, Company, ProcoreClient, ProcoreError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn acme_page() -> serde_json::Value {
    serde_json::json!([
        { "id": 5, "name": "Rogers Construction", "is_active": true },
        { "id": 7, "name": "Acme", "is_active": true },
        { "id": 9, "name": "DataPull", "is_active": false }
    ])
}

#[tokio::test]
async fn test_list_companies_sends_pagination_and_free_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .and(query_param("include_free_companies", "true"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acme_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let companies = get_companies(&client).await.unwrap();

    assert_eq!(companies.len(), 3);
    assert_eq!(companies[0].name, "Rogers Construction");
    assert!(!companies[2].is_active);
}

#[tokio::test]
async fn test_list_page_exposes_pagination_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 5, "name": "Rogers Construction" },
            { "id": 7, "name": "Acme" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let page = Company::list_page(&client, &Default::default(), 2, 2)
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.page, 2);
    assert_eq!(page.per_page, 2);
    // A full page suggests more
    assert!(page.has_more);
}

#[tokio::test]
async fn test_find_company_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acme_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let company = find_company(&client, "Acme").await.unwrap();

    assert_eq!(company.id, 7);
    assert_eq!(company.name, "Acme");
}

#[tokio::test]
async fn test_find_company_by_id_returns_same_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acme_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let company = find_company(&client, 7u64).await.unwrap();

    assert_eq!(company.id, 7);
    assert_eq!(company.name, "Acme");
}

#[tokio::test]
async fn test_find_company_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acme_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let err = find_company(&client, "Nonexistent").await.unwrap_err();

    assert!(matches!(err, ProcoreError::NotFound { .. }));
    assert!(err.to_string().contains("Nonexistent"));
}

#[tokio::test]
async fn test_find_company_scans_past_first_page() {
    let mock_server = MockServer::start().await;

    // Page 1 is full, so the scan must continue
    let page1: Vec<serde_json::Value> = (1..=100)
        .map(|i| serde_json::json!({ "id": i, "name": format!("Company {i}") }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page1))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 300, "name": "Far Away Builders" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let company = Company::find(&client, &Default::default(), &"Far Away Builders".into())
        .await
        .unwrap();

    assert_eq!(company.id, 300);
}

#[tokio::test]
async fn test_find_company_stops_at_short_page() {
    let mock_server = MockServer::start().await;

    // One short page; no page 2 is mounted, so a second request would
    // hit the mock server's 404 and fail the lookup with ApiError.
    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acme_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let err = find_company(&client, "Nonexistent").await.unwrap_err();

    assert!(matches!(err, ProcoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_rate_limited_response_is_typed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let err = get_companies(&client).await.unwrap_err();

    assert!(matches!(
        err,
        ProcoreError::RateLimited {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn test_server_error_carries_status_and_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "message": "internal error" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let err = get_companies(&client).await.unwrap_err();

    match err {
        ProcoreError::ApiError {
            message,
            status_code,
        } => {
            assert_eq!(message, "internal error");
            assert_eq!(status_code, Some(500));
        }
        other => panic!("Expected ApiError, got: {other:?}"),
    }
}
