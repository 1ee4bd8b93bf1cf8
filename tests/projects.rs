//! Execution tests for project, region, and project type listings.
//!
//! Uses wiremock to mock the Procore API and test actual execution flow.

use procore_api::{
    find_project, get_project_regions, get_project_types, get_projects, ProcoreClient,
    ProcoreError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn project_page() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 108707,
            "name": "Sandbox Test Project",
            "display_name": "1122 - Sandbox Test Project",
            "project_number": "1122",
            "active": true
        },
        { "id": 108708, "name": "Parking Garage Retrofit", "active": true }
    ])
}

#[tokio::test]
async fn test_get_projects_sends_company_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies/7/projects"))
        .and(header("Procore-Company-Id", "7"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let projects = get_projects(&client, 7).await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].name, "Sandbox Test Project");
    assert_eq!(projects[0].project_number.as_deref(), Some("1122"));
}

#[tokio::test]
async fn test_find_project_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies/7/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let project = find_project(&client, 7, "Sandbox Test Project").await.unwrap();

    assert_eq!(project.id, 108707);
}

#[tokio::test]
async fn test_find_project_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies/7/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let project = find_project(&client, 7, 108708u64).await.unwrap();

    assert_eq!(project.name, "Parking Garage Retrofit");
}

#[tokio::test]
async fn test_find_project_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies/7/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let err = find_project(&client, 7, "Fake Project").await.unwrap_err();

    assert!(matches!(err, ProcoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_get_project_regions_passes_caller_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies/7/project_regions"))
        .and(header("Procore-Company-Id", "7"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 3, "name": "Southwest" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let regions = get_project_regions(&client, 7, 2, 50).await.unwrap();

    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].name, "Southwest");
}

#[tokio::test]
async fn test_get_project_types_passes_caller_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.0/companies/7/project_types"))
        .and(header("Procore-Company-Id", "7"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 9, "name": "Commercial" },
            { "id": 10, "name": "Hospital" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProcoreClient::new("test-token", &mock_server.uri()).unwrap();
    let types = get_project_types(&client, 7, 1, 25).await.unwrap();

    assert_eq!(types.len(), 2);
    assert_eq!(types[1].name, "Hospital");
}
