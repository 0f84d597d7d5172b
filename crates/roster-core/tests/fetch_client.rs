//! Integration tests for `FetchClient` against a mock HTTP server.

use std::time::Duration;

use roster_core::client::{FetchClient, FetchErrorKind};
use roster_core::config::ClientConfig;
use roster_types::{User, UsersPage};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FetchClient {
    client_with_timeout(server, 10_000)
}

fn client_with_timeout(server: &MockServer, timeout_ms: u64) -> FetchClient {
    let config = ClientConfig {
        base_url: format!("{}/api/v1", server.uri()),
        timeout_ms,
        page_limit: 50,
    };
    FetchClient::new(&config).unwrap()
}

fn sample_page() -> UsersPage {
    UsersPage {
        current_page: 1,
        total_pages: 3,
        total_users: 120,
        users: (0..50).map(User::synthetic).collect(),
    }
}

#[tokio::test]
async fn test_fetch_page_decodes_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fetchUsers"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).fetch_page(1, 50).await.unwrap();
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.users.len(), 50);
}

#[tokio::test]
async fn test_server_error_surfaces_message_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fetchUsers"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(r#"{"message":"Failed to fetch users"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page(1, 50).await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::HttpStatus);
    assert_eq!(err.message, "HTTP 500: Failed to fetch users");
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fetchUsers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page(1, 50).await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Parse);
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fetchUsers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_page())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let err = client_with_timeout(&server, 50)
        .fetch_page(1, 50)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Timeout);
}

#[tokio::test]
async fn test_requested_page_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fetchUsers"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(UsersPage {
            current_page: 2,
            total_pages: 3,
            total_users: 120,
            users: (50..100).map(User::synthetic).collect(),
        }))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).fetch_page(2, 50).await.unwrap();
    assert_eq!(page.current_page, 2);
    assert_eq!(page.users[0].id, 50);
}
