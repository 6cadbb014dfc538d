//! Integration tests for `HyperTransport` chains using wiremock.

#![cfg(feature = "hyper")]

use std::time::Duration;

use assert2::{check, let_assert};
use chainfetch::middleware::{
    base, bearer_auth, json, method as set_method, params, parse_json, parse_text, query,
    request_info,
};
use chainfetch::{
    Compose, DEFAULT_USER_AGENT, Error, HyperTransport, Options, TransportConfig, compose,
    middlewares,
};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path, query_param},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

#[tokio::test]
async fn get_with_base_and_parse_json() {
    let mock_server = MockServer::start().await;

    let user = User {
        id: 1,
        name: "Alice".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&user))
        .mount(&mock_server)
        .await;

    let fetch = compose(
        HyperTransport::new(),
        middlewares![
            base(mock_server.uri()),
            bearer_auth("secret"),
            parse_json(),
        ],
    );

    let response = fetch.get("/users/1").await.expect("response");

    check!(response.is_success());
    let_assert!(Some(data) = response.json_data());
    check!(data["name"] == "Alice");

    let body: User = response.json().expect("json");
    check!(body == user);
}

#[tokio::test]
async fn post_json_body_reaches_server() {
    let mock_server = MockServer::start().await;

    let input = User {
        id: 0,
        name: "Bob".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&mock_server)
        .await;

    let fetch = Compose::new(HyperTransport::new())
        .with(base(mock_server.uri()))
        .with(set_method("POST"))
        .with(json(&input).expect("json body"))
        .with(parse_text())
        .build();

    let response = fetch.get("/users").await.expect("response");

    check!(response.status() == 201);
    check!(response.text_string() == Some("created"));
}

#[tokio::test]
async fn query_parameters_reach_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let fetch = compose(
        HyperTransport::new(),
        middlewares![
            base(mock_server.uri()),
            query(&[("q", "rust")]).expect("query"),
            params(&[("page", 1)]).expect("params"),
        ],
    );

    let response = fetch.get("/search").await.expect("response");

    check!(response.status() == 200);
}

#[tokio::test]
async fn params_sent_as_form_body_for_put() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/items/7"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string("name=lamp&qty=2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let fetch = compose(
        HyperTransport::new(),
        middlewares![
            base(mock_server.uri()),
            params(&[("name", "lamp"), ("qty", "2")]).expect("params"),
        ],
    );

    let response = fetch
        .fetch("/items/7", Options::with_method("put"))
        .await
        .expect("response");

    check!(response.status() == 204);
}

#[tokio::test]
async fn error_status_is_a_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let fetch = compose(HyperTransport::new(), middlewares![base(mock_server.uri())]);

    let response = fetch.get("/missing").await.expect("response");

    check!(response.is_client_error());
    check!(response.text().expect("text") == "nope");
}

#[tokio::test]
async fn response_headers_are_exposed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/with-headers"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Request-Id", "abc"))
        .mount(&mock_server)
        .await;

    let fetch = compose(HyperTransport::new(), middlewares![base(mock_server.uri())]);

    let response = fetch.get("/with-headers").await.expect("response");

    check!(response.header("x-request-id") == Some("abc"));
}

#[tokio::test]
async fn configured_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/defaults"))
        .and(header("User-Agent", DEFAULT_USER_AGENT))
        .and(header("X-Client", "billing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TransportConfig::builder()
        .default_header("X-Client", "billing")
        .build();
    let fetch = compose(
        HyperTransport::with_config(config),
        middlewares![base(mock_server.uri())],
    );

    let response = fetch.get("/defaults").await.expect("response");

    check!(response.status() == 200);
}

#[tokio::test]
async fn timeout_is_annotated_with_request_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let config = TransportConfig::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let fetch = compose(
        HyperTransport::with_config(config),
        middlewares![request_info(), base(mock_server.uri())],
    );

    let err = fetch.get("/slow").await.expect_err("expected timeout");

    check!(err.is_timeout(), "expected timeout, got: {err}");
    check!(err.request_url() == Some("/slow"));
}

#[tokio::test]
async fn connection_error() {
    let fetch = compose(HyperTransport::new(), Vec::new());

    let err = fetch
        .get("http://127.0.0.1:1")
        .await
        .expect_err("expected connection error");

    check!(err.is_connection(), "expected connection error, got: {err}");
}

#[tokio::test]
async fn relative_url_without_base_is_rejected() {
    let fetch = compose(HyperTransport::new(), Vec::new());

    let err = fetch.get("/no-host").await.expect_err("no host");

    check!(matches!(err, Error::InvalidRequest(_) | Error::Connection(_)));
}
