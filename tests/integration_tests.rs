//! Integration tests against a wiremock echo server.
//!
//! The echo responder replies 200 with a plain-text body holding the request
//! line, the headers and the body exactly as the server received them.

use pizza_request::{Defaults, Error, PendingRequest, PizzaApi, RequestConfig, Transport};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn echo(req: &Request) -> ResponseTemplate {
    let mut path = req.url.path().to_string();
    if let Some(query) = req.url.query() {
        path.push('?');
        path.push_str(query);
    }

    let mut text = format!("{} {} HTTP/1.1\r\n", req.method, path);
    for (name, value) in req.headers.iter() {
        text.push_str(&format!(
            "{}: {}\r\n",
            name,
            value.to_str().unwrap_or_default()
        ));
    }
    text.push_str("\r\n");
    text.push_str(&String::from_utf8_lossy(&req.body));

    ResponseTemplate::new(200)
        .insert_header("content-type", "text/plain")
        .set_body_string(text)
}

async fn echo_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(echo)
        .mount(&mock_server)
        .await;
    mock_server
}

fn defaults_for(mock_server: &MockServer) -> Defaults {
    Defaults::builder().authority(mock_server.uri()).build()
}

/// A request as reported back by the echo server.
#[derive(Debug)]
struct Echoed {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Echoed {
    fn parse(text: &str) -> Self {
        let (head, body) = text
            .split_once("\r\n\r\n")
            .expect("echo response has a blank line before the body");
        let mut lines = head.split("\r\n");
        let mut request_line = lines.next().expect("request line").split(' ');
        let method = request_line.next().expect("method").to_string();
        let path = request_line.next().expect("path").to_string();
        let headers = lines
            .map(|line| {
                let (name, value) = line.split_once(": ").expect("header line");
                (name.to_string(), value.to_string())
            })
            .collect();

        Self {
            method,
            path,
            headers,
            body: body.to_string(),
        }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn header_count(&self, name: &str) -> usize {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .count()
    }
}

async fn send(request: PendingRequest) -> Echoed {
    let transport = Transport::new().unwrap();
    let response = request.execute(&transport).await.unwrap();
    assert_eq!(response.status.as_u16(), 200);
    Echoed::parse(response.text())
}

/// Checks that what the server received matches the descriptor inspected before sending.
async fn assert_round_trip(request: PendingRequest) -> Echoed {
    let method = request.method().to_string();
    let path = request.path().to_string();
    let headers = request.headers().clone();
    let body = request.encoded_body().unwrap().unwrap_or_default();

    let echoed = send(request).await;

    assert_eq!(echoed.method, method);
    assert_eq!(echoed.path, path);
    for (name, value) in headers.iter() {
        assert_eq!(
            echoed.header(name.as_str()),
            Some(value.to_str().unwrap()),
            "header {} differs on the wire",
            name
        );
    }
    assert_eq!(echoed.body, body);
    echoed
}

#[tokio::test]
async fn test_read_collection_defaults() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);

    let request = PizzaApi::new(&defaults).read_collection(RequestConfig::default());
    let echoed = send(request).await;

    assert_eq!(echoed.method, "GET");
    assert_eq!(echoed.path, "/api/v1/pizzas");
    assert_eq!(echoed.header("accept"), Some("application/json"));
    assert_eq!(echoed.header("content-type"), Some("application/json"));
    assert_eq!(echoed.body, "");
}

#[tokio::test]
async fn test_read_collection_base_path_override() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);

    let request = PizzaApi::new(&defaults)
        .read_collection(RequestConfig::new().with_base_path("/api/v2"));
    let echoed = send(request).await;

    assert_eq!(echoed.method, "GET");
    assert_eq!(echoed.path, "/api/v2/pizzas");
    assert_eq!(echoed.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_read_collection_header_overlay() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);

    let config = RequestConfig::new()
        .with_header("Accept", "application/xml")
        .unwrap();
    let echoed = send(PizzaApi::new(&defaults).read_collection(config)).await;

    assert_eq!(echoed.path, "/api/v1/pizzas");
    assert_eq!(echoed.header("accept"), Some("application/xml"));
    assert_eq!(echoed.header_count("accept"), 1);
    assert_eq!(echoed.header("content-type"), Some("application/json"));
    assert_eq!(defaults.headers()["accept"], "application/json");
}

#[tokio::test]
async fn test_create_item_without_name_never_reaches_server() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);
    let api = PizzaApi::new(&defaults);

    for _ in 0..3 {
        let result = api.create_item(RequestConfig::new());
        match result {
            Err(err @ Error::MissingName) => {
                assert!(err.is_validation());
                assert!(!err.is_transport());
            }
            other => panic!("Expected MissingName, got {:?}", other),
        }
    }

    let received = mock_server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_create_item_json() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);

    let request = PizzaApi::new(&defaults)
        .create_item(RequestConfig::new().with_name("margherita"))
        .unwrap();
    let echoed = send(request).await;

    assert_eq!(echoed.method, "POST");
    assert_eq!(echoed.path, "/api/v1/pizzas");
    assert_eq!(echoed.header("x-api-key"), Some("foobar"));
    assert_eq!(echoed.header("content-type"), Some("application/json"));
    assert_eq!(echoed.body, r#"{"name":"margherita"}"#);
}

#[tokio::test]
async fn test_create_item_form() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);

    let config = RequestConfig::new()
        .with_name("margherita")
        .with_header("Content-Type", "application/x-www-form-urlencoded")
        .unwrap();
    let echoed = send(PizzaApi::new(&defaults).create_item(config).unwrap()).await;

    assert_eq!(echoed.method, "POST");
    assert_eq!(echoed.path, "/api/v1/pizzas");
    assert_eq!(echoed.header("x-api-key"), Some("foobar"));
    assert_eq!(
        echoed.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(echoed.body, "name=margherita");
}

#[tokio::test]
async fn test_create_item_body_replacement() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);

    let mut request = PizzaApi::new(&defaults)
        .create_item(RequestConfig::new().with_name("margherita"))
        .unwrap();
    request.send(&json!({ "name": "capricciosa" })).unwrap();
    let echoed = send(request).await;

    assert_eq!(echoed.method, "POST");
    assert_eq!(echoed.path, "/api/v1/pizzas");
    assert_eq!(echoed.header("x-api-key"), Some("foobar"));
    assert_eq!(echoed.header("content-type"), Some("application/json"));
    assert_eq!(echoed.body, r#"{"name":"capricciosa"}"#);
    assert!(!echoed.body.contains("margherita"));
}

#[tokio::test]
async fn test_api_key_survives_conflicting_header() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);

    let config = RequestConfig::new()
        .with_name("margherita")
        .with_header("X-API-Key", "something-else")
        .unwrap();
    let echoed = send(PizzaApi::new(&defaults).create_item(config).unwrap()).await;

    assert_eq!(echoed.header("x-api-key"), Some("foobar"));
    assert_eq!(echoed.header_count("x-api-key"), 1);
}

#[tokio::test]
async fn test_descriptor_matches_wire() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);
    let api = PizzaApi::new(&defaults);

    assert_round_trip(api.read_collection(RequestConfig::default())).await;

    assert_round_trip(
        api.read_collection(
            RequestConfig::new()
                .with_base_path("/api/v3")
                .with_resource_path("/pizzas/7")
                .with_header("X-Request-Id", "abc-123")
                .unwrap(),
        ),
    )
    .await;

    assert_round_trip(
        api.create_item(RequestConfig::new().with_name("quattro formaggi"))
            .unwrap(),
    )
    .await;

    let echoed = assert_round_trip(
        api.create_item(
            RequestConfig::new()
                .with_name("quattro formaggi")
                .with_header("Content-Type", "application/x-www-form-urlencoded")
                .unwrap(),
        )
        .unwrap(),
    )
    .await;
    assert_eq!(echoed.body, "name=quattro+formaggi");

    let mut request = api.request(
        RequestConfig::new()
            .with_verb(http::Method::PUT)
            .with_resource_path("/pizzas/1"),
    );
    request.set_header("Content-Type", "text/plain").unwrap();
    request.send_raw("hello");
    let echoed = assert_round_trip(request).await;
    assert_eq!(echoed.method, "PUT");
    assert_eq!(echoed.body, "hello");
}

#[tokio::test]
async fn test_concurrent_operations_are_independent() {
    let mock_server = echo_server().await;
    let defaults = defaults_for(&mock_server);
    let api = PizzaApi::new(&defaults);
    let transport = Transport::new().unwrap();

    let read = api.read_collection(
        RequestConfig::new()
            .with_header("Accept", "text/html")
            .unwrap(),
    );
    let create = api
        .create_item(RequestConfig::new().with_name("diavola"))
        .unwrap();

    let (read, create) = tokio::join!(read.execute(&transport), create.execute(&transport));
    let read = Echoed::parse(read.unwrap().text());
    let create = Echoed::parse(create.unwrap().text());

    assert_eq!(read.header("accept"), Some("text/html"));
    assert_eq!(read.header("x-api-key"), None);
    assert_eq!(create.header("accept"), Some("application/json"));
    assert_eq!(create.body, r#"{"name":"diavola"}"#);
}

#[tokio::test]
async fn test_http_error_passes_through() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_string("oven on fire"))
        .mount(&mock_server)
        .await;
    let defaults = defaults_for(&mock_server);
    let transport = Transport::new().unwrap();

    let result = PizzaApi::new(&defaults)
        .read_collection(RequestConfig::default())
        .execute(&transport)
        .await;

    match result {
        Err(Error::HttpError {
            status,
            raw_response,
            ..
        }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(raw_response, "oven on fire");
        }
        other => panic!("Expected HttpError, got {:?}", other),
    }
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_success_status_outside_error_classes() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(304))
        .mount(&mock_server)
        .await;
    let defaults = defaults_for(&mock_server);
    let transport = Transport::new().unwrap();

    let result = PizzaApi::new(&defaults)
        .read_collection(RequestConfig::default())
        .execute(&transport)
        .await;

    match result {
        Err(err @ Error::HttpError { .. }) => {
            let status = err.status().unwrap();
            assert_eq!(status.as_u16(), 304);
            assert!(!status.is_server_error());
            assert!(err.is_transport());
        }
        other => panic!("Expected HttpError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;
    let defaults = defaults_for(&mock_server);
    let transport = Transport::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let result = PizzaApi::new(&defaults)
        .read_collection(RequestConfig::default())
        .execute(&transport)
        .await;

    match result {
        Err(err @ Error::Timeout) => assert!(err.is_transport()),
        other => panic!("Expected Timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused() {
    let defaults = Defaults::builder().authority("http://127.0.0.1:1").build();
    let transport = Transport::new().unwrap();

    let result = PizzaApi::new(&defaults)
        .create_item(RequestConfig::new().with_name("margherita"))
        .unwrap()
        .execute(&transport)
        .await;

    match result {
        Err(err @ Error::Network(_)) => {
            assert!(err.is_transport());
            assert!(!err.is_validation());
        }
        other => panic!("Expected Network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_authority_fails_at_execution() {
    let defaults = Defaults::builder().authority("not a url").build();
    let transport = Transport::new().unwrap();

    let request = PizzaApi::new(&defaults).read_collection(RequestConfig::default());
    assert_eq!(request.url(), "not a url/api/v1/pizzas");

    let result = request.execute(&transport).await;
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[tokio::test]
async fn test_authority_from_environment() {
    let mock_server = echo_server().await;
    std::env::set_var(pizza_request::AUTHORITY_ENV, mock_server.uri());

    let defaults = Defaults::from_env();
    assert_eq!(defaults.authority(), mock_server.uri());

    let echoed = send(PizzaApi::new(&defaults).read_collection(RequestConfig::default())).await;
    assert_eq!(echoed.path, "/api/v1/pizzas");

    std::env::remove_var(pizza_request::AUTHORITY_ENV);
    assert_eq!(Defaults::from_env().authority(), "http://localhost:8061");
}
