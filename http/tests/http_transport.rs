//! Integration tests for the reqwest-backed transport against a local mock
//! server, including an end-to-end run through a request bundle.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use reactive_request_core::{Options, RequestState, Status, TransportOptions};
use reactive_request_http::HttpTransport;
use reactive_request_testing::HookProbe;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record(value: Value) -> TransportOptions {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn decodes_a_successful_json_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/success"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foo": "bar"})))
        .mount(&server)
        .await;

    let transport = HttpTransport::new();
    let response = transport
        .perform::<Value, Value>(&format!("{}/success", server.uri()), &TransportOptions::new())
        .await;

    assert_eq!(response, Ok(json!({"foo": "bar"})));
}

#[tokio::test]
async fn relative_targets_resolve_against_the_configured_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/success"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .mount(&server)
        .await;

    let transport = HttpTransport::builder().base_url(server.uri()).build();
    let response = transport
        .perform::<Value, Value>("/success", &TransportOptions::new())
        .await;

    assert_eq!(response, Ok(json!(1)));
}

#[tokio::test]
async fn forwards_method_headers_query_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(header("X-Custom-Header", "abc"))
        .and(query_param("page", "2"))
        .and(body_json(json!({"foo": "bar"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let transport = HttpTransport::builder().base_url(server.uri()).build();
    let response = transport
        .perform::<Value, Value>(
            "/submit",
            &record(json!({
                "method": "POST",
                "headers": {"X-Custom-Header": "abc"},
                "query": {"page": 2},
                "body": {"foo": "bar"},
            })),
        )
        .await;

    assert_eq!(response, Ok(json!({"ok": true})));
}

#[tokio::test]
async fn failure_statuses_carry_the_code_and_the_decoded_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"reason": "bad input"})))
        .mount(&server)
        .await;

    let transport = HttpTransport::builder().base_url(server.uri()).build();
    let error = transport
        .perform::<Value, Value>("/error", &TransportOptions::new())
        .await
        .expect_err("non-success status must reject");

    assert_eq!(error.status, Some(422));
    assert_eq!(error.data, Some(json!({"reason": "bad input"})));
    assert!(error.message.contains("422"));
    assert!(error.message.contains("GET"));
}

#[tokio::test]
async fn empty_success_bodies_decode_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/resource"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let transport = HttpTransport::builder().base_url(server.uri()).build();
    let response = transport
        .perform::<Value, Value>("/resource", &record(json!({"method": "DELETE"})))
        .await;

    assert_eq!(response, Ok(Value::Null));
}

#[tokio::test]
async fn drives_a_request_bundle_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/success"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foo": "bar"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"cause": "boom"})))
        .mount(&server)
        .await;

    let transport = HttpTransport::builder()
        .base_url(server.uri())
        .build()
        .into_transport_fn::<Value, Value>();

    let probe = HookProbe::new();
    let state = RequestState::new(
        "/success",
        Options::new().with_hooks(probe.hooks()),
        transport.clone(),
    );

    let response = state.execute().await.unwrap();
    assert_eq!(response, json!({"foo": "bar"}));
    assert_eq!(state.status().get(), Status::Success);
    assert_eq!(state.data().get(), Some(json!({"foo": "bar"})));
    assert_eq!(probe.pending_calls(), 1);
    assert_eq!(probe.successes(), vec![json!({"foo": "bar"})]);

    let failing = RequestState::new("/error", Options::new(), transport);
    let rejection = failing.execute().await.unwrap_err();

    assert_eq!(failing.status().get(), Status::Error);
    let recorded = rejection.as_transport().expect("transport failure expected");
    assert_eq!(recorded.status, Some(500));
    assert_eq!(recorded.data, Some(json!({"cause": "boom"})));
}
