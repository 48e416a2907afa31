mod common;

use common::{app, config, empty_request, json_request, send, FakeUpstream};
use ghl_bridge::utils::http_client::ReqwestForwarder;
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::test]
async fn create_contact_relays_upstream_status_and_body() {
    let upstream = FakeUpstream::new(StatusCode::CREATED, json!({ "contact": { "id": "c-1" } }));
    let router = app(upstream.clone(), config("http://upstream.test", None));

    let (status, body) = send(
        router,
        json_request("POST", "/contacts", json!({ "firstName": "Ada" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "contact": { "id": "c-1" } }));

    let calls = upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/contacts/");
    assert_eq!(calls[0].body.as_ref().expect("body")["locationId"], "loc-1");
}

#[tokio::test]
async fn empty_contact_update_sends_empty_object() {
    let upstream = FakeUpstream::new(StatusCode::OK, json!({ "succeded": true }));
    let router = app(upstream.clone(), config("http://upstream.test", None));

    let (status, _) = send(router, json_request("PUT", "/contacts/c-9", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    let calls = upstream.calls();
    assert_eq!(calls[0].method, Method::PUT);
    assert_eq!(calls[0].path, "/contacts/c-9");
    assert_eq!(calls[0].body, Some(json!({})));
}

#[tokio::test]
async fn upstream_client_error_is_not_rewritten() {
    let upstream = FakeUpstream::new(
        StatusCode::UNAUTHORIZED,
        json!({ "message": "Invalid JWT" }),
    );
    let router = app(upstream, config("http://upstream.test", None));

    let (status, body) = send(router, empty_request("GET", "/pipelines")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid JWT" }));
}

#[tokio::test]
async fn appointment_without_calendar_is_a_bad_request() {
    let upstream = FakeUpstream::new(StatusCode::OK, json!({}));
    let router = app(upstream.clone(), config("http://upstream.test", None));

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/appointments",
            json!({ "contactId": "c-1", "startTime": "2026-10-20T09:00:00Z" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "calendarId is required (no default set).");
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn appointment_listing_reads_query_string() {
    let upstream = FakeUpstream::new(StatusCode::OK, json!({ "events": [] }));
    let router = app(upstream.clone(), config("http://upstream.test", Some("cal-default")));

    let (status, body) = send(
        router,
        empty_request(
            "GET",
            "/appointments?calendarId=cal-2&startTime=2026-10-01T00:00:00Z&endTime=2026-10-02T00:00:00Z",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "events": [] }));
    assert_eq!(
        upstream.calls()[0].query,
        Some(vec![
            ("calendarId".to_string(), "cal-2".to_string()),
            ("startTime".to_string(), "2026-10-01T00:00:00Z".to_string()),
            ("endTime".to_string(), "2026-10-02T00:00:00Z".to_string()),
        ])
    );
}

#[tokio::test]
async fn workflow_enrollment_uses_query_ids() {
    let upstream = FakeUpstream::new(StatusCode::OK, json!({ "succeded": true }));
    let router = app(upstream.clone(), config("http://upstream.test", None));

    let (status, _) = send(
        router,
        empty_request("POST", "/add_to_workflow?contactId=c-1&workflowId=wf-7"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = upstream.calls();
    assert_eq!(calls[0].path, "/contacts/c-1/workflow/wf-7");
    assert!(calls[0].body.is_none());
}

#[tokio::test]
async fn caller_ids_cannot_escape_their_path_segment() {
    let upstream = FakeUpstream::new(StatusCode::OK, json!({ "succeded": true }));
    let router = app(upstream.clone(), config("http://upstream.test", None));

    let (status, _) = send(
        router.clone(),
        empty_request(
            "POST",
            "/add_to_campaign?contactId=x/../../locations/evil&campaignId=c%3Fforce%3D1",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        router.clone(),
        json_request("PUT", "/contacts/..%2Fopportunities%2Fo-1", json!({ "email": "a@b.c" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let paths: Vec<String> = upstream.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(
        paths,
        vec![
            "/contacts/x%2F..%2F..%2Flocations%2Fevil/campaigns/c%3Fforce%3D1".to_string(),
            "/contacts/..%2Fopportunities%2Fo-1".to_string(),
        ]
    );

    let (status, body) = send(router, json_request("PUT", "/contacts/..", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], body["message"]);
    assert_eq!(upstream.calls().len(), 2);
}

#[tokio::test]
async fn encoded_ids_reach_the_upstream_unresolved() {
    use axum::{extract::OriginalUri, Json, Router};

    let echo = Router::new().fallback(|OriginalUri(uri): OriginalUri| async move {
        Json(json!({ "path": uri.path(), "query": uri.query() }))
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));
    tokio::spawn(async move {
        axum::serve(listener, echo).await.expect("serve");
    });

    let cfg = config(&base, None);
    let forwarder = Arc::new(ReqwestForwarder::new(&cfg.ghl).expect("forwarder"));
    let (status, body) = send(
        app(forwarder, cfg),
        empty_request(
            "POST",
            "/add_to_campaign?contactId=x/../../locations/evil&campaignId=c%3Fforce%3D1",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["path"],
        "/contacts/x%2F..%2F..%2Flocations%2Fevil/campaigns/c%3Fforce%3D1"
    );
    assert!(body["query"].is_null());
}

#[tokio::test]
async fn unreachable_upstream_yields_internal_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));
    drop(listener);

    let cfg = config(&base, Some("cal-default"));
    let forwarder = Arc::new(ReqwestForwarder::new(&cfg.ghl).expect("forwarder"));

    for request in [
        empty_request("GET", "/pipelines"),
        json_request(
            "POST",
            "/send_sms",
            json!({ "contactId": "c-1", "message": "hi" }),
        ),
        empty_request("GET", "/appointments"),
    ] {
        let (status, body) = send(app(forwarder.clone(), cfg.clone()), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["message"].as_str().expect("message");
        assert!(message.starts_with("Request to GoHighLevel failed: "));
        assert!(message.len() > "Request to GoHighLevel failed: ".len());
    }
}

#[tokio::test]
async fn manifest_and_health_are_served() {
    let upstream = FakeUpstream::new(StatusCode::OK, json!({}));
    let router = app(upstream.clone(), config("http://upstream.test", None));

    let request = axum::http::Request::builder()
        .uri("/.well-known/ai-plugin.json")
        .header("host", "localhost:8000")
        .body(axum::body::Body::empty())
        .expect("request");
    let (status, body) = send(router.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api"]["url"], "http://localhost:8000/openapi.json");

    let (status, body) = send(router.clone(), empty_request("GET", "/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/appointments"]["get"].is_object());

    let (status, body) = send(router, empty_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    assert!(upstream.calls().is_empty());
}
