// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Facade integration tests against a wiremock server

use async_trait::async_trait;
use easyhttp::{
    Client, ClientConfig, Error, Facade, Http, HttpClient, Method, RawResponse, RequestOptions,
    Result,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone)]
struct BrandedClient(HttpClient);

impl Default for BrandedClient {
    fn default() -> Self {
        let config = ClientConfig::new()
            .user_agent("branded-facade/1.0")
            .default_header("x-client", "branded");
        BrandedClient(HttpClient::with_config(config).expect("static config is valid"))
    }
}

#[async_trait]
impl Client for BrandedClient {
    async fn send(&self, method: Method, url: &str, options: RequestOptions) -> Result<RawResponse> {
        self.0.send(method, url, options).await
    }
}

struct Branded;

impl Facade for Branded {
    type Client = BrandedClient;
}

#[tokio::test]
async fn test_default_facade_get() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"up": true})))
        .expect(2)
        .mount(&server)
        .await;

    let url = format!("{}/status", server.uri());
    let first = Http::get(&url, RequestOptions::new()).await.unwrap();
    let second = Http::instance().get(&url, RequestOptions::new()).await.unwrap();

    assert_eq!(first.get("up").unwrap(), true);
    assert_eq!(first.json(), second.json());
}

#[tokio::test]
async fn test_custom_facade_uses_its_configured_client() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/profile"))
        .and(header("user-agent", "branded-facade/1.0"))
        .and(header("x-client", "branded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"patched": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::new().json(&json!({"bio": "hi"})).unwrap();
    let response = Branded::patch(&format!("{}/profile", server.uri()), options)
        .await
        .unwrap();

    assert!(response.ok());
    assert_eq!(response.get("patched").unwrap(), 1);
    assert!(std::ptr::eq(Branded::instance(), Branded::instance()));
}

#[tokio::test]
async fn test_facade_async_and_named_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"job": "j-1"})))
        .mount(&server)
        .await;

    let url = format!("{}/jobs", server.uri());

    let accepted = Http::post_async(&url, RequestOptions::new()).await.unwrap();
    assert_eq!(accepted.status(), 202);
    assert_eq!(accepted.get("job").unwrap(), "j-1");

    let named = Http::call("post", &url, RequestOptions::new()).await.unwrap();
    assert!(named.successful());

    let err = Http::call("fetch", &url, RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MethodNotFound(_)));
}
