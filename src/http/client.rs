// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Method;
use url::Url;

use super::options::RequestOptions;
use super::promise::{PendingResponse, Promise};
use super::raw::RawResponse;
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Verbs reachable through name-based dispatch
pub const VERBS: [&str; 7] = ["get", "head", "delete", "options", "post", "put", "patch"];

/// Map a verb name to its method, case-insensitively
pub fn verb_from_name(name: &str) -> Result<Method> {
    match name.to_ascii_lowercase().as_str() {
        "get" => Ok(Method::GET),
        "head" => Ok(Method::HEAD),
        "delete" => Ok(Method::DELETE),
        "options" => Ok(Method::OPTIONS),
        "post" => Ok(Method::POST),
        "put" => Ok(Method::PUT),
        "patch" => Ok(Method::PATCH),
        _ => Err(Error::MethodNotFound(name.to_string())),
    }
}

/// The HTTP verbs a wrapped client must provide.
///
/// Implementors supply [`send`](Client::send); every verb forwards to it and
/// wraps the raw result in a [`Response`]. Errors from `send` are returned
/// unchanged.
#[async_trait]
pub trait Client: Send + Sync {
    /// Perform one request and buffer the response
    async fn send(&self, method: Method, url: &str, options: RequestOptions)
        -> Result<RawResponse>;

    /// Perform a request with an arbitrary method
    async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        self.send(method, url, options).await.map(Response::new)
    }

    /// Perform a request whose verb is given by name
    async fn call(&self, name: &str, url: &str, options: RequestOptions) -> Result<Response> {
        let method = verb_from_name(name)?;
        self.request(method, url, options).await
    }

    /// Execute a GET request
    async fn get(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::GET, url, options).await
    }

    /// Execute a HEAD request
    async fn head(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::HEAD, url, options).await
    }

    /// Execute a DELETE request
    async fn delete(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::DELETE, url, options).await
    }

    /// Execute an OPTIONS request
    async fn options(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::OPTIONS, url, options).await
    }

    /// Execute a POST request
    async fn post(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::POST, url, options).await
    }

    /// Execute a PUT request
    async fn put(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::PUT, url, options).await
    }

    /// Execute a PATCH request
    async fn patch(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::PATCH, url, options).await
    }

    /// Start a request in the background and return a promise-style handle.
    ///
    /// Must be called from within a tokio runtime.
    fn request_async(&self, method: Method, url: &str, options: RequestOptions) -> PendingResponse
    where
        Self: Clone + Sized + 'static,
    {
        let client = self.clone();
        let url = url.to_string();
        PendingResponse::new(Promise::spawn(async move {
            client.send(method, &url, options).await
        }))
    }

    /// Start a GET request in the background
    fn get_async(&self, url: &str, options: RequestOptions) -> PendingResponse
    where
        Self: Clone + Sized + 'static,
    {
        self.request_async(Method::GET, url, options)
    }

    /// Start a POST request in the background
    fn post_async(&self, url: &str, options: RequestOptions) -> PendingResponse
    where
        Self: Clone + Sized + 'static,
    {
        self.request_async(Method::POST, url, options)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Base URL that relative request URLs are joined onto
    pub base_url: Option<Url>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "accept",
            HeaderValue::from_static("application/json, text/plain;q=0.9, */*;q=0.8"),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            proxy: None,
            base_url: None,
        }
    }
}

impl ClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set maximum redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Add a default header sent with every request
    pub fn default_header(mut self, name: &'static str, value: impl AsRef<str>) -> Self {
        if let Ok(value) = HeaderValue::try_from(value.as_ref()) {
            self.default_headers.insert(name, value);
        }
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set base URL
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(base_url.as_ref())?);
        Ok(self)
    }
}

/// reqwest-backed [`Client`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve `url` against the configured base URL
    pub fn resolve_url(&self, url: &str) -> Result<Url> {
        let resolved = match &self.config.base_url {
            Some(base) => base.join(url)?,
            None => Url::parse(url)?,
        };
        Ok(resolved)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

#[async_trait]
impl Client for HttpClient {
    async fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        let start = Instant::now();

        let mut url = self.resolve_url(url)?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&options.query);
        }

        tracing::debug!(method = %method, url = %url, "sending request");

        let mut builder = self.client.request(method, url.clone());

        for (name, value) in options.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(ref auth) = options.auth {
            builder = builder.header("authorization", auth.header_value());
        }

        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let response_time = start.elapsed().as_millis() as u64;
        let raw = RawResponse::read(response, &url, response_time).await?;

        tracing::debug!(
            status = raw.status_code(),
            elapsed_ms = response_time,
            body_bytes = raw.body_len(),
            redirected = raw.redirected,
            "response received"
        );

        Ok(raw)
    }
}
