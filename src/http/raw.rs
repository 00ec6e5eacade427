// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Buffered response as produced by the underlying client

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

/// The raw response a [`Response`](super::Response) wraps.
///
/// Everything is read out of the reqwest response before it is handed over,
/// so the wrapper can be queried repeatedly without touching the network.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Whether this was a redirect
    pub redirected: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl RawResponse {
    /// Create a new raw response
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>, url: Url) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            url,
            redirected: false,
            response_time_ms: 0,
        }
    }

    /// Record redirect and timing information
    pub fn with_timing(mut self, redirected: bool, response_time_ms: u64) -> Self {
        self.redirected = redirected;
        self.response_time_ms = response_time_ms;
        self
    }

    /// Buffer a reqwest response
    pub(crate) async fn read(
        response: reqwest::Response,
        requested: &Url,
        response_time_ms: u64,
    ) -> reqwest::Result<Self> {
        let redirected = response.url() != requested;
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Self::new(status, headers, body, url).with_timing(redirected, response_time_ms))
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_defaults() {
        let raw = RawResponse::new(
            StatusCode::CREATED,
            HeaderMap::new(),
            "created",
            Url::parse("https://example.com/items").unwrap(),
        );

        assert_eq!(raw.status_code(), 201);
        assert_eq!(raw.body_len(), 7);
        assert!(!raw.redirected);
        assert_eq!(raw.response_time_ms, 0);
    }

    #[test]
    fn test_with_timing() {
        let raw = RawResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::new(),
            Url::parse("https://example.com").unwrap(),
        )
        .with_timing(true, 42);

        assert!(raw.redirected);
        assert_eq!(raw.response_time_ms, 42);
    }
}
