// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response wrapper with status helpers and a JSON view of the body

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde_json::value::Index;
use serde_json::Value;
use url::Url;

use super::raw::RawResponse;
use crate::error::{Error, Result};
use crate::util::map_with_keys;

/// Read-only view over one buffered HTTP response.
///
/// The decoded JSON body is computed on first use and cached for the
/// lifetime of the wrapper.
#[derive(Debug)]
pub struct Response {
    response: RawResponse,
    decoded: OnceCell<Value>,
}

impl Response {
    /// Wrap a raw response
    pub fn new(response: RawResponse) -> Self {
        Self {
            response,
            decoded: OnceCell::new(),
        }
    }

    /// Get the body of the response as text.
    ///
    /// Invalid UTF-8 is replaced, and the text is rebuilt on every call.
    pub fn body(&self) -> String {
        String::from_utf8_lossy(&self.response.body).into_owned()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &Bytes {
        &self.response.body
    }

    /// Get the JSON decoded body of the response.
    ///
    /// A body that is not valid JSON decodes to [`Value::Null`].
    pub fn json(&self) -> &Value {
        self.decoded
            .get_or_init(|| serde_json::from_slice(&self.response.body).unwrap_or(Value::Null))
    }

    /// Decode the body into a concrete type
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.response.body).map_err(Error::from)
    }

    /// Get a header from the response, all values joined with `", "`.
    ///
    /// Lookup is case-insensitive. Returns an empty string when absent.
    pub fn header(&self, name: &str) -> String {
        self.response
            .headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Get the headers from the response
    pub fn headers(&self) -> HashMap<String, Vec<String>> {
        let names = self.response.headers.keys().map(|name| {
            let values = self
                .response
                .headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>();
            (name.as_str().to_string(), values)
        });

        map_with_keys(names, |values, name| [(name, values)])
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
    }

    /// Get the status code of the response
    pub fn status(&self) -> u16 {
        self.response.status.as_u16()
    }

    /// Determine if the request was successful (2xx)
    pub fn successful(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Determine if the response code was "OK"
    pub fn ok(&self) -> bool {
        self.status() == 200
    }

    /// Determine if the response was a redirect (3xx)
    pub fn redirect(&self) -> bool {
        (300..400).contains(&self.status())
    }

    /// Determine if the response indicates a client error occurred (4xx)
    pub fn client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }

    /// Determine if the response indicates a server error occurred (5xx and up)
    pub fn server_error(&self) -> bool {
        self.status() >= 500
    }

    /// Fail with [`Error::Status`] if a client or server error occurred
    pub fn throw_if_error(&self) -> Result<&Self> {
        if self.server_error() || self.client_error() {
            return Err(Error::Status {
                status: self.status(),
            });
        }
        Ok(self)
    }

    /// Final URL, after redirects
    pub fn url(&self) -> &Url {
        &self.response.url
    }

    /// Whether the client followed a redirect to produce this response
    pub fn redirected(&self) -> bool {
        self.response.redirected
    }

    /// Round-trip time in milliseconds
    pub fn response_time_ms(&self) -> u64 {
        self.response.response_time_ms
    }

    /// Get the underlying raw response
    pub fn to_underlying(&self) -> &RawResponse {
        &self.response
    }

    /// Unwrap into the underlying raw response
    pub fn into_underlying(self) -> RawResponse {
        self.response
    }

    /// Determine if the given key exists in the decoded body and is not null
    pub fn contains_key<I: Index>(&self, key: I) -> bool {
        self.json().get(key).map(|v| !v.is_null()).unwrap_or(false)
    }

    /// Get the value for a given key of the decoded body
    pub fn try_get<I: Index>(&self, key: I) -> Option<&Value> {
        self.json().get(key)
    }

    /// Get the value for a given key, failing with [`Error::KeyNotFound`]
    pub fn get<I: Index + fmt::Display>(&self, key: I) -> Result<&Value> {
        let missing = key.to_string();
        self.json().get(key).ok_or(Error::KeyNotFound(missing))
    }

    /// Always fails: response data is read-only
    pub fn set<I: Index>(&self, _key: I, _value: Value) -> Result<()> {
        Err(Error::ImmutableData)
    }

    /// Always fails: response data is read-only
    pub fn unset<I: Index>(&self, _key: I) -> Result<()> {
        Err(Error::ImmutableData)
    }
}

impl From<RawResponse> for Response {
    fn from(response: RawResponse) -> Self {
        Self::new(response)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};
    use reqwest::StatusCode;
    use serde_json::json;

    fn response(status: u16, body: &str) -> Response {
        response_with_headers(status, HeaderMap::new(), body)
    }

    fn response_with_headers(status: u16, headers: HeaderMap, body: &str) -> Response {
        Response::new(RawResponse::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            body.to_string(),
            Url::parse("https://example.com").unwrap(),
        ))
    }

    #[test]
    fn test_response_status() {
        let resp = response(200, "");
        assert!(resp.successful());
        assert!(resp.ok());
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn test_status_partition() {
        for code in 200..600u16 {
            let resp = response(code, "");
            let classes = [
                resp.successful(),
                resp.redirect(),
                resp.client_error(),
                resp.server_error(),
            ];
            assert_eq!(
                classes.iter().filter(|c| **c).count(),
                1,
                "status {code} must fall in exactly one class"
            );
            assert_eq!(resp.ok(), code == 200);
        }
    }

    #[test]
    fn test_created_is_successful_not_ok() {
        let resp = response(201, "");
        assert!(resp.successful());
        assert!(!resp.ok());
    }

    #[test]
    fn test_response_text() {
        let resp = response(200, "Hello, World!");
        assert_eq!(resp.body(), "Hello, World!");
        assert_eq!(resp.to_string(), "Hello, World!");
    }

    #[test]
    fn test_json_is_memoized() {
        let resp = response(200, r#"{"a":1,"b":2}"#);
        let first = resp.json();
        let second = resp.json();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first, &json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_invalid_json_decodes_to_null() {
        let resp = response(200, "<html>not json</html>");
        assert!(resp.json().is_null());
        assert!(!resp.contains_key("a"));
    }

    #[test]
    fn test_json_scalar_and_array_bodies() {
        assert_eq!(response(200, "42").json(), &json!(42));

        let resp = response(200, r#"["x", null, "z"]"#);
        assert_eq!(resp.get(0).unwrap(), "x");
        assert!(!resp.contains_key(1));
        assert!(resp.contains_key(2));
        assert!(matches!(resp.get(5), Err(Error::KeyNotFound(k)) if k == "5"));
    }

    #[test]
    fn test_array_style_access() {
        let resp = response(200, r#"{"a":1,"b":2,"n":null}"#);

        assert_eq!(resp.get("a").unwrap(), &json!(1));
        assert!(resp.contains_key("a"));
        assert!(!resp.contains_key("c"));
        assert!(!resp.contains_key("n"));
        assert!(resp.try_get("c").is_none());
        assert!(matches!(resp.get("c"), Err(Error::KeyNotFound(k)) if k == "c"));
    }

    #[test]
    fn test_writes_are_rejected() {
        let resp = response(200, r#"{"a":1,"b":2}"#);

        assert!(matches!(resp.set("a", json!(5)), Err(Error::ImmutableData)));
        assert!(matches!(resp.unset("a"), Err(Error::ImmutableData)));
        assert_eq!(resp.json(), &json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_throw_if_error() {
        let not_found = response(404, "");
        let err = not_found.throw_if_error().unwrap_err();
        assert!(matches!(err, Error::Status { status: 404 }));
        assert!(err.to_string().contains("404"));

        let server = response(502, "");
        assert!(server.throw_if_error().is_err());

        let ok = response(200, "fine");
        let chained = ok.throw_if_error().unwrap();
        assert!(std::ptr::eq(chained, &ok));
        assert_eq!(chained.body(), "fine");
    }

    #[test]
    fn test_redirect_does_not_throw() {
        assert!(response(302, "").throw_if_error().is_ok());
    }

    #[test]
    fn test_header_lookup() {
        let mut headers = HeaderMap::new();
        headers.append("x-b", HeaderValue::from_static("2"));
        headers.append("x-b", HeaderValue::from_static("3"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        let resp = response_with_headers(200, headers, "{}");

        assert_eq!(resp.header("X-B"), "2, 3");
        assert_eq!(resp.header("Content-Type"), "application/json");
        assert_eq!(resp.header("x-missing"), "");
        assert_eq!(resp.content_type(), Some("application/json"));
    }

    #[test]
    fn test_headers_map() {
        let mut headers = HeaderMap::new();
        headers.append("x-a", HeaderValue::from_static("1"));
        headers.append("x-b", HeaderValue::from_static("2"));
        headers.append("x-b", HeaderValue::from_static("3"));
        let resp = response_with_headers(200, headers, "");

        let map = resp.headers();
        assert_eq!(map.len(), 2);
        assert_eq!(map["x-a"], vec!["1"]);
        assert_eq!(map["x-b"], vec!["2", "3"]);
    }

    #[test]
    fn test_to_underlying() {
        let resp = response(204, "");
        assert_eq!(resp.to_underlying().status, StatusCode::NO_CONTENT);
        assert_eq!(resp.into_underlying().status_code(), 204);
    }
}
