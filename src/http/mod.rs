// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for easyhttp
//!
//! A reqwest-backed client behind the [`Client`] verb trait, the buffered
//! [`Response`] wrapper, and [`PendingResponse`] for requests still in flight.

mod client;
mod options;
mod promise;
mod raw;
mod response;

pub use client::{verb_from_name, Client, ClientConfig, HttpClient, VERBS};
pub use options::{Auth, RequestOptions};
pub use promise::{PendingResponse, Promise, Settlement};
pub use raw::RawResponse;
pub use response::Response;

pub use reqwest::{Method, StatusCode};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("easyhttp/", env!("CARGO_PKG_VERSION"));
