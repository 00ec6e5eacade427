// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # easyhttp - a convenience layer over reqwest
//!
//! Two small pieces on top of an ordinary HTTP client:
//!
//! - Facades: a type names the client it wraps and gets one shared,
//!   lazily created instance for the whole process.
//! - Responses: [`Response`] wraps a buffered response with status helpers,
//!   header access, a memoized JSON view and array-style field lookup;
//!   [`PendingResponse`] wraps a request still in flight with
//!   `then`/`wait`/`cancel`/`resolve`/`reject`.
//!
//! Transport, TLS, redirects and pooling are all reqwest's.
//!
//! ## Example
//!
//! ```rust,no_run
//! use easyhttp::{Facade, Http, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let response = Http::get("https://httpbin.org/json", RequestOptions::new()).await?;
//!     response.throw_if_error()?;
//!
//!     if response.contains_key("slideshow") {
//!         println!("title: {}", response.get("slideshow")?["title"]);
//!     }
//!
//!     let pending = Http::get_async("https://httpbin.org/delay/1", RequestOptions::new());
//!     pending.then(
//!         |resp| println!("done: {}", resp.status()),
//!         |err| eprintln!("failed: {}", err),
//!     );
//!     let settled = pending.wait(false).await?;
//!     println!("fulfilled: {}", settled.is_fulfilled());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod facade;
pub mod http;
pub mod util;

// Errors
pub use error::{Error, Result};

// Facades
pub use facade::{Facade, Http};

// HTTP
pub use http::{
    Auth, Client, ClientConfig, HttpClient, Method, PendingResponse, Promise, RawResponse,
    RequestOptions, Response, Settlement, StatusCode,
};

/// easyhttp version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
