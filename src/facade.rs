// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Process-wide client facades
//!
//! A facade is a zero-sized type naming the client it wraps. The first call
//! through a facade creates that client and keeps it for the rest of the
//! process; every later call, from any thread, reuses it.
//!
//! ```rust,no_run
//! use easyhttp::{Client, Facade, HttpClient, RequestOptions};
//!
//! struct Api;
//!
//! impl Facade for Api {
//!     type Client = HttpClient;
//! }
//!
//! # async fn run() -> easyhttp::Result<()> {
//! // associated-function style
//! let users = Api::get("https://example.com/users", RequestOptions::new()).await?;
//!
//! // instance style, same client
//! let health = Api::instance()
//!     .get("https://example.com/health", RequestOptions::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::any::{type_name, Any, TypeId};

use async_trait::async_trait;
use dashmap::DashMap;
use lazy_static::lazy_static;
use reqwest::Method;

use crate::error::Result;
use crate::http::{Client, HttpClient, PendingResponse, RequestOptions, Response};

lazy_static! {
    static ref INSTANCES: DashMap<TypeId, &'static (dyn Any + Send + Sync)> = DashMap::new();
}

/// Resolve or create the client for facade `F`.
///
/// The entry is created under the map's shard lock, so racing first calls
/// still build exactly one client. Instances are never dropped.
fn resolve<F: Facade + ?Sized>() -> &'static F::Client {
    let key = TypeId::of::<F>();

    let instance = match INSTANCES.get(&key) {
        Some(entry) => *entry,
        None => *INSTANCES.entry(key).or_insert_with(|| {
            tracing::debug!(facade = type_name::<F>(), "creating facade instance");
            let client: &'static (dyn Any + Send + Sync) =
                Box::leak(Box::new(F::Client::default()));
            client
        }),
    };

    instance
        .downcast_ref::<F::Client>()
        .expect("facade registry entry holds the facade's client type")
}

/// A single global access point to one client instance.
///
/// Implementors only name the client type; the associated functions resolve
/// the shared instance and forward to the same-named [`Client`] method,
/// returning its result unchanged.
#[async_trait]
pub trait Facade: 'static {
    /// The concrete client this facade wraps
    type Client: Client + Default + 'static;

    /// The shared client instance
    fn instance() -> &'static Self::Client {
        resolve::<Self>()
    }

    /// Forward a request with an arbitrary method
    async fn request(method: Method, url: &str, options: RequestOptions) -> Result<Response> {
        Self::instance().request(method, url, options).await
    }

    /// Forward a request whose verb is given by name
    async fn call(name: &str, url: &str, options: RequestOptions) -> Result<Response> {
        Self::instance().call(name, url, options).await
    }

    /// Forward a GET request
    async fn get(url: &str, options: RequestOptions) -> Result<Response> {
        Self::instance().get(url, options).await
    }

    /// Forward a HEAD request
    async fn head(url: &str, options: RequestOptions) -> Result<Response> {
        Self::instance().head(url, options).await
    }

    /// Forward a DELETE request
    async fn delete(url: &str, options: RequestOptions) -> Result<Response> {
        Self::instance().delete(url, options).await
    }

    /// Forward an OPTIONS request
    async fn options(url: &str, options: RequestOptions) -> Result<Response> {
        Self::instance().options(url, options).await
    }

    /// Forward a POST request
    async fn post(url: &str, options: RequestOptions) -> Result<Response> {
        Self::instance().post(url, options).await
    }

    /// Forward a PUT request
    async fn put(url: &str, options: RequestOptions) -> Result<Response> {
        Self::instance().put(url, options).await
    }

    /// Forward a PATCH request
    async fn patch(url: &str, options: RequestOptions) -> Result<Response> {
        Self::instance().patch(url, options).await
    }

    /// Start a request in the background on the shared client
    fn request_async(method: Method, url: &str, options: RequestOptions) -> PendingResponse
    where
        Self::Client: Clone,
    {
        Self::instance().request_async(method, url, options)
    }

    /// Start a GET request in the background on the shared client
    fn get_async(url: &str, options: RequestOptions) -> PendingResponse
    where
        Self::Client: Clone,
    {
        Self::instance().get_async(url, options)
    }

    /// Start a POST request in the background on the shared client
    fn post_async(url: &str, options: RequestOptions) -> PendingResponse
    where
        Self::Client: Clone,
    {
        Self::instance().post_async(url, options)
    }
}

/// Facade over a default-configured [`HttpClient`]
#[derive(Debug, Clone, Copy)]
pub struct Http;

impl Facade for Http {
    type Client = HttpClient;
}
