// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Promise-style handles for requests that are still in flight
//!
//! A [`Promise`] settles exactly once, either fulfilled with a
//! [`RawResponse`] or rejected with an [`Error`]. [`PendingResponse`] is the
//! caller-facing wrapper and forwards continuation, waiting, cancellation
//! and manual settlement to it.

use std::future::{Future, IntoFuture};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::raw::RawResponse;
use super::response::Response;
use crate::error::{Error, Result};

type OnFulfilled = Box<dyn FnOnce(&Response) + Send>;
type OnRejected = Box<dyn FnOnce(&Error) + Send>;

#[derive(Debug, Clone)]
enum State {
    Pending,
    Fulfilled(RawResponse),
    Rejected(Arc<Error>),
}

struct Continuation {
    on_fulfilled: OnFulfilled,
    on_rejected: OnRejected,
}

impl Continuation {
    fn run(self, state: &State) {
        match state {
            State::Fulfilled(raw) => (self.on_fulfilled)(&Response::new(raw.clone())),
            State::Rejected(reason) => (self.on_rejected)(reason.as_ref()),
            State::Pending => {}
        }
    }
}

#[derive(Default)]
struct Settled {
    outcome: Option<State>,
    continuations: Vec<Continuation>,
}

/// Shared settlement state of one asynchronous response.
///
/// The outcome is recorded under `settled` first, queued continuations run,
/// and only then is it published on `state` to waiters. A panicking
/// continuation is logged and skipped; it never keeps waiters from seeing
/// the outcome.
pub struct Promise {
    settled: Mutex<Settled>,
    state: watch::Sender<State>,
    task: Mutex<Option<AbortHandle>>,
}

impl Promise {
    /// Create a promise with nothing driving it; settle it with
    /// [`resolve`](Self::resolve) or [`reject`](Self::reject).
    pub fn new() -> Self {
        let (state, _) = watch::channel(State::Pending);
        Self {
            settled: Mutex::new(Settled::default()),
            state,
            task: Mutex::new(None),
        }
    }

    /// Run `future` on the tokio runtime and settle with its outcome.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(future: F) -> Arc<Self>
    where
        F: Future<Output = Result<RawResponse>> + Send + 'static,
    {
        let promise = Arc::new(Self::new());
        let driver = Arc::clone(&promise);

        let handle = tokio::spawn(async move {
            let state = match future.await {
                Ok(raw) => State::Fulfilled(raw),
                Err(e) => State::Rejected(Arc::new(e)),
            };
            // Already settled by a manual resolve/reject or cancel.
            if driver.settle(state).is_err() {
                tracing::trace!("request finished after promise settled");
            }
        });

        *promise.task.lock() = Some(handle.abort_handle());
        promise
    }

    /// Whether the promise has not settled yet
    pub fn is_pending(&self) -> bool {
        self.settled.lock().outcome.is_none()
    }

    /// Register continuations to run once the promise settles.
    ///
    /// Runs immediately on the calling thread if already settled, otherwise
    /// on whichever task settles the promise.
    pub fn then<F, R>(&self, on_fulfilled: F, on_rejected: R)
    where
        F: FnOnce(&Response) + Send + 'static,
        R: FnOnce(&Error) + Send + 'static,
    {
        let continuation = Continuation {
            on_fulfilled: Box::new(on_fulfilled),
            on_rejected: Box::new(on_rejected),
        };

        let mut settled = self.settled.lock();
        match settled.outcome.clone() {
            None => settled.continuations.push(continuation),
            Some(state) => {
                drop(settled);
                if let State::Rejected(reason) = &state {
                    if reason.is_cancelled() {
                        tracing::warn!("continuation registered on a cancelled request");
                    }
                }
                continuation.run(&state);
            }
        }
    }

    /// Wait until the promise settles
    pub async fn wait(&self) -> Result<Settlement> {
        let mut rx = self.state.subscribe();
        let state = rx
            .wait_for(|state| !matches!(state, State::Pending))
            .await
            .map_err(|_| Error::other("promise state dropped while waiting"))?
            .clone();

        Ok(match state {
            State::Fulfilled(raw) => Settlement::Fulfilled(Response::new(raw)),
            State::Rejected(reason) => Settlement::Rejected(reason),
            State::Pending => unreachable!("wait_for returned a pending state"),
        })
    }

    /// Abort the driving task and reject with [`Error::Cancelled`].
    ///
    /// No-op once settled.
    pub fn cancel(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
        if self.settle(State::Rejected(Arc::new(Error::Cancelled))).is_ok() {
            tracing::debug!("pending request cancelled");
        }
    }

    /// Fulfil the promise with `value`
    pub fn resolve(&self, value: RawResponse) -> Result<()> {
        self.settle(State::Fulfilled(value))
    }

    /// Reject the promise with `reason`
    pub fn reject(&self, reason: Error) -> Result<()> {
        self.settle(State::Rejected(Arc::new(reason)))
    }

    fn settle(&self, next: State) -> Result<()> {
        let queued = {
            let mut settled = self.settled.lock();
            if settled.outcome.is_some() {
                return Err(Error::AlreadySettled);
            }
            settled.outcome = Some(next.clone());
            std::mem::take(&mut settled.continuations)
        };

        tracing::trace!(
            fulfilled = matches!(next, State::Fulfilled(_)),
            continuations = queued.len(),
            "promise settled"
        );
        for continuation in queued {
            let run = panic::catch_unwind(AssertUnwindSafe(|| continuation.run(&next)));
            if run.is_err() {
                tracing::warn!("promise continuation panicked");
            }
        }

        self.state.send_replace(next);
        Ok(())
    }
}

impl Default for Promise {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Promise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Promise")
            .field("pending", &self.is_pending())
            .field("continuations", &self.settled.lock().continuations.len())
            .finish()
    }
}

/// Outcome of a settled promise
#[derive(Debug)]
pub enum Settlement {
    /// The request completed with a response
    Fulfilled(Response),
    /// The request failed, was cancelled or was rejected manually
    Rejected(Arc<Error>),
}

impl Settlement {
    /// Convert into a `Result`, surfacing a rejection as [`Error::Rejected`]
    pub fn into_result(self) -> Result<Response> {
        match self {
            Settlement::Fulfilled(response) => Ok(response),
            Settlement::Rejected(reason) => Err(Error::Rejected(reason)),
        }
    }

    /// Whether the promise was fulfilled
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settlement::Fulfilled(_))
    }
}

/// A response that may still be in flight
#[derive(Debug, Clone)]
pub struct PendingResponse {
    promise: Arc<Promise>,
}

impl PendingResponse {
    /// Wrap a promise
    pub fn new(promise: Arc<Promise>) -> Self {
        Self { promise }
    }

    /// Register continuations; returns this handle for chaining
    pub fn then<F, R>(&self, on_fulfilled: F, on_rejected: R) -> &Self
    where
        F: FnOnce(&Response) + Send + 'static,
        R: FnOnce(&Error) + Send + 'static,
    {
        self.promise.then(on_fulfilled, on_rejected);
        self
    }

    /// Wait for the outcome.
    ///
    /// With `unwrap` a rejection is returned as `Err(Error::Rejected)`,
    /// otherwise it is returned as [`Settlement::Rejected`].
    pub async fn wait(&self, unwrap: bool) -> Result<Settlement> {
        let settlement = self.promise.wait().await?;
        match settlement {
            Settlement::Rejected(reason) if unwrap => Err(Error::Rejected(reason)),
            other => Ok(other),
        }
    }

    /// Wait for the response itself; a rejection becomes
    /// `Err(Error::Rejected)`.
    pub async fn wait_response(&self) -> Result<Response> {
        self.promise.wait().await?.into_result()
    }

    /// Cancel the request if it has not settled yet
    pub fn cancel(&self) {
        self.promise.cancel();
    }

    /// Fulfil the pending response manually
    pub fn resolve(&self, value: RawResponse) -> Result<()> {
        self.promise.resolve(value)
    }

    /// Reject the pending response manually
    pub fn reject(&self, reason: Error) -> Result<()> {
        self.promise.reject(reason)
    }

    /// Whether the response has not settled yet
    pub fn is_pending(&self) -> bool {
        self.promise.is_pending()
    }

    /// Get the underlying promise
    pub fn to_underlying(&self) -> &Arc<Promise> {
        &self.promise
    }
}

impl IntoFuture for PendingResponse {
    type Output = Result<Response>;
    type IntoFuture = BoxFuture<'static, Result<Response>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.promise.wait().await?.into_result() })
    }
}
