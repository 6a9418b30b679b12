use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::OnceLock;
use std::task::{Context, Poll};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error};

use crate::token::{AuthError, AuthenticationResult};

static FALLBACK_THREAD_NAME: &str = "platform-auth-fetch";

/// Progress of a single fetch. Each call to [`TokenProvider::fetch`] walks
/// `Idle -> Requesting -> Authenticated | Failed` once and stops there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Requesting,
    Authenticated,
    Failed,
}

impl FetchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Authenticated | FetchState::Failed)
    }

    pub fn of(result: &AuthenticationResult) -> Self {
        match result {
            AuthenticationResult::Authenticated(_) => FetchState::Authenticated,
            AuthenticationResult::Failure(_) => FetchState::Failed,
        }
    }
}

/// Completion of a [`TokenProvider::fetch_token`] call.
///
/// Resolves once the callback has run. Dropping it does not cancel the fetch.
#[derive(Debug)]
pub struct FetchHandle {
    task: Option<JoinHandle<()>>,
}

impl FetchHandle {
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Future for FetchHandle {
    type Output = Result<(), JoinError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.get_mut().task.as_mut() {
            Some(task) => Pin::new(task).poll(cx),
            None => Poll::Ready(Ok(())),
        }
    }
}

pub trait TokenProvider: Send + Sync {
    /// One fetch attempt: a single round trip, no retry, no caching.
    fn fetch(&self) -> impl Future<Output = AuthenticationResult> + Send;

    /// Run [`fetch`](TokenProvider::fetch) in the background and hand the
    /// result to `on_complete` exactly once, from a runtime worker.
    ///
    /// Uses the caller's Tokio runtime when there is one and a shared
    /// background runtime otherwise, so plain threads may call it too.
    fn fetch_token<F>(&self, on_complete: F) -> FetchHandle
    where
        Self: Clone + 'static,
        F: FnOnce(AuthenticationResult) + Send + 'static,
    {
        let runtime = match Handle::try_current() {
            Ok(handle) => Ok(handle),
            Err(_) => fallback_runtime().map(|runtime| runtime.handle().clone()),
        };

        match runtime {
            Ok(handle) => {
                let provider = self.clone();
                let task = handle.spawn(async move {
                    let result = provider.fetch().await;
                    on_complete(result);
                });
                FetchHandle { task: Some(task) }
            }
            Err(e) => {
                error!(error = %e, "no runtime available for token fetch");
                on_complete(AuthenticationResult::Failure(AuthError::Runtime(e)));
                FetchHandle { task: None }
            }
        }
    }
}

/// Runtime for callers outside of Tokio, built on first use and kept for the
/// life of the process.
fn fallback_runtime() -> io::Result<&'static Runtime> {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();

    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name(FALLBACK_THREAD_NAME)
        .enable_all()
        .build()?;
    debug!("started fallback runtime for token fetches");
    // a concurrent caller may have won the race; its runtime is kept
    Ok(RUNTIME.get_or_init(|| runtime))
}
