// tests/common/mod.rs
pub use httpmock::{Method::POST, MockServer};
pub use serde_json::json;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::oneshot;

use crate::locator::InstanceLocator;
use crate::sources::{HttpTokenProvider, TokenProvider};
use crate::token::{AuthenticationResult, Token};

pub const LOCATOR: &str = "v1:us1:abc123";
pub const TOKEN_PATH: &str = "/services/chatkit_token_provider/v1/abc123/token";

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Provider pointed at a local mock server.
pub fn provider_for(server: &MockServer) -> HttpTokenProvider {
    let locator = InstanceLocator::parse(LOCATOR).expect("locator");
    HttpTokenProvider::with_client(locator, build_reqwest_client()).with_base_url(server.base_url())
}

/// Run `fetch_token` and wait for the callback, counting its invocations.
pub async fn fetch_via_callback<P>(provider: &P) -> (AuthenticationResult, Arc<AtomicUsize>)
where
    P: TokenProvider + Clone + 'static,
{
    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = oneshot::channel();
    let callback_calls = calls.clone();

    let handle = provider.fetch_token(move |result| {
        callback_calls.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(result);
    });
    handle.await.expect("fetch task");

    (rx.await.expect("callback result"), calls)
}

/// Stand-in provider handing out a fixed token, for code that only needs the
/// capability.
#[derive(Debug, Clone)]
pub struct StubTokenProvider {
    pub ttl: chrono::Duration,
}

impl TokenProvider for StubTokenProvider {
    async fn fetch(&self) -> AuthenticationResult {
        AuthenticationResult::Authenticated(Token::new("stub-token", Utc::now() + self.ttl))
    }
}
