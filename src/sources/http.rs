use std::time::Duration;

use http::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use http::HeaderMap;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::settings::TokenProviderConfig;
use crate::locator::InstanceLocator;
use crate::parser::parse_token_response;
use crate::sources::provider::{FetchState, TokenProvider};
use crate::token::{AuthError, AuthenticationResult, Token};
use crate::utils::constants::*;

#[derive(Debug, Serialize)]
struct TokenRequestBody<'a> {
    grant_type: &'a str,
}

/// Fetches tokens from the platform's token provider service for one instance.
#[derive(Debug, Clone)]
pub struct HttpTokenProvider {
    locator: InstanceLocator,
    base_url: Option<String>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    client: Client,
}

impl HttpTokenProvider {
    pub fn new(locator: InstanceLocator) -> Self {
        Self::with_client(locator, Client::new())
    }

    pub fn with_client(locator: InstanceLocator, client: Client) -> Self {
        Self {
            locator,
            base_url: None,
            query: Vec::new(),
            headers: HeaderMap::new(),
            client,
        }
    }

    pub fn from_config(locator: InstanceLocator, cfg: &TokenProviderConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()?;

        let mut provider = Self::with_client(locator, client);
        if let Some(base_url) = cfg.base_url() {
            provider = provider.with_base_url(base_url);
        }
        for (key, value) in &cfg.query {
            provider = provider.with_query_item(key, value);
        }
        for (name, value) in &cfg.headers {
            provider = provider.with_header(name, value)?;
        }
        Ok(provider)
    }

    /// Override scheme and host, e.g. `http://127.0.0.1:8080`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_query_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Extra header sent with every token request, after the SDK headers.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, http::Error> {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::try_from(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn locator(&self) -> &InstanceLocator {
        &self.locator
    }

    /// Token endpoint for the locator, query items included.
    ///
    /// Without a base URL override the host is always `{region}.pusherplatform.io`;
    /// a region that would steer the request elsewhere is `InvalidUrl`.
    pub fn endpoint_url(&self) -> Result<Url, AuthError> {
        let version = path_segment("version", self.locator.version())?;
        let identifier = path_segment("identifier", self.locator.identifier())?;

        let base = match &self.base_url {
            Some(base_url) => base_url.trim_end_matches('/').to_owned(),
            None => BASE_URL_TEMPLATE
                .replace("{region}", self.locator.region())
                .replace("{host}", DEFAULT_HOST),
        };
        let path = TOKEN_PATH_TEMPLATE
            .replace("{version}", version)
            .replace("{identifier}", identifier);
        let raw = format!("{}{}", base, path);

        let mut url = Url::parse(&raw).map_err(|e| AuthError::InvalidUrl(format!("'{}': {}", raw, e)))?;
        if url.cannot_be_a_base() {
            return Err(AuthError::InvalidUrl(format!("'{}' cannot carry a path", raw)));
        }
        if self.base_url.is_none() {
            let expected = format!("{}.{}", self.locator.region(), DEFAULT_HOST);
            let host_matches = url.host_str().is_some_and(|host| host.eq_ignore_ascii_case(&expected));
            if !host_matches || url.query().is_some() || url.fragment().is_some() || !url.username().is_empty() {
                return Err(AuthError::InvalidUrl(format!(
                    "region '{}' does not name a host under {}",
                    self.locator.region(),
                    DEFAULT_HOST
                )));
            }
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }

    fn request_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(CONTENT_TYPE_JSON));
        headers.insert(HEADER_SDK_PRODUCT, HeaderValue::from_static(SDK_PRODUCT));
        headers.insert(HEADER_SDK_VERSION, HeaderValue::from_static(SDK_VERSION));
        headers.insert(HEADER_SDK_LANGUAGE, HeaderValue::from_static(SDK_LANGUAGE));
        headers.insert(HEADER_SDK_PLATFORM, HeaderValue::from_static(SDK_PLATFORM));
        headers.extend(self.headers.clone());
        headers
    }

    async fn request_token(&self) -> Result<Token, AuthError> {
        let url = self.endpoint_url()?;
        let body = serde_json::to_vec(&TokenRequestBody { grant_type: GRANT_TYPE_CLIENT_CREDENTIALS })
            .map_err(AuthError::FailedToSerializeBody)?;

        debug!(state = ?FetchState::Requesting, url = %url, "requesting token");
        let response = self
            .client
            .post(url)
            .headers(self.request_headers())
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        parse_token_response(&body)
    }
}

/// Locator parts land in the path as-is, so they must stay a single segment.
fn path_segment<'a>(part: &str, value: &'a str) -> Result<&'a str, AuthError> {
    if value == "." || value == ".." || value.contains(['/', '\\', '?', '#', '%']) {
        return Err(AuthError::InvalidUrl(format!("{} '{}' is not a single path segment", part, value)));
    }
    Ok(value)
}

impl TokenProvider for HttpTokenProvider {
    async fn fetch(&self) -> AuthenticationResult {
        debug!(state = ?FetchState::Idle, locator = %self.locator, "token fetch start");
        let result = AuthenticationResult::from(self.request_token().await);

        match &result {
            AuthenticationResult::Authenticated(token) => {
                info!(state = ?FetchState::of(&result), expires_at = %token.expires_at(), "token fetched")
            }
            AuthenticationResult::Failure(e) => {
                warn!(state = ?FetchState::of(&result), error = %e, "token fetch failed")
            }
        }
        result
    }
}
