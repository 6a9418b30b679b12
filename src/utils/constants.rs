//! Shared constants and invariants

use http::header::HeaderName;

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

// tracing targets of the library and of the `platform-token` binary
pub const LOG_TARGET: &str = "platform_auth";
pub const CLI_LOG_TARGET: &str = "platform_token";

// Token endpoint
pub const DEFAULT_HOST: &str = "pusherplatform.io";
pub const BASE_URL_TEMPLATE: &str = "https://{region}.{host}";
pub const TOKEN_PATH_TEMPLATE: &str = "/services/chatkit_token_provider/{version}/{identifier}/token";
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

// SDK identification headers
pub const HEADER_SDK_PRODUCT: HeaderName = HeaderName::from_static("x-sdk-product");
pub const HEADER_SDK_VERSION: HeaderName = HeaderName::from_static("x-sdk-version");
pub const HEADER_SDK_LANGUAGE: HeaderName = HeaderName::from_static("x-sdk-language");
pub const HEADER_SDK_PLATFORM: HeaderName = HeaderName::from_static("x-sdk-platform");

pub const SDK_PRODUCT: &str = env!("CARGO_PKG_NAME");
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SDK_LANGUAGE: &str = "rust";
pub const SDK_PLATFORM: &str = std::env::consts::OS;

pub const CONTENT_TYPE_JSON: &str = "application/json";
