//! Token providers.
//!
//! [`TokenProvider`] is the capability callers depend on; [`HttpTokenProvider`]
//! talks to the platform's token endpoint. Tests substitute their own
//! implementation of the same trait.

pub mod http;
pub mod provider;

pub use http::HttpTokenProvider;
pub use provider::{FetchHandle, FetchState, TokenProvider};
