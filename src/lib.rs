//! # Platform Auth SDK
//!
//! Client-side pieces for talking to a platform instance: parsing the
//! instance locator, fetching short-lived bearer tokens and a leveled,
//! lazily-evaluated logger shared by the rest of the stack.
//!
//! Modules:
//! - `locator` — `version:region:identifier` instance locators
//! - `token` — tokens, fetch results and their errors
//! - `sources` — the token provider capability and its HTTP implementation
//! - `parser` — token endpoint response parsing
//! - `logger` — the logger capability, queued delivery and console sink
//! - `config` — YAML configuration

pub mod config;
pub mod locator;
pub mod logger;
pub mod parser;
pub mod sources;
pub mod token;
#[cfg(test)]
mod tests;
pub mod utils;


pub use crate::locator::{InstanceLocator, LocatorError};
pub use crate::logger::{LogLevel, Logger, LoggerExt};
pub use crate::sources::{FetchHandle, HttpTokenProvider, TokenProvider};
pub use crate::token::{AuthError, AuthenticationResult, Token};
