use anyhow::{bail, Result};
use reqwest::Url;
use tracing::error;

use crate::config::settings::SdkConfig;

pub fn validate_sdk_config(cfg: &SdkConfig) -> Result<()> {
    let provider = &cfg.token_provider;

    if provider.timeout_ms == 0 {
        error!("token_provider.timeout_ms must be > 0");
        bail!("token_provider.timeout_ms must be > 0");
    }

    if let Some(base_url) = provider.base_url() {
        match Url::parse(base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => bail!("token_provider.base_url has unsupported scheme '{}'", url.scheme()),
            Err(e) => bail!("token_provider.base_url '{}' is invalid: {}", base_url, e),
        }
    }

    for key in provider.query.keys() {
        if key.is_empty() {
            bail!("token_provider.query contains an empty key");
        }
    }

    Ok(())
}
