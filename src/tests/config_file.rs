// Config file -> provider wiring, including ${VAR:default} expansion.

#[cfg(test)]
mod test {

use std::io::Write;

use anyhow::Result;
use serial_test::serial;
use tempfile::NamedTempFile;

use crate::config::LogFormat;
use crate::logger::LogLevel;
use crate::sources::{HttpTokenProvider, TokenProvider};
use crate::tests::common::{json, MockServer, POST, TOKEN_PATH};
use crate::utils::config_loader;

const CONFIG_TEMPLATE: &str = r#"
instance_locator: "${PLATFORM_AUTH_TEST_LOCATOR:v1:us1:abc123}"
token_provider:
  base_url: "${PLATFORM_AUTH_TEST_BASE_URL}"
  timeout_ms: 2000
  query:
    user_id: "${PLATFORM_AUTH_TEST_USER:anonymous}"
  headers:
    x-app: demo
logging:
  level: debug
  format: json
"#;

fn write_config(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

fn clear_env() {
    std::env::remove_var("PLATFORM_AUTH_TEST_LOCATOR");
    std::env::remove_var("PLATFORM_AUTH_TEST_BASE_URL");
    std::env::remove_var("PLATFORM_AUTH_TEST_USER");
}

#[tokio::test]
#[serial]
async fn defaults_fill_unset_variables() -> Result<()> {
    clear_env();
    let file = write_config(CONFIG_TEMPLATE)?;

    let cfg = config_loader::run(file.path().to_str().unwrap()).await?;

    assert_eq!(cfg.instance_locator.to_string(), "v1:us1:abc123");
    assert!(cfg.token_provider.base_url().is_none());
    assert_eq!(cfg.token_provider.query.get("user_id").map(String::as_str), Some("anonymous"));
    assert_eq!(cfg.logging.level, LogLevel::Debug);
    assert_eq!(cfg.logging.format, LogFormat::Json);

    let provider = HttpTokenProvider::from_config(cfg.instance_locator.clone(), &cfg.token_provider)?;
    assert_eq!(
        provider.endpoint_url()?.as_str(),
        "https://us1.pusherplatform.io/services/chatkit_token_provider/v1/abc123/token?user_id=anonymous"
    );
    Ok(())
}

#[tokio::test]
#[serial]
async fn environment_drives_the_fetch() -> Result<()> {
    clear_env();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .query_param("user_id", "bob")
                .header("x-app", "demo");
            then.status(200)
                .json_body(json!({ "access_token": "from-config", "expires_in": 120 }));
        })
        .await;

    std::env::set_var("PLATFORM_AUTH_TEST_BASE_URL", server.base_url());
    std::env::set_var("PLATFORM_AUTH_TEST_USER", "bob");
    let file = write_config(CONFIG_TEMPLATE)?;
    let cfg = config_loader::run(file.path().to_str().unwrap()).await;
    clear_env();
    let cfg = cfg?;

    let provider = HttpTokenProvider::from_config(cfg.instance_locator, &cfg.token_provider)?;
    let token = provider.fetch().await.into_result()?;

    assert_eq!(token.value(), "from-config");
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
#[serial]
async fn bad_locator_from_environment_is_reported() -> Result<()> {
    clear_env();
    std::env::set_var("PLATFORM_AUTH_TEST_LOCATOR", "v1-us1-abc123");
    let file = write_config(CONFIG_TEMPLATE)?;
    let res = config_loader::run(file.path().to_str().unwrap()).await;
    clear_env();

    let err = res.expect_err("locator without separators must fail");
    assert!(err.to_string().contains("v1-us1-abc123"));
    Ok(())
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let res = config_loader::run("/definitely/not/here/platform-auth.yaml").await;
    assert!(res.is_err());
}

}
