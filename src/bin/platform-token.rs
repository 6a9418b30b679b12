use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use platform_auth::logger::QueuedLogger;
use platform_auth::utils::{config_loader, logging};
use platform_auth::{AuthenticationResult, HttpTokenProvider, LogLevel, Logger, LoggerExt, TokenProvider};
use tokio::sync::oneshot;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Fetch one bearer token for a platform instance", long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "platform-auth.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Extra query item for the token request, `key=value`; repeatable
    #[arg(short, long = "query", value_parser = parse_query_item)]
    query: Vec<(String, String)>,
    /// Print the raw token value instead of a summary
    #[arg(long)]
    raw: bool,
}

fn parse_query_item(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let args = Args::parse();
    let sdk_config = config_loader::run(&args.config).await?;
    logging::run(&sdk_config.logging, args.log_level);

    let logger: Arc<dyn Logger> = Arc::new(QueuedLogger::console(
        args.log_level.unwrap_or(sdk_config.logging.level),
    )?);

    // -------------------------------
    // 2. Build provider
    // -------------------------------

    let mut provider = HttpTokenProvider::from_config(
        sdk_config.instance_locator.clone(),
        &sdk_config.token_provider,
    )?;
    for (key, value) in args.query {
        provider = provider.with_query_item(key, value);
    }
    logger.log(
        || match provider.endpoint_url() {
            Ok(url) => format!("token endpoint for {}: {}", provider.locator(), url),
            Err(e) => format!("token endpoint for {}: {}", provider.locator(), e),
        },
        LogLevel::Debug,
    );

    // -------------------------------
    // 3. Fetch
    // -------------------------------

    let (tx, rx) = oneshot::channel();
    provider.fetch_token(move |result| {
        let _ = tx.send(result);
    });

    match rx.await? {
        AuthenticationResult::Authenticated(token) => {
            if args.raw {
                println!("{}", token.value());
            } else {
                info!("token expires at {}", token.expires_at());
                println!("token fetched, expires in {}s", token.expires_in().num_seconds());
            }
            Ok(())
        }
        AuthenticationResult::Failure(e) => {
            logger.log(|| format!("token fetch failed: {}", e), LogLevel::Error);
            bail!(e)
        }
    }
}
