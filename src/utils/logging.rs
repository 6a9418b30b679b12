use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::logger::LogLevel;
use crate::utils::constants::{CLI_LOG_TARGET, LOG_TARGET};

/// Install the global subscriber; a level given on the command line wins over
/// the configured one.
pub fn run(logging_config: &LoggingConfig, arg_log_level: Option<LogLevel>) {
    let logging_config = LoggingConfig::new(
        arg_log_level.unwrap_or(logging_config.level),
        logging_config.format.to_owned(),
    );

    init_logging(&logging_config);
}

/// Filter for the SDK's own events.
///
/// `RUST_LOG`, when set, is used as given with `level` as the fallback.
/// Otherwise `level` applies to the SDK and CLI targets only and every other
/// crate (reqwest, hyper, ...) is held at `warn`.
pub fn build_env_filter(level: LogLevel, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::builder()
            .with_default_directive(level.as_level_filter().into())
            .parse_lossy(directives);
    }

    let sdk_level = level.as_level_filter();
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy("");
    for target in [LOG_TARGET, CLI_LOG_TARGET] {
        if let Ok(directive) = format!("{target}={sdk_level}").parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

pub fn init_logging(cfg: &LoggingConfig) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let registry = tracing_subscriber::registry().with(build_env_filter(cfg.level, rust_log.as_deref()));

    // try_init: a host application may already own the global subscriber
    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_current_span(false)
                .flatten_event(true)
                .with_ansi(false);
            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_target(true)
                .with_ansi(true);
            let _ = registry.with(layer).try_init();
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(filter: EnvFilter) -> String {
        filter.to_string().to_lowercase()
    }

    #[test]
    fn sdk_targets_follow_the_configured_level() {
        let filter = rendered(build_env_filter(LogLevel::Debug, None));
        assert!(filter.contains("platform_auth=debug"), "{filter}");
        assert!(filter.contains("platform_token=debug"), "{filter}");
        assert!(filter.contains("warn"), "{filter}");
    }

    #[test]
    fn verbose_maps_to_trace() {
        let filter = rendered(build_env_filter(LogLevel::Verbose, Some("  ")));
        assert!(filter.contains("platform_auth=trace"), "{filter}");
    }

    #[test]
    fn rust_log_replaces_the_sdk_directives() {
        let filter = rendered(build_env_filter(LogLevel::Debug, Some("hyper=info")));
        assert!(filter.contains("hyper=info"), "{filter}");
        assert!(!filter.contains("platform_auth"), "{filter}");
    }
}
