//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when neither `RUST_LOG` nor a config level is usable
const FALLBACK_DIRECTIVES: &str = "crashviz=info,tower_http=debug";

/// Build the env filter: `RUST_LOG` wins, then the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives(&config.level)))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVES))
}

fn directives(level: &str) -> String {
    // A bare level applies to our crate and the HTTP tracing layer only
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("crashviz={level},tower_http={level}")
    }
}

/// Install the global subscriber, pretty or JSON per `config.format`
pub fn init(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
