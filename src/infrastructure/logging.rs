use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Level used when `DEBUG=true` overrides the configured one
const DEBUG_LEVEL: &str = "debug";

/// Filter directive: `RUST_LOG` wins, then the debug flag, then the config
pub fn filter_directive(config: &LoggingConfig, debug: bool) -> String {
    if debug {
        DEBUG_LEVEL.to_string()
    } else {
        config.level.clone()
    }
}

pub fn init_logging(config: &LoggingConfig, debug: bool) {
    let level = filter_directive(config, debug);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stderr)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }

    tracing::debug!("Logging initialized with level: {}", level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_overrides_level() {
        let config = LoggingConfig::default();

        assert_eq!(filter_directive(&config, false), "info");
        assert_eq!(filter_directive(&config, true), "debug");
    }
}
