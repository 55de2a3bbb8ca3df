use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Filter used when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global subscriber, writing to stderr so stdout stays clean for
/// scores and records.
///
/// `RUST_LOG` wins over `fallback_level` when set.
pub fn init(fallback_level: &str, use_ansi: bool) -> Result<(), TelemetryError> {
    let env_filter = build_filter(fallback_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(use_ansi)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

/// `RUST_LOG` when it parses, otherwise `fallback_level`.
fn build_filter(fallback_level: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback_level).map_err(|source| TelemetryError::EnvFilter {
            value: fallback_level.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tracing_subscriber::filter::LevelFilter;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn test_fallback_level_used_without_rust_log() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("RUST_LOG");
        let filter = build_filter(DEFAULT_LOG_LEVEL).expect("default level parses");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_invalid_fallback_level_reports_value() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("RUST_LOG");
        let err = build_filter("refscore=loud").unwrap_err();
        assert!(matches!(err, TelemetryError::EnvFilter { ref value, .. } if value == "refscore=loud"));
        assert!(err.to_string().contains("refscore=loud"));
    }

    #[test]
    fn test_rust_log_overrides_fallback() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::set_var("RUST_LOG", "debug");
        let filter = build_filter("refscore=loud");
        env::remove_var("RUST_LOG");
        assert_eq!(
            filter.expect("RUST_LOG wins").max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
