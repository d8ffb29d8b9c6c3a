//! Logging setup.
//!
//! Logs always go to stderr; stdout is reserved for the metric value.

use crate::config::LogFormat;
use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "es_metrics=warn,es.cli=warn,es.client=warn,es.handlers=warn";
const VERBOSE_FILTER: &str = "es_metrics=debug,es.cli=debug,es.client=debug,es.handlers=debug";

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Build the stderr subscriber for `format`.
pub fn subscriber(format: LogFormat, verbose: bool) -> impl Subscriber + Send + Sync + 'static {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into());
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
}

/// Install the global tracing subscriber. Call once, from the binary.
pub fn init(format: LogFormat, verbose: bool) {
    subscriber(format, verbose).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert!(default_filter(false).contains("es.client=warn"));
        assert!(default_filter(true).contains("es.client=debug"));
    }

    #[test]
    fn test_subscriber_builds_for_each_format() {
        for format in [LogFormat::Text, LogFormat::Json] {
            tracing::subscriber::with_default(subscriber(format, true), || {
                tracing::debug!(target: "es.client", ?format, "subscriber active");
            });
        }
    }
}
