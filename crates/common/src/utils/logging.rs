use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates that emit the registry's own events, plus request spans.
const COMPACT_DIRECTIVES: &str = "info,tower_http=info,axum=info";
const JSON_DIRECTIVES: &str = "info,driver_registry=debug,server=debug,service=debug,tower_http=info";

/// `RUST_LOG` when it parses, otherwise `fallback`.
fn filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// True when `LOG_FORMAT` asks for JSON lines.
fn wants_json(format: Option<&str>) -> bool {
    format.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

/// Compact human-readable output on stdout.
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(filter_or(COMPACT_DIRECTIVES))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// One JSON object per event, with targets, for log shippers.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(filter_or(JSON_DIRECTIVES))
        .with_target(true)
        .json()
        .with_current_span(true)
        .with_writer(io::stdout)
        .try_init();
}

/// Select the output from `LOG_FORMAT`; anything but `json` is compact.
pub fn init_logging_from_env() {
    if wants_json(std::env::var("LOG_FORMAT").ok().as_deref()) {
        init_logging_json();
    } else {
        init_logging_default();
    }
}
