use tracing_subscriber::{fmt, EnvFilter};

/// Default log directives when RUST_LOG is unset: the service itself at
/// info, dependency internals no louder than warn.
const DEFAULT_DIRECTIVES: &str = "warn,ticket_analytics=info,tower_http=info";

/// Initializes tracing/logging, honoring RUST_LOG when present.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();
}
