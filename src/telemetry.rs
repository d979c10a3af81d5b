//! Log setup for the quiz service.
//!
//! Events are emitted under three targets:
//! - `catalog`: dataset loading, skipped venue records, category counts.
//! - `quiz`: round generation (setup, abandoned attempts, exhausted slots)
//!   and answer scoring.
//! - `dish_quiz_backend`: startup, readiness of the store, shutdown.
//!
//! `LOG_LEVEL` takes plain levels or directives per target, for example
//! "info,quiz=trace,catalog=warn". Without it, `quiz` and the service target
//! log at debug and everything else at info. `LOG_FORMAT=json` switches to
//! one JSON object per line; anything else prints human-readable lines.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info,quiz=debug,dish_quiz_backend=debug,tower_http=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    // The json and plain builders are distinct types, so each branch inits its own.
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
