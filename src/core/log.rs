use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

fn levels(verbose: bool) -> (LevelFilter, &'static str) {
    if verbose {
        (LevelFilter::DEBUG, "debug")
    } else {
        (LevelFilter::INFO, "info")
    }
}

/// `tower_http` gets its own target so the per-request spans of the
/// dashboard server follow `--verbose` like the app's own events.
fn app_targets(verbose: bool) -> Targets {
    let (level_filter, _) = levels(verbose);
    Targets::new()
        .with_target("fxdash", level_filter)
        .with_target("tower_http", level_filter)
}

pub fn init_logging(verbose: bool) {
    let (_, level) = levels(verbose);
    let app_filter = app_targets(verbose);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time())
        .with(app_filter)
        .with(env_filter)
        .init();
}
