//! Tracing initialization.

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize console tracing. Compact format; filter from `RUST_LOG` with a
/// sensible default. Production output skips ANSI colors so log collectors
/// see plain text.
pub fn init_telemetry(production: bool) {
    let console_fmt = tracing_subscriber::fmt::layer()
        .with_ansi(!production)
        .event_format(Format::default().compact().with_target(false));

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgpress=debug,tower_http=debug".into()),
        )
        .with(console_fmt)
        .init();
}
