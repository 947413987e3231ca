//! Tracing setup for the viewer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the log subscriber.
///
/// Output goes to stderr so the alternate-screen UI on stdout stays
/// intact; redirect fd 2 to a file to keep the logs.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,duolife_viewer=debug,duolife_world=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
