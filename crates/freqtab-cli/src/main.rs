use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod command;
mod util;

fn main() -> anyhow::Result<()> {
    init_tracing();
    command::run()
}

/// Logs go to stderr so that stdout only carries tables or JSON.
fn init_tracing() {
    let env_filter = EnvFilter::builder();
    let env_filter = if cfg!(debug_assertions) {
        env_filter.with_default_directive(LevelFilter::DEBUG.into())
    } else {
        env_filter.with_default_directive(LevelFilter::INFO.into())
    };
    let env_filter = env_filter.from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .without_time()
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .init();
}
