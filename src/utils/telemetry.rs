use anyhow::{Context, Result};
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_log::LogTracer;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    prelude::__tracing_subscriber_SubscriberExt,
    EnvFilter, Registry,
};

/// Gets a subscriber that can be used to initialize the logger.
///
/// `RUST_LOG` takes precedence over `env_filter` when set.
pub fn get_subscriber<Sink>(env_filter: String, sink: Sink) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = fmt::layer().compact().with_writer(sink);

    Registry::default()
        .with(env_filter)
        .with(formatting_layer)
        .with(sentry_tracing::layer())
}

/// Inits the logger with the given subscriber.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<()> {
    LogTracer::init().context("Could not initialize log tracer")?;

    set_global_default(subscriber).context("Failed to set subscriber")
}
