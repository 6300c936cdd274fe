//! Tracing setup for the `vscterm` binary.
//!
//! Events go to stderr so stdout only ever carries command output.
//! `RUST_LOG` refines the filter; without it only warnings are shown.

use clap::ValueEnum;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LogFormat {
    /// Human-readable lines
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

pub(crate) fn setup_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    // Different layer types per format, hence no inline match.
    match format {
        LogFormat::Plain => register_global_subscriber(
            filter,
            tracing_subscriber::fmt::layer().with_writer(std::io::stderr),
        ),
        LogFormat::Json => register_global_subscriber(
            filter,
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .event_format(tracing_subscriber::fmt::format().json()),
        ),
    }
}

fn register_global_subscriber<T, S>(filter: EnvFilter, fmt_layer: T)
where
    S: Subscriber,
    T: tracing_subscriber::Layer<S> + Send + Sync,
    tracing_subscriber::filter::Filtered<T, EnvFilter, S>:
        tracing_subscriber::Layer<tracing_subscriber::Registry>,
{
    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}
