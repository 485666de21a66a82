use std::fs::File;
use std::sync::Arc;

use anyhow::Context;
use tracing::subscriber;
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

use crate::config::LogConfig;

/// Installs the global subscriber and routes `log` records into it.
///
/// `RUST_LOG` wins over the configured level.
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level `{}`", config.level))?,
    };

    let file_layer = match &config.file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        }
        None => None,
    };

    let registry = Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer);
    subscriber::set_global_default(registry).context("a logger is already installed")?;
    LogTracer::init().context("failed to bridge the log crate")?;
    Ok(())
}
