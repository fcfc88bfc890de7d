//! Observability lifecycle.

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, settings};

/// Runtime observability state.
#[derive(Debug)]
pub(crate) struct Observability {
    metrics_enabled: bool,
}

impl Observability {
    /// Initialize structured logging and apply request logging settings.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(config);
        logging::init_subscriber(config)?;

        Ok(Self {
            metrics_enabled: config.observability.metrics_enabled,
        })
    }

    pub(crate) fn metrics_enabled(&self) -> bool {
        self.metrics_enabled
    }
}
