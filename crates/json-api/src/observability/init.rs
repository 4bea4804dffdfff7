//! Telemetry lifecycle management.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{debug, error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Logging and trace export handles for the lifetime of the server.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Install the subscriber, exporting spans over OTLP when enabled.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        let observability = &config.observability;

        settings::apply(observability);

        let tracer_provider = observability
            .otel_enabled
            .then(|| {
                global::set_text_map_propagator(TraceContextPropagator::new());
                otel::build_tracer_provider(observability)
            })
            .transpose()?;

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        info!(
            otel_enabled = observability.otel_enabled,
            parent_propagation = observability.parent_propagation_enabled(),
            "observability initialised"
        );
        debug!(?config, "loaded server configuration");

        Ok(Self { tracer_provider })
    }

    /// Flush pending spans before the process exits.
    pub(crate) fn shutdown(self) {
        let Some(provider) = self.tracer_provider else {
            return;
        };

        if let Err(source) = provider.shutdown() {
            error!("failed to shutdown tracer provider: {source}");
        }
    }
}
