//! OpenTelemetry tracer provider setup.

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig as _;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

const SERVICE_NAMESPACE: &str = "stampbook";

pub(super) fn build_tracer_provider(
    observability: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(observability.otel_exporter_otlp_endpoint.clone())
        .with_timeout(observability.exporter_timeout())
        .build()?;

    // Honour an upstream sampling decision, otherwise sample by trace id.
    let sampler = Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
        observability.sample_ratio(),
    )));

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(observability))
        .with_batch_exporter(exporter)
        .build())
}

fn resource(observability: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(observability.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.namespace", SERVICE_NAMESPACE),
            KeyValue::new("service.version", observability.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                observability.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}
