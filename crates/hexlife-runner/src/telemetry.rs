//! Logging and OpenTelemetry setup for the runner.

use anyhow::Result;
use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    runtime,
    trace::{Config, RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SERVICE_NAME: &str = "hexlife-runner";

pub fn init_telemetry(otel_endpoint: Option<&str>) -> Result<()> {
    // Standard OTEL variable wins over the config file
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .or_else(|| otel_endpoint.map(|s| s.to_string()));

    let tracer_provider = match endpoint.as_deref() {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .build()?;

            let service_name = std::env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

            TracerProvider::builder()
                .with_batch_exporter(exporter, runtime::Tokio)
                .with_config(
                    Config::default()
                        .with_sampler(Sampler::AlwaysOn)
                        .with_id_generator(RandomIdGenerator::default())
                        .with_resource(Resource::new(vec![
                            KeyValue::new(SERVICE_NAME, service_name),
                            KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
                        ])),
                )
                .build()
        }
        None => TracerProvider::builder()
            .with_config(Config::default().with_sampler(Sampler::AlwaysOff))
            .build(),
    };

    global::set_tracer_provider(tracer_provider.clone());

    let telemetry_layer =
        tracing_opentelemetry::layer().with_tracer(tracer_provider.tracer(DEFAULT_SERVICE_NAME));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hexlife_runner=debug,hexlife_world=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(telemetry_layer)
        .init();

    match endpoint {
        Some(endpoint) => info!("Exporting traces to OTLP endpoint {}", endpoint),
        None => info!("OpenTelemetry disabled (no endpoint configured)"),
    }

    Ok(())
}

pub fn shutdown_telemetry() {
    info!("Shutting down telemetry");
    global::shutdown_tracer_provider();
}
