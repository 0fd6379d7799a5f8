//! # Payments Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging and (optionally) OpenTelemetry export
//! - Initialize the repository adapter
//! - Create the payment service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;

use config::{Config, LogFormat};

/// OpenTelemetry providers that must be flushed on exit.
struct Telemetry {
    tracer: sdktrace::Tracer,
    tracer_provider: sdktrace::SdkTracerProvider,
    meter_provider: SdkMeterProvider,
}

fn init_telemetry(endpoint: &str) -> anyhow::Result<Telemetry> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let tracer_provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .build();
    global::set_tracer_provider(tracer_provider.clone());

    let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let meter_provider = SdkMeterProvider::builder()
        .with_periodic_exporter(metric_exporter)
        .build();
    global::set_meter_provider(meter_provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok(Telemetry {
        tracer: tracer_provider.tracer("payments-service"),
        tracer_provider,
        meter_provider,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    let telemetry = config
        .otlp_endpoint
        .as_deref()
        .map(init_telemetry)
        .transpose()?;
    let otel_layer = telemetry
        .as_ref()
        .map(|t| tracing_opentelemetry::layer().with_tracer(t.tracer.clone()));

    let (json_layer, pretty_layer) = match config.log_format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Pretty => (None, Some(tracing_subscriber::fmt::layer())),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,payments_app=debug,payments_hex=debug".into()),
        )
        .with(json_layer)
        .with(pretty_layer)
        .with(otel_layer)
        .init();

    tracing::info!("Starting payments server on port {}", config.port);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;
    tracing::info!("Using {} payment store", repo.backend());

    // Create the payment service
    let service = PaymentService::new(repo);

    // Create and run the HTTP server
    let mut server = HttpServer::new(service);
    if telemetry.is_some() {
        server = server.with_metrics();
    }
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure telemetry is flushed before exit
    if let Some(t) = telemetry {
        let _ = t.tracer_provider.shutdown();
        let _ = t.meter_provider.shutdown();
    }
    Ok(())
}
