//! # Rates Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Collect the current NBRB rates once, then every 24 hours
//! - Start the HTTP query server
//! - On shutdown, drain HTTP and stop the ingestion loop

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rates_hex::{IngestionService, RateQueryService, inbound::HttpServer};
use rates_repo::build_repo;
use rates_source::NbrbClient;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create OTLP span exporter: {e}"))?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("rates-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer()?;
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_app=debug,rates_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting rates server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = Arc::new(build_repo(&config.database_url).await?);

    // NBRB feed client
    let http = reqwest::Client::builder()
        .timeout(config.source_timeout)
        .build()?;
    let source = NbrbClient::new(http);

    // First collection must succeed before we serve anything
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ingestion = IngestionService::new(repo.clone(), source)
        .start(shutdown_rx)
        .await?;

    // Create and run the HTTP server
    let server = HttpServer::new(RateQueryService::new(repo));
    let addr = format!("0.0.0.0:{}", config.port);

    let served = server.run(&addr).await;

    // Stop the ingestion loop whether or not the server exited cleanly
    let _ = shutdown_tx.send(true);
    if let Err(e) = ingestion.await {
        tracing::error!(error = %e, "Ingestion task ended abnormally");
    }
    tracing::info!("Rates server stopped");

    // Ensure traces are flushed before exit
    let _ = otel_provider.shutdown();
    served
}
