use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    trace::{Sampler, SdkTracerProvider},
    Resource,
};
use std::env;
use tracing::info;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const SERVICE_NAME: &str = "blockchair-proxy";

/// Upstream calls are logged by the proxy itself, so reqwest stays quiet
pub const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,tower=warn,h2=error,reqwest=warn";

const DEFAULT_SAMPLING_RATE: f64 = 0.01;
const LAMBDA_COLLECTOR: &str = "http://127.0.0.1:4318";
const LOCAL_COLLECTOR: &str = "http://localhost:4318";
const TRACES_PATH: &str = "/v1/traces";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportProtocol {
    Http,
    Grpc,
}

/// Logging and trace export settings
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub otel_enabled: bool,
    pub endpoint: String,
    pub protocol: ExportProtocol,
    pub service_name: String,
    pub environment: String,
    pub sampling_rate: f64,
    pub log_filter: String,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolution order for the collector: `OTEL_EXPORTER_OTLP_TRACES_ENDPOINT`
    /// as given, then `OTEL_EXPORTER_OTLP_ENDPOINT` with the traces path
    /// appended, then the Lambda extension or a local collector.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let is_lambda = non_blank("AWS_LAMBDA_FUNCTION_NAME").is_some();

        let otel_enabled = non_blank("OTEL_ENABLED")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(is_lambda);

        let endpoint = non_blank("OTEL_EXPORTER_OTLP_TRACES_ENDPOINT")
            .or_else(|| {
                non_blank("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .map(|base| format!("{}{}", base.trim_end_matches('/'), TRACES_PATH))
            })
            .unwrap_or_else(|| {
                let collector = if is_lambda { LAMBDA_COLLECTOR } else { LOCAL_COLLECTOR };
                format!("{}{}", collector, TRACES_PATH)
            });

        // Bare host:port endpoints go to a gRPC collector
        let protocol = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            ExportProtocol::Http
        } else {
            ExportProtocol::Grpc
        };

        let sampling_rate = non_blank("OTEL_TRACE_SAMPLING_RATE")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|rate| rate.is_finite())
            .unwrap_or(DEFAULT_SAMPLING_RATE)
            .clamp(0.0, 1.0);

        Self {
            otel_enabled,
            endpoint,
            protocol,
            service_name: non_blank("OTEL_SERVICE_NAME").unwrap_or_else(|| SERVICE_NAME.to_string()),
            environment: non_blank("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            sampling_rate,
            log_filter: non_blank("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

/// Install the global subscriber: JSON logs, plus an OTLP span exporter when
/// enabled. Export failures degrade to logs only.
pub fn init_tracing(config: &TelemetryConfig) {
    let fmt_layer = fmt::layer().json().with_target(false);
    let fmt_layer = if config.otel_enabled {
        fmt_layer
    } else {
        fmt_layer.with_span_events(fmt::format::FmtSpan::CLOSE)
    };

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);

    if !config.otel_enabled {
        subscriber.init();
        return;
    }

    match tracer_provider(config) {
        Ok(provider) => {
            opentelemetry::global::set_tracer_provider(provider.clone());
            let tracer = provider.tracer(SERVICE_NAME);
            subscriber.with(OpenTelemetryLayer::new(tracer)).init();
            info!(
                endpoint = %config.endpoint,
                sampling_rate = config.sampling_rate,
                "OpenTelemetry enabled"
            );
        }
        Err(e) => {
            subscriber.init();
            tracing::error!("Failed to initialize OpenTelemetry: {}. Continuing with logs only.", e);
        }
    }
}

fn tracer_provider(config: &TelemetryConfig) -> Result<SdkTracerProvider, Box<dyn std::error::Error>> {
    let resource = Resource::builder()
        .with_attribute(KeyValue::new("service.name", config.service_name.clone()))
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .with_attribute(KeyValue::new("deployment.environment", config.environment.clone()))
        .with_attribute(KeyValue::new("upstream.provider", "blockchair"))
        .build();

    let exporter = match config.protocol {
        ExportProtocol::Http => SpanExporter::builder()
            .with_http()
            .with_endpoint(config.endpoint.as_str())
            .build()?,
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(config.endpoint.as_str())
            .build()?,
    };

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(Sampler::TraceIdRatioBased(config.sampling_rate))
        .with_batch_exporter(exporter)
        .build())
}
