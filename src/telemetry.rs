use anyhow::Result;
use std::time::Duration;

use opentelemetry::{
    global,
    metrics::{Histogram, Meter, MeterProvider},
    trace::TracerProvider as _,
    KeyValue,
};
use opentelemetry_otlp::{MetricExporter, Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    metrics::{PeriodicReader, SdkMeterProvider},
    resource::Resource,
    trace::SdkTracerProvider,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, Registry};

use crate::obs::tracingx::filter_from_env;

pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4318";
const METER_NAME: &str = "pool_curve_core";

/// Configuração de exportação lida do ambiente uma única vez.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub traces_endpoint: String,
    pub metrics_endpoint: String,
    pub commit_sha: String,
    pub metrics_interval: Duration,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Mesmo que `from_env`, com a fonte das variáveis injetada.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_string());
        let base = base.trim_end_matches('/');
        Self {
            traces_endpoint: lookup("OTEL_EXPORTER_OTLP_TRACES_ENDPOINT")
                .unwrap_or_else(|| format!("{}/v1/traces", base)),
            metrics_endpoint: lookup("OTEL_EXPORTER_OTLP_METRICS_ENDPOINT")
                .unwrap_or_else(|| format!("{}/v1/metrics", base)),
            commit_sha: lookup("CURVE_COMMIT_SHA").unwrap_or_else(|| "unknown".into()),
            metrics_interval: Duration::from_secs(10),
        }
    }
}

pub struct Telemetry {
    pub tracer_provider: SdkTracerProvider,
    pub meter_provider: SdkMeterProvider,
    pub meter: Meter,
    pub curve_op_latency_ms: Histogram<f64>,
    pub tighten_probes: Histogram<u64>,
}

impl Telemetry {
    pub fn shutdown(&self) {
        let _ = self.meter_provider.force_flush();
        let _ = self.meter_provider.shutdown();
        let _ = self.tracer_provider.shutdown();
    }
}

pub fn init(service_name: &str) -> Result<Telemetry> {
    init_with(service_name, &TelemetryConfig::from_env())
}

pub fn init_with(service_name: &str, config: &TelemetryConfig) -> Result<Telemetry> {
    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", service_name.to_string()),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("git.commit.sha", config.commit_sha.clone()),
        ])
        .build();

    // ---- Traces (OTLP/HTTP) ----
    let span_exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(config.traces_endpoint.clone())
        .build()?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();

    let tracer = tracer_provider.tracer(service_name.to_string());

    // ---- Métricas (OTLP/HTTP) ----
    let metric_exporter = MetricExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(config.metrics_endpoint.clone())
        .build()?;

    let reader = PeriodicReader::builder(metric_exporter)
        .with_interval(config.metrics_interval)
        .build();

    let meter_provider = SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build();

    // Globais
    global::set_tracer_provider(tracer_provider.clone());
    global::set_meter_provider(meter_provider.clone());

    // tracing -> OTel
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let subscriber = Registry::default()
        .with(filter_from_env())
        .with(fmt_layer)
        .with(otel_layer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("subscriber global já instalado; mantendo o existente");
    }

    // Instrumentos (histogramas)
    let meter = meter_provider.meter(METER_NAME);
    let curve_op_latency_ms = meter
        .f64_histogram("curve_op_latency_ms")
        .with_unit("ms")
        .with_description("Latency of curve operations in ms")
        .build();
    let tighten_probes = meter
        .u64_histogram("tighten_probes")
        .with_unit("1")
        .with_description("Verification probes spent per tightening call")
        .build();

    Ok(Telemetry { tracer_provider, meter_provider, meter, curve_op_latency_ms, tighten_probes })
}

/// Cria um `Span` INFO com nome **estático** (exigência do tracing) e
/// coloca o nome dinâmico em `span_name`. Inclui `git_commit_sha`.
pub fn make_info_span(name: &str, op_id: u32, component: &str) -> tracing::Span {
    let commit = std::env::var("CURVE_COMMIT_SHA").unwrap_or_else(|_| "unknown".into());
    tracing::span!(
        target: "pool_curve_core",
        Level::INFO,
        "op",
        git_commit_sha = %commit,
        span_name = %name,
        op_id = op_id,
        component = component
    )
}
