use once_cell::sync::OnceCell;
use opentelemetry::metrics::Histogram;
use opentelemetry::{global, KeyValue};
use std::time::Instant;

use crate::curve::error::Result;

static HIST: OnceCell<Histogram<f64>> = OnceCell::new();

fn histogram() -> Histogram<f64> {
    HIST.get_or_init(|| {
        let meter = global::meter("obs.wrap");
        meter
            .f64_histogram("op_duration_seconds")
            .with_unit("s")
            .with_description("curve operation duration")
            .build()
    })
    .clone()
}

pub fn time<F, T>(op: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let out = f();
    let sec = start.elapsed().as_secs_f64();
    histogram().record(sec, &[KeyValue::new("op", op.to_string())]);
    out
}

/// Como `time`, mas rotula o resultado (`ok` ou o código `CRV-xxxx`).
pub fn time_result<F, T>(op: &str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let start = Instant::now();
    let out = f();
    let sec = start.elapsed().as_secs_f64();
    let outcome = match &out {
        Ok(_) => "ok".to_string(),
        Err(err) => {
            tracing::debug!(op, error = %err.to_log_json(), "operação da curva falhou");
            err.code.code().to_string()
        }
    };
    histogram().record(
        sec,
        &[KeyValue::new("op", op.to_string()), KeyValue::new("outcome", outcome)],
    );
    out
}
