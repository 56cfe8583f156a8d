use anyhow::Result;
use opentelemetry::KeyValue;
use tracing::{info, span, Level};

use pool_curve_core::curve::types::{PoolCurveParams, WAD};
use pool_curve_core::curve::verify::verify_point;
use pool_curve_core::obs::wrap;

fn main() -> Result<()> {
    let tel = pool_curve_core::telemetry::init("pool-curve-core")?;
    let span = span!(Level::INFO, "smoke_span", otel.name = "telemetry_smoke");
    let _e = span.enter();
    info!("emitindo métrica e finalizando…");

    let params = PoolCurveParams::new(WAD, WAD, 1_000, 1_000, 0, 0)?;
    let ok = wrap::time("verify", || verify_point(&params, 1_000, 1_000));
    tel.curve_op_latency_ms.record(0.0, &[KeyValue::new("op", "verify"), KeyValue::new("ok", ok)]);

    std::thread::sleep(std::time::Duration::from_millis(200));
    tel.shutdown();
    Ok(())
}
