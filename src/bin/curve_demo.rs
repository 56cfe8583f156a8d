use anyhow::Result;
use opentelemetry::KeyValue;
use std::time::Instant;

use pool_curve_core::curve::types::{PoolCurveParams, ReservePoint, WAD};
use pool_curve_core::obs::{tracingx, wrap};
use pool_curve_core::session::{InMemoryPoolReader, Session};
use pool_curve_core::telemetry::{self, Telemetry};

const POOL: &str = "0x0000000000000000000000000000000000c0ffee";

fn otel_disabled() -> bool {
    std::env::var("OTEL_SDK_DISABLED").map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn main() -> Result<()> {
    // sem collector: só logs no terminal
    let tel: Option<Telemetry> = if otel_disabled() {
        tracingx::init_fmt();
        None
    } else {
        Some(telemetry::init("pool-curve-core")?)
    };

    let params = PoolCurveParams::new(1_000_000, 1_000_000, 1_000_000, 1_000_000, WAD / 10, WAD / 10)?;
    let reader = InMemoryPoolReader::new().with_pool(POOL, params, ReservePoint::new(600_000, 2_000_000));
    let session = Session::for_network_key("devland", reader)?;
    let model = session.curve_model(POOL)?;

    let candidates = [
        ReservePoint::new(600_000, 2_000_000),
        ReservePoint::new(2_000_000, 600_000),
        ReservePoint::new(1_000_000, 1_000_000),
    ];

    for (i, point) in candidates.iter().enumerate() {
        let span = telemetry::make_info_span("tighten", i as u32, "curve_demo");
        let _guard = span.enter();

        let t0 = Instant::now();
        let outcome = wrap::time_result("tighten", || model.tighten_with_probes(*point))?;
        let tight = ReservePoint::new(outcome.x, outcome.y);
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        let price = wrap::time_result("current_price", || model.current_price(tight))?;

        if let Some(tel) = &tel {
            tel.curve_op_latency_ms.record(elapsed_ms, &[KeyValue::new("op", "tighten")]);
            tel.tighten_probes.record(outcome.probes as u64, &[KeyValue::new("op", "tighten")]);
        }
        tracing::info!(
            x = point.x,
            y = point.y,
            x_tight = tight.x,
            y_tight = tight.y,
            probes = outcome.probes,
            price = price,
            "ponto apertado"
        );
    }

    let snap = session.snapshot(POOL)?;
    tracing::info!(network = %session.network().name, on_curve = snap.on_curve, price = ?snap.price, "snapshot");

    if let Some(tel) = tel {
        tel.shutdown();
    }
    Ok(())
}
