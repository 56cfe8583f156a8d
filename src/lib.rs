//! Modelo numérico da curva assimétrica de dois ramos (reservas em ponto
//! fixo 1e18): verificação de pontos, aperto até a fronteira, inversão
//! quadrática e preço marginal. Sessão/eventos e telemetria ficam ao redor.

pub mod curve;
pub mod events;
pub mod obs;
pub mod session;
pub mod telemetry;

pub use curve::{
    compute_price_fraction, get_current_price, tighten_to_curve, verify, verify_on_curve_exact,
    CurveError, CurveErrorCode, CurveModel, PoolCurveParams, ReservePoint, Wad, WAD,
};
pub use events::{decode_swap_logs, SwapEvent};
pub use session::{InMemoryPoolReader, PoolReader, Session};
