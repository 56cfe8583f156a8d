pub mod types;
pub mod guardrails;
pub mod sqrt;
pub mod boundary;
pub mod verify;
pub mod pricing;
pub mod model;
pub mod ref_golden;    // Oráculo BigRational (testes/goldens)

// módulos unificados de erro
pub mod error_catalog;
pub mod error;
pub mod error_map;

pub use boundary::{f, f_inverse};
pub use error::{CurveError, Result};
pub use error_catalog::CurveErrorCode;
pub use model::CurveModel;
pub use pricing::{compute_price_fraction, compute_price_fraction_f64, get_current_price};
pub use types::{PoolCurveParams, ReservePoint, Wad, WAD};
pub use verify::{tighten_to_curve, verify, verify_on_curve_exact, verify_point};
