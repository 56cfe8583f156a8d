//! Raiz quadrada inteira (Newton) sobre U512.
//! - `isqrt`: **floor**
//! - `sqrt_ceil`: **ceil** (usada na inversão da curva)

use super::error::Result;
use super::error_catalog::CurveErrorCode;
use super::types::U512;
use crate::curve_err;

/// Limite de iterações de Newton; com o chute inicial acima da raiz bastam ~10.
pub const MAX_NEWTON_ITERATIONS: usize = 128;

/// `floor(sqrt(n))`.
///
/// Parte de `2^ceil(bits/2)`, que é ≥ sqrt(n), e itera
/// `x ← (x + n/x) / 2` enquanto o iterado decresce; o primeiro iterado que
/// não decresce é o floor da raiz.
pub fn isqrt(n: U512) -> Result<U512> {
    if n < U512::from(2u8) {
        return Ok(n);
    }
    let mut x0 = U512::one() << ((n.bits() + 1) / 2);
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let x1 = (x0 + n / x0) >> 1;
        if x1 >= x0 {
            return Ok(x0);
        }
        x0 = x1;
    }
    tracing::warn!(bits = n.bits(), "isqrt excedeu o limite de iterações");
    Err(curve_err!(CurveErrorCode::NonConvergence, op => "isqrt"))
}

/// `ceil(sqrt(n))`.
pub fn sqrt_ceil(n: U512) -> Result<U512> {
    let r = isqrt(n)?;
    if r * r < n { Ok(r + U512::one()) } else { Ok(r) }
}
