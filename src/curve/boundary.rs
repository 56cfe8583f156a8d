//! Função de fronteira da curva, sua inversa e a derivada.
//!
//! Ramo-x ancorado no equilíbrio `(x0, y0)` com concentração `c`:
//!
//! `f(x) = y0 + px·(x0 − x)·(c·x + (1 − c)·x0) / (x · py)`   para `0 < x ≤ x0`
//!
//! O ramo-y é a mesma função com eixos e preços trocados.
//! Políticas de arredondamento:
//! - `f`: ceil duas vezes (devolve o **menor** y que ainda fica sobre a curva)
//! - `f_inverse`: ceil em todos os mulDiv, raiz ceil, `+1`, teto em `x0`
//! - derivada: floor

use super::error::Result;
use super::error_catalog::CurveErrorCode;
use super::guardrails::{
    ceil_div, ensure_concentration, ensure_price, mul_div_ceil, mul_div_floor, to_wad_checked,
    wad_squared_wide, wad_wide, wide,
};
use super::sqrt::sqrt_ceil;
use super::types::{Wad, U512, WAD};
use crate::{curve_bail, curve_err};

/// Limiar de bits acima do qual `B²` é reescalado antes da raiz.
pub const SQUARE_SAFE_BITS: usize = 128;

/// Núcleo de `f` em 512 bits. Requer `0 < x ≤ x0`, `py > 0`, `c ≤ 1e18`.
/// Com entradas u128 o produto fica abaixo de 2^445.
pub(crate) fn f_wide(x: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, c: Wad) -> U512 {
    let weight = wide(c) * wide(x) + wide(WAD - c) * wide(x0);
    let v = wide(px) * wide(x0 - x) * weight;
    let v = ceil_div(v, wide(x) * wad_wide());
    wide(y0) + ceil_div(v, wide(py))
}

/// Menor `y` tal que `(x, y)` fica sobre ou acima da curva no ramo-x.
pub fn f(x: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, c: Wad) -> Result<Wad> {
    if x == 0 || x > x0 {
        return Err(curve_err!(CurveErrorCode::InvalidParameter, param => "x", value => x));
    }
    ensure_price("px", px)?;
    ensure_price("py", py)?;
    ensure_concentration("c", c)?;
    to_wad_checked(f_wide(x, px, py, x0, y0, c))
}

/// Fator de escala (potência de 2) que traz `x` para no máximo 128 bits.
pub fn compute_scale(x: U512) -> U512 {
    let bits = x.bits();
    if bits > SQUARE_SAFE_BITS {
        U512::one() << (bits - SQUARE_SAFE_BITS)
    } else {
        U512::one()
    }
}

/// Inversa de `f` no ramo-x: dado `y ≥ y0`, devolve `x ≤ x0` com `(x, y)`
/// sobre ou acima da curva.
///
/// Substituindo em `f` chega-se a `c·X² + B·X − C = 0` (escala 1e18), com
/// `B = py·(y − y0)/px − (2c − 1)·x0` e `C = (1 − c)·x0²`. Para `B ≤ 0` usa a
/// raiz `(|B| + √Δ) / 2c`; para `B > 0` a forma estável `2C / (|B| + √Δ)`,
/// que evita cancelamento.
pub fn f_inverse(y: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, c: Wad) -> Result<Wad> {
    ensure_price("px", px)?;
    ensure_price("py", py)?;
    ensure_concentration("c", c)?;
    if y < y0 {
        curve_bail!(CurveErrorCode::InvalidParameter, param => "y", value => y);
    }
    if x0 == 0 {
        return Ok(0);
    }

    let one = wad_wide();
    let c_w = wide(c);
    let x0_w = wide(x0);

    // term1 = py·1e18·(y − y0) / px   (escala 1e36)
    let term1 = mul_div_ceil(wide(py) * one, wide(y - y0), wide(px))?;

    // term2 = (2c − 1e18)·x0, com sinal   (escala 1e36)
    let two_c = c_w * U512::from(2u8);
    let (term2_negative, term2_abs) = if two_c >= one {
        (false, (two_c - one) * x0_w)
    } else {
        (true, (one - two_c) * x0_w)
    };

    // B = (term1 − term2) / 1e18, truncando para zero como divisão com sinal
    let (diff_negative, diff_abs) = if term2_negative {
        (false, term1 + term2_abs)
    } else if term1 >= term2_abs {
        (false, term1 - term2_abs)
    } else {
        (true, term2_abs - term1)
    };
    let abs_b = diff_abs / one;
    let b_positive = !diff_negative && !abs_b.is_zero();

    let c_quad = mul_div_ceil(one - c_w, x0_w * x0_w, one)?; // escala 1e36
    let four_ac = mul_div_ceil(c_w * U512::from(4u8), c_quad, one)?;

    let sqrt = if abs_b < wad_squared_wide() {
        sqrt_ceil(abs_b * abs_b + four_ac)?
    } else {
        // B² não cabe com folga: reescala por 2^k antes da raiz
        let scale = compute_scale(abs_b);
        tracing::trace!(bits = abs_b.bits(), "f_inverse: caminho reescalado");
        let squared_b = mul_div_ceil(abs_b / scale, abs_b, scale)?;
        let discriminant = squared_b + four_ac / (scale * scale);
        sqrt_ceil(discriminant)? * scale
    };

    let x = if !b_positive && c != 0 {
        mul_div_ceil(abs_b + sqrt, one, two_c)? + U512::one()
    } else {
        ceil_div(c_quad * U512::from(2u8), abs_b + sqrt) + U512::one()
    };

    if x >= x0_w { Ok(x0) } else { Ok(x.low_u128()) }
}

/// `−df/dx` no ramo-x (sempre positivo): preço marginal em escala 1e18.
///
/// `px · (c + (1 − c)·(x0/x)²) / py`, com `(x0/x)²` em 1e18 dividido duas vezes.
pub fn neg_df_dx(x: Wad, px: Wad, py: Wad, x0: Wad, c: Wad) -> Result<U512> {
    if x == 0 {
        curve_bail!(CurveErrorCode::InvalidParameter, param => "reserve", value => 0);
    }
    ensure_price("py", py)?;
    ensure_concentration("c", c)?;
    let one = wad_wide();
    let r = (wide(x0) * wide(x0) / wide(x)) * one / wide(x);
    let inner = wide(c) + wide(WAD - c) * r / one;
    mul_div_floor(wide(px), inner, wide(py))
}

// -------------------------
// TESTES (WAD-scaled)
// -------------------------
#[cfg(test)]
mod tests {
    use super::*;

    const E18: Wad = WAD;

    #[test]
    fn t_f_full_concentration_is_linear() {
        // c = 1: y = y0 + px·(x0 − x)/py
        let y = f(100 * E18, E18, E18, 200 * E18, 50 * E18, E18).unwrap();
        assert_eq!(y, 150 * E18);
    }

    #[test]
    fn t_f_at_equilibrium_returns_y0() {
        let y = f(1_000, 3 * E18, E18, 1_000, 777, E18 / 10).unwrap();
        assert_eq!(y, 777);
    }

    #[test]
    fn t_f_rounds_up() {
        // px=py=1, x0=3, x=2, c=0: (3 − 2)·3e18 / (2·1e18) = 1.5 → 2
        let y = f(2, 1, 1, 3, 0, 0).unwrap();
        assert_eq!(y, 2);
    }

    #[test]
    fn t_f_rejects_out_of_branch() {
        assert_eq!(f(0, E18, E18, 10, 10, 0).unwrap_err().code, CurveErrorCode::InvalidParameter);
        assert_eq!(f(11, E18, E18, 10, 10, 0).unwrap_err().code, CurveErrorCode::InvalidParameter);
        assert_eq!(f(5, E18, 0, 10, 10, 0).unwrap_err().code, CurveErrorCode::InvalidParameter);
        assert_eq!(f(5, E18, E18, 10, 10, E18 + 1).unwrap_err().code, CurveErrorCode::InvalidParameter);
    }

    #[test]
    fn t_f_overflow_reported() {
        // x minúsculo, x0 enorme, c=0: y ≈ px·x0²/(x·py) estoura u128
        let err = f(1, E18, 1, u128::MAX, 0, 0).unwrap_err();
        assert_eq!(err.code, CurveErrorCode::OverflowNumeric);
    }

    #[test]
    fn t_f_inverse_reference_vector() {
        let x = f_inverse(
            350 * E18,
            1_300_000_000_000_000_000,
            E18,
            170 * E18,
            100 * E18,
            E18 / 10,
        )
        .unwrap();
        assert_eq!(x, 77_399_734_182_972_528_597);
    }

    #[test]
    fn t_f_inverse_roundtrip_mid_concentration() {
        let (px, py, x0, y0, c) = (2 * E18, 3 * E18, 50_000 * E18, 10_000 * E18, E18 / 2);
        let x = 12_345 * E18 / 100;
        let y = f(x, px, py, x0, y0, c).unwrap();
        let back = f_inverse(y, px, py, x0, y0, c).unwrap();
        assert!(back >= x && back - x <= 1, "x={} back={}", x, back);
    }

    #[test]
    fn t_f_inverse_at_y0_is_x0() {
        assert_eq!(f_inverse(500, E18, E18, 1_000, 500, E18 / 3).unwrap(), 1_000);
    }

    #[test]
    fn t_f_inverse_zero_concentration_uses_stable_form() {
        let (px, py, x0, y0) = (E18, E18, 1_000_000u128, 1_000_000u128);
        let y = f(250_000, px, py, x0, y0, 0).unwrap();
        let x = f_inverse(y, px, py, x0, y0, 0).unwrap();
        assert!(x <= x0);
        assert!(f(x, px, py, x0, y0, 0).unwrap() <= y);
    }

    #[test]
    fn t_f_inverse_rejects_other_branch() {
        let err = f_inverse(10, E18, E18, 100, 11, 0).unwrap_err();
        assert_eq!(err.code, CurveErrorCode::InvalidParameter);
    }

    #[test]
    fn t_f_inverse_zero_x0() {
        assert_eq!(f_inverse(10, E18, E18, 0, 5, 0).unwrap(), 0);
    }

    #[test]
    fn t_compute_scale() {
        assert_eq!(compute_scale(U512::one() << 127), U512::one());
        assert_eq!(compute_scale(wide(u128::MAX)), U512::one());
        assert_eq!(compute_scale(U512::one() << 128), U512::from(2u8));
        assert_eq!(compute_scale(U512::one() << 130), U512::from(8u8));
    }

    #[test]
    fn t_neg_df_dx_reference() {
        // r = (200/100)² = 4 → 0.1 + 0.9·4 = 3.7
        let d = neg_df_dx(100 * E18, E18, E18, 200 * E18, E18 / 10).unwrap();
        assert_eq!(d, wide(3_700_000_000_000_000_000));
    }

    #[test]
    fn t_neg_df_dx_zero_reserve() {
        let err = neg_df_dx(0, E18, E18, 10, 0).unwrap_err();
        assert_eq!(err.code, CurveErrorCode::InvalidParameter);
    }
}
