//! Validações e helpers numéricos seguros para a curva.
//! Objetivo: entradas validadas antes da conta e divisões com direção de
//! arredondamento explícita (floor/ceil), sem estouro.

use super::error::Result;
use super::error_catalog::CurveErrorCode;
use super::types::{Wad, MAX_CONCENTRATION, U512, WAD};
use crate::curve_err;

#[inline]
pub fn ensure_price(name: &str, price: Wad) -> Result<()> {
    if price == 0 {
        return Err(curve_err!(CurveErrorCode::InvalidParameter, param => name, value => price));
    }
    Ok(())
}

#[inline]
pub fn ensure_concentration(name: &str, c: Wad) -> Result<()> {
    if c > MAX_CONCENTRATION {
        return Err(curve_err!(CurveErrorCode::InvalidParameter, param => name, value => c));
    }
    Ok(())
}

#[inline]
pub fn wide(v: Wad) -> U512 { U512::from(v) }

#[inline]
pub fn wad_wide() -> U512 { U512::from(WAD) }

/// 1e36, escala dos termos quadráticos.
#[inline]
pub fn wad_squared_wide() -> U512 { wad_wide() * wad_wide() }

/// `ceil(n / d)`, assumindo d > 0
#[inline]
pub fn ceil_div(n: U512, d: U512) -> U512 {
    let q = n / d;
    if (q * d) < n { q + U512::one() } else { q }
}

/// `ceil(a * b / d)` com produto em 512 bits (mulDiv com arredondamento para cima).
#[inline]
pub fn mul_div_ceil(a: U512, b: U512, d: U512) -> Result<U512> {
    if d.is_zero() {
        return Err(curve_err!(CurveErrorCode::OverflowNumeric, op => "mul_div_ceil"));
    }
    let (product, overflow) = a.overflowing_mul(b);
    if overflow {
        return Err(curve_err!(CurveErrorCode::OverflowNumeric, op => "mul_div_ceil"));
    }
    Ok(ceil_div(product, d))
}

/// Versão floor (divisão inteira comum) com checagem de divisor.
#[inline]
pub fn mul_div_floor(a: U512, b: U512, d: U512) -> Result<U512> {
    if d.is_zero() {
        return Err(curve_err!(CurveErrorCode::OverflowNumeric, op => "mul_div_floor"));
    }
    let (product, overflow) = a.overflowing_mul(b);
    if overflow {
        return Err(curve_err!(CurveErrorCode::OverflowNumeric, op => "mul_div_floor"));
    }
    Ok(product / d)
}

/// Downcast U512 → u128 com checagem.
#[inline]
pub fn to_wad_checked(v: U512) -> Result<Wad> {
    if v > wide(u128::MAX) {
        Err(curve_err!(CurveErrorCode::OverflowNumeric, value => v))
    } else {
        Ok(v.low_u128())
    }
}
