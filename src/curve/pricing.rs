//! Preço marginal nas reservas atuais e conversão de preço digitado
//! em fração inteira (priceX, priceY) para criação de pools.

use super::boundary::neg_df_dx;
use super::error::Result;
use super::error_catalog::CurveErrorCode;
use super::guardrails::{to_wad_checked, wad_squared_wide, wad_wide, wide};
use super::types::{PoolCurveParams, Wad, U256, WAD};
use crate::{curve_bail, curve_err};

/// Maior expoente com `10^d` representável em u128.
pub const MAX_TOKEN_DECIMALS: u8 = 38;

// --------- Preço marginal ---------
/// Preço instantâneo (token1 por token0) em escala 1e18.
///
/// - `reserve0 == x0`: forma fechada no vértice, `px·1e18/py`
/// - `reserve0 < x0`: `−df/dx` no ramo-x em `reserve0`
/// - `reserve0 > x0`: `−df/dy` no ramo-y em `reserve1`, invertido (`1e36/p`)
pub fn get_current_price(params: &PoolCurveParams, reserve0: Wad, reserve1: Wad) -> Result<Wad> {
    params.validate()?;
    let (px, py) = (params.price_x, params.price_y);

    if reserve0 <= params.equilibrium_reserve0 {
        if reserve0 == params.equilibrium_reserve0 {
            return to_wad_checked(wide(px) * wad_wide() / wide(py));
        }
        let slope = neg_df_dx(reserve0, px, py, params.equilibrium_reserve0, params.concentration_x)?;
        return to_wad_checked(slope);
    }

    let slope = neg_df_dx(reserve1, py, px, params.equilibrium_reserve1, params.concentration_y)?;
    if slope.is_zero() {
        // preço ilimitado: inclinação arredondou para zero
        curve_bail!(CurveErrorCode::OverflowNumeric, op => "get_current_price", reserve1 => reserve1);
    }
    let price = wad_squared_wide() / slope;
    if price.is_zero() {
        // inclinação acima de 1e36: o preço não tem representação em 1e18
        curve_bail!(CurveErrorCode::OverflowNumeric, op => "get_current_price", reserve1 => reserve1);
    }
    to_wad_checked(price)
}

// --------- Fração de preço ---------
#[inline]
fn pow10(decimals: u8, name: &str) -> Result<U256> {
    if decimals > MAX_TOKEN_DECIMALS {
        curve_bail!(CurveErrorCode::InvalidParameter, param => name, value => decimals);
    }
    Ok(U256::from(10u8).pow(U256::from(decimals)))
}

/// Versão numérica de [`compute_price_fraction`].
///
/// Para `p < 1` a razão é invertida antes da escala 1e18, evitando truncar
/// a parte fracionária; o resultado satisfaz
/// `priceX / priceY · 10^(decimals0 − decimals1) ≈ p`.
pub fn compute_price_fraction_f64(price: f64, decimals0: u8, decimals1: u8) -> Result<(Wad, Wad)> {
    if !price.is_finite() || price <= 0.0 {
        curve_bail!(CurveErrorCode::InvalidPriceInput, input => price);
    }
    let (p, inverted) = if price < 1.0 { (1.0 / price, true) } else { (price, false) };

    let scaled = (p * 1e18).floor();
    if !scaled.is_finite() || scaled >= u128::MAX as f64 {
        curve_bail!(CurveErrorCode::OverflowNumeric, op => "compute_price_fraction", input => price);
    }
    let price18 = U256::from(scaled as u128);
    let one = U256::from(WAD);

    let mut out = [pow10(decimals1, "decimals1")?, pow10(decimals0, "decimals0")?];
    if inverted {
        out[1] = out[1] * price18 / one;
    } else {
        out[0] = out[0] * price18 / one;
    }

    let narrow = |v: U256| -> Result<Wad> {
        if v.bits() > 128 {
            Err(curve_err!(CurveErrorCode::OverflowNumeric, op => "compute_price_fraction", value => v))
        } else {
            Ok(v.low_u128())
        }
    };
    Ok((narrow(out[0])?, narrow(out[1])?))
}

/// Converte um preço decimal digitado em `(priceX, priceY)` inteiros
/// escalados pelos decimais de cada token.
pub fn compute_price_fraction(price: &str, decimals0: u8, decimals1: u8) -> Result<(Wad, Wad)> {
    let trimmed = price.trim();
    let parsed: f64 = trimmed
        .parse()
        .map_err(|_| curve_err!(CurveErrorCode::InvalidPriceInput, input => trimmed))?;
    compute_price_fraction_f64(parsed, decimals0, decimals1)
}
