//! Referência de alta precisão ("goldens") baseada em **BigInt/BigRational**
//! para a curva assimétrica de dois ramos.
//!
//! Objetivos desta referência:
//! 1. Calcular `f`, a inversa e o preço marginal **contínuos/exatos** (sem
//!    quantização).
//! 2. Reproduzir a **política de arredondamento** do core (ceil duas vezes em
//!    `f`) com BigUint, como **oráculo de validação** independente do U512.
//! 3. Medir o desvio do core em relação ao contínuo.
//!
//! Não entra no caminho de produção; serve a testes e geração de goldens.

use super::boundary::{f, f_inverse};
use super::error::Result;
use super::error_catalog::CurveErrorCode;
use super::pricing::get_current_price;
use super::types::{PoolCurveParams, Wad, WAD};
use crate::{curve_bail, curve_err};

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

// -------------------------
// Helpers de conversão & arredondamento
// -------------------------
#[inline]
fn bu(v: Wad) -> BigUint { BigUint::from(v) }
#[inline]
fn bi(v: Wad) -> BigInt { BigInt::from(v) }
#[inline]
fn q(v: Wad) -> BigRational { BigRational::from_integer(bi(v)) }
#[inline]
fn q_frac(n: Wad, d: Wad) -> BigRational { BigRational::new(bi(n), bi(d)) }

fn ceil_div_big(n: &BigUint, d: &BigUint) -> BigUint {
    let (quot, rem) = n.div_rem(d);
    if rem.is_zero() { quot } else { quot + BigUint::one() }
}

#[inline]
fn floor_rat_to_u128(r: &BigRational) -> Result<u128> {
    r.floor().to_integer().to_u128().ok_or_else(|| curve_err!(CurveErrorCode::OverflowNumeric, op => "ref_golden"))
}

#[inline]
fn ceil_rat_to_u128(r: &BigRational) -> Result<u128> {
    r.ceil().to_integer().to_u128().ok_or_else(|| curve_err!(CurveErrorCode::OverflowNumeric, op => "ref_golden"))
}

fn ensure_branch(x: Wad, x0: Wad, py: Wad, c: Wad) -> Result<()> {
    if x == 0 || x > x0 || py == 0 || c > WAD {
        curve_bail!(CurveErrorCode::InvalidParameter, param => "x", value => x);
    }
    Ok(())
}

// -------------------------
// Contínuo/exato (sem quantização)
// -------------------------
/// `f` contínuo: `y0 + px·(x0 − x)·(c·x + (1 − c)·x0) / (x·py)` com `c` em fração de 1e18.
pub fn continuous_f(x: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, c: Wad) -> Result<BigRational> {
    ensure_branch(x, x0, py, c)?;
    let c_q = q_frac(c, WAD);
    let weight = c_q.clone() * q(x) + (BigRational::one() - c_q) * q(x0);
    let v = q(px) * q(x0 - x) * weight / (q(x) * q(py));
    Ok(q(y0) + v)
}

/// `−df/dx` contínuo: `px·(c + (1 − c)·(x0/x)²) / py`, em escala 1e18.
pub fn continuous_neg_df_dx(x: Wad, px: Wad, py: Wad, x0: Wad, c: Wad) -> Result<BigRational> {
    if x == 0 || py == 0 {
        curve_bail!(CurveErrorCode::InvalidParameter, param => "reserve", value => x);
    }
    let c_q = q_frac(c, WAD);
    let ratio = q_frac(x0, x);
    let slope = q(px) * (c_q.clone() + (BigRational::one() - c_q) * ratio.clone() * ratio) / q(py);
    Ok(slope * q(WAD))
}

/// Preço marginal contínuo nos mesmos ramos de `get_current_price`.
pub fn continuous_price(params: &PoolCurveParams, reserve0: Wad, reserve1: Wad) -> Result<BigRational> {
    let p = params;
    if reserve0 <= p.equilibrium_reserve0 {
        if reserve0 == p.equilibrium_reserve0 {
            return Ok(q_frac(p.price_x, p.price_y) * q(WAD));
        }
        return continuous_neg_df_dx(reserve0, p.price_x, p.price_y, p.equilibrium_reserve0, p.concentration_x);
    }
    let slope = continuous_neg_df_dx(reserve1, p.price_y, p.price_x, p.equilibrium_reserve1, p.concentration_y)?;
    if slope.is_zero() {
        curve_bail!(CurveErrorCode::OverflowNumeric, op => "continuous_price");
    }
    Ok(q(WAD) * q(WAD) / slope)
}

/// Menor `x` inteiro em `[1, x0]` com `f` contínuo `≤ y` (busca binária exata).
pub fn exact_min_x(y: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, c: Wad) -> Result<Wad> {
    if y < y0 || x0 == 0 {
        curve_bail!(CurveErrorCode::InvalidParameter, param => "y", value => y);
    }
    let target = q(y);
    let (mut lo, mut hi) = (1u128, x0);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if continuous_f(mid, px, py, x0, y0, c)? <= target {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Ok(lo)
}

// -------------------------
// Política (replica o core em Big-precision)
// -------------------------
/// `f` com a política do core: divide por `x·1e18` com ceil, depois por `py` com ceil.
pub fn policy_f(x: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, c: Wad) -> Result<Wad> {
    ensure_branch(x, x0, py, c)?;
    let weight = bu(c) * bu(x) + bu(WAD - c) * bu(x0);
    let v = bu(px) * bu(x0 - x) * weight;
    let v = ceil_div_big(&v, &(bu(x) * bu(WAD)));
    let y = bu(y0) + ceil_div_big(&v, &bu(py));
    y.to_u128().ok_or_else(|| curve_err!(CurveErrorCode::OverflowNumeric, op => "policy_f"))
}

// -------------------------
// Estruturas de comparação (goldens)
// -------------------------
#[derive(Debug, Clone)]
pub struct RefF {
    pub y_core: Wad,
    pub y_policy: Wad,
    pub y_cont_ceil: Wad,
    pub y_cont: BigRational,
}

#[derive(Debug, Clone)]
pub struct RefInverse {
    pub x_core: Wad,
    /// Menor x inteiro sobre/acima da curva contínua.
    pub x_exact_min: Wad,
}

#[derive(Debug, Clone)]
pub struct RefPrice {
    pub price_core: Wad,
    pub price_cont: BigRational,
    /// `|core − contínuo| / contínuo`
    pub rel_err: BigRational,
}

/// Compara o **core** com a referência para `f`.
pub fn golden_f(x: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, c: Wad) -> Result<RefF> {
    let y_core = f(x, px, py, x0, y0, c)?;
    let y_policy = policy_f(x, px, py, x0, y0, c)?;
    let y_cont = continuous_f(x, px, py, x0, y0, c)?;
    let y_cont_ceil = ceil_rat_to_u128(&y_cont)?;
    Ok(RefF { y_core, y_policy, y_cont_ceil, y_cont })
}

/// Compara a inversa do **core** com a busca exata.
pub fn golden_inverse(y: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, c: Wad) -> Result<RefInverse> {
    let x_core = f_inverse(y, px, py, x0, y0, c)?;
    let x_exact_min = exact_min_x(y, px, py, x0, y0, c)?;
    Ok(RefInverse { x_core, x_exact_min })
}

/// Compara o preço marginal do **core** com o contínuo.
pub fn golden_price(params: &PoolCurveParams, reserve0: Wad, reserve1: Wad) -> Result<RefPrice> {
    let price_core = get_current_price(params, reserve0, reserve1)?;
    let price_cont = continuous_price(params, reserve0, reserve1)?;
    if price_cont.is_zero() {
        curve_bail!(CurveErrorCode::OverflowNumeric, op => "golden_price");
    }
    let rel_err = ((q(price_core) - price_cont.clone()) / price_cont.clone()).abs();
    Ok(RefPrice { price_core, price_cont, rel_err })
}

/// Conveniência para asserts: floor do `f` contínuo.
pub fn continuous_f_floor(x: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, c: Wad) -> Result<Wad> {
    floor_rat_to_u128(&continuous_f(x, px, py, x0, y0, c)?)
}

// -------------------------
// TESTES (sanidade & igualdade policy==core)
// -------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_policy_matches_core_f() {
        let g = golden_f(500_000, 1_000_000, 1_000_000, 1_000_000, 1_000_000, WAD / 10).unwrap();
        assert_eq!(g.y_core, g.y_policy);
        assert_eq!(g.y_core, 1_950_000);
        assert_eq!(g.y_cont_ceil, 1_950_000);
    }

    #[test]
    fn t_core_never_below_continuous() {
        let (px, py, x0, y0, c) = (3 * WAD, 7 * WAD, 1_000_003u128, 999_983u128, WAD / 3);
        for x in [1u128, 17, 4_242, 500_000, 999_999] {
            let g = golden_f(x, px, py, x0, y0, c).unwrap();
            assert!(g.y_core >= g.y_cont_ceil, "x={}", x);
            assert!(g.y_core - g.y_cont_ceil <= 1, "x={}", x);
        }
    }

    #[test]
    fn t_exact_min_x_on_equilibrium() {
        assert_eq!(exact_min_x(1_000, WAD, WAD, 500, 1_000, WAD / 2).unwrap(), 500);
    }

    #[test]
    fn t_continuous_price_at_kink() {
        let p = PoolCurveParams::new(3 * WAD, 2 * WAD, 10, 10, 0, 0).unwrap();
        let g = golden_price(&p, 10, 10).unwrap();
        assert!(g.rel_err.is_zero());
        assert_eq!(continuous_f_floor(10, WAD, WAD, 10, 4, 0).unwrap(), 4);
    }
}
