//! `CurveModel`: parâmetros validados + API de métodos sobre as funções puras.

use super::boundary::{f, f_inverse};
use super::error::Result;
use super::error_map::{classify_point, to_error};
use super::pricing::get_current_price;
use super::types::{PoolCurveParams, ReservePoint, Wad};
use super::verify::{tighten_to_curve, tighten_with_probes, verify_on_curve_exact, verify_point, Tightened};

/// Modelo da curva de um pool. Sem estado além dos parâmetros; seguro para
/// compartilhar entre threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveModel {
    params: PoolCurveParams,
}

impl CurveModel {
    pub fn new(params: PoolCurveParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &PoolCurveParams { &self.params }

    pub fn verify(&self, point: ReservePoint) -> bool {
        verify_point(&self.params, point.x, point.y)
    }

    pub fn is_on_curve_exact(&self, point: ReservePoint) -> bool {
        verify_on_curve_exact(&self.params, point.x, point.y)
    }

    pub fn tighten(&self, point: ReservePoint) -> Result<ReservePoint> {
        tighten_to_curve(&self.params, point.x, point.y).map(ReservePoint::from)
    }

    pub fn tighten_with_probes(&self, point: ReservePoint) -> Result<Tightened> {
        tighten_with_probes(&self.params, point.x, point.y)
    }

    pub fn current_price(&self, point: ReservePoint) -> Result<Wad> {
        get_current_price(&self.params, point.x, point.y)
    }

    /// Menor `reserve1` aceito com `reserve0 ≤ x0` (ramo-x).
    pub fn min_reserve1_for(&self, reserve0: Wad) -> Result<Wad> {
        let p = &self.params;
        f(reserve0, p.price_x, p.price_y, p.equilibrium_reserve0, p.equilibrium_reserve1, p.concentration_x)
    }

    /// Menor `reserve0` aceito com `reserve1 ≤ y0` (ramo-y).
    pub fn min_reserve0_for(&self, reserve1: Wad) -> Result<Wad> {
        let p = &self.params;
        f(reserve1, p.price_y, p.price_x, p.equilibrium_reserve1, p.equilibrium_reserve0, p.concentration_y)
    }

    /// `reserve0 ≤ x0` sobre a fronteira para um `reserve1 ≥ y0` (inversão do ramo-x).
    pub fn reserve0_for(&self, reserve1: Wad) -> Result<Wad> {
        let p = &self.params;
        f_inverse(reserve1, p.price_x, p.price_y, p.equilibrium_reserve0, p.equilibrium_reserve1, p.concentration_x)
    }

    /// Valida um ajuste de reservas proposto antes de exibi-lo.
    pub fn check_reserves(&self, point: ReservePoint) -> Result<()> {
        match classify_point(&self.params, point) {
            Some(code) => Err(to_error(code).with_context("x", point.x).with_context("y", point.y)),
            None => Ok(()),
        }
    }
}

impl TryFrom<PoolCurveParams> for CurveModel {
    type Error = super::error::CurveError;

    fn try_from(params: PoolCurveParams) -> Result<Self> {
        Self::new(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::error_catalog::CurveErrorCode;
    use crate::curve::types::WAD;

    fn model() -> CurveModel {
        let params = PoolCurveParams::new(1_000_000, 1_000_000, 1_000_000, 1_000_000, WAD / 10, WAD / 10).unwrap();
        CurveModel::new(params).unwrap()
    }

    #[test]
    fn min_reserves_on_both_branches() {
        let m = model();
        assert_eq!(m.min_reserve1_for(500_000).unwrap(), 1_950_000);
        assert_eq!(m.min_reserve0_for(500_000).unwrap(), 1_950_000);
    }

    #[test]
    fn reserve0_for_inverts_min_reserve1() {
        let m = model();
        let x = m.reserve0_for(1_950_000).unwrap();
        assert!(x <= 1_000_000);
        assert!(m.verify(ReservePoint::new(x, 1_950_000)));
        assert!(x.abs_diff(500_000) <= 2, "x={}", x);
    }

    #[test]
    fn check_reserves_rejects_below_curve() {
        let m = model();
        assert!(m.check_reserves(ReservePoint::new(1_000_000, 1_000_000)).is_ok());
        let err = m.check_reserves(ReservePoint::new(500_000, 1_000_000)).unwrap_err();
        assert_eq!(err.code, CurveErrorCode::PointBelowCurve);
        assert_eq!(err.context.get("x").map(String::as_str), Some("500000"));
        assert_eq!(err.context.get("y").map(String::as_str), Some("1000000"));
    }

    #[test]
    fn tighten_returns_exact_point() {
        let m = model();
        let p = m.tighten(ReservePoint::new(600_000, 2_000_000)).unwrap();
        assert!(m.is_on_curve_exact(p));
        assert_eq!(m.current_price(m.params().equilibrium()).unwrap(), WAD);
    }

    #[test]
    fn try_from_validates() {
        let bad = PoolCurveParams {
            price_x: 0,
            price_y: 1,
            equilibrium_reserve0: 1,
            equilibrium_reserve1: 1,
            concentration_x: 0,
            concentration_y: 0,
        };
        assert!(CurveModel::try_from(bad).is_err());
    }
}
