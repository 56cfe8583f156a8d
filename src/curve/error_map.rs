//! Mapeamento entre condições de domínio e códigos de erro da curva.
use crate::curve::error::CurveError;
use crate::curve::error_catalog::CurveErrorCode;
use crate::curve::guardrails::{wad_wide, wide};
use crate::curve::types::{PoolCurveParams, ReservePoint, Wad, MAX_CONCENTRATION};
use crate::curve::verify::verify_point;

/// Determina o código de erro para preços/concentrações brutos.
pub fn classify_params(prices: (Wad, Wad), concentrations: (Wad, Wad)) -> Option<CurveErrorCode> {
    if prices.0 == 0 || prices.1 == 0 {
        return Some(CurveErrorCode::InvalidParameter);
    }
    if concentrations.0 > MAX_CONCENTRATION || concentrations.1 > MAX_CONCENTRATION {
        return Some(CurveErrorCode::InvalidParameter);
    }
    // preço no vértice (px·1e18/py) precisa caber em Wad
    if wide(prices.0) * wad_wide() / wide(prices.1) > wide(Wad::MAX) {
        return Some(CurveErrorCode::OverflowNumeric);
    }
    None
}

/// Código de erro para um ajuste de reservas proposto.
pub fn classify_point(params: &PoolCurveParams, point: ReservePoint) -> Option<CurveErrorCode> {
    if let Some(code) = classify_params(
        (params.price_x, params.price_y),
        (params.concentration_x, params.concentration_y),
    ) {
        return Some(code);
    }
    if !verify_point(params, point.x, point.y) {
        return Some(CurveErrorCode::PointBelowCurve);
    }
    None
}

/// Constrói um [`CurveError`] diretamente de um código.
pub fn to_error(code: CurveErrorCode) -> CurveError {
    CurveError::new(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::types::WAD;

    #[test]
    fn detects_zero_price() {
        assert_eq!(classify_params((0, 1), (0, 0)), Some(CurveErrorCode::InvalidParameter));
        assert_eq!(classify_params((1, 0), (0, 0)), Some(CurveErrorCode::InvalidParameter));
    }

    #[test]
    fn detects_concentration_out_of_range() {
        assert_eq!(classify_params((1, 1), (WAD + 1, 0)), Some(CurveErrorCode::InvalidParameter));
    }

    #[test]
    fn detects_kink_overflow() {
        assert_eq!(classify_params((u128::MAX, 1), (0, 0)), Some(CurveErrorCode::OverflowNumeric));
    }

    #[test]
    fn detects_point_below_curve() {
        let params = PoolCurveParams::new(WAD, WAD, 100, 100, 0, 0).unwrap();
        assert_eq!(
            classify_point(&params, ReservePoint::new(50, 100)),
            Some(CurveErrorCode::PointBelowCurve)
        );
        assert_eq!(classify_point(&params, ReservePoint::new(100, 100)), None);
    }

    #[test]
    fn ok_path() {
        assert_eq!(classify_params((WAD, 2 * WAD), (WAD / 2, WAD)), None);
        assert_eq!(to_error(CurveErrorCode::MalformedEvent).code, CurveErrorCode::MalformedEvent);
    }
}
