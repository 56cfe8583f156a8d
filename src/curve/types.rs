//! Tipos básicos da curva (escala fixa 1e18) + U256/U512 para intermediários.
//! Reservas on-chain são `uint112`; parâmetros cabem em 128 bits.

use uint::construct_uint;

use super::error;
use super::guardrails::{ensure_concentration, ensure_price};

construct_uint! {
    /// Inteiro de 256 bits (fração de preço).
    pub struct U256(4);
}

construct_uint! {
    /// Inteiro de 512 bits para os produtos triplos da curva.
    pub struct U512(8);
}

pub type Wad = u128; // escala 1e18

pub const WAD: Wad = 1_000_000_000_000_000_000u128; // 1e18
pub const MAX_CONCENTRATION: Wad = WAD;

/// Parâmetros imutáveis de um pool, lidos do contrato uma vez por sessão.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolCurveParams {
    pub price_x: Wad,
    pub price_y: Wad,
    pub equilibrium_reserve0: Wad,
    pub equilibrium_reserve1: Wad,
    pub concentration_x: Wad,
    pub concentration_y: Wad,
}

impl PoolCurveParams {
    /// Valida e constrói. Preços > 0, concentrações em [0, 1e18].
    pub fn new(
        price_x: Wad,
        price_y: Wad,
        equilibrium_reserve0: Wad,
        equilibrium_reserve1: Wad,
        concentration_x: Wad,
        concentration_y: Wad,
    ) -> error::Result<Self> {
        let params = Self {
            price_x,
            price_y,
            equilibrium_reserve0,
            equilibrium_reserve1,
            concentration_x,
            concentration_y,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> error::Result<()> {
        ensure_price("price_x", self.price_x)?;
        ensure_price("price_y", self.price_y)?;
        ensure_concentration("concentration_x", self.concentration_x)?;
        ensure_concentration("concentration_y", self.concentration_y)?;
        Ok(())
    }

    #[inline]
    pub fn x0(&self) -> Wad { self.equilibrium_reserve0 }
    #[inline]
    pub fn y0(&self) -> Wad { self.equilibrium_reserve1 }
    #[inline]
    pub fn cx(&self) -> Wad { self.concentration_x }
    #[inline]
    pub fn cy(&self) -> Wad { self.concentration_y }

    /// Ponto de equilíbrio `(x0, y0)`.
    pub fn equilibrium(&self) -> ReservePoint {
        ReservePoint::new(self.equilibrium_reserve0, self.equilibrium_reserve1)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReservePoint { pub x: Wad, pub y: Wad }
impl ReservePoint {
    pub fn new(x: Wad, y: Wad) -> Self { Self { x, y } }
}

impl From<(Wad, Wad)> for ReservePoint {
    fn from((x, y): (Wad, Wad)) -> Self { Self { x, y } }
}

impl From<ReservePoint> for (Wad, Wad) {
    fn from(p: ReservePoint) -> Self { (p.x, p.y) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::error_catalog::CurveErrorCode;

    #[test]
    fn params_valid() {
        let p = PoolCurveParams::new(WAD, WAD, 100, 200, 0, WAD).unwrap();
        assert_eq!(p.equilibrium(), ReservePoint::new(100, 200));
        assert_eq!((p.cx(), p.cy()), (0, WAD));
    }

    #[test]
    fn wide_ints_parse_decimal() {
        assert_eq!(U512::from_dec_str("1000000000000000000").unwrap(), U512::from(WAD));
        assert_eq!(U256::from_dec_str("340282366920938463463374607431768211456").unwrap(), U256::one() << 128);
        assert!(U256::from_dec_str("12a").is_err());
    }

    #[test]
    fn params_reject_zero_price() {
        let err = PoolCurveParams::new(0, WAD, 1, 1, 0, 0).unwrap_err();
        assert_eq!(err.code, CurveErrorCode::InvalidParameter);
        assert_eq!(err.context.get("param").map(String::as_str), Some("price_x"));
    }

    #[test]
    fn params_reject_concentration_above_one() {
        let err = PoolCurveParams::new(WAD, WAD, 1, 1, 0, WAD + 1).unwrap_err();
        assert_eq!(err.code, CurveErrorCode::InvalidParameter);
        assert_eq!(err.context.get("param").map(String::as_str), Some("concentration_y"));
    }
}
