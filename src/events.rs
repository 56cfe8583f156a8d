//! Eventos `Swap` do pool como registros tipados.
//!
//! O log decodificado chega com os argumentos como strings decimais (inteiros
//! de 256 bits serializados) e é validado uma única vez aqui.

use serde::{Deserialize, Serialize};

use crate::curve::error::Result;
use crate::curve::error_catalog::CurveErrorCode;
use crate::curve::guardrails::{to_wad_checked, wad_wide, wide};
use crate::curve::types::{ReservePoint, Wad};
use crate::{curve_bail, curve_err};

/// Inteiro que pode vir como número JSON ou string decimal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSwapArgs {
    pub sender: Option<String>,
    pub amount0_in: Option<String>,
    pub amount1_in: Option<String>,
    pub amount0_out: Option<String>,
    pub amount1_out: Option<String>,
    pub reserve0: Option<String>,
    pub reserve1: Option<String>,
    pub to: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSwapLog {
    #[serde(default)]
    pub args: RawSwapArgs,
    pub block_number: Option<Quantity>,
    /// Segundos Unix; ausente ou 0 quando o bloco ainda não foi consultado.
    #[serde(default)]
    pub timestamp: Option<Quantity>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    /// token0 entra, token1 sai
    ZeroForOne,
    /// token1 entra, token0 sai
    OneForZero,
    /// entradas/saídas nos dois tokens
    Mixed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SwapEvent {
    pub sender: String,
    pub amount0_in: Wad,
    pub amount1_in: Wad,
    pub amount0_out: Wad,
    pub amount1_out: Wad,
    pub reserve0: Wad,
    pub reserve1: Wad,
    pub to: String,
    pub block_number: u64,
    pub timestamp: Option<u64>,
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(curve_err!(CurveErrorCode::MalformedEvent, field => field)),
    }
}

fn amount(value: &Option<String>, field: &str) -> Result<Wad> {
    let raw = required(value, field)?;
    raw.parse::<Wad>()
        .map_err(|_| curve_err!(CurveErrorCode::MalformedEvent, field => field, value => raw))
}

fn address(value: &Option<String>, field: &str) -> Result<String> {
    let raw = required(value, field)?;
    let hex = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"));
    match hex {
        Some(h) if h.len() == 40 && h.chars().all(|c| c.is_ascii_hexdigit()) => Ok(raw.to_string()),
        _ => Err(curve_err!(CurveErrorCode::MalformedEvent, field => field, value => raw)),
    }
}

fn quantity(value: &Option<Quantity>, field: &str) -> Result<Option<u64>> {
    match value {
        None => Ok(None),
        Some(Quantity::Number(n)) => Ok(Some(*n)),
        Some(Quantity::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| curve_err!(CurveErrorCode::MalformedEvent, field => field, value => s)),
    }
}

impl TryFrom<&RawSwapLog> for SwapEvent {
    type Error = crate::curve::error::CurveError;

    fn try_from(raw: &RawSwapLog) -> Result<Self> {
        let a = &raw.args;
        let event = SwapEvent {
            sender: address(&a.sender, "sender")?,
            amount0_in: amount(&a.amount0_in, "amount0In")?,
            amount1_in: amount(&a.amount1_in, "amount1In")?,
            amount0_out: amount(&a.amount0_out, "amount0Out")?,
            amount1_out: amount(&a.amount1_out, "amount1Out")?,
            reserve0: amount(&a.reserve0, "reserve0")?,
            reserve1: amount(&a.reserve1, "reserve1")?,
            to: address(&a.to, "to")?,
            block_number: quantity(&raw.block_number, "blockNumber")?
                .ok_or_else(|| curve_err!(CurveErrorCode::MalformedEvent, field => "blockNumber"))?,
            timestamp: quantity(&raw.timestamp, "timestamp")?.filter(|ts| *ts != 0),
        };
        if event.amount0_in == 0 && event.amount1_in == 0 {
            curve_bail!(CurveErrorCode::MalformedEvent, field => "amountIn");
        }
        if event.amount0_out == 0 && event.amount1_out == 0 {
            curve_bail!(CurveErrorCode::MalformedEvent, field => "amountOut");
        }
        Ok(event)
    }
}

impl SwapEvent {
    pub fn direction(&self) -> SwapDirection {
        let zero_in = self.amount0_in > 0 && self.amount1_in == 0;
        let one_in = self.amount1_in > 0 && self.amount0_in == 0;
        if zero_in && self.amount1_out > 0 && self.amount0_out == 0 {
            SwapDirection::ZeroForOne
        } else if one_in && self.amount0_out > 0 && self.amount1_out == 0 {
            SwapDirection::OneForZero
        } else {
            SwapDirection::Mixed
        }
    }

    /// Reservas do pool após o swap.
    pub fn reserves(&self) -> ReservePoint {
        ReservePoint::new(self.reserve0, self.reserve1)
    }

    /// Saída por unidade de entrada (escala 1e18) no sentido do swap.
    pub fn execution_price(&self) -> Option<Wad> {
        let (out, inp) = match self.direction() {
            SwapDirection::ZeroForOne => (self.amount1_out, self.amount0_in),
            SwapDirection::OneForZero => (self.amount0_out, self.amount1_in),
            SwapDirection::Mixed => return None,
        };
        to_wad_checked(wide(out) * wad_wide() / wide(inp)).ok()
    }
}

/// Decodifica uma lista JSON de logs `Swap`.
pub fn decode_swap_logs(json: &str) -> Result<Vec<SwapEvent>> {
    let raw: Vec<RawSwapLog> = serde_json::from_str(json)
        .map_err(|e| curve_err!(CurveErrorCode::MalformedEvent, field => "json", value => e))?;
    let events = raw.iter().map(SwapEvent::try_from).collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = events.len(), "logs de swap decodificados");
    Ok(events)
}

/// Volume bruto de entrada por token (saturando).
pub fn input_volume(events: &[SwapEvent]) -> (Wad, Wad) {
    events.iter().fold((0, 0), |(v0, v1), e| {
        (v0.saturating_add(e.amount0_in), v1.saturating_add(e.amount1_in))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::types::WAD;

    const ADDR: &str = "0x1111111111111111111111111111111111111111";

    fn raw(a0_in: &str, a1_in: &str, a0_out: &str, a1_out: &str) -> RawSwapLog {
        RawSwapLog {
            args: RawSwapArgs {
                sender: Some(ADDR.into()),
                amount0_in: Some(a0_in.into()),
                amount1_in: Some(a1_in.into()),
                amount0_out: Some(a0_out.into()),
                amount1_out: Some(a1_out.into()),
                reserve0: Some("1000".into()),
                reserve1: Some("2000".into()),
                to: Some(ADDR.into()),
            },
            block_number: Some(Quantity::Text("42".into())),
            timestamp: Some(Quantity::Number(0)),
        }
    }

    #[test]
    fn direction_and_price() {
        let e = SwapEvent::try_from(&raw("100", "0", "0", "250")).unwrap();
        assert_eq!(e.direction(), SwapDirection::ZeroForOne);
        assert_eq!(e.execution_price(), Some(5 * WAD / 2));
        assert_eq!(e.reserves(), ReservePoint::new(1_000, 2_000));
        assert_eq!(e.block_number, 42);
        assert_eq!(e.timestamp, None);
    }

    #[test]
    fn reverse_direction() {
        let e = SwapEvent::try_from(&raw("0", "400", "100", "0")).unwrap();
        assert_eq!(e.direction(), SwapDirection::OneForZero);
        assert_eq!(e.execution_price(), Some(WAD / 4));
    }

    #[test]
    fn mixed_has_no_price() {
        let e = SwapEvent::try_from(&raw("1", "1", "1", "0")).unwrap();
        assert_eq!(e.direction(), SwapDirection::Mixed);
        assert_eq!(e.execution_price(), None);
    }

    #[test]
    fn rejects_missing_and_bad_fields() {
        let mut r = raw("100", "0", "0", "250");
        r.args.to = None;
        let err = SwapEvent::try_from(&r).unwrap_err();
        assert_eq!(err.code, CurveErrorCode::MalformedEvent);
        assert_eq!(err.context.get("field").map(String::as_str), Some("to"));

        let err = SwapEvent::try_from(&raw("-1", "0", "0", "250")).unwrap_err();
        assert_eq!(err.context.get("field").map(String::as_str), Some("amount0In"));

        let err = SwapEvent::try_from(&raw("0", "0", "0", "250")).unwrap_err();
        assert_eq!(err.context.get("field").map(String::as_str), Some("amountIn"));
    }
}
