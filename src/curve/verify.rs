//! Verificação de pontos e aperto até a fronteira da curva.

use super::boundary::f_wide;
use super::error::Result;
use super::error_catalog::CurveErrorCode;
use super::guardrails::wide;
use super::types::{PoolCurveParams, Wad, MAX_CONCENTRATION};
use crate::curve_bail;

/// Limite de sondagens de `verify` por eixo durante o aperto.
pub const MAX_SEARCH_STEPS: usize = 512;

/// `(x, y)` está sobre ou acima da curva?
///
/// Quatro quadrantes em torno do equilíbrio:
/// - `x ≥ x0, y ≥ y0`: sobra nos dois lados, sempre válido
/// - `x ≥ x0, y < y0`: testa `x ≥ f(y)` no ramo-y (preços trocados, `cy`)
/// - `x < x0, y ≥ y0`: testa `y ≥ f(x)` no ramo-x (`cx`)
/// - `x < x0, y < y0`: déficit nos dois lados, nunca válido
///
/// Total: parâmetros inválidos e reserva zero no lado em déficit dão `false`.
#[allow(clippy::too_many_arguments)]
pub fn verify(x: Wad, y: Wad, px: Wad, py: Wad, x0: Wad, y0: Wad, cx: Wad, cy: Wad) -> bool {
    if px == 0 || py == 0 || cx > MAX_CONCENTRATION || cy > MAX_CONCENTRATION {
        return false;
    }
    if x >= x0 {
        if y >= y0 {
            return true;
        }
        // fronteira diverge em y = 0
        y != 0 && wide(x) >= f_wide(y, py, px, y0, x0, cy)
    } else {
        if y < y0 {
            return false;
        }
        x != 0 && wide(y) >= f_wide(x, px, py, x0, y0, cx)
    }
}

/// `verify` com os parâmetros do pool.
#[inline]
pub fn verify_point(params: &PoolCurveParams, x: Wad, y: Wad) -> bool {
    verify(
        x,
        y,
        params.price_x,
        params.price_y,
        params.equilibrium_reserve0,
        params.equilibrium_reserve1,
        params.concentration_x,
        params.concentration_y,
    )
}

/// Sobre a curva e não estritamente acima: verifica, mas nem `(x−1, y)`
/// nem `(x, y−1)` verificam.
pub fn verify_on_curve_exact(params: &PoolCurveParams, x: Wad, y: Wad) -> bool {
    verify_point(params, x, y)
        && (x == 0 || !verify_point(params, x - 1, y))
        && (y == 0 || !verify_point(params, x, y - 1))
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

/// Tenta `ponto − step` no eixo; underflow conta como "não verifica".
fn probe(params: &PoolCurveParams, point: (Wad, Wad), axis: Axis, step: Wad) -> Option<(Wad, Wad)> {
    let (x, y) = point;
    let candidate = match axis {
        Axis::X => (x.checked_sub(step)?, y),
        Axis::Y => (x, y.checked_sub(step)?),
    };
    verify_point(params, candidate.0, candidate.1).then_some(candidate)
}

/// Maior decremento no eixo que ainda verifica: busca exponencial
/// (passo dobrando a partir de 1) seguida de meia-divisão do passo.
fn tighten_axis(params: &PoolCurveParams, start: (Wad, Wad), axis: Axis) -> Result<((Wad, Wad), usize)> {
    let mut point = start;
    let mut step: Wad = 1;
    let mut probes = 0usize;

    loop {
        probes += 1;
        match probe(params, point, axis, step) {
            Some(next) => {
                point = next;
                match step.checked_mul(2) {
                    Some(doubled) => step = doubled,
                    None => break,
                }
            }
            None => break,
        }
        if probes >= MAX_SEARCH_STEPS {
            tracing::warn!(axis = axis.name(), probes, "busca exponencial sem convergência");
            curve_bail!(CurveErrorCode::NonConvergence, op => "tighten_to_curve", axis => axis.name());
        }
    }

    loop {
        if step > 1 {
            step /= 2;
        }
        probes += 1;
        match probe(params, point, axis, step) {
            Some(next) => point = next,
            None if step == 1 => break,
            None => {}
        }
        if probes >= MAX_SEARCH_STEPS {
            tracing::warn!(axis = axis.name(), probes, "meia-divisão sem convergência");
            curve_bail!(CurveErrorCode::NonConvergence, op => "tighten_to_curve", axis => axis.name());
        }
    }

    tracing::trace!(axis = axis.name(), probes, "eixo apertado");
    Ok((point, probes))
}

/// Resultado do aperto com o custo em sondagens de `verify`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tightened {
    pub x: Wad,
    pub y: Wad,
    pub probes: usize,
}

/// Ponto exatamente sobre a curva obtido reduzindo `x` e depois `y`.
///
/// O aperto sequencial por eixo converge para *um* ponto válido da
/// fronteira, não necessariamente o mais próximo em termos globais.
pub fn tighten_to_curve(params: &PoolCurveParams, x: Wad, y: Wad) -> Result<(Wad, Wad)> {
    tighten_with_probes(params, x, y).map(|t| (t.x, t.y))
}

pub fn tighten_with_probes(params: &PoolCurveParams, x: Wad, y: Wad) -> Result<Tightened> {
    if !verify_point(params, x, y) {
        curve_bail!(CurveErrorCode::PointBelowCurve, x => x, y => y);
    }
    if verify_on_curve_exact(params, x, y) {
        return Ok(Tightened { x, y, probes: 0 });
    }
    let (point, probes_x) = tighten_axis(params, (x, y), Axis::X)?;
    let ((x_out, y_out), probes_y) = tighten_axis(params, point, Axis::Y)?;
    tracing::debug!(x_in = x, y_in = y, x_out, y_out, "ponto apertado até a curva");
    Ok(Tightened { x: x_out, y: y_out, probes: probes_x + probes_y })
}
