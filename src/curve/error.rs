//! Tipo de erro unificado da curva com formatação estável.
use core::fmt;
use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::curve::error_catalog::{default_locale_message, CurveErrorCode};

const CONTEXT_VALUE_MAX: usize = 256;

/// Remove quebras de linha/tabs e limita o tamanho (em chars) do valor.
fn sanitize_value(input: &str) -> String {
    let flat: String = input
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .collect();
    if flat.chars().count() <= CONTEXT_VALUE_MAX {
        return flat;
    }
    let mut truncated: String = flat.chars().take(CONTEXT_VALUE_MAX - 1).collect();
    truncated.push('…');
    truncated
}

/// Substitui `{chave}` pelos valores do contexto; chaves desconhecidas ficam intactas.
fn render_template(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match context.get(key) {
                    Some(value) if !key.is_empty() => rendered.push_str(value),
                    _ => {
                        rendered.push('{');
                        rendered.push_str(key);
                        rendered.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                // chave sem fechamento: copia o resto literal
                rendered.push('{');
                rendered.push_str(after);
                rest = "";
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

/// Erro da curva com contexto estruturado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveError {
    pub code: CurveErrorCode,
    pub context: BTreeMap<String, String>,
}

impl CurveError {
    /// Cria um novo erro sem contexto adicional.
    pub fn new(code: CurveErrorCode) -> Self {
        Self {
            code,
            context: BTreeMap::new(),
        }
    }

    /// Adiciona um par chave/valor ao contexto.
    pub fn with_context<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        let key = key.into();
        if !key.is_empty() {
            self.context.insert(key, sanitize_value(&value.to_string()));
        }
        self
    }

    fn resolved_message(&self) -> String {
        render_template(default_locale_message(self.code), &self.context)
    }

    /// Mensagem curta para UI.
    pub fn to_user_string(&self) -> String {
        format!("[{}] {}", self.code.code(), self.resolved_message())
    }

    /// Renderiza um template arbitrário usando o contexto atual.
    pub fn render_with_template(&self, template: &str) -> String {
        render_template(template, &self.context)
    }

    /// Serialização estável em JSON para logs (chaves do contexto ordenadas).
    pub fn to_log_json(&self) -> String {
        let context: Map<String, Value> = self
            .context
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        json!({
            "code": self.code.code(),
            "title": self.code.title(),
            "message": self.resolved_message(),
            "context": context,
        })
        .to_string()
    }
}

impl From<CurveErrorCode> for CurveError {
    fn from(code: CurveErrorCode) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_user_string())
    }
}

impl std::error::Error for CurveError {}

/// Resultado padrão para operações da curva.
pub type Result<T> = std::result::Result<T, CurveError>;

#[macro_export]
macro_rules! curve_err {
  ($code:expr) => {{
    $crate::curve::error::CurveError::new($code)
  }};
  ($code:expr, $($key:ident => $value:expr),+ $(,)?) => {{
    let mut err = $crate::curve::error::CurveError::new($code);
    $(
      err = err.with_context(stringify!($key), $value);
    )+
    err
  }};
  ($code:expr, { $($key:expr => $value:expr),+ $(,)? }) => {{
    let mut err = $crate::curve::error::CurveError::new($code);
    $(
      err = err.with_context($key, $value);
    )+
    err
  }};
}

#[macro_export]
macro_rules! curve_bail {
  ($($tt:tt)*) => {
    return Err($crate::curve_err!($($tt)*))
  };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_string_basic() {
        let err = CurveError::new(CurveErrorCode::PointBelowCurve);
        assert_eq!(
            err.to_user_string(),
            "[CRV-0002] ponto não está sobre ou acima da curva"
        );
    }

    #[test]
    fn placeholder_subst() {
        let err = CurveError::new(CurveErrorCode::InvalidParameter).with_context("param", "price_x");
        assert_eq!(err.to_user_string(), "[CRV-0001] parâmetro price_x fora do domínio");
        assert_eq!(err.render_with_template("falha {param}"), "falha price_x");
    }

    #[test]
    fn unterminated_placeholder_kept() {
        let err = CurveError::new(CurveErrorCode::InvalidParameter).with_context("param", "x");
        assert_eq!(err.render_with_template("a {param"), "a {param");
    }

    #[test]
    fn log_json_shape() {
        let err = CurveError::new(CurveErrorCode::NonConvergence).with_context("op", "isqrt");
        let parsed: Value = serde_json::from_str(&err.to_log_json()).unwrap();
        assert_eq!(parsed["code"], "CRV-0004");
        assert_eq!(parsed["message"], "isqrt não convergiu");
        assert_eq!(parsed["context"]["op"], "isqrt");
    }

    #[test]
    fn macros_variants() {
        let err = curve_err!(CurveErrorCode::InvalidParameter, param => "x");
        assert_eq!(err.code, CurveErrorCode::InvalidParameter);
        assert_eq!(err.context.get("param").unwrap(), "x");

        let err_block = curve_err!(CurveErrorCode::UnknownNetwork, { "network" => "solana" });
        assert_eq!(err_block.code, CurveErrorCode::UnknownNetwork);
        assert_eq!(err_block.context.get("network").unwrap(), "solana");
    }

    #[test]
    fn bail_returns_early() {
        fn fails() -> Result<u8> {
            curve_bail!(CurveErrorCode::OverflowNumeric);
        }
        assert_eq!(fails().unwrap_err().code, CurveErrorCode::OverflowNumeric);
    }
}
