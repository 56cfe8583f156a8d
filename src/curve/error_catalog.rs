//! Catálogo imutável de erros da curva.
use core::fmt;

/// Código de erro da curva.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum CurveErrorCode {
    /// Preço, concentração ou reserva fora do domínio aceito.
    InvalidParameter,
    /// Ponto abaixo da curva: aperto indefinido.
    PointBelowCurve,
    /// Preço digitado não é um número positivo e finito.
    InvalidPriceInput,
    /// Iteração (raiz, busca de aperto) excedeu o limite.
    NonConvergence,
    /// Overflow ou underflow em cálculos numéricos.
    OverflowNumeric,
    /// Chave de rede não registrada.
    UnknownNetwork,
    /// Log de swap incompleto ou inconsistente.
    MalformedEvent,
}

impl CurveErrorCode {
    /// Código textual estável do erro.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "CRV-0001",
            Self::PointBelowCurve => "CRV-0002",
            Self::InvalidPriceInput => "CRV-0003",
            Self::NonConvergence => "CRV-0004",
            Self::OverflowNumeric => "CRV-0005",
            Self::UnknownNetwork => "CRV-0006",
            Self::MalformedEvent => "CRV-0007",
        }
    }

    /// Título curto em português.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "Parâmetro inválido",
            Self::PointBelowCurve => "Ponto abaixo da curva",
            Self::InvalidPriceInput => "Preço inválido",
            Self::NonConvergence => "Sem convergência",
            Self::OverflowNumeric => "Overflow numérico",
            Self::UnknownNetwork => "Rede desconhecida",
            Self::MalformedEvent => "Evento malformado",
        }
    }

    /// Template base em português; `{chave}` é preenchido pelo contexto.
    pub const fn message_pt(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "parâmetro {param} fora do domínio",
            Self::PointBelowCurve => "ponto não está sobre ou acima da curva",
            Self::InvalidPriceInput => "preço deve ser um número positivo e finito",
            Self::NonConvergence => "{op} não convergiu",
            Self::OverflowNumeric => "overflow/underflow numérico",
            Self::UnknownNetwork => "rede {network} não registrada",
            Self::MalformedEvent => "log de swap inválido: {field}",
        }
    }

    /// Retorna todas as variantes em ordem estável.
    pub fn all() -> &'static [CurveErrorCode] {
        const ALL: &[CurveErrorCode] = &[
            CurveErrorCode::InvalidParameter,
            CurveErrorCode::PointBelowCurve,
            CurveErrorCode::InvalidPriceInput,
            CurveErrorCode::NonConvergence,
            CurveErrorCode::OverflowNumeric,
            CurveErrorCode::UnknownNetwork,
            CurveErrorCode::MalformedEvent,
        ];
        ALL
    }
}

impl fmt::Display for CurveErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mensagem padrão na localidade ativa (pt-BR).
pub fn default_locale_message(code: CurveErrorCode) -> &'static str {
    code.message_pt()
}
