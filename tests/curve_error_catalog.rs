use std::collections::HashSet;

use pool_curve_core::curve::error::CurveError;
use pool_curve_core::curve::error_catalog::{default_locale_message, CurveErrorCode};

#[test]
fn all_codes_are_unique() {
    let mut seen = HashSet::new();
    for code in CurveErrorCode::all() {
        assert!(seen.insert(code.code()));
    }
    assert_eq!(seen.len(), CurveErrorCode::all().len());
}

#[test]
fn all_messages_nonempty() {
    for code in CurveErrorCode::all() {
        let message = code.message_pt().trim();
        assert!(
            !message.is_empty(),
            "{} message should not be empty",
            code.code()
        );
        assert!(!code.title().is_empty());
    }
}

#[test]
fn exhaustive_all_slice() {
    assert_eq!(CurveErrorCode::all().len(), 7);
}

#[test]
fn format_examples_resolve_placeholders() {
    let err = CurveError::new(CurveErrorCode::MalformedEvent).with_context("field", "amount0In");
    let user = err.to_user_string();
    assert_eq!(user, "[CRV-0007] log de swap inválido: amount0In");
    let json = err.to_log_json();
    assert!(json.contains("\"context\":{\"field\":\"amount0In\"}"));
    assert_eq!(
        default_locale_message(CurveErrorCode::PointBelowCurve),
        "ponto não está sobre ou acima da curva"
    );
}
