use pool_curve_core::curve::error::CurveError;
use pool_curve_core::curve::error_catalog::CurveErrorCode;
use pool_curve_core::curve::pricing::compute_price_fraction;

#[test]
fn no_newlines_or_tabs() {
    let err =
        CurveError::new(CurveErrorCode::InvalidParameter).with_context("param", "linha1\nlinha2\ttab");
    let user = err.to_user_string();
    assert!(!user.contains('\n'));
    assert!(!user.contains('\t'));
}

#[test]
fn truncate_long_context_values() {
    let long_value = "a".repeat(1024);
    let err = CurveError::new(CurveErrorCode::InvalidParameter).with_context("param", long_value);
    let user = err.to_user_string();
    assert!(user.len() < 512);
}

#[test]
fn unknown_placeholder_is_left_as_is() {
    let err = CurveError::new(CurveErrorCode::PointBelowCurve);
    let rendered = err.render_with_template("erro {desconhecido}");
    assert_eq!(rendered, "erro {desconhecido}");
}

#[test]
fn missing_context_keeps_template_key() {
    let err = CurveError::new(CurveErrorCode::NonConvergence);
    assert_eq!(err.to_user_string(), "[CRV-0004] {op} não convergiu");
}

#[test]
fn form_validation_message_for_bad_price() {
    let err = compute_price_fraction("abc", 18, 6).unwrap_err();
    assert_eq!(err.to_string(), "[CRV-0003] preço deve ser um número positivo e finito");
}
