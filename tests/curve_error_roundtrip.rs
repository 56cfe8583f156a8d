use std::collections::HashSet;

use serde_json::Value;

use pool_curve_core::curve::error::CurveError;
use pool_curve_core::curve::error_catalog::CurveErrorCode;
use pool_curve_core::curve::verify::tighten_to_curve;
use pool_curve_core::curve::types::{PoolCurveParams, WAD};

#[test]
fn json_shape_per_code() {
    for code in CurveErrorCode::all() {
        let err = CurveError::new(*code);
        let json: Value = serde_json::from_str(&err.to_log_json()).unwrap();
        assert_eq!(json["code"].as_str(), Some(code.code()));
        assert_eq!(json["title"].as_str(), Some(code.title()));
        assert_eq!(json["message"].as_str(), Some(code.message_pt()));
        assert!(json["context"].is_object());
    }
}

#[test]
fn all_codes_seen() {
    let mut seen = HashSet::new();
    for code in CurveErrorCode::all() {
        let json: Value = serde_json::from_str(&CurveError::new(*code).to_log_json()).unwrap();
        if let Some(code_str) = json["code"].as_str() {
            seen.insert(code_str.to_string());
        }
    }
    assert_eq!(seen.len(), 7);
}

#[test]
fn context_survives_json() {
    let params = PoolCurveParams::new(WAD, WAD, 100, 100, 0, 0).unwrap();
    let err = tighten_to_curve(&params, 10, 10).unwrap_err();
    let json: Value = serde_json::from_str(&err.to_log_json()).unwrap();
    assert_eq!(json["code"], "CRV-0002");
    assert_eq!(json["context"]["x"], "10");
    assert_eq!(json["context"]["y"], "10");
}
