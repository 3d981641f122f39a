use super::*;

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        assert_ne!(
            code.is_semantic_error(),
            code.is_internal_error(),
            "{code} must belong to exactly one phase"
        );
    }
}

#[test]
fn test_round_trip_through_str() {
    for &code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
    }
    assert_eq!("E0000".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_display_matches_as_str() {
    assert_eq!(ErrorCode::E2004.to_string(), "E2004");
    assert_eq!(ErrorCode::E9001.title(), "internal compiler error");
}
