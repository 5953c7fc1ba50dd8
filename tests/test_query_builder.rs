//! Unit tests for request descriptor construction and text coercion.

use catalog_sdk::{coerce_number, FilterState, NumericInput, QueryBuilder};

// ---------------------------------------------------------------------------
// Descriptor construction
// ---------------------------------------------------------------------------

#[test]
fn default_filter_produces_four_params_in_order() {
    let descriptor = QueryBuilder::new(&FilterState::default()).build();
    let pairs = descriptor.query_pairs();
    assert_eq!(
        pairs,
        vec![
            ("min_price", "0".to_string()),
            ("max_price", "10000".to_string()),
            ("min_rating", "4.8".to_string()),
            ("min_feedbacks", "1000".to_string()),
        ]
    );
}

#[test]
fn descriptor_mirrors_filter_state() {
    let filter = FilterState::new(500.0, 7500.0, 4.2, 250).unwrap();
    let descriptor = QueryBuilder::new(&filter).build();
    assert_eq!(descriptor.min_price, 500.0);
    assert_eq!(descriptor.max_price, 7500.0);
    assert_eq!(descriptor.min_rating, 4.2);
    assert_eq!(descriptor.min_feedbacks, 250.0);
}

#[test]
fn out_of_range_rating_is_passed_through() {
    let mut filter = FilterState::default();
    filter.set_min_rating(7.5);
    let descriptor = QueryBuilder::new(&filter).build();
    assert_eq!(descriptor.min_rating, 7.5);
    assert_eq!(descriptor.query_pairs()[2], ("min_rating", "7.5".to_string()));
}

#[test]
fn nan_is_forwarded_as_text() {
    let descriptor = QueryBuilder::new(&FilterState::default())
        .min_rating(f64::NAN)
        .build();
    assert!(descriptor.min_rating.is_nan());
    assert_eq!(descriptor.query_pairs()[2], ("min_rating", "NaN".to_string()));
}

#[test]
fn overrides_replace_seeded_values() {
    let descriptor = QueryBuilder::new(&FilterState::default())
        .min_price(100.0)
        .max_price(200.0)
        .min_feedbacks(5.0)
        .build();
    assert_eq!(descriptor.min_price, 100.0);
    assert_eq!(descriptor.max_price, 200.0);
    assert_eq!(descriptor.min_rating, 4.8);
    assert_eq!(descriptor.min_feedbacks, 5.0);
}

#[test]
fn inverted_price_overrides_are_clamped() {
    let descriptor = QueryBuilder::new(&FilterState::default())
        .min_price(9000.0)
        .max_price(100.0)
        .build();
    assert_eq!(descriptor.min_price, 9000.0);
    assert_eq!(descriptor.max_price, 9000.0);
}

#[test]
fn negative_min_price_override_clamps_to_zero() {
    let descriptor = QueryBuilder::new(&FilterState::default())
        .min_price(-250.0)
        .build();
    assert_eq!(descriptor.min_price, 0.0);
    assert_eq!(descriptor.max_price, 10_000.0);
}

#[test]
fn fractional_prices_keep_their_decimals() {
    let descriptor = QueryBuilder::new(&FilterState::default())
        .max_price(1499.5)
        .build();
    assert_eq!(descriptor.query_pairs()[1], ("max_price", "1499.5".to_string()));
}

// ---------------------------------------------------------------------------
// Text coercion
// ---------------------------------------------------------------------------

#[test]
fn coerce_parses_plain_numbers() {
    assert_eq!(coerce_number("4.5"), NumericInput::Value(4.5));
    assert_eq!(coerce_number("1000"), NumericInput::Value(1000.0));
    assert_eq!(coerce_number("-3"), NumericInput::Value(-3.0));
}

#[test]
fn coerce_trims_whitespace() {
    assert_eq!(coerce_number("  12 "), NumericInput::Value(12.0));
}

#[test]
fn coerce_treats_empty_as_zero() {
    assert_eq!(coerce_number(""), NumericInput::Value(0.0));
    assert_eq!(coerce_number("   "), NumericInput::Value(0.0));
}

#[test]
fn coerce_marks_garbage_invalid() {
    assert_eq!(coerce_number("abc"), NumericInput::Invalid("abc".to_string()));
    assert_eq!(coerce_number("4,5"), NumericInput::Invalid("4,5".to_string()));
}

#[test]
fn coerce_marks_literal_nan_invalid() {
    assert!(matches!(coerce_number("NaN"), NumericInput::Invalid(_)));
}

#[test]
fn coerce_accepts_only_the_infinity_spelling() {
    assert_eq!(coerce_number("Infinity"), NumericInput::Value(f64::INFINITY));
    assert_eq!(coerce_number("-Infinity"), NumericInput::Value(f64::NEG_INFINITY));
    assert_eq!(coerce_number("1e400"), NumericInput::Value(f64::INFINITY));
    for text in ["inf", "-inf", "INF", "infinity", "+INFINITY"] {
        assert_eq!(coerce_number(text), NumericInput::Invalid(text.to_string()));
    }
}
