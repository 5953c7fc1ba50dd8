//! Filter and sort state transitions.

use catalog_sdk::{CatalogError, FilterState, InvalidInputPolicy, SortDirection, SortField, SortState};

// ---------------------------------------------------------------------------
// FilterState: price range
// ---------------------------------------------------------------------------

#[test]
fn default_filter_matches_initial_values() {
    let filter = FilterState::default();
    assert_eq!(filter.price_min(), 0.0);
    assert_eq!(filter.price_max(), 10_000.0);
    assert_eq!(filter.min_rating(), 4.8);
    assert_eq!(filter.min_feedbacks(), 1000.0);
}

#[test]
fn new_rejects_inverted_range() {
    let err = FilterState::new(5000.0, 1000.0, 4.0, 0).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
}

#[test]
fn set_price_range_rejects_inverted_and_keeps_state() {
    let mut filter = FilterState::default();
    assert!(filter.set_price_range(3000.0, 2000.0).is_err());
    assert_eq!(filter.price_min(), 0.0);
    assert_eq!(filter.price_max(), 10_000.0);
}

#[test]
fn set_price_range_rejects_non_finite() {
    let mut filter = FilterState::default();
    assert!(filter.set_price_range(f64::NAN, 100.0).is_err());
    assert!(filter.set_price_range(0.0, f64::INFINITY).is_err());
}

#[test]
fn set_price_range_clamps_negative_to_zero() {
    let mut filter = FilterState::default();
    assert!(filter.set_price_range(-500.0, 2000.0).unwrap());
    assert_eq!(filter.price_min(), 0.0);
    assert_eq!(filter.price_max(), 2000.0);
}

#[test]
fn set_price_range_reports_no_change_for_same_values() {
    let mut filter = FilterState::default();
    assert!(!filter.set_price_range(0.0, 10_000.0).unwrap());
}

#[test]
fn set_price_min_clamps_to_max() {
    let mut filter = FilterState::new(0.0, 3000.0, 4.0, 0).unwrap();
    assert!(filter.set_price_min(5000.0).unwrap());
    assert_eq!(filter.price_min(), 3000.0);
    assert!(filter.price_min() <= filter.price_max());
}

#[test]
fn set_price_max_clamps_to_min() {
    let mut filter = FilterState::new(2000.0, 3000.0, 4.0, 0).unwrap();
    assert!(filter.set_price_max(500.0).unwrap());
    assert_eq!(filter.price_max(), 2000.0);
}

#[test]
fn equal_bounds_are_allowed() {
    let mut filter = FilterState::default();
    filter.set_price_range(1500.0, 1500.0).unwrap();
    assert_eq!(filter.price_min(), filter.price_max());
}

// ---------------------------------------------------------------------------
// FilterState: text input
// ---------------------------------------------------------------------------

#[test]
fn rating_text_is_coerced() {
    let mut filter = FilterState::default();
    assert!(filter.set_min_rating_text("4.2", InvalidInputPolicy::Forward).unwrap());
    assert_eq!(filter.min_rating(), 4.2);
}

#[test]
fn invalid_rating_text_forwards_nan() {
    let mut filter = FilterState::default();
    assert!(filter.set_min_rating_text("four", InvalidInputPolicy::Forward).unwrap());
    assert!(filter.min_rating().is_nan());
    // Setting NaN again is not a change.
    assert!(!filter.set_min_rating_text("five", InvalidInputPolicy::Forward).unwrap());
}

#[test]
fn invalid_feedbacks_text_rejected_under_reject_policy() {
    let mut filter = FilterState::default();
    let err = filter
        .set_min_feedbacks_text("lots", InvalidInputPolicy::Reject)
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
    assert_eq!(filter.min_feedbacks(), 1000.0);
}

#[test]
fn empty_feedbacks_text_means_zero() {
    let mut filter = FilterState::default();
    assert!(filter.set_min_feedbacks_text("", InvalidInputPolicy::Reject).unwrap());
    assert_eq!(filter.min_feedbacks(), 0.0);
}

// ---------------------------------------------------------------------------
// SortState
// ---------------------------------------------------------------------------

#[test]
fn initial_sort_is_server_order() {
    let sort = SortState::default();
    assert_eq!(sort.field(), SortField::None);
    assert_eq!(sort.direction(), SortDirection::Ascending);
    assert!(!sort.is_active(SortField::None));
}

#[test]
fn selecting_new_field_starts_ascending() {
    let mut sort = SortState::new(SortField::Rating, SortDirection::Descending);
    assert!(sort.select(SortField::Name));
    assert_eq!(sort.field(), SortField::Name);
    assert_eq!(sort.direction(), SortDirection::Ascending);
}

#[test]
fn selecting_active_field_toggles_direction() {
    let mut sort = SortState::default();
    sort.select(SortField::Feedbacks);
    assert!(sort.select(SortField::Feedbacks));
    assert_eq!(sort.direction(), SortDirection::Descending);
    assert!(sort.select(SortField::Feedbacks));
    assert_eq!(sort.direction(), SortDirection::Ascending);
    assert!(sort.is_active(SortField::Feedbacks));
}

#[test]
fn selecting_none_clears_sort() {
    let mut sort = SortState::new(SortField::Name, SortDirection::Descending);
    assert!(sort.select(SortField::None));
    assert_eq!(sort, SortState::default());
    assert!(!sort.select(SortField::None));
}

#[test]
fn sort_serializes_with_wire_names() {
    let sort = SortState::new(SortField::DiscountedPrice, SortDirection::Descending);
    let json = serde_json::to_value(sort).unwrap();
    assert_eq!(json["field"], "price_with_discount");
    assert_eq!(json["direction"], "desc");
    assert_eq!(SortField::DiscountedPrice.as_str(), Some("price_with_discount"));
    assert_eq!(SortField::None.as_str(), None);
}
