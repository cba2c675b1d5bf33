//! Shared proptest generators.

use proptest::prelude::*;

/// Generate order identifiers shaped like the API's (21 url-safe characters).
pub fn order_id_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{21}"
}

/// Generate customer names.
pub fn customer_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ali".to_string()),
        Just("abuakar".to_string()),
        "[a-z]{3,12}",
        "[A-Z][a-z]{2,10} [A-Z][a-z]{2,10}",
    ]
}

/// Generate book ids the API serves.
pub fn book_id_strategy() -> impl Strategy<Value = u64> {
    1u64..=6
}

/// Generate book types.
pub fn book_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("fiction".to_string()), Just("non-fiction".to_string())]
}
