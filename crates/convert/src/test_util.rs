//! Helpers shared by the unit tests.

use std::collections::BTreeSet;

/// The `"type"` tag of an adjacently tagged model value.
pub(crate) fn type_tag(value: serde_json::Value) -> String {
    value["type"].as_str().map(str::to_owned).unwrap_or_default()
}

/// Rename a protocol variant name the way `rename_all = "snake_case"` does.
pub(crate) fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Assert that `seen` names every variant in `all`, once.
pub(crate) fn assert_all_variants(seen: &[&'static str], all: &[&'static str]) {
    let seen_set: BTreeSet<_> = seen.iter().copied().collect();
    assert_eq!(seen_set.len(), seen.len(), "duplicate variants in {seen:?}");
    let all_set: BTreeSet<_> = all.iter().copied().collect();
    let missing: Vec<_> = all_set.difference(&seen_set).collect();
    assert!(missing.is_empty(), "variants without a case: {missing:?}");
}

#[test]
fn test_snake_case_matches_serde() {
    assert_eq!(snake_case("PathPaymentStrictReceive"), "path_payment_strict_receive");
    assert_eq!(snake_case("I128"), "i128");
    assert_eq!(snake_case("Ttl"), "ttl");
}
