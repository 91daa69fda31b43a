//! Unexpected-tag filtering shared by the trend and feature calculators
//!
//! A tag counts when it appears in the actual list, is absent from the
//! expected list, and is a key of the coefficient table. Tags outside the
//! table are dropped here explicitly rather than treated as errors.

use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use tracing::trace;

/// Recognized tags present in `actual` but not in `expected`, with their
/// coefficients, ordered by tag name. Duplicates count once.
pub fn unexpected_known<'a, A, E>(
    actual: &'a [A],
    expected: &[E],
    table: &HashMap<String, Decimal>,
) -> Vec<(&'a str, Decimal)>
where
    A: AsRef<str>,
    E: AsRef<str>,
{
    let expected: BTreeSet<&str> = expected.iter().map(|tag| tag.as_ref()).collect();
    let actual: BTreeSet<&'a str> = actual.iter().map(|tag| tag.as_ref()).collect();

    actual
        .into_iter()
        .filter(|tag| !expected.contains(tag))
        .filter_map(|tag| match table.get(tag) {
            Some(coefficient) => Some((tag, *coefficient)),
            None => {
                trace!(tag, "ignoring unrecognized tag");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> HashMap<String, Decimal> {
        [
            ("grunge", dec!(0.15)),
            ("preppy", dec!(0.04)),
            ("y2k", dec!(0.20)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn test_set_difference_restricted_to_table() {
        let found = unexpected_known(&["y2k", "grunge", "made_up"], &["grunge"], &table());
        assert_eq!(found, vec![("y2k", dec!(0.20))]);
    }

    #[test]
    fn test_duplicates_count_once() {
        let found = unexpected_known(&["preppy", "preppy"], &[] as &[&str], &table());
        assert_eq!(found, vec![("preppy", dec!(0.04))]);
    }

    #[test]
    fn test_unknown_expected_tags_are_harmless() {
        let found = unexpected_known(&["grunge"], &["whatever"], &table());
        assert_eq!(found, vec![("grunge", dec!(0.15))]);
    }

    #[test]
    fn test_empty_actual_yields_nothing() {
        let found = unexpected_known::<&str, &str>(&[], &["y2k"], &table());
        assert!(found.is_empty());
    }

    #[test]
    fn test_works_with_owned_strings() {
        let actual = vec!["y2k".to_string(), "preppy".to_string()];
        let expected = vec!["y2k".to_string()];
        let found = unexpected_known(&actual, &expected, &table());
        assert_eq!(found, vec![("preppy", dec!(0.04))]);
    }
}
