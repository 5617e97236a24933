use serde::Serialize;
use serde_json::{Number, Value};

use crate::{MAX_DEPTH, errors::DiffCoreError, normalizer::normalize, options::DiffOptions};

/// Classification outcome counts of one tree comparison.
///
/// `total` always equals the sum of the four counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub added: u64,
    pub removed: u64,
    pub modified: u64,
    pub unchanged: u64,
    pub total: u64,
}

impl DiffStats {
    /// Number of discrepancies: everything except `unchanged`.
    pub fn difference_count(&self) -> u64 {
        self.added + self.removed + self.modified
    }

    fn record_added(&mut self) {
        self.added += 1;
        self.total += 1;
    }

    fn record_removed(&mut self) {
        self.removed += 1;
        self.total += 1;
    }

    fn record_modified(&mut self) {
        self.modified += 1;
        self.total += 1;
    }

    fn record_unchanged(&mut self) {
        self.unchanged += 1;
        self.total += 1;
    }
}

/// Compare two document trees and return the classified breakdown.
///
/// Directionality is fixed: `original` is the base document and `modified`
/// is the edited one. A value present only in `modified` counts as added, a
/// value present only in `original` counts as removed.
pub fn diff_stats(original: &Value, modified: &Value) -> Result<DiffStats, DiffCoreError> {
    let mut stats = DiffStats::default();
    classify(Some(original), Some(modified), 0, &mut stats)?;
    Ok(stats)
}

/// Compare two document trees and return the number of discrepancies.
pub fn count_differences(original: &Value, modified: &Value) -> Result<u64, DiffCoreError> {
    Ok(diff_stats(original, modified)?.difference_count())
}

/// Text-level variant of [`diff_stats`] with fail-soft semantics: if either
/// side does not parse as JSON (a common intermediate state while the user
/// is still typing), the result is all zeroes instead of an error.
pub fn diff_stats_str(original: &str, modified: &str, options: &DiffOptions) -> DiffStats {
    let (Ok(original), Ok(modified)) = (
        serde_json::from_str::<Value>(original),
        serde_json::from_str::<Value>(modified),
    ) else {
        return DiffStats::default();
    };

    let (Ok(original), Ok(modified)) = (
        normalize(&original, options),
        normalize(&modified, options),
    ) else {
        return DiffStats::default();
    };

    diff_stats(&original, &modified).unwrap_or_default()
}

/// Text-level variant of [`count_differences`], fail-soft like
/// [`diff_stats_str`].
pub fn count_differences_str(original: &str, modified: &str) -> u64 {
    diff_stats_str(original, modified, &DiffOptions::default()).difference_count()
}

/// The recursive core. `None` and JSON `null` both mean "absent", so a key
/// set to `null` on one side counts as added/removed rather than modified.
/// Every non-recursive case contributes exactly one unit to exactly one
/// counter; objects and arrays contribute only through their children.
fn classify(
    original: Option<&Value>,
    modified: Option<&Value>,
    depth: usize,
    stats: &mut DiffStats,
) -> Result<(), DiffCoreError> {
    if depth > MAX_DEPTH {
        return Err(DiffCoreError::TooDeeplyNested {
            max_depth: MAX_DEPTH,
        });
    }

    let original = original.filter(|value| !value.is_null());
    let modified = modified.filter(|value| !value.is_null());

    match (original, modified) {
        (None, None) => stats.record_unchanged(),
        (None, Some(_)) => stats.record_added(),
        (Some(_), None) => stats.record_removed(),
        (Some(Value::Object(left)), Some(Value::Object(right))) => {
            for (key, child) in left {
                classify(Some(child), right.get(key), depth + 1, stats)?;
            }
            for (key, child) in right {
                if !left.contains_key(key) {
                    classify(None, Some(child), depth + 1, stats)?;
                }
            }
        }
        (Some(Value::Array(left)), Some(Value::Array(right))) => {
            // Positional comparison; order-insensitivity is the
            // normalizer's responsibility, not the differ's.
            for index in 0..left.len().max(right.len()) {
                classify(left.get(index), right.get(index), depth + 1, stats)?;
            }
        }
        (Some(left), Some(right)) => {
            if primitives_equal(left, right) {
                stats.record_unchanged();
            } else {
                // Covers both unequal primitives and bare type mismatches;
                // a type mismatch is one modified unit, never decomposed.
                stats.record_modified();
            }
        }
    }

    Ok(())
}

fn primitives_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        _ => false,
    }
}

/// Numeric equality by value, not by representation: `1` and `1.0` are
/// equal, while `1` and `"1"` never are (no cross-type coercion).
fn numbers_equal(left: &Number, right: &Number) -> bool {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        return a == b;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    fn stats(added: u64, removed: u64, modified: u64, unchanged: u64) -> DiffStats {
        DiffStats {
            added,
            removed,
            modified,
            unchanged,
            total: added + removed + modified + unchanged,
        }
    }

    #[test]
    fn test_one_modified_one_unchanged_field() {
        let original = json!({"name": "John", "age": 30});
        let modified = json!({"name": "John", "age": 31});

        assert_eq!(
            diff_stats(&original, &modified).unwrap(),
            stats(0, 0, 1, 1)
        );
        assert_eq!(count_differences(&original, &modified).unwrap(), 1);
    }

    #[test]
    fn test_added_key() {
        let original = json!({"a": 1});
        let modified = json!({"a": 1, "b": 2});

        assert_eq!(
            diff_stats(&original, &modified).unwrap(),
            stats(1, 0, 0, 1)
        );
    }

    #[test]
    fn test_removed_key() {
        let original = json!({"a": 1, "b": 2});
        let modified = json!({"a": 1});

        assert_eq!(
            diff_stats(&original, &modified).unwrap(),
            stats(0, 1, 0, 1)
        );
    }

    #[test]
    fn test_null_to_value_counts_as_added() {
        let original = json!({"a": null});
        let modified = json!({"a": 1});

        assert_eq!(
            diff_stats(&original, &modified).unwrap(),
            stats(1, 0, 0, 0)
        );
    }

    #[test]
    fn test_both_null_is_unchanged() {
        assert_eq!(
            diff_stats(&Value::Null, &Value::Null).unwrap(),
            stats(0, 0, 0, 1)
        );
    }

    #[test]
    fn test_type_mismatch_is_a_single_modified_unit() {
        let original = json!({"a": {"deeply": {"nested": [1, 2, 3]}}});
        let modified = json!({"a": "text"});

        assert_eq!(
            diff_stats(&original, &modified).unwrap(),
            stats(0, 0, 1, 0)
        );
    }

    #[test]
    fn test_number_and_numeric_string_are_modified() {
        assert_eq!(diff_stats(&json!(1), &json!("1")).unwrap(), stats(0, 0, 1, 0));
    }

    #[test]
    fn test_integer_and_float_with_same_value_are_unchanged() {
        assert_eq!(
            diff_stats(&json!(1), &json!(1.0)).unwrap(),
            stats(0, 0, 0, 1)
        );
    }

    #[test]
    fn test_array_length_mismatch() {
        let original = json!([1, 2]);
        let modified = json!([1, 2, 3, 4]);

        assert_eq!(
            diff_stats(&original, &modified).unwrap(),
            stats(2, 0, 0, 2)
        );
    }

    #[test]
    fn test_arrays_compare_positionally() {
        let original = json!([1, 2, 3]);
        let modified = json!([3, 2, 1]);

        assert_eq!(
            diff_stats(&original, &modified).unwrap(),
            stats(0, 0, 2, 1)
        );
    }

    #[test_case(json!({"name": "John", "age": 30, "tags": ["a", "b"]}); "object")]
    #[test_case(json!([1, "two", null, {"three": 3}]); "array")]
    #[test_case(json!(42); "number")]
    fn test_self_diff_is_all_unchanged(document: Value) {
        let result = diff_stats(&document, &document).unwrap();

        assert_eq!(result.added, 0);
        assert_eq!(result.removed, 0);
        assert_eq!(result.modified, 0);
        assert!(result.unchanged >= 1);
        assert_eq!(result.total, result.unchanged);
    }

    #[test]
    fn test_added_and_removed_swap_when_direction_flips() {
        let original = json!({"a": 1, "b": {"c": 2}, "d": [1, 2]});
        let modified = json!({"a": 1, "b": {"c": 2, "e": 5}, "d": [1]});

        let forward = diff_stats(&original, &modified).unwrap();
        let backward = diff_stats(&modified, &original).unwrap();

        assert_eq!(forward.added, backward.removed);
        assert_eq!(forward.removed, backward.added);
        assert_eq!(forward.modified, backward.modified);
        assert_eq!(forward.unchanged, backward.unchanged);
    }

    #[test]
    fn test_count_matches_stats_breakdown() {
        let original = json!({"a": 1, "b": 2, "c": [1, 2, 3]});
        let modified = json!({"a": 2, "c": [1, 2], "d": true});

        let breakdown = diff_stats(&original, &modified).unwrap();

        assert_eq!(
            count_differences(&original, &modified).unwrap(),
            breakdown.added + breakdown.removed + breakdown.modified
        );
    }

    #[test]
    fn test_malformed_input_fails_soft() {
        assert_eq!(count_differences_str("{invalid", r#"{"a": 1}"#), 0);
        assert_eq!(
            diff_stats_str("{invalid", r#"{"a": 1}"#, &DiffOptions::default()),
            DiffStats::default()
        );
    }

    #[test]
    fn test_diff_stats_str_applies_normalization() {
        let options = DiffOptions {
            ignore_array_order: true,
            ..DiffOptions::default()
        };

        let result = diff_stats_str("[1, 2, 3]", "[3, 2, 1]", &options);

        assert_eq!(result, stats(0, 0, 0, 3));
    }

    #[test]
    fn test_rejects_too_deeply_nested_documents() {
        let mut document = json!(1);
        for _ in 0..=MAX_DEPTH {
            document = json!([document]);
        }

        assert!(matches!(
            diff_stats(&document, &document),
            Err(DiffCoreError::TooDeeplyNested { .. })
        ));
    }
}
