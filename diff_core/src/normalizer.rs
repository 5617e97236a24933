use std::cmp::Ordering;

use serde_json::Value;

use crate::{MAX_DEPTH, errors::DiffCoreError, options::DiffOptions};

/// Apply the configured equivalence transforms to a document tree.
///
/// Pure and idempotent: normalizing an already normalized value with the
/// same options returns an equal value.
pub fn normalize(value: &Value, options: &DiffOptions) -> Result<Value, DiffCoreError> {
    normalize_at_depth(value, options, 0)
}

fn normalize_at_depth(
    value: &Value,
    options: &DiffOptions,
    depth: usize,
) -> Result<Value, DiffCoreError> {
    if depth > MAX_DEPTH {
        return Err(DiffCoreError::TooDeeplyNested {
            max_depth: MAX_DEPTH,
        });
    }

    Ok(match value {
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, child) in map {
                if options.ignore_keys.iter().any(|ignored| ignored == key) {
                    continue;
                }
                entries.push((key.clone(), normalize_at_depth(child, options, depth + 1)?));
            }

            if options.sorts_object_keys() {
                entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            }

            Value::Object(entries.into_iter().collect())
        }
        Value::Array(elements) => {
            let mut normalized = elements
                .iter()
                .map(|element| normalize_at_depth(element, options, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;

            if options.ignore_array_order {
                normalized.sort_by(compare_elements);
            }

            Value::Array(normalized)
        }
        primitive => primitive.clone(),
    })
}

/// Canonical element ordering for array sorting: by type first, then by
/// value within the type (numbers numerically, strings lexicographically,
/// compound values by the lexicographic order of their JSON serialization).
/// Ranking by type keeps the order total; a piecewise comparator mixing
/// numeric and textual comparison would admit cycles like 9 < 10 < "5" < 9.
/// Deterministic but otherwise arbitrary; it only has to be consistent.
fn compare_elements(left: &Value, right: &Value) -> Ordering {
    type_rank(left)
        .cmp(&type_rank(right))
        .then_with(|| match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                let a = a.as_f64().unwrap_or(f64::MAX);
                let b = b.as_f64().unwrap_or(f64::MAX);
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => left.to_string().cmp(&right.to_string()),
        })
}

const fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    fn options_with_ignored_keys(keys: &[&str]) -> DiffOptions {
        DiffOptions {
            ignore_keys: keys.iter().map(|key| (*key).to_owned()).collect(),
            ..DiffOptions::default()
        }
    }

    #[test]
    fn test_removes_ignored_keys_at_every_depth() {
        let document = json!({"a": 1, "b": {"a": 2, "c": 3}, "d": [{"a": 4, "e": 5}]});

        let normalized = normalize(&document, &options_with_ignored_keys(&["a"])).unwrap();

        assert_eq!(normalized, json!({"b": {"c": 3}, "d": [{"e": 5}]}));
    }

    #[test]
    fn test_sorts_primitive_arrays_into_canonical_order() {
        let options = DiffOptions {
            ignore_array_order: true,
            ..DiffOptions::default()
        };

        let left = normalize(&json!([1, 2, 3]), &options).unwrap();
        let right = normalize(&json!([3, 2, 1]), &options).unwrap();

        assert_eq!(left, right);
        assert_eq!(left, json!([1, 2, 3]));
    }

    #[test]
    fn test_sorts_object_arrays_by_canonical_serialization() {
        let options = DiffOptions {
            ignore_array_order: true,
            ..DiffOptions::default()
        };

        let left = normalize(&json!([{"id": 2}, {"id": 1}]), &options).unwrap();
        let right = normalize(&json!([{"id": 1}, {"id": 2}]), &options).unwrap();

        assert_eq!(left, right);
    }

    #[test]
    fn test_sorts_object_keys_alphabetically() {
        let options = DiffOptions {
            sort_keys: true,
            ..DiffOptions::default()
        };

        let normalized = normalize(&json!({"b": 1, "a": {"d": 2, "c": 3}}), &options).unwrap();

        let keys: Vec<_> = normalized.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b"]);
        let nested: Vec<_> = normalized["a"].as_object().unwrap().keys().collect();
        assert_eq!(nested, ["c", "d"]);
    }

    #[test]
    fn test_key_removal_happens_before_sorting() {
        // The removed key must not reappear nor influence array ordering.
        let options = DiffOptions {
            ignore_array_order: true,
            sort_keys: true,
            ignore_keys: vec!["z".to_owned()],
            ..DiffOptions::default()
        };

        let left = normalize(&json!([{"id": 1, "z": "zzz"}, {"id": 2, "z": "aaa"}]), &options);
        let right = normalize(&json!([{"id": 2}, {"id": 1}]), &options);

        assert_eq!(left.unwrap(), right.unwrap());
    }

    #[test_case(json!({"b": [3, 1, 2], "a": null}); "object with array")]
    #[test_case(json!([{"y": 1, "x": 2}, "text", 4, true]); "mixed array")]
    #[test_case(json!(null); "null")]
    fn test_normalize_is_idempotent(document: Value) {
        let options = DiffOptions {
            ignore_key_order: true,
            ignore_array_order: true,
            ignore_keys: vec!["x".to_owned()],
            sort_keys: true,
        };

        let once = normalize(&document, &options).unwrap();
        let twice = normalize(&once, &options).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_mixed_type_arrays_sort_deterministically() {
        let options = DiffOptions {
            ignore_array_order: true,
            ..DiffOptions::default()
        };

        let left = normalize(&json!([true, "b", 1, null]), &options).unwrap();
        let right = normalize(&json!([null, 1, "b", true]), &options).unwrap();

        assert_eq!(left, right);
        assert_eq!(left, json!([null, true, 1, "b"]));
    }

    #[test]
    fn test_numbers_and_digit_strings_sort_consistently() {
        // Multi-digit numbers next to digit strings must not depend on the
        // starting permutation: 10 sorts after 9 numerically but before
        // "5" and "9" by type.
        let options = DiffOptions {
            ignore_array_order: true,
            ..DiffOptions::default()
        };

        let left = normalize(&json!([9, 10, "5"]), &options).unwrap();
        let right = normalize(&json!(["5", 10, 9]), &options).unwrap();

        assert_eq!(left, right);
        assert_eq!(left, json!([9, 10, "5"]));
    }

    #[test]
    fn test_rejects_too_deeply_nested_documents() {
        let mut document = json!(1);
        for _ in 0..=MAX_DEPTH {
            document = json!([document]);
        }

        let result = normalize(&document, &DiffOptions::default());

        assert!(matches!(
            result,
            Err(DiffCoreError::TooDeeplyNested { .. })
        ));
    }
}
