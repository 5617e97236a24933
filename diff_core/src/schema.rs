use std::sync::LazyLock;

use jsonschema::{Draft, JSONSchema};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// A single schema violation, addressed by the instance path it occurred at
/// and the schema keyword that rejected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaValidationReport {
    pub is_valid: bool,
    pub errors: Vec<SchemaViolation>,
}

impl SchemaValidationReport {
    fn valid() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    fn single(path: &str, message: String, keyword: &str) -> Self {
        Self {
            is_valid: false,
            errors: vec![SchemaViolation {
                path: path.to_owned(),
                message,
                keyword: keyword.to_owned(),
            }],
        }
    }
}

// Regexes with nested quantifiers such as `(a+)+` or quantified
// backreferences such as `(\w+)\1+` can take exponential time to reject an
// input. Attacker-supplied schemas must not be able to trigger that.
static NESTED_QUANTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^()]*[+*][^()]*\)\s*[+*{]").expect("scanner regex is valid")
});
static QUANTIFIED_BACKREFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\d+\s*[+*{]").expect("scanner regex is valid"));

fn is_unsafe_pattern(pattern: &str) -> bool {
    NESTED_QUANTIFIER.is_match(pattern) || QUANTIFIED_BACKREFERENCE.is_match(pattern)
}

/// Recursively scan a schema tree for regex patterns that risk catastrophic
/// backtracking. Covers `pattern` values and `patternProperties` keys at
/// every nesting depth.
fn find_unsafe_pattern(schema: &Value) -> Option<&str> {
    match schema {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "pattern" {
                    if let Some(pattern) = child.as_str() {
                        if is_unsafe_pattern(pattern) {
                            return Some(pattern);
                        }
                    }
                }

                if key == "patternProperties" {
                    if let Some(properties) = child.as_object() {
                        if let Some(pattern) =
                            properties.keys().find(|name| is_unsafe_pattern(name))
                        {
                            return Some(pattern);
                        }
                    }
                }

                if let Some(pattern) = find_unsafe_pattern(child) {
                    return Some(pattern);
                }
            }
            None
        }
        Value::Array(elements) => elements.iter().find_map(find_unsafe_pattern),
        _ => None,
    }
}

/// Validate a document against a JSON Schema (Draft 7 semantics).
///
/// Schemas containing regexes flagged as denial-of-service risks are
/// refused outright with a single synthetic violation carrying the keyword
/// `"security"`; the schema is never compiled in that case.
pub fn validate_against_schema(document: &Value, schema: &Value) -> SchemaValidationReport {
    if let Some(pattern) = find_unsafe_pattern(schema) {
        return SchemaValidationReport::single(
            "",
            format!(
                "Schema rejected: pattern '{pattern}' is vulnerable to catastrophic backtracking"
            ),
            "security",
        );
    }

    let compiled = match JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
    {
        Ok(compiled) => compiled,
        Err(error) => {
            return SchemaValidationReport::single(
                &error.instance_path.to_string(),
                format!("Schema compilation failed: {error}"),
                "schema",
            );
        }
    };

    match compiled.validate(document) {
        Ok(()) => SchemaValidationReport::valid(),
        Err(errors) => SchemaValidationReport {
            is_valid: false,
            errors: errors
                .map(|error| SchemaViolation {
                    path: error.instance_path.to_string(),
                    message: error.to_string(),
                    keyword: keyword_of_schema_path(&error.schema_path.to_string()),
                })
                .collect(),
        },
    }
}

/// The violated keyword is the last non-index segment of the schema path,
/// e.g. `/properties/age/minimum` -> `minimum`.
fn keyword_of_schema_path(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .find(|segment| !segment.is_empty() && !segment.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or("unknown")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    fn person_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer", "minimum": 0}
            },
            "required": ["name"]
        })
    }

    #[test]
    fn test_conforming_document_passes() {
        let report = validate_against_schema(&json!({"name": "John", "age": 30}), &person_schema());

        assert_eq!(report, SchemaValidationReport::valid());
    }

    #[test]
    fn test_missing_required_property_is_reported() {
        let report = validate_against_schema(&json!({"age": 30}), &person_schema());

        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].keyword, "required");
    }

    #[test]
    fn test_violation_carries_the_instance_path() {
        let report = validate_against_schema(&json!({"name": "John", "age": -1}), &person_schema());

        assert!(!report.is_valid);
        assert_eq!(report.errors[0].path, "/age");
        assert_eq!(report.errors[0].keyword, "minimum");
    }

    #[test_case(json!({"type": "string", "pattern": "(a+)+$"}); "top level")]
    #[test_case(
        json!({"properties": {"nested": {"pattern": "(x*)*y"}}});
        "nested under properties"
    )]
    #[test_case(
        json!({"patternProperties": {"(b+)+": {"type": "string"}}});
        "pattern properties key"
    )]
    fn test_unsafe_regex_is_refused_with_security_keyword(schema: Value) {
        let report = validate_against_schema(&json!("anything"), &schema);

        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].keyword, "security");
    }

    #[test]
    fn test_quantified_backreference_is_refused() {
        let schema = json!({"type": "string", "pattern": r"(\w+)\1+"});

        let report = validate_against_schema(&json!("anything"), &schema);

        assert_eq!(report.errors[0].keyword, "security");
    }

    #[test]
    fn test_benign_pattern_is_allowed() {
        let schema = json!({"type": "string", "pattern": "^[a-z]+$"});

        let report = validate_against_schema(&json!("abc"), &schema);

        assert!(report.is_valid);
    }

    #[test]
    fn test_invalid_schema_is_reported_as_schema_error() {
        let schema = json!({"type": "not-a-real-type"});

        let report = validate_against_schema(&json!(1), &schema);

        assert!(!report.is_valid);
        assert_eq!(report.errors[0].keyword, "schema");
    }
}
