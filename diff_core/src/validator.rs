use serde::Serialize;
use serde_json::Value;

/// Outcome of checking that a piece of text is well-formed JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_number: Option<usize>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            ..Self::default()
        }
    }
}

/// Check whether `text` parses as JSON. Never panics; every failure state is
/// represented in the returned record.
///
/// Empty or whitespace-only input is considered valid: it represents "no
/// content yet" in a live-typing editor, not an error. On failure the
/// parser's 1-based line and column are surfaced when it reports them.
pub fn validate(text: &str) -> ValidationResult {
    if text.trim().is_empty() {
        return ValidationResult::valid();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(_) => ValidationResult::valid(),
        Err(error) => {
            let line = error.line();
            let column = error.column();

            ValidationResult {
                is_valid: false,
                error: Some(error.to_string()),
                line_number: (line > 0).then_some(line),
                column_number: (column > 0).then_some(column),
            }
        }
    }
}
