mod xml;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DiffCoreError;

/// The textual representations the bridge can translate between. Every
/// conversion routes through the in-memory `Value` tree, JSON being the
/// common intermediate form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    Xml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

impl FromStr for Format {
    type Err = DiffCoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "xml" => Ok(Self::Xml),
            other => Err(DiffCoreError::UnknownFormat(other.to_owned())),
        }
    }
}

/// Guess the format of a document by structural sniffing. YAML is the
/// fallback because it is the most syntactically permissive of the three.
pub fn detect_format(text: &str) -> Format {
    let trimmed = text.trim();

    if trimmed.starts_with('<') && trimmed.ends_with('>') {
        return Format::Xml;
    }

    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
    {
        return Format::Json;
    }

    Format::Yaml
}

/// Parse `text` in the given format into the universal `Value` tree.
pub fn parse(text: &str, format: Format) -> Result<Value, DiffCoreError> {
    match format {
        Format::Json => serde_json::from_str(text).map_err(|error| DiffCoreError::Parse {
            format: "JSON",
            message: error.to_string(),
        }),
        Format::Yaml => serde_yaml::from_str(text).map_err(|error| DiffCoreError::Parse {
            format: "YAML",
            message: error.to_string(),
        }),
        Format::Xml => xml::parse(text),
    }
}

/// Serialize a `Value` tree in the given format.
pub fn serialize(value: &Value, format: Format) -> Result<String, DiffCoreError> {
    match format {
        Format::Json => {
            serde_json::to_string_pretty(value).map_err(|error| DiffCoreError::Serialize {
                format: "JSON",
                message: error.to_string(),
            })
        }
        Format::Yaml => serde_yaml::to_string(value).map_err(|error| DiffCoreError::Serialize {
            format: "YAML",
            message: error.to_string(),
        }),
        Format::Xml => xml::serialize(value),
    }
}

/// Convert between textual representations. A same-format "conversion" still
/// performs a full parse and reserialize, which validates and canonicalizes
/// the input.
pub fn convert(text: &str, from: Format, to: Format) -> Result<String, DiffCoreError> {
    let value = parse(text, from)?;
    serialize(&value, to)
}

/// Pretty-print (or minify) a JSON document with a configurable indent
/// width.
pub fn format_json(text: &str, tab_size: usize, minify: bool) -> Result<String, DiffCoreError> {
    let value = parse(text, Format::Json)?;

    if minify {
        return serde_json::to_string(&value).map_err(|error| DiffCoreError::Serialize {
            format: "JSON",
            message: error.to_string(),
        });
    }

    let indent = " ".repeat(tab_size.clamp(1, 16));
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|error| DiffCoreError::Serialize {
            format: "JSON",
            message: error.to_string(),
        })?;

    String::from_utf8(buffer).map_err(|error| DiffCoreError::Serialize {
        format: "JSON",
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[test_case(r#"{"a": 1}"#, Format::Json; "object")]
    #[test_case("  [1, 2]  ", Format::Json; "padded array")]
    #[test_case("<root><a>1</a></root>", Format::Xml; "xml element")]
    #[test_case("a: 1\nb: 2", Format::Yaml; "yaml mapping")]
    #[test_case("just some text", Format::Yaml; "plain text falls back to yaml")]
    fn test_detect_format(text: &str, expected: Format) {
        assert_eq!(detect_format(text), expected);
    }

    #[test]
    fn test_json_yaml_round_trip_preserves_the_value() {
        let source = r#"{"name": "John", "tags": ["a", "b"], "age": 30}"#;

        let yaml = convert(source, Format::Json, Format::Yaml).unwrap();
        let back = convert(&yaml, Format::Yaml, Format::Json).unwrap();

        let original: Value = serde_json::from_str(source).unwrap();
        let round_tripped: Value = serde_json::from_str(&back).unwrap();
        assert_eq!(original, round_tripped);
    }

    #[test]
    fn test_same_format_conversion_canonicalizes() {
        let converted = convert("{\"a\":\n1}", Format::Json, Format::Json).unwrap();

        let value: Value = serde_json::from_str(&converted).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_parse_failure_surfaces_as_an_error_value() {
        let result = convert("{broken", Format::Json, Format::Yaml);

        assert!(matches!(
            result,
            Err(DiffCoreError::Parse { format: "JSON", .. })
        ));
    }

    #[test]
    fn test_format_json_uses_the_requested_indent() {
        let formatted = format_json(r#"{"a":{"b":1}}"#, 4, false).unwrap();

        assert!(formatted.contains("\n    \"a\""));
        assert!(formatted.contains("\n        \"b\""));
    }

    #[test]
    fn test_format_json_minifies() {
        let formatted = format_json("{ \"a\" : [ 1 , 2 ] }", 2, true).unwrap();

        assert_eq!(formatted, r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_format_round_trips_case_insensitively() {
        assert_eq!("YAML".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("yml".parse::<Format>().unwrap(), Format::Yaml);
        assert!(matches!(
            "toml".parse::<Format>(),
            Err(DiffCoreError::UnknownFormat(_))
        ));
    }
}
