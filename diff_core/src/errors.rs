use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffCoreError {
    #[error("Document is nested deeper than {max_depth} levels")]
    TooDeeplyNested { max_depth: usize },

    #[error("Failed to parse {format} input: {message}")]
    Parse { format: &'static str, message: String },

    #[error("Failed to serialize value as {format}: {message}")]
    Serialize { format: &'static str, message: String },

    #[error("Unknown format '{0}', expected one of: json, yaml, xml")]
    UnknownFormat(String),
}
