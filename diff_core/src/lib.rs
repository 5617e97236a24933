mod differ;
mod errors;
mod format;
mod normalizer;
mod options;
mod schema;
mod utils;
mod validator;

pub use differ::{DiffStats, count_differences, count_differences_str, diff_stats, diff_stats_str};
pub use errors::DiffCoreError;
pub use format::{Format, convert, detect_format, format_json, parse, serialize};
pub use normalizer::normalize;
pub use options::DiffOptions;
pub use schema::{SchemaValidationReport, SchemaViolation, validate_against_schema};
pub use utils::{byte_len, human_readable_size};
pub use validator::{ValidationResult, validate};

/// Documents deeper than this are rejected instead of risking a stack
/// overflow on malicious or accidental input.
pub(crate) const MAX_DEPTH: usize = 128;
