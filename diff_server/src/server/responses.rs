use chrono::{DateTime, Utc};
use diff_core::{DiffOptions, DiffStats, SchemaViolation, diff_stats_str};
use schemars::JsonSchema;
use serde::{self, Serialize};

use super::requests::DiffOptionsBody;
use crate::database::models::{SavedDiff, ShareToken};

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub server_version: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffResponse {
    pub difference_count: u64,
    pub is_valid: bool,
    pub processed_original: String,
    pub processed_modified: String,
    pub applied_options: DiffOptionsBody,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub is_valid: bool,
    pub errors: Vec<SchemaViolationBody>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaViolationBody {
    pub path: String,
    pub message: String,
    pub keyword: String,
}

impl From<SchemaViolation> for SchemaViolationBody {
    fn from(violation: SchemaViolation) -> Self {
        Self {
            path: violation.path,
            message: violation.message,
            keyword: violation.keyword,
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormatResponse {
    pub formatted: String,
    pub size: usize,
    pub size_human: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub converted: String,
    pub detected_format: String,
}

#[derive(Debug, Clone, Copy, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffStatsBody {
    pub added: u64,
    pub removed: u64,
    pub modified: u64,
    pub unchanged: u64,
    pub total: u64,
}

impl From<DiffStats> for DiffStatsBody {
    fn from(stats: DiffStats) -> Self {
        Self {
            added: stats.added,
            removed: stats.removed,
            modified: stats.modified,
            unchanged: stats.unchanged,
            total: stats.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedDiffResponse {
    pub id: uuid::Uuid,
    pub diff_type: String,
    pub original: String,
    pub modified: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub share_token: ShareToken,
    pub view_count: i64,
    pub created_date: DateTime<Utc>,
    pub stats: DiffStatsBody,
}

impl From<SavedDiff> for SavedDiffResponse {
    fn from(diff: SavedDiff) -> Self {
        // Stats are recomputed on load; for non-JSON diff types this
        // falls back to all zeroes.
        let stats = diff_stats_str(
            &diff.original_content,
            &diff.modified_content,
            &DiffOptions::default(),
        );

        let tags = diff.tag_list();

        Self {
            id: diff.id,
            diff_type: diff.diff_type,
            tags,
            original: diff.original_content,
            modified: diff.modified_content,
            title: diff.title,
            description: diff.description,
            is_public: diff.is_public,
            share_token: diff.share_token,
            view_count: diff.view_count,
            created_date: diff.created_date,
            stats: stats.into(),
        }
    }
}
