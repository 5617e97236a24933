use chrono::{DateTime, Utc};

pub type ShareToken = String;

/// One stored, shareable diff. The `tags` column holds a JSON-encoded
/// string array; use [`SavedDiff::tag_list`] to decode it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedDiff {
    pub id: uuid::Uuid,
    pub diff_type: String,
    pub original_content: String,
    pub modified_content: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: bool,
    pub tags: String,
    pub share_token: ShareToken,
    pub view_count: i64,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl SavedDiff {
    pub fn tag_list(&self) -> Vec<String> {
        serde_json::from_str(&self.tags).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn saved_diff_with_tags(tags: &str) -> SavedDiff {
        SavedDiff {
            id: uuid::Uuid::new_v4(),
            diff_type: "json".to_owned(),
            original_content: "{}".to_owned(),
            modified_content: "{}".to_owned(),
            title: None,
            description: None,
            is_public: true,
            tags: tags.to_owned(),
            share_token: "token".to_owned(),
            view_count: 0,
            created_date: Utc::now(),
            updated_date: Utc::now(),
        }
    }

    #[test]
    fn test_tag_list_decodes_the_stored_json() {
        let diff = saved_diff_with_tags(r#"["api", "staging"]"#);

        assert_eq!(diff.tag_list(), vec!["api", "staging"]);
    }

    #[test]
    fn test_tag_list_tolerates_corrupt_data() {
        let diff = saved_diff_with_tags("not json");

        assert_eq!(diff.tag_list(), Vec::<String>::new());
    }
}
