// ==========================================
// stockbook - stored documents
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Documents are the high-churn collection (attachments, notes),
// so their writes go through the debounced persistence path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    /// Raw content, base64 when binary.
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            content: content.into(),
            tags: Vec::new(),
            uploaded_at: Utc::now(),
        }
    }
}
