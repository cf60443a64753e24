use serde::{Deserialize, Serialize};

pub const SEEDS_COLLECTION: &str = "_seeds";

/// Ledger entry; its existence means the unit has been applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub application: String,
    pub description: String,
    pub applied_at: chrono::DateTime<chrono::Utc>,
}

impl SeedRecord {
    pub fn new(id: impl Into<String>, application: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            application: application.into(),
            description: description.into(),
            applied_at: chrono::Utc::now(),
        }
    }
}
