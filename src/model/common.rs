use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type Id = String;

/// Actor recorded in the audit fields of everything written by seeding
pub const SYSTEM_ACTOR: &str = "system";

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// What to do when an option's parent cannot be found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingParentPolicy {
    /// Report the dangling reference as an error
    #[default]
    Fail,
    /// Keep the option but store it at root level, with a warning
    TreatAsRoot,
}

/// Audit fields shared by every seeded document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: String,
}

impl Audit {
    pub fn system() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            created_by: SYSTEM_ACTOR.to_string(),
            updated_at: now,
            updated_by: SYSTEM_ACTOR.to_string(),
        }
    }
}
