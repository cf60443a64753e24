use crate::model::{Audit, Id};
use serde::{Deserialize, Serialize};

pub const SETS_COLLECTION: &str = "sets";
pub const OPTIONS_COLLECTION: &str = "options";

/// A set as persisted, one document per (name, locale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionarySet {
    #[serde(rename = "_id")]
    pub id: Id,
    pub name: String,
    pub locale: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

/// An option as persisted, one document per (set_id, key, locale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryOption {
    #[serde(rename = "_id")]
    pub id: Id,
    pub set_id: Id,
    /// Always written, `null` for root-level options
    pub parent_id: Option<Id>,
    pub locale: String,
    #[serde(default)]
    pub short_code: String,
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub value: String,
    pub order: i32,
    pub active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}
