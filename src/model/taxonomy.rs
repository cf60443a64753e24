//! Declarative taxonomy source: the human-authored description of sets and
//! options that the compiler turns into a [`SeedPlan`](super::SeedPlan).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of a seed source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedSource {
    #[serde(rename = "_format", default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default)]
    pub sets: Vec<SetDef>,
    #[serde(default)]
    pub options: Vec<OptionDef>,
}

impl SeedSource {
    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDef {
    pub name: String,
    /// Fallback label for locales missing from `labels`
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Set holding the parents of this set's options. Defaults to the set itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl SetDef {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            labels: BTreeMap::new(),
            active: true,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn label_for(&self, locale: &str) -> &str {
        match self.labels.get(locale) {
            Some(label) if !label.is_empty() => label,
            _ if !self.label.is_empty() => &self.label,
            _ => &self.name,
        }
    }

    pub fn parent_set(&self) -> &str {
        self.parent.as_deref().unwrap_or(&self.name)
    }
}

/// One option in one locale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDef {
    pub set: String,
    pub key: String,
    #[serde(default)]
    pub short_code: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Natural key of the parent: `"key"` or `"set:key"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,
    pub locale: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub order: i32,
}

impl OptionDef {
    pub fn new(set: impl Into<String>, key: impl Into<String>, locale: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            set: set.into(),
            short_code: key.clone(),
            value: key.clone(),
            key,
            labels: BTreeMap::new(),
            parent_key: None,
            locale: locale.into(),
            active: true,
            order: 0,
        }
    }

    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.parent_key = Some(parent_key.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(self.locale.clone(), label.into());
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Label in the option's own locale, falling back to its value
    pub fn label(&self) -> &str {
        match self.labels.get(&self.locale) {
            Some(label) if !label.is_empty() => label,
            _ => self.value(),
        }
    }

    /// Stored value; the key when the source leaves it out
    pub fn value(&self) -> &str {
        or_key(&self.value, &self.key)
    }

    pub fn short_code(&self) -> &str {
        or_key(&self.short_code, &self.key)
    }

    /// Splits `parent_key` into (set, key). A bare key lives in `default_set`.
    pub fn parent_ref<'a>(&'a self, default_set: &'a str) -> Option<(&'a str, &'a str)> {
        let parent = self.parent_key.as_deref()?;
        Some(match parent.split_once(':') {
            Some((set, key)) => (set, key),
            None => (default_set, parent),
        })
    }
}

fn or_key<'a>(field: &'a str, key: &'a str) -> &'a str {
    if field.is_empty() {
        key
    } else {
        field
    }
}

fn default_active() -> bool {
    true
}
