//! Compiled seed plans: the ordered operations one seed unit applies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key used to find the surrogate id assigned to an entity during one pass.
///
/// The format is `"<natural key>:<locale>"`, where the natural key of a set is
/// its name and the natural key of an option is `"<set>:<key>"`. The code
/// generator and the runtime identity map both derive keys through here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    pub fn new(natural_key: &str, locale: &str) -> Self {
        Self(format!("{}:{}", natural_key, locale))
    }

    pub fn set(name: &str, locale: &str) -> Self {
        Self::new(name, locale)
    }

    pub fn option(set: &str, key: &str, locale: &str) -> Self {
        Self::new(&option_natural_key(set, key), locale)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wraps a key that is already in lookup format
impl From<&str> for LookupKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn option_natural_key(set: &str, key: &str) -> String {
    format!("{}:{}", set, key)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOp {
    pub name: String,
    pub locale: String,
    pub label: String,
    pub description: String,
    pub active: bool,
}

impl SetOp {
    pub fn lookup_key(&self) -> LookupKey {
        LookupKey::set(&self.name, &self.locale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionOp {
    pub set: String,
    pub key: String,
    pub locale: String,
    pub short_code: String,
    pub label: String,
    pub description: String,
    pub value: String,
    pub order: i32,
    pub active: bool,
    /// Lookup key of the parent option, always in this option's locale
    pub parent: Option<LookupKey>,
}

impl OptionOp {
    pub fn lookup_key(&self) -> LookupKey {
        LookupKey::option(&self.set, &self.key, &self.locale)
    }

    pub fn set_lookup_key(&self) -> LookupKey {
        LookupKey::set(&self.set, &self.locale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SeedOperation {
    UpsertSet(SetOp),
    UpsertOption(OptionOp),
}

impl SeedOperation {
    pub fn lookup_key(&self) -> LookupKey {
        match self {
            SeedOperation::UpsertSet(set) => set.lookup_key(),
            SeedOperation::UpsertOption(option) => option.lookup_key(),
        }
    }
}

/// Ordered write operations. Sets come first, then options in an order where
/// every parent precedes its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedPlan {
    operations: Vec<SeedOperation>,
}

impl SeedPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            operations: Vec::with_capacity(capacity),
        }
    }

    pub fn push_set(&mut self, set: SetOp) -> LookupKey {
        let key = set.lookup_key();
        self.operations.push(SeedOperation::UpsertSet(set));
        key
    }

    pub fn push_option(&mut self, option: OptionOp) -> LookupKey {
        let key = option.lookup_key();
        self.operations.push(SeedOperation::UpsertOption(option));
        key
    }

    pub fn operations(&self) -> &[SeedOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn sets(&self) -> impl Iterator<Item = &SetOp> {
        self.operations.iter().filter_map(|op| match op {
            SeedOperation::UpsertSet(set) => Some(set),
            SeedOperation::UpsertOption(_) => None,
        })
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionOp> {
        self.operations.iter().filter_map(|op| match op {
            SeedOperation::UpsertOption(option) => Some(option),
            SeedOperation::UpsertSet(_) => None,
        })
    }
}
