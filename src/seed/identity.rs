use std::collections::HashMap;

use crate::model::{Id, LookupKey};

/// Natural key to surrogate id, built up during one seeding pass.
///
/// Only ids reported back by the writer go in here, so every entry matches
/// what is actually stored.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    ids: HashMap<LookupKey, Id>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, natural_key: &str, locale: &str, id: Id) {
        self.ids.insert(LookupKey::new(natural_key, locale), id);
    }

    pub fn get(&self, natural_key: &str, locale: &str) -> Option<&Id> {
        self.ids.get(&LookupKey::new(natural_key, locale))
    }

    pub fn insert(&mut self, key: LookupKey, id: Id) {
        self.ids.insert(key, id);
    }

    pub fn resolve(&self, key: &LookupKey) -> Option<&Id> {
        self.ids.get(key)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
