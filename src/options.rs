use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

/// Immutable mapping of Startup option keys to values.
///
/// Values may be null (`None`), which is distinct from the key being absent.
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionMap {
    entries: HashMap<String, Option<String>>,
}

impl OptionMap {
    pub fn builder(capacity: usize) -> OptionMapBuilder {
        OptionMapBuilder {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// `None` if the key is absent, `Some(None)` if it is present with a null value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    /// Non-null value for `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).flatten()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Entries ordered by key.
    pub fn sorted(&self) -> Vec<(&str, Option<&str>)> {
        self.iter().sorted_by(|a, b| a.0.cmp(b.0)).collect()
    }
}

/// Accumulates entries for an [`OptionMap`]. Later puts overwrite earlier ones.
#[derive(Debug, Default)]
pub struct OptionMapBuilder {
    entries: HashMap<String, Option<String>>,
}

impl OptionMapBuilder {
    pub fn put(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    pub fn put_all<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Option<String>)>,
    {
        self.entries
            .extend(entries.into_iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn build(self) -> OptionMap {
        OptionMap {
            entries: self.entries,
        }
    }
}
