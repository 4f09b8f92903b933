//! The `orders.json` document
//!
//! Entries are decoded one at a time. An entry that does not decode (for
//! example an empty `DietType` left by an older admin tool) is logged and
//! kept as raw JSON, so it is written back unchanged and never hides the
//! rest of the map.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::MealOrder;

/// Order map: `"{date}_{empId}_{mealType}"` → order
#[derive(Debug, Clone, Default)]
pub struct OrderMap {
    entries: BTreeMap<String, MealOrder>,
    unreadable: BTreeMap<String, Value>,
}

impl OrderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&MealOrder> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut MealOrder> {
        self.entries.get_mut(key)
    }

    /// Insert or overwrite; replaces an unreadable entry at the same key
    pub fn insert(&mut self, key: String, order: MealOrder) -> Option<MealOrder> {
        self.unreadable.remove(&key);
        self.entries.insert(key, order)
    }

    /// Remove a readable entry; unreadable ones are only replaced by `insert`
    pub fn remove(&mut self, key: &str) -> Option<MealOrder> {
        self.entries.remove(key)
    }

    /// Readable orders
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Keys of entries that failed to decode
    pub fn unreadable_keys(&self) -> impl Iterator<Item = &str> {
        self.unreadable.keys().map(String::as_str)
    }

    pub fn into_entries(self) -> BTreeMap<String, MealOrder> {
        self.entries
    }
}

impl<const N: usize> From<[(String, MealOrder); N]> for OrderMap {
    fn from(entries: [(String, MealOrder); N]) -> Self {
        Self {
            entries: BTreeMap::from(entries),
            unreadable: BTreeMap::new(),
        }
    }
}

impl Serialize for OrderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + self.unreadable.len()))?;
        for (key, order) in &self.entries {
            map.serialize_entry(key, order)?;
        }
        for (key, raw) in &self.unreadable {
            map.serialize_entry(key, raw)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrderMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut map = OrderMap::default();
        for (key, value) in raw {
            match MealOrder::deserialize(&value) {
                Ok(order) => {
                    map.entries.insert(key, order);
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Skipping unreadable order entry");
                    map.unreadable.insert(key, value);
                }
            }
        }
        Ok(map)
    }
}
