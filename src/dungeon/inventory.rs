/// Shared inventory ledger: every held item is its own entry, oldest first.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dungeon::errors::CapacityError;
use crate::dungeon::types::is_limited_item;

/// Default number of each limited item a traveler may hold at once.
pub const DEFAULT_CARRY_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryEntry {
    pub id: EntryId,
    pub name: String,
}

impl InventoryEntry {
    fn matches(&self, lower: &str) -> bool {
        self.name.to_lowercase() == lower
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryLedger {
    /// Insertion order is creation order.
    entries: Vec<InventoryEntry>,
    next_id: u64,
    carry_limit: usize,
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CARRY_LIMIT)
    }
}

impl InventoryLedger {
    pub fn new(carry_limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            carry_limit,
        }
    }

    pub fn carry_limit(&self) -> usize {
        self.carry_limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose name matches `item`, ignoring case.
    pub fn count(&self, item: &str) -> usize {
        let lower = item.to_lowercase();
        self.entries.iter().filter(|e| e.matches(&lower)).count()
    }

    pub fn holds(&self, item: &str) -> bool {
        self.oldest(item).is_some()
    }

    /// Append a new entry, refusing limited items already at the carry limit.
    pub fn add(&mut self, item: &str) -> Result<EntryId, CapacityError> {
        if is_limited_item(item) && self.count(item) >= self.carry_limit {
            return Err(CapacityError {
                item: item.to_string(),
                limit: self.carry_limit,
            });
        }
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(InventoryEntry {
            id,
            name: item.to_string(),
        });
        Ok(id)
    }

    /// Earliest-added entry matching `item`.
    pub fn oldest(&self, item: &str) -> Option<&InventoryEntry> {
        let lower = item.to_lowercase();
        self.entries.iter().find(|e| e.matches(&lower))
    }

    pub fn remove_oldest(&mut self, item: &str) -> Option<InventoryEntry> {
        let id = self.oldest(item)?.id;
        self.remove_specific(id)
    }

    pub fn remove_specific(&mut self, id: EntryId) -> Option<InventoryEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Lower-cased item name to number held.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.name.to_lowercase()).or_insert(0) += 1;
        }
        counts
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
