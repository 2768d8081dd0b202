//! Arbitrary string data hidden in an attribute modifier.
//!
//! The string rides in the `Name` field of a dummy modifier with a fixed
//! uuid, so it survives anything that preserves the item's payload.

use uuid::Uuid;

use super::AttributeRegistry;
use crate::model::{derived_uuid, ItemRecord};

/// Domain prefix for key-derived storage ids.
const STORAGE_KEY_PREFIX: &[u8] = b"item-codec:storage:";

/// A storage slot identified by a modifier uuid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemStorage {
    uuid: Uuid,
}

impl ItemStorage {
    pub fn new(uuid: Uuid) -> Self {
        Self { uuid }
    }

    /// A slot whose uuid is derived from `key`; the same key always maps to
    /// the same slot.
    pub fn for_key(key: &str) -> Self {
        let mut input = Vec::with_capacity(STORAGE_KEY_PREFIX.len() + key.len());
        input.extend_from_slice(STORAGE_KEY_PREFIX);
        input.extend_from_slice(key.as_bytes());
        Self::new(derived_uuid(&input))
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Reads the stored string, if the slot exists on `item`.
    pub fn get_data(&self, item: &ItemRecord, registry: &AttributeRegistry) -> Option<String> {
        item.attributes(registry).get(self.uuid).map(|m| m.name)
    }

    /// Returns a copy of `item` with `data` stored in this slot.
    pub fn set_data(
        &self,
        item: &ItemRecord,
        data: impl Into<String>,
        registry: &AttributeRegistry,
    ) -> ItemRecord {
        let data = data.into();
        item.attributes(registry).update(self.uuid, |m| m.name = data)
    }
}
