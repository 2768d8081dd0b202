//! Copy-on-write view over an item's attribute modifiers.

use tracing::debug;
use uuid::Uuid;

use super::{AttributeModifier, AttributeRegistry, ATTRIBUTE_MODIFIERS_KEY};
use crate::error::AttributeError;
use crate::model::id::from_halves;
use crate::model::ItemRecord;
use crate::tag::{CompoundTag, Tag};

/// Attribute modifiers of one item.
///
/// Reads decode the payload on demand. Every edit returns a new
/// [`ItemRecord`]; the borrowed item is never touched.
#[derive(Debug, Clone, Copy)]
pub struct AttributeStore<'a> {
    item: &'a ItemRecord,
    registry: &'a AttributeRegistry,
}

impl<'a> AttributeStore<'a> {
    pub fn new(item: &'a ItemRecord, registry: &'a AttributeRegistry) -> Self {
        Self { item, registry }
    }

    pub fn item(&self) -> &'a ItemRecord {
        self.item
    }

    fn entries(&self) -> &'a [Tag] {
        self.item.tag.list(ATTRIBUTE_MODIFIERS_KEY).unwrap_or(&[])
    }

    /// Decoded modifiers, in payload order.
    ///
    /// Each call starts a fresh pass over the payload. Entries that are not
    /// compounds, or carry an unknown operation, are skipped.
    pub fn values(&self) -> impl Iterator<Item = AttributeModifier> + 'a {
        let registry = self.registry;
        self.entries().iter().filter_map(move |entry| {
            let decoded = entry
                .as_compound()
                .and_then(|c| AttributeModifier::from_tag(c, registry));
            if decoded.is_none() {
                debug!(tag_type = entry.type_id(), "skipping undecodable attribute modifier");
            }
            decoded
        })
    }

    pub fn get(&self, uuid: Uuid) -> Option<AttributeModifier> {
        self.values().find(|m| m.uuid == uuid)
    }

    pub fn contains(&self, uuid: Uuid) -> bool {
        self.get(uuid).is_some()
    }

    /// Number of raw entries in the payload list.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Appends `modifier`. An identity already present is rejected, even on
    /// an entry that no longer decodes.
    pub fn add(&self, modifier: &AttributeModifier) -> Result<ItemRecord, AttributeError> {
        if self.entries().iter().any(|entry| entry_uuid(entry) == Some(modifier.uuid)) {
            return Err(AttributeError::DuplicateModifier {
                uuid: modifier.uuid,
            });
        }
        let mut entries = self.entries().to_vec();
        entries.push(Tag::Compound(modifier.to_tag()));
        Ok(self.with_entries(entries))
    }

    /// Drops the modifier with `uuid`; returns an unchanged copy if absent.
    pub fn remove(&self, uuid: Uuid) -> ItemRecord {
        let entries = self
            .entries()
            .iter()
            .filter(|entry| entry_uuid(entry) != Some(uuid))
            .cloned()
            .collect();
        self.with_entries(entries)
    }

    /// Applies `mutator` to the modifier with `uuid`, creating a default one
    /// first if absent. An entry with that uuid that fails to decode is
    /// replaced by the default. The uuid is restored after the mutator runs.
    pub fn update<F>(&self, uuid: Uuid, mutator: F) -> ItemRecord
    where
        F: FnOnce(&mut AttributeModifier),
    {
        let mut entries = self.entries().to_vec();
        let position = entries
            .iter()
            .position(|entry| entry_uuid(entry) == Some(uuid));

        let mut modifier = position
            .and_then(|i| entries[i].as_compound())
            .and_then(|c| AttributeModifier::from_tag(c, self.registry))
            .unwrap_or_else(|| AttributeModifier::default_with_uuid(uuid, self.registry));
        mutator(&mut modifier);
        modifier.uuid = uuid;

        let encoded = Tag::Compound(modifier.to_tag());
        match position {
            Some(i) => entries[i] = encoded,
            None => entries.push(encoded),
        }
        self.with_entries(entries)
    }

    /// Removes every modifier.
    pub fn clear(&self) -> ItemRecord {
        self.with_entries(Vec::new())
    }

    fn with_entries(&self, entries: Vec<Tag>) -> ItemRecord {
        let mut item = self.item.clone();
        if entries.is_empty() {
            item.tag.remove(ATTRIBUTE_MODIFIERS_KEY);
        } else {
            item.tag.put(ATTRIBUTE_MODIFIERS_KEY, entries);
        }
        item
    }
}

/// Identity of a payload entry, read from its uuid halves alone.
pub(crate) fn entry_uuid(entry: &Tag) -> Option<Uuid> {
    entry
        .as_compound()
        .map(|c| from_halves(c.get_i64("UUIDMost", 0), c.get_i64("UUIDLeast", 0)))
}

/// Re-embeds a full modifier list into `tag`, replacing any existing one.
pub(crate) fn embed(tag: &mut CompoundTag, modifiers: &[AttributeModifier]) {
    if modifiers.is_empty() {
        tag.remove(ATTRIBUTE_MODIFIERS_KEY);
        return;
    }
    let entries: Vec<Tag> = modifiers.iter().map(|m| Tag::Compound(m.to_tag())).collect();
    tag.put(ATTRIBUTE_MODIFIERS_KEY, entries);
}
