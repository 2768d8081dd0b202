//! The item record.

use std::collections::BTreeMap;

use crate::attribute::{AttributeRegistry, AttributeStore};
use crate::model::{Enchantment, ItemKind, ItemMeta};
use crate::tag::CompoundTag;

/// A single item stack.
///
/// Records produced by a decoder are plain values; attribute edits go through
/// [`AttributeStore`], which returns fresh records instead of mutating.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub kind: ItemKind,
    /// Damage value, or 0 for kinds without durability.
    pub durability: i16,
    pub amount: i32,
    pub enchantments: BTreeMap<Enchantment, i32>,
    pub meta: Option<ItemMeta>,
    /// Persistent payload carried alongside the stack.
    pub tag: CompoundTag,
}

impl ItemRecord {
    /// The absent item.
    pub fn empty() -> Self {
        Self {
            kind: ItemKind::Empty,
            durability: 0,
            amount: 0,
            enchantments: BTreeMap::new(),
            meta: None,
            tag: CompoundTag::new(),
        }
    }

    /// A stack of one `kind`.
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            amount: if kind.is_empty() { 0 } else { 1 },
            ..Self::empty()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// Returns the meta only if at least one variant is populated.
    pub fn populated_meta(&self) -> Option<&ItemMeta> {
        self.meta.as_ref().filter(|m| !m.is_empty())
    }

    /// Returns the meta, creating an empty one of the kind's class if absent.
    pub fn meta_mut(&mut self) -> &mut ItemMeta {
        let kind = self.kind;
        self.meta.get_or_insert_with(|| ItemMeta::for_kind(kind))
    }

    /// Attribute view over this item's payload.
    pub fn attributes<'a>(&'a self, registry: &'a AttributeRegistry) -> AttributeStore<'a> {
        AttributeStore::new(self, registry)
    }
}

impl Default for ItemRecord {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MetaClass, Rgb};

    #[test]
    fn test_new_defaults() {
        let item = ItemRecord::new(ItemKind::IronSword);
        assert_eq!(item.amount, 1);
        assert_eq!(item.durability, 0);
        assert!(item.enchantments.is_empty());
        assert!(item.meta.is_none());

        assert_eq!(ItemRecord::new(ItemKind::Empty), ItemRecord::empty());
    }

    #[test]
    fn test_meta_mut_uses_kind_class() {
        let mut item = ItemRecord::new(ItemKind::LeatherBoots);
        assert_eq!(item.meta_mut().class(), MetaClass::LeatherArmor);
        assert!(item.populated_meta().is_none());

        item.meta_mut()
            .insert(crate::model::MetaVariant::Color(Rgb::new(1, 2, 3)))
            .unwrap();
        assert!(item.populated_meta().is_some());
    }
}
