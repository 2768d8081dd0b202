//! Builder API for ergonomic item construction.
//!
//! # Example
//!
//! ```rust
//! use item_codec::model::builder::ItemBuilder;
//! use item_codec::{Enchantment, ItemKind};
//!
//! let sword = ItemBuilder::new(ItemKind::IronSword)
//!     .durability(5)
//!     .enchant(Enchantment::Sharpness, 3)
//!     .name("Old Faithful")
//!     .lore(["Still sharp."])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(sword.amount, 1);
//! assert_eq!(sword.meta.unwrap().name(), Some("Old Faithful"));
//! ```

use crate::error::MetaError;
use crate::model::{
    BookMeta, DisplayMeta, Enchantment, FireworkBurst, FireworkMeta, ItemKind, ItemRecord,
    MetaVariant, PotionEffect, PotionMeta, Rgb,
};
use crate::tag::{CompoundTag, Tag};

/// Builder for constructing an [`ItemRecord`].
///
/// Variants are collected as given and checked against the kind in
/// [`build`](Self::build), so a misplaced variant is reported instead of lost.
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    item: ItemRecord,
    display: DisplayMeta,
    variants: Vec<MetaVariant>,
}

impl ItemBuilder {
    /// Starts a stack of one `kind`.
    pub fn new(kind: ItemKind) -> Self {
        Self {
            item: ItemRecord::new(kind),
            display: DisplayMeta::default(),
            variants: Vec::new(),
        }
    }

    pub fn durability(mut self, durability: i16) -> Self {
        self.item.durability = durability;
        self
    }

    pub fn amount(mut self, amount: i32) -> Self {
        self.item.amount = amount;
        self
    }

    /// Adds (or replaces) an enchantment level.
    pub fn enchant(mut self, enchantment: Enchantment, level: i32) -> Self {
        self.item.enchantments.insert(enchantment, level);
        self
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.display.name = Some(name.into());
        self
    }

    pub fn lore<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display.lore = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    pub fn color(self, color: Rgb) -> Self {
        self.variant(MetaVariant::Color(color))
    }

    pub fn owner(self, owner: impl Into<String>) -> Self {
        self.variant(MetaVariant::Owner(owner.into()))
    }

    pub fn scaling(self, scaling: bool) -> Self {
        self.variant(MetaVariant::Scaling(scaling))
    }

    pub fn effects(self, effects: impl IntoIterator<Item = PotionEffect>) -> Self {
        self.variant(MetaVariant::Potion(PotionMeta {
            effects: effects.into_iter().collect(),
        }))
    }

    pub fn book(self, book: BookMeta) -> Self {
        self.variant(MetaVariant::Book(book))
    }

    pub fn burst(self, burst: FireworkBurst) -> Self {
        self.variant(MetaVariant::Burst(burst))
    }

    pub fn firework(self, firework: FireworkMeta) -> Self {
        self.variant(MetaVariant::Firework(firework))
    }

    /// Adds an arbitrary variant.
    pub fn variant(mut self, variant: MetaVariant) -> Self {
        self.variants.push(variant);
        self
    }

    // =========================================================================
    // Payload
    // =========================================================================

    /// Writes a value into the persistent payload at a dotted path.
    pub fn tag_value(mut self, path: &str, value: impl Into<Tag>) -> Self {
        self.item.tag.put(path, value);
        self
    }

    /// Replaces the persistent payload.
    pub fn tag(mut self, tag: CompoundTag) -> Self {
        self.item.tag = tag;
        self
    }

    /// Builds the item, rejecting variants the kind cannot carry.
    pub fn build(self) -> Result<ItemRecord, MetaError> {
        let mut item = self.item;
        if !self.display.is_empty() {
            item.meta_mut().insert(MetaVariant::Display(self.display))?;
        }
        for variant in self.variants {
            item.meta_mut().insert(variant)?;
        }
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MetaClass, MetaTag, PotionEffectType};

    #[test]
    fn test_builder_basic() {
        let item = ItemBuilder::new(ItemKind::IronSword)
            .durability(5)
            .enchant(Enchantment::Sharpness, 3)
            .build()
            .unwrap();

        assert_eq!(item.kind, ItemKind::IronSword);
        assert_eq!(item.durability, 5);
        assert_eq!(item.amount, 1);
        assert_eq!(item.enchantments.get(&Enchantment::Sharpness), Some(&3));
        assert!(item.meta.is_none());
    }

    #[test]
    fn test_builder_potion() {
        let item = ItemBuilder::new(ItemKind::SplashPotion)
            .name("Brew")
            .effects([PotionEffect::new(PotionEffectType::Speed, 200, 1)])
            .build()
            .unwrap();

        let meta = item.meta.unwrap();
        assert_eq!(meta.class(), MetaClass::Potion);
        assert_eq!(meta.potion().unwrap().effects.len(), 1);
        assert_eq!(meta.name(), Some("Brew"));
    }

    #[test]
    fn test_builder_rejects_illegal_variant() {
        let err = ItemBuilder::new(ItemKind::Stick)
            .owner("Notch")
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            MetaError::IllegalVariant {
                class: MetaClass::Plain,
                tag: MetaTag::Owner
            }
        );
    }

    #[test]
    fn test_builder_tag_value() {
        let item = ItemBuilder::new(ItemKind::Paper)
            .tag_value("custom.id", 7i32)
            .build()
            .unwrap();
        assert_eq!(item.tag.get_i32("custom.id", 0), 7);
    }
}
