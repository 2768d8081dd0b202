//! Data model types.
//!
//! - Item kinds and the kind → metadata class table
//! - Enchantments
//! - Metadata variants
//! - The item record and its builder
//! - Locations and UUID helpers

pub mod builder;
pub mod enchant;
pub mod id;
pub mod item;
pub mod kind;
pub mod location;
pub mod meta;

pub use builder::ItemBuilder;
pub use enchant::Enchantment;
pub use id::derived_uuid;
pub use item::ItemRecord;
pub use kind::{ItemKind, MetaClass, MetaTag};
pub use location::{Location, LocationStyle};
pub use meta::{
    BookMeta, BurstShape, DisplayMeta, FireworkBurst, FireworkMeta, ItemMeta, MetaVariant,
    PotionEffect, PotionEffectType, PotionMeta, Rgb,
};
