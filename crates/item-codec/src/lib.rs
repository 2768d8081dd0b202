//! Item metadata codec.
//!
//! This crate maps game item stacks (type, damage, stack size, enchantments
//! and kind-specific metadata) to and from three encodings:
//!
//! - **JSON**: one object per item, arrays for lists
//! - **Config sections**: dotted-path YAML mappings for on-disk persistence
//! - **Compound tags**: the item's own persistent payload, where attribute
//!   modifiers live, with a big-endian named-tag byte form
//!
//! # Quick Start
//!
//! ```rust
//! use item_codec::{AttributeRegistry, Enchantment, ItemBuilder, ItemKind};
//! use item_codec::codec::{decode_item_json, encode_item_json};
//!
//! let registry = AttributeRegistry::with_builtins();
//!
//! let sword = ItemBuilder::new(ItemKind::IronSword)
//!     .durability(5)
//!     .enchant(Enchantment::Sharpness, 3)
//!     .build()
//!     .unwrap();
//!
//! let json = encode_item_json(&sword).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"type":"IRON_SWORD","data":5,"amount":1,"enchants":{"SHARPNESS":3}}"#
//! );
//!
//! let decoded = decode_item_json(&json, &registry).unwrap();
//! assert_eq!(decoded, sword);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Item records, metadata variants, locations
//! - [`tag`]: Compound tag tree and its byte encoding
//! - [`attribute`]: Attribute modifiers stored in the tag payload
//! - [`codec`]: JSON and config-section surfaces
//! - [`validate`]: Encode-time checks
//! - [`error`]: Error types
//! - [`limits`]: Bounds for the tag byte decoder
//!
//! # Decoding
//!
//! Decoders are lenient about content and strict about structure. Unknown
//! fields are ignored, and names that do not resolve (item types,
//! enchantments, effect types, burst shapes, operations) drop only the
//! affected entry. A known field holding the wrong kind of value fails that
//! item with a [`DecodeError`].

pub mod attribute;
pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod tag;
pub mod validate;

pub(crate) mod util;

// Re-export commonly used types at crate root
pub use attribute::{
    AttributeModifier, AttributeRegistry, AttributeStore, AttributeType, ItemStorage, Operation,
};
pub use codec::{
    decode_item_json, decode_item_tag, encode_item_json, encode_item_tag, read_item, write_item,
    ConfigSection, EncodeOptions,
};
pub use error::{AttributeError, DecodeError, EncodeError, MetaError};
pub use model::{
    BookMeta, BurstShape, DisplayMeta, Enchantment, FireworkBurst, FireworkMeta, ItemBuilder,
    ItemKind, ItemMeta, ItemRecord, Location, LocationStyle, MetaClass, MetaTag, MetaVariant,
    PotionEffect, PotionEffectType, PotionMeta, Rgb,
};
pub use tag::{CompoundTag, Tag};
pub use validate::validate_item;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
