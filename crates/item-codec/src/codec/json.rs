//! JSON surface.
//!
//! One object per item:
//!
//! ```json
//! {"type":"IRON_SWORD","data":5,"amount":1,"enchants":{"SHARPNESS":3},
//!  "meta":{"name":"...","lore":["..."]},
//!  "attributes":[{"uuid":"...","name":"...","attrb":"generic.attackDamage","op":"ADD_NUMBER","value":4.0}]}
//! ```
//!
//! Fields are emitted in that order and only when populated; an empty item is
//! `{}`. Lists of items are plain JSON arrays.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::raw::{RawBurst, RawEffect, RawItem};
use crate::attribute::AttributeRegistry;
use crate::error::{DecodeError, EncodeError};
use crate::model::{FireworkBurst, ItemRecord, Location, PotionEffect};

/// Options for JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indent nested values instead of writing one compact line.
    pub pretty: bool,
}

impl EncodeOptions {
    /// Creates default (compact) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates indented output options.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

fn to_string<T: Serialize>(value: &T, options: EncodeOptions) -> Result<String, EncodeError> {
    let out = if options.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

fn to_writer<W: Write, T: Serialize>(
    writer: W,
    value: &T,
    options: EncodeOptions,
) -> Result<(), EncodeError> {
    if options.pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, DecodeError> {
    serde_json::from_str(input).map_err(DecodeError::from_json)
}

// =============================================================================
// Items
// =============================================================================

/// Encodes an item as a compact JSON object.
pub fn encode_item_json(item: &ItemRecord) -> Result<String, EncodeError> {
    encode_item_json_with_options(item, EncodeOptions::default())
}

/// Encodes an item as a JSON object with the given options.
pub fn encode_item_json_with_options(
    item: &ItemRecord,
    options: EncodeOptions,
) -> Result<String, EncodeError> {
    to_string(&RawItem::from_item(item)?, options)
}

/// Writes an item to `writer`.
pub fn write_item_json<W: Write>(
    writer: W,
    item: &ItemRecord,
    options: EncodeOptions,
) -> Result<(), EncodeError> {
    to_writer(writer, &RawItem::from_item(item)?, options)
}

/// Decodes one item object.
pub fn decode_item_json(input: &str, registry: &AttributeRegistry) -> Result<ItemRecord, DecodeError> {
    from_str::<RawItem>(input)?.resolve(registry)
}

/// Reads one item object from `reader`.
pub fn read_item_json<R: Read>(reader: R, registry: &AttributeRegistry) -> Result<ItemRecord, DecodeError> {
    let raw: RawItem = serde_json::from_reader(reader).map_err(DecodeError::from_json)?;
    raw.resolve(registry)
}

/// Writes items as a JSON array.
pub fn write_items_json<W: Write>(
    writer: W,
    items: &[ItemRecord],
    options: EncodeOptions,
) -> Result<(), EncodeError> {
    let raw = items
        .iter()
        .map(RawItem::from_item)
        .collect::<Result<Vec<_>, _>>()?;
    to_writer(writer, &raw, options)
}

/// Reads a JSON array of items.
///
/// A broken stream fails the whole read. An element with a malformed known
/// field is left out of the result and logged; `null` elements decode as
/// empty items.
pub fn read_items_json<R: Read>(
    reader: R,
    registry: &AttributeRegistry,
) -> Result<Vec<ItemRecord>, DecodeError> {
    let elements: Vec<serde_json::Value> =
        serde_json::from_reader(reader).map_err(DecodeError::from_json)?;

    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if element.is_null() {
            items.push(ItemRecord::empty());
            continue;
        }
        let decoded = RawItem::deserialize(element)
            .map_err(DecodeError::from_json)
            .and_then(|raw| raw.resolve(registry));
        match decoded {
            Ok(item) => items.push(item),
            Err(err) => warn!(index, error = %err, "skipping malformed item"),
        }
    }
    Ok(items)
}

// =============================================================================
// Standalone values
// =============================================================================

/// Encodes a potion effect as `{"type":..,"duration":..,"amplifier":..}`.
pub fn encode_effect_json(effect: &PotionEffect) -> Result<String, EncodeError> {
    to_string(&RawEffect::from(effect), EncodeOptions::default())
}

/// Decodes a potion effect; `None` if its type does not resolve.
pub fn decode_effect_json(input: &str) -> Result<Option<PotionEffect>, DecodeError> {
    Ok(from_str::<RawEffect>(input)?.resolve())
}

/// Encodes a firework burst.
pub fn encode_burst_json(burst: &FireworkBurst) -> Result<String, EncodeError> {
    to_string(&RawBurst::from(burst), EncodeOptions::default())
}

/// Decodes a firework burst; `None` if its shape does not resolve.
pub fn decode_burst_json(input: &str) -> Result<Option<FireworkBurst>, DecodeError> {
    Ok(from_str::<RawBurst>(input)?.resolve())
}

/// Encodes a location as `{"world":..,"x":..,"y":..,"z":..,"yaw":..,"pitch":..}`.
pub fn encode_location_json(location: &Location) -> Result<String, EncodeError> {
    to_string(location, EncodeOptions::default())
}

/// Decodes a location; missing components take the spawn defaults.
pub fn decode_location_json(input: &str) -> Result<Location, DecodeError> {
    from_str(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BurstShape, Enchantment, ItemBuilder, ItemKind, PotionEffectType, Rgb};

    fn registry() -> AttributeRegistry {
        AttributeRegistry::with_builtins()
    }

    #[test]
    fn test_encode_field_order() {
        let item = ItemBuilder::new(ItemKind::IronSword)
            .durability(5)
            .enchant(Enchantment::Sharpness, 3)
            .build()
            .unwrap();
        assert_eq!(
            encode_item_json(&item).unwrap(),
            r#"{"type":"IRON_SWORD","data":5,"amount":1,"enchants":{"SHARPNESS":3}}"#
        );
    }

    #[test]
    fn test_empty_item_is_empty_object() {
        assert_eq!(encode_item_json(&ItemRecord::empty()).unwrap(), "{}");
        let decoded = decode_item_json("{}", &registry()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let decoded = decode_item_json(
            r#"{"type":"APPLE","extra":[1,2,{"deep":true}],"amount":3,"meta":{"sparkle":1}}"#,
            &registry(),
        )
        .unwrap();
        assert_eq!(decoded.kind, ItemKind::Apple);
        assert_eq!(decoded.amount, 3);
        assert!(decoded.meta.is_none());
    }

    #[test]
    fn test_meta_order_independent() {
        let a = decode_item_json(
            r#"{"meta":{"color":255,"name":"Cap"},"type":"LEATHER_HELMET"}"#,
            &registry(),
        )
        .unwrap();
        let b = decode_item_json(
            r#"{"type":"LEATHER_HELMET","meta":{"name":"Cap","color":255}}"#,
            &registry(),
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.meta.unwrap().color(), Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn test_legacy_meta_keys() {
        let head = decode_item_json(r#"{"type":"PLAYER_HEAD","meta":{"skull":"Notch"}}"#, &registry())
            .unwrap();
        assert_eq!(head.meta.as_ref().unwrap().owner(), Some("Notch"));
        assert!(encode_item_json(&head).unwrap().contains(r#""owner":"Notch""#));

        let map = decode_item_json(r#"{"type":"FILLED_MAP","meta":{"map":true}}"#, &registry())
            .unwrap();
        assert_eq!(map.meta.unwrap().scaling(), Some(true));
    }

    #[test]
    fn test_malformed_field_is_error() {
        let err = decode_item_json(r#"{"type":"APPLE","amount":"lots"}"#, &registry()).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedToken(_)));

        let err = decode_item_json(r#"{"type":"APPLE","data":70000}"#, &registry()).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedToken(_)));

        let err = decode_item_json(r#"{"type":"APPLE""#, &registry()).unwrap_err();
        assert!(matches!(err, DecodeError::Syntax(_)));
        assert!(err.is_stream_failure());
    }

    #[test]
    fn test_potion_emits_only_its_variant() {
        let item = ItemBuilder::new(ItemKind::Potion)
            .effects([PotionEffect::new(PotionEffectType::Regeneration, 600, 1)])
            .build()
            .unwrap();
        let json = encode_item_json(&item).unwrap();
        assert!(json.contains(r#""effects":[{"type":"REGENERATION","duration":600,"amplifier":1}]"#));
        for key in ["book", "burst", "firework", "color", "owner", "scaling"] {
            assert!(!json.contains(&format!("\"{key}\"")), "{key} leaked into {json}");
        }
    }

    #[test]
    fn test_item_list_roundtrip() {
        let items = vec![
            ItemBuilder::new(ItemKind::Bread).amount(16).build().unwrap(),
            ItemRecord::empty(),
            ItemBuilder::new(ItemKind::FireworkStar)
                .burst(FireworkBurst {
                    shape: BurstShape::Creeper,
                    primary: vec![Rgb::new(0, 255, 0)],
                    fade: vec![],
                    flicker: true,
                    trail: false,
                })
                .build()
                .unwrap(),
        ];
        let mut out = Vec::new();
        write_items_json(&mut out, &items, EncodeOptions::pretty()).unwrap();

        let back = read_items_json(out.as_slice(), &registry()).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_item_list_skips_malformed_element() {
        let input = r#"[{"type":"STONE"},{"type":"STONE","amount":[]},null]"#;
        let items = read_items_json(input.as_bytes(), &registry()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ItemKind::Stone);
        assert!(items[1].is_empty());

        assert!(read_items_json("[{".as_bytes(), &registry()).is_err());
    }

    #[test]
    fn test_standalone_values() {
        let effect = PotionEffect::new(PotionEffectType::Poison, 40, 0);
        let json = encode_effect_json(&effect).unwrap();
        assert_eq!(decode_effect_json(&json).unwrap(), Some(effect));
        assert_eq!(decode_effect_json(r#"{"type":"LEVITATION"}"#).unwrap(), None);

        let burst = FireworkBurst::new(BurstShape::Star);
        let json = encode_burst_json(&burst).unwrap();
        assert_eq!(decode_burst_json(&json).unwrap(), Some(burst));

        let loc = Location::new("world", 1.5, 2.0, -3.5).with_rotation(90.0, 0.0);
        let json = encode_location_json(&loc).unwrap();
        assert_eq!(decode_location_json(&json).unwrap(), loc);
    }

    #[test]
    fn test_graceful_enchant_degradation() {
        let item = decode_item_json(
            r#"{"type":"BOW","enchants":{"ARROW_INFINITE":1,"EXPLODING":5,"POWER":4}}"#,
            &registry(),
        )
        .unwrap();
        assert_eq!(item.enchantments.len(), 2);
        assert_eq!(item.enchantments[&Enchantment::Infinity], 1);
        assert_eq!(item.enchantments[&Enchantment::Power], 4);
        assert!(item.meta.is_none());
    }
}
