//! Surface-neutral item representation.
//!
//! Both the JSON and the config surface read into [`RawItem`] first and
//! resolve it in one step, so field order in the input never matters. Names
//! are kept as strings here; resolution turns them into enums and drops what
//! does not resolve.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::attribute::{
    registry::ids, store, AttributeModifier, AttributeRegistry, Operation,
    ATTRIBUTE_MODIFIERS_KEY,
};
use crate::error::{DecodeError, EncodeError};
use crate::model::id::from_halves;
use crate::model::{
    BookMeta, BurstShape, DisplayMeta, Enchantment, FireworkBurst, FireworkMeta, ItemKind,
    ItemMeta, ItemRecord, MetaVariant, PotionEffect, PotionEffectType, PotionMeta, Rgb,
};
use crate::tag::CompoundTag;
use crate::validate::validate_item;

/// One item, as written on either surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<i16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i32>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub enchants: IndexMap<String, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RawMeta>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<RawAttribute>,
}

/// Metadata fields; each one maps to a single variant (name and lore share
/// the display variant).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<i64>,
    #[serde(default, alias = "skull", skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, alias = "map", skip_serializing_if = "Option::is_none")]
    pub scaling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<RawEffect>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<RawBook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burst: Option<RawBurst>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firework: Option<RawFirework>,
}

impl RawMeta {
    pub fn is_empty(&self) -> bool {
        *self == RawMeta::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEffect {
    #[serde(rename = "type", default)]
    pub effect_type: Option<String>,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub amplifier: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub pages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBurst {
    #[serde(rename = "type", default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub primary: Vec<i64>,
    #[serde(default)]
    pub fade: Vec<i64>,
    #[serde(default)]
    pub flicker: bool,
    #[serde(default)]
    pub trail: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFirework {
    #[serde(default)]
    pub fuse: i32,
    #[serde(default)]
    pub bursts: Vec<RawBurst>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAttribute {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub attrb: Option<String>,
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default)]
    pub value: f64,
}

// =============================================================================
// Encode direction
// =============================================================================

impl RawItem {
    /// Captures `item` for writing. Empty items produce an all-absent record.
    pub fn from_item(item: &ItemRecord) -> Result<Self, EncodeError> {
        validate_item(item)?;
        if item.is_empty() {
            return Ok(RawItem::default());
        }

        let meta = item.populated_meta().map(RawMeta::from_meta);
        let attributes = item
            .tag
            .list(ATTRIBUTE_MODIFIERS_KEY)
            .unwrap_or(&[])
            .iter()
            .filter_map(|entry| entry.as_compound())
            .filter_map(RawAttribute::from_tag)
            .collect();

        Ok(RawItem {
            kind: Some(item.kind.name().to_string()),
            data: Some(item.durability),
            amount: Some(item.amount),
            enchants: item
                .enchantments
                .iter()
                .map(|(e, level)| (e.name().to_string(), *level))
                .collect(),
            meta,
            attributes,
        })
    }
}

impl RawMeta {
    pub fn from_meta(meta: &ItemMeta) -> Self {
        RawMeta {
            name: meta.name().map(str::to_string),
            lore: meta.lore().map(<[String]>::to_vec),
            color: meta.color().map(|c| c.as_rgb() as i64),
            owner: meta.owner().map(str::to_string),
            scaling: meta.scaling(),
            effects: meta
                .potion()
                .map(|p| p.effects.iter().map(RawEffect::from).collect()),
            book: meta.book().map(RawBook::from),
            burst: meta.burst().map(RawBurst::from),
            firework: meta.firework().map(RawFirework::from),
        }
    }
}

impl From<&PotionEffect> for RawEffect {
    fn from(effect: &PotionEffect) -> Self {
        RawEffect {
            effect_type: Some(effect.effect_type.name().to_string()),
            duration: effect.duration,
            amplifier: effect.amplifier,
        }
    }
}

impl From<&BookMeta> for RawBook {
    fn from(book: &BookMeta) -> Self {
        RawBook {
            title: book.title.clone(),
            author: book.author.clone(),
            pages: book.pages.clone(),
        }
    }
}

impl From<&FireworkBurst> for RawBurst {
    fn from(burst: &FireworkBurst) -> Self {
        let rgb = |colors: &[Rgb]| colors.iter().map(|c| c.as_rgb() as i64).collect();
        RawBurst {
            shape: Some(burst.shape.name().to_string()),
            primary: rgb(&burst.primary),
            fade: rgb(&burst.fade),
            flicker: burst.flicker,
            trail: burst.trail,
        }
    }
}

impl From<&FireworkMeta> for RawFirework {
    fn from(firework: &FireworkMeta) -> Self {
        RawFirework {
            fuse: firework.power,
            bursts: firework.bursts.iter().map(RawBurst::from).collect(),
        }
    }
}

impl From<&AttributeModifier> for RawAttribute {
    fn from(modifier: &AttributeModifier) -> Self {
        RawAttribute {
            uuid: Some(modifier.uuid.to_string()),
            name: Some(modifier.name.clone()),
            attrb: Some(modifier.attribute_type.id().to_string()),
            op: Some(modifier.operation.name().to_string()),
            value: modifier.amount,
        }
    }
}

impl RawAttribute {
    /// Reads a payload compound without interning its type.
    ///
    /// Entries with an unknown operation ordinal are skipped, as the
    /// attribute store does.
    pub fn from_tag(tag: &CompoundTag) -> Option<Self> {
        let operation = Operation::from_ordinal(tag.get_i32("Operation", 0))?;
        let uuid = from_halves(tag.get_i64("UUIDMost", 0), tag.get_i64("UUIDLeast", 0));
        Some(RawAttribute {
            uuid: Some(uuid.to_string()),
            name: Some(tag.get_str("Name", ids::DUMMY).to_string()),
            attrb: Some(tag.get_str("AttributeName", ids::DUMMY).to_string()),
            op: Some(operation.name().to_string()),
            value: tag.get_f64("Amount", 0.0),
        })
    }
}

// =============================================================================
// Decode direction
// =============================================================================

impl RawItem {
    /// Resolves names and builds the item.
    ///
    /// Unresolvable names and variants the kind cannot carry are dropped.
    /// A negative amount is rejected.
    pub fn resolve(self, registry: &AttributeRegistry) -> Result<ItemRecord, DecodeError> {
        let kind = match self.kind.as_deref() {
            Some(name) => ItemKind::from_name(name).unwrap_or_else(|| {
                warn!(kind = name, "unknown item type, decoding as empty");
                ItemKind::Empty
            }),
            None => ItemKind::Empty,
        };
        if kind.is_empty() {
            return Ok(ItemRecord::empty());
        }

        let amount = self.amount.unwrap_or(1);
        if amount < 0 {
            return Err(DecodeError::InvalidField {
                path: "amount".to_string(),
                expected: "non-negative integer",
            });
        }

        let mut item = ItemRecord::new(kind);
        item.durability = self.data.unwrap_or(0);
        item.amount = amount;

        for (name, level) in self.enchants {
            match Enchantment::resolve(&name) {
                Some(enchantment) => {
                    item.enchantments.insert(enchantment, level);
                }
                None => debug!(enchantment = %name, "skipping unknown enchantment"),
            }
        }

        if let Some(raw_meta) = self.meta {
            let meta = raw_meta.resolve(kind);
            if !meta.is_empty() {
                item.meta = Some(meta);
            }
        }

        let mut modifiers: Vec<AttributeModifier> = Vec::with_capacity(self.attributes.len());
        for raw in self.attributes {
            let Some(modifier) = raw.resolve(registry) else {
                continue;
            };
            if modifiers.iter().any(|m| m.uuid == modifier.uuid) {
                warn!(uuid = %modifier.uuid, "dropping duplicate attribute modifier");
                continue;
            }
            modifiers.push(modifier);
        }
        store::embed(&mut item.tag, &modifiers);

        Ok(item)
    }
}

impl RawMeta {
    /// Builds the meta for `kind`, dropping anything its class cannot carry.
    pub fn resolve(self, kind: ItemKind) -> ItemMeta {
        let mut meta = ItemMeta::for_kind(kind);
        let mut variants = Vec::new();

        let display = DisplayMeta {
            name: self.name,
            lore: self.lore,
        };
        if !display.is_empty() {
            variants.push(MetaVariant::Display(display));
        }
        if let Some(rgb) = self.color {
            match Rgb::from_wire(rgb) {
                Some(color) => variants.push(MetaVariant::Color(color)),
                None => debug!(rgb, "skipping out-of-range color"),
            }
        }
        if let Some(owner) = self.owner {
            variants.push(MetaVariant::Owner(owner));
        }
        if let Some(scaling) = self.scaling {
            variants.push(MetaVariant::Scaling(scaling));
        }
        if let Some(effects) = self.effects {
            let effects = effects.into_iter().filter_map(RawEffect::resolve).collect();
            variants.push(MetaVariant::Potion(PotionMeta { effects }));
        }
        if let Some(book) = self.book {
            variants.push(MetaVariant::Book(book.into()));
        }
        if let Some(burst) = self.burst.and_then(RawBurst::resolve) {
            variants.push(MetaVariant::Burst(burst));
        }
        if let Some(firework) = self.firework {
            variants.push(MetaVariant::Firework(firework.resolve()));
        }

        for variant in variants {
            let tag = variant.tag();
            if meta.insert(variant).is_err() {
                warn!(%kind, ?tag, "dropping metadata not legal for item type");
            }
        }
        meta
    }
}

impl RawEffect {
    pub fn resolve(self) -> Option<PotionEffect> {
        let name = self.effect_type?;
        match PotionEffectType::from_name(&name) {
            Some(effect_type) => Some(PotionEffect::new(effect_type, self.duration, self.amplifier)),
            None => {
                debug!(effect = %name, "skipping unknown potion effect");
                None
            }
        }
    }
}

impl From<RawBook> for BookMeta {
    fn from(raw: RawBook) -> Self {
        BookMeta {
            title: raw.title,
            author: raw.author,
            pages: raw.pages,
        }
    }
}

impl RawBurst {
    /// A burst without a resolvable shape is dropped entirely.
    pub fn resolve(self) -> Option<FireworkBurst> {
        let name = self.shape?;
        let Some(shape) = BurstShape::from_name(&name) else {
            debug!(shape = %name, "skipping burst with unknown shape");
            return None;
        };
        Some(FireworkBurst {
            shape,
            primary: resolve_colors(self.primary),
            fade: resolve_colors(self.fade),
            flicker: self.flicker,
            trail: self.trail,
        })
    }
}

fn resolve_colors(colors: Vec<i64>) -> Vec<Rgb> {
    colors
        .into_iter()
        .filter_map(|rgb| {
            let color = Rgb::from_wire(rgb);
            if color.is_none() {
                debug!(rgb, "skipping out-of-range burst color");
            }
            color
        })
        .collect()
}

impl RawFirework {
    pub fn resolve(self) -> FireworkMeta {
        FireworkMeta {
            power: self.fuse,
            bursts: self.bursts.into_iter().filter_map(RawBurst::resolve).collect(),
        }
    }
}

impl RawAttribute {
    /// Unknown operations and unparsable uuids drop the entry, as does a
    /// non-finite amount. A missing uuid gets a fresh one; a missing type is
    /// `dummy`.
    pub fn resolve(self, registry: &AttributeRegistry) -> Option<AttributeModifier> {
        if !self.value.is_finite() {
            debug!(value = self.value, "skipping attribute with non-finite amount");
            return None;
        }
        let operation = match self.op.as_deref() {
            None => Operation::AddNumber,
            Some(name) => match Operation::from_name(name) {
                Some(op) => op,
                None => {
                    debug!(op = name, "skipping attribute with unknown operation");
                    return None;
                }
            },
        };
        let uuid = match self.uuid.as_deref() {
            None => Uuid::new_v4(),
            Some(text) => match Uuid::parse_str(text) {
                Ok(uuid) => uuid,
                Err(_) => {
                    debug!(uuid = text, "skipping attribute with malformed uuid");
                    return None;
                }
            },
        };
        let attribute_type = registry.intern(self.attrb.as_deref().unwrap_or(ids::DUMMY));
        Some(AttributeModifier {
            uuid,
            name: self
                .name
                .unwrap_or_else(|| attribute_type.id().to_string()),
            attribute_type,
            operation,
            amount: self.value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemBuilder, MetaTag};

    #[test]
    fn test_resolve_drops_unknown_names() {
        let mut raw = RawItem {
            kind: Some("POTION".into()),
            ..Default::default()
        };
        raw.enchants.insert("SHARPNESS".into(), 2);
        raw.enchants.insert("NOT_AN_ENCHANT".into(), 1);
        raw.meta = Some(RawMeta {
            effects: Some(vec![
                RawEffect {
                    effect_type: Some("SPEED".into()),
                    duration: 100,
                    amplifier: 0,
                },
                RawEffect {
                    effect_type: Some("FLYING".into()),
                    duration: 1,
                    amplifier: 1,
                },
            ]),
            ..Default::default()
        });

        let item = raw.resolve(&AttributeRegistry::with_builtins()).unwrap();
        assert_eq!(item.enchantments.len(), 1);
        let potion = item.meta.unwrap().potion().cloned().unwrap();
        assert_eq!(potion.effects.len(), 1);
        assert_eq!(potion.effects[0].effect_type, PotionEffectType::Speed);
    }

    #[test]
    fn test_resolve_drops_illegal_variant() {
        let raw = RawItem {
            kind: Some("STICK".into()),
            meta: Some(RawMeta {
                owner: Some("Notch".into()),
                name: Some("Wand".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let item = raw.resolve(&AttributeRegistry::with_builtins()).unwrap();
        let meta = item.meta.unwrap();
        assert_eq!(meta.tags().collect::<Vec<_>>(), vec![MetaTag::Display]);
    }

    #[test]
    fn test_resolve_unknown_kind_is_empty() {
        let raw = RawItem {
            kind: Some("FROBNICATOR".into()),
            amount: Some(5),
            ..Default::default()
        };
        assert!(raw.resolve(&AttributeRegistry::with_builtins()).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_negative_amount() {
        let raw = RawItem {
            kind: Some("STONE".into()),
            amount: Some(-1),
            ..Default::default()
        };
        assert!(matches!(
            raw.resolve(&AttributeRegistry::with_builtins()),
            Err(DecodeError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_burst_without_shape_dropped() {
        let raw = RawBurst {
            shape: Some("SQUARE".into()),
            primary: vec![0xFF0000],
            ..Default::default()
        };
        assert!(raw.resolve().is_none());

        let raw = RawBurst {
            shape: Some("STAR".into()),
            primary: vec![0xFF0000, 0x1_000_000],
            ..Default::default()
        };
        assert_eq!(raw.resolve().unwrap().primary.len(), 1);
    }

    #[test]
    fn test_from_item_captures_attributes() {
        let registry = AttributeRegistry::with_builtins();
        let item = ItemBuilder::new(ItemKind::IronSword).build().unwrap();
        let modifier = AttributeModifier::builder()
            .attribute_type(registry.intern(ids::ATTACK_DAMAGE))
            .operation(Operation::MultiplyPercentage)
            .name("edge")
            .amount(0.5)
            .build()
            .unwrap();
        let item = item.attributes(&registry).add(&modifier).unwrap();

        let raw = RawItem::from_item(&item).unwrap();
        assert_eq!(raw.attributes, vec![RawAttribute::from(&modifier)]);

        let back = raw.resolve(&registry).unwrap();
        assert_eq!(back, item);
    }
}
