//! Config-section surface.
//!
//! A [`ConfigSection`] is an ordered YAML mapping addressed by dotted paths
//! (`meta.effects.0.type`). Items are laid out as:
//!
//! ```yaml
//! type: IRON_SWORD
//! data: 5
//! amount: 1
//! enchants:
//!   SHARPNESS: 3
//! meta:
//!   name: Old Faithful
//!   lore: [Still sharp.]
//!   effects:
//!     '0': {type: SPEED, duration: 200, amplifier: 1}
//! attributes:
//!   '0': {uuid: ..., name: ..., attrb: generic.attackDamage, op: ADD_NUMBER, value: 4.0}
//! ```
//!
//! Repeated children (`effects`, `bursts`, `attributes`, item lists) are
//! written as index-keyed sections; a YAML sequence is accepted on read.

use serde_yaml::{Mapping, Value};
use tracing::warn;

use super::raw::{RawAttribute, RawBook, RawBurst, RawEffect, RawFirework, RawItem, RawMeta};
use crate::attribute::{AttributeModifier, AttributeRegistry};
use crate::error::{DecodeError, EncodeError};
use crate::model::{
    BookMeta, FireworkBurst, FireworkMeta, ItemRecord, Location, LocationStyle, PotionEffect,
};

const PATH_SEP: char = '.';

/// A hierarchical key/value section backed by a YAML mapping.
///
/// Sections obtained through [`section`](Self::section) are detached copies
/// that remember their path, so errors name the full path.
#[derive(Debug, Clone, Default)]
pub struct ConfigSection {
    root: Mapping,
    path: String,
}

impl PartialEq for ConfigSection {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl From<Mapping> for ConfigSection {
    fn from(root: Mapping) -> Self {
        Self {
            root,
            path: String::new(),
        }
    }
}

impl ConfigSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses YAML text. An empty document is an empty section.
    pub fn from_yaml_str(input: &str) -> Result<Self, DecodeError> {
        match serde_yaml::from_str::<Value>(input)? {
            Value::Null => Ok(Self::new()),
            Value::Mapping(root) => Ok(Self::from(root)),
            _ => Err(DecodeError::InvalidField {
                path: String::new(),
                expected: "mapping",
            }),
        }
    }

    pub fn to_yaml_string(&self) -> Result<String, EncodeError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    pub fn into_mapping(self) -> Mapping {
        self.root
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Direct child keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.root.keys().filter_map(key_string)
    }

    /// Looks up a dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut node = &self.root;
        let mut keys = path.split(PATH_SEP).peekable();
        while let Some(key) = keys.next() {
            let value = child(node, key)?;
            if keys.peek().is_none() {
                return Some(value);
            }
            node = value.as_mapping()?;
        }
        None
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// True if `path` holds a nested section.
    pub fn is_section(&self, path: &str) -> bool {
        matches!(self.get(path), Some(Value::Mapping(_)))
    }

    /// Returns a copy of the section at `path`.
    pub fn section(&self, path: &str) -> Option<ConfigSection> {
        let root = self.get(path)?.as_mapping()?.clone();
        Some(ConfigSection {
            root,
            path: self.full_path(path),
        })
    }

    /// Writes `value` at `path`, creating intermediate sections as needed.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let (parent, leaf) = match path.rsplit_once(PATH_SEP) {
            Some((parent, leaf)) => (section_mut(&mut self.root, parent), leaf),
            None => (&mut self.root, path),
        };
        let key = existing_key(parent, leaf);
        parent.insert(key, value.into());
    }

    /// Writes a nested section at `path`.
    pub fn set_section(&mut self, path: &str, section: ConfigSection) {
        self.set(path, Value::Mapping(section.root));
    }

    /// Removes the value at `path`.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let (parent, leaf) = match path.rsplit_once(PATH_SEP) {
            Some((parent, leaf)) => (self.existing_section_mut(parent)?, leaf),
            None => (&mut self.root, path),
        };
        let key = existing_key(parent, leaf);
        parent.shift_remove(&key)
    }

    fn existing_section_mut(&mut self, path: &str) -> Option<&mut Mapping> {
        let mut node = &mut self.root;
        for key in path.split(PATH_SEP) {
            let key = existing_key(node, key);
            node = node.get_mut(&key)?.as_mapping_mut()?;
        }
        Some(node)
    }

    /// Like [`get`](Self::get), but the empty path names this section.
    fn node(&self, path: &str) -> Option<Node<'_>> {
        if path.is_empty() {
            Some(Node::Mapping(&self.root))
        } else {
            self.get(path).map(Node::Value)
        }
    }

    fn full_path(&self, path: &str) -> String {
        if self.path.is_empty() {
            path.to_string()
        } else if path.is_empty() {
            self.path.clone()
        } else {
            format!("{}{}{}", self.path, PATH_SEP, path)
        }
    }

    fn invalid(&self, path: &str, expected: &'static str) -> DecodeError {
        DecodeError::InvalidField {
            path: self.full_path(path),
            expected,
        }
    }

    // =========================================================================
    // Typed reads: absent is Ok(None), present with the wrong type is an error
    // =========================================================================

    pub fn get_string(&self, path: &str) -> Result<Option<String>, DecodeError> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(path, "string")),
        }
    }

    pub fn get_i64(&self, path: &str) -> Result<Option<i64>, DecodeError> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v.as_i64().map(Some).ok_or_else(|| self.invalid(path, "integer")),
        }
    }

    pub fn get_i32(&self, path: &str) -> Result<Option<i32>, DecodeError> {
        self.get_i64(path)?
            .map(|v| i32::try_from(v).map_err(|_| self.invalid(path, "32-bit integer")))
            .transpose()
    }

    pub fn get_i16(&self, path: &str) -> Result<Option<i16>, DecodeError> {
        self.get_i64(path)?
            .map(|v| i16::try_from(v).map_err(|_| self.invalid(path, "16-bit integer")))
            .transpose()
    }

    /// Floating-point read; integers are accepted.
    pub fn get_f64(&self, path: &str) -> Result<Option<f64>, DecodeError> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(v @ Value::Number(_)) => Ok(v.as_f64()),
            Some(_) => Err(self.invalid(path, "number")),
        }
    }

    pub fn get_bool(&self, path: &str) -> Result<Option<bool>, DecodeError> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.invalid(path, "boolean")),
        }
    }

    /// Nested section read; a scalar or list at `path` is an error.
    pub fn get_section(&self, path: &str) -> Result<Option<ConfigSection>, DecodeError> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Mapping(_)) => Ok(self.section(path)),
            Some(_) => Err(self.invalid(path, "section")),
        }
    }

    pub fn get_string_list(&self, path: &str) -> Result<Option<Vec<String>>, DecodeError> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Sequence(items)) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Some)
                .ok_or_else(|| self.invalid(path, "list of strings")),
            Some(_) => Err(self.invalid(path, "list of strings")),
        }
    }

    /// Integer list, written as a sequence or as an index-keyed section.
    pub fn get_int_list(&self, path: &str) -> Result<Option<Vec<i64>>, DecodeError> {
        let values: Vec<&Value> = match self.get(path) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Sequence(items)) => items.iter().collect(),
            Some(Value::Mapping(map)) => map.values().collect(),
            Some(_) => return Err(self.invalid(path, "list of integers")),
        };
        values
            .into_iter()
            .map(Value::as_i64)
            .collect::<Option<Vec<_>>>()
            .map(Some)
            .ok_or_else(|| self.invalid(path, "list of integers"))
    }

    /// Child sections of a repeated field, in order.
    ///
    /// Index-keyed sections and sequences of mappings are both accepted.
    pub fn children(&self, path: &str) -> Result<Option<Vec<ConfigSection>>, DecodeError> {
        let entries: Vec<(String, &Value)> = match self.node(path) {
            None | Some(Node::Value(Value::Null)) => return Ok(None),
            Some(Node::Mapping(map)) | Some(Node::Value(Value::Mapping(map))) => map
                .iter()
                .filter_map(|(k, v)| key_string(k).map(|k| (k, v)))
                .collect(),
            Some(Node::Value(Value::Sequence(items))) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            Some(Node::Value(_)) => return Err(self.invalid(path, "section")),
        };

        let base = self.full_path(path);
        entries
            .into_iter()
            .map(|(key, value)| {
                let child_path = if base.is_empty() {
                    key
                } else {
                    format!("{base}{PATH_SEP}{key}")
                };
                match value {
                    Value::Mapping(map) => Ok(ConfigSection {
                        root: map.clone(),
                        path: child_path,
                    }),
                    _ => Err(DecodeError::InvalidField {
                        path: child_path,
                        expected: "section",
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

enum Node<'a> {
    Mapping(&'a Mapping),
    Value(&'a Value),
}

fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn child<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| key_string(k).as_deref() == Some(key))
            .map(|(_, v)| v)
    })
}

/// The key already standing for `key` in `map`, or a new string key.
fn existing_key(map: &Mapping, key: &str) -> Value {
    if map.contains_key(key) {
        return Value::String(key.to_string());
    }
    map.keys()
        .find(|k| key_string(k).as_deref() == Some(key))
        .cloned()
        .unwrap_or_else(|| Value::String(key.to_string()))
}

fn section_mut<'a>(root: &'a mut Mapping, path: &str) -> &'a mut Mapping {
    let mut node = root;
    for key in path.split(PATH_SEP) {
        let key = existing_key(node, key);
        let slot = node
            .entry(key)
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !slot.is_mapping() {
            *slot = Value::Mapping(Mapping::new());
        }
        node = match slot {
            Value::Mapping(map) => map,
            _ => unreachable!("slot was just made a mapping"),
        };
    }
    node
}

fn indexed<T>(items: &[T], mut write: impl FnMut(&T, &mut ConfigSection)) -> ConfigSection {
    let mut section = ConfigSection::new();
    for (i, item) in items.iter().enumerate() {
        let mut child = ConfigSection::new();
        write(item, &mut child);
        section.set_section(&i.to_string(), child);
    }
    section
}

// =============================================================================
// Raw records
// =============================================================================

fn write_raw_item(raw: &RawItem, section: &mut ConfigSection) {
    if let Some(kind) = &raw.kind {
        section.set("type", kind.as_str());
    }
    if let Some(data) = raw.data {
        section.set("data", data);
    }
    if let Some(amount) = raw.amount {
        section.set("amount", amount);
    }
    if !raw.enchants.is_empty() {
        let mut enchants = ConfigSection::new();
        for (name, level) in &raw.enchants {
            enchants.set(name, *level);
        }
        section.set_section("enchants", enchants);
    }
    if let Some(meta) = &raw.meta {
        let mut child = ConfigSection::new();
        write_raw_meta(meta, &mut child);
        section.set_section("meta", child);
    }
    if !raw.attributes.is_empty() {
        section.set_section("attributes", indexed(&raw.attributes, write_raw_attribute));
    }
}

fn write_raw_meta(meta: &RawMeta, section: &mut ConfigSection) {
    if let Some(name) = &meta.name {
        section.set("name", name.as_str());
    }
    if let Some(lore) = &meta.lore {
        section.set("lore", lore.clone());
    }
    if let Some(color) = meta.color {
        section.set("color", color);
    }
    if let Some(owner) = &meta.owner {
        section.set("owner", owner.as_str());
    }
    if let Some(scaling) = meta.scaling {
        section.set("scaling", scaling);
    }
    if let Some(effects) = &meta.effects {
        section.set_section("effects", indexed(effects, write_raw_effect));
    }
    if let Some(book) = &meta.book {
        let mut child = ConfigSection::new();
        write_raw_book(book, &mut child);
        section.set_section("book", child);
    }
    if let Some(burst) = &meta.burst {
        let mut child = ConfigSection::new();
        write_raw_burst(burst, &mut child);
        section.set_section("burst", child);
    }
    if let Some(firework) = &meta.firework {
        let mut child = ConfigSection::new();
        write_raw_firework(firework, &mut child);
        section.set_section("firework", child);
    }
}

fn write_raw_effect(effect: &RawEffect, section: &mut ConfigSection) {
    if let Some(name) = &effect.effect_type {
        section.set("type", name.as_str());
    }
    section.set("duration", effect.duration);
    section.set("amplifier", effect.amplifier);
}

fn write_raw_book(book: &RawBook, section: &mut ConfigSection) {
    if let Some(title) = &book.title {
        section.set("title", title.as_str());
    }
    if let Some(author) = &book.author {
        section.set("author", author.as_str());
    }
    section.set("pages", book.pages.clone());
}

fn write_raw_burst(burst: &RawBurst, section: &mut ConfigSection) {
    if let Some(shape) = &burst.shape {
        section.set("type", shape.as_str());
    }
    section.set("primary", burst.primary.clone());
    section.set("fade", burst.fade.clone());
    section.set("flicker", burst.flicker);
    section.set("trail", burst.trail);
}

fn write_raw_firework(firework: &RawFirework, section: &mut ConfigSection) {
    section.set("fuse", firework.fuse);
    section.set_section("bursts", indexed(&firework.bursts, write_raw_burst));
}

fn write_raw_attribute(attribute: &RawAttribute, section: &mut ConfigSection) {
    if let Some(uuid) = &attribute.uuid {
        section.set("uuid", uuid.as_str());
    }
    if let Some(name) = &attribute.name {
        section.set("name", name.as_str());
    }
    if let Some(attrb) = &attribute.attrb {
        section.set("attrb", attrb.as_str());
    }
    if let Some(op) = &attribute.op {
        section.set("op", op.as_str());
    }
    section.set("value", attribute.value);
}

fn read_raw_item(section: &ConfigSection) -> Result<RawItem, DecodeError> {
    let mut raw = RawItem {
        kind: section.get_string("type")?,
        data: section.get_i16("data")?,
        amount: section.get_i32("amount")?,
        ..RawItem::default()
    };
    if let Some(enchants) = section.get_section("enchants")? {
        for name in enchants.keys().collect::<Vec<_>>() {
            if let Some(level) = enchants.get_i32(&name)? {
                raw.enchants.insert(name, level);
            }
        }
    }
    if let Some(meta) = section.get_section("meta")? {
        let meta = read_raw_meta(&meta)?;
        if !meta.is_empty() {
            raw.meta = Some(meta);
        }
    }
    if let Some(children) = section.children("attributes")? {
        raw.attributes = children
            .iter()
            .map(read_raw_attribute)
            .collect::<Result<_, _>>()?;
    }
    Ok(raw)
}

fn read_raw_meta(section: &ConfigSection) -> Result<RawMeta, DecodeError> {
    let owner = match section.get_string("owner")? {
        Some(owner) => Some(owner),
        None => section.get_string("skull")?,
    };
    let scaling = match section.get_bool("scaling")? {
        Some(scaling) => Some(scaling),
        None => section.get_bool("map")?,
    };
    let effects = section
        .children("effects")?
        .map(|children| children.iter().map(read_raw_effect).collect::<Result<Vec<_>, _>>())
        .transpose()?;

    Ok(RawMeta {
        name: section.get_string("name")?,
        lore: section.get_string_list("lore")?,
        color: section.get_i64("color")?,
        owner,
        scaling,
        effects,
        book: section.get_section("book")?.map(|s| read_raw_book(&s)).transpose()?,
        burst: section.get_section("burst")?.map(|s| read_raw_burst(&s)).transpose()?,
        firework: section
            .get_section("firework")?
            .map(|s| read_raw_firework(&s))
            .transpose()?,
    })
}

fn read_raw_effect(section: &ConfigSection) -> Result<RawEffect, DecodeError> {
    Ok(RawEffect {
        effect_type: section.get_string("type")?,
        duration: section.get_i32("duration")?.unwrap_or(0),
        amplifier: section.get_i32("amplifier")?.unwrap_or(0),
    })
}

fn read_raw_book(section: &ConfigSection) -> Result<RawBook, DecodeError> {
    Ok(RawBook {
        title: section.get_string("title")?,
        author: section.get_string("author")?,
        pages: section.get_string_list("pages")?.unwrap_or_default(),
    })
}

fn read_raw_burst(section: &ConfigSection) -> Result<RawBurst, DecodeError> {
    Ok(RawBurst {
        shape: section.get_string("type")?,
        primary: section.get_int_list("primary")?.unwrap_or_default(),
        fade: section.get_int_list("fade")?.unwrap_or_default(),
        flicker: section.get_bool("flicker")?.unwrap_or(false),
        trail: section.get_bool("trail")?.unwrap_or(false),
    })
}

fn read_raw_firework(section: &ConfigSection) -> Result<RawFirework, DecodeError> {
    let bursts = match section.children("bursts")? {
        Some(children) => children.iter().map(read_raw_burst).collect::<Result<_, _>>()?,
        None => Vec::new(),
    };
    Ok(RawFirework {
        fuse: section.get_i32("fuse")?.unwrap_or(0),
        bursts,
    })
}

fn read_raw_attribute(section: &ConfigSection) -> Result<RawAttribute, DecodeError> {
    Ok(RawAttribute {
        uuid: section.get_string("uuid")?,
        name: section.get_string("name")?,
        attrb: section.get_string("attrb")?,
        op: section.get_string("op")?,
        value: section.get_f64("value")?.unwrap_or(0.0),
    })
}

// =============================================================================
// Items
// =============================================================================

/// Writes `item` into `section`. Empty items write nothing.
pub fn write_item(item: &ItemRecord, section: &mut ConfigSection) -> Result<(), EncodeError> {
    let raw = RawItem::from_item(item)?;
    write_raw_item(&raw, section);
    Ok(())
}

/// Reads an item from `section`.
pub fn read_item(section: &ConfigSection, registry: &AttributeRegistry) -> Result<ItemRecord, DecodeError> {
    read_raw_item(section)?.resolve(registry)
}

/// Writes items as index-keyed child sections (`0`, `1`, ...).
pub fn write_items(items: &[ItemRecord], section: &mut ConfigSection) -> Result<(), EncodeError> {
    for (i, item) in items.iter().enumerate() {
        let mut child = ConfigSection::new();
        write_item(item, &mut child)?;
        section.set_section(&i.to_string(), child);
    }
    Ok(())
}

/// Reads every child section of `section` as an item.
///
/// A child that fails to decode is left out and logged.
pub fn read_items(section: &ConfigSection, registry: &AttributeRegistry) -> Result<Vec<ItemRecord>, DecodeError> {
    let Some(children) = section.children("")? else {
        return Ok(Vec::new());
    };
    let mut items = Vec::with_capacity(children.len());
    for child in children {
        match read_item(&child, registry) {
            Ok(item) => items.push(item),
            Err(err) => warn!(path = %child.path, error = %err, "skipping malformed item"),
        }
    }
    Ok(items)
}

// =============================================================================
// Standalone values
// =============================================================================

pub fn write_effect(effect: &PotionEffect, section: &mut ConfigSection) {
    write_raw_effect(&RawEffect::from(effect), section);
}

/// Reads a potion effect; `None` if its type does not resolve.
pub fn read_effect(section: &ConfigSection) -> Result<Option<PotionEffect>, DecodeError> {
    Ok(read_raw_effect(section)?.resolve())
}

pub fn write_book(book: &BookMeta, section: &mut ConfigSection) {
    write_raw_book(&RawBook::from(book), section);
}

pub fn read_book(section: &ConfigSection) -> Result<BookMeta, DecodeError> {
    Ok(read_raw_book(section)?.into())
}

pub fn write_burst(burst: &FireworkBurst, section: &mut ConfigSection) {
    write_raw_burst(&RawBurst::from(burst), section);
}

/// Reads a firework burst; `None` if its shape does not resolve.
pub fn read_burst(section: &ConfigSection) -> Result<Option<FireworkBurst>, DecodeError> {
    Ok(read_raw_burst(section)?.resolve())
}

pub fn write_firework(firework: &FireworkMeta, section: &mut ConfigSection) {
    write_raw_firework(&RawFirework::from(firework), section);
}

pub fn read_firework(section: &ConfigSection) -> Result<FireworkMeta, DecodeError> {
    Ok(read_raw_firework(section)?.resolve())
}

pub fn write_attribute(modifier: &AttributeModifier, section: &mut ConfigSection) {
    write_raw_attribute(&RawAttribute::from(modifier), section);
}

/// Reads an attribute modifier; `None` if its operation or uuid is unusable.
pub fn read_attribute(
    section: &ConfigSection,
    registry: &AttributeRegistry,
) -> Result<Option<AttributeModifier>, DecodeError> {
    Ok(read_raw_attribute(section)?.resolve(registry))
}

/// Writes a location, rounded and with rotation as `style` asks.
pub fn write_location(location: &Location, style: LocationStyle, section: &mut ConfigSection) {
    let location = if style.round {
        location.rounded()
    } else {
        location.clone()
    };
    section.set("world", location.world.as_str());
    section.set("x", location.x);
    section.set("y", location.y);
    section.set("z", location.z);
    if style.rotation {
        section.set("yaw", f64::from(location.yaw));
        section.set("pitch", f64::from(location.pitch));
    }
}

/// Reads a location; missing components take the [`Location::default`] values.
pub fn read_location(section: &ConfigSection) -> Result<Location, DecodeError> {
    let defaults = Location::default();
    Ok(Location {
        world: section.get_string("world")?.unwrap_or(defaults.world),
        x: section.get_f64("x")?.unwrap_or(defaults.x),
        y: section.get_f64("y")?.unwrap_or(defaults.y),
        z: section.get_f64("z")?.unwrap_or(defaults.z),
        yaw: section.get_f64("yaw")?.map_or(defaults.yaw, |v| v as f32),
        pitch: section.get_f64("pitch")?.map_or(defaults.pitch, |v| v as f32),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{registry::ids, Operation};
    use crate::codec::json::decode_item_json;
    use crate::model::{BurstShape, Enchantment, ItemBuilder, ItemKind, PotionEffectType, Rgb};

    fn registry() -> AttributeRegistry {
        AttributeRegistry::with_builtins()
    }

    #[test]
    fn test_section_paths() {
        let mut section = ConfigSection::new();
        section.set("a.b.c", 3);
        section.set("a.name", "x");

        assert!(section.is_section("a.b"));
        assert_eq!(section.get_i64("a.b.c").unwrap(), Some(3));
        assert_eq!(section.get_string("a.name").unwrap().as_deref(), Some("x"));
        assert_eq!(section.get_string("a.missing").unwrap(), None);

        let nested = section.section("a").unwrap();
        let err = nested.get_i64("name").unwrap_err();
        assert!(
            matches!(&err, DecodeError::InvalidField { path, .. } if path == "a.name"),
            "{err}"
        );

        assert!(section.remove("a.b").is_some());
        assert!(!section.contains("a.b.c"));
    }

    #[test]
    fn test_numeric_keys_match() {
        let section = ConfigSection::from_yaml_str("effects:\n  0:\n    type: SPEED\n").unwrap();
        assert_eq!(
            section.get_string("effects.0.type").unwrap().as_deref(),
            Some("SPEED")
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let section = ConfigSection::from_yaml_str(
            "type: APPLE\nextra: [1, 2, {deep: true}]\namount: 3\nmeta:\n  sparkle: 1\n",
        )
        .unwrap();
        let item = read_item(&section, &registry()).unwrap();
        assert_eq!(item.kind, ItemKind::Apple);
        assert_eq!(item.amount, 3);
        assert!(item.meta.is_none());
    }

    #[test]
    fn test_scalar_in_place_of_section_fails() {
        for yaml in [
            "type: APPLE\nmeta: 5\n",
            "type: APPLE\nenchants: [SHARPNESS]\n",
            "type: WRITTEN_BOOK\nmeta:\n  book: text\n",
        ] {
            let section = ConfigSection::from_yaml_str(yaml).unwrap();
            let err = read_item(&section, &registry()).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidField { .. }), "{yaml}: {err}");
            assert!(decode_item_json(&json_of(&section), &registry()).is_err(), "{yaml}");
        }
    }

    #[test]
    fn test_non_finite_attribute_amount_dropped() {
        let section = ConfigSection::from_yaml_str(
            "type: STICK\nattributes:\n  '0': {attrb: dummy, op: ADD_NUMBER, value: .nan}\n",
        )
        .unwrap();
        let registry = registry();
        let item = read_item(&section, &registry).unwrap();
        assert!(item.attributes(&registry).is_empty());
        assert!(crate::validate::validate_item(&item).is_ok());
    }

    fn json_of(section: &ConfigSection) -> String {
        serde_json::to_string(section.as_mapping()).unwrap()
    }

    #[test]
    fn test_item_layout() {
        let item = ItemBuilder::new(ItemKind::IronSword)
            .durability(5)
            .enchant(Enchantment::Sharpness, 3)
            .build()
            .unwrap();
        let mut section = ConfigSection::new();
        write_item(&item, &mut section).unwrap();

        assert_eq!(section.keys().collect::<Vec<_>>(), ["type", "data", "amount", "enchants"]);
        assert_eq!(section.get_i64("enchants.SHARPNESS").unwrap(), Some(3));
        assert_eq!(read_item(&section, &registry()).unwrap(), item);
    }

    #[test]
    fn test_empty_item_writes_nothing() {
        let mut section = ConfigSection::new();
        write_item(&ItemRecord::empty(), &mut section).unwrap();
        assert!(section.is_empty());
        assert!(read_item(&section, &registry()).unwrap().is_empty());
    }

    #[test]
    fn test_full_item_yaml_roundtrip() {
        let registry = registry();
        let item = ItemBuilder::new(ItemKind::FireworkRocket)
            .amount(3)
            .name("Boom")
            .lore(["one", "two"])
            .firework(FireworkMeta {
                power: 2,
                bursts: vec![FireworkBurst {
                    shape: BurstShape::LargeBall,
                    primary: vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)],
                    fade: vec![Rgb::WHITE],
                    flicker: true,
                    trail: true,
                }],
            })
            .build()
            .unwrap();
        let modifier = AttributeModifier::builder()
            .attribute_type(registry.intern(ids::MOVEMENT_SPEED))
            .operation(Operation::AddPercentage)
            .name("zoom")
            .amount(0.1)
            .build()
            .unwrap();
        let item = item.attributes(&registry).add(&modifier).unwrap();

        let mut section = ConfigSection::new();
        write_item(&item, &mut section).unwrap();
        assert_eq!(section.get_string("attributes.0.op").unwrap().as_deref(), Some("ADD_PERCENTAGE"));

        let text = section.to_yaml_string().unwrap();
        let reloaded = ConfigSection::from_yaml_str(&text).unwrap();
        assert_eq!(read_item(&reloaded, &registry).unwrap(), item);
    }

    #[test]
    fn test_legacy_keys_and_sequences() {
        let yaml = "\
type: POTION
meta:
  effects:
    - {type: SPEED, duration: 20, amplifier: 1}
    - {type: NOT_REAL, duration: 20}
";
        let section = ConfigSection::from_yaml_str(yaml).unwrap();
        let item = read_item(&section, &registry()).unwrap();
        let binding = item.meta.unwrap();
        let effects = &binding.potion().unwrap().effects;
        assert_eq!(effects, &[PotionEffect::new(PotionEffectType::Speed, 20, 1)]);

        let section = ConfigSection::from_yaml_str("type: PLAYER_HEAD\nmeta:\n  skull: Notch\n").unwrap();
        let item = read_item(&section, &registry()).unwrap();
        assert_eq!(item.meta.unwrap().owner(), Some("Notch"));
    }

    #[test]
    fn test_malformed_field() {
        let section = ConfigSection::from_yaml_str("type: STONE\namount: lots\n").unwrap();
        let err = read_item(&section, &registry()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidField { path, expected: "integer" } if path == "amount"));

        let section = ConfigSection::from_yaml_str("type: STONE\ndata: 40000\n").unwrap();
        assert!(read_item(&section, &registry()).is_err());
    }

    #[test]
    fn test_item_list() {
        let items = vec![
            ItemBuilder::new(ItemKind::Apple).amount(5).build().unwrap(),
            ItemBuilder::new(ItemKind::LeatherHelmet)
                .color(Rgb::new(12, 34, 56))
                .build()
                .unwrap(),
        ];
        let mut root = ConfigSection::new();
        let mut list = ConfigSection::new();
        write_items(&items, &mut list).unwrap();
        root.set_section("items", list);

        let back = read_items(&root.section("items").unwrap(), &registry()).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_location() {
        let loc = Location::new("world", 10.3, 64.9, -5.7).with_rotation(47.0, 12.0);

        let mut section = ConfigSection::new();
        write_location(&loc, LocationStyle::EXACT, &mut section);
        let back = read_location(&section).unwrap();
        assert_eq!(back, loc);

        let mut section = ConfigSection::new();
        write_location(&loc, LocationStyle::BLOCK, &mut section);
        assert!(!section.contains("yaw"));
        let back = read_location(&section).unwrap();
        assert_eq!((back.x, back.y, back.z), (10.5, 64.0, -5.5));

        let back = read_location(&ConfigSection::new()).unwrap();
        assert_eq!(back, Location::default());
    }

    #[test]
    fn test_standalone_values() {
        let mut section = ConfigSection::new();
        write_effect(&PotionEffect::new(PotionEffectType::Wither, 60, 2), &mut section);
        assert_eq!(
            read_effect(&section).unwrap(),
            Some(PotionEffect::new(PotionEffectType::Wither, 60, 2))
        );

        let book = BookMeta {
            title: Some("Log".into()),
            author: None,
            pages: vec!["p1".into()],
        };
        let mut section = ConfigSection::new();
        write_book(&book, &mut section);
        assert_eq!(read_book(&section).unwrap(), book);

        let registry = registry();
        let modifier = AttributeModifier::new(&registry);
        let mut section = ConfigSection::new();
        write_attribute(&modifier, &mut section);
        assert_eq!(read_attribute(&section, &registry).unwrap(), Some(modifier));
    }

    #[test]
    fn test_burst_colors_from_section() {
        let yaml = "type: BALL\nprimary:\n  '0': 255\n  '1': 65280\nfade: []\n";
        let section = ConfigSection::from_yaml_str(yaml).unwrap();
        let burst = read_burst(&section).unwrap().unwrap();
        assert_eq!(burst.primary, vec![Rgb::new(0, 0, 255), Rgb::new(0, 255, 0)]);
    }
}
