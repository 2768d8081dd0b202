//! Compound tag tree.
//!
//! A recursive key/value tree of typed scalars, lists and child compounds.
//! This is the substrate for an item's persistent payload; the attribute
//! store and the binary tag surface both target it.
//!
//! Lookups are total: an absent path, or a value of the wrong type, yields
//! the caller-supplied default. Downstream code relies on this instead of
//! explicit presence checks.

pub mod binary;

use indexmap::IndexMap;

pub use binary::{decode_compound, encode_compound};

/// Path separator for nested lookups.
const PATH_SEP: char = '.';

/// A single tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    List(Vec<Tag>),
    Compound(CompoundTag),
}

impl Tag {
    /// Returns the binary type id of this tag.
    pub fn type_id(&self) -> u8 {
        match self {
            Tag::Byte(_) => binary::TAG_BYTE,
            Tag::Int(_) => binary::TAG_INT,
            Tag::Long(_) => binary::TAG_LONG,
            Tag::Double(_) => binary::TAG_DOUBLE,
            Tag::String(_) => binary::TAG_STRING,
            Tag::List(_) => binary::TAG_LIST,
            Tag::Compound(_) => binary::TAG_COMPOUND,
        }
    }

    /// Integer view; accepts any integral tag.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Byte(v) => Some(*v as i64),
            Tag::Int(v) => Some(*v as i64),
            Tag::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Tag::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Tag::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&CompoundTag> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }
}

impl From<i8> for Tag {
    fn from(v: i8) -> Self {
        Tag::Byte(v)
    }
}

impl From<bool> for Tag {
    fn from(v: bool) -> Self {
        Tag::Byte(v as i8)
    }
}

impl From<i32> for Tag {
    fn from(v: i32) -> Self {
        Tag::Int(v)
    }
}

impl From<i64> for Tag {
    fn from(v: i64) -> Self {
        Tag::Long(v)
    }
}

impl From<f64> for Tag {
    fn from(v: f64) -> Self {
        Tag::Double(v)
    }
}

impl From<String> for Tag {
    fn from(v: String) -> Self {
        Tag::String(v)
    }
}

impl From<&str> for Tag {
    fn from(v: &str) -> Self {
        Tag::String(v.to_string())
    }
}

impl From<Vec<Tag>> for Tag {
    fn from(v: Vec<Tag>) -> Self {
        Tag::List(v)
    }
}

impl From<CompoundTag> for Tag {
    fn from(v: CompoundTag) -> Self {
        Tag::Compound(v)
    }
}

/// A named mapping of string keys to tags.
///
/// Entries keep insertion order so the binary encoding is deterministic.
/// Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundTag {
    entries: IndexMap<String, Tag>,
}

impl CompoundTag {
    /// Creates an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates direct children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the direct child under `key` (no path splitting).
    pub fn get_key(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    /// Sets the direct child under `key` (no path splitting).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        self.entries.insert(key.into(), value.into())
    }

    /// Looks up a dotted path.
    pub fn get(&self, path: &str) -> Option<&Tag> {
        let (parent, leaf) = match path.rsplit_once(PATH_SEP) {
            Some((parent, leaf)) => (self.get_compound(parent)?, leaf),
            None => (self, path),
        };
        parent.entries.get(leaf)
    }

    /// Looks up a dotted path, falling back to `default` when absent.
    pub fn get_or<'a>(&'a self, path: &str, default: &'a Tag) -> &'a Tag {
        self.get(path).unwrap_or(default)
    }

    /// Returns true if a value exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn get_i64(&self, path: &str, default: i64) -> i64 {
        self.get(path).and_then(Tag::as_i64).unwrap_or(default)
    }

    /// Integral lookup narrowed to i32; out-of-range values yield `default`.
    pub fn get_i32(&self, path: &str, default: i32) -> i32 {
        self.get(path)
            .and_then(Tag::as_i64)
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(default)
    }

    pub fn get_f64(&self, path: &str, default: f64) -> f64 {
        self.get(path).and_then(Tag::as_f64).unwrap_or(default)
    }

    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        match self.get(path) {
            Some(Tag::Byte(v)) => *v != 0,
            _ => default,
        }
    }

    pub fn get_str<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        self.get(path).and_then(Tag::as_str).unwrap_or(default)
    }

    /// Returns the compound at `path`. The empty path is the compound itself.
    pub fn get_compound(&self, path: &str) -> Option<&CompoundTag> {
        if path.is_empty() {
            return Some(self);
        }
        let mut node = self;
        for key in path.split(PATH_SEP) {
            node = node.entries.get(key)?.as_compound()?;
        }
        Some(node)
    }

    /// Returns the list at `path`, if any.
    pub fn list(&self, path: &str) -> Option<&[Tag]> {
        self.get(path).and_then(Tag::as_list)
    }

    /// Writes `value` at `path`, creating intermediate compounds as needed.
    ///
    /// Any non-compound value standing where an intermediate compound is
    /// required is replaced.
    pub fn put(&mut self, path: &str, value: impl Into<Tag>) -> Option<Tag> {
        let (parent, leaf) = match path.rsplit_once(PATH_SEP) {
            Some((parent, leaf)) => (self.compound_mut(parent), leaf),
            None => (self, path),
        };
        parent.entries.insert(leaf.to_string(), value.into())
    }

    /// Removes the value at `path`.
    pub fn remove(&mut self, path: &str) -> Option<Tag> {
        let (parent, leaf) = match path.rsplit_once(PATH_SEP) {
            Some((parent, leaf)) => (self.existing_compound_mut(parent)?, leaf),
            None => (self, path),
        };
        parent.entries.shift_remove(leaf)
    }

    /// Returns the list at `path` for mutation.
    ///
    /// With `create_if_absent`, a missing (or mistyped) value is replaced by
    /// an empty list; otherwise `None` is returned for it.
    pub fn list_mut(&mut self, path: &str, create_if_absent: bool) -> Option<&mut Vec<Tag>> {
        if create_if_absent {
            let (parent, leaf) = match path.rsplit_once(PATH_SEP) {
                Some((parent, leaf)) => (self.compound_mut(parent), leaf),
                None => (self, path),
            };
            let slot = parent
                .entries
                .entry(leaf.to_string())
                .or_insert_with(|| Tag::List(Vec::new()));
            if !matches!(slot, Tag::List(_)) {
                *slot = Tag::List(Vec::new());
            }
            match slot {
                Tag::List(items) => Some(items),
                _ => None,
            }
        } else {
            let (parent, leaf) = match path.rsplit_once(PATH_SEP) {
                Some((parent, leaf)) => (self.existing_compound_mut(parent)?, leaf),
                None => (self, path),
            };
            match parent.entries.get_mut(leaf)? {
                Tag::List(items) => Some(items),
                _ => None,
            }
        }
    }

    /// Walks to the compound at `path`, creating (or replacing) nodes.
    fn compound_mut(&mut self, path: &str) -> &mut CompoundTag {
        let mut node = self;
        for key in path.split(PATH_SEP) {
            let slot = node
                .entries
                .entry(key.to_string())
                .or_insert_with(|| Tag::Compound(CompoundTag::new()));
            if !matches!(slot, Tag::Compound(_)) {
                *slot = Tag::Compound(CompoundTag::new());
            }
            node = match slot {
                Tag::Compound(c) => c,
                _ => unreachable!("slot was just made a compound"),
            };
        }
        node
    }

    fn existing_compound_mut(&mut self, path: &str) -> Option<&mut CompoundTag> {
        let mut node = self;
        for key in path.split(PATH_SEP) {
            node = match node.entries.get_mut(key)? {
                Tag::Compound(c) => c,
                _ => return None,
            };
        }
        Some(node)
    }
}

impl FromIterator<(String, Tag)> for CompoundTag {
    fn from_iter<I: IntoIterator<Item = (String, Tag)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
