//! Item encodings.
//!
//! - [`json`]: tree-structured JSON objects and arrays
//! - [`config`]: hierarchical YAML-backed sections
//! - [`encode_item_tag`] / [`decode_item_tag`]: the item's persistent payload
//!   as named-tag bytes
//!
//! Both text surfaces share [`raw`], so they resolve names and degrade the
//! same way.

pub mod config;
pub mod json;
pub mod raw;

pub use config::{read_item, read_items, write_item, write_items, ConfigSection};
pub use json::{
    decode_item_json, encode_item_json, encode_item_json_with_options, read_items_json,
    write_items_json, EncodeOptions,
};

use crate::error::{DecodeError, EncodeError};
use crate::model::ItemRecord;
use crate::tag::{decode_compound, encode_compound, CompoundTag};

/// Root name used for item payloads on the byte surface.
pub const ITEM_TAG_ROOT: &str = "tag";

/// Encodes the item's persistent payload as named-tag bytes.
pub fn encode_item_tag(item: &ItemRecord) -> Result<Vec<u8>, EncodeError> {
    encode_compound(ITEM_TAG_ROOT, &item.tag)
}

/// Decodes a persistent payload. The root name is not checked.
pub fn decode_item_tag(input: &[u8]) -> Result<CompoundTag, DecodeError> {
    decode_compound(input).map(|(_, tag)| tag)
}
