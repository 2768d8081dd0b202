//! Security limits for decoding tag payloads.
//!
//! Tag bytes usually come from storage we wrote ourselves, but the decoder
//! still bounds every allocation so a corrupt or hostile payload cannot blow
//! up memory or the stack.

/// Maximum nesting depth of compounds and lists.
pub const MAX_TAG_DEPTH: usize = 512;

/// Maximum number of elements in a single list tag.
pub const MAX_LIST_LEN: usize = 65_536;

/// Maximum number of entries in a single compound tag.
pub const MAX_COMPOUND_LEN: usize = 65_536;

/// Maximum byte length of a string tag (u16 length prefix).
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Maximum size of an encoded tag payload (2 MiB).
pub const MAX_PAYLOAD_SIZE: usize = 2 * 1024 * 1024;

/// Key under which attribute modifiers live in an item's tag.
pub const ATTRIBUTE_MODIFIERS_KEY: &str = "AttributeModifiers";
