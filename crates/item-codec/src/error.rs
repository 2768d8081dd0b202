//! Error types for item encoding/decoding and attribute manipulation.

use thiserror::Error;
use uuid::Uuid;

use crate::model::{ItemKind, MetaClass, MetaTag};

/// Error during decoding of any surface.
///
/// Unknown fields and unresolvable enum names are not errors: they are
/// skipped locally. Only a broken stream or a known field carrying the wrong
/// kind of value ends up here.
#[derive(Debug, Error)]
pub enum DecodeError {
    // === Stream-level failures ===
    #[error("I/O error while reading: {0}")]
    Io(#[from] std::io::Error),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === Malformed known fields ===
    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("invalid value at {path}: expected {expected}")]
    InvalidField { path: String, expected: &'static str },

    #[error("invalid location string: {input:?}")]
    InvalidLocation { input: String },

    // === Tag binary ===
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("invalid tag type {tag_type} in {context}")]
    InvalidTagType { tag_type: u8, context: &'static str },

    #[error("root tag must be a compound, found type {tag_type}")]
    RootNotCompound { tag_type: u8 },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("negative length {len} in {field}")]
    NegativeLength { field: &'static str, len: i32 },

    #[error("tag nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },

    #[error("{count} trailing bytes after root tag")]
    TrailingBytes { count: usize },
}

impl DecodeError {
    /// Classifies a serde_json error into the decode taxonomy.
    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Io => DecodeError::Io(err.into()),
            Category::Syntax | Category::Eof => DecodeError::Syntax(err.to_string()),
            Category::Data => DecodeError::MalformedToken(err.to_string()),
        }
    }

    /// Returns true if the underlying stream itself was unreadable.
    pub fn is_stream_failure(&self) -> bool {
        matches!(
            self,
            DecodeError::Io(_) | DecodeError::Syntax(_) | DecodeError::Yaml(_)
        )
    }
}

/// Error during encoding of any surface.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("meta of class {found:?} cannot be attached to {kind} (expects {expected:?})")]
    MetaClassMismatch {
        kind: ItemKind,
        expected: MetaClass,
        found: MetaClass,
    },

    #[error("{tag:?} metadata is not legal for {kind}")]
    IllegalVariant { kind: ItemKind, tag: MetaTag },

    #[error("amount {amount} is negative")]
    NegativeAmount { amount: i32 },

    #[error("duplicate attribute modifier {uuid}")]
    DuplicateModifier { uuid: Uuid },

    #[error("attribute modifier {uuid} has non-finite amount {amount}")]
    NonFiniteAmount { uuid: Uuid, amount: f64 },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("list mixes tag types {first} and {other}")]
    HeterogeneousList { first: u8, other: u8 },

    #[error("tag nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error while writing: {0}")]
    Io(#[from] std::io::Error),
}

/// Error when building or storing attribute modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("attribute modifier is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("attribute modifier {uuid} is already attached to this item")]
    DuplicateModifier { uuid: Uuid },
}

/// Error when populating item metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetaError {
    #[error("{tag:?} metadata is not legal on {class:?} meta")]
    IllegalVariant { class: MetaClass, tag: MetaTag },
}
