//! Binary encoding/decoding for compound tags.
//!
//! Named-tag layout, big-endian throughout:
//! - root: type id `10`, u16-prefixed name, compound payload
//! - compound payload: `(type id, name, payload)*` followed by `0`
//! - list payload: element type id, i32 length, payloads
//! - strings: u16 byte length + UTF-8

use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    MAX_COMPOUND_LEN, MAX_LIST_LEN, MAX_PAYLOAD_SIZE, MAX_STRING_LEN, MAX_TAG_DEPTH,
};
use crate::tag::{CompoundTag, Tag};

pub const TAG_END: u8 = 0;
pub const TAG_BYTE: u8 = 1;
pub const TAG_INT: u8 = 3;
pub const TAG_LONG: u8 = 4;
pub const TAG_DOUBLE: u8 = 6;
pub const TAG_STRING: u8 = 8;
pub const TAG_LIST: u8 = 9;
pub const TAG_COMPOUND: u8 = 10;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding tag bytes.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Reads exactly `N` bytes into an array.
    #[inline]
    fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        if self.remaining_len() < N {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>(context)?[0])
    }

    #[inline]
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.read_array(context)?))
    }

    #[inline]
    pub fn read_i64(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        Ok(i64::from_be_bytes(self.read_array(context)?))
    }

    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        Ok(f64::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a u16-length-prefixed UTF-8 string.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let len = u16::from_be_bytes(self.read_array(field)?) as usize;
        if self.remaining_len() < len {
            return Err(DecodeError::UnexpectedEof { context: field });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Reads an i32 element count, rejecting negatives and oversize counts.
    fn read_len(&mut self, field: &'static str, max: usize) -> Result<usize, DecodeError> {
        let len = self.read_i32(field)?;
        if len < 0 {
            return Err(DecodeError::NegativeLength { field, len });
        }
        let len = len as usize;
        if len > max {
            return Err(DecodeError::LengthExceedsLimit { field, len, max });
        }
        Ok(len)
    }

    /// Reads one payload of the given type.
    pub fn read_payload(&mut self, tag_type: u8, depth: usize) -> Result<Tag, DecodeError> {
        if depth > MAX_TAG_DEPTH {
            return Err(DecodeError::DepthExceeded { max: MAX_TAG_DEPTH });
        }
        match tag_type {
            TAG_BYTE => Ok(Tag::Byte(self.read_byte("byte")? as i8)),
            TAG_INT => Ok(Tag::Int(self.read_i32("int")?)),
            TAG_LONG => Ok(Tag::Long(self.read_i64("long")?)),
            TAG_DOUBLE => Ok(Tag::Double(self.read_f64("double")?)),
            TAG_STRING => Ok(Tag::String(self.read_string("string")?)),
            TAG_LIST => {
                let elem_type = self.read_byte("list.type")?;
                let len = self.read_len("list", MAX_LIST_LEN)?;
                if elem_type == TAG_END && len > 0 {
                    return Err(DecodeError::InvalidTagType {
                        tag_type: elem_type,
                        context: "non-empty list",
                    });
                }
                // Each element takes at least one byte, bound the allocation by input size.
                let mut items = Vec::with_capacity(len.min(self.remaining_len()));
                for _ in 0..len {
                    items.push(self.read_payload(elem_type, depth + 1)?);
                }
                Ok(Tag::List(items))
            }
            TAG_COMPOUND => Ok(Tag::Compound(self.read_compound(depth + 1)?)),
            other => Err(DecodeError::InvalidTagType {
                tag_type: other,
                context: "payload",
            }),
        }
    }

    /// Reads compound entries up to and including the end marker.
    fn read_compound(&mut self, depth: usize) -> Result<CompoundTag, DecodeError> {
        let mut compound = CompoundTag::new();
        loop {
            let tag_type = self.read_byte("compound.type")?;
            if tag_type == TAG_END {
                return Ok(compound);
            }
            if compound.len() >= MAX_COMPOUND_LEN {
                return Err(DecodeError::LengthExceedsLimit {
                    field: "compound",
                    len: compound.len() + 1,
                    max: MAX_COMPOUND_LEN,
                });
            }
            let name = self.read_string("compound.name")?;
            let value = self.read_payload(tag_type, depth)?;
            compound.insert(name, value);
        }
    }
}

/// Decodes a root compound from bytes, returning its name and content.
pub fn decode_compound(input: &[u8]) -> Result<(String, CompoundTag), DecodeError> {
    if input.len() > MAX_PAYLOAD_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "payload",
            len: input.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }
    let mut reader = Reader::new(input);
    let root_type = reader.read_byte("root.type")?;
    if root_type != TAG_COMPOUND {
        return Err(DecodeError::RootNotCompound { tag_type: root_type });
    }
    let name = reader.read_string("root.name")?;
    let compound = reader.read_compound(1)?;
    if reader.remaining_len() > 0 {
        return Err(DecodeError::TrailingBytes {
            count: reader.remaining_len(),
        });
    }
    Ok((name, compound))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding tag bytes.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a u16-length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str, field: &'static str) -> Result<(), EncodeError> {
        if s.len() > MAX_STRING_LEN {
            return Err(EncodeError::LengthExceedsLimit {
                field,
                len: s.len(),
                max: MAX_STRING_LEN,
            });
        }
        self.buf.extend_from_slice(&(s.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Writes the payload of a tag (no type id, no name).
    pub fn write_payload(&mut self, tag: &Tag, depth: usize) -> Result<(), EncodeError> {
        if depth > MAX_TAG_DEPTH {
            return Err(EncodeError::DepthExceeded { max: MAX_TAG_DEPTH });
        }
        match tag {
            Tag::Byte(v) => self.write_byte(*v as u8),
            Tag::Int(v) => self.write_i32(*v),
            Tag::Long(v) => self.write_i64(*v),
            Tag::Double(v) => self.write_f64(*v),
            Tag::String(s) => self.write_string(s, "string")?,
            Tag::List(items) => {
                if items.len() > MAX_LIST_LEN {
                    return Err(EncodeError::LengthExceedsLimit {
                        field: "list",
                        len: items.len(),
                        max: MAX_LIST_LEN,
                    });
                }
                let elem_type = items.first().map_or(TAG_END, Tag::type_id);
                if let Some(other) = items.iter().map(Tag::type_id).find(|t| *t != elem_type) {
                    return Err(EncodeError::HeterogeneousList {
                        first: elem_type,
                        other,
                    });
                }
                self.write_byte(elem_type);
                self.write_i32(items.len() as i32);
                for item in items {
                    self.write_payload(item, depth + 1)?;
                }
            }
            Tag::Compound(compound) => self.write_compound(compound, depth + 1)?,
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &CompoundTag, depth: usize) -> Result<(), EncodeError> {
        for (name, value) in compound.iter() {
            self.write_byte(value.type_id());
            self.write_string(name, "compound.name")?;
            self.write_payload(value, depth)?;
        }
        self.write_byte(TAG_END);
        Ok(())
    }
}

/// Encodes a compound as a named root tag.
pub fn encode_compound(name: &str, compound: &CompoundTag) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    writer.write_byte(TAG_COMPOUND);
    writer.write_string(name, "root.name")?;
    writer.write_compound(compound, 1)?;
    if writer.as_bytes().len() > MAX_PAYLOAD_SIZE {
        return Err(EncodeError::LengthExceedsLimit {
            field: "payload",
            len: writer.as_bytes().len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }
    Ok(writer.into_bytes())
}
