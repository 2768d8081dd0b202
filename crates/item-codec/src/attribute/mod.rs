//! Attribute modifiers stored in an item's persistent payload.
//!
//! Modifiers live under [`ATTRIBUTE_MODIFIERS_KEY`] as a list of compounds:
//!
//! | key             | tag    |
//! |-----------------|--------|
//! | `UUIDMost`      | long   |
//! | `UUIDLeast`     | long   |
//! | `AttributeName` | string |
//! | `Operation`     | int    |
//! | `Name`          | string |
//! | `Amount`        | double |
//!
//! [`AttributeStore`] edits that list copy-on-write. Attribute types are
//! interned through an [`AttributeRegistry`].

pub mod registry;
pub mod storage;
pub mod store;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uuid::Uuid;

use crate::error::AttributeError;
use crate::model::id::{from_halves, to_halves};
use crate::tag::CompoundTag;
use crate::util::wire_enum;

pub use crate::limits::ATTRIBUTE_MODIFIERS_KEY;
pub use registry::AttributeRegistry;
pub use storage::ItemStorage;
pub use store::AttributeStore;

/// An interned attribute type id, such as `generic.maxHealth`.
///
/// Equality compares ids. [`is_same`](Self::is_same) checks interned identity.
#[derive(Debug, Clone)]
pub struct AttributeType(Arc<str>);

impl AttributeType {
    /// Only the registry creates types, so every id has one identity.
    fn from_id(id: &str) -> Self {
        Self(Arc::from(id))
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// Returns true if both handles point at the same interned entry.
    pub fn is_same(&self, other: &AttributeType) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for AttributeType {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for AttributeType {}

impl Hash for AttributeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

wire_enum! {
    /// How a modifier's amount combines with the base value.
    ///
    /// Stored by ordinal on the tag surface and by name elsewhere.
    pub enum Operation {
        AddNumber => "ADD_NUMBER",
        MultiplyPercentage => "MULTIPLY_PERCENTAGE",
        AddPercentage => "ADD_PERCENTAGE",
    }
}

impl Operation {
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    pub fn from_ordinal(ordinal: i32) -> Option<Operation> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Operation::ALL.get(i))
            .copied()
    }
}

/// One attribute modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeModifier {
    /// Identity; kept across every read-modify-write.
    pub uuid: Uuid,
    pub attribute_type: AttributeType,
    pub operation: Operation,
    pub name: String,
    pub amount: f64,
}

impl AttributeModifier {
    /// A dummy modifier with a fresh random uuid.
    pub fn new(registry: &AttributeRegistry) -> Self {
        Self::default_with_uuid(Uuid::new_v4(), registry)
    }

    /// A dummy modifier with the given uuid: `dummy` type, `ADD_NUMBER`,
    /// named after its type, amount 0.
    pub fn default_with_uuid(uuid: Uuid, registry: &AttributeRegistry) -> Self {
        let attribute_type = registry.dummy();
        Self {
            uuid,
            name: attribute_type.id().to_string(),
            attribute_type,
            operation: Operation::AddNumber,
            amount: 0.0,
        }
    }

    pub fn builder() -> AttributeModifierBuilder {
        AttributeModifierBuilder::default()
    }

    /// Encodes this modifier as a payload compound.
    pub fn to_tag(&self) -> CompoundTag {
        let (most, least) = to_halves(self.uuid);
        let mut tag = CompoundTag::new();
        tag.insert("UUIDMost", most);
        tag.insert("UUIDLeast", least);
        tag.insert("AttributeName", self.attribute_type.id());
        tag.insert("Operation", self.operation.ordinal());
        tag.insert("Name", self.name.as_str());
        tag.insert("Amount", self.amount);
        tag
    }

    /// Decodes a payload compound.
    ///
    /// Missing fields take their defaults. Returns `None` only when the
    /// operation ordinal is out of range.
    pub fn from_tag(tag: &CompoundTag, registry: &AttributeRegistry) -> Option<Self> {
        let operation = Operation::from_ordinal(tag.get_i32("Operation", 0))?;
        Some(Self {
            uuid: from_halves(tag.get_i64("UUIDMost", 0), tag.get_i64("UUIDLeast", 0)),
            attribute_type: registry.intern(tag.get_str("AttributeName", registry::ids::DUMMY)),
            operation,
            name: tag.get_str("Name", registry::ids::DUMMY).to_string(),
            amount: tag.get_f64("Amount", 0.0),
        })
    }
}

/// Strict construction of an [`AttributeModifier`].
///
/// Type, operation and name are required; uuid defaults to a fresh random
/// one and amount to 0.
#[derive(Debug, Clone, Default)]
pub struct AttributeModifierBuilder {
    uuid: Option<Uuid>,
    attribute_type: Option<AttributeType>,
    operation: Option<Operation>,
    name: Option<String>,
    amount: f64,
}

impl AttributeModifierBuilder {
    pub fn uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    pub fn attribute_type(mut self, attribute_type: AttributeType) -> Self {
        self.attribute_type = Some(attribute_type);
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn build(self) -> Result<AttributeModifier, AttributeError> {
        Ok(AttributeModifier {
            uuid: self.uuid.unwrap_or_else(Uuid::new_v4),
            attribute_type: self
                .attribute_type
                .ok_or(AttributeError::MissingField { field: "attribute_type" })?,
            operation: self
                .operation
                .ok_or(AttributeError::MissingField { field: "operation" })?,
            name: self.name.ok_or(AttributeError::MissingField { field: "name" })?,
            amount: self.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;

    #[test]
    fn test_operation_ordinals() {
        assert_eq!(Operation::AddNumber.ordinal(), 0);
        assert_eq!(Operation::AddPercentage.ordinal(), 2);
        assert_eq!(Operation::from_ordinal(1), Some(Operation::MultiplyPercentage));
        assert_eq!(Operation::from_ordinal(3), None);
        assert_eq!(Operation::from_ordinal(-1), None);
    }

    #[test]
    fn test_builder_requires_fields() {
        let registry = AttributeRegistry::with_builtins();
        let err = AttributeModifier::builder()
            .operation(Operation::AddNumber)
            .name("x")
            .build()
            .unwrap_err();
        assert_eq!(err, AttributeError::MissingField { field: "attribute_type" });

        let err = AttributeModifier::builder()
            .attribute_type(registry.dummy())
            .name("x")
            .build()
            .unwrap_err();
        assert_eq!(err, AttributeError::MissingField { field: "operation" });

        let err = AttributeModifier::builder()
            .attribute_type(registry.dummy())
            .operation(Operation::AddNumber)
            .build()
            .unwrap_err();
        assert_eq!(err, AttributeError::MissingField { field: "name" });
    }

    #[test]
    fn test_tag_roundtrip() {
        let registry = AttributeRegistry::with_builtins();
        let modifier = AttributeModifier::builder()
            .attribute_type(registry.intern(registry::ids::MAX_HEALTH))
            .operation(Operation::AddPercentage)
            .name("bonus")
            .amount(0.25)
            .build()
            .unwrap();

        let decoded = AttributeModifier::from_tag(&modifier.to_tag(), &registry).unwrap();
        assert_eq!(decoded, modifier);
        assert!(decoded.attribute_type.is_same(&modifier.attribute_type));
    }

    #[test]
    fn test_from_tag_defaults_and_bad_ordinal() {
        let registry = AttributeRegistry::with_builtins();
        let decoded = AttributeModifier::from_tag(&CompoundTag::new(), &registry).unwrap();
        assert_eq!(decoded.uuid, Uuid::nil());
        assert_eq!(decoded.attribute_type.id(), "dummy");
        assert_eq!(decoded.name, "dummy");
        assert_eq!(decoded.operation, Operation::AddNumber);

        let mut tag = CompoundTag::new();
        tag.insert("Operation", Tag::Int(9));
        assert!(AttributeModifier::from_tag(&tag, &registry).is_none());
    }

    #[test]
    fn test_default_with_uuid() {
        let registry = AttributeRegistry::with_builtins();
        let id = Uuid::new_v4();
        let m = AttributeModifier::default_with_uuid(id, &registry);
        assert_eq!(m.uuid, id);
        assert_eq!(m.name, "dummy");
        assert_eq!(m.amount, 0.0);
    }
}
