//! Semantic validation for items.
//!
//! Structural checks happen while decoding; these checks guard the encode
//! direction so that only items a decoder would accept are ever written.

use rustc_hash::FxHashSet;

use crate::attribute::store::entry_uuid;
use crate::error::EncodeError;
use crate::limits::ATTRIBUTE_MODIFIERS_KEY;
use crate::model::ItemRecord;

/// Validates an item before encoding.
///
/// Checks:
/// - amount is non-negative
/// - populated meta belongs to the class the kind instantiates, and carries
///   only variants legal for it
/// - attribute modifier uuids are unique
/// - attribute modifier amounts are finite
///
/// Meta with no populated variant is ignored; encoders treat it as absent.
pub fn validate_item(item: &ItemRecord) -> Result<(), EncodeError> {
    if item.amount < 0 {
        return Err(EncodeError::NegativeAmount { amount: item.amount });
    }

    if let Some(meta) = item.populated_meta() {
        let expected = item.kind.meta_class();
        if meta.class() != expected {
            return Err(EncodeError::MetaClassMismatch {
                kind: item.kind,
                expected,
                found: meta.class(),
            });
        }
        if let Some(tag) = meta.tags().find(|tag| !expected.allows(*tag)) {
            return Err(EncodeError::IllegalVariant { kind: item.kind, tag });
        }
    }

    let entries = item.tag.list(ATTRIBUTE_MODIFIERS_KEY).unwrap_or(&[]);
    let mut seen = FxHashSet::with_capacity_and_hasher(entries.len(), Default::default());
    for entry in entries {
        let Some(uuid) = entry_uuid(entry) else {
            continue;
        };
        if !seen.insert(uuid) {
            return Err(EncodeError::DuplicateModifier { uuid });
        }
        let amount = entry.as_compound().map_or(0.0, |c| c.get_f64("Amount", 0.0));
        if !amount.is_finite() {
            return Err(EncodeError::NonFiniteAmount { uuid, amount });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeModifier, AttributeRegistry};
    use crate::model::{ItemKind, ItemMeta, MetaClass, MetaVariant, Rgb};
    use crate::tag::Tag;

    #[test]
    fn test_valid_item() {
        let item = ItemRecord::new(ItemKind::Bread);
        assert!(validate_item(&item).is_ok());
    }

    #[test]
    fn test_negative_amount() {
        let mut item = ItemRecord::new(ItemKind::Bread);
        item.amount = -2;
        assert!(matches!(
            validate_item(&item),
            Err(EncodeError::NegativeAmount { amount: -2 })
        ));
    }

    #[test]
    fn test_meta_class_mismatch() {
        let mut item = ItemRecord::new(ItemKind::IronSword);
        let meta = ItemMeta::for_class(MetaClass::LeatherArmor)
            .with(MetaVariant::Color(Rgb::WHITE))
            .unwrap();
        item.meta = Some(meta);

        assert!(matches!(
            validate_item(&item),
            Err(EncodeError::MetaClassMismatch {
                kind: ItemKind::IronSword,
                expected: MetaClass::Plain,
                found: MetaClass::LeatherArmor,
            })
        ));
    }

    #[test]
    fn test_empty_foreign_meta_ignored() {
        let mut item = ItemRecord::new(ItemKind::IronSword);
        item.meta = Some(ItemMeta::for_class(MetaClass::Skull));
        assert!(validate_item(&item).is_ok());
    }

    #[test]
    fn test_duplicate_modifier_uuid() {
        let registry = AttributeRegistry::with_builtins();
        let modifier = AttributeModifier::new(&registry);
        let mut item = ItemRecord::new(ItemKind::IronSword);
        item.tag.put(
            ATTRIBUTE_MODIFIERS_KEY,
            vec![
                Tag::Compound(modifier.to_tag()),
                Tag::Compound(modifier.to_tag()),
            ],
        );

        assert!(matches!(
            validate_item(&item),
            Err(EncodeError::DuplicateModifier { uuid }) if uuid == modifier.uuid
        ));
    }

    #[test]
    fn test_non_finite_modifier_amount() {
        let registry = AttributeRegistry::with_builtins();
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut modifier = AttributeModifier::new(&registry);
            modifier.amount = amount;
            let item = ItemRecord::new(ItemKind::IronSword)
                .attributes(&registry)
                .add(&modifier)
                .unwrap();

            assert!(matches!(
                validate_item(&item),
                Err(EncodeError::NonFiniteAmount { uuid, .. }) if uuid == modifier.uuid
            ));
            assert!(matches!(
                crate::codec::encode_item_json(&item),
                Err(EncodeError::NonFiniteAmount { .. })
            ));
        }
    }
}
