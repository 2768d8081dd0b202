//! Process-wide attribute type registry.

use dashmap::DashMap;
use lazy_static::lazy_static;
use rustc_hash::FxBuildHasher;

use super::AttributeType;

/// Well-known attribute ids.
pub mod ids {
    pub const MAX_HEALTH: &str = "generic.maxHealth";
    pub const FOLLOW_RANGE: &str = "generic.followRange";
    pub const ATTACK_DAMAGE: &str = "generic.attackDamage";
    pub const MOVEMENT_SPEED: &str = "generic.movementSpeed";
    pub const KNOCKBACK_RESISTANCE: &str = "generic.knockbackResistance";
    /// Placeholder type used by modifiers that only carry data.
    pub const DUMMY: &str = "dummy";

    pub const BUILTINS: &[&str] = &[
        MAX_HEALTH,
        FOLLOW_RANGE,
        ATTACK_DAMAGE,
        MOVEMENT_SPEED,
        KNOCKBACK_RESISTANCE,
        DUMMY,
    ];
}

lazy_static! {
    static ref GLOBAL: AttributeRegistry = AttributeRegistry::with_builtins();
}

/// An open set of attribute types, interned by id.
///
/// Interning the same id twice returns the same [`AttributeType`]; the first
/// registration wins. The map is sharded, so interning a new id locks one
/// shard and lookups of ids in other shards proceed untouched.
#[derive(Debug, Default)]
pub struct AttributeRegistry {
    types: DashMap<String, AttributeType, FxBuildHasher>,
}

impl AttributeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the built-in ids.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for id in ids::BUILTINS {
            registry.intern(id);
        }
        registry
    }

    /// The shared process-wide registry.
    pub fn global() -> &'static AttributeRegistry {
        &GLOBAL
    }

    /// Returns the interned type for `id`, registering it if new.
    pub fn intern(&self, id: &str) -> AttributeType {
        if let Some(existing) = self.get(id) {
            return existing;
        }
        self.types
            .entry(id.to_string())
            .or_insert_with(|| AttributeType::from_id(id))
            .value()
            .clone()
    }

    /// Returns the interned type for `id` without registering it.
    pub fn get(&self, id: &str) -> Option<AttributeType> {
        self.types.get(id).map(|entry| entry.value().clone())
    }

    pub fn dummy(&self) -> AttributeType {
        self.intern(ids::DUMMY)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_intern_returns_same_identity() {
        let registry = AttributeRegistry::new();
        let a = registry.intern("custom.luck");
        let b = registry.intern("custom.luck");
        assert!(a.is_same(&b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builtins_present() {
        let registry = AttributeRegistry::with_builtins();
        assert_eq!(registry.len(), ids::BUILTINS.len());
        assert_eq!(registry.get(ids::MAX_HEALTH).unwrap().id(), "generic.maxHealth");
        assert!(registry.get("generic.luck").is_none());
    }

    #[test]
    fn test_global_is_shared() {
        let a = AttributeRegistry::global().intern(ids::ATTACK_DAMAGE);
        let b = AttributeRegistry::global().get(ids::ATTACK_DAMAGE).unwrap();
        assert!(a.is_same(&b));
    }

    #[test]
    fn test_concurrent_intern_first_wins() {
        let registry = Arc::new(AttributeRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.intern("race.id"))
            })
            .collect();
        let types: Vec<AttributeType> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winner = registry.get("race.id").unwrap();
        assert!(types.iter().all(|t| t.is_same(&winner)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookups_proceed_while_interning() {
        let registry = Arc::new(AttributeRegistry::with_builtins());
        let writers: Vec<_> = (0..4)
            .map(|w| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..200 {
                        registry.intern(&format!("custom.{w}.{i}"));
                    }
                })
            })
            .collect();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    (0..200).all(|_| registry.get(ids::ATTACK_DAMAGE).is_some())
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }
        assert!(readers.into_iter().all(|r| r.join().unwrap()));
        assert_eq!(registry.len(), ids::BUILTINS.len() + 800);
    }
}
