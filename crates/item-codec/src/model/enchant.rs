//! Enchantment identifiers.

use crate::util::wire_enum;

wire_enum! {
    /// An enchantment that can be applied to an item.
    pub enum Enchantment {
        Protection => "PROTECTION",
        FireProtection => "FIRE_PROTECTION",
        FeatherFalling => "FEATHER_FALLING",
        BlastProtection => "BLAST_PROTECTION",
        ProjectileProtection => "PROJECTILE_PROTECTION",
        Respiration => "RESPIRATION",
        AquaAffinity => "AQUA_AFFINITY",
        Thorns => "THORNS",
        DepthStrider => "DEPTH_STRIDER",
        Sharpness => "SHARPNESS",
        Smite => "SMITE",
        BaneOfArthropods => "BANE_OF_ARTHROPODS",
        Knockback => "KNOCKBACK",
        FireAspect => "FIRE_ASPECT",
        Looting => "LOOTING",
        Efficiency => "EFFICIENCY",
        SilkTouch => "SILK_TOUCH",
        Unbreaking => "UNBREAKING",
        Fortune => "FORTUNE",
        Power => "POWER",
        Punch => "PUNCH",
        Flame => "FLAME",
        Infinity => "INFINITY",
        LuckOfTheSea => "LUCK_OF_THE_SEA",
        Lure => "LURE",
        Mending => "MENDING",
    }
}

/// Legacy server names still found in older saves.
const LEGACY_NAMES: &[(&str, Enchantment)] = &[
    ("PROTECTION_ENVIRONMENTAL", Enchantment::Protection),
    ("PROTECTION_FIRE", Enchantment::FireProtection),
    ("PROTECTION_FALL", Enchantment::FeatherFalling),
    ("PROTECTION_EXPLOSIONS", Enchantment::BlastProtection),
    ("PROTECTION_PROJECTILE", Enchantment::ProjectileProtection),
    ("OXYGEN", Enchantment::Respiration),
    ("WATER_WORKER", Enchantment::AquaAffinity),
    ("DAMAGE_ALL", Enchantment::Sharpness),
    ("DAMAGE_UNDEAD", Enchantment::Smite),
    ("DAMAGE_ARTHROPODS", Enchantment::BaneOfArthropods),
    ("LOOT_BONUS_MOBS", Enchantment::Looting),
    ("DIG_SPEED", Enchantment::Efficiency),
    ("DURABILITY", Enchantment::Unbreaking),
    ("LOOT_BONUS_BLOCKS", Enchantment::Fortune),
    ("ARROW_DAMAGE", Enchantment::Power),
    ("ARROW_KNOCKBACK", Enchantment::Punch),
    ("ARROW_FIRE", Enchantment::Flame),
    ("ARROW_INFINITE", Enchantment::Infinity),
    ("LUCK", Enchantment::LuckOfTheSea),
];

impl Enchantment {
    /// Resolves a current or legacy name.
    pub fn resolve(name: &str) -> Option<Enchantment> {
        Enchantment::from_name(name).or_else(|| {
            LEGACY_NAMES
                .iter()
                .find(|(legacy, _)| *legacy == name)
                .map(|(_, e)| *e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_current_and_legacy() {
        assert_eq!(Enchantment::resolve("SHARPNESS"), Some(Enchantment::Sharpness));
        assert_eq!(Enchantment::resolve("DAMAGE_ALL"), Some(Enchantment::Sharpness));
        assert_eq!(Enchantment::resolve("DURABILITY"), Some(Enchantment::Unbreaking));
        assert_eq!(Enchantment::resolve("SOUL_SPEED_XL"), None);
    }

    #[test]
    fn test_encode_uses_current_name() {
        let e = Enchantment::resolve("ARROW_INFINITE").unwrap();
        assert_eq!(e.name(), "INFINITY");
    }
}
