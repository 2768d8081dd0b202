//! Item kinds and the kind → metadata dispatch table.

use crate::util::wire_enum;

wire_enum! {
    /// The base type of an item stack.
    ///
    /// `Empty` is the absent item; it carries no durability, amount,
    /// enchantments or metadata.
    pub enum ItemKind {
        Empty => "AIR",

        // Tools and weapons
        WoodenSword => "WOODEN_SWORD",
        StoneSword => "STONE_SWORD",
        IronSword => "IRON_SWORD",
        GoldenSword => "GOLDEN_SWORD",
        DiamondSword => "DIAMOND_SWORD",
        WoodenPickaxe => "WOODEN_PICKAXE",
        StonePickaxe => "STONE_PICKAXE",
        IronPickaxe => "IRON_PICKAXE",
        DiamondPickaxe => "DIAMOND_PICKAXE",
        IronAxe => "IRON_AXE",
        DiamondAxe => "DIAMOND_AXE",
        IronShovel => "IRON_SHOVEL",
        Bow => "BOW",
        Arrow => "ARROW",
        FishingRod => "FISHING_ROD",
        Shears => "SHEARS",
        FlintAndSteel => "FLINT_AND_STEEL",

        // Armor
        LeatherHelmet => "LEATHER_HELMET",
        LeatherChestplate => "LEATHER_CHESTPLATE",
        LeatherLeggings => "LEATHER_LEGGINGS",
        LeatherBoots => "LEATHER_BOOTS",
        ChainmailHelmet => "CHAINMAIL_HELMET",
        IronHelmet => "IRON_HELMET",
        IronChestplate => "IRON_CHESTPLATE",
        IronLeggings => "IRON_LEGGINGS",
        IronBoots => "IRON_BOOTS",
        DiamondHelmet => "DIAMOND_HELMET",
        DiamondChestplate => "DIAMOND_CHESTPLATE",
        DiamondLeggings => "DIAMOND_LEGGINGS",
        DiamondBoots => "DIAMOND_BOOTS",

        // Food and materials
        Apple => "APPLE",
        GoldenApple => "GOLDEN_APPLE",
        Bread => "BREAD",
        CookedBeef => "COOKED_BEEF",
        Stick => "STICK",
        Diamond => "DIAMOND",
        IronIngot => "IRON_INGOT",
        GoldIngot => "GOLD_INGOT",
        EnderPearl => "ENDER_PEARL",
        Compass => "COMPASS",
        Paper => "PAPER",
        Book => "BOOK",
        Stone => "STONE",
        Cobblestone => "COBBLESTONE",
        Wool => "WOOL",
        Tnt => "TNT",

        // Kinds with dedicated metadata
        PlayerHead => "PLAYER_HEAD",
        FilledMap => "FILLED_MAP",
        Potion => "POTION",
        SplashPotion => "SPLASH_POTION",
        LingeringPotion => "LINGERING_POTION",
        WritableBook => "WRITABLE_BOOK",
        WrittenBook => "WRITTEN_BOOK",
        EnchantedBook => "ENCHANTED_BOOK",
        FireworkStar => "FIREWORK_STAR",
        FireworkRocket => "FIREWORK_ROCKET",
    }
}

impl ItemKind {
    /// Returns true for the absent item.
    pub fn is_empty(self) -> bool {
        self == ItemKind::Empty
    }

    /// The metadata holder class for this kind.
    pub fn meta_class(self) -> MetaClass {
        match self {
            ItemKind::Empty => MetaClass::None,
            ItemKind::LeatherHelmet
            | ItemKind::LeatherChestplate
            | ItemKind::LeatherLeggings
            | ItemKind::LeatherBoots => MetaClass::LeatherArmor,
            ItemKind::PlayerHead => MetaClass::Skull,
            ItemKind::FilledMap => MetaClass::Map,
            ItemKind::Potion | ItemKind::SplashPotion | ItemKind::LingeringPotion => {
                MetaClass::Potion
            }
            ItemKind::WritableBook | ItemKind::WrittenBook => MetaClass::Book,
            ItemKind::EnchantedBook => MetaClass::EnchantmentStorage,
            ItemKind::FireworkStar => MetaClass::FireworkCharge,
            ItemKind::FireworkRocket => MetaClass::Firework,
            _ => MetaClass::Plain,
        }
    }
}

/// Identifies one metadata variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaTag {
    Display,
    Color,
    Owner,
    Scaling,
    Potion,
    Book,
    Burst,
    Firework,
}

/// The metadata holder class an item kind instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaClass {
    /// Empty items carry no metadata at all.
    None,
    Plain,
    LeatherArmor,
    Skull,
    Map,
    Potion,
    Book,
    EnchantmentStorage,
    FireworkCharge,
    Firework,
}

impl MetaClass {
    /// Variants that may be populated on a meta of this class.
    pub fn legal_tags(self) -> &'static [MetaTag] {
        use MetaTag::*;
        match self {
            MetaClass::None => &[],
            MetaClass::Plain | MetaClass::EnchantmentStorage => &[Display],
            MetaClass::LeatherArmor => &[Display, Color],
            MetaClass::Skull => &[Display, Owner],
            MetaClass::Map => &[Display, Scaling],
            MetaClass::Potion => &[Display, Potion],
            MetaClass::Book => &[Display, Book],
            MetaClass::FireworkCharge => &[Display, Burst],
            MetaClass::Firework => &[Display, Firework],
        }
    }

    pub fn allows(self, tag: MetaTag) -> bool {
        self.legal_tags().contains(&tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(ItemKind::from_name("AIR"), Some(ItemKind::Empty));
        assert_eq!(ItemKind::from_name("iron_sword"), None);
    }

    #[test]
    fn test_dispatch_table() {
        assert_eq!(ItemKind::LeatherBoots.meta_class(), MetaClass::LeatherArmor);
        assert_eq!(ItemKind::SplashPotion.meta_class(), MetaClass::Potion);
        assert_eq!(ItemKind::IronSword.meta_class(), MetaClass::Plain);
        assert!(MetaClass::Potion.allows(MetaTag::Potion));
        assert!(MetaClass::Potion.allows(MetaTag::Display));
        assert!(!MetaClass::Potion.allows(MetaTag::Book));
        assert!(ItemKind::Empty.meta_class().legal_tags().is_empty());
    }

    #[test]
    fn test_every_class_but_none_allows_display() {
        for kind in ItemKind::ALL.iter().filter(|k| !k.is_empty()) {
            assert!(kind.meta_class().allows(MetaTag::Display), "{kind}");
        }
    }
}
