//! Item metadata variants.
//!
//! Metadata is a closed set of optional variants. Which variants an item may
//! carry is decided by its kind through [`ItemKind::meta_class`]; the check
//! happens once when a variant is inserted and again at encode time.

use crate::error::MetaError;
use crate::model::{ItemKind, MetaClass, MetaTag};
use crate::util::wire_enum;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF_FF_FF);
    pub const BLACK: Rgb = Rgb(0);

    /// Builds a color from a packed `0xRRGGBB` value; wider values are rejected.
    pub fn from_rgb(rgb: u32) -> Option<Rgb> {
        (rgb <= 0xFF_FF_FF).then_some(Rgb(rgb))
    }

    /// Builds a color from a signed wire integer.
    pub fn from_wire(value: i64) -> Option<Rgb> {
        u32::try_from(value).ok().and_then(Rgb::from_rgb)
    }

    pub fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Returns the packed `0xRRGGBB` value.
    pub fn as_rgb(self) -> u32 {
        self.0
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }
}

wire_enum! {
    /// Status effect carried by potions.
    pub enum PotionEffectType {
        Speed => "SPEED",
        Slowness => "SLOW",
        Haste => "FAST_DIGGING",
        MiningFatigue => "SLOW_DIGGING",
        Strength => "INCREASE_DAMAGE",
        InstantHealth => "HEAL",
        InstantDamage => "HARM",
        JumpBoost => "JUMP",
        Nausea => "CONFUSION",
        Regeneration => "REGENERATION",
        Resistance => "DAMAGE_RESISTANCE",
        FireResistance => "FIRE_RESISTANCE",
        WaterBreathing => "WATER_BREATHING",
        Invisibility => "INVISIBILITY",
        Blindness => "BLINDNESS",
        NightVision => "NIGHT_VISION",
        Hunger => "HUNGER",
        Weakness => "WEAKNESS",
        Poison => "POISON",
        Wither => "WITHER",
        HealthBoost => "HEALTH_BOOST",
        Absorption => "ABSORPTION",
        Saturation => "SATURATION",
    }
}

/// One potion effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotionEffect {
    pub effect_type: PotionEffectType,
    /// Duration in ticks.
    pub duration: i32,
    pub amplifier: i32,
}

impl PotionEffect {
    pub fn new(effect_type: PotionEffectType, duration: i32, amplifier: i32) -> Self {
        Self { effect_type, duration, amplifier }
    }
}

/// Custom effects of a potion, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotionMeta {
    pub effects: Vec<PotionEffect>,
}

/// Contents of a writable or written book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookMeta {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Vec<String>,
}

wire_enum! {
    /// Explosion shape of a firework burst.
    pub enum BurstShape {
        Ball => "BALL",
        LargeBall => "BALL_LARGE",
        Star => "STAR",
        Burst => "BURST",
        Creeper => "CREEPER",
    }
}

/// A single firework explosion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireworkBurst {
    pub shape: BurstShape,
    pub primary: Vec<Rgb>,
    pub fade: Vec<Rgb>,
    pub flicker: bool,
    pub trail: bool,
}

impl FireworkBurst {
    pub fn new(shape: BurstShape) -> Self {
        Self {
            shape,
            primary: Vec::new(),
            fade: Vec::new(),
            flicker: false,
            trail: false,
        }
    }
}

/// A firework rocket: fuse power and its bursts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FireworkMeta {
    pub power: i32,
    pub bursts: Vec<FireworkBurst>,
}

/// Display name and lore; legal on every non-empty item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayMeta {
    pub name: Option<String>,
    pub lore: Option<Vec<String>>,
}

impl DisplayMeta {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.lore.is_none()
    }
}

/// One metadata variant, tagged.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaVariant {
    Display(DisplayMeta),
    Color(Rgb),
    Owner(String),
    Scaling(bool),
    Potion(PotionMeta),
    Book(BookMeta),
    Burst(FireworkBurst),
    Firework(FireworkMeta),
}

impl MetaVariant {
    pub fn tag(&self) -> MetaTag {
        match self {
            MetaVariant::Display(_) => MetaTag::Display,
            MetaVariant::Color(_) => MetaTag::Color,
            MetaVariant::Owner(_) => MetaTag::Owner,
            MetaVariant::Scaling(_) => MetaTag::Scaling,
            MetaVariant::Potion(_) => MetaTag::Potion,
            MetaVariant::Book(_) => MetaTag::Book,
            MetaVariant::Burst(_) => MetaTag::Burst,
            MetaVariant::Firework(_) => MetaTag::Firework,
        }
    }
}

/// The set of metadata variants on one item.
///
/// Bound to a [`MetaClass`] at construction; only variants legal for that
/// class can be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMeta {
    class: MetaClass,
    display: DisplayMeta,
    color: Option<Rgb>,
    owner: Option<String>,
    scaling: Option<bool>,
    potion: Option<PotionMeta>,
    book: Option<BookMeta>,
    burst: Option<FireworkBurst>,
    firework: Option<FireworkMeta>,
}

impl ItemMeta {
    /// Creates an empty meta of the given class.
    pub fn for_class(class: MetaClass) -> Self {
        Self {
            class,
            display: DisplayMeta::default(),
            color: None,
            owner: None,
            scaling: None,
            potion: None,
            book: None,
            burst: None,
            firework: None,
        }
    }

    /// Creates an empty meta of the class `kind` instantiates.
    pub fn for_kind(kind: ItemKind) -> Self {
        Self::for_class(kind.meta_class())
    }

    pub fn class(&self) -> MetaClass {
        self.class
    }

    /// Inserts a variant, returning the one it replaced.
    pub fn insert(&mut self, variant: MetaVariant) -> Result<Option<MetaVariant>, MetaError> {
        let tag = variant.tag();
        if !self.class.allows(tag) {
            return Err(MetaError::IllegalVariant { class: self.class, tag });
        }
        let previous = self.remove(tag);
        match variant {
            MetaVariant::Display(d) => self.display = d,
            MetaVariant::Color(c) => self.color = Some(c),
            MetaVariant::Owner(o) => self.owner = Some(o),
            MetaVariant::Scaling(s) => self.scaling = Some(s),
            MetaVariant::Potion(p) => self.potion = Some(p),
            MetaVariant::Book(b) => self.book = Some(b),
            MetaVariant::Burst(b) => self.burst = Some(b),
            MetaVariant::Firework(f) => self.firework = Some(f),
        }
        Ok(previous)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, variant: MetaVariant) -> Result<Self, MetaError> {
        self.insert(variant)?;
        Ok(self)
    }

    /// Removes and returns a variant.
    pub fn remove(&mut self, tag: MetaTag) -> Option<MetaVariant> {
        match tag {
            MetaTag::Display => {
                let display = std::mem::take(&mut self.display);
                (!display.is_empty()).then_some(MetaVariant::Display(display))
            }
            MetaTag::Color => self.color.take().map(MetaVariant::Color),
            MetaTag::Owner => self.owner.take().map(MetaVariant::Owner),
            MetaTag::Scaling => self.scaling.take().map(MetaVariant::Scaling),
            MetaTag::Potion => self.potion.take().map(MetaVariant::Potion),
            MetaTag::Book => self.book.take().map(MetaVariant::Book),
            MetaTag::Burst => self.burst.take().map(MetaVariant::Burst),
            MetaTag::Firework => self.firework.take().map(MetaVariant::Firework),
        }
    }

    /// Returns true if `tag` is populated.
    pub fn has(&self, tag: MetaTag) -> bool {
        match tag {
            MetaTag::Display => !self.display.is_empty(),
            MetaTag::Color => self.color.is_some(),
            MetaTag::Owner => self.owner.is_some(),
            MetaTag::Scaling => self.scaling.is_some(),
            MetaTag::Potion => self.potion.is_some(),
            MetaTag::Book => self.book.is_some(),
            MetaTag::Burst => self.burst.is_some(),
            MetaTag::Firework => self.firework.is_some(),
        }
    }

    /// Populated variants, in canonical order.
    pub fn tags(&self) -> impl Iterator<Item = MetaTag> + '_ {
        [
            MetaTag::Display,
            MetaTag::Color,
            MetaTag::Owner,
            MetaTag::Scaling,
            MetaTag::Potion,
            MetaTag::Book,
            MetaTag::Burst,
            MetaTag::Firework,
        ]
        .into_iter()
        .filter(|tag| self.has(*tag))
    }

    /// True when no variant is populated.
    pub fn is_empty(&self) -> bool {
        self.tags().next().is_none()
    }

    // Display is legal everywhere except on empty items, so these setters
    // report the class error instead of silently dropping.

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), MetaError> {
        self.check(MetaTag::Display)?;
        self.display.name = Some(name.into());
        Ok(())
    }

    pub fn set_lore<I, S>(&mut self, lore: I) -> Result<(), MetaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check(MetaTag::Display)?;
        self.display.lore = Some(lore.into_iter().map(Into::into).collect());
        Ok(())
    }

    fn check(&self, tag: MetaTag) -> Result<(), MetaError> {
        if self.class.allows(tag) {
            Ok(())
        } else {
            Err(MetaError::IllegalVariant { class: self.class, tag })
        }
    }

    pub fn display(&self) -> &DisplayMeta {
        &self.display
    }

    pub fn name(&self) -> Option<&str> {
        self.display.name.as_deref()
    }

    pub fn lore(&self) -> Option<&[String]> {
        self.display.lore.as_deref()
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn scaling(&self) -> Option<bool> {
        self.scaling
    }

    pub fn potion(&self) -> Option<&PotionMeta> {
        self.potion.as_ref()
    }

    pub fn book(&self) -> Option<&BookMeta> {
        self.book.as_ref()
    }

    pub fn burst(&self) -> Option<&FireworkBurst> {
        self.burst.as_ref()
    }

    pub fn firework(&self) -> Option<&FireworkMeta> {
        self.firework.as_ref()
    }
}
