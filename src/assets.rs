/// Asset keys referenced by the core, and the lookup boundary used to check
/// them.  Loading and decoding resources is the front-end's job; the core
/// only needs to know every key it emits will resolve.

use std::collections::HashSet;
use std::fmt;

use crate::error::{GameError, GameResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Sound,
    Font,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Image => "image",
            AssetKind::Sound => "sound",
            AssetKind::Font => "font",
        };
        f.write_str(name)
    }
}

// ── Image keys ────────────────────────────────────────────────────────────────

pub const IMG_PLAYER: &str = "player/base";
pub const IMG_LASER: &str = "player/laser";
pub const IMG_TURRET: &str = "player/turret";

pub const IMG_PLASMA_SHOT: &str = "bullet/plasma_shot";
pub const IMG_PLASMA_BULLET: &str = "bullet/plasma_bullet";
pub const IMG_BOMB: &str = "bullet/bomb";
pub const IMG_BULLET: &str = "bullet/bullet";
pub const IMG_MISSILE: &str = "bullet/homing_missile";

pub const IMG_JET: &str = "enemy/jet";
pub const IMG_CHOPPER: &str = "enemy/chopper";
pub const IMG_HOVER_CHOPPER: &str = "enemy/hover_chopper";
pub const IMG_HELICOPTER: &str = "enemy/helicopter";
pub const IMG_GUNNER: &str = "enemy/gunner";

pub const IMG_MOUNTAINS: &str = "background/mountains";
pub const IMG_GROUND: &str = "background/ground";

pub const FX_DEATH: &str = "death/explosion";
pub const FX_END: &str = "end/explosion";
pub const FX_PLAYER: &str = "player/explosion";
pub const FX_DROP: &str = "drop/explosion";
pub const FX_BULLET: &str = "bullet/explosion";
pub const FX_BOMB: &str = "bomb/explosion";

// ── Sound & font keys ─────────────────────────────────────────────────────────

pub const SND_PLASMA: &str = "plasma";
pub const SND_TURRET: &str = "turret";
pub const SND_HIT: &str = "hit";
pub const SND_DEATH: &str = "death";
pub const SND_EXPLOSIONS: [&str; 5] = [
    "explosion1",
    "explosion2",
    "explosion3",
    "explosion4",
    "explosion5",
];

pub const FONT_HUD: &str = "digital";

pub const REQUIRED_IMAGES: &[&str] = &[
    IMG_PLAYER,
    IMG_LASER,
    IMG_TURRET,
    IMG_PLASMA_SHOT,
    IMG_PLASMA_BULLET,
    IMG_BOMB,
    IMG_BULLET,
    IMG_MISSILE,
    IMG_JET,
    IMG_CHOPPER,
    IMG_HOVER_CHOPPER,
    IMG_HELICOPTER,
    IMG_GUNNER,
    IMG_MOUNTAINS,
    IMG_GROUND,
    FX_DEATH,
    FX_END,
    FX_PLAYER,
    FX_DROP,
    FX_BULLET,
    FX_BOMB,
];

pub const REQUIRED_SOUNDS: &[&str] = &[
    SND_PLASMA,
    SND_TURRET,
    SND_HIT,
    SND_DEATH,
    SND_EXPLOSIONS[0],
    SND_EXPLOSIONS[1],
    SND_EXPLOSIONS[2],
    SND_EXPLOSIONS[3],
    SND_EXPLOSIONS[4],
];

pub const REQUIRED_FONTS: &[&str] = &[FONT_HUD];

/// Every `(kind, key)` pair the core may reference during a session.
pub fn required() -> impl Iterator<Item = (AssetKind, &'static str)> {
    let images = REQUIRED_IMAGES.iter().map(|k| (AssetKind::Image, *k));
    let sounds = REQUIRED_SOUNDS.iter().map(|k| (AssetKind::Sound, *k));
    let fonts = REQUIRED_FONTS.iter().map(|k| (AssetKind::Font, *k));
    images.chain(sounds).chain(fonts)
}

/// Resource lookup provided by whoever loads the assets.
pub trait AssetCatalog {
    fn contains(&self, kind: AssetKind, key: &str) -> bool;
}

/// Fail with the first required key the catalog cannot resolve.
pub fn validate(catalog: &impl AssetCatalog) -> GameResult<()> {
    match required().find(|(kind, key)| !catalog.contains(*kind, key)) {
        Some((kind, key)) => Err(GameError::AssetMissing { kind, key }),
        None => Ok(()),
    }
}

/// A plain set of registered keys.
#[derive(Clone, Debug, Default)]
pub struct AssetManifest {
    entries: HashSet<(AssetKind, String)>,
}

impl AssetManifest {
    pub fn new() -> AssetManifest {
        AssetManifest::default()
    }

    /// A manifest holding every key the core requires.
    pub fn complete() -> AssetManifest {
        let mut manifest = AssetManifest::new();
        for (kind, key) in required() {
            manifest.insert(kind, key);
        }
        manifest
    }

    pub fn insert(&mut self, kind: AssetKind, key: &str) {
        self.entries.insert((kind, key.to_string()));
    }

    pub fn remove(&mut self, kind: AssetKind, key: &str) {
        self.entries.remove(&(kind, key.to_string()));
    }
}

impl AssetCatalog for AssetManifest {
    fn contains(&self, kind: AssetKind, key: &str) -> bool {
        self.entries.contains(&(kind, key.to_string()))
    }
}
