/// All game entity types: pure data, no logic.

use crate::progression::Progression;
use crate::stats::StatsKeeper;
use crate::timer::Cooldown;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

// ── Player & guns ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    /// Hull centre.
    pub x: f32,
    pub y: f32,
    /// Lateral step per frame.
    pub speed: f32,
    /// False once the hull has been destroyed; the player is then neither
    /// drawn nor hit.
    pub alive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GunKind {
    Laser,
    Turret,
}

impl GunKind {
    pub fn toggled(self) -> GunKind {
        match self {
            GunKind::Laser => GunKind::Turret,
            GunKind::Turret => GunKind::Laser,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Gun {
    pub kind: GunKind,
    /// Mount position, recomputed from the player every frame.
    pub x: f32,
    pub y: f32,
    /// Degrees, always within `[GUN_ANGLE_MIN, GUN_ANGLE_MAX]`.
    pub angle: i32,
    pub cooldown: Cooldown,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Homing state carried by missiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homing {
    pub launched_ms: u64,
    /// Last player position the missile was briefed with.
    pub target: (f32, f32),
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub owner: BulletOwner,
    pub sprite: &'static str,
    pub x: f32,
    pub y: f32,
    /// Heading in degrees; see `geometry::heading_vector`.
    pub angle: f32,
    pub speed: f32,
    pub damage: i32,
    /// Score credited when a player bullet shoots this projectile down.
    pub points: u32,
    /// Explosion animation prefix and its frame count.
    pub death: Option<(&'static str, u32)>,
    /// Extra projectile hits a player bullet can absorb before it is removed.
    pub health: i32,
    pub size: (f32, f32),
    /// Set for the frame in which the projectile reaches the ground band.
    pub exploding: bool,
    pub homing: Option<Homing>,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Jet,
    Chopper,
    HoverChopper,
    Helicopter,
    Gunner,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Jet,
        EnemyKind::Chopper,
        EnemyKind::HoverChopper,
        EnemyKind::Helicopter,
        EnemyKind::Gunner,
    ];
}

/// What an enemy fires.  Copied into every projectile it creates.
#[derive(Clone, Debug, PartialEq)]
pub struct ShotTemplate {
    pub sprite: &'static str,
    pub speed: f32,
    pub angle: f32,
    pub damage: i32,
    pub points: u32,
    pub death: &'static str,
    pub frames: u32,
    pub size: (f32, f32),
    pub homing: bool,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub sprite: &'static str,
    pub x: f32,
    pub y: f32,
    /// +1 flying right, −1 flying left.  Never 0.
    pub direction: i32,
    pub speed: f32,
    pub health: i32,
    pub ammo: u32,
    pub cooldown: Cooldown,
    pub points: u32,
    pub shooting: bool,
    pub shot: ShotTemplate,
    /// Player position as of this frame's briefing.
    pub target: (f32, f32),
    pub size: (f32, f32),
}

// ── Visuals ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    /// Bottom-centre anchor.
    pub x: f32,
    pub y: f32,
    pub key: &'static str,
    pub frames: u32,
    pub frame: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackdropLayer {
    pub key: &'static str,
    /// Left edge of the image in screen space.
    pub left: f32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoundEvent {
    pub key: &'static str,
}

// ── Master session state ──────────────────────────────────────────────────────

/// The entire session.  Cloneable so `advance_frame` can return a new copy
/// without mutating the original.
#[derive(Clone, Debug)]
pub struct Session {
    pub player: Player,
    pub laser: Gun,
    pub turret: Gun,
    pub active_gun: GunKind,
    pub player_bullets: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    /// Far layer first.
    pub backdrop: Vec<BackdropLayer>,
    pub stats: StatsKeeper,
    pub progression: Progression,
    pub status: GameStatus,
    /// Clock reading at the moment the session left `Running`.
    pub over_at_ms: Option<u64>,
    pub frame: u64,
}

impl Session {
    pub fn gun(&self, kind: GunKind) -> &Gun {
        match kind {
            GunKind::Laser => &self.laser,
            GunKind::Turret => &self.turret,
        }
    }

    pub fn gun_mut(&mut self, kind: GunKind) -> &mut Gun {
        match kind {
            GunKind::Laser => &mut self.laser,
            GunKind::Turret => &mut self.turret,
        }
    }
}
