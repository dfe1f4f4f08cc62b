/// Compile-time gameplay constants.
///
/// Every tuning number the core uses lives here.  Coordinates are logical
/// pixels on an 800×600 playfield with Y growing downward; times are
/// milliseconds on the clock passed into `advance_frame`.

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Projectiles whose centre drops below `SCREEN_HEIGHT - GROUND_BAND` hit the ground.
pub const GROUND_BAND: f32 = 50.0;

/// Projectiles are culled this far past either horizontal edge.
pub const PROJECTILE_CULL_MARGIN: f32 = 125.0;

/// Enemies spawn and despawn this far past either horizontal edge.
pub const ENEMY_CULL_MARGIN: f32 = 100.0;

/// Spawn altitude band for enemies, `[min, max)`.
pub const ENEMY_ALTITUDE_MIN: i32 = 92;
pub const ENEMY_ALTITUDE_MAX: i32 = 226;

pub const TARGET_FPS: u64 = 30;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_START_X: f32 = SCREEN_WIDTH / 2.0;
pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT - 75.0;
pub const PLAYER_SPEED: f32 = 7.0;
pub const PLAYER_SIZE: (f32, f32) = (96.0, 48.0);

pub const LASER_OFFSET: (f32, f32) = (11.0, 6.0);
pub const TURRET_OFFSET: (f32, f32) = (-26.0, -30.0);

pub const GUN_ANGLE_MIN: i32 = 0;
pub const GUN_ANGLE_MAX: i32 = 180;

// ── Player weapons ────────────────────────────────────────────────────────────

pub const LASER_COOLDOWN_MS: u64 = 500;
pub const LASER_SPEED: f32 = 20.0;
pub const LASER_DAMAGE: i32 = 90;
pub const LASER_HEALTH: i32 = 5;

pub const TURRET_COOLDOWN_MS: u64 = 120;
pub const TURRET_SPEED: f32 = 15.0;
pub const TURRET_DAMAGE: i32 = 40;
pub const TURRET_HEALTH: i32 = 3;
/// Maximum angular jitter, in degrees, applied to each turret shot.
pub const TURRET_JITTER: f32 = 7.0;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const HOMING_WINDOW_MS: u64 = 2800;
pub const MISSILE_LAUNCH_OFFSET: f32 = 15.0;

pub const BULLET_SIZE: (f32, f32) = (8.0, 8.0);
pub const BOMB_SIZE: (f32, f32) = (12.0, 20.0);
pub const MISSILE_SIZE: (f32, f32) = (14.0, 14.0);
pub const PLASMA_SHOT_SIZE: (f32, f32) = (20.0, 20.0);
pub const PLASMA_BULLET_SIZE: (f32, f32) = (10.0, 10.0);

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const JET_BAND: f32 = 25.0;
pub const CHOPPER_BAND: f32 = 300.0;
pub const HOVER_BAND: f32 = 10.0;
pub const HELICOPTER_BAND: f32 = 10.0;

/// Gunners hold fire until this far inside both screen edges.
pub const GUNNER_EDGE_MARGIN: f32 = 50.0;
pub const GUNNER_JITTER: f32 = 5.0;

/// Helicopters and gunners stay put this long after each shot.
pub const DWELL_MS: u64 = 1000;

/// Angle added per hover-chopper shot, multiplied by its direction.
pub const HOVER_SWEEP_STEP: f32 = 10.0;

pub const JET_SIZE: (f32, f32) = (80.0, 30.0);
pub const CHOPPER_SIZE: (f32, f32) = (90.0, 40.0);
pub const HOVER_CHOPPER_SIZE: (f32, f32) = (90.0, 40.0);
pub const HELICOPTER_SIZE: (f32, f32) = (100.0, 45.0);
pub const GUNNER_SIZE: (f32, f32) = (90.0, 40.0);

// ── Stats & progression ───────────────────────────────────────────────────────

pub const START_DISTANCE: i32 = 100;
pub const MAX_HEALTH: i32 = 100;
pub const MAX_ARMOUR: i32 = 100;
pub const MAX_TURRET_AMMO: i32 = 300;

pub const ARMOUR_REGEN_MS: u64 = 350;
pub const TURRET_REGEN_MS: u64 = 250;
pub const DISTANCE_TICK_MS: u64 = 2500;

/// Distance threshold below which the spawn quota first grows.
pub const SPAWN_THRESHOLD_START: i32 = 100;
pub const SPAWN_THRESHOLD_STEP: i32 = 3;

/// How long the result stays on screen before control returns to the caller.
pub const GAME_OVER_MS: u64 = 10_000;

// ── Backdrop ──────────────────────────────────────────────────────────────────

pub const MOUNTAIN_SPEED: f32 = 2.0;
pub const GROUND_SPEED: f32 = 10.0;
pub const BACKDROP_IMAGE_WIDTH: f32 = 1600.0;

// ── Explosions ────────────────────────────────────────────────────────────────

pub const DEATH_EXPLOSION_FRAMES: u32 = 16;
pub const END_EXPLOSION_FRAMES: u32 = 5;
pub const PLAYER_EXPLOSION_FRAMES: u32 = 15;
/// Hit explosions are drawn this far below the projectile that struck the player.
pub const HIT_EXPLOSION_DROP: f32 = 40.0;
