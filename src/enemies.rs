/// Enemy archetypes and their per-frame behaviour.
///
/// An [`Enemy`] is one value with a kind tag; everything that differs
/// between kinds goes through the [`Archetype`] capability set, implemented
/// once per kind.  Each frame an enemy is briefed with the player position,
/// moves, may arm its weapon, fires if armed, and is despawned once it has
/// flown past either edge.

use rand::{Rng, RngCore};
use tracing::trace;

use crate::assets::*;
use crate::constants::*;
use crate::entities::{BulletOwner, Enemy, EnemyKind, Homing, Projectile, ShotTemplate};
use crate::geometry::bearing_to;
use crate::timer::Cooldown;

/// Per-kind movement and firing policy.
pub trait Archetype {
    /// Move (or hold) for this frame.
    fn update_motion(&self, enemy: &mut Enemy, now_ms: u64, rng: &mut dyn RngCore);

    /// Arm the weapon when the firing policy allows it.
    fn maybe_fire(&self, enemy: &mut Enemy, now_ms: u64);

    /// Called once the last round has been fired.
    fn on_ammo_exhausted(&self, _enemy: &mut Enemy) {}

    /// Spend one round and build the projectile.  Only called while armed
    /// with ammo remaining.
    fn take_shot(&self, enemy: &mut Enemy, now_ms: u64) -> Projectile {
        enemy.ammo -= 1;
        enemy.shooting = false;
        shot_from(enemy, enemy.x, enemy.y, now_ms)
    }
}

pub fn archetype(kind: EnemyKind) -> &'static dyn Archetype {
    match kind {
        EnemyKind::Jet => &Jet,
        EnemyKind::Chopper => &Chopper,
        EnemyKind::HoverChopper => &HoverChopper,
        EnemyKind::Helicopter => &Helicopter,
        EnemyKind::Gunner => &Gunner,
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

fn cruise(enemy: &mut Enemy) {
    enemy.x += enemy.direction as f32 * enemy.speed;
}

/// Strictly within `band` pixels of the player horizontally.
fn aligned(enemy: &Enemy, band: f32) -> bool {
    enemy.x > enemy.target.0 - band && enemy.x < enemy.target.0 + band
}

fn arm_on_cooldown(enemy: &mut Enemy, now_ms: u64) {
    if enemy.ammo > 0 && enemy.cooldown.ready(now_ms) {
        enemy.shooting = true;
        enemy.cooldown.reset(now_ms);
    }
}

fn shot_from(enemy: &Enemy, x: f32, y: f32, now_ms: u64) -> Projectile {
    let shot = &enemy.shot;
    Projectile {
        owner: BulletOwner::Enemy,
        sprite: shot.sprite,
        x,
        y,
        angle: shot.angle,
        speed: shot.speed,
        damage: shot.damage,
        points: shot.points,
        death: Some((shot.death, shot.frames)),
        health: 0,
        size: shot.size,
        exploding: false,
        homing: shot.homing.then_some(Homing {
            launched_ms: now_ms,
            target: enemy.target,
        }),
    }
}

/// Uniform sign in {−1, 0, 1} times a uniform magnitude up to `scale`.
fn jitter(rng: &mut dyn RngCore, scale: f32) -> f32 {
    let sign = rng.gen_range(-1..=1) as f32;
    sign * rng.gen::<f32>() * scale
}

// ── Archetypes ────────────────────────────────────────────────────────────────

/// Fast flyover; drops its single bomb when passing over the player.
pub struct Jet;

impl Archetype for Jet {
    fn update_motion(&self, enemy: &mut Enemy, _now_ms: u64, _rng: &mut dyn RngCore) {
        cruise(enemy);
    }

    fn maybe_fire(&self, enemy: &mut Enemy, now_ms: u64) {
        if aligned(enemy, JET_BAND) {
            arm_on_cooldown(enemy, now_ms);
        }
    }
}

/// Keeps flying; strafes diagonally while within a wide band of the player.
pub struct Chopper;

impl Archetype for Chopper {
    fn update_motion(&self, enemy: &mut Enemy, _now_ms: u64, _rng: &mut dyn RngCore) {
        cruise(enemy);
    }

    fn maybe_fire(&self, enemy: &mut Enemy, now_ms: u64) {
        if aligned(enemy, CHOPPER_BAND) {
            arm_on_cooldown(enemy, now_ms);
        }
    }
}

/// Parks over the player and sweeps a spray until the magazine is empty.
pub struct HoverChopper;

impl Archetype for HoverChopper {
    fn update_motion(&self, enemy: &mut Enemy, _now_ms: u64, _rng: &mut dyn RngCore) {
        if !enemy.shooting {
            cruise(enemy);
        }
    }

    fn maybe_fire(&self, enemy: &mut Enemy, _now_ms: u64) {
        if aligned(enemy, HOVER_BAND) && enemy.ammo > 0 {
            enemy.shooting = true;
        }
    }

    fn on_ammo_exhausted(&self, enemy: &mut Enemy) {
        enemy.shooting = false;
    }

    // Stays armed between shots; each round turns the barrel one step.
    fn take_shot(&self, enemy: &mut Enemy, now_ms: u64) -> Projectile {
        enemy.ammo -= 1;
        enemy.shot.angle += HOVER_SWEEP_STEP * enemy.direction as f32;
        shot_from(enemy, enemy.x, enemy.y, now_ms)
    }
}

/// Stops over the player to launch homing missiles from alternating pods.
pub struct Helicopter;

impl Archetype for Helicopter {
    fn update_motion(&self, enemy: &mut Enemy, now_ms: u64, _rng: &mut dyn RngCore) {
        if !enemy.shooting && !enemy.cooldown.within(now_ms, DWELL_MS) {
            cruise(enemy);
        }
    }

    fn maybe_fire(&self, enemy: &mut Enemy, now_ms: u64) {
        if aligned(enemy, HELICOPTER_BAND) {
            arm_on_cooldown(enemy, now_ms);
        }
    }

    fn take_shot(&self, enemy: &mut Enemy, now_ms: u64) -> Projectile {
        enemy.ammo -= 1;
        enemy.shooting = false;
        let offset = if enemy.ammo % 2 == 0 {
            MISSILE_LAUNCH_OFFSET
        } else {
            -MISSILE_LAUNCH_OFFSET
        };
        shot_from(enemy, enemy.x + offset, enemy.y, now_ms)
    }
}

/// Tracks the player with its gun at all times; fires only well inside the
/// screen and pauses around each shot.
pub struct Gunner;

impl Archetype for Gunner {
    fn update_motion(&self, enemy: &mut Enemy, now_ms: u64, rng: &mut dyn RngCore) {
        let noise = jitter(rng, GUNNER_JITTER);
        enemy.shot.angle = bearing_to(enemy.x, enemy.y, enemy.target.0, enemy.target.1, noise);
        if !enemy.shooting && !enemy.cooldown.within(now_ms, DWELL_MS) {
            cruise(enemy);
        }
    }

    fn maybe_fire(&self, enemy: &mut Enemy, now_ms: u64) {
        let inside = enemy.x > GUNNER_EDGE_MARGIN && enemy.x < SCREEN_WIDTH - GUNNER_EDGE_MARGIN;
        if inside {
            arm_on_cooldown(enemy, now_ms);
        }
    }
}

// ── Per-frame update ──────────────────────────────────────────────────────────

/// Run one frame of behaviour.  Returns the projectile fired, if any.
pub fn update_enemy(
    enemy: &mut Enemy,
    player: (f32, f32),
    now_ms: u64,
    rng: &mut dyn RngCore,
) -> Option<Projectile> {
    let behaviour = archetype(enemy.kind);
    enemy.target = player;
    behaviour.update_motion(enemy, now_ms, rng);
    behaviour.maybe_fire(enemy, now_ms);

    if !enemy.shooting || enemy.ammo == 0 {
        return None;
    }
    let shot = behaviour.take_shot(enemy, now_ms);
    if enemy.ammo == 0 {
        behaviour.on_ammo_exhausted(enemy);
    }
    Some(shot)
}

/// Past the despawn margin on either side.
pub fn off_screen(enemy: &Enemy) -> bool {
    enemy.x > SCREEN_WIDTH + ENEMY_CULL_MARGIN || enemy.x < -ENEMY_CULL_MARGIN
}

/// Update every enemy, silently dropping the ones that flew off screen.
/// Fired projectiles are returned, not added to any live list.
pub fn update_enemies(
    enemies: &mut Vec<Enemy>,
    player: (f32, f32),
    now_ms: u64,
    rng: &mut dyn RngCore,
) -> Vec<Projectile> {
    let mut fired = Vec::new();
    for enemy in enemies.iter_mut() {
        if let Some(shot) = update_enemy(enemy, player, now_ms, rng) {
            fired.push(shot);
        }
    }
    enemies.retain(|e| {
        let gone = off_screen(e);
        if gone {
            trace!(kind = ?e.kind, "enemy left the screen");
        }
        !gone
    });
    fired
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Fixed per-kind numbers: (sprite, speed, health, ammo, cooldown, points, size).
fn profile(kind: EnemyKind) -> (&'static str, f32, i32, u32, u64, u32, (f32, f32)) {
    match kind {
        EnemyKind::Jet => (IMG_JET, 10.0, 10, 1, 0, 200, JET_SIZE),
        EnemyKind::Chopper => (IMG_CHOPPER, 6.0, 50, 5, 40, 100, CHOPPER_SIZE),
        EnemyKind::HoverChopper => (IMG_HOVER_CHOPPER, 7.0, 100, 15, 40, 250, HOVER_CHOPPER_SIZE),
        EnemyKind::Helicopter => (IMG_HELICOPTER, 5.0, 80, 2, 500, 300, HELICOPTER_SIZE),
        EnemyKind::Gunner => (IMG_GUNNER, 6.0, 100, 5, 100, 600, GUNNER_SIZE),
    }
}

/// The projectile a kind fires, given the direction it entered from.
pub fn shot_template(kind: EnemyKind, direction: i32) -> ShotTemplate {
    let bullet = |speed: f32, angle: f32, damage: i32| ShotTemplate {
        sprite: IMG_BULLET,
        speed,
        angle,
        damage,
        points: 5,
        death: FX_BULLET,
        frames: 5,
        size: BULLET_SIZE,
        homing: false,
    };
    match kind {
        EnemyKind::Jet => ShotTemplate {
            sprite: IMG_BOMB,
            speed: 5.0,
            angle: -90.0,
            damage: 30,
            points: 20,
            death: FX_DROP,
            frames: 23,
            size: BOMB_SIZE,
            homing: false,
        },
        EnemyKind::Chopper => bullet(7.0, if direction == 1 { -45.0 } else { 225.0 }, 1),
        EnemyKind::HoverChopper => bullet(7.0, if direction == -1 { 360.0 } else { 180.0 }, 2),
        EnemyKind::Helicopter => ShotTemplate {
            sprite: IMG_MISSILE,
            speed: 5.0,
            angle: -90.0,
            damage: 20,
            points: 10,
            death: FX_BOMB,
            frames: 21,
            size: MISSILE_SIZE,
            homing: true,
        },
        EnemyKind::Gunner => bullet(10.0, 0.0, 1),
    }
}

/// A new enemy just beyond a random edge, heading inward.
pub fn spawn_enemy(kind: EnemyKind, rng: &mut impl Rng) -> Enemy {
    let direction = if rng.gen_bool(0.5) { 1 } else { -1 };
    let x = if direction < 0 {
        SCREEN_WIDTH + ENEMY_CULL_MARGIN
    } else {
        -ENEMY_CULL_MARGIN
    };
    let y = rng.gen_range(ENEMY_ALTITUDE_MIN..ENEMY_ALTITUDE_MAX) as f32;
    let (sprite, speed, health, ammo, cooldown, points, size) = profile(kind);

    Enemy {
        kind,
        sprite,
        x,
        y,
        direction,
        speed,
        health,
        ammo,
        cooldown: Cooldown::new(cooldown),
        points,
        shooting: false,
        shot: shot_template(kind, direction),
        target: (PLAYER_START_X, PLAYER_START_Y),
        size,
    }
}

/// One of every kind.
pub fn spawn_wave(rng: &mut impl Rng) -> Vec<Enemy> {
    let wave: Vec<Enemy> = EnemyKind::ALL.iter().map(|&k| spawn_enemy(k, rng)).collect();
    trace!(count = wave.len(), "wave spawned");
    wave
}
