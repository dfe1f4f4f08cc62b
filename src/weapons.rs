/// Player movement, gun handling and projectile flight.
///
/// Firing never touches the live projectile lists: it returns the new
/// projectile so the orchestrator can hold it back until collision
/// resolution for the frame is over.

use rand::Rng;
use tracing::debug;

use crate::assets::{IMG_PLASMA_BULLET, IMG_PLASMA_SHOT, SND_PLASMA, SND_TURRET};
use crate::constants::*;
use crate::entities::{
    BulletOwner, Gun, GunKind, Player, Projectile, Session, SoundEvent,
};
use crate::geometry::{bearing_to, heading_vector};
use crate::input::InputSnapshot;

// ── Player & gun mounts ───────────────────────────────────────────────────────

/// Shift the hull one step; a step that would leave it more than one step
/// past either screen edge is undone.
pub fn move_player(player: &mut Player, input: &InputSnapshot) {
    if input.move_left {
        step_player(player, -player.speed);
    }
    if input.move_right {
        step_player(player, player.speed);
    }
}

fn step_player(player: &mut Player, dx: f32) {
    let old_x = player.x;
    player.x += dx;
    let half_w = PLAYER_SIZE.0 / 2.0;
    if player.x - half_w < -player.speed || player.x + half_w > SCREEN_WIDTH + player.speed {
        player.x = old_x;
    }
}

pub fn mount_guns(session: &mut Session) {
    let (px, py) = (session.player.x, session.player.y);
    session.laser.x = px + LASER_OFFSET.0;
    session.laser.y = py + LASER_OFFSET.1;
    session.turret.x = px + TURRET_OFFSET.0;
    session.turret.y = py + TURRET_OFFSET.1;
}

/// One degree per frame toward the held direction, stopping at the limits.
pub fn rotate_gun(gun: &mut Gun, input: &InputSnapshot) {
    if input.rotate_up {
        gun.angle = (gun.angle + 1).min(GUN_ANGLE_MAX);
    }
    if input.rotate_down {
        gun.angle = (gun.angle - 1).max(GUN_ANGLE_MIN);
    }
}

pub fn switch_gun(session: &mut Session) {
    session.active_gun = session.active_gun.toggled();
    debug!(active = ?session.active_gun, "weapon switched");
}

// ── Firing ────────────────────────────────────────────────────────────────────

/// Fire the active gun if the trigger is held and the gun is able to.
///
/// An empty turret or a gun still cooling down is a no-op: nothing is
/// spawned and the cooldown is left untouched.
pub fn fire_active_gun(
    session: &mut Session,
    input: &InputSnapshot,
    now_ms: u64,
    rng: &mut impl Rng,
    sounds: &mut Vec<SoundEvent>,
) -> Option<Projectile> {
    if !input.fire {
        return None;
    }
    match session.active_gun {
        GunKind::Laser => {
            if !session.laser.cooldown.ready(now_ms) {
                return None;
            }
            session.laser.cooldown.reset(now_ms);
            sounds.push(SoundEvent { key: SND_PLASMA });
            Some(laser_shot(&session.laser))
        }
        GunKind::Turret => {
            if !session.turret.cooldown.ready(now_ms) || !session.stats.consume_turret() {
                return None;
            }
            session.turret.cooldown.reset(now_ms);
            sounds.push(SoundEvent { key: SND_TURRET });
            Some(turret_shot(&session.turret, turret_jitter(rng)))
        }
    }
}

pub fn laser_shot(gun: &Gun) -> Projectile {
    player_bullet(
        IMG_PLASMA_SHOT,
        gun,
        gun.angle as f32,
        LASER_SPEED,
        LASER_DAMAGE,
        LASER_HEALTH,
        PLASMA_SHOT_SIZE,
    )
}

pub fn turret_shot(gun: &Gun, jitter: f32) -> Projectile {
    player_bullet(
        IMG_PLASMA_BULLET,
        gun,
        gun.angle as f32 + jitter,
        TURRET_SPEED,
        TURRET_DAMAGE,
        TURRET_HEALTH,
        PLASMA_BULLET_SIZE,
    )
}

/// Random sign in {−1, 0, 1} scaled by a uniform magnitude.
pub fn turret_jitter(rng: &mut impl Rng) -> f32 {
    let sign = rng.gen_range(-1..=1) as f32;
    sign * rng.gen::<f32>() * TURRET_JITTER
}

fn player_bullet(
    sprite: &'static str,
    gun: &Gun,
    angle: f32,
    speed: f32,
    damage: i32,
    health: i32,
    size: (f32, f32),
) -> Projectile {
    Projectile {
        owner: BulletOwner::Player,
        sprite,
        x: gun.x,
        y: gun.y,
        angle,
        speed,
        damage,
        points: 0,
        death: None,
        health,
        size,
        exploding: false,
        homing: None,
    }
}

// ── Projectile flight ─────────────────────────────────────────────────────────

/// Give every homing projectile the player's current position.
pub fn brief_missiles(projectiles: &mut [Projectile], target: (f32, f32)) {
    for homing in projectiles.iter_mut().filter_map(|p| p.homing.as_mut()) {
        homing.target = target;
    }
}

/// Advance one frame.  Returns false when the projectile has left the
/// playfield and should be dropped; sets `exploding` when it reaches the
/// ground band.  A missile past its homing window drops straight down.
pub fn step_projectile(p: &mut Projectile, now_ms: u64) -> bool {
    if let Some(homing) = p.homing {
        p.angle = if now_ms.saturating_sub(homing.launched_ms) > HOMING_WINDOW_MS {
            -90.0
        } else {
            bearing_to(p.x, p.y, homing.target.0, homing.target.1, 0.0)
        };
    }

    let (dx, dy) = heading_vector(p.angle);
    p.x += dx * p.speed;
    p.y += dy * p.speed;

    if p.x < -PROJECTILE_CULL_MARGIN || p.x > SCREEN_WIDTH + PROJECTILE_CULL_MARGIN || p.y < 0.0 {
        return false;
    }
    if p.y > SCREEN_HEIGHT - GROUND_BAND {
        p.exploding = true;
    }
    true
}

/// Move player bullets.  Bullets that leave the playfield or reach the
/// ground are dropped; they carry no impact animation.
pub fn step_player_bullets(bullets: &mut Vec<Projectile>, now_ms: u64) {
    bullets.retain_mut(|b| step_projectile(b, now_ms) && !b.exploding);
}

/// Move enemy projectiles, dropping the ones that left the playfield.
pub fn step_enemy_projectiles(projectiles: &mut Vec<Projectile>, now_ms: u64) {
    projectiles.retain_mut(|p| step_projectile(p, now_ms));
}
