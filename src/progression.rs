/// Stats & progression controller.
///
/// Drives the timed counters (armour and turret regeneration, distance
/// countdown), the spawn quota ramp, and the `Running → Won | Lost`
/// transition with the draining phase that follows it.

use rand::Rng;
use tracing::{info, trace};

use crate::assets::{FX_END, FX_PLAYER, SND_DEATH};
use crate::constants::*;
use crate::enemies::spawn_wave;
use crate::entities::{Explosion, GameStatus, Session, SoundEvent};
use crate::stats::StatsKeeper;
use crate::timer::Cooldown;

#[derive(Clone, Debug, PartialEq)]
pub struct Progression {
    pub armour_regen: Cooldown,
    pub turret_regen: Cooldown,
    pub distance_tick: Cooldown,
    /// Distance below which the quota grows next.
    pub spawn_threshold: i32,
    /// Waves are spawned while fewer enemies than this are alive.
    pub spawn_quota: usize,
}

impl Progression {
    /// All timers count from `now_ms`.
    pub fn new(now_ms: u64) -> Progression {
        Progression {
            armour_regen: Cooldown::started(ARMOUR_REGEN_MS, now_ms),
            turret_regen: Cooldown::started(TURRET_REGEN_MS, now_ms),
            distance_tick: Cooldown::started(DISTANCE_TICK_MS, now_ms),
            spawn_threshold: SPAWN_THRESHOLD_START,
            spawn_quota: 0,
        }
    }

    /// Apply the timed counter changes that are due.
    ///
    /// Turret ammo does not regenerate while the turret trigger is held;
    /// the laser being selected or the trigger being released both allow it.
    pub fn tick(&mut self, stats: &mut StatsKeeper, turret_trigger_held: bool, now_ms: u64) {
        if self.armour_regen.ready(now_ms) && stats.regen_armour() {
            self.armour_regen.reset(now_ms);
        }
        if !turret_trigger_held && self.turret_regen.ready(now_ms) && stats.regen_turret() {
            self.turret_regen.reset(now_ms);
        }
        if self.distance_tick.ready(now_ms) {
            stats.travel(1);
            self.distance_tick.reset(now_ms);
        }
    }

    /// Grow the quota by one each time the distance crosses the threshold.
    pub fn ramp(&mut self, distance: i32) {
        if distance < self.spawn_threshold {
            self.spawn_quota += 1;
            self.spawn_threshold -= SPAWN_THRESHOLD_STEP;
            trace!(quota = self.spawn_quota, next = self.spawn_threshold, "spawn quota raised");
        }
    }
}

/// Spawn one full wave if the live enemy count is under the quota.
pub fn maybe_spawn_wave(session: &mut Session, rng: &mut impl Rng) -> bool {
    if session.enemies.len() >= session.progression.spawn_quota {
        return false;
    }
    session.enemies.extend(spawn_wave(rng));
    true
}

/// Terminal status the counters call for, if any.  A destroyed hull takes
/// precedence over reaching the goal in the same frame.
pub fn outcome(stats: &StatsKeeper) -> Option<GameStatus> {
    if stats.health() == 0 {
        Some(GameStatus::Lost)
    } else if stats.distance() < 1 {
        Some(GameStatus::Won)
    } else {
        None
    }
}

/// Leave `Running`: stop the scenery, blow up what is left and start the
/// game-over timer.  A lost game also destroys the player.
pub fn enter_game_over(
    session: &mut Session,
    status: GameStatus,
    now_ms: u64,
    sounds: &mut Vec<SoundEvent>,
) {
    session.status = status;
    session.over_at_ms = Some(now_ms);
    for layer in session.backdrop.iter_mut() {
        layer.speed = 0.0;
    }

    if status == GameStatus::Lost {
        session.player.alive = false;
        session.explosions.push(Explosion {
            x: session.player.x,
            y: session.player.y + PLAYER_SIZE.1 / 2.0,
            key: FX_PLAYER,
            frames: PLAYER_EXPLOSION_FRAMES,
            frame: 0,
        });
        sounds.push(SoundEvent { key: SND_DEATH });
    }

    drain(session);
    info!(
        ?status,
        score = session.stats.score(),
        distance = session.stats.distance(),
        "session over"
    );
}

/// Clear enemy fire and turn every remaining enemy into an explosion.  No
/// score is awarded.
pub fn drain(session: &mut Session) {
    session.enemy_projectiles.clear();
    for enemy in session.enemies.drain(..) {
        session.explosions.push(Explosion {
            x: enemy.x,
            y: enemy.y + enemy.size.1 / 2.0,
            key: FX_END,
            frames: END_EXPLOSION_FRAMES,
            frame: 0,
        });
    }
}

/// True once the result has been on screen for the full game-over period.
pub fn drained(session: &Session, now_ms: u64) -> bool {
    session
        .over_at_ms
        .map(|over| now_ms.saturating_sub(over) >= GAME_OVER_MS)
        .unwrap_or(false)
}
