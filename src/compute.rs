/// Session setup and the per-frame orchestrator.
///
/// `advance_frame` takes an immutable reference to the current `Session`,
/// the frame's input, the monotonic clock and an RNG handle, and returns a
/// brand-new `Session` together with what to draw and play.  Side effects
/// are limited to the injected RNG, so a seeded RNG and a scripted clock
/// replay a session exactly.

use rand::Rng;
use tracing::info;

use crate::assets::{self, AssetCatalog, IMG_GROUND, IMG_MOUNTAINS};
use crate::combat;
use crate::constants::*;
use crate::enemies::update_enemies;
use crate::entities::{
    BackdropLayer, GameStatus, Gun, GunKind, Player, Session, SoundEvent,
};
use crate::error::{GameError, GameResult};
use crate::input::InputSnapshot;
use crate::progression::{self, Progression};
use crate::render::{draw_list, DrawCommand};
use crate::stats::StatsKeeper;
use crate::timer::Cooldown;
use crate::weapons;

/// Result of one `advance_frame` call.
#[derive(Clone, Debug)]
pub struct Frame {
    pub session: Session,
    pub draws: Vec<DrawCommand>,
    pub sounds: Vec<SoundEvent>,
    /// True when control should return to the caller: the player quit, or
    /// the game-over display has run its course.
    pub terminal: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state with every timer counting from `now_ms`.
pub fn init_state(now_ms: u64) -> Session {
    let player = Player {
        x: PLAYER_START_X,
        y: PLAYER_START_Y,
        speed: PLAYER_SPEED,
        alive: true,
    };
    let gun = |kind: GunKind, (ox, oy): (f32, f32), cooldown: u64| Gun {
        kind,
        x: player.x + ox,
        y: player.y + oy,
        angle: 0,
        cooldown: Cooldown::started(cooldown, now_ms),
    };

    Session {
        laser: gun(GunKind::Laser, LASER_OFFSET, LASER_COOLDOWN_MS),
        turret: gun(GunKind::Turret, TURRET_OFFSET, TURRET_COOLDOWN_MS),
        player,
        active_gun: GunKind::Laser,
        player_bullets: Vec::new(),
        enemy_projectiles: Vec::new(),
        enemies: Vec::new(),
        explosions: Vec::new(),
        backdrop: vec![
            BackdropLayer { key: IMG_MOUNTAINS, left: 0.0, speed: MOUNTAIN_SPEED },
            BackdropLayer { key: IMG_GROUND, left: 0.0, speed: GROUND_SPEED },
        ],
        stats: StatsKeeper::new(),
        progression: Progression::new(now_ms),
        status: GameStatus::Running,
        over_at_ms: None,
        frame: 0,
    }
}

/// Check that every asset the core references resolves, then build the
/// opening state.
pub fn initialize_session(catalog: &impl AssetCatalog, now_ms: u64) -> GameResult<Session> {
    assets::validate(catalog)?;
    let session = init_state(now_ms);
    info!(now_ms, "session started");
    Ok(session)
}

// ── Per-frame advance ────────────────────────────────────────────────────────

/// Advance the session by one frame.
///
/// Order: animation → player & guns → player fire → enemy behaviour →
/// projectile flight → combat → progression → spawning.  Projectiles fired
/// this frame join the live lists only after combat, so nothing collides on
/// the frame it appears.
pub fn advance_frame(
    state: &Session,
    input: &InputSnapshot,
    now_ms: u64,
    rng: &mut impl Rng,
) -> GameResult<Frame> {
    if input.quit {
        info!(frame = state.frame, "session quit");
        return Ok(Frame {
            session: state.clone(),
            draws: Vec::new(),
            sounds: Vec::new(),
            terminal: true,
        });
    }

    let mut next = state.clone();
    next.frame += 1;
    let mut sounds = Vec::new();
    let running = next.status == GameStatus::Running;
    let input = if running { *input } else { input.frozen() };

    // ── 1. Animation ─────────────────────────────────────────────────────────
    advance_explosions(&mut next);
    scroll_backdrop(&mut next);

    // ── 2. Player & guns ─────────────────────────────────────────────────────
    if next.player.alive {
        if input.switch_weapon {
            weapons::switch_gun(&mut next);
        }
        weapons::move_player(&mut next.player, &input);
        let active = next.active_gun;
        weapons::rotate_gun(next.gun_mut(active), &input);
        weapons::mount_guns(&mut next);
    }

    // ── 3. Player fire ───────────────────────────────────────────────────────
    let fired = if running && next.player.alive {
        weapons::fire_active_gun(&mut next, &input, now_ms, rng, &mut sounds)
    } else {
        None
    };

    // ── 4. Enemy behaviour ───────────────────────────────────────────────────
    let player_pos = (next.player.x, next.player.y);
    let incoming = if running {
        update_enemies(&mut next.enemies, player_pos, now_ms, rng)
    } else {
        Vec::new()
    };

    // ── 5. Projectile flight ─────────────────────────────────────────────────
    weapons::brief_missiles(&mut next.enemy_projectiles, player_pos);
    weapons::step_player_bullets(&mut next.player_bullets, now_ms);
    weapons::step_enemy_projectiles(&mut next.enemy_projectiles, now_ms);

    // ── 6. Combat ────────────────────────────────────────────────────────────
    if running {
        combat::resolve(&mut next, rng, &mut sounds);
    }
    next.player_bullets.extend(fired);
    next.enemy_projectiles.extend(incoming);

    // ── 7. Progression & outcome ─────────────────────────────────────────────
    if running {
        let turret_trigger_held = input.fire && next.active_gun == GunKind::Turret;
        next.progression.tick(&mut next.stats, turret_trigger_held, now_ms);
        next.progression.ramp(next.stats.distance());

        match progression::outcome(&next.stats) {
            Some(status) => progression::enter_game_over(&mut next, status, now_ms, &mut sounds),
            None => {
                progression::maybe_spawn_wave(&mut next, rng);
            }
        }
    } else {
        progression::drain(&mut next);
    }

    check_invariants(&next)?;

    let terminal = progression::drained(&next, now_ms);
    let draws = draw_list(&next);
    Ok(Frame {
        session: next,
        draws,
        sounds,
        terminal,
    })
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Step every explosion one frame, dropping the finished ones.
fn advance_explosions(session: &mut Session) {
    for fx in session.explosions.iter_mut() {
        fx.frame += 1;
    }
    session.explosions.retain(|fx| fx.frame < fx.frames);
}

/// Scroll each layer left, wrapping once its right edge would come on screen.
fn scroll_backdrop(session: &mut Session) {
    for layer in session.backdrop.iter_mut() {
        if layer.left + BACKDROP_IMAGE_WIDTH < SCREEN_WIDTH + layer.speed {
            layer.left = 0.0;
        } else {
            layer.left -= layer.speed;
        }
    }
}

/// Post-frame contract checks.  A failure here is a defect in the frame
/// logic, never a player-reachable state.
fn check_invariants(session: &Session) -> GameResult<()> {
    let fail = |context| Err(GameError::InvalidEntityState { context });

    if !session.stats.is_consistent() {
        return fail("stats counter out of range");
    }
    let angles = GUN_ANGLE_MIN..=GUN_ANGLE_MAX;
    if !angles.contains(&session.laser.angle) || !angles.contains(&session.turret.angle) {
        return fail("gun angle out of range");
    }
    if session.enemies.iter().any(|e| e.health < 0) {
        return fail("destroyed enemy survived combat");
    }
    if session.enemy_projectiles.iter().any(|p| p.exploding) {
        return fail("exploded projectile survived combat");
    }
    Ok(())
}
