/// Per-frame collision and combat resolution.
///
/// The four rules run in a fixed order and each one works only on what the
/// previous rules left alive:
///
/// 1. player bullets vs. enemies
/// 2. enemy projectiles vs. the player
/// 3. enemy projectiles that reached the ground
/// 4. enemy projectiles vs. player bullets
///
/// Removal is done by marking indices and compacting the list at the end of
/// each rule, the same way for every rule.

use rand::Rng;
use tracing::debug;

use crate::assets::{FX_DEATH, SND_EXPLOSIONS, SND_HIT};
use crate::constants::{DEATH_EXPLOSION_FRAMES, HIT_EXPLOSION_DROP, PLAYER_SIZE};
use crate::entities::{Enemy, Explosion, Projectile, Session, SoundEvent};
use crate::geometry::Rect;

/// What happened during one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub kills: u32,
    pub player_hits: u32,
    pub ground_impacts: u32,
    pub intercepts: u32,
}

pub fn enemy_hitbox(enemy: &Enemy) -> Rect {
    Rect::centered(enemy.x, enemy.y, enemy.size)
}

pub fn projectile_hitbox(p: &Projectile) -> Rect {
    Rect::centered(p.x, p.y, p.size)
}

/// Keep only the items whose index is not marked.
fn drop_marked<T>(items: Vec<T>, marked: &[bool]) -> Vec<T> {
    debug_assert_eq!(items.len(), marked.len(), "removal mask out of step with its list");
    items
        .into_iter()
        .zip(marked.iter())
        .filter(|(_, gone)| !**gone)
        .map(|(item, _)| item)
        .collect()
}

/// Run all four rules in order.
pub fn resolve(
    session: &mut Session,
    rng: &mut impl Rng,
    sounds: &mut Vec<SoundEvent>,
) -> CombatReport {
    let kills = bullets_vs_enemies(session, rng, sounds);
    debug_assert!(
        session.enemies.iter().all(|e| e.health >= 0),
        "killed enemy left in play"
    );
    let player_hits = projectiles_vs_player(session, sounds);
    let ground_impacts = ground_impacts(session);
    debug_assert!(
        session.enemy_projectiles.iter().all(|p| !p.exploding),
        "landed projectile left in play"
    );
    let intercepts = projectiles_vs_bullets(session);
    debug_assert!(
        session.player_bullets.iter().all(|b| b.health >= 0),
        "spent bullet left in play"
    );
    CombatReport {
        kills,
        player_hits,
        ground_impacts,
        intercepts,
    }
}

// ── 1. Player bullets vs. enemies ─────────────────────────────────────────────

/// Each overlapping bullet is spent on the enemy it hit.  An enemy dies the
/// moment its health drops below zero; bullets still overlapping it after
/// that are left for other enemies.
pub fn bullets_vs_enemies(
    session: &mut Session,
    rng: &mut impl Rng,
    sounds: &mut Vec<SoundEvent>,
) -> u32 {
    let mut spent = vec![false; session.player_bullets.len()];
    let mut killed = vec![false; session.enemies.len()];

    for (ei, enemy) in session.enemies.iter_mut().enumerate() {
        let hitbox = enemy_hitbox(enemy);
        for (bi, bullet) in session.player_bullets.iter().enumerate() {
            if spent[bi] || !hitbox.overlaps(&projectile_hitbox(bullet)) {
                continue;
            }
            spent[bi] = true;
            enemy.health -= bullet.damage;
            if enemy.health < 0 {
                killed[ei] = true;
                session.stats.add_score(enemy.points);
                session.explosions.push(Explosion {
                    x: enemy.x,
                    y: hitbox.bottom(),
                    key: FX_DEATH,
                    frames: DEATH_EXPLOSION_FRAMES,
                    frame: 0,
                });
                let sound = SND_EXPLOSIONS[rng.gen_range(0..SND_EXPLOSIONS.len())];
                sounds.push(SoundEvent { key: sound });
                debug!(kind = ?enemy.kind, points = enemy.points, "enemy destroyed");
                break;
            }
        }
    }

    let kills = killed.iter().filter(|&&k| k).count() as u32;
    session.player_bullets = drop_marked(std::mem::take(&mut session.player_bullets), &spent);
    session.enemies = drop_marked(std::mem::take(&mut session.enemies), &killed);
    kills
}

// ── 2. Enemy projectiles vs. player ───────────────────────────────────────────

/// A projectile touching the hull deals its damage and explodes there.  This
/// takes priority over a ground impact flagged in the same frame.
pub fn projectiles_vs_player(session: &mut Session, sounds: &mut Vec<SoundEvent>) -> u32 {
    if !session.player.alive {
        return 0;
    }
    let hull = Rect::centered(session.player.x, session.player.y, PLAYER_SIZE);
    let mut hit = vec![false; session.enemy_projectiles.len()];

    for (pi, p) in session.enemy_projectiles.iter().enumerate() {
        if !hull.overlaps(&projectile_hitbox(p)) {
            continue;
        }
        hit[pi] = true;
        session.stats.take_damage(p.damage);
        if let Some((key, frames)) = p.death {
            session.explosions.push(Explosion {
                x: p.x,
                y: p.y + HIT_EXPLOSION_DROP,
                key,
                frames,
                frame: 0,
            });
        }
        sounds.push(SoundEvent { key: SND_HIT });
        debug!(
            damage = p.damage,
            armour = session.stats.armour(),
            health = session.stats.health(),
            "player hit"
        );
    }

    let hits = hit.iter().filter(|&&h| h).count() as u32;
    session.enemy_projectiles = drop_marked(std::mem::take(&mut session.enemy_projectiles), &hit);
    hits
}

// ── 3. Ground impacts ─────────────────────────────────────────────────────────

pub fn ground_impacts(session: &mut Session) -> u32 {
    let mut landed = vec![false; session.enemy_projectiles.len()];

    for (pi, p) in session.enemy_projectiles.iter().enumerate() {
        if !p.exploding {
            continue;
        }
        landed[pi] = true;
        if let Some((key, frames)) = p.death {
            session.explosions.push(Explosion {
                x: p.x,
                y: p.y,
                key,
                frames,
                frame: 0,
            });
        }
    }

    let count = landed.iter().filter(|&&l| l).count() as u32;
    session.enemy_projectiles =
        drop_marked(std::mem::take(&mut session.enemy_projectiles), &landed);
    count
}

// ── 4. Enemy projectiles vs. player bullets ───────────────────────────────────

/// Each projectile is shot down by at most one bullet: the projectile is
/// removed and its points credited, and the bullet loses one health, going
/// away once that drops below zero.
pub fn projectiles_vs_bullets(session: &mut Session) -> u32 {
    let mut downed = vec![false; session.enemy_projectiles.len()];
    let mut spent = vec![false; session.player_bullets.len()];

    for (pi, p) in session.enemy_projectiles.iter().enumerate() {
        let hitbox = projectile_hitbox(p);
        let hit = session
            .player_bullets
            .iter_mut()
            .enumerate()
            .find(|(bi, b)| !spent[*bi] && hitbox.overlaps(&projectile_hitbox(b)));
        if let Some((bi, bullet)) = hit {
            downed[pi] = true;
            session.stats.add_score(p.points);
            bullet.health -= 1;
            if bullet.health < 0 {
                spent[bi] = true;
            }
        }
    }

    let count = downed.iter().filter(|&&d| d).count() as u32;
    session.enemy_projectiles =
        drop_marked(std::mem::take(&mut session.enemy_projectiles), &downed);
    session.player_bullets = drop_marked(std::mem::take(&mut session.player_bullets), &spent);
    count
}
