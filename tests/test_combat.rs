use land_raider::combat::*;
use land_raider::compute::init_state;
use land_raider::enemies::spawn_enemy;
use land_raider::entities::*;
use land_raider::weapons::laser_shot;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn player_bullet(x: f32, y: f32, damage: i32, health: i32) -> Projectile {
    let gun = init_state(0).laser;
    Projectile {
        x,
        y,
        damage,
        health,
        ..laser_shot(&gun)
    }
}

fn enemy_bullet(x: f32, y: f32, damage: i32) -> Projectile {
    Projectile {
        owner: BulletOwner::Enemy,
        sprite: "bullet/bullet",
        x,
        y,
        angle: -90.0,
        speed: 7.0,
        damage,
        points: 5,
        death: Some(("bullet/explosion", 5)),
        health: 0,
        size: (8.0, 8.0),
        exploding: false,
        homing: None,
    }
}

fn enemy(kind: EnemyKind, x: f32, y: f32, health: i32) -> Enemy {
    let mut e = spawn_enemy(kind, &mut seeded_rng());
    e.x = x;
    e.y = y;
    e.health = health;
    e
}

// ── Bullets vs. enemies ───────────────────────────────────────────────────────

#[test]
fn enemy_dies_once_health_drops_below_zero() {
    let mut s = init_state(0);
    let target = enemy(EnemyKind::Chopper, 200.0, 150.0, 10);
    let points = target.points;
    s.enemies.push(target);
    s.player_bullets.push(player_bullet(200.0, 150.0, 6, 0));
    s.player_bullets.push(player_bullet(202.0, 150.0, 5, 0));
    let mut sounds = Vec::new();

    let kills = bullets_vs_enemies(&mut s, &mut seeded_rng(), &mut sounds);
    assert_eq!(kills, 1);
    assert!(s.enemies.is_empty());
    assert!(s.player_bullets.is_empty());
    assert_eq!(s.stats.score(), points);
    assert_eq!(s.explosions.len(), 1);
    assert_eq!(s.explosions[0].key, "death/explosion");
    assert_eq!(s.explosions[0].frames, 16);
    assert_eq!(sounds.len(), 1);
    assert!(sounds[0].key.starts_with("explosion"));
}

#[test]
fn enemy_at_zero_health_survives() {
    let mut s = init_state(0);
    s.enemies.push(enemy(EnemyKind::Jet, 200.0, 150.0, 10));
    s.player_bullets.push(player_bullet(200.0, 150.0, 10, 0));

    let kills = bullets_vs_enemies(&mut s, &mut seeded_rng(), &mut Vec::new());
    assert_eq!(kills, 0);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].health, 0);
    assert!(s.player_bullets.is_empty());
    assert_eq!(s.stats.score(), 0);
}

#[test]
fn bullets_past_a_kill_carry_on() {
    let mut s = init_state(0);
    s.enemies.push(enemy(EnemyKind::Jet, 200.0, 150.0, 10));
    s.player_bullets.push(player_bullet(200.0, 150.0, 90, 5));
    s.player_bullets.push(player_bullet(200.0, 150.0, 90, 5));

    bullets_vs_enemies(&mut s, &mut seeded_rng(), &mut Vec::new());
    assert!(s.enemies.is_empty());
    assert_eq!(s.player_bullets.len(), 1);
}

#[test]
fn missed_bullet_is_untouched() {
    let mut s = init_state(0);
    s.enemies.push(enemy(EnemyKind::Jet, 200.0, 150.0, 10));
    s.player_bullets.push(player_bullet(600.0, 150.0, 90, 5));

    assert_eq!(bullets_vs_enemies(&mut s, &mut seeded_rng(), &mut Vec::new()), 0);
    assert_eq!(s.enemies[0].health, 10);
    assert_eq!(s.player_bullets.len(), 1);
}

// ── Projectiles vs. player ────────────────────────────────────────────────────

#[test]
fn hit_damages_and_explodes_below_impact() {
    let mut s = init_state(0);
    s.enemy_projectiles.push(enemy_bullet(400.0, 525.0, 30));
    let mut sounds = Vec::new();

    assert_eq!(projectiles_vs_player(&mut s, &mut sounds), 1);
    assert_eq!(s.stats.armour(), 70);
    assert!(s.enemy_projectiles.is_empty());
    assert_eq!(s.explosions[0].y, 565.0);
    assert_eq!(sounds, vec![SoundEvent { key: "hit" }]);
}

#[test]
fn destroyed_player_takes_no_hits() {
    let mut s = init_state(0);
    s.player.alive = false;
    s.enemy_projectiles.push(enemy_bullet(400.0, 525.0, 30));

    assert_eq!(projectiles_vs_player(&mut s, &mut Vec::new()), 0);
    assert_eq!(s.stats.armour(), 100);
    assert_eq!(s.enemy_projectiles.len(), 1);
}

#[test]
fn player_hit_wins_over_ground_impact() {
    let mut s = init_state(0);
    let mut p = enemy_bullet(400.0, 545.0, 10);
    p.exploding = true;
    s.enemy_projectiles.push(p);

    let report = resolve(&mut s, &mut seeded_rng(), &mut Vec::new());
    assert_eq!(report.player_hits, 1);
    assert_eq!(report.ground_impacts, 0);
    assert_eq!(s.explosions.len(), 1);
    assert_eq!(s.stats.armour(), 90);
}

// ── Ground impacts ────────────────────────────────────────────────────────────

#[test]
fn grounded_projectile_explodes_in_place() {
    let mut s = init_state(0);
    let mut bomb = enemy_bullet(100.0, 555.0, 30);
    bomb.death = Some(("drop/explosion", 23));
    bomb.exploding = true;
    s.enemy_projectiles.push(bomb);
    s.enemy_projectiles.push(enemy_bullet(100.0, 300.0, 1));

    assert_eq!(ground_impacts(&mut s), 1);
    assert_eq!(s.enemy_projectiles.len(), 1);
    assert_eq!(
        s.explosions,
        vec![Explosion {
            x: 100.0,
            y: 555.0,
            key: "drop/explosion",
            frames: 23,
            frame: 0,
        }]
    );
    assert_eq!(s.stats.armour(), 100);
}

// ── Projectiles vs. bullets ───────────────────────────────────────────────────

#[test]
fn sturdy_bullet_downs_several_projectiles() {
    let mut s = init_state(0);
    s.player_bullets.push(player_bullet(300.0, 300.0, 90, 5));
    s.enemy_projectiles.push(enemy_bullet(300.0, 300.0, 1));
    s.enemy_projectiles.push(enemy_bullet(302.0, 300.0, 1));

    assert_eq!(projectiles_vs_bullets(&mut s), 2);
    assert!(s.enemy_projectiles.is_empty());
    assert_eq!(s.player_bullets[0].health, 3);
    assert_eq!(s.stats.score(), 10);
}

#[test]
fn spent_bullet_stops_intercepting() {
    let mut s = init_state(0);
    s.player_bullets.push(player_bullet(300.0, 300.0, 40, 0));
    s.enemy_projectiles.push(enemy_bullet(300.0, 300.0, 1));
    s.enemy_projectiles.push(enemy_bullet(302.0, 300.0, 1));

    assert_eq!(projectiles_vs_bullets(&mut s), 1);
    assert_eq!(s.enemy_projectiles.len(), 1);
    assert!(s.player_bullets.is_empty());
    assert_eq!(s.stats.score(), 5);
}

#[test]
fn rules_run_in_order() {
    let mut s = init_state(0);
    s.enemies.push(enemy(EnemyKind::Gunner, 200.0, 150.0, 100));
    s.player_bullets.push(player_bullet(200.0, 150.0, 90, 5));
    s.player_bullets.push(player_bullet(600.0, 300.0, 90, 5));
    s.enemy_projectiles.push(enemy_bullet(600.0, 300.0, 1));
    s.enemy_projectiles.push(enemy_bullet(400.0, 520.0, 20));

    let report = resolve(&mut s, &mut seeded_rng(), &mut Vec::new());
    assert_eq!(
        report,
        CombatReport {
            kills: 0,
            player_hits: 1,
            ground_impacts: 0,
            intercepts: 1,
        }
    );
    assert_eq!(s.enemies[0].health, 10);
    assert_eq!(s.player_bullets.len(), 1);
    assert!(s.enemy_projectiles.is_empty());
}

#[test]
fn nothing_removed_survives_resolution() {
    let mut s = init_state(0);
    s.enemies.push(enemy(EnemyKind::Jet, 200.0, 150.0, 10));
    s.enemies.push(enemy(EnemyKind::Chopper, 600.0, 150.0, 50));
    s.player_bullets.push(player_bullet(200.0, 150.0, 90, 5));
    s.player_bullets.push(player_bullet(300.0, 300.0, 40, 0));
    s.enemy_projectiles.push(enemy_bullet(300.0, 300.0, 1));
    s.enemy_projectiles.push(enemy_bullet(302.0, 300.0, 1));
    let mut landed = enemy_bullet(100.0, 560.0, 30);
    landed.exploding = true;
    s.enemy_projectiles.push(landed);

    let report = resolve(&mut s, &mut seeded_rng(), &mut Vec::new());
    assert_eq!(report.kills, 1);
    assert_eq!(report.ground_impacts, 1);
    assert_eq!(report.intercepts, 1);
    assert!(s.enemies.iter().all(|e| e.health >= 0));
    assert!(s.enemy_projectiles.iter().all(|p| !p.exploding));
    assert!(s.player_bullets.iter().all(|b| b.health >= 0));
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemy_projectiles.len(), 1);
    assert!(s.player_bullets.is_empty());
}
