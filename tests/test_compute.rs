use land_raider::assets::{AssetKind, AssetManifest};
use land_raider::compute::*;
use land_raider::entities::*;
use land_raider::error::GameError;
use land_raider::input::InputSnapshot;
use land_raider::render::DrawLayer;
use land_raider::stats::{StatsKeeper, StatsSnapshot};
use land_raider::timer::Cooldown;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn stats(distance: i32, health: i32, armour: i32) -> StatsKeeper {
    StatsKeeper::restore(&StatsSnapshot {
        score: 0,
        distance,
        health,
        armour,
        turret_ammo: 300,
    })
    .unwrap()
}

fn enemy_bullet(x: f32, y: f32, damage: i32) -> Projectile {
    Projectile {
        owner: BulletOwner::Enemy,
        sprite: "bullet/bomb",
        x,
        y,
        angle: -90.0,
        speed: 0.0,
        damage,
        points: 20,
        death: Some(("drop/explosion", 23)),
        health: 0,
        size: (12.0, 20.0),
        exploding: false,
        homing: None,
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

#[test]
fn init_state_opening_values() {
    let s = init_state(0);
    assert_eq!((s.player.x, s.player.y), (400.0, 525.0));
    assert!(s.player.alive);
    assert_eq!(s.active_gun, GunKind::Laser);
    assert_eq!(s.stats, StatsKeeper::new());
    assert_eq!(s.status, GameStatus::Running);
    assert_eq!(s.frame, 0);
    assert!(s.enemies.is_empty());
    assert!(s.player_bullets.is_empty());
    assert_eq!(s.backdrop.len(), 2);
}

#[test]
fn initialize_session_with_all_assets() {
    let s = initialize_session(&AssetManifest::complete(), 0).unwrap();
    assert_eq!(s.status, GameStatus::Running);
}

#[test]
fn initialize_session_reports_missing_asset() {
    let mut manifest = AssetManifest::complete();
    manifest.remove(AssetKind::Sound, "hit");
    let err = initialize_session(&manifest, 0).unwrap_err();
    assert_eq!(
        err,
        GameError::AssetMissing {
            kind: AssetKind::Sound,
            key: "hit",
        }
    );
    assert_eq!(err.to_string(), "missing sound asset 'hit'");
}

// ── advance_frame basics ──────────────────────────────────────────────────────

#[test]
fn advance_increments_frame() {
    let s = init_state(0);
    let next = advance_frame(&s, &idle(), 33, &mut seeded_rng()).unwrap();
    assert_eq!(next.session.frame, 1);
    assert!(!next.terminal);
}

#[test]
fn advance_does_not_mutate_original() {
    let s = init_state(0);
    let input = InputSnapshot {
        move_left: true,
        rotate_up: true,
        ..InputSnapshot::default()
    };
    let next = advance_frame(&s, &input, 33, &mut seeded_rng()).unwrap();
    assert_eq!(next.session.player.x, 393.0);
    assert_eq!(next.session.laser.angle, 1);
    assert_eq!(s.player.x, 400.0);
    assert_eq!(s.laser.angle, 0);
    assert_eq!(s.frame, 0);
}

#[test]
fn quit_returns_unchanged_state() {
    let s = init_state(0);
    let input = InputSnapshot {
        quit: true,
        move_left: true,
        ..InputSnapshot::default()
    };
    let next = advance_frame(&s, &input, 33, &mut seeded_rng()).unwrap();
    assert!(next.terminal);
    assert_eq!(next.session.frame, 0);
    assert_eq!(next.session.player.x, 400.0);
    assert!(next.draws.is_empty());
}

#[test]
fn only_active_gun_rotates() {
    let mut s = init_state(0);
    s.active_gun = GunKind::Turret;
    let input = InputSnapshot {
        rotate_up: true,
        ..InputSnapshot::default()
    };
    let next = advance_frame(&s, &input, 33, &mut seeded_rng()).unwrap();
    assert_eq!(next.session.turret.angle, 1);
    assert_eq!(next.session.laser.angle, 0);
}

#[test]
fn switch_weapon_toggles() {
    let s = init_state(0);
    let input = InputSnapshot {
        switch_weapon: true,
        ..InputSnapshot::default()
    };
    let next = advance_frame(&s, &input, 33, &mut seeded_rng()).unwrap();
    assert_eq!(next.session.active_gun, GunKind::Turret);
}

#[test]
fn fired_bullet_joins_after_the_frame() {
    let s = init_state(0);
    let input = InputSnapshot {
        fire: true,
        ..InputSnapshot::default()
    };
    let mut rng = seeded_rng();

    let next = advance_frame(&s, &input, 500, &mut rng).unwrap();
    assert_eq!(next.session.player_bullets.len(), 1);
    assert_eq!(next.session.player_bullets[0].x, 411.0); // not yet moved
    assert!(next.sounds.contains(&SoundEvent { key: "plasma" }));

    // Still cooling down; the first bullet flies on
    let after = advance_frame(&next.session, &input, 533, &mut rng).unwrap();
    assert_eq!(after.session.player_bullets.len(), 1);
    assert!((after.session.player_bullets[0].x - 431.0).abs() < 1e-3);
}

fn turret_ammo_after_firing(gun: GunKind) -> i32 {
    let mut s = init_state(0);
    s.active_gun = gun;
    s.stats = StatsKeeper::restore(&StatsSnapshot {
        score: 0,
        distance: 100,
        health: 100,
        armour: 100,
        turret_ammo: 100,
    })
    .unwrap();
    let input = InputSnapshot {
        fire: true,
        ..InputSnapshot::default()
    };
    let next = advance_frame(&s, &input, 250, &mut seeded_rng()).unwrap();
    next.session.stats.turret_ammo()
}

#[test]
fn turret_regenerates_while_laser_fires() {
    assert_eq!(turret_ammo_after_firing(GunKind::Laser), 101);
}

#[test]
fn turret_trigger_pauses_regeneration() {
    // One round spent, none regained
    assert_eq!(turret_ammo_after_firing(GunKind::Turret), 99);
}

// ── Backdrop & draws ──────────────────────────────────────────────────────────

#[test]
fn backdrop_scrolls_by_layer_speed() {
    let s = init_state(0);
    let next = advance_frame(&s, &idle(), 33, &mut seeded_rng()).unwrap();
    assert_eq!(next.session.backdrop[0].left, -2.0);
    assert_eq!(next.session.backdrop[1].left, -10.0);
}

#[test]
fn backdrop_wraps_before_its_edge_shows() {
    let mut s = init_state(0);
    s.backdrop[1].left = -795.0; // right edge at 805
    let next = advance_frame(&s, &idle(), 33, &mut seeded_rng()).unwrap();
    assert_eq!(next.session.backdrop[1].left, 0.0);
}

#[test]
fn draws_start_with_backdrop_and_end_with_guns() {
    let s = init_state(0);
    let next = advance_frame(&s, &idle(), 33, &mut seeded_rng()).unwrap();
    let layers: Vec<DrawLayer> = next.draws.iter().map(|d| d.layer).collect();
    assert_eq!(
        layers,
        vec![
            DrawLayer::Backdrop,
            DrawLayer::Backdrop,
            DrawLayer::Player,
            DrawLayer::Gun,
            DrawLayer::Gun,
        ]
    );
}

// ── Progression through advance_frame ─────────────────────────────────────────

#[test]
fn first_wave_arrives_once_distance_drops() {
    let s = init_state(0);
    let next = advance_frame(&s, &idle(), 2500, &mut seeded_rng()).unwrap();
    assert_eq!(next.session.stats.distance(), 99);
    assert_eq!(next.session.progression.spawn_quota, 1);
    assert_eq!(next.session.enemies.len(), 5);
}

#[test]
fn last_kilometre_wins_and_freezes_input() {
    let mut s = init_state(0);
    s.stats = stats(1, 100, 100);
    s.progression.distance_tick = Cooldown::started(2500, 0);

    let mut rng = seeded_rng();
    let won = advance_frame(&s, &idle(), 2500, &mut rng).unwrap();
    assert_eq!(won.session.status, GameStatus::Won);
    assert_eq!(won.session.over_at_ms, Some(2500));
    assert!(won.session.player.alive);
    assert!(won.session.enemies.is_empty());
    assert!(!won.terminal);

    let input = InputSnapshot {
        move_left: true,
        fire: true,
        ..InputSnapshot::default()
    };
    let frozen = advance_frame(&won.session, &input, 2533, &mut rng).unwrap();
    assert_eq!(frozen.session.player.x, 400.0);
    assert!(frozen.session.player_bullets.is_empty());
    assert_eq!(frozen.session.backdrop[1].left, won.session.backdrop[1].left);
}

#[test]
fn fatal_hit_loses_the_game() {
    let mut s = init_state(0);
    s.stats = stats(50, 25, 0);
    s.enemy_projectiles.push(enemy_bullet(400.0, 525.0, 40));

    let lost = advance_frame(&s, &idle(), 100, &mut seeded_rng()).unwrap();
    assert_eq!(lost.session.stats.health(), 0);
    assert_eq!(lost.session.status, GameStatus::Lost);
    assert!(!lost.session.player.alive);
    assert!(lost.sounds.contains(&SoundEvent { key: "hit" }));
    assert!(lost.sounds.contains(&SoundEvent { key: "death" }));
    assert!(lost
        .draws
        .iter()
        .all(|d| d.layer != DrawLayer::Player && d.layer != DrawLayer::Gun));
}

#[test]
fn session_ends_ten_seconds_after_game_over() {
    let mut s = init_state(0);
    s.stats = stats(50, 25, 0);
    s.enemy_projectiles.push(enemy_bullet(400.0, 525.0, 40));
    let mut rng = seeded_rng();

    let lost = advance_frame(&s, &idle(), 100, &mut rng).unwrap();
    let waiting = advance_frame(&lost.session, &idle(), 10_099, &mut rng).unwrap();
    assert!(!waiting.terminal);
    let done = advance_frame(&waiting.session, &idle(), 10_100, &mut rng).unwrap();
    assert!(done.terminal);
    assert_eq!(done.session.status, GameStatus::Lost);
}

#[test]
fn explosions_play_out_and_vanish() {
    let mut s = init_state(0);
    s.explosions.push(Explosion {
        x: 100.0,
        y: 550.0,
        key: "bullet/explosion",
        frames: 2,
        frame: 0,
    });
    let mut rng = seeded_rng();
    let one = advance_frame(&s, &idle(), 33, &mut rng).unwrap();
    assert_eq!(one.session.explosions[0].frame, 1);
    let two = advance_frame(&one.session, &idle(), 66, &mut rng).unwrap();
    assert!(two.session.explosions.is_empty());
}

#[test]
fn seeded_runs_replay_identically() {
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = init_state(0);
        for i in 1..=120u64 {
            s = advance_frame(&s, &idle(), i * 100, &mut rng).unwrap().session;
        }
        s.enemies
            .iter()
            .map(|e| (e.kind, e.x, e.y))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(9), run(9));
}
