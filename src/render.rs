/// Draw commands for one frame.
///
/// The core never draws; it lists what should be drawn, back to front, and
/// leaves blitting to whoever consumes the list.

use crate::assets::{IMG_LASER, IMG_PLAYER, IMG_TURRET};
use crate::constants::SCREEN_HEIGHT;
use crate::entities::{GunKind, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawLayer {
    Backdrop,
    Player,
    Enemy,
    PlayerBullet,
    EnemyProjectile,
    Gun,
    Explosion,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub layer: DrawLayer,
    pub key: &'static str,
    /// Animation frame; 0 for still images.
    pub frame: u32,
    /// Anchor position.  Backdrop layers are anchored at their bottom-left
    /// corner, explosions at their bottom centre, everything else at the
    /// centre.
    pub x: f32,
    pub y: f32,
    /// Rotation in degrees, counter-clockwise.
    pub angle: f32,
    /// Mirror horizontally (enemies flying left).
    pub flip_x: bool,
}

impl DrawCommand {
    fn sprite(layer: DrawLayer, key: &'static str, x: f32, y: f32) -> DrawCommand {
        DrawCommand {
            layer,
            key,
            frame: 0,
            x,
            y,
            angle: 0.0,
            flip_x: false,
        }
    }
}

/// Everything visible this frame, in paint order.
pub fn draw_list(session: &Session) -> Vec<DrawCommand> {
    let mut draws = Vec::with_capacity(
        session.backdrop.len()
            + session.enemies.len()
            + session.player_bullets.len()
            + session.enemy_projectiles.len()
            + session.explosions.len()
            + 3,
    );

    for layer in &session.backdrop {
        draws.push(DrawCommand::sprite(DrawLayer::Backdrop, layer.key, layer.left, SCREEN_HEIGHT));
    }

    if session.player.alive {
        draws.push(DrawCommand::sprite(
            DrawLayer::Player,
            IMG_PLAYER,
            session.player.x,
            session.player.y,
        ));
    }

    for enemy in &session.enemies {
        draws.push(DrawCommand {
            flip_x: enemy.direction < 0,
            ..DrawCommand::sprite(DrawLayer::Enemy, enemy.sprite, enemy.x, enemy.y)
        });
    }

    for bullet in &session.player_bullets {
        draws.push(DrawCommand {
            angle: bullet.angle,
            ..DrawCommand::sprite(DrawLayer::PlayerBullet, bullet.sprite, bullet.x, bullet.y)
        });
    }

    for p in &session.enemy_projectiles {
        draws.push(DrawCommand {
            angle: p.angle,
            ..DrawCommand::sprite(DrawLayer::EnemyProjectile, p.sprite, p.x, p.y)
        });
    }

    if session.player.alive {
        for kind in [GunKind::Laser, GunKind::Turret] {
            let gun = session.gun(kind);
            let key = match kind {
                GunKind::Laser => IMG_LASER,
                GunKind::Turret => IMG_TURRET,
            };
            draws.push(DrawCommand {
                angle: gun.angle as f32,
                ..DrawCommand::sprite(DrawLayer::Gun, key, gun.x, gun.y)
            });
        }
    }

    for fx in &session.explosions {
        draws.push(DrawCommand {
            frame: fx.frame,
            ..DrawCommand::sprite(DrawLayer::Explosion, fx.key, fx.x, fx.y)
        });
    }

    draws
}
