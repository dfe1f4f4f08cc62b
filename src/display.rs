/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session or the frame's draw list.  No game logic is performed; this
/// module only translates draw commands into terminal commands, scaling the
/// 800×600 logical playfield onto whatever grid the terminal offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use land_raider::assets::*;
use land_raider::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use land_raider::entities::{GameStatus, GunKind, Session};
use land_raider::render::{DrawCommand, DrawLayer};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Green;
const C_HUD_WARN: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_GUN: Color = Color::Grey;
const C_PLAYER_SHOT: Color = Color::Cyan;
const C_ENEMY_SHOT: Color = Color::Magenta;
const C_MOUNTAINS: Color = Color::DarkGrey;
const C_GROUND: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

// ── Asset table ───────────────────────────────────────────────────────────────

/// Glyph and colour standing in for an image key.
fn glyph(key: &str) -> Option<(&'static str, Color)> {
    let entry = match key {
        IMG_PLAYER => ("[=##=]", C_PLAYER),
        IMG_LASER | IMG_TURRET => ("|", C_GUN),
        IMG_PLASMA_SHOT => ("●", C_PLAYER_SHOT),
        IMG_PLASMA_BULLET => ("•", C_PLAYER_SHOT),
        IMG_BOMB => ("v", Color::Red),
        IMG_BULLET => ("·", C_ENEMY_SHOT),
        IMG_MISSILE => ("¥", C_ENEMY_SHOT),
        IMG_JET => (">=>", Color::Yellow),
        IMG_CHOPPER => ("=O=", Color::Green),
        IMG_HOVER_CHOPPER => ("~H~", Color::Cyan),
        IMG_HELICOPTER => ("+W+", Color::Magenta),
        IMG_GUNNER => ("[G]", Color::Red),
        IMG_MOUNTAINS => ("/\\__/\\___", C_MOUNTAINS),
        IMG_GROUND => ("=-=-", C_GROUND),
        FX_DEATH | FX_END | FX_PLAYER | FX_DROP | FX_BULLET | FX_BOMB => ("*", Color::Yellow),
        _ => return None,
    };
    Some(entry)
}

/// Whether a sound key is known, and whether it rings the bell.
fn sound_cue(key: &str) -> Option<bool> {
    match key {
        SND_DEATH => Some(true),
        SND_HIT | SND_PLASMA | SND_TURRET => Some(false),
        k if SND_EXPLOSIONS.contains(&k) => Some(true),
        _ => None,
    }
}

/// Resource catalog backed by the glyph table above.
pub struct TerminalAssets;

impl AssetCatalog for TerminalAssets {
    fn contains(&self, kind: AssetKind, key: &str) -> bool {
        match kind {
            AssetKind::Image => glyph(key).is_some(),
            AssetKind::Sound => sound_cue(key).is_some(),
            AssetKind::Font => key == FONT_HUD,
        }
    }
}

/// Ring the bell for explosions and the player's death; the rest is silent.
pub fn play<W: Write>(out: &mut W, key: &str) -> std::io::Result<()> {
    if sound_cue(key) == Some(true) {
        out.queue(Print("\x07"))?;
    }
    Ok(())
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Row 0 is the HUD and the last row the controls hint; the playfield is
/// everything in between.
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn current() -> std::io::Result<Viewport> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport { cols, rows })
    }

    fn play_rows(&self) -> f32 {
        self.rows.saturating_sub(2) as f32
    }

    /// Terminal cell for a logical point, or `None` when off the grid.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = x / SCREEN_WIDTH * self.cols as f32;
        let row = 1.0 + y / SCREEN_HEIGHT * self.play_rows();
        let in_cols = col >= 0.0 && col < self.cols as f32;
        let in_rows = row >= 1.0 && row < 1.0 + self.play_rows();
        (in_cols && in_rows).then(|| (col as u16, row as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    draws: &[DrawCommand],
) -> std::io::Result<()> {
    let view = Viewport::current()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for draw in draws {
        match draw.layer {
            DrawLayer::Backdrop => draw_backdrop(out, &view, draw)?,
            _ => draw_sprite(out, &view, draw)?,
        }
    }

    draw_hud(out, &view, session)?;
    draw_controls_hint(out, &view)?;

    if session.status != GameStatus::Running {
        draw_game_over(out, &view, session)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Draw commands ─────────────────────────────────────────────────────────────

/// Repeat the layer's pattern across the width, shifted by its scroll offset.
fn draw_backdrop<W: Write>(out: &mut W, view: &Viewport, draw: &DrawCommand) -> std::io::Result<()> {
    let Some((pattern, color)) = glyph(draw.key) else {
        return Ok(());
    };
    let row = match draw.key {
        IMG_MOUNTAINS => view.rows.saturating_sub(5),
        _ => view.rows.saturating_sub(2),
    };
    let chars: Vec<char> = pattern.chars().collect();
    let shift = (-draw.x / SCREEN_WIDTH * view.cols as f32) as usize;
    let line: String = (0..view.cols as usize)
        .map(|i| chars[(i + shift) % chars.len()])
        .collect();

    out.queue(cursor::MoveTo(0, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(line))?;
    Ok(())
}

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, draw: &DrawCommand) -> std::io::Result<()> {
    let Some((text, color)) = glyph(draw.key) else {
        return Ok(());
    };
    let Some((col, row)) = view.cell(draw.x, draw.y) else {
        return Ok(());
    };

    let text: String = match draw.layer {
        DrawLayer::Enemy if draw.flip_x => text
            .chars()
            .rev()
            .map(|c| match c {
                '>' => '<',
                '<' => '>',
                other => other,
            })
            .collect(),
        DrawLayer::Gun => barrel(draw.angle).to_string(),
        DrawLayer::Explosion => blast(draw.frame).to_string(),
        _ => text.to_string(),
    };

    let width = text.chars().count() as u16;
    let col = col.saturating_sub(width / 2).min(view.cols.saturating_sub(width));
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Barrel glyph for a gun angle in degrees.
fn barrel(angle: f32) -> char {
    match angle as i32 {
        a if a < 23 => '─',
        a if a < 68 => '╱',
        a if a < 113 => '│',
        a if a < 158 => '╲',
        _ => '─',
    }
}

fn blast(frame: u32) -> char {
    const STAGES: [char; 4] = ['*', '✶', '✷', '·'];
    STAGES[(frame as usize / 3) % STAGES.len()]
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, session: &Session) -> std::io::Result<()> {
    let stats = &session.stats;
    let gun = match session.active_gun {
        GunKind::Laser => "LASER",
        GunKind::Turret => "TURRET",
    };
    let line = format!(
        "Score: {:<6} Distance: {:>3}KM  Health: {:>3}%  Armour: {:>3}%  Turret: {:>3}  [{}]",
        stats.score(),
        stats.distance(),
        stats.health(),
        stats.armour(),
        stats.turret_ammo(),
        gun,
    );
    let color = if stats.armour() == 0 { C_HUD_WARN } else { C_HUD };

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(clip(&line, view.cols.saturating_sub(1))))?;
    Ok(())
}

/// At most `cols` characters of `text`, so a line never wraps onto the
/// playfield.
fn clip(text: &str, cols: u16) -> String {
    text.chars().take(cols as usize).collect()
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    let hint = "← → : Move   A D : Aim   SPACE : Fire   C : Switch gun   Q : Quit";
    out.queue(Print(clip(hint, view.cols.saturating_sub(1))))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, session: &Session) -> std::io::Result<()> {
    let (message, color) = match session.status {
        GameStatus::Won => ("YOU WIN!", Color::Green),
        _ => ("YOU LOSE!", Color::Red),
    };
    let score_line = format!("Your Score: {}", session.stats.score());

    let cx = view.cols / 2;
    let row = view.rows / 3;
    for (i, (text, color)) in [(message.to_string(), color), (score_line, Color::Yellow)]
        .into_iter()
        .enumerate()
    {
        let col = cx.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row + i as u16 * 2))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Title menu ────────────────────────────────────────────────────────────────

pub fn draw_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    let view = Viewport::current()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cx = view.cols / 2;
    let cy = view.rows / 2;
    let lines: &[(&str, Color)] = &[
        ("L A N D   R A I D E R", Color::Green),
        ("", Color::White),
        ("Reach the end of the road. Armour soaks hits before health.", Color::DarkGrey),
        ("Laser: slow, heavy shots.  Turret: rapid fire, limited ammo.", Color::DarkGrey),
        ("", Color::White),
        ("[SPACE] Play    [Q] Quit", Color::White),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(3) + i as u16;
        let col = cx.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
