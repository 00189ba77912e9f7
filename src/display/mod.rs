/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The playfield is scaled onto whatever
/// terminal size the `Viewport` describes, and every sprite is a filled
/// block of background-coloured cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{EnemyKind, GameState, GameStatus, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Rgb { r: 135, g: 206, b: 235 }; // light sky blue
const C_PLAYER: Color = Color::Rgb { r: 0, g: 128, b: 255 };
const C_PLAYER_FLASH_A: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const C_PLAYER_FLASH_B: Color = Color::Rgb { r: 0, g: 0, b: 255 };
const C_ENEMY_NORMAL: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const C_ENEMY_SPECIAL: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const C_BULLET: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const C_POWER_UP: Color = Color::Rgb { r: 255, g: 255, b: 0 };
const C_BAR_BACK: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const C_BAR_FILL: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Height of the health bars and their gap above the sprite, in logical units.
const BAR_HEIGHT: i32 = 5;
const BAR_OFFSET: i32 = 10;
/// Full width of the invincibility countdown bar.
const TIMER_BAR_WIDTH: i32 = 400;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// A rectangle of terminal cells; `col + width` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

/// Maps the logical playfield onto a terminal of `cols × rows` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_width: i32,
    world_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, config: &GameConfig) -> Self {
        Self {
            cols,
            rows,
            world_width: config.screen_width,
            world_height: config.screen_height,
        }
    }

    fn scale_floor(v: i32, cells: u16, world: i32) -> i64 {
        (v as i64 * cells as i64).div_euclid(world as i64)
    }

    fn scale_ceil(v: i32, cells: u16, world: i32) -> i64 {
        let world = world as i64;
        (v as i64 * cells as i64 + world - 1).div_euclid(world)
    }

    /// Cells covered by `rect`, clipped to the terminal.  Anything on
    /// screen covers at least one cell; `None` when fully outside.
    pub fn cells(&self, rect: Rect) -> Option<CellRect> {
        if rect.w <= 0 || rect.h <= 0 {
            return None;
        }
        let c0 = Self::scale_floor(rect.x, self.cols, self.world_width);
        let c1 = Self::scale_ceil(rect.right(), self.cols, self.world_width).max(c0 + 1);
        let r0 = Self::scale_floor(rect.y, self.rows, self.world_height);
        let r1 = Self::scale_ceil(rect.bottom(), self.rows, self.world_height).max(r0 + 1);

        let c0 = c0.max(0);
        let r0 = r0.max(0);
        let c1 = c1.min(self.cols as i64);
        let r1 = r1.min(self.rows as i64);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some(CellRect {
            col: c0 as u16,
            row: r0 as u16,
            width: (c1 - c0) as u16,
            height: (r1 - r0) as u16,
        })
    }

    /// Cell holding the logical point `(x, y)`, clamped onto the terminal.
    pub fn cell_at(&self, x: i32, y: i32) -> (u16, u16) {
        let col = Self::scale_floor(x, self.cols, self.world_width)
            .clamp(0, self.cols.saturating_sub(1) as i64);
        let row = Self::scale_floor(y, self.rows, self.world_height)
            .clamp(0, self.rows.saturating_sub(1) as i64);
        (col as u16, row as u16)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    draw_background(out, view)?;

    draw_player(out, state, view)?;
    for enemy in &state.enemies {
        let color = match enemy.kind {
            EnemyKind::Normal => C_ENEMY_NORMAL,
            EnemyKind::Special => C_ENEMY_SPECIAL,
        };
        let rect = enemy.rect(&state.config);
        fill_rect(out, view, rect, color)?;
        if enemy.kind == EnemyKind::Special {
            draw_health_bar(out, view, rect, enemy.health, enemy.kind.max_health())?;
        }
    }
    for bullet in &state.bullets {
        fill_rect(out, view, bullet.rect(&state.config), C_BULLET)?;
    }
    for power_up in &state.power_ups {
        fill_rect(out, view, power_up.rect(&state.config), C_POWER_UP)?;
    }

    draw_invincibility_timer(out, state, view)?;
    draw_hud(out, state, view)?;
    draw_controls_hint(out, view)?;

    match state.status {
        GameStatus::Playing => {}
        GameStatus::WaveComplete => draw_wave_complete(out, state, view)?,
        GameStatus::GameOver => draw_game_over(out, state, view)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn draw_background<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let blank = " ".repeat(view.cols as usize);
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    for row in 0..view.rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&blank))?;
    }
    Ok(())
}

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: Rect,
    color: Color,
) -> std::io::Result<()> {
    let Some(cells) = view.cells(rect) else {
        return Ok(());
    };
    let blank = " ".repeat(cells.width as usize);
    out.queue(style::SetBackgroundColor(color))?;
    for row in cells.row..cells.row + cells.height {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(&blank))?;
    }
    Ok(())
}

/// Text on the background colour at a terminal cell.
fn draw_text<W: Write>(
    out: &mut W,
    col: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Red bar with a green fill proportional to `health / max`, just above `over`.
fn draw_health_bar<W: Write>(
    out: &mut W,
    view: &Viewport,
    over: Rect,
    health: i32,
    max: i32,
) -> std::io::Result<()> {
    let back = Rect::new(over.x, over.y - BAR_OFFSET, over.w, BAR_HEIGHT);
    fill_rect(out, view, back, C_BAR_BACK)?;
    let filled = over.w * health.clamp(0, max) / max;
    fill_rect(out, view, Rect { w: filled, ..back }, C_BAR_FILL)
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let p = &state.player;
    let color = if !p.invincible {
        C_PLAYER
    } else if (p.invincible_timer / 5) % 2 == 0 {
        C_PLAYER_FLASH_A
    } else {
        C_PLAYER_FLASH_B
    };
    let rect = p.rect(&state.config);
    fill_rect(out, view, rect, color)?;
    draw_health_bar(
        out,
        view,
        rect,
        p.display_health(),
        state.config.player_health,
    )
}

/// Countdown bar along the bottom while invincibility lasts.
fn draw_invincibility_timer<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let p = &state.player;
    if !p.invincible {
        return Ok(());
    }
    let config = &state.config;
    let total = config.invincibility_secs as i32;
    let remaining = total - (p.invincible_timer / config.fps) as i32;
    let width = TIMER_BAR_WIDTH * remaining.max(0) / total.max(1);
    let bar = Rect::new(
        config.screen_width / 2 - TIMER_BAR_WIDTH / 2,
        config.screen_height - 30,
        width,
        20,
    );
    fill_rect(out, view, bar, C_BAR_FILL)
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Score — top left
    let (col, row) = view.cell_at(10, 10);
    draw_text(out, col, row, &format!("Score: {}", state.score), C_TEXT)?;

    // Wave and health — top right
    let right = format!(
        "Wave: {}  Health: {}",
        state.wave.number,
        state.player.display_health()
    );
    let col = view.cols.saturating_sub(right.chars().count() as u16 + 1);
    draw_text(out, col, row, &right, C_TEXT)
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    draw_text(
        out,
        1,
        view.rows.saturating_sub(1),
        "W S / ↑ ↓ : Move   SPACE : Shoot   Q : Quit",
        C_HINT,
    )
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Centre each line horizontally, the block vertically.
fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        draw_text(out, col, row, msg, *color)?;
    }
    Ok(())
}

fn draw_wave_complete<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let banner = format!(
        "Wave {} complete! Press any key to continue.",
        state.wave.number
    );
    draw_centered(out, view, &[(banner.as_str(), C_TEXT)])
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("Any key - Play Again  Q - Quit", C_TEXT),
    ];
    draw_centered(out, view, lines)
}
