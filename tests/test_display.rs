use wave_shooter::compute::init_state;
use wave_shooter::config::GameConfig;
use wave_shooter::display::{render, CellRect, Viewport};
use wave_shooter::entities::{GameState, GameStatus, Rect};

fn view() -> Viewport {
    Viewport::new(80, 24, &GameConfig::default())
}

fn render_to_string(state: &GameState) -> String {
    let mut out: Vec<u8> = Vec::new();
    render(&mut out, state, &view()).unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn whole_playfield_covers_whole_terminal() {
    let cells = view().cells(Rect::new(0, 0, 800, 600));
    assert_eq!(cells, Some(CellRect { col: 0, row: 0, width: 80, height: 24 }));
}

#[test]
fn player_rect_scales_onto_cells() {
    // x 50..100 → cols 5..10; y 270..330 → rows 10.8..13.2 → 10..14
    let cells = view().cells(Rect::new(50, 270, 50, 60));
    assert_eq!(cells, Some(CellRect { col: 5, row: 10, width: 5, height: 4 }));
}

#[test]
fn tiny_rect_still_covers_one_cell() {
    let cells = view().cells(Rect::new(100, 300, 5, 5)).unwrap();
    assert_eq!((cells.width, cells.height), (1, 1));
}

#[test]
fn off_screen_rects_are_skipped() {
    assert_eq!(view().cells(Rect::new(800, 0, 50, 50)), None);
    assert_eq!(view().cells(Rect::new(-60, 0, 50, 50)), None);
    assert_eq!(view().cells(Rect::new(10, 10, 0, 5)), None);
}

#[test]
fn partially_visible_rect_is_clipped() {
    let cells = view().cells(Rect::new(780, 0, 50, 50)).unwrap();
    assert_eq!(cells.col, 78);
    assert_eq!(cells.width, 2);
}

#[test]
fn cell_at_clamps_to_terminal() {
    assert_eq!(view().cell_at(800, 600), (79, 23));
    assert_eq!(view().cell_at(-5, -5), (0, 0));
    assert_eq!(view().cell_at(10, 10), (1, 0));
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_shows_hud() {
    let mut s = init_state(GameConfig::default());
    s.score = 12;
    let frame = render_to_string(&s);
    assert!(frame.contains("Score: 12"));
    assert!(frame.contains("Wave: 1  Health: 100"));
    assert!(!frame.contains("complete!"));
}

#[test]
fn render_clamps_negative_health() {
    let mut s = init_state(GameConfig::default());
    s.player.health = -10;
    s.status = GameStatus::GameOver;
    assert!(render_to_string(&s).contains("Health: 0"));
}

#[test]
fn render_shows_wave_complete_banner() {
    let mut s = init_state(GameConfig::default());
    s.wave.number = 3;
    s.status = GameStatus::WaveComplete;
    assert!(render_to_string(&s).contains("Wave 3 complete! Press any key to continue."));
}

#[test]
fn render_shows_game_over_box() {
    let mut s = init_state(GameConfig::default());
    s.score = 9;
    s.status = GameStatus::GameOver;
    let frame = render_to_string(&s);
    assert!(frame.contains("GAME  OVER"));
    assert!(frame.contains("Final Score: 9"));
}
