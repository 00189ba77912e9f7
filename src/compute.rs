/// Game-logic driver and the wave/session state machine.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use log::info;
use rand::Rng;

use crate::combat;
use crate::config::GameConfig;
use crate::entities::{Bullet, Direction, GameState, GameStatus, Player, WaveState};
use crate::spawn;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the state for a fresh session on wave 1.
pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        config,
        player: Player::new(&config),
        enemies: Vec::new(),
        bullets: Vec::new(),
        power_ups: Vec::new(),
        score: 0,
        wave: WaveState::first(&config),
        status: GameStatus::Playing,
        enemy_spawn_timer: 0,
        power_up_timer: 0,
        invincibility_spawned: 0,
        frame: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player(state: &GameState, direction: Direction) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    next.player.move_in(direction, &state.config);
    next
}

/// Fire a bullet from the player's nose.  Ignored outside of play.
pub fn player_shoot(state: &GameState) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    next.bullets.push(Bullet::fired_by(&state.player, &state.config));
    next
}

/// The "any key" response: dismisses whichever modal screen is showing.
pub fn acknowledge(state: &GameState) -> GameState {
    match state.status {
        GameStatus::Playing => state.clone(),
        GameStatus::WaveComplete => advance_wave(state),
        GameStatus::GameOver => reset_session(state),
    }
}

// ── Wave / session transitions ───────────────────────────────────────────────

/// Start the next wave: one more enemy than before, field cleared.
pub fn advance_wave(state: &GameState) -> GameState {
    let mut next = state.clone();
    let enemies_per_wave = state.wave.enemies_per_wave + 1;
    next.wave = WaveState {
        number: state.wave.number + 1,
        enemies_per_wave,
        enemies_remaining: enemies_per_wave as i32,
        special_enemy_spawned: false,
        special_enemy_rolled: false,
    };
    next.enemies.clear();
    next.status = GameStatus::Playing;
    info!(
        "wave {} started with {} enemies",
        next.wave.number, next.wave.enemies_per_wave
    );
    next
}

/// Full restart after game over.  The player is reset in place and every
/// other list and counter returns to its initial value.
pub fn reset_session(state: &GameState) -> GameState {
    let config = state.config;
    let mut player = state.player.clone();
    player.reset(&config);

    info!("session reset (final score {})", state.score);
    GameState {
        player,
        frame: state.frame,
        ..init_state(config)
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  Frozen while a modal screen is up.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;
    let config = next.config;

    // ── 1. Spawning ──────────────────────────────────────────────────────────
    spawn::spawn_enemies(&mut next, rng);
    spawn::spawn_power_ups(&mut next, rng);

    // ── 2. Movement, dropping anything that left the screen ─────────────────
    for enemy in &mut next.enemies {
        enemy.update(&config);
    }
    for bullet in &mut next.bullets {
        bullet.update(&config);
    }
    for power_up in &mut next.power_ups {
        power_up.update(&config);
    }
    next.bullets.retain(|b| !b.is_off_screen(&config));
    next.power_ups.retain(|p| !p.is_off_screen(&config));

    // ── 3. Collisions ────────────────────────────────────────────────────────
    combat::resolve_bullet_hits(&mut next);
    combat::collect_power_ups(&mut next);
    combat::resolve_breaches(&mut next);

    // ── 4. Player timers ─────────────────────────────────────────────────────
    next.player.update(&config);

    // ── 5. Status ────────────────────────────────────────────────────────────
    if next.player.is_dead() {
        next.status = GameStatus::GameOver;
        info!(
            "game over on wave {} with score {}",
            next.wave.number, next.score
        );
    } else if next.wave.enemies_remaining <= 0 {
        next.status = GameStatus::WaveComplete;
        info!("wave {} complete, score {}", next.wave.number, next.score);
    }

    next
}
