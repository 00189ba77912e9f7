/// Spawn controller: frame-counted timers and dice rolls that decide when
/// enemies and power-ups enter the playfield.

use log::{debug, info, warn};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Enemy, EnemyKind, GameState, GameStatus, PowerUp};

/// Random draws tried before falling back to a linear scan.
const MAX_SPAWN_ATTEMPTS: usize = 64;

fn overlaps_any(y: i32, enemies: &[Enemy], config: &GameConfig) -> bool {
    enemies
        .iter()
        .any(|e| (y - e.y).abs() < config.enemy_height)
}

/// Pick a spawn row at least one enemy-height away from every live enemy.
///
/// Rejection-samples uniformly first; if that keeps colliding, scans the
/// range top-down for the first free row.  `None` means the column is
/// packed and the spawn should be skipped.
pub fn spawn_enemy_y(enemies: &[Enemy], config: &GameConfig, rng: &mut impl Rng) -> Option<i32> {
    let max_y = config.enemy_spawn_max_y();

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let y = rng.gen_range(0..=max_y);
        if !overlaps_any(y, enemies, config) {
            return Some(y);
        }
    }

    (0..=max_y).find(|&y| !overlaps_any(y, enemies, config))
}

/// Decide the kind of the next enemy, consuming the special roll if this
/// wave has one.
fn next_enemy_kind(state: &mut GameState, rng: &mut impl Rng) -> EnemyKind {
    let wave = &mut state.wave;
    if wave.special_enemy_spawned || wave.special_enemy_rolled {
        return EnemyKind::Normal;
    }
    if !wave.is_special_wave(&state.config) {
        return EnemyKind::Normal;
    }

    wave.special_enemy_rolled = true;
    if rng.gen_bool(state.config.special_enemy_chance) {
        wave.special_enemy_spawned = true;
        info!("special enemy spawned on wave {}", wave.number);
        EnemyKind::Special
    } else {
        debug!("no special enemy this wave ({})", wave.number);
        EnemyKind::Normal
    }
}

/// Advance the enemy spawn timer and spawn one enemy when it is due.
pub fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng) {
    if state.status != GameStatus::Playing {
        return;
    }

    state.enemy_spawn_timer += 1;
    let cap = (state.wave.enemies_per_wave as usize).min(state.config.max_enemies);
    if state.enemy_spawn_timer < state.config.enemy_spawn_interval || state.enemies.len() >= cap {
        return;
    }

    let Some(y) = spawn_enemy_y(&state.enemies, &state.config, rng) else {
        warn!(
            "no free spawn row for {} live enemies; retrying next frame",
            state.enemies.len()
        );
        return;
    };

    let kind = next_enemy_kind(state, rng);
    state.enemies.push(Enemy::new(kind, y, &state.config));
    state.enemy_spawn_timer = 0;
}

/// Power-ups unlock one per `waves_per_power_up` waves reached.
pub fn power_up_allowed(state: &GameState) -> bool {
    state.invincibility_spawned < state.wave.number / state.config.waves_per_power_up
}

/// Advance the power-up timer; when it fires, reset it and roll for a spawn.
pub fn spawn_power_ups(state: &mut GameState, rng: &mut impl Rng) {
    if state.status != GameStatus::Playing || !power_up_allowed(state) {
        return;
    }

    state.power_up_timer += 1;
    if state.power_up_timer < state.config.power_up_spawn_interval {
        return;
    }

    state.power_up_timer = 0;
    if rng.gen_bool(state.config.power_up_chance) {
        let y = rng.gen_range(0..=state.config.power_up_spawn_max_y());
        state.power_ups.push(PowerUp::new(y, &state.config));
        state.invincibility_spawned += 1;
        info!("power-up spawned at y={y} (wave {})", state.wave.number);
    }
}
