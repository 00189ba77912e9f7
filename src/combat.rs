/// Collision & combat resolution.
///
/// Each pass marks indices first and compacts afterwards, so no list is
/// mutated while it is being walked.

use log::{debug, info};

use crate::entities::GameState;

/// Bullets against enemies.  A bullet damages only the first live enemy
/// (in spawn order) it overlaps, and is consumed by the hit.
pub fn resolve_bullet_hits(state: &mut GameState) {
    let config = state.config;
    let mut used = vec![false; state.bullets.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bullet_rect = bullet.rect(&config);
        let target = state
            .enemies
            .iter_mut()
            .find(|e| !e.is_defeated() && e.rect(&config).intersects(&bullet_rect));

        if let Some(enemy) = target {
            used[bi] = true;
            if enemy.take_hit() {
                state.score += enemy.kind.score_value();
                state.wave.enemies_remaining -= 1;
                debug!(
                    "{:?} enemy destroyed, score {} ({} left in wave)",
                    enemy.kind, state.score, state.wave.enemies_remaining
                );
            }
        }
    }

    let mut hits = used.into_iter();
    state.bullets.retain(|_| !hits.next().unwrap_or(false));
    state.enemies.retain(|e| !e.is_defeated());
}

/// Power-ups touching the player grant invincibility and are consumed.
pub fn collect_power_ups(state: &mut GameState) {
    let config = state.config;
    let player_rect = state.player.rect(&config);
    let before = state.power_ups.len();

    state
        .power_ups
        .retain(|p| !p.rect(&config).intersects(&player_rect));

    if state.power_ups.len() < before {
        state.player.grant_invincibility();
        info!("invincibility picked up");
    }
}

/// Enemies past the left edge are removed and hurt the player.
pub fn resolve_breaches(state: &mut GameState) {
    let breached = state.enemies.iter().filter(|e| e.has_breached()).count();
    if breached == 0 {
        return;
    }

    for _ in 0..breached {
        state.player.take_damage(state.config.breach_damage);
    }
    state.enemies.retain(|e| !e.has_breached());
    debug!(
        "{breached} enemy(ies) breached, player health {}",
        state.player.health
    );
}
