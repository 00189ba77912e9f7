use wave_shooter::combat::*;
use wave_shooter::compute::init_state;
use wave_shooter::config::GameConfig;
use wave_shooter::entities::*;

fn make_state() -> GameState {
    init_state(GameConfig::default())
}

fn enemy(kind: EnemyKind, x: i32, y: i32) -> Enemy {
    Enemy { x, y, kind, health: kind.max_health() }
}

// ── bullet × enemy ────────────────────────────────────────────────────────────

#[test]
fn bullet_destroys_normal_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Normal, 300, 200));
    s.bullets.push(Bullet { x: 310, y: 210 });
    resolve_bullet_hits(&mut s);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 1);
    assert_eq!(s.wave.enemies_remaining, 2);
}

#[test]
fn bullet_wounds_special_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Special, 300, 200));
    s.bullets.push(Bullet { x: 310, y: 210 });
    resolve_bullet_hits(&mut s);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].health, 2);
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.wave.enemies_remaining, 3);
}

#[test]
fn three_bullets_destroy_special_enemy_for_five_points() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Special, 300, 200));
    for dy in [0, 10, 20] {
        s.bullets.push(Bullet { x: 310, y: 210 + dy });
    }
    resolve_bullet_hits(&mut s);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 5);
    assert_eq!(s.wave.enemies_remaining, 2);
}

#[test]
fn bullet_hits_only_first_enemy_in_spawn_order() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Normal, 300, 200)); // spans y 200..250
    s.enemies.push(enemy(EnemyKind::Normal, 300, 240)); // spans y 240..290
    s.bullets.push(Bullet { x: 310, y: 245 }); // overlaps both
    resolve_bullet_hits(&mut s);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].y, 240);
    assert_eq!(s.score, 1);
}

#[test]
fn spare_bullet_passes_through_destroyed_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Normal, 300, 200));
    s.bullets.push(Bullet { x: 310, y: 210 });
    s.bullets.push(Bullet { x: 320, y: 220 });
    resolve_bullet_hits(&mut s);
    assert!(s.enemies.is_empty());
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].x, 320);
    assert_eq!(s.score, 1);
}

#[test]
fn only_spent_bullets_are_removed_and_order_is_kept() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Normal, 300, 200));
    s.enemies.push(enemy(EnemyKind::Normal, 300, 400));
    s.bullets.push(Bullet { x: 100, y: 10 });
    s.bullets.push(Bullet { x: 310, y: 210 }); // hits first enemy
    s.bullets.push(Bullet { x: 600, y: 300 });
    s.bullets.push(Bullet { x: 310, y: 410 }); // hits second enemy
    s.bullets.push(Bullet { x: 700, y: 500 });
    resolve_bullet_hits(&mut s);
    assert!(s.enemies.is_empty());
    assert_eq!(
        s.bullets,
        vec![
            Bullet { x: 100, y: 10 },
            Bullet { x: 600, y: 300 },
            Bullet { x: 700, y: 500 },
        ]
    );
    assert_eq!(s.score, 2);
}

#[test]
fn bullet_touching_enemy_edge_misses() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Normal, 300, 200));
    s.bullets.push(Bullet { x: 295, y: 210 }); // right edge at 300
    resolve_bullet_hits(&mut s);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.score, 0);
}

// ── power-up × player ─────────────────────────────────────────────────────────

#[test]
fn power_up_grants_invincibility_and_is_consumed() {
    let mut s = make_state();
    s.player.invincible_timer = 77;
    s.power_ups.push(PowerUp { x: 60, y: 280 });
    s.power_ups.push(PowerUp { x: 600, y: 280 });
    collect_power_ups(&mut s);
    assert!(s.player.invincible);
    assert_eq!(s.player.invincible_timer, 0);
    assert_eq!(s.power_ups.len(), 1);
    assert_eq!(s.power_ups[0].x, 600);
}

#[test]
fn distant_power_up_is_ignored() {
    let mut s = make_state();
    s.power_ups.push(PowerUp { x: 600, y: 0 });
    collect_power_ups(&mut s);
    assert!(!s.player.invincible);
    assert_eq!(s.power_ups.len(), 1);
}

// ── enemy breaches ────────────────────────────────────────────────────────────

#[test]
fn breaching_enemy_costs_ten_health() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Normal, -1, 100));
    s.enemies.push(enemy(EnemyKind::Normal, 400, 300));
    resolve_breaches(&mut s);
    assert_eq!(s.player.health, 90);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].x, 400);
    assert_eq!(s.wave.enemies_remaining, 3); // escapes don't count as kills
}

#[test]
fn each_breach_deals_damage() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Normal, -1, 100));
    s.enemies.push(enemy(EnemyKind::Special, -2, 300));
    resolve_breaches(&mut s);
    assert_eq!(s.player.health, 80);
    assert!(s.enemies.is_empty());
}

#[test]
fn breach_while_invincible_is_harmless() {
    let mut s = make_state();
    s.player.grant_invincibility();
    s.enemies.push(enemy(EnemyKind::Normal, -1, 100));
    resolve_breaches(&mut s);
    assert_eq!(s.player.health, 100);
    assert!(s.enemies.is_empty());
}

#[test]
fn enemy_at_left_edge_has_not_breached() {
    let mut s = make_state();
    s.enemies.push(enemy(EnemyKind::Normal, 0, 100));
    resolve_breaches(&mut s);
    assert_eq!(s.player.health, 100);
    assert_eq!(s.enemies.len(), 1);
}
