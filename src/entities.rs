/// Game entity types and their per-frame behaviour.
///
/// Sizes and speeds live in `GameConfig`, so every method that needs one
/// takes the config by reference.  Positions are logical units on the
/// 800×600 playfield (top-left origin).

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    /// Tougher variant that appears at most once on every fifth wave.
    Special,
}

impl EnemyKind {
    pub fn max_health(self) -> i32 {
        match self {
            EnemyKind::Normal => 1,
            EnemyKind::Special => 3,
        }
    }

    /// Score awarded when an enemy of this kind is destroyed.
    pub fn score_value(self) -> u32 {
        match self {
            EnemyKind::Normal => 1,
            EnemyKind::Special => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// All enemies of the wave destroyed; waiting for a key press.
    WaveComplete,
    /// Player health ran out; waiting for a key press.
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// May dip below zero on the killing blow; see `display_health`.
    pub health: i32,
    pub invincible: bool,
    /// Frames elapsed since invincibility was granted.
    pub invincible_timer: u32,
}

impl Player {
    /// Spawn at the left side, centred vertically.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.player_start_x,
            y: config.screen_height / 2 - config.player_height / 2,
            health: config.player_health,
            invincible: false,
            invincible_timer: 0,
        }
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, self.y, config.player_width, config.player_height)
    }

    /// Shift vertically, keeping the whole sprite on screen.
    pub fn move_in(&mut self, direction: Direction, config: &GameConfig) {
        let lowest = config.screen_height - config.player_height;
        self.y = match direction {
            Direction::Up => (self.y - config.player_speed).max(0),
            Direction::Down => (self.y + config.player_speed).min(lowest),
        };
    }

    /// Advance the invincibility timer, clearing it once it expires.
    pub fn update(&mut self, config: &GameConfig) {
        if self.invincible {
            self.invincible_timer += 1;
            if self.invincible_timer >= config.invincibility_frames() {
                self.invincible = false;
            }
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        if !self.invincible {
            self.health -= amount;
        }
    }

    pub fn grant_invincibility(&mut self) {
        self.invincible = true;
        self.invincible_timer = 0;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }

    /// Restore health and drop invincibility.  Position is kept.
    pub fn reset(&mut self, config: &GameConfig) {
        self.health = config.player_health;
        self.invincible = false;
        self.invincible_timer = 0;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub kind: EnemyKind,
    pub health: i32,
}

impl Enemy {
    /// A fresh enemy of `kind` entering at the right edge.
    pub fn new(kind: EnemyKind, y: i32, config: &GameConfig) -> Self {
        Self {
            x: config.screen_width,
            y,
            kind,
            health: kind.max_health(),
        }
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, self.y, config.enemy_width, config.enemy_height)
    }

    pub fn update(&mut self, config: &GameConfig) {
        self.x -= config.enemy_speed;
    }

    /// Apply one point of damage; returns whether the enemy is now defeated.
    pub fn take_hit(&mut self) -> bool {
        self.health -= 1;
        self.is_defeated()
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Past the left edge of the playfield.
    pub fn has_breached(&self) -> bool {
        self.x < 0
    }
}

// ── Projectiles & pick-ups ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

impl Bullet {
    /// Fired from the player's nose: forward edge, mid-height.
    pub fn fired_by(player: &Player, config: &GameConfig) -> Self {
        Self {
            x: player.x + config.player_width,
            y: player.y + config.player_height / 2,
        }
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, self.y, config.bullet_width, config.bullet_height)
    }

    pub fn update(&mut self, config: &GameConfig) {
        self.x += config.bullet_speed;
    }

    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        self.x >= config.screen_width
    }
}

/// Invincibility star drifting in from the right.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: i32,
    pub y: i32,
}

impl PowerUp {
    pub fn new(y: i32, config: &GameConfig) -> Self {
        Self {
            x: config.screen_width,
            y,
        }
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, self.y, config.power_up_size, config.power_up_size)
    }

    pub fn update(&mut self, config: &GameConfig) {
        self.x -= config.power_up_speed;
    }

    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        self.x + config.power_up_size < 0
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct WaveState {
    pub number: u32,
    pub enemies_per_wave: u32,
    /// Kills still needed; escaped enemies do not count.
    pub enemies_remaining: i32,
    pub special_enemy_spawned: bool,
    /// The once-per-wave special roll has been made.
    pub special_enemy_rolled: bool,
}

impl WaveState {
    pub fn first(config: &GameConfig) -> Self {
        Self {
            number: 1,
            enemies_per_wave: config.enemies_first_wave,
            enemies_remaining: config.enemies_first_wave as i32,
            special_enemy_spawned: false,
            special_enemy_rolled: false,
        }
    }

    pub fn is_special_wave(&self, config: &GameConfig) -> bool {
        self.number % config.special_wave_interval == 0
    }
}

/// The entire game state.  One value owns every entity list and counter;
/// subsystems borrow it mutably one phase at a time.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub score: u32,
    pub wave: WaveState,
    pub status: GameStatus,
    pub enemy_spawn_timer: u32,
    pub power_up_timer: u32,
    /// Power-ups spawned this session; gates further spawns.
    pub invincibility_spawned: u32,
    pub frame: u64,
}
