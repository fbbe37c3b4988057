//! Game state and core simulation types
//!
//! Every entity is owned by exactly one collection on [`GameState`]. Nothing
//! here is process-wide; a host may run several sessions side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, Hitbox};
use crate::consts::*;
use crate::error::ConfigError;
use crate::palette;
use crate::tuning::{EnemyStats, Tuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ticks are ignored until unpaused
    Paused,
    /// Lives reached zero. Terminal until restart.
    GameOver,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { level: u32, enemies: u32 },
    BossSpawned { level: u32, max_health: i32 },
    BossDefeated { level: u32 },
    EnemyKilled { kind: EnemyKind, score: u64 },
    PlayerHit { lives: u32 },
    PowerUpCollected { kind: PowerUpKind },
    GameOver { score: u64, level: u32 },
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Hitbox,
    /// Pixels per tick per active direction
    pub speed: f32,
    pub lives: u32,
    /// Ticks between shots
    pub fire_rate: u32,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
}

impl Player {
    pub fn new(
        pos: Vec2,
        size: Hitbox,
        speed: f32,
        fire_rate: u32,
        lives: u32,
    ) -> Result<Self, ConfigError> {
        if fire_rate == 0 {
            return Err(ConfigError::ZeroFireRate { what: "player" });
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ConfigError::InvalidSpeed {
                what: "player speed",
                value: speed,
            });
        }
        Ok(Self {
            pos,
            size,
            speed,
            lives,
            fire_rate,
            fire_cooldown: 0,
        })
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.size.at(self.pos)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Hostile,
}

/// A bullet entity
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Hitbox,
    /// Pixels per tick
    pub vel: Vec2,
    pub damage: i32,
    pub owner: BulletOwner,
    /// Consumed by a hit; removed during cleanup
    pub dead: bool,
}

impl Bullet {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.size.at(self.pos)
    }

    pub fn is_player(&self) -> bool {
        self.owner == BulletOwner::Player
    }

    pub fn should_remove(&self) -> bool {
        self.dead || self.pos.y < -BULLET_MARGIN || self.pos.y > FIELD_HEIGHT + BULLET_MARGIN
    }
}

/// Enemy variants; stats come from the tuning table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Tank];

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
        }
    }

    fn index(self) -> usize {
        match self {
            EnemyKind::Basic => 0,
            EnemyKind::Fast => 1,
            EnemyKind::Tank => 2,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Hitbox,
    pub health: i32,
    /// Descent per tick
    pub speed: f32,
    pub shoot_chance: f64,
    pub score: u64,
    pub color: u32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, size: Hitbox, stats: &EnemyStats) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            health: stats.health,
            speed: stats.speed,
            shoot_chance: stats.shoot_chance,
            score: stats.score,
            color: stats.color,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.size.at(self.pos)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn should_remove(&self) -> bool {
        !self.is_alive() || self.pos.y > FIELD_HEIGHT + BOTTOM_MARGIN
    }
}

/// Boss motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Entering from above the field
    Descending,
    /// Sweeping left and right at patrol altitude
    Patrolling,
}

/// The boss (at most one per session at a time)
#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Hitbox,
    pub health: i32,
    pub max_health: i32,
    /// Signed horizontal speed while patrolling
    pub vel_x: f32,
    /// Descent per tick while descending
    pub descent_speed: f32,
    pub phase: BossPhase,
}

impl Boss {
    pub fn new(pos: Vec2, size: Hitbox, speed: f32, max_health: i32) -> Self {
        Self {
            pos,
            size,
            health: max_health,
            max_health,
            vel_x: speed,
            descent_speed: speed,
            phase: BossPhase::Descending,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.size.at(self.pos)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Remaining health in [0, 1] for the health bar
    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraLife,
    FasterFire,
    BonusScore,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::ExtraLife,
        PowerUpKind::FasterFire,
        PowerUpKind::BonusScore,
    ];

    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::ExtraLife => palette::GREEN,
            PowerUpKind::FasterFire => palette::BLUE,
            PowerUpKind::BonusScore => palette::GOLD,
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Hitbox,
    pub dead: bool,
}

impl PowerUp {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.size.at(self.pos)
    }

    /// Apply the effect to the player. Returns score awarded by the effect
    /// itself (the flat pickup bonus is separate).
    pub fn apply(&self, player: &mut Player, fire_rate_floor: u32, faster_fire_step: u32) -> u64 {
        match self.kind {
            PowerUpKind::ExtraLife => {
                player.lives += 1;
                0
            }
            PowerUpKind::FasterFire => {
                player.fire_rate = player
                    .fire_rate
                    .saturating_sub(faster_fire_step)
                    .max(fire_rate_floor);
                0
            }
            PowerUpKind::BonusScore => BONUS_SCORE_AWARD,
        }
    }

    pub fn should_remove(&self) -> bool {
        self.dead || self.pos.y > FIELD_HEIGHT + BOTTOM_MARGIN
    }
}

/// A particle for explosion effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    /// Base color; the renderer fades it by [`Particle::alpha`]
    pub color: u32,
}

impl Particle {
    /// Opacity proportional to remaining life (255 = fresh)
    pub fn alpha(&self) -> u8 {
        if self.max_life == 0 {
            return 0;
        }
        (255 * self.life.min(self.max_life) / self.max_life) as u8
    }

    pub fn should_remove(&self) -> bool {
        self.life == 0
    }
}

/// Validated sizes for every entity category, resolved once from [`Tuning`]
#[derive(Debug, Clone)]
pub struct Hitboxes {
    pub player: Hitbox,
    pub bullet: Hitbox,
    pub boss: Hitbox,
    pub power_up: Hitbox,
    pub particle: Hitbox,
    enemies: [Hitbox; 3],
}

impl Hitboxes {
    pub fn from_tuning(tuning: &Tuning) -> Result<Self, ConfigError> {
        let enemy = |kind: EnemyKind| {
            let stats = tuning.enemies.get(kind);
            Hitbox::new(kind.name(), stats.width, stats.height)
        };
        Ok(Self {
            player: Hitbox::new("player", tuning.player.width, tuning.player.height)?,
            bullet: Hitbox::new("bullet", tuning.bullets.width, tuning.bullets.height)?,
            boss: Hitbox::new("boss", tuning.boss.width, tuning.boss.height)?,
            power_up: Hitbox::new("power-up", tuning.power_ups.width, tuning.power_ups.height)?,
            particle: Hitbox::new("particle", tuning.particles.size, tuning.particles.size)?,
            enemies: [
                enemy(EnemyKind::Basic)?,
                enemy(EnemyKind::Fast)?,
                enemy(EnemyKind::Tank)?,
            ],
        })
    }

    pub fn enemy(&self, kind: EnemyKind) -> Hitbox {
        self.enemies[kind.index()]
    }
}

/// Complete simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The single random source for spawns, drops, firing and particles
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub hitboxes: Hitboxes,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Completed ticks
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Kills since the current wave or boss was spawned
    pub enemies_destroyed: u32,
    /// Kills this session
    pub total_kills: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events raised since the last drain. Nothing clears this but
    /// [`GameState::drain_events`], so a host drains it after every tick.
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session and spawn the first wave
    pub fn new(seed: u64, tuning: &Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let hitboxes = Hitboxes::from_tuning(tuning)?;
        let player_size = hitboxes.player;
        let player = Player::new(
            Vec2::new(
                (FIELD_WIDTH - player_size.width()) / 2.0,
                FIELD_HEIGHT - PLAYER_SPAWN_BOTTOM_OFFSET,
            ),
            player_size,
            tuning.player.speed,
            tuning.player.fire_rate,
            tuning.player.lives,
        )?;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning: tuning.clone(),
            hitboxes,
            level: 1,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            enemies_destroyed: 0,
            total_kills: 0,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            power_ups: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        log::info!("New session (seed {seed})");
        super::spawner::spawn_wave(&mut state);

        Ok(state)
    }

    /// Start over with the same tuning and a seed derived from this run's
    pub fn restart(&mut self) {
        let seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        match Self::new(seed, &self.tuning) {
            Ok(fresh) => *self = fresh,
            // Tuning was validated when this state was built
            Err(err) => log::error!("Restart failed: {err}"),
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// No enemies left and no boss active
    pub fn wave_complete(&self) -> bool {
        self.enemies.is_empty() && self.boss.is_none()
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Fire a bullet; the caller picks position, velocity and owner
    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2, owner: BulletOwner) {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos,
            size: self.hitboxes.bullet,
            vel,
            damage: self.tuning.bullets.damage,
            owner,
            dead: false,
        });
    }

    /// Drop a power-up of a uniformly random kind at `pos`
    pub fn spawn_power_up(&mut self, pos: Vec2) {
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp {
            id,
            kind,
            pos,
            size: self.hitboxes.power_up,
            dead: false,
        });
    }

    /// Emit `count` particles from `center` with random velocities
    pub fn spawn_burst(&mut self, center: Vec2, color: u32, count: usize) {
        let max_speed = self.tuning.particles.max_speed;
        let life = self.tuning.particles.lifetime;
        let size = self.hitboxes.particle.width();
        self.particles.reserve(count);
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.random_range(-max_speed..max_speed),
                self.rng.random_range(-max_speed..max_speed),
            );
            self.particles.push(Particle {
                pos: center,
                vel,
                life,
                max_life: life,
                size,
                color,
            });
        }
    }

    /// Remove one life; raises game over exactly once when lives reach zero
    pub fn damage_player(&mut self, amount: u32) {
        if self.is_game_over() {
            return;
        }
        self.player.lives = self.player.lives.saturating_sub(amount);
        self.events.push(GameEvent::PlayerHit {
            lives: self.player.lives,
        });
        log::debug!("Player hit, {} lives left", self.player.lives);

        if self.player.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.score,
                level: self.level,
            });
            log::info!(
                "Game over at level {} with score {} after {} ticks",
                self.level,
                self.score,
                self.time_ticks
            );
        }
    }
}
