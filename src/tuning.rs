//! Data-driven game balance
//!
//! Every number the simulation consults lives here so a host can load an
//! alternate table from JSON. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::FIELD_HEIGHT;
use crate::error::ConfigError;
use crate::palette;
use crate::sim::EnemyKind;
use crate::sim::aabb::Hitbox;

/// Player ship tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Pixels per tick per active direction
    pub speed: f32,
    /// Ticks between shots
    pub fire_rate: u32,
    /// FasterFire never reduces the fire rate below this
    pub fire_rate_floor: u32,
    /// FasterFire reduction per pickup
    pub faster_fire_step: u32,
    pub lives: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            speed: 5.0,
            fire_rate: 15,
            fire_rate_floor: 5,
            faster_fire_step: 3,
            lives: 3,
        }
    }
}

/// Bullet tuning (shared by both owners)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub width: f32,
    pub height: f32,
    /// Upward speed of player shots
    pub player_speed: f32,
    /// Downward speed of enemy shots
    pub enemy_speed: f32,
    /// Downward speed of boss shots
    pub boss_speed: f32,
    pub damage: i32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 15.0,
            player_speed: 10.0,
            enemy_speed: 5.0,
            boss_speed: 7.0,
            damage: 1,
        }
    }
}

/// Per-kind enemy stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    /// Descent per tick
    pub speed: f32,
    /// Bernoulli probability of firing each tick
    pub shoot_chance: f64,
    pub score: u64,
    /// 0xRRGGBB
    pub color: u32,
}

/// Stat table indexed by [`EnemyKind`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub basic: EnemyStats,
    pub fast: EnemyStats,
    pub tank: EnemyStats,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            basic: EnemyStats {
                width: 30.0,
                height: 30.0,
                health: 1,
                speed: 2.0,
                shoot_chance: 0.01,
                score: 100,
                color: palette::ORANGE,
            },
            fast: EnemyStats {
                width: 25.0,
                height: 25.0,
                health: 1,
                speed: 4.0,
                shoot_chance: 0.02,
                score: 150,
                color: palette::YELLOW,
            },
            tank: EnemyStats {
                width: 40.0,
                height: 40.0,
                health: 5,
                speed: 1.0,
                shoot_chance: 0.03,
                score: 300,
                color: palette::PURPLE,
            },
        }
    }
}

impl EnemyTable {
    pub fn get(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Basic => &self.basic,
            EnemyKind::Fast => &self.fast,
            EnemyKind::Tank => &self.tank,
        }
    }
}

/// Boss tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub width: f32,
    pub height: f32,
    /// Descent and patrol speed per tick
    pub speed: f32,
    /// Boss descends until its top edge reaches this y, then patrols
    pub patrol_altitude: f32,
    pub shoot_chance: f64,
    pub base_health: i32,
    pub health_per_level: i32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 80.0,
            speed: 3.0,
            patrol_altitude: 50.0,
            shoot_chance: 0.05,
            base_health: 50,
            health_per_level: 10,
        }
    }
}

impl BossTuning {
    /// Max health for a boss spawned at `level`, saturating at `i32::MAX`
    pub fn max_health_for_level(&self, level: u32) -> i32 {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        self.base_health
            .saturating_add(self.health_per_level.saturating_mul(level))
    }
}

/// Power-up tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    pub width: f32,
    pub height: f32,
    pub fall_speed: f32,
    /// Chance an enemy kill drops a power-up
    pub drop_chance: f64,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            width: 25.0,
            height: 25.0,
            fall_speed: 3.0,
            drop_chance: 0.10,
        }
    }
}

/// Explosion particle tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTuning {
    /// Lifetime in ticks
    pub lifetime: u32,
    pub size: f32,
    /// Each velocity component is drawn from [-max_speed, max_speed)
    pub max_speed: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            lifetime: 30,
            size: 4.0,
            max_speed: 5.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub bullets: BulletTuning,
    pub enemies: EnemyTable,
    pub boss: BossTuning,
    pub power_ups: PowerUpTuning,
    pub particles: ParticleTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would corrupt geometry or progression
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        Hitbox::new("player", p.width, p.height)?;
        check_speed("player speed", p.speed)?;
        if p.fire_rate == 0 {
            return Err(ConfigError::ZeroFireRate { what: "player" });
        }
        if p.fire_rate_floor == 0 {
            return Err(ConfigError::ZeroFireRate {
                what: "player fire-rate floor",
            });
        }
        if p.fire_rate_floor > p.fire_rate {
            return Err(ConfigError::FireRateFloorTooHigh {
                floor: p.fire_rate_floor,
                rate: p.fire_rate,
            });
        }
        if p.lives == 0 {
            return Err(ConfigError::Zero {
                what: "starting lives",
            });
        }

        let b = &self.bullets;
        Hitbox::new("bullet", b.width, b.height)?;
        check_speed("player bullet speed", b.player_speed)?;
        check_speed("enemy bullet speed", b.enemy_speed)?;
        check_speed("boss bullet speed", b.boss_speed)?;
        if b.damage <= 0 {
            return Err(ConfigError::Zero {
                what: "bullet damage",
            });
        }

        for kind in EnemyKind::ALL {
            let stats = self.enemies.get(kind);
            let name = kind.name();
            Hitbox::new(name, stats.width, stats.height)?;
            check_speed(name, stats.speed)?;
            check_probability(name, stats.shoot_chance)?;
            if stats.health <= 0 {
                return Err(ConfigError::Zero { what: name });
            }
        }

        let boss = &self.boss;
        Hitbox::new("boss", boss.width, boss.height)?;
        check_speed("boss speed", boss.speed)?;
        check_probability("boss shoot chance", boss.shoot_chance)?;
        if boss.base_health <= 0 {
            return Err(ConfigError::Zero {
                what: "boss base health",
            });
        }
        if boss.health_per_level < 0 {
            return Err(ConfigError::Negative {
                what: "boss health per level",
            });
        }
        // The boss has no off-field removal, so it must settle inside the field
        let max_altitude = FIELD_HEIGHT - boss.height;
        if !boss.patrol_altitude.is_finite()
            || !(0.0..=max_altitude).contains(&boss.patrol_altitude)
        {
            return Err(ConfigError::OutOfField {
                what: "boss patrol altitude",
                value: boss.patrol_altitude,
                max: max_altitude,
            });
        }

        let pu = &self.power_ups;
        Hitbox::new("power-up", pu.width, pu.height)?;
        check_speed("power-up fall speed", pu.fall_speed)?;
        check_probability("power-up drop chance", pu.drop_chance)?;

        let pt = &self.particles;
        if pt.lifetime == 0 {
            return Err(ConfigError::Zero {
                what: "particle lifetime",
            });
        }
        Hitbox::new("particle", pt.size, pt.size)?;
        check_speed("particle speed", pt.max_speed)?;

        Ok(())
    }
}

fn check_speed(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed { what, value })
    }
}

fn check_probability(what: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_boss_health_scales_with_level() {
        let boss = BossTuning::default();
        assert_eq!(boss.max_health_for_level(1), 60);
        assert_eq!(boss.max_health_for_level(3), 80);
    }

    #[test]
    fn test_boss_health_saturates_instead_of_overflowing() {
        let mut tuning = Tuning::default();
        tuning.boss.health_per_level = 1_000_000_000;
        assert_eq!(tuning.validate(), Ok(()));
        let boss = &tuning.boss;
        assert_eq!(boss.max_health_for_level(3), i32::MAX);
        assert_eq!(boss.max_health_for_level(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_rejects_shrinking_boss_health() {
        let mut tuning = Tuning::default();
        tuning.boss.health_per_level = -20;
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::Negative {
                what: "boss health per level"
            })
        );

        let mut tuning = Tuning::default();
        tuning.boss.base_health = 0;
        tuning.boss.health_per_level = 30;
        assert!(matches!(tuning.validate(), Err(ConfigError::Zero { .. })));
    }

    #[test]
    fn test_rejects_patrol_altitude_outside_field() {
        for altitude in [5000.0, -1.0, FIELD_HEIGHT - 79.0, f32::NAN, f32::INFINITY] {
            let mut tuning = Tuning::default();
            tuning.boss.patrol_altitude = altitude;
            assert!(
                matches!(tuning.validate(), Err(ConfigError::OutOfField { .. })),
                "altitude {altitude} accepted"
            );
        }

        let mut tuning = Tuning::default();
        tuning.boss.patrol_altitude = FIELD_HEIGHT - tuning.boss.height;
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let tuning = Tuning::from_json(r#"{ "player": { "fire_rate": 20 } }"#).unwrap();
        assert_eq!(tuning.player.fire_rate, 20);
        assert_eq!(tuning.player.lives, 3);
        assert_eq!(tuning.enemies, EnemyTable::default());
    }

    #[test]
    fn test_rejects_zero_fire_rate() {
        let mut tuning = Tuning::default();
        tuning.player.fire_rate = 0;
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::ZeroFireRate { what: "player" })
        );
    }

    #[test]
    fn test_rejects_negative_size() {
        let mut tuning = Tuning::default();
        tuning.enemies.tank.width = -4.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidSize { what: "tank", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let mut tuning = Tuning::default();
        tuning.power_ups.drop_chance = 1.5;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
