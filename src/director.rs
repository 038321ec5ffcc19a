/// Regular enemy spawning.
///
/// Each tick rolls once against `dt / spawn_interval`, so the expected rate is
/// one enemy per interval regardless of frame rate.  The process is
/// memoryless and spawns at most one enemy per tick.

use glam::Vec2;

use crate::entities::{Enemy, EnemyKind, Playfield};
use crate::rng::RandomSource;
use crate::stage::StageConfig;

const SPAWN_Y: f32 = -50.0;
const SPAWN_MARGIN: f32 = 30.0;

/// Spawn probability for a frame of `dt` ms.
pub fn spawn_chance(dt: f32, spawn_interval_ms: f32) -> f64 {
    if spawn_interval_ms <= 0.0 {
        return 1.0;
    }
    (dt.max(0.0) / spawn_interval_ms).min(1.0) as f64
}

/// Kind of a freshly spawned enemy under `config`.
pub fn roll_kind(config: &StageConfig, rng: &mut dyn RandomSource) -> EnemyKind {
    if rng.chance(config.special_chance) {
        EnemyKind::SPECIAL[rng.pick_index(EnemyKind::SPECIAL.len())]
    } else {
        EnemyKind::Normal
    }
}

/// Maybe spawn one enemy above the playfield.  Stage multipliers are baked in
/// at creation.
pub fn maybe_spawn(
    config: &StageConfig,
    dt: f32,
    field: &Playfield,
    rng: &mut dyn RandomSource,
) -> Option<Enemy> {
    if !rng.chance(spawn_chance(dt, config.spawn_interval_ms)) {
        return None;
    }
    let x = rng.range(SPAWN_MARGIN, (field.width - SPAWN_MARGIN).max(SPAWN_MARGIN));
    let kind = roll_kind(config, rng);
    let enemy = Enemy::spawn(kind, Vec2::new(x, SPAWN_Y), rng)
        .scaled(config.enemy_health_mult, config.enemy_speed_mult);
    Some(enemy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chance_scales_with_dt() {
        assert_eq!(spawn_chance(0.0, 2000.0), 0.0);
        assert!((spawn_chance(100.0, 2000.0) - 0.05).abs() < 1e-9);
        assert_eq!(spawn_chance(1e9, 2000.0), 1.0);
    }
}
