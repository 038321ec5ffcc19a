/// Gameplay events raised during a tick.
///
/// The simulation queues these as it goes; the host drains them with
/// `Game::take_events` after each frame (announcements, logging, sound).

use serde::Serialize;

use crate::boss::{Ability, BossKind};
use crate::compute::GameStatus;
use crate::effects::EffectKind;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GameEvent {
    StatusChanged {
        from: GameStatus,
        to: GameStatus,
    },
    StageEntered {
        stage: u32,
    },
    WeaponTierUp {
        tier: u32,
    },
    /// Fire released after escalating past tier 1.
    WeaponReleased {
        tier: u32,
        held_ms: f32,
    },
    EnemyDestroyed {
        score: u32,
    },
    PowerupDropped {
        kind: EffectKind,
    },
    EffectApplied {
        kind: EffectKind,
    },
    EffectExpired {
        kind: EffectKind,
    },
    PlayerHit {
        damage: u32,
        health: u32,
    },
    HitAbsorbed,
    LevelUp {
        level: u32,
    },
    BossSpawned {
        kind: BossKind,
        stage: u32,
    },
    BossPhaseChanged {
        phase: u8,
    },
    BossAbility {
        ability: Ability,
    },
    BossDefeated {
        kind: BossKind,
    },
}
