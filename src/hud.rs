/// Read-only HUD snapshots pushed to the presentation layer once per frame.

use serde::Serialize;

use crate::boss::BossKind;
use crate::compute::GameStatus;
use crate::effects::EffectKind;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActiveEffectView {
    pub kind: EffectKind,
    /// Whole seconds left, rounded up.
    pub seconds_left: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BossBar {
    pub kind: BossKind,
    pub name: &'static str,
    pub health: u32,
    pub max_health: u32,
    pub phase: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub status: GameStatus,
    pub score: u32,
    pub level: u32,
    pub exp: u32,
    pub max_exp: u32,
    pub health: u32,
    pub max_health: u32,
    pub stage: u32,
    pub stage_name: &'static str,
    pub stage_kills: u32,
    pub required_kills: u32,
    pub weapon_tier: u32,
    pub fire_held_ms: f32,
    /// Milliseconds of holding left until the next tier, if there is one.
    pub next_tier_in_ms: Option<f32>,
    pub effects: Vec<ActiveEffectView>,
    pub boss: Option<BossBar>,
    pub enemies_defeated: u32,
}

pub trait HudSink {
    fn push(&mut self, snapshot: &HudSnapshot);
}

/// Keeps every snapshot; mostly for tests.
impl HudSink for Vec<HudSnapshot> {
    fn push(&mut self, snapshot: &HudSnapshot) {
        Vec::push(self, snapshot.clone());
    }
}

/// Drops snapshots on the floor.
pub struct NoHud;

impl HudSink for NoHud {
    fn push(&mut self, _snapshot: &HudSnapshot) {}
}
