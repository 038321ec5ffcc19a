/// The ten stages and the tracker that walks through them.
///
/// Stage numbers only ever go up by one.  A stage ends when its kill quota is
/// met or its clock runs out; the last stage has no quota and never ends on
/// its own, it is closed by the final boss.

use serde::Serialize;

use crate::boss::BossKind;

pub const FIRST_STAGE: u32 = 1;
pub const FINAL_STAGE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Theme {
    Classic,
    Forest,
    Desert,
    Ocean,
    Volcano,
    Space,
    Abyss,
    Energy,
    Time,
    Ultimate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StageConfig {
    pub number: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub theme: Theme,
    pub required_kills: u32,
    pub spawn_interval_ms: f32,
    pub enemy_health_mult: f32,
    pub enemy_speed_mult: f32,
    pub special_chance: f64,
    pub boss: BossKind,
}

pub static STAGES: [StageConfig; 10] = [
    StageConfig {
        number: 1,
        name: "Stage 1 - Recon Squadron",
        description: "Basic combat drills",
        theme: Theme::Classic,
        required_kills: 10,
        spawn_interval_ms: 2000.0,
        enemy_health_mult: 1.0,
        enemy_speed_mult: 1.0,
        special_chance: 0.1,
        boss: BossKind::Scout,
    },
    StageConfig {
        number: 2,
        name: "Stage 2 - Light Escort",
        description: "Over the forest canopy",
        theme: Theme::Forest,
        required_kills: 15,
        spawn_interval_ms: 1800.0,
        enemy_health_mult: 1.2,
        enemy_speed_mult: 1.1,
        special_chance: 0.2,
        boss: BossKind::Guard,
    },
    StageConfig {
        number: 3,
        name: "Stage 3 - Strike Wing",
        description: "Desert storm",
        theme: Theme::Desert,
        required_kills: 20,
        spawn_interval_ms: 1500.0,
        enemy_health_mult: 1.5,
        enemy_speed_mult: 1.2,
        special_chance: 0.3,
        boss: BossKind::Tank,
    },
    StageConfig {
        number: 4,
        name: "Stage 4 - Heavy Division",
        description: "Assault on the sea fortress",
        theme: Theme::Ocean,
        required_kills: 25,
        spawn_interval_ms: 1200.0,
        enemy_health_mult: 2.0,
        enemy_speed_mult: 1.3,
        special_chance: 0.4,
        boss: BossKind::Battleship,
    },
    StageConfig {
        number: 5,
        name: "Stage 5 - Elite Fleet",
        description: "Crater firefight",
        theme: Theme::Volcano,
        required_kills: 30,
        spawn_interval_ms: 1000.0,
        enemy_health_mult: 2.5,
        enemy_speed_mult: 1.4,
        special_chance: 0.5,
        boss: BossKind::Fire,
    },
    StageConfig {
        number: 6,
        name: "Stage 6 - Mothership Raid",
        description: "Showdown in orbit",
        theme: Theme::Space,
        required_kills: 35,
        spawn_interval_ms: 800.0,
        enemy_health_mult: 3.0,
        enemy_speed_mult: 1.5,
        special_chance: 0.6,
        boss: BossKind::Mothership,
    },
    StageConfig {
        number: 7,
        name: "Stage 7 - Deep Abyss",
        description: "Into the void",
        theme: Theme::Abyss,
        required_kills: 40,
        spawn_interval_ms: 700.0,
        enemy_health_mult: 3.5,
        enemy_speed_mult: 1.6,
        special_chance: 0.7,
        boss: BossKind::Void,
    },
    StageConfig {
        number: 8,
        name: "Stage 8 - Energy Storm",
        description: "Inside the storm front",
        theme: Theme::Energy,
        required_kills: 45,
        spawn_interval_ms: 600.0,
        enemy_health_mult: 4.0,
        enemy_speed_mult: 1.7,
        special_chance: 0.8,
        boss: BossKind::Energy,
    },
    StageConfig {
        number: 9,
        name: "Stage 9 - Time Rift",
        description: "A battlefield bent out of shape",
        theme: Theme::Time,
        required_kills: 50,
        spawn_interval_ms: 500.0,
        enemy_health_mult: 4.5,
        enemy_speed_mult: 1.8,
        special_chance: 0.9,
        boss: BossKind::Time,
    },
    StageConfig {
        number: 10,
        name: "Stage 10 - Final Dimension",
        description: "The last stand",
        theme: Theme::Ultimate,
        required_kills: 0,
        spawn_interval_ms: 400.0,
        enemy_health_mult: 5.0,
        enemy_speed_mult: 2.0,
        special_chance: 1.0,
        boss: BossKind::Ultimate,
    },
];

/// Config for a stage number.  Anything outside 1..=10 resolves to the
/// terminal stage.
pub fn config_for(stage: u32) -> &'static StageConfig {
    match stage {
        FIRST_STAGE..=FINAL_STAGE => &STAGES[(stage - 1) as usize],
        _ => &STAGES[(FINAL_STAGE - 1) as usize],
    }
}

/// Stages that end in a boss once their quota is met.
pub fn is_boss_stage(stage: u32) -> bool {
    stage % 3 == 0 || stage == FINAL_STAGE
}

#[derive(Clone, Debug)]
pub struct StageTracker {
    stage: u32,
    kills: u32,
    clock_ms: f32,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self {
            stage: FIRST_STAGE,
            kills: 0,
            clock_ms: 0.0,
        }
    }
}

impl StageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn clock_ms(&self) -> f32 {
        self.clock_ms
    }

    pub fn config(&self) -> &'static StageConfig {
        config_for(self.stage)
    }

    pub fn is_final(&self) -> bool {
        self.stage >= FINAL_STAGE
    }

    pub fn quota_met(&self) -> bool {
        self.kills >= self.config().required_kills
    }

    pub fn record_kill(&mut self) {
        self.kills = self.kills.saturating_add(1);
    }

    /// Run the stage clock and advance if the stage is over.  Returns the new
    /// stage number when an advance happened.
    pub fn update(&mut self, dt: f32, stage_duration_ms: f32) -> Option<u32> {
        self.clock_ms += dt.max(0.0);
        if self.is_final() {
            return None;
        }
        if self.quota_met() || self.clock_ms >= stage_duration_ms {
            self.stage += 1;
            self.kills = 0;
            self.clock_ms = 0.0;
            return Some(self.stage);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_and_complete() {
        for (i, cfg) in STAGES.iter().enumerate() {
            assert_eq!(cfg.number, i as u32 + 1);
        }
        assert_eq!(config_for(0).number, FINAL_STAGE);
        assert_eq!(config_for(42).number, FINAL_STAGE);
    }

    #[test]
    fn boss_stages() {
        let bosses: Vec<u32> = (1..=10).filter(|&s| is_boss_stage(s)).collect();
        assert_eq!(bosses, vec![3, 6, 9, 10]);
    }
}
