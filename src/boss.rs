/// Bosses: spawn rule, movement, phases, attacks and special abilities.
///
/// A boss flies in from above the playfield, settles at `ENTRY_Y` and sweeps
/// side to side.  Two independent timers drive it: a fixed-cadence twin shot
/// and a slower ability roll that, on success, fires exactly one ability
/// picked uniformly from the boss kind's list.  Dropping to half health flips
/// it into phase 2 for good (faster sweep, shorter timers).

use std::f32::consts::PI;

use glam::Vec2;
use serde::Serialize;

use crate::entities::{secs, Bullet, BulletOwner, Entity, Playfield};
use crate::render::{Sprite, Surface};
use crate::rng::RandomSource;
use crate::stage::{is_boss_stage, StageConfig, StageTracker};

pub const ENTRY_Y: f32 = 100.0;
const SPAWN_Y: f32 = -100.0;
const EDGE_MARGIN: f32 = 60.0;
const DESCENT_SPEED: f32 = 60.0;
const SWEEP_SPEED: f32 = 120.0;
const BASE_RADIUS: f32 = 50.0;
pub const HEALTH_PER_STAGE: u32 = 50;
pub const PHASE_TWO_SPEEDUP: f32 = 1.5;

const ATTACK_INTERVAL_MS: [f32; 2] = [1_200.0, 800.0];
const ABILITY_INTERVAL_MS: [f32; 2] = [4_000.0, 2_500.0];
const ABILITY_CHANCE: f64 = 0.6;
const BOSS_BULLET_SPEED: f32 = 360.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BossKind {
    Scout,
    Guard,
    Tank,
    Battleship,
    Fire,
    Mothership,
    Void,
    Energy,
    Time,
    Ultimate,
}

struct Profile {
    base_health: u32,
    speed_mult: f32,
    size_mult: f32,
    name: &'static str,
}

impl BossKind {
    fn profile(self) -> Profile {
        let (base_health, speed_mult, size_mult, name) = match self {
            BossKind::Scout => (150, 1.2, 0.9, "Recon Mech"),
            BossKind::Guard => (200, 1.0, 1.0, "Forest Warden"),
            BossKind::Tank => (300, 0.8, 1.3, "Dune Crawler"),
            BossKind::Battleship => (350, 0.9, 1.4, "Tidebreaker"),
            BossKind::Fire => (400, 1.1, 1.2, "Magma Behemoth"),
            BossKind::Mothership => (500, 0.7, 1.5, "Star Carrier"),
            BossKind::Void => (600, 1.3, 1.1, "Void Lord"),
            BossKind::Energy => (700, 1.4, 1.2, "Energy Core"),
            BossKind::Time => (800, 1.5, 1.3, "Chrono Sentinel"),
            BossKind::Ultimate => (1000, 1.2, 1.6, "Dimension King"),
        };
        Profile {
            base_health,
            speed_mult,
            size_mult,
            name,
        }
    }

    pub fn name(self) -> &'static str {
        self.profile().name
    }

    pub fn base_health(self) -> u32 {
        self.profile().base_health
    }

    pub fn abilities(self) -> &'static [Ability] {
        use Ability::*;
        match self {
            BossKind::Scout => &[QuickShot, Teleport],
            BossKind::Guard => &[Shield, ForestStrike],
            BossKind::Tank => &[HeavyShot, ArmorBoost],
            BossKind::Battleship => &[Torpedo, WaterBlast],
            BossKind::Fire => &[FireRain, VolcanoEruption],
            BossKind::Mothership => &[LaserBeam, DroneSwarm],
            BossKind::Void => &[VoidPortal, Darkness],
            BossKind::Energy => &[EnergyBurst, ElectricStorm],
            BossKind::Time => &[TimeSlow, TemporalStrike],
            BossKind::Ultimate => &[DimensionRift, UltimateBlast, RealityWarp],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Ability {
    QuickShot,
    Teleport,
    Shield,
    ForestStrike,
    HeavyShot,
    ArmorBoost,
    Torpedo,
    WaterBlast,
    FireRain,
    VolcanoEruption,
    LaserBeam,
    DroneSwarm,
    VoidPortal,
    Darkness,
    EnergyBurst,
    ElectricStorm,
    TimeSlow,
    TemporalStrike,
    DimensionRift,
    UltimateBlast,
    RealityWarp,
}

/// Projectile layout of an ability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pattern {
    /// Straight at the player, `count` shots in a tight cone.
    Aimed { count: u32, speed: f32 },
    /// Downward fan over `arc` radians.
    Fan { count: u32, arc: f32, speed: f32 },
    /// Evenly spaced all around the boss.
    Ring { count: u32, speed: f32 },
    /// A line of shots across the hull, falling straight down.
    Rain { count: u32, speed: f32 },
    /// Shots stacked on the centre line.
    Column { count: u32, speed: f32 },
    /// No projectiles (visual or movement only).
    Silent,
}

impl Ability {
    pub fn label(self) -> &'static str {
        match self {
            Ability::QuickShot => "QUICK SHOT",
            Ability::Teleport => "TELEPORT",
            Ability::Shield => "BARRIER",
            Ability::ForestStrike => "FOREST STRIKE",
            Ability::HeavyShot => "HEAVY SHOT",
            Ability::ArmorBoost => "ARMOR UP",
            Ability::Torpedo => "TORPEDO",
            Ability::WaterBlast => "WATER BLAST",
            Ability::FireRain => "FIRE RAIN",
            Ability::VolcanoEruption => "ERUPTION",
            Ability::LaserBeam => "LASER BEAM",
            Ability::DroneSwarm => "DRONE SWARM",
            Ability::VoidPortal => "VOID PORTAL",
            Ability::Darkness => "DARKNESS",
            Ability::EnergyBurst => "ENERGY BURST",
            Ability::ElectricStorm => "ELECTRIC STORM",
            Ability::TimeSlow => "TIME SLOW",
            Ability::TemporalStrike => "TEMPORAL STRIKE",
            Ability::DimensionRift => "DIMENSION RIFT",
            Ability::UltimateBlast => "ULTIMATE BLAST",
            Ability::RealityWarp => "REALITY WARP",
        }
    }

    pub fn pattern(self) -> Pattern {
        match self {
            Ability::QuickShot => Pattern::Aimed { count: 3, speed: 480.0 },
            Ability::HeavyShot => Pattern::Aimed { count: 1, speed: 240.0 },
            Ability::DroneSwarm => Pattern::Aimed { count: 4, speed: 300.0 },
            Ability::TemporalStrike => Pattern::Aimed { count: 3, speed: 420.0 },
            Ability::ForestStrike => Pattern::Fan { count: 5, arc: PI / 2.0, speed: 300.0 },
            Ability::WaterBlast => Pattern::Fan { count: 7, arc: PI * 2.0 / 3.0, speed: 300.0 },
            Ability::ElectricStorm => Pattern::Fan { count: 9, arc: PI * 0.75, speed: 360.0 },
            Ability::UltimateBlast => Pattern::Fan { count: 11, arc: PI * 0.8, speed: 360.0 },
            Ability::VolcanoEruption => Pattern::Ring { count: 12, speed: 240.0 },
            Ability::VoidPortal => Pattern::Ring { count: 8, speed: 240.0 },
            Ability::EnergyBurst => Pattern::Ring { count: 16, speed: 300.0 },
            Ability::DimensionRift => Pattern::Ring { count: 20, speed: 270.0 },
            Ability::Torpedo => Pattern::Rain { count: 2, speed: 180.0 },
            Ability::FireRain => Pattern::Rain { count: 8, speed: 300.0 },
            Ability::LaserBeam => Pattern::Column { count: 6, speed: 540.0 },
            Ability::Teleport
            | Ability::Shield
            | Ability::ArmorBoost
            | Ability::Darkness
            | Ability::TimeSlow
            | Ability::RealityWarp => Pattern::Silent,
        }
    }
}

fn boss_shot(pos: Vec2, vel: Vec2) -> Bullet {
    Bullet::new(BulletOwner::Boss, pos, vel)
}

/// Lay out the projectiles of `pattern` from a boss at `origin` with the
/// given hull radius, aiming at `target` where relevant.
pub fn emit(pattern: Pattern, origin: Vec2, hull: f32, target: Vec2) -> Vec<Bullet> {
    match pattern {
        Pattern::Aimed { count, speed } => {
            let dir = (target - origin).normalize_or(Vec2::Y);
            let base = dir.y.atan2(dir.x);
            let mid = (count as f32 - 1.0) / 2.0;
            (0..count)
                .map(|i| {
                    let a = base + (i as f32 - mid) * 0.12;
                    boss_shot(origin, Vec2::new(a.cos(), a.sin()) * speed)
                })
                .collect()
        }
        Pattern::Fan { count, arc, speed } => {
            let step = if count > 1 { arc / (count - 1) as f32 } else { 0.0 };
            let start = PI / 2.0 - arc / 2.0;
            (0..count)
                .map(|i| {
                    let a = start + step * i as f32;
                    boss_shot(origin, Vec2::new(a.cos(), a.sin()) * speed)
                })
                .collect()
        }
        Pattern::Ring { count, speed } => (0..count)
            .map(|i| {
                let a = 2.0 * PI * i as f32 / count.max(1) as f32;
                boss_shot(origin, Vec2::new(a.cos(), a.sin()) * speed)
            })
            .collect(),
        Pattern::Rain { count, speed } => {
            let span = hull * 2.0;
            let step = if count > 1 { span / (count - 1) as f32 } else { 0.0 };
            (0..count)
                .map(|i| {
                    let x = origin.x - hull + step * i as f32;
                    boss_shot(Vec2::new(x, origin.y + hull * 0.5), Vec2::new(0.0, speed))
                })
                .collect()
        }
        Pattern::Column { count, speed } => (0..count)
            .map(|i| {
                boss_shot(
                    Vec2::new(origin.x, origin.y + hull * 0.5 + 15.0 * i as f32),
                    Vec2::new(0.0, speed),
                )
            })
            .collect(),
        Pattern::Silent => Vec::new(),
    }
}

/// Spawn when a boss stage's quota is met, or unconditionally once the run
/// has lasted `fallback_ms`.  Never while a boss is up.
pub fn should_spawn(
    stage: &StageTracker,
    boss_active: bool,
    game_time_ms: f32,
    fallback_ms: f32,
) -> bool {
    if boss_active {
        return false;
    }
    (is_boss_stage(stage.stage()) && stage.quota_met()) || game_time_ms > fallback_ms
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    Damaged,
    PhaseChanged,
    Defeated,
    /// Already down; the hit did nothing.
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct BossActions {
    pub bullets: Vec<Bullet>,
    pub ability: Option<Ability>,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub kind: BossKind,
    pub stage: u32,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub speed_mult: f32,
    pub radius: f32,
    pub phase: u8,
    direction: f32,
    attack_timer_ms: f32,
    ability_timer_ms: f32,
    defeated: bool,
}

impl Boss {
    pub fn new(kind: BossKind, stage: u32, field: &Playfield) -> Self {
        let profile = kind.profile();
        let max_health = profile.base_health + stage.saturating_sub(1) * HEALTH_PER_STAGE;
        Self {
            kind,
            stage,
            pos: Vec2::new(field.width / 2.0, SPAWN_Y),
            health: max_health,
            max_health,
            speed_mult: profile.speed_mult,
            radius: BASE_RADIUS * profile.size_mult,
            phase: 1,
            direction: 1.0,
            attack_timer_ms: 0.0,
            ability_timer_ms: 0.0,
            defeated: false,
        }
    }

    /// The boss a stage calls for.
    pub fn for_stage(config: &StageConfig, field: &Playfield) -> Self {
        Self::new(config.boss, config.number, field)
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub fn on_station(&self) -> bool {
        self.pos.y >= ENTRY_Y
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }

    /// Apply damage.  Defeat is reported once; later hits are ignored.
    pub fn take_hit(&mut self, damage: u32) -> HitOutcome {
        if self.defeated {
            return HitOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(damage);
        if self.health == 0 {
            self.defeated = true;
            return HitOutcome::Defeated;
        }
        if self.phase == 1 && self.health * 2 <= self.max_health {
            self.phase = 2;
            self.speed_mult *= PHASE_TWO_SPEEDUP;
            return HitOutcome::PhaseChanged;
        }
        HitOutcome::Damaged
    }

    /// Run the attack and ability timers.
    pub fn update_attacks(
        &mut self,
        dt: f32,
        target: Vec2,
        field: &Playfield,
        rng: &mut dyn RandomSource,
    ) -> BossActions {
        let mut out = BossActions::default();
        if self.defeated {
            return out;
        }
        let dt = dt.max(0.0);
        let phase = (self.phase.clamp(1, 2) - 1) as usize;

        self.attack_timer_ms += dt;
        if self.attack_timer_ms >= ATTACK_INTERVAL_MS[phase] {
            self.attack_timer_ms = 0.0;
            for dx in [-20.0, 20.0] {
                out.bullets.push(boss_shot(
                    self.pos + Vec2::new(dx, 40.0),
                    Vec2::new(0.0, BOSS_BULLET_SPEED),
                ));
            }
        }

        self.ability_timer_ms += dt;
        if self.ability_timer_ms >= ABILITY_INTERVAL_MS[phase] {
            self.ability_timer_ms = 0.0;
            if rng.chance(ABILITY_CHANCE) {
                let abilities = self.kind.abilities();
                let ability = abilities[rng.pick_index(abilities.len())];
                if ability == Ability::Teleport {
                    self.pos.x = rng.range(EDGE_MARGIN, (field.width - EDGE_MARGIN).max(EDGE_MARGIN));
                }
                out.bullets
                    .extend(emit(ability.pattern(), self.pos, self.radius, target));
                out.ability = Some(ability);
            }
        }
        out
    }
}

impl Entity for Boss {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, dt: f32, field: &Playfield) {
        let dt_s = secs(dt);
        if self.pos.y < ENTRY_Y {
            self.pos.y = (self.pos.y + DESCENT_SPEED * self.speed_mult * dt_s).min(ENTRY_Y);
            return;
        }
        let left = EDGE_MARGIN;
        let right = (field.width - EDGE_MARGIN).max(left);
        self.pos.x += self.direction * SWEEP_SPEED * self.speed_mult * dt_s;
        if self.pos.x <= left {
            self.pos.x = left;
            self.direction = 1.0;
        } else if self.pos.x >= right {
            self.pos.x = right;
            self.direction = -1.0;
        }
    }

    fn is_alive(&self) -> bool {
        !self.defeated
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(
            self.pos,
            Sprite::Boss {
                kind: self.kind,
                phase: self.phase,
                health_ratio: self.health_ratio(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_evenly_spaced() {
        let shots = emit(Pattern::Ring { count: 4, speed: 100.0 }, Vec2::ZERO, 50.0, Vec2::Y);
        assert_eq!(shots.len(), 4);
        assert!((shots[0].vel - Vec2::new(100.0, 0.0)).length() < 1e-3);
        assert!((shots[1].vel - Vec2::new(0.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn fan_points_downward() {
        let shots = emit(
            Pattern::Fan { count: 5, arc: PI / 2.0, speed: 100.0 },
            Vec2::ZERO,
            50.0,
            Vec2::Y,
        );
        assert!(shots.iter().all(|b| b.vel.y > 0.0));
    }

    #[test]
    fn every_kind_has_abilities() {
        for kind in [
            BossKind::Scout,
            BossKind::Guard,
            BossKind::Tank,
            BossKind::Battleship,
            BossKind::Fire,
            BossKind::Mothership,
            BossKind::Void,
            BossKind::Energy,
            BossKind::Time,
            BossKind::Ultimate,
        ] {
            assert!(!kind.abilities().is_empty());
        }
    }
}
