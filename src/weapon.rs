/// Fire-hold weapon escalation.
///
/// The longer fire is held, the higher the weapon tier.  Hold time is an
/// explicit timer fed by the frame `dt`, never by reading a clock, so the
/// controller behaves identically under tests and under real time.

use glam::Vec2;

use crate::entities::{Bullet, BulletOwner};

pub const MAX_TIER: u32 = 4;

/// Hold duration (ms) at which tiers 2, 3 and 4 unlock.
pub const TIER_THRESHOLDS_MS: [f32; 3] = [3_000.0, 5_000.0, 10_000.0];

/// Cadence never drops below this, whatever the modifiers.
pub const MIN_SHOT_INTERVAL_MS: f32 = 50.0;

/// Tier reached after holding fire for `held_ms`.
pub fn tier_for(held_ms: f32) -> u32 {
    1 + TIER_THRESHOLDS_MS
        .iter()
        .filter(|&&threshold| held_ms >= threshold)
        .count() as u32
}

/// Base interval between volleys for a tier.
pub fn shot_interval_ms(tier: u32) -> f32 {
    match tier {
        0 | 1 => 150.0,
        2 => 120.0,
        3 => 80.0,
        _ => 50.0,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeaponUpdate {
    /// A volley should be spawned this tick.
    pub fire: bool,
    /// Tier increased this tick (edge-triggered).
    pub tier_up: Option<u32>,
    /// Fire was released: (tier reached, ms held).
    pub released: Option<(u32, f32)>,
}

#[derive(Clone, Debug)]
pub struct WeaponController {
    held: bool,
    held_ms: f32,
    tier: u32,
    since_shot_ms: f32,
}

impl Default for WeaponController {
    fn default() -> Self {
        Self {
            held: false,
            held_ms: 0.0,
            tier: 1,
            since_shot_ms: 0.0,
        }
    }
}

impl WeaponController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(&self) -> u32 {
        self.tier
    }

    pub fn held_ms(&self) -> f32 {
        self.held_ms
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Hold time still needed for the next tier, `None` at max tier or when
    /// fire is not held.
    pub fn next_tier_in_ms(&self) -> Option<f32> {
        if !self.held || self.tier >= MAX_TIER {
            return None;
        }
        let threshold = TIER_THRESHOLDS_MS[(self.tier - 1) as usize];
        Some((threshold - self.held_ms).max(0.0))
    }

    /// Advance by one frame.  `cooldown_factor` scales the tier cadence
    /// (firepower effect, level bonuses).
    pub fn update(&mut self, fire_held: bool, dt: f32, cooldown_factor: f32) -> WeaponUpdate {
        let dt = dt.max(0.0);
        let mut out = WeaponUpdate::default();

        match (fire_held, self.held) {
            (true, false) => {
                self.held = true;
                self.held_ms = 0.0;
                self.tier = 1;
                self.since_shot_ms = 0.0;
                out.fire = true;
            }
            (true, true) => {
                self.held_ms += dt;
                let reached = tier_for(self.held_ms);
                if reached > self.tier {
                    self.tier = reached;
                    out.tier_up = Some(reached);
                    tracing::debug!(tier = reached, held_ms = self.held_ms, "weapon tier up");
                }
                self.since_shot_ms += dt;
                let interval =
                    (shot_interval_ms(self.tier) * cooldown_factor).max(MIN_SHOT_INTERVAL_MS);
                // One volley per tick at most, however long the frame was.
                if self.since_shot_ms >= interval {
                    self.since_shot_ms = 0.0;
                    out.fire = true;
                }
            }
            (false, true) => {
                out.released = Some((self.tier, self.held_ms));
                self.reset();
            }
            (false, false) => {}
        }
        out
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

const NOSE_OFFSET: f32 = 20.0;

fn shot(origin: Vec2, dx: f32, dy: f32, vx: f32, vy: f32) -> Bullet {
    Bullet::new(
        BulletOwner::Player,
        origin + Vec2::new(dx, dy),
        Vec2::new(vx, vy),
    )
}

/// Projectiles for one volley fired from `craft` (the player's centre).
/// `extra` adds straight shots outside the tier's pattern.
pub fn volley(tier: u32, craft: Vec2, extra: u32) -> Vec<Bullet> {
    let origin = craft - Vec2::new(0.0, NOSE_OFFSET);
    let mut shots = Vec::new();
    let mut outer = 0.0_f32;

    match tier {
        0 | 1 => shots.push(shot(origin, 0.0, 0.0, 0.0, -480.0)),
        2 => {
            for i in -1..=1 {
                shots.push(shot(origin, i as f32 * 20.0, 0.0, 0.0, -480.0));
            }
            outer = 20.0;
        }
        3 => {
            for i in -2..=2 {
                shots.push(shot(origin, i as f32 * 15.0, 0.0, 0.0, -480.0));
            }
            outer = 30.0;
        }
        _ => {
            // Straight.
            for i in -3..=3 {
                shots.push(shot(origin, i as f32 * 12.0, 0.0, 0.0, -480.0));
            }
            // Angled up.
            for i in -2..=2 {
                let i = i as f32;
                shots.push(shot(origin, i * 20.0, 0.0, i * 120.0, -360.0));
            }
            // Angled down (shallower, from further back).
            for i in -1..=1 {
                let i = i as f32;
                shots.push(shot(origin, i * 25.0, 10.0, i * 180.0, -300.0));
            }
            // Lateral.
            shots.push(shot(origin, -35.0, 0.0, -240.0, -240.0));
            shots.push(shot(origin, 35.0, 0.0, 240.0, -240.0));
            shots.push(shot(origin, -25.0, 15.0, -180.0, -180.0));
            shots.push(shot(origin, 25.0, 15.0, 180.0, -180.0));
            outer = 36.0;
        }
    }

    for k in 0..extra {
        let step = 12.0 * (k / 2 + 1) as f32;
        let dx = if k % 2 == 0 { outer + step } else { -(outer + step) };
        shots.push(shot(origin, dx, 0.0, 0.0, -480.0));
    }
    shots
}
