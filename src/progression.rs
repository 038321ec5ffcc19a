/// Experience and pilot level.
///
/// Excess experience carries over into the next level and the threshold
/// grows by 20% (floored) each time.  A single large grant can cross several
/// thresholds; every one of them is reported.

pub const START_THRESHOLD: u32 = 100;
const THRESHOLD_GROWTH: f32 = 1.2;

/// Fixed rewards at specific levels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LevelBonus {
    /// Multiply the shot interval.
    CooldownReduction(f32),
    /// One more projectile per volley.
    ExtraProjectile,
    /// Raise max health and refill it.
    HealthBonus(u32),
}

/// The bonus unlocked on reaching `level`, if any.
pub fn bonus_for(level: u32) -> Option<LevelBonus> {
    match level {
        0 | 1 => None,
        2 => Some(LevelBonus::CooldownReduction(0.8)),
        3 => Some(LevelBonus::ExtraProjectile),
        _ => Some(LevelBonus::HealthBonus(20)),
    }
}

#[derive(Clone, Debug)]
pub struct Progression {
    level: u32,
    exp: u32,
    threshold: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            exp: 0,
            threshold: START_THRESHOLD,
        }
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Add experience.  Returns each level reached, in order.
    pub fn add_exp(&mut self, amount: u32) -> Vec<u32> {
        self.exp = self.exp.saturating_add(amount);
        let mut reached = Vec::new();
        while self.exp >= self.threshold {
            self.exp -= self.threshold;
            self.level += 1;
            self.threshold = ((self.threshold as f32 * THRESHOLD_GROWTH).floor() as u32)
                .max(self.threshold.saturating_add(1));
            reached.push(self.level);
        }
        reached
    }
}
