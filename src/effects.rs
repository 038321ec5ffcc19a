/// Time-limited gameplay modifiers.
///
/// Each effect kind owns exactly one modifier field.  Applying an inactive
/// kind switches its modifier on; applying an active kind only refreshes the
/// timer, so pickups never stack multiplicatively.  `tick` switches the
/// modifier back off exactly once, when the timer runs out.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EffectKind {
    Speed,
    Health,
    Weapon,
    Shield,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Speed,
        EffectKind::Health,
        EffectKind::Weapon,
        EffectKind::Shield,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Speed => "SPEED",
            EffectKind::Health => "HEAL",
            EffectKind::Weapon => "FIREPOWER",
            EffectKind::Shield => "SHIELD",
        }
    }
}

pub const SPEED_BOOST: f32 = 1.5;
pub const WEAPON_COOLDOWN_FACTOR: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modifiers {
    pub speed_multiplier: f32,
    pub shielded: bool,
    pub shot_cooldown_factor: f32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            shielded: false,
            shot_cooldown_factor: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Started,
    Refreshed,
}

#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    active: BTreeMap<EffectKind, f32>,
    modifiers: Modifiers,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, kind: EffectKind, duration_ms: f32) -> Applied {
        let duration_ms = duration_ms.max(0.0);
        if let Some(remaining) = self.active.get_mut(&kind) {
            *remaining = duration_ms;
            return Applied::Refreshed;
        }
        self.active.insert(kind, duration_ms);
        self.switch(kind, true);
        Applied::Started
    }

    /// Advance every timer by `dt` ms.  Returns the kinds that expired.
    pub fn tick(&mut self, dt: f32) -> Vec<EffectKind> {
        let dt = dt.max(0.0);
        let mut expired = Vec::new();
        for (kind, remaining) in self.active.iter_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                expired.push(*kind);
            }
        }
        for kind in &expired {
            self.active.remove(kind);
            self.switch(*kind, false);
            tracing::debug!(?kind, "effect expired");
        }
        expired
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.active.contains_key(&kind)
    }

    pub fn remaining(&self, kind: EffectKind) -> Option<f32> {
        self.active.get(&kind).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EffectKind, f32)> + '_ {
        self.active.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn switch(&mut self, kind: EffectKind, on: bool) {
        match kind {
            EffectKind::Speed => {
                self.modifiers.speed_multiplier = if on { SPEED_BOOST } else { 1.0 };
            }
            EffectKind::Shield => self.modifiers.shielded = on,
            EffectKind::Weapon => {
                self.modifiers.shot_cooldown_factor =
                    if on { WEAPON_COOLDOWN_FACTOR } else { 1.0 };
            }
            // Healing is instant; the entry only exists for the HUD.
            EffectKind::Health => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_expiry_at_exactly_zero() {
        let mut reg = EffectRegistry::new();
        reg.apply(EffectKind::Speed, 100.0);
        assert!(reg.tick(99.0).is_empty());
        assert_eq!(reg.tick(1.0), vec![EffectKind::Speed]);
        assert!(reg.is_empty());
    }

    #[test]
    fn negative_dt_does_not_extend() {
        let mut reg = EffectRegistry::new();
        reg.apply(EffectKind::Weapon, 100.0);
        reg.tick(-500.0);
        assert_eq!(reg.remaining(EffectKind::Weapon), Some(100.0));
    }
}
