/// Drawing contract between the simulation and whatever paints it.
///
/// Entities describe themselves as a `Sprite` at a playfield position; the
/// surface decides what that looks like.  Nothing here can reach back into
/// the simulation.

use glam::Vec2;

use crate::boss::BossKind;
use crate::effects::EffectKind;
use crate::entities::{BulletOwner, EnemyKind};
use crate::stage::Theme;

#[derive(Clone, Debug, PartialEq)]
pub enum Sprite<'a> {
    Player {
        tier: u32,
        shielded: bool,
        flashing: bool,
    },
    Enemy {
        kind: EnemyKind,
        health_ratio: f32,
    },
    Boss {
        kind: BossKind,
        phase: u8,
        health_ratio: f32,
    },
    Bullet {
        owner: BulletOwner,
    },
    Powerup {
        kind: EffectKind,
    },
    Particle {
        life: f32,
    },
    Explosion {
        radius: f32,
        life: f32,
    },
    Text {
        text: &'a str,
        life: f32,
    },
}

pub trait Surface {
    /// Called once per frame before any sprite.
    fn begin(&mut self, _theme: Theme, _shake: f32) {}

    fn draw(&mut self, at: Vec2, sprite: Sprite<'_>);
}

/// Records draw calls; handy for tests and headless runs.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub calls: Vec<(Vec2, String)>,
}

impl Surface for RecordingSurface {
    fn draw(&mut self, at: Vec2, sprite: Sprite<'_>) {
        let tag = match sprite {
            Sprite::Player { .. } => "player",
            Sprite::Enemy { .. } => "enemy",
            Sprite::Boss { .. } => "boss",
            Sprite::Bullet { .. } => "bullet",
            Sprite::Powerup { .. } => "powerup",
            Sprite::Particle { .. } => "particle",
            Sprite::Explosion { .. } => "explosion",
            Sprite::Text { .. } => "text",
        };
        self.calls.push((at, tag.to_string()));
    }
}

impl RecordingSurface {
    pub fn count(&self, tag: &str) -> usize {
        self.calls.iter().filter(|(_, t)| t == tag).count()
    }
}
