/// Simulated objects and the contract they share.
///
/// Every variant is plain data plus an `Entity` impl.  Entities never point
/// at each other; anything that touches two of them (hits, pickups) goes
/// through `collision`.  Speeds are in playfield units per second and every
/// `update` scales by the frame's `dt` (milliseconds).

use glam::Vec2;
use serde::Serialize;

use crate::effects::EffectKind;
use crate::render::{Sprite, Surface};
use crate::rng::RandomSource;

/// Milliseconds to seconds.
#[inline]
pub fn secs(dt_ms: f32) -> f32 {
    dt_ms.max(0.0) / 1000.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True once `pos` is further than `margin` outside any edge.
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

pub trait Entity {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f32;
    fn update(&mut self, dt: f32, field: &Playfield);
    fn is_alive(&self) -> bool;
    fn render(&self, surface: &mut dyn Surface);
}

pub fn update_all<E: Entity>(items: &mut [E], dt: f32, field: &Playfield) {
    for item in items.iter_mut().filter(|e| e.is_alive()) {
        item.update(dt, field);
    }
}

/// Drop everything that died this tick.
pub fn prune<E: Entity>(items: &mut Vec<E>) {
    items.retain(|e| e.is_alive());
}

pub fn render_all<E: Entity>(items: &[E], surface: &mut dyn Surface) {
    for item in items.iter().filter(|e| e.is_alive()) {
        item.render(surface);
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_BASE_SPEED: f32 = 300.0;
pub const PLAYER_BASE_MAX_HEALTH: u32 = 100;
pub const PLAYER_BASE_RADIUS: f32 = 20.0;
pub const MAX_PLAYER_TIER: u32 = 10;
const UPGRADE_GLOW_MS: f32 = 3_000.0;

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Craft tier 1..=10, follows the stage number.
    pub tier: u32,
    /// Movement speed before effect multipliers.
    pub speed: f32,
    pub radius: f32,
    /// Max-health granted by level-up bonuses, kept across tier changes.
    pub bonus_max_health: u32,
    /// Mirrors the shield effect so rendering stays self-contained.
    pub shielded: bool,
    pub effect_flash_ms: f32,
    pub upgrade_glow_ms: f32,
}

impl Player {
    pub fn new(field: &Playfield) -> Self {
        Self {
            pos: Vec2::new(field.width / 2.0, field.height - 100.0),
            health: PLAYER_BASE_MAX_HEALTH,
            max_health: PLAYER_BASE_MAX_HEALTH,
            tier: 1,
            speed: PLAYER_BASE_SPEED,
            radius: PLAYER_BASE_RADIUS,
            bonus_max_health: 0,
            shielded: false,
            effect_flash_ms: 0.0,
            upgrade_glow_ms: 0.0,
        }
    }

    /// Re-derive stats for a craft tier.  Each tier adds 10%; size and speed
    /// are capped, and the current health fraction is preserved.
    pub fn set_tier(&mut self, tier: u32) {
        let tier = tier.clamp(1, MAX_PLAYER_TIER);
        let factor = 1.0 + (tier - 1) as f32 * 0.1;
        let ratio = if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        };

        self.tier = tier;
        self.speed = PLAYER_BASE_SPEED * factor.min(1.8);
        self.radius = PLAYER_BASE_RADIUS * factor.min(1.3);
        self.max_health = (PLAYER_BASE_MAX_HEALTH as f32 * factor).round() as u32
            + self.bonus_max_health;
        self.health = ((self.max_health as f32 * ratio).round() as u32).min(self.max_health);
        self.upgrade_glow_ms = UPGRADE_GLOW_MS;
    }

    /// Apply damage; health saturates at zero.  Returns the new health.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }

    /// Restore health up to the cap.  A downed craft stays down.
    pub fn heal(&mut self, amount: u32) {
        if self.is_alive() {
            self.health = self.health.saturating_add(amount).min(self.max_health);
        }
    }

    /// Permanent max-health bonus; also refills health unless the craft is
    /// already down.
    pub fn grant_max_health(&mut self, amount: u32) {
        self.bonus_max_health += amount;
        self.max_health += amount;
        if self.is_alive() {
            self.health = self.max_health;
        }
    }

    pub fn flash(&mut self, duration_ms: f32) {
        self.effect_flash_ms = duration_ms;
    }

    /// Move along the input axis, staying inside the playfield.
    pub fn steer(&mut self, axis: (f32, f32), speed_multiplier: f32, dt: f32, field: &Playfield) {
        let step = self.speed * speed_multiplier * secs(dt);
        self.pos.x += axis.0 * step;
        self.pos.y += axis.1 * step;
        let r = self.radius;
        self.pos.x = self.pos.x.clamp(r, (field.width - r).max(r));
        self.pos.y = self.pos.y.clamp(r * 1.5, (field.height - r * 1.5).max(r * 1.5));
    }
}

impl Entity for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, dt: f32, _field: &Playfield) {
        self.effect_flash_ms = (self.effect_flash_ms - dt).max(0.0);
        self.upgrade_glow_ms = (self.upgrade_glow_ms - dt).max(0.0);
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(
            self.pos,
            Sprite::Player {
                tier: self.tier,
                shielded: self.shielded,
                flashing: self.effect_flash_ms > 0.0 || self.upgrade_glow_ms > 0.0,
            },
        );
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EnemyKind {
    Normal,
    Fighter,
    Scout,
    Bomber,
    Interceptor,
    BossLite,
}

impl EnemyKind {
    /// Kinds drawn when a stage rolls a special enemy.
    pub const SPECIAL: [EnemyKind; 5] = [
        EnemyKind::Fighter,
        EnemyKind::Scout,
        EnemyKind::Bomber,
        EnemyKind::Interceptor,
        EnemyKind::BossLite,
    ];

    fn base_health(self) -> u32 {
        match self {
            EnemyKind::BossLite => 5,
            _ => 1,
        }
    }

    fn base_speed(self) -> f32 {
        match self {
            EnemyKind::BossLite => 60.0,
            _ => 120.0,
        }
    }

    fn base_radius(self) -> f32 {
        match self {
            EnemyKind::BossLite => 30.0,
            _ => 15.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovePattern {
    Straight,
    Zigzag,
}

const ZIGZAG_CHANCE: f64 = 0.3;
const ZIGZAG_SWAY: f32 = 120.0;

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    pub radius: f32,
    pub pattern: MovePattern,
    move_timer: f32,
    alive: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, pattern: MovePattern) -> Self {
        let health = kind.base_health();
        Self {
            kind,
            pos,
            health,
            max_health: health,
            speed: kind.base_speed(),
            radius: kind.base_radius(),
            pattern,
            move_timer: 0.0,
            alive: true,
        }
    }

    /// Roll a movement pattern for a freshly spawned enemy.
    pub fn spawn(kind: EnemyKind, pos: Vec2, rng: &mut dyn RandomSource) -> Self {
        let pattern = if rng.chance(ZIGZAG_CHANCE) {
            MovePattern::Zigzag
        } else {
            MovePattern::Straight
        };
        Self::new(kind, pos, pattern)
    }

    /// Apply stage multipliers.  Health never drops below 1.
    pub fn scaled(mut self, health_mult: f32, speed_mult: f32) -> Self {
        self.health = ((self.health as f32 * health_mult).floor() as u32).max(1);
        self.max_health = self.health;
        self.speed *= speed_mult;
        self
    }

    /// Take one hit.  Returns true if this hit destroyed it.
    pub fn hit(&mut self, damage: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(damage);
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Remove without credit (rammed the player, or flew off the bottom).
    pub fn destroy(&mut self) {
        self.alive = false;
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

impl Entity for Enemy {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, dt: f32, field: &Playfield) {
        let dt_s = secs(dt);
        self.move_timer += dt.max(0.0);
        if self.pattern == MovePattern::Zigzag {
            self.pos.x += (self.move_timer * 0.003).sin() * ZIGZAG_SWAY * dt_s;
        }
        self.pos.y += self.speed * dt_s;
        if self.pos.y > field.height + 50.0 {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(
            self.pos,
            Sprite::Enemy {
                kind: self.kind,
                health_ratio: self.health_ratio(),
            },
        );
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BulletOwner {
    Player,
    Enemy,
    Boss,
}

pub const BULLET_RADIUS: f32 = 3.0;
const BULLET_MARGIN: f32 = 10.0;

#[derive(Clone, Debug)]
pub struct Bullet {
    pub owner: BulletOwner,
    pub pos: Vec2,
    pub vel: Vec2,
    alive: bool,
}

impl Bullet {
    pub fn new(owner: BulletOwner, pos: Vec2, vel: Vec2) -> Self {
        Self {
            owner,
            pos,
            vel,
            alive: true,
        }
    }

    /// Spent on a hit.
    pub fn consume(&mut self) {
        self.alive = false;
    }
}

impl Entity for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        BULLET_RADIUS
    }

    fn update(&mut self, dt: f32, field: &Playfield) {
        self.pos += self.vel * secs(dt);
        if field.is_outside(self.pos, BULLET_MARGIN) {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(self.pos, Sprite::Bullet { owner: self.owner });
    }
}

// ── Powerups ──────────────────────────────────────────────────────────────────

pub const POWERUP_RADIUS: f32 = 15.0;
const POWERUP_SPEED: f32 = 120.0;

#[derive(Clone, Debug)]
pub struct Powerup {
    pub kind: EffectKind,
    pub pos: Vec2,
    alive: bool,
}

impl Powerup {
    pub fn new(kind: EffectKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            alive: true,
        }
    }

    pub fn random(pos: Vec2, rng: &mut dyn RandomSource) -> Self {
        let kind = EffectKind::ALL[rng.pick_index(EffectKind::ALL.len())];
        Self::new(kind, pos)
    }

    pub fn collect(&mut self) {
        self.alive = false;
    }
}

impl Entity for Powerup {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        POWERUP_RADIUS
    }

    fn update(&mut self, dt: f32, field: &Playfield) {
        self.pos.y += POWERUP_SPEED * secs(dt);
        if self.pos.y > field.height + 50.0 {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(self.pos, Sprite::Powerup { kind: self.kind });
    }
}

// ── Cosmetics ─────────────────────────────────────────────────────────────────

const PARTICLE_GRAVITY: f32 = 360.0;

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
}

impl Particle {
    pub fn burst(pos: Vec2, count: usize, rng: &mut dyn RandomSource) -> Vec<Particle> {
        (0..count)
            .map(|_| Particle {
                pos,
                vel: Vec2::new(rng.range(-120.0, 120.0), rng.range(-120.0, 120.0)),
                life: 1.0,
            })
            .collect()
    }
}

impl Entity for Particle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        0.0
    }

    fn update(&mut self, dt: f32, _field: &Playfield) {
        let dt_s = secs(dt);
        self.life -= dt.max(0.0) * 0.002;
        self.pos += self.vel * dt_s;
        self.vel.y += PARTICLE_GRAVITY * dt_s;
        self.vel *= 0.99_f32.powf(dt.max(0.0) / 16.0);
    }

    fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(self.pos, Sprite::Particle { life: self.life });
    }
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub pos: Vec2,
    pub max_radius: f32,
    pub radius: f32,
    pub life: f32,
}

impl Explosion {
    pub fn new(pos: Vec2, large: bool) -> Self {
        Self {
            pos,
            max_radius: if large { 80.0 } else { 40.0 },
            radius: 0.0,
            life: 1.0,
        }
    }
}

impl Entity for Explosion {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, dt: f32, _field: &Playfield) {
        self.life -= dt.max(0.0) * 0.003;
        // Grows over the first 30% of its life, then shrinks.
        self.radius = if self.life > 0.7 {
            self.max_radius * (1.0 - self.life) / 0.3
        } else {
            self.max_radius * (self.life.max(0.0) / 0.7)
        };
    }

    fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(
            self.pos,
            Sprite::Explosion {
                radius: self.radius,
                life: self.life,
            },
        );
    }
}

#[derive(Clone, Debug)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub life: f32,
    vy: f32,
}

impl FloatingText {
    pub fn new(pos: Vec2, text: impl Into<String>) -> Self {
        Self {
            pos,
            text: text.into(),
            life: 1.0,
            vy: -120.0,
        }
    }
}

impl Entity for FloatingText {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        0.0
    }

    fn update(&mut self, dt: f32, _field: &Playfield) {
        let dt_s = secs(dt);
        self.life -= dt.max(0.0) * 0.001;
        self.pos.y += self.vy * dt_s;
        self.vy -= 180.0 * dt_s;
    }

    fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(
            self.pos,
            Sprite::Text {
                text: &self.text,
                life: self.life,
            },
        );
    }
}
