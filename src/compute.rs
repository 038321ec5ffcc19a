/// The simulation context and its per-frame tick.
///
/// `Game` owns every entity collection and counter.  The host calls `frame`
/// once per display frame with the measured `dt` (ms), the current input, a
/// random source and a HUD sink; only the `Playing` state advances the
/// world.  All randomness comes through the injected source, so a scripted
/// or seeded source makes a run fully reproducible.

use glam::Vec2;
use serde::Serialize;
use tracing::{debug, info};

use crate::boss::{self, Boss};
use crate::collision::{self, Kill};
use crate::config::GameConfig;
use crate::director;
use crate::effects::{EffectKind, EffectRegistry};
use crate::entities::{
    prune, render_all, secs, update_all, Bullet, BulletOwner, Enemy, Entity, Explosion,
    FloatingText, Particle, Player, Playfield, Powerup, MAX_PLAYER_TIER,
};
use crate::events::GameEvent;
use crate::hud::{ActiveEffectView, BossBar, HudSink, HudSnapshot};
use crate::input::InputState;
use crate::progression::{bonus_for, LevelBonus, Progression};
use crate::render::Surface;
use crate::rng::RandomSource;
use crate::stage::StageTracker;
use crate::weapon::{self, WeaponController};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Menu,
    Playing,
    Paused,
    GameOver,
    Victory,
}

const ENEMY_BULLET_SPEED: f32 = 300.0;
const HIT_SPARKS: usize = 5;
const SHAKE_DECAY_PER_MS: f32 = 0.01;

pub struct Game {
    pub config: GameConfig,
    pub field: Playfield,
    pub status: GameStatus,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Player projectiles.
    pub bullets: Vec<Bullet>,
    /// Enemy and boss projectiles.
    pub enemy_bullets: Vec<Bullet>,
    pub boss: Option<Boss>,
    pub powerups: Vec<Powerup>,
    pub particles: Vec<Particle>,
    pub explosions: Vec<Explosion>,
    pub texts: Vec<FloatingText>,

    pub weapon: WeaponController,
    pub effects: EffectRegistry,
    pub stage: StageTracker,
    pub progression: Progression,

    pub score: u32,
    pub enemies_defeated: u32,
    pub game_time_ms: f32,
    pub screen_shake: f32,
    /// Product of level-up cooldown bonuses.
    pub cooldown_bonus: f32,
    /// Level-up extra shots per volley.
    pub extra_projectiles: u32,

    events: Vec<GameEvent>,
}

impl Game {
    /// A fresh game sitting at the menu.
    pub fn new(config: GameConfig) -> Self {
        let field = Playfield::new(config.field_width, config.field_height);
        Self {
            player: Player::new(&field),
            config,
            field,
            status: GameStatus::Menu,
            enemies: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            boss: None,
            powerups: Vec::new(),
            particles: Vec::new(),
            explosions: Vec::new(),
            texts: Vec::new(),
            weapon: WeaponController::new(),
            effects: EffectRegistry::new(),
            stage: StageTracker::new(),
            progression: Progression::new(),
            score: 0,
            enemies_defeated: 0,
            game_time_ms: 0.0,
            screen_shake: 0.0,
            cooldown_bonus: 1.0,
            extra_projectiles: 0,
            events: Vec::new(),
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Leave the menu and begin stage 1.
    pub fn start(&mut self) {
        if self.status == GameStatus::Menu {
            self.restart();
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Playing => self.set_status(GameStatus::Paused),
            GameStatus::Paused => self.set_status(GameStatus::Playing),
            _ => {}
        }
    }

    /// Throw the current run away and start over from stage 1.
    pub fn restart(&mut self) {
        let from = self.status;
        let config = self.config.clone();
        *self = Self::new(config);
        self.status = from;
        self.set_status(GameStatus::Playing);
        self.enter_stage(self.stage.stage());
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver | GameStatus::Victory)
    }

    // ── Frame ─────────────────────────────────────────────────────────────────

    /// One host frame: simulate if playing, then publish the HUD.
    pub fn frame(
        &mut self,
        dt: f32,
        input: &InputState,
        rng: &mut dyn RandomSource,
        hud: &mut dyn HudSink,
    ) {
        if self.status == GameStatus::Playing {
            self.tick(dt, input, rng);
        }
        hud.push(&self.hud_snapshot());
    }

    /// Advance the world by `dt` ms.  Does nothing outside `Playing`.
    pub fn tick(&mut self, dt: f32, input: &InputState, rng: &mut dyn RandomSource) {
        if self.status != GameStatus::Playing {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.game_time_ms += dt;

        // ── 1. Player ────────────────────────────────────────────────────────
        let mods = self.effects.modifiers();
        self.player
            .steer(input.axis(), mods.speed_multiplier, dt, &self.field);
        self.player.update(dt, &self.field);
        if input.use_item {
            self.use_item();
        }

        // ── 2. Weapon ────────────────────────────────────────────────────────
        self.update_weapon(input.fire, dt, mods.shot_cooldown_factor);

        // ── 3. Regular spawns ────────────────────────────────────────────────
        if let Some(enemy) = director::maybe_spawn(self.stage.config(), dt, &self.field, rng) {
            self.enemies.push(enemy);
        }

        // ── 4. Move everything ───────────────────────────────────────────────
        update_all(&mut self.enemies, dt, &self.field);
        let fire_chance = self.config.enemy_fire_rate * secs(dt) as f64;
        for enemy in self.enemies.iter().filter(|e| e.is_alive()) {
            if rng.chance(fire_chance) {
                self.enemy_bullets.push(Bullet::new(
                    BulletOwner::Enemy,
                    enemy.pos + Vec2::new(0.0, 20.0),
                    Vec2::new(0.0, ENEMY_BULLET_SPEED),
                ));
            }
        }
        self.update_boss(dt, rng);
        update_all(&mut self.bullets, dt, &self.field);
        update_all(&mut self.enemy_bullets, dt, &self.field);
        update_all(&mut self.powerups, dt, &self.field);
        update_all(&mut self.particles, dt, &self.field);
        update_all(&mut self.explosions, dt, &self.field);
        update_all(&mut self.texts, dt, &self.field);

        // ── 5. Effects ───────────────────────────────────────────────────────
        for kind in self.effects.tick(dt) {
            self.events.push(GameEvent::EffectExpired { kind });
        }
        self.player.shielded = self.effects.modifiers().shielded;

        // ── 6. Collisions ────────────────────────────────────────────────────
        let boss_down = self.resolve_collisions(rng);

        // ── 7. Boss and stage progression ────────────────────────────────────
        if boss::should_spawn(
            &self.stage,
            self.boss.is_some(),
            self.game_time_ms,
            self.config.boss_fallback_ms,
        ) && !boss_down
        {
            self.spawn_boss(rng);
        }
        if let Some(stage) = self.stage.update(dt, self.config.stage_duration_ms) {
            self.enter_stage(stage);
        }

        // ── 8. Prune ─────────────────────────────────────────────────────────
        prune(&mut self.enemies);
        prune(&mut self.bullets);
        prune(&mut self.enemy_bullets);
        prune(&mut self.powerups);
        prune(&mut self.particles);
        prune(&mut self.explosions);
        prune(&mut self.texts);
        if self.boss.as_ref().is_some_and(|b| !b.is_alive()) {
            self.boss = None;
        }
        self.screen_shake = (self.screen_shake - dt * SHAKE_DECAY_PER_MS).max(0.0);

        // ── 9. Terminal transitions ──────────────────────────────────────────
        if boss_down {
            self.set_status(GameStatus::Victory);
        } else if self.player.health == 0 {
            self.set_status(GameStatus::GameOver);
        }
    }

    fn update_weapon(&mut self, fire_held: bool, dt: f32, effect_factor: f32) {
        let update = self
            .weapon
            .update(fire_held, dt, effect_factor * self.cooldown_bonus);

        if let Some(tier) = update.tier_up {
            self.events.push(GameEvent::WeaponTierUp { tier });
            let label = match tier {
                2 => "FIREPOWER UP! TRIPLE SHOT",
                3 => "SUPER WEAPON! FIVE-WAY SHOT",
                _ => "MAXIMUM FIREPOWER! FULL SPREAD",
            };
            self.texts.push(FloatingText::new(
                Vec2::new(self.field.width / 2.0, 150.0),
                label,
            ));
            self.screen_shake = self.screen_shake.max(15.0 + tier as f32 * 5.0);
        }
        if let Some((tier, held_ms)) = update.released {
            if tier > 1 {
                self.events.push(GameEvent::WeaponReleased { tier, held_ms });
                self.texts.push(FloatingText::new(
                    Vec2::new(self.field.width / 2.0, 100.0),
                    format!("Barrage over: tier {tier} held {:.1}s", held_ms / 1000.0),
                ));
            }
        }
        if update.fire {
            self.bullets.extend(weapon::volley(
                self.weapon.tier(),
                self.player.pos,
                self.extra_projectiles,
            ));
        }
    }

    fn update_boss(&mut self, dt: f32, rng: &mut dyn RandomSource) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        boss.update(dt, &self.field);
        let actions = boss.update_attacks(dt, self.player.pos, &self.field, rng);
        self.enemy_bullets.extend(actions.bullets);
        if let Some(ability) = actions.ability {
            debug!(?ability, kind = ?boss.kind, "boss ability");
            self.events.push(GameEvent::BossAbility { ability });
            self.texts.push(FloatingText::new(
                boss.pos + Vec2::new(0.0, -boss.radius),
                ability.label(),
            ));
        }
    }

    /// Run every collision pass and apply its side effects.  Returns true if
    /// the boss went down this tick.
    fn resolve_collisions(&mut self, rng: &mut dyn RandomSource) -> bool {
        let shots =
            collision::player_shots(&mut self.bullets, &mut self.enemies, self.boss.as_mut());
        for pos in &shots.hits {
            self.particles.extend(Particle::burst(*pos, HIT_SPARKS, rng));
        }
        for kill in shots.kills {
            self.credit_kill(kill, rng);
        }
        if shots.boss_phase_changed {
            self.events.push(GameEvent::BossPhaseChanged { phase: 2 });
            if let Some(boss) = &self.boss {
                debug!(kind = ?boss.kind, "boss entered phase 2");
                self.texts
                    .push(FloatingText::new(boss.pos, "PHASE 2"));
            }
            self.screen_shake = self.screen_shake.max(20.0);
        }
        if shots.boss_defeated {
            self.defeat_boss();
        }

        let shielded = self.effects.modifiers().shielded;
        let fire = collision::incoming_fire(
            &mut self.enemy_bullets,
            &mut self.player,
            shielded,
            self.config.enemy_bullet_damage,
        );
        let rams = collision::rams(
            &mut self.enemies,
            &mut self.player,
            shielded,
            self.config.contact_damage,
        );
        let damage = fire.damage_taken + rams.damage_taken;
        if damage > 0 {
            self.events.push(GameEvent::PlayerHit {
                damage,
                health: self.player.health,
            });
            self.particles
                .extend(Particle::burst(self.player.pos, HIT_SPARKS, rng));
            self.screen_shake = self.screen_shake.max(if rams.damage_taken > 0 { 20.0 } else { 15.0 });
        }
        for _ in 0..(fire.absorbed + rams.absorbed) {
            self.events.push(GameEvent::HitAbsorbed);
        }
        for kill in rams.rammed {
            self.credit_kill(kill, rng);
        }

        if self.player.is_alive() {
            for (kind, pos) in collision::pickups(&mut self.powerups, &self.player) {
                self.collect_powerup(kind, pos);
            }
        }

        shots.boss_defeated
    }

    // ── Side effects ──────────────────────────────────────────────────────────

    fn credit_kill(&mut self, kill: Kill, rng: &mut dyn RandomSource) {
        self.explosions.push(Explosion::new(kill.pos, false));
        self.score = self.score.saturating_add(self.config.enemy_score);
        self.enemies_defeated += 1;
        self.stage.record_kill();
        self.events.push(GameEvent::EnemyDestroyed {
            score: self.config.enemy_score,
        });
        self.grant_exp(self.config.enemy_exp);

        if rng.chance(self.config.powerup_drop_chance) {
            let powerup = Powerup::random(kill.pos, rng);
            self.events
                .push(GameEvent::PowerupDropped { kind: powerup.kind });
            self.powerups.push(powerup);
        }
    }

    fn grant_exp(&mut self, amount: u32) {
        for level in self.progression.add_exp(amount) {
            info!(level, "level up");
            self.events.push(GameEvent::LevelUp { level });
            self.texts.push(FloatingText::new(
                self.player.pos - Vec2::new(0.0, 40.0),
                format!("LEVEL {level}"),
            ));
            match bonus_for(level) {
                Some(LevelBonus::CooldownReduction(factor)) => self.cooldown_bonus *= factor,
                Some(LevelBonus::ExtraProjectile) => self.extra_projectiles += 1,
                Some(LevelBonus::HealthBonus(amount)) => self.player.grant_max_health(amount),
                None => {}
            }
        }
    }

    fn collect_powerup(&mut self, kind: EffectKind, pos: Vec2) {
        let duration = self.config.effect_duration_ms;
        self.texts.push(FloatingText::new(pos, kind.label()));
        self.player.flash(duration);
        if kind == EffectKind::Health {
            self.player.heal(self.config.health_pickup_amount);
        }
        self.effects.apply(kind, duration);
        self.player.shielded = self.effects.modifiers().shielded;
        self.events.push(GameEvent::EffectApplied { kind });
    }

    /// Use-item: tops up an active speed boost without stacking it.
    fn use_item(&mut self) {
        if self.effects.is_active(EffectKind::Speed) {
            self.effects
                .apply(EffectKind::Speed, self.config.effect_duration_ms);
            self.texts
                .push(FloatingText::new(self.player.pos, "BOOST!"));
        }
    }

    fn spawn_boss(&mut self, rng: &mut dyn RandomSource) {
        let boss = Boss::for_stage(self.stage.config(), &self.field);
        info!(kind = ?boss.kind, stage = boss.stage, health = boss.max_health, "boss spawned");
        self.events.push(GameEvent::BossSpawned {
            kind: boss.kind,
            stage: boss.stage,
        });
        let center = Vec2::new(self.field.width / 2.0, 200.0);
        self.texts.push(FloatingText::new(
            center,
            format!("WARNING: {} approaching!", boss.kind.name()),
        ));
        self.particles
            .extend(Particle::burst(Vec2::new(center.x, 100.0), 30, rng));
        self.screen_shake = 30.0;
        self.boss = Some(boss);
    }

    fn defeat_boss(&mut self) {
        let Some(boss) = &self.boss else {
            return;
        };
        info!(kind = ?boss.kind, score = self.score, "boss defeated");
        let (kind, pos) = (boss.kind, boss.pos);
        self.explosions.push(Explosion::new(pos, true));
        self.score = self.score.saturating_add(self.config.boss_score);
        self.events.push(GameEvent::BossDefeated { kind });
        self.grant_exp(self.config.boss_exp);
    }

    fn enter_stage(&mut self, stage: u32) {
        let config = self.stage.config();
        info!(stage, name = config.name, "entering stage");
        self.player.set_tier(stage.min(MAX_PLAYER_TIER));
        self.events.push(GameEvent::StageEntered { stage });

        let center = Vec2::new(self.field.width / 2.0, self.field.height / 2.0);
        self.texts.push(FloatingText::new(center, config.name));
        let goal = if config.required_kills > 0 {
            format!("Destroy {} enemies to advance!", config.required_kills)
        } else {
            "Prepare for the final boss!".to_string()
        };
        self.texts
            .push(FloatingText::new(center + Vec2::new(0.0, 40.0), goal));
        self.screen_shake = self.screen_shake.max(15.0);
    }

    fn set_status(&mut self, to: GameStatus) {
        if self.status == to {
            return;
        }
        let from = self.status;
        info!(?from, ?to, score = self.score, "game status changed");
        self.status = to;
        self.events.push(GameEvent::StatusChanged { from, to });
    }

    // ── Outputs ───────────────────────────────────────────────────────────────

    /// Draw the whole scene, back to front.  Runs in every state.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.begin(self.stage.config().theme, self.screen_shake);
        render_all(&self.powerups, surface);
        render_all(&self.enemies, surface);
        if let Some(boss) = self.boss.as_ref().filter(|b| b.is_alive()) {
            boss.render(surface);
        }
        render_all(&self.enemy_bullets, surface);
        render_all(&self.bullets, surface);
        if self.player.is_alive() {
            self.player.render(surface);
        }
        render_all(&self.explosions, surface);
        render_all(&self.particles, surface);
        render_all(&self.texts, surface);
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        let config = self.stage.config();
        HudSnapshot {
            status: self.status,
            score: self.score,
            level: self.progression.level(),
            exp: self.progression.exp(),
            max_exp: self.progression.threshold(),
            health: self.player.health,
            max_health: self.player.max_health,
            stage: self.stage.stage(),
            stage_name: config.name,
            stage_kills: self.stage.kills(),
            required_kills: config.required_kills,
            weapon_tier: self.weapon.tier(),
            fire_held_ms: self.weapon.held_ms(),
            next_tier_in_ms: self.weapon.next_tier_in_ms(),
            effects: self
                .effects
                .iter()
                .map(|(kind, ms)| ActiveEffectView {
                    kind,
                    seconds_left: (ms / 1000.0).ceil().max(0.0) as u32,
                })
                .collect(),
            boss: self
                .boss
                .as_ref()
                .filter(|b| b.is_alive())
                .map(|b| BossBar {
                    kind: b.kind,
                    name: b.kind.name(),
                    health: b.health,
                    max_health: b.max_health,
                    phase: b.phase,
                }),
            enemies_defeated: self.enemies_defeated,
        }
    }
}
