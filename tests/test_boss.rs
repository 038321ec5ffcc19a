use glam::Vec2;
use sky_assault::boss::*;
use sky_assault::entities::{BulletOwner, Entity, Playfield};
use sky_assault::rng::ScriptedRandom;
use sky_assault::stage::{config_for, StageTracker};

fn field() -> Playfield {
    Playfield::new(900.0, 700.0)
}

fn on_station(kind: BossKind) -> Boss {
    let mut boss = Boss::new(kind, 1, &field());
    boss.pos = Vec2::new(450.0, ENTRY_Y);
    boss
}

// ── Spawn rule ────────────────────────────────────────────────────────────────

#[test]
fn no_boss_early_in_a_regular_stage() {
    let s = StageTracker::new();
    assert!(!should_spawn(&s, false, 1_000.0, 30_000.0));
}

#[test]
fn fallback_spawns_after_thirty_seconds() {
    let s = StageTracker::new();
    assert!(!should_spawn(&s, false, 30_000.0, 30_000.0));
    assert!(should_spawn(&s, false, 30_001.0, 30_000.0));
    assert!(!should_spawn(&s, true, 30_001.0, 30_000.0));
}

#[test]
fn boss_stage_spawns_once_quota_is_met() {
    let mut s = StageTracker::new();
    s.update(45_000.0, 45_000.0);
    s.update(45_000.0, 45_000.0);
    assert_eq!(s.stage(), 3);
    assert!(!should_spawn(&s, false, 0.0, 30_000.0));

    for _ in 0..s.config().required_kills {
        s.record_kill();
    }
    assert!(should_spawn(&s, false, 0.0, 30_000.0));
    assert!(!should_spawn(&s, true, 0.0, 30_000.0));
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[test]
fn health_grows_with_stage() {
    let f = field();
    assert_eq!(Boss::new(BossKind::Scout, 1, &f).max_health, 150);
    assert_eq!(Boss::new(BossKind::Guard, 3, &f).max_health, 300);
    assert_eq!(Boss::new(BossKind::Ultimate, 10, &f).max_health, 1_450);
}

#[test]
fn stage_picks_its_boss() {
    let cfg = config_for(6);
    let boss = Boss::for_stage(cfg, &field());
    assert_eq!(boss.kind, cfg.boss);
    assert_eq!(boss.stage, 6);
    assert_eq!(boss.max_health, cfg.boss.base_health() + 250);
}

// ── Phases and defeat ─────────────────────────────────────────────────────────

#[test]
fn phase_two_at_half_health() {
    let mut boss = on_station(BossKind::Scout);
    let base_speed = boss.speed_mult;
    assert_eq!(boss.take_hit(74), HitOutcome::Damaged);
    assert_eq!(boss.phase, 1);
    assert_eq!(boss.take_hit(1), HitOutcome::PhaseChanged);
    assert_eq!(boss.phase, 2);
    assert!((boss.speed_mult - base_speed * PHASE_TWO_SPEEDUP).abs() < 1e-4);

    // One-way: no second phase change.
    assert_eq!(boss.take_hit(1), HitOutcome::Damaged);
    assert_eq!(boss.phase, 2);
}

#[test]
fn defeat_is_reported_once() {
    let mut boss = on_station(BossKind::Scout);
    assert_eq!(boss.take_hit(10_000), HitOutcome::Defeated);
    assert!(boss.is_defeated());
    assert!(!boss.is_alive());
    assert_eq!(boss.health, 0);
    assert_eq!(boss.take_hit(1), HitOutcome::Ignored);
    assert_eq!(boss.take_hit(10_000), HitOutcome::Ignored);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn descends_then_holds_entry_height() {
    let f = field();
    let mut boss = Boss::new(BossKind::Guard, 2, &f);
    assert!(boss.pos.y < 0.0);
    boss.update(1_000.0, &f);
    assert!(!boss.on_station());
    boss.update(60_000.0, &f);
    assert_eq!(boss.pos.y, ENTRY_Y);
    assert!(boss.on_station());
}

#[test]
fn sweeps_and_reverses_at_the_edges() {
    let f = field();
    let mut boss = on_station(BossKind::Guard);
    boss.update(1_000.0, &f);
    assert!(boss.pos.x > 450.0);

    boss.update(100_000.0, &f);
    assert_eq!(boss.pos.x, 840.0);
    boss.update(1_000.0, &f);
    assert!(boss.pos.x < 840.0);
    assert_eq!(boss.pos.y, ENTRY_Y);
}

// ── Attacks ───────────────────────────────────────────────────────────────────

#[test]
fn twin_shot_on_the_attack_timer() {
    let f = field();
    let mut boss = on_station(BossKind::Guard);
    let mut rng = ScriptedRandom::never();

    let quiet = boss.update_attacks(1_000.0, Vec2::new(450.0, 600.0), &f, &mut rng);
    assert!(quiet.bullets.is_empty());

    let volley = boss.update_attacks(200.0, Vec2::new(450.0, 600.0), &f, &mut rng);
    assert_eq!(volley.bullets.len(), 2);
    assert!(volley.ability.is_none());
    for b in &volley.bullets {
        assert_eq!(b.owner, BulletOwner::Boss);
        assert_eq!(b.pos.y, ENTRY_Y + 40.0);
        assert_eq!(b.vel, Vec2::new(0.0, 360.0));
    }
}

#[test]
fn ability_roll_picks_exactly_one() {
    let f = field();
    let mut boss = on_station(BossKind::Scout);
    let mut rng = ScriptedRandom::constant(0.0);
    let out = boss.update_attacks(4_000.0, Vec2::new(450.0, 600.0), &f, &mut rng);
    assert_eq!(out.ability, Some(Ability::QuickShot));
    // Twin shot plus the three-round burst.
    assert_eq!(out.bullets.len(), 5);
}

#[test]
fn failed_ability_roll_does_nothing_special() {
    let f = field();
    let mut boss = on_station(BossKind::Ultimate);
    let mut rng = ScriptedRandom::never();
    let out = boss.update_attacks(4_000.0, Vec2::new(450.0, 600.0), &f, &mut rng);
    assert_eq!(out.ability, None);
    assert_eq!(out.bullets.len(), 2);
}

#[test]
fn phase_two_attacks_faster() {
    let f = field();
    let mut boss = on_station(BossKind::Scout);
    boss.take_hit(80);
    assert_eq!(boss.phase, 2);
    let mut rng = ScriptedRandom::never();
    let out = boss.update_attacks(800.0, Vec2::ZERO, &f, &mut rng);
    assert_eq!(out.bullets.len(), 2);
}

#[test]
fn teleport_stays_on_the_playfield() {
    let f = field();
    let mut boss = on_station(BossKind::Scout);
    // chance passes, pick index 1 (Teleport), then x roll at the top end
    let mut rng = ScriptedRandom::new(vec![0.0, 0.9, 0.999]);
    let out = boss.update_attacks(4_000.0, Vec2::ZERO, &f, &mut rng);
    assert_eq!(out.ability, Some(Ability::Teleport));
    assert!(boss.pos.x >= 60.0 && boss.pos.x <= 840.0);
}

#[test]
fn defeated_boss_stops_shooting() {
    let f = field();
    let mut boss = on_station(BossKind::Scout);
    boss.take_hit(10_000);
    let mut rng = ScriptedRandom::constant(0.0);
    let out = boss.update_attacks(10_000.0, Vec2::ZERO, &f, &mut rng);
    assert!(out.bullets.is_empty());
    assert!(out.ability.is_none());
}
