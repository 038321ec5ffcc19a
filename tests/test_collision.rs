use glam::Vec2;
use sky_assault::boss::{Boss, BossKind};
use sky_assault::collision::*;
use sky_assault::effects::EffectKind;
use sky_assault::entities::*;

fn field() -> Playfield {
    Playfield::new(900.0, 700.0)
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy::new(EnemyKind::Normal, Vec2::new(x, y), MovePattern::Straight)
}

fn player_shot(x: f32, y: f32) -> Bullet {
    Bullet::new(BulletOwner::Player, Vec2::new(x, y), Vec2::ZERO)
}

fn enemy_shot(at: Vec2) -> Bullet {
    Bullet::new(BulletOwner::Enemy, at, Vec2::ZERO)
}

#[test]
fn overlap_is_strict() {
    assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.9, 0.0), 5.0));
    assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
}

// ── Player shots ──────────────────────────────────────────────────────────────

#[test]
fn one_bullet_hits_one_enemy() {
    let mut bullets = vec![player_shot(100.0, 100.0)];
    let mut enemies = vec![enemy_at(100.0, 100.0), enemy_at(102.0, 100.0)];

    let report = player_shots(&mut bullets, &mut enemies, None);

    assert_eq!(report.kills.len(), 1);
    assert_eq!(report.hits.len(), 1);
    assert!(!bullets[0].is_alive());
    assert!(!enemies[0].is_alive());
    assert!(enemies[1].is_alive());
}

#[test]
fn dead_enemies_absorb_nothing() {
    let mut bullets = vec![player_shot(100.0, 100.0), player_shot(100.0, 101.0)];
    let mut enemies = vec![enemy_at(100.0, 100.0)];

    let report = player_shots(&mut bullets, &mut enemies, None);

    assert_eq!(report.kills.len(), 1);
    assert!(!bullets[0].is_alive());
    assert!(bullets[1].is_alive());
}

#[test]
fn tough_enemy_takes_several_bullets() {
    let mut bullets: Vec<Bullet> = (0..5).map(|i| player_shot(100.0, 100.0 + i as f32)).collect();
    let mut enemies = vec![Enemy::new(
        EnemyKind::BossLite,
        Vec2::new(100.0, 100.0),
        MovePattern::Straight,
    )];

    let report = player_shots(&mut bullets, &mut enemies, None);

    assert_eq!(report.hits.len(), 5);
    assert_eq!(report.kills.len(), 1);
    assert_eq!(report.kills[0].kind, EnemyKind::BossLite);
    assert!(bullets.iter().all(|b| !b.is_alive()));
}

#[test]
fn enemy_bullets_ignore_enemies() {
    let mut bullets = vec![enemy_shot(Vec2::new(100.0, 100.0))];
    let mut enemies = vec![enemy_at(100.0, 100.0)];
    let report = player_shots(&mut bullets, &mut enemies, None);
    assert_eq!(report, ShotReport::default());
    assert!(bullets[0].is_alive());
}

#[test]
fn enemies_shield_the_boss() {
    let mut boss = Boss::new(BossKind::Scout, 1, &field());
    boss.pos = Vec2::new(450.0, 100.0);
    let mut bullets = vec![player_shot(450.0, 100.0)];
    let mut enemies = vec![enemy_at(450.0, 100.0)];

    let report = player_shots(&mut bullets, &mut enemies, Some(&mut boss));

    assert_eq!(report.kills.len(), 1);
    assert_eq!(boss.health, boss.max_health);
}

#[test]
fn boss_phase_and_defeat_are_flagged() {
    let mut boss = Boss::new(BossKind::Scout, 1, &field());
    boss.pos = Vec2::new(450.0, 100.0);
    boss.health = 76;

    let mut bullets = vec![player_shot(450.0, 100.0)];
    let report = player_shots(&mut bullets, &mut [], Some(&mut boss));
    assert!(report.boss_phase_changed);
    assert!(!report.boss_defeated);

    boss.health = 1;
    let mut bullets = vec![player_shot(450.0, 100.0), player_shot(450.0, 101.0)];
    let report = player_shots(&mut bullets, &mut [], Some(&mut boss));
    assert!(report.boss_defeated);
    // The second bullet flies on.
    assert!(bullets[1].is_alive());
}

// ── Incoming ──────────────────────────────────────────────────────────────────

#[test]
fn enemy_fire_hurts() {
    let mut player = Player::new(&field());
    let mut bullets = vec![enemy_shot(player.pos), enemy_shot(Vec2::ZERO)];

    let report = incoming_fire(&mut bullets, &mut player, false, 10);

    assert_eq!(report.damage_taken, 10);
    assert_eq!(player.health, 90);
    assert!(!bullets[0].is_alive());
    assert!(bullets[1].is_alive());
}

#[test]
fn shield_soaks_fire_but_eats_the_bullet() {
    let mut player = Player::new(&field());
    let mut bullets = vec![enemy_shot(player.pos)];

    let report = incoming_fire(&mut bullets, &mut player, true, 10);

    assert_eq!(report.damage_taken, 0);
    assert_eq!(report.absorbed, 1);
    assert_eq!(player.health, 100);
    assert!(!bullets[0].is_alive());
}

#[test]
fn player_bullets_never_hurt_the_player() {
    let mut player = Player::new(&field());
    let mut bullets = vec![player_shot(player.pos.x, player.pos.y)];
    let report = incoming_fire(&mut bullets, &mut player, false, 10);
    assert_eq!(report.damage_taken, 0);
    assert!(bullets[0].is_alive());
}

#[test]
fn ramming_destroys_the_enemy_and_counts_as_a_kill() {
    let mut player = Player::new(&field());
    let mut enemies = vec![enemy_at(player.pos.x, player.pos.y), enemy_at(10.0, 10.0)];

    let report = rams(&mut enemies, &mut player, false, 20);

    assert_eq!(report.damage_taken, 20);
    assert_eq!(report.rammed.len(), 1);
    assert_eq!(player.health, 80);
    assert!(!enemies[0].is_alive());
    assert!(enemies[1].is_alive());
}

#[test]
fn shielded_ram_still_destroys_the_enemy() {
    let mut player = Player::new(&field());
    let mut enemies = vec![enemy_at(player.pos.x, player.pos.y)];
    let report = rams(&mut enemies, &mut player, true, 20);
    assert_eq!(report.damage_taken, 0);
    assert_eq!(report.rammed.len(), 1);
    assert_eq!(player.health, 100);
}

#[test]
fn pickups_are_consumed() {
    let player = Player::new(&field());
    let mut powerups = vec![
        Powerup::new(EffectKind::Shield, player.pos),
        Powerup::new(EffectKind::Speed, Vec2::ZERO),
    ];
    let taken = pickups(&mut powerups, &player);
    assert_eq!(taken, vec![(EffectKind::Shield, player.pos)]);
    assert!(!powerups[0].is_alive());
    assert!(powerups[1].is_alive());
}
