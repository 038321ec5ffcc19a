/// Collision passes.
///
/// Each pass walks a snapshot of its collections, marks hits by flipping
/// liveness and health, and reports what happened.  Nothing is removed here;
/// pruning happens once all passes are done, so no entry is skipped or seen
/// twice.  A bullet that hits something is consumed immediately and is not
/// considered by any later target.

use glam::Vec2;

use crate::boss::{Boss, HitOutcome};
use crate::effects::EffectKind;
use crate::entities::{Bullet, BulletOwner, Enemy, EnemyKind, Entity, Player, Powerup};

/// Circle overlap: strictly closer than the sum of the radii.
pub fn overlaps(a: &impl Entity, b: &impl Entity) -> bool {
    circles_overlap(a.position(), a.radius(), b.position(), b.radius())
}

pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

pub const PLAYER_SHOT_DAMAGE: u32 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct Kill {
    pub kind: EnemyKind,
    pub pos: Vec2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShotReport {
    /// Where each hit landed (for sparks).
    pub hits: Vec<Vec2>,
    pub kills: Vec<Kill>,
    pub boss_phase_changed: bool,
    pub boss_defeated: bool,
}

/// Player bullets against enemies, then against the boss.
pub fn player_shots(
    bullets: &mut [Bullet],
    enemies: &mut [Enemy],
    mut boss: Option<&mut Boss>,
) -> ShotReport {
    let mut report = ShotReport::default();

    for bullet in bullets
        .iter_mut()
        .filter(|b| b.is_alive() && b.owner == BulletOwner::Player)
    {
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_alive() && overlaps(&*bullet, &**e))
        {
            bullet.consume();
            report.hits.push(enemy.pos);
            if enemy.hit(PLAYER_SHOT_DAMAGE) {
                report.kills.push(Kill {
                    kind: enemy.kind,
                    pos: enemy.pos,
                });
            }
            continue;
        }

        if let Some(boss) = boss.as_deref_mut() {
            if boss.is_alive() && overlaps(&*bullet, &*boss) {
                bullet.consume();
                report.hits.push(boss.pos);
                match boss.take_hit(PLAYER_SHOT_DAMAGE) {
                    HitOutcome::PhaseChanged => report.boss_phase_changed = true,
                    HitOutcome::Defeated => report.boss_defeated = true,
                    HitOutcome::Damaged | HitOutcome::Ignored => {}
                }
            }
        }
    }
    report
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IncomingReport {
    pub damage_taken: u32,
    pub absorbed: u32,
    pub rammed: Vec<Kill>,
}

/// Enemy and boss bullets against the player.  A shielded player still
/// soaks up the bullet but takes no damage.
pub fn incoming_fire(
    bullets: &mut [Bullet],
    player: &mut Player,
    shielded: bool,
    damage: u32,
) -> IncomingReport {
    let mut report = IncomingReport::default();
    for bullet in bullets
        .iter_mut()
        .filter(|b| b.is_alive() && b.owner != BulletOwner::Player)
    {
        if !overlaps(&*bullet, &*player) {
            continue;
        }
        bullet.consume();
        if shielded {
            report.absorbed += 1;
        } else {
            player.take_damage(damage);
            report.damage_taken += damage;
        }
    }
    report
}

/// Enemy hulls against the player.  The enemy is destroyed either way and
/// still counts as a kill.
pub fn rams(
    enemies: &mut [Enemy],
    player: &mut Player,
    shielded: bool,
    damage: u32,
) -> IncomingReport {
    let mut report = IncomingReport::default();
    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        if !overlaps(&*enemy, &*player) {
            continue;
        }
        enemy.destroy();
        report.rammed.push(Kill {
            kind: enemy.kind,
            pos: enemy.pos,
        });
        if shielded {
            report.absorbed += 1;
        } else {
            player.take_damage(damage);
            report.damage_taken += damage;
        }
    }
    report
}

/// Powerups touching the player, consumed in order.
pub fn pickups(powerups: &mut [Powerup], player: &Player) -> Vec<(EffectKind, Vec2)> {
    let mut taken = Vec::new();
    for powerup in powerups.iter_mut().filter(|p| p.is_alive()) {
        if overlaps(&*powerup, player) {
            powerup.collect();
            taken.push((powerup.kind, powerup.pos));
        }
    }
    taken
}
