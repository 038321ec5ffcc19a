use sky_assault::effects::*;

fn neutral() -> Modifiers {
    Modifiers::default()
}

#[test]
fn shield_round_trip() {
    let mut fx = EffectRegistry::new();
    assert_eq!(fx.apply(EffectKind::Shield, 5_000.0), Applied::Started);
    assert!(fx.modifiers().shielded);

    assert!(fx.tick(4_999.0).is_empty());
    assert!(fx.modifiers().shielded);

    assert_eq!(fx.tick(1.0), vec![EffectKind::Shield]);
    assert!(!fx.modifiers().shielded);
    assert!(fx.is_empty());

    // Expiry is reported exactly once.
    assert!(fx.tick(1_000.0).is_empty());
    assert_eq!(fx.modifiers(), neutral());
}

#[test]
fn reapplying_refreshes_without_stacking() {
    let mut fx = EffectRegistry::new();
    fx.apply(EffectKind::Speed, 5_000.0);
    fx.tick(3_000.0);
    assert_eq!(fx.apply(EffectKind::Speed, 5_000.0), Applied::Refreshed);
    assert_eq!(fx.len(), 1);
    assert_eq!(fx.modifiers().speed_multiplier, SPEED_BOOST);
    assert_eq!(fx.remaining(EffectKind::Speed), Some(5_000.0));

    fx.tick(4_000.0);
    assert!(fx.is_active(EffectKind::Speed));
    fx.tick(1_000.0);
    assert_eq!(fx.modifiers().speed_multiplier, 1.0);
}

#[test]
fn kinds_expire_independently() {
    let mut fx = EffectRegistry::new();
    fx.apply(EffectKind::Weapon, 2_000.0);
    fx.apply(EffectKind::Shield, 5_000.0);
    assert_eq!(fx.modifiers().shot_cooldown_factor, WEAPON_COOLDOWN_FACTOR);

    assert_eq!(fx.tick(2_500.0), vec![EffectKind::Weapon]);
    assert_eq!(fx.modifiers().shot_cooldown_factor, 1.0);
    assert!(fx.modifiers().shielded);
    assert_eq!(fx.len(), 1);
}

#[test]
fn one_long_tick_expires_everything_once() {
    let mut fx = EffectRegistry::new();
    for kind in EffectKind::ALL {
        fx.apply(kind, 5_000.0);
    }
    let mut expired = fx.tick(1_000_000.0);
    expired.sort();
    assert_eq!(expired, EffectKind::ALL.to_vec());
    assert_eq!(fx.modifiers(), neutral());
}

#[test]
fn health_has_no_lasting_modifier() {
    let mut fx = EffectRegistry::new();
    fx.apply(EffectKind::Health, 5_000.0);
    assert!(fx.is_active(EffectKind::Health));
    assert_eq!(fx.modifiers(), neutral());
}

#[test]
fn remaining_never_goes_negative() {
    let mut fx = EffectRegistry::new();
    fx.apply(EffectKind::Speed, 100.0);
    fx.apply(EffectKind::Shield, 5_000.0);
    fx.tick(250.0);
    assert!(fx.iter().all(|(_, ms)| ms > 0.0));
}
