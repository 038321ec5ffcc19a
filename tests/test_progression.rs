use sky_assault::progression::*;

#[test]
fn starts_at_level_one() {
    let p = Progression::new();
    assert_eq!(p.level(), 1);
    assert_eq!(p.exp(), 0);
    assert_eq!(p.threshold(), START_THRESHOLD);
}

#[test]
fn ten_kills_make_a_level() {
    let mut p = Progression::new();
    for _ in 0..9 {
        assert!(p.add_exp(10).is_empty());
    }
    assert_eq!(p.add_exp(10), vec![2]);
    assert_eq!(p.exp(), 0);
    assert_eq!(p.threshold(), 120);
}

#[test]
fn excess_carries_over() {
    let mut p = Progression::new();
    assert_eq!(p.add_exp(130), vec![2]);
    assert_eq!(p.exp(), 30);
}

#[test]
fn one_grant_can_cross_several_levels() {
    let mut p = Progression::new();
    assert_eq!(p.add_exp(100 + 120 + 144 + 5), vec![2, 3, 4]);
    assert_eq!(p.level(), 4);
    assert_eq!(p.exp(), 5);
    assert_eq!(p.threshold(), 172);
}

#[test]
fn zero_grant_is_a_no_op() {
    let mut p = Progression::new();
    assert!(p.add_exp(0).is_empty());
    assert_eq!(p.level(), 1);
}

#[test]
fn huge_grant_terminates() {
    let mut p = Progression::new();
    let levels = p.add_exp(u32::MAX);
    assert!(!levels.is_empty());
    assert!(p.exp() < p.threshold());
}

#[test]
fn level_bonus_table() {
    assert_eq!(bonus_for(1), None);
    assert_eq!(bonus_for(2), Some(LevelBonus::CooldownReduction(0.8)));
    assert_eq!(bonus_for(3), Some(LevelBonus::ExtraProjectile));
    assert_eq!(bonus_for(4), Some(LevelBonus::HealthBonus(20)));
    assert_eq!(bonus_for(12), Some(LevelBonus::HealthBonus(20)));
}
