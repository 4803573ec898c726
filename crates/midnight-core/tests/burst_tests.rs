// Burst generator: shape parameterization, counts, crackle scheduling.

use glam::Vec2;
use midnight_core::{
    crackle_pop, generate_burst, BurstKind, BURST_GAIN, BURST_GAIN_LOUD, CRACKLE_POP_COUNT,
    REDUCED_BURST_CAP,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const ORIGIN: Vec2 = Vec2::new(400.0, 300.0);

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn classic_intensified_count_is_150() {
    let mut rng = rng();
    let plan = generate_burst(ORIGIN, Some(BurstKind::Classic), true, false, &mut rng);
    assert_eq!(plan.particles.len(), 150);
}

#[test]
fn willow_counts() {
    let mut rng = rng();
    let plan = generate_burst(ORIGIN, Some(BurstKind::Willow), false, false, &mut rng);
    assert_eq!(plan.particles.len(), 80);
    let plan = generate_burst(ORIGIN, Some(BurstKind::Willow), true, false, &mut rng);
    assert_eq!(plan.particles.len(), 120);
}

#[test]
fn reduced_mode_caps_every_variant_at_30() {
    let mut rng = rng();
    for kind in BurstKind::ALL {
        for intensify in [false, true] {
            let plan = generate_burst(ORIGIN, Some(kind), intensify, true, &mut rng);
            assert!(
                plan.particles.len() <= REDUCED_BURST_CAP,
                "{kind:?} intensify={intensify} spawned {}",
                plan.particles.len()
            );
        }
    }
}

#[test]
fn default_kind_is_classic_outside_midnight() {
    let mut rng = rng();
    for _ in 0..100 {
        let plan = generate_burst(ORIGIN, None, false, false, &mut rng);
        assert_eq!(plan.kind, BurstKind::Classic);
    }
}

#[test]
fn midnight_randomizes_over_all_kinds() {
    let mut rng = rng();
    let mut seen = [false; 5];
    for _ in 0..200 {
        let plan = generate_burst(ORIGIN, None, true, false, &mut rng);
        let i = BurstKind::ALL.iter().position(|k| *k == plan.kind);
        seen[i.expect("kind from ALL")] = true;
    }
    assert!(seen.iter().all(|s| *s), "kinds seen: {seen:?}");
}

#[test]
fn ring_particles_share_fixed_size_and_decay() {
    let mut rng = rng();
    let plan = generate_burst(ORIGIN, Some(BurstKind::Ring), false, false, &mut rng);
    for p in &plan.particles {
        assert_eq!(p.size, 2.0);
        assert!((p.decay - 0.012).abs() < 1e-6);
        assert!((p.friction - 0.97).abs() < 1e-6);
    }
}

#[test]
fn star_points_reach_further_than_valleys() {
    let mut rng = rng();
    let plan = generate_burst(ORIGIN, Some(BurstKind::Star), false, false, &mut rng);
    let speeds: Vec<f32> = plan.particles.iter().map(|p| p.vel.length()).collect();
    let max = speeds.iter().cloned().fold(0.0_f32, f32::max);
    let min = speeds.iter().cloned().fold(f32::MAX, f32::min);
    assert!(
        max > min * 2.0,
        "star rose should spread speeds: min {min} max {max}"
    );
}

#[test]
fn willow_trails_are_disabled_under_reduced_effects() {
    let mut rng = rng();
    let plan = generate_burst(ORIGIN, Some(BurstKind::Willow), false, true, &mut rng);
    assert!(plan.particles.iter().all(|p| !p.has_trail));
    let plan = generate_burst(ORIGIN, Some(BurstKind::Willow), false, false, &mut rng);
    assert!(plan.particles.iter().all(|p| p.has_trail));
}

#[test]
fn crackle_uses_half_the_burst_budget_for_primaries() {
    let mut rng = rng();
    let plan = generate_burst(ORIGIN, Some(BurstKind::Crackle), false, false, &mut rng);
    assert_eq!(plan.particles.len(), 50);
    assert!(plan.crackles.len() <= plan.particles.len());
}

#[test]
fn crackle_charge_delays_are_in_window() {
    let mut rng = rng();
    let mut total = 0;
    for _ in 0..20 {
        let plan = generate_burst(ORIGIN, Some(BurstKind::Crackle), false, false, &mut rng);
        for c in &plan.crackles {
            assert!(
                (400.0..600.0).contains(&c.delay_ms),
                "delay {}",
                c.delay_ms
            );
            total += 1;
        }
    }
    assert!(total > 0, "expected some charges over 20 bursts");
}

#[test]
fn non_crackle_bursts_schedule_no_charges() {
    let mut rng = rng();
    for kind in [BurstKind::Classic, BurstKind::Ring, BurstKind::Willow, BurstKind::Star] {
        let plan = generate_burst(ORIGIN, Some(kind), false, false, &mut rng);
        assert!(plan.crackles.is_empty());
    }
}

#[test]
fn crackle_pop_spawns_five_tiny_flickering_sparks() {
    let mut rng = rng();
    let pops = crackle_pop(ORIGIN, &mut rng);
    assert_eq!(pops.len(), CRACKLE_POP_COUNT);
    for p in &pops {
        assert_eq!(p.color, "#ffffff");
        assert_eq!(p.size, 0.8);
        assert!((p.decay - 0.05).abs() < 1e-6);
        assert!(p.flicker);
    }
}

#[test]
fn sfx_gain_is_louder_for_ring_and_willow() {
    let mut rng = rng();
    for kind in BurstKind::ALL {
        let plan = generate_burst(ORIGIN, Some(kind), false, false, &mut rng);
        let expected = match kind {
            BurstKind::Ring | BurstKind::Willow => BURST_GAIN_LOUD,
            _ => BURST_GAIN,
        };
        assert_eq!(plan.sfx_gain, expected, "{kind:?}");
    }
}
