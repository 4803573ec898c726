use crate::constants::*;
use crate::particle::{Particle, ParticleOptions};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// The five burst shapes. Outside midnight mode, unforced bursts are always
/// `Classic`; at midnight the shape is drawn at random.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstKind {
    Classic,
    Ring,
    Willow,
    Crackle,
    Star,
}

impl BurstKind {
    pub const ALL: [BurstKind; 5] = [
        BurstKind::Classic,
        BurstKind::Ring,
        BurstKind::Willow,
        BurstKind::Crackle,
        BurstKind::Star,
    ];
}

/// A deferred crackle micro-burst: fires `delay_ms` after the parent burst at
/// the parent particle's extrapolated position.
#[derive(Clone, Copy, Debug)]
pub struct CrackleCharge {
    pub origin: Vec2,
    pub delay_ms: f32,
}

/// Everything one burst produces: the particles to absorb into the
/// simulation, any scheduled crackle charges, and the relative sound gain.
pub struct BurstPlan {
    pub kind: BurstKind,
    pub particles: Vec<Particle>,
    pub crackles: Vec<CrackleCharge>,
    pub sfx_gain: f32,
}

fn burst_count(kind: BurstKind, intensify: bool, reduced: bool) -> usize {
    let base = match kind {
        BurstKind::Willow => WILLOW_BURST_COUNT,
        _ => BASE_BURST_COUNT,
    };
    let count = if intensify {
        (base as f32 * INTENSIFY_FACTOR).round() as usize
    } else {
        base
    };
    if reduced {
        count.min(REDUCED_BURST_CAP)
    } else {
        count
    }
}

/// Spawn one burst at `origin`. With `kind` unset the shape follows the
/// default logic: random at midnight (`intensify`), classic otherwise.
pub fn generate_burst(
    origin: Vec2,
    kind: Option<BurstKind>,
    intensify: bool,
    reduced: bool,
    rng: &mut impl Rng,
) -> BurstPlan {
    let palette = PALETTES[rng.gen_range(0..PALETTES.len())];
    let kind = kind.unwrap_or_else(|| {
        if intensify {
            BurstKind::ALL[rng.gen_range(0..BurstKind::ALL.len())]
        } else {
            BurstKind::Classic
        }
    });
    let count = burst_count(kind, intensify, reduced);

    let mut particles = Vec::with_capacity(count);
    let mut crackles = Vec::new();

    match kind {
        BurstKind::Ring => {
            for i in 0..count {
                let angle = (i as f32 / count as f32) * TAU;
                let speed = if intensify { 8.0 } else { 6.0 } + rng.gen::<f32>() * 0.5;
                particles.push(Particle::new(
                    origin,
                    palette[i % palette.len()],
                    speed,
                    angle,
                    ParticleOptions {
                        friction: Some(0.97),
                        size: Some(2.0),
                        decay: Some(0.012),
                        ..Default::default()
                    },
                    rng,
                ));
            }
        }
        BurstKind::Willow => {
            for _ in 0..count {
                let angle = rng.gen::<f32>() * TAU;
                let speed = rng.gen::<f32>() * 4.0 + 2.0;
                particles.push(Particle::new(
                    origin,
                    WILLOW_COLOR,
                    speed,
                    angle,
                    ParticleOptions {
                        gravity: Some(0.02),
                        friction: Some(0.98),
                        decay: Some(0.008),
                        size: Some(1.2),
                        has_trail: Some(!reduced),
                        ..Default::default()
                    },
                    rng,
                ));
            }
        }
        BurstKind::Crackle => {
            // Half the budget goes to primaries; the rest of the effect is the
            // delayed micro-bursts scheduled off a fraction of them.
            for _ in 0..count / 2 {
                let angle = rng.gen::<f32>() * TAU;
                let speed = rng.gen::<f32>() * 8.0 + 2.0;
                let p = Particle::new(
                    origin,
                    palette[rng.gen_range(0..palette.len())],
                    speed,
                    angle,
                    ParticleOptions {
                        decay: Some(0.03),
                        friction: Some(0.94),
                        ..Default::default()
                    },
                    rng,
                );
                if rng.gen::<f64>() < CRACKLE_CHANCE {
                    crackles.push(CrackleCharge {
                        origin: p.pos + p.vel * 10.0,
                        delay_ms: CRACKLE_DELAY_MIN_MS + rng.gen::<f32>() * CRACKLE_DELAY_SPAN_MS,
                    });
                }
                particles.push(p);
            }
        }
        BurstKind::Star => {
            // Five-point polar rose: r = |sin(angle * 2.5)| stretches the
            // points out further than the valleys.
            for i in 0..count {
                let angle = (i as f32 / count as f32) * TAU;
                let r = (angle * 2.5).sin().abs();
                let reach = if intensify { 10.0 } else { 6.0 };
                let speed = (2.0 + r * reach) * (0.9 + rng.gen::<f32>() * 0.2);
                particles.push(Particle::new(
                    origin,
                    palette[1],
                    speed,
                    angle,
                    ParticleOptions {
                        friction: Some(0.95),
                        decay: Some(0.015),
                        size: Some(2.0),
                        ..Default::default()
                    },
                    rng,
                ));
            }
        }
        BurstKind::Classic => {
            for _ in 0..count {
                let angle = rng.gen::<f32>() * TAU;
                let speed = rng.gen::<f32>() * if intensify { 10.0 } else { 7.0 } + 1.0;
                let has_trail = !reduced && rng.gen::<f64>() < CLASSIC_TRAIL_CHANCE;
                particles.push(Particle::new(
                    origin,
                    palette[rng.gen_range(0..palette.len())],
                    speed,
                    angle,
                    ParticleOptions {
                        has_trail: Some(has_trail),
                        flicker: Some(intensify),
                        ..Default::default()
                    },
                    rng,
                ));
            }
        }
    }

    let sfx_gain = match kind {
        BurstKind::Ring | BurstKind::Willow => BURST_GAIN_LOUD,
        _ => BURST_GAIN,
    };

    BurstPlan {
        kind,
        particles,
        crackles,
        sfx_gain,
    }
}

/// Particles for one fired crackle charge: a handful of tiny, fast-decaying
/// white sparks.
pub fn crackle_pop(origin: Vec2, rng: &mut impl Rng) -> Vec<Particle> {
    (0..CRACKLE_POP_COUNT)
        .map(|_| {
            let speed = rng.gen::<f32>() * 2.0;
            let angle = rng.gen::<f32>() * TAU;
            Particle::new(
                origin,
                CRACKLE_POP_COLOR,
                speed,
                angle,
                ParticleOptions {
                    size: Some(0.8),
                    decay: Some(0.05),
                    flicker: Some(true),
                    ..Default::default()
                },
                rng,
            )
        })
        .collect()
}
