use crate::constants::*;
use crate::particle::Particle;
use glam::Vec2;
use rand::Rng;

/// The live-particle collection and its per-frame step. Order of particles is
/// irrelevant; removal uses `retain`.
#[derive(Default)]
pub struct Fireworks {
    particles: Vec<Particle>,
}

impl Fireworks {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Admission check for new bursts. Under reduced-effects mode, all bursts
    /// (ambient and click-triggered alike) are suppressed while the live count
    /// exceeds the cap.
    pub fn can_burst(&self, reduce_effects: bool) -> bool {
        !(reduce_effects && self.particles.len() > LIVE_PARTICLE_CAP)
    }

    pub fn absorb(&mut self, batch: Vec<Particle>) {
        self.particles.extend(batch);
    }

    /// Advance every particle one tick, spawn trail children, and cull the
    /// dead. Children spawned this frame are not advanced until next frame.
    pub fn step(&mut self, rng: &mut impl Rng) {
        let mut trails = Vec::new();
        for p in &mut self.particles {
            p.update();
            if p.has_trail && p.life > TRAIL_MIN_LIFE && rng.gen::<f64>() < TRAIL_SPAWN_CHANCE {
                trails.push(p.trail_child(rng));
            }
        }
        self.particles.retain(|p| !p.is_dead());
        self.particles.append(&mut trails);
    }
}

/// Per-frame probability roll for an ambient burst. Reduced-effects mode
/// never auto-triggers.
pub fn roll_ambient(rng: &mut impl Rng, midnight: bool, reduce_effects: bool) -> bool {
    if reduce_effects {
        return false;
    }
    let chance = if midnight {
        AMBIENT_CHANCE_MIDNIGHT
    } else {
        AMBIENT_CHANCE
    };
    rng.gen::<f64>() < chance
}

/// Random pick from the fixed ambient-message list for the floating overlay.
pub fn pick_floating_message(rng: &mut impl Rng) -> &'static str {
    FLOATING_MESSAGES[rng.gen_range(0..FLOATING_MESSAGES.len())]
}

/// Random ambient-burst origin: anywhere horizontally, upper band vertically.
pub fn ambient_origin(rng: &mut impl Rng, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        rng.gen::<f32>() * width,
        rng.gen::<f32>() * height * AMBIENT_VERTICAL_BAND + AMBIENT_TOP_OFFSET,
    )
}
