use glam::Vec2;
use rand::Rng;

/// Optional overrides for a spawned particle. Unset fields fall back to the
/// classic-burst defaults, some of which are randomized per particle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParticleOptions {
    pub gravity: Option<f32>,
    pub friction: Option<f32>,
    pub decay: Option<f32>,
    pub size: Option<f32>,
    pub flicker: Option<bool>,
    pub has_trail: Option<bool>,
}

/// A single decaying point light. `alpha` and `life` drop by `decay` every
/// tick; the particle is removed exactly when `alpha` reaches or crosses zero.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: &'static str,
    pub alpha: f32,
    pub life: f32,
    pub decay: f32,
    pub friction: f32,
    pub gravity: f32,
    pub size: f32,
    pub flicker: bool,
    pub has_trail: bool,
}

impl Particle {
    pub fn new(
        pos: Vec2,
        color: &'static str,
        speed: f32,
        angle: f32,
        opts: ParticleOptions,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            pos,
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
            color,
            alpha: 1.0,
            life: 1.0,
            gravity: opts.gravity.unwrap_or(0.04),
            friction: opts.friction.unwrap_or(0.96),
            decay: opts.decay.unwrap_or_else(|| rng.gen::<f32>() * 0.02 + 0.01),
            size: opts.size.unwrap_or_else(|| rng.gen::<f32>() * 2.0 + 1.0),
            flicker: opts.flicker.unwrap_or_else(|| rng.gen_bool(0.5)),
            has_trail: opts.has_trail.unwrap_or(false),
        }
    }

    /// One fixed per-frame physics step. No delta-time scaling: the constants
    /// are tuned assuming a ~60Hz frame cadence.
    pub fn update(&mut self) {
        self.vel *= self.friction;
        self.vel.y += self.gravity;
        self.pos += self.vel;
        self.alpha -= self.decay;
        self.life -= self.decay;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.alpha <= 0.0
    }

    /// Alpha to draw with this frame: flickering particles jitter their
    /// brightness between 60% and 100% of the current alpha.
    #[inline]
    pub fn render_alpha(&self, rng: &mut impl Rng) -> f32 {
        if self.flicker {
            self.alpha * (rng.gen::<f32>() * 0.4 + 0.6)
        } else {
            self.alpha
        }
    }

    /// Particles larger than 2px get a soft glow halo in their own color.
    #[inline]
    pub fn has_glow(&self) -> bool {
        self.size > 2.0
    }

    /// Smaller, fast-decaying child particle left behind by a trailing parent.
    pub fn trail_child(&self, rng: &mut impl Rng) -> Particle {
        Particle::new(
            self.pos,
            self.color,
            0.1,
            0.0,
            ParticleOptions {
                size: Some(self.size * 0.6),
                decay: Some(0.1),
                friction: Some(1.0),
                gravity: Some(0.01),
                flicker: Some(false),
                has_trail: Some(false),
            },
            rng,
        )
    }
}
