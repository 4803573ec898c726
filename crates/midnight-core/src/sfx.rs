use rand::Rng;

/// One pre-loaded short audio clip. "Idle" means not currently playing;
/// a finished clip self-releases back to the pool.
pub trait SfxHandle {
    fn is_idle(&self) -> bool;
    fn play(&self, volume: f32);
}

/// Fixed-size pool of audio handles. Play requests are admitted onto a random
/// idle handle; when the pool is saturated the request is dropped silently
/// rather than queued or interrupting a playing clip.
pub struct SfxPool<H: SfxHandle> {
    handles: Vec<H>,
}

impl<H: SfxHandle> SfxPool<H> {
    pub fn new(handles: Vec<H>) -> Self {
        Self { handles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Returns true if a handle actually started playing. Muted requests and
    /// saturated-pool requests are no-ops.
    pub fn play(&self, master: f32, relative: f32, muted: bool, rng: &mut impl Rng) -> bool {
        if muted {
            return false;
        }
        let idle: Vec<&H> = self.handles.iter().filter(|h| h.is_idle()).collect();
        if idle.is_empty() {
            log::debug!("sfx pool saturated, dropping play request");
            return false;
        }
        let handle = idle[rng.gen_range(0..idle.len())];
        handle.play((master * relative).min(1.0));
        true
    }
}
