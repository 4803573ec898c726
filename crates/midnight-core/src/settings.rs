/// Process-wide user settings, held once by the frontend and read fresh by
/// the animation loop and countdown driver each tick. Mutated only through
/// the explicit setters below, never ambiently.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub is_muted: bool,
    pub volume: f32,
    pub reduce_effects: bool,
    pub active_timezone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_muted: false,
            volume: 0.5,
            reduce_effects: false,
            active_timezone: "Asia/Jakarta".to_string(),
        }
    }
}

impl Settings {
    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }

    pub fn toggle_reduce_effects(&mut self) {
        self.reduce_effects = !self.reduce_effects;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.active_timezone = timezone.into();
    }
}
