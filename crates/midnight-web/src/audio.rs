use midnight_core::{Settings, SfxHandle, SfxPool, BG_MUSIC_URL, CELEBRATION_URL, SFX_POOL_SIZE, SFX_VARIANT_URLS};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Kick off playback and swallow the result. Autoplay-policy rejections are
/// expected and never surfaced.
fn play_ignoring_policy(el: &web::HtmlAudioElement) {
    if let Ok(promise) = el.play() {
        spawn_local(async move {
            let _ = JsFuture::from(promise).await;
        });
    }
}

/// A pre-loaded `<audio>` element backing one pool slot.
pub struct AudioClip {
    el: web::HtmlAudioElement,
}

impl AudioClip {
    pub fn new(url: &str) -> Option<Self> {
        let el = web::HtmlAudioElement::new_with_src(url).ok()?;
        el.set_preload("auto");
        Some(Self { el })
    }
}

impl SfxHandle for AudioClip {
    fn is_idle(&self) -> bool {
        self.el.paused() || self.el.ended()
    }

    fn play(&self, volume: f32) {
        self.el.set_volume(volume as f64);
        self.el.set_current_time(0.0);
        play_ignoring_policy(&self.el);
    }
}

/// Build the fixed pool, distributing the clip variants round-robin so the
/// pool has sound variety without per-play allocation.
pub fn build_sfx_pool() -> SfxPool<AudioClip> {
    let mut handles = Vec::with_capacity(SFX_POOL_SIZE);
    for i in 0..SFX_POOL_SIZE {
        let url = SFX_VARIANT_URLS[i % SFX_VARIANT_URLS.len()];
        if let Some(clip) = AudioClip::new(url) {
            handles.push(clip);
        }
    }
    log::info!("sfx pool ready with {} handles", handles.len());
    SfxPool::new(handles)
}

/// The looping background track, created lazily on start.
pub struct BgMusic {
    el: Option<web::HtmlAudioElement>,
}

impl BgMusic {
    pub fn new() -> Self {
        let el = web::HtmlAudioElement::new_with_src(BG_MUSIC_URL).ok();
        if let Some(el) = &el {
            el.set_loop(true);
        }
        Self { el }
    }

    /// Apply current volume/mute and (re)start playback.
    pub fn apply(&self, settings: &Settings) {
        if let Some(el) = &self.el {
            el.set_volume(settings.volume as f64);
            el.set_muted(settings.is_muted);
            if el.paused() {
                play_ignoring_policy(el);
            }
        }
    }
}

impl Default for BgMusic {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot celebration cue for the moment the countdown reaches zero.
pub fn play_celebration(settings: &Settings) {
    if settings.is_muted {
        return;
    }
    if let Ok(el) = web::HtmlAudioElement::new_with_src(CELEBRATION_URL) {
        el.set_volume(settings.volume as f64);
        play_ignoring_policy(&el);
    }
}
