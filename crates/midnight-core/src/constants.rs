// Tuning constants shared by the simulation, the burst generator, and the
// web frontend. Velocity/decay values are calibrated per display frame at
// ~60Hz; the loop deliberately applies no delta-time scaling.

/// Fixed color palettes a burst draws from. Each palette is three hex colors.
pub const PALETTES: [[&str; 3]; 6] = [
    ["#ffd700", "#ffffff", "#ff8c00"], // gold & white
    ["#ff00ff", "#8a2be2", "#4b0082"], // purple & indigo
    ["#00ffff", "#00ced1", "#ffffff"], // teal & cyan
    ["#ff4500", "#ff8c00", "#ffff00"], // fire
    ["#ff69b4", "#ff1493", "#ffffff"], // pink & rose
    ["#adff2f", "#00ff00", "#32cd32"], // neon green
];

pub const WILLOW_COLOR: &str = "#ffd700";
pub const CRACKLE_POP_COLOR: &str = "#ffffff";

// Burst sizing
pub const BASE_BURST_COUNT: usize = 100;
pub const WILLOW_BURST_COUNT: usize = 80;
pub const REDUCED_BURST_CAP: usize = 30;
pub const INTENSIFY_FACTOR: f32 = 1.5;

/// Under reduced-effects mode, no new burst is admitted while more than this
/// many particles are alive. Applies to click bursts as well as ambient ones.
pub const LIVE_PARTICLE_CAP: usize = 300;

// Ambient auto-burst probability per frame
pub const AMBIENT_CHANCE: f64 = 0.012;
pub const AMBIENT_CHANCE_MIDNIGHT: f64 = 0.15;
/// Ambient bursts spawn in the upper 60% of the canvas, nudged below the top edge.
pub const AMBIENT_VERTICAL_BAND: f32 = 0.6;
pub const AMBIENT_TOP_OFFSET: f32 = 50.0;

// Trails
pub const TRAIL_SPAWN_CHANCE: f64 = 0.4;
pub const TRAIL_MIN_LIFE: f32 = 0.2;
pub const CLASSIC_TRAIL_CHANCE: f64 = 0.2;

// Crackle sub-bursts
pub const CRACKLE_CHANCE: f64 = 0.4;
pub const CRACKLE_DELAY_MIN_MS: f32 = 400.0;
pub const CRACKLE_DELAY_SPAN_MS: f32 = 200.0;
pub const CRACKLE_POP_COUNT: usize = 5;
pub const CRACKLE_POP_GAIN: f32 = 0.15;

// Sound-effect relative gains per burst shape
pub const BURST_GAIN: f32 = 0.7;
pub const BURST_GAIN_LOUD: f32 = 0.9;

/// Fixed number of pre-allocated audio handles; excess play requests drop.
pub const SFX_POOL_SIZE: usize = 30;

pub const SFX_VARIANT_URLS: [&str; 5] = [
    "https://actions.google.com/sounds/v1/science_fiction/rocket_launcher.ogg",
    "https://actions.google.com/sounds/v1/explosions/explosion_underwater.ogg",
    "https://actions.google.com/sounds/v1/explosions/large_explosion.ogg",
    "https://actions.google.com/sounds/v1/explosions/cannon_fire.ogg",
    "https://actions.google.com/sounds/v1/impacts/cling_clang.ogg",
];
pub const BG_MUSIC_URL: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";
pub const CELEBRATION_URL: &str =
    "https://actions.google.com/sounds/v1/crowds/battle_crowd_celebrate.ogg";

// Countdown
pub const COUNTDOWN_TICK_MS: i32 = 10;
pub const TEST_WINDOW_MS: f64 = 10_000.0;

/// Timezone select entries as (IANA value, display label). The final entry is
/// the sentinel that switches the countdown into its 10-second test window.
pub const TIMEZONES: [(&str, &str); 6] = [
    ("Asia/Jakarta", "WIB (GMT+7)"),
    ("Asia/Tokyo", "JST (GMT+9)"),
    ("Europe/London", "GMT (UTC+0)"),
    ("America/New_York", "EST (GMT-5)"),
    ("Pacific/Auckland", "NZDT (GMT+13)"),
    ("TEST_MODE", "Test Mode (10s)"),
];

pub const FLOATING_MESSAGES: [&str; 6] = [
    "Thank you for being part of this year.",
    "Let's create better memories next year.",
    "May your dreams take flight this year.",
    "The best is yet to come.",
    "Wishing you endless joy and peace.",
    "Cheers to a new beginning!",
];
