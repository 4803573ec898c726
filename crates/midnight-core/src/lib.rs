pub mod burst;
pub mod constants;
pub mod countdown;
pub mod particle;
pub mod settings;
pub mod sfx;
pub mod sim;
pub mod wish;

pub use burst::*;
pub use constants::*;
pub use countdown::*;
pub use particle::*;
pub use settings::*;
pub use sfx::*;
pub use sim::*;
pub use wish::*;
