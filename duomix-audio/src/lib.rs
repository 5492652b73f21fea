pub mod config;
pub mod downmix;
pub(crate) mod dsp;
pub mod error;
pub mod mixer;

pub use downmix::{DownmixEngine, EngineState, MixStrategy, Processed};
pub use error::EffectError;

pub const OUTPUT_CHANNEL_COUNT: usize = 2;
