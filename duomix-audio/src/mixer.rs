pub mod fold;
pub mod mock;

pub use fold::StereoFoldMixer;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MixerError {
    #[error("unsupported channel configuration {0:#x}")]
    UnsupportedMask(u32),
}

/// Capability folding multichannel input into stereo. Injected into the
/// engine so hosts can bring their own matrix implementation and tests can
/// substitute a mixer with controlled accept/reject behaviour.
///
/// `input` holds `frames` interleaved frames of `mask.count_ones()` channels,
/// `output` holds `frames` interleaved stereo frames. Implementations must
/// not touch either buffer beyond those bounds, and must honour `accumulate`
/// (sum then clamp to [-1.0, 1.0]) rather than overwriting.
pub trait ChannelMixer {
    fn mix(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        frames: usize,
        accumulate: bool,
        mask: u32,
    ) -> Result<(), MixerError>;
}
