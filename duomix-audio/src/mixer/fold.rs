use super::{ChannelMixer, MixerError};
use crate::config::MAXIMUM_CHANNEL_MASK;
use crate::dsp;
use duomix_protocol::layout::{
    CHANNEL_BACK_CENTER, CHANNEL_BACK_LEFT, CHANNEL_BACK_RIGHT, CHANNEL_BOTTOM_FRONT_CENTER,
    CHANNEL_BOTTOM_FRONT_LEFT, CHANNEL_BOTTOM_FRONT_RIGHT, CHANNEL_FRONT_CENTER,
    CHANNEL_FRONT_LEFT, CHANNEL_FRONT_LEFT_OF_CENTER, CHANNEL_FRONT_RIGHT,
    CHANNEL_FRONT_RIGHT_OF_CENTER, CHANNEL_FRONT_WIDE_LEFT, CHANNEL_FRONT_WIDE_RIGHT,
    CHANNEL_LOW_FREQUENCY, CHANNEL_LOW_FREQUENCY_2, CHANNEL_SIDE_LEFT, CHANNEL_SIDE_RIGHT,
    CHANNEL_TOP_BACK_CENTER, CHANNEL_TOP_BACK_LEFT, CHANNEL_TOP_BACK_RIGHT, CHANNEL_TOP_CENTER,
    CHANNEL_TOP_FRONT_CENTER, CHANNEL_TOP_FRONT_LEFT, CHANNEL_TOP_FRONT_RIGHT,
    CHANNEL_TOP_SIDE_LEFT, CHANNEL_TOP_SIDE_RIGHT,
};

const MINUS_3_DB: f32 = std::f32::consts::FRAC_1_SQRT_2;
const MINUS_6_DB: f32 = 0.5;

/// Matrix fold into stereo: every present channel contributes to the left and
/// right output through a gain pair derived from its position, and the whole
/// matrix is scaled so a full-scale input cannot saturate either column. The
/// gain table is rebuilt only when the mask changes.
#[derive(Debug, Default)]
pub struct StereoFoldMixer {
    cached_mask: u32,
    gains: Vec<(f32, f32)>,
}

impl StereoFoldMixer {
    pub fn new() -> Self {
        Self::default()
    }

    fn gains_for(&mut self, mask: u32) -> Result<&[(f32, f32)], MixerError> {
        if mask == 0 || mask & !MAXIMUM_CHANNEL_MASK != 0 {
            return Err(MixerError::UnsupportedMask(mask));
        }
        if self.cached_mask != mask {
            self.gains = build_gains(mask);
            self.cached_mask = mask;
        }
        Ok(&self.gains)
    }
}

impl ChannelMixer for StereoFoldMixer {
    fn mix(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        frames: usize,
        accumulate: bool,
        mask: u32,
    ) -> Result<(), MixerError> {
        let channels = mask.count_ones() as usize;
        let gains = self.gains_for(mask)?;
        debug_assert!(input.len() >= frames * channels);
        debug_assert!(output.len() >= frames * 2);

        for (frame, out) in input
            .chunks_exact(channels)
            .zip(output.chunks_exact_mut(2))
            .take(frames)
        {
            let mut left = 0.0;
            let mut right = 0.0;
            for (&sample, &(to_left, to_right)) in frame.iter().zip(gains.iter()) {
                left += sample * to_left;
                right += sample * to_right;
            }
            dsp::mix_sample(&mut out[0], left, accumulate);
            dsp::mix_sample(&mut out[1], right, accumulate);
        }

        Ok(())
    }
}

fn build_gains(mask: u32) -> Vec<(f32, f32)> {
    let mut gains: Vec<(f32, f32)> = (0..u32::BITS)
        .map(|bit| 1u32 << bit)
        .filter(|channel| mask & channel != 0)
        .map(channel_gain)
        .collect();

    // Scale so neither output column sums above unity for a full-scale input.
    let (sum_left, sum_right) = gains
        .iter()
        .fold((0.0f32, 0.0f32), |(l, r), g| (l + g.0, r + g.1));
    let peak = sum_left.max(sum_right);
    if peak > 1.0 {
        for gain in &mut gains {
            gain.0 /= peak;
            gain.1 /= peak;
        }
    }

    gains
}

fn channel_gain(channel: u32) -> (f32, f32) {
    match channel {
        CHANNEL_FRONT_LEFT | CHANNEL_FRONT_WIDE_LEFT => (1.0, 0.0),
        CHANNEL_FRONT_RIGHT | CHANNEL_FRONT_WIDE_RIGHT => (0.0, 1.0),
        CHANNEL_FRONT_LEFT_OF_CENTER
        | CHANNEL_BACK_LEFT
        | CHANNEL_SIDE_LEFT
        | CHANNEL_TOP_FRONT_LEFT
        | CHANNEL_TOP_BACK_LEFT
        | CHANNEL_TOP_SIDE_LEFT
        | CHANNEL_BOTTOM_FRONT_LEFT => (MINUS_3_DB, 0.0),
        CHANNEL_FRONT_RIGHT_OF_CENTER
        | CHANNEL_BACK_RIGHT
        | CHANNEL_SIDE_RIGHT
        | CHANNEL_TOP_FRONT_RIGHT
        | CHANNEL_TOP_BACK_RIGHT
        | CHANNEL_TOP_SIDE_RIGHT
        | CHANNEL_BOTTOM_FRONT_RIGHT => (0.0, MINUS_3_DB),
        CHANNEL_FRONT_CENTER
        | CHANNEL_BACK_CENTER
        | CHANNEL_TOP_CENTER
        | CHANNEL_TOP_FRONT_CENTER
        | CHANNEL_TOP_BACK_CENTER
        | CHANNEL_BOTTOM_FRONT_CENTER => (MINUS_3_DB, MINUS_3_DB),
        CHANNEL_LOW_FREQUENCY | CHANNEL_LOW_FREQUENCY_2 => (MINUS_6_DB, MINUS_6_DB),
        _ => (0.0, 0.0),
    }
}
