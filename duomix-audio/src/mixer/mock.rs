use super::{ChannelMixer, MixerError};
use crate::dsp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehaviour {
    /// Accept every call and write `fill` into each output sample.
    Accept { fill: f32 },
    /// Reject every call with `MixerError::UnsupportedMask`.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockCall {
    pub frames: usize,
    pub accumulate: bool,
    pub mask: u32,
}

/// Test double for the channel mixer capability: records every call and
/// accepts or rejects according to the configured behaviour.
#[derive(Debug)]
pub struct MockMixer {
    behaviour: MockBehaviour,
    pub calls: Vec<MockCall>,
}

impl MockMixer {
    pub fn accepting(fill: f32) -> Self {
        Self {
            behaviour: MockBehaviour::Accept { fill },
            calls: Vec::new(),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            behaviour: MockBehaviour::Reject,
            calls: Vec::new(),
        }
    }
}

impl ChannelMixer for MockMixer {
    fn mix(
        &mut self,
        _input: &[f32],
        output: &mut [f32],
        frames: usize,
        accumulate: bool,
        mask: u32,
    ) -> Result<(), MixerError> {
        self.calls.push(MockCall {
            frames,
            accumulate,
            mask,
        });

        match self.behaviour {
            MockBehaviour::Reject => {
                tracing::debug!("MockMixer rejecting mask {mask:#x}");
                Err(MixerError::UnsupportedMask(mask))
            }
            MockBehaviour::Accept { fill } => {
                for slot in output.iter_mut().take(frames * 2) {
                    dsp::mix_sample(slot, fill, accumulate);
                }
                Ok(())
            }
        }
    }
}
