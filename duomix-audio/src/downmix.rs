use crate::OUTPUT_CHANNEL_COUNT;
use crate::config::{is_channel_mask_valid, validate_common_config};
use crate::dsp;
use crate::error::EffectError;
use crate::mixer::{ChannelMixer, StereoFoldMixer};
use duomix_protocol::config::{CommonConfig, SAMPLE_SIZE_BYTES};
use std::fmt::{Display, Formatter};
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Active,
}

impl Display for EngineState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineState::Uninitialized => write!(f, "uninitialized"),
            EngineState::Initialized => write!(f, "initialized"),
            EngineState::Active => write!(f, "active"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixStrategy {
    /// Keep the first two input channels, drop the rest.
    Strip,
    /// Blend every input channel into stereo through the channel mixer.
    Fold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Processed {
    pub consumed: usize,
    pub produced: usize,
}

/// Multichannel-to-stereo downmixer. One logical owner drives the lifecycle
/// (configure, enable, process, disable); the engine provides no internal
/// locking.
pub struct DownmixEngine<M: ChannelMixer> {
    state: EngineState,
    strategy: MixStrategy,
    channel_mask: u32,
    input_channel_count: usize,
    common: CommonConfig,
    mixer: M,
}

impl DownmixEngine<StereoFoldMixer> {
    pub fn with_default_mixer(common: &CommonConfig) -> Self {
        Self::new(common, StereoFoldMixer::new())
    }
}

impl<M: ChannelMixer> DownmixEngine<M> {
    /// Always returns an engine. If the input channel mask is unsupported the
    /// engine stays uninitialized and every processing call is rejected until
    /// a valid configuration is set.
    #[instrument(level = "trace", skip(common, mixer))]
    pub fn new(common: &CommonConfig, mixer: M) -> Self {
        let mut engine = DownmixEngine {
            state: EngineState::Uninitialized,
            strategy: MixStrategy::Fold,
            channel_mask: 0,
            input_channel_count: 0,
            common: *common,
            mixer,
        };
        engine.init_params(common);
        engine
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn strategy(&self) -> MixStrategy {
        self.strategy
    }

    /// Parameter derivation never selects `Strip`; this is the path by which
    /// it becomes reachable. Does not touch the lifecycle state.
    pub fn set_strategy(&mut self, strategy: MixStrategy) {
        self.strategy = strategy;
    }

    pub fn mixer(&self) -> &M {
        &self.mixer
    }

    #[instrument(level = "trace", skip(self), fields(state = %self.state))]
    pub fn enable(&mut self) -> Result<(), EffectError> {
        if self.state != EngineState::Initialized {
            return Err(EffectError::Lifecycle(
                "enable requires a configured, inactive engine",
            ));
        }
        self.state = EngineState::Active;
        Ok(())
    }

    #[instrument(level = "trace", skip(self), fields(state = %self.state))]
    pub fn disable(&mut self) -> Result<(), EffectError> {
        if self.state != EngineState::Active {
            return Err(EffectError::Lifecycle("disable requires an active engine"));
        }
        self.state = EngineState::Initialized;
        Ok(())
    }

    /// Replaces the configuration wholesale. Rejects before mutating: on
    /// failure the previous configuration and state stay in effect. On
    /// success the engine lands in `Initialized` and must be re-enabled.
    #[instrument(level = "trace", skip(self, common))]
    pub fn set_config(&mut self, common: &CommonConfig) -> Result<(), EffectError> {
        if !validate_common_config(common) {
            return Err(EffectError::IllegalArgument("rejected engine configuration"));
        }
        self.common = *common;
        self.state = EngineState::Uninitialized;
        self.init_params(common);
        Ok(())
    }

    /// Processes `sample_count` interleaved input samples into interleaved
    /// stereo. On success the whole input is consumed and
    /// `sample_count / input_channel_count * 2` samples are produced; on any
    /// failure nothing is consumed or produced.
    pub fn process(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        sample_count: usize,
    ) -> Result<Processed, EffectError> {
        if input.len() < sample_count {
            return Err(EffectError::IllegalArgument(
                "input buffer shorter than sample count",
            ));
        }
        if self.common.input.frame_count != self.common.output.frame_count {
            return Err(EffectError::IllegalArgument(
                "input and output frame counts differ",
            ));
        }
        let frame_size = self.common.input.frame_size_bytes();
        if frame_size == 0 {
            return Err(EffectError::IllegalArgument("input frame size is zero"));
        }
        let frames = sample_count * SAMPLE_SIZE_BYTES / frame_size;
        if output.len() < frames * OUTPUT_CHANNEL_COUNT {
            return Err(EffectError::IllegalArgument(
                "output buffer shorter than produced sample count",
            ));
        }

        match self.state {
            EngineState::Uninitialized => {
                tracing::error!("Trying to use an uninitialized downmixer");
                return Err(EffectError::IllegalState("downmixer is not configured"));
            }
            EngineState::Initialized => {
                tracing::error!("Trying to use a disabled downmixer");
                return Err(EffectError::IllegalState("downmixer is not enabled"));
            }
            EngineState::Active => {}
        }

        // The accumulate hook stays disabled in this call path.
        let accumulate = false;
        let consumed_input = &input[..frames * self.input_channel_count];
        let stereo_output = &mut output[..frames * OUTPUT_CHANNEL_COUNT];

        match self.strategy {
            MixStrategy::Strip => {
                dsp::strip_to_stereo(
                    consumed_input,
                    stereo_output,
                    self.input_channel_count,
                    accumulate,
                );
            }
            MixStrategy::Fold => {
                if let Err(err) =
                    self.mixer
                        .mix(consumed_input, stereo_output, frames, accumulate, self.channel_mask)
                {
                    tracing::error!(%err, "Multichannel configuration is not supported");
                    return Err(EffectError::IllegalState(
                        "channel mixer rejected the configured mask",
                    ));
                }
            }
        }

        Ok(Processed {
            consumed: sample_count,
            produced: frames * OUTPUT_CHANNEL_COUNT,
        })
    }

    fn init_params(&mut self, common: &CommonConfig) {
        // A non-positional or unsupported channel mask leaves the engine
        // unconfigured; processing calls will be rejected until reconfigured.
        let channel_layout = common.input.channel_layout;
        if !is_channel_mask_valid(&channel_layout) {
            tracing::error!(%channel_layout, "Input channel mask not supported");
            return;
        }
        let Some(mask) = channel_layout.layout_mask() else {
            return;
        };

        // The general fold strategy is always selected here; strip stays
        // reachable through set_strategy only.
        self.strategy = MixStrategy::Fold;
        self.channel_mask = mask;
        self.input_channel_count = channel_layout.channel_count();
        self.state = EngineState::Initialized;
    }
}
