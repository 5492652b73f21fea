use crate::layout::ChannelLayout;
use serde::{Deserialize, Serialize};

pub const SAMPLE_SIZE_BYTES: usize = size_of::<f32>();

/// One end of an audio stream: sample rate, channel layout and the number of
/// frames the host hands over per processing call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDescriptor {
    pub sample_rate: u32,
    pub channel_layout: ChannelLayout,
    pub frame_count: usize,
}

impl AudioDescriptor {
    pub fn new(sample_rate: u32, channel_layout: ChannelLayout, frame_count: usize) -> Self {
        Self {
            sample_rate,
            channel_layout,
            frame_count,
        }
    }

    pub fn frame_size_bytes(&self) -> usize {
        self.channel_layout.channel_count() * SAMPLE_SIZE_BYTES
    }
}

/// A full engine configuration. Replaced wholesale on reconfigure; the engine
/// never patches individual fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonConfig {
    pub input: AudioDescriptor,
    pub output: AudioDescriptor,
}

impl CommonConfig {
    pub fn new(input: AudioDescriptor, output: AudioDescriptor) -> Self {
        Self { input, output }
    }
}
