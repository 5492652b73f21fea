use duomix_protocol::config::CommonConfig;
use duomix_protocol::layout::{
    CHANNEL_FRONT_WIDE_LEFT, CHANNEL_FRONT_WIDE_RIGHT, ChannelLayout, LAYOUT_22POINT2,
    LAYOUT_STEREO,
};

/// Every channel position the engine accepts on its input: 22.2 surround plus
/// the two wide front channels.
pub const MAXIMUM_CHANNEL_MASK: u32 =
    LAYOUT_22POINT2 | CHANNEL_FRONT_WIDE_LEFT | CHANNEL_FRONT_WIDE_RIGHT;

pub fn is_channel_mask_valid(channel_layout: &ChannelLayout) -> bool {
    let Some(mask) = channel_layout.layout_mask() else {
        return false;
    };
    let unsupported = mask & !MAXIMUM_CHANNEL_MASK;
    if unsupported != 0 {
        tracing::error!("Unsupported channel bits {unsupported:#x} in input mask {mask:#x}");
        return false;
    }
    true
}

pub fn is_stereo_channel_mask(channel_layout: &ChannelLayout) -> bool {
    channel_layout.layout_mask() == Some(LAYOUT_STEREO)
}

/// Guard called before the engine is constructed or reconfigured. The boolean
/// is the only propagated signal; each rejection logs its cause.
pub fn validate_common_config(common: &CommonConfig) -> bool {
    if common.input.sample_rate != common.output.sample_rate {
        tracing::error!(
            input = common.input.sample_rate,
            output = common.output.sample_rate,
            "Sample rate conversion is not supported"
        );
        return false;
    }

    if !is_stereo_channel_mask(&common.output.channel_layout) {
        tracing::error!(
            output = %common.output.channel_layout,
            "Output must be stereo"
        );
        return false;
    }

    if !is_channel_mask_valid(&common.input.channel_layout) {
        tracing::error!(
            input = %common.input.channel_layout,
            "Invalid input channel mask"
        );
        return false;
    }

    true
}
