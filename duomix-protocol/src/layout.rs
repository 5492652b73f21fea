use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

// Channel position bits. Bit order is channel interleave order: a stream
// carrying a layout mask stores the sample for the lowest set bit first.
pub const CHANNEL_FRONT_LEFT: u32 = 1 << 0;
pub const CHANNEL_FRONT_RIGHT: u32 = 1 << 1;
pub const CHANNEL_FRONT_CENTER: u32 = 1 << 2;
pub const CHANNEL_LOW_FREQUENCY: u32 = 1 << 3;
pub const CHANNEL_BACK_LEFT: u32 = 1 << 4;
pub const CHANNEL_BACK_RIGHT: u32 = 1 << 5;
pub const CHANNEL_FRONT_LEFT_OF_CENTER: u32 = 1 << 6;
pub const CHANNEL_FRONT_RIGHT_OF_CENTER: u32 = 1 << 7;
pub const CHANNEL_BACK_CENTER: u32 = 1 << 8;
pub const CHANNEL_SIDE_LEFT: u32 = 1 << 9;
pub const CHANNEL_SIDE_RIGHT: u32 = 1 << 10;
pub const CHANNEL_TOP_CENTER: u32 = 1 << 11;
pub const CHANNEL_TOP_FRONT_LEFT: u32 = 1 << 12;
pub const CHANNEL_TOP_FRONT_CENTER: u32 = 1 << 13;
pub const CHANNEL_TOP_FRONT_RIGHT: u32 = 1 << 14;
pub const CHANNEL_TOP_BACK_LEFT: u32 = 1 << 15;
pub const CHANNEL_TOP_BACK_CENTER: u32 = 1 << 16;
pub const CHANNEL_TOP_BACK_RIGHT: u32 = 1 << 17;
pub const CHANNEL_TOP_SIDE_LEFT: u32 = 1 << 18;
pub const CHANNEL_TOP_SIDE_RIGHT: u32 = 1 << 19;
pub const CHANNEL_BOTTOM_FRONT_LEFT: u32 = 1 << 20;
pub const CHANNEL_BOTTOM_FRONT_CENTER: u32 = 1 << 21;
pub const CHANNEL_BOTTOM_FRONT_RIGHT: u32 = 1 << 22;
pub const CHANNEL_LOW_FREQUENCY_2: u32 = 1 << 23;
pub const CHANNEL_FRONT_WIDE_LEFT: u32 = 1 << 24;
pub const CHANNEL_FRONT_WIDE_RIGHT: u32 = 1 << 25;

pub const LAYOUT_MONO: u32 = CHANNEL_FRONT_LEFT;
pub const LAYOUT_STEREO: u32 = CHANNEL_FRONT_LEFT | CHANNEL_FRONT_RIGHT;
pub const LAYOUT_5POINT1: u32 = LAYOUT_STEREO
    | CHANNEL_FRONT_CENTER
    | CHANNEL_LOW_FREQUENCY
    | CHANNEL_BACK_LEFT
    | CHANNEL_BACK_RIGHT;
pub const LAYOUT_7POINT1: u32 = LAYOUT_5POINT1 | CHANNEL_SIDE_LEFT | CHANNEL_SIDE_RIGHT;
pub const LAYOUT_7POINT1POINT4: u32 = LAYOUT_7POINT1
    | CHANNEL_TOP_FRONT_LEFT
    | CHANNEL_TOP_FRONT_RIGHT
    | CHANNEL_TOP_BACK_LEFT
    | CHANNEL_TOP_BACK_RIGHT;
pub const LAYOUT_22POINT2: u32 = LAYOUT_7POINT1POINT4
    | CHANNEL_FRONT_LEFT_OF_CENTER
    | CHANNEL_FRONT_RIGHT_OF_CENTER
    | CHANNEL_BACK_CENTER
    | CHANNEL_TOP_CENTER
    | CHANNEL_TOP_FRONT_CENTER
    | CHANNEL_TOP_BACK_CENTER
    | CHANNEL_TOP_SIDE_LEFT
    | CHANNEL_TOP_SIDE_RIGHT
    | CHANNEL_BOTTOM_FRONT_LEFT
    | CHANNEL_BOTTOM_FRONT_CENTER
    | CHANNEL_BOTTOM_FRONT_RIGHT
    | CHANNEL_LOW_FREQUENCY_2;

/// A tagged channel layout. Only the `LayoutMask` tag carries positional
/// channel information; consumers must check the tag before reading the mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelLayout {
    #[default]
    None,
    IndexMask(u32),
    LayoutMask(u32),
}

impl ChannelLayout {
    pub fn layout(mask: u32) -> Self {
        Self::LayoutMask(mask)
    }

    pub fn layout_mask(&self) -> Option<u32> {
        match self {
            Self::LayoutMask(mask) => Some(*mask),
            _ => None,
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::IndexMask(mask) | Self::LayoutMask(mask) => mask.count_ones() as usize,
        }
    }
}

impl Display for ChannelLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::IndexMask(mask) => write!(f, "indexMask({mask:#x})"),
            Self::LayoutMask(mask) => write!(f, "layoutMask({mask:#x})"),
        }
    }
}
