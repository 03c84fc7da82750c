//! Power-on register programs for the ST7735 panel variants.
//!
//! Module makers ship the controller with different glass and tune it
//! differently; the variants are named after the colored tab on the
//! protective film. Each program is a flat list of steps run in order by the
//! driver after the hardware reset.

use crate::instruction::Instruction;

/// ST7735 module variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelVariant {
    BlueTab,
    RedTab,
    GreenTab,
}

impl PanelVariant {
    pub(crate) fn program(self) -> &'static [Step] {
        match self {
            PanelVariant::BlueTab => BLUE_TAB,
            PanelVariant::RedTab => RED_TAB,
            PanelVariant::GreenTab => GREEN_TAB,
        }
    }
}

/// One entry of a register program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Command followed by its fixed parameters
    Write(Instruction, &'static [u8]),
    /// Wait before the next step
    Delay(u64),
    /// Memory access control from the current rotation and color order
    ModeControl,
    /// Column window from `start` to the last column
    Columns { start: u8 },
    /// Row window from `start` to the last row
    Rows { start: u8 },
}

use Instruction::*;
use Step::{Columns, Delay, ModeControl, Rows, Write};

const GAMMA_POSITIVE_B: &[u8] = &[
    0x02, 0x1c, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2d, 0x29, 0x25, 0x2b, 0x39, 0x00, 0x01, 0x03, 0x10,
];
const GAMMA_NEGATIVE_B: &[u8] = &[
    0x03, 0x1d, 0x07, 0x06, 0x2e, 0x2c, 0x29, 0x2d, 0x2e, 0x2e, 0x37, 0x3f, 0x00, 0x00, 0x02, 0x10,
];
const GAMMA_POSITIVE_R: &[u8] = &[
    0x0f, 0x1a, 0x0f, 0x18, 0x2f, 0x28, 0x20, 0x22, 0x1f, 0x1b, 0x23, 0x37, 0x00, 0x07, 0x02, 0x10,
];
const GAMMA_NEGATIVE_R: &[u8] = &[
    0x0f, 0x1b, 0x0f, 0x17, 0x33, 0x2c, 0x29, 0x2e, 0x30, 0x30, 0x39, 0x3f, 0x00, 0x07, 0x03, 0x10,
];

// Frame rate: fosc / ((RTNA x 2 + 40) x (LINE + FPA + BPA))
const FRAME_RATE: &[u8] = &[0x01, 0x2c, 0x2d];
const FRAME_RATE_PARTIAL: &[u8] = &[0x01, 0x2c, 0x2d, 0x01, 0x2c, 0x2d];

static BLUE_TAB: &[Step] = &[
    Write(SoftwareReset, &[]),
    Delay(50),
    Write(SleepOut, &[]),
    Delay(500),
    Write(PixelFormatSet, &[0x05]), // 16-bit color
    Write(FrameRateControl1, &[0x00, 0x06, 0x03]),
    Delay(10),
    ModeControl,
    Write(DisplaySettings5, &[0x15, 0x02]),
    Write(InversionControl, &[0x00]),
    Write(PowerControl1, &[0x02, 0x70]),
    Write(PowerControl2, &[0x05]),
    Write(PowerControl3, &[0x01, 0x02]),
    Write(VcomControl1, &[0x3C, 0x38]),
    Write(PowerControl6, &[0x11, 0x15]),
    Write(GammaPositive, GAMMA_POSITIVE_B),
    Write(GammaNegative, GAMMA_NEGATIVE_B),
    Delay(10),
    Columns { start: 2 },
    Rows { start: 1 },
    Write(NormalDisplayOn, &[]),
    Delay(10),
    Write(MemoryWrite, &[]),
    Delay(500),
    Write(DisplayOn, &[]),
    Delay(100),
];

static RED_TAB: &[Step] = &[
    Write(SoftwareReset, &[]),
    Delay(150),
    Write(SleepOut, &[]),
    Delay(500),
    Write(FrameRateControl1, FRAME_RATE),
    Write(FrameRateControl2, FRAME_RATE),
    Write(FrameRateControl3, FRAME_RATE_PARTIAL),
    Delay(10),
    Write(InversionControl, &[0x07]),
    Write(PowerControl1, &[0xA2, 0x02, 0x84]),
    Write(PowerControl2, &[0xC5]),
    Write(PowerControl3, &[0x0A, 0x00]),
    Write(PowerControl4, &[0x8A, 0x2A]),
    Write(PowerControl5, &[0x8A, 0xEE]),
    Write(VcomControl1, &[0x0E]),
    Write(DisplayInversionOff, &[]),
    ModeControl,
    Write(PixelFormatSet, &[0x05]),
    Columns { start: 0 },
    Rows { start: 0 },
    Write(GammaPositive, GAMMA_POSITIVE_R),
    Write(GammaNegative, GAMMA_NEGATIVE_R),
    Delay(10),
    Write(NormalDisplayOn, &[]),
    Delay(10),
    Write(DisplayOn, &[]),
    Delay(100),
];

static GREEN_TAB: &[Step] = &[
    Write(SoftwareReset, &[]),
    Delay(150),
    Write(SleepOut, &[]),
    Delay(255),
    Write(FrameRateControl1, FRAME_RATE),
    Write(FrameRateControl2, FRAME_RATE),
    Write(FrameRateControl3, FRAME_RATE_PARTIAL),
    Write(InversionControl, &[0x07]),
    Write(PowerControl1, &[0xA2, 0x02, 0x84]),
    Write(PowerControl2, &[0xC5]),
    Write(PowerControl3, &[0x0A, 0x00]),
    Write(PowerControl4, &[0x8A, 0x2A]),
    Write(PowerControl5, &[0x8A, 0xEE]),
    Write(VcomControl1, &[0x0E]),
    Write(DisplayInversionOff, &[]),
    ModeControl,
    Write(PixelFormatSet, &[0x05]),
    Columns { start: 1 },
    Rows { start: 1 },
    Write(GammaPositive, GAMMA_POSITIVE_B),
    Write(GammaNegative, GAMMA_NEGATIVE_B),
    Write(NormalDisplayOn, &[]),
    Delay(10),
    Write(DisplayOn, &[]),
    Delay(100),
];
