//! ST7735 command opcodes.

/// ST7735 command set used by this driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// Software Reset (01h) - Restores registers to their default values
    SoftwareReset = 0x01,

    /// Sleep Out (11h) - Exit low-power mode, needs 120ms before the next command
    SleepOut = 0x11,
    /// Normal Display Mode On (13h) - Full-screen mode
    NormalDisplayOn = 0x13,

    /// Display Inversion Off (20h)
    DisplayInversionOff = 0x20,
    /// Display Inversion On (21h)
    DisplayInversionOn = 0x21,
    /// Display Off (28h)
    DisplayOff = 0x28,
    /// Display On (29h)
    DisplayOn = 0x29,

    /// Column Address Set (2Ah) - Horizontal addressing bounds
    ColumnAddressSet = 0x2A,
    /// Row Address Set (2Bh) - Vertical addressing bounds
    RowAddressSet = 0x2B,
    /// Memory Write (2Ch) - Following data goes into the addressed window
    MemoryWrite = 0x2C,

    /// Memory Data Access Control (36h) - Scan direction and RGB/BGR order
    MemoryAccessControl = 0x36,
    /// Interface Pixel Format (3Ah)
    PixelFormatSet = 0x3A,

    /// Frame Rate Control, normal mode (B1h)
    FrameRateControl1 = 0xB1,
    /// Frame Rate Control, idle mode (B2h)
    FrameRateControl2 = 0xB2,
    /// Frame Rate Control, partial mode (B3h)
    FrameRateControl3 = 0xB3,
    /// Display Inversion Control (B4h)
    InversionControl = 0xB4,
    /// Display Function Set 5 (B6h)
    DisplaySettings5 = 0xB6,

    /// Power Control 1 (C0h) - GVDD / AVDD
    PowerControl1 = 0xC0,
    /// Power Control 2 (C1h) - VGH / VGL
    PowerControl2 = 0xC1,
    /// Power Control 3 (C2h) - normal mode op-amp current
    PowerControl3 = 0xC2,
    /// Power Control 4 (C3h) - idle mode op-amp current
    PowerControl4 = 0xC3,
    /// Power Control 5 (C4h) - partial mode op-amp current
    PowerControl5 = 0xC4,
    /// VCOM Control 1 (C5h)
    VcomControl1 = 0xC5,

    /// Gamma Adjustment, positive polarity (E0h)
    GammaPositive = 0xE0,
    /// Gamma Adjustment, negative polarity (E1h)
    GammaNegative = 0xE1,

    /// Power Control 6 (FCh) - partial + idle mode op-amp current
    PowerControl6 = 0xFC,
}

impl From<Instruction> for u8 {
    fn from(instruction: Instruction) -> Self {
        instruction as u8
    }
}
