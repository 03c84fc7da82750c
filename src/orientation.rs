//! Rotation and subpixel order, both packed into the memory access control register.

/// Panel rotation, applied in hardware through the memory access control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// MADCTL scan bits for each rotation, indexed by `Rotation as usize`.
    const MADCTL: [u8; 4] = [0x00, 0x60, 0xC0, 0xA0];

    /// Maps any index onto a rotation, keeping only the two low bits.
    pub fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Get rotation angle in degrees for logging
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True for the two rotations where rows and columns trade places.
    pub fn is_transposed(self) -> bool {
        self.index() & 0x01 != 0
    }

    pub(crate) fn madctl(self) -> u8 {
        Self::MADCTL[self as usize]
    }
}

/// Subpixel order of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ColorOrder {
    pub(crate) fn madctl(self) -> u8 {
        match self {
            ColorOrder::Rgb => 0x00,
            ColorOrder::Bgr => 0x08,
        }
    }
}

impl From<bool> for ColorOrder {
    /// `true` selects RGB, `false` BGR.
    fn from(rgb: bool) -> Self {
        if rgb { ColorOrder::Rgb } else { ColorOrder::Bgr }
    }
}

/// Value of the memory access control register for a rotation and color order.
pub(crate) fn mode_control(rotation: Rotation, order: ColorOrder) -> u8 {
    rotation.madctl() | order.madctl()
}
