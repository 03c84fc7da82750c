#![no_std]

//! Blocking driver for ST7735 TFT panels on a 4-wire SPI bus.
//!
//! The driver owns the bus and the chip-select, data/command and reset lines.
//! Every drawing operation goes through the controller's address window:
//! column and row ranges are programmed, then a stream of RGB565 pixels is
//! written into the window. No frame buffer is kept on the host side.

use core::convert::Infallible;
use core::fmt;

use embedded_hal::digital::OutputPin;

mod color;
mod font;
mod graphics;
mod init;
mod instruction;
mod orientation;
mod raster;
mod text;
mod transport;

pub use color::*;
pub use font::{DEFAULT_FONT, Font};
pub use init::PanelVariant;
pub use instruction::Instruction;
pub use orientation::{ColorOrder, Rotation};
pub use transport::{MAX_TRANSFER_LEN, Transport};

use init::Step;

/// Default panel width in pixels (portrait)
pub const DEFAULT_WIDTH: u16 = 128;
/// Default panel height in pixels (portrait)
pub const DEFAULT_HEIGHT: u16 = 160;
/// Addresses are sent as 16-bit values, but the controller only decodes 8 bits
pub const MAX_DIMENSION: u16 = 256;

// Pixels per transfer when streaming a solid color
const BATCH_PIXELS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Width at rotation 0
    pub width: u16,
    /// Height at rotation 0
    pub height: u16,
    pub color_order: ColorOrder,
    /// Length of each half of the hardware reset pulse
    pub reset_pulse_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            color_order: ColorOrder::Rgb,
            reset_pulse_ms: 500,
        }
    }
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::DimensionTooLarge);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero
    ZeroDimension,
    /// Width or height exceeds [`MAX_DIMENSION`]
    DimensionTooLarge,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroDimension => f.write_str("panel dimension is zero"),
            ConfigError::DimensionTooLarge => f.write_str("panel dimension exceeds 256"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E = (), PE = Infallible> {
    /// Communication error
    Comm(E),
    /// Pin setting error
    Pin(PE),
    /// Rejected construction parameters
    Config(ConfigError),
}

impl<E: fmt::Debug, PE: fmt::Debug> fmt::Display for Error<E, PE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Comm(e) => write!(f, "bus error: {e:?}"),
            Error::Pin(e) => write!(f, "control line error: {e:?}"),
            Error::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

/// Simplified timer trait for delay operations.
pub trait Timer {
    /// Delay for the specified number of milliseconds.
    fn delay_ms(milliseconds: u64);
}

/// Busy-waits on the embassy time driver.
#[cfg(feature = "embassy-time")]
pub struct EmbassyTimer;

#[cfg(feature = "embassy-time")]
impl Timer for EmbassyTimer {
    fn delay_ms(milliseconds: u64) {
        embassy_time::block_for(embassy_time::Duration::from_millis(milliseconds));
    }
}

/// ST7735 display handle.
///
/// Not reentrant: a chip-select frame is opened and closed inside every call,
/// so callers sharing one panel between tasks must serialize access.
pub struct ST7735<SPI, CS, DC, RST, TIMER>
where
    SPI: Transport,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    TIMER: Timer,
{
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    config: Config,
    /// Current size, swapped for 90/270 degree rotations
    width: u16,
    height: u16,
    rotation: Rotation,
    color_order: ColorOrder,
    _timer: core::marker::PhantomData<TIMER>,
}

impl<SPI, CS, DC, RST, E, PE, TIMER> ST7735<SPI, CS, DC, RST, TIMER>
where
    SPI: Transport<Error = E>,
    CS: OutputPin<Error = PE>,
    DC: OutputPin<Error = PE>,
    RST: OutputPin<Error = PE>,
    TIMER: Timer,
{
    /// Takes ownership of the bus and the control lines.
    ///
    /// The lines must already be configured as outputs. Chip-select is
    /// released and the data/command line put in command mode.
    pub fn new(config: Config, spi: SPI, cs: CS, dc: DC, rst: RST) -> Result<Self, Error<E, PE>> {
        config.validate().map_err(Error::Config)?;

        let mut display = Self {
            spi,
            cs,
            dc,
            rst,
            config,
            width: config.width,
            height: config.height,
            rotation: Rotation::Deg0,
            color_order: config.color_order,
            _timer: core::marker::PhantomData,
        };
        display.cs.set_high().map_err(Error::Pin)?;
        display.dc.set_low().map_err(Error::Pin)?;
        Ok(display)
    }

    /// Gives back the bus and the control lines. The panel keeps its last state.
    pub fn release(self) -> (SPI, CS, DC, RST) {
        (self.spi, self.cs, self.dc, self.rst)
    }

    /// Size in pixels for the current rotation.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn color_order(&self) -> ColorOrder {
        self.color_order
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hardware reset: DC low, then RST high, low, high with the configured pulse in between.
    pub fn reset(&mut self) -> Result<(), Error<E, PE>> {
        self.dc.set_low().map_err(Error::Pin)?;
        self.rst.set_high().map_err(Error::Pin)?;
        TIMER::delay_ms(self.config.reset_pulse_ms);
        self.rst.set_low().map_err(Error::Pin)?;
        TIMER::delay_ms(self.config.reset_pulse_ms);
        self.rst.set_high().map_err(Error::Pin)?;
        Ok(())
    }

    /// Resets the panel and runs the register program of `variant`.
    pub fn init(&mut self, variant: PanelVariant) -> Result<(), Error<E, PE>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ST7735 init {} at {}x{}", variant, self.width, self.height);

        self.reset()?;
        self.run_program(variant.program())?;

        #[cfg(feature = "defmt")]
        defmt::info!("ST7735 ready ({})", variant);
        Ok(())
    }

    pub fn init_blue_tab(&mut self) -> Result<(), Error<E, PE>> {
        self.init(PanelVariant::BlueTab)
    }

    pub fn init_red_tab(&mut self) -> Result<(), Error<E, PE>> {
        self.init(PanelVariant::RedTab)
    }

    pub fn init_green_tab(&mut self) -> Result<(), Error<E, PE>> {
        self.init(PanelVariant::GreenTab)
    }

    fn run_program(&mut self, program: &[Step]) -> Result<(), Error<E, PE>> {
        for step in program {
            match *step {
                Step::Write(instruction, params) => {
                    self.write_command(instruction)?;
                    if !params.is_empty() {
                        self.write_data(params)?;
                    }
                }
                Step::Delay(ms) => TIMER::delay_ms(ms),
                Step::ModeControl => self.apply_mode()?,
                Step::Columns { start } => {
                    let end = self.width - 1;
                    self.write_command_data(
                        Instruction::ColumnAddressSet,
                        &address_range(start.into(), end),
                    )?;
                }
                Step::Rows { start } => {
                    let end = self.height - 1;
                    self.write_command_data(
                        Instruction::RowAddressSet,
                        &address_range(start.into(), end),
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Sends a raw command byte.
    pub fn command(&mut self, code: u8) -> Result<(), Error<E, PE>> {
        self.frame(false, &[code])
    }

    fn write_command(&mut self, instruction: Instruction) -> Result<(), Error<E, PE>> {
        self.command(instruction.into())
    }

    /// Sends parameter or pixel bytes in a single chip-select frame.
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), Error<E, PE>> {
        self.frame(true, data)
    }

    fn write_command_data(
        &mut self,
        instruction: Instruction,
        params: &[u8],
    ) -> Result<(), Error<E, PE>> {
        self.write_command(instruction)?;
        self.write_data(params)
    }

    fn frame(&mut self, data: bool, bytes: &[u8]) -> Result<(), Error<E, PE>> {
        self.transaction(data, |spi| spi.transmit(bytes))
    }

    /// Runs `body` inside one chip-select frame with DC set for command or data.
    ///
    /// Once chip-select is asserted it is released again on every path,
    /// including a failed DC line or a failed transfer.
    fn transaction<F>(&mut self, data: bool, body: F) -> Result<(), Error<E, PE>>
    where
        F: FnOnce(&mut SPI) -> Result<(), E>,
    {
        self.cs.set_low().map_err(Error::Pin)?;
        let mode = if data {
            self.dc.set_high()
        } else {
            self.dc.set_low()
        };
        let result = match mode {
            Ok(()) => body(&mut self.spi).map_err(Error::Comm),
            Err(e) => Err(Error::Pin(e)),
        };
        self.cs.set_high().map_err(Error::Pin)?;
        result
    }

    pub fn display_on(&mut self, on: bool) -> Result<(), Error<E, PE>> {
        self.write_command(if on {
            Instruction::DisplayOn
        } else {
            Instruction::DisplayOff
        })
    }

    pub fn invert(&mut self, inverted: bool) -> Result<(), Error<E, PE>> {
        self.write_command(if inverted {
            Instruction::DisplayInversionOn
        } else {
            Instruction::DisplayInversionOff
        })
    }

    /// Sets the rotation from an index, of which only the two low bits count.
    ///
    /// Width and height are swapped whenever the orientation changes between
    /// portrait and landscape. The mode register is rewritten every time.
    pub fn set_rotation(&mut self, index: u8) -> Result<(), Error<E, PE>> {
        let rotation = Rotation::from_index(index);
        if rotation.is_transposed() != self.rotation.is_transposed() {
            core::mem::swap(&mut self.width, &mut self.height);
        }
        self.rotation = rotation;

        #[cfg(feature = "defmt")]
        defmt::debug!("rotation {} deg, {}x{}", rotation.degrees(), self.width, self.height);

        self.apply_mode()
    }

    /// Rewrites the mode register only when the order actually changes.
    pub fn set_color_order(&mut self, order: impl Into<ColorOrder>) -> Result<(), Error<E, PE>> {
        let order = order.into();
        if order == self.color_order {
            return Ok(());
        }
        self.color_order = order;

        #[cfg(feature = "defmt")]
        defmt::debug!("color order {}", order);

        self.apply_mode()
    }

    fn apply_mode(&mut self) -> Result<(), Error<E, PE>> {
        let mode = orientation::mode_control(self.rotation, self.color_order);
        self.write_command_data(Instruction::MemoryAccessControl, &[mode])
    }

    /// Sets the address window and leaves the controller waiting for pixel data.
    ///
    /// Bounds are inclusive raw panel coordinates.
    pub fn set_window(&mut self, sx: u16, sy: u16, ex: u16, ey: u16) -> Result<(), Error<E, PE>> {
        self.write_command_data(Instruction::ColumnAddressSet, &address_range(sx, ex))?;
        self.write_command_data(Instruction::RowAddressSet, &address_range(sy, ey))?;
        self.write_command(Instruction::MemoryWrite)
    }

    /// Streams `count` pixels of one color into the window opened by [`Self::set_window`].
    ///
    /// `count` is not checked against the window.
    pub fn draw(&mut self, count: u32, color: u16) -> Result<(), Error<E, PE>> {
        let color_bytes = color.to_be_bytes();
        let mut batch_buffer = [0u8; BATCH_PIXELS * 2];
        for pixel in batch_buffer.chunks_exact_mut(2) {
            pixel.copy_from_slice(&color_bytes);
        }

        self.transaction(true, |spi| {
            let mut remaining = count as usize;
            while remaining > 0 {
                let pixels = remaining.min(BATCH_PIXELS);
                spi.transmit(&batch_buffer[..pixels * 2])?;
                remaining -= pixels;
            }
            Ok(())
        })
    }

    /// Streams a sequence of pixels into the open window, one color each.
    pub fn draw_colors<I>(&mut self, colors: I) -> Result<(), Error<E, PE>>
    where
        I: IntoIterator<Item = u16>,
    {
        let mut batch_buffer = [0u8; BATCH_PIXELS * 2];
        let mut colors = colors.into_iter();

        self.transaction(true, |spi| {
            loop {
                let mut len = 0;
                for (slot, color) in batch_buffer.chunks_exact_mut(2).zip(colors.by_ref()) {
                    slot.copy_from_slice(&color.to_be_bytes());
                    len += 2;
                }
                if len == 0 {
                    return Ok(());
                }
                spi.transmit(&batch_buffer[..len])?;
                if len < batch_buffer.len() {
                    return Ok(());
                }
            }
        })
    }
}

/// Start and end address as two big-endian 16-bit values.
fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [sh, sl] = start.to_be_bytes();
    let [eh, el] = end.to_be_bytes();
    [sh, sl, eh, el]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_range_is_big_endian() {
        assert_eq!(address_range(2, 127), [0x00, 0x02, 0x00, 0x7F]);
        assert_eq!(address_range(0, 0x1FF), [0x00, 0x00, 0x01, 0xFF]);
    }

    #[test]
    fn config_validation() {
        assert_eq!(Config::default().validate(), Ok(()));
        let zero = Config {
            width: 0,
            ..Config::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroDimension));
        let large = Config {
            height: 300,
            ..Config::default()
        };
        assert_eq!(large.validate(), Err(ConfigError::DimensionTooLarge));
    }

    #[test]
    fn default_config_is_128_by_160_rgb() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (128, 160));
        assert_eq!(config.color_order, ColorOrder::Rgb);
    }
}
