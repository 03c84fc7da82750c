//! Byte transport to the controller.
//!
//! The transport has no notion of commands or chip-select; framing lives in
//! the driver. It only guarantees that a buffer goes out in order, split into
//! transactions the bus peripheral can take.

use embedded_hal::spi::SpiBus;

/// Largest single transaction handed to the bus.
pub const MAX_TRANSFER_LEN: usize = 4092;

/// Blocking byte sink used by the driver.
pub trait Transport {
    type Error;

    /// Sends `bytes` and returns once they are on the wire.
    ///
    /// Empty input is a no-op.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<SPI> Transport for SPI
where
    SPI: SpiBus<u8>,
{
    type Error = SPI::Error;

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.is_empty() {
            return Ok(());
        }

        for chunk in bytes.chunks(MAX_TRANSFER_LEN) {
            self.write(chunk)?;
        }
        // Chip-select must not rise before the last bit is clocked out
        self.flush()
    }
}
