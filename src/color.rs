//! RGB565 packing and the stock palette.

use embedded_graphics_core::pixelcolor::{Rgb565, raw::RawU16};
use embedded_graphics_core::prelude::RawData;

/// Packs 8-bit channels into RGB565, dropping the low bits of each channel.
pub const fn color(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

pub const BLACK: u16 = color(0, 0, 0);
pub const WHITE: u16 = color(255, 255, 255);
pub const GRAY: u16 = color(128, 128, 128);
pub const RED: u16 = color(255, 0, 0);
pub const MAROON: u16 = color(128, 0, 0);
pub const GREEN: u16 = color(0, 255, 0);
pub const FOREST: u16 = color(0, 128, 0);
pub const YELLOW: u16 = color(255, 255, 0);
pub const CYAN: u16 = color(0, 255, 255);
pub const BLUE: u16 = color(0, 0, 255);
pub const NAVY: u16 = color(0, 0, 128);
pub const PURPLE: u16 = color(255, 0, 255);

/// Raw wire value of an embedded-graphics color.
pub fn raw(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}
