//! `embedded-graphics` support.

use embedded_graphics_core::Pixel;
use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{Dimensions, OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::primitives::{PointsIter, Rectangle};
use embedded_hal::digital::OutputPin;

use crate::color::raw;
use crate::{Error, ST7735, Timer, Transport};

impl<SPI, CS, DC, RST, E, PE, TIMER> OriginDimensions for ST7735<SPI, CS, DC, RST, TIMER>
where
    SPI: Transport<Error = E>,
    CS: OutputPin<Error = PE>,
    DC: OutputPin<Error = PE>,
    RST: OutputPin<Error = PE>,
    TIMER: Timer,
{
    fn size(&self) -> Size {
        Size::new(self.width.into(), self.height.into())
    }
}

impl<SPI, CS, DC, RST, E, PE, TIMER> DrawTarget for ST7735<SPI, CS, DC, RST, TIMER>
where
    SPI: Transport<Error = E>,
    CS: OutputPin<Error = PE>,
    DC: OutputPin<Error = PE>,
    RST: OutputPin<Error = PE>,
    TIMER: Timer,
{
    type Color = Rgb565;
    type Error = Error<E, PE>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.pixel(point.x, point.y, raw(color))?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let visible = area.intersection(&self.bounding_box());
        if visible != *area {
            // Partly off the panel: fall back to per-pixel clipping
            return self.draw_iter(area.points().zip(colors).map(|(p, c)| Pixel(p, c)));
        }
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;
        let count = area.size.width as usize * area.size.height as usize;
        self.draw_colors(colors.into_iter().take(count).map(raw))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }
        let (x, y) = (i64::from(area.top_left.x), i64::from(area.top_left.y));
        let (w, h) = (i64::from(area.size.width), i64::from(area.size.height));
        self.fill_area(x, y, x + w - 1, y + h - 1, raw(color))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(raw(color))
    }
}
