//! Glyph blitting and wrapped text layout.

use embedded_hal::digital::OutputPin;

use crate::font::{DEFAULT_FONT, Font};
use crate::{Error, ST7735, Timer, Transport};

impl<SPI, CS, DC, RST, E, PE, TIMER> ST7735<SPI, CS, DC, RST, TIMER>
where
    SPI: Transport<Error = E>,
    CS: OutputPin<Error = PE>,
    DC: OutputPin<Error = PE>,
    RST: OutputPin<Error = PE>,
    TIMER: Timer,
{
    /// Draws one character with its top-left corner at `(x, y)`.
    ///
    /// Characters the font does not cover are skipped. A scale of 0 counts
    /// as 1. At scale 1 every set bit is a single pixel; when scaled, every
    /// set bit becomes a filled `scale.0 x scale.1` cell.
    pub fn draw_glyph(
        &mut self,
        x: i32,
        y: i32,
        code: u8,
        color: u16,
        font: &Font<'_>,
        scale: (u8, u8),
    ) -> Result<(), Error<E, PE>> {
        self.glyph_at(x.into(), y.into(), code, color, font, scale)
    }

    fn glyph_at(
        &mut self,
        x: i64,
        y: i64,
        code: u8,
        color: u16,
        font: &Font<'_>,
        scale: (u8, u8),
    ) -> Result<(), Error<E, PE>> {
        let Some(columns) = font.glyph(code) else {
            return Ok(());
        };
        let sx = i64::from(scale.0.max(1));
        let sy = i64::from(scale.1.max(1));
        let rows = font.height.min(8);

        for (column, &bits) in columns.iter().enumerate() {
            let cx = x + column as i64 * sx;
            for row in 0..rows {
                if bits & (1 << row) == 0 {
                    continue;
                }
                let cy = y + i64::from(row) * sy;
                if sx == 1 && sy == 1 {
                    self.plot(cx, cy, color)?;
                } else {
                    self.fill_area(cx, cy, cx + sx - 1, cy + sy - 1, color)?;
                }
            }
        }
        Ok(())
    }

    /// Writes `text` in the default font at scale 1.
    pub fn text(&mut self, x: i32, y: i32, text: &str, color: u16) -> Result<(), Error<E, PE>> {
        self.text_with(x, y, text, color, &DEFAULT_FONT, (1, 1))
    }

    /// Writes `text` byte by byte starting at `(x, y)`.
    ///
    /// When the next character would not fit on the row, the cursor returns
    /// to `x` one text line (plus one pixel) lower. Drawing stops once the
    /// cursor moves past the bottom of the panel.
    pub fn text_with(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        color: u16,
        font: &Font<'_>,
        scale: (u8, u8),
    ) -> Result<(), Error<E, PE>> {
        let advance = i64::from(font.width) * i64::from(scale.0.max(1));
        let line_height = i64::from(font.height) * i64::from(scale.1.max(1)) + 1;
        let (width, height) = (i64::from(self.width), i64::from(self.height));
        let x = i64::from(x);

        let (mut cx, mut cy) = (x, i64::from(y));
        for code in text.bytes() {
            self.glyph_at(cx, cy, code, color, font, scale)?;
            cx += advance;
            if cx + advance > width {
                cy += line_height;
                if cy > height {
                    break;
                }
                cx = x;
            }
        }
        Ok(())
    }
}
