//! Drawing primitives built on the address window.
//!
//! Coordinates are signed so shapes may hang off the panel. Anything outside
//! is clipped or dropped silently; only bus and pin failures are errors.
//! Geometry is evaluated in `i64` so that any `i32` input is representable,
//! and loops only visit the indices that can land on the panel.

use embedded_hal::digital::OutputPin;

use crate::{Error, ST7735, Timer, Transport};

/// Clips the inclusive span between `a` and `b` to `[0, len)`.
///
/// Endpoints may come in either order. Returns `None` when the span misses
/// the axis entirely.
pub(crate) fn clip_span(a: i64, b: i64, len: u16) -> Option<(u16, u16)> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let max = i64::from(len) - 1;
    if hi < 0 || lo > max {
        return None;
    }
    Some((lo.max(0) as u16, hi.min(max) as u16))
}

/// Far end of a run of `len` pixels starting at `start`. Negative runs go backwards.
fn run_end(start: i64, len: i64) -> i64 {
    if len > 0 { start + len - 1 } else { start + len + 1 }
}

fn in_range(v: i64, len: u16) -> bool {
    (0..i64::from(len)).contains(&v)
}

/// Steps `i` in `0..=last` for which `start + step * i` lies in `[0, len)`.
fn steps_on_axis(start: i64, step: i64, len: u16, last: i64) -> Option<(i64, i64)> {
    let max = i64::from(len) - 1;
    let (lo, hi) = if step > 0 {
        (-start, max - start)
    } else {
        (start - max, start)
    };
    let (lo, hi) = (lo.max(0), hi.min(last));
    (lo <= hi).then_some((lo, hi))
}

/// Offsets `d` in `0..=last` for which `center + d` or `center - d` lies in `[0, len)`.
///
/// Both halves contain 0 whenever both are non-empty, so their union is one range.
fn offsets_on_axis(center: i64, len: u16, last: i64) -> Option<(i64, i64)> {
    match (
        steps_on_axis(center, 1, len, last),
        steps_on_axis(center, -1, len, last),
    ) {
        (Some(a), Some(b)) => Some((a.0.min(b.0), a.1.max(b.1))),
        (a, b) => a.or(b),
    }
}

/// Minor-axis offset of Bresenham's line after `i` major steps.
///
/// Closed form of the incremental error term, so a walk can start anywhere.
fn minor_offset(i: i64, minor: i64, major: i64) -> i64 {
    let numerator = 2 * i128::from(minor) * i128::from(i) + i128::from(major);
    (numerator / (2 * i128::from(major))) as i64
}

/// `floor(sqrt(r^2 - dx^2))`
fn half_chord(r: i64, dx: i64) -> i64 {
    let rsq = (r as f64) * (r as f64);
    let dxsq = (dx as f64) * (dx as f64);
    libm::sqrt(rsq - dxsq) as i64
}

impl<SPI, CS, DC, RST, E, PE, TIMER> ST7735<SPI, CS, DC, RST, TIMER>
where
    SPI: Transport<Error = E>,
    CS: OutputPin<Error = PE>,
    DC: OutputPin<Error = PE>,
    RST: OutputPin<Error = PE>,
    TIMER: Timer,
{
    /// Sets one pixel. Pixels off the panel are ignored.
    pub fn pixel(&mut self, x: i32, y: i32, color: u16) -> Result<(), Error<E, PE>> {
        self.plot(x.into(), y.into(), color)
    }

    pub(crate) fn plot(&mut self, x: i64, y: i64, color: u16) -> Result<(), Error<E, PE>> {
        if !in_range(x, self.width) || !in_range(y, self.height) {
            return Ok(());
        }
        let (x, y) = (x as u16, y as u16);
        // Window is one pixel larger than needed; only two bytes follow
        self.set_window(x, y, x + 1, y + 1)?;
        self.write_data(&color.to_be_bytes())
    }

    /// Fills the whole panel.
    pub fn fill(&mut self, color: u16) -> Result<(), Error<E, PE>> {
        let (width, height) = (self.width, self.height);
        self.set_window(0, 0, width - 1, height - 1)?;
        self.draw(u32::from(width) * u32::from(height), color)
    }

    /// Horizontal run of `len` pixels from `(x, y)`, clipped to the panel.
    pub fn hline(&mut self, x: i32, y: i32, len: i32, color: u16) -> Result<(), Error<E, PE>> {
        if len == 0 {
            return Ok(());
        }
        let x = i64::from(x);
        self.hspan(x, run_end(x, len.into()), y.into(), color)
    }

    /// Vertical run of `len` pixels from `(x, y)`, clipped to the panel.
    pub fn vline(&mut self, x: i32, y: i32, len: i32, color: u16) -> Result<(), Error<E, PE>> {
        if len == 0 {
            return Ok(());
        }
        let y = i64::from(y);
        self.vspan(x.into(), y, run_end(y, len.into()), color)
    }

    fn hspan(&mut self, x0: i64, x1: i64, y: i64, color: u16) -> Result<(), Error<E, PE>> {
        if !in_range(y, self.height) {
            return Ok(());
        }
        let Some((sx, ex)) = clip_span(x0, x1, self.width) else {
            return Ok(());
        };
        let y = y as u16;
        self.set_window(sx, y, ex, y)?;
        self.draw(u32::from(ex - sx) + 1, color)
    }

    fn vspan(&mut self, x: i64, y0: i64, y1: i64, color: u16) -> Result<(), Error<E, PE>> {
        if !in_range(x, self.width) {
            return Ok(());
        }
        let Some((sy, ey)) = clip_span(y0, y1, self.height) else {
            return Ok(());
        };
        let x = x as u16;
        self.set_window(x, sy, x, ey)?;
        self.draw(u32::from(ey - sy) + 1, color)
    }

    /// Line between two points, both included.
    ///
    /// Axis-aligned lines are sent as a single run; anything else is plotted
    /// pixel by pixel with Bresenham's algorithm.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) -> Result<(), Error<E, PE>> {
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        if x0 == x1 {
            return self.vspan(x0, y0, y1, color);
        }
        if y0 == y1 {
            return self.hspan(x0, x1, y0, color);
        }

        let (dx, dy) = ((x1 - x0).abs(), (y1 - y0).abs());
        let (step_x, step_y) = ((x1 - x0).signum(), (y1 - y0).signum());

        if dx >= dy {
            let Some((first, last)) = steps_on_axis(x0, step_x, self.width, dx) else {
                return Ok(());
            };
            for i in first..=last {
                let y = y0 + step_y * minor_offset(i, dy, dx);
                self.plot(x0 + step_x * i, y, color)?;
            }
        } else {
            let Some((first, last)) = steps_on_axis(y0, step_y, self.height, dy) else {
                return Ok(());
            };
            for i in first..=last {
                let x = x0 + step_x * minor_offset(i, dx, dy);
                self.plot(x, y0 + step_y * i, color)?;
            }
        }
        Ok(())
    }

    /// Rectangle outline covering `(x, y)` to `(x + w - 1, y + h - 1)`.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) -> Result<(), Error<E, PE>> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        let (x0, y0) = (i64::from(x), i64::from(y));
        let (x1, y1) = (x0 + i64::from(w) - 1, y0 + i64::from(h) - 1);
        self.hspan(x0, x1, y1, color)?;
        self.hspan(x0, x1, y0, color)?;
        self.vspan(x0, y0, y1, color)?;
        self.vspan(x1, y0, y1, color)
    }

    /// Filled rectangle, clipped to the panel and sent as one window.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) -> Result<(), Error<E, PE>> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        let (x0, y0) = (i64::from(x), i64::from(y));
        self.fill_area(x0, y0, x0 + i64::from(w) - 1, y0 + i64::from(h) - 1, color)
    }

    /// Fills the inclusive corners `(x0, y0)` to `(x1, y1)`, clipped to the panel.
    pub(crate) fn fill_area(
        &mut self,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        color: u16,
    ) -> Result<(), Error<E, PE>> {
        let Some((sx, ex)) = clip_span(x0, x1, self.width) else {
            return Ok(());
        };
        let Some((sy, ey)) = clip_span(y0, y1, self.height) else {
            return Ok(());
        };
        self.set_window(sx, sy, ex, ey)?;
        let area = (u32::from(ex - sx) + 1) * (u32::from(ey - sy) + 1);
        self.draw(area, color)
    }

    /// Circle outline, sampled over one octant and mirrored.
    pub fn circle(&mut self, x: i32, y: i32, r: i32, color: u16) -> Result<(), Error<E, PE>> {
        if r < 0 {
            return Ok(());
        }
        let (x, y, r) = (i64::from(x), i64::from(y), i64::from(r));
        // 724 / 1024 ~ 1 / sqrt(2): the octant boundary
        let last = (r * 724) >> 10;

        // Each sample lands at x +- dx or y +- dx on one axis; other offsets miss the panel
        let columns = offsets_on_axis(x, self.width, last);
        let rows = offsets_on_axis(y, self.height, last);
        let ranges = match (columns, rows) {
            (Some(a), Some(b)) => {
                let (a, b) = if a.0 <= b.0 { (a, b) } else { (b, a) };
                if b.0 <= a.1 + 1 {
                    [Some((a.0, a.1.max(b.1))), None]
                } else {
                    [Some(a), Some(b)]
                }
            }
            (a, b) => [a.or(b), None],
        };

        for (first, last) in ranges.into_iter().flatten() {
            for dx in first..=last {
                let dy = half_chord(r, dx);
                for (px, py) in [
                    (x + dx, y + dy),
                    (x + dx, y - dy),
                    (x - dx, y + dy),
                    (x - dx, y - dy),
                    (x + dy, y + dx),
                    (x + dy, y - dx),
                    (x - dy, y + dx),
                    (x - dy, y - dx),
                ] {
                    self.plot(px, py, color)?;
                }
            }
        }
        Ok(())
    }

    /// Filled circle drawn as vertical spans left and right of the center column.
    pub fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: u16) -> Result<(), Error<E, PE>> {
        if r <= 0 {
            return Ok(());
        }
        let (x, y, r) = (i64::from(x), i64::from(y), i64::from(r));
        let Some((first, last)) = offsets_on_axis(x, self.width, r - 1) else {
            return Ok(());
        };
        for dx in first..=last {
            let dy = half_chord(r, dx);
            for column in [x + dx, x - dx] {
                self.vspan(column, y - dy, y + dy, color)?;
            }
        }
        Ok(())
    }
}
