#![allow(dead_code)]

//! Recording stand-ins for the bus, the control lines and the timer.
//!
//! Everything the driver does lands in one thread-local log, so the relative
//! order of line changes, bus writes and delays can be checked.

use std::cell::RefCell;
use std::convert::Infallible;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, ErrorKind, SpiBus};
use st7735_tft::{Config, ST7735, Timer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Cs(bool),
    Dc(bool),
    Rst(bool),
    Write(Vec<u8>),
    Flush,
    Delay(u64),
}

thread_local! {
    static LOG: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
}

fn record(event: Event) {
    LOG.with(|log| log.borrow_mut().push(event));
}

/// Drains the log.
pub fn take() -> Vec<Event> {
    LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

impl spi::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
pub struct Bus {
    pub fail: bool,
}

impl spi::ErrorType for Bus {
    type Error = BusFault;
}

impl SpiBus<u8> for Bus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), BusFault> {
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), BusFault> {
        if self.fail {
            return Err(BusFault);
        }
        record(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), BusFault> {
        self.write(write)
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), BusFault> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), BusFault> {
        record(Event::Flush);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Line {
    Cs,
    Dc,
    Rst,
}

impl Line {
    fn set(&self, high: bool) {
        record(match self {
            Line::Cs => Event::Cs(high),
            Line::Dc => Event::Dc(high),
            Line::Rst => Event::Rst(high),
        });
    }
}

impl digital::ErrorType for Line {
    type Error = Infallible;
}

impl OutputPin for Line {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// A control line that fails whenever it is driven to `fails_at`.
///
/// Failed writes leave no trace in the log.
#[derive(Debug, Clone, Copy)]
pub struct FlakyLine {
    pub line: Line,
    pub fails_at: Option<bool>,
}

impl FlakyLine {
    pub fn ok(line: Line) -> Self {
        Self { line, fails_at: None }
    }

    fn drive(&self, high: bool) -> Result<(), PinFault> {
        if self.fails_at == Some(high) {
            return Err(PinFault);
        }
        self.line.set(high);
        Ok(())
    }
}

impl digital::ErrorType for FlakyLine {
    type Error = PinFault;
}

impl OutputPin for FlakyLine {
    fn set_low(&mut self) -> Result<(), PinFault> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.drive(true)
    }
}

pub type FlakyDisplay = ST7735<Bus, FlakyLine, FlakyLine, FlakyLine, Clock>;

/// Display whose data/command line fails when switched to data mode.
pub fn display_with_broken_dc() -> FlakyDisplay {
    let dc = FlakyLine {
        line: Line::Dc,
        fails_at: Some(true),
    };
    let display = FlakyDisplay::new(
        Config::default(),
        Bus::default(),
        FlakyLine::ok(Line::Cs),
        dc,
        FlakyLine::ok(Line::Rst),
    )
    .unwrap();
    take();
    display
}

pub struct Clock;

impl Timer for Clock {
    fn delay_ms(milliseconds: u64) {
        record(Event::Delay(milliseconds));
    }
}

pub type Display = ST7735<Bus, Line, Line, Line, Clock>;

pub fn display_with(config: Config, bus: Bus) -> Display {
    let display = Display::new(config, bus, Line::Cs, Line::Dc, Line::Rst).unwrap();
    take();
    display
}

/// Default 128x160 panel with an empty log.
pub fn display() -> Display {
    display_with(Config::default(), Bus::default())
}

/// One chip-select frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Command(u8),
    Data(Vec<u8>),
}

/// Splits the log into chip-select frames, checking the framing rules on the way.
pub fn frames(log: &[Event]) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut selected = false;
    let mut data_mode = false;
    let mut bytes: Vec<u8> = Vec::new();
    let mut mode_at_write: Option<bool> = None;

    for event in log {
        match event {
            Event::Cs(false) => {
                assert!(!selected, "chip-select asserted twice");
                selected = true;
                bytes.clear();
                mode_at_write = None;
            }
            Event::Cs(true) => {
                if selected {
                    match mode_at_write {
                        Some(false) => {
                            assert_eq!(bytes.len(), 1, "command frame must carry one byte");
                            frames.push(Frame::Command(bytes[0]));
                        }
                        Some(true) => frames.push(Frame::Data(bytes.clone())),
                        None => frames.push(Frame::Data(Vec::new())),
                    }
                }
                selected = false;
            }
            Event::Dc(high) => data_mode = *high,
            Event::Write(words) => {
                assert!(selected, "bytes sent without chip-select");
                match mode_at_write {
                    Some(mode) => assert_eq!(mode, data_mode, "DC changed inside a frame"),
                    None => mode_at_write = Some(data_mode),
                }
                bytes.extend_from_slice(words);
            }
            Event::Flush | Event::Rst(_) | Event::Delay(_) => {}
        }
    }
    assert!(!selected, "chip-select left asserted");
    frames
}

/// Window-level view of the traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Window { sx: u16, sy: u16, ex: u16, ey: u16 },
    Pixels { count: usize, color: u16 },
    Command(u8),
    Data(Vec<u8>),
}

fn range(data: &[u8]) -> (u16, u16) {
    assert_eq!(data.len(), 4);
    (
        u16::from_be_bytes([data[0], data[1]]),
        u16::from_be_bytes([data[2], data[3]]),
    )
}

/// Folds column/row/memory-write triples into windows and the data after them into pixel runs.
pub fn ops(frames: &[Frame]) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut i = 0;
    while i < frames.len() {
        if let [
            Frame::Command(0x2A),
            Frame::Data(columns),
            Frame::Command(0x2B),
            Frame::Data(rows),
            Frame::Command(0x2C),
            ..,
        ] = &frames[i..]
        {
            let (sx, ex) = range(columns);
            let (sy, ey) = range(rows);
            ops.push(Op::Window { sx, sy, ex, ey });
            i += 5;
            if let Some(Frame::Data(pixels)) = frames.get(i) {
                assert_eq!(pixels.len() % 2, 0, "odd pixel byte count");
                let color = if pixels.is_empty() {
                    0
                } else {
                    u16::from_be_bytes([pixels[0], pixels[1]])
                };
                assert!(
                    pixels
                        .chunks(2)
                        .all(|p| u16::from_be_bytes([p[0], p[1]]) == color),
                    "mixed colors in one run"
                );
                ops.push(Op::Pixels {
                    count: pixels.len() / 2,
                    color,
                });
                i += 1;
            }
            continue;
        }
        ops.push(match &frames[i] {
            Frame::Command(code) => Op::Command(*code),
            Frame::Data(bytes) => Op::Data(bytes.clone()),
        });
        i += 1;
    }
    ops
}

/// Drains the log and decodes it to window-level operations.
pub fn take_ops() -> Vec<Op> {
    ops(&frames(&take()))
}

/// Top-left corners of all single-pixel writes, in order.
pub fn plotted(ops: &[Op]) -> Vec<(u16, u16)> {
    let mut points = Vec::new();
    for pair in ops.windows(2) {
        if let [Op::Window { sx, sy, .. }, Op::Pixels { count: 1, .. }] = pair {
            points.push((*sx, *sy));
        }
    }
    points
}
