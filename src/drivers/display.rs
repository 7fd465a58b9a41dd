// ColorQuest: SSD1306 OLED Driver
//
// 128x64 monochrome panel over the shared I2C bus. Drawing goes to a local
// page-ordered framebuffer (an embedded-graphics `DrawTarget`); `flush`
// pushes it to the panel in one pass.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use colorquest::config::*;
use colorquest::screen::{self, Screen};

use super::SharedBus;

// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const CMD_DISPLAY_OFF: u8 = 0xAE;
const CMD_DISPLAY_ON: u8 = 0xAF;
const CMD_NOP: u8 = 0xE3;
const CMD_COLUMN_ADDR: u8 = 0x21;
const CMD_PAGE_ADDR: u8 = 0x22;

/// Power-up sequence for a 128x64 panel with the internal charge pump.
const INIT_SEQUENCE: &[u8] = &[
    CMD_DISPLAY_OFF,
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // display offset
    0x40,       // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1,       // segment remap
    0xC8,       // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH deselect
    0xA4,       // resume from RAM
    0xA6,       // normal (not inverted)
    0x2E,       // scrolling off
    CMD_DISPLAY_ON,
];

const DATA_CHUNK: usize = 128;

// ---------------------------------------------------------------------------
// Framebuffer
// ---------------------------------------------------------------------------
pub struct Framebuffer {
    buf: [u8; DISPLAY_BUFFER_SIZE],
}

impl Framebuffer {
    fn new() -> Self {
        Self {
            buf: [0; DISPLAY_BUFFER_SIZE],
        }
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
                continue;
            }

            let ix = (x + (y / 8) * SCREEN_WIDTH) as usize;
            let bit = 1u8 << (y % 8);
            if color.is_on() {
                self.buf[ix] |= bit;
            } else {
                self.buf[ix] &= !bit;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------
pub struct OledDisplay {
    bus: SharedBus,
    frame: Framebuffer,
    /// Text last pushed to the panel; identical frames are not re-sent.
    shown: Vec<String>,
}

impl OledDisplay {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            frame: Framebuffer::new(),
            shown: Vec::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.command(&[CMD_NOP]).is_ok()
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        self.command(INIT_SEQUENCE)?;
        self.frame.clear(BinaryColor::Off).unwrap_or_else(|never| match never {});
        self.flush()?;
        log::info!("SSD1306 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
        Ok(())
    }

    /// Render `screen` and flush it, unless the panel already shows it.
    pub fn present(&mut self, screen: &Screen) -> anyhow::Result<()> {
        let lines = screen.lines();
        if lines == self.shown {
            return Ok(());
        }

        screen::render(screen, &mut self.frame).unwrap_or_else(|never| match never {});
        self.flush()?;
        self.shown = lines;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        let last_column = (SCREEN_WIDTH - 1) as u8;
        let last_page = (SCREEN_HEIGHT / 8 - 1) as u8;
        self.command(&[CMD_COLUMN_ADDR, 0, last_column, CMD_PAGE_ADDR, 0, last_page])?;

        let mut packet = [0u8; DATA_CHUNK + 1];
        packet[0] = CONTROL_DATA;

        let mut bus = self.bus.lock().unwrap();
        for chunk in self.frame.buf.chunks(DATA_CHUNK) {
            packet[1..=chunk.len()].copy_from_slice(chunk);
            bus.write(I2C_ADDR_OLED, &packet[..=chunk.len()], I2C_TIMEOUT_TICKS)?;
        }
        Ok(())
    }

    fn command(&self, bytes: &[u8]) -> anyhow::Result<()> {
        let mut packet = Vec::with_capacity(bytes.len() + 1);
        packet.push(CONTROL_COMMAND);
        packet.extend_from_slice(bytes);

        let mut bus = self.bus.lock().unwrap();
        bus.write(I2C_ADDR_OLED, &packet, I2C_TIMEOUT_TICKS)?;
        Ok(())
    }
}
