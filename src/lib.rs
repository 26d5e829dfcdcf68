#![cfg_attr(not(test), no_std)]

//! Indexed-color shadow-framebuffer driver for small SPI TFT panels.
//!
//! The driver keeps an 8-bit indexed framebuffer in local memory, rasterizes
//! primitives and bitmap-font text into it, and streams the whole frame to an
//! ILI9341 / ST7735 class controller as palette-resolved pixels in
//! fixed-height bands. Drawing never touches the bus; [`Tft::flush`] does.

extern crate alloc;

pub mod color;
pub mod font;
pub mod fonts;
mod framebuffer;
#[cfg(feature = "embedded-graphics")]
mod graphics;
pub mod panel;
pub mod protocol;
mod raster;

pub use color::{COLOR_BYTES, PALETTE_SIZE, PackedColor, Palette, TRANSPARENT, pack_rgb};
pub use font::{FontDef, GlyphWidth, TextAnchor};
pub use framebuffer::{FrameBuffer, OutOfMemory};
#[cfg(feature = "embedded-graphics")]
pub use graphics::Index;
pub use panel::PanelOp;

use alloc::vec::Vec;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::framebuffer::check_bounds;

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Scanlines converted and streamed per flush transaction. Higher values
    /// trade scratch memory for fewer bus calls.
    pub band_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { band_lines: 4 }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, DcErr, RstErr, BlErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// Data/command pin operation failed.
    Dc(DcErr),
    /// Reset pin operation failed.
    Reset(RstErr),
    /// Backlight pin operation failed.
    Backlight(BlErr),
    /// Framebuffer or flush scratch allocation failed.
    OutOfMemory,
}

pub type TftResult<SpiErr, DcErr, RstErr, BlErr> = Result<(), Error<SpiErr, DcErr, RstErr, BlErr>>;

/// Stand-in for an unbound reset or backlight line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPin;

impl embedded_hal::digital::ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Indexed-framebuffer panel driver.
///
/// Owns the bus, the data/command pin, optional reset and backlight pins,
/// the shadow framebuffer, the palette and the active font. Chip-select
/// framing belongs to the [`SpiDevice`] implementation.
pub struct Tft<SPI, DC, RST, BL> {
    spi: SPI,
    dc: DC,
    reset: Option<RST>,
    backlight: Option<BL>,
    config: Config,
    framebuffer: FrameBuffer,
    palette: Palette,
    font: Option<&'static FontDef>,
    width_mode: GlyphWidth,
}

impl<SPI, DC, RST, BL> Tft<SPI, DC, RST, BL>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Creates a driver instance, allocating a zeroed `width` x `height`
    /// framebuffer and a black palette.
    pub fn new(
        spi: SPI,
        dc: DC,
        reset: Option<RST>,
        backlight: Option<BL>,
        width: usize,
        height: usize,
        config: Config,
    ) -> Result<Self, Error<SPI::Error, DC::Error, RST::Error, BL::Error>> {
        let framebuffer = FrameBuffer::new(width, height).map_err(|_| Error::OutOfMemory)?;

        Ok(Self {
            spi,
            dc,
            reset,
            backlight,
            config,
            framebuffer,
            palette: Palette::new(),
            font: None,
            width_mode: GlyphWidth::Fixed,
        })
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Releases the bus and pins; the framebuffer is freed on drop.
    pub fn release(self) -> (SPI, DC, Option<RST>, Option<BL>) {
        (self.spi, self.dc, self.reset, self.backlight)
    }

    /// Resets the panel and runs a power-on script.
    ///
    /// Drives the bound control lines low, pulses hardware reset when a reset
    /// pin is bound, executes `script` (which must end in display-on), then
    /// enables the backlight when bound.
    pub fn init<D: DelayNs>(
        &mut self,
        delay: &mut D,
        script: &[PanelOp],
    ) -> TftResult<SPI::Error, DC::Error, RST::Error, BL::Error> {
        self.dc.set_low().map_err(Error::Dc)?;

        if let Some(backlight) = self.backlight.as_mut() {
            backlight.set_low().map_err(Error::Backlight)?;
        }

        if let Some(reset) = self.reset.as_mut() {
            reset.set_high().map_err(Error::Reset)?;
            delay.delay_ms(150);

            reset.set_low().map_err(Error::Reset)?;
            delay.delay_ms(150);

            reset.set_high().map_err(Error::Reset)?;
            delay.delay_ms(150);
        }

        self.run_script(delay, script)?;

        log::debug!(
            "panel init done ({}x{})",
            self.framebuffer.width(),
            self.framebuffer.height()
        );

        self.set_backlight(true)
    }

    fn run_script<D: DelayNs>(
        &mut self,
        delay: &mut D,
        script: &[PanelOp],
    ) -> TftResult<SPI::Error, DC::Error, RST::Error, BL::Error> {
        for op in script {
            match op {
                PanelOp::Command { opcode, args } => {
                    self.write_command_with_args(*opcode, args)?;
                }
                PanelOp::DelayMs(ms) => delay.delay_ms(*ms),
            }
        }

        Ok(())
    }

    /// Switches the backlight; no-op without a backlight pin.
    pub fn set_backlight(
        &mut self,
        on: bool,
    ) -> TftResult<SPI::Error, DC::Error, RST::Error, BL::Error> {
        let Some(backlight) = self.backlight.as_mut() else {
            return Ok(());
        };

        if on {
            backlight.set_high().map_err(Error::Backlight)
        } else {
            backlight.set_low().map_err(Error::Backlight)
        }
    }

    /// Sends a bare opcode with the data/command line in command state.
    pub fn write_command(
        &mut self,
        opcode: u8,
    ) -> TftResult<SPI::Error, DC::Error, RST::Error, BL::Error> {
        self.dc.set_low().map_err(Error::Dc)?;
        self.spi.write(&[opcode]).map_err(Error::Spi)
    }

    /// Sends an opcode followed by its argument bytes.
    ///
    /// Arguments go out as a second transaction with the data/command line in
    /// data state; an empty `args` sends only the opcode.
    pub fn write_command_with_args(
        &mut self,
        opcode: u8,
        args: &[u8],
    ) -> TftResult<SPI::Error, DC::Error, RST::Error, BL::Error> {
        self.write_command(opcode)?;
        self.write_data(args)
    }

    /// Sends payload bytes with the data/command line in data state.
    ///
    /// Empty payloads are skipped entirely.
    pub fn write_data(
        &mut self,
        data: &[u8],
    ) -> TftResult<SPI::Error, DC::Error, RST::Error, BL::Error> {
        if data.is_empty() {
            return Ok(());
        }

        self.dc.set_high().map_err(Error::Dc)?;
        self.spi.write(data).map_err(Error::Spi)
    }

    /// Restricts subsequent RAM writes to the inclusive window and issues the
    /// begin-write command.
    ///
    /// An invalid window is logged and ignored without touching the bus.
    pub fn set_address_window(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> TftResult<SPI::Error, DC::Error, RST::Error, BL::Error> {
        let w = self.framebuffer.width() as i32;
        let h = self.framebuffer.height() as i32;

        if !check_bounds("x0", x0, 0, x1)
            || !check_bounds("x1", x1, x0, w - 1)
            || !check_bounds("y0", y0, 0, y1)
            || !check_bounds("y1", y1, y0, h - 1)
        {
            return Ok(());
        }

        self.write_command_with_args(
            protocol::COLUMN_ADDRESS,
            &protocol::encode_window_range(x0 as u16, x1 as u16),
        )?;
        self.write_command_with_args(
            protocol::ROW_ADDRESS,
            &protocol::encode_window_range(y0 as u16, y1 as u16),
        )?;
        self.write_command(protocol::MEMORY_WRITE)
    }

    /// Converts the whole framebuffer to packed native color and streams it
    /// to the panel in bands of [`Config::band_lines`] scanlines.
    ///
    /// The framebuffer is read-only here; a failed flush leaves drawn state
    /// intact and is repaired by the next successful one.
    pub fn flush(&mut self) -> TftResult<SPI::Error, DC::Error, RST::Error, BL::Error> {
        let width = self.framebuffer.width();
        let height = self.framebuffer.height();

        self.set_address_window(0, 0, width as i32 - 1, height as i32 - 1)?;

        let band_lines = self.config.band_lines.max(1);
        let mut band = Vec::new();
        band.try_reserve_exact(band_lines * width * COLOR_BYTES)
            .map_err(|_| Error::OutOfMemory)?;

        let mut y = 0;
        while y < height {
            // Clamp the final band instead of overrunning the buffer.
            let rows = band_lines.min(height - y);

            band.clear();
            for &cell in &self.framebuffer.cells()[y * width..(y + rows) * width] {
                band.extend_from_slice(&self.palette.entry(cell));
            }

            self.write_data(&band)?;
            y += rows;
        }

        Ok(())
    }

    /// Shared framebuffer access for drawing primitives.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Mutable framebuffer access for drawing primitives.
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.framebuffer
    }

    /// Fills the whole framebuffer with one palette index.
    pub fn clear(&mut self, index: u8) {
        self.framebuffer.clear(index);
    }

    /// Replaces palette entries starting at slot 0.
    pub fn set_palette(&mut self, entries: &[PackedColor]) {
        self.palette.set_entries(entries);
    }

    /// Packs and stores one palette slot.
    pub fn set_palette_entry(&mut self, index: u8, r: u8, g: u8, b: u8) {
        self.palette.set_entry(index, r, g, b);
    }

    /// Selects the active font; the width mode follows its monospace flag.
    pub fn set_font(&mut self, font: &'static FontDef) {
        self.width_mode = if font.monospace {
            GlyphWidth::Fixed
        } else {
            GlyphWidth::Proportional
        };
        self.font = Some(font);
    }

    /// Forces fixed-advance rendering; no-op without an active font.
    pub fn set_font_fixed(&mut self) {
        if self.font.is_some() {
            self.width_mode = GlyphWidth::Fixed;
        }
    }

    /// Forces proportional-advance rendering; no-op without an active font.
    pub fn set_font_proportional(&mut self) {
        if self.font.is_some() {
            self.width_mode = GlyphWidth::Proportional;
        }
    }

    /// Pixel width of `text` under the active font, 0 without one.
    pub fn measure_string(&self, text: &str) -> i32 {
        self.font
            .map_or(0, |font| font::measure_string(font, self.width_mode, text))
    }

    /// Renders one glyph at `(x, y)`; no-op without an active font.
    pub fn draw_char(&mut self, c: u8, x: i32, y: i32, fg: u8, bg: u8) {
        if let Some(font) = self.font {
            font::draw_char(&mut self.framebuffer, font, self.width_mode, c, x, y, fg, bg);
        }
    }

    /// Renders `text` from `(x, y)`, returning the final cursor x.
    pub fn draw_string(&mut self, x: i32, y: i32, fg: u8, bg: u8, text: &str) -> i32 {
        self.font.map_or(0, |font| {
            font::draw_string(&mut self.framebuffer, font, self.width_mode, x, y, fg, bg, text)
        })
    }

    /// Top-left coordinates placing `text` at `anchor`; `(0, 0)` without an
    /// active font.
    pub fn anchored_string_coords(&self, anchor: TextAnchor, text: &str) -> (i32, i32) {
        self.font.map_or((0, 0), |font| {
            font::anchored_string_coords(&self.framebuffer, font, self.width_mode, anchor, text)
        })
    }

    /// Renders `text` at one of the nine canvas anchors.
    pub fn draw_anchored_string(
        &mut self,
        anchor: TextAnchor,
        text: &str,
        fg: u8,
        bg: u8,
    ) -> i32 {
        self.font.map_or(0, |font| {
            font::draw_anchored_string(
                &mut self.framebuffer,
                font,
                self.width_mode,
                anchor,
                text,
                fg,
                bg,
            )
        })
    }
}
