//! Packed native colors and the 256-entry palette.

/// Number of palette slots.
pub const PALETTE_SIZE: usize = 256;

/// Index that single-pixel writes treat as "do not draw".
///
/// Bulk fills ([`crate::FrameBuffer::clear`]) ignore the sentinel and store
/// 255 like any other value.
pub const TRANSPARENT: u8 = 255;

/// Bytes per packed pixel on the wire.
#[cfg(not(feature = "rgb888"))]
pub const COLOR_BYTES: usize = 2;
/// Bytes per packed pixel on the wire.
#[cfg(feature = "rgb888")]
pub const COLOR_BYTES: usize = 3;

/// Argument byte for the pixel-format command (0x3A) matching [`COLOR_BYTES`].
#[cfg(not(feature = "rgb888"))]
pub const PIXEL_FORMAT: u8 = 0x55;
/// Argument byte for the pixel-format command (0x3A) matching [`COLOR_BYTES`].
#[cfg(feature = "rgb888")]
pub const PIXEL_FORMAT: u8 = 0x66;

/// One palette entry, stored in wire byte order.
pub type PackedColor = [u8; COLOR_BYTES];

/// Packs 8-bit RGB into RGB565, high byte first.
///
/// The byte order matches what the panel expects on the bus, so entries can
/// be streamed during flush without further shuffling.
#[cfg(not(feature = "rgb888"))]
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> PackedColor {
    let value =
        (((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3);
    value.to_be_bytes()
}

/// Packs 8-bit RGB into 3 bytes for 18-bit panel mode.
#[cfg(feature = "rgb888")]
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> PackedColor {
    [r, g, b]
}

/// Indexed-color lookup table, resolved at flush time.
#[derive(Clone)]
pub struct Palette {
    entries: [PackedColor; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// Creates an all-black palette.
    pub const fn new() -> Self {
        Self {
            entries: [[0u8; COLOR_BYTES]; PALETTE_SIZE],
        }
    }

    /// Replaces entries starting at slot 0.
    ///
    /// Anything past slot 255 in `entries` is ignored.
    pub fn set_entries(&mut self, entries: &[PackedColor]) {
        let count = entries.len().min(PALETTE_SIZE);
        self.entries[..count].copy_from_slice(&entries[..count]);
    }

    /// Packs and stores one RGB triple.
    pub fn set_entry(&mut self, index: u8, r: u8, g: u8, b: u8) {
        self.entries[index as usize] = pack_rgb(r, g, b);
    }

    /// Reads one packed entry.
    #[inline]
    pub fn entry(&self, index: u8) -> PackedColor {
        self.entries[index as usize]
    }
}
