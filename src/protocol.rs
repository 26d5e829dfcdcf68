//! Command-level protocol for MIPI-DCS style panel controllers.
//!
//! Opcode constants cover the subset the driver and the bundled power-on
//! scripts use; the ILI9341 and ST7735 share all of them.

/// Software reset.
pub const SOFT_RESET: u8 = 0x01;
/// Exit sleep mode.
pub const SLEEP_OUT: u8 = 0x11;
/// Normal display mode on (partial mode off).
pub const NORMAL_MODE_ON: u8 = 0x13;
/// Display inversion off.
pub const INVERSION_OFF: u8 = 0x20;
/// Display off.
pub const DISPLAY_OFF: u8 = 0x28;
/// Display on.
pub const DISPLAY_ON: u8 = 0x29;
/// Column address range for subsequent RAM writes.
pub const COLUMN_ADDRESS: u8 = 0x2A;
/// Row (page) address range for subsequent RAM writes.
pub const ROW_ADDRESS: u8 = 0x2B;
/// Begin RAM write at the configured window.
pub const MEMORY_WRITE: u8 = 0x2C;
/// Memory access control (orientation / color order).
pub const MADCTL: u8 = 0x36;
/// Interface pixel format.
pub const PIXEL_FORMAT: u8 = 0x3A;

/// MADCTL row address order: flipped vertically and horizontally.
pub const MADCTL_MY: u8 = 1 << 7;
/// MADCTL column address order: flipped horizontally.
pub const MADCTL_MX: u8 = 1 << 6;
/// MADCTL row/column exchange: rotated 90 degrees, flipped horizontally.
pub const MADCTL_MV: u8 = 1 << 5;
/// MADCTL vertical refresh order.
pub const MADCTL_ML: u8 = 1 << 4;
/// MADCTL BGR subpixel order.
pub const MADCTL_BGR: u8 = 1 << 3;
/// MADCTL horizontal refresh order.
pub const MADCTL_MH: u8 = 1 << 2;

/// Encodes an inclusive axis range as the four argument bytes of the
/// column/row address commands: start and end, each split high byte first.
#[inline]
pub fn encode_window_range(start: u16, end: u16) -> [u8; 4] {
    [
        (start >> 8) as u8,
        start as u8,
        (end >> 8) as u8,
        end as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_range_splits_big_endian() {
        assert_eq!(encode_window_range(0, 319), [0x00, 0x00, 0x01, 0x3F]);
        assert_eq!(encode_window_range(0, 239), [0x00, 0x00, 0x00, 0xEF]);
        assert_eq!(encode_window_range(0x0102, 0x0304), [0x01, 0x02, 0x03, 0x04]);
    }
}
