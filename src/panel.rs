//! Vendor power-on sequences, kept as data.
//!
//! Each script is an opaque list of controller commands and settle delays,
//! reproduced from the vendor reference flows. Scripts must leave the panel
//! in display-on state; [`crate::Tft::init`] runs one after the hardware
//! reset pulse.

use crate::color;
use crate::protocol;

/// One step of a panel power-on script.
#[derive(Clone, Copy, Debug)]
pub enum PanelOp {
    /// Send an opcode with zero or more argument bytes.
    Command {
        opcode: u8,
        args: &'static [u8],
    },
    /// Blocking settle delay.
    DelayMs(u32),
}

/// Shorthand for script tables.
const fn cmd(opcode: u8, args: &'static [u8]) -> PanelOp {
    PanelOp::Command { opcode, args }
}

/// ST7735 power-on sequence.
pub const ST7735_INIT: &[PanelOp] = &[
    cmd(protocol::SOFT_RESET, &[]),
    PanelOp::DelayMs(100),
    cmd(protocol::SLEEP_OUT, &[]),
    PanelOp::DelayMs(100),
    // Gamma curve select
    cmd(0x26, &[0x04]),
    cmd(protocol::PIXEL_FORMAT, &[color::PIXEL_FORMAT]),
    cmd(protocol::MADCTL, &[0x00]),
    cmd(protocol::NORMAL_MODE_ON, &[]),
    // Frame rate control
    cmd(0xB1, &[0x06, 0x01, 0x01]),
    cmd(protocol::DISPLAY_ON, &[]),
];

/// ILI9341 power-on sequence, after the fbcp-ili9341 reference flow.
pub const ILI9341_INIT: &[PanelOp] = &[
    cmd(protocol::SOFT_RESET, &[]),
    PanelOp::DelayMs(120),
    cmd(protocol::DISPLAY_OFF, &[]),
    // Power control A
    cmd(0xCB, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    // Power control B
    cmd(0xCF, &[0x00, 0xC1, 0x30]),
    // Driver timing control A
    cmd(0xE8, &[0x85, 0x00, 0x78]),
    // Driver timing control B
    cmd(0xEA, &[0x00, 0x00]),
    // Power on sequence control
    cmd(0xED, &[0x64, 0x03, 0x12, 0x81]),
    // Power control 1 and 2
    cmd(0xC0, &[0x23]),
    cmd(0xC1, &[0x10]),
    // VCOM control 1 and 2
    cmd(0xC5, &[0x3E, 0x28]),
    cmd(0xC7, &[0x86]),
    cmd(protocol::MADCTL, &[0x00]),
    cmd(protocol::INVERSION_OFF, &[]),
    cmd(protocol::PIXEL_FORMAT, &[color::PIXEL_FORMAT]),
    // Frame rate control
    cmd(0xB1, &[0x00, 0x1B]),
    // Display function control
    cmd(0xB6, &[0x08, 0x82, 0x27]),
    // Enable 3G
    cmd(0xF2, &[0x02]),
    // Gamma set
    cmd(0x26, &[0x01]),
    // Positive gamma correction
    cmd(
        0xE0,
        &[
            0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03,
            0x0E, 0x09, 0x00,
        ],
    ),
    // Negative gamma correction
    cmd(
        0xE1,
        &[
            0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C,
            0x31, 0x36, 0x0F,
        ],
    ),
    cmd(protocol::SLEEP_OUT, &[]),
    PanelOp::DelayMs(120),
    cmd(protocol::DISPLAY_ON, &[]),
];
