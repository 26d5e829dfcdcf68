//! Built-in font assets.
//!
//! Records follow the driver's glyph layout: a width byte, then one byte per
//! column (LSB = top row). `BASIC_5X7` covers printable ASCII with the
//! classic 5x7 glyph set.

use crate::font::FontDef;

#[rustfmt::skip]
static BASIC_5X7_DATA: [u8; 576] = [
    5, 0x00, 0x00, 0x00, 0x00, 0x00, // ' '
    5, 0x00, 0x00, 0x5F, 0x00, 0x00, // '!'
    5, 0x00, 0x07, 0x00, 0x07, 0x00, // '"'
    5, 0x14, 0x7F, 0x14, 0x7F, 0x14, // '#'
    5, 0x24, 0x2A, 0x7F, 0x2A, 0x12, // '$'
    5, 0x23, 0x13, 0x08, 0x64, 0x62, // '%'
    5, 0x36, 0x49, 0x55, 0x22, 0x50, // '&'
    5, 0x00, 0x05, 0x03, 0x00, 0x00, // '\''
    5, 0x00, 0x1C, 0x22, 0x41, 0x00, // '('
    5, 0x00, 0x41, 0x22, 0x1C, 0x00, // ')'
    5, 0x08, 0x2A, 0x1C, 0x2A, 0x08, // '*'
    5, 0x08, 0x08, 0x3E, 0x08, 0x08, // '+'
    5, 0x00, 0x50, 0x30, 0x00, 0x00, // ','
    5, 0x08, 0x08, 0x08, 0x08, 0x08, // '-'
    5, 0x00, 0x60, 0x60, 0x00, 0x00, // '.'
    5, 0x20, 0x10, 0x08, 0x04, 0x02, // '/'
    5, 0x3E, 0x51, 0x49, 0x45, 0x3E, // '0'
    5, 0x00, 0x42, 0x7F, 0x40, 0x00, // '1'
    5, 0x42, 0x61, 0x51, 0x49, 0x46, // '2'
    5, 0x21, 0x41, 0x45, 0x4B, 0x31, // '3'
    5, 0x18, 0x14, 0x12, 0x7F, 0x10, // '4'
    5, 0x27, 0x45, 0x45, 0x45, 0x39, // '5'
    5, 0x3C, 0x4A, 0x49, 0x49, 0x30, // '6'
    5, 0x01, 0x71, 0x09, 0x05, 0x03, // '7'
    5, 0x36, 0x49, 0x49, 0x49, 0x36, // '8'
    5, 0x06, 0x49, 0x49, 0x29, 0x1E, // '9'
    5, 0x00, 0x36, 0x36, 0x00, 0x00, // ':'
    5, 0x00, 0x56, 0x36, 0x00, 0x00, // ';'
    5, 0x00, 0x08, 0x14, 0x22, 0x41, // '<'
    5, 0x14, 0x14, 0x14, 0x14, 0x14, // '='
    5, 0x41, 0x22, 0x14, 0x08, 0x00, // '>'
    5, 0x02, 0x01, 0x51, 0x09, 0x06, // '?'
    5, 0x32, 0x49, 0x79, 0x41, 0x3E, // '@'
    5, 0x7E, 0x11, 0x11, 0x11, 0x7E, // 'A'
    5, 0x7F, 0x49, 0x49, 0x49, 0x36, // 'B'
    5, 0x3E, 0x41, 0x41, 0x41, 0x22, // 'C'
    5, 0x7F, 0x41, 0x41, 0x22, 0x1C, // 'D'
    5, 0x7F, 0x49, 0x49, 0x49, 0x41, // 'E'
    5, 0x7F, 0x09, 0x09, 0x01, 0x01, // 'F'
    5, 0x3E, 0x41, 0x41, 0x51, 0x32, // 'G'
    5, 0x7F, 0x08, 0x08, 0x08, 0x7F, // 'H'
    5, 0x00, 0x41, 0x7F, 0x41, 0x00, // 'I'
    5, 0x20, 0x40, 0x41, 0x3F, 0x01, // 'J'
    5, 0x7F, 0x08, 0x14, 0x22, 0x41, // 'K'
    5, 0x7F, 0x40, 0x40, 0x40, 0x40, // 'L'
    5, 0x7F, 0x02, 0x04, 0x02, 0x7F, // 'M'
    5, 0x7F, 0x04, 0x08, 0x10, 0x7F, // 'N'
    5, 0x3E, 0x41, 0x41, 0x41, 0x3E, // 'O'
    5, 0x7F, 0x09, 0x09, 0x09, 0x06, // 'P'
    5, 0x3E, 0x41, 0x51, 0x21, 0x5E, // 'Q'
    5, 0x7F, 0x09, 0x19, 0x29, 0x46, // 'R'
    5, 0x46, 0x49, 0x49, 0x49, 0x31, // 'S'
    5, 0x01, 0x01, 0x7F, 0x01, 0x01, // 'T'
    5, 0x3F, 0x40, 0x40, 0x40, 0x3F, // 'U'
    5, 0x1F, 0x20, 0x40, 0x20, 0x1F, // 'V'
    5, 0x3F, 0x40, 0x38, 0x40, 0x3F, // 'W'
    5, 0x63, 0x14, 0x08, 0x14, 0x63, // 'X'
    5, 0x07, 0x08, 0x70, 0x08, 0x07, // 'Y'
    5, 0x61, 0x51, 0x49, 0x45, 0x43, // 'Z'
    5, 0x00, 0x7F, 0x41, 0x41, 0x00, // '['
    5, 0x02, 0x04, 0x08, 0x10, 0x20, // '\\'
    5, 0x00, 0x41, 0x41, 0x7F, 0x00, // ']'
    5, 0x04, 0x02, 0x01, 0x02, 0x04, // '^'
    5, 0x40, 0x40, 0x40, 0x40, 0x40, // '_'
    5, 0x00, 0x01, 0x02, 0x04, 0x00, // '`'
    5, 0x20, 0x54, 0x54, 0x54, 0x78, // 'a'
    5, 0x7F, 0x48, 0x44, 0x44, 0x38, // 'b'
    5, 0x38, 0x44, 0x44, 0x44, 0x20, // 'c'
    5, 0x38, 0x44, 0x44, 0x48, 0x7F, // 'd'
    5, 0x38, 0x54, 0x54, 0x54, 0x18, // 'e'
    5, 0x08, 0x7E, 0x09, 0x01, 0x02, // 'f'
    5, 0x0C, 0x52, 0x52, 0x52, 0x3E, // 'g'
    5, 0x7F, 0x08, 0x04, 0x04, 0x78, // 'h'
    5, 0x00, 0x44, 0x7D, 0x40, 0x00, // 'i'
    5, 0x20, 0x40, 0x44, 0x3D, 0x00, // 'j'
    5, 0x00, 0x7F, 0x10, 0x28, 0x44, // 'k'
    5, 0x00, 0x41, 0x7F, 0x40, 0x00, // 'l'
    5, 0x7C, 0x04, 0x18, 0x04, 0x78, // 'm'
    5, 0x7C, 0x08, 0x04, 0x04, 0x78, // 'n'
    5, 0x38, 0x44, 0x44, 0x44, 0x38, // 'o'
    5, 0x7C, 0x14, 0x14, 0x14, 0x08, // 'p'
    5, 0x08, 0x14, 0x14, 0x18, 0x7C, // 'q'
    5, 0x7C, 0x08, 0x04, 0x04, 0x08, // 'r'
    5, 0x48, 0x54, 0x54, 0x54, 0x20, // 's'
    5, 0x04, 0x3F, 0x44, 0x40, 0x20, // 't'
    5, 0x3C, 0x40, 0x40, 0x20, 0x7C, // 'u'
    5, 0x1C, 0x20, 0x40, 0x20, 0x1C, // 'v'
    5, 0x3C, 0x40, 0x30, 0x40, 0x3C, // 'w'
    5, 0x44, 0x28, 0x10, 0x28, 0x44, // 'x'
    5, 0x0C, 0x50, 0x50, 0x50, 0x3C, // 'y'
    5, 0x44, 0x64, 0x54, 0x4C, 0x44, // 'z'
    5, 0x00, 0x08, 0x36, 0x41, 0x00, // '{'
    5, 0x00, 0x00, 0x7F, 0x00, 0x00, // '|'
    5, 0x00, 0x41, 0x36, 0x08, 0x00, // '}'
    5, 0x08, 0x08, 0x2A, 0x1C, 0x08, // '~'
    5, 0x00, 0x00, 0x00, 0x00, 0x00, // DEL
];

/// Monospace 5x7 ASCII font.
pub static BASIC_5X7: FontDef = FontDef {
    name: "basic5x7",
    data: &BASIC_5X7_DATA,
    width: 5,
    height: 7,
    start_char: 0x20,
    end_char: 0x7F,
    monospace: true,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{GlyphWidth, glyph_width, measure_string};

    #[test]
    fn covers_printable_ascii() {
        let record_len = 1 + BASIC_5X7.width as usize * BASIC_5X7.column_stride();
        let chars = (BASIC_5X7.end_char - BASIC_5X7.start_char) as usize + 1;

        assert_eq!(BASIC_5X7.data.len(), chars * record_len);
        assert!(BASIC_5X7.glyph(b' ').is_some());
        assert!(BASIC_5X7.glyph(b'~').is_some());
        assert!(BASIC_5X7.glyph(b'\n').is_none());
    }

    #[test]
    fn every_record_is_five_wide() {
        for c in BASIC_5X7.start_char..=BASIC_5X7.end_char {
            assert_eq!(glyph_width(&BASIC_5X7, GlyphWidth::Proportional, c), 5);
        }
        assert_eq!(measure_string(&BASIC_5X7, GlyphWidth::Fixed, "Hello"), 25);
    }
}
