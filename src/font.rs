//! Bitmap font decoding, measurement and string layout.
//!
//! Glyph assets are width-prefixed, column-major and bit-packed: each
//! character record is `1 + width * ceil(height / 8)` bytes, byte 0 holding
//! the proportional width, the rest holding columns in 8-row bands with the
//! bit index equal to `row % 8`, LSB first.

use crate::framebuffer::FrameBuffer;

/// An immutable bitmap font asset.
#[derive(Clone, Copy, Debug)]
pub struct FontDef {
    pub name: &'static str,
    pub data: &'static [u8],
    /// Maximum glyph width; also the stored column count per record.
    pub width: i32,
    pub height: i32,
    /// First character code covered by `data`, inclusive.
    pub start_char: u8,
    /// Last character code covered by `data`, inclusive.
    pub end_char: u8,
    pub monospace: bool,
}

/// How a glyph's advance width is resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GlyphWidth {
    /// Every glyph advances by the font's full width.
    Fixed,
    /// Each glyph advances by its record's width byte.
    Proportional,
}

/// Named canvas positions for automatic string placement.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextAnchor {
    East,
    West,
    North,
    South,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Center,
}

impl FontDef {
    /// Whether `c` falls inside the font's code range.
    #[inline]
    pub fn contains(&self, c: u8) -> bool {
        c >= self.start_char && c <= self.end_char
    }

    /// Bytes per glyph column, height padded up to a multiple of 8.
    #[inline]
    pub fn column_stride(&self) -> usize {
        ((self.height + 7) / 8) as usize
    }

    /// Full glyph record for `c`, or `None` for out-of-range characters and
    /// truncated assets.
    pub fn glyph(&self, c: u8) -> Option<&'static [u8]> {
        if !self.contains(c) {
            return None;
        }

        let record_len = 1 + self.width as usize * self.column_stride();
        let offset = (c - self.start_char) as usize * record_len;
        self.data.get(offset..offset + record_len)
    }
}

/// Resolves a glyph's advance width under `mode`.
///
/// Proportional lookups outside the font's range resolve to 0.
pub fn glyph_width(font: &FontDef, mode: GlyphWidth, c: u8) -> i32 {
    match mode {
        GlyphWidth::Fixed => font.width,
        GlyphWidth::Proportional => font.glyph(c).map_or(0, |record| record[0] as i32),
    }
}

/// Sums the advance widths of `text`'s in-range characters.
pub fn measure_string(font: &FontDef, mode: GlyphWidth, text: &str) -> i32 {
    text.bytes()
        .filter(|&c| font.contains(c))
        .map(|c| glyph_width(font, mode, c))
        .sum()
}

/// Renders one glyph with its top-left corner at `(x, y)`.
///
/// Both foreground and background cells are always plotted; pass the
/// transparent sentinel as `bg` to leave the background untouched.
/// Out-of-range characters and fully off-canvas placements are no-ops;
/// partially off-canvas glyphs are clipped.
pub fn draw_char(
    fb: &mut FrameBuffer,
    font: &FontDef,
    mode: GlyphWidth,
    c: u8,
    x: i32,
    y: i32,
    fg: u8,
    bg: u8,
) {
    let Some(record) = font.glyph(c) else {
        return;
    };

    // Skip the width byte.
    let columns = &record[1..];
    let stride = font.column_stride();

    let char_width = glyph_width(font, mode, c);
    let char_height = font.height;

    let mut char_start_x = x;
    let mut char_start_y = y;
    let mut char_end_x = x + char_width;
    let mut char_end_y = y + char_height;

    // Negative start coordinates clip into the glyph instead of the canvas:
    // whole columns are skipped for x, the row bit index is offset for y.
    let offset_x = if char_start_x < 0 { -char_start_x } else { 0 };
    let offset_y = if char_start_y < 0 { -char_start_y } else { 0 };

    char_start_x += offset_x;
    char_start_y += offset_y;

    if char_end_x < 0
        || char_start_x >= fb.width() as i32
        || char_end_y < 0
        || char_start_y >= fb.height() as i32
    {
        return;
    }

    char_end_x = char_end_x.min(fb.width() as i32 - 1);
    char_end_y = char_end_y.min(fb.height() as i32 - 1);

    for (col, x) in (char_start_x..char_end_x).enumerate() {
        let column_base = (offset_x as usize + col) * stride;

        let mut i = 0;
        for y in char_start_y..char_end_y {
            if i >= char_height {
                break;
            }

            let row = (i + offset_y) as usize;
            let byte = columns.get(column_base + row / 8).copied().unwrap_or(0);

            if byte & (1 << (row % 8)) != 0 {
                fb.set_pixel(x, y, fg);
            } else {
                fb.set_pixel(x, y, bg);
            }

            i += 1;
        }
    }
}

/// Renders `text` left to right from `(x, y)`, returning the final cursor x.
///
/// `'\n'` resets the cursor to the line's start x and advances y by the
/// font's full height. A string measuring zero pixels returns 0.
pub fn draw_string(
    fb: &mut FrameBuffer,
    font: &FontDef,
    mode: GlyphWidth,
    x: i32,
    y: i32,
    fg: u8,
    bg: u8,
    text: &str,
) -> i32 {
    if measure_string(font, mode, text) <= 0 {
        return 0;
    }

    let saved_x = x;
    let mut x = x;
    let mut y = y;

    for c in text.bytes() {
        if c == b'\n' {
            y += font.height;
            x = saved_x;
            continue;
        }

        if font.contains(c) {
            draw_char(fb, font, mode, c, x, y, fg, bg);
            x += glyph_width(font, mode, c);
        }
    }

    x
}

/// Computes the top-left coordinates placing `text`'s measured box at
/// `anchor` within the canvas.
pub fn anchored_string_coords(
    fb: &FrameBuffer,
    font: &FontDef,
    mode: GlyphWidth,
    anchor: TextAnchor,
    text: &str,
) -> (i32, i32) {
    let canvas_width = fb.width() as i32;
    let canvas_height = fb.height() as i32;
    let string_width = measure_string(font, mode, text);
    let string_height = font.height;

    match anchor {
        TextAnchor::East => (
            canvas_width - string_width,
            canvas_height / 2 - string_height / 2,
        ),
        TextAnchor::West => (0, canvas_height / 2 - string_height / 2),
        TextAnchor::North => (canvas_width / 2 - string_width / 2, 0),
        TextAnchor::South => (
            canvas_width / 2 - string_width / 2,
            canvas_height - string_height,
        ),
        TextAnchor::NorthEast => (canvas_width - string_width, 0),
        TextAnchor::NorthWest => (0, 0),
        TextAnchor::SouthEast => (
            canvas_width - string_width,
            canvas_height - string_height,
        ),
        TextAnchor::SouthWest => (0, canvas_height - string_height),
        TextAnchor::Center => (
            canvas_width / 2 - string_width / 2,
            canvas_height / 2 - string_height / 2,
        ),
    }
}

/// Renders `text` at one of the nine anchors; returns the final cursor x.
pub fn draw_anchored_string(
    fb: &mut FrameBuffer,
    font: &FontDef,
    mode: GlyphWidth,
    anchor: TextAnchor,
    text: &str,
    fg: u8,
    bg: u8,
) -> i32 {
    let (x, y) = anchored_string_coords(fb, font, mode, anchor, text);
    draw_string(fb, font, mode, x, y, fg, bg, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TRANSPARENT;

    // Two glyphs, height 8 (stride 1), stored 9 columns wide.
    // 'A' is 9 pixels wide proportionally, 'B' is 7.
    // Column bytes are distinct so clipping tests can identify columns.
    const TEST_DATA: [u8; 20] = [
        9, 1, 2, 3, 4, 5, 6, 7, 8, 9, // 'A'
        7, 11, 12, 13, 14, 15, 16, 17, 18, 19, // 'B'
    ];

    const TEST_FONT: FontDef = FontDef {
        name: "test9x8",
        data: &TEST_DATA,
        width: 9,
        height: 8,
        start_char: b'A',
        end_char: b'B',
        monospace: false,
    };

    #[test]
    fn glyph_lookup_fails_softly_out_of_range() {
        assert!(TEST_FONT.glyph(b'A').is_some());
        assert!(TEST_FONT.glyph(b'C').is_none());
        assert!(TEST_FONT.glyph(b' ').is_none());
        assert_eq!(glyph_width(&TEST_FONT, GlyphWidth::Proportional, b'z'), 0);
    }

    #[test]
    fn column_stride_rounds_height_up() {
        let tall = FontDef {
            height: 17,
            ..TEST_FONT
        };
        assert_eq!(TEST_FONT.column_stride(), 1);
        assert_eq!(tall.column_stride(), 3);
    }

    #[test]
    fn measure_sums_proportional_widths() {
        assert_eq!(measure_string(&TEST_FONT, GlyphWidth::Proportional, "AB"), 16);
        // Out-of-range characters contribute nothing.
        assert_eq!(
            measure_string(&TEST_FONT, GlyphWidth::Proportional, "AzB"),
            16
        );
        assert_eq!(measure_string(&TEST_FONT, GlyphWidth::Proportional, "zz"), 0);
    }

    #[test]
    fn measure_fixed_uses_font_width() {
        assert_eq!(measure_string(&TEST_FONT, GlyphWidth::Fixed, "AB"), 18);
    }

    #[test]
    fn draw_char_plots_foreground_and_background() {
        let mut fb = crate::FrameBuffer::new(16, 16).unwrap();

        fb.clear(5);
        // 'A' column 0 is 0b0000_0001: row 0 set, rows 1..8 clear.
        draw_char(&mut fb, &TEST_FONT, GlyphWidth::Proportional, b'A', 0, 0, 1, 2);
        assert_eq!(fb.pixel(0, 0), Some(1));
        assert_eq!(fb.pixel(0, 1), Some(2));
        // Column 1 is 0b0000_0010: row 1 set.
        assert_eq!(fb.pixel(1, 0), Some(2));
        assert_eq!(fb.pixel(1, 1), Some(1));
    }

    #[test]
    fn transparent_background_leaves_prior_cells() {
        let mut fb = crate::FrameBuffer::new(16, 16).unwrap();

        fb.clear(5);
        draw_char(
            &mut fb,
            &TEST_FONT,
            GlyphWidth::Proportional,
            b'A',
            0,
            0,
            1,
            TRANSPARENT,
        );
        assert_eq!(fb.pixel(0, 0), Some(1));
        assert_eq!(fb.pixel(0, 1), Some(5));
    }

    #[test]
    fn negative_x_skips_glyph_columns() {
        let mut fb = crate::FrameBuffer::new(16, 16).unwrap();

        // Columns 0 and 1 fall off-canvas; canvas column 0 shows glyph
        // column 2 (byte 3, rows 0 and 1 set).
        draw_char(&mut fb, &TEST_FONT, GlyphWidth::Proportional, b'A', -2, 0, 1, 2);
        assert_eq!(fb.pixel(0, 0), Some(1));
        assert_eq!(fb.pixel(0, 1), Some(1));
        assert_eq!(fb.pixel(0, 2), Some(2));
    }

    #[test]
    fn negative_y_offsets_row_bits() {
        let mut fb = crate::FrameBuffer::new(16, 16).unwrap();

        // Rows 0..3 are clipped; canvas row 0 shows glyph row 3. Column 3
        // (byte 4, 0b0000_0100) has row 2 set, so canvas row 0 is bg and
        // glyph row 3 of column 2 (byte 3) is bg too while column 7
        // (byte 8, 0b0000_1000) has row 3 set.
        draw_char(&mut fb, &TEST_FONT, GlyphWidth::Proportional, b'A', 0, -3, 1, 2);
        assert_eq!(fb.pixel(7, 0), Some(1));
        assert_eq!(fb.pixel(3, 0), Some(2));
    }

    #[test]
    fn fully_offscreen_glyph_is_a_noop() {
        let mut fb = crate::FrameBuffer::new(8, 8).unwrap();

        draw_char(
            &mut fb,
            &TEST_FONT,
            GlyphWidth::Proportional,
            b'A',
            -20,
            0,
            1,
            2,
        );
        draw_char(&mut fb, &TEST_FONT, GlyphWidth::Proportional, b'A', 8, 0, 1, 2);
        draw_char(&mut fb, &TEST_FONT, GlyphWidth::Proportional, b'A', 0, 8, 1, 2);
        assert!(fb.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn far_edge_clamp_stops_short_of_last_column() {
        let mut fb = crate::FrameBuffer::new(8, 16).unwrap();

        // Glyph is 9 columns wide; the clamp to width-1 means canvas column
        // 7 is never drawn.
        fb.clear(5);
        draw_char(&mut fb, &TEST_FONT, GlyphWidth::Proportional, b'A', 0, 0, 1, 2);
        assert_ne!(fb.pixel(6, 0), Some(5));
        assert_eq!(fb.pixel(7, 0), Some(5));
    }

    #[test]
    fn draw_string_advances_and_returns_cursor() {
        let mut fb = crate::FrameBuffer::new(32, 16).unwrap();

        let end = draw_string(
            &mut fb,
            &TEST_FONT,
            GlyphWidth::Proportional,
            2,
            0,
            1,
            2,
            "AB",
        );
        assert_eq!(end, 2 + 16);
        // 'B' starts at x = 2 + 9; its column 0 (byte 11, 0b0000_1011) has
        // rows 0, 1 and 3 set.
        assert_eq!(fb.pixel(11, 0), Some(1));
        assert_eq!(fb.pixel(11, 2), Some(2));
        assert_eq!(fb.pixel(11, 3), Some(1));
    }

    #[test]
    fn empty_measure_returns_zero_cursor() {
        let mut fb = crate::FrameBuffer::new(32, 16).unwrap();

        let end = draw_string(&mut fb, &TEST_FONT, GlyphWidth::Proportional, 4, 0, 1, 2, "zz");
        assert_eq!(end, 0);
        assert!(fb.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn newline_resets_x_and_advances_y() {
        let mut fb = crate::FrameBuffer::new(32, 32).unwrap();

        let end = draw_string(
            &mut fb,
            &TEST_FONT,
            GlyphWidth::Proportional,
            3,
            0,
            1,
            2,
            "A\nB",
        );
        // Second line 'B' renders at (3, 8): its column 0 row 0 is set.
        assert_eq!(fb.pixel(3, 8), Some(1));
        assert_eq!(end, 3 + 7);
    }

    #[test]
    fn center_anchor_matches_reference_coordinates() {
        // 20x8 string on a 128x64 canvas resolves to (54, 28).
        const WIDE_DATA: [u8; 20] = [
            12, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 'A', width 12
            8, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 'B', width 8
        ];
        const WIDE_FONT: FontDef = FontDef {
            name: "wide",
            data: &WIDE_DATA,
            width: 9,
            height: 8,
            start_char: b'A',
            end_char: b'B',
            monospace: false,
        };

        let fb = crate::FrameBuffer::new(128, 64).unwrap();
        assert_eq!(
            anchored_string_coords(&fb, &WIDE_FONT, GlyphWidth::Proportional, TextAnchor::Center, "AB"),
            (54, 28)
        );
    }

    #[test]
    fn corner_and_edge_anchors_match_reference_formulas() {
        let fb = crate::FrameBuffer::new(128, 64).unwrap();
        let coords = |anchor| {
            anchored_string_coords(&fb, &TEST_FONT, GlyphWidth::Proportional, anchor, "AB")
        };

        // "AB" measures 16x8.
        assert_eq!(coords(TextAnchor::NorthWest), (0, 0));
        assert_eq!(coords(TextAnchor::NorthEast), (112, 0));
        assert_eq!(coords(TextAnchor::SouthWest), (0, 56));
        assert_eq!(coords(TextAnchor::SouthEast), (112, 56));
        assert_eq!(coords(TextAnchor::North), (56, 0));
        assert_eq!(coords(TextAnchor::South), (56, 56));
        assert_eq!(coords(TextAnchor::West), (0, 28));
        assert_eq!(coords(TextAnchor::East), (112, 28));
    }
}
