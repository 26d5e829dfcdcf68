//! Line, rectangle and box primitives over the shadow framebuffer.

use crate::framebuffer::{FrameBuffer, check_bounds};

impl FrameBuffer {
    /// Draws a horizontal line from `x0` to `x1` at row `y`.
    pub fn draw_hline(&mut self, x0: i32, y: i32, x1: i32, index: u8) {
        let w = self.width() as i32;
        let h = self.height() as i32;

        if !check_bounds("x0", x0, 0, w - 1)
            || !check_bounds("x1", x1, x0, w - 1)
            || !check_bounds("y", y, 0, h - 1)
        {
            return;
        }

        for x in x0..=x1 {
            self.set_pixel(x, y, index);
        }
    }

    /// Draws a vertical line from `y0` to `y1` at column `x`.
    pub fn draw_vline(&mut self, x: i32, y0: i32, y1: i32, index: u8) {
        let w = self.width() as i32;
        let h = self.height() as i32;

        if !check_bounds("x", x, 0, w - 1)
            || !check_bounds("y0", y0, 0, h - 1)
            || !check_bounds("y1", y1, y0, h - 1)
        {
            return;
        }

        for y in y0..=y1 {
            self.set_pixel(x, y, index);
        }
    }

    /// Bresenham walker for lines with `|dx| > |dy|`, advancing along x.
    ///
    /// Caller has normalized the endpoints so `x0 < x1`. Final column is
    /// inclusive.
    fn draw_wide_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, index: u8) {
        let dx = x1 - x0;
        let mut dy = y1 - y0;
        let mut incr = 1;
        let mut y = y0;

        if dy < 0 {
            incr = -1;
            dy = -dy;
        }

        let mut error = (dy * 2) - dx;

        for x in x0..=x1 {
            self.set_pixel(x, y, index);

            if error > 0 {
                error -= dx * 2;
                y += incr;
            }

            error += dy * 2;
        }
    }

    /// Bresenham walker for lines with `|dx| <= |dy|`, advancing along y.
    ///
    /// Caller has normalized the endpoints so `y0 < y1`. The final scanline
    /// is excluded, unlike the wide walker; conformance tests lock this in.
    fn draw_tall_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, index: u8) {
        let mut dx = x1 - x0;
        let dy = y1 - y0;
        let mut incr = 1;
        let mut x = x0;

        if dx < 0 {
            incr = -1;
            dx = -dx;
        }

        let mut error = (dx * 2) - dy;

        for y in y0..y1 {
            self.set_pixel(x, y, index);

            if error > 0 {
                error -= dy * 2;
                x += incr;
            }

            error += dx * 2;
        }
    }

    /// Draws a line between two points.
    ///
    /// Axis-aligned lines dispatch to the faster hline/vline routines.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, index: u8) {
        let w = self.width() as i32;
        let h = self.height() as i32;

        if !check_bounds("x0", x0, 0, w - 1) || !check_bounds("y0", y0, 0, h - 1) {
            return;
        }

        if x0 == x1 {
            self.draw_vline(x0, y0, y1, index);
        } else if y0 == y1 {
            self.draw_hline(x0, y0, x1, index);
        } else if (x1 - x0).abs() > (y1 - y0).abs() {
            // Swap both coordinates together so the walker advances from the
            // lower major-axis coordinate.
            if x0 > x1 {
                self.draw_wide_line(x1, y1, x0, y0, index);
            } else {
                self.draw_wide_line(x0, y0, x1, y1, index);
            }
        } else if y0 > y1 {
            self.draw_tall_line(x1, y1, x0, y0, index);
        } else {
            self.draw_tall_line(x0, y0, x1, y1, index);
        }
    }

    /// Fills the inclusive rectangle `(x0,y0)..=(x1,y1)`.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, index: u8) {
        let w = self.width() as i32;
        let h = self.height() as i32;

        if !check_bounds("x0", x0, 0, w - 1)
            || !check_bounds("y0", y0, 0, h - 1)
            || !check_bounds("x1", x1, x0, w - 1)
            || !check_bounds("y1", y1, y0, h - 1)
        {
            return;
        }

        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set_pixel(x, y, index);
            }
        }
    }

    /// Draws a hollow box, filling `thickness` pixels inward from each edge.
    ///
    /// Overlapping rings when `2 * thickness` exceeds the box extent are
    /// harmless; the writes are idempotent.
    pub fn draw_box(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, index: u8) {
        let w = self.width() as i32;
        let h = self.height() as i32;

        if !check_bounds("x0", x0, 0, w - 1)
            || !check_bounds("y0", y0, 0, h - 1)
            || !check_bounds("x1", x1, x0, w - 1)
            || !check_bounds("y1", y1, y0, h - 1)
        {
            return;
        }

        for i in 0..thickness {
            self.draw_hline(x0, y0 + i, x1, index);
            self.draw_hline(x0, y1 - i, x1, index);
            self.draw_vline(x0 + i, y0, y1, index);
            self.draw_vline(x1 - i, y0, y1, index);
        }
    }
}
