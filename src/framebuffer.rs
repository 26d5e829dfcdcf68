//! Indexed shadow framebuffer.

use alloc::vec::Vec;

use crate::color::TRANSPARENT;

/// Returned when the cell buffer cannot be allocated.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct OutOfMemory;

/// Logs and rejects a value outside `min..=max`.
///
/// Diagnostics name the offending value and the violated bound so a failed
/// draw call is traceable from the log alone.
pub(crate) fn check_bounds(name: &str, value: i32, min: i32, max: i32) -> bool {
    if value < min {
        log::error!("{name} ({value}) < {min}");
        return false;
    }

    if value > max {
        log::error!("{name} ({value}) > {max}");
        return false;
    }

    true
}

/// One palette index per pixel, row-major, invisible until flushed.
#[derive(Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl FrameBuffer {
    /// Allocates a zeroed `width` x `height` buffer.
    pub fn new(width: usize, height: usize) -> Result<Self, OutOfMemory> {
        let size = width * height;
        let mut cells = Vec::new();

        cells.try_reserve_exact(size).map_err(|_| OutOfMemory)?;
        cells.resize(size, 0);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Canvas width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the underlying cells, row-major.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Fills every cell with `index`.
    ///
    /// The transparent sentinel is stored like any other value here.
    pub fn clear(&mut self, index: u8) {
        self.cells.fill(index);
    }

    /// Writes one cell, skipping the transparent sentinel.
    ///
    /// Out-of-range coordinates are skipped silently; the sloped-line walkers
    /// and the glyph renderer rely on this when they run past an edge.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, index: u8) {
        if index == TRANSPARENT {
            return;
        }

        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        self.cells[x as usize + y as usize * self.width] = index;
    }

    /// Writes one cell after a logged bounds check.
    pub fn put_pixel(&mut self, x: i32, y: i32, index: u8) {
        if !check_bounds("x", x, 0, self.width as i32 - 1) {
            return;
        }

        if !check_bounds("y", y, 0, self.height as i32 - 1) {
            return;
        }

        self.set_pixel(x, y, index);
    }

    /// Reads one cell.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }

        Some(self.cells[x as usize + y as usize * self.width])
    }
}
