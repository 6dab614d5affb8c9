//! Raster implementation.

use crate::{Raster, RasterMut, BYTES_PER_PIXEL};

impl<'a> Raster<'a> {
    /// Allocate a new raster for the given frame buffer.
    ///
    /// The buffer must hold exactly `w * h` 16-bit pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// const SCREEN_W: usize = 640;
    /// const SCREEN_H: usize = 480;
    /// let buf = [0; SCREEN_W * SCREEN_H * flh::BYTES_PER_PIXEL];
    ///
    /// flh::Raster::new(SCREEN_W, SCREEN_H, &buf);
    /// ```
    pub fn new(w: usize, h: usize, buf: &'a [u8]) -> Self {
        assert!(w > 0 && h > 0);
        assert_eq!(buf.len(), w * h * BYTES_PER_PIXEL);

        Raster { w, h, buf }
    }

    /// Get the raster width.
    pub fn width(&self) -> usize {
        self.w
    }

    /// Get the raster height.
    pub fn height(&self) -> usize {
        self.h
    }
}

impl<'a> RasterMut<'a> {
    /// Allocate a new raster for the given frame buffer memory slice.
    ///
    /// The buffer must hold exactly `w * h` 16-bit pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// const SCREEN_W: usize = 640;
    /// const SCREEN_H: usize = 480;
    /// let mut buf = [0; SCREEN_W * SCREEN_H * flh::BYTES_PER_PIXEL];
    ///
    /// flh::RasterMut::new(SCREEN_W, SCREEN_H, &mut buf);
    /// ```
    pub fn new(w: usize, h: usize, buf: &'a mut [u8]) -> Self {
        assert!(w > 0 && h > 0);
        assert_eq!(buf.len(), w * h * BYTES_PER_PIXEL);

        RasterMut { w, h, buf }
    }

    /// Get the raster width.
    pub fn width(&self) -> usize {
        self.w
    }

    /// Get the raster height.
    pub fn height(&self) -> usize {
        self.h
    }
}
