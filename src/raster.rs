// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Raster is a two-tone pixel buffer, and the RasterCompositor
//! is the only thing that ever writes to one.  Columns can arrive in
//! any order; each one lands in its own slot, so no map of columns is
//! ever needed.

use image::png::PNGEncoder;
use image::ColorType;
use std::io::Write;

use errors::BifurcationError;
use orbit::CompletedColumn;
use region::RegionConfig;

/// The two colors a pixel can be.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Nothing has landed here.
    Background,
    /// At least one sample has.
    Foreground,
}

/// The gray levels the two tones are drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Gray level for `Tone::Background`.
    pub background: u8,
    /// Gray level for `Tone::Foreground`.
    pub foreground: u8,
}

impl Default for Palette {
    /// White orbits on black.
    fn default() -> Self {
        Palette {
            background: 0x00,
            foreground: 0xff,
        }
    }
}

impl Palette {
    /// The same palette with the two tones swapped.
    pub fn inverted(self) -> Self {
        Palette {
            background: self.foreground,
            foreground: self.background,
        }
    }

    fn gray(&self, tone: Tone) -> u8 {
        match tone {
            Tone::Background => self.background,
            Tone::Foreground => self.foreground,
        }
    }
}

/// A width by height grid of tones, stored row by row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Tone>,
}

impl Raster {
    /// An all-background raster.
    pub fn new(width: usize, height: usize) -> Self {
        Raster {
            width,
            height,
            pixels: vec![Tone::Background; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The tone at (x, y), or None if that is off the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Tone> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    // Pixels only ever go from background to foreground.
    fn set(&mut self, x: usize, y: usize) {
        self.pixels[y * self.width + x] = Tone::Foreground;
    }

    /// How many pixels have been drawn.
    pub fn foreground_count(&self) -> usize {
        self.pixels
            .iter()
            .filter(|&&tone| tone == Tone::Foreground)
            .count()
    }

    /// The raster as 8-bit grayscale, row by row.
    pub fn to_luma(&self, palette: &Palette) -> Vec<u8> {
        self.pixels.iter().map(|&tone| palette.gray(tone)).collect()
    }

    /// Encode the raster as a grayscale PNG.
    pub fn write_png<W: Write>(&self, writer: W, palette: &Palette) -> Result<(), BifurcationError> {
        let encoder = PNGEncoder::new(writer);
        encoder.encode(
            &self.to_luma(palette),
            self.width as u32,
            self.height as u32,
            ColorType::Gray(8),
        )?;
        Ok(())
    }
}

/// Plots completed columns into a raster sized by the region.
pub struct RasterCompositor<'a> {
    config: &'a RegionConfig,
    raster: Raster,
    received: Vec<bool>,
    outstanding: usize,
}

impl<'a> RasterCompositor<'a> {
    /// A compositor with a blank raster and no columns received.
    pub fn new(config: &'a RegionConfig) -> Self {
        RasterCompositor {
            config,
            raster: Raster::new(config.pixel_width(), config.pixel_height()),
            received: vec![false; config.pixel_width()],
            outstanding: config.pixel_width(),
        }
    }

    /// Plot every sample of one column whose row falls on the raster.
    /// Returns how many samples landed.  A column that was already
    /// plotted, or that the raster has no room for, is an error.
    pub fn composite(&mut self, column: &CompletedColumn) -> Result<usize, BifurcationError> {
        let x = column.index();
        if x >= self.raster.width {
            return Err(BifurcationError::ColumnOutOfRange {
                index: x,
                width: self.raster.width,
            });
        }
        if self.received[x] {
            return Err(BifurcationError::DuplicateColumn { index: x });
        }
        self.received[x] = true;
        self.outstanding -= 1;

        let mut plotted = 0;
        for &sample in &column.samples {
            if let Some(y) = self.config.row_of(sample) {
                self.raster.set(x, y);
                plotted += 1;
            }
        }
        trace!(
            "column {} (param {}): {} of {} samples plotted",
            x,
            column.item.param,
            plotted,
            column.samples.len()
        );
        Ok(plotted)
    }

    /// Columns not yet composited.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Hand over the raster, provided every column arrived.
    pub fn finish(self) -> Result<Raster, BifurcationError> {
        if self.outstanding > 0 {
            return Err(BifurcationError::MissingColumns {
                missing: self.outstanding,
            });
        }
        Ok(self.raster)
    }
}
