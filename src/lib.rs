#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Bifurcation diagram renderer
//!
//! The logistic map takes a number between zero and one and a
//! parameter `r`, and produces the next number as `r * x * (1 - x)`.
//! For small `r` the sequence settles on a single value.  Past three
//! it starts bouncing between two values, then four, then eight, and
//! somewhere around 3.57 it gives up on periods altogether and turns
//! chaotic, with little windows of order opening up inside the chaos.
//!
//! A bifurcation diagram draws all of that at once.  Each column of
//! the image is one value of `r`; we run the map long enough for it
//! to forget where it started, then plot the values it keeps visiting
//! up that column.
//!
//! Every column is independent of every other, so the columns are
//! handed out to a pool of worker threads and the results are drawn
//! as they come back, in whatever order that happens to be.  See the
//! `pool` module for how the work is distributed.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod columns;
pub mod errors;
pub mod orbit;
pub mod pool;
pub mod raster;
pub mod region;

pub use columns::{ColumnGenerator, WorkItem};
pub use errors::{BifurcationError, ConfigError};
pub use orbit::{CompletedColumn, OrbitSampler, SamplingPolicy};
pub use pool::sample_columns;
pub use raster::{Palette, Raster, RasterCompositor, Tone};
pub use region::{RegionConfig, RegionConfigBuilder};

/// Sample and draw a whole region.  Nothing is kept between calls, so
/// rendering a sequence of regions is just calling this repeatedly.
pub fn render(config: &RegionConfig) -> Result<Raster, BifurcationError> {
    let mut compositor = RasterCompositor::new(config);
    let mut plotted = 0;
    let columns = sample_columns(config, |column| {
        plotted += compositor.composite(&column)?;
        Ok(())
    })?;
    let raster = compositor.finish()?;
    info!(
        "rendered {} columns over [{}, {}]: {} samples plotted, {} of {} pixels lit",
        columns,
        config.param_min(),
        config.param_max(),
        plotted,
        raster.foreground_count(),
        config.len()
    );
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_the_classic_view() {
        let config = RegionConfig::builder()
            .params(2.4, 4.0)
            .width(64)
            .aspect_ratio(0.5)
            .burn_in(500)
            .retained_samples(100)
            .workers(4)
            .build()
            .unwrap();
        let raster = render(&config).unwrap();
        assert_eq!((raster.width(), raster.height()), (64, 32));
        // Below r = 3 every column collapses to a single point.
        let left = (0..raster.height())
            .filter(|&y| raster.get(0, y) == Some(Tone::Foreground))
            .count();
        assert_eq!(left, 1);
        let right = (0..raster.height())
            .filter(|&y| raster.get(63, y) == Some(Tone::Foreground))
            .count();
        assert!(right > 10);
    }
}
