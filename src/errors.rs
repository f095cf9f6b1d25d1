// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while building a region or rendering
//! it.  Odd numbers coming out of the logistic map are not on this
//! list: a diverging orbit is still an orbit, and the compositor
//! simply has nowhere to put it.

use std::io;

/// Reasons a `RegionConfig` refuses to be built.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// One of the four window bounds was NaN or infinite.
    #[fail(display = "The {} bound must be a finite number, got {}", name, value)]
    NonFiniteBound {
        /// Which bound was bad.
        name: &'static str,
        /// What it was.
        value: f64,
    },

    /// The parameter axis runs backwards.
    #[fail(
        display = "The parameter minimum {} is greater than the parameter maximum {}",
        min, max
    )]
    InvertedParameters {
        /// The requested lower bound.
        min: f64,
        /// The requested upper bound.
        max: f64,
    },

    /// The value axis has no height, so there is nothing to scale by.
    #[fail(display = "The value window [{}, {}] has zero height", min, max)]
    ZeroValueRange {
        /// The requested lower bound.
        min: f64,
        /// The requested upper bound.
        max: f64,
    },

    /// Asked for an image with no columns.
    #[fail(display = "The pixel width must be greater than zero")]
    ZeroWidth,

    /// The aspect ratio left the image with no rows.
    #[fail(
        display = "An aspect ratio of {} at width {} leaves the image with no rows",
        aspect_ratio, width
    )]
    ZeroHeight {
        /// The requested width.
        width: usize,
        /// The requested aspect ratio.
        aspect_ratio: f64,
    },

    /// Asked to keep no samples from each orbit.
    #[fail(display = "The retained sample count must be greater than zero")]
    NoRetainedSamples,

    /// Asked to run with nobody doing the work.
    #[fail(display = "The worker count must be greater than zero")]
    NoWorkers,
}

/// Failures from a render run.
#[derive(Debug, Fail)]
pub enum BifurcationError {
    /// The configuration was rejected before any sampling began.
    #[fail(display = "Invalid configuration: {}", _0)]
    Config(#[cause] ConfigError),

    /// A sampling thread panicked; the raster cannot be trusted.
    #[fail(display = "A sampling worker panicked before the run completed")]
    WorkerPanicked,

    /// The same column arrived at the compositor twice.
    #[fail(display = "Column {} was delivered more than once", index)]
    DuplicateColumn {
        /// The repeated column.
        index: usize,
    },

    /// A column arrived that the raster has no room for.
    #[fail(display = "Column {} lies outside a raster {} pixels wide", index, width)]
    ColumnOutOfRange {
        /// The offending column.
        index: usize,
        /// The raster width.
        width: usize,
    },

    /// The stream closed before every column was composited.
    #[fail(display = "The run ended with {} columns never composited", missing)]
    MissingColumns {
        /// How many columns never showed up.
        missing: usize,
    },

    /// Writing the encoded image failed.
    #[fail(display = "Could not write image: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<ConfigError> for BifurcationError {
    fn from(err: ConfigError) -> Self {
        BifurcationError::Config(err)
    }
}

impl From<io::Error> for BifurcationError {
    fn from(err: io::Error) -> Self {
        BifurcationError::Io(err)
    }
}
