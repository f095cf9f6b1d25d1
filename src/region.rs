// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the RegionConfig struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window of (parameter, value) space for the logistic map.
//! The parameter runs along the x axis, one pixel column per sampled
//! parameter, and the value runs up the y axis, with the maximum
//! value at row zero.
//!
//! Once built, a RegionConfig cannot be changed.  Every thread in a
//! render run gets a copy or a shared reference to the same one.

use num::ToPrimitive;
use num_cpus;

use errors::ConfigError;
use orbit::SamplingPolicy;

/// Describes the window being sampled and the resolution of the
/// image it will be drawn into.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionConfig {
    param_min: f64,
    param_max: f64,
    value_min: f64,
    value_max: f64,
    pixel_width: usize,
    pixel_height: usize,
    burn_in: usize,
    retained_samples: usize,
    workers: usize,
    policy: SamplingPolicy,
    // Derived once at build time.
    value_range: f64,
    step: f64,
}

impl RegionConfig {
    /// Start describing a region.  Every knob has a default; see
    /// `RegionConfigBuilder`.
    pub fn builder() -> RegionConfigBuilder {
        RegionConfigBuilder::default()
    }

    /// The lower edge of the parameter axis.
    pub fn param_min(&self) -> f64 {
        self.param_min
    }

    /// The upper edge of the parameter axis.
    pub fn param_max(&self) -> f64 {
        self.param_max
    }

    /// The lower edge of the value window.
    pub fn value_min(&self) -> f64 {
        self.value_min
    }

    /// The upper edge of the value window.
    pub fn value_max(&self) -> f64 {
        self.value_max
    }

    /// `value_max - value_min`; never zero.
    pub fn value_range(&self) -> f64 {
        self.value_range
    }

    /// The distance along the parameter axis between two neighbouring
    /// columns.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The number of columns, which is the number of parameters sampled.
    pub fn pixel_width(&self) -> usize {
        self.pixel_width
    }

    /// The number of rows.
    pub fn pixel_height(&self) -> usize {
        self.pixel_height
    }

    /// Iterations discarded before any are kept.
    pub fn burn_in(&self) -> usize {
        self.burn_in
    }

    /// Iterations kept per column.
    pub fn retained_samples(&self) -> usize {
        self.retained_samples
    }

    /// Number of sampling threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// How out-of-window iterates are treated.
    pub fn policy(&self) -> SamplingPolicy {
        self.policy
    }

    /// The total number of pixels in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.pixel_width * self.pixel_height
    }

    /// A built region always has pixels, but clippy likes the pair.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given the index of a column, return the parameter it samples.
    pub fn param_of(&self, column: usize) -> f64 {
        self.param_min + (column as f64) * self.step
    }

    /// Given a value produced by the logistic map, return the pixel row
    /// it lands on, if any.  The image is flipped so that `value_max`
    /// sits at row zero.  Anything that rounds to a row outside the
    /// raster, including NaN and the infinities, maps to nothing.
    pub fn row_of(&self, value: f64) -> Option<usize> {
        let y = (((1.0 - value) - (1.0 - self.value_max)) / self.value_range)
            * (self.pixel_height as f64);
        match y.round().to_usize() {
            Some(row) if row < self.pixel_height => Some(row),
            _ => None,
        }
    }
}

/// Collects the pieces of a RegionConfig and validates them all at
/// once in `build()`.
#[derive(Clone, Debug)]
pub struct RegionConfigBuilder {
    param_min: f64,
    param_max: f64,
    value_min: f64,
    value_max: f64,
    width: usize,
    aspect_ratio: f64,
    burn_in: usize,
    retained_samples: usize,
    workers: usize,
    policy: SamplingPolicy,
}

impl Default for RegionConfigBuilder {
    fn default() -> Self {
        RegionConfigBuilder {
            param_min: 2.4,
            param_max: 4.0,
            value_min: 0.0,
            value_max: 1.0,
            width: 1600,
            aspect_ratio: 0.625,
            burn_in: 1000,
            retained_samples: 1000,
            workers: num_cpus::get(),
            policy: SamplingPolicy::default(),
        }
    }
}

impl RegionConfigBuilder {
    /// The parameter interval, left edge to right edge.
    pub fn params(mut self, min: f64, max: f64) -> Self {
        self.param_min = min;
        self.param_max = max;
        self
    }

    /// The value window, bottom edge to top edge.
    pub fn values(mut self, min: f64, max: f64) -> Self {
        self.value_min = min;
        self.value_max = max;
        self
    }

    /// Requested pixel width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Height as a fraction of the width.
    pub fn aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Iterations to throw away before sampling.
    pub fn burn_in(mut self, burn_in: usize) -> Self {
        self.burn_in = burn_in;
        self
    }

    /// Iterations to keep per column.
    pub fn retained_samples(mut self, retained_samples: usize) -> Self {
        self.retained_samples = retained_samples;
        self
    }

    /// Number of sampling threads.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// How iterates outside the value window are handled.
    pub fn policy(mut self, policy: SamplingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate everything and derive the step and pixel height.
    ///
    /// The pixel height is `width * aspect_ratio`, truncated.  A
    /// parameter interval of zero length is allowed and collapses the
    /// image to a single column; the height is still taken from the
    /// requested width.
    pub fn build(self) -> Result<RegionConfig, ConfigError> {
        for &(name, value) in &[
            ("parameter minimum", self.param_min),
            ("parameter maximum", self.param_max),
            ("value minimum", self.value_min),
            ("value maximum", self.value_max),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteBound { name, value });
            }
        }

        if self.param_min > self.param_max {
            return Err(ConfigError::InvertedParameters {
                min: self.param_min,
                max: self.param_max,
            });
        }

        let value_range = self.value_max - self.value_min;
        if value_range == 0.0 || !value_range.is_finite() {
            return Err(ConfigError::ZeroValueRange {
                min: self.value_min,
                max: self.value_max,
            });
        }

        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }

        let pixel_height = match ((self.width as f64) * self.aspect_ratio).to_usize() {
            Some(height) if height > 0 => height,
            _ => {
                return Err(ConfigError::ZeroHeight {
                    width: self.width,
                    aspect_ratio: self.aspect_ratio,
                })
            }
        };

        if self.retained_samples == 0 {
            return Err(ConfigError::NoRetainedSamples);
        }

        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }

        let pixel_width = if self.param_min == self.param_max {
            warn!(
                "Parameter interval [{}, {}] is empty; rendering a single column",
                self.param_min, self.param_max
            );
            1
        } else {
            self.width
        };

        Ok(RegionConfig {
            param_min: self.param_min,
            param_max: self.param_max,
            value_min: self.value_min,
            value_max: self.value_max,
            pixel_width,
            pixel_height,
            burn_in: self.burn_in,
            retained_samples: self.retained_samples,
            workers: self.workers,
            policy: self.policy,
            value_range,
            step: (self.param_max - self.param_min) / (pixel_width as f64),
        })
    }
}
