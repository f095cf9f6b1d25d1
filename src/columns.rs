// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits the parameter axis into columns of work.

use region::RegionConfig;

/// One column of the image: which column it is, and the parameter
/// of the logistic map it stands for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorkItem {
    /// Position along the x axis, `0..pixel_width`.
    pub index: usize,
    /// `param_min + index * step`.
    pub param: f64,
}

/// Hands out one WorkItem per column, left to right, and then stops.
/// It cannot be rewound; make a new one for each run.
#[derive(Clone, Debug)]
pub struct ColumnGenerator {
    next: usize,
    width: usize,
    param_min: f64,
    step: f64,
}

impl ColumnGenerator {
    /// A generator covering every column of the region.
    pub fn new(config: &RegionConfig) -> Self {
        ColumnGenerator::with_step(config.pixel_width(), config.param_min(), config.step())
    }

    /// A generator over `width` columns starting at `param_min`.  A
    /// width of zero produces nothing.
    pub fn with_step(width: usize, param_min: f64, step: f64) -> Self {
        ColumnGenerator {
            next: 0,
            width,
            param_min,
            step,
        }
    }
}

impl Iterator for ColumnGenerator {
    type Item = WorkItem;

    fn next(&mut self) -> Option<WorkItem> {
        if self.next >= self.width {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(WorkItem {
            index,
            param: self.param_min + (index as f64) * self.step,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.width - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ColumnGenerator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_every_column_in_order() {
        let config = RegionConfig::builder()
            .params(3.5, 3.5004)
            .width(4)
            .aspect_ratio(1.0)
            .build()
            .unwrap();
        let items: Vec<WorkItem> = ColumnGenerator::new(&config).collect();
        assert_eq!(items.len(), 4);
        for (expected, item) in items.iter().enumerate() {
            assert_eq!(item.index, expected);
            assert_eq!(item.param, config.param_of(expected));
        }
    }

    #[test]
    fn zero_width_is_empty() {
        let mut columns = ColumnGenerator::with_step(0, 3.0, 0.1);
        assert_eq!(columns.len(), 0);
        assert_eq!(columns.next(), None);
    }

    #[test]
    fn is_not_restartable() {
        let mut columns = ColumnGenerator::with_step(2, 1.0, 1.0);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.next().map(|c| c.param), Some(1.0));
        assert_eq!(columns.next().map(|c| c.param), Some(2.0));
        assert_eq!(columns.next(), None);
        assert_eq!(columns.next(), None);
        assert_eq!(columns.len(), 0);
    }
}
