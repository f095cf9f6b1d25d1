// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The OrbitSampler runs the logistic map for a single column.
//!
//! Every column starts from the same seed.  The first `burn_in`
//! iterations are thrown away so that the orbit has time to settle
//! onto its attractor (if it has one), and then some number of the
//! iterations that follow are kept.  Nothing here is random: the same
//! parameter always produces the same samples, no matter which thread
//! happens to compute them.

use crossbeam::channel::{Receiver, Sender};

use columns::WorkItem;
use region::RegionConfig;

/// Every orbit starts here.
pub const SEED: f64 = 0.7;

/// Under `SamplingPolicy::InWindow`, give up on a column after this
/// many times `retained_samples` iterations.
pub const IN_WINDOW_ITERATION_FACTOR: usize = 10;

/// What to do with iterates that fall outside the value window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SamplingPolicy {
    /// Keep exactly `retained_samples` iterates, wherever they land.
    /// The compositor drops the ones that miss the raster.
    RecordAll,
    /// Keep only iterates strictly inside the value window, iterating
    /// until `retained_samples` are found or the iteration cap is hit.
    /// Columns near the edge of a narrow window come out denser this
    /// way, but may be short.
    InWindow,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        SamplingPolicy::RecordAll
    }
}

/// A column and the samples its orbit produced, in iteration order.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedColumn {
    /// The work this column was built from.
    pub item: WorkItem,
    /// The retained iterates.
    pub samples: Vec<f64>,
}

impl CompletedColumn {
    /// Shorthand for `self.item.index`.
    pub fn index(&self) -> usize {
        self.item.index
    }
}

/// One step of the logistic map.
#[inline]
pub fn logistic(param: f64, x: f64) -> f64 {
    (param * x) * (1.0 - x)
}

/// The per-worker half of the pipeline.  Carries its own copy of the
/// handful of settings it needs, so a worker never has to reach back
/// into the shared config.
#[derive(Copy, Clone, Debug)]
pub struct OrbitSampler {
    burn_in: usize,
    retained_samples: usize,
    policy: SamplingPolicy,
    value_min: f64,
    value_max: f64,
}

impl OrbitSampler {
    /// Take the sampling settings from a region.
    pub fn new(config: &RegionConfig) -> Self {
        OrbitSampler {
            burn_in: config.burn_in(),
            retained_samples: config.retained_samples(),
            policy: config.policy(),
            value_min: config.value_min().min(config.value_max()),
            value_max: config.value_min().max(config.value_max()),
        }
    }

    /// Run the orbit for one column.
    pub fn sample(&self, item: WorkItem) -> CompletedColumn {
        let param = item.param;
        let mut x = SEED;
        for _ in 0..self.burn_in {
            x = logistic(param, x);
        }

        let mut samples = Vec::with_capacity(self.retained_samples);
        match self.policy {
            SamplingPolicy::RecordAll => {
                for _ in 0..self.retained_samples {
                    x = logistic(param, x);
                    samples.push(x);
                }
            }
            SamplingPolicy::InWindow => {
                let cap = self.retained_samples * IN_WINDOW_ITERATION_FACTOR;
                for _ in 0..cap {
                    if samples.len() == self.retained_samples {
                        break;
                    }
                    x = logistic(param, x);
                    if x > self.value_min && x < self.value_max {
                        samples.push(x);
                    }
                }
            }
        }

        CompletedColumn { item, samples }
    }

    /// Pull columns off the shared queue until it runs dry, pushing
    /// each finished one down `output`.  Stops early if nobody is
    /// listening any more.  Returns the number of columns delivered.
    pub fn run(&self, work: &Receiver<WorkItem>, output: &Sender<CompletedColumn>) -> usize {
        let mut delivered = 0;
        for item in work.iter() {
            if output.send(self.sample(item)).is_err() {
                break;
            }
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;

    fn sampler(burn_in: usize, retained_samples: usize, policy: SamplingPolicy) -> OrbitSampler {
        let config = RegionConfig::builder()
            .burn_in(burn_in)
            .retained_samples(retained_samples)
            .policy(policy)
            .build()
            .unwrap();
        OrbitSampler::new(&config)
    }

    fn item(param: f64) -> WorkItem {
        WorkItem { index: 0, param }
    }

    fn variance(samples: &[f64]) -> f64 {
        let mean = samples.iter().sum::<f64>() / (samples.len() as f64);
        samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / (samples.len() as f64)
    }

    #[test]
    fn logistic_step() {
        assert_eq!(logistic(2.0, 0.5), 0.5);
        assert_eq!(logistic(4.0, 0.5), 1.0);
        assert_eq!(logistic(3.0, 0.0), 0.0);
    }

    #[test]
    fn burn_in_is_skipped() {
        let column = sampler(2, 3, SamplingPolicy::RecordAll).sample(item(3.2));
        let mut x = SEED;
        let mut expected = vec![];
        for i in 0..5 {
            x = logistic(3.2, x);
            if i >= 2 {
                expected.push(x);
            }
        }
        assert_eq!(column.samples, expected);
    }

    #[test]
    fn fixed_point_settles() {
        let column = sampler(1000, 200, SamplingPolicy::RecordAll).sample(item(2.5));
        assert_eq!(column.samples.len(), 200);
        assert!(variance(&column.samples) < 1e-12);
        assert!((column.samples[199] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn chaos_stays_spread_out() {
        let column = sampler(1000, 200, SamplingPolicy::RecordAll).sample(item(3.9));
        assert_eq!(column.samples.len(), 200);
        assert!(variance(&column.samples) > 1e-3);
    }

    #[test]
    fn deterministic() {
        let s = sampler(500, 100, SamplingPolicy::RecordAll);
        assert_eq!(s.sample(item(3.7)), s.sample(item(3.7)));
    }

    #[test]
    fn record_all_keeps_divergent_values() {
        let column = sampler(0, 5, SamplingPolicy::RecordAll).sample(item(5.0));
        assert_eq!(column.samples.len(), 5);
        assert!(column.samples.iter().any(|s| *s < 0.0 || !s.is_finite()));
    }

    #[test]
    fn in_window_only_keeps_values_inside() {
        let config = RegionConfig::builder()
            .values(0.5, 1.0)
            .burn_in(100)
            .retained_samples(50)
            .policy(SamplingPolicy::InWindow)
            .build()
            .unwrap();
        let column = OrbitSampler::new(&config).sample(item(3.9));
        assert_eq!(column.samples.len(), 50);
        assert!(column.samples.iter().all(|s| *s > 0.5 && *s < 1.0));
    }

    #[test]
    fn in_window_gives_up_at_the_cap() {
        // The orbit at 2.5 sits on 0.6, which never enters this window.
        let config = RegionConfig::builder()
            .values(0.0, 0.5)
            .burn_in(100)
            .retained_samples(20)
            .policy(SamplingPolicy::InWindow)
            .build()
            .unwrap();
        let column = OrbitSampler::new(&config).sample(item(2.5));
        assert!(column.samples.is_empty());
    }

    #[test]
    fn run_drains_the_queue() {
        let (work_tx, work_rx) = channel::unbounded();
        let (out_tx, out_rx) = channel::unbounded();
        for index in 0..5 {
            work_tx
                .send(WorkItem {
                    index,
                    param: 3.0,
                })
                .unwrap();
        }
        drop(work_tx);
        let delivered = sampler(10, 4, SamplingPolicy::RecordAll).run(&work_rx, &out_tx);
        drop(out_tx);
        assert_eq!(delivered, 5);
        let indices: Vec<usize> = out_rx.iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn run_stops_when_nobody_listens() {
        let (work_tx, work_rx) = channel::unbounded();
        let (out_tx, out_rx) = channel::unbounded::<CompletedColumn>();
        work_tx.send(item(3.0)).unwrap();
        drop(work_tx);
        drop(out_rx);
        assert_eq!(sampler(10, 4, SamplingPolicy::RecordAll).run(&work_rx, &out_tx), 0);
    }
}
