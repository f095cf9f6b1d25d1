// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fan-out and fan-in.
//!
//! A single generator thread walks the ColumnGenerator and pushes
//! each WorkItem into one bounded channel.  Every worker holds a clone
//! of the receiving end, so each item goes to exactly one of them;
//! the channel is the only thing the workers share.  Each worker
//! writes finished columns to a channel of its own, and one forwarding
//! thread per worker copies those into a single merged channel.  The
//! merged channel closes when the last forwarder lets go of it, which
//! is exactly when the last worker has finished.
//!
//! ```text
//!                      ┌─► worker 0 ─► forwarder 0 ─┐
//! generator ─► work ───┼─► worker 1 ─► forwarder 1 ─┼─► merged ─► sink
//!                      └─► worker N ─► forwarder N ─┘
//! ```
//!
//! All channels are zero-capacity, so every handoff is a rendezvous
//! and the generator never runs ahead of the workers.
//!
//! Completed columns reach the sink in no particular order.

use crossbeam;
use crossbeam::channel::{self, Receiver};
use crossbeam::thread::Scope;

use columns::{ColumnGenerator, WorkItem};
use errors::BifurcationError;
use orbit::{CompletedColumn, OrbitSampler};
use region::RegionConfig;

fn generate<'env>(scope: &Scope<'env>, columns: ColumnGenerator) -> Receiver<WorkItem> {
    let (tx, rx) = channel::bounded(0);
    scope.spawn(move |_| {
        let total = columns.len();
        for item in columns {
            if tx.send(item).is_err() {
                debug!("generator stopped early: no workers left");
                return;
            }
        }
        debug!("generator issued {} columns", total);
    });
    rx
}

fn spawn_worker<'env>(
    scope: &Scope<'env>,
    id: usize,
    sampler: OrbitSampler,
    work: Receiver<WorkItem>,
) -> Receiver<CompletedColumn> {
    let (tx, rx) = channel::bounded(0);
    scope.spawn(move |_| {
        let delivered = sampler.run(&work, &tx);
        debug!("worker {} finished after {} columns", id, delivered);
    });
    rx
}

fn fan_in<'env>(
    scope: &Scope<'env>,
    outputs: Vec<Receiver<CompletedColumn>>,
) -> Receiver<CompletedColumn> {
    let (tx, rx) = channel::bounded(0);
    for output in outputs {
        let tx = tx.clone();
        scope.spawn(move |_| {
            for column in output.iter() {
                if tx.send(column).is_err() {
                    break;
                }
            }
        });
    }
    rx
}

/// Sample every column of the region on `config.workers()` threads,
/// handing each completed column to `sink` on the calling thread as
/// soon as it arrives.  If the sink returns an error the run winds
/// down and that error is returned.  Otherwise returns the number of
/// columns delivered.
pub fn sample_columns<F>(config: &RegionConfig, mut sink: F) -> Result<usize, BifurcationError>
where
    F: FnMut(CompletedColumn) -> Result<(), BifurcationError>,
{
    let workers = config.workers();
    let sampler = OrbitSampler::new(config);
    debug!(
        "sampling {} columns on {} workers",
        config.pixel_width(),
        workers
    );

    let outcome = crossbeam::scope(|scope| -> Result<usize, BifurcationError> {
        let work = generate(scope, ColumnGenerator::new(config));
        let outputs: Vec<_> = (0..workers)
            .map(|id| spawn_worker(scope, id, sampler, work.clone()))
            .collect();
        drop(work);

        let merged = fan_in(scope, outputs);
        let mut received = 0;
        for column in merged.iter() {
            sink(column)?;
            received += 1;
        }
        Ok(received)
    });

    match outcome {
        Ok(result) => result,
        Err(_) => Err(BifurcationError::WorkerPanicked),
    }
}
