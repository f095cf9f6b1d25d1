// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;
extern crate bifurcation;
extern crate num_cpus;

use bifurcation::{render, OrbitSampler, RegionConfig, WorkItem};
use criterion::Criterion;

fn region(workers: usize) -> RegionConfig {
    RegionConfig::builder()
        .params(2.4, 4.0)
        .width(400)
        .aspect_ratio(0.5)
        .burn_in(1000)
        .retained_samples(1000)
        .workers(workers)
        .build()
        .unwrap()
}

fn single_orbit(c: &mut Criterion) {
    let sampler = OrbitSampler::new(&region(1));
    c.bench_function("orbit r=3.9", move |b| {
        b.iter(|| sampler.sample(WorkItem { index: 0, param: 3.9 }))
    });
}

fn render_one_thread(c: &mut Criterion) {
    let config = region(1);
    c.bench_function("render 400 columns, 1 thread", move |b| {
        b.iter(|| render(&config).unwrap())
    });
}

fn render_all_threads(c: &mut Criterion) {
    let config = region(num_cpus::get());
    c.bench_function("render 400 columns, all threads", move |b| {
        b.iter(|| render(&config).unwrap())
    });
}

criterion_group!(benches, single_orbit, render_one_thread, render_all_threads);
criterion_main!(benches);
