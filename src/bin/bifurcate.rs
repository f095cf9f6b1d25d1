// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate bifurcation;
extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate num_cpus;

use bifurcation::{BifurcationError, Palette, RegionConfig, SamplingPolicy};
use clap::{App, Arg, ArgMatches};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const WIDTH: &str = "width";
const ASPECT: &str = "aspect";
const PARAMS: &str = "params";
const VALUES: &str = "values";
const BURN_IN: &str = "burn-in";
const SAMPLES: &str = "samples";
const THREADS: &str = "threads";
const IN_WINDOW: &str = "in-window";
const INVERT: &str = "invert";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("bifurcate")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Logistic map bifurcation diagram renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .required(false)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("1600")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse image width",
                        "Image width must be between 1 and 1000000",
                    )
                })
                .help("Width of output image, one column per parameter"),
        )
        .arg(
            Arg::with_name(ASPECT)
                .required(false)
                .long(ASPECT)
                .short("a")
                .takes_value(true)
                .default_value("0.625")
                .validator(|s| {
                    validate_range(
                        &s,
                        0.0,
                        100.0,
                        "Could not parse aspect ratio",
                        "Aspect ratio must be between 0 and 100",
                    )
                })
                .help("Height of output image as a fraction of its width"),
        )
        .arg(
            Arg::with_name(PARAMS)
                .required(false)
                .long(PARAMS)
                .short("p")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2.4,4.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse parameter range"))
                .help("Range of the map parameter along the x axis, as MIN,MAX"),
        )
        .arg(
            Arg::with_name(VALUES)
                .required(false)
                .long(VALUES)
                .short("v")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.0,1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse value window"))
                .help("Window of orbit values along the y axis, as MIN,MAX"),
        )
        .arg(
            Arg::with_name(BURN_IN)
                .required(false)
                .long(BURN_IN)
                .short("b")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        100_000_000,
                        "Could not parse burn-in count",
                        "Burn-in count must be between 0 and 100000000",
                    )
                })
                .help("Iterations discarded before sampling begins"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .required(false)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100_000_000,
                        "Could not parse sample count",
                        "Sample count must be between 1 and 100000000",
                    )
                })
                .help("Iterations kept and plotted per column"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver [default: one per CPU]"),
        )
        .arg(
            Arg::with_name(IN_WINDOW)
                .long(IN_WINDOW)
                .help("Only count samples that fall inside the value window"),
        )
        .arg(
            Arg::with_name(INVERT)
                .long(INVERT)
                .help("Draw black orbits on white"),
        )
        .get_matches()
}

fn pair_of(matches: &ArgMatches, name: &str) -> (f64, f64) {
    // The validators have already accepted these.
    parse_pair(matches.value_of(name).unwrap(), ',').unwrap()
}

fn number_of<T: FromStr>(matches: &ArgMatches, name: &str) -> T {
    match T::from_str(matches.value_of(name).unwrap()) {
        Ok(n) => n,
        Err(_) => unreachable!("{} passed validation", name),
    }
}

fn run(matches: &ArgMatches) -> Result<(), BifurcationError> {
    let (param_min, param_max) = pair_of(matches, PARAMS);
    let (value_min, value_max) = pair_of(matches, VALUES);
    let policy = if matches.is_present(IN_WINDOW) {
        SamplingPolicy::InWindow
    } else {
        SamplingPolicy::RecordAll
    };
    let palette = if matches.is_present(INVERT) {
        Palette::default().inverted()
    } else {
        Palette::default()
    };

    let config = RegionConfig::builder()
        .params(param_min, param_max)
        .values(value_min, value_max)
        .width(number_of(matches, WIDTH))
        .aspect_ratio(number_of(matches, ASPECT))
        .burn_in(number_of(matches, BURN_IN))
        .retained_samples(number_of(matches, SAMPLES))
        .workers(match matches.value_of(THREADS) {
            Some(_) => number_of(matches, THREADS),
            None => num_cpus::get(),
        })
        .policy(policy)
        .build()?;
    info!(
        "rendering {}x{} over r in [{}, {}] on {} threads",
        config.pixel_width(),
        config.pixel_height(),
        config.param_min(),
        config.param_max(),
        config.workers()
    );

    let raster = bifurcation::render(&config)?;

    let outfile = matches.value_of(OUTPUT).unwrap();
    let mut output = BufWriter::new(File::create(outfile)?);
    raster.write_png(&mut output, &palette)?;
    output.flush()?;
    info!("wrote {}", outfile);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
