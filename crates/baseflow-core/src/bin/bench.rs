/// Pure Rust core benchmarks for the baseflow separation methods.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG to drive a
/// synthetic linear-reservoir hydrograph, and std::hint::black_box to prevent
/// dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use baseflow_core::calibrate::calibrate;
use baseflow_core::constants::BOUGHTON_C_GRID;
use baseflow_core::filters::{Boughton, ChapmanMaxwell, Eckhardt, LyneHollick};
use baseflow_core::interval::{five_day, fixed, local, slide, ukih};
use baseflow_core::separation::{separate, Method, SeparationConfig};
use baseflow_core::series::Discharge;
use baseflow_core::strict::strict_baseflow;
use baseflow_core::traits::RecursiveFilter;

const REPEATS: usize = 7;

type Row = (&'static str, usize, Duration);

/// Simple LCG PRNG feeding random storms into a linear reservoir.
fn make_discharge(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let mut storage = 50.0;
    (0..n)
        .map(|_| {
            if next_f64() < 0.15 {
                storage += next_f64() * 40.0;
            }
            let outflow = 0.08 * storage;
            storage -= outflow;
            0.5 + outflow
        })
        .collect()
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn time<F: FnMut()>(name: &'static str, n: usize, mut f: F) -> Row {
    // Warmup
    f();
    (name, n, median_time(f))
}

fn bench_filters(sizes: &[usize]) -> Vec<Row> {
    let mut results = Vec::new();
    for &n in sizes {
        let q = make_discharge(n, 42);
        let lh = LyneHollick::default();
        let seed = lh.separate(&q).baseflow[0];
        let cm = ChapmanMaxwell::new_unchecked(0.95);
        let boughton = Boughton::new_unchecked(0.95, 0.1);
        let eckhardt = Eckhardt::new_unchecked(0.95, 0.8);

        results.push(time("lh", n, || {
            black_box(lh.separate(black_box(&q)));
        }));
        results.push(time("cm", n, || {
            black_box(cm.run(black_box(&q), seed));
        }));
        results.push(time("boughton", n, || {
            black_box(boughton.run(black_box(&q), seed));
        }));
        results.push(time("eckhardt", n, || {
            black_box(eckhardt.run(black_box(&q), seed));
        }));
    }
    results
}

fn bench_graphical(sizes: &[usize]) -> Vec<Row> {
    let mut results = Vec::new();
    for &n in sizes {
        let q = make_discharge(n, 42);
        let b_lh = LyneHollick::default().separate(&q).baseflow;

        results.push(time("fixed", n, || {
            black_box(fixed(black_box(&q), 9));
        }));
        results.push(time("slide", n, || {
            black_box(slide(black_box(&q), 9));
        }));
        results.push(time("local", n, || {
            black_box(local(black_box(&q), &b_lh, 9));
        }));
        results.push(time("ukih", n, || {
            black_box(ukih(black_box(&q), &b_lh));
        }));
        results.push(time("five_day", n, || {
            black_box(five_day(black_box(&q)));
        }));
        results.push(time("strict", n, || {
            black_box(strict_baseflow(black_box(&q)));
        }));
    }
    results
}

fn bench_calibration(sizes: &[usize]) -> Vec<Row> {
    let mut results = Vec::new();
    for &n in sizes {
        let q = make_discharge(n, 42);
        let seed = LyneHollick::default().separate(&q).baseflow[0];

        results.push(time("calibrate_boughton", n, || {
            black_box(calibrate(BOUGHTON_C_GRID, &q, |c| {
                Boughton::new_unchecked(0.95, c).run(&q, seed)
            }))
            .ok();
        }));
    }
    results
}

fn bench_separation(sizes: &[usize]) -> Vec<Row> {
    let mut results = Vec::new();
    for &n in sizes {
        let Ok(q) = Discharge::new(make_discharge(n, 42)) else {
            continue;
        };
        let config = SeparationConfig::default().with_methods(
            Method::ALL
                .into_iter()
                .filter(|m| !matches!(m, Method::Furey | Method::Ihacres)),
        );

        results.push(time("separate", n, || {
            black_box(separate(black_box(&q), &config)).ok();
        }));
    }
    results
}

fn main() {
    println!("Pure Rust Core Benchmarks");
    println!("============================================================");
    println!("{:<18} {:>6}   {:>12}", "Method", "N", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results: Vec<Row> = Vec::new();

    all_results.extend(bench_filters(&[3650, 36500]));
    all_results.extend(bench_graphical(&[3650, 36500]));
    all_results.extend(bench_calibration(&[3650]));
    all_results.extend(bench_separation(&[3650]));

    for (method, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>6}      {:>8.2}", method, n, ms);
    }

    println!("============================================================");
}
