/// Deterministic synthetic hydrograph: LCG-driven storms draining a linear
/// reservoir, plus a constant groundwater contribution.
pub fn synthetic_discharge(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let mut storage = 40.0;
    (0..n)
        .map(|_| {
            if next_f64() < 0.12 {
                storage += next_f64() * 60.0;
            }
            let outflow = 0.1 * storage;
            storage -= outflow;
            1.0 + outflow
        })
        .collect()
}

pub fn assert_clipped(name: &str, baseflow: &[f64], discharge: &[f64]) {
    assert_eq!(baseflow.len(), discharge.len(), "{name}: length");
    for (t, (b, q)) in baseflow.iter().zip(discharge).enumerate() {
        assert!(b <= q, "{name}: baseflow {b} > discharge {q} at day {t}");
    }
}
