mod common;

use baseflow_core::filters::{
    Boughton, Chapman, ChapmanMaxwell, Eckhardt, Ewma, Furey, Ihacres, LyneHollick, Willems,
};
use baseflow_core::interval::{five_day, fixed, interval_width, local, slide, ukih};
use baseflow_core::metrics::kge;
use baseflow_core::separation::{separate, Method, SeparationConfig};
use baseflow_core::series::Discharge;
use baseflow_core::strict::strict_baseflow;
use baseflow_core::traits::{FilterOutput, RecursiveFilter};
use common::{assert_clipped, synthetic_discharge};

fn all_filters(q: &[f64], seed: f64) -> Vec<(&'static str, FilterOutput)> {
    let k = 0.93;
    vec![
        ("lh", LyneHollick::default().separate(q)),
        ("chapman", Chapman::new(k).unwrap().run(q, seed)),
        ("cm", ChapmanMaxwell::new(k).unwrap().run(q, seed)),
        ("boughton", Boughton::new(k, 0.15).unwrap().run(q, seed)),
        ("eckhardt", Eckhardt::new(k, 0.8).unwrap().run(q, seed)),
        ("ewma", Ewma::new(0.05).unwrap().run(q, seed)),
        ("furey", Furey::new(k, 0.5).unwrap().run(q, seed)),
        ("willems", Willems::new(k, 0.4).unwrap().run(q, seed)),
        ("ihacres", Ihacres::new(k, 0.2, 0.1).unwrap().run(q, q[0])),
    ]
}

#[test]
fn filters_clip_and_keep_length() {
    for seed in [1, 2, 3] {
        let q = synthetic_discharge(730, seed);
        let b0 = LyneHollick::default().separate(&q).baseflow[0];
        for (name, out) in all_filters(&q, b0) {
            assert_clipped(name, &out.baseflow, &q);
            assert!(out.exceedances <= q.len(), "{name}");
        }
    }
}

#[test]
fn graphical_methods_clip_and_keep_length() {
    let q = synthetic_discharge(730, 11);
    let b_lh = LyneHollick::default().separate(&q).baseflow;
    for width in [3, 5, interval_width(None, None), 11] {
        assert_clipped("fixed", &fixed(&q, width), &q);
        assert_clipped("slide", &slide(&q, width), &q);
        assert_clipped("local", &local(&q, &b_lh, width), &q);
    }
    assert_clipped("ukih", &ukih(&q, &b_lh), &q);
    assert_clipped("five_day", &five_day(&q), &q);
}

#[test]
fn filters_are_bit_identical_across_runs() {
    let q = synthetic_discharge(500, 5);
    let b0 = LyneHollick::default().separate(&q).baseflow[0];
    let first = all_filters(&q, b0);
    let second = all_filters(&q, b0);
    assert_eq!(first, second);
}

#[test]
fn separation_with_supplied_parameters_is_deterministic() {
    let q = Discharge::new(synthetic_discharge(400, 9)).unwrap();
    let cfg = SeparationConfig::default()
        .with_k(0.93)
        .with_boughton_c(0.1)
        .with_ihacres(Some(0.2), 0.0)
        .with_bfi_max(0.8)
        .with_c3c1(0.5)
        .with_ewma_e(0.05)
        .with_willems_w(0.3);
    let a = separate(&q, &cfg).unwrap();
    let b = separate(&q, &cfg).unwrap();
    for m in Method::ALL {
        assert_eq!(a.baseflow(m), b.baseflow(m), "{m}");
    }
}

#[test]
fn kge_of_a_series_with_itself_is_one() {
    let q = synthetic_discharge(300, 4);
    assert!((kge(&q, &q) - 1.0).abs() < 1e-8);
}

#[test]
fn strict_mask_aligns_with_discharge() {
    let q = synthetic_discharge(365, 8);
    let strict = strict_baseflow(&q);
    assert_eq!(strict.len(), q.len());
    assert!(!strict[0] && !strict[q.len() - 1]);
}
