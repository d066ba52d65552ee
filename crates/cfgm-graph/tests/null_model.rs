use cfgm_graph::{mean, CrossingCounts};

#[test]
fn pi_compares_barrier_and_community_ratios() {
    let counts = CrossingCounts {
        bc_obs: 10.0,
        bc_cfg: 20.0,
        cc_obs: 30.0,
        cc_cfg: 30.0,
    };
    assert_eq!(counts.pi(), Some(0.5));
    assert_eq!(counts.pi_alt(), Some(0.5));
    assert_eq!(counts.observed_ratio(), Some(10.0 / 30.0));
    let ratios = counts.ratios();
    assert_eq!(ratios.bc_ratio, Some(0.5));
    assert_eq!(ratios.cc_ratio, Some(1.0));
}

#[test]
fn zero_denominators_yield_none() {
    let counts = CrossingCounts {
        bc_obs: 4.0,
        bc_cfg: 0.0,
        cc_obs: 2.0,
        cc_cfg: 1.0,
    };
    assert_eq!(counts.pi(), None);
    assert_eq!(counts.pi_alt(), None);
    assert_eq!(counts.observed_ratio(), Some(2.0));
}

#[test]
fn mean_of_crossing_counts() {
    assert_eq!(mean(&[]), None);
    assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
}
