//! Evidence absorption, clearing and retraction.

use bayesnet_core::config::InferenceConfig;
use bayesnet_core::errors::InferenceError;
use bayesnet_core::network::DiscreteNetwork;
use bayesnet_inference::MarginCalculator;

const EPS: f64 = 1e-9;

// Node indices of the chest clinic fixture.
const VISIT_ASIA: usize = 0;
const SMOKER: usize = 1;
const TUBERCULOSIS: usize = 2;
const TB_OR_CANCER: usize = 5;
const XRAY: usize = 6;
const DYSPNEA: usize = 7;

fn built(net: &DiscreteNetwork) -> MarginCalculator {
    let mut calc = MarginCalculator::with_config(InferenceConfig::checked());
    calc.compute_margins(net).unwrap();
    calc
}

fn assert_conditioned(calc: &MarginCalculator, net: &DiscreteNetwork, evidence: &[(usize, usize)]) {
    let expected = test_fixtures::brute_force_margins(net, evidence);
    let actual = calc.margins().unwrap();
    let diff = test_fixtures::max_abs_diff(actual, &expected);
    assert!(diff < EPS, "evidence {evidence:?}: max deviation {diff}");
}

/// T1-EV-01: Evidence on child updates parent.
#[test]
fn test_evidence_on_child_updates_parent() {
    let net = test_fixtures::two_node_chain();
    let mut calc = built(&net);
    calc.set_evidence(1, 0).unwrap();

    let a = calc.margin(0).unwrap();
    assert!((a[0] - 0.27 / 0.41).abs() < EPS);
    assert!((a[1] - 0.14 / 0.41).abs() < EPS);
    let b = calc.margin(1).unwrap();
    assert!((b[0] - 1.0).abs() < EPS);
    assert_eq!(b[1], 0.0);
}

/// T1-EV-02: Observed node is one hot.
#[test]
fn test_observed_node_is_one_hot() {
    let net = test_fixtures::asia();
    let mut calc = built(&net);
    calc.set_evidence(XRAY, 0).unwrap();
    let xray = calc.margin(XRAY).unwrap();
    assert!((xray[0] - 1.0).abs() < EPS);
    assert_eq!(xray[1], 0.0);
}

/// T1-EV-03: Sequential evidence matches enumeration.
#[test]
fn test_sequential_evidence_matches_enumeration() {
    let net = test_fixtures::asia();
    let mut calc = built(&net);
    let observations = [(XRAY, 0), (DYSPNEA, 0), (VISIT_ASIA, 0), (SMOKER, 1)];
    for k in 0..observations.len() {
        calc.set_evidence(observations[k].0, observations[k].1).unwrap();
        assert_conditioned(&calc, &net, &observations[..=k]);
    }
    assert_eq!(calc.tree().unwrap().evidence(), &observations);
}

/// T1-EV-04: Evidence order does not matter.
#[test]
fn test_evidence_order_does_not_matter() {
    let net = test_fixtures::sprinkler();
    let mut forward = built(&net);
    forward.set_evidence(3, 0).unwrap();
    forward.set_evidence(0, 1).unwrap();

    let mut backward = built(&net);
    backward.set_evidence(0, 1).unwrap();
    backward.set_evidence(3, 0).unwrap();

    let diff = test_fixtures::max_abs_diff(forward.margins().unwrap(), backward.margins().unwrap());
    assert!(diff < EPS);
    assert_conditioned(&forward, &net, &[(3, 0), (0, 1)]);
}

/// T1-EV-05: Evidence propagates in the full (non-moralized) tree.
#[test]
fn test_evidence_in_full_tree() {
    let net = test_fixtures::asia();
    let mut calc = MarginCalculator::new();
    calc.compute_full_margins(&net).unwrap();
    calc.set_evidence(DYSPNEA, 1).unwrap();
    calc.set_evidence(TUBERCULOSIS, 1).unwrap();
    assert_conditioned(&calc, &net, &[(DYSPNEA, 1), (TUBERCULOSIS, 1)]);
}

/// T1-EV-06: Evidence stays in its component.
#[test]
fn test_evidence_stays_in_its_component() {
    let net = test_fixtures::disconnected();
    let mut calc = built(&net);
    let prior_v = calc.margin(3).unwrap().to_vec();

    calc.set_evidence(2, 2).unwrap();
    assert_conditioned(&calc, &net, &[(2, 2)]);
    assert_eq!(calc.margin(3).unwrap(), prior_v.as_slice());
}

/// T1-EV-07: Contradictory evidence zeroes margins.
#[test]
fn test_contradictory_evidence_zeroes_margins() {
    let net = test_fixtures::asia();
    let mut calc = built(&net);
    calc.set_evidence(TUBERCULOSIS, 0).unwrap();
    // Tuberculosis implies TbOrCancer deterministically.
    calc.set_evidence(TB_OR_CANCER, 1).unwrap();

    for margin in calc.margins().unwrap() {
        assert!(margin.iter().all(|p| p.is_finite()));
        assert_eq!(margin.iter().sum::<f64>(), 0.0);
    }
    assert!(calc.is_built());
}

/// T1-EV-08: Contradiction zeroes every component.
#[test]
fn test_contradiction_zeroes_every_component() {
    // Two components: A -> C, and a lone B that can never take value 0.
    let net = test_fixtures::network(&[
        ("A", 2, &[], &[0.4, 0.6]),
        ("B", 2, &[], &[0.0, 1.0]),
        ("C", 2, &["A"], &[0.7, 0.3, 0.2, 0.8]),
    ]);
    let mut calc = built(&net);
    assert_eq!(calc.tree().unwrap().roots().len(), 2);

    calc.set_evidence(1, 0).unwrap();
    assert_conditioned(&calc, &net, &[(1, 0)]);
    for margin in calc.margins().unwrap() {
        assert!(margin.iter().all(|&p| p == 0.0), "{margin:?}");
    }

    // Further evidence elsewhere cannot revive an impossible joint.
    calc.set_evidence(2, 1).unwrap();
    assert_conditioned(&calc, &net, &[(1, 0), (2, 1)]);

    assert!(calc.retract_evidence(1).unwrap());
    assert_conditioned(&calc, &net, &[(2, 1)]);
}

/// T1-EV-09: Invalid evidence is rejected without side effects.
#[test]
fn test_invalid_evidence_is_rejected_without_side_effects() {
    let net = test_fixtures::disconnected();
    let mut calc = built(&net);
    let before = calc.margins().unwrap().to_vec();

    assert!(matches!(
        calc.set_evidence(9, 0),
        Err(InferenceError::NodeNotFound { node: 9 })
    ));
    assert!(matches!(
        calc.set_evidence(2, 3),
        Err(InferenceError::InvalidValue {
            node: 2,
            value: 3,
            cardinality: 3
        })
    ));
    assert!(calc.is_built());
    assert_eq!(calc.margins().unwrap(), before.as_slice());
    assert!(calc.tree().unwrap().evidence().is_empty());
}

/// T1-EV-10: Clear evidence restores prior.
#[test]
fn test_clear_evidence_restores_prior() {
    let net = test_fixtures::asia();
    let mut calc = built(&net);
    let prior = calc.margins().unwrap().to_vec();

    calc.set_evidence(XRAY, 0).unwrap();
    calc.set_evidence(SMOKER, 0).unwrap();
    calc.clear_evidence().unwrap();

    let diff = test_fixtures::max_abs_diff(calc.margins().unwrap(), &prior);
    assert!(diff < 1e-12);
    assert!(calc.tree().unwrap().evidence().is_empty());
}

/// T1-EV-11: Retract keeps other observations.
#[test]
fn test_retract_keeps_other_observations() {
    let net = test_fixtures::asia();
    let mut calc = built(&net);
    calc.set_evidence(XRAY, 0).unwrap();
    calc.set_evidence(SMOKER, 0).unwrap();
    calc.set_evidence(DYSPNEA, 1).unwrap();

    assert!(calc.retract_evidence(SMOKER).unwrap());
    assert_conditioned(&calc, &net, &[(XRAY, 0), (DYSPNEA, 1)]);
    assert_eq!(calc.tree().unwrap().evidence(), &[(XRAY, 0), (DYSPNEA, 1)]);

    assert!(!calc.retract_evidence(VISIT_ASIA).unwrap());
    assert!(matches!(
        calc.retract_evidence(42),
        Err(InferenceError::NodeNotFound { node: 42 })
    ));
    assert!(calc.is_built());
}

/// T1-EV-12: Retract recovers from contradiction.
#[test]
fn test_retract_recovers_from_contradiction() {
    let net = test_fixtures::asia();
    let mut calc = built(&net);
    calc.set_evidence(TUBERCULOSIS, 0).unwrap();
    calc.set_evidence(TB_OR_CANCER, 1).unwrap();

    assert!(calc.retract_evidence(TB_OR_CANCER).unwrap());
    assert_conditioned(&calc, &net, &[(TUBERCULOSIS, 0)]);
}

/// T1-EV-13: Propagate discards evidence.
#[test]
fn test_propagate_discards_evidence() {
    let net = test_fixtures::three_node_chain();
    let mut calc = built(&net);
    calc.set_evidence(2, 1).unwrap();
    calc.propagate().unwrap();
    assert_conditioned(&calc, &net, &[]);
}
