use bayesnet_core::config::InferenceConfig;
use bayesnet_core::network::DiscreteNetwork;
use bayesnet_core::traits::BayesianNetwork;
use bayesnet_inference::tree::builder::verify_running_intersection;
use bayesnet_inference::MarginCalculator;
use proptest::prelude::*;

/// Random DAG over up to 7 nodes: cardinalities, parent lists drawn from
/// earlier nodes, and raw CPT weights.
fn arb_network() -> impl Strategy<Value = DiscreteNetwork> {
    (2usize..=7)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(1usize..=3, n),
                prop::collection::vec(prop::collection::vec(0usize..n, 0..=3), n),
                prop::collection::vec(0.0f64..10.0, 16..64),
            )
        })
        .prop_map(|(cards, parents, weights)| {
            test_fixtures::from_weights(&cards, &parents, &weights)
        })
}

fn arb_network_with_evidence() -> impl Strategy<Value = (DiscreteNetwork, Vec<(usize, usize)>)> {
    arb_network().prop_flat_map(|net| {
        let cards: Vec<usize> = (0..net.node_count()).map(|i| net.cardinality(i)).collect();
        let n = cards.len();
        let evidence = prop::collection::vec((0..n, 0usize..3), 0..=3).prop_map(move |pairs| {
            let mut seen = vec![false; n];
            pairs
                .into_iter()
                .filter_map(|(node, value)| {
                    if seen[node] {
                        return None;
                    }
                    seen[node] = true;
                    Some((node, value % cards[node]))
                })
                .collect::<Vec<_>>()
        });
        (Just(net), evidence)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// T1-PROP-01: Margins match enumeration.
    #[test]
    fn margins_match_enumeration(net in arb_network()) {
        let mut calc = MarginCalculator::with_config(InferenceConfig::checked());
        calc.compute_margins(&net).unwrap();
        let expected = test_fixtures::brute_force_margins(&net, &[]);
        let diff = test_fixtures::max_abs_diff(calc.margins().unwrap(), &expected);
        prop_assert!(diff < 1e-9, "max deviation {}", diff);
    }

    /// T1-PROP-02: Full and moral trees agree.
    #[test]
    fn full_and_moral_trees_agree(net in arb_network()) {
        let mut moral = MarginCalculator::new();
        moral.compute_margins(&net).unwrap();
        let mut full = MarginCalculator::new();
        full.compute_full_margins(&net).unwrap();
        let diff = test_fixtures::max_abs_diff(moral.margins().unwrap(), full.margins().unwrap());
        prop_assert!(diff < 1e-9, "max deviation {}", diff);
    }

    /// T1-PROP-03: Separators are clique intersections.
    #[test]
    fn separators_are_clique_intersections(net in arb_network()) {
        let mut calc = MarginCalculator::new();
        calc.compute_margins(&net).unwrap();
        let tree = calc.tree().unwrap();
        prop_assert!(verify_running_intersection(tree.cliques(), tree.separators()).is_ok());
        prop_assert_eq!(tree.preorder().len(), tree.cliques().len());
        prop_assert_eq!(tree.separators().len() + tree.roots().len(), tree.cliques().len());
    }

    /// T1-PROP-04: Evidence matches conditioned enumeration.
    #[test]
    fn evidence_matches_conditioned_enumeration((net, evidence) in arb_network_with_evidence()) {
        let mut calc = MarginCalculator::new();
        calc.compute_margins(&net).unwrap();
        for &(node, value) in &evidence {
            calc.set_evidence(node, value).unwrap();
        }
        let expected = test_fixtures::brute_force_margins(&net, &evidence);
        let diff = test_fixtures::max_abs_diff(calc.margins().unwrap(), &expected);
        prop_assert!(diff < 1e-9, "evidence {:?}: max deviation {}", evidence, diff);
    }
}
