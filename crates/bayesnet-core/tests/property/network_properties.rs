use bayesnet_core::errors::NetworkError;
use bayesnet_core::network::DiscreteNetwork;
use bayesnet_core::traits::BayesianNetwork;
use proptest::prelude::*;

fn chain(n: usize) -> DiscreteNetwork {
    let mut net = DiscreteNetwork::new();
    for i in 0..n {
        let id = net.add_node(&format!("N{i}"), 2).unwrap();
        if i > 0 {
            net.add_parent(id, id - 1).unwrap();
        }
    }
    net
}

proptest! {
    /// T0-PROP-01: Random edges never break acyclicity.
    #[test]
    fn random_edges_never_break_acyclicity(
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..40)
    ) {
        let mut net = DiscreteNetwork::new();
        for i in 0..8 {
            net.add_node(&format!("N{i}"), 2).unwrap();
        }
        for (child, parent) in edges {
            // Rejections are expected; the graph must stay a DAG either way.
            let _ = net.add_parent(child, parent);
            prop_assert!(net.is_acyclic());
        }
    }

    /// T0-PROP-02: Back edge on chain is rejected.
    #[test]
    fn back_edge_on_chain_is_rejected(n in 2usize..10, from in 0usize..10, to in 0usize..10) {
        let mut net = chain(n);
        let (child, parent) = (from % n, to % n);
        prop_assume!(child <= parent);
        let err = net.add_parent(child, parent).unwrap_err();
        let is_rejection = matches!(
            err,
            NetworkError::CycleDetected { .. } | NetworkError::DuplicateParent { .. }
        );
        prop_assert!(is_rejection);
    }

    /// T0-PROP-03: Normalized rows are accepted.
    #[test]
    fn normalized_rows_are_accepted(weights in prop::collection::vec(0.01f64..5.0, 2..6)) {
        let mut net = chain(2);
        let card = weights.len();
        let b = net.add_node("B", card).unwrap();
        net.add_parent(b, 0).unwrap();
        let sum: f64 = weights.iter().sum();
        let row: Vec<f64> = weights.iter().map(|w| w / sum).collect();
        let cpt: Vec<f64> = row.iter().chain(row.iter()).copied().collect();
        net.set_cpt(b, cpt).unwrap();
        prop_assert!((net.probability(b, 1, 0) - row[0]).abs() < 1e-12);

        let scaled: Vec<f64> = row.iter().chain(row.iter()).map(|p| p * 1.5).collect();
        let is_row_error = matches!(net.set_cpt(b, scaled), Err(NetworkError::CptRow { .. }));
        prop_assert!(is_row_error);
    }
}
