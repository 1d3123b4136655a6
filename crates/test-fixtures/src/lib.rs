//! Shared networks and oracles for bayesnet tests and benchmarks.
//!
//! Every fixture is built through the public `DiscreteNetwork` API, and
//! `brute_force_margins` enumerates the full joint distribution so that
//! junction tree results can be checked against ground truth.

use bayesnet_core::network::DiscreteNetwork;
use bayesnet_core::traits::BayesianNetwork;

/// Build a network from `(name, cardinality, parents, cpt)` rows.
///
/// # Panics
/// Panics if any row is rejected by `DiscreteNetwork`.
pub fn network(rows: &[(&str, usize, &[&str], &[f64])]) -> DiscreteNetwork {
    let mut net = DiscreteNetwork::new();
    for (name, card, _, _) in rows {
        net.add_node(name, *card).expect("add node");
    }
    for (name, _, parents, cpt) in rows {
        let child = net.node_index(name).expect("child exists");
        for parent in parents.iter() {
            let p = net.node_index(parent).expect("parent exists");
            net.add_parent(child, p).expect("add parent");
        }
        net.set_cpt(child, cpt.to_vec()).expect("valid cpt");
    }
    net
}

/// A → B, both binary. P(A) = [0.3, 0.7].
pub fn two_node_chain() -> DiscreteNetwork {
    network(&[
        ("A", 2, &[], &[0.3, 0.7]),
        ("B", 2, &["A"], &[0.9, 0.1, 0.2, 0.8]),
    ])
}

/// A → B → C, all binary.
pub fn three_node_chain() -> DiscreteNetwork {
    network(&[
        ("A", 2, &[], &[0.6, 0.4]),
        ("B", 2, &["A"], &[0.7, 0.3, 0.1, 0.9]),
        ("C", 2, &["B"], &[0.25, 0.75, 0.8, 0.2]),
    ])
}

/// Cloudy → {Sprinkler, Rain} → WetGrass. Contains an undirected 4-cycle
/// once moralized, so triangulation matters.
pub fn sprinkler() -> DiscreteNetwork {
    network(&[
        ("Cloudy", 2, &[], &[0.5, 0.5]),
        ("Sprinkler", 2, &["Cloudy"], &[0.5, 0.5, 0.9, 0.1]),
        ("Rain", 2, &["Cloudy"], &[0.8, 0.2, 0.2, 0.8]),
        (
            "WetGrass",
            2,
            &["Sprinkler", "Rain"],
            &[1.0, 0.0, 0.1, 0.9, 0.1, 0.9, 0.01, 0.99],
        ),
    ])
}

/// The eight-node chest clinic network (Lauritzen & Spiegelhalter).
/// State 0 is "yes", state 1 is "no".
pub fn asia() -> DiscreteNetwork {
    network(&[
        ("VisitAsia", 2, &[], &[0.01, 0.99]),
        ("Smoker", 2, &[], &[0.5, 0.5]),
        ("Tuberculosis", 2, &["VisitAsia"], &[0.05, 0.95, 0.01, 0.99]),
        ("LungCancer", 2, &["Smoker"], &[0.1, 0.9, 0.01, 0.99]),
        ("Bronchitis", 2, &["Smoker"], &[0.6, 0.4, 0.3, 0.7]),
        (
            "TbOrCancer",
            2,
            &["Tuberculosis", "LungCancer"],
            &[1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        ),
        ("XRay", 2, &["TbOrCancer"], &[0.98, 0.02, 0.05, 0.95]),
        (
            "Dyspnea",
            2,
            &["TbOrCancer", "Bronchitis"],
            &[0.9, 0.1, 0.7, 0.3, 0.8, 0.2, 0.1, 0.9],
        ),
    ])
}

/// Two independent components: X → Y (ternary Y) and U → V.
pub fn disconnected() -> DiscreteNetwork {
    network(&[
        ("X", 2, &[], &[0.2, 0.8]),
        ("U", 2, &[], &[0.55, 0.45]),
        ("Y", 3, &["X"], &[0.1, 0.3, 0.6, 0.5, 0.25, 0.25]),
        ("V", 2, &["U"], &[0.4, 0.6, 0.9, 0.1]),
    ])
}

/// `n` binary root nodes with no edges.
pub fn independent_binary(n: usize) -> DiscreteNetwork {
    let mut net = DiscreteNetwork::new();
    for i in 0..n {
        let id = net.add_node(&format!("N{i}"), 2).expect("add node");
        net.set_cpt(id, vec![0.25, 0.75]).expect("valid cpt");
    }
    net
}

/// Binary chain N0 → N1 → … → N(n-1), handy for benchmarks.
pub fn binary_chain(n: usize) -> DiscreteNetwork {
    let mut net = DiscreteNetwork::new();
    for i in 0..n {
        let id = net.add_node(&format!("N{i}"), 2).expect("add node");
        if i == 0 {
            net.set_cpt(id, vec![0.5, 0.5]).expect("valid cpt");
        } else {
            net.add_parent(id, id - 1).expect("add parent");
            net.set_cpt(id, vec![0.85, 0.15, 0.3, 0.7]).expect("valid cpt");
        }
    }
    net
}

/// Layered binary grid: node (r, c) has parents (r-1, c) and (r-1, c+1).
pub fn binary_grid(rows: usize, cols: usize) -> DiscreteNetwork {
    let mut net = DiscreteNetwork::new();
    for r in 0..rows {
        for c in 0..cols {
            net.add_node(&format!("G{r}_{c}"), 2).expect("add node");
        }
    }
    for r in 1..rows {
        for c in 0..cols {
            let child = r * cols + c;
            net.add_parent(child, (r - 1) * cols + c).expect("add parent");
            if c + 1 < cols {
                net.add_parent(child, (r - 1) * cols + c + 1).expect("add parent");
            }
            let rows_needed = net.parent_configurations(child);
            let cpt: Vec<f64> = (0..rows_needed)
                .flat_map(|row| {
                    let p = 0.2 + 0.6 * (row as f64) / (rows_needed as f64);
                    [p, 1.0 - p]
                })
                .collect();
            net.set_cpt(child, cpt).expect("valid cpt");
        }
    }
    net
}

/// Build a network where node `i` draws its parents from nodes before it,
/// as generated by property tests. `weights` supplies positive numbers that
/// are normalized into CPT rows; it is cycled if too short.
pub fn from_weights(cards: &[usize], parents: &[Vec<usize>], weights: &[f64]) -> DiscreteNetwork {
    let mut net = DiscreteNetwork::new();
    for (i, &card) in cards.iter().enumerate() {
        net.add_node(&format!("V{i}"), card).expect("add node");
    }
    let mut w = weights.iter().cycle();
    for (child, ps) in parents.iter().enumerate() {
        for &p in ps {
            if p < child && !net.parents(child).contains(&p) {
                net.add_parent(child, p).expect("add parent");
            }
        }
        let card = cards[child];
        let mut cpt = Vec::new();
        for _ in 0..net.parent_configurations(child) {
            let row: Vec<f64> = (0..card)
                .map(|_| w.next().copied().unwrap_or(1.0).abs() + 1e-3)
                .collect();
            let sum: f64 = row.iter().sum();
            cpt.extend(row.into_iter().map(|x| x / sum));
        }
        net.set_cpt_with_tolerance(child, cpt, 1e-9).expect("valid cpt");
    }
    net
}

/// Exact margins by enumerating the joint, conditioned on `evidence`.
///
/// Returns all-zero margins when the evidence has probability zero.
pub fn brute_force_margins(
    network: &dyn BayesianNetwork,
    evidence: &[(usize, usize)],
) -> Vec<Vec<f64>> {
    let n = network.node_count();
    let cards: Vec<usize> = (0..n).map(|i| network.cardinality(i)).collect();
    let mut margins: Vec<Vec<f64>> = cards.iter().map(|&c| vec![0.0; c]).collect();
    let mut values = vec![0usize; n];
    let mut total = 0.0;
    loop {
        if evidence.iter().all(|&(node, v)| values[node] == v) {
            let mut p = 1.0;
            for node in 0..n {
                let config = network
                    .parents(node)
                    .iter()
                    .fold(0, |acc, &q| acc * cards[q] + values[q]);
                p *= network.probability(node, config, values[node]);
            }
            total += p;
            for node in 0..n {
                margins[node][values[node]] += p;
            }
        }
        let mut k = n;
        loop {
            if k == 0 {
                if total > 0.0 {
                    for margin in &mut margins {
                        margin.iter_mut().for_each(|x| *x /= total);
                    }
                }
                return margins;
            }
            k -= 1;
            values[k] += 1;
            if values[k] < cards[k] {
                break;
            }
            values[k] = 0;
        }
    }
}

/// Largest absolute difference between two sets of margins.
pub fn max_abs_diff(a: &[Vec<f64>], b: &[Vec<f64>]) -> f64 {
    a.iter()
        .zip(b)
        .flat_map(|(x, y)| x.iter().zip(y).map(|(p, q)| (p - q).abs()))
        .fold(0.0, f64::max)
}
