//! Assignment of CPTs to owning cliques.

use bayesnet_core::errors::{InferenceError, InferenceResult};
use bayesnet_core::traits::{BayesianNetwork, Cancellable};
use bayesnet_core::types::collections::SmallVec8;

use super::Clique;
use crate::ensure_not_cancelled;
use crate::index::next_configuration;

/// Check every CPT entry of `network` is a finite non-negative number and
/// every row sums to 1 within `tolerance`.
pub fn validate_cpts(network: &dyn BayesianNetwork, tolerance: f64) -> InferenceResult<()> {
    for node in 0..network.node_count() {
        let rows: usize = network
            .parents(node)
            .iter()
            .map(|&p| network.cardinality(p))
            .product();
        for row in 0..rows {
            let mut sum = 0.0;
            for value in 0..network.cardinality(node) {
                let p = network.probability(node, row, value);
                if p < 0.0 || !p.is_finite() {
                    return Err(InferenceError::InvalidNetwork {
                        reason: format!(
                            "CPT row {row} of '{}' has entry {p} for value {value}",
                            network.node_name(node)
                        ),
                    });
                }
                sum += p;
            }
            if (sum - 1.0).abs() > tolerance {
                return Err(InferenceError::InvalidNetwork {
                    reason: format!(
                        "CPT row {row} of '{}' sums to {sum}",
                        network.node_name(node)
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Claim each node's CPT for exactly one clique and multiply it into that
/// clique's potential.
///
/// Cliques are visited in construction order and members in ascending
/// order; a node is claimed by the first clique holding it and all its
/// parents. Returns the node → owning clique map. Enumeration polls
/// `cancel` every `poll_interval` entries.
pub fn assign_potentials(
    cliques: &mut [Clique],
    network: &dyn BayesianNetwork,
    cancel: &dyn Cancellable,
    poll_interval: usize,
) -> InferenceResult<Vec<usize>> {
    let n = network.node_count();
    let mut owner: Vec<Option<usize>> = vec![None; n];

    for (c, clique) in cliques.iter_mut().enumerate() {
        let mut claimed: SmallVec8<usize> = SmallVec8::new();
        for &node in clique.members() {
            if owner[node].is_none()
                && network.parents(node).iter().all(|&p| clique.contains(p))
            {
                owner[node] = Some(c);
                claimed.push(node);
            }
        }
        if !claimed.is_empty() {
            fill_potential(clique, &claimed, network, cancel, poll_interval)?;
        }
        clique.owned = claimed;
    }

    owner
        .into_iter()
        .enumerate()
        .map(|(node, c)| {
            c.ok_or_else(|| {
                InferenceError::structural(format!(
                    "node '{}' is not covered by any clique",
                    network.node_name(node)
                ))
            })
        })
        .collect()
}

/// Multiply the CPTs of `claimed` into `clique.potential` entry by entry.
fn fill_potential(
    clique: &mut Clique,
    claimed: &[usize],
    network: &dyn BayesianNetwork,
    cancel: &dyn Cancellable,
    poll_interval: usize,
) -> InferenceResult<()> {
    // (node position, [(parent position, parent cardinality)]) per claimed node.
    let mut factors: Vec<(usize, SmallVec8<(usize, usize)>)> = Vec::with_capacity(claimed.len());
    for &node in claimed {
        let own = position_of(clique, node)?;
        let mut parents = SmallVec8::new();
        for &p in network.parents(node) {
            parents.push((position_of(clique, p)?, network.cardinality(p)));
        }
        factors.push((own, parents));
    }

    let cards: SmallVec8<usize> = clique.layout.cards().iter().copied().collect();
    let mut values: SmallVec8<usize> = SmallVec8::from_elem(0, cards.len());
    for offset in 0..clique.potential.len() {
        if offset % poll_interval == 0 {
            ensure_not_cancelled(cancel)?;
        }
        let mut p = clique.potential[offset];
        for ((own, parents), &node) in factors.iter().zip(claimed) {
            let parent_config = parents
                .iter()
                .fold(0, |acc, &(pos, card)| acc * card + values[pos]);
            p *= network.probability(node, parent_config, values[*own]);
        }
        clique.potential[offset] = p;
        next_configuration(&mut values, &cards);
    }
    Ok(())
}

fn position_of(clique: &Clique, node: usize) -> InferenceResult<usize> {
    clique.layout.position(node).ok_or_else(|| {
        InferenceError::structural(format!(
            "node {node} missing from clique {:?}",
            clique.members()
        ))
    })
}
