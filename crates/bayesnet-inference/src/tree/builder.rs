//! Separator computation and clique tree assembly.

use bayesnet_core::errors::{InferenceError, InferenceResult};
use bayesnet_core::types::collections::SmallVec8;

use super::{Clique, Separator};
use crate::index::TableLayout;

/// Cliques, separators and roots of a freshly assembled junction forest.
#[derive(Debug)]
pub struct Forest {
    pub cliques: Vec<Clique>,
    pub separators: Vec<Separator>,
    pub roots: Vec<usize>,
}

/// Link `member_sets` (in construction order) into a junction forest.
///
/// The separator of clique `i` is its members that already appeared in
/// cliques `0..i`. Its parent is the first other clique containing that
/// separator. Cliques with an empty separator become roots, one per
/// connected component.
pub fn build_forest(
    member_sets: &[SmallVec8<usize>],
    node_cards: &[usize],
    max_entries: usize,
    check_invariants: bool,
) -> InferenceResult<Forest> {
    let mut cliques = Vec::with_capacity(member_sets.len());
    for members in member_sets {
        cliques.push(Clique::new(TableLayout::new(members, node_cards, max_entries)?));
    }

    let mut separators: Vec<Separator> = Vec::new();
    let mut roots = Vec::new();
    let mut processed = vec![false; node_cards.len()];

    for (i, members) in member_sets.iter().enumerate() {
        let shared: SmallVec8<usize> = members.iter().copied().filter(|&m| processed[m]).collect();
        for &m in members {
            processed[m] = true;
        }

        if shared.is_empty() {
            roots.push(i);
            continue;
        }

        let parent = member_sets
            .iter()
            .enumerate()
            .find(|(j, other)| *j != i && shared.iter().all(|m| other.contains(m)))
            .map(|(j, _)| j)
            .ok_or_else(|| {
                InferenceError::structural(format!(
                    "no clique contains separator {shared:?} of clique {i}"
                ))
            })?;
        if parent > i {
            return Err(InferenceError::structural(format!(
                "clique {i} would attach below later clique {parent}"
            )));
        }

        let layout = TableLayout::new(&shared, node_cards, max_entries)?;
        let parent_map = cliques[parent].layout.projection(&layout)?;
        let child_map = cliques[i].layout.projection(&layout)?;
        let size = layout.size();
        let index = separators.len();
        separators.push(Separator {
            layout,
            parent,
            child: i,
            parent_map,
            child_map,
            child_message: vec![1.0; size],
            parent_message: vec![1.0; size],
        });
        cliques[i].parent_separator = Some(index);
        cliques[parent].child_separators.push(index);
    }

    if check_invariants {
        verify_running_intersection(&cliques, &separators)?;
    }

    Ok(Forest {
        cliques,
        separators,
        roots,
    })
}

/// Every separator must equal the intersection of its two cliques.
pub fn verify_running_intersection(
    cliques: &[Clique],
    separators: &[Separator],
) -> InferenceResult<()> {
    for (s, sep) in separators.iter().enumerate() {
        let parent = &cliques[sep.parent];
        let intersection: SmallVec8<usize> = cliques[sep.child]
            .members()
            .iter()
            .copied()
            .filter(|&m| parent.contains(m))
            .collect();
        if intersection.as_slice() != sep.members() {
            return Err(InferenceError::structural(format!(
                "separator {s} has members {:?}, cliques {} and {} share {:?}",
                sep.members(),
                sep.child,
                sep.parent,
                intersection
            )));
        }
    }
    Ok(())
}
