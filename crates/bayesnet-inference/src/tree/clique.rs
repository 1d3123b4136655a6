//! Arena entries of the junction tree.

use bayesnet_core::types::collections::SmallVec8;

use crate::index::TableLayout;

/// A maximal clique of the triangulated graph.
#[derive(Debug, Clone)]
pub struct Clique {
    /// Table layout over the members (ascending node indices).
    pub layout: TableLayout,
    /// Product of the claimed CPTs. Fixed once potentials are assigned.
    pub potential: Vec<f64>,
    /// Live, normalized belief over the members.
    pub distribution: Vec<f64>,
    /// Separator towards the parent clique; `None` for a root.
    pub parent_separator: Option<usize>,
    pub child_separators: SmallVec8<usize>,
    /// Nodes whose CPT this clique claimed; it also writes their margins.
    pub owned: SmallVec8<usize>,
}

impl Clique {
    pub(crate) fn new(layout: TableLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            potential: vec![1.0; size],
            distribution: vec![0.0; size],
            parent_separator: None,
            child_separators: SmallVec8::new(),
            owned: SmallVec8::new(),
        }
    }

    pub fn members(&self) -> &[usize] {
        self.layout.members()
    }

    pub fn contains(&self, node: usize) -> bool {
        self.layout.position(node).is_some()
    }

    /// Separators touching this clique, parent side first.
    pub fn separators(&self) -> impl Iterator<Item = usize> + '_ {
        self.parent_separator
            .into_iter()
            .chain(self.child_separators.iter().copied())
    }
}

/// Shared variables between a child clique and its parent.
#[derive(Debug, Clone)]
pub struct Separator {
    pub layout: TableLayout,
    pub parent: usize,
    pub child: usize,
    /// Parent clique entry → separator entry.
    pub parent_map: Vec<usize>,
    /// Child clique entry → separator entry.
    pub child_map: Vec<usize>,
    /// Child's belief marginalized onto the separator.
    pub child_message: Vec<f64>,
    /// Parent's belief marginalized onto the separator.
    pub parent_message: Vec<f64>,
}

impl Separator {
    pub fn members(&self) -> &[usize] {
        self.layout.members()
    }

    /// The clique on the other side from `clique`.
    pub fn other(&self, clique: usize) -> usize {
        if clique == self.child {
            self.parent
        } else {
            self.child
        }
    }

    /// Projection map for `clique`, which must be one of the two ends.
    pub fn map_for(&self, clique: usize) -> &[usize] {
        if clique == self.child {
            &self.child_map
        } else {
            &self.parent_map
        }
    }
}
