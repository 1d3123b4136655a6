//! Incremental evidence absorption and retraction.

use bayesnet_core::errors::{InferenceError, InferenceResult};
use tracing::{debug, warn};

use crate::index::{marginalize, multiply_ratio, normalize};
use crate::tree::{JunctionTree, PropagationState};

impl JunctionTree {
    /// Observe `node = value` and ripple the update through its component.
    ///
    /// The first clique containing `node` is restricted to `value`; every
    /// other clique of the component then absorbs the change once, through
    /// the separator it shares with the clique it was reached from. Returns
    /// the number of cliques updated.
    ///
    /// Evidence with probability zero makes the whole joint impossible, so
    /// every clique of every component is zeroed and all margins read zero
    /// until the evidence is cleared or retracted.
    pub fn set_evidence(&mut self, node: usize, value: usize) -> InferenceResult<usize> {
        if self.state != PropagationState::Consistent {
            return Err(InferenceError::NotInitialized);
        }
        let cardinality = *self
            .cardinalities
            .get(node)
            .ok_or(InferenceError::NodeNotFound { node })?;
        if value >= cardinality {
            return Err(InferenceError::InvalidValue {
                node,
                value,
                cardinality,
            });
        }
        let start = self
            .cliques
            .iter()
            .position(|c| c.contains(node))
            .ok_or(InferenceError::NodeNotFound { node })?;

        let clique = &mut self.cliques[start];
        let pos = clique
            .layout
            .position(node)
            .ok_or(InferenceError::NodeNotFound { node })?;
        for (offset, p) in clique.distribution.iter_mut().enumerate() {
            if clique.layout.value_at(offset, pos) != value {
                *p = 0.0;
            }
        }
        if normalize(&mut clique.distribution) == 0.0 {
            warn!(
                node = %self.names[node],
                value,
                "evidence contradicts earlier observations"
            );
            self.zero_all();
            self.evidence.push((node, value));
            return Ok(self.cliques.len());
        }
        self.update_margins(start);

        let mut updated = 1;
        let mut stack: Vec<(usize, Option<usize>)> = vec![(start, None)];
        while let Some((from, via)) = stack.pop() {
            let seps: Vec<usize> = self.cliques[from]
                .separators()
                .filter(|&s| Some(s) != via)
                .collect();
            for s in seps {
                let to = self.absorb(from, s);
                self.update_margins(to);
                updated += 1;
                stack.push((to, Some(s)));
            }
        }

        self.evidence.push((node, value));
        debug!(node, value, cliques_updated = updated, "absorbed evidence");
        Ok(updated)
    }

    /// Push `from`'s belief across separator `s` into the clique on the
    /// other side and return that clique's index.
    fn absorb(&mut self, from: usize, s: usize) -> usize {
        let sep = &mut self.separators[s];
        let to = sep.other(from);

        let mut message = marginalize(
            &self.cliques[from].distribution,
            sep.map_for(from),
            sep.layout.size(),
        );
        normalize(&mut message);

        let previous = if from == sep.child {
            &sep.child_message
        } else {
            &sep.parent_message
        };
        let belief = &mut self.cliques[to].distribution;
        multiply_ratio(belief, sep.map_for(to), &message, previous);
        normalize(belief);

        sep.parent_message = message.clone();
        sep.child_message = message;
        to
    }

    /// Zero every belief, message and margin in the forest.
    fn zero_all(&mut self) {
        for clique in &mut self.cliques {
            clique.distribution.iter_mut().for_each(|p| *p = 0.0);
        }
        for sep in &mut self.separators {
            sep.child_message.iter_mut().for_each(|p| *p = 0.0);
            sep.parent_message.iter_mut().for_each(|p| *p = 0.0);
        }
        for margin in &mut self.margins {
            margin.iter_mut().for_each(|p| *p = 0.0);
        }
    }

    /// Drop all evidence and return to the prior margins.
    pub fn clear_evidence(&mut self) -> InferenceResult<()> {
        self.propagate()
    }

    /// Remove the observation on `node`, keeping the others.
    ///
    /// Re-propagates from the raw potentials and replays the remaining
    /// observations in the order they were made. Returns `false` when `node`
    /// had no evidence.
    pub fn retract_evidence(&mut self, node: usize) -> InferenceResult<bool> {
        if self.state != PropagationState::Consistent {
            return Err(InferenceError::NotInitialized);
        }
        if node >= self.node_count() {
            return Err(InferenceError::NodeNotFound { node });
        }
        if !self.evidence.iter().any(|&(n, _)| n == node) {
            return Ok(false);
        }
        let remaining: Vec<(usize, usize)> = self
            .evidence
            .iter()
            .copied()
            .filter(|&(n, _)| n != node)
            .collect();
        self.propagate()?;
        for (n, v) in remaining {
            self.set_evidence(n, v)?;
        }
        Ok(true)
    }
}
