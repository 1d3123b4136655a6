//! Two-pass sum-product propagation (collect, then distribute).

use bayesnet_core::errors::{InferenceError, InferenceResult};

use crate::index::{marginalize, multiply_message, multiply_ratio, normalize};
use crate::tree::{JunctionTree, PropagationState};

impl JunctionTree {
    /// Run both passes from the raw potentials.
    ///
    /// Any absorbed evidence is discarded; the evidence log is cleared.
    /// Running this twice without structural change gives identical margins.
    pub fn propagate(&mut self) -> InferenceResult<()> {
        self.state = PropagationState::Uninitialized;
        self.evidence.clear();
        let order = self.preorder();
        if order.len() != self.cliques.len() {
            return Err(InferenceError::structural(format!(
                "{} of {} cliques are reachable from the roots",
                order.len(),
                self.cliques.len()
            )));
        }
        self.initialize_up(&order);
        self.initialize_down(&order);
        Ok(())
    }

    /// Leaves → root: fold child messages into each potential and send the
    /// normalized result up as the child-side separator message.
    fn initialize_up(&mut self, preorder: &[usize]) {
        for &c in preorder.iter().rev() {
            let mut belief = self.cliques[c].potential.clone();
            for &s in &self.cliques[c].child_separators {
                let sep = &self.separators[s];
                multiply_message(&mut belief, &sep.parent_map, &sep.child_message);
            }
            normalize(&mut belief);

            if let Some(s) = self.cliques[c].parent_separator {
                let sep = &mut self.separators[s];
                let mut message = marginalize(&belief, &sep.child_map, sep.layout.size());
                normalize(&mut message);
                sep.child_message = message;
            }
            self.cliques[c].distribution = belief;
        }
        self.state = PropagationState::UpwardDone;
    }

    /// Root → leaves: scale each child by parent message / child message and
    /// read off the margins.
    fn initialize_down(&mut self, preorder: &[usize]) {
        for &c in preorder {
            if let Some(s) = self.cliques[c].parent_separator {
                let sep = &mut self.separators[s];
                let mut from_parent = marginalize(
                    &self.cliques[sep.parent].distribution,
                    &sep.parent_map,
                    sep.layout.size(),
                );
                normalize(&mut from_parent);
                sep.parent_message = from_parent;

                let belief = &mut self.cliques[c].distribution;
                multiply_ratio(belief, &sep.child_map, &sep.parent_message, &sep.child_message);
                normalize(belief);

                let mut from_child = marginalize(belief, &sep.child_map, sep.layout.size());
                normalize(&mut from_child);
                sep.child_message = from_child;
            }
            self.update_margins(c);
        }
        self.state = PropagationState::Consistent;
    }

    /// Write the margins of every node owned by clique `c`.
    pub(crate) fn update_margins(&mut self, c: usize) {
        let clique = &self.cliques[c];
        for &node in &clique.owned {
            let Some(pos) = clique.layout.position(node) else {
                continue;
            };
            let margin = &mut self.margins[node];
            margin.iter_mut().for_each(|p| *p = 0.0);
            for (offset, p) in clique.distribution.iter().enumerate() {
                margin[clique.layout.value_at(offset, pos)] += p;
            }
        }
    }
}
