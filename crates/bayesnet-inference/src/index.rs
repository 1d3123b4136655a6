//! Mixed-radix table indexing shared by cliques, separators, and CPT lookup.
//!
//! A member list `[m0, .., mk-1]` with cardinalities `[c0, .., ck-1]` maps the
//! configuration `(v0, .., vk-1)` to `((v0·c1 + v1)·c2 + v2)…`, so the last
//! member varies fastest. CPT parent configurations use the same convention
//! over the declared parent order.

use bayesnet_core::errors::{InferenceError, InferenceResult};
use bayesnet_core::types::collections::SmallVec8;

/// Layout of a flat probability table over an ordered set of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    members: SmallVec8<usize>,
    cards: SmallVec8<usize>,
    strides: SmallVec8<usize>,
    size: usize,
}

impl TableLayout {
    /// Build the layout for `members`, looking cardinalities up in `node_cards`.
    ///
    /// Fails with `CliqueTooLarge` when the table would exceed `limit` entries
    /// or overflow `usize`.
    pub fn new(members: &[usize], node_cards: &[usize], limit: usize) -> InferenceResult<Self> {
        let cards: SmallVec8<usize> = members.iter().map(|&m| node_cards[m]).collect();
        let mut strides: SmallVec8<usize> = SmallVec8::from_elem(1, members.len());
        let mut size: usize = 1;
        for k in (0..members.len()).rev() {
            strides[k] = size;
            size = size
                .checked_mul(cards[k])
                .filter(|s| *s <= limit)
                .ok_or(InferenceError::CliqueTooLarge {
                    members: members.len(),
                    limit,
                })?;
        }
        Ok(Self {
            members: members.iter().copied().collect(),
            cards,
            strides,
            size,
        })
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn cards(&self) -> &[usize] {
        &self.cards
    }

    /// Number of table entries (product of member cardinalities).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Position of `node` within the member list.
    pub fn position(&self, node: usize) -> Option<usize> {
        self.members.iter().position(|&m| m == node)
    }

    /// Flat offset of a configuration given as values aligned with `members`.
    pub fn offset(&self, values: &[usize]) -> usize {
        values
            .iter()
            .zip(self.strides.iter())
            .map(|(v, s)| v * s)
            .sum()
    }

    /// Value of the member at `position` in the configuration at `offset`.
    pub fn value_at(&self, offset: usize, position: usize) -> usize {
        (offset / self.strides[position]) % self.cards[position]
    }

    /// Decode `offset` into per-member values.
    pub fn decode_into(&self, offset: usize, values: &mut [usize]) {
        for (k, value) in values.iter_mut().enumerate().take(self.members.len()) {
            *value = self.value_at(offset, k);
        }
    }

    /// For every entry of this table, the offset of the matching entry in
    /// `sub`, whose members must all appear in this layout.
    pub fn projection(&self, sub: &TableLayout) -> InferenceResult<Vec<usize>> {
        let mut sub_strides: SmallVec8<usize> = SmallVec8::from_elem(0, self.members.len());
        for (k, node) in sub.members.iter().enumerate() {
            let pos = self.position(*node).ok_or_else(|| {
                InferenceError::structural(format!(
                    "node {node} of {:?} is missing from {:?}",
                    sub.members, self.members
                ))
            })?;
            sub_strides[pos] = sub.strides[k];
        }

        let mut map = Vec::with_capacity(self.size);
        let mut values: SmallVec8<usize> = SmallVec8::from_elem(0, self.members.len());
        let mut target = 0usize;
        for _ in 0..self.size {
            map.push(target);
            // Odometer step, last member fastest.
            for k in (0..values.len()).rev() {
                values[k] += 1;
                target += sub_strides[k];
                if values[k] < self.cards[k] {
                    break;
                }
                target -= sub_strides[k] * values[k];
                values[k] = 0;
            }
        }
        Ok(map)
    }
}

/// Advance `values` to the next configuration of `cards`, last position
/// fastest. Returns `false` after wrapping around to all zeros.
pub fn next_configuration(values: &mut [usize], cards: &[usize]) -> bool {
    for k in (0..values.len()).rev() {
        values[k] += 1;
        if values[k] < cards[k] {
            return true;
        }
        values[k] = 0;
    }
    false
}

/// Normalize `table` to sum 1 and return the pre-normalization sum.
///
/// A table whose sum is zero (or not finite) is left untouched, so
/// contradictory evidence produces zeros rather than NaN.
pub fn normalize(table: &mut [f64]) -> f64 {
    let sum: f64 = table.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        for p in table.iter_mut() {
            *p /= sum;
        }
    }
    sum
}

/// Sum `table` onto a smaller table of `size` entries through `map`.
pub fn marginalize(table: &[f64], map: &[usize], size: usize) -> Vec<f64> {
    let mut out = vec![0.0; size];
    for (p, &target) in table.iter().zip(map.iter()) {
        out[target] += p;
    }
    out
}

/// `table[i] *= message[map[i]]`.
pub fn multiply_message(table: &mut [f64], map: &[usize], message: &[f64]) {
    for (p, &target) in table.iter_mut().zip(map.iter()) {
        *p *= message[target];
    }
}

/// `table[i] *= numerator[j] / denominator[j]` with `j = map[i]`.
///
/// Entries whose denominator is zero are forced to zero.
pub fn multiply_ratio(table: &mut [f64], map: &[usize], numerator: &[f64], denominator: &[f64]) {
    for (p, &target) in table.iter_mut().zip(map.iter()) {
        let denom = denominator[target];
        *p = if denom == 0.0 {
            0.0
        } else {
            *p * numerator[target] / denom
        };
    }
}
