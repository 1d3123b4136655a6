//! Diagnostic views of a junction tree. Not a stable format.

use std::fmt;

use serde::Serialize;

use crate::tree::{JunctionTree, PropagationState};

/// Serializable snapshot of the tree structure and its observations.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSummary {
    pub nodes: usize,
    pub state: String,
    pub fill_edges: usize,
    pub roots: Vec<usize>,
    pub cliques: Vec<CliqueSummary>,
    pub evidence: Vec<EvidenceSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CliqueSummary {
    pub index: usize,
    pub members: Vec<String>,
    pub owned: Vec<String>,
    pub table_size: usize,
    pub parent: Option<usize>,
    pub separator: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvidenceSummary {
    pub node: String,
    pub value: usize,
}

impl TreeSummary {
    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for PropagationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::UpwardDone => "upward-done",
            Self::Consistent => "consistent",
        };
        f.write_str(label)
    }
}

impl JunctionTree {
    fn names_of(&self, nodes: &[usize]) -> Vec<String> {
        nodes.iter().map(|&n| self.names[n].clone()).collect()
    }

    pub fn summary(&self) -> TreeSummary {
        let cliques = self
            .cliques
            .iter()
            .enumerate()
            .map(|(index, clique)| {
                let parent_sep = clique.parent_separator.map(|s| &self.separators[s]);
                CliqueSummary {
                    index,
                    members: self.names_of(clique.members()),
                    owned: self.names_of(&clique.owned),
                    table_size: clique.layout.size(),
                    parent: parent_sep.map(|s| s.parent),
                    separator: parent_sep
                        .map(|s| self.names_of(s.members()))
                        .unwrap_or_default(),
                }
            })
            .collect();

        TreeSummary {
            nodes: self.node_count(),
            state: self.state.to_string(),
            fill_edges: self.fill_edges,
            roots: self.roots.clone(),
            cliques,
            evidence: self
                .evidence
                .iter()
                .map(|&(node, value)| EvidenceSummary {
                    node: self.names[node].clone(),
                    value,
                })
                .collect(),
        }
    }
}

impl fmt::Display for JunctionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "junction tree: {} nodes, {} cliques, {} roots, {}",
            self.node_count(),
            self.cliques.len(),
            self.roots.len(),
            self.state
        )?;
        for c in self.preorder() {
            let clique = &self.cliques[c];
            let depth = {
                let mut depth = 0;
                let mut current = clique.parent_separator;
                while let Some(s) = current {
                    depth += 1;
                    current = self.cliques[self.separators[s].parent].parent_separator;
                }
                depth
            };
            write!(
                f,
                "{:indent$}[{c}] {{{}}}",
                "",
                self.names_of(clique.members()).join(", "),
                indent = depth * 2
            )?;
            if let Some(s) = clique.parent_separator {
                write!(
                    f,
                    " sep {{{}}}",
                    self.names_of(self.separators[s].members()).join(", ")
                )?;
            }
            writeln!(f)?;
            for &node in &clique.owned {
                let margin: Vec<String> = self.margins[node]
                    .iter()
                    .map(|p| format!("{p:.4}"))
                    .collect();
                writeln!(
                    f,
                    "{:indent$}  {}: [{}]",
                    "",
                    self.names[node],
                    margin.join(", "),
                    indent = depth * 2
                )?;
            }
        }
        for &(node, value) in &self.evidence {
            writeln!(f, "evidence {} = {value}", self.names[node])?;
        }
        Ok(())
    }
}
