//! Symmetric boolean adjacency matrix.

/// Dense symmetric adjacency over `n` nodes. Self-loops are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Graph with `n` nodes and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Fully connected graph on `n` nodes.
    pub fn complete(n: usize) -> Self {
        let mut matrix = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                matrix.connect(i, j);
            }
        }
        matrix
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn connected(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.n + j]
    }

    /// Add the undirected edge `i - j`. Returns `true` if it was new.
    pub fn connect(&mut self, i: usize, j: usize) -> bool {
        if i == j || self.connected(i, j) {
            return false;
        }
        self.cells[i * self.n + j] = true;
        self.cells[j * self.n + i] = true;
        true
    }

    /// Neighbors of `i` in ascending index order.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let row = &self.cells[i * self.n..(i + 1) * self.n];
        row.iter()
            .enumerate()
            .filter_map(|(j, &edge)| edge.then_some(j))
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|&&edge| edge).count() / 2
    }
}
