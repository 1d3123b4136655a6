//! Undirected graph stages: moralization, ordering, and fill-in.

pub mod adjacency;
pub mod moralize;
pub mod ordering;
pub mod triangulate;

pub use adjacency::AdjacencyMatrix;
pub use moralize::{moralize, validate_structure};
pub use ordering::{max_cardinality_order, EliminationOrder};
pub use triangulate::fill_in;
