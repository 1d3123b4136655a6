//! Re-exports of performance-oriented collection types.

pub use rustc_hash::FxHashMap;
pub use smallvec::SmallVec;

/// SmallVec for parent lists (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

/// SmallVec for clique and separator members (usually <8).
pub type SmallVec8<T> = SmallVec<[T; 8]>;
