//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for template candidates (short and fully qualified form).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
