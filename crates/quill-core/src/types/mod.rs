//! Shared data structures for quill.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet, SmallVec2};
