//! Duplicate section detection.

use quill_core::types::FxHashMap;

use crate::comments::{SectionKey, SectionTag, Sections};

/// Sections of one tag sharing a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Key of the first occurrence, as written.
    pub key: SectionKey,
    /// Node indices in document order.
    pub indices: Vec<usize>,
}

/// Groups sections of `tag` by (normalized) key and returns every key seen
/// more than once, in order of first occurrence. Content is not compared.
pub fn duplicate_keys(sections: &Sections, tag: &SectionTag) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut by_key: FxHashMap<Option<&str>, usize> = FxHashMap::default();

    for section in sections.with_tag(tag) {
        let normalized = section.key.normalized_name();
        match by_key.get(&normalized) {
            Some(&slot) => groups[slot].indices.push(section.index),
            None => {
                by_key.insert(normalized, groups.len());
                groups.push(DuplicateGroup {
                    key: section.key.clone(),
                    indices: vec![section.index],
                });
            }
        }
    }

    groups.retain(|g| g.indices.len() > 1);
    groups
}
