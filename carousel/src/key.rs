use std::collections::HashSet;

/// Bound for item identity keys.
pub trait SelectorKey: core::hash::Hash + Eq {}
impl<K: core::hash::Hash + Eq> SelectorKey for K {}

pub(crate) fn has_duplicates<'a, K: SelectorKey + 'a>(keys: impl IntoIterator<Item = &'a K>) -> bool {
    let mut seen = HashSet::new();
    keys.into_iter().any(|k| !seen.insert(k))
}
