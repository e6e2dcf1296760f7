//! Superpower selection held by the hero form.

use std::collections::BTreeSet;

use super::hero::SuperpowerId;

/// Read/update capability over a set of selected superpowers.
///
/// Views drive the selection through this trait instead of binding widgets to
/// the underlying collection.
pub trait SuperpowerPicker {
    /// Currently selected identifiers in ascending order.
    fn selected(&self) -> Vec<SuperpowerId>;

    /// Add `id` when absent, remove it when present.
    fn toggle(&mut self, id: SuperpowerId);

    /// Remove every selection.
    fn clear(&mut self);
}

/// Set of selected superpower identifiers. Never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuperpowerSelection {
    ids: BTreeSet<SuperpowerId>,
}

impl SuperpowerSelection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: SuperpowerId) -> bool {
        self.ids.contains(&id)
    }

    /// Deselect `id`; no-op when it is not selected.
    pub fn remove(&mut self, id: SuperpowerId) {
        self.ids.remove(&id);
    }

    /// Number of selected superpowers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<SuperpowerId> for SuperpowerSelection {
    fn from_iter<T: IntoIterator<Item = SuperpowerId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl SuperpowerPicker for SuperpowerSelection {
    fn selected(&self) -> Vec<SuperpowerId> {
        self.ids.iter().copied().collect()
    }

    fn toggle(&mut self, id: SuperpowerId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    fn clear(&mut self) {
        self.ids.clear();
    }
}
