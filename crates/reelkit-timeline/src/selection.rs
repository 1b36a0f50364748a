//! Segment selection state.

use smallvec::SmallVec;
use uuid::Uuid;

/// An ordered set of selected segment ids.
///
/// Process-local editing state; never persisted. Order is insertion
/// order, which keeps multi-select behavior predictable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: SmallVec<[Uuid; 8]>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_multi(&self) -> bool {
        self.ids.len() > 1
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    /// The sole selected id, if exactly one segment is selected.
    pub fn sole(&self) -> Option<Uuid> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Replace the whole selection with one id.
    pub fn replace(&mut self, id: Uuid) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Replace the whole selection with the given ids.
    pub fn replace_all(&mut self, ids: impl IntoIterator<Item = Uuid>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Toggle membership of an id (shift-click behavior).
    pub fn toggle(&mut self, id: Uuid) {
        if let Some(pos) = self.ids.iter().position(|&x| x == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
