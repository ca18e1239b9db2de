//! Stable material identity assignment.

use hashbrown::HashMap;

/// Maps persistent shader uids to small sequential integer ids. Ids are
/// stable for the lifetime of the extraction session; there is no eviction.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    ids: HashMap<String, i32>,
    next: i32,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id for a shader uid, allocating the next sequential id on first
    /// sight.
    pub fn id_for(&mut self, uid: &str) -> i32 {
        if let Some(id) = self.ids.get(uid) {
            return *id;
        }
        let id = self.next;
        self.next += 1;
        self.ids.insert(uid.to_string(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
