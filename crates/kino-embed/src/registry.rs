//! Instance registry
//!
//! Tracks the element ids of every mounted player so that two players sharing
//! an id can be reported. The registry never owns players and never blocks
//! creation; a collision is only a warning.
//!
//! A host application creates one registry and hands a clone to each player.
//! Clones share the same underlying set.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

/// Shared multiset of active player ids
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    ids: Rc<RefCell<Vec<String>>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id, returning `true` if it was already active
    pub fn register(&self, id: &str) -> bool {
        let mut ids = self.ids.borrow_mut();
        let duplicate = ids.iter().any(|active| active == id);
        ids.push(id.to_string());
        drop(ids);

        if duplicate {
            warn!(
                player_id = id,
                "Multiple instances of the same video detected on the page, \
                 which may cause some features to not work. Try adding a unique id to each player."
            );
        }

        duplicate
    }

    /// Remove one occurrence of an id; unknown ids are ignored
    pub fn unregister(&self, id: &str) {
        let mut ids = self.ids.borrow_mut();
        if let Some(pos) = ids.iter().rposition(|active| active == id) {
            ids.remove(pos);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.borrow().iter().any(|active| active == id)
    }

    /// Number of active registrations for an id
    pub fn count(&self, id: &str) -> usize {
        self.ids.borrow().iter().filter(|active| *active == id).count()
    }

    pub fn len(&self) -> usize {
        self.ids.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.borrow().is_empty()
    }
}
