use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type EventKindId = u32;

/// Catalog row: a display label for an open-ended event kind. Labels double
/// as the classifier's match keys, so they are exact strings, not slugs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventKind {
    pub id: EventKindId,
    pub label: String,
}

/// Id↔label lookup built once per request from the storage collaborator's
/// kind listing.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    by_id: HashMap<EventKindId, String>,
    by_label: HashMap<String, EventKindId>,
}

impl EventCatalog {
    pub fn new(kinds: Vec<EventKind>) -> Self {
        let mut by_id = HashMap::with_capacity(kinds.len());
        let mut by_label = HashMap::with_capacity(kinds.len());
        for kind in kinds {
            by_id.insert(kind.id, kind.label.clone());
            by_label.insert(kind.label, kind.id);
        }
        Self { by_id, by_label }
    }

    pub fn label(&self, id: EventKindId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn id_of(&self, label: &str) -> Option<EventKindId> {
        self.by_label.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
