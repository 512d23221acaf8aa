use std::collections::HashSet;

/// Identifies a card for expansion tracking.
///
/// The featured article has its own key so it never collides with grid
/// indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardKey {
    Featured,
    /// Index into `FeedState::items`.
    Item(usize),
}

/// Which cards are currently showing their full text.
///
/// Ephemeral: cleared whenever a new feed is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<CardKey>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one card. Returns the new expanded flag.
    pub fn toggle(&mut self, key: CardKey) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn is_expanded(&self, key: CardKey) -> bool {
        self.expanded.contains(&key)
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }
}
