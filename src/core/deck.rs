use crate::core::locality::partition_by_locality;
use crate::models::{Item, Locality, MatchRecord, SwipeDirection};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Errors raised by deck operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// Commit attempted with nothing left to swipe; callers gate on `is_exhausted`
    #[error("Cannot commit: the deck is empty")]
    Empty,
}

/// Observable deck state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckState {
    Active,
    Exhausted,
}

/// Ordered queue of candidate items awaiting a swipe decision
///
/// The front item is the only one receiving gesture input; the second item is
/// a preview. The queue only shrinks through `commit` and is only refilled
/// through `reset`.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    queue: VecDeque<Item>,
    last_match: Option<MatchRecord>,
}

impl Deck {
    /// Build a deck from the source list, putting local items first
    ///
    /// Item ids must be unique; `Catalog` loading guarantees this. A list with
    /// duplicates is kept as given and logged, since enrichment results are
    /// keyed by id.
    pub fn initialize(items: Vec<Item>, locality: &Locality) -> Self {
        let mut items = items;
        warn_on_duplicates(&items);
        partition_by_locality(&mut items, locality);

        tracing::debug!(
            "Deck initialized with {} items (locality: {})",
            items.len(),
            locality.label()
        );

        Self {
            queue: items.into(),
            last_match: None,
        }
    }

    pub fn peek_front(&self) -> Option<&Item> {
        self.queue.front()
    }

    pub fn peek_next(&self) -> Option<&Item> {
        self.queue.get(1)
    }

    /// Remove the front item; a right commit also records it as the latest match
    pub fn commit(&mut self, direction: SwipeDirection) -> Result<Item, DeckError> {
        let item = self.queue.pop_front().ok_or(DeckError::Empty)?;

        if direction == SwipeDirection::Right {
            self.last_match = Some(MatchRecord {
                item: item.clone(),
                matched_at: chrono::Utc::now(),
            });
        }

        tracing::debug!(
            "Committed {:?} on {} ({} remaining)",
            direction,
            item.id,
            self.queue.len()
        );

        Ok(item)
    }

    /// Replace the queue with the source list in its original order
    pub fn reset(&mut self, items: Vec<Item>) {
        warn_on_duplicates(&items);
        self.queue = items.into();
        tracing::debug!("Deck reset with {} items", self.queue.len());
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn state(&self) -> DeckState {
        if self.is_exhausted() {
            DeckState::Exhausted
        } else {
            DeckState::Active
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.queue.iter()
    }

    pub fn last_match(&self) -> Option<&MatchRecord> {
        self.last_match.as_ref()
    }

    /// Clear the match notification slot
    pub fn dismiss_match(&mut self) -> Option<MatchRecord> {
        self.last_match.take()
    }
}

/// First id that appears more than once, in list order
pub fn first_duplicate_id(items: &[Item]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(|item| item.id.as_str())
        .find(|id| !seen.insert(*id))
}

fn warn_on_duplicates(items: &[Item]) {
    if let Some(id) = first_duplicate_id(items) {
        tracing::warn!("Deck source contains duplicate item id {}", id);
    }
}
