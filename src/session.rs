use crate::core::{Deck, DeckError, DeckState, GestureResolver};
use crate::models::{CardView, Decision, Feedback, Item, Locality, MatchRecord, SwipeDirection};
use crate::services::{Enrichment, Ensure};
use uuid::Uuid;

/// A committed swipe and the enrichment it triggered for the new front card
#[derive(Debug)]
pub struct Swipe {
    pub removed: Item,
    pub direction: SwipeDirection,
    pub enrichment: Option<Ensure>,
}

/// Session-scoped state driving the swipe view
///
/// Owns the deck, the original source list (for reset), the gesture resolver
/// and the enrichment service. Views are always built from the current front
/// item plus a cache lookup by that item's id.
pub struct Session {
    id: Uuid,
    source: Vec<Item>,
    locality: Locality,
    deck: Deck,
    resolver: GestureResolver,
    enrichment: Enrichment,
}

impl Session {
    /// `source` ids are expected unique, as a loaded `Catalog` guarantees
    pub fn new(
        source: Vec<Item>,
        locality: Locality,
        resolver: GestureResolver,
        enrichment: Enrichment,
    ) -> Self {
        let deck = Deck::initialize(source.clone(), &locality);
        let id = Uuid::new_v4();

        tracing::info!(
            "Session {} started with {} items (locality: {})",
            id,
            deck.len(),
            locality.label()
        );

        Self {
            id,
            source,
            locality,
            deck,
            resolver,
            enrichment,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn locality(&self) -> &Locality {
        &self.locality
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn enrichment(&self) -> &Enrichment {
        &self.enrichment
    }

    /// Ask enrichment to look at the current front item
    pub fn observe_front(&self) -> Option<Ensure> {
        self.deck
            .peek_front()
            .map(|item| self.enrichment.ensure_enriched(item))
    }

    pub fn front_view(&self) -> Option<CardView> {
        self.deck.peek_front().map(|item| self.view(item, true))
    }

    pub fn next_view(&self) -> Option<CardView> {
        self.deck.peek_next().map(|item| self.view(item, false))
    }

    fn view(&self, item: &Item, is_front: bool) -> CardView {
        let (item, reasoning) = self.enrichment.merge(item);
        CardView {
            display_score: item.display_score(),
            item,
            reasoning,
            is_front,
        }
    }

    pub fn drag_feedback(&self, offset: f64) -> Feedback {
        self.resolver.feedback(offset)
    }

    /// Handle a drag released at `offset`; `Ok(None)` means the card snapped back
    pub fn release(&mut self, offset: f64) -> Result<Option<Swipe>, DeckError> {
        match self.resolver.resolve(offset) {
            Decision::SnapBack => {
                tracing::trace!("Released at {} below threshold, snapping back", offset);
                Ok(None)
            }
            Decision::Commit(direction) => self.swipe(direction).map(Some),
        }
    }

    /// Commit the front card, as the reject/match buttons do
    pub fn swipe(&mut self, direction: SwipeDirection) -> Result<Swipe, DeckError> {
        let removed = self.deck.commit(direction)?;

        if direction == SwipeDirection::Right {
            tracing::info!("Match recorded for {} ({})", removed.id, removed.name);
        }
        if self.deck.state() == DeckState::Exhausted {
            tracing::info!("Session {} deck exhausted", self.id);
        }

        Ok(Swipe {
            removed,
            direction,
            enrichment: self.observe_front(),
        })
    }

    /// Refill the deck with the source list in its original, unpartitioned order
    pub fn reset(&mut self) -> Option<Ensure> {
        self.deck.reset(self.source.clone());
        tracing::info!("Session {} reset to {} items", self.id, self.deck.len());
        self.observe_front()
    }

    pub fn last_match(&self) -> Option<&MatchRecord> {
        self.deck.last_match()
    }

    pub fn dismiss_match(&mut self) -> Option<MatchRecord> {
        self.deck.dismiss_match()
    }

    pub fn is_exhausted(&self) -> bool {
        self.deck.is_exhausted()
    }

    pub fn remaining(&self) -> usize {
        self.deck.len()
    }
}
