//! ChemMatch - swipe-deck engine for industrial by-product listings
//!
//! This library provides the deck, gesture resolution and asynchronous
//! enrichment behind the ChemMatch "match" interface.

pub mod config;
pub mod core;
pub mod models;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Deck, DeckError, DeckState, GestureParams, GestureResolver};
pub use models::{Analysis, CardView, Catalog, Decision, Feedback, Item, Locality, MatchRecord, SwipeDirection};
pub use services::{Analyzer, Enrichment, Ensure, SimulatedAnalyzer};
pub use session::{Session, Swipe};
