// Model exports
pub mod catalog;
pub mod domain;
pub mod view;

pub use catalog::{Catalog, CatalogError};
pub use domain::{Analysis, Decision, Item, Locality, MatchRecord, SwipeDirection};
pub use view::{CardView, Feedback};
