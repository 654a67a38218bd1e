use serde::{Deserialize, Serialize};
use crate::models::domain::Item;

/// Render-ready card: the deck item merged with its cached analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub item: Item,
    #[serde(rename = "displayScore")]
    pub display_score: f64,
    pub reasoning: Option<String>,
    #[serde(rename = "isFront")]
    pub is_front: bool,
}

/// Continuous drag feedback for overlay animation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Feedback {
    /// Reject overlay intensity in [0, 1]
    pub left: f64,
    /// Match overlay intensity in [0, 1]
    pub right: f64,
    #[serde(rename = "tiltDegrees")]
    pub tilt_degrees: f64,
}
