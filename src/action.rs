//! Actions - user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteImage;
use crate::state::Record;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Kick off the initial page and the type-option listing
    Init,

    // ===== Page category =====
    /// Intent: load the next page of the catalog ("load more")
    PageFetch,

    /// Result: one page of records fetched and joined
    PageDidLoad(Vec<Record>),

    /// Result: page fetch failed as a whole
    PageDidError(String),

    // ===== Types category =====
    /// Result: filter selector options loaded
    TypesDidLoad(Vec<String>),

    TypesDidError(String),

    // ===== Sprite category =====
    /// Result: card/panel sprite decoded
    SpriteDidLoad { id: u16, sprite: SpriteImage },

    SpriteDidError { id: u16, error: String },

    // ===== Grid category =====
    /// Move the grid cursor to a view position
    GridSelect(usize),

    /// Activate the selected card: flash it and open its detail panel
    CardActivate,

    // ===== Detail category =====
    /// Close the detail panel (safe when nothing is open)
    DetailClose,

    // ===== Filter category =====
    /// Cycle the type selector forward ("all" is the first stop)
    FilterNext,

    FilterPrev,

    /// Reset control: full catalog, selector back to "all"
    ResetView,

    // ===== Search category =====
    SearchOpen,

    SearchClose,

    /// Search input text changed (no filtering until submit)
    SearchQueryChange(String),

    /// Submit the search term
    SearchQuerySubmit(String),

    /// Dismiss the blocking no-match notice
    NoticeDismiss,

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick driving the card flash timer
    Tick,

    /// Exit the application
    Quit,
}
