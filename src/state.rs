//! Application state - single source of truth

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteImage;

/// Listing page size against the external API.
pub const PAGE_SIZE: u32 = 12;

/// Tick subscription interval.
pub const TICK_MS: u64 = 100;

/// Card activation flash duration, expressed in ticks.
pub const FLASH_DURATION_MS: u64 = 1000;
pub const FLASH_TICKS: u32 = (FLASH_DURATION_MS / TICK_MS) as u32;

/// One named base stat of a record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatEntry {
    pub name: String,
    pub base: u16,
}

/// One creature entity as returned by the external API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    pub id: u16,
    pub name: String,
    pub types: Vec<String>,
    pub stats: Vec<StatEntry>,
    pub sprite_url: Option<String>,
    /// Decimetres, per the API.
    pub height: u16,
    /// Hectograms, per the API.
    pub weight: u16,
}

impl Record {
    /// Zero-padded 3-digit display id: 7 -> "007". Ids >= 1000 render as-is.
    pub fn padded_id(&self) -> String {
        format!("{:03}", self.id)
    }

    pub fn joined_types(&self) -> String {
        self.types.join(", ")
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(type_name))
    }

    /// Search match: exact decimal id, or lowercased-name substring.
    /// The term is expected to be already trimmed and lowercased.
    pub fn matches_term(&self, term: &str) -> bool {
        self.id.to_string() == term || self.name.to_lowercase().contains(term)
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Catalog (visible in debug) ---
    /// Records accumulated across page fetches, append-only for the session
    #[debug(skip)]
    pub catalog: Vec<Record>,

    /// Offset into the external collection for the next page fetch
    #[debug(section = "Catalog", label = "Cursor")]
    pub cursor: u32,

    /// Currently displayed subset, as indices into the catalog
    #[debug(skip)]
    pub view: Vec<usize>,

    /// Selected card position within the view
    #[debug(section = "Catalog", label = "Selected")]
    pub selected: usize,

    // --- Filtering / search ---
    /// Type names offered by the filter selector (besides the "all" sentinel)
    #[debug(skip)]
    pub type_options: Vec<String>,

    /// Active type filter; `None` is the "all" sentinel
    #[debug(section = "Filters", label = "Type", debug_fmt)]
    pub type_filter: Option<String>,

    /// Whether the reset control is shown
    #[debug(section = "Filters", label = "Reset visible")]
    pub reset_visible: bool,

    /// Whether the search overlay is open
    #[debug(skip)]
    pub search_mode: bool,

    /// Search input text; survives reset and overlay close
    #[debug(section = "Filters", label = "Search")]
    pub search_query: String,

    /// Blocking notification (no-match alert); dismissed by any key
    #[debug(section = "Filters", label = "Notice", debug_fmt)]
    pub notice: Option<String>,

    // --- Detail panel / flash ---
    /// Record id the detail panel is open for; at most one at a time
    #[debug(section = "Detail", label = "Open", debug_fmt)]
    pub detail_id: Option<u16>,

    /// Card currently playing its one-shot activation flash
    #[debug(skip)]
    pub flash_id: Option<u16>,

    #[debug(skip)]
    pub flash_ticks_remaining: u32,

    // --- Async resources ---
    #[debug(skip)]
    pub sprite_cache: HashMap<u16, SpriteImage>,

    #[debug(section = "Status", label = "Page loading")]
    pub page_loading: bool,

    #[debug(section = "Status", label = "Types loading")]
    pub types_loading: bool,

    /// Footer status line (fetch errors and the like)
    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: Vec::new(),
            cursor: 0,
            view: Vec::new(),
            selected: 0,
            type_options: Vec::new(),
            type_filter: None,
            reset_visible: false,
            search_mode: false,
            search_query: String::new(),
            notice: None,
            detail_id: None,
            flash_id: None,
            flash_ticks_remaining: 0,
            sprite_cache: HashMap::new(),
            page_loading: false,
            types_loading: false,
            message: None,
        }
    }
}

impl AppState {
    /// Point the view at the full catalog. The card grid is rebuilt from
    /// scratch on every view change, so the selection restarts at the top.
    pub fn show_all(&mut self) {
        self.view = (0..self.catalog.len()).collect();
        self.selected = 0;
    }

    /// Replace the view with the records at the given catalog indices.
    pub fn show_indices(&mut self, indices: Vec<usize>) {
        self.view = indices;
        self.selected = 0;
    }

    pub fn record_by_id(&self, id: u16) -> Option<&Record> {
        self.catalog.iter().find(|record| record.id == id)
    }

    /// Record under the grid cursor, if the view is non-empty.
    pub fn selected_record(&self) -> Option<&Record> {
        self.view
            .get(self.selected)
            .and_then(|idx| self.catalog.get(*idx))
    }

    /// Record the detail panel is open for.
    pub fn detail_record(&self) -> Option<&Record> {
        self.detail_id.and_then(|id| self.record_by_id(id))
    }

    /// Records of the current view, in view order.
    pub fn view_records(&self) -> impl Iterator<Item = &Record> {
        self.view.iter().filter_map(|idx| self.catalog.get(*idx))
    }

    pub fn set_selected(&mut self, index: usize) -> bool {
        if self.view.is_empty() {
            self.selected = 0;
            return false;
        }
        let bounded = index.min(self.view.len() - 1);
        if bounded != self.selected {
            self.selected = bounded;
            return true;
        }
        false
    }

    pub fn flash_active(&self, id: u16) -> bool {
        self.flash_ticks_remaining > 0 && self.flash_id == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u16, name: &str) -> Record {
        Record {
            id,
            name: name.into(),
            types: vec!["grass".into(), "poison".into()],
            stats: Vec::new(),
            sprite_url: None,
            height: 7,
            weight: 69,
        }
    }

    #[test]
    fn test_padded_id() {
        assert_eq!(record(5, "a").padded_id(), "005");
        assert_eq!(record(42, "a").padded_id(), "042");
        assert_eq!(record(123, "a").padded_id(), "123");
        // Non-truncating beyond three digits
        assert_eq!(record(1000, "a").padded_id(), "1000");
    }

    #[test]
    fn test_has_type_is_case_insensitive() {
        let rec = record(1, "bulbasaur");
        assert!(rec.has_type("grass"));
        assert!(rec.has_type("Poison"));
        assert!(!rec.has_type("fire"));
    }

    #[test]
    fn test_matches_term() {
        let rec = record(25, "pikachu");
        assert!(rec.matches_term("25"));
        assert!(rec.matches_term("pika"));
        assert!(rec.matches_term(""));
        assert!(!rec.matches_term("2"));
        assert!(!rec.matches_term("char"));
    }

    #[test]
    fn test_set_selected_clamps() {
        let mut state = AppState {
            catalog: vec![record(1, "a"), record(2, "b")],
            ..Default::default()
        };
        state.show_all();
        assert!(state.set_selected(5));
        assert_eq!(state.selected, 1);
        assert!(!state.set_selected(1));
    }

    #[test]
    fn test_set_selected_empty_view() {
        let mut state = AppState::default();
        assert!(!state.set_selected(3));
        assert_eq!(state.selected, 0);
    }
}
