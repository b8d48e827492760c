//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, FLASH_TICKS, PAGE_SIZE};

/// Shown by the blocking notice when a search matches nothing.
pub const NO_MATCH_NOTICE: &str = "No creature matched that id or name.";

/// Shown in place of cards when the view is empty.
pub const NO_RESULTS: &str = "No results found.";

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.page_loading = true;
            state.types_loading = true;
            state.message = None;
            DispatchResult::changed_with_many(vec![
                Effect::FetchPage {
                    offset: state.cursor,
                    limit: PAGE_SIZE,
                },
                Effect::FetchTypes,
            ])
        }

        // ===== Page actions =====
        Action::PageFetch => {
            // In-flight guard: a second "load more" while a page is being
            // joined is a no-op, so the cursor cannot be advanced twice.
            if state.page_loading {
                return DispatchResult::unchanged();
            }
            state.page_loading = true;
            DispatchResult::changed_with(Effect::FetchPage {
                offset: state.cursor,
                limit: PAGE_SIZE,
            })
        }

        Action::PageDidLoad(mut batch) => {
            state.page_loading = false;
            state.message = None;
            batch.sort_by_key(|record| record.id);

            let effects = sprite_effects(state, &batch);
            state.catalog.extend(batch);
            state.cursor += PAGE_SIZE;

            // The refreshed view always shows the full catalog; an active
            // search or type filter is not reapplied, and the reset control
            // keeps whatever visibility it had.
            state.show_all();

            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::PageDidError(error) => {
            state.page_loading = false;
            state.message = Some(format!("Page load error: {error}"));
            DispatchResult::changed()
        }

        // ===== Types actions =====
        Action::TypesDidLoad(types) => {
            state.types_loading = false;
            state.type_options = types;
            DispatchResult::changed()
        }

        Action::TypesDidError(error) => {
            state.types_loading = false;
            state.message = Some(format!("Type list error: {error}"));
            DispatchResult::changed()
        }

        // ===== Sprite actions =====
        Action::SpriteDidLoad { id, sprite } => {
            state.sprite_cache.insert(id, sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { id, error } => {
            state.message = Some(format!("Sprite {id} error: {error}"));
            DispatchResult::changed()
        }

        // ===== Grid actions =====
        Action::GridSelect(index) => {
            if !state.set_selected(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::CardActivate => {
            let Some(record) = state.selected_record() else {
                return DispatchResult::unchanged();
            };
            let id = record.id;
            let sprite_url = record.sprite_url.clone();

            // One-shot cosmetic flash; cleared by Tick after FLASH_TICKS.
            state.flash_id = Some(id);
            state.flash_ticks_remaining = FLASH_TICKS;

            // Opening a panel implicitly replaces any open one.
            state.detail_id = Some(id);

            if let Some(url) = sprite_url {
                if !state.sprite_cache.contains_key(&id) {
                    return DispatchResult::changed_with(Effect::FetchSprite { id, url });
                }
            }
            DispatchResult::changed()
        }

        // ===== Detail actions =====
        Action::DetailClose => {
            if state.detail_id.is_none() {
                return DispatchResult::unchanged();
            }
            state.detail_id = None;
            DispatchResult::changed()
        }

        // ===== Filter actions =====
        Action::FilterNext => cycle_filter(state, 1),
        Action::FilterPrev => cycle_filter(state, -1),

        Action::ResetView => {
            state.show_all();
            state.reset_visible = false;
            state.type_filter = None;
            // The search input text deliberately survives a reset.
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            if state.search_mode {
                return DispatchResult::unchanged();
            }
            state.search_mode = true;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            if !state.search_mode {
                return DispatchResult::unchanged();
            }
            state.search_mode = false;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchQuerySubmit(query) => {
            state.search_mode = false;
            state.search_query = query;
            search_by_term(state);
            DispatchResult::changed()
        }

        Action::NoticeDismiss => {
            if state.notice.is_none() {
                return DispatchResult::unchanged();
            }
            state.notice = None;
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.flash_ticks_remaining == 0 {
                return DispatchResult::unchanged();
            }
            state.flash_ticks_remaining -= 1;
            if state.flash_ticks_remaining == 0 {
                state.flash_id = None;
            }
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Sprite fetches for freshly landed records. Cosmetic and per-record, so
/// they sit outside the page's all-or-nothing join.
fn sprite_effects(state: &AppState, batch: &[crate::state::Record]) -> Vec<Effect> {
    batch
        .iter()
        .filter_map(|record| {
            let url = record.sprite_url.clone()?;
            (!state.sprite_cache.contains_key(&record.id)).then_some(Effect::FetchSprite {
                id: record.id,
                url,
            })
        })
        .collect()
}

/// Cycle the filter selector through `["all"] + type_options`, wrapping at
/// both ends, then reapply the type filter to the catalog.
fn cycle_filter(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    if state.type_options.is_empty() {
        return DispatchResult::unchanged();
    }

    let max_index = state.type_options.len() as i16;
    let current = state
        .type_filter
        .as_ref()
        .and_then(|name| state.type_options.iter().position(|t| t == name))
        .map(|idx| idx as i16 + 1)
        .unwrap_or(0);
    let mut next = current + step;
    if next < 0 {
        next = max_index;
    } else if next > max_index {
        next = 0;
    }

    state.type_filter = if next == 0 {
        None
    } else {
        Some(state.type_options[(next - 1) as usize].clone())
    };
    filter_by_type(state);
    DispatchResult::changed()
}

/// Apply the active type filter. The "all" sentinel shows the full catalog
/// and hides the reset control; a concrete type shows the (possibly empty)
/// case-insensitive match set and shows the reset control either way.
fn filter_by_type(state: &mut AppState) {
    match state.type_filter.clone() {
        None => {
            state.show_all();
            state.reset_visible = false;
        }
        Some(selected) => {
            let matches: Vec<usize> = state
                .catalog
                .iter()
                .enumerate()
                .filter(|(_, record)| record.has_type(&selected))
                .map(|(idx, _)| idx)
                .collect();
            state.show_indices(matches);
            state.reset_visible = true;
        }
    }
}

/// Apply the submitted search term to the full catalog. Zero matches fall
/// back to showing the entire catalog (not an empty view), hide the reset
/// control, leave the filter selector alone, and raise the blocking notice.
fn search_by_term(state: &mut AppState) {
    let term = state.search_query.trim().to_lowercase();
    let matches: Vec<usize> = state
        .catalog
        .iter()
        .enumerate()
        .filter(|(_, record)| record.matches_term(&term))
        .map(|(idx, _)| idx)
        .collect();

    if matches.is_empty() {
        state.show_all();
        state.reset_visible = false;
        state.notice = Some(NO_MATCH_NOTICE.to_string());
    } else {
        state.show_indices(matches);
        state.reset_visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Record, StatEntry};

    fn record(id: u16, name: &str, types: &[&str]) -> Record {
        Record {
            id,
            name: name.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
            stats: vec![StatEntry {
                name: "hp".into(),
                base: 45,
            }],
            sprite_url: None,
            height: 7,
            weight: 69,
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        reducer(
            &mut state,
            Action::PageDidLoad(vec![
                record(1, "bulbasaur", &["grass", "poison"]),
                record(4, "charmander", &["fire"]),
                record(7, "squirtle", &["water"]),
                record(25, "pikachu", &["electric"]),
            ]),
        );
        state
    }

    #[test]
    fn test_init_fetches_page_and_types() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert!(state.page_loading);
        assert!(state.types_loading);
        assert_eq!(result.effects.len(), 2);
        assert!(matches!(
            result.effects[0],
            Effect::FetchPage { offset: 0, limit: PAGE_SIZE }
        ));
        assert!(matches!(result.effects[1], Effect::FetchTypes));
    }

    #[test]
    fn test_page_fetch_uses_cursor_and_guards_inflight() {
        let mut state = AppState {
            cursor: 24,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::PageFetch);
        assert!(result.changed);
        assert!(matches!(
            result.effects[0],
            Effect::FetchPage { offset: 24, limit: PAGE_SIZE }
        ));

        // Second click while the first page is still in flight: no-op.
        let result = reducer(&mut state, Action::PageFetch);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.cursor, 24);
    }

    #[test]
    fn test_page_did_load_sorts_batch_and_advances_cursor() {
        let mut state = AppState::default();
        reducer(
            &mut state,
            Action::PageDidLoad(vec![
                record(7, "squirtle", &["water"]),
                record(1, "bulbasaur", &["grass"]),
                record(4, "charmander", &["fire"]),
            ]),
        );

        let ids: Vec<u16> = state.catalog.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4, 7]);
        assert_eq!(state.cursor, 12);
        assert_eq!(state.view, vec![0, 1, 2]);
        assert!(!state.page_loading);
    }

    #[test]
    fn test_catalog_is_piecewise_sorted_across_pages() {
        let mut state = AppState::default();
        reducer(
            &mut state,
            Action::PageDidLoad(vec![record(20, "b", &[]), record(15, "a", &[])]),
        );
        reducer(
            &mut state,
            Action::PageDidLoad(vec![record(3, "d", &[]), record(2, "c", &[])]),
        );

        // Each batch sorted, batches concatenated in fetch order: the
        // global order is only piecewise-sorted.
        let ids: Vec<u16> = state.catalog.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![15, 20, 2, 3]);
        assert_eq!(state.cursor, 24);
    }

    #[test]
    fn test_page_did_load_does_not_reapply_filter() {
        let mut state = loaded_state();
        state.type_options = vec!["fire".into(), "water".into()];
        reducer(&mut state, Action::FilterNext);
        assert_eq!(state.view.len(), 1);
        assert!(state.reset_visible);

        reducer(&mut state, Action::PageDidLoad(vec![record(30, "e", &[])]));

        // View refreshed to the full catalog; filter not reapplied; the
        // reset control keeps its previous visibility.
        assert_eq!(state.view.len(), 5);
        assert_eq!(state.type_filter.as_deref(), Some("fire"));
        assert!(state.reset_visible);
    }

    #[test]
    fn test_page_did_error_keeps_cursor_retryable() {
        let mut state = AppState::default();
        reducer(&mut state, Action::PageFetch);
        let result = reducer(&mut state, Action::PageDidError("boom".into()));

        assert!(result.changed);
        assert!(!state.page_loading);
        assert_eq!(state.cursor, 0);
        assert!(state.catalog.is_empty());
        assert!(state.message.as_deref().unwrap().contains("boom"));

        // Retry goes out for the same offset.
        let result = reducer(&mut state, Action::PageFetch);
        assert!(matches!(
            result.effects[0],
            Effect::FetchPage { offset: 0, .. }
        ));
    }

    #[test]
    fn test_filter_cycle_matches_case_insensitively() {
        let mut state = loaded_state();
        state.type_options = vec!["FIRE".into(), "water".into()];

        reducer(&mut state, Action::FilterNext);
        assert_eq!(state.type_filter.as_deref(), Some("FIRE"));
        let names: Vec<&str> = state.view_records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["charmander"]);
        assert!(state.reset_visible);
    }

    #[test]
    fn test_filter_all_sentinel_shows_everything() {
        let mut state = loaded_state();
        state.type_options = vec!["fire".into()];
        reducer(&mut state, Action::FilterNext);
        assert!(state.reset_visible);

        // One more step wraps past the options back to the "all" sentinel.
        let result = reducer(&mut state, Action::FilterNext);
        assert!(result.changed);
        assert!(state.type_filter.is_none());
        assert_eq!(state.view.len(), state.catalog.len());
        assert!(!state.reset_visible);
    }

    #[test]
    fn test_filter_with_no_matches_shows_reset() {
        let mut state = loaded_state();
        state.type_options = vec!["dragon".into()];

        reducer(&mut state, Action::FilterNext);
        assert!(state.view.is_empty());
        assert!(state.reset_visible);
    }

    #[test]
    fn test_search_by_id() {
        let mut state = loaded_state();
        reducer(&mut state, Action::SearchQuerySubmit("25".into()));

        let names: Vec<&str> = state.view_records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["pikachu"]);
        assert!(state.reset_visible);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_search_by_name_substring() {
        let mut state = loaded_state();
        reducer(&mut state, Action::SearchQuerySubmit("  CHAR ".into()));

        let names: Vec<&str> = state.view_records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["charmander"]);
    }

    #[test]
    fn test_search_no_match_falls_back_to_full_catalog() {
        let mut state = loaded_state();
        state.type_options = vec!["fire".into()];
        reducer(&mut state, Action::FilterNext);

        let result = reducer(&mut state, Action::SearchQuerySubmit("mewtwo".into()));
        assert!(result.changed);

        // Full catalog, not an empty view; reset hidden; filter selector
        // untouched; exactly one blocking notice.
        assert_eq!(state.view.len(), state.catalog.len());
        assert!(!state.reset_visible);
        assert_eq!(state.type_filter.as_deref(), Some("fire"));
        assert_eq!(state.notice.as_deref(), Some(NO_MATCH_NOTICE));
    }

    #[test]
    fn test_search_empty_term_matches_everything() {
        let mut state = loaded_state();
        reducer(&mut state, Action::SearchQuerySubmit("   ".into()));

        assert_eq!(state.view.len(), state.catalog.len());
        assert!(state.reset_visible);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_reset_view_keeps_search_text() {
        let mut state = loaded_state();
        state.type_options = vec!["fire".into()];
        reducer(&mut state, Action::SearchQueryChange("pika".into()));
        reducer(&mut state, Action::FilterNext);

        reducer(&mut state, Action::ResetView);
        assert_eq!(state.view.len(), state.catalog.len());
        assert!(!state.reset_visible);
        assert!(state.type_filter.is_none());
        assert_eq!(state.search_query, "pika");
    }

    #[test]
    fn test_card_activate_opens_detail_and_flashes() {
        let mut state = loaded_state();
        reducer(&mut state, Action::GridSelect(1));

        let result = reducer(&mut state, Action::CardActivate);
        assert!(result.changed);
        assert_eq!(state.detail_id, Some(4));
        assert_eq!(state.flash_id, Some(4));
        assert_eq!(state.flash_ticks_remaining, FLASH_TICKS);
        // No sprite URL on the fixture, so nothing to fetch.
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_card_activate_fetches_uncached_sprite() {
        let mut state = loaded_state();
        state.catalog[0].sprite_url = Some("http://sprites/1.png".into());

        let result = reducer(&mut state, Action::CardActivate);
        assert!(matches!(
            &result.effects[..],
            [Effect::FetchSprite { id: 1, url }] if url == "http://sprites/1.png"
        ));
    }

    #[test]
    fn test_opening_second_panel_replaces_first() {
        let mut state = loaded_state();
        reducer(&mut state, Action::CardActivate);
        assert_eq!(state.detail_id, Some(1));

        reducer(&mut state, Action::GridSelect(3));
        reducer(&mut state, Action::CardActivate);
        assert_eq!(state.detail_id, Some(25));
    }

    #[test]
    fn test_detail_close_is_idempotent() {
        let mut state = loaded_state();
        assert!(!reducer(&mut state, Action::DetailClose).changed);

        reducer(&mut state, Action::CardActivate);
        assert!(reducer(&mut state, Action::DetailClose).changed);
        assert!(!reducer(&mut state, Action::DetailClose).changed);
    }

    #[test]
    fn test_flash_clears_after_its_ticks() {
        let mut state = loaded_state();
        reducer(&mut state, Action::CardActivate);
        assert!(state.flash_active(1));

        for _ in 0..FLASH_TICKS {
            assert!(reducer(&mut state, Action::Tick).changed);
        }
        assert!(state.flash_id.is_none());
        assert!(!state.flash_active(1));

        // Idle ticks do not force re-renders.
        assert!(!reducer(&mut state, Action::Tick).changed);
        // The detail panel is unaffected by the flash ending.
        assert_eq!(state.detail_id, Some(1));
    }

    #[test]
    fn test_notice_dismiss() {
        let mut state = loaded_state();
        reducer(&mut state, Action::SearchQuerySubmit("nothing".into()));
        assert!(state.notice.is_some());

        assert!(reducer(&mut state, Action::NoticeDismiss).changed);
        assert!(state.notice.is_none());
        assert!(!reducer(&mut state, Action::NoticeDismiss).changed);
    }
}
