//! Render snapshot tests using RenderHarness

use dexgrid::{
    components::{
        CatalogDisplay, CatalogDisplayProps, Component, DetailPanel, DetailPanelProps,
        NoticeModal, NoticeModalProps, DETAIL_PANEL_WIDTH,
    },
    reducer::{reducer, NO_MATCH_NOTICE, NO_RESULTS},
    state::{AppState, Record, StatEntry},
};
use tui_dispatch::testing::*;

fn record(id: u16, name: &str, types: &[&str]) -> Record {
    Record {
        id,
        name: name.into(),
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: vec![StatEntry {
            name: "speed".into(),
            base: 90,
        }],
        sprite_url: None,
        height: 4,
        weight: 60,
    }
}

fn loaded_state() -> AppState {
    let mut state = AppState::default();
    reducer(
        &mut state,
        dexgrid::action::Action::PageDidLoad(vec![
            record(1, "bulbasaur", &["grass", "poison"]),
            record(4, "charmander", &["fire"]),
            record(25, "pikachu", &["electric"]),
        ]),
    );
    state
}

#[test]
fn test_render_catalog_cards() {
    let mut render = RenderHarness::new(80, 30);
    let mut component = CatalogDisplay::new();
    let state = loaded_state();

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("bulbasaur"), "Should show card names");
    assert!(output.contains("ID: 001"), "Should show padded ids");
    assert!(output.contains("ID: 025"), "Should show padded ids");
    assert!(
        output.contains("grass, poison"),
        "Should show joined type names"
    );
    assert!(output.contains("3/3 shown"), "Should show view counts");
}

#[test]
fn test_render_empty_filter_result() {
    let mut render = RenderHarness::new(80, 30);
    let mut component = CatalogDisplay::new();
    let mut state = loaded_state();
    state.type_options = vec!["dragon".into()];
    reducer(&mut state, dexgrid::action::Action::FilterNext);

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains(NO_RESULTS), "Should show empty message");
    assert!(output.contains("type: dragon"), "Should show active filter");
    assert!(output.contains("reset"), "Should show reset hint");
}

#[test]
fn test_render_status_bar_hints() {
    let mut render = RenderHarness::new(80, 30);
    let mut component = CatalogDisplay::new();
    let state = loaded_state();

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("more"), "Should show load-more hint");
    assert!(output.contains("search"), "Should show search hint");
    assert!(output.contains("quit"), "Should show quit hint");
    assert!(!output.contains("reset"), "Reset hidden on the default view");
}

#[test]
fn test_render_error_message_in_footer() {
    let mut render = RenderHarness::new(80, 30);
    let mut component = CatalogDisplay::new();
    let mut state = loaded_state();
    reducer(
        &mut state,
        dexgrid::action::Action::PageDidError("timed out".into()),
    );

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(
        output.contains("Page load error: timed out"),
        "Should surface the fetch error"
    );
}

#[test]
fn test_render_detail_panel() {
    let mut render = RenderHarness::new(DETAIL_PANEL_WIDTH, 24);
    let mut component = DetailPanel;
    let mut state = loaded_state();
    state.detail_id = Some(4);

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("charmander"), "Should show record name");
    assert!(output.contains("ID: 004"), "Should show padded id");
    assert!(output.contains("Type: fire"), "Should show type line");
    assert!(output.contains("speed: 90"), "Should list stats");
}

#[test]
fn test_render_no_match_notice() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = NoticeModal::new();
    let mut state = loaded_state();
    reducer(
        &mut state,
        dexgrid::action::Action::SearchQuerySubmit("mewtwo".into()),
    );
    let message = state.notice.as_deref().expect("notice should be raised");
    assert_eq!(message, NO_MATCH_NOTICE);

    let output = render.render_to_string_plain(|frame| {
        let props = NoticeModalProps {
            message,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("matched"), "Should show the notice text");
    assert!(output.contains("press any key"), "Should show dismiss hint");
}
