//! Catalog display - header, card grid body, and status bar footer

use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_dispatch::EventKind;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use super::{
    CardGrid, CardGridProps, Component, ACCENT_GOLD, ACCENT_TEAL, BG_BASE, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::AppState;
use ratatui::widgets::Borders;

/// Props for CatalogDisplay - read-only view of state
pub struct CatalogDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main catalog screen
pub struct CatalogDisplay {
    grid: CardGrid,
    status_bar: StatusBar,
}

impl Default for CatalogDisplay {
    fn default() -> Self {
        Self {
            grid: CardGrid::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl CatalogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for CatalogDisplay {
    type Props<'a> = CatalogDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        self.grid.handle_event(
            event,
            CardGridProps {
                state: props.state,
                is_focused: props.is_focused,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let base = Block::default().style(Style::default().bg(BG_BASE));
        frame.render_widget(base, area);

        let chunks = Layout::vertical([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Card grid
            Constraint::Length(3), // Status bar
        ])
        .split(area);

        render_header(frame, chunks[0], props.state);
        self.grid.render(
            frame,
            chunks[1],
            CardGridProps {
                state: props.state,
                is_focused: props.is_focused,
            },
        );
        render_footer(frame, chunks[2], props.state, &mut self.status_bar);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let filter = state.type_filter.as_deref().unwrap_or("all");
    let mut spans = vec![
        Span::styled(
            "DEXGRID",
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}/{} shown", state.view.len(), state.catalog.len()),
            Style::default().fg(TEXT_MAIN),
        ),
        Span::styled(format!("  type: {filter}"), Style::default().fg(TEXT_DIM)),
    ];
    if state.page_loading {
        spans.push(Span::styled(
            "  loading...",
            Style::default().fg(ACCENT_GOLD),
        ));
    }
    let header = Paragraph::new(Line::from(spans));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.page_loading {
            "Fetching creatures...".to_string()
        } else if state.types_loading {
            "Loading types...".to_string()
        } else {
            String::new()
        }
    });
    let hints = status_hints(state);
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_BASE),
            fg: Some(TEXT_DIM),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&hints).with_separator("  "),
        center: StatusBarSection::empty(),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.notice.is_some() {
        return vec![StatusBarHint::new("any key", "dismiss")];
    }
    if state.search_mode {
        return vec![
            StatusBarHint::new("Enter", "Search"),
            StatusBarHint::new("Esc", "Cancel"),
        ];
    }
    let mut hints = vec![
        StatusBarHint::new("m", "more"),
        StatusBarHint::new("/", "search"),
        StatusBarHint::new("[ ]", "type"),
    ];
    if state.reset_visible {
        hints.push(StatusBarHint::new("r", "reset"));
    }
    hints.extend([
        StatusBarHint::new("Enter", "info"),
        StatusBarHint::new("q", "quit"),
    ]);
    hints
}
