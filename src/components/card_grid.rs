//! Card grid - one card per record of the current view

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::reducer::NO_RESULTS;
use crate::sprite;
use crate::state::AppState;

pub const CARD_WIDTH: u16 = 24;
pub const CARD_HEIGHT: u16 = 9;

const SPRITE_ROWS: u16 = 3;

/// Props for CardGrid - read-only view of state
pub struct CardGridProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct CardGrid {
    /// Column count of the last render; navigation uses it for row jumps.
    columns: usize,
    scroll_row: usize,
}

impl Default for CardGrid {
    fn default() -> Self {
        Self {
            columns: 1,
            scroll_row: 0,
        }
    }
}

impl CardGrid {
    pub fn new() -> Self {
        Self::default()
    }

    fn nav_target(&self, selected: usize, code: KeyCode) -> Option<usize> {
        let columns = self.columns.max(1);
        match code {
            KeyCode::Left => Some(selected.saturating_sub(1)),
            KeyCode::Right => Some(selected + 1),
            KeyCode::Up => Some(selected.saturating_sub(columns)),
            KeyCode::Down => Some(selected + columns),
            _ => None,
        }
    }
}

impl Component<Action> for CardGrid {
    type Props<'a> = CardGridProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let state = props.state;

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter => Some(Action::CardActivate),
                KeyCode::Char('m') => Some(Action::PageFetch),
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Char('[') => Some(Action::FilterPrev),
                KeyCode::Char(']') => Some(Action::FilterNext),
                // The reset control exists only while it is shown.
                KeyCode::Char('r') if state.reset_visible => Some(Action::ResetView),
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Esc => {
                    if state.detail_id.is_some() {
                        Some(Action::DetailClose)
                    } else {
                        Some(Action::Quit)
                    }
                }
                code => self
                    .nav_target(state.selected, code)
                    .map(Action::GridSelect),
            },
            EventKind::Scroll { delta, .. } => {
                let step = *delta as isize * self.columns.max(1) as isize;
                let target = (state.selected as isize + step).max(0) as usize;
                Some(Action::GridSelect(target))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        if state.view.is_empty() {
            let message = Paragraph::new(NO_RESULTS)
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM));
            frame.render_widget(message, area);
            return;
        }

        let columns = (area.width / CARD_WIDTH).max(1) as usize;
        self.columns = columns;
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let total_rows = state.view.len().div_ceil(columns);

        let selected_row = state.selected / columns;
        if selected_row < self.scroll_row {
            self.scroll_row = selected_row;
        } else if selected_row >= self.scroll_row + visible_rows {
            self.scroll_row = selected_row + 1 - visible_rows;
        }
        if self.scroll_row >= total_rows {
            self.scroll_row = total_rows.saturating_sub(1);
        }

        for (position, record) in state.view_records().enumerate() {
            let row = position / columns;
            if row < self.scroll_row || row >= self.scroll_row + visible_rows {
                continue;
            }
            let col = position % columns;
            let card_area = Rect {
                x: area.x + (col as u16) * CARD_WIDTH,
                y: area.y + ((row - self.scroll_row) as u16) * CARD_HEIGHT,
                width: CARD_WIDTH.min(area.width.saturating_sub((col as u16) * CARD_WIDTH)),
                height: CARD_HEIGHT.min(
                    area.height
                        .saturating_sub(((row - self.scroll_row) as u16) * CARD_HEIGHT),
                ),
            };
            if card_area.width < 4 || card_area.height < 4 {
                continue;
            }

            let is_selected = position == state.selected;
            let border_style = if state.flash_active(record.id) {
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)
            } else if is_selected && props.is_focused {
                Style::default().fg(ACCENT_TEAL)
            } else {
                Style::default().fg(TEXT_DIM)
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", record.padded_id()));
            let inner_width = card_area.width.saturating_sub(2);

            let mut lines = sprite_thumb(state, record.id, inner_width);
            lines.push(Line::styled(
                record.name.clone(),
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::styled(
                format!("ID: {}", record.padded_id()),
                Style::default().fg(TEXT_DIM),
            ));
            lines.push(Line::styled(
                record.joined_types(),
                Style::default().fg(ACCENT_TEAL),
            ));
            lines.push(Line::styled(
                "enter: info",
                Style::default().fg(if is_selected { ACCENT_GOLD } else { TEXT_DIM }),
            ));

            let card = Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(card, card_area);
        }
    }
}

/// Fixed-height sprite thumbnail; placeholder rows until the sprite lands.
fn sprite_thumb(state: &AppState, id: u16, width: u16) -> Vec<Line<'static>> {
    let mut lines = match state.sprite_cache.get(&id) {
        Some(sprite) => sprite::sprite_lines(sprite, width, SPRITE_ROWS),
        None => vec![Line::styled(
            "\u{00b7} \u{00b7} \u{00b7}",
            Style::default().fg(TEXT_DIM),
        )],
    };
    lines.truncate(SPRITE_ROWS as usize);
    while lines.len() < SPRITE_ROWS as usize {
        lines.insert(0, Line::from(Span::raw("")));
    }
    lines
}
