//! Detail panel - slide-in side panel for one record

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tui_dispatch::EventKind;

use super::{Component, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::sprite;
use crate::state::AppState;

pub const DETAIL_PANEL_WIDTH: u16 = 32;

const SPRITE_ROWS: u16 = 8;

/// Props for DetailPanel - read-only view of state
pub struct DetailPanelProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct DetailPanel;

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if props.state.detail_id.is_none() {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('x') => Some(Action::DetailClose),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(record) = props.state.detail_record() else {
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT_TEAL))
            .style(Style::default().bg(BG_PANEL))
            .title(format!(" {} ", record.name))
            .title_bottom(" x close ");

        let dim = Style::default().fg(TEXT_DIM);
        let main = Style::default().fg(TEXT_MAIN);

        let mut lines = vec![
            Line::styled(format!("ID: {}", record.padded_id()), main),
            Line::styled(format!("Type: {}", record.joined_types()), main),
            Line::styled(format!("Height: {} decimetres", record.height), main),
            Line::styled(format!("Weight: {} hectograms", record.weight), main),
            Line::from(""),
            Line::styled(
                "Stats:",
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            ),
        ];
        for stat in &record.stats {
            lines.push(Line::styled(format!("  {}: {}", stat.name, stat.base), dim));
        }
        lines.push(Line::from(""));

        let inner_width = area.width.saturating_sub(2);
        match props.state.sprite_cache.get(&record.id) {
            Some(sprite) => lines.extend(sprite::sprite_lines(sprite, inner_width, SPRITE_ROWS)),
            None => lines.push(Line::styled("(sprite loading)", dim)),
        }

        let panel = Paragraph::new(lines).block(block);
        frame.render_widget(panel, area);
    }
}
