//! Blocking notice - modal alert dismissed by any key

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::{Component, ACCENT_GOLD, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;

pub struct NoticeModalProps<'a> {
    pub message: &'a str,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct NoticeModal {
    modal: Modal,
}

impl NoticeModal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for NoticeModal {
    type Props<'a> = NoticeModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        // Blocking: any key dismisses, nothing else gets through.
        match event {
            EventKind::Key(_) => Some(Action::NoticeDismiss),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 5 {
            return;
        }

        let modal_area = centered_rect(44, 5, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let lines = vec![
                Line::styled(
                    props.message.to_string(),
                    Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
                ),
                Line::from(""),
                Line::styled("press any key", Style::default().fg(TEXT_DIM)),
            ];
            let body = Paragraph::new(lines)
                .alignment(ratatui::layout::Alignment::Center)
                .wrap(ratatui::widgets::Wrap { trim: true });
            frame.render_widget(body, content_area);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(45, 35, 35)),
                        padding: Padding::xy(1, 0),
                        border: None,
                        fg: Some(ACCENT_GOLD),
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::NoticeDismiss,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    #[test]
    fn test_any_key_dismisses() {
        let mut component = NoticeModal::new();
        for code in [KeyCode::Enter, KeyCode::Esc, KeyCode::Char('z')] {
            let actions: Vec<_> = component
                .handle_event(
                    &EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE)),
                    NoticeModalProps {
                        message: "nope",
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
            actions.assert_first(Action::NoticeDismiss);
        }
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut component = NoticeModal::new();
        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
                NoticeModalProps {
                    message: "nope",
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
