use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::Action,
    components::Component,
    core::state::RootState,
    tui::{EventResponse, Frame},
};

use super::popup::{centered_rect_fixed, draw_popup_frame};

/// Modal alert showing `RootState::alert`.
///
/// Enter / Esc acknowledge it (`Action::ClosePopup`). Every other key is
/// swallowed so nothing reaches the form underneath while it is open.
pub struct AlertPopup {
    title: String,
    min_width: u16,
    min_height: u16,
}

impl AlertPopup {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            min_width: 60,
            min_height: 7,
        }
    }

    /// Set a minimum width for the popup dialog (default: 60).
    pub fn min_width(mut self, w: u16) -> Self {
        self.min_width = w.max(20);
        self
    }
}

impl Component for AlertPopup {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &RootState,
    ) -> Result<Option<EventResponse<Action>>> {
        if state.alert.is_none() {
            return Ok(None);
        }
        let response = match key.code {
            KeyCode::Enter | KeyCode::Esc => EventResponse::Stop(Action::ClosePopup),
            _ => EventResponse::Stop(Action::Render),
        };
        Ok(Some(response))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let Some(message) = state.alert.as_deref() else {
            return Ok(());
        };
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let dialog = centered_rect_fixed(area, self.min_width, self.min_height);
        let inner = draw_popup_frame(f, dialog, &self.title);

        let mut lines: Vec<Line> = message
            .lines()
            .map(|l| Line::from(Span::raw(l.to_string())))
            .collect();

        if inner.height >= 3 {
            lines.push(Line::raw(""));
        }

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::White)),
            Span::raw(": OK   "),
            Span::styled("Esc", Style::default().fg(Color::White)),
            Span::raw(": Close"),
        ])
        .fg(Color::DarkGray);
        lines.push(hint);

        let para = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        f.render_widget(para, inner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::initial_root_state;
    use crossterm::event::KeyModifiers;
    use registration::MemoryStore;

    #[test]
    fn enter_closes_only_when_open() {
        let mut popup = AlertPopup::new("Error");
        let mut rs = initial_root_state(Box::new(MemoryStore::new()), "signup/test");
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(popup.handle_key_events(enter, &rs).unwrap(), None);

        rs.alert = Some("boom".into());
        assert_eq!(
            popup.handle_key_events(enter, &rs).unwrap(),
            Some(EventResponse::Stop(Action::ClosePopup))
        );
        let typed = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(matches!(
            popup.handle_key_events(typed, &rs).unwrap(),
            Some(EventResponse::Stop(_))
        ));
    }
}
