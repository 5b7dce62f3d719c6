use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Wrap},
};
use registration::Page;

use crate::{
    action::Action,
    components::Component,
    core::state::RootState,
    tui::{EventResponse, Frame},
};

pub const TERMS_TITLE: &str = "Terms and Conditions";

pub const TERMS_TEXT: &str = "\
1. Eligibility
You must be at least 18 years old and provide accurate, current information when registering.

2. Information we collect
Your full name, mobile number, email address and TradingView username are recorded together with the time of registration and the client you registered from.

3. How your information is used
Your details are used to manage your membership, to grant access to shared TradingView material and to contact you about the community. They are not sold to third parties.

4. No investment advice
Content shared in the community is for educational purposes only and does not constitute financial or investment advice. Trading involves risk; you are solely responsible for your decisions.

5. Conduct
Members are expected to treat each other with respect. Spam, solicitation and sharing of paid material without permission may lead to removal.

6. Changes
These terms may be updated from time to time. Continued participation after a change means you accept the updated terms.";

/// Full-screen terms view. Opening it always starts at the top.
#[derive(Default)]
pub struct TermsPage;

impl TermsPage {
    pub fn new() -> Self {
        Self
    }
}

impl Component for TermsPage {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &RootState,
    ) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('b') => {
                Some(Action::Navigate(Page::Form))
            }
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let [_, column, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(72),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [body, hints] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(column);

        let max_scroll = TERMS_TEXT.lines().count() as u16;
        let text = Text::from(
            TERMS_TEXT
                .lines()
                .map(|l| {
                    if l.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                        Line::from(Span::styled(
                            l.to_string(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ))
                    } else {
                        Line::raw(l.to_string())
                    }
                })
                .collect::<Vec<_>>(),
        );
        let para = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .scroll((state.terms_scroll.min(max_scroll), 0))
            .block(
                Block::bordered()
                    .title(format!(" {TERMS_TITLE} "))
                    .border_set(border::ROUNDED)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(para, body);

        let hint = Line::from(vec![
            Span::styled("↑/↓", Style::default().fg(Color::White)),
            Span::raw(": scroll   "),
            Span::styled("Esc", Style::default().fg(Color::White)),
            Span::raw(": back to form"),
        ])
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(hint), hints);
        Ok(())
    }
}
