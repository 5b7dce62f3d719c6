use color_eyre::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use crate::{
    components::Component, components::popup::centered_rect_fixed, core::state::RootState,
    tui::Frame,
};

/// Success view shown in place of the form until the confirmation delay ends.
#[derive(Default)]
pub struct Confirmation;

impl Confirmation {
    pub fn new() -> Self {
        Self
    }
}

impl Component for Confirmation {
    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &RootState) -> Result<()> {
        let dialog = centered_rect_fixed(area, 64, 8);
        let lines = vec![
            Line::from(Span::styled(
                "Registration successful!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::raw("Thank you for registering. Your details have been sent."),
            Line::raw(""),
            Line::from(Span::styled(
                "The form will be ready for a new registration in a moment.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let para = Paragraph::new(lines)
            .centered()
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_set(border::ROUNDED)
                    .border_style(Style::default().fg(Color::Green)),
            );
        f.render_widget(para, dialog);
        Ok(())
    }
}
