use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use registration::{Feedback, FieldId, Page};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler as _;

use crate::{
    action::Action,
    components::Component,
    core::state::{Focus, RootState},
    tui::{Event, EventResponse, Frame},
};

const COLUMN_WIDTH: u16 = 64;

/// The form view: four text inputs with live feedback, the terms checkbox,
/// the link to the terms page and the submit button.
///
/// Keeps a single `tui_input::Input` for the focused field; the session value
/// stays the source of truth and the input is re-synced whenever they differ
/// (the mobile filter, a restored draft, a reset).
pub struct RegistrationForm {
    input: Input,
    editing: Option<FieldId>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            editing: None,
        }
    }

    fn sync_input(&mut self, field: FieldId, value: &str) {
        if self.editing != Some(field) || self.input.value() != value {
            self.input = Input::new(value.to_string());
            self.editing = Some(field);
        }
    }

    /// Feed a terminal event to the focused field; an `Input` action comes
    /// back only if the text actually changed.
    fn edit(&mut self, field: FieldId, event: &CrosstermEvent, state: &RootState) -> Option<Action> {
        let current = state.session.form().value(field);
        self.sync_input(field, current);
        self.input.handle_event(event);
        (self.input.value() != current).then(|| Action::Input(field, self.input.value().to_string()))
    }

    fn render_header(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Registration",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Fill in your details to join. Your progress is saved as you type.",
                Style::default().fg(Color::Gray),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_text_field(&mut self, f: &mut Frame<'_>, area: Rect, field: FieldId, state: &RootState) {
        let [input_area, message_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);
        let focused = state.focus() == Focus::Field(field);
        let feedback = state.session.form().feedback(field);
        let value = state.session.form().value(field);

        let (indicator, border_style) = match feedback {
            Feedback::Valid => (" ✓", Style::default().fg(Color::Green)),
            Feedback::Error(_) => (" ✗", Style::default().fg(Color::Red)),
            Feedback::Neutral if focused => ("", Style::default().fg(Color::Cyan)),
            Feedback::Neutral => ("", Style::default().fg(Color::DarkGray)),
        };
        let title_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let title = Line::from(vec![
            Span::styled(format!("{} *", field.label()), title_style),
            Span::styled(indicator, border_style),
        ]);

        // keep 2 for borders and 1 for cursor
        let width = input_area.width.max(3) - 3;
        let (text, scroll) = if focused {
            self.sync_input(field, value);
            let scroll = self.input.visual_scroll(width as usize);
            (self.input.value().to_string(), scroll)
        } else {
            (value.to_string(), 0)
        };

        let input = Paragraph::new(text)
            .scroll((0, scroll as u16))
            .style(Style::default().fg(Color::White))
            .block(
                Block::bordered()
                    .title(title)
                    .border_set(border::ROUNDED)
                    .border_style(border_style),
            );
        f.render_widget(input, input_area);

        if focused {
            let x = self.input.visual_cursor().max(scroll) - scroll + 1;
            f.set_cursor_position((input_area.x + x as u16, input_area.y + 1));
        }

        if let Some(message) = feedback.message() {
            f.render_widget(
                Paragraph::new(message).style(Style::default().fg(Color::Red)),
                message_area,
            );
        }
    }

    fn render_terms(&self, f: &mut Frame<'_>, area: Rect, state: &RootState) {
        let [checkbox_area, message_area, link_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let checked = state.session.form().terms_accepted();
        let style = focus_style(state.focus() == Focus::Field(FieldId::Terms));
        let checkbox = Line::from(vec![
            Span::styled(if checked { "[x] " } else { "[ ] " }, style),
            Span::styled(FieldId::Terms.label(), style),
        ]);
        f.render_widget(Paragraph::new(checkbox), checkbox_area);

        if let Some(message) = state.session.form().feedback(FieldId::Terms).message() {
            f.render_widget(
                Paragraph::new(message).style(Style::default().fg(Color::Red)),
                message_area,
            );
        }

        let link_style = focus_style(state.focus() == Focus::TermsLink)
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED);
        f.render_widget(
            Paragraph::new(Span::styled("Read the terms and conditions", link_style)),
            link_area,
        );
    }

    fn render_submit(&self, f: &mut Frame<'_>, area: Rect, state: &RootState) {
        let enabled = state.session.can_submit();
        let focused = state.focus() == Focus::Submit;
        let style = match (enabled, focused) {
            (true, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::Gray).add_modifier(Modifier::REVERSED),
            (false, false) => Style::default().fg(Color::DarkGray),
        };
        let button = Paragraph::new(state.session.submit_label())
            .centered()
            .style(style)
            .block(
                Block::bordered()
                    .border_set(border::ROUNDED)
                    .border_style(style),
            );
        f.render_widget(button, area);
    }

    fn render_hints(&self, f: &mut Frame<'_>, area: Rect) {
        let hint = Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::White)),
            Span::raw(": next   "),
            Span::styled("Shift+Tab", Style::default().fg(Color::White)),
            Span::raw(": previous   "),
            Span::styled("Space", Style::default().fg(Color::White)),
            Span::raw(": toggle   "),
            Span::styled("Esc", Style::default().fg(Color::White)),
            Span::raw(": quit"),
        ])
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(hint), area);
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

impl Component for RegistrationForm {
    fn handle_events(
        &mut self,
        event: Event,
        state: &RootState,
    ) -> Result<Option<EventResponse<Action>>> {
        match event {
            Event::Key(key) => self.handle_key_events(key, state),
            Event::Paste(text) => {
                let Some(field) = state.focused_text_field() else {
                    return Ok(None);
                };
                if state.session.confirmation_visible() {
                    return Ok(None);
                }
                // tui-input has no paste support; append at the end
                let mut value = state.session.form().value(field).to_string();
                value.push_str(text.trim_end_matches(['\r', '\n']));
                Ok(Some(EventResponse::Stop(Action::Input(field, value))))
            }
            _ => Ok(None),
        }
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &RootState,
    ) -> Result<Option<EventResponse<Action>>> {
        if state.session.confirmation_visible() {
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Tab | KeyCode::Down => Some(Action::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPrev),
            _ => match state.focus() {
                Focus::Field(FieldId::Terms) => match key.code {
                    KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ToggleTerms),
                    _ => None,
                },
                Focus::Field(field) => match key.code {
                    KeyCode::Enter => Some(Action::FocusNext),
                    _ if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                    _ => self.edit(field, &CrosstermEvent::Key(key), state),
                },
                Focus::TermsLink => match key.code {
                    KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Navigate(Page::Terms)),
                    _ => None,
                },
                // a disabled button does not react
                Focus::Submit => match key.code {
                    KeyCode::Char(' ') | KeyCode::Enter if state.session.can_submit() => {
                        Some(Action::Submit)
                    }
                    _ => None,
                },
            },
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn update(&mut self, action: &Action, _state: &RootState) -> Result<Option<Action>> {
        if matches!(action, Action::ResetForm) {
            self.editing = None;
            self.input = Input::default();
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let [_, column, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(COLUMN_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(area);

        let [
            header,
            _,
            full_name,
            mobile,
            email,
            tradingview,
            terms,
            _,
            submit,
            hints,
        ] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(column);

        self.render_header(f, header);
        for (field, field_area) in FieldId::TEXT_FIELDS
            .into_iter()
            .zip([full_name, mobile, email, tradingview])
        {
            self.render_text_field(f, field_area, field, state);
        }
        self.render_terms(f, terms, state);
        self.render_submit(f, submit, state);
        self.render_hints(f, hints);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reducer::reduce;
    use crate::core::state::initial_root_state;
    use pretty_assertions::assert_eq;
    use registration::MemoryStore;

    fn root() -> RootState {
        initial_root_state(Box::new(MemoryStore::new()), "signup/test")
    }

    fn press(form: &mut RegistrationForm, rs: &mut RootState, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(EventResponse::Stop(action)) = form.handle_key_events(key, rs).unwrap() {
            reduce(rs, action);
        }
    }

    #[test]
    fn typing_goes_through_the_session() {
        let mut form = RegistrationForm::new();
        let mut rs = root();
        for c in "Jane".chars() {
            press(&mut form, &mut rs, KeyCode::Char(c));
        }
        assert_eq!(rs.session.form().value(FieldId::FullName), "Jane");
        press(&mut form, &mut rs, KeyCode::Backspace);
        assert_eq!(rs.session.form().value(FieldId::FullName), "Jan");
    }

    #[test]
    fn mobile_field_drops_non_digits() {
        let mut form = RegistrationForm::new();
        let mut rs = root();
        press(&mut form, &mut rs, KeyCode::Tab);
        for c in "98a7-6".chars() {
            press(&mut form, &mut rs, KeyCode::Char(c));
        }
        assert_eq!(rs.session.form().value(FieldId::MobileNumber), "9876");
    }

    #[test]
    fn space_toggles_terms_and_link_opens_terms_page() {
        let mut form = RegistrationForm::new();
        let mut rs = root();
        rs.focus_index = 4;
        press(&mut form, &mut rs, KeyCode::Char(' '));
        assert!(rs.session.form().terms_accepted());
        press(&mut form, &mut rs, KeyCode::Tab);
        press(&mut form, &mut rs, KeyCode::Enter);
        assert_eq!(rs.session.current_page(), Page::Terms);
    }

    #[test]
    fn paste_appends_to_focused_field() {
        let mut form = RegistrationForm::new();
        let mut rs = root();
        rs.session.input(FieldId::FullName, "Jane");
        let response = form
            .handle_events(Event::Paste(" Doe\n".into()), &rs)
            .unwrap();
        assert_eq!(
            response,
            Some(EventResponse::Stop(Action::Input(
                FieldId::FullName,
                "Jane Doe".into()
            )))
        );
        rs.focus_index = 4;
        assert_eq!(form.handle_events(Event::Paste("x".into()), &rs).unwrap(), None);
    }

    #[test]
    fn disabled_submit_ignores_enter() {
        let mut form = RegistrationForm::new();
        let mut rs = root();
        rs.focus_index = 6;
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(form.handle_key_events(key, &rs).unwrap(), None);
    }
}
