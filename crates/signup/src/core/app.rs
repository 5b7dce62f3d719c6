use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use registration::Page;

use crate::{
    action::Action,
    components::{
        Component, alert::AlertPopup, confirmation::Confirmation,
        registration_form::RegistrationForm, terms::TermsPage,
    },
    config::Config,
    core::state::{RootState, draft_store, initial_root_state},
    tui::{Event, EventResponse},
};

/// Application shell: configuration, root state and the components that
/// draw it. Event routing goes popup > page > global keys.
pub struct SignupApp {
    pub config: Config,
    pub endpoint: String,
    pub state: RootState,
    pub should_quit: bool,
    pub should_suspend: bool,
    form: RegistrationForm,
    terms: TermsPage,
    confirmation: Confirmation,
    alert: AlertPopup,
}

impl SignupApp {
    pub fn new(config: Config, endpoint: Option<String>, no_cache: bool) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| config.submit.endpoint.clone());
        let state = initial_root_state(draft_store(&config, no_cache), &config.submit.user_agent);
        Self::with_state(config, endpoint, state)
    }

    pub fn with_state(config: Config, endpoint: String, state: RootState) -> Self {
        Self {
            config,
            endpoint,
            state,
            should_quit: false,
            should_suspend: false,
            form: RegistrationForm::new(),
            terms: TermsPage::new(),
            confirmation: Confirmation::new(),
            alert: AlertPopup::new("Registration").min_width(64),
        }
    }

    /// Translate one terminal event into the actions it triggers.
    pub fn handle_event(&mut self, event: Event) -> Result<Vec<Action>> {
        let mut actions = Vec::new();
        match event {
            Event::Tick => actions.push(Action::Tick),
            Event::Render => actions.push(Action::Render),
            Event::Resize(w, h) => actions.push(Action::Resize(w, h)),
            Event::Error => actions.push(Action::Error("Terminal input error".into())),
            Event::Key(key) => {
                if let Some(action) = global_key(key) {
                    actions.push(action);
                    return Ok(actions);
                }
                match self.route(Event::Key(key))? {
                    Some(EventResponse::Stop(a)) => actions.push(a),
                    Some(EventResponse::Continue(a)) => {
                        actions.push(a);
                        actions.extend(self.fallback_key(key));
                    }
                    None => actions.extend(self.fallback_key(key)),
                }
            }
            other => {
                if let Some(EventResponse::Stop(a) | EventResponse::Continue(a)) =
                    self.route(other)?
                {
                    actions.push(a);
                }
            }
        }
        Ok(actions)
    }

    fn route(&mut self, event: Event) -> Result<Option<EventResponse<Action>>> {
        if self.state.alert.is_some() {
            return self.alert.handle_events(event, &self.state);
        }
        match self.state.session.current_page() {
            Page::Form if self.state.session.confirmation_visible() => {
                self.confirmation.handle_events(event, &self.state)
            }
            Page::Form => self.form.handle_events(event, &self.state),
            Page::Terms => self.terms.handle_events(event, &self.state),
        }
    }

    /// Keys no component claimed.
    fn fallback_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc if self.state.session.current_page() == Page::Form => Some(Action::Quit),
            _ => None,
        }
    }

    /// Let components react to an action the reducer has applied.
    pub fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Some(next) = self.form.update(action, &self.state)? {
            return Ok(Some(next));
        }
        self.terms.update(action, &self.state)
    }

    pub fn render(&mut self, f: &mut Frame<'_>) -> Result<()> {
        let area = f.area();
        match self.state.session.current_page() {
            Page::Form if self.state.session.confirmation_visible() => {
                self.confirmation.draw(f, area, &self.state)?
            }
            Page::Form => self.form.draw(f, area, &self.state)?,
            Page::Terms => self.terms.draw(f, area, &self.state)?,
        }
        if self.state.alert.is_some() {
            self.alert.draw(f, area, &self.state)?;
        }
        Ok(())
    }
}

/// Keys that work everywhere, even over a popup.
fn global_key(key: KeyEvent) -> Option<Action> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('z') => Some(Action::Suspend),
        _ => None,
    }
}
