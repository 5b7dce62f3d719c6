use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{action::Action, core::state::RootState, tui::Event, tui::EventResponse};

pub mod alert;
pub mod confirmation;
pub mod popup;
pub mod registration_form;
pub mod terms;

/// `Component` is a trait that represents a visual and interactive element of the user interface.
///
/// Components read the root state but never write it: interaction is turned
/// into [`Action`]s which the reducer applies.
pub trait Component {
    fn handle_events(
        &mut self,
        event: Event,
        state: &RootState,
    ) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event, state)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(
        &mut self,
        _key: KeyEvent,
        _state: &RootState,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    /// React to an action after the reducer has applied it.
    fn update(&mut self, _action: &Action, _state: &RootState) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()>;
}
