//! Reducer: actions in, session operations and effects out.
//!
//! Every user or system action is mapped here onto the session's
//! operations. The reducer performs no I/O of its own apart from the draft
//! cache writes the session does synchronously; anything that takes time
//! (the outbound POST, timers) is returned as an [`Effect`] for the loop.

use registration::{CONFIRMATION_DELAY, FieldId, Page, RESTORE_REVALIDATE_DELAY};
use tracing::debug;

use crate::action::Action;
use crate::core::effects::{Effect, TaskKind};
use crate::core::state::{FOCUS_ORDER, Focus, RootState};

/// Effects to run once, right after the state has been built: restore the
/// cached draft and re-validate it a moment later.
pub fn startup(state: &mut RootState) -> Vec<Effect> {
    if state.session.restore_draft() {
        vec![Effect::schedule(
            RESTORE_REVALIDATE_DELAY,
            Action::RevalidateRestored,
        )]
    } else {
        Vec::new()
    }
}

/// Reduce a single action into state transitions + effects.
///
/// Unhandled actions are ignored.
pub fn reduce(state: &mut RootState, action: Action) -> Vec<Effect> {
    match action {
        Action::Quit => {
            state.quit_requested = true;
        }
        Action::Resize(w, h) => {
            state.last_resize = Some((w, h));
        }
        Action::FocusNext => move_focus(state, 1),
        Action::FocusPrev => move_focus(state, FOCUS_ORDER.len() - 1),
        Action::Input(field, raw) => {
            if !state.session.confirmation_visible() {
                state.session.input(field, &raw);
            }
        }
        Action::ToggleTerms => {
            if !state.session.confirmation_visible() {
                state.session.toggle_terms();
            }
        }
        Action::Navigate(page) => {
            state.session.show_page(page);
            state.terms_scroll = 0;
        }
        Action::ScrollUp => {
            state.terms_scroll = state.terms_scroll.saturating_sub(1);
        }
        Action::ScrollDown => {
            if state.session.current_page() == Page::Terms {
                state.terms_scroll = state.terms_scroll.saturating_add(1);
            }
        }
        Action::Submit => {
            if let Some(payload) = state.session.begin_submission() {
                return vec![Effect::async_task(TaskKind::SubmitRegistration(payload))];
            }
        }
        Action::SubmissionSettled(result) => {
            let outcome = state.session.complete_submission(result.into_result());
            if outcome.is_success() {
                return vec![
                    Effect::log("Registration submitted"),
                    Effect::schedule(CONFIRMATION_DELAY, Action::ResetForm),
                ];
            }
            state.alert = state.session.take_alert();
        }
        Action::RevalidateRestored => {
            state.session.revalidate_restored();
        }
        Action::ResetForm => {
            state.session.reset_after_confirmation();
            state.focus_index = 0;
        }
        Action::ClosePopup => {
            state.alert = None;
        }
        _ => {}
    }

    Vec::new()
}

/// Leaving a text field validates it, like a blur.
fn move_focus(state: &mut RootState, step: usize) {
    if state.session.confirmation_visible() || state.session.current_page() != Page::Form {
        return;
    }
    if let Focus::Field(field) = state.focus() {
        if field != FieldId::Terms {
            state.session.blur(field);
        }
    }
    state.focus_index = (state.focus_index + step) % FOCUS_ORDER.len();
    debug!("Focus moved to {:?}", state.focus());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::TaskResultKind;
    use crate::core::state::initial_root_state;
    use pretty_assertions::assert_eq;
    use registration::{Feedback, MemoryStore, SUBMISSION_FAILED_ALERT, SubmitReceipt};

    fn root() -> RootState {
        initial_root_state(Box::new(MemoryStore::new()), "signup/test")
    }

    fn fill(rs: &mut RootState) {
        for (field, value) in [
            (FieldId::FullName, "Jane Doe"),
            (FieldId::MobileNumber, "9876543210"),
            (FieldId::EmailId, "jane@x.com"),
            (FieldId::TradingviewId, "jane_01"),
        ] {
            reduce(rs, Action::Input(field, value.into()));
        }
        reduce(rs, Action::ToggleTerms);
    }

    #[test]
    fn quit_sets_quit_requested() {
        let mut rs = root();
        assert!(!rs.quit_requested);
        reduce(&mut rs, Action::Quit);
        assert!(rs.quit_requested);
    }

    #[test]
    fn resize_updates_size() {
        let mut rs = root();
        reduce(&mut rs, Action::Resize(120, 40));
        assert_eq!(rs.last_resize, Some((120, 40)));
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut rs = root();
        reduce(&mut rs, Action::FocusPrev);
        assert_eq!(rs.focus(), Focus::Submit);
        reduce(&mut rs, Action::FocusNext);
        assert_eq!(rs.focus(), Focus::Field(FieldId::FullName));
    }

    #[test]
    fn leaving_a_field_validates_it() {
        let mut rs = root();
        rs.session.input(FieldId::FullName, "J");
        reduce(&mut rs, Action::FocusNext);
        assert!(rs.session.form().feedback(FieldId::FullName).is_error());
    }

    #[test]
    fn tabbing_past_unchecked_terms_shows_no_error() {
        let mut rs = root();
        rs.focus_index = 4;
        reduce(&mut rs, Action::FocusNext);
        assert_eq!(rs.session.form().feedback(FieldId::Terms), Feedback::Neutral);
    }

    #[test]
    fn navigate_resets_terms_scroll() {
        let mut rs = root();
        reduce(&mut rs, Action::Navigate(Page::Terms));
        reduce(&mut rs, Action::ScrollDown);
        reduce(&mut rs, Action::ScrollDown);
        assert_eq!(rs.terms_scroll, 2);
        reduce(&mut rs, Action::Navigate(Page::Form));
        assert_eq!(rs.session.current_page(), Page::Form);
        assert_eq!(rs.terms_scroll, 0);
    }

    #[test]
    fn invalid_submit_emits_no_task() {
        let mut rs = root();
        let effects = reduce(&mut rs, Action::Submit);
        assert!(effects.is_empty());
        assert!(rs.session.form().feedback(FieldId::Terms).is_error());
    }

    #[test]
    fn valid_submit_spawns_exactly_one_task() {
        let mut rs = root();
        fill(&mut rs);
        let effects = reduce(&mut rs, Action::Submit);
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::Async(TaskKind::SubmitRegistration(p)) if p.full_name == "Jane Doe"
        ));
        // a second press while in flight is swallowed
        assert!(reduce(&mut rs, Action::Submit).is_empty());
    }

    #[test]
    fn success_schedules_reset_after_confirmation_delay() {
        let mut rs = root();
        fill(&mut rs);
        reduce(&mut rs, Action::Submit);
        let effects = reduce(
            &mut rs,
            Action::SubmissionSettled(TaskResultKind::Submitted(SubmitReceipt {
                status: Some(200),
            })),
        );
        assert!(effects.contains(&Effect::schedule(CONFIRMATION_DELAY, Action::ResetForm)));
        assert!(rs.session.confirmation_visible());
        assert!(rs.session.cache().load().is_none());

        // typing is ignored while the confirmation is up
        reduce(&mut rs, Action::Input(FieldId::FullName, "x".into()));
        assert_eq!(rs.session.form().value(FieldId::FullName), "Jane Doe");

        reduce(&mut rs, Action::ResetForm);
        assert!(!rs.session.confirmation_visible());
        assert_eq!(rs.session.form().value(FieldId::FullName), "");
        assert_eq!(rs.focus_index, 0);
    }

    #[test]
    fn failure_opens_alert_and_keeps_draft() {
        let mut rs = root();
        fill(&mut rs);
        reduce(&mut rs, Action::Submit);
        let effects = reduce(
            &mut rs,
            Action::SubmissionSettled(TaskResultKind::SubmitFailed {
                error: "connection refused".into(),
            }),
        );
        assert!(effects.is_empty());
        assert_eq!(rs.alert.as_deref(), Some(SUBMISSION_FAILED_ALERT));
        assert!(rs.session.can_submit());
        assert_eq!(rs.session.cache().load().unwrap().email_id, "jane@x.com");

        reduce(&mut rs, Action::ClosePopup);
        assert_eq!(rs.alert, None);
    }

    #[test]
    fn startup_schedules_revalidation_only_with_a_draft() {
        let mut rs = root();
        assert!(startup(&mut rs).is_empty());

        let mut store = MemoryStore::new();
        registration::DraftStore::set(
            &mut store,
            registration::DRAFT_KEY,
            r#"{"fullName":"J","mobileNumber":"","emailId":"","tradingviewId":""}"#,
        )
        .unwrap();
        let mut rs = initial_root_state(Box::new(store), "signup/test");
        let effects = startup(&mut rs);
        assert_eq!(
            effects,
            vec![Effect::schedule(
                RESTORE_REVALIDATE_DELAY,
                Action::RevalidateRestored
            )]
        );
        assert_eq!(rs.session.form().feedback(FieldId::FullName), Feedback::Neutral);
        reduce(&mut rs, Action::RevalidateRestored);
        assert!(rs.session.form().feedback(FieldId::FullName).is_error());
    }
}
