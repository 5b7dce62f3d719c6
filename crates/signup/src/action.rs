use registration::{FieldId, Page};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::effects::TaskResultKind;

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    FocusNext,
    FocusPrev,
    /// New raw content of a text field, as typed
    Input(FieldId, String),
    ToggleTerms,
    Navigate(Page),
    ScrollUp,
    ScrollDown,
    Submit,
    /// Delivered by the executor once the outbound call has settled
    SubmissionSettled(TaskResultKind),
    /// Fired once after startup when a draft was restored
    RevalidateRestored,
    /// Fired when the confirmation view has been shown long enough
    ResetForm,
    ClosePopup,
}
