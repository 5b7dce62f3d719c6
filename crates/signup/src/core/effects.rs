/*!
Effect & task model.

The reducer never performs I/O. It describes what has to happen next as a
list of [`Effect`]s which the event loop interprets:

- `Async(TaskKind)` goes to the [`TaskExecutor`](crate::core::executor::TaskExecutor);
  its completion comes back as `Action::SubmissionSettled`.
- `Schedule` re-enters an action after a delay (restore re-validation,
  confirmation reset).
- `Log` is a plain info line.
*/

use std::fmt;
use std::time::Duration;

use registration::{RegistrationPayload, SubmitReceipt, TransportError};
use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Declarative instruction emitted by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Explicit "no effect" marker (can be filtered out easily).
    None,
    /// Spawn an asynchronous task (background work).
    Async(TaskKind),
    /// Feed `action` back into the loop once `after` has elapsed.
    Schedule { after: Duration, action: Action },
    /// Lightweight side-effect: log a message (info-level semantic).
    Log(String),
}

impl Effect {
    pub fn log<T: Into<String>>(msg: T) -> Self {
        Effect::Log(msg.into())
    }
    pub fn async_task(kind: TaskKind) -> Self {
        Effect::Async(kind)
    }
    pub fn schedule(after: Duration, action: Action) -> Self {
        Effect::Schedule { after, action }
    }
}

/// Asynchronous work units. Each variant carries everything needed to run it.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    /// POST the snapshot to the spreadsheet endpoint.
    SubmitRegistration(RegistrationPayload),
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::SubmitRegistration(p) => write!(f, "SubmitRegistration(email={})", p.email_id),
        }
    }
}

/// Results produced by the TaskExecutor for completion callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskResultKind {
    /// The request went out and some response came back.
    Submitted(SubmitReceipt),
    /// The request could not be delivered.
    SubmitFailed { error: String },
}

impl TaskResultKind {
    /// Back into the shape the session's submission pipeline expects.
    pub fn into_result(self) -> Result<SubmitReceipt, TransportError> {
        match self {
            TaskResultKind::Submitted(receipt) => Ok(receipt),
            TaskResultKind::SubmitFailed { error } => Err(TransportError::Other(error)),
        }
    }
}

impl From<Result<SubmitReceipt, TransportError>> for TaskResultKind {
    fn from(result: Result<SubmitReceipt, TransportError>) -> Self {
        match result {
            Ok(receipt) => TaskResultKind::Submitted(receipt),
            Err(e) => TaskResultKind::SubmitFailed {
                error: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_log_effect() {
        let e = Effect::log("hello");
        match e {
            Effect::Log(s) => assert_eq!(s, "hello"),
            _ => panic!("expected Log variant"),
        }
    }

    #[test]
    fn failed_task_result_maps_to_transport_error() {
        let kind: TaskResultKind = Err(TransportError::Other("refused".into())).into();
        assert_eq!(
            kind,
            TaskResultKind::SubmitFailed {
                error: "refused".into()
            }
        );
        assert!(matches!(
            kind.into_result(),
            Err(TransportError::Other(m)) if m == "refused"
        ));
    }

    #[test]
    fn receipt_survives_the_round_trip() {
        let kind: TaskResultKind = Ok(SubmitReceipt { status: Some(302) }).into();
        assert_eq!(kind.into_result().unwrap().status, Some(302));
    }
}
