/*!
Task executor.

Runs the reducer's `Effect::Async(TaskKind)` work off the UI loop:

1. The loop forwards each `TaskKind` to [`TaskExecutor::spawn`].
2. A single background worker (Tokio) pulls tasks in order and runs them
   against the configured [`Submitter`].
3. Completion goes back into the loop as `Action::SubmissionSettled`.

The worker never panics; a closed action channel only means the loop has
shut down. Pending tasks are dropped on shutdown.
*/

use std::sync::atomic::{AtomicU64, Ordering};

use registration::Submitter;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::action::Action;
use crate::core::effects::{TaskKind, TaskResultKind};

/// Monotonic task identifier type.
pub type TaskId = u64;

/// Public handle for scheduling background tasks.
///
/// Cloneable & cheap: internally only wraps an `mpsc::UnboundedSender`.
#[derive(Clone)]
pub struct TaskExecutor {
    tx: mpsc::UnboundedSender<Dispatch>,
}

/// Internal dispatch envelope.
struct Dispatch {
    id: TaskId,
    kind: TaskKind,
}

impl TaskExecutor {
    /// Create a new executor and spawn its worker loop.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new<T>(submitter: T, action_tx: mpsc::UnboundedSender<Action>) -> Self
    where
        T: Submitter + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<Dispatch>();
        let worker = Worker {
            rx,
            action_tx,
            submitter,
        };
        worker.spawn();
        Self { tx }
    }

    /// Schedule a new asynchronous task. Returns the allocated TaskId.
    pub fn spawn(&self, kind: TaskKind) -> TaskId {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        if let Err(e) = self.tx.send(Dispatch { id, kind }) {
            warn!("TaskExecutor channel closed; failed to schedule task: {}", e.0.kind);
        }
        id
    }
}

struct Worker<T> {
    rx: mpsc::UnboundedReceiver<Dispatch>,
    action_tx: mpsc::UnboundedSender<Action>,
    submitter: T,
}

impl<T> Worker<T>
where
    T: Submitter + Send + Sync + 'static,
{
    fn spawn(self) {
        let Worker {
            mut rx,
            action_tx,
            submitter,
        } = self;
        tokio::spawn(async move {
            while let Some(dispatch) = rx.recv().await {
                let action = handle(&submitter, dispatch).await;
                if action_tx.send(action).is_err() {
                    break;
                }
            }
            info!("TaskExecutor worker stopped (channel closed)");
        });
    }
}

async fn handle<T: Submitter>(submitter: &T, dispatch: Dispatch) -> Action {
    info!("[task:{}] started {}", dispatch.id, dispatch.kind);
    match dispatch.kind {
        TaskKind::SubmitRegistration(payload) => {
            let result = submitter.submit(&payload).await;
            match &result {
                Ok(receipt) => info!(
                    "[task:{}] registration dispatched (status {:?})",
                    dispatch.id, receipt.status
                ),
                Err(e) => warn!("[task:{}] registration not delivered: {e}", dispatch.id),
            }
            Action::SubmissionSettled(TaskResultKind::from(result))
        }
    }
}
