use color_eyre::Result;
use ratatui::prelude::Rect;
use registration::HttpSubmitter;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    action::Action,
    core::app::SignupApp,
    core::effects::Effect,
    core::executor::TaskExecutor,
    core::reducer,
    tui::Tui,
};

/// The application event loop.
///
/// - Event polling (input + tick + render scheduling)
/// - Event -> Action dispatch
/// - Action -> reducer -> effects
/// - Rendering & resize handling
/// - Suspend/Resume lifecycle
///
/// Owns the TUI while borrowing the mutable app state.
pub struct AppLoop<'a> {
    app: &'a mut SignupApp,
    tui: Tui,
}

impl<'a> AppLoop<'a> {
    pub fn new(app: &'a mut SignupApp) -> Result<Self> {
        let tui = new_tui(app)?;
        Ok(Self { app, tui })
    }

    /// Run the event loop until the application requests quit.
    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let submitter = HttpSubmitter::new(&self.app.endpoint, &self.app.config.submit.user_agent)?;
        info!("Submitting registrations to {}", submitter.endpoint());
        let executor = TaskExecutor::new(submitter, action_tx.clone());

        self.tui.enter()?;

        let effects = reducer::startup(&mut self.app.state);
        run_effects(effects, &executor, &action_tx);

        loop {
            // 1. Input / system events -> Actions
            if let Some(ev) = self.tui.next_event().await {
                for action in self.app.handle_event(ev)? {
                    action_tx.send(action).ok();
                }
            }

            // 2. Consume actions
            while let Ok(action) = action_rx.try_recv() {
                match &action {
                    Action::Tick | Action::Render => {}
                    _ => debug!("{action}"),
                }

                match &action {
                    Action::Suspend => self.app.should_suspend = true,
                    Action::Resume => self.app.should_suspend = false,
                    Action::Error(msg) => error!("{msg}"),
                    Action::Resize(w, h) => {
                        self.tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.draw(&action_tx)?;
                    }
                    Action::Render => self.draw(&action_tx)?,
                    _ => {}
                }

                let effects = reducer::reduce(&mut self.app.state, action.clone());
                run_effects(effects, &executor, &action_tx);

                if let Some(next) = self.app.update(&action)? {
                    action_tx.send(next).ok();
                }
            }

            if self.app.state.quit_requested {
                self.app.should_quit = true;
            }

            // 3. Lifecycle: suspend / quit
            if self.app.should_suspend {
                self.tui.suspend()?;
                action_tx.send(Action::Resume).ok();
                self.tui = new_tui(self.app)?;
                self.tui.enter()?;
            } else if self.app.should_quit {
                self.tui.stop()?;
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    fn draw(&mut self, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.tui.draw(|f| {
            if let Err(err) = self.app.render(f) {
                action_tx
                    .send(Action::Error(format!("Failed to draw: {:?}", err)))
                    .ok();
            }
        })?;
        Ok(())
    }
}

fn new_tui(app: &SignupApp) -> Result<Tui> {
    Ok(Tui::new()?
        .tick_rate(app.config.tick_rate)
        .frame_rate(app.config.frame_rate)
        .paste(true))
}

/// Interpret reducer effects: log, spawn background work, arm timers.
fn run_effects(
    effects: Vec<Effect>,
    executor: &TaskExecutor,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    for eff in effects {
        match eff {
            Effect::None => {}
            Effect::Log(msg) => {
                info!("[effect] {msg}");
            }
            Effect::Async(task) => {
                info!("[effect] schedule async task: {task}");
                executor.spawn(task);
            }
            Effect::Schedule { after, action } => {
                debug!("[effect] {action} in {after:?}");
                let tx = action_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    tx.send(action).ok();
                });
            }
        }
    }
}
