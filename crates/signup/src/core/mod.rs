//! Core of the terminal front end.
//!
//! - `state`    : `RootState`, the session plus terminal-only view state
//! - `reducer`  : actions -> session operations + effects
//! - `effects`  : declarative side effects and background task kinds
//! - `executor` : runs background tasks, posts completions back as actions
//! - `app`      : components and event routing
//! - `loop`     : the event loop that ties it all together
pub mod app;
pub mod effects;
pub mod executor;
pub mod r#loop;
pub mod reducer;
pub mod state;
