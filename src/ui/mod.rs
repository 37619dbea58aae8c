//! Terminal UI layer for interactive sessions.
//!
//! - [`chat_loop`]: the event loop that turns key presses and finished
//!   requests into app actions.
//! - [`renderer`]: frame composition.
//!
//! This layer presents and captures interaction state; [`crate::core`] owns
//! the session itself.

pub mod chat_loop;
pub mod renderer;
