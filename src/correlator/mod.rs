//! Interaction correlation between notifier output and dispatches.

mod dispatch;
mod interaction;
mod signal;

pub use dispatch::*;
pub use interaction::*;
pub use signal::*;
