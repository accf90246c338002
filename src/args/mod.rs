//! Argument compiler for the notifier's command-line grammar.

mod compile;
mod value;

pub use compile::*;
pub use value::*;
