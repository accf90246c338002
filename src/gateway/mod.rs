//! Subprocess gateway: runs the notifier executable and decodes its output.

mod process;
mod result;

pub use process::*;
pub use result::*;
