//! Public notification entry point.

mod demo;
mod error;
mod events;
mod facade;

pub use demo::*;
pub use error::*;
pub use events::*;
pub use facade::*;
