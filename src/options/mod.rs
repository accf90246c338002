//! Notification requests and their mapping to the notifier vocabulary.

mod normalize;
mod request;

pub use normalize::*;
pub use request::*;
