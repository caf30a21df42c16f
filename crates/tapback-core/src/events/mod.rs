//! Diagnostic events and the observers that receive them

mod observer;
mod reaction_event;

pub use observer::{CollectingObserver, NoopObserver, ReactionObserver};
pub use reaction_event::ReactionEvent;
