//! Application-Layer: Controller, Events, Fehler und Resequencer.

pub mod controller;
pub mod error;
pub mod events;
pub mod resequencer;

pub use controller::{DragOutcome, ScrubRange, TimelineController};
pub use error::{EditError, SelectionRejection};
pub use events::TimelineEvent;
pub use resequencer::{EditSummary, PathCache, PathResequencer, select_chain};
