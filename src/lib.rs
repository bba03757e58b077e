//! Edit Run Action Library.
//! Resegmentierung von Lauf-Ketten auf der Timeline, als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    DragOutcome, EditError, EditSummary, PathResequencer, SelectionRejection, TimelineController,
    TimelineEvent, select_chain,
};
pub use crate::core::{
    ActionHost, ActionId, ActionRegistry, ActionTemplate, CombatUnit, CreatePathAction,
    CreationRejected, LinkKind, Movement, MovementPath, PathLink, TrackType, UnitId,
};
pub use shared::{EngineOptions, TrimWindow, TrimmedPath, path_length, trim_path};
