//! Geteilte, layer-neutrale Bausteine.
//!
//! Enthält die Konfiguration und die reine Pfad-Geometrie, die sowohl von
//! `core` als auch von `app` genutzt werden.

pub mod options;
pub mod path_geometry;

pub use options::EngineOptions;
pub use path_geometry::{TrimWindow, TrimmedPath, path_length, trim_path};
