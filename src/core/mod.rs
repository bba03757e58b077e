//! Core-Domänentypen: Pfade, Bewegungs-Aktionen, Einheiten und Aktionsregister.

pub mod host;
pub mod movement;
/// Bewegungspfade
///
/// - MovementPath: Punktfolge mit Links zwischen den Punkten
/// - PathLink: Annotation einer einzelnen Strecke
pub mod path;
pub mod registry;
pub mod unit;

pub use host::{ActionHost, CreatePathAction, CreationRejected};
pub use movement::{ActionId, ActionTemplate, Movement, MovementData, TrackType};
pub use path::{LinkKind, MovementPath, PathLink};
pub use registry::ActionRegistry;
pub use unit::{CombatUnit, UnitId};
