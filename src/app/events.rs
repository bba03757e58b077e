//! Timeline-Events für den Drag-Datenfluss.

use crate::core::ActionId;

/// Eingaben der Timeline-Anzeige ohne eigene Mutationslogik.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineEvent {
    /// Aktion angeklickt; `pointer_time` ist die Zeit unter dem Mauszeiger
    ActionSelected {
        action_id: ActionId,
        pointer_time: f32,
    },
    /// Aktion horizontal gezogen
    ActionDragged {
        action_id: ActionId,
        time_target: f32,
    },
    /// Drag beendet
    ActionDragEnded,
}
