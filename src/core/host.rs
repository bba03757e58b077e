//! Schnittstelle zum Aktions-Register des Hosts.
//!
//! Die Engine liest Aktionen und Einheiten nur über diesen Trait und
//! verändert sie ausschließlich über `update_movement`, `dispose_action` und
//! `create_path_action`.

use super::{ActionId, ActionTemplate, CombatUnit, Movement, MovementPath, UnitId};
use thiserror::Error;

/// Anfrage zum Anlegen einer neuen Lauf-Aktion
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePathAction {
    /// Besitzende Einheit
    pub owner: UnitId,
    /// Schlüssel der Aktions-Vorlage
    pub action_key: String,
    /// Startzeit der neuen Aktion
    pub start_time: f32,
    /// Dauer der neuen Aktion
    pub duration: f32,
    /// Pfad der neuen Aktion
    pub path: MovementPath,
}

/// Gründe, aus denen der Host eine neue Aktion ablehnt
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CreationRejected {
    /// Weniger als 2 Punkte oder keine Links
    #[error("Pfad ist degeneriert (weniger als 2 Punkte oder keine Links)")]
    DegeneratePath,
    /// Besitzende Einheit existiert nicht
    #[error("unbekannte Einheit: {0}")]
    UnknownOwner(UnitId),
    /// Vorlage existiert nicht
    #[error("unbekannte Aktions-Vorlage: {key}")]
    UnknownTemplate { key: String },
    /// Pfad kürzer als die Mindestlänge
    #[error("Pfad zu kurz: {length:.3}")]
    PathTooShort { length: f64 },
    /// Startzeit liegt am oder nach dem Ende der aktuellen Runde
    #[error("Startzeit {start_time} liegt nach Rundenende {turn_end}")]
    StartAfterTurnEnd { start_time: f32, turn_end: f32 },
    /// Auf die Runde geklemmte Dauer unter dem Minimum
    #[error("Dauer {duration} unter dem Minimum")]
    DurationBelowFloor { duration: f32 },
}

/// Vertrag des externen Aktions-Registers.
pub trait ActionHost {
    /// Aktion per ID
    fn movement(&self, id: ActionId) -> Option<&Movement>;

    /// Einheit per ID
    fn unit(&self, id: UnitId) -> Option<&CombatUnit>;

    /// Aktions-Vorlage per Schlüssel
    fn template(&self, key: &str) -> Option<&ActionTemplate>;

    /// Alle Aktionen einer Einheit in Einfügereihenfolge (inkl. entfernter)
    fn actions_of_owner(&self, owner: UnitId) -> Vec<ActionId>;

    /// Klemmt eine Zeit in das Intervall der aktuellen Runde
    fn clamp_time_in_current_turn(&self, time: f32) -> f32;

    /// Ersetzt Pfad, Startzeit und Dauer und markiert den Pfad als geändert
    fn update_movement(
        &mut self,
        id: ActionId,
        path: MovementPath,
        start_time: f32,
        duration: f32,
    ) -> bool;

    /// Entfernt eine Aktion aus dem Spiel
    fn dispose_action(&mut self, id: ActionId);

    /// Legt eine neue Lauf-Aktion an
    fn create_path_action(
        &mut self,
        request: &CreatePathAction,
    ) -> Result<ActionId, CreationRejected>;

    /// Meldet eine neu angelegte Aktion bei der Timeline-Anzeige an
    fn register_action(&mut self, id: ActionId);

    /// Länge je Zeiteinheit für eine Aktion: `speed * speed_scalar`.
    ///
    /// `None` wenn Einheit fehlt oder die Geschwindigkeit nicht positiv ist.
    fn speed_scale(&self, movement: &Movement) -> Option<f32> {
        let unit = self.unit(movement.owner)?;
        let scalar = self
            .template(&movement.action_key)
            .map_or(1.0, ActionTemplate::speed_scalar);
        let scale = unit.movement_speed * scalar;
        (scale > 0.0).then_some(scale)
    }

    /// Rechnet eine Pfadlänge in eine Dauer um
    fn length_to_duration(&self, movement: &Movement, length: f32) -> Option<f32> {
        self.speed_scale(movement).map(|scale| length / scale)
    }

    /// Rechnet eine Dauer in eine Pfadlänge um
    fn duration_to_length(&self, movement: &Movement, duration: f32) -> Option<f32> {
        self.speed_scale(movement).map(|scale| duration * scale)
    }
}
