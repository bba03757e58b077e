//! Fehler der Ketten-Auswahl und der Resegmentierung.

use crate::core::{ActionId, UnitId};
use thiserror::Error;

/// Gründe, aus denen keine bearbeitbare Kette gebildet werden kann.
///
/// Der Drag fällt in diesem Fall auf das Standardverhalten des Hosts zurück.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionRejection {
    /// Aktion existiert nicht
    #[error("unbekannte Aktion: {0}")]
    UnknownAction(ActionId),
    /// Besitzende Einheit existiert nicht
    #[error("Einheit {0} der Aktion nicht gefunden")]
    NoOwner(UnitId),
    /// Einheit ist nicht vom Spieler steuerbar
    #[error("Einheit {0} ist nicht steuerbar")]
    NotControllable(UnitId),
    /// Einheit gehört nicht zur eigenen Seite
    #[error("Einheit {0} ist nicht freundlich")]
    NotFriendly(UnitId),
    /// Nach der gewählten Aktion folgt eine Doppelspur-Aktion
    #[error("Doppelspur-Aktion nach der gewählten Aktion: {action_key}")]
    DoubleTrack { action_key: String },
    /// Keine gültige Bewegungs-Aktion übrig
    #[error("keine gültigen Bewegungs-Aktionen für Einheit {0}")]
    NoMovements(UnitId),
}

/// Gründe, aus denen eine Dauer-Änderung nichts verändert.
///
/// In allen Fällen bleiben die Aktionen unverändert.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// Kette ist nicht (mehr) gültig
    #[error(transparent)]
    Rejected(#[from] SelectionRejection),
    /// Kein Cache aufgebaut
    #[error("keine Kette gecacht")]
    EmptyCache,
    /// Kette passt nicht mehr zum Cache (neue Auswahl nötig)
    #[error("Kette passt nicht zum Cache: {chain} Aktionen, {cached} gecacht")]
    StaleCache { chain: usize, cached: usize },
    /// Dauer-Änderung ist praktisch Null
    #[error("Dauer-Änderung ist praktisch Null")]
    DurationUnchanged,
    /// Neue Gesamtdauer wäre null oder negativ
    #[error("Gesamtdauer nicht positiv: {total:.3}")]
    TotalNotPositive { total: f32 },
    /// Änderung verlangt mehr Dauer, als die gecachte Kette hergibt
    #[error("Kette zu kurz: Restdauer {remaining:.3} nicht verteilbar")]
    BeyondCachedChain { remaining: f32 },
    /// Einheit ohne (positive) Bewegungsgeschwindigkeit
    #[error("keine Bewegungsgeschwindigkeit für Aktion {0}")]
    NoMovementSpeed(ActionId),
    /// Verkürzen, obwohl das erste Segment bereits minimal ist
    #[error("Pfad bereits minimal: {length:.3}")]
    PathAtMinimum { length: f64 },
    /// Erstes Segment wäre kürzer als die Mindestlänge
    #[error("Segment zu kurz: {length:.3}")]
    DegenerateTrim { length: f32 },
}
