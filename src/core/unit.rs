//! Kampfeinheit, der die Aktionen einer Kette gehören.

/// ID einer Einheit
pub type UnitId = u64;

/// Einheit mit den für die Bearbeitung relevanten Eigenschaften
#[derive(Debug, Clone, PartialEq)]
pub struct CombatUnit {
    /// Einheiten-ID
    pub id: UnitId,
    /// Vom Spieler steuerbar
    pub player_controllable: bool,
    /// Gehört zur eigenen Seite
    pub friendly: bool,
    /// Aktuelle Bewegungsgeschwindigkeit (Längeneinheiten je Zeiteinheit)
    pub movement_speed: f32,
}

impl CombatUnit {
    /// Erstellt eine steuerbare, eigene Einheit
    pub fn friendly(id: UnitId, movement_speed: f32) -> Self {
        Self {
            id,
            player_controllable: true,
            friendly: true,
            movement_speed,
        }
    }
}
