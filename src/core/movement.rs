//! Bewegungs-Aktion auf der Timeline und ihre Aktions-Vorlage.

use super::{MovementPath, UnitId};
use serde::{Deserialize, Serialize};

/// ID einer Aktion im Host-Register
pub type ActionId = u64;

/// Spur einer Aktion auf der Timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackType {
    /// Normale Positions-Aktion (Laufen)
    #[default]
    Primary,
    /// Doppelspur-Aktion (Dash, Nahkampf), nicht positionsbasiert editierbar
    Double,
}

/// Bewegungsdaten einer Aktions-Vorlage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementData {
    /// Multiplikator auf die Bewegungsgeschwindigkeit der Einheit
    pub speed_scalar: f32,
}

/// Vorlage, aus der der Host neue Aktionen instanziiert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTemplate {
    /// Schlüssel der Vorlage
    pub key: String,
    /// Spur der instanziierten Aktionen
    pub track: TrackType,
    /// Bewegungsdaten (fehlt bei Nicht-Bewegungs-Aktionen)
    pub movement: Option<MovementData>,
}

impl ActionTemplate {
    /// Erstellt eine Lauf-Vorlage mit Geschwindigkeits-Multiplikator
    pub fn movement(key: impl Into<String>, speed_scalar: f32) -> Self {
        Self {
            key: key.into(),
            track: TrackType::Primary,
            movement: Some(MovementData { speed_scalar }),
        }
    }

    /// Geschwindigkeits-Multiplikator (1.0 ohne Bewegungsdaten)
    pub fn speed_scalar(&self) -> f32 {
        self.movement.map_or(1.0, |m| m.speed_scalar)
    }
}

/// Eine geplante Aktion einer Einheit.
///
/// Gehört dem Host; die Engine ersetzt nur Pfad, Dauer und Startzeit.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    /// Aktions-ID (vom Register vergeben)
    pub id: ActionId,
    /// Besitzende Einheit
    pub owner: UnitId,
    /// Schlüssel der Aktions-Vorlage
    pub action_key: String,
    /// Startzeit auf der Timeline
    pub start_time: f32,
    /// Dauer
    pub duration: f32,
    /// Bewegungspfad (nur bei Lauf-Aktionen)
    pub path: Option<MovementPath>,
    /// Spur der Aktion
    pub track: TrackType,
    /// Aus dem Spiel entfernt
    pub disposed: bool,
    /// Bereits ausgeführt
    pub completed: bool,
    /// Pfad wurde geändert, Folgesysteme müssen neu berechnen
    pub path_changed: bool,
}

impl Movement {
    /// Erstellt eine Lauf-Aktion (ID wird beim Einfügen ins Register vergeben)
    pub fn new(
        owner: UnitId,
        action_key: impl Into<String>,
        start_time: f32,
        duration: f32,
        path: MovementPath,
    ) -> Self {
        Self {
            id: 0,
            owner,
            action_key: action_key.into(),
            start_time,
            duration,
            path: Some(path),
            track: TrackType::Primary,
            disposed: false,
            completed: false,
            path_changed: false,
        }
    }

    /// Endzeit der Aktion
    pub fn end_time(&self) -> f32 {
        self.start_time + self.duration
    }

    /// Quantisierte Länge des aktuellen Pfads (0 ohne Pfad)
    pub fn path_length(&self) -> f64 {
        self.path.as_ref().map_or(0.0, MovementPath::length)
    }

    /// Einzeilige Zusammenfassung für Trace-Logs
    pub fn describe(&self) -> String {
        let (points, links) = self
            .path
            .as_ref()
            .map_or((0, 0), |p| (p.points.len(), p.links.len()));
        format!(
            "{{{};{};{:?};start={};duration={};length={:.3};points={};links={}}}",
            self.id,
            self.action_key,
            self.track,
            self.start_time,
            self.duration,
            self.path_length(),
            points,
            links,
        )
    }
}
