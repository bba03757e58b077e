//! Zentrale Konfiguration der Pfad-Resegmentierung.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Grenzwerte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Pfade ───────────────────────────────────────────────────────────

/// Minimale brauchbare Pfadlänge (Längeneinheiten), Wert aus dem Host.
pub const PATH_LENGTH_MINIMUM: f32 = 1.5;

// ── Zeit ────────────────────────────────────────────────────────────

/// Toleranz, unter der eine Dauer-Änderung als Null gilt.
pub const DURATION_EPSILON: f32 = 0.005;
/// Mindestdauer, die der Host für neue Aktionen akzeptiert.
pub const CREATION_DURATION_FLOOR: f32 = 0.25;

// ── Timeline ────────────────────────────────────────────────────────

/// Geschätzte Dauer der Spitze einer gemalten Aktion auf der Timeline.
pub const PAINTED_ACTION_TIP_DURATION: f32 = 5.0 / 32.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Grenzwerte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Minimale brauchbare Pfadlänge eines Segments
    pub path_length_minimum: f32,
    /// Toleranz für "Dauer ist praktisch Null"
    pub duration_epsilon: f32,
    /// Mindestdauer neu angelegter Aktionen
    pub creation_duration_floor: f32,
    /// Breite der greifbaren Spitze einer Aktion auf der Timeline
    pub painted_action_tip_duration: f32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            path_length_minimum: PATH_LENGTH_MINIMUM,
            duration_epsilon: DURATION_EPSILON,
            creation_duration_floor: CREATION_DURATION_FLOOR,
            painted_action_tip_duration: PAINTED_ACTION_TIP_DURATION,
        }
    }
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Prüft, ob eine Dauer innerhalb der Toleranz bei `target` liegt.
    pub fn roughly_equal_duration(&self, value: f32, target: f32) -> bool {
        (value - target).abs() < self.duration_epsilon
    }
}
