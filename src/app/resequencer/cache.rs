//! Session-Cache: zusammengefügter Referenzpfad und Dauer-Tabelle einer Kette.

use crate::core::{ActionHost, ActionId, PathLink};
use crate::shared::path_length;
use glam::Vec3;

/// Eintrag je gecachter Aktion
#[derive(Debug, Clone, PartialEq)]
pub struct CachedMovement {
    /// Schlüssel der Aktions-Vorlage (für neu anzulegende Segmente)
    pub key: String,
    /// Aktions-ID (nach Neuanlage aktualisiert)
    pub id: ActionId,
    /// Startzeit beim Cachen
    pub start_time: f32,
    /// Dauer beim Cachen
    pub duration: f32,
}

/// Referenzpfad der ganzen Kette.
///
/// Aufeinanderfolgende Pfade teilen ihren Verbindungspunkt; der doppelte
/// Punkt wird beim Zusammenfügen entfernt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathCache {
    /// Aktionen der Kette in Reihenfolge
    pub info: Vec<CachedMovement>,
    /// Zusammengefügte Punkte
    pub points: Vec<Vec3>,
    /// Zusammengefügte Links
    pub links: Vec<PathLink>,
    /// Quantisierte Gesamtlänge
    pub total_length: f32,
    /// Summe der Dauern
    pub total_duration: f32,
}

impl PathCache {
    /// Leert den Cache
    pub fn clear(&mut self) {
        self.info.clear();
        self.points.clear();
        self.links.clear();
        self.total_length = 0.0;
        self.total_duration = 0.0;
    }

    /// true solange keine Kette gecacht ist
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    /// Gecachte Dauer des Segments `index`
    pub fn duration_at(&self, index: usize) -> Option<f32> {
        self.info.get(index).map(|c| c.duration)
    }

    /// Baut den Cache aus der (sortierten) Kette neu auf
    pub fn rebuild<H: ActionHost>(&mut self, host: &H, chain: &[ActionId]) {
        self.clear();

        for movement in chain.iter().filter_map(|&id| host.movement(id)) {
            self.info.push(CachedMovement {
                key: movement.action_key.clone(),
                id: movement.id,
                start_time: movement.start_time,
                duration: movement.duration,
            });

            let Some(path) = movement.path.as_ref() else {
                continue;
            };
            if !self.points.is_empty() {
                // Verbindungspunkt: letzter Punkt des Vorgängers = erster Punkt des Nachfolgers
                self.points.pop();
            }
            log::debug!(
                "Cache: Pfad hinzugefügt {} ({} Punkte, {} Links)",
                movement.describe(),
                path.points.len(),
                path.links.len()
            );
            self.points.extend_from_slice(&path.points);
            self.links.extend_from_slice(&path.links);
        }

        self.total_length = path_length(&self.points) as f32;
        self.total_duration = self.info.iter().map(|c| c.duration).sum();

        log::debug!(
            "Cache: {} Aktionen, {} Punkte, {} Links, Länge {:.3}, Dauer {:.3}",
            self.info.len(),
            self.points.len(),
            self.links.len(),
            self.total_length,
            self.total_duration
        );
    }
}
