//! Bewegungspfad: Punktfolge plus Navigations-Links zwischen den Punkten.

use crate::shared::path_geometry::path_length;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Art eines Navigations-Links (vom Host vergeben, hier nur durchgereicht)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkKind {
    /// Ebene Bewegung
    #[default]
    Horizontal,
    /// Sprung nach oben
    JumpUp,
    /// Sprung nach unten
    JumpDown,
    /// Sprung über eine Kante mit Absturz
    JumpOverDrop,
    /// Sprung über eine Kante mit Aufstieg
    JumpOverClimb,
}

/// Annotation der Strecke zwischen Punkt `i` und `i + 1`.
///
/// Links werden beim Trimmen nie erzeugt, nur übernommen oder an
/// Schnittgrenzen dupliziert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathLink {
    /// Link-Typ
    pub kind: LinkKind,
    /// Ziel-Index im Navigationsgitter des Hosts
    pub destination_index: i32,
}

impl PathLink {
    /// Erstellt einen neuen Link
    pub fn new(kind: LinkKind, destination_index: i32) -> Self {
        Self {
            kind,
            destination_index,
        }
    }
}

/// Pfad einer Bewegungs-Aktion.
///
/// Invariante: `links.len() == points.len() - 1` sobald mindestens ein Punkt
/// vorhanden ist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementPath {
    /// Wegpunkte in Weltkoordinaten
    pub points: Vec<Vec3>,
    /// Links zwischen aufeinanderfolgenden Punkten
    pub links: Vec<PathLink>,
}

impl MovementPath {
    /// Erstellt einen Pfad aus Punkten und Links
    pub fn new(points: Vec<Vec3>, links: Vec<PathLink>) -> Self {
        Self { points, links }
    }

    /// Erstellt einen geraden Pfad mit je einem Standard-Link pro Strecke
    pub fn from_points(points: Vec<Vec3>) -> Self {
        let links = (1..points.len())
            .map(|i| PathLink::new(LinkKind::Horizontal, i as i32))
            .collect();
        Self { points, links }
    }

    /// Prüft die Punkt/Link-Invariante
    pub fn is_consistent(&self) -> bool {
        if self.points.is_empty() {
            return self.links.is_empty();
        }
        self.links.len() + 1 == self.points.len()
    }

    /// Pfad mit weniger als 2 Punkten oder ohne Links ist als Bewegung unbrauchbar
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2 || self.links.is_empty()
    }

    /// Quantisierte Pfadlänge (siehe `path_geometry::distance`)
    pub fn length(&self) -> f64 {
        path_length(&self.points)
    }

    /// Erster Punkt des Pfads
    pub fn first_point(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    /// Letzter Punkt des Pfads
    pub fn last_point(&self) -> Option<Vec3> {
        self.points.last().copied()
    }
}
