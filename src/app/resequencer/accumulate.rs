//! Segmentweises Aufteilen der Gesamtdauer auf den gecachten Referenzpfad.
//!
//! Jedes Segment bekommt entweder seine volle gecachte Dauer oder den Rest
//! des Budgets (Stub). Ist ein Stub kürzer als die Mindestlänge, wird er
//! verworfen und das vorherige Segment um den Rest verlängert (`StubRetry`).

use super::cache::PathCache;
use crate::core::{ActionId, MovementPath, PathLink};
use crate::shared::{TrimWindow, TrimmedPath, trim_path};
use glam::Vec3;

/// Ziel, in das ein Segment zurückgeschrieben wird
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTarget {
    /// Bestehende Aktion der Kette
    Existing(ActionId),
    /// Neu anzulegende Aktion
    ToCreate,
}

/// Ein berechnetes Segment eines Resegmentierungs-Laufs
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    /// Ziel-Aktion
    pub target: SegmentTarget,
    /// Zugeschnittene Punkte
    pub points: Vec<Vec3>,
    /// Zugeschnittene Links
    pub links: Vec<PathLink>,
    /// Zugewiesene Dauer
    pub duration: f32,
    /// Bogenlänge bis einschließlich dieses Segments
    pub accumulated_length: f32,
}

impl Accumulator {
    /// Erstellt ein Segment aus einem Zuschnitt
    pub fn new(
        target: SegmentTarget,
        trimmed: TrimmedPath,
        duration: f32,
        prior_length: f32,
    ) -> Self {
        Self {
            target,
            accumulated_length: prior_length + trimmed.length,
            points: trimmed.points,
            links: trimmed.links,
            duration,
        }
    }

    /// Pfad des Segments
    pub fn to_path(&self) -> MovementPath {
        MovementPath::new(self.points.clone(), self.links.clone())
    }
}

/// Zustand der Akkumulations-Schleife
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubState {
    /// Normales Anhängen neuer Segmente
    Accumulating,
    /// Vorheriges Segment wird um den Rest verlängert und überschrieben
    StubRetry,
}

/// Position der Akkumulations-Schleife
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulationCursor {
    /// Index in Cache und Segment-Liste
    pub index: usize,
    /// Stub-Zustand
    pub state: StubState,
    /// Noch zu verteilende Dauer
    pub remaining: f32,
}

impl AccumulationCursor {
    /// Beginnt nach dem ersten Segment
    pub fn after_first(remaining: f32) -> Self {
        Self {
            index: 1,
            state: StubState::Accumulating,
            remaining,
        }
    }

    fn finished(index: usize) -> Self {
        Self {
            index,
            state: StubState::Accumulating,
            remaining: 0.0,
        }
    }
}

/// Parameter eines einzelnen Schritts
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// Ziel für ein neu angehängtes Segment
    pub target: SegmentTarget,
    /// Dauer, die der Gesamtlänge des Caches entspricht
    pub reference_duration: f32,
    /// Mindestlänge eines Segments
    pub minimum_length: f32,
}

/// Führt einen Schritt der Akkumulation aus.
///
/// `segments[i]` gehört immer zu Cache-Index `i`. Ein zu kurzer Stub setzt
/// den Cursor auf das vorherige Segment zurück und schaltet auf `StubRetry`;
/// der nächste Schritt überschreibt dann dieses Segment.
pub fn accumulate_step(
    cache: &PathCache,
    cursor: AccumulationCursor,
    segments: &mut Vec<Accumulator>,
    ctx: &StepContext,
) -> AccumulationCursor {
    let i = cursor.index;
    if cursor.remaining == 0.0 {
        log::debug!("Akkumulation: Budget erschöpft bei Index {i}");
        return AccumulationCursor::finished(i + 1);
    }
    let Some(cached_duration) = cache.duration_at(i) else {
        return AccumulationCursor::finished(i);
    };

    let stub = cursor.state == StubState::StubRetry;
    let duration = if stub {
        cached_duration + cursor.remaining
    } else {
        cached_duration.min(cursor.remaining)
    };
    let prior_length = match i {
        0 => 0.0,
        _ => segments.get(i - 1).map_or(0.0, |s| s.accumulated_length),
    };
    log::debug!(
        "Akkumulation: index={i}; stub={stub}; acc={prior_length}; duration={duration}"
    );

    let trimmed = trim_path(
        &cache.points,
        &cache.links,
        &TrimWindow {
            reference_length: cache.total_length,
            reference_duration: ctx.reference_duration,
            duration,
            prior_length,
        },
    );

    if trimmed.length < ctx.minimum_length {
        if stub || i == 0 {
            log::warn!(
                "Akkumulation: Verlängerung von Segment {i} zu kurz ({:.3}), Rest verworfen",
                trimmed.length
            );
            return AccumulationCursor::finished(i + 1);
        }
        log::debug!("Akkumulation: Stub {i} zu kurz ({:.3})", trimmed.length);
        return AccumulationCursor {
            index: i - 1,
            state: StubState::StubRetry,
            remaining: cursor.remaining,
        };
    }

    if stub {
        if let Some(segment) = segments.get_mut(i) {
            log::debug!(
                "Stub-Ersatz: index={i}; Punkte {} → {}; Dauer {} → {duration}",
                segment.points.len(),
                trimmed.points.len(),
                segment.duration
            );
            *segment = Accumulator::new(segment.target, trimmed, duration, prior_length);
        }
        segments.truncate(i + 1);
        return AccumulationCursor::finished(i + 1);
    }

    if !trimmed.is_consistent() {
        log::warn!(
            "Akkumulation: Punkte/Links passen nicht: index={i}; Punkte={}; Links={}",
            trimmed.points.len(),
            trimmed.links.len()
        );
    }

    segments.push(Accumulator::new(ctx.target, trimmed, duration, prior_length));
    AccumulationCursor {
        index: i + 1,
        state: StubState::Accumulating,
        remaining: cursor.remaining - duration,
    }
}
