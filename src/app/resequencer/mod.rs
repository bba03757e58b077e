//! Segment-Resequencer: verteilt eine geänderte Gesamtdauer neu auf eine
//! Kette von Bewegungs-Aktionen.
//!
//! Die Kette wird beim Auswählen zu einem Referenzpfad zusammengefügt
//! ([`PathCache`]). Jede Dauer-Änderung schneidet daraus nacheinander die
//! Bogenlängen-Fenster der einzelnen Segmente, sodass Bogenlänge proportional
//! zur verstrichenen Zeit bleibt. Segmente werden dabei verkürzt, zu Stubs
//! zusammengelegt, entfernt oder neu angelegt.

pub mod accumulate;
pub mod cache;
mod chain;

pub use accumulate::{
    AccumulationCursor, Accumulator, SegmentTarget, StepContext, StubState, accumulate_step,
};
pub use cache::{CachedMovement, PathCache};
pub use chain::select_chain;

use crate::app::error::{EditError, SelectionRejection};
use crate::core::{ActionHost, ActionId, CreatePathAction, CreationRejected, UnitId};
use crate::shared::{EngineOptions, TrimWindow, trim_path};

/// Ergebnis einer übernommenen Dauer-Änderung
#[derive(Debug, Clone, PartialEq)]
pub struct EditSummary {
    /// Länge der Kette vor der Änderung
    pub chain_len: usize,
    /// Neue Gesamtdauer
    pub total_duration: f32,
    /// Neue Dauer des ersten Segments
    pub first_duration: f32,
    /// Anzahl berechneter Segmente (inkl. neu anzulegender)
    pub segments: usize,
    /// Entfernte Aktionen der alten Kette
    pub disposed: usize,
    /// Neu angelegte Aktionen
    pub created: usize,
    /// Grund, warum das Anlegen weiterer Segmente abgebrochen wurde
    pub creation_rejected: Option<CreationRejected>,
}

impl EditSummary {
    /// true wenn sich die Anzahl der Segmente geändert hat
    pub fn reshaped(&self) -> bool {
        self.segments != self.chain_len || self.disposed > 0
    }
}

/// Bearbeitungs-Session einer Kette: Cache plus aktuelle Endzeit.
#[derive(Debug, Clone, Default)]
pub struct PathResequencer {
    cache: PathCache,
    current_end_time: f32,
    options: EngineOptions,
}

impl PathResequencer {
    /// Erstellt eine Session ohne Cache
    pub fn new(options: EngineOptions) -> Self {
        Self {
            cache: PathCache::default(),
            current_end_time: 0.0,
            options,
        }
    }

    /// Gecachter Referenzpfad
    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Aktive Grenzwerte
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Endzeit des ersten Segments nach der letzten übernommenen Änderung
    pub fn current_end_time(&self) -> f32 {
        self.current_end_time
    }

    /// Baut den Cache für eine neue Kette auf und merkt die Endzeit des ersten Segments
    pub fn cache_chain<H: ActionHost>(&mut self, host: &H, chain: &[ActionId]) {
        self.cache.rebuild(host, chain);
        self.current_end_time = chain
            .first()
            .and_then(|&id| host.movement(id))
            .map_or(0.0, |m| m.end_time());
    }

    /// Verwirft den Cache (Session beendet)
    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.current_end_time = 0.0;
    }

    /// Neue Dauer des ersten Segments.
    ///
    /// Reicht die neue Gesamtdauer nicht über die gecachte Dauer des ersten
    /// Segments hinaus, übernimmt es die ganze Kette; sonst behält es seine
    /// gecachte Dauer und der Rest geht an die Folgesegmente.
    fn first_segment_duration(&self, total: f32) -> f32 {
        let cached = self.cache.duration_at(0).unwrap_or(total);
        if total < cached || self.options.roughly_equal_duration(total, cached) {
            total
        } else {
            cached
        }
    }

    /// Verteilt die um `delta` geänderte Gesamtdauer neu auf die Kette.
    ///
    /// Die neue Gesamtdauer muss positiv sein und darf die gecachte Kette
    /// nicht überschreiten. Entweder werden alle berechneten Segmente
    /// zurückgeschrieben oder nichts. Nur das Anlegen neuer Segmente darf unterwegs abbrechen; bereits
    /// geschriebene Segmente bleiben dann bestehen.
    pub fn apply_duration_change<H: ActionHost>(
        &mut self,
        host: &mut H,
        delta: f32,
        chain: &[ActionId],
    ) -> Result<EditSummary, EditError> {
        if self.options.roughly_equal_duration(delta, 0.0) {
            return Err(EditError::DurationUnchanged);
        }
        if self.cache.is_empty() {
            return Err(EditError::EmptyCache);
        }
        let (Some(&selected_id), Some(&last_id)) = (chain.first(), chain.last()) else {
            return Err(EditError::StaleCache {
                chain: 0,
                cached: self.cache.info.len(),
            });
        };
        if chain.len() > self.cache.info.len() || self.cache.info[0].id != selected_id {
            return Err(EditError::StaleCache {
                chain: chain.len(),
                cached: self.cache.info.len(),
            });
        }

        let selected = host
            .movement(selected_id)
            .ok_or(SelectionRejection::UnknownAction(selected_id))?;
        let minimum = self.options.path_length_minimum;

        if delta < 0.0 {
            let length = selected.path_length();
            if length <= minimum as f64 {
                log::debug!("Verkürzen abgebrochen, Pfad bereits minimal: {length:.3}");
                return Err(EditError::PathAtMinimum { length });
            }
        }

        let owner = selected.owner;
        let start_time = selected.start_time;
        let chain_duration: f32 = chain
            .iter()
            .filter_map(|&id| host.movement(id))
            .map(|m| m.duration)
            .sum();
        let total_duration = chain_duration + delta;
        if total_duration <= self.options.duration_epsilon {
            log::debug!("Gesamtdauer nicht positiv: {total_duration:.3}");
            return Err(EditError::TotalNotPositive {
                total: total_duration,
            });
        }
        let first_duration = self.first_segment_duration(total_duration);
        let reference_duration = host
            .length_to_duration(selected, self.cache.total_length)
            .ok_or(EditError::NoMovementSpeed(selected_id))?;

        let first = trim_path(
            &self.cache.points,
            &self.cache.links,
            &TrimWindow {
                reference_length: self.cache.total_length,
                reference_duration,
                duration: first_duration,
                prior_length: 0.0,
            },
        );
        if first.length < minimum {
            log::debug!("Erstes Segment zu kurz: {:.3}", first.length);
            return Err(EditError::DegenerateTrim {
                length: first.length,
            });
        }

        let mut segments = vec![Accumulator::new(
            SegmentTarget::Existing(selected_id),
            first,
            first_duration,
            0.0,
        )];
        let mut cursor = AccumulationCursor::after_first(total_duration - first_duration);

        while cursor.index < self.cache.info.len()
            && !self.options.roughly_equal_duration(cursor.remaining, 0.0)
        {
            // Jenseits der aktuellen Kette dient die letzte Aktion als Maßstab
            let (target, reference_id) = match chain.get(cursor.index) {
                Some(&id) => (SegmentTarget::Existing(id), id),
                None => (SegmentTarget::ToCreate, last_id),
            };
            let Some(reference_duration) = host
                .movement(reference_id)
                .and_then(|m| host.length_to_duration(m, self.cache.total_length))
            else {
                log::warn!("Keine Bewegungsgeschwindigkeit für Aktion {reference_id}");
                break;
            };
            cursor = accumulate_step(
                &self.cache,
                cursor,
                &mut segments,
                &StepContext {
                    target,
                    reference_duration,
                    minimum_length: minimum,
                },
            );
        }

        if !self.options.roughly_equal_duration(cursor.remaining, 0.0) {
            log::debug!(
                "Restdauer {:.3} nach {} Segmenten nicht verteilbar",
                cursor.remaining,
                segments.len()
            );
            return Err(EditError::BeyondCachedChain {
                remaining: cursor.remaining,
            });
        }

        log::debug!(
            "Segmente: {} berechnet, Kette {}, Cache {}",
            segments.len(),
            chain.len(),
            self.cache.info.len()
        );

        let (end_time, disposed) =
            update_movements_from_segments(host, start_time, &segments, chain);
        let (created, creation_rejected) =
            self.create_movement_actions(host, owner, end_time, &segments, chain.len());
        self.current_end_time += delta;

        let summary = EditSummary {
            chain_len: chain.len(),
            total_duration,
            first_duration,
            segments: segments.len(),
            disposed,
            created,
            creation_rejected,
        };
        log::info!(
            "Kette neu verteilt: Dauer {:.3} (erstes Segment {:.3}), {} Segmente, {} entfernt, {} neu",
            summary.total_duration,
            summary.first_duration,
            summary.segments,
            summary.disposed,
            summary.created
        );
        Ok(summary)
    }

    /// Legt für alle Segmente ab `first_new` neue Aktionen an.
    ///
    /// Bricht beim ersten abgelehnten Segment ab; bereits angelegte bleiben.
    fn create_movement_actions<H: ActionHost>(
        &mut self,
        host: &mut H,
        owner: UnitId,
        start_time: f32,
        segments: &[Accumulator],
        first_new: usize,
    ) -> (usize, Option<CreationRejected>) {
        let mut start_time = start_time;
        let mut created = 0;

        for (index, segment) in segments.iter().enumerate().skip(first_new) {
            let Some(cached) = self.cache.info.get_mut(index) else {
                log::warn!("Segment {index} ohne Cache-Eintrag, Anlegen abgebrochen");
                break;
            };
            log::debug!(
                "Segment anlegen: index={index}; start={start_time}; duration={}; Punkte={}",
                segment.duration,
                segment.points.len()
            );
            let request = CreatePathAction {
                owner,
                action_key: cached.key.clone(),
                start_time,
                duration: segment.duration,
                path: segment.to_path(),
            };
            match host.create_path_action(&request) {
                Ok(id) => {
                    host.register_action(id);
                    cached.id = id;
                    start_time += segment.duration;
                    created += 1;
                }
                Err(e) => {
                    log::warn!("Segment {index} nicht angelegt: {e}");
                    return (created, Some(e));
                }
            }
        }

        (created, None)
    }
}

/// Schreibt die Segmente in die bestehenden Aktionen der Kette zurück.
///
/// Startzeiten laufen ab `start_time` fortlaufend weiter. Aktionen der Kette
/// ohne Segment werden entfernt. Gibt die Endzeit des letzten geschriebenen
/// Segments und die Anzahl entfernter Aktionen zurück.
pub fn update_movements_from_segments<H: ActionHost>(
    host: &mut H,
    start_time: f32,
    segments: &[Accumulator],
    chain: &[ActionId],
) -> (f32, usize) {
    let mut start_time = start_time;
    let mut written = 0;

    for segment in segments {
        let SegmentTarget::Existing(id) = segment.target else {
            continue;
        };
        if segment.points.is_empty() {
            log::warn!("Aktion {id} wird mit 0 Pfadpunkten aktualisiert");
        }
        if segment.links.is_empty() {
            log::warn!("Aktion {id} wird mit 0 Links aktualisiert");
        }
        host.update_movement(id, segment.to_path(), start_time, segment.duration);
        start_time += segment.duration;
        written += 1;
    }

    let mut disposed = 0;
    for &id in chain.iter().skip(written) {
        log::debug!("Aktion entfernt: {id}");
        host.dispose_action(id);
        disposed += 1;
    }

    (start_time, disposed)
}
