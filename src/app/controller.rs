//! Timeline-Controller: Auswahl, Drag und Scrub-Begrenzung einer Lauf-Kette.

use super::error::EditError;
use super::events::TimelineEvent;
use super::resequencer::{EditSummary, PathResequencer, select_chain};
use crate::core::{ActionHost, ActionId};
use crate::shared::EngineOptions;

/// Zulässiger Bereich für das Drag-Ziel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubRange {
    /// Frühestes Ziel: Mindestlänge des ersten Segments plus Spitze
    pub min: f32,
    /// Spätestes Ziel: gecachtes Ende des ersten Segments
    pub max: f32,
}

impl ScrubRange {
    /// Leerer Bereich (min == max) begrenzt nichts
    pub fn is_empty(&self) -> bool {
        self.min == self.max
    }
}

/// Antwort auf ein Drag-Event
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Keine aktive Session für diese Aktion: Host zieht wie gewohnt
    Fallback,
    /// Ziel lag außerhalb des Bereichs; der Host setzt die Zeit auf diesen Wert
    Clamped(f32),
    /// Änderung praktisch Null
    Unchanged,
    /// Kette neu verteilt
    Applied(EditSummary),
    /// Änderung abgelehnt, Kette unverändert
    Rejected(EditError),
}

/// Orchestriert Timeline-Events auf den Resequencer.
#[derive(Debug, Clone, Default)]
pub struct TimelineController {
    selected_action: Option<ActionId>,
    scrub_range: Option<ScrubRange>,
    resequencer: PathResequencer,
    options: EngineOptions,
}

impl TimelineController {
    /// Erstellt einen Controller ohne aktive Session.
    pub fn new(options: EngineOptions) -> Self {
        Self {
            selected_action: None,
            scrub_range: None,
            resequencer: PathResequencer::new(options.clone()),
            options,
        }
    }

    /// Aktion der laufenden Session
    pub fn selected_action(&self) -> Option<ActionId> {
        self.selected_action
    }

    /// Zuletzt berechneter Scrub-Bereich
    pub fn scrub_range(&self) -> Option<ScrubRange> {
        self.scrub_range
    }

    /// Resequencer der Session
    pub fn resequencer(&self) -> &PathResequencer {
        &self.resequencer
    }

    /// Verarbeitet ein Timeline-Event.
    ///
    /// Nur Drag-Events liefern ein Ergebnis.
    pub fn handle_event<H: ActionHost>(
        &mut self,
        host: &mut H,
        event: TimelineEvent,
    ) -> Option<DragOutcome> {
        match event {
            TimelineEvent::ActionSelected {
                action_id,
                pointer_time,
            } => {
                self.begin_selection(host, action_id, pointer_time);
                None
            }
            TimelineEvent::ActionDragged {
                action_id,
                time_target,
            } => Some(self.on_drag(host, action_id, time_target)),
            TimelineEvent::ActionDragEnded => {
                self.on_drag_end();
                None
            }
        }
    }

    /// Startet eine Session, wenn die Spitze einer Lauf-Aktion getroffen wurde.
    ///
    /// Nur Treffer innerhalb von `painted_action_tip_duration` vor dem
    /// (auf die Runde geklemmten) Aktionsende zählen, damit das Aktionsende
    /// beim ersten Drag nicht zum Mauszeiger springt.
    pub fn begin_selection<H: ActionHost>(
        &mut self,
        host: &H,
        action_id: ActionId,
        pointer_time: f32,
    ) -> bool {
        let Some(movement) = host.movement(action_id) else {
            return false;
        };
        if movement.path.is_none() {
            log::debug!("Auswahl ist keine Lauf-Aktion mit Pfad: {}", movement.action_key);
            return false;
        }
        if host.unit(movement.owner).is_none() {
            return false;
        }
        log::debug!("Auswahl: {}", movement.describe());

        let end_time = host.clamp_time_in_current_turn(movement.end_time());
        let hit_delta = end_time - pointer_time;
        if hit_delta > self.options.painted_action_tip_duration {
            log::debug!("Spitze verfehlt: delta={hit_delta}");
            return false;
        }

        let chain = match select_chain(host, action_id) {
            Ok(chain) => chain,
            Err(e) => {
                log::debug!("Keine bearbeitbare Kette: {e}");
                return false;
            }
        };

        self.selected_action = Some(action_id);
        self.scrub_range = None;
        self.resequencer.cache_chain(host, &chain);
        true
    }

    /// Verarbeitet einen Drag auf `time_target`.
    pub fn on_drag<H: ActionHost>(
        &mut self,
        host: &mut H,
        action_id: ActionId,
        time_target: f32,
    ) -> DragOutcome {
        if self.selected_action != Some(action_id) {
            self.reset();
            return DragOutcome::Fallback;
        }

        let chain = match select_chain(host, action_id) {
            Ok(chain) => chain,
            Err(e) => {
                log::debug!("Kette nicht mehr gültig: {e}");
                self.reset();
                return DragOutcome::Fallback;
            }
        };

        let Some(range) = self.compute_scrub_range(host, action_id) else {
            self.reset();
            return DragOutcome::Fallback;
        };
        self.scrub_range = Some(range);

        let delta = time_target - self.resequencer.current_end_time();
        log::debug!(
            "Drag: Ziel={time_target}; Änderung={delta}; Bereich=[{}, {}]",
            range.min,
            range.max
        );

        if time_target < range.min {
            return DragOutcome::Clamped(range.min);
        }
        if range.max < time_target {
            return DragOutcome::Clamped(range.max);
        }
        if self.options.roughly_equal_duration(delta, 0.0) {
            return DragOutcome::Unchanged;
        }

        match self.resequencer.apply_duration_change(host, delta, &chain) {
            Ok(summary) => DragOutcome::Applied(summary),
            Err(e) => {
                log::warn!("Änderung abgelehnt: {e}");
                DragOutcome::Rejected(e)
            }
        }
    }

    /// Beendet die Session.
    pub fn on_drag_end(&mut self) {
        self.reset();
    }

    /// Klemmt ein Scrub-Ziel in den Bereich der laufenden Session.
    ///
    /// `None` wenn keine Korrektur nötig ist.
    pub fn clamp_scrub_target(&self, time: f32) -> Option<f32> {
        self.selected_action?;
        let range = self.scrub_range.filter(|r| !r.is_empty())?;
        let clamped = time.clamp(range.min, range.max);
        ((clamped - time).abs() > f32::EPSILON).then_some(clamped)
    }

    fn compute_scrub_range<H: ActionHost>(&self, host: &H, action_id: ActionId) -> Option<ScrubRange> {
        let selected = host.movement(action_id)?;
        let minimum_duration =
            host.length_to_duration(selected, self.options.path_length_minimum)?;
        let first_duration = self.resequencer.cache().duration_at(0)?;
        Some(ScrubRange {
            min: host.clamp_time_in_current_turn(
                selected.start_time + minimum_duration + self.options.painted_action_tip_duration,
            ),
            max: host.clamp_time_in_current_turn(selected.start_time + first_duration),
        })
    }

    fn reset(&mut self) {
        self.selected_action = None;
        self.scrub_range = None;
        self.resequencer.invalidate();
    }
}
