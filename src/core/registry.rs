//! In-Memory-Aktionsregister: Einheiten, Vorlagen, Aktionen und Rundenzeit.

use super::host::{ActionHost, CreatePathAction, CreationRejected};
use super::{ActionId, ActionTemplate, CombatUnit, Movement, MovementPath, UnitId};
use crate::shared::options::{CREATION_DURATION_FLOOR, PATH_LENGTH_MINIMUM};
use crate::shared::EngineOptions;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Register aller geplanten Aktionen einer Runde
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    /// Alle Aktionen in Einfügereihenfolge
    actions: IndexMap<ActionId, Movement>,
    /// Einheiten nach ID
    units: HashMap<UnitId, CombatUnit>,
    /// Aktions-Vorlagen nach Schlüssel
    templates: HashMap<String, ActionTemplate>,
    /// Bei der Timeline-Anzeige angemeldete Aktionen
    timeline: Vec<ActionId>,
    /// Länge einer Runde (Zeiteinheiten)
    pub turn_length: f32,
    /// Index der aktuellen Runde
    pub current_turn: u32,
    /// Mindestlänge neu angelegter Pfade
    path_length_minimum: f32,
    /// Mindestdauer neu angelegter Aktionen
    creation_duration_floor: f32,
    next_id: ActionId,
}

impl ActionRegistry {
    /// Erstellt ein leeres Register
    pub fn new(turn_length: f32) -> Self {
        Self {
            actions: IndexMap::new(),
            units: HashMap::new(),
            templates: HashMap::new(),
            timeline: Vec::new(),
            turn_length,
            current_turn: 0,
            path_length_minimum: PATH_LENGTH_MINIMUM,
            creation_duration_floor: CREATION_DURATION_FLOOR,
            next_id: 1,
        }
    }

    /// Übernimmt die Grenzwerte für neue Aktionen aus den Optionen
    pub fn apply_options(&mut self, options: &EngineOptions) {
        self.path_length_minimum = options.path_length_minimum;
        self.creation_duration_floor = options.creation_duration_floor;
    }

    /// Fügt eine Einheit hinzu
    pub fn add_unit(&mut self, unit: CombatUnit) {
        self.units.insert(unit.id, unit);
    }

    /// Fügt eine Aktions-Vorlage hinzu
    pub fn add_template(&mut self, template: ActionTemplate) {
        self.templates.insert(template.key.clone(), template);
    }

    /// Fügt eine Aktion hinzu und vergibt ihre ID
    pub fn add_movement(&mut self, mut movement: Movement) -> ActionId {
        let id = self.next_id;
        self.next_id += 1;
        movement.id = id;
        self.actions.insert(id, movement);
        id
    }

    /// Veränderlicher Zugriff auf eine Aktion
    pub fn movement_mut(&mut self, id: ActionId) -> Option<&mut Movement> {
        self.actions.get_mut(&id)
    }

    /// Nicht entfernte Aktionen einer Einheit, nach Startzeit sortiert
    pub fn live_movements_of(&self, owner: UnitId) -> Vec<&Movement> {
        let mut live: Vec<&Movement> = self
            .actions
            .values()
            .filter(|m| m.owner == owner && !m.disposed)
            .collect();
        live.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        live
    }

    /// Startzeit der aktuellen Runde
    pub fn turn_start(&self) -> f32 {
        self.turn_length * self.current_turn as f32
    }

    /// Endzeit der aktuellen Runde
    pub fn turn_end(&self) -> f32 {
        self.turn_length * (self.current_turn + 1) as f32
    }

    /// Bei der Timeline angemeldete Aktionen
    pub fn timeline_actions(&self) -> &[ActionId] {
        &self.timeline
    }

    /// Gibt die Anzahl aller Aktionen zurück (inkl. entfernter)
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

impl ActionHost for ActionRegistry {
    fn movement(&self, id: ActionId) -> Option<&Movement> {
        self.actions.get(&id)
    }

    fn unit(&self, id: UnitId) -> Option<&CombatUnit> {
        self.units.get(&id)
    }

    fn template(&self, key: &str) -> Option<&ActionTemplate> {
        self.templates.get(key)
    }

    fn actions_of_owner(&self, owner: UnitId) -> Vec<ActionId> {
        self.actions
            .values()
            .filter(|m| m.owner == owner)
            .map(|m| m.id)
            .collect()
    }

    fn clamp_time_in_current_turn(&self, time: f32) -> f32 {
        time.clamp(self.turn_start(), self.turn_end())
    }

    fn update_movement(
        &mut self,
        id: ActionId,
        path: MovementPath,
        start_time: f32,
        duration: f32,
    ) -> bool {
        let Some(movement) = self.actions.get_mut(&id) else {
            return false;
        };
        movement.path = Some(path);
        movement.path_changed = true;
        movement.start_time = start_time;
        movement.duration = duration;
        true
    }

    fn dispose_action(&mut self, id: ActionId) {
        if let Some(movement) = self.actions.get_mut(&id) {
            movement.disposed = true;
        }
        self.timeline.retain(|&t| t != id);
    }

    fn create_path_action(
        &mut self,
        request: &CreatePathAction,
    ) -> Result<ActionId, CreationRejected> {
        if request.path.is_degenerate() {
            return Err(CreationRejected::DegeneratePath);
        }
        if !self.units.contains_key(&request.owner) {
            return Err(CreationRejected::UnknownOwner(request.owner));
        }
        let Some(template) = self.templates.get(&request.action_key) else {
            return Err(CreationRejected::UnknownTemplate {
                key: request.action_key.clone(),
            });
        };
        let track = template.track;

        let length = request.path.length();
        if length < self.path_length_minimum as f64 {
            return Err(CreationRejected::PathTooShort { length });
        }

        let turn_end = self.turn_end();
        if request.start_time >= turn_end {
            return Err(CreationRejected::StartAfterTurnEnd {
                start_time: request.start_time,
                turn_end,
            });
        }

        let clamped = request.duration.min(turn_end - request.start_time);
        if clamped < self.creation_duration_floor {
            return Err(CreationRejected::DurationBelowFloor { duration: clamped });
        }

        let mut movement = Movement::new(
            request.owner,
            request.action_key.clone(),
            request.start_time,
            request.duration,
            request.path.clone(),
        );
        movement.track = track;
        movement.path_changed = true;
        let id = self.add_movement(movement);
        log::debug!(
            "Aktion angelegt: id={id}; key={}; start={}; duration={}",
            request.action_key,
            request.start_time,
            request.duration
        );
        Ok(id)
    }

    fn register_action(&mut self, id: ActionId) {
        if !self.timeline.contains(&id) {
            self.timeline.push(id);
        }
    }
}
