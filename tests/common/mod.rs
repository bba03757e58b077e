//! Gemeinsame Helfer der Integrationstests: Fixture-Laden und Logger.

#![allow(dead_code)]

use edit_run_action::{
    ActionId, ActionRegistry, ActionTemplate, CombatUnit, Movement, MovementPath, UnitId,
};
use glam::Vec3;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UnitFixture {
    id: UnitId,
    movement_speed: f32,
}

#[derive(Debug, Deserialize)]
struct MovementFixture {
    action_key: String,
    start_time: f32,
    duration: f32,
    path: MovementPath,
}

#[derive(Debug, Deserialize)]
struct ChainFixture {
    turn_length: f32,
    units: Vec<UnitFixture>,
    templates: Vec<ActionTemplate>,
    movements: Vec<MovementFixture>,
}

/// Installiert den Test-Logger (mehrfacher Aufruf ist unschädlich)
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Lädt die Zwei-Segment-Kette und gibt Register plus Aktions-IDs zurück
pub fn load_two_segment_chain() -> (ActionRegistry, Vec<ActionId>) {
    let content = include_str!("../fixtures/two_segment_chain.toml");
    let fixture: ChainFixture = toml::from_str(content).expect("Fixture sollte parsebar sein");

    let mut registry = ActionRegistry::new(fixture.turn_length);
    for unit in &fixture.units {
        registry.add_unit(CombatUnit::friendly(unit.id, unit.movement_speed));
    }
    for template in fixture.templates {
        registry.add_template(template);
    }
    let owner = fixture.units[0].id;
    let ids = fixture
        .movements
        .into_iter()
        .map(|m| {
            registry.add_movement(Movement::new(
                owner,
                m.action_key,
                m.start_time,
                m.duration,
                m.path,
            ))
        })
        .collect();
    (registry, ids)
}

/// Punkte eines Aktions-Pfads
pub fn points_of(registry: &ActionRegistry, id: ActionId) -> Vec<Vec3> {
    use edit_run_action::ActionHost;
    registry
        .movement(id)
        .and_then(|m| m.path.as_ref())
        .map(|p| p.points.clone())
        .unwrap_or_default()
}

/// Vergleicht Punktfolgen mit Toleranz
pub fn assert_points(actual: &[Vec3], expected: &[[f32; 3]]) {
    assert_eq!(actual.len(), expected.len(), "Punkte: {actual:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            a.abs_diff_eq(Vec3::from_array(*e), 1e-3),
            "Punkt {a:?} != {e:?} in {actual:?}"
        );
    }
}
