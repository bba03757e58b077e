//! Ordnet die bearbeitbare Kette von Bewegungs-Aktionen ab der gewählten Aktion.

use crate::app::error::SelectionRejection;
use crate::core::{ActionHost, ActionId, TrackType};

/// Sammelt alle Bewegungs-Aktionen der Einheit ab der gewählten Aktion.
///
/// Berücksichtigt werden nur nicht entfernte, nicht abgeschlossene Aktionen
/// mit Pfad, die nicht vor der gewählten Aktion starten. Die Kette ist nach
/// Startzeit sortiert; bei gleicher Startzeit bleibt die Einfügereihenfolge.
///
/// Lehnt ab, wenn die Einheit nicht steuerbar oder nicht freundlich ist, eine
/// Doppelspur-Aktion folgt oder keine Aktion übrig bleibt.
pub fn select_chain<H: ActionHost>(
    host: &H,
    selected_id: ActionId,
) -> Result<Vec<ActionId>, SelectionRejection> {
    let selected = host
        .movement(selected_id)
        .ok_or(SelectionRejection::UnknownAction(selected_id))?;
    let unit = host
        .unit(selected.owner)
        .ok_or(SelectionRejection::NoOwner(selected.owner))?;
    if !unit.player_controllable {
        return Err(SelectionRejection::NotControllable(unit.id));
    }
    if !unit.friendly {
        return Err(SelectionRejection::NotFriendly(unit.id));
    }

    let mut movements = Vec::new();
    for movement in host
        .actions_of_owner(unit.id)
        .into_iter()
        .filter_map(|id| host.movement(id))
    {
        if movement.disposed || movement.completed || movement.path.is_none() {
            continue;
        }
        if movement.start_time < selected.start_time {
            continue;
        }
        if movement.track == TrackType::Double {
            log::debug!(
                "Kette: Doppelspur-Aktion nach der gewählten Aktion: {}",
                movement.action_key
            );
            return Err(SelectionRejection::DoubleTrack {
                action_key: movement.action_key.clone(),
            });
        }
        log::trace!("Kette: Aktion hinzugefügt {}", movement.describe());
        movements.push(movement);
    }

    if movements.is_empty() {
        return Err(SelectionRejection::NoMovements(unit.id));
    }

    movements.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    Ok(movements.into_iter().map(|m| m.id).collect())
}
