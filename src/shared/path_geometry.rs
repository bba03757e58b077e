//! Reine Geometrie-Funktionen für Bewegungspfade.
//!
//! Layer-neutral: quantisierte Längenberechnung und der Zuschnitt eines
//! Bogenlängen-Fensters aus einem Referenzpfad. Die Quantisierung (Achsen auf
//! 2, Distanzen auf 3 Nachkommastellen, Rundung half-to-even) muss exakt
//! eingehalten werden, sonst driften wiederholte Drag-Edits auseinander.

use crate::core::PathLink;
use glam::Vec3;

/// Toleranz für Vergleiche von Bogenlängen (absolut).
pub const LENGTH_EPSILON: f64 = 0.01;

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round_ties_even() / factor
}

/// Quantisierte euklidische Distanz zweier Punkte.
///
/// Jede Achsen-Differenz wird auf 2 Nachkommastellen gerundet, das Ergebnis
/// auf 3 Nachkommastellen.
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    let x = round_to(a.x as f64 - b.x as f64, 2);
    let y = round_to(a.y as f64 - b.y as f64, 2);
    let z = round_to(a.z as f64 - b.z as f64, 2);
    round_to((x * x + y * y + z * z).sqrt(), 3)
}

/// Quantisierte Länge einer Polyline.
pub fn path_length(points: &[Vec3]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Vergleicht zwei Bogenlängen mit `LENGTH_EPSILON`.
pub fn roughly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < LENGTH_EPSILON
}

/// Zeit→Länge-Maßstab und Fenster für einen Zuschnitt.
///
/// `reference_length` und `reference_duration` müssen nicht aus dem
/// Referenzpfad selbst stammen: Aufrufer können die Summen der ganzen Kette
/// übergeben, damit alle Segmente denselben Maßstab teilen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimWindow {
    /// Länge, die `reference_duration` entspricht
    pub reference_length: f32,
    /// Dauer, die `reference_length` entspricht
    pub reference_duration: f32,
    /// Dauer des auszuschneidenden Fensters
    pub duration: f32,
    /// Bogenlänge, an der das Fenster beginnt
    pub prior_length: f32,
}

impl TrimWindow {
    /// Bogenlänge des Fensterendes (auf 3 Nachkommastellen gerundet)
    pub fn end_length(&self) -> f64 {
        round_to(
            self.reference_length as f64 * self.duration as f64 / self.reference_duration as f64
                + self.prior_length as f64,
            3,
        )
    }
}

/// Ergebnis eines Zuschnitts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrimmedPath {
    /// Tatsächliche (quantisierte) Länge des erzeugten Teilpfads
    pub length: f32,
    /// Punkte des Teilpfads, Randpunkte ggf. interpoliert
    pub points: Vec<Vec3>,
    /// Übernommene Links, einer je Strecke
    pub links: Vec<PathLink>,
}

impl TrimmedPath {
    /// Prüft `points.len() == links.len() + 1` (leeres Ergebnis gilt als konsistent)
    pub fn is_consistent(&self) -> bool {
        (self.points.is_empty() && self.links.is_empty()) || self.points.len() == self.links.len() + 1
    }
}

fn lerp_at(a: Vec3, b: Vec3, offset: f64, link_length: f64) -> Vec3 {
    if link_length <= 0.0 {
        return a;
    }
    a.lerp(b, (offset / link_length) as f32)
}

/// Schneidet das Fenster `[prior_length, end_length]` aus dem Referenzpfad.
///
/// Strecken vollständig vor dem Fensterbeginn werden übersprungen. Liegt eine
/// Fenstergrenze innerhalb einer Strecke, wird der Randpunkt linear
/// interpoliert; die Strecke behält ihren Link. Sobald das Fensterende
/// erreicht ist, bricht der Lauf ab. Endet der Referenzpfad vorher, reicht das
/// Ergebnis bis zu dessen Ende.
///
/// Negative Dauern ergeben einen leeren Zuschnitt. Die Mindestlänge wird
/// hier nicht geprüft, das ist Sache des Aufrufers.
pub fn trim_path(points: &[Vec3], links: &[PathLink], window: &TrimWindow) -> TrimmedPath {
    if points.len() < 2
        || links.len() + 1 < points.len()
        || window.reference_duration <= 0.0
        || window.duration < 0.0
    {
        return TrimmedPath::default();
    }

    let end_length = window.end_length();
    let prior_length = window.prior_length as f64;
    let last_length = round_to(prior_length, 3);

    let mut out_points: Vec<Vec3> = Vec::with_capacity(points.len());
    let mut out_links: Vec<PathLink> = Vec::with_capacity(links.len());
    let mut out_length = 0.0;
    let mut current_length = 0.0;

    for (pair, &link) in points.windows(2).zip(links) {
        let (p1, p2) = (pair[0], pair[1]);
        let link_length = distance(p1, p2);
        let accumulated = current_length;
        current_length += link_length;
        let at_end = roughly_equal(current_length, end_length);

        if current_length < last_length || roughly_equal(current_length, last_length) {
            continue;
        }

        if out_points.is_empty() {
            let mut start = p1;
            let mut end = p2;
            let mut length = link_length;
            let mut is_last = false;

            if !roughly_equal(accumulated, last_length) && accumulated < last_length {
                let fragment = current_length - prior_length;
                let t = 1.0 - fragment / link_length;
                start = p1.lerp(p2, t as f32);
                length = distance(start, end);
                log::trace!("Trim: Start interpoliert bei t={t:.4}");
            }

            if current_length > end_length || at_end {
                end = lerp_at(p1, p2, end_length - accumulated, link_length);
                length = distance(start, end);
                is_last = true;
            }

            out_points.push(start);
            out_points.push(end);
            out_links.push(link);
            out_length += length;
            if is_last {
                break;
            }
        } else if current_length < end_length || at_end {
            out_points.push(p2);
            out_links.push(link);
            out_length += link_length;
            if at_end {
                break;
            }
        } else {
            let end = lerp_at(p1, p2, end_length - accumulated, link_length);
            out_points.push(end);
            out_links.push(link);
            out_length += distance(p1, end);
            break;
        }
    }

    log::trace!(
        "Trim: Fenster [{last_length:.3}, {end_length:.3}] → Länge {out_length:.3}, {} Punkte, {} Links",
        out_points.len(),
        out_links.len()
    );

    TrimmedPath {
        length: out_length as f32,
        points: out_points,
        links: out_links,
    }
}

#[cfg(test)]
mod tests;
