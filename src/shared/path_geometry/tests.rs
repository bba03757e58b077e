use super::*;
use crate::core::{LinkKind, PathLink};
use approx::{assert_abs_diff_eq, assert_relative_eq};
use glam::Vec3;

fn links(count: usize) -> Vec<PathLink> {
    (0..count)
        .map(|i| PathLink::new(LinkKind::Horizontal, i as i32 + 1))
        .collect()
}

/// Gerade Linie entlang X mit den übergebenen Stützstellen.
fn line_x(xs: &[f32]) -> Vec<Vec3> {
    xs.iter().map(|&x| Vec3::new(x, 0.0, 0.0)).collect()
}

fn window(reference_length: f32, duration: f32, prior_length: f32) -> TrimWindow {
    // Maßstab 1:1 → Dauer entspricht direkt der Länge
    TrimWindow {
        reference_length,
        reference_duration: reference_length,
        duration,
        prior_length,
    }
}

fn assert_points_eq(actual: &[Vec3], expected: &[Vec3]) {
    assert_eq!(actual.len(), expected.len(), "Punktanzahl: {actual:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(a.x, e.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.y, e.y, epsilon = 1e-4);
        assert_abs_diff_eq!(a.z, e.z, epsilon = 1e-4);
    }
}

#[test]
fn test_distance_quantization() {
    assert_relative_eq!(distance(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)), 5.0);
    // 0.125 → 0.12 (half-to-even auf 2 Stellen)
    assert_relative_eq!(distance(Vec3::ZERO, Vec3::new(0.125, 0.0, 0.0)), 0.12);
    // sqrt(2) → 1.414
    assert_relative_eq!(distance(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)), 1.414);
}

#[test]
fn test_path_length_sums_quantized_links() {
    let points = vec![Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::new(2.0, 2.0, 0.0)];
    assert_relative_eq!(path_length(&points), 2.828, epsilon = 1e-9);
    assert_eq!(path_length(&points[..1]), 0.0);
    assert_eq!(path_length(&[]), 0.0);
}

#[test]
fn test_trim_single_link_interpolates_both_ends() {
    let points = vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)];
    let trimmed = trim_path(
        &points,
        &links(1),
        &TrimWindow {
            reference_length: 10.0,
            reference_duration: 10.0,
            duration: 3.0,
            prior_length: 4.0,
        },
    );

    assert_points_eq(
        &trimmed.points,
        &[Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, 7.0)],
    );
    assert_eq!(trimmed.links.len(), 1);
    assert_relative_eq!(trimmed.length, 3.0);
}

#[test]
fn test_trim_window_ending_on_vertex_stops() {
    let points = line_x(&[0.0, 10.0, 25.0]);
    let trimmed = trim_path(&points, &links(2), &window(25.0, 10.0, 0.0));

    assert_points_eq(&trimmed.points, &line_x(&[0.0, 10.0]));
    assert_eq!(trimmed.links, links(1));
    assert_relative_eq!(trimmed.length, 10.0);
}

#[test]
fn test_trim_window_starting_on_vertex_keeps_second_link() {
    // Zwei Segmente mit Dauer 4 und 6 → 2.5 Längeneinheiten je Zeiteinheit
    let points = line_x(&[0.0, 10.0, 25.0]);
    let trimmed = trim_path(
        &points,
        &links(2),
        &TrimWindow {
            reference_length: 25.0,
            reference_duration: 10.0,
            duration: 4.0,
            prior_length: 10.0,
        },
    );

    assert_points_eq(&trimmed.points, &line_x(&[10.0, 20.0]));
    assert_eq!(trimmed.links, vec![links(2)[1]]);
    assert_relative_eq!(trimmed.length, 10.0);
}

#[test]
fn test_trim_copies_interior_links_whole() {
    let points = line_x(&[0.0, 5.0, 10.0, 15.0, 20.0]);
    let trimmed = trim_path(&points, &links(4), &window(20.0, 12.0, 3.0));

    assert_points_eq(&trimmed.points, &line_x(&[3.0, 5.0, 10.0, 15.0]));
    assert_eq!(trimmed.links, links(4)[0..3].to_vec());
    assert_relative_eq!(trimmed.length, 12.0, epsilon = 1e-3);
}

#[test]
fn test_trim_beyond_reference_end_returns_remainder() {
    let points = line_x(&[0.0, 10.0, 25.0]);
    let trimmed = trim_path(&points, &links(2), &window(25.0, 100.0, 5.0));

    assert_points_eq(&trimmed.points, &line_x(&[5.0, 10.0, 25.0]));
    assert_eq!(trimmed.links.len(), 2);
    assert_relative_eq!(trimmed.length, 20.0, epsilon = 1e-3);
}

#[test]
fn test_trim_prior_past_end_is_empty() {
    let points = line_x(&[0.0, 10.0]);
    let trimmed = trim_path(&points, &links(1), &window(10.0, 3.0, 10.0));

    assert!(trimmed.points.is_empty());
    assert!(trimmed.links.is_empty());
    assert_eq!(trimmed.length, 0.0);
}

#[test]
fn test_trim_degenerate_reference_is_empty() {
    let trimmed = trim_path(&line_x(&[0.0]), &[], &window(10.0, 3.0, 0.0));
    assert_eq!(trimmed, TrimmedPath::default());

    let zero_duration = TrimWindow {
        reference_length: 10.0,
        reference_duration: 0.0,
        duration: 3.0,
        prior_length: 0.0,
    };
    let trimmed = trim_path(&line_x(&[0.0, 10.0]), &links(1), &zero_duration);
    assert_eq!(trimmed, TrimmedPath::default());
}

#[test]
fn test_trim_length_monotonic_in_duration() {
    let points = vec![
        Vec3::ZERO,
        Vec3::new(3.0, 0.0, 4.0),
        Vec3::new(3.0, 2.0, 9.0),
        Vec3::new(-1.0, 2.0, 12.5),
        Vec3::new(-6.0, 0.5, 12.5),
    ];
    let link_list = links(4);
    let total = path_length(&points) as f32;

    let mut previous = 0.0f32;
    for step in 0..=60 {
        let duration = step as f32 * 0.5;
        let trimmed = trim_path(&points, &link_list, &window(total, duration, 1.3));
        assert!(
            trimmed.length + 1e-3 >= previous,
            "Länge fällt bei Dauer {duration}: {} < {previous}",
            trimmed.length
        );
        previous = trimmed.length;
    }
}

#[test]
fn test_trim_point_link_invariant() {
    let points = vec![
        Vec3::ZERO,
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 7.0),
        Vec3::new(9.0, 1.0, 7.0),
    ];
    let link_list = links(3);
    let total = path_length(&points) as f32;

    for prior in [0.0f32, 1.0, 2.0, 4.5, 9.0, 12.0] {
        for duration in [0.5f32, 2.0, 5.0, 9.99, 30.0] {
            let trimmed = trim_path(&points, &link_list, &window(total, duration, prior));
            assert!(
                trimmed.is_consistent(),
                "prior={prior}, duration={duration}: {} Punkte / {} Links",
                trimmed.points.len(),
                trimmed.links.len()
            );
        }
    }
}

#[test]
fn test_trim_consecutive_windows_rebuild_whole_window() {
    let points = line_x(&[0.0, 10.0, 25.0, 40.0]);
    let link_list = links(3);

    let first = trim_path(&points, &link_list, &window(40.0, 10.0, 0.0));
    let second = trim_path(&points, &link_list, &window(40.0, 20.0, first.length));
    let whole = trim_path(&points, &link_list, &window(40.0, 30.0, 0.0));

    let mut joined = first.points.clone();
    joined.extend_from_slice(&second.points[1..]);
    let mut joined_links = first.links.clone();
    joined_links.extend_from_slice(&second.links);

    assert_points_eq(&joined, &whole.points);
    assert_eq!(joined_links, whole.links);
    assert_relative_eq!(first.length + second.length, whole.length, epsilon = 1e-3);
}

#[test]
fn test_trim_consecutive_windows_inside_link_share_boundary() {
    let points = line_x(&[0.0, 10.0, 25.0, 40.0]);
    let link_list = links(3);

    let first = trim_path(&points, &link_list, &window(40.0, 12.0, 0.0));
    let second = trim_path(&points, &link_list, &window(40.0, 18.0, first.length));

    // Gemeinsamer Randpunkt, Link der geteilten Strecke dupliziert
    assert_points_eq(&first.points[first.points.len() - 1..], &second.points[..1]);
    assert_eq!(first.links.last(), second.links.first());
    assert_relative_eq!(first.length + second.length, 30.0, epsilon = 1e-3);
}

#[test]
fn test_trim_short_reference_never_reaches_minimum() {
    let points = line_x(&[0.0, 0.6, 1.2]);
    let link_list = links(2);

    for duration in [0.5f32, 1.0, 1.2, 5.0, 50.0] {
        let trimmed = trim_path(&points, &link_list, &window(1.2, duration, 0.0));
        assert!(trimmed.length < 1.5);
    }
}

#[test]
fn test_trim_negative_duration_is_empty() {
    let negative = TrimWindow {
        reference_length: 10.0,
        reference_duration: 10.0,
        duration: -1.0,
        prior_length: 0.0,
    };
    let trimmed = trim_path(&line_x(&[0.0, 10.0]), &links(1), &negative);
    assert_eq!(trimmed, TrimmedPath::default());
}
