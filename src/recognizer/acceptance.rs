use nalgebra::base::*;

use crate::geometry::geometry_objects::{BoundingBox, CircleFitResult, Point};

/// Outcome of the shape checks run on a fitted stroke
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AcceptanceReport {
    pub fit_error_ok: bool,
    pub has_inside_points: bool,
    pub overlap_ratio: f32,
    pub is_circle: bool,
}

/// Square around the fitted center, of half width `radius / sqrt(2) * tolerance`,
/// that a stroke drawn along the perimeter never enters.
pub fn inner_exclusion_box(fit: &CircleFitResult, tolerance: f32) -> BoundingBox {
    let half_width = fit.radius / std::f32::consts::SQRT_2 * tolerance;
    let half = Vector2::<f32>::new(half_width, half_width);
    BoundingBox{
        min: fit.center - half,
        max: fit.center + half,
    }
}

pub fn has_inside_points(fit: &CircleFitResult, points: &[Point], tolerance: f32) -> bool {
    let inner_box = inner_exclusion_box(fit, tolerance);
    points.iter().any(|pt| inner_box.contains(pt))
}

/// Area of the intersection between the fitted circle box and the stroke box,
/// divided by the area of the fitted circle box.
///
/// Computed as a product of per axis ratios so that huge boxes do not
/// overflow the f32 area.
pub fn overlap_ratio(fit: &CircleFitResult, points: &[Point]) -> f32 {
    let fit_box = fit.circle().bounding_box();
    let fit_w = fit_box.width();
    let fit_h = fit_box.height();
    if !(fit_w > 0.0) || !(fit_h > 0.0) || !fit_w.is_finite() || !fit_h.is_finite() {
        return 0.0;
    }

    BoundingBox::from_points(points)
        .and_then(|path_box| path_box.intersection(&fit_box))
        .map(|inter| (inter.width() / fit_w) * (inter.height() / fit_h))
        .unwrap_or(0.0)
}

pub fn check_acceptance(fit: &CircleFitResult, points: &[Point], tolerance: f32) -> AcceptanceReport {
    let fit_error_ok = fit.error <= tolerance;
    let has_inside_points = has_inside_points(fit, points, tolerance);
    let overlap_ratio = overlap_ratio(fit, points);
    let is_circle = fit_error_ok && !has_inside_points && overlap_ratio > 1.0 - tolerance;

    log::debug!(
        "Acceptance: error {} ({}), inside points {}, overlap {} => circle {}",
        fit.error,
        if fit_error_ok { "ok" } else { "too large" },
        has_inside_points,
        overlap_ratio,
        is_circle
    );

    AcceptanceReport{
        fit_error_ok,
        has_inside_points,
        overlap_ratio,
        is_circle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::geometry::geometry_operations::{fit_circle, DEGENERATE_FIT_ERROR};

    fn arc_points(cx: f32, cy: f32, rad: f32, sweep_deg: f32, nb: usize) -> Vec<Point> {
        (0..nb)
            .map(|i| {
                let theta = sweep_deg.to_radians() * i as f32 / (nb - 1) as f32;
                Vector2::new(cx + rad * theta.cos(), cy + rad * theta.sin())
            })
            .collect()
    }

    fn closed_circle(cx: f32, cy: f32, rad: f32, nb: usize) -> Vec<Point> {
        arc_points(cx, cy, rad, 360.0 * (nb - 1) as f32 / nb as f32, nb)
    }

    #[test]
    fn exclusion_box_size() {
        let fit = CircleFitResult{center: Vector2::new(10.0, 10.0), radius: 2.0f32.sqrt() * 10.0, error: 0.0};
        let inner_box = inner_exclusion_box(&fit, 0.5);
        assert_relative_eq!(inner_box.min[0], 5.0, epsilon = 1e-5);
        assert_relative_eq!(inner_box.max[1], 15.0, epsilon = 1e-5);
    }

    #[test]
    fn full_circle_covers_its_box() {
        let pts = closed_circle(100.0, 100.0, 50.0, 36);
        let fit = fit_circle(&pts);
        assert!(overlap_ratio(&fit, &pts) > 0.99);
        assert!(!has_inside_points(&fit, &pts, 0.2));
        assert!(check_acceptance(&fit, &pts, 0.2).is_circle);
    }

    #[test]
    fn quarter_arc_fails_overlap() {
        let pts = arc_points(100.0, 100.0, 50.0, 90.0, 20);
        let fit = fit_circle(&pts);
        assert!(fit.error < 1e-3);
        let report = check_acceptance(&fit, &pts, 0.2);
        assert!(report.fit_error_ok);
        assert!(!report.has_inside_points);
        assert_relative_eq!(report.overlap_ratio, 0.25, epsilon = 1e-2);
        assert!(!report.is_circle);
    }

    #[test]
    fn half_arc_fails_overlap() {
        let pts = arc_points(0.0, 0.0, 30.0, 180.0, 30);
        let fit = fit_circle(&pts);
        let report = check_acceptance(&fit, &pts, 0.2);
        assert_relative_eq!(report.overlap_ratio, 0.5, epsilon = 1e-2);
        assert!(!report.is_circle);
    }

    #[test]
    fn huge_circle_keeps_full_overlap() {
        let pts = closed_circle(1e19, 1e19, 1e19, 36);
        let fit = fit_circle(&pts);
        assert!(fit.error < 1e-3);
        assert!(overlap_ratio(&fit, &pts) > 0.99);
        assert!(check_acceptance(&fit, &pts, 0.2).is_circle);
    }

    #[test]
    fn point_near_center_is_rejected() {
        let mut pts = closed_circle(100.0, 100.0, 50.0, 36);
        pts.push(Vector2::new(101.0, 99.0));
        let fit = fit_circle(&pts);
        let report = check_acceptance(&fit, &pts, 0.2);
        assert!(report.fit_error_ok);
        assert!(report.has_inside_points);
        assert!(!report.is_circle);
    }

    #[test]
    fn degenerate_fit_is_rejected() {
        let pts: Vec<Point> = vec![Vector2::new(0.0, 0.0), Vector2::new(5.0, 5.0), Vector2::new(10.0, 10.0)];
        let fit = fit_circle(&pts);
        assert_eq!(fit.error, DEGENERATE_FIT_ERROR);
        let report = check_acceptance(&fit, &pts, 1.0);
        assert_eq!(report.overlap_ratio, 0.0);
        assert!(!report.is_circle);
    }

    #[test]
    fn tighter_tolerance_rejects_wobbly_circle() {
        let pts: Vec<Point> = (0..60)
            .map(|i| {
                let theta = 2.0 * std::f32::consts::PI * i as f32 / 60.0;
                let r = 50.0 * (1.0 + 0.1 * (7.0 * theta).sin());
                Vector2::new(r * theta.cos(), r * theta.sin())
            })
            .collect();
        let fit = fit_circle(&pts);
        assert!(check_acceptance(&fit, &pts, 0.2).is_circle);
        assert!(!check_acceptance(&fit, &pts, 0.05).is_circle);
    }
}
