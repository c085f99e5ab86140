use nalgebra::base::*;

use crate::geometry::geometry_objects::{Circle, CircleFitResult, Point};

/// Fit error reported for degenerate strokes, above any usable tolerance
pub const DEGENERATE_FIT_ERROR: f32 = f32::MAX;

/// Fewer points than this never go through the linear solve
pub const MIN_FIT_POINTS: usize = 3;

// relative to det of a well spread stroke, which grows as n^3
const SINGULARITY_EPSILON: f64 = 1e-8;

pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::<f64>::zeros(), |acc, pt| acc + Vector2::new(pt[0] as f64, pt[1] as f64));
    let ctr = sum / points.len() as f64;
    Some(Vector2::<f32>::new(ctr[0] as f32, ctr[1] as f32))
}

pub fn degenerate_fit(points: &[Point]) -> CircleFitResult {
    let center = centroid(points)
        .filter(|ctr| ctr[0].is_finite() && ctr[1].is_finite())
        .unwrap_or_else(Vector2::zeros);
    CircleFitResult{
        center,
        radius: 0.0,
        error: DEGENERATE_FIT_ERROR,
    }
}

/// Root mean square of the distances between the points and the circle
/// perimeter, divided by the radius.
pub fn fit_error(points: &[Point], circle: &Circle) -> f32 {
    if points.is_empty() || !(circle.radius > 0.0) {
        return DEGENERATE_FIT_ERROR;
    }
    let ctr = Vector2::<f64>::new(circle.center[0] as f64, circle.center[1] as f64);
    let rad = circle.radius as f64;
    let sum_sq = points
        .iter()
        .fold(0.0f64, |acc, pt| {
            let dist = (Vector2::new(pt[0] as f64, pt[1] as f64) - ctr).norm() - rad;
            acc + dist * dist
        });
    let err = (sum_sq / points.len() as f64).sqrt() / rad;

    if err.is_finite() {
        err as f32
    }
    else {
        DEGENERATE_FIT_ERROR
    }
}

/// Algebraic least squares circle fit (Kasa).
///
/// Every point is assumed to satisfy `x² + y² = D·x + E·y + F`; the normal
/// equations of that system give `D`, `E`, `F`, from which
/// `center = (D/2, E/2)` and `radius = sqrt(F + D²/4 + E²/4)`.
///
/// Sums are accumulated in f64 over coordinates shifted to the centroid and
/// scaled to unit mean spread, then mapped back. Collinear, duplicated or too
/// few points give the result of [`degenerate_fit`], so the returned values
/// are always finite.
pub fn fit_circle(points: &[Point]) -> CircleFitResult {
    if points.len() < MIN_FIT_POINTS {
        return degenerate_fit(points);
    }

    let nb_pts = points.len() as f64;
    let mean = points
        .iter()
        .fold(Vector2::<f64>::zeros(), |acc, pt| acc + Vector2::new(pt[0] as f64, pt[1] as f64))
        / nb_pts;

    let scale = points
        .iter()
        .map(|pt| (Vector2::new(pt[0] as f64, pt[1] as f64) - mean).norm())
        .sum::<f64>()
        / nb_pts;
    if !(scale > 0.0) || !scale.is_finite() {
        log::debug!("Circle fit on {} coincident points", points.len());
        return degenerate_fit(points);
    }

    // Σu, Σv, Σu², Σv², Σuv, Σu·z, Σv·z, Σz with z = u² + v²
    let mut s_u = 0.0;
    let mut s_v = 0.0;
    let mut s_uu = 0.0;
    let mut s_vv = 0.0;
    let mut s_uv = 0.0;
    let mut s_uz = 0.0;
    let mut s_vz = 0.0;
    let mut s_z = 0.0;
    for pt in points {
        let u = (pt[0] as f64 - mean[0]) / scale;
        let v = (pt[1] as f64 - mean[1]) / scale;
        let z = u * u + v * v;
        s_u += u;
        s_v += v;
        s_uu += u * u;
        s_vv += v * v;
        s_uv += u * v;
        s_uz += u * z;
        s_vz += v * z;
        s_z += z;
    }

    let mat = Matrix3::new(
        s_uu, s_uv, s_u,
        s_uv, s_vv, s_v,
        s_u, s_v, nb_pts,
        );
    let b = Vector3::new(s_uz, s_vz, s_z);

    if mat.determinant().abs() < SINGULARITY_EPSILON * nb_pts.powi(3) {
        log::debug!("Circle fit on {} collinear points", points.len());
        return degenerate_fit(points);
    }

    let sol = match mat.lu().solve(&b) {
        Some(sol) => sol,
        None => return degenerate_fit(points),
    };

    let (d, e, f) = (sol[0], sol[1], sol[2]);
    let rad_sq = f + 0.25 * (d * d + e * e);
    if !(rad_sq > 0.0) || !rad_sq.is_finite() {
        return degenerate_fit(points);
    }

    let center = Vector2::<f32>::new(
        (mean[0] + 0.5 * d * scale) as f32,
        (mean[1] + 0.5 * e * scale) as f32,
        );
    let radius = (rad_sq.sqrt() * scale) as f32;
    if !(radius > 0.0) || !radius.is_finite() || !center[0].is_finite() || !center[1].is_finite() {
        return degenerate_fit(points);
    }

    let circle = Circle::new(center, radius);
    let error = fit_error(points, &circle);

    CircleFitResult{
        center,
        radius,
        error,
    }
}
