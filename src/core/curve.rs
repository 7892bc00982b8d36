//! Monotone cubic interpolation for continuous series paths.
//!
//! Tangents follow the Fritsch-Carlson construction, which preserves local
//! monotonicity in X so an interpolated line never overshoots between
//! samples. Output is deterministic, side-effect-free geometry consumed by
//! both rendering and tests.

use serde::{Deserialize, Serialize};

/// One cubic Bezier piece: two control points and the segment end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub c1x: f64,
    pub c1y: f64,
    pub c2x: f64,
    pub c2y: f64,
    pub x: f64,
    pub y: f64,
}

/// A contiguous run of interpolated points starting at `(start_x, start_y)`.
///
/// A run with a single defined point has no segments and draws nothing;
/// gap policy splits a series into one subpath per defined run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPath {
    pub start_x: f64,
    pub start_y: f64,
    pub segments: Vec<CubicSegment>,
}

/// Builds one monotone subpath through `points` (pixel coordinates,
/// ascending in x).
#[must_use]
pub fn monotone_subpath(points: &[(f64, f64)]) -> Option<SubPath> {
    let (&(start_x, start_y), rest) = points.split_first()?;
    let mut subpath = SubPath {
        start_x,
        start_y,
        segments: Vec::with_capacity(rest.len()),
    };

    if rest.is_empty() {
        return Some(subpath);
    }

    if points.len() == 2 {
        let (x1, y1) = points[1];
        subpath.segments.push(straight_segment(start_x, start_y, x1, y1));
        return Some(subpath);
    }

    // Interior tangents need a three-point window; endpoints use the
    // one-sided estimate.
    let mut t0 = f64::NAN;
    for i in 1..points.len() - 1 {
        let (x0, y0) = points[i - 1];
        let (x1, y1) = points[i];
        let (x2, y2) = points[i + 1];
        let t1 = slope3(x0, y0, x1, y1, x2, y2);
        if !t0.is_finite() {
            t0 = slope2(x0, y0, x1, y1, t1);
        }
        subpath.segments.push(cubic_segment(x0, y0, x1, y1, t0, t1));
        t0 = t1;
    }

    let (x0, y0) = points[points.len() - 2];
    let (x1, y1) = points[points.len() - 1];
    let t1 = slope2(x0, y0, x1, y1, t0);
    subpath.segments.push(cubic_segment(x0, y0, x1, y1, t0, t1));
    Some(subpath)
}

fn straight_segment(x0: f64, y0: f64, x1: f64, y1: f64) -> CubicSegment {
    let dx = (x1 - x0) / 3.0;
    let dy = (y1 - y0) / 3.0;
    CubicSegment {
        c1x: x0 + dx,
        c1y: y0 + dy,
        c2x: x1 - dx,
        c2y: y1 - dy,
        x: x1,
        y: y1,
    }
}

fn cubic_segment(x0: f64, y0: f64, x1: f64, y1: f64, t0: f64, t1: f64) -> CubicSegment {
    let dx = (x1 - x0) / 3.0;
    CubicSegment {
        c1x: x0 + dx,
        c1y: y0 + dx * t0,
        c2x: x1 - dx,
        c2y: y1 - dx * t1,
        x: x1,
        y: y1,
    }
}

/// Three-point monotone tangent estimate at the middle point.
fn slope3(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let h0 = x1 - x0;
    let h1 = x2 - x1;
    if h0 == 0.0 && h1 == 0.0 {
        return 0.0;
    }

    let s0 = if h0 != 0.0 { (y1 - y0) / h0 } else { 0.0 };
    let s1 = if h1 != 0.0 { (y2 - y1) / h1 } else { 0.0 };
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let magnitude = s0.abs().min(s1.abs()).min(0.5 * p.abs());
    let oriented = (sign(s0) + sign(s1)) * magnitude;
    if oriented.is_finite() { oriented } else { 0.0 }
}

/// One-sided endpoint tangent estimate.
fn slope2(x0: f64, y0: f64, x1: f64, y1: f64, t: f64) -> f64 {
    let h = x1 - x0;
    if h != 0.0 {
        (3.0 * (y1 - y0) / h - t) / 2.0
    } else {
        t
    }
}

fn sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else if value > 0.0 {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::monotone_subpath;

    #[test]
    fn single_point_yields_empty_run() {
        let subpath = monotone_subpath(&[(5.0, 7.0)]).expect("subpath");
        assert_eq!(subpath.start_x, 5.0);
        assert!(subpath.segments.is_empty());
    }

    #[test]
    fn two_points_yield_one_straight_segment() {
        let subpath = monotone_subpath(&[(0.0, 0.0), (30.0, 90.0)]).expect("subpath");
        assert_eq!(subpath.segments.len(), 1);
        let segment = subpath.segments[0];
        assert_eq!(segment.x, 30.0);
        assert!((segment.c1x - 10.0).abs() <= 1e-9);
        assert!((segment.c1y - 30.0).abs() <= 1e-9);
    }

    #[test]
    fn segment_count_is_points_minus_one() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64 * 10.0, (i % 3) as f64)).collect();
        let subpath = monotone_subpath(&points).expect("subpath");
        assert_eq!(subpath.segments.len(), points.len() - 1);
    }

    #[test]
    fn flat_run_has_flat_control_points() {
        let points = [(0.0, 50.0), (10.0, 50.0), (20.0, 50.0), (30.0, 50.0)];
        let subpath = monotone_subpath(&points).expect("subpath");
        for segment in &subpath.segments {
            assert_eq!(segment.c1y, 50.0);
            assert_eq!(segment.c2y, 50.0);
            assert_eq!(segment.y, 50.0);
        }
    }

    #[test]
    fn local_extremum_gets_zero_tangent() {
        // At a peak the signs of surrounding slopes differ, so both control
        // points at the peak stay at the peak height.
        let points = [(0.0, 0.0), (10.0, 100.0), (20.0, 0.0)];
        let subpath = monotone_subpath(&points).expect("subpath");
        let ascending = subpath.segments[0];
        assert!((ascending.c2y - 100.0).abs() <= 1e-9);
        let descending = subpath.segments[1];
        assert!((descending.c1y - 100.0).abs() <= 1e-9);
    }

    #[test]
    fn empty_input_is_none() {
        assert!(monotone_subpath(&[]).is_none());
    }
}
