// segment math and line intersection solving

use bevy::prelude::*;

use crate::config::{JUNCTION_EPS, PARALLEL_EPS};
use super::GenError;

/// A directed line segment from `a` to `b`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn delta(&self) -> Vec2 {
        self.b - self.a
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    /// Unit direction from `a` to `b`. Degenerate segments are rejected
    /// before construction, so normalization is safe here.
    pub fn dir(&self) -> Vec2 {
        self.delta().normalize()
    }

    /// Position at interpolation parameter `t`, `t=0` at `a`, `t=1` at `b`.
    pub fn lerp(&self, t: f32) -> Vec2 {
        self.a + self.delta() * t
    }

    /// Inverse of `lerp` for a point on (or near) the segment's line,
    /// solved by projecting onto the segment direction.
    pub fn param_of(&self, p: Vec2) -> f32 {
        let d = self.delta();
        (p - self.a).dot(d) / d.length_squared()
    }
}

/// One valid intersection of a probing line with a committed segment.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hit {
    /// Index of the segment in the order it was probed.
    pub index: usize,
    pub pos: Vec2,
    /// Interpolation parameter of the hit along the segment, in [0,1].
    pub t: f32,
    /// Signed distance of the hit along the probing line (dir is unit).
    pub s: f32,
}

/// Solves the infinite line through `origin` with direction `dir` against one
/// segment, by Cramer's rule on `origin + s*dir = a + t*(b-a)`.
///
/// Returns `None` for parallel lines or when the intersection lies outside
/// the segment's actual extent (`t` not in [0,1]); the probing line itself is
/// unbounded.
pub fn line_hit(origin: Vec2, dir: Vec2, segment: &Segment) -> Option<(Vec2, f32, f32)> {
    let e = segment.delta();
    let denom = dir.x * e.y - e.x * dir.y;
    if denom.abs() < PARALLEL_EPS {
        return None;
    }

    let oa = origin - segment.a;
    let t = (dir.x * oa.y - dir.y * oa.x) / denom;
    let s = (e.x * oa.y - e.y * oa.x) / denom;

    if (0.0..=1.0).contains(&t) {
        Some((origin + dir * s, t, s))
    } else {
        None
    }
}

/// Probes the line against every segment, keeping valid hits in segment order.
pub fn find_intersections<'a, I>(origin: Vec2, dir: Vec2, segments: I) -> Vec<Hit>
where
    I: IntoIterator<Item = &'a Segment>,
{
    segments
        .into_iter()
        .enumerate()
        .filter_map(|(index, seg)| {
            line_hit(origin, dir, seg).map(|(pos, t, s)| Hit { index, pos, t, s })
        })
        .collect()
}

/// Picks the nearest hit on each side of the probe origin.
///
/// Hits are partitioned by the sign of their distance along the probing line,
/// excluding anything within `JUNCTION_EPS` of the origin so the branch point
/// itself (the parent road) is never picked. Inside a closed boundary
/// rectangle both sides always have a candidate; `NoIntersection` covers the
/// degenerate configurations where one side comes up empty.
pub fn closest_intersections(hits: &[Hit]) -> Result<(Hit, Hit), GenError> {
    let nearest = |side: fn(f32) -> bool| {
        hits.iter()
            .filter(|h| side(h.s) && h.s.abs() > JUNCTION_EPS)
            .min_by(|a, b| a.s.abs().total_cmp(&b.s.abs()))
            .copied()
    };

    let left = nearest(|s| s < 0.0).ok_or(GenError::NoIntersection)?;
    let right = nearest(|s| s > 0.0).ok_or(GenError::NoIntersection)?;
    Ok((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(ax: f32, ay: f32, bx: f32, by: f32) -> Segment {
        Segment::new(Vec2::new(ax, ay), Vec2::new(bx, by))
    }

    #[test]
    fn lerp_and_param_roundtrip() {
        let s = seg(10.0, 20.0, 50.0, 100.0);
        let p = s.lerp(0.25);
        assert!((s.param_of(p) - 0.25).abs() < 1e-6);
        assert_eq!(s.lerp(0.0), s.a);
        assert_eq!(s.lerp(1.0), s.b);
    }

    #[test]
    fn hit_crosses_segment_midpoint() {
        let s = seg(2.0, -1.0, 2.0, 1.0);
        let (pos, t, dist) = line_hit(Vec2::ZERO, Vec2::X, &s).unwrap();
        assert!((pos - Vec2::new(2.0, 0.0)).length() < 1e-6);
        assert!((t - 0.5).abs() < 1e-6);
        assert!((dist - 2.0).abs() < 1e-6);
    }

    #[test]
    fn parallel_lines_never_hit() {
        let s = seg(0.0, 5.0, 10.0, 5.0);
        assert!(line_hit(Vec2::ZERO, Vec2::X, &s).is_none());
    }

    #[test]
    fn hit_outside_segment_extent_is_rejected() {
        // the infinite lines cross at (5, 0), but the segment stops at x=4
        let s = seg(3.0, -2.0, 4.0, -1.0);
        assert!(line_hit(Vec2::ZERO, Vec2::X, &s).is_none());
    }

    #[test]
    fn hits_preserve_segment_order() {
        let segs = vec![
            seg(6.0, -1.0, 6.0, 1.0),
            seg(0.0, 5.0, 10.0, 5.0), // parallel, skipped
            seg(2.0, -1.0, 2.0, 1.0),
        ];
        let hits = find_intersections(Vec2::ZERO, Vec2::X, &segs);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[1].index, 2);
    }

    #[test]
    fn closest_picks_nearest_on_each_side() {
        let segs = vec![
            seg(-8.0, -1.0, -8.0, 1.0),
            seg(-3.0, -1.0, -3.0, 1.0),
            seg(4.0, -1.0, 4.0, 1.0),
            seg(9.0, -1.0, 9.0, 1.0),
        ];
        let hits = find_intersections(Vec2::ZERO, Vec2::X, &segs);
        let (left, right) = closest_intersections(&hits).unwrap();
        assert_eq!(left.index, 1);
        assert_eq!(right.index, 2);
    }

    #[test]
    fn coincident_hit_at_origin_is_excluded() {
        // the middle segment passes through the origin itself, like the
        // parent road at a branch point
        let segs = vec![
            seg(-3.0, -1.0, -3.0, 1.0),
            seg(0.0, -1.0, 0.0, 1.0),
            seg(4.0, -1.0, 4.0, 1.0),
        ];
        let hits = find_intersections(Vec2::ZERO, Vec2::X, &segs);
        let (left, right) = closest_intersections(&hits).unwrap();
        assert_eq!(left.index, 0);
        assert_eq!(right.index, 2);
    }

    #[test]
    fn one_empty_side_fails() {
        let segs = vec![seg(4.0, -1.0, 4.0, 1.0)];
        let hits = find_intersections(Vec2::ZERO, Vec2::X, &segs);
        assert_eq!(
            closest_intersections(&hits),
            Err(GenError::NoIntersection)
        );
    }

    #[test]
    fn vertical_probe_line_partitions_by_side() {
        // a truly vertical probe would defeat x-coordinate partitioning;
        // signed distance along the probe handles it
        let segs = vec![
            seg(-1.0, -5.0, 1.0, -5.0),
            seg(-1.0, 7.0, 1.0, 7.0),
        ];
        let hits = find_intersections(Vec2::ZERO, Vec2::Y, &segs);
        let (left, right) = closest_intersections(&hits).unwrap();
        assert_eq!(left.index, 0);
        assert_eq!(right.index, 1);
    }
}
