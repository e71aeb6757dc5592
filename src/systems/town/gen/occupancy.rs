// spatial occupancy oracle
//
// Decides whether a candidate footprint (thick segment) would overlap any
// committed geometry, without exact polygon-polygon math: an NxN grid of
// sample points across the candidate rectangle is tested against the
// oriented rectangles committed so far. A true overlap thinner than the
// sample spacing can slip through; a reported overlap is always real.

use bevy::prelude::*;

use crate::config::{OCCUPANCY_CELL, OCCUPANCY_PAD, OCCUPANCY_SAMPLES};
use super::geometry::Segment;

/// Physical extent of a road or building: a centerline plus a width.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Footprint {
    pub seg: Segment,
    pub width: f32,
}

impl Footprint {
    pub fn new(seg: Segment, width: f32) -> Self {
        Self { seg, width }
    }

    /// Oriented-rectangle point test: project onto the centerline direction
    /// for the longitudinal check, onto its normal for the lateral one.
    pub fn contains(&self, p: Vec2) -> bool {
        let d = self.seg.delta();
        let len_sq = d.length_squared();
        if len_sq <= f32::EPSILON {
            return false;
        }

        let rel = p - self.seg.a;
        let along = rel.dot(d) / len_sq;
        if !(0.0..=1.0).contains(&along) {
            return false;
        }

        let lateral = rel.perp_dot(d).abs() / len_sq.sqrt();
        lateral <= self.width * 0.5
    }

    fn corners(&self) -> [Vec2; 4] {
        let half = self.seg.dir().perp() * (self.width * 0.5);
        [
            self.seg.a + half,
            self.seg.a - half,
            self.seg.b + half,
            self.seg.b - half,
        ]
    }

    /// Evenly spaced NxN sample points spanning the footprint rectangle.
    fn sample_grid(&self) -> Vec<Vec2> {
        let n = OCCUPANCY_SAMPLES;
        let lateral = self.seg.dir().perp();
        let corner = self.seg.a - lateral * (self.width * 0.5);
        let u = lateral * (self.width / (n - 1) as f32);
        let v = self.seg.delta() / (n - 1) as f32;

        let mut points = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                points.push(corner + u * i as f32 + v * j as f32);
            }
        }
        points
    }
}

/// Committed footprints, bucketed into a coarse uniform grid so point
/// queries only scan nearby shapes instead of the whole town.
pub struct Occupancy {
    origin: Vec2,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
    shapes: Vec<Footprint>,
}

impl Occupancy {
    /// The grid is padded beyond the town rectangle: boundary walls extend
    /// half a road width outside it, and buildings can poke past the edge
    /// of a road that ends on the boundary.
    pub fn new(town_width: f32, town_height: f32) -> Self {
        let origin = Vec2::splat(-OCCUPANCY_PAD);
        let cols = ((town_width + 2.0 * OCCUPANCY_PAD) / OCCUPANCY_CELL).ceil().max(1.0) as usize;
        let rows = ((town_height + 2.0 * OCCUPANCY_PAD) / OCCUPANCY_CELL).ceil().max(1.0) as usize;
        Self {
            origin,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
            shapes: Vec::new(),
        }
    }

    // points outside the padded area clamp to the edge cells, on both the
    // insert and query paths, so the two always agree
    fn cell_coords(&self, p: Vec2) -> (usize, usize) {
        let local = (p - self.origin) / OCCUPANCY_CELL;
        let cx = (local.x.floor() as isize).clamp(0, self.cols as isize - 1) as usize;
        let cy = (local.y.floor() as isize).clamp(0, self.rows as isize - 1) as usize;
        (cx, cy)
    }

    /// Commits a footprint, registering it under every cell its bounding
    /// box touches.
    pub fn insert(&mut self, footprint: Footprint) {
        let index = self.shapes.len();

        let corners = footprint.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.min(*c);
            max = max.max(*c);
        }

        let (cx0, cy0) = self.cell_coords(min);
        let (cx1, cy1) = self.cell_coords(max);
        for cy in cy0..=cy1 {
            for cx in cx0..=cx1 {
                self.cells[cy * self.cols + cx].push(index);
            }
        }

        self.shapes.push(footprint);
    }

    /// True when no sample point of the candidate falls inside any committed
    /// footprint. Never mutates, so repeated queries agree.
    pub fn is_free(&self, candidate: &Footprint) -> bool {
        candidate.sample_grid().iter().all(|&p| {
            let (cx, cy) = self.cell_coords(p);
            self.cells[cy * self.cols + cx]
                .iter()
                .all(|&i| !self.shapes[i].contains(p))
        })
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}
