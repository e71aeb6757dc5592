// road network growth: boundary walls, extended major roads, and
// perpendicular minor/tiny branches

use bevy::prelude::*;
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::*;
use super::buildings::Building;
use super::geometry::{self, Segment};
use super::occupancy::Footprint;
use super::{GenError, Params, Town};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RoadKind {
    Boundary,
    Major,
    Minor,
    Tiny,
}

impl RoadKind {
    pub fn width(self) -> f32 {
        match self {
            RoadKind::Boundary => BOUNDARY_WIDTH,
            RoadKind::Major => MAJOR_WIDTH,
            RoadKind::Minor => MINOR_WIDTH,
            RoadKind::Tiny => TINY_WIDTH,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoadKind::Boundary => "Boundary",
            RoadKind::Major => "MajorRoad",
            RoadKind::Minor => "MinorRoad",
            RoadKind::Tiny => "TinyRoad",
        }
    }
}

/// A committed road. Shape is immutable once in the network; the single
/// exception is a major road's one-time boundary extension, which happens
/// before commit.
#[derive(Clone, PartialEq, Debug)]
pub struct Road {
    pub seg: Segment,
    pub kind: RoadKind,
    /// Cosmetic display name, assigned by the presentation layer.
    pub name: String,
    /// Buildings placed against this road, in commit order.
    pub buildings: Vec<Building>,
}

impl Road {
    pub fn new(seg: Segment, kind: RoadKind) -> Result<Self, GenError> {
        if seg.length() < MIN_SEGMENT_LENGTH {
            return Err(GenError::DegenerateSegment);
        }
        Ok(Self {
            seg,
            kind,
            name: String::new(),
            buildings: Vec::new(),
        })
    }

    pub fn width(&self) -> f32 {
        self.kind.width()
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.seg, self.width())
    }
}

/// Commits the four boundary walls of the town rectangle.
pub fn spawn_boundary(town: &mut Town) -> Result<(), GenError> {
    let (w, h) = (town.width, town.height);
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(w, h),
        Vec2::new(0.0, h),
    ];
    for i in 0..4 {
        let seg = Segment::new(corners[i], corners[(i + 1) % 4]);
        town.roads.push(Road::new(seg, RoadKind::Boundary)?);
    }
    Ok(())
}

/// Commits one major road: a random interior segment, extended along its own
/// line until it spans the boundary walls.
pub fn spawn_major(town: &mut Town, params: &Params, rng: &mut StdRng) -> Result<usize, GenError> {
    let x0 = rng.random_range(params.major_inset_min..params.major_inset_max) * town.width;
    let y0 = rng.random_range(params.major_inset_min..params.major_inset_max) * town.height;
    let x1 = rng.random_range(params.major_inset_min..params.major_inset_max) * town.width;
    let y1 = rng.random_range(params.major_inset_min..params.major_inset_max) * town.height;

    let mut road = Road::new(
        Segment::new(Vec2::new(x0, y0), Vec2::new(x1, y1)),
        RoadKind::Major,
    )?;
    extend_to_boundary(&mut road, &town.roads)?;

    town.roads.push(road);
    Ok(town.roads.len() - 1)
}

/// Rewrites the road's endpoints to where its line meets the boundary walls.
/// A rectangular boundary yields exactly two such hits for any interior line;
/// a perfectly corner-diagonal line is an accepted degenerate and still
/// takes the first two.
fn extend_to_boundary(road: &mut Road, committed: &[Road]) -> Result<(), GenError> {
    let hits = geometry::find_intersections(
        road.seg.a,
        road.seg.dir(),
        committed.iter().map(|r| &r.seg),
    );
    let mut on_boundary = hits
        .iter()
        .filter(|h| committed[h.index].kind == RoadKind::Boundary);

    let first = on_boundary.next().ok_or(GenError::NoIntersection)?;
    let second = on_boundary.next().ok_or(GenError::NoIntersection)?;

    let extended = Segment::new(first.pos, second.pos);
    if extended.length() < MIN_SEGMENT_LENGTH {
        return Err(GenError::DegenerateSegment);
    }
    road.seg = extended;
    Ok(())
}

/// Commits one new road branching perpendicularly off `parent` at a random
/// interior point, forming either a three-way junction (connect to the
/// nearest crossing road on one side) or a four-way one (span both sides),
/// each outcome equally likely.
pub fn branch(
    town: &mut Town,
    parent: usize,
    kind: RoadKind,
    rng: &mut StdRng,
) -> Result<usize, GenError> {
    let parent_seg = town.roads[parent].seg;

    let t = rng.random_range(BRANCH_T_MIN..BRANCH_T_MAX);
    let origin = parent_seg.lerp(t);
    let probe = parent_seg.dir().perp();

    let hits = geometry::find_intersections(origin, probe, town.roads.iter().map(|r| &r.seg));
    let (left, right) = geometry::closest_intersections(&hits)?;

    let choice = rng.random::<f32>();
    let seg = if choice < 1.0 / 3.0 {
        Segment::new(origin, left.pos)
    } else if choice < 2.0 / 3.0 {
        Segment::new(origin, right.pos)
    } else {
        // four-way: the new road spans both junctions, passing through
        // the branch point without starting there
        Segment::new(left.pos, right.pos)
    };

    town.roads.push(Road::new(seg, kind)?);
    Ok(town.roads.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn bounded_town() -> Town {
        let mut town = Town::empty(800.0, 600.0);
        spawn_boundary(&mut town).unwrap();
        town
    }

    fn on_rectangle_edge(p: Vec2) -> bool {
        let eps = 1e-3;
        p.x.abs() < eps || (p.x - 800.0).abs() < eps || p.y.abs() < eps || (p.y - 600.0).abs() < eps
    }

    #[test]
    fn boundary_forms_a_closed_rectangle() {
        let town = bounded_town();
        assert_eq!(town.roads.len(), 4);
        for i in 0..4 {
            assert_eq!(town.roads[i].kind, RoadKind::Boundary);
            // each wall ends where the next begins
            assert_eq!(town.roads[i].seg.b, town.roads[(i + 1) % 4].seg.a);
        }
    }

    #[test]
    fn widths_shrink_with_road_rank() {
        assert!(RoadKind::Boundary.width() > RoadKind::Major.width());
        assert!(RoadKind::Major.width() > RoadKind::Minor.width());
        assert!(RoadKind::Minor.width() > RoadKind::Tiny.width());
    }

    #[test]
    fn zero_length_road_is_rejected() {
        let p = Vec2::new(10.0, 10.0);
        assert_eq!(
            Road::new(Segment::new(p, p), RoadKind::Minor).unwrap_err(),
            GenError::DegenerateSegment
        );
    }

    #[test]
    fn major_extension_lands_on_the_boundary() {
        let town = bounded_town();
        let mut road = Road::new(
            Segment::new(Vec2::new(200.0, 200.0), Vec2::new(600.0, 400.0)),
            RoadKind::Major,
        )
        .unwrap();

        extend_to_boundary(&mut road, &town.roads).unwrap();
        assert!(on_rectangle_edge(road.seg.a));
        assert!(on_rectangle_edge(road.seg.b));
        // longer than the random stub it started from
        assert!(road.seg.length() > 447.0);
    }

    #[test]
    fn extension_without_boundary_walls_fails() {
        let town = Town::empty(800.0, 600.0);
        let mut road = Road::new(
            Segment::new(Vec2::new(200.0, 200.0), Vec2::new(600.0, 400.0)),
            RoadKind::Major,
        )
        .unwrap();

        assert_eq!(
            extend_to_boundary(&mut road, &town.roads),
            Err(GenError::NoIntersection)
        );
    }

    #[test]
    fn branches_form_both_junction_shapes() {
        let parent_seg = Segment::new(Vec2::new(250.0, 0.0), Vec2::new(400.0, 600.0));

        let mut three_way = 0;
        let mut four_way = 0;
        for seed in 0..60 {
            let mut town = bounded_town();
            town.roads
                .push(Road::new(parent_seg, RoadKind::Major).unwrap());

            let mut rng = StdRng::seed_from_u64(seed);
            let idx = branch(&mut town, 4, RoadKind::Minor, &mut rng).unwrap();
            let new = &town.roads[idx];
            assert_eq!(new.kind, RoadKind::Minor);

            // a three-way branch starts on the parent centerline, a
            // four-way one merely crosses it
            let starts_on_parent = [new.seg.a, new.seg.b].iter().any(|&p| {
                let lateral = (p - parent_seg.a).perp_dot(parent_seg.dir()).abs();
                lateral < 1e-3
            });
            if starts_on_parent {
                three_way += 1;
            } else {
                four_way += 1;
            }
        }
        assert!(three_way > 0);
        assert!(four_way > 0);
    }

    #[test]
    fn branch_crossing_stays_inside_parent_interior() {
        let parent_seg = Segment::new(Vec2::new(250.0, 0.0), Vec2::new(400.0, 600.0));

        for seed in 0..60 {
            let mut town = bounded_town();
            town.roads
                .push(Road::new(parent_seg, RoadKind::Major).unwrap());

            let mut rng = StdRng::seed_from_u64(seed);
            let idx = branch(&mut town, 4, RoadKind::Minor, &mut rng).unwrap();
            let new = town.roads[idx].seg;

            // wherever the new road meets the parent is the branch origin
            let (_, t, _) = geometry::line_hit(new.a, new.dir(), &parent_seg).unwrap();
            assert!((BRANCH_T_MIN - 1e-4..=BRANCH_T_MAX + 1e-4).contains(&t));
        }
    }
}
