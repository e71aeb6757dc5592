// building placement: walk both sides of every non-boundary road, sampling
// candidate footprints and committing whichever ones the oracle accepts

use bevy::prelude::*;
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::{HOUSE_THRESHOLD, RESTAURANT_THRESHOLD, STORE_THRESHOLD};
use super::geometry::Segment;
use super::occupancy::{Footprint, Occupancy};
use super::roads::RoadKind;
use super::{Params, Town};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BuildingKind {
    House,
    Store,
    Restaurant,
    ServiceBuilding,
}

impl BuildingKind {
    pub fn label(self) -> &'static str {
        match self {
            BuildingKind::House => "House",
            BuildingKind::Store => "Store",
            BuildingKind::Restaurant => "Restaurant",
            BuildingKind::ServiceBuilding => "ServiceBuilding",
        }
    }
}

/// A committed building footprint, owned by the road it was placed against.
#[derive(Clone, PartialEq, Debug)]
pub struct Building {
    /// Centerline from the roadside inward to the back of the plot.
    pub seg: Segment,
    pub width: f32,
    pub kind: BuildingKind,
    /// Street number: odd on the left side of the road, even on the right.
    pub number: u32,
}

impl Building {
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.seg, self.width)
    }
}

/// Weighted kind draw by cumulative thresholds on a single uniform sample.
pub fn pick_kind(rng: &mut StdRng) -> BuildingKind {
    let choice = rng.random::<f32>();
    if choice < HOUSE_THRESHOLD {
        BuildingKind::House
    } else if choice < STORE_THRESHOLD {
        BuildingKind::Store
    } else if choice < RESTAURANT_THRESHOLD {
        BuildingKind::Restaurant
    } else {
        BuildingKind::ServiceBuilding
    }
}

/// Lines every non-boundary road with buildings. Roads must all be
/// registered with the oracle before the first candidate is tested.
pub fn place_all(town: &mut Town, oracle: &mut Occupancy, params: &Params, rng: &mut StdRng) {
    for index in 0..town.roads.len() {
        if town.roads[index].kind == RoadKind::Boundary {
            continue;
        }
        line_road(town, index, oracle, params, rng);
    }
}

/// Walks one road's two lateral sides independently. Rejected candidates are
/// simply skipped; density emerges from the sampling resolution and the
/// randomized sizes, not from a target count.
fn line_road(
    town: &mut Town,
    index: usize,
    oracle: &mut Occupancy,
    params: &Params,
    rng: &mut StdRng,
) {
    let seg = town.roads[index].seg;
    let road_width = town.roads[index].width();

    // offset from the road centerline to just past its painted edge
    let left = seg.dir().perp() * ((road_width + params.building_margin) * 0.5);

    for (side, first_number) in [(left, 1), (-left, 2)] {
        let outward = side.normalize();
        let mut count = 0u32;

        for i in 0..params.roadside_samples {
            let t = i as f32 / (params.roadside_samples - 1) as f32;
            let width =
                rng.random_range(params.building_size_min..=params.building_size_max) as f32;
            let length =
                rng.random_range(params.building_size_min..=params.building_size_max) as f32;

            let front = seg.lerp(t) + side;
            let candidate = Footprint::new(Segment::new(front, front + outward * length), width);

            if oracle.is_free(&candidate) {
                let building = Building {
                    seg: candidate.seg,
                    width,
                    kind: pick_kind(rng),
                    number: count * 2 + first_number,
                };
                town.roads[index].buildings.push(building);
                oracle.insert(candidate);
                count += 1;
            }
        }
    }
}
