// Configuration file, all measurements in town units (1 unit = 1 canvas pixel)
// This controls the initial generation parameter settings

// Town dimensions (units)
pub const TOWN_WIDTH: f32 = 800.0;
pub const TOWN_HEIGHT: f32 = 600.0;

pub const INITIAL_SEED: u64 = 4217850385263778012;

// Major road parameters
pub const MAJOR_ROAD_MIN: u32 = 2;
pub const MAJOR_ROAD_MAX: u32 = 3;
pub const MAJOR_INSET_MIN: f32 = 0.2;  // random endpoints land in 20%-80% of each axis
pub const MAJOR_INSET_MAX: f32 = 0.8;

// Branching parameters
pub const BRANCH_T_MIN: f32 = 0.1;     // never branch right at a road's endpoints
pub const BRANCH_T_MAX: f32 = 0.9;
pub const MINOR_BRANCH_DIVISOR: f32 = 150.0;  // branches per major ~ U(0, length/150)
pub const TINY_BRANCH_DIVISOR: f32 = 80.0;    // branches per minor ~ U(0, length/80)

// Road corridor widths (units)
pub const BOUNDARY_WIDTH: f32 = 25.0;
pub const MAJOR_WIDTH: f32 = 19.0;
pub const MINOR_WIDTH: f32 = 13.0;
pub const TINY_WIDTH: f32 = 9.0;

// Building parameters
pub const BUILDING_SIZE_MIN: u32 = 15;   // footprint width/length draw range (units)
pub const BUILDING_SIZE_MAX: u32 = 25;
pub const BUILDING_MARGIN: f32 = 5.0;    // gap between road edge and building front
pub const ROADSIDE_SAMPLES: usize = 51;  // candidate positions per road side

// Occupancy oracle parameters
pub const OCCUPANCY_SAMPLES: usize = 5;  // NxN sample grid per candidate footprint
pub const OCCUPANCY_CELL: f32 = 50.0;    // spatial index cell size (units)
pub const OCCUPANCY_PAD: f32 = 100.0;    // index margin beyond the town rectangle

// Geometry tolerances, scaled to the default 800x600 town
pub const PARALLEL_EPS: f32 = 1e-6;      // determinant cutoff for parallel lines
pub const JUNCTION_EPS: f32 = 1.0;       // min distance between a branch point and a picked junction
pub const MIN_SEGMENT_LENGTH: f32 = 1e-3; // anything shorter is degenerate

// Building kind weights, cumulative thresholds on U(0,1)
pub const HOUSE_THRESHOLD: f32 = 0.8;
pub const STORE_THRESHOLD: f32 = 0.9;
pub const RESTAURANT_THRESHOLD: f32 = 0.95; // remainder is service buildings
