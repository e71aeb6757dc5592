// cosmetic street naming, presentation-only: the engine never reads these

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use super::r#gen::{RoadKind, Town};

// every street is a "St"; the mixed-suffix look of real street names reads
// inconsistent at sketch scale
const STREET_NAMES: &[&str] = &[
    "Alder", "Ash", "Aspen", "Bayview", "Beech", "Birch", "Bridge", "Cedar", "Chapel", "Cherry",
    "Chestnut", "Church", "Cypress", "Dogwood", "Elm", "Forge", "Garden", "Granite", "Harbor",
    "Hawthorn", "Hazel", "Hickory", "Highland", "Holly", "Juniper", "Laurel", "Linden", "Magnolia",
    "Maple", "Meadow", "Mill", "Oak", "Orchard", "Pine", "Poplar", "Prospect", "Ridge", "River",
    "Rowan", "Spring", "Spruce", "Station", "Summit", "Sycamore", "Walnut", "Willow",
];

/// Gives every non-boundary road a `"<word> St"` display name. Buildings
/// derive theirs from the street number, so nothing is stored for them.
pub fn assign_street_names(town: &mut Town, rng: &mut StdRng) {
    for road in &mut town.roads {
        road.name = match road.kind {
            RoadKind::Boundary => "Boundary".to_string(),
            _ => format!("{} St", STREET_NAMES.choose(rng).copied().unwrap_or("Main")),
        };
    }
}
