// town plugin: owns the committed Town resource and regenerates it wholesale

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod r#gen;
pub mod names;
pub mod render;

use crate::config::{INITIAL_SEED, TOWN_HEIGHT, TOWN_WIDTH};
use r#gen::{Params, Town, generate};

#[derive(Resource)]
pub struct Seed(pub u64);

/// Requests a full regeneration; the previous town is discarded wholesale.
#[derive(Event)]
pub struct RegenerateEvent {
    pub seed: u64,
}

/// What the cursor is currently over, keyed by the stable indices the
/// engine guarantees for one generation run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HoverTarget {
    Road(usize),
    Building { road: usize, building: usize },
}

#[derive(Resource, Default)]
pub struct Hovered(pub Option<HoverTarget>);

pub struct TownPlugin;

impl Plugin for TownPlugin {
    fn build(&self, app: &mut App) {
        let params = Params::default();
        let town = build_town(INITIAL_SEED, &params);

        app.insert_resource(Seed(INITIAL_SEED))
            .insert_resource(params)
            .insert_resource(town)
            .insert_resource(Hovered::default())
            .add_event::<RegenerateEvent>()
            .add_systems(Startup, spawn_initial_town)
            .add_systems(Update, (handle_regeneration, render::apply_hover_colors));
    }
}

// one full generation pass plus the cosmetic street names; a geometry
// failure leaves an empty town rather than a half-committed one
fn build_town(seed: u64, params: &Params) -> Town {
    let mut rng = StdRng::seed_from_u64(seed);
    match generate(TOWN_WIDTH, TOWN_HEIGHT, params, &mut rng) {
        Ok(mut town) => {
            names::assign_street_names(&mut town, &mut rng);
            info!(
                "generated town: {} roads, {} buildings (seed {seed})",
                town.roads.len(),
                town.building_count()
            );
            town
        }
        Err(err) => {
            warn!("town generation failed: {err}");
            Town::empty(TOWN_WIDTH, TOWN_HEIGHT)
        }
    }
}

fn spawn_initial_town(mut commands: Commands, town: Res<Town>) {
    render::spawn_shapes(&mut commands, &town);
}

pub fn handle_regeneration(
    mut commands: Commands,
    mut events: EventReader<RegenerateEvent>,
    mut seed: ResMut<Seed>,
    params: Res<Params>,
    mut town: ResMut<Town>,
    mut hovered: ResMut<Hovered>,
    shapes: Query<Entity, With<render::ShapeMarker>>,
) {
    for event in events.read() {
        seed.0 = event.seed;
        *town = build_town(event.seed, &params);
        hovered.0 = None;

        // indices from the old town are meaningless now
        for entity in shapes.iter() {
            commands.entity(entity).despawn();
        }
        render::spawn_shapes(&mut commands, &town);
    }
}
