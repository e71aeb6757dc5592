// draws the committed town: one rotated rectangle sprite per shape

use bevy::prelude::*;

use super::r#gen::{BuildingKind, RoadKind, Town};
use super::{HoverTarget, Hovered};

/// Marks every spawned shape so regeneration can clear the lot.
#[derive(Component)]
pub struct ShapeMarker;

#[derive(Component)]
pub struct RoadSprite(pub usize);

#[derive(Component)]
pub struct BuildingSprite {
    pub road: usize,
    pub building: usize,
}

const HOVER_COLOR: Color = Color::srgb(0.49, 0.99, 0.0); // lawn green
const GRASS_COLOR: Color = Color::srgb(0.0, 0.5, 0.0);

pub fn road_color(kind: RoadKind) -> Color {
    match kind {
        RoadKind::Boundary => Color::srgb_u8(3, 3, 3),
        RoadKind::Major => Color::srgb_u8(31, 31, 31),
        RoadKind::Minor => Color::srgb_u8(51, 51, 51),
        RoadKind::Tiny => Color::srgb_u8(77, 77, 77),
    }
}

pub fn building_color(kind: BuildingKind) -> Color {
    match kind {
        BuildingKind::House => Color::srgb_u8(139, 54, 38),
        BuildingKind::Store => Color::srgb_u8(72, 118, 255),
        BuildingKind::Restaurant => Color::srgb_u8(218, 165, 32),
        BuildingKind::ServiceBuilding => Color::srgb_u8(204, 204, 204),
    }
}

// wider roads layer above narrower ones, buildings above everything
pub fn road_z(kind: RoadKind) -> f32 {
    match kind {
        RoadKind::Boundary => 0.4,
        RoadKind::Major => 0.3,
        RoadKind::Minor => 0.2,
        RoadKind::Tiny => 0.1,
    }
}

const BUILDING_Z: f32 = 0.5;

// town coordinates are y-down with the origin at the top-left corner;
// world coordinates are y-up centered on the town rectangle
fn to_world(town: &Town, p: Vec2, z: f32) -> Vec3 {
    Vec3::new(p.x - town.width * 0.5, town.height * 0.5 - p.y, z)
}

pub fn world_to_town(town: &Town, world: Vec2) -> Vec2 {
    Vec2::new(world.x + town.width * 0.5, town.height * 0.5 - world.y)
}

fn rect_sprite(town: &Town, a: Vec2, b: Vec2, width: f32, color: Color, z: f32) -> (Sprite, Transform) {
    let delta = b - a;
    let world_angle = Vec2::new(delta.x, -delta.y).to_angle();
    (
        Sprite {
            color,
            custom_size: Some(Vec2::new(delta.length(), width)),
            ..default()
        },
        Transform {
            translation: to_world(town, (a + b) * 0.5, z),
            rotation: Quat::from_rotation_z(world_angle),
            ..default()
        },
    )
}

pub fn spawn_shapes(commands: &mut Commands, town: &Town) {
    // grass backdrop covering the town rectangle
    commands.spawn((
        Sprite {
            color: GRASS_COLOR,
            custom_size: Some(Vec2::new(town.width, town.height)),
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        ShapeMarker,
    ));

    for (index, road) in town.roads.iter().enumerate() {
        let (sprite, transform) = rect_sprite(
            town,
            road.seg.a,
            road.seg.b,
            road.width(),
            road_color(road.kind),
            road_z(road.kind),
        );
        commands.spawn((sprite, transform, ShapeMarker, RoadSprite(index)));

        for (b_index, building) in road.buildings.iter().enumerate() {
            let (sprite, transform) = rect_sprite(
                town,
                building.seg.a,
                building.seg.b,
                building.width,
                building_color(building.kind),
                BUILDING_Z,
            );
            commands.spawn((
                sprite,
                transform,
                ShapeMarker,
                BuildingSprite {
                    road: index,
                    building: b_index,
                },
            ));
        }
    }
}

/// Repaints shapes as the hover target changes. Boundary walls report hover
/// info but never highlight.
pub fn apply_hover_colors(
    hovered: Res<Hovered>,
    town: Res<Town>,
    mut roads: Query<(&RoadSprite, &mut Sprite), Without<BuildingSprite>>,
    mut buildings: Query<(&BuildingSprite, &mut Sprite), Without<RoadSprite>>,
) {
    if !hovered.is_changed() {
        return;
    }

    for (marker, mut sprite) in roads.iter_mut() {
        let Some(road) = town.roads.get(marker.0) else { continue };
        let is_hover =
            hovered.0 == Some(HoverTarget::Road(marker.0)) && road.kind != RoadKind::Boundary;
        sprite.color = if is_hover {
            HOVER_COLOR
        } else {
            road_color(road.kind)
        };
    }

    for (marker, mut sprite) in buildings.iter_mut() {
        let Some(building) = town
            .roads
            .get(marker.road)
            .and_then(|r| r.buildings.get(marker.building))
        else {
            continue;
        };
        let is_hover = hovered.0
            == Some(HoverTarget::Building {
                road: marker.road,
                building: marker.building,
            });
        sprite.color = if is_hover {
            HOVER_COLOR
        } else {
            building_color(building.kind)
        };
    }
}
