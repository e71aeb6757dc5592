use bevy::prelude::*;
use bevy::window::{PrimaryWindow, Window};

use crate::systems::town::r#gen::Town;
use crate::systems::town::{HoverTarget, Hovered, render};

// handle mouse hover over committed shapes
// hit-testing runs on the town's own geometry, not on rendered pixels
pub fn handle_mouse_hover(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    town: Res<Town>,
    mut hovered: ResMut<Hovered>,
) {
    let Ok(window) = windows.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };

    let Some(cursor_pos) = window.cursor_position() else {
        if hovered.0.is_some() {
            hovered.0 = None;
        }
        return;
    };
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_pos) else {
        return;
    };

    let town_pos = render::world_to_town(&town, world_pos);
    let target = hit_test(&town, town_pos);
    if hovered.0 != target {
        hovered.0 = target;
    }
}

// topmost shape under the cursor: buildings draw above every road, and
// wider road kinds above narrower ones
fn hit_test(town: &Town, p: Vec2) -> Option<HoverTarget> {
    for (road_index, road) in town.roads.iter().enumerate() {
        for (b_index, building) in road.buildings.iter().enumerate() {
            if building.footprint().contains(p) {
                return Some(HoverTarget::Building {
                    road: road_index,
                    building: b_index,
                });
            }
        }
    }

    town.roads
        .iter()
        .enumerate()
        .filter(|(_, road)| road.footprint().contains(p))
        .max_by(|a, b| render::road_z(a.1.kind).total_cmp(&render::road_z(b.1.kind)))
        .map(|(index, _)| HoverTarget::Road(index))
}
