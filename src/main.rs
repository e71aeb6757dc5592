use bevy::prelude::*;
use bevy::window::WindowPlugin;
use bevy_egui::EguiPlugin;

pub mod config;
pub mod systems;

use systems::town::TownPlugin;
use systems::ui::UIPlugin;

use crate::systems::interaction;

fn main() -> bevy::app::AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Town Sketch".to_string(),
                resolution: bevy::window::WindowResolution::new(1024.0, 680.0),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // my custom plugins
        .add_plugins(TownPlugin)
        .add_plugins(UIPlugin)
        .insert_resource(ClearColor(Color::srgb(0.06, 0.06, 0.06)))
        .add_systems(Startup, setup_camera)
        .add_systems(Update, (handle_exit, interaction::handle_mouse_hover))
        .run()
}

fn setup_camera(mut commands: Commands) {
    // fixed 2D view centered on the town rectangle
    commands.spawn(Camera2d);
}

// application exit
fn handle_exit(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
