use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::systems::town::r#gen::{Params, Town};
use crate::systems::town::{HoverTarget, Hovered, RegenerateEvent, Seed};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app.add_systems(EguiPrimaryContextPass, ui_main);
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    current_seed: Res<Seed>,
    mut params: ResMut<Params>,
    town: Res<Town>,
    hovered: Res<Hovered>,
    mut regen_events: EventWriter<RegenerateEvent>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::right("info_panel")
            .default_width(200.0)
            .resizable(false)
            .show(ctx, |ui| {
                // hover info, correlated back through stable indices
                let (name, kind) = match hovered.0 {
                    Some(HoverTarget::Road(i)) => {
                        let road = &town.roads[i];
                        (road.name.clone(), road.kind.label())
                    }
                    Some(HoverTarget::Building { road, building }) => {
                        let road = &town.roads[road];
                        let b = &road.buildings[building];
                        (format!("{} {}", b.number, road.name), b.kind.label())
                    }
                    None => (String::new(), ""),
                };
                let headline = if name.is_empty() { " " } else { name.as_str() };
                ui.label(egui::RichText::new(headline).strong());
                ui.label(kind);

                ui.separator();

                ui.label(format!("Seed: {}", current_seed.0));
                ui.label(format!("Roads: {}", town.roads.len()));
                ui.label(format!("Buildings: {}", town.building_count()));

                ui.separator();

                egui::CollapsingHeader::new("Parameters")
                    .default_open(false)
                    .show(ui, |ui| {
                        ui.add(
                            egui::Slider::new(&mut params.major_min, 0..=6)
                                .text("min major roads"),
                        );
                        ui.add(
                            egui::Slider::new(&mut params.major_max, 0..=6)
                                .text("max major roads"),
                        );
                        // keep the draw range well-formed
                        params.major_max = params.major_max.max(params.major_min);

                        ui.add(
                            egui::Slider::new(&mut params.minor_branch_divisor, 50.0..=400.0)
                                .text("minor branch divisor"),
                        );
                        ui.add(
                            egui::Slider::new(&mut params.tiny_branch_divisor, 20.0..=200.0)
                                .text("tiny branch divisor"),
                        );
                        ui.add(
                            egui::Slider::new(&mut params.building_margin, 0.0..=20.0)
                                .text("building margin"),
                        );
                        ui.label("Applied on the next generation.");
                    });

                ui.separator();

                if ui.button("Generate New Town").clicked() {
                    regen_events.write(RegenerateEvent {
                        seed: rand::random(),
                    });
                }
            });
    }
}
