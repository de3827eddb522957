use bevy::log::LogPlugin;
use bevy::prelude::*;

mod config;
mod systems;
use systems::SimulationPlugin;

fn main() -> bevy::app::AppExit {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Rocket Launch".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,bevy_rocketlaunch=debug".into(),
                    ..default()
                }),
        )
        .add_plugins(SimulationPlugin)
        .run()
}
