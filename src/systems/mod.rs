use bevy::prelude::*;

pub mod bodies;
pub mod camera;
pub mod mission;
pub mod navigation;
pub mod scene;
pub mod time;
pub mod timers;
pub mod ui;

/// Order of work inside one frame. Input handlers finish before the
/// simulation advances, and the camera is framed last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Timers,
    Advance,
    Navigate,
    Frame,
    Ui,
}

pub fn configure_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SimSet::Input,
            SimSet::Timers,
            SimSet::Advance,
            SimSet::Navigate,
            SimSet::Frame,
            SimSet::Ui,
        )
            .chain(),
    );
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        configure_sets(app);
        app.add_plugins((
            time::ClockPlugin,
            scene::ScenePlugin,
            mission::MissionPlugin,
            navigation::NavigationPlugin,
            camera::ViewPlugin,
            ui::ControlPanelPlugin,
        ));
    }
}
