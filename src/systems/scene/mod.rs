use bevy::prelude::*;

pub mod launchpad;
pub mod solar;

use crate::config::SKY_COLOR;
use crate::systems::bodies::{hex_color, BodyId};
use crate::systems::mission::{BuildSolarSystem, Phase};
use crate::systems::SimSet;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(hex_color(SKY_COLOR, 1.0)))
            .add_systems(Startup, launchpad::start)
            .add_systems(
                Update,
                solar::build
                    .run_if(on_event::<BuildSolarSystem>)
                    .run_if(in_state(Phase::EarthOrbit))
                    .in_set(SimSet::Advance),
            );
    }
}

// launch pad ground tag
#[derive(Component)]
pub struct Ground;

// parent of every cloud puff
#[derive(Component)]
pub struct CloudLayer;

#[derive(Component)]
pub struct Cloud;

/// The Earth the camera and parking orbit refer to. First the launch-pad
/// globe, then the Earth planet once the solar system is built.
#[derive(Component)]
pub struct HomeWorld;

#[derive(Component)]
pub struct Sun;

#[derive(Component)]
pub struct Starfield;

#[derive(Component, Debug, Clone, Copy)]
pub struct Planet(pub BodyId);

#[derive(Component, Debug, Default)]
pub struct Rocket {
    pub orbit_angle: f32,
}

#[derive(Component)]
pub struct MainCamera;
