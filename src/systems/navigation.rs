//! navigation.rs
//!
//! Flying the rocket between planets once the solar system exists.

use bevy::prelude::*;
use thiserror::Error;

use crate::config::{ARRIVAL_THRESHOLD, FOCUS_ORBIT_RADIUS_FACTOR, FOCUS_ORBIT_SPEED, TRAVEL_STEP};
use crate::systems::bodies::BodyId;
use crate::systems::mission::Phase;
use crate::systems::scene::{Planet, Rocket};
use crate::systems::SimSet;

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Navigation>()
            .add_event::<BodySelected>()
            .add_systems(Update, select_body.in_set(SimSet::Timers))
            .add_systems(Update, navigate.run_if(in_state(Phase::Interplanetary)).in_set(SimSet::Navigate));
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no body named {0:?}")]
    UnknownBody(String),
}

/// A body was picked in the UI, by name.
#[derive(Event, Debug, Clone)]
pub struct BodySelected(pub String);

/// Where the rocket is heading and what it is looking at.
#[derive(Resource, Debug, Default)]
pub struct Navigation {
    target: Option<BodyId>,
    focus: Option<BodyId>,
}

impl Navigation {
    pub fn target(&self) -> Option<BodyId> {
        self.target
    }

    pub fn focus(&self) -> Option<BodyId> {
        self.focus
    }

    /// Body to mark in the panel: the trip's destination, or once there, what is framed.
    pub fn highlighted(&self) -> Option<BodyId> {
        self.target.or(self.focus)
    }

    pub fn set_focus(&mut self, body: BodyId) {
        self.focus = Some(body);
    }

    /// Head for the named body, replacing any trip in progress.
    /// Unknown names leave everything as it was.
    pub fn select(&mut self, name: &str) -> Result<BodyId, NavigationError> {
        let body = BodyId::find(name).ok_or_else(|| NavigationError::UnknownBody(name.to_string()))?;
        self.target = Some(body);
        self.focus = Some(body);
        Ok(body)
    }

    fn arrive(&mut self) {
        if let Some(body) = self.target.take() {
            self.focus = Some(body);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Travel {
    EnRoute,
    Arrived,
}

/// Moves one step toward `target`, or reports arrival when already close enough.
pub fn travel_toward(rocket: &mut Transform, target: Vec3) -> Travel {
    let to_target = target - rocket.translation;
    if to_target.length() <= ARRIVAL_THRESHOLD {
        return Travel::Arrived;
    }

    rocket.translation += to_target.normalize() * TRAVEL_STEP;
    rocket.look_at(target, Vec3::Y);
    Travel::EnRoute
}

/// Places the rocket on a horizontal circle around `center`. Height is left alone.
pub fn orbit_around(rocket: &mut Transform, center: Vec3, radius: f32, angle: f32) {
    rocket.translation.x = center.x + angle.cos() * radius;
    rocket.translation.z = center.z + angle.sin() * radius;
}

/// One navigation tick. `locate` gives the current position of a body, if it has been built.
pub fn steer(
    nav: &mut Navigation,
    transform: &mut Transform,
    rocket: &mut Rocket,
    locate: impl Fn(BodyId) -> Option<Vec3>,
) {
    if let Some(target) = nav.target {
        let Some(position) = locate(target) else {
            return;
        };
        if travel_toward(transform, position) == Travel::Arrived {
            info!("arrived at {}", target.body().name);
            nav.arrive();
        }
    } else if let Some(focus) = nav.focus {
        let Some(center) = locate(focus) else {
            return;
        };
        rocket.orbit_angle += FOCUS_ORBIT_SPEED;
        orbit_around(transform, center, focus.body().radius * FOCUS_ORBIT_RADIUS_FACTOR, rocket.orbit_angle);
        transform.look_at(center, Vec3::Y);
    }
}

fn select_body(mut selections: EventReader<BodySelected>, mut nav: ResMut<Navigation>) {
    for BodySelected(name) in selections.read() {
        match nav.select(name) {
            Ok(body) => info!("heading for {}", body.body().name),
            Err(e) => warn!("{}", e),
        }
    }
}

fn navigate(
    mut nav: ResMut<Navigation>,
    mut rocket_query: Query<(&mut Transform, &mut Rocket)>,
    planet_query: Query<(&Planet, &Transform), Without<Rocket>>,
) {
    let Ok((mut transform, mut rocket)) = rocket_query.single_mut() else {
        return;
    };

    let locate = |body: BodyId| {
        planet_query
            .iter()
            .find(|(planet, _)| planet.0 == body)
            .map(|(_, transform)| transform.translation)
    };

    steer(&mut nav, &mut transform, &mut rocket, locate);
}
