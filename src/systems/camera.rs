use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use crate::config::{
    CENTRIC_DISTANCE_FACTOR, CHASE_OFFSET, EARTH_ORBIT_RADIUS, EARTH_TRAIL_EXTRA_RADIUS,
    EARTH_TRAIL_HEIGHT, EARTH_VIEW_DISTANCE, EARTH_VIEW_HEIGHT, LAUNCH_CAMERA_Z,
    SYSTEM_VIEW_DISTANCE, SYSTEM_VIEW_HEIGHT, SYSTEM_VIEW_MAX_RADIUS, SYSTEM_VIEW_MIN_RADIUS,
    SYSTEM_VIEW_ZOOM_STEP,
};
use crate::systems::mission::{AscentFrame, LaunchSequence, Phase};
use crate::systems::navigation::Navigation;
use crate::systems::scene::{HomeWorld, MainCamera, Planet, Rocket};
use crate::systems::SimSet;

pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewMode>()
            .add_event::<ViewModeSelected>()
            .add_systems(
                Update,
                orbit_controls.in_set(SimSet::Input),
            )
            .add_systems(Update, select_view.in_set(SimSet::Timers))
            .add_systems(Update, frame_camera.in_set(SimSet::Frame));
    }
}

/// How the camera frames the scene. Picked by the user, independent of the flight phase.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Launch,
    EarthView,
    RocketChase,
    FullSystem,
    PlanetCentric,
}

impl ViewMode {
    pub const ALL: [ViewMode; 5] = [
        ViewMode::Launch,
        ViewMode::EarthView,
        ViewMode::RocketChase,
        ViewMode::FullSystem,
        ViewMode::PlanetCentric,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Launch => "Launch",
            ViewMode::EarthView => "Earth",
            ViewMode::RocketChase => "Rocket",
            ViewMode::FullSystem => "Full system",
            ViewMode::PlanetCentric => "Planet",
        }
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ViewModeSelected(pub ViewMode);

// user-steerable camera for the whole-system view
#[derive(Component, Debug)]
pub struct OrbitCamera {
    pub radius: f32,
    pub speed: f32,
    pub angle: f32,
    pub v_angle: f32,
    pub is_dragging: bool,
    pub target: Vec3,

    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::framing(SYSTEM_VIEW_HEIGHT, SYSTEM_VIEW_DISTANCE)
    }
}

impl OrbitCamera {
    // sits `height` above and `distance` behind the target
    pub fn framing(height: f32, distance: f32) -> Self {
        Self {
            radius: Vec2::new(height, distance).length(),
            speed: 0.5,
            angle: std::f32::consts::FRAC_PI_2,
            v_angle: height.atan2(distance),
            is_dragging: false,
            target: Vec3::ZERO,

            min_radius: SYSTEM_VIEW_MIN_RADIUS,
            max_radius: SYSTEM_VIEW_MAX_RADIUS,
        }
    }

    // calculate world position from spherical coordinates
    // https://en.wikipedia.org/wiki/Spherical_coordinate_system#Cartesian_coordinates
    pub fn calculate_position(&self) -> Vec3 {
        let x = self.radius * self.v_angle.cos() * self.angle.cos();
        let y = self.radius * self.v_angle.sin();
        let z = self.radius * self.v_angle.cos() * self.angle.sin();

        self.target + Vec3::new(x, y, z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Snapshot of what the camera may frame this tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub phase: Phase,
    pub progress: f32,
    pub rocket: Transform,
    pub orbit_angle: f32,
    pub home: Option<Vec3>,
    // position and radius
    pub focus: Option<(Vec3, f32)>,
    pub system_eye: Vec3,
}

pub fn centric_pose(center: Vec3, radius: f32) -> CameraPose {
    let distance = radius * CENTRIC_DISTANCE_FACTOR;
    CameraPose {
        position: center + Vec3::new(0.0, distance / 2.0, distance),
        look_at: center,
    }
}

/// Camera pose for `mode`, or `None` when the thing it frames does not exist yet.
pub fn frame(mode: ViewMode, ctx: &FrameContext) -> Option<CameraPose> {
    match mode {
        ViewMode::Launch => Some(CameraPose {
            position: Vec3::new(0.0, AscentFrame::at(ctx.progress).camera_y, LAUNCH_CAMERA_Z),
            look_at: ctx.rocket.translation,
        }),
        ViewMode::EarthView => {
            let home = ctx.home?;
            let position = if ctx.phase == Phase::EarthOrbit {
                // trail the rocket around its parking orbit
                let radius = EARTH_ORBIT_RADIUS + EARTH_TRAIL_EXTRA_RADIUS;
                home + Vec3::new(
                    ctx.orbit_angle.cos() * radius,
                    EARTH_TRAIL_HEIGHT,
                    ctx.orbit_angle.sin() * radius,
                )
            } else {
                home + Vec3::new(0.0, EARTH_VIEW_HEIGHT, EARTH_VIEW_DISTANCE)
            };
            Some(CameraPose { position, look_at: home })
        }
        ViewMode::RocketChase => Some(CameraPose {
            position: ctx.rocket.translation + ctx.rocket.rotation * Vec3::from(CHASE_OFFSET),
            look_at: ctx.rocket.translation,
        }),
        ViewMode::FullSystem => Some(CameraPose {
            position: ctx.system_eye,
            look_at: Vec3::ZERO,
        }),
        ViewMode::PlanetCentric => ctx.focus.map(|(center, radius)| centric_pose(center, radius)),
    }
}

fn select_view(mut selections: EventReader<ViewModeSelected>, mut view: ResMut<ViewMode>) {
    for ViewModeSelected(mode) in selections.read() {
        if *view != *mode {
            debug!("view mode {:?}", mode);
            *view = *mode;
        }
    }
}

// the drag flag follows the button in every view, steering only in the system view
fn orbit_controls(
    view: Res<ViewMode>,
    mut camera_query: Query<&mut OrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<CursorMoved>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let steering = *view == ViewMode::FullSystem;
    if !steering {
        mouse_motion.clear();
        scroll_events.clear();
    }

    for mut camera in camera_query.iter_mut() {
        // handle mouse drag
        if steering && mouse_buttons.just_pressed(MouseButton::Right) {
            camera.is_dragging = true;
        }
        if mouse_buttons.just_released(MouseButton::Right) {
            camera.is_dragging = false;
        }
        if !steering {
            continue;
        }

        if camera.is_dragging {
            for motion in mouse_motion.read() {
                if let Some(delta) = motion.delta {
                    camera.angle += delta.x * camera.speed * 0.01;
                    camera.v_angle += delta.y * camera.speed * 0.01;
                }
                // clamp pitch
                camera.v_angle = camera.v_angle.clamp(-1.5, 1.5);
            }
        }

        for scroll in scroll_events.read() {
            camera.radius -= scroll.y * SYSTEM_VIEW_ZOOM_STEP;
            camera.radius = camera.radius.clamp(camera.min_radius, camera.max_radius);
        }
    }
}

fn frame_camera(
    view: Res<ViewMode>,
    phase: Res<State<Phase>>,
    sequence: Res<LaunchSequence>,
    nav: Res<Navigation>,
    mut camera_query: Query<(&mut Transform, &OrbitCamera), With<MainCamera>>,
    rocket_query: Query<(&Transform, &Rocket), Without<MainCamera>>,
    home_query: Query<&Transform, (With<HomeWorld>, Without<MainCamera>)>,
    planet_query: Query<(&Planet, &Transform), Without<MainCamera>>,
) {
    let (Ok((mut camera, orbit)), Ok((rocket, rocket_state))) = (camera_query.single_mut(), rocket_query.single())
    else {
        return;
    };

    let focus = nav.focus().and_then(|body| {
        planet_query
            .iter()
            .find(|(planet, _)| planet.0 == body)
            .map(|(_, transform)| (transform.translation, body.body().radius))
    });

    let ctx = FrameContext {
        phase: *phase.get(),
        progress: sequence.progress,
        rocket: *rocket,
        orbit_angle: rocket_state.orbit_angle,
        home: home_query.single().ok().map(|home| home.translation),
        focus,
        system_eye: orbit.calculate_position(),
    };

    if let Some(pose) = frame(*view, &ctx) {
        *camera = Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y);
    }
}
