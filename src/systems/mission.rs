//! mission.rs
//!
//! Launch lifecycle: countdown, ascent through the atmosphere, parking orbit
//! around Earth, then free flight once the solar system exists.
//! Each frame runs the logic of exactly one phase; requested transitions are
//! applied by bevy's state machinery at the start of the next frame.

use std::time::Duration;

use bevy::prelude::*;

use crate::config::{
    ASCENT_ALTITUDE_GAIN, ASCENT_CAMERA_GAIN, ASCENT_PROGRESS_STEP, CLOUD_OPACITY,
    CONTROLS_REVEAL_SECS, COUNTDOWN_FROM, COUNTDOWN_STEP_SECS, EARTH_ORBIT_RADIUS,
    EARTH_ORBIT_SPEED, GROUND_COLOR, LAUNCH_CAMERA_Y, LAUNCH_EARTH_START_Y, LIFTOFF_BANNER_SECS,
    ROCKET_GROUND_Y, SKY_COLOR, SOLAR_SYSTEM_DELAY_SECS,
};
use crate::systems::bodies::{hex_color, orbit_position};
use crate::systems::camera::ViewMode;
use crate::systems::navigation::orbit_around;
use crate::systems::scene::{Cloud, CloudLayer, Ground, HomeWorld, Planet, Rocket};
use crate::systems::time::SimClock;
use crate::systems::timers::{Countdown, CountdownStep, Deferred};
use crate::systems::SimSet;

pub struct MissionPlugin;

impl Plugin for MissionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<Phase>()
            .init_resource::<LaunchSequence>()
            .add_event::<LaunchRequested>()
            .add_event::<BuildSolarSystem>()
            .add_systems(Update, (begin_launch, tick_timers).chain().in_set(SimSet::Timers))
            .add_systems(
                Update,
                (
                    ascend.run_if(in_state(Phase::Ascending)),
                    earth_orbit.run_if(in_state(Phase::EarthOrbit)),
                    orbit_planets.run_if(in_state(Phase::Interplanetary)),
                )
                    .in_set(SimSet::Advance),
            )
            .add_systems(OnEnter(Phase::EarthOrbit), leave_atmosphere);
    }
}

/// Coarse stage of the flight. Ordered, and only ever moves forwards.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Phase {
    #[default]
    Grounded,
    Ascending,
    EarthOrbit,
    Interplanetary,
}

impl Phase {
    pub fn successor(self) -> Option<Phase> {
        match self {
            Phase::Grounded => Some(Phase::Ascending),
            Phase::Ascending => Some(Phase::EarthOrbit),
            Phase::EarthOrbit => Some(Phase::Interplanetary),
            Phase::Interplanetary => None,
        }
    }

    /// Next phase if the flight is currently in `from`, otherwise nothing.
    pub fn leave(current: Phase, from: Phase) -> Option<Phase> {
        if current == from { from.successor() } else { None }
    }
}

/// Request the transition out of `from`. Ignored when the flight is elsewhere.
pub fn advance_phase(from: Phase, current: &State<Phase>, next: &mut NextState<Phase>) {
    if let Some(to) = Phase::leave(*current.get(), from) {
        info!("phase {:?} -> {:?}", from, to);
        next.set(to);
    }
}

// launch button pressed
#[derive(Event, Debug, Clone, Copy)]
pub struct LaunchRequested;

// delayed construction of sun, planets and stars came due
#[derive(Event, Debug, Clone, Copy)]
pub struct BuildSolarSystem;

/// Everything about the launch the UI and camera need to see, plus the
/// one-shot timers driving it.
#[derive(Resource, Debug, Default)]
pub struct LaunchSequence {
    pub progress: f32,
    pub banner: String,
    pub controls_visible: bool,
    pub selectors_unlocked: bool,
    countdown: Option<Countdown>,
    controls_reveal: Option<Deferred>,
    banner_clear: Option<Deferred>,
    solar_system: Option<Deferred>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimerOutcome {
    pub liftoff: bool,
    pub build_solar_system: bool,
}

impl LaunchSequence {
    pub fn has_begun(&self) -> bool {
        self.countdown.is_some()
    }

    /// Starts the countdown. Returns false if it was already running.
    pub fn begin(&mut self) -> bool {
        if self.has_begun() {
            return false;
        }

        self.countdown = Some(Countdown::new(COUNTDOWN_FROM, COUNTDOWN_STEP_SECS));
        self.controls_reveal = Some(Deferred::after(CONTROLS_REVEAL_SECS));
        true
    }

    pub fn tick_timers(&mut self, delta: Duration) -> TimerOutcome {
        let mut outcome = TimerOutcome::default();

        if let Some(countdown) = self.countdown.as_mut() {
            match countdown.tick(delta) {
                Some(CountdownStep::Show(n)) => self.banner = n.to_string(),
                Some(CountdownStep::Liftoff) => {
                    self.banner = "Liftoff!".to_string();
                    self.banner_clear = Some(Deferred::after(LIFTOFF_BANNER_SECS));
                    outcome.liftoff = true;
                }
                None => {}
            }
        }

        if self.controls_reveal.as_mut().is_some_and(|t| t.tick(delta)) {
            self.controls_visible = true;
        }

        if self.banner_clear.as_mut().is_some_and(|t| t.tick(delta)) {
            self.banner.clear();
        }

        if self.solar_system.as_mut().is_some_and(|t| t.tick(delta)) {
            outcome.build_solar_system = true;
        }

        outcome
    }

    /// Advances the ascent by one tick.
    pub fn step_ascent(&mut self) -> AscentFrame {
        self.progress = (self.progress + ASCENT_PROGRESS_STEP).min(1.0);
        AscentFrame::at(self.progress)
    }

    pub fn finish_ascent(&mut self) {
        self.selectors_unlocked = true;
        if self.solar_system.is_none() {
            self.solar_system = Some(Deferred::after(SOLAR_SYSTEM_DELAY_SECS));
        }
    }
}

/// Scene values for a given ascent progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AscentFrame {
    pub progress: f32,
    pub rocket_y: f32,
    pub camera_y: f32,
    pub earth_y: f32,
    pub ground_opacity: f32,
    pub cloud_opacity: f32,
    pub background: Srgba,
}

impl AscentFrame {
    pub fn at(progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let remaining = 1.0 - progress;
        let sky = hex_color(SKY_COLOR, 1.0).to_srgba();

        Self {
            progress,
            rocket_y: ROCKET_GROUND_Y + progress * ASCENT_ALTITUDE_GAIN,
            camera_y: LAUNCH_CAMERA_Y + progress * ASCENT_CAMERA_GAIN,
            earth_y: LAUNCH_EARTH_START_Y * remaining,
            ground_opacity: remaining,
            cloud_opacity: CLOUD_OPACITY * remaining,
            // fade to black
            background: Srgba::new(sky.red * remaining, sky.green * remaining, sky.blue * remaining, 1.0),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

fn begin_launch(mut requests: EventReader<LaunchRequested>, mut sequence: ResMut<LaunchSequence>) {
    for _ in requests.read() {
        if sequence.begin() {
            info!("countdown started");
        } else {
            debug!("launch already underway, ignoring request");
        }
    }
}

fn tick_timers(
    time: Res<Time>,
    mut sequence: ResMut<LaunchSequence>,
    phase: Res<State<Phase>>,
    mut next_phase: ResMut<NextState<Phase>>,
    mut build: EventWriter<BuildSolarSystem>,
) {
    let outcome = sequence.tick_timers(time.delta());

    if outcome.liftoff {
        advance_phase(Phase::Grounded, &phase, &mut next_phase);
    }
    if outcome.build_solar_system {
        info!("building solar system");
        build.write(BuildSolarSystem);
    }
}

fn ascend(
    mut sequence: ResMut<LaunchSequence>,
    mut rocket_query: Query<&mut Transform, With<Rocket>>,
    mut earth_query: Query<&mut Transform, (With<HomeWorld>, Without<Rocket>)>,
    ground_query: Query<&MeshMaterial3d<StandardMaterial>, With<Ground>>,
    cloud_query: Query<&MeshMaterial3d<StandardMaterial>, With<Cloud>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut clear_color: ResMut<ClearColor>,
    phase: Res<State<Phase>>,
    mut next_phase: ResMut<NextState<Phase>>,
) {
    let frame = sequence.step_ascent();

    if let Ok(mut rocket) = rocket_query.single_mut() {
        rocket.translation.y = frame.rocket_y;
    }
    if let Ok(mut earth) = earth_query.single_mut() {
        earth.translation.y = frame.earth_y;
    }

    for handle in ground_query.iter() {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = hex_color(GROUND_COLOR, frame.ground_opacity);
        }
    }
    // clouds share one material, setting it more than once is harmless
    for handle in cloud_query.iter() {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = Color::srgba(1.0, 1.0, 1.0, frame.cloud_opacity);
        }
    }

    clear_color.0 = frame.background.into();

    if frame.is_complete() {
        advance_phase(Phase::Ascending, &phase, &mut next_phase);
    }
}

// runs once on reaching orbit
fn leave_atmosphere(
    mut commands: Commands,
    leftovers: Query<Entity, Or<(With<Ground>, With<CloudLayer>)>>,
    mut sequence: ResMut<LaunchSequence>,
    mut view: ResMut<ViewMode>,
) {
    for entity in leftovers.iter() {
        commands.entity(entity).despawn();
    }

    *view = ViewMode::EarthView;
    sequence.finish_ascent();
}

fn earth_orbit(
    mut rocket_query: Query<(&mut Transform, &mut Rocket)>,
    earth_query: Query<&Transform, (With<HomeWorld>, Without<Rocket>)>,
) {
    let (Ok((mut transform, mut rocket)), Ok(earth)) = (rocket_query.single_mut(), earth_query.single()) else {
        return;
    };

    rocket.orbit_angle += EARTH_ORBIT_SPEED;
    orbit_around(&mut transform, earth.translation, EARTH_ORBIT_RADIUS, rocket.orbit_angle);
    transform.translation.y = earth.translation.y;
    transform.look_at(earth.translation, Vec3::Y);
}

fn orbit_planets(clock: Res<SimClock>, mut planet_query: Query<(&Planet, &mut Transform)>) {
    for (planet, mut transform) in planet_query.iter_mut() {
        let body = planet.0.body();
        transform.translation = orbit_position(body, clock.orbit_angle(body.speed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::ecs::query::QueryFilter;
    use bevy::input::mouse::MouseWheel;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;

    use crate::systems::bodies::BodyId;
    use crate::systems::camera::ViewPlugin;
    use crate::systems::navigation::{Navigation, NavigationPlugin};
    use crate::systems::scene::{ScenePlugin, Starfield, Sun};
    use crate::systems::time::ClockPlugin;

    const FRAME: Duration = Duration::from_millis(100);

    #[test]
    fn test_phase_successors_walk_forward() {
        let mut walk = vec![Phase::Grounded];
        while let Some(next) = walk.last().and_then(|p| p.successor()) {
            walk.push(next);
        }
        assert_eq!(walk, vec![Phase::Grounded, Phase::Ascending, Phase::EarthOrbit, Phase::Interplanetary]);
        assert!(walk.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_leave_only_from_current_phase() {
        assert_eq!(Phase::leave(Phase::Grounded, Phase::Grounded), Some(Phase::Ascending));
        // a stale request can never move the flight backwards or skip ahead
        assert_eq!(Phase::leave(Phase::EarthOrbit, Phase::Grounded), None);
        assert_eq!(Phase::leave(Phase::Grounded, Phase::EarthOrbit), None);
        assert_eq!(Phase::leave(Phase::Interplanetary, Phase::Interplanetary), None);
    }

    #[test]
    fn test_ascent_progress_monotonic_and_bounded() {
        let mut sequence = LaunchSequence::default();
        let mut last = 0.0;
        for _ in 0..400 {
            let frame = sequence.step_ascent();
            assert!(frame.progress >= last);
            assert!((0.0..=1.0).contains(&frame.progress));
            assert_relative_eq!(frame.ground_opacity, (1.0 - frame.progress).clamp(0.0, 1.0));
            last = frame.progress;
        }
        assert_relative_eq!(last, 1.0);
    }

    #[test]
    fn test_ascent_completes_within_two_hundred_ticks() {
        let mut sequence = LaunchSequence::default();
        let ticks = (1..=201).find(|_| sequence.step_ascent().is_complete());
        assert!(matches!(ticks, Some(200) | Some(201)), "completed after {:?} ticks", ticks);
    }

    #[test]
    fn test_ascent_frame_endpoints() {
        let start = AscentFrame::at(0.0);
        assert_relative_eq!(start.rocket_y, 1.0);
        assert_relative_eq!(start.camera_y, 5.0);
        assert_relative_eq!(start.earth_y, -11.0);
        assert_relative_eq!(start.cloud_opacity, 0.8);
        assert_relative_eq!(start.background.blue, 235.0 / 255.0);

        let end = AscentFrame::at(1.0);
        assert_relative_eq!(end.rocket_y, 21.0);
        assert_relative_eq!(end.camera_y, 20.0);
        assert_relative_eq!(end.earth_y, 0.0);
        assert_relative_eq!(end.ground_opacity, 0.0);
        assert_relative_eq!(end.cloud_opacity, 0.0);
        assert_relative_eq!(end.background.red, 0.0);
        assert!(end.is_complete());
    }

    #[test]
    fn test_ascent_frame_midway() {
        let frame = AscentFrame::at(0.5);
        assert_relative_eq!(frame.rocket_y, 11.0);
        assert_relative_eq!(frame.camera_y, 12.5);
        assert_relative_eq!(frame.earth_y, -5.5);
        assert_relative_eq!(frame.ground_opacity, 0.5);
        assert_relative_eq!(frame.cloud_opacity, 0.4);
    }

    #[test]
    fn test_begin_is_idempotent() {
        let mut sequence = LaunchSequence::default();
        assert!(!sequence.has_begun());
        assert!(sequence.begin());
        assert!(!sequence.begin());
        assert!(sequence.has_begun());
    }

    #[test]
    fn test_countdown_drives_banner_and_liftoff() {
        let mut sequence = LaunchSequence::default();
        sequence.begin();

        let mut liftoffs = 0;
        let mut banners = Vec::new();
        for _ in 0..150 {
            let outcome = sequence.tick_timers(FRAME);
            if outcome.liftoff {
                liftoffs += 1;
            }
            if banners.last() != Some(&sequence.banner) {
                banners.push(sequence.banner.clone());
            }
        }

        assert_eq!(liftoffs, 1);
        assert_eq!(banners.first().map(String::as_str), Some(""));
        assert_eq!(banners[1], "10");
        assert!(banners.contains(&"1".to_string()));
        assert!(banners.contains(&"Liftoff!".to_string()));
        // cleared two seconds after liftoff
        assert_eq!(banners.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_controls_reveal_after_two_seconds() {
        let mut sequence = LaunchSequence::default();
        sequence.begin();
        for _ in 0..19 {
            sequence.tick_timers(FRAME);
        }
        assert!(!sequence.controls_visible);
        sequence.tick_timers(FRAME);
        assert!(sequence.controls_visible);
        assert!(!sequence.selectors_unlocked, "selectors wait for orbit");
    }

    #[test]
    fn test_solar_system_built_exactly_once() {
        let mut sequence = LaunchSequence::default();
        sequence.finish_ascent();
        // a second completion must not reschedule
        sequence.finish_ascent();
        assert!(sequence.selectors_unlocked);

        let builds = (0..2_000).filter(|_| sequence.tick_timers(FRAME).build_solar_system).count();
        assert_eq!(builds, 1);
    }

    #[test]
    fn test_solar_system_waits_five_seconds() {
        let mut sequence = LaunchSequence::default();
        sequence.finish_ascent();
        let first = (1..=100).find(|_| sequence.tick_timers(FRAME).build_solar_system);
        assert_eq!(first, Some(50));
    }

    fn flight_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        crate::systems::configure_sets(&mut app);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_event::<CursorMoved>()
            .add_event::<MouseWheel>()
            .add_plugins((ClockPlugin, ScenePlugin, MissionPlugin, NavigationPlugin, ViewPlugin));
        app
    }

    fn count<F: QueryFilter>(app: &mut App) -> usize {
        app.world_mut().query_filtered::<(), F>().iter(app.world()).count()
    }

    #[test]
    fn test_full_flight_reaches_interplanetary() {
        let mut app = flight_app();
        app.world_mut().send_event(LaunchRequested);

        let mut observed = Vec::new();
        for _ in 0..1_000 {
            app.update();
            observed.push(*app.world().resource::<State<Phase>>().get());
        }

        assert!(observed.windows(2).all(|pair| pair[0] <= pair[1]), "phase went backwards");
        for phase in [Phase::Ascending, Phase::EarthOrbit] {
            assert!(observed.contains(&phase), "never passed through {:?}", phase);
        }
        assert_eq!(observed.last(), Some(&Phase::Interplanetary));

        // launch pad cleared away on reaching orbit
        assert_eq!(count::<Or<(With<Ground>, With<CloudLayer>, With<Cloud>)>>(&mut app), 0);

        // built once, despite many frames spent in EarthOrbit before the switch
        assert_eq!(count::<With<Sun>>(&mut app), 1);
        assert_eq!(count::<With<Starfield>>(&mut app), 1);
        assert_eq!(count::<With<Planet>>(&mut app), 8);
        assert_eq!(count::<With<HomeWorld>>(&mut app), 1, "launch globe replaced by the Earth planet");

        assert_eq!(*app.world().resource::<ViewMode>(), ViewMode::EarthView);
        assert_eq!(app.world().resource::<Navigation>().focus(), Some(BodyId::earth()));
        let sequence = app.world().resource::<LaunchSequence>();
        assert!(sequence.selectors_unlocked);
        assert!(sequence.controls_visible);
        assert!(sequence.banner.is_empty());
    }

    #[test]
    fn test_grounded_without_launch_request() {
        let mut app = flight_app();
        for _ in 0..300 {
            app.update();
        }

        assert_eq!(*app.world().resource::<State<Phase>>().get(), Phase::Grounded);
        assert_eq!(count::<With<Ground>>(&mut app), 1);
        assert_eq!(count::<With<Sun>>(&mut app), 0);
        assert_eq!(*app.world().resource::<ViewMode>(), ViewMode::Launch);
    }
}
