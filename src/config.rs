// Launch pad (scene units)
pub const GROUND_SIZE: f32 = 100.0;
pub const GROUND_COLOR: u32 = 0x008000;
pub const CLOUD_COUNT: usize = 50;
pub const CLOUD_RADIUS: f32 = 0.5;
pub const CLOUD_OPACITY: f32 = 0.8;
pub const ROCKET_RADIUS: f32 = 0.5;
pub const ROCKET_HEIGHT: f32 = 2.0;
pub const ROCKET_GROUND_Y: f32 = 1.0;
pub const LAUNCH_EARTH_RADIUS: f32 = 1.0;
pub const LAUNCH_EARTH_START_Y: f32 = -11.0;
pub const SKY_COLOR: u32 = 0x87CEEB;

// Launch sequence timing (seconds)
pub const COUNTDOWN_FROM: u32 = 10;
pub const COUNTDOWN_STEP_SECS: f32 = 1.0;
pub const CONTROLS_REVEAL_SECS: f32 = 2.0;
pub const LIFTOFF_BANNER_SECS: f32 = 2.0;
pub const SOLAR_SYSTEM_DELAY_SECS: f32 = 5.0;

// Ascent, per tick. These three are tuned together
pub const ASCENT_PROGRESS_STEP: f32 = 0.005;
pub const ASCENT_ALTITUDE_GAIN: f32 = 20.0;
pub const ASCENT_CAMERA_GAIN: f32 = 15.0;

// Orbits, per tick
pub const EARTH_ORBIT_RADIUS: f32 = 2.0;
pub const EARTH_ORBIT_SPEED: f32 = 0.005;
pub const FOCUS_ORBIT_RADIUS_FACTOR: f32 = 3.0;
pub const FOCUS_ORBIT_SPEED: f32 = EARTH_ORBIT_SPEED * 2.0;

// Navigation
pub const ARRIVAL_THRESHOLD: f32 = 5.0;
pub const TRAVEL_STEP: f32 = 2.0;

// Solar system
pub const SUN_RADIUS: f32 = 20.0;
pub const STAR_COUNT: usize = 10_000;
pub const STARFIELD_EXTENT: f32 = 2000.0;
pub const ORBIT_RING_RESOLUTION: usize = 256;

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 10_000.0;
pub const LAUNCH_CAMERA_Y: f32 = 5.0;
pub const LAUNCH_CAMERA_Z: f32 = 20.0;
pub const EARTH_TRAIL_EXTRA_RADIUS: f32 = 5.0;
pub const EARTH_TRAIL_HEIGHT: f32 = 3.0;
pub const EARTH_VIEW_HEIGHT: f32 = 10.0;
pub const EARTH_VIEW_DISTANCE: f32 = 40.0;
pub const CHASE_OFFSET: [f32; 3] = [0.0, 2.0, 10.0];
pub const CENTRIC_DISTANCE_FACTOR: f32 = 10.0;
pub const SYSTEM_VIEW_HEIGHT: f32 = 1000.0;
pub const SYSTEM_VIEW_DISTANCE: f32 = 2000.0;
pub const SYSTEM_VIEW_MIN_RADIUS: f32 = 200.0;
pub const SYSTEM_VIEW_MAX_RADIUS: f32 = 8000.0;
pub const SYSTEM_VIEW_ZOOM_STEP: f32 = 150.0;

// Planetary clock
pub const CLOCK_MIN_SPEED: f64 = 1.0 / 64.0;
pub const CLOCK_MAX_SPEED: f64 = 64.0;
