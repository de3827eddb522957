//! bodies.rs
//!
//! Static table of the planets in the (very) simplified solar system.
//! Distances are millions of km, angular speeds are radians per clock millisecond.

use bevy::prelude::*;

#[derive(Debug)]
pub struct CelestialBody {
    pub name: &'static str,
    pub radius: f32,
    pub distance: f32,
    pub color: u32,
    pub speed: f64,
    pub info: &'static [&'static str],
}

impl CelestialBody {
    pub fn color(&self) -> Color {
        hex_color(self.color, 1.0)
    }
}

// ordered from the sun outwards
pub static PLANETS: [CelestialBody; 8] = [
    CelestialBody {
        name: "Mercury",
        radius: 0.383,
        distance: 57.9,
        color: 0xC4C4C4,
        speed: 0.00059,
        info: &[
            "Smallest planet in the solar system",
            "Closest planet to the Sun",
            "No atmosphere, extreme temperature variations",
            "Heavily cratered surface",
            "Day length: 58.6 Earth days",
            "Year length: 88 Earth days",
            "No moons",
        ],
    },
    CelestialBody { name: "Venus", radius: 0.949, distance: 108.2, color: 0xFFC649, speed: 0.00044, info: &[] },
    CelestialBody { name: "Earth", radius: 1.0, distance: 149.6, color: 0x2233FF, speed: 0.00037, info: &[] },
    CelestialBody { name: "Mars", radius: 0.532, distance: 227.9, color: 0xE27B58, speed: 0.00030, info: &[] },
    CelestialBody { name: "Jupiter", radius: 11.21, distance: 778.5, color: 0xE3DCCB, speed: 0.00016, info: &[] },
    CelestialBody { name: "Saturn", radius: 9.45, distance: 1434.0, color: 0xF7E7C4, speed: 0.00012, info: &[] },
    CelestialBody { name: "Uranus", radius: 4.0, distance: 2871.0, color: 0xCAF1F2, speed: 0.00008, info: &[] },
    CelestialBody { name: "Neptune", radius: 3.88, distance: 4495.0, color: 0x5B5DDF, speed: 0.00006, info: &[] },
];

/// Handle to an entry of [`PLANETS`].
///
/// Only handed out by [`BodyId::find`] and [`BodyId::all`], so holding one
/// means the body exists in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(usize);

impl BodyId {
    pub fn find(name: &str) -> Option<Self> {
        PLANETS.iter().position(|body| body.name == name).map(BodyId)
    }

    pub fn all() -> impl Iterator<Item = BodyId> {
        (0..PLANETS.len()).map(BodyId)
    }

    pub fn earth() -> Self {
        // index of "Earth" above
        BodyId(2)
    }

    pub fn body(self) -> &'static CelestialBody {
        &PLANETS[self.0]
    }
}

/// Position on the body's circular path for a given orbit angle.
pub fn orbit_position(body: &CelestialBody, angle: f32) -> Vec3 {
    Vec3::new(angle.cos() * body.distance, 0.0, angle.sin() * body.distance)
}

// 0xRRGGBB to bevy color
pub fn hex_color(hex: u32, alpha: f32) -> Color {
    let [_, red, green, blue] = hex.to_be_bytes();
    Color::srgb_u8(red, green, blue).with_alpha(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lookup_by_name() {
        let mars = BodyId::find("Mars").expect("Mars is registered");
        assert_eq!(mars.body().name, "Mars");
        assert_relative_eq!(mars.body().radius, 0.532);
        assert!(BodyId::find("Pluto").is_none());
        assert!(BodyId::find("mars").is_none(), "lookup is case sensitive");
    }

    #[test]
    fn test_earth_handle_points_at_earth() {
        assert_eq!(BodyId::earth().body().name, "Earth");
        assert_eq!(BodyId::find("Earth"), Some(BodyId::earth()));
    }

    #[test]
    fn test_all_bodies_in_order() {
        let names: Vec<_> = BodyId::all().map(|id| id.body().name).collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names.first(), Some(&"Mercury"));
        assert_eq!(names.last(), Some(&"Neptune"));
    }

    #[test]
    fn test_orbit_position_on_circle() {
        let saturn = BodyId::find("Saturn").unwrap().body();
        let start = orbit_position(saturn, 0.0);
        assert!(start.abs_diff_eq(Vec3::new(1434.0, 0.0, 0.0), 1e-3));

        let quarter = orbit_position(saturn, std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(quarter.length(), 1434.0, epsilon = 1e-2);
        assert_relative_eq!(quarter.z, 1434.0, epsilon = 1e-2);
    }

    #[test]
    fn test_hex_color_channels() {
        let sky = hex_color(0x87CEEB, 0.5).to_srgba();
        assert_relative_eq!(sky.red, 135.0 / 255.0);
        assert_relative_eq!(sky.green, 206.0 / 255.0);
        assert_relative_eq!(sky.blue, 235.0 / 255.0);
        assert_relative_eq!(sky.alpha, 0.5);
    }

    #[test]
    fn test_hex_color_matches_bevy_hex_parsing() {
        for body in PLANETS.iter() {
            let parsed = Srgba::hex(format!("{:06X}", body.color)).expect("valid hex");
            assert_eq!(body.color().to_srgba(), parsed, "{}", body.name);
        }
    }
}
