use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use rand::Rng;

use super::{Cloud, CloudLayer, Ground, HomeWorld, MainCamera, Rocket};
use crate::config::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CLOUD_COUNT, CLOUD_OPACITY, CLOUD_RADIUS,
    GROUND_COLOR, GROUND_SIZE, LAUNCH_CAMERA_Y, LAUNCH_CAMERA_Z, LAUNCH_EARTH_RADIUS,
    LAUNCH_EARTH_START_Y, ROCKET_GROUND_Y, ROCKET_HEIGHT, ROCKET_RADIUS,
};
use crate::systems::bodies::hex_color;
use crate::systems::camera::OrbitCamera;

// scene setup here
pub fn start(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(AmbientLight {
        color: hex_color(0x404040, 1.0),
        brightness: 400.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 3_000.,
            ..default()
        },
        Transform::from_xyz(5.0, 3.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // ground, faded out during ascent
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(GROUND_COLOR, 1.0),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::default(),
        Ground,
    ));

    spawn_clouds(&mut commands, &mut meshes, &mut materials);

    // rocket points its forward axis (-Z) at the sky until it reaches orbit
    commands
        .spawn((
            Transform::from_xyz(0.0, ROCKET_GROUND_Y, 0.0).looking_to(Vec3::Y, Vec3::Z),
            Visibility::default(),
            Rocket::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cone::new(ROCKET_RADIUS, ROCKET_HEIGHT))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: hex_color(0xCCCCCC, 1.0),
                    ..default()
                })),
                // cone tip is +Y, turn it onto the forward axis
                Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            ));
        });

    // mostly below the ground at first, rises into view as we climb
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(LAUNCH_EARTH_RADIUS).mesh().uv(32, 18))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(0x2233FF, 1.0),
            perceptual_roughness: 0.8,
            reflectance: 0.2,
            ..default()
        })),
        Transform::from_xyz(0.0, LAUNCH_EARTH_START_Y, 0.0),
        HomeWorld,
    ));

    // spawn camera
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_xyz(0.0, LAUNCH_CAMERA_Y, LAUNCH_CAMERA_Z)
            .looking_at(Vec3::new(0.0, ROCKET_GROUND_Y, 0.0), Vec3::Y),
        OrbitCamera::default(),
        MainCamera,
    ));
}

fn spawn_clouds(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::rng();

    // one material for every puff so the fade is a single write
    let cloud_mesh = meshes.add(Sphere::new(CLOUD_RADIUS).mesh().uv(16, 16));
    let cloud_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, CLOUD_OPACITY),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    commands
        .spawn((Transform::default(), Visibility::default(), CloudLayer))
        .with_children(|parent| {
            for _ in 0..CLOUD_COUNT {
                let position = Vec3::new(
                    rng.random_range(-20.0..20.0),
                    rng.random_range(5.0..8.0),
                    rng.random_range(-20.0..20.0),
                );
                let scale = Vec3::new(
                    rng.random_range(0.5..1.5),
                    rng.random_range(0.3..1.3),
                    rng.random_range(0.5..1.5),
                );

                parent.spawn((
                    Mesh3d(cloud_mesh.clone()),
                    MeshMaterial3d(cloud_material.clone()),
                    Transform::from_translation(position).with_scale(scale),
                    Cloud,
                ));
            }
        });
}
