use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;
use rand::Rng;

use super::{HomeWorld, Planet, Starfield, Sun};
use crate::config::{ORBIT_RING_RESOLUTION, STARFIELD_EXTENT, STAR_COUNT, SUN_RADIUS};
use crate::systems::bodies::{orbit_position, BodyId};
use crate::systems::mission::{advance_phase, Phase};
use crate::systems::navigation::Navigation;

// create point cloud mesh from a series of points
fn create_starfield_mesh(points: &[Vec3]) -> Mesh {
    let positions: Vec<[f32; 3]> = points.iter().map(|point| point.to_array()).collect();

    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);

    mesh
}

// create a closed line loop from a series of points
fn create_orbit_ring_mesh(points: &[Vec3]) -> Mesh {
    let positions: Vec<[f32; 3]> = points.iter().map(|point| point.to_array()).collect();

    // segments connecting consecutive points
    let mut indices = Vec::with_capacity(points.len() * 2);
    for i in 0..points.len() {
        let next_i = (i + 1) % points.len(); // wrap
        indices.push(i as u32);
        indices.push(next_i as u32);
    }

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(Indices::U32(indices));

    mesh
}

fn random_stars(count: usize, extent: f32) -> Vec<Vec3> {
    let mut rng = rand::rng();
    let half = extent / 2.0;

    (0..count)
        .map(|_| {
            Vec3::new(
                rng.random_range(-half..half),
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            )
        })
        .collect()
}

/// Sun, planets and stars. Runs once, when the delayed construction comes due.
pub fn build(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    launch_earth: Query<Entity, With<HomeWorld>>,
    mut nav: ResMut<Navigation>,
    phase: Res<State<Phase>>,
    mut next_phase: ResMut<NextState<Phase>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(32, 18))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 1.0, 0.0),
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Sun,
    ));

    // the Earth planet takes over from the launch-pad globe
    for entity in launch_earth.iter() {
        commands.entity(entity).despawn();
    }

    // faint orbit paths, one material for all
    let ring_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.1),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for id in BodyId::all() {
        let body = id.body();

        let ring: Vec<Vec3> = (0..ORBIT_RING_RESOLUTION)
            .map(|i| orbit_position(body, i as f32 / ORBIT_RING_RESOLUTION as f32 * std::f32::consts::TAU))
            .collect();
        commands.spawn((
            Mesh3d(meshes.add(create_orbit_ring_mesh(&ring))),
            MeshMaterial3d(ring_material.clone()),
            Transform::default(),
        ));

        let mut planet = commands.spawn((
            Mesh3d(meshes.add(Sphere::new(body.radius).mesh().uv(32, 18))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: body.color(),
                ..default()
            })),
            Transform::from_translation(orbit_position(body, 0.0)),
            Planet(id),
        ));
        if id == BodyId::earth() {
            planet.insert(HomeWorld);
        }
    }

    commands.spawn((
        Mesh3d(meshes.add(create_starfield_mesh(&random_stars(STAR_COUNT, STARFIELD_EXTENT)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Starfield,
    ));

    // planets are framed and visited from here on, starting at home
    nav.set_focus(BodyId::earth());
    advance_phase(Phase::EarthOrbit, &phase, &mut next_phase);
}
