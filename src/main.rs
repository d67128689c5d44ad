use bevy::core_pipeline::{bloom::Bloom, tonemapping::Tonemapping};
use bevy::prelude::*;

mod controls;
mod orbit;
mod panel;
mod projectile;
mod scene;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "starship scene".to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .add_plugins(scene::Plugin)
    .add_plugins(orbit::Plugin)
    .add_plugins(projectile::Plugin)
    .add_plugins(controls::Plugin)
    .add_plugins(panel::Plugin)
    .add_systems(Startup, setup);

    app.run();
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Tonemapping::TonyMcMapface,
        Bloom::NATURAL,
        Transform::from_xyz(-34.5, 22.0, -0.1).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        brightness: 200.0,
        ..Default::default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 5_000.0,
            ..Default::default()
        },
        Transform::from_xyz(5.0, 14.0, 24.9).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
