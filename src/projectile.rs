use bevy::prelude::*;

use super::controls;
use super::orbit::OrbitConfig;
use super::scene;

/// Fraction of the remaining distance to the orbit center covered per tick.
pub const DRIFT_FACTOR: f32 = 0.01;

/// Projectiles are despawned once this close to the orbit center. Keeps the
/// projectile count bounded instead of letting markers accumulate forever.
pub const ARRIVAL_EPSILON: f32 = 0.5;

/// Marker for transient projectile effects drifting toward the orbit center.
#[derive(Component, Debug)]
pub struct Projectile;

#[derive(Resource, Debug)]
struct ProjectileAssets {
    laser_mesh: Handle<Mesh>,
    beam_mesh: Handle<Mesh>,
    bolt_material: Handle<StandardMaterial>,
}

/// One drift step: 1% of the remaining distance toward `target`.
pub fn drift_toward(position: Vec3, target: Vec3, factor: f32) -> Vec3 {
    position.lerp(target, factor)
}

pub struct Plugin;

impl Plugin {
    fn load_assets(
        mut commands: Commands,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<StandardMaterial>>,
    ) {
        commands.insert_resource(ProjectileAssets {
            laser_mesh: meshes.add(Cylinder::new(0.08, 1.6)),
            beam_mesh: meshes.add(Cone {
                radius: 4.0,
                height: 2.0,
            }),
            bolt_material: materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.1, 0.1),
                emissive: LinearRgba {
                    red: 300.0,
                    green: 0.0,
                    blue: 0.0,
                    alpha: 1.0,
                },
                ..default()
            }),
        });
    }

    fn fire_ship_lasers(
        mut commands: Commands,
        assets: Res<ProjectileAssets>,
        config: Res<OrbitConfig>,
        objects: Res<scene::SceneObjects>,
        transforms: Query<&Transform>,
        mut fire_event_reader: EventReader<controls::FireShips>,
    ) {
        if fire_event_reader.read().last().is_none() {
            return;
        }

        let ships = match objects.ships() {
            Ok(ships) => ships,
            Err(error) => {
                error!("cannot fire ship lasers: {error}");
                return;
            }
        };

        for ship in ships {
            let Ok(transform) = transforms.get(ship) else {
                error!("cannot fire ship lasers: ship entity is gone");
                continue;
            };

            Self::spawn_projectile(
                &mut commands,
                assets.laser_mesh.clone(),
                assets.bolt_material.clone(),
                transform.translation,
                config.center,
            );
        }
    }

    fn fire_station_beam(
        mut commands: Commands,
        assets: Res<ProjectileAssets>,
        config: Res<OrbitConfig>,
        objects: Res<scene::SceneObjects>,
        transforms: Query<&Transform>,
        mut fire_event_reader: EventReader<controls::FireStation>,
    ) {
        if fire_event_reader.read().last().is_none() {
            return;
        }

        let station = match objects.station() {
            Ok(station) => station,
            Err(error) => {
                error!("cannot fire station beam: {error}");
                return;
            }
        };

        let Ok(transform) = transforms.get(station) else {
            error!("cannot fire station beam: station entity is gone");
            return;
        };

        Self::spawn_projectile(
            &mut commands,
            assets.beam_mesh.clone(),
            assets.bolt_material.clone(),
            transform.translation,
            config.center,
        );
    }

    fn spawn_projectile(
        commands: &mut Commands,
        mesh: Handle<Mesh>,
        material: Handle<StandardMaterial>,
        position: Vec3,
        center: Vec3,
    ) {
        commands.spawn((
            Projectile,
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(position).looking_at(center, Vec3::Y),
        ));
    }

    /// Runs every tick, playing or paused.
    fn drift_projectiles(
        mut commands: Commands,
        config: Res<OrbitConfig>,
        mut projectiles: Query<(Entity, &mut Transform), With<Projectile>>,
    ) {
        for (entity, mut transform) in projectiles.iter_mut() {
            transform.translation = drift_toward(transform.translation, config.center, DRIFT_FACTOR);

            if transform.translation.distance(config.center) < ARRIVAL_EPSILON {
                commands.entity(entity).despawn();
            }
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, Self::load_assets).add_systems(
            Update,
            (
                Self::fire_ship_lasers,
                Self::fire_station_beam,
                Self::drift_projectiles,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_follows_geometric_decay() {
        let center = Vec3::new(1.0, -2.0, 3.0);
        let start = Vec3::new(21.0, -2.0, 3.0);
        let mut position = start;

        for n in 1..=400 {
            position = drift_toward(position, center, DRIFT_FACTOR);
            let expected = center + (start - center) * 0.99_f32.powi(n);
            assert!(position.distance(expected) < 1e-3, "diverged at tick {n}");
        }
    }

    #[test]
    fn test_drift_distance_strictly_decreases() {
        let center = Vec3::ZERO;
        let mut position = Vec3::new(20.0, 0.0, 0.0);
        let mut distance = position.distance(center);

        for _ in 0..5_000 {
            position = drift_toward(position, center, DRIFT_FACTOR);
            let next_distance = position.distance(center);
            assert!(next_distance < distance);
            assert!(next_distance > 0.0);
            distance = next_distance;
        }
    }

    #[test]
    fn test_fire_before_resolution_spawns_nothing() {
        let mut app = App::new();
        app.insert_resource(OrbitConfig::default());
        app.init_resource::<scene::SceneObjects>();
        app.insert_resource(ProjectileAssets {
            laser_mesh: Handle::default(),
            beam_mesh: Handle::default(),
            bolt_material: Handle::default(),
        });
        app.add_event::<controls::FireShips>();
        app.add_systems(Update, Plugin::fire_ship_lasers);

        app.world_mut().send_event(controls::FireShips);
        app.update();

        let mut projectiles = app.world_mut().query::<&Projectile>();
        assert_eq!(projectiles.iter(app.world()).count(), 0);
    }

    #[test]
    fn test_projectile_despawns_near_center() {
        let mut app = App::new();
        app.insert_resource(OrbitConfig::default());
        app.add_systems(Update, Plugin::drift_projectiles);

        let far = app
            .world_mut()
            .spawn((Projectile, Transform::from_xyz(20.0, 0.0, 0.0)))
            .id();
        let near = app
            .world_mut()
            .spawn((Projectile, Transform::from_xyz(ARRIVAL_EPSILON * 1.004, 0.0, 0.0)))
            .id();

        app.update();

        assert!(app.world().get::<Transform>(far).is_some());
        assert!(app.world().get::<Transform>(near).is_none());
    }
}
