use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::controls;
use super::scene;

/// Shared orbit parameters, constant for the session.
#[derive(Resource, Debug, Clone, Copy)]
pub struct OrbitConfig {
    pub center: Vec3,
    pub radius: f32,
    /// Angular velocity in radians per second.
    pub angular_speed: f32,
    /// Fixed yaw applied on top of the look-at orientation.
    pub yaw_offset: f32,
    /// Rate of the continuous additional yaw drift, in radians per second.
    pub yaw_drift_rate: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        OrbitConfig {
            center: Vec3::ZERO,
            radius: 20.0,
            angular_speed: 0.25,
            yaw_offset: FRAC_PI_2,
            yaw_drift_rate: 0.25,
        }
    }
}

/// Simulated seconds since the last clock restart. Advances only while the
/// animation is playing; restarts once a full orbital period has elapsed.
#[derive(Resource, Debug, Default)]
pub struct OrbitClock {
    pub elapsed: f32,
}

/// Attached to each tracked ship once the scene resolves.
#[derive(Component, Debug, Default)]
pub struct Orbiter {
    /// Angular baseline captured at the last clock restart.
    pub theta0: f32,
    /// Accumulated continuous yaw drift.
    pub yaw_drift: f32,
}

/// Position on the orbit circle at angle `theta`, in the horizontal plane
/// through `center`.
pub fn orbit_position(center: Vec3, radius: f32, theta: f32) -> Vec3 {
    Vec3::new(
        center.x + radius * theta.cos(),
        center.y,
        center.z + radius * theta.sin(),
    )
}

/// Angle of `position` about `center`, measured in the horizontal plane.
pub fn angle_about(center: Vec3, position: Vec3) -> f32 {
    f32::atan2(position.z - center.z, position.x - center.x)
}

/// Rotates `point` around the vertical axis through `origin` by `radians`.
pub fn rotate_around(point: Vec3, origin: Vec3, radians: f32) -> Vec3 {
    let x = point.x - origin.x;
    let z = point.z - origin.z;
    let (sin, cos) = radians.sin_cos();

    Vec3::new(
        cos * x - sin * z + origin.x,
        point.y,
        sin * x + cos * z + origin.z,
    )
}

pub struct Plugin;

impl Plugin {
    /// Attaches an `Orbiter` to each resolved ship, capturing its angular
    /// baseline from its current position.
    fn attach_orbiters(
        mut commands: Commands,
        config: Res<OrbitConfig>,
        objects: Res<scene::SceneObjects>,
        unattached_ships: Query<&Transform, Without<Orbiter>>,
    ) {
        let Ok(ships) = objects.ships() else {
            return;
        };

        for ship in ships {
            if let Ok(transform) = unattached_ships.get(ship) {
                commands.entity(ship).insert(Orbiter {
                    theta0: angle_about(config.center, transform.translation),
                    yaw_drift: 0.0,
                });
            }
        }
    }

    fn tick_orbit(
        playing: Res<controls::Playing>,
        time: Res<Time>,
        config: Res<OrbitConfig>,
        mut clock: ResMut<OrbitClock>,
        mut orbiters: Query<(&mut Transform, &mut Orbiter)>,
    ) {
        if !playing.0 {
            return;
        }

        // Restart the clock once a full revolution has elapsed. Each angular
        // baseline is recaptured from the current position before the restart,
        // so the restart introduces no positional discontinuity.
        let period = TAU / config.angular_speed;
        if clock.elapsed >= period {
            for (transform, mut orbiter) in orbiters.iter_mut() {
                orbiter.theta0 = angle_about(config.center, transform.translation);
            }
            clock.elapsed = 0.0;
        }

        clock.elapsed += time.delta_secs();

        for (mut transform, mut orbiter) in orbiters.iter_mut() {
            let theta = clock.elapsed * config.angular_speed + orbiter.theta0;
            transform.translation = orbit_position(config.center, config.radius, theta);

            orbiter.yaw_drift += config.yaw_drift_rate * time.delta_secs();

            // Look-at, then the fixed yaw offset, then the accumulated drift.
            // Quaternion composition is non-commutative; keep this order.
            transform.look_at(config.center, Vec3::Y);
            transform.rotation = transform.rotation
                * Quat::from_rotation_y(config.yaw_offset)
                * Quat::from_rotation_y(-orbiter.yaw_drift);
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitConfig>()
            .init_resource::<OrbitClock>()
            .add_systems(Update, (Self::attach_orbiters, Self::tick_orbit).chain());
    }
}
