use bevy::asset::AssetLoadFailedEvent;
use bevy::prelude::*;
use itertools::Itertools;

use super::orbit;

/// Canonical names of the tracked scene objects. Placeholder meshes are
/// spawned under these names at startup; a scene asset may also provide
/// entities with the same names.
pub const STAR_SHIP: &str = "StarShip";
pub const IMPERIAL_STAR_SHIP: &str = "ImperialStarShip";
pub const DEATH_STAR: &str = "DeathStar";

const GALAXY_SCENE: &str = "models/galaxy.glb";

/// Entity references for the named scene objects, resolved once instead of
/// looked up by name every frame.
#[derive(Resource, Default, Debug)]
pub struct SceneObjects {
    pub star_ship: Option<Entity>,
    pub imperial_star_ship: Option<Entity>,
    pub death_star: Option<Entity>,
}

impl SceneObjects {
    pub fn is_resolved(&self) -> bool {
        self.star_ship.is_some() && self.imperial_star_ship.is_some() && self.death_star.is_some()
    }

    /// The two orbiting ships, or the names still unresolved.
    pub fn ships(&self) -> Result<[Entity; 2], LookupError> {
        match (self.star_ship, self.imperial_star_ship) {
            (Some(star_ship), Some(imperial_star_ship)) => Ok([star_ship, imperial_star_ship]),
            (star_ship, imperial_star_ship) => {
                let mut missing = Vec::new();
                if star_ship.is_none() {
                    missing.push(STAR_SHIP);
                }
                if imperial_star_ship.is_none() {
                    missing.push(IMPERIAL_STAR_SHIP);
                }
                Err(LookupError { missing })
            }
        }
    }

    pub fn station(&self) -> Result<Entity, LookupError> {
        self.death_star.ok_or(LookupError {
            missing: vec![DEATH_STAR],
        })
    }
}

/// A named scene object could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    pub missing: Vec<&'static str>,
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scene objects not found: {}",
            self.missing.iter().join(", ")
        )
    }
}

impl std::error::Error for LookupError {}

pub struct Plugin;

impl Plugin {
    fn spawn_scene(
        mut commands: Commands,
        asset_server: Res<AssetServer>,
        config: Res<orbit::OrbitConfig>,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<StandardMaterial>>,
    ) {
        // Galaxy backdrop. Loading is asynchronous; a failure is reported by
        // `report_load_failures` and leaves the scene partially initialized.
        commands.spawn((
            Name::new("Galaxy"),
            SceneRoot(
                asset_server.load(bevy::gltf::GltfAssetLabel::Scene(0).from_asset(GALAXY_SCENE)),
            ),
        ));

        let hull = materials.add(StandardMaterial {
            base_color: Color::srgb(0.75, 0.78, 0.82),
            metallic: 0.8,
            perceptual_roughness: 0.35,
            ..default()
        });

        let star_ship_spawn = Vec3::new(
            config.center.x + config.radius,
            config.center.y,
            config.center.z,
        );

        commands.spawn((
            Name::new(STAR_SHIP),
            Mesh3d(meshes.add(Cuboid::new(3.0, 1.0, 1.5))),
            MeshMaterial3d(hull.clone()),
            Transform::from_translation(star_ship_spawn),
        ));

        // The imperial ship starts on the opposite side of the orbit.
        commands.spawn((
            Name::new(IMPERIAL_STAR_SHIP),
            Mesh3d(meshes.add(Cuboid::new(2.0, 0.8, 2.6))),
            MeshMaterial3d(hull),
            Transform::from_translation(orbit::rotate_around(
                star_ship_spawn,
                config.center,
                std::f32::consts::PI,
            )),
        ));

        commands.spawn((
            Name::new(DEATH_STAR),
            Mesh3d(meshes.add(Sphere::new(4.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.55, 0.55, 0.58),
                perceptual_roughness: 0.9,
                ..default()
            })),
            Transform::from_xyz(0.0, 10.0, 32.0),
        ));
    }

    fn resolve_objects(
        mut commands: Commands,
        mut objects: ResMut<SceneObjects>,
        named_entities: Query<(Entity, &Name), Added<Name>>,
    ) {
        let was_resolved = objects.is_resolved();

        for (entity, name) in named_entities.iter() {
            let slot = match name.as_str() {
                STAR_SHIP => &mut objects.star_ship,
                IMPERIAL_STAR_SHIP => &mut objects.imperial_star_ship,
                DEATH_STAR => &mut objects.death_star,
                _ => continue,
            };

            // An asset-provided entity supersedes the placeholder, which
            // must not keep orbiting alongside it.
            if let Some(superseded) = slot.replace(entity) {
                if superseded != entity {
                    commands.entity(superseded).despawn();
                }
            }
        }

        if !was_resolved && objects.is_resolved() {
            info!("scene objects resolved: {STAR_SHIP}, {IMPERIAL_STAR_SHIP}, {DEATH_STAR}");
        }
    }

    fn report_load_failures(mut failed_event_reader: EventReader<AssetLoadFailedEvent<Scene>>) {
        for event in failed_event_reader.read() {
            error!("failed to load scene asset {}: {}", event.path, event.error);
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneObjects>()
            .add_systems(Startup, Self::spawn_scene)
            .add_systems(
                Update,
                (Self::resolve_objects, Self::report_load_failures),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_ships_report_missing_names() {
        let objects = SceneObjects::default();
        let error = objects.ships().unwrap_err();
        assert_eq!(error.missing, vec![STAR_SHIP, IMPERIAL_STAR_SHIP]);
        assert_eq!(
            error.to_string(),
            "scene objects not found: StarShip, ImperialStarShip"
        );
    }

    #[test]
    fn test_partially_resolved_ships_report_remaining_name() {
        let objects = SceneObjects {
            star_ship: Some(Entity::from_raw(1)),
            ..Default::default()
        };
        let error = objects.ships().unwrap_err();
        assert_eq!(error.missing, vec![IMPERIAL_STAR_SHIP]);
    }

    #[test]
    fn test_asset_named_entity_supersedes_placeholder() {
        let mut app = App::new();
        app.init_resource::<SceneObjects>();
        app.add_systems(Update, Plugin::resolve_objects);

        let placeholder = app.world_mut().spawn(Name::new(STAR_SHIP)).id();
        app.update();
        assert_eq!(
            app.world().resource::<SceneObjects>().star_ship,
            Some(placeholder)
        );

        let from_asset = app.world_mut().spawn(Name::new(STAR_SHIP)).id();
        app.update();
        assert_eq!(
            app.world().resource::<SceneObjects>().star_ship,
            Some(from_asset)
        );
        // The placeholder is gone, so nothing orbits twice under one name.
        assert!(app.world().get::<Name>(placeholder).is_none());
    }

    #[test]
    fn test_resolved_objects_yield_entities() {
        let objects = SceneObjects {
            star_ship: Some(Entity::from_raw(1)),
            imperial_star_ship: Some(Entity::from_raw(2)),
            death_star: Some(Entity::from_raw(3)),
        };
        assert!(objects.is_resolved());
        assert!(objects.ships().is_ok());
        assert!(objects.station().is_ok());
    }
}
