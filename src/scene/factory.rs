//! Construction of the scene's meshes and lights from options.
//!
//! Each `add_*` method builds one object and appends it to the borrowed
//! scene. Star placement draws from the caller's RNG, so a seeded RNG
//! reproduces the same starfield.

use glam::Vec3;
use rand::Rng;

use super::geometry::{SphereGeometry, TorusGeometry};
use super::light::{AmbientLight, PointLight};
use super::material::{
    color_from_hex, BasicMaterial, StandardMaterial, TextureSource,
};
use super::transform::Transform;
use super::{Mesh, ObjectId, Scene};
use crate::options::{
    AssetOptions, LightingOptions, MoonOptions, StarfieldOptions, TorusOptions,
};

/// Uniform random value in `[-range / 2, range / 2]`.
pub fn rand_float_spread<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    range * (0.5 - rng.random::<f32>())
}

/// Ids of the point and ambient light added by
/// [`ObjectFactory::add_lights`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightIds {
    /// Point light.
    pub point: ObjectId,
    /// Ambient light.
    pub ambient: ObjectId,
}

/// Builds meshes and lights into a scene.
pub struct ObjectFactory<'a> {
    scene: &'a mut Scene,
}

impl<'a> ObjectFactory<'a> {
    /// Factory appending to `scene`.
    pub fn new(scene: &'a mut Scene) -> Self {
        Self { scene }
    }

    /// Append a mesh with the given placement.
    pub fn add_mesh(&mut self, mesh: Mesh) -> ObjectId {
        self.scene.add(mesh)
    }

    /// Append the wireframe torus at the origin.
    pub fn add_torus(&mut self, opts: &TorusOptions) -> ObjectId {
        let geometry = TorusGeometry::new(
            opts.radius,
            opts.tube,
            opts.radial_segments,
            opts.tubular_segments,
        );
        let material = BasicMaterial {
            color: color_from_hex(opts.color),
            wireframe: true,
        };
        self.add_mesh(Mesh::new(geometry, material))
    }

    /// Append one star at a random position inside the spread cube.
    pub fn add_star<R: Rng + ?Sized>(
        &mut self,
        opts: &StarfieldOptions,
        rng: &mut R,
    ) -> ObjectId {
        let position = Vec3::new(
            rand_float_spread(rng, opts.spread),
            rand_float_spread(rng, opts.spread),
            rand_float_spread(rng, opts.spread),
        );
        let mesh = Mesh::new(
            SphereGeometry::new(opts.radius, opts.segments, opts.segments),
            StandardMaterial {
                color: color_from_hex(opts.color),
                ..StandardMaterial::default()
            },
        )
        .with_transform(Transform::new().with_position(position));
        self.add_mesh(mesh)
    }

    /// Append `opts.count` stars.
    pub fn add_starfield<R: Rng + ?Sized>(
        &mut self,
        opts: &StarfieldOptions,
        rng: &mut R,
    ) -> Vec<ObjectId> {
        (0..opts.count).map(|_| self.add_star(opts, rng)).collect()
    }

    /// Append the moon with its color and normal maps.
    pub fn add_moon(
        &mut self,
        opts: &MoonOptions,
        assets: &AssetOptions,
    ) -> ObjectId {
        let material = StandardMaterial {
            map: AssetOptions::resolve(assets.moon_map.as_ref())
                .map(TextureSource::new),
            normal_map: AssetOptions::resolve(assets.moon_normal_map.as_ref())
                .map(TextureSource::new),
            ..StandardMaterial::default()
        };
        let mesh = Mesh::new(
            SphereGeometry::new(
                opts.radius,
                opts.width_segments,
                opts.height_segments,
            ),
            material,
        )
        .with_transform(
            Transform::new().with_position(Vec3::from(opts.position)),
        );
        self.add_mesh(mesh)
    }

    /// Append the point light, then the ambient light.
    pub fn add_lights(&mut self, opts: &LightingOptions) -> LightIds {
        let point = self.scene.add(PointLight {
            position: Vec3::from(opts.point_position),
            color: color_from_hex(opts.point_color),
            intensity: opts.point_intensity,
        });
        let ambient = self.scene.add(AmbientLight {
            color: color_from_hex(opts.ambient_color),
            intensity: opts.ambient_intensity,
        });
        LightIds { point, ambient }
    }

    /// Set the scene background image.
    pub fn set_background(&mut self, assets: &AssetOptions) {
        self.scene.set_background(
            AssetOptions::resolve(assets.background.as_ref())
                .map(TextureSource::new),
        );
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::scene::{Geometry, Material};

    #[test]
    fn spread_stays_in_symmetric_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = rand_float_spread(&mut rng, 100.0);
            assert!((-50.0..=50.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn stars_are_reproducible_with_seeded_rng() {
        let opts = StarfieldOptions::default();
        let positions = |seed| {
            let mut scene = Scene::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let ids =
                ObjectFactory::new(&mut scene).add_starfield(&opts, &mut rng);
            ids.iter()
                .filter_map(|id| scene.mesh(*id))
                .map(|m| m.transform.position)
                .collect::<Vec<_>>()
        };
        let a = positions(42);
        assert_eq!(a.len(), 200);
        assert_eq!(a, positions(42));
        assert_ne!(a, positions(43));
    }

    #[test]
    fn torus_is_green_wireframe_at_origin() {
        let mut scene = Scene::new();
        let id =
            ObjectFactory::new(&mut scene).add_torus(&TorusOptions::default());
        let torus = scene.mesh(id).unwrap();
        assert!(torus.material.is_wireframe());
        assert_eq!(torus.material.color(), [0.0, 1.0, 0.0]);
        assert_eq!(torus.transform, Transform::default());
        assert!(matches!(
            torus.geometry,
            Geometry::Torus(TorusGeometry {
                radial_segments: 16,
                tubular_segments: 100,
                ..
            })
        ));
    }

    #[test]
    fn moon_references_both_maps() {
        let mut scene = Scene::new();
        let id = ObjectFactory::new(&mut scene)
            .add_moon(&MoonOptions::default(), &AssetOptions::default());
        let moon = scene.mesh(id).unwrap();
        assert_eq!(moon.transform.position, Vec3::new(-10.0, 0.0, 30.0));
        let Material::Standard(material) = &moon.material else {
            panic!("moon should use a standard material");
        };
        assert_eq!(
            material.map.as_ref().map(TextureSource::path),
            Some(std::path::Path::new("assets/moon.jpg"))
        );
        assert!(material.normal_map.is_some());
    }

    #[test]
    fn empty_asset_path_leaves_moon_untextured() {
        let mut scene = Scene::new();
        let assets = AssetOptions {
            moon_map: Some(std::path::PathBuf::new()),
            moon_normal_map: None,
            ..AssetOptions::default()
        };
        let id = ObjectFactory::new(&mut scene)
            .add_moon(&MoonOptions::default(), &assets);
        let Some(Mesh {
            material: Material::Standard(material),
            ..
        }) = scene.mesh(id)
        else {
            panic!("moon should use a standard material");
        };
        assert!(material.map.is_none());
        assert!(material.normal_map.is_none());
    }
}
