//! The scene together with the camera and the handles of its animated
//! objects.

use rand::Rng;

use super::factory::{LightIds, ObjectFactory};
use super::{Mesh, ObjectId, Scene};
use crate::camera::core::PerspectiveCamera;
use crate::options::Options;

/// Everything the frame loop and the scroll controller mutate.
#[derive(Debug)]
pub struct SceneContext {
    /// Object container.
    pub scene: Scene,
    /// Viewing camera.
    pub camera: PerspectiveCamera,
    /// Wireframe torus, rotated every frame.
    pub torus: ObjectId,
    /// Moon, rotated on every scroll update.
    pub moon: ObjectId,
    /// Scene lights.
    pub lights: LightIds,
    /// Star meshes in creation order.
    pub stars: Vec<ObjectId>,
}

impl SceneContext {
    /// Populate a new scene from `opts`, drawing star positions from `rng`.
    ///
    /// Objects are added as torus, lights, stars, then the moon. The camera
    /// is placed at its configured start; the scroll controller has not been
    /// applied yet.
    pub fn build<R: Rng + ?Sized>(
        opts: &Options,
        aspect: f32,
        rng: &mut R,
    ) -> Self {
        let mut scene = Scene::new();
        let mut factory = ObjectFactory::new(&mut scene);

        let torus = factory.add_torus(&opts.torus);
        let lights = factory.add_lights(&opts.lighting);
        let stars = factory.add_starfield(&opts.starfield, rng);
        factory.set_background(&opts.assets);
        let moon = factory.add_moon(&opts.moon, &opts.assets);

        log::info!(
            "scene populated: {} objects ({} stars)",
            scene.len(),
            stars.len()
        );
        log::debug!(
            "background: {:?}",
            scene.background().map(|bg| bg.path().display().to_string())
        );

        Self {
            scene,
            camera: PerspectiveCamera::from_options(&opts.camera, aspect),
            torus,
            moon,
            lights,
            stars,
        }
    }

    /// The torus mesh.
    #[must_use]
    pub fn torus(&self) -> Option<&Mesh> {
        self.scene.mesh(self.torus)
    }

    /// The moon mesh.
    #[must_use]
    pub fn moon(&self) -> Option<&Mesh> {
        self.scene.mesh(self.moon)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::scene::SceneObject;

    fn build() -> SceneContext {
        let mut rng = StdRng::seed_from_u64(1);
        SceneContext::build(&Options::default(), 1.5, &mut rng)
    }

    #[test]
    fn holds_all_stock_objects() {
        let ctx = build();
        assert_eq!(ctx.scene.len(), 204);
        assert_eq!(ctx.stars.len(), 200);
        assert_eq!(ctx.scene.meshes().count(), 202);
        assert_eq!(ctx.scene.lights().count(), 2);
    }

    #[test]
    fn handles_address_the_right_objects() {
        let ctx = build();
        assert!(ctx.torus().is_some_and(|m| m.material.is_wireframe()));
        assert!(ctx.moon().is_some());
        assert!(matches!(
            ctx.scene.get(ctx.lights.point),
            Some(SceneObject::Light(crate::scene::Light::Point(_)))
        ));
        assert!(matches!(
            ctx.scene.get(ctx.lights.ambient),
            Some(SceneObject::Light(crate::scene::Light::Ambient(_)))
        ));
        assert_eq!(ctx.camera.aspect, 1.5);
        assert!(ctx.scene.background().is_some());
    }

    #[test]
    fn star_count_follows_options() {
        let mut opts = Options::default();
        opts.starfield.count = 3;
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = SceneContext::build(&opts, 1.0, &mut rng);
        assert_eq!(ctx.scene.len(), 7);
    }
}
