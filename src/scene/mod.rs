//! Scene container: an append-only list of meshes and lights plus an
//! optional background image.
//!
//! Objects are addressed by [`ObjectId`], their insertion index. There is no
//! removal API, so an id stays valid for the lifetime of the scene.
//! Structural changes (insertions, background) bump a generation counter the
//! renderer uses to rebuild its draw batches; transform mutation does not.

pub mod context;
pub mod factory;
pub mod geometry;
pub mod light;
pub mod material;
pub mod transform;

pub use context::SceneContext;
pub use factory::ObjectFactory;
pub use geometry::{
    Geometry, MeshData, MeshVertex, SphereGeometry, TorusGeometry,
};
pub use light::{AmbientLight, Light, PointLight};
pub use material::{BasicMaterial, Material, StandardMaterial, TextureSource};
pub use transform::Transform;

/// Stable handle to an object in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Insertion index of the object.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Geometry and material with a mutable placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Shape descriptor.
    pub geometry: Geometry,
    /// Appearance descriptor.
    pub material: Material,
    /// World placement.
    pub transform: Transform,
}

impl Mesh {
    /// Mesh at the origin.
    pub fn new(
        geometry: impl Into<Geometry>,
        material: impl Into<Material>,
    ) -> Self {
        Self {
            geometry: geometry.into(),
            material: material.into(),
            transform: Transform::default(),
        }
    }

    /// Builder: set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Anything stored in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    /// Renderable mesh.
    Mesh(Mesh),
    /// Light source.
    Light(Light),
}

impl From<Mesh> for SceneObject {
    fn from(mesh: Mesh) -> Self {
        Self::Mesh(mesh)
    }
}

impl From<Light> for SceneObject {
    fn from(light: Light) -> Self {
        Self::Light(light)
    }
}

impl From<PointLight> for SceneObject {
    fn from(light: PointLight) -> Self {
        Self::Light(light.into())
    }
}

impl From<AmbientLight> for SceneObject {
    fn from(light: AmbientLight) -> Self {
        Self::Light(light.into())
    }
}

/// Ordered set of scene objects.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    background: Option<TextureSource>,
    /// Monotonically increasing generation; bumped on structural change.
    generation: u64,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object and return its id.
    pub fn add(&mut self, object: impl Into<SceneObject>) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(object.into());
        self.generation += 1;
        id
    }

    /// Look up any object.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    /// Look up a mesh. Returns `None` if the id names a light.
    #[must_use]
    pub fn mesh(&self, id: ObjectId) -> Option<&Mesh> {
        match self.objects.get(id.index()) {
            Some(SceneObject::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    /// Mutable mesh lookup for transform updates.
    pub fn mesh_mut(&mut self, id: ObjectId) -> Option<&mut Mesh> {
        match self.objects.get_mut(id.index()) {
            Some(SceneObject::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    /// Meshes in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = (ObjectId, &Mesh)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, obj)| match obj {
                SceneObject::Mesh(mesh) => Some((ObjectId(i as u32), mesh)),
                SceneObject::Light(_) => None,
            })
    }

    /// Lights in insertion order.
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.objects.iter().filter_map(|obj| match obj {
            SceneObject::Light(light) => Some(light),
            SceneObject::Mesh(_) => None,
        })
    }

    /// Number of objects (meshes and lights).
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Background image, if any.
    #[must_use]
    pub fn background(&self) -> Option<&TextureSource> {
        self.background.as_ref()
    }

    /// Set the background image.
    pub fn set_background(&mut self, background: Option<TextureSource>) {
        self.background = background;
        self.generation += 1;
    }

    /// Current structural generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn star() -> Mesh {
        Mesh::new(
            SphereGeometry::new(0.25, 24, 24),
            StandardMaterial::default(),
        )
    }

    #[test]
    fn ids_are_insertion_indices() {
        let mut scene = Scene::new();
        let a = scene.add(star());
        let b = scene.add(PointLight::default());
        let c = scene.add(star());
        assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn mesh_lookup_rejects_lights() {
        let mut scene = Scene::new();
        let light = scene.add(AmbientLight::default());
        assert!(scene.mesh(light).is_none());
        assert!(scene.mesh_mut(light).is_none());
        assert!(matches!(scene.get(light), Some(SceneObject::Light(_))));
    }

    #[test]
    fn insertion_bumps_generation_but_mutation_does_not() {
        let mut scene = Scene::new();
        assert_eq!(scene.generation(), 0);
        let id = scene.add(star());
        assert_eq!(scene.generation(), 1);

        if let Some(mesh) = scene.mesh_mut(id) {
            mesh.transform.position = Vec3::new(1.0, 2.0, 3.0);
        }
        assert_eq!(scene.generation(), 1);
        assert_eq!(
            scene.mesh(id).map(|m| m.transform.position),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );

        scene.set_background(Some(TextureSource::new("space.jpg")));
        assert_eq!(scene.generation(), 2);
    }

    #[test]
    fn meshes_and_lights_are_partitioned() {
        let mut scene = Scene::new();
        let _ = scene.add(star());
        let _ = scene.add(PointLight::default());
        let _ = scene.add(star());
        let _ = scene.add(AmbientLight::default());
        let mesh_ids: Vec<usize> =
            scene.meshes().map(|(id, _)| id.index()).collect();
        assert_eq!(mesh_ids, vec![0, 2]);
        assert_eq!(scene.lights().count(), 2);
    }
}
