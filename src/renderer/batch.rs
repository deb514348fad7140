//! Grouping of scene meshes into instanced draw batches.
//!
//! Meshes with equal geometry and material share one vertex/index buffer and
//! are drawn with a single instanced call; only their model matrices differ.
//! The stock starfield collapses to one batch this way.

use std::ops::Range;

use crate::scene::{Geometry, Material, ObjectId, Scene};

/// Meshes drawn together with one instanced call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    /// Geometry shared by every member.
    pub geometry: Geometry,
    /// Material shared by every member.
    pub material: Material,
    /// Member meshes in scene order.
    pub members: Vec<ObjectId>,
}

/// Group the scene's meshes by geometry and material, in order of first
/// appearance.
#[must_use]
pub fn plan_batches(scene: &Scene) -> Vec<DrawBatch> {
    let mut batches: Vec<DrawBatch> = Vec::new();
    for (id, mesh) in scene.meshes() {
        match batches.iter_mut().find(|b| {
            b.geometry == mesh.geometry && b.material == mesh.material
        }) {
            Some(batch) => batch.members.push(id),
            None => batches.push(DrawBatch {
                geometry: mesh.geometry,
                material: mesh.material.clone(),
                members: vec![id],
            }),
        }
    }
    batches
}

/// Model matrices of every batch member, concatenated in batch order, and
/// the instance range each batch occupies.
#[must_use]
pub fn instance_data(
    scene: &Scene,
    batches: &[DrawBatch],
) -> (Vec<[[f32; 4]; 4]>, Vec<Range<u32>>) {
    let mut matrices = Vec::new();
    let mut ranges = Vec::with_capacity(batches.len());
    for batch in batches {
        let start = matrices.len() as u32;
        matrices.extend(batch.members.iter().filter_map(|id| {
            scene
                .mesh(*id)
                .map(|mesh| mesh.transform.model_matrix().to_cols_array_2d())
        }));
        ranges.push(start..matrices.len() as u32);
    }
    (matrices, ranges)
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::Options;
    use crate::scene::SceneContext;

    fn stock_context() -> SceneContext {
        let mut rng = StdRng::seed_from_u64(9);
        SceneContext::build(&Options::default(), 1.0, &mut rng)
    }

    #[test]
    fn stock_scene_needs_three_batches() {
        let ctx = stock_context();
        let batches = plan_batches(&ctx.scene);
        let sizes: Vec<usize> = batches.iter().map(|b| b.members.len()).collect();
        // Torus, stars, moon in order of first appearance.
        assert_eq!(sizes, vec![1, 200, 1]);
        assert_eq!(batches[0].members, vec![ctx.torus]);
        assert_eq!(batches[2].members, vec![ctx.moon]);
    }

    #[test]
    fn instance_ranges_are_contiguous() {
        let ctx = stock_context();
        let batches = plan_batches(&ctx.scene);
        let (matrices, ranges) = instance_data(&ctx.scene, &batches);
        assert_eq!(matrices.len(), 202);
        assert_eq!(ranges, vec![0..1, 1..201, 201..202]);
    }

    #[test]
    fn instance_matrices_follow_transforms() {
        let mut ctx = stock_context();
        if let Some(moon) = ctx.scene.mesh_mut(ctx.moon) {
            moon.transform.position = Vec3::new(1.0, 2.0, 3.0);
        }
        let batches = plan_batches(&ctx.scene);
        let (matrices, _) = instance_data(&ctx.scene, &batches);
        let moon = Mat4::from_cols_array_2d(&matrices[201]);
        let expected = ctx.moon().map(|m| m.transform.model_matrix());
        assert_eq!(Some(moon), expected);
        assert_eq!(moon.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }
}
