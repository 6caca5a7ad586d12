//! Conversion from a borrowed [`Scene`] to owned viewer data.

use bevy::render::mesh::{Indices, Mesh, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use relief_mesh::TriangleMesh;
use relief_scene::framing::combined_centroid;
use relief_scene::Scene;
use relief_types::ReliefResult;

/// Maps a Z-up scene point into Bevy's Y-up world.
#[inline]
pub fn z_up_to_y_up([x, y, z]: [f32; 3]) -> [f32; 3] {
    [x, z, -y]
}

/// Vertex buffers of one mesh node.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
}

impl MeshData {
    pub fn from_mesh(mesh: &TriangleMesh, base_color: [f32; 4]) -> Self {
        Self {
            positions: mesh.positions_array(),
            normals: mesh.normals_array(),
            uvs: mesh.uvs_array(),
            indices: mesh.indices.clone(),
            base_color,
        }
    }

    /// Builds a triangle-list Bevy mesh in scene (Z-up) coordinates.
    pub fn to_bevy_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs.clone());
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh
    }
}

/// Everything the viewer needs, detached from the scene's borrows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerScene {
    pub meshes: Vec<MeshData>,
    pub ambient_light: [f32; 4],
    pub bg_color: [f32; 4],
    /// Orbit focus in Y-up world coordinates.
    pub focus: [f32; 3],
    /// Largest distance from the focus to any vertex.
    pub radius: f32,
}

impl ViewerScene {
    pub fn from_scene(scene: &Scene<'_>) -> ReliefResult<Self> {
        let centroid = combined_centroid(scene.meshes().iter().map(|n| n.mesh))?;

        let radius = scene
            .meshes()
            .iter()
            .flat_map(|n| (0..n.mesh.vertex_count()).map(|i| n.mesh.position_vec3(i)))
            .map(|p| (p - centroid).length())
            .fold(0.0_f32, f32::max)
            .max(1e-3);

        let meshes = scene
            .meshes()
            .iter()
            .map(|n| MeshData::from_mesh(n.mesh, n.material.base_color))
            .collect();

        Ok(Self {
            meshes,
            ambient_light: scene.ambient_light,
            bg_color: scene.bg_color,
            focus: z_up_to_y_up(centroid.to_array()),
            radius,
        })
    }
}
