//! Scene model: mesh nodes, one optional camera, one optional light.
//!
//! A scene borrows its meshes and is rebuilt for every render request.

use relief_math::pose::{pose_forward, pose_translation};
use relief_math::{Mat4, Vec3};
use relief_mesh::TriangleMesh;
use relief_types::{MeshId, NodeId};

/// Surface appearance of a mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base colour (RGBA, 0..1).
    pub base_color: [f32; 4],
    /// Interpolate vertex normals (`false` shades per face).
    pub smooth: bool,
    /// Render both sides of each triangle.
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        let [r, g, b] = relief_types::constants::MESH_RGB;
        Self {
            base_color: [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0],
            smooth: true,
            double_sided: false,
        }
    }
}

/// A renderable mesh in the scene.
#[derive(Debug, Clone)]
pub struct MeshNode<'a> {
    pub id: NodeId,
    /// Position of the mesh in the list the scene was built from.
    pub source: MeshId,
    pub mesh: &'a TriangleMesh,
    pub material: Material,
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view (radians).
    pub yfov: f32,
    /// Near clip distance.
    pub znear: f32,
    /// Far clip distance; `None` is an infinite far plane.
    pub zfar: Option<f32>,
}

impl PerspectiveCamera {
    /// Camera with an infinite far plane.
    pub fn new(yfov: f32, znear: f32) -> Self {
        Self {
            yfov,
            znear,
            zfar: None,
        }
    }

    /// Right-handed projection matrix mapping depth to `[0, 1]`.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        match self.zfar {
            Some(zfar) => Mat4::perspective_rh(self.yfov, aspect, self.znear, zfar),
            None => Mat4::perspective_infinite_rh(self.yfov, aspect, self.znear),
        }
    }
}

/// Camera plus its camera-to-world pose. The camera looks down its local -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraNode {
    pub id: NodeId,
    pub camera: PerspectiveCamera,
    pub pose: Mat4,
}

impl CameraNode {
    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        self.pose.inverse()
    }

    pub fn position(&self) -> Vec3 {
        pose_translation(&self.pose)
    }
}

/// A cone-shaped light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub color: [f32; 3],
    pub intensity: f32,
    /// Half-angle of full intensity (radians).
    pub inner_cone_angle: f32,
    /// Half-angle beyond which the light contributes nothing (radians).
    pub outer_cone_angle: f32,
}

/// Light plus its pose. The light shines down its local -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightNode {
    pub id: NodeId,
    pub light: SpotLight,
    pub pose: Mat4,
}

impl LightNode {
    pub fn position(&self) -> Vec3 {
        pose_translation(&self.pose)
    }

    /// Unit direction the light points in.
    pub fn direction(&self) -> Vec3 {
        pose_forward(&self.pose).normalize_or_zero()
    }
}

/// Everything a backend needs to produce one image.
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    /// Ambient light colour and intensity (RGBA).
    pub ambient_light: [f32; 4],
    /// Background colour (RGBA, 0..1).
    pub bg_color: [f32; 4],
    nodes: Vec<MeshNode<'a>>,
    camera: Option<CameraNode>,
    light: Option<LightNode>,
    next_id: u32,
}

impl<'a> Scene<'a> {
    /// Creates an empty scene.
    pub fn new(ambient_light: [f32; 4], bg_color: [f32; 4]) -> Self {
        Self {
            ambient_light,
            bg_color,
            nodes: Vec::new(),
            camera: None,
            light: None,
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends a mesh node and returns its id.
    pub fn add_mesh(&mut self, mesh: &'a TriangleMesh, material: Material) -> NodeId {
        let id = self.allocate_id();
        let source = MeshId(self.nodes.len() as u32);
        self.nodes.push(MeshNode {
            id,
            source,
            mesh,
            material,
        });
        id
    }

    /// Sets (or replaces) the camera.
    pub fn set_camera(&mut self, camera: PerspectiveCamera, pose: Mat4) -> NodeId {
        let id = self.allocate_id();
        self.camera = Some(CameraNode { id, camera, pose });
        id
    }

    /// Sets (or replaces) the light.
    pub fn set_light(&mut self, light: SpotLight, pose: Mat4) -> NodeId {
        let id = self.allocate_id();
        self.light = Some(LightNode { id, light, pose });
        id
    }

    /// Mesh nodes in insertion order.
    pub fn meshes(&self) -> &[MeshNode<'a>] {
        &self.nodes
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn camera(&self) -> Option<&CameraNode> {
        self.camera.as_ref()
    }

    pub fn light(&self) -> Option<&LightNode> {
        self.light.as_ref()
    }
}
