//! Integration tests for relief-render.

use std::f32::consts::FRAC_PI_3;

use relief_math::pose::pose_from_rows;
use relief_math::Vec3;
use relief_mesh::{heightmap_to_mesh, HeightGrid, TriangleMesh};
use relief_render::{ShadowMap, SoftwareRasterizer};
use relief_scene::{
    Material, PerspectiveCamera, RenderBackend, RenderFlags, Scene, SceneComposer, SceneConfig,
    Viewport,
};
use relief_types::constants::{AMBIENT_LIGHT, MAX_VIEWPORT_SIDE, SHADOW_MAP_SIZE};
use relief_types::ReliefError;

const BG: [u8; 3] = [15, 15, 15];

fn flat_mesh() -> TriangleMesh {
    heightmap_to_mesh(&HeightGrid::zeros(4, 4)).unwrap()
}

fn bg_rgba() -> [f32; 4] {
    [15.0 / 255.0, 15.0 / 255.0, 15.0 / 255.0, 1.0]
}

/// Scene with one flat unit mesh and a camera at `eye` with the given basis.
fn scene_with_camera(mesh: &TriangleMesh, rows: [[f32; 3]; 3], eye: Vec3) -> Scene<'_> {
    let mut scene = Scene::new(AMBIENT_LIGHT, bg_rgba());
    scene.add_mesh(mesh, Material::default());
    scene.set_camera(PerspectiveCamera::new(FRAC_PI_3, 0.05), pose_from_rows(rows, eye));
    scene
}

const LOOK_UP: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, -1.0]];
const LOOK_DOWN: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

// ─── Lifecycle ───────────────────────────────────────────────

#[test]
fn software_init() {
    let mut backend = SoftwareRasterizer::new();
    backend.init(Viewport::new(64, 48)).unwrap();
    assert_eq!(backend.name(), "software");
    assert_eq!(backend.viewport(), Some(Viewport::new(64, 48)));
    assert_eq!(backend.frame_count(), 0);
}

#[test]
fn init_rejects_empty_viewport() {
    let mut backend = SoftwareRasterizer::new();
    let err = backend.init(Viewport::new(0, 480)).unwrap_err();
    assert!(matches!(err, ReliefError::RenderBackend(_)));
}

#[test]
fn init_rejects_oversized_viewport() {
    let mut backend = SoftwareRasterizer::new();
    let err = backend.init(Viewport::new(20_000, 10)).unwrap_err();
    assert!(matches!(err, ReliefError::RenderBackend(_)));
}

#[test]
fn render_before_init_fails() {
    let mesh = flat_mesh();
    let scene = scene_with_camera(&mesh, LOOK_DOWN, Vec3::new(0.5, 0.5, 2.0));
    let mut backend = SoftwareRasterizer::new();
    let err = backend.render(&scene, RenderFlags::NONE).unwrap_err();
    assert!(matches!(err, ReliefError::RenderBackend(_)));
}

#[test]
fn render_after_release_fails() {
    let mesh = flat_mesh();
    let scene = scene_with_camera(&mesh, LOOK_DOWN, Vec3::new(0.5, 0.5, 2.0));
    let mut backend = SoftwareRasterizer::new();
    backend.init(Viewport::new(32, 32)).unwrap();
    backend.render(&scene, RenderFlags::NONE).unwrap();
    assert_eq!(backend.frame_count(), 1);
    backend.release();
    backend.release();
    assert!(backend.viewport().is_none());
    assert!(backend.render(&scene, RenderFlags::NONE).is_err());
}

#[test]
fn scene_without_camera_fails() {
    let meshes = [flat_mesh()];
    let scene = SceneComposer::default().build_scene(&meshes).unwrap();
    let mut backend = SoftwareRasterizer::new();
    backend.init(Viewport::new(32, 32)).unwrap();
    let err = backend.render(&scene, RenderFlags::NONE).unwrap_err();
    assert!(matches!(err, ReliefError::RenderBackend(_)));
}

// ─── Composed renders ────────────────────────────────────────

#[test]
fn flat_heightmap_renders_full_size_image() {
    let meshes = [flat_mesh()];
    let mut backend = SoftwareRasterizer::new();
    let out = SceneComposer::default()
        .render_offscreen(&meshes, &mut backend)
        .unwrap();

    assert_eq!(out.color.shape(), (960, 1280, 3));
    assert_eq!(out.depth.shape(), (960, 1280));
    assert!(backend.viewport().is_none(), "backend released after render");

    // Corners show the background.
    assert_eq!(out.color.pixel(0, 0), &BG);
    assert_eq!(out.depth.get(0, 0), 0.0);

    // The optical axis hits the centroid at the standoff distance.
    let center = out.color.pixel(640, 480);
    assert_ne!(center, &BG);
    let expected = 0.9 / (2.0 * (std::f32::consts::PI / 6.0).tan()) * 2f32.sqrt();
    let depth = out.depth.get(640, 480);
    assert!((depth - expected).abs() < 1e-2, "depth {depth}, expected {expected}");
}

#[test]
fn key_light_brightens_surface() {
    let meshes = [flat_mesh()];

    let lit = SceneComposer::new(SceneConfig::preview())
        .render_offscreen(&meshes, &mut SoftwareRasterizer::new())
        .unwrap();

    let mut dark_cfg = SceneConfig::preview();
    dark_cfg.key_light.intensity = 0.0;
    let dark = SceneComposer::new(dark_cfg)
        .render_offscreen(&meshes, &mut SoftwareRasterizer::new())
        .unwrap();

    let sum = |p: &[u8]| p.iter().map(|&c| c as u32).sum::<u32>();
    assert!(sum(lit.color.pixel(320, 240)) > sum(dark.color.pixel(320, 240)));
}

#[test]
fn spot_shadows_only_darken() {
    let grid = HeightGrid::from_fn(32, 32, |i, j| {
        if (14..18).contains(&i) && (14..18).contains(&j) {
            0.5
        } else {
            0.0
        }
    });
    let meshes = [heightmap_to_mesh(&grid).unwrap()];

    let plain = SceneComposer::new(SceneConfig::preview())
        .render_offscreen(&meshes, &mut SoftwareRasterizer::new())
        .unwrap();

    let mut cfg = SceneConfig::preview();
    cfg.offscreen.shadows = true;
    let shadowed = SceneComposer::new(cfg)
        .render_offscreen(&meshes, &mut SoftwareRasterizer::new())
        .unwrap();

    let a = plain.color.as_raw();
    let b = shadowed.color.as_raw();
    assert_eq!(a.len(), b.len());
    assert!(a.iter().zip(b).all(|(p, s)| s <= p));
    assert!(a.iter().zip(b).any(|(p, s)| s < p), "pillar casts no shadow");
    assert_eq!(plain.depth, shadowed.depth);
}

#[test]
fn color_buffer_is_tightly_packed_rgb() {
    let meshes = [flat_mesh()];
    let out = SceneComposer::new(SceneConfig::preview())
        .render_offscreen(&meshes, &mut SoftwareRasterizer::new())
        .unwrap();
    let raw = out.color.into_raw();
    assert_eq!(raw.len(), 640 * 480 * 3);
    assert_eq!(&raw[..3], &BG);
}

// ─── Shadow map ──────────────────────────────────────────────

#[test]
fn shadow_resolution_is_clamped() {
    assert_eq!(SoftwareRasterizer::new().shadow_resolution(), SHADOW_MAP_SIZE);
    assert_eq!(
        SoftwareRasterizer::new().with_shadow_resolution(0).shadow_resolution(),
        1
    );
    assert_eq!(
        SoftwareRasterizer::new()
            .with_shadow_resolution(70_000)
            .shadow_resolution(),
        MAX_VIEWPORT_SIDE
    );
}

#[test]
fn shadow_map_covers_the_scene() {
    let meshes = [flat_mesh()];
    let scene = SceneComposer::new(SceneConfig::preview())
        .compose_offscreen(&meshes)
        .unwrap();
    let light = scene.light().unwrap();

    let map = ShadowMap::build(&scene, light, 64).unwrap();
    assert_eq!(map.resolution(), 64);
    assert!(map.depth_at(32, 32).is_finite());

    let tiny = ShadowMap::build(&scene, light, 0).unwrap();
    assert_eq!(tiny.resolution(), 1);
}

// ─── Culling and clipping ────────────────────────────────────

#[test]
fn back_faces_are_culled() {
    let mesh = flat_mesh();
    let scene = scene_with_camera(&mesh, LOOK_UP, Vec3::new(0.5, 0.5, -1.0));
    let mut backend = SoftwareRasterizer::new();
    backend.init(Viewport::new(64, 48)).unwrap();

    let culled = backend.render(&scene, RenderFlags::NONE).unwrap();
    assert!(culled.color.as_raw().chunks(3).all(|p| p == BG));

    let kept = backend.render(&scene, RenderFlags::SKIP_CULL_FACES).unwrap();
    assert_ne!(kept.color.pixel(32, 24), &BG);
    assert!((kept.depth.get(32, 24) - 1.0).abs() < 1e-2);
}

#[test]
fn double_sided_material_is_never_culled() {
    let mesh = flat_mesh();
    let mut scene = Scene::new(AMBIENT_LIGHT, bg_rgba());
    scene.add_mesh(
        &mesh,
        Material {
            double_sided: true,
            ..Default::default()
        },
    );
    scene.set_camera(
        PerspectiveCamera::new(FRAC_PI_3, 0.05),
        pose_from_rows(LOOK_UP, Vec3::new(0.5, 0.5, -1.0)),
    );
    let mut backend = SoftwareRasterizer::new();
    backend.init(Viewport::new(64, 48)).unwrap();
    let out = backend.render(&scene, RenderFlags::NONE).unwrap();
    assert_ne!(out.color.pixel(32, 24), &BG);
}

#[test]
fn triangles_in_front_of_near_plane_are_rejected() {
    let mesh = flat_mesh();
    let scene = scene_with_camera(&mesh, LOOK_DOWN, Vec3::new(0.5, 0.5, 0.02));
    let mut backend = SoftwareRasterizer::new();
    backend.init(Viewport::new(64, 48)).unwrap();
    let out = backend.render(&scene, RenderFlags::SKIP_CULL_FACES).unwrap();
    assert!(out.color.as_raw().chunks(3).all(|p| p == BG));
    assert!(out.depth.as_slice().iter().all(|&d| d == 0.0));
}

#[test]
fn nearer_surface_wins_depth_test() {
    let low = flat_mesh();
    let high = flat_mesh().translated(Vec3::new(0.0, 0.0, 0.5));
    let mut scene = Scene::new(AMBIENT_LIGHT, bg_rgba());
    scene.add_mesh(&high, Material::default());
    scene.add_mesh(&low, Material::default());
    scene.set_camera(
        PerspectiveCamera::new(FRAC_PI_3, 0.05),
        pose_from_rows(LOOK_DOWN, Vec3::new(0.5, 0.5, 2.0)),
    );
    let mut backend = SoftwareRasterizer::new();
    backend.init(Viewport::new(64, 48)).unwrap();
    let out = backend.render(&scene, RenderFlags::NONE).unwrap();
    assert!((out.depth.get(32, 24) - 1.5).abs() < 1e-3);
}
