//! Integration tests for relief-scene.

use std::f32::consts::FRAC_1_SQRT_2;

use relief_math::pose::{pose_forward, pose_translation};
use relief_math::Vec3;
use relief_mesh::{heightmap_to_mesh, HeightGrid, TriangleMesh};
use relief_scene::framing::{camera_pose, combined_centroid, key_light_pose, standoff_distance};
use relief_scene::help::{write_keyboard_commands, KEYBOARD_COMMANDS};
use relief_scene::{
    DepthBuffer, HeadlessSession, ImagePresenter, PixelBuffer, RenderBackend, RenderFlags,
    RenderOptions, RenderOutput, RenderTargets, Scene, SceneComposer, SceneConfig, Viewport,
};
use relief_types::{ReliefError, ReliefResult};

fn flat_mesh() -> TriangleMesh {
    heightmap_to_mesh(&HeightGrid::zeros(4, 4)).unwrap()
}

/// Flat mesh whose centroid sits at `at`.
fn mesh_centered_at(at: Vec3) -> TriangleMesh {
    let mesh = flat_mesh();
    let c = mesh.centroid().unwrap();
    mesh.translated(at - c)
}

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

/// Backend that records the lifecycle and returns a filled buffer.
#[derive(Default)]
struct RecordingBackend {
    viewport: Option<Viewport>,
    flags: Option<RenderFlags>,
    had_camera: bool,
    had_light: bool,
    mesh_count: usize,
    released: u32,
    fail_init: bool,
    fail_render: bool,
}

impl RenderBackend for RecordingBackend {
    fn init(&mut self, viewport: Viewport) -> ReliefResult<()> {
        if self.fail_init {
            return Err(ReliefError::RenderBackend("no display".into()));
        }
        self.viewport = Some(viewport);
        Ok(())
    }

    fn render(&mut self, scene: &Scene<'_>, flags: RenderFlags) -> ReliefResult<RenderOutput> {
        if self.fail_render {
            return Err(ReliefError::RenderBackend("context lost".into()));
        }
        let vp = self.viewport.unwrap();
        self.flags = Some(flags);
        self.had_camera = scene.camera().is_some();
        self.had_light = scene.light().is_some();
        self.mesh_count = scene.mesh_count();
        Ok(RenderOutput {
            color: PixelBuffer::filled_rgb(vp.width, vp.height, [15, 15, 15]),
            depth: DepthBuffer::new(vp.width, vp.height),
        })
    }

    fn release(&mut self) {
        self.released += 1;
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[derive(Default)]
struct CountingPresenter {
    shown: Vec<(usize, usize, usize)>,
}

impl ImagePresenter for CountingPresenter {
    fn present(&mut self, image: &PixelBuffer) -> ReliefResult<()> {
        self.shown.push(image.shape());
        Ok(())
    }
}

// ─── Framing ─────────────────────────────────────────────────

#[test]
fn centroid_of_two_meshes_is_midpoint() {
    let meshes = [
        mesh_centered_at(Vec3::ZERO),
        mesh_centered_at(Vec3::new(10.0, 0.0, 0.0)),
    ];
    let c = combined_centroid(&meshes).unwrap();
    assert!(approx_vec(c, Vec3::new(5.0, 0.0, 0.0)), "got {c:?}");
}

#[test]
fn centroid_is_unweighted_across_meshes() {
    let small = mesh_centered_at(Vec3::ZERO);
    let big = heightmap_to_mesh(&HeightGrid::zeros(9, 9)).unwrap();
    let big_c = big.centroid().unwrap();
    let big = big.translated(Vec3::new(4.0, 0.0, 0.0) - big_c);

    let c = combined_centroid([&small, &big]).unwrap();
    assert!(approx_vec(c, Vec3::new(2.0, 0.0, 0.0)), "got {c:?}");
}

#[test]
fn centroid_of_empty_list_fails() {
    let meshes: [TriangleMesh; 0] = [];
    let err = combined_centroid(&meshes).unwrap_err();
    assert!(matches!(err, ReliefError::EmptyMeshList));
}

#[test]
fn standoff_distance_frames_default_width() {
    let cfg = SceneConfig::default();
    let dist = standoff_distance(&cfg.camera);
    assert!((dist - 0.779_423).abs() < 1e-4, "got {dist}");
}

#[test]
fn camera_pose_offsets_along_x_and_z() {
    let cfg = SceneConfig::default();
    let centroid = Vec3::new(0.5, 0.5, 0.0);
    let dist = standoff_distance(&cfg.camera);
    let pose = camera_pose(centroid, dist, &cfg.camera);

    let t = pose_translation(&pose);
    assert!(approx_vec(t, centroid + dist * Vec3::new(1.0, 0.0, 1.0)));

    // Looks back down towards the centroid.
    let forward = pose_forward(&pose);
    assert!(approx_vec(
        forward,
        Vec3::new(-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2)
    ));
}

#[test]
fn key_light_pose_offsets_along_y_and_z() {
    let cfg = SceneConfig::default();
    let centroid = Vec3::new(1.0, 2.0, 3.0);
    let dist = standoff_distance(&cfg.camera);
    let pose = key_light_pose(centroid, dist, &cfg.key_light);
    let t = pose_translation(&pose);
    assert!(approx_vec(t, centroid + dist * Vec3::new(0.0, -1.5, 1.5)));
}

// ─── Composition ─────────────────────────────────────────────

#[test]
fn build_scene_has_one_node_per_mesh() {
    let meshes = [flat_mesh(), flat_mesh(), flat_mesh()];
    let composer = SceneComposer::default();
    let scene = composer.build_scene(&meshes).unwrap();
    assert_eq!(scene.mesh_count(), 3);
    let sources: Vec<usize> = scene.meshes().iter().map(|n| n.source.index()).collect();
    assert_eq!(sources, vec![0, 1, 2]);
    assert!(scene.camera().is_none());
    assert!(scene.light().is_none());
    assert_eq!(scene.ambient_light, [0.2, 0.2, 0.2, 1.0]);
    assert!((scene.bg_color[0] - 15.0 / 255.0).abs() < 1e-6);
}

#[test]
fn build_scene_rejects_empty_list() {
    let composer = SceneComposer::default();
    let err = composer.build_scene(&[]).unwrap_err();
    assert!(matches!(err, ReliefError::EmptyMeshList));
}

#[test]
fn compose_offscreen_adds_camera_and_light() {
    let meshes = [flat_mesh()];
    let composer = SceneComposer::default();
    let scene = composer.compose_offscreen(&meshes).unwrap();

    let camera = scene.camera().unwrap();
    assert!((camera.camera.yfov - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    let light = scene.light().unwrap();
    assert_eq!(light.light.intensity, 15.0);
    assert!(light.light.inner_cone_angle < light.light.outer_cone_angle);
}

#[test]
fn node_ids_are_unique() {
    let meshes = [flat_mesh(), flat_mesh()];
    let scene = SceneComposer::default().compose_offscreen(&meshes).unwrap();
    let mut ids: Vec<u32> = scene.meshes().iter().map(|n| n.id.0).collect();
    ids.push(scene.camera().unwrap().id.0);
    ids.push(scene.light().unwrap().id.0);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

// ─── Render dispatch ─────────────────────────────────────────

#[test]
fn render_offscreen_uses_supersampled_viewport_and_shadows() {
    let meshes = [flat_mesh()];
    let mut backend = RecordingBackend::default();
    let composer = SceneComposer::default();
    let output = composer
        .render(
            &meshes,
            RenderOptions::offscreen(),
            RenderTargets::new().with_offscreen(&mut backend),
        )
        .unwrap()
        .unwrap();

    assert_eq!(output.color.shape(), (960, 1280, 3));
    assert_eq!(backend.viewport, Some(Viewport::new(1280, 960)));
    assert_eq!(backend.flags, Some(RenderFlags::SHADOWS_SPOT));
    assert!(backend.had_camera);
    assert!(backend.had_light);
    assert_eq!(backend.mesh_count, 1);
    assert_eq!(backend.released, 1);
}

#[test]
fn render_offscreen_releases_on_failure() {
    let meshes = [flat_mesh()];
    let mut backend = RecordingBackend {
        fail_render: true,
        ..Default::default()
    };
    let err = SceneComposer::default()
        .render_offscreen(&meshes, &mut backend)
        .unwrap_err();
    assert!(matches!(err, ReliefError::RenderBackend(_)));
    assert_eq!(backend.released, 1);
}

#[test]
fn render_surfaces_init_failure() {
    let meshes = [flat_mesh()];
    let mut backend = RecordingBackend {
        fail_init: true,
        ..Default::default()
    };
    let err = SceneComposer::default()
        .render(
            &meshes,
            RenderOptions::offscreen(),
            RenderTargets::new().with_offscreen(&mut backend),
        )
        .unwrap_err();
    assert!(matches!(err, ReliefError::RenderBackend(_)));
}

#[test]
fn render_with_empty_list_fails_before_backend() {
    let mut backend = RecordingBackend::default();
    let err = SceneComposer::default()
        .render(
            &[],
            RenderOptions::offscreen(),
            RenderTargets::new().with_offscreen(&mut backend),
        )
        .unwrap_err();
    assert!(matches!(err, ReliefError::EmptyMeshList));
    assert!(backend.viewport.is_none());
}

#[test]
fn render_plot_calls_presenter() {
    let meshes = [flat_mesh()];
    let mut backend = RecordingBackend::default();
    let mut presenter = CountingPresenter::default();
    let options = RenderOptions {
        offscreen: true,
        plot: true,
        print_help: false,
    };
    SceneComposer::new(SceneConfig::preview())
        .render(
            &meshes,
            options,
            RenderTargets::new()
                .with_offscreen(&mut backend)
                .with_presenter(&mut presenter),
        )
        .unwrap();
    assert_eq!(presenter.shown, vec![(480, 640, 3)]);
    assert_eq!(backend.flags, Some(RenderFlags::NONE));
}

#[test]
fn render_without_plot_skips_presenter() {
    let meshes = [flat_mesh()];
    let mut backend = RecordingBackend::default();
    let mut presenter = CountingPresenter::default();
    SceneComposer::default()
        .render(
            &meshes,
            RenderOptions::offscreen(),
            RenderTargets::new()
                .with_offscreen(&mut backend)
                .with_presenter(&mut presenter),
        )
        .unwrap();
    assert!(presenter.shown.is_empty());
}

#[test]
fn render_interactive_returns_no_pixels() {
    let meshes = [flat_mesh(), flat_mesh()];
    let mut session = HeadlessSession::new();
    let options = RenderOptions {
        print_help: false,
        ..Default::default()
    };
    let out = SceneComposer::default()
        .render(
            &meshes,
            options,
            RenderTargets::new().with_interactive(&mut session),
        )
        .unwrap();
    assert!(out.is_none());
    assert_eq!(session.session_count(), 1);
    assert_eq!(session.last_mesh_count(), 2);
    let settings = session.last_settings().unwrap();
    assert_eq!(settings.title, "Relief Viewer");
    assert!(settings.use_direct_lighting);
    assert!(!settings.cull_faces);
}

#[test]
fn render_interactive_without_session_fails() {
    let meshes = [flat_mesh()];
    let err = SceneComposer::default()
        .render(&meshes, RenderOptions::default(), RenderTargets::new())
        .unwrap_err();
    assert!(matches!(err, ReliefError::RenderBackend(_)));
}

#[test]
fn render_offscreen_without_backend_fails() {
    let meshes = [flat_mesh()];
    let err = SceneComposer::default()
        .render(&meshes, RenderOptions::offscreen(), RenderTargets::new())
        .unwrap_err();
    assert!(matches!(err, ReliefError::RenderBackend(_)));
}

#[test]
fn default_options() {
    let opts = RenderOptions::default();
    assert!(opts.print_help);
    assert!(!opts.offscreen);
    assert!(opts.plot);
}

// ─── Help text ───────────────────────────────────────────────

#[test]
fn keyboard_commands_list_every_key() {
    for key in ["a:", "c:", "f:", "h:", "i:", "l:", "m:", "n:", "o:", "q:", "r:", "s:", "w:", "z:"] {
        assert!(
            KEYBOARD_COMMANDS.contains(&format!("    {key}")),
            "missing {key}"
        );
    }
    assert!(KEYBOARD_COMMANDS.starts_with('\n'));
}

#[test]
fn keyboard_commands_keep_trailing_indent() {
    assert!(KEYBOARD_COMMANDS.ends_with("initial view.\n    "));

    let mut buf = Vec::new();
    write_keyboard_commands(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.ends_with("initial view.\n    \n"));
}

#[test]
fn write_keyboard_commands_to_buffer() {
    let mut buf = Vec::new();
    write_keyboard_commands(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("q: Quits the viewer."));
    assert!(text.ends_with('\n'));
}

// ─── Config ──────────────────────────────────────────────────

#[test]
fn default_config_validates() {
    SceneConfig::default().validate().unwrap();
    SceneConfig::preview().validate().unwrap();
}

#[test]
fn config_toml_round_trip() {
    let mut cfg = SceneConfig::default();
    cfg.background = [0, 0, 0];
    cfg.offscreen.scale = 1;
    let text = cfg.to_toml_string().unwrap();
    let back = SceneConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn partial_toml_keeps_defaults() {
    let cfg = SceneConfig::from_toml_str("[offscreen]\nshadows = false\n").unwrap();
    assert!(!cfg.offscreen.shadows);
    assert_eq!(cfg.offscreen.viewport(), Viewport::new(1280, 960));
    assert_eq!(cfg.camera, SceneConfig::default().camera);
}

#[test]
fn invalid_toml_is_serialization_error() {
    let err = SceneConfig::from_toml_str("offscreen = [").unwrap_err();
    assert!(matches!(err, ReliefError::Serialization(_)));
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.offscreen.scale = 0;
    assert!(matches!(cfg.validate(), Err(ReliefError::InvalidConfig(_))));

    let mut cfg = SceneConfig::default();
    cfg.key_light.inner_cone = 2.0;
    assert!(matches!(cfg.validate(), Err(ReliefError::InvalidConfig(_))));

    let mut cfg = SceneConfig::default();
    cfg.camera.yfov = 0.0;
    assert!(matches!(cfg.validate(), Err(ReliefError::InvalidConfig(_))));
}

#[test]
fn oversized_viewports_are_rejected() {
    let err = SceneConfig::from_toml_str(
        "[offscreen]\nbase_width = 70000\nbase_height = 480\nscale = 70000\n",
    )
    .unwrap_err();
    assert!(matches!(err, ReliefError::InvalidConfig(_)));

    let mut cfg = SceneConfig::default();
    cfg.offscreen.base_width = 8193;
    cfg.offscreen.scale = 2;
    assert!(matches!(cfg.validate(), Err(ReliefError::InvalidConfig(_))));
    assert_eq!(cfg.offscreen.viewport().width, 16386);

    let mut cfg = SceneConfig::default();
    cfg.offscreen.base_width = u32::MAX;
    cfg.offscreen.scale = 2;
    assert!(matches!(cfg.validate(), Err(ReliefError::InvalidConfig(_))));
    assert_eq!(cfg.offscreen.viewport().width, u32::MAX);

    let mut cfg = SceneConfig::default();
    cfg.viewer.height = 20_000;
    assert!(matches!(cfg.validate(), Err(ReliefError::InvalidConfig(_))));
}

#[test]
fn largest_viewport_is_accepted() {
    let mut cfg = SceneConfig::default();
    cfg.offscreen.base_width = 8192;
    cfg.offscreen.base_height = 8192;
    cfg.offscreen.scale = 2;
    cfg.validate().unwrap();
    assert_eq!(cfg.offscreen.viewport(), Viewport::new(16_384, 16_384));
}

#[test]
fn load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.toml");
    std::fs::write(&path, "background = [1, 2, 3]\n").unwrap();
    let cfg = SceneConfig::load(&path).unwrap();
    assert_eq!(cfg.background, [1, 2, 3]);

    let missing = SceneConfig::load(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(missing, ReliefError::Io(_)));
}
