//! Relief interactive viewer using Bevy.
//!
//! Implements [`InteractiveSession`] with a PBR window and an orbit
//! camera. The scene is Z-up; it is mounted under a root entity rotated
//! into Bevy's Y-up world.

pub mod convert;
pub mod display;

use std::f32::consts::FRAC_PI_2;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use bevy::render::render_resource::Face;
use bevy::window::WindowMode;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

use relief_scene::{InteractiveSession, Scene, ViewerSettings};
use relief_types::{ReliefError, ReliefResult};

pub use convert::{MeshData, ViewerScene};
pub use display::display_available;

/// The windowing event loop can only be created once per process.
static LAUNCHED: AtomicBool = AtomicBool::new(false);

/// Interactive session backed by a Bevy window.
#[derive(Debug, Default)]
pub struct BevyViewer;

impl BevyViewer {
    pub fn new() -> Self {
        Self
    }
}

impl InteractiveSession for BevyViewer {
    fn run(&mut self, scene: &Scene<'_>, settings: &ViewerSettings) -> ReliefResult<()> {
        if !display_available() {
            return Err(ReliefError::RenderBackend(
                "no display available (DISPLAY / WAYLAND_DISPLAY unset)".into(),
            ));
        }
        if LAUNCHED.swap(true, Ordering::SeqCst) {
            return Err(ReliefError::RenderBackend(
                "the viewer window can only be opened once per process".into(),
            ));
        }

        let data = ViewerScene::from_scene(scene)?;
        tracing::info!(
            meshes = data.meshes.len(),
            width = settings.viewport.width,
            height = settings.viewport.height,
            "launching Bevy viewer"
        );

        match launch_viewer(data, settings.clone()) {
            AppExit::Success => Ok(()),
            AppExit::Error(code) => Err(ReliefError::RenderBackend(format!(
                "viewer exited with code {code}"
            ))),
        }
    }

    fn name(&self) -> &str {
        "bevy"
    }
}

/// Scene data handed to the startup system.
#[derive(Resource)]
struct SceneResource(ViewerScene);

/// Session settings.
#[derive(Resource)]
struct Settings(ViewerSettings);

/// Toggle state driven by the keyboard.
#[derive(Resource, Debug, Clone, PartialEq)]
struct ViewState {
    rotating: bool,
    cull_faces: bool,
    shadows: bool,
    fullscreen: bool,
    show_world_axis: bool,
}

/// Camera parameters restored by the reset key.
#[derive(Resource, Debug, Clone, Copy)]
struct InitialView {
    focus: Vec3,
    radius: f32,
    yaw: f32,
    pitch: f32,
}

/// Tags mesh entities spawned from the scene.
#[derive(Component)]
struct ReliefMesh;

/// Tags the light that follows the camera.
#[derive(Component)]
struct KeyLight;

fn launch_viewer(data: ViewerScene, settings: ViewerSettings) -> AppExit {
    let [r, g, b, a] = data.bg_color;
    let state = ViewState {
        rotating: false,
        cull_faces: settings.cull_faces,
        shadows: settings.shadows,
        fullscreen: false,
        show_world_axis: settings.show_world_axis,
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: settings.title.clone(),
            resolution: (
                settings.viewport.width as f32,
                settings.viewport.height as f32,
            )
                .into(),
            ..default()
        }),
        ..default()
    }));
    app.add_plugins(PanOrbitCameraPlugin);

    app.insert_resource(ClearColor(Color::srgba(r, g, b, a)));
    app.insert_resource(state);
    app.insert_resource(SceneResource(data));
    app.insert_resource(Settings(settings));

    app.add_systems(Startup, setup_scene);
    app.add_systems(
        Update,
        (handle_keys, rotate_view, apply_view_state, draw_world_axis),
    );

    app.run()
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene: Res<SceneResource>,
    settings: Res<Settings>,
    state: Res<ViewState>,
) {
    let scene = &scene.0;
    let settings = &settings.0;

    // Z-up scene root
    let root = commands
        .spawn(SpatialBundle::from_transform(Transform::from_rotation(
            Quat::from_rotation_x(-FRAC_PI_2),
        )))
        .id();

    for data in &scene.meshes {
        let [r, g, b, a] = data.base_color;
        let material = materials.add(StandardMaterial {
            base_color: Color::srgba(r, g, b, a),
            perceptual_roughness: 0.8,
            double_sided: !state.cull_faces,
            cull_mode: state.cull_faces.then_some(Face::Back),
            ..default()
        });
        let child = commands
            .spawn((
                PbrBundle {
                    mesh: meshes.add(data.to_bevy_mesh()),
                    material,
                    ..default()
                },
                ReliefMesh,
            ))
            .id();
        commands.entity(root).add_child(child);
    }

    let [ar, ag, ab, _] = scene.ambient_light;
    commands.insert_resource(AmbientLight {
        color: Color::linear_rgb(ar, ag, ab),
        brightness: 1000.0,
    });

    let focus = Vec3::from(scene.focus);
    let view = InitialView {
        focus,
        radius: scene.radius * 2.5,
        yaw: 0.8,
        pitch: 0.6,
    };
    commands.insert_resource(view);

    let light = DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: state.shadows,
            ..default()
        },
        ..default()
    };

    let camera = commands
        .spawn((
            Camera3dBundle::default(),
            PanOrbitCamera {
                focus: view.focus,
                radius: Some(view.radius),
                yaw: Some(view.yaw),
                pitch: Some(view.pitch),
                ..default()
            },
        ))
        .id();

    if settings.use_direct_lighting {
        // Shines along the camera's view direction.
        commands.entity(camera).with_children(|parent| {
            parent.spawn((light, KeyLight));
        });
    } else {
        commands.spawn((
            DirectionalLightBundle {
                transform: Transform::from_translation(focus + Vec3::new(1.0, 3.0, 2.0))
                    .looking_at(focus, Vec3::Y),
                ..light
            },
            KeyLight,
        ));
    }
}

fn handle_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<ViewState>,
    view: Res<InitialView>,
    mut cameras: Query<&mut PanOrbitCamera>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::KeyA) {
        state.rotating = !state.rotating;
    }
    if keys.just_pressed(KeyCode::KeyC) {
        state.cull_faces = !state.cull_faces;
    }
    if keys.just_pressed(KeyCode::KeyF) {
        state.fullscreen = !state.fullscreen;
    }
    if keys.just_pressed(KeyCode::KeyH) {
        state.shadows = !state.shadows;
    }
    if keys.just_pressed(KeyCode::KeyI) {
        state.show_world_axis = !state.show_world_axis;
    }
    if keys.just_pressed(KeyCode::KeyZ) {
        state.rotating = false;
        for mut cam in &mut cameras {
            cam.target_focus = view.focus;
            cam.target_radius = view.radius;
            cam.target_yaw = view.yaw;
            cam.target_pitch = view.pitch;
        }
    }
    if keys.just_pressed(KeyCode::KeyQ) {
        exit.send(AppExit::Success);
    }
}

fn rotate_view(
    state: Res<ViewState>,
    settings: Res<Settings>,
    mut cameras: Query<&mut PanOrbitCamera>,
) {
    if !state.rotating {
        return;
    }
    for mut cam in &mut cameras {
        cam.target_yaw += settings.0.rotate_rate;
    }
}

fn apply_view_state(
    state: Res<ViewState>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut lights: Query<&mut DirectionalLight, With<KeyLight>>,
    mut windows: Query<&mut Window>,
) {
    if !state.is_changed() {
        return;
    }
    for (_, material) in materials.iter_mut() {
        material.cull_mode = state.cull_faces.then_some(Face::Back);
        material.double_sided = !state.cull_faces;
    }
    for mut light in &mut lights {
        light.shadows_enabled = state.shadows;
    }
    if let Ok(mut window) = windows.get_single_mut() {
        let mode = if state.fullscreen {
            WindowMode::BorderlessFullscreen
        } else {
            WindowMode::Windowed
        };
        if window.mode != mode {
            window.mode = mode;
        }
    }
}

fn draw_world_axis(state: Res<ViewState>, mut gizmos: Gizmos) {
    if !state.show_world_axis {
        return;
    }
    // Scene axes mapped into the Y-up world.
    gizmos.line(Vec3::ZERO, Vec3::X, Color::srgb(1.0, 0.0, 0.0));
    gizmos.line(Vec3::ZERO, Vec3::NEG_Z, Color::srgb(0.0, 1.0, 0.0));
    gizmos.line(Vec3::ZERO, Vec3::Y, Color::srgb(0.0, 0.0, 1.0));
}
