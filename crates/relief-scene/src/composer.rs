//! Scene composer: meshes in, interactive session or pixels out.

use relief_mesh::TriangleMesh;
use relief_types::{ReliefError, ReliefResult};

use crate::backend::{
    ImagePresenter, InteractiveSession, RenderBackend, RenderOutput, ViewerSettings, Viewport,
};
use crate::config::SceneConfig;
use crate::framing::{camera_pose, combined_centroid, key_light_pose, standoff_distance};
use crate::help::print_keyboard_commands;
use crate::scene::{Material, PerspectiveCamera, Scene, SpotLight};

/// What a [`SceneComposer::render`] call should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print the keyboard reference before an interactive session.
    pub print_help: bool,
    /// Render to a pixel buffer instead of opening a viewer.
    pub offscreen: bool,
    /// Show the offscreen result through the image presenter.
    pub plot: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            print_help: true,
            offscreen: false,
            plot: true,
        }
    }
}

impl RenderOptions {
    /// Offscreen render, no plotting.
    pub fn offscreen() -> Self {
        Self {
            offscreen: true,
            plot: false,
            ..Default::default()
        }
    }
}

/// Collaborators available to [`SceneComposer::render`].
#[derive(Default)]
pub struct RenderTargets<'t> {
    pub offscreen: Option<&'t mut dyn RenderBackend>,
    pub interactive: Option<&'t mut dyn InteractiveSession>,
    pub presenter: Option<&'t mut dyn ImagePresenter>,
}

impl<'t> RenderTargets<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offscreen(mut self, backend: &'t mut dyn RenderBackend) -> Self {
        self.offscreen = Some(backend);
        self
    }

    pub fn with_interactive(mut self, session: &'t mut dyn InteractiveSession) -> Self {
        self.interactive = Some(session);
        self
    }

    pub fn with_presenter(mut self, presenter: &'t mut dyn ImagePresenter) -> Self {
        self.presenter = Some(presenter);
        self
    }
}

/// Builds scenes from meshes and dispatches them to a collaborator.
///
/// Holds no state between calls besides its configuration.
#[derive(Debug, Clone, Default)]
pub struct SceneComposer {
    config: SceneConfig,
}

impl SceneComposer {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    fn material(&self) -> Material {
        Material {
            base_color: self.config.mesh_rgba(),
            smooth: self.config.smooth,
            double_sided: false,
        }
    }

    /// Scene with ambient light, background and one node per mesh.
    pub fn build_scene<'a>(&self, meshes: &'a [TriangleMesh]) -> ReliefResult<Scene<'a>> {
        if meshes.is_empty() {
            return Err(ReliefError::EmptyMeshList);
        }
        let mut scene = Scene::new(self.config.ambient_light, self.config.background_rgba());
        let material = self.material();
        for mesh in meshes {
            scene.add_mesh(mesh, material);
        }
        Ok(scene)
    }

    /// Base scene plus the framing camera and the key light.
    pub fn compose_offscreen<'a>(&self, meshes: &'a [TriangleMesh]) -> ReliefResult<Scene<'a>> {
        let mut scene = self.build_scene(meshes)?;
        let centroid = combined_centroid(meshes)?;

        let cam_cfg = &self.config.camera;
        let dist = standoff_distance(cam_cfg);
        let camera = PerspectiveCamera::new(cam_cfg.yfov, cam_cfg.znear);
        scene.set_camera(camera, camera_pose(centroid, dist, cam_cfg));

        let light_cfg = &self.config.key_light;
        let light = SpotLight {
            color: light_cfg.color,
            intensity: light_cfg.intensity,
            inner_cone_angle: light_cfg.inner_cone,
            outer_cone_angle: light_cfg.outer_cone,
        };
        scene.set_light(light, key_light_pose(centroid, dist, light_cfg));

        tracing::debug!(
            centroid = ?centroid,
            dist,
            meshes = meshes.len(),
            "composed offscreen scene"
        );
        Ok(scene)
    }

    /// Viewer settings derived from the configuration.
    pub fn viewer_settings(&self) -> ViewerSettings {
        let v = &self.config.viewer;
        ViewerSettings {
            title: "Relief Viewer".to_string(),
            viewport: Viewport::new(v.width, v.height),
            use_direct_lighting: v.use_direct_lighting,
            cull_faces: v.cull_faces,
            shadows: v.shadows,
            show_world_axis: v.show_world_axis,
            rotate_rate: v.rotate_rate,
        }
    }

    /// Opens an interactive session on the meshes.
    ///
    /// Blocks the calling thread until the user quits the session.
    /// Returns no pixel data.
    pub fn run_interactive_session(
        &self,
        meshes: &[TriangleMesh],
        print_help: bool,
        session: &mut dyn InteractiveSession,
    ) -> ReliefResult<()> {
        let scene = self.build_scene(meshes)?;
        if print_help {
            print_keyboard_commands();
        }
        let settings = self.viewer_settings();
        tracing::info!(
            session = session.name(),
            meshes = scene.mesh_count(),
            width = settings.viewport.width,
            height = settings.viewport.height,
            "starting interactive session"
        );
        session.run(&scene, &settings)?;
        tracing::info!(session = session.name(), "interactive session closed");
        Ok(())
    }

    /// Renders the meshes once, offscreen, and returns the pixels.
    ///
    /// The backend is initialized for this call and released afterwards,
    /// also when rendering fails.
    pub fn render_offscreen(
        &self,
        meshes: &[TriangleMesh],
        backend: &mut dyn RenderBackend,
    ) -> ReliefResult<RenderOutput> {
        let scene = self.compose_offscreen(meshes)?;
        let viewport = self.config.offscreen.viewport();
        let flags = self.config.offscreen.flags();

        tracing::info!(
            backend = backend.name(),
            width = viewport.width,
            height = viewport.height,
            flags = ?flags,
            "offscreen render"
        );
        backend.init(viewport)?;
        let result = backend.render(&scene, flags);
        backend.release();

        if let Err(ref e) = result {
            tracing::warn!(backend = backend.name(), error = %e, "offscreen render failed");
        }
        result
    }

    /// Renders interactively or offscreen depending on `options`.
    ///
    /// Returns `Some` output for offscreen renders and `None` after an
    /// interactive session. A missing collaborator for the requested mode
    /// is reported as a backend error.
    pub fn render(
        &self,
        meshes: &[TriangleMesh],
        options: RenderOptions,
        targets: RenderTargets<'_>,
    ) -> ReliefResult<Option<RenderOutput>> {
        if meshes.is_empty() {
            return Err(ReliefError::EmptyMeshList);
        }

        if !options.offscreen {
            let session = targets.interactive.ok_or_else(|| {
                ReliefError::RenderBackend("no interactive session available".into())
            })?;
            self.run_interactive_session(meshes, options.print_help, session)?;
            return Ok(None);
        }

        let backend = targets.offscreen.ok_or_else(|| {
            ReliefError::RenderBackend("no offscreen backend available".into())
        })?;
        let output = self.render_offscreen(meshes, backend)?;

        if options.plot {
            match targets.presenter {
                Some(presenter) => presenter.present(&output.color)?,
                None => tracing::debug!("plot requested without a presenter, skipping"),
            }
        }
        Ok(Some(output))
    }
}
