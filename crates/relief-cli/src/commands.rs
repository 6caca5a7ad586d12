//! CLI command implementations.

use relief_io::{
    export_wavefront_obj, read_raw_heightmap, save_png, validate_grid, validate_height_mesh,
    HeightmapReport, PngPresenter,
};
use relief_mesh::{build_mesh, Coordinates, TriangleMesh};
use relief_render::SoftwareRasterizer;
use relief_scene::{RenderOptions, RenderTargets, SceneComposer, SceneConfig};
use relief_viewer::BevyViewer;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn load_config(path: Option<&str>) -> Result<SceneConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            tracing::info!(path = p, "loading scene config");
            Ok(SceneConfig::load(p)?)
        }
        None => Ok(SceneConfig::default()),
    }
}

fn load_mesh(path: &str, add_skirt: bool) -> Result<TriangleMesh, Box<dyn std::error::Error>> {
    let grid = read_raw_heightmap(path)?;
    validate_grid(&grid)?;
    let built = build_mesh(&grid, Coordinates::Synthesized, add_skirt)?;
    Ok(built.mesh)
}

/// Open a heightmap in the interactive viewer.
pub fn view(path: &str, add_skirt: bool, print_help: bool, config: Option<&str>) -> CmdResult {
    let composer = SceneComposer::new(load_config(config)?);
    let meshes = [load_mesh(path, add_skirt)?];

    let mut viewer = BevyViewer::new();
    let options = RenderOptions {
        print_help,
        offscreen: false,
        plot: false,
    };
    composer.render(
        &meshes,
        options,
        RenderTargets::new().with_interactive(&mut viewer),
    )?;
    Ok(())
}

/// Render a heightmap offscreen and save it as PNG.
pub fn render(
    path: &str,
    output: &str,
    add_skirt: bool,
    plot: bool,
    config: Option<&str>,
) -> CmdResult {
    println!("Relief Offscreen Render");
    println!("───────────────────────");

    let composer = SceneComposer::new(load_config(config)?);
    let meshes = [load_mesh(path, add_skirt)?];
    let viewport = composer.config().offscreen.viewport();
    println!("Input:     {path}");
    println!("Viewport:  {} x {}", viewport.width, viewport.height);

    let mut backend = SoftwareRasterizer::new();
    let mut presenter = PngPresenter::new();
    let options = RenderOptions {
        print_help: false,
        offscreen: true,
        plot,
    };
    let output_buf = composer
        .render(
            &meshes,
            options,
            RenderTargets::new()
                .with_offscreen(&mut backend)
                .with_presenter(&mut presenter),
        )?
        .ok_or("offscreen render returned no image")?;

    save_png(output, &output_buf.color)?;
    println!("Saved:     {output}");
    Ok(())
}

/// Export a heightmap mesh as OBJ.
pub fn export(path: &str, output: &str, add_skirt: bool) -> CmdResult {
    let mesh = load_mesh(path, add_skirt)?;
    export_wavefront_obj(output, &mesh)?;
    println!(
        "Exported {} vertices, {} triangles to {output}",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}

/// Print grid shape and elevation statistics.
pub fn inspect(path: &str, json: bool) -> CmdResult {
    let grid = read_raw_heightmap(path)?;
    let report = HeightmapReport::from_grid(&grid, true)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Relief Heightmap Inspector");
    println!("──────────────────────────");
    println!();
    println!("File:       {path}");
    println!("{report}");
    Ok(())
}

/// Validate a heightmap or a scene config.
pub fn validate(path: &str) -> CmdResult {
    println!("Relief Validator");
    println!("────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        SceneConfig::load(path)?;
        println!("✅ Config is valid.");
        return Ok(());
    }

    println!("Validating heightmap: {path}");
    let grid = read_raw_heightmap(path)?;
    validate_grid(&grid)?;
    let (nx, ny) = grid.shape();
    let built = build_mesh(&grid, Coordinates::Synthesized, true)?;
    match validate_height_mesh(&built.mesh, nx, ny) {
        Ok(()) => println!(
            "✅ Mesh is valid ({nx}x{ny} grid, {} verts, {} tris).",
            built.mesh.vertex_count(),
            built.mesh.triangle_count()
        ),
        Err(e) => {
            println!("❌ Mesh validation failed: {e}");
            return Err(e.into());
        }
    }
    Ok(())
}
