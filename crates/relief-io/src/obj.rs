//! Wavefront OBJ export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use relief_mesh::TriangleMesh;
use relief_types::ReliefResult;

/// Writes `mesh` as OBJ text.
///
/// Emits one `v`, `vn` and `vt` record per vertex, then one
/// `f v/vt/vn` record per triangle with 1-based indices.
pub fn write_obj<W: Write>(writer: &mut W, mesh: &TriangleMesh) -> ReliefResult<()> {
    mesh.validate()?;

    writeln!(writer, "# relief heightmap mesh")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for [x, y, z] in mesh.positions_array() {
        writeln!(writer, "v {x} {y} {z}")?;
    }
    for [x, y, z] in mesh.normals_array() {
        writeln!(writer, "vn {x} {y} {z}")?;
    }
    for [u, v] in mesh.uvs_array() {
        writeln!(writer, "vt {u} {v}")?;
    }
    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t).map(|i| i + 1);
        writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

/// Exports `mesh` to an OBJ file at `path`.
pub fn export_wavefront_obj(path: impl AsRef<Path>, mesh: &TriangleMesh) -> ReliefResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(&mut writer, mesh)?;
    writer.flush()?;
    tracing::info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "exported OBJ"
    );
    Ok(())
}
