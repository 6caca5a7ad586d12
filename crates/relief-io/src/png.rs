//! PNG output and the image presenter used for plotting.

use std::path::{Path, PathBuf};

use image::{ImageError, RgbImage, RgbaImage};
use relief_scene::{ImagePresenter, PixelBuffer};
use relief_types::{ReliefError, ReliefResult};

fn image_error(e: ImageError) -> ReliefError {
    match e {
        ImageError::IoError(io) => ReliefError::Io(io),
        other => ReliefError::Serialization(other.to_string()),
    }
}

/// Saves an RGB or RGBA pixel buffer as a PNG file.
pub fn save_png(path: impl AsRef<Path>, pixels: &PixelBuffer) -> ReliefResult<()> {
    let path = path.as_ref();
    let (w, h) = (pixels.width(), pixels.height());
    let raw = pixels.as_raw().to_vec();
    let result = match pixels.channels() {
        3 => RgbImage::from_raw(w, h, raw).map(|img| img.save(path)),
        4 => RgbaImage::from_raw(w, h, raw).map(|img| img.save(path)),
        n => {
            return Err(ReliefError::Serialization(format!(
                "cannot encode a {n}-channel buffer as PNG"
            )))
        }
    };
    result
        .ok_or_else(|| ReliefError::Serialization("pixel buffer size mismatch".into()))?
        .map_err(image_error)?;
    tracing::debug!(path = %path.display(), width = w, height = h, "saved PNG");
    Ok(())
}

/// Writes each presented image to a PNG and opens it in the system viewer.
#[derive(Debug, Clone)]
pub struct PngPresenter {
    dir: PathBuf,
    open_viewer: bool,
    presented: u32,
    last_path: Option<PathBuf>,
}

impl PngPresenter {
    /// Presenter writing into the system temp directory.
    pub fn new() -> Self {
        Self::in_dir(std::env::temp_dir())
    }

    /// Presenter writing into `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            open_viewer: true,
            presented: 0,
            last_path: None,
        }
    }

    /// Only write the file, never launch a viewer.
    pub fn without_viewer(mut self) -> Self {
        self.open_viewer = false;
        self
    }

    /// Path of the most recently written image.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    fn next_path(&mut self) -> PathBuf {
        self.presented += 1;
        self.dir.join(format!(
            "relief-{}-{}.png",
            std::process::id(),
            self.presented
        ))
    }
}

impl Default for PngPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImagePresenter for PngPresenter {
    fn present(&mut self, image: &PixelBuffer) -> ReliefResult<()> {
        let path = self.next_path();
        save_png(&path, image)?;
        if self.open_viewer {
            tracing::info!(path = %path.display(), "opening image viewer");
            open::that(&path)?;
        }
        self.last_path = Some(path);
        Ok(())
    }
}
