//! The finished sign image and PNG export.

use std::path::{Path, PathBuf};

use resvg::tiny_skia::Pixmap;

use crate::error::{RasterError, RasterResult};

/// A finished raster image of a sign.
#[derive(Clone)]
pub struct Bitmap {
    pixmap: Pixmap,
}

impl Bitmap {
    pub(crate) fn new(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    pub fn as_pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn encode_png(&self) -> RasterResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|err| RasterError::Encode(err.to_string()))
    }

    /// Write the PNG to `dir/name` and return the full path.
    pub async fn save_png(&self, dir: impl AsRef<Path>, name: &str) -> RasterResult<PathBuf> {
        let path = dir.as_ref().join(name);
        let png = self.encode_png()?;
        tokio::fs::write(&path, png).await?;
        log::info!("wrote {}x{} sign to {}", self.width(), self.height(), path.display());
        Ok(path)
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
