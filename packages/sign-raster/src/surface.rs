//! Drawing targets for the rasterizer.

use kurbo::Affine;
use peniko::Color;
use resvg::tiny_skia::{self, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::error::RasterError;

/// Something the rasterizer can paint into.
pub trait Surface {
    /// Overwrite every pixel with `color`.
    fn fill(&mut self, color: Color);

    /// Render a parsed SVG document. `transform` maps document units to surface pixels.
    fn draw_tree(&mut self, tree: &usvg::Tree, transform: Affine);

    /// Composite a premultiplied bitmap. `transform` maps image pixels to surface pixels.
    fn draw_pixmap(&mut self, pixmap: &Pixmap, transform: Affine);
}

/// A CPU surface backed by a [`tiny_skia::Pixmap`].
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RasterError::SurfaceUnavailable { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

impl Surface for PixmapSurface {
    fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a));
    }

    fn draw_tree(&mut self, tree: &usvg::Tree, transform: Affine) {
        resvg::render(tree, to_transform(transform), &mut self.pixmap.as_mut());
    }

    fn draw_pixmap(&mut self, pixmap: &Pixmap, transform: Affine) {
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, pixmap.as_ref(), &paint, to_transform(transform), None);
    }
}

pub(crate) fn to_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_surface_is_unavailable() {
        assert!(matches!(
            PixmapSurface::new(0, 128),
            Err(RasterError::SurfaceUnavailable { width: 0, height: 128 })
        ));
    }

    #[test]
    fn test_fill_is_opaque_background() {
        let mut surface = PixmapSurface::new(4, 4).unwrap();
        surface.fill(Color::from_rgb8(0x04, 0x1c, 0x31));
        let pixel = surface.pixmap().pixel(3, 3).unwrap();
        assert_eq!(
            [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()],
            [0x04, 0x1c, 0x31, 0xff]
        );
    }

    #[test]
    fn test_transform_conversion() {
        let affine = Affine::translate((15.0, 15.0)) * Affine::scale(2.0);
        let t = to_transform(affine);
        assert_eq!((t.sx, t.ky, t.kx, t.sy, t.tx, t.ty), (2.0, 0.0, 0.0, 2.0, 15.0, 15.0));
    }
}
