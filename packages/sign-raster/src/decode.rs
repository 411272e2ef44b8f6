//! Decoding loaded asset bytes into drawable icons.

use resvg::tiny_skia::{ColorU8, Pixmap};

use crate::error::DecodeError;

/// A decoded image asset ready to be drawn.
pub enum Icon {
    Vector(usvg::Tree),
    Raster(Pixmap),
}

impl Icon {
    /// Sniff `bytes` and decode them as SVG (plain or gzipped) or as a raster format.
    pub fn decode(bytes: &[u8], options: &usvg::Options<'_>) -> Result<Self, DecodeError> {
        if is_svg(bytes) {
            let tree = usvg::Tree::from_data(bytes, options)?;
            return Ok(Self::Vector(tree));
        }

        let rgba = image::load_from_memory(bytes)?.into_rgba8();
        let (width, height) = rgba.dimensions();
        let mut pixmap = Pixmap::new(width, height).ok_or(DecodeError::Empty)?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(Self::Raster(pixmap))
    }

    /// Natural size in user units.
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Vector(tree) => (
                f64::from(tree.size().width()),
                f64::from(tree.size().height()),
            ),
            Self::Raster(pixmap) => (f64::from(pixmap.width()), f64::from(pixmap.height())),
        }
    }
}

impl std::fmt::Debug for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.size();
        let kind = match self {
            Self::Vector(_) => "Vector",
            Self::Raster(_) => "Raster",
        };
        write!(f, "Icon::{kind}({width}x{height})")
    }
}

fn is_svg(bytes: &[u8]) -> bool {
    if bytes.starts_with(&[0x1f, 0x8b]) {
        return true;
    }
    let text = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    text.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'<')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_sniffs_svg() {
        assert!(is_svg(b"<svg/>"));
        assert!(is_svg(b"\xef\xbb\xbf\n  <?xml version=\"1.0\"?><svg/>"));
        assert!(is_svg(&[0x1f, 0x8b, 0x08]));
        assert!(!is_svg(b"\x89PNG\r\n\x1a\n"));
        assert!(!is_svg(b""));
    }

    #[test]
    fn test_decodes_vector() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"/>"#;
        let icon = Icon::decode(svg, &usvg::Options::default()).unwrap();
        assert!(matches!(icon, Icon::Vector(_)));
        assert_eq!(icon.size(), (100.0, 50.0));
    }

    #[test]
    fn test_decodes_png_premultiplied() {
        let image = image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 128]));
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let icon = Icon::decode(&png, &usvg::Options::default()).unwrap();
        assert_eq!(icon.size(), (4.0, 2.0));
        let Icon::Raster(pixmap) = icon else {
            panic!("expected raster icon");
        };
        let pixel = pixmap.pixel(0, 0).unwrap();
        assert_eq!(pixel.alpha(), 128);
        assert_eq!(pixel.red(), 128);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = Icon::decode(b"definitely not an image", &usvg::Options::default());
        assert!(matches!(err, Err(DecodeError::Image(_))));

        let err = Icon::decode(b"<svg", &usvg::Options::default());
        assert!(matches!(err, Err(DecodeError::Svg(_))));
    }
}
