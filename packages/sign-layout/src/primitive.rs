//! Drawable output of the layout engine.

use kurbo::{Affine, Point, Rect};
use peniko::Color;

/// Every text run on the sign uses this family.
pub const FONT_FAMILY: &str = "Noto Sans SC";

#[derive(Debug, Clone)]
pub enum Primitive {
    Rect(FillRect),
    Text(TextRun),
    Image(ImageRef),
}

impl Primitive {
    pub fn as_rect(&self) -> Option<&FillRect> {
        match self {
            Self::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageRef> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FillRect {
    pub rect: Rect,
    pub fill: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// A single line of text positioned by its baseline origin.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub origin: Point,
    pub text: String,
    pub font_size: f64,
    pub font_weight: Option<u16>,
    pub anchor: TextAnchor,
    pub fill: Color,
    /// Emphasized continuation drawn right after `text`.
    pub span: Option<TextSpan>,
}

impl TextRun {
    pub(crate) fn new(origin: impl Into<Point>, text: impl Into<String>, font_size: f64) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
            font_size,
            font_weight: None,
            anchor: TextAnchor::Start,
            fill: Color::WHITE,
            span: None,
        }
    }

    pub(crate) fn weight(mut self, weight: u16) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub(crate) fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub(crate) fn span(mut self, text: impl Into<String>, font_weight: u16) -> Self {
        self.span = Some(TextSpan {
            text: text.into(),
            font_weight,
        });
        self
    }

    /// Full text content including the span.
    pub fn content(&self) -> String {
        match &self.span {
            Some(span) => format!("{}{}", self.text, span.text),
            None => self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub font_weight: u16,
}

/// Rotation about an arbitrary pivot, clockwise-positive in y-down space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
    pub pivot: Point,
}

impl Rotation {
    pub fn new(degrees: f64, pivot: impl Into<Point>) -> Self {
        Self {
            degrees,
            pivot: pivot.into(),
        }
    }

    /// translate(pivot) · rotate(radians) · translate(-pivot)
    pub fn affine(&self) -> Affine {
        Affine::translate(self.pivot.to_vec2())
            * Affine::rotate(self.degrees.to_radians())
            * Affine::translate(-self.pivot.to_vec2())
    }
}

/// A reference to an external image asset drawn into `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub href: String,
    pub rect: Rect,
    pub rotation: Option<Rotation>,
}

impl ImageRef {
    /// Transform mapping the unit square onto `rect`, rotated if requested.
    pub fn placement(&self, natural_width: f64, natural_height: f64) -> Affine {
        let fit = Affine::translate((self.rect.x0, self.rect.y0))
            * Affine::scale_non_uniform(
                self.rect.width() / natural_width,
                self.rect.height() / natural_height,
            );
        match self.rotation {
            Some(rotation) => rotation.affine() * fit,
            None => fit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_rotation_fixes_pivot() {
        let rotation = Rotation::new(90.0, (64.0, 64.0));
        assert_close(rotation.affine() * Point::new(64.0, 64.0), Point::new(64.0, 64.0));
    }

    #[test]
    fn test_rotation_is_clockwise_in_screen_space() {
        // A point to the right of the pivot ends up below it.
        let rotation = Rotation::new(90.0, (64.0, 64.0));
        assert_close(rotation.affine() * Point::new(100.0, 64.0), Point::new(64.0, 100.0));
    }

    #[test]
    fn test_placement_maps_natural_size_onto_rect() {
        let image = ImageRef {
            href: "logos/toilet.svg".into(),
            rect: Rect::new(128.0, 0.0, 256.0, 128.0),
            rotation: None,
        };
        let affine = image.placement(64.0, 32.0);
        assert_close(affine * Point::new(0.0, 0.0), Point::new(128.0, 0.0));
        assert_close(affine * Point::new(64.0, 32.0), Point::new(256.0, 128.0));
    }

    #[test]
    fn test_text_content_joins_span() {
        let run = TextRun::new((0.0, 0.0), "开往", 45.0).span(" 宛平城", 600);
        assert_eq!(run.content(), "开往 宛平城");
    }
}
