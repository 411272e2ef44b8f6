//! Serialize a [`sign_layout::Scene`] into an SVG document.
//!
//! Two flavours are produced: the *base layer* holds only rectangles and
//! text and is what the rasterizer embeds as one image, the *preview* also
//! references the icon assets and paints the background so it can be shown
//! or saved on its own.

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(test, allow(unused_crate_dependencies))] // Some dev dependencies are only used in tests

mod escape;

use std::fmt::Write;

use peniko::Color;
use sign_layout::{
    FONT_FAMILY, FillRect, ImageRef, Primitive, Scene, TextAnchor, TextRun, kurbo::Rect,
};

use crate::escape::Escaped;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// What to include besides rectangles and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgOptions {
    /// Emit `<image>` elements for icon primitives.
    pub images: bool,
    /// Paint the scene background as a full-size rectangle.
    pub background: bool,
}

impl SvgOptions {
    /// Rectangles and text only; the rasterizer paints background and icons.
    pub const fn base_layer() -> Self {
        Self {
            images: false,
            background: false,
        }
    }

    /// A self-contained document.
    pub const fn preview() -> Self {
        Self {
            images: true,
            background: true,
        }
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self::preview()
    }
}

/// Serialize `scene` as a standalone SVG document.
pub fn to_svg(scene: &Scene, options: &SvgOptions) -> String {
    let mut out = String::with_capacity(256 + scene.primitives.len() * 160);
    // Writing into a String cannot fail.
    let _ = write_svg(&mut out, scene, options);
    out
}

/// Serialize `scene` into any [`std::fmt::Write`] sink.
pub fn write_svg(out: &mut impl Write, scene: &Scene, options: &SvgOptions) -> std::fmt::Result {
    let (w, h) = (scene.width, scene.height);
    write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    if options.background {
        write!(out, r#"<rect x="0" y="0" width="{w}" height="{h}""#)?;
        write_fill(out, scene.background)?;
        out.write_str("/>")?;
    }

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Rect(rect) => write_rect(out, rect)?,
            Primitive::Text(run) => write_text(out, run)?,
            Primitive::Image(image) if options.images => write_image(out, image)?,
            Primitive::Image(_) => {}
        }
    }
    out.write_str("</svg>")
}

fn write_rect(out: &mut impl Write, rect: &FillRect) -> std::fmt::Result {
    write_bounds(out, "<rect", rect.rect)?;
    write_fill(out, rect.fill)?;
    out.write_str("/>")
}

fn write_text(out: &mut impl Write, run: &TextRun) -> std::fmt::Result {
    write!(
        out,
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}""#,
        run.origin.x,
        run.origin.y,
        Escaped(FONT_FAMILY),
        run.font_size
    )?;
    write_fill(out, run.fill)?;
    if let Some(weight) = run.font_weight {
        write!(out, r#" font-weight="{weight}""#)?;
    }
    match run.anchor {
        TextAnchor::Start => {}
        TextAnchor::Middle => out.write_str(r#" text-anchor="middle""#)?,
        TextAnchor::End => out.write_str(r#" text-anchor="end""#)?,
    }
    write!(out, ">{}", Escaped(&run.text))?;
    if let Some(span) = &run.span {
        write!(
            out,
            r#"<tspan font-weight="{}">{}</tspan>"#,
            span.font_weight,
            Escaped(&span.text)
        )?;
    }
    out.write_str("</text>")
}

fn write_image(out: &mut impl Write, image: &ImageRef) -> std::fmt::Result {
    write_bounds(out, "<image", image.rect)?;
    write!(out, r#" href="{}""#, Escaped(&image.href))?;
    if let Some(rotation) = image.rotation {
        write!(
            out,
            r#" transform="rotate({} {} {})""#,
            rotation.degrees, rotation.pivot.x, rotation.pivot.y
        )?;
    }
    out.write_str("/>")
}

fn write_bounds(out: &mut impl Write, open: &str, rect: Rect) -> std::fmt::Result {
    write!(
        out,
        r#"{open} x="{}" y="{}" width="{}" height="{}""#,
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height()
    )
}

fn write_fill(out: &mut impl Write, color: Color) -> std::fmt::Result {
    let rgba = color.to_rgba8();
    write!(out, r##" fill="#{:02x}{:02x}{:02x}""##, rgba.r, rgba.g, rgba.b)?;
    if rgba.a != u8::MAX {
        write!(out, r#" fill-opacity="{}""#, f32::from(rgba.a) / 255.0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sign_layout::{Composition, SegmentId, SegmentKind, layout, parse_fill};

    fn sample_scene() -> Scene {
        let mut composition = Composition::new();
        composition.set_parameter(SegmentId(1), 0, "C").unwrap();
        composition.set_divider(SegmentId(1), true).unwrap();

        let arrow = composition.add_segment();
        composition
            .set_kind(arrow, "↑".parse::<SegmentKind>().unwrap())
            .unwrap();

        let to = composition.add_segment();
        composition.set_kind(to, SegmentKind::Destination).unwrap();
        composition.set_parameter(to, 1, "Tom & Jerry <Rd>").unwrap();
        layout(&composition)
    }

    fn parse(svg: &str) -> usvg::Tree {
        usvg::Tree::from_str(svg, &usvg::Options::default()).unwrap()
    }

    #[test]
    fn test_root_matches_scene_size() {
        let scene = sample_scene();
        let svg = to_svg(&scene, &SvgOptions::preview());
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="128" viewBox="0 0 640 128">"#
        ));
        assert!(svg.ends_with("</svg>"));

        let tree = parse(&svg);
        assert_eq!(tree.size().width(), 640.0);
        assert_eq!(tree.size().height(), 128.0);
    }

    #[test]
    fn test_base_layer_omits_images_and_background() {
        let scene = sample_scene();
        let svg = to_svg(&scene, &SvgOptions::base_layer());
        assert!(!svg.contains("<image"));
        assert!(!svg.contains("#041c31"));
        assert_eq!(svg.matches("<rect").count(), 2);
        parse(&svg);
    }

    #[test]
    fn test_preview_keeps_rotation() {
        let scene = sample_scene();
        let svg = to_svg(&scene, &SvgOptions::preview());
        assert!(svg.contains(r#"href="logos/arrow.svg""#));
        assert!(svg.contains(r#"transform="rotate(270 192 64)""#));
        assert!(svg.contains(r##"fill="#041c31""##));
    }

    #[test]
    fn test_divider_straddles_edge() {
        let scene = sample_scene();
        let svg = to_svg(&scene, &SvgOptions::base_layer());
        assert!(svg.contains(r##"<rect x="125.5" y="10" width="5" height="108" fill="#fff017"/>"##));
    }

    #[test]
    fn test_text_is_escaped_and_spans_survive() {
        let scene = sample_scene();
        let svg = to_svg(&scene, &SvgOptions::base_layer());
        assert!(svg.contains(
            r#"<tspan font-weight="560"> Tom &amp; Jerry &lt;Rd&gt;</tspan>"#
        ));
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains(r#"font-family="Noto Sans SC""#));
        parse(&svg);
    }

    #[test]
    fn test_control_characters_keep_document_valid() {
        let mut composition = Composition::new();
        composition.set_kind(SegmentId(1), SegmentKind::ExitText).unwrap();
        composition.set_parameter(SegmentId(1), 3, "Gate\u{1}B").unwrap();
        let svg = to_svg(&layout(&composition), &SvgOptions::base_layer());
        assert!(svg.contains(">GateB</text>"));
        parse(&svg);
    }

    #[test]
    fn test_translucent_fill_sets_opacity() {
        let mut out = String::new();
        write_fill(&mut out, parse_fill("rgba(255, 0, 0, 0.5)").unwrap()).unwrap();
        assert!(out.starts_with(r##" fill="#ff0000" fill-opacity="0.5"##));
    }
}
