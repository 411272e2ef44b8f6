//! Turn a [`Composition`] into a [`Scene`].
//!
//! Every segment is laid out independently at the offset given by the prefix
//! sum of the widths before it, so reordering segments only moves their
//! primitives; it never changes what a segment draws.

use kurbo::Rect;
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use thiserror::Error;

use crate::composition::Composition;
use crate::kind::{KindTag, SegmentKind, TOILET_ASSET};
use crate::primitive::{FillRect, ImageRef, Primitive, Rotation, TextAnchor, TextRun};
use crate::scene::{SIGN_HEIGHT, Scene, SegmentPlacement};
use crate::schema::{self, ValueType};
use crate::segment::{Segment, SegmentId};

const EXIT_GREEN: Color = Color::from_rgb8(0x00, 0xaa, 0x52);
const DIVIDER_YELLOW: Color = Color::from_rgb8(0xff, 0xf0, 0x17);

const DIVIDER_WIDTH: f64 = 5.0;
const DIVIDER_MARGIN: f64 = 10.0;

/// Padding inserted before single-digit line numbers so that "Line 5" and
/// "Line 10" occupy the same width.
const LINE_NUMBER_PAD: char = '\u{3000}';

/// What to do with input the engine has no drawing rule for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Unknown kinds take one empty cell, unknown exit alignments draw
    /// nothing. Matches what existing signs were produced with.
    #[default]
    Silent,
    /// Report the gap as a [`LayoutError`].
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutOptions {
    pub fallback: FallbackPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("segment {id} has unknown kind {tag:?}")]
    UnknownKind { id: SegmentId, tag: String },

    #[error("segment {id} has unknown alignment {value:?}")]
    UnknownAlignment { id: SegmentId, value: String },

    #[error("segment {id} slot {slot} has unknown option {value:?}")]
    UnknownOption {
        id: SegmentId,
        slot: usize,
        value: String,
    },
}

/// Lay out `composition` with the silent fallback policy.
pub fn layout(composition: &Composition) -> Scene {
    match layout_with(composition, &LayoutOptions::default()) {
        Ok(scene) => scene,
        Err(_) => unreachable!("silent layout never fails"),
    }
}

pub fn layout_with(
    composition: &Composition,
    options: &LayoutOptions,
) -> Result<Scene, LayoutError> {
    let segments = composition.segments();
    let (offsets, width) = offsets(segments);

    let mut primitives = Vec::new();
    let mut placements = Vec::with_capacity(segments.len());
    for (segment, &offset) in segments.iter().zip(&offsets) {
        let start = primitives.len();
        primitives.extend(segment_primitives(segment, offset, options.fallback)?);
        placements.push(SegmentPlacement {
            id: segment.id(),
            offset,
            width: segment.width(),
            primitives: start..primitives.len(),
        });
    }

    Ok(Scene {
        width,
        height: SIGN_HEIGHT,
        background: composition.background(),
        primitives,
        placements,
    })
}

/// Left edge of every segment (0, w0, w0 + w1, ...) together with the total
/// width, taken from the same left-to-right pass.
pub fn offsets(segments: &[Segment]) -> (Vec<u32>, u32) {
    let mut next = 0u32;
    let offsets = segments
        .iter()
        .map(|segment| {
            let offset = next;
            next += segment.width();
            offset
        })
        .collect();
    (offsets, next)
}

/// Primitives for one segment placed at `offset`, divider included.
pub fn segment_primitives(
    segment: &Segment,
    offset: u32,
    fallback: FallbackPolicy,
) -> Result<Vec<Primitive>, LayoutError> {
    let x = f64::from(offset);
    let mut out = match segment.kind() {
        KindTag::Known(kind) => kind_primitives(*kind, segment, x, fallback)?,
        KindTag::Unknown(tag) => match fallback {
            FallbackPolicy::Silent => {
                log::warn!(
                    "segment {} has unknown kind {tag:?}, leaving it blank",
                    segment.id()
                );
                Vec::new()
            }
            FallbackPolicy::Strict => {
                return Err(LayoutError::UnknownKind {
                    id: segment.id(),
                    tag: tag.clone(),
                });
            }
        },
    };

    if segment.has_divider() {
        out.push(divider(x + f64::from(segment.width())));
    }
    Ok(out)
}

fn kind_primitives(
    kind: SegmentKind,
    segment: &Segment,
    x: f64,
    fallback: FallbackPolicy,
) -> Result<Vec<Primitive>, LayoutError> {
    Ok(match kind {
        SegmentKind::Exit => exit_pictogram(segment, x, fallback)?,
        SegmentKind::Arrow(dir) => {
            let (href, degrees) = dir.asset();
            vec![Primitive::Image(ImageRef {
                href: href.to_owned(),
                rect: Rect::new(x + 15.0, 15.0, x + 115.0, 115.0),
                // The pivot is the cell centre, not the image centre.
                rotation: Some(Rotation::new(degrees, (x + 64.0, 64.0))),
            })]
        }
        SegmentKind::Toilet => vec![Primitive::Image(ImageRef {
            href: TOILET_ASSET.to_owned(),
            rect: Rect::new(x, 0.0, x + 128.0, 128.0),
            rotation: None,
        })],
        SegmentKind::Blank1 | SegmentKind::Blank2 => Vec::new(),
        SegmentKind::Line => line_badge(segment, x, 0.0, 256.0),
        SegmentKind::LineSpaced => line_badge(segment, x, 20.0, 216.0),
        SegmentKind::ExitText => exit_text(segment, x),
        SegmentKind::Destination => {
            check_options(segment, kind, fallback)?;
            destination(segment, x, f64::from(kind.width()))
        }
    })
}

/// Enum slots holding a value outside their option list. `Silent` logs and
/// lets the drawing rule pick its fallback.
fn check_options(
    segment: &Segment,
    kind: SegmentKind,
    fallback: FallbackPolicy,
) -> Result<(), LayoutError> {
    for (index, slot) in schema::slots(kind).iter().enumerate() {
        let value = segment.param(index);
        if slot.value_type != ValueType::Enum || slot.is_option(value) {
            continue;
        }
        match fallback {
            FallbackPolicy::Silent => log::warn!(
                "segment {} slot {index} has unknown option {value:?}",
                segment.id()
            ),
            FallbackPolicy::Strict => {
                return Err(LayoutError::UnknownOption {
                    id: segment.id(),
                    slot: index,
                    value: value.to_owned(),
                });
            }
        }
    }
    Ok(())
}

fn exit_pictogram(
    segment: &Segment,
    x: f64,
    fallback: FallbackPolicy,
) -> Result<Vec<Primitive>, LayoutError> {
    let align = segment.param(0);
    let delta = match align {
        "L" => 0.0,
        "C" => 15.0,
        "R" => 30.0,
        "" => return Ok(Vec::new()),
        _ => {
            return match fallback {
                FallbackPolicy::Silent => Ok(Vec::new()),
                FallbackPolicy::Strict => Err(LayoutError::UnknownAlignment {
                    id: segment.id(),
                    value: align.to_owned(),
                }),
            };
        }
    };

    let left = x + delta;
    Ok(vec![
        Primitive::Rect(FillRect {
            rect: Rect::new(left, 0.0, left + 98.0, 128.0),
            fill: EXIT_GREEN,
        }),
        Primitive::Text(TextRun::new((left + 10.0, 120.0), "EXIT", 35.0).weight(500)),
        Primitive::Text(TextRun::new((left + 10.0, 80.0), "出", 80.0).weight(500)),
    ])
}

fn line_badge(segment: &Segment, x: f64, inset: f64, badge_width: f64) -> Vec<Primitive> {
    let number = segment.param(0);
    let color = parse_fill(segment.param(1)).unwrap_or_else(|| {
        log::warn!(
            "segment {} has unparseable line colour {:?}",
            segment.id(),
            segment.param(1)
        );
        schema::slot(SegmentKind::Line, 1)
            .and_then(|slot| parse_fill(slot.default))
            .unwrap_or(Color::BLACK)
    });

    let left = x + inset;
    let right = left + badge_width;
    vec![
        Primitive::Rect(FillRect {
            rect: Rect::new(left, 90.0, right, 128.0),
            fill: color,
        }),
        Primitive::Text(TextRun::new((left, 85.0), number, 90.0).weight(500)),
        Primitive::Text(
            TextRun::new((right, 85.0), line_label(number), 25.0)
                .weight(500)
                .anchor(TextAnchor::End),
        ),
        Primitive::Text(
            TextRun::new((right, 55.0), "号线", 45.0)
                .weight(500)
                .anchor(TextAnchor::End),
        ),
    ]
}

/// "Line 12" or, for anything that does not parse to at least 10,
/// "Line\u{3000}5".
pub fn line_label(number: &str) -> String {
    match parse_leading_int(number) {
        Some(n) if n >= 10 => format!("Line {number}"),
        _ => format!("Line{LINE_NUMBER_PAD}{number}"),
    }
}

/// Integer prefix of `s`, the way a browser's `parseInt` reads user input:
/// leading whitespace and a sign are accepted, trailing junk is ignored and
/// a `0x` prefix switches to hexadecimal.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: Option<i64> = None;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(i64::from(radix))
                .saturating_add(i64::from(digit)),
        );
    }
    value.map(|v| if negative { -v } else { v })
}

fn exit_text(segment: &Segment, x: f64) -> Vec<Primitive> {
    let letter = segment.param(0);
    let subscript = segment.param(1);
    let name_zh = segment.param(2);
    let name_en = segment.param(3);

    // The letter moves left to make room for a subscript.
    let letter_x = if subscript.is_empty() { x + 32.0 } else { x + 20.0 };

    let mut out = vec![Primitive::Text(TextRun::new((letter_x, 105.0), letter, 120.0))];
    if !subscript.is_empty() {
        out.push(Primitive::Text(TextRun::new((x + 98.0, 107.0), subscript, 40.0)));
    }
    out.push(Primitive::Text(TextRun::new((x + 130.0, 60.0), name_zh, 50.0)));
    out.push(Primitive::Text(TextRun::new((x + 130.0, 103.0), name_en, 30.0)));
    out
}

fn destination(segment: &Segment, x: f64, width: f64) -> Vec<Primitive> {
    let name_zh = segment.param(0);
    let name_en = segment.param(1);
    let align = segment.param(2);
    let line_type = segment.param(3);

    let (prefix_zh, prefix_en) = match line_type {
        "LOOP" => ("下一站", "To"),
        "T" => ("终点站", "Terminus"),
        _ => ("开往", "To"),
    };
    let terminus = line_type == "T";

    let (anchor_x, anchor) = match align {
        "R" => (x + width - 10.0, TextAnchor::End),
        "C" => (x + width / 2.0, TextAnchor::Middle),
        _ => (x + 10.0, TextAnchor::Start),
    };

    let mut zh = TextRun::new((anchor_x, 63.0), prefix_zh, 45.0).anchor(anchor);
    let mut en = TextRun::new((anchor_x, 103.0), prefix_en, 30.0).anchor(anchor);
    if !terminus {
        zh = zh.span(format!(" {name_zh}"), 600);
        en = en.span(format!(" {name_en}"), 560);
    }
    vec![Primitive::Text(zh), Primitive::Text(en)]
}

fn divider(trailing_edge: f64) -> Primitive {
    let left = trailing_edge - DIVIDER_WIDTH / 2.0;
    Primitive::Rect(FillRect {
        rect: Rect::new(
            left,
            DIVIDER_MARGIN,
            left + DIVIDER_WIDTH,
            f64::from(SIGN_HEIGHT) - DIVIDER_MARGIN,
        ),
        fill: DIVIDER_YELLOW,
    })
}

/// Parse a CSS colour string as typed into the editor.
pub fn parse_fill(value: &str) -> Option<Color> {
    parse_color(value.trim())
        .ok()
        .map(|color| color.to_alpha_color::<Srgb>())
}
