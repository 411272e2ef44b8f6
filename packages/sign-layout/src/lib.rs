//! Segment model and layout engine for metro exit signs.
//!
//! A sign is a [`Composition`]: an ordered list of [`Segment`]s, each of a
//! fixed [`SegmentKind`] that determines its width and what it draws.
//! [`layout`] turns a composition into a [`Scene`] of absolutely positioned
//! [`Primitive`]s which a renderer can serialize or rasterize.
//!
//! ```
//! use sign_layout::{Composition, SegmentKind, layout};
//!
//! let mut sign = Composition::new();
//! let id = sign.add_segment();
//! sign.set_kind(id, SegmentKind::Line).unwrap();
//! sign.set_parameter(id, 0, "5").unwrap();
//!
//! let scene = layout(&sign);
//! assert_eq!(scene.width, 128 + 256);
//! ```

mod composition;
mod kind;
mod layout;
mod primitive;
mod scene;
pub mod schema;
mod segment;

pub use composition::{Composition, CompositionError, DEFAULT_BACKGROUND};
pub use kind::{
    ARROW_ASSET, ARROW_DIAGONAL_ASSET, ArrowDirection, CELL, KindTag, ParseKindError,
    SegmentKind, TOILET_ASSET,
};
pub use layout::{
    FallbackPolicy, LayoutError, LayoutOptions, layout, layout_with, line_label, offsets,
    parse_fill, parse_leading_int, segment_primitives,
};
pub use primitive::{
    FONT_FAMILY, FillRect, ImageRef, Primitive, Rotation, TextAnchor, TextRun, TextSpan,
};
pub use scene::{SIGN_HEIGHT, Scene, SegmentPlacement};
pub use segment::{Segment, SegmentId};

pub use kurbo;
pub use peniko;
