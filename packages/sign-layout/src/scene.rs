//! Layout output: positioned primitives plus per-segment placement.

use std::ops::Range;

use peniko::Color;

use crate::primitive::{ImageRef, Primitive};
use crate::segment::SegmentId;

/// Height of every sign in pixels.
pub const SIGN_HEIGHT: u32 = 128;

/// Where one segment landed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPlacement {
    pub id: SegmentId,
    pub offset: u32,
    pub width: u32,
    /// Indices into [`Scene::primitives`] emitted for this segment.
    pub primitives: Range<usize>,
}

/// The laid-out sign: primitives in paint order plus canvas metrics.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub primitives: Vec<Primitive>,
    pub placements: Vec<SegmentPlacement>,
}

impl Scene {
    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        self.primitives.iter().filter_map(Primitive::as_image)
    }

    /// Primitives emitted for the segment at position `index`.
    pub fn segment_primitives(&self, index: usize) -> &[Primitive] {
        match self.placements.get(index) {
            Some(placement) => &self.primitives[placement.primitives.clone()],
            None => &[],
        }
    }
}
