//! The ordered segment list and the editing operations the editor drives.

use peniko::Color;
use thiserror::Error;

use crate::kind::KindTag;
use crate::schema;
use crate::segment::{Segment, SegmentId};

/// Navy used by the sign background unless the user picks another colour.
pub const DEFAULT_BACKGROUND: Color = Color::from_rgb8(0x04, 0x1c, 0x31);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error("no segment with id {0}")]
    UnknownSegment(SegmentId),

    #[error("segment {id} of kind {kind:?} declares no parameter slot {slot}")]
    UndeclaredSlot {
        id: SegmentId,
        kind: String,
        slot: usize,
    },
}

/// An ordered, never-empty list of segments plus the sign background.
#[derive(Debug, Clone)]
pub struct Composition {
    segments: Vec<Segment>,
    next_id: u32,
    background: Color,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    /// A composition holding a single default segment with id 1.
    pub fn new() -> Self {
        Self {
            segments: vec![Segment::new(SegmentId(1))],
            next_id: 2,
            background: DEFAULT_BACKGROUND,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the composition has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.id == id)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Append a default segment and return its id.
    pub fn add_segment(&mut self) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        self.segments.push(Segment::new(id));
        id
    }

    /// Remove `id`. Returns false when the segment is unknown or is the last
    /// one left.
    pub fn remove_segment(&mut self, id: SegmentId) -> bool {
        if self.segments.len() <= 1 {
            return false;
        }
        let before = self.segments.len();
        self.segments.retain(|segment| segment.id != id);
        self.segments.len() != before
    }

    /// Change the kind of `id`. Parameters are cleared so that only slots of
    /// the new kind can ever be stored.
    pub fn set_kind(
        &mut self,
        id: SegmentId,
        kind: impl Into<KindTag>,
    ) -> Result<(), CompositionError> {
        let segment = self.segment_mut(id)?;
        segment.kind = kind.into();
        segment.parameters.clear();
        Ok(())
    }

    /// Store `value` in `slot`, truncated to the slot's maximum length.
    pub fn set_parameter(
        &mut self,
        id: SegmentId,
        slot: usize,
        value: &str,
    ) -> Result<(), CompositionError> {
        let segment = self.segment_mut(id)?;
        let Some(decl) = segment
            .kind
            .known()
            .and_then(|kind| schema::slot(kind, slot))
        else {
            return Err(CompositionError::UndeclaredSlot {
                id,
                kind: segment.kind.to_string(),
                slot,
            });
        };
        segment
            .parameters
            .insert(slot, decl.clamp(value).to_owned());
        Ok(())
    }

    pub fn set_divider(&mut self, id: SegmentId, has_divider: bool) -> Result<(), CompositionError> {
        self.segment_mut(id)?.has_divider = has_divider;
        Ok(())
    }

    pub fn toggle_divider(&mut self, id: SegmentId) -> Result<bool, CompositionError> {
        let segment = self.segment_mut(id)?;
        segment.has_divider = !segment.has_divider;
        Ok(segment.has_divider)
    }

    /// Move the segment at index `from` so that it ends up at index `to`.
    /// Out-of-range indices are clamped.
    pub fn move_segment(&mut self, from: usize, to: usize) {
        if from >= self.segments.len() {
            return;
        }
        let segment = self.segments.remove(from);
        let to = to.min(self.segments.len());
        self.segments.insert(to, segment);
    }

    fn segment_mut(&mut self, id: SegmentId) -> Result<&mut Segment, CompositionError> {
        self.segments
            .iter_mut()
            .find(|segment| segment.id == id)
            .ok_or(CompositionError::UnknownSegment(id))
    }
}
