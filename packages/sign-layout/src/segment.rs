//! A single sign segment and its stored parameters.

use std::collections::BTreeMap;
use std::fmt;

use crate::kind::KindTag;
use crate::schema;

/// Identifier handed out by a [`crate::Composition`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub u32);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One block of the sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub(crate) id: SegmentId,
    pub(crate) kind: KindTag,
    pub(crate) has_divider: bool,
    pub(crate) parameters: BTreeMap<usize, String>,
}

impl Segment {
    pub(crate) fn new(id: SegmentId) -> Self {
        Self {
            id,
            kind: KindTag::default(),
            has_divider: false,
            parameters: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn kind(&self) -> &KindTag {
        &self.kind
    }

    pub fn has_divider(&self) -> bool {
        self.has_divider
    }

    pub fn parameters(&self) -> &BTreeMap<usize, String> {
        &self.parameters
    }

    /// The raw value stored in `slot`, if any.
    pub fn raw_param(&self, slot: usize) -> Option<&str> {
        self.parameters.get(&slot).map(String::as_str)
    }

    /// The value of `slot`, falling back to the schema default when the slot
    /// is absent or empty. Unknown kinds and undeclared slots resolve to "".
    pub fn param(&self, slot: usize) -> &str {
        match self.raw_param(slot) {
            Some(value) if !value.is_empty() => value,
            _ => self
                .kind
                .known()
                .and_then(|kind| schema::slot(kind, slot))
                .map_or("", |slot| slot.default),
        }
    }

    pub fn width(&self) -> u32 {
        self.kind.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::SegmentKind;

    fn line(params: &[(usize, &str)]) -> Segment {
        let mut segment = Segment::new(SegmentId(7));
        segment.kind = SegmentKind::Line.into();
        segment.parameters = params
            .iter()
            .map(|(slot, value)| (*slot, value.to_string()))
            .collect();
        segment
    }

    #[test]
    fn test_new_segment_is_plain_exit() {
        let segment = Segment::new(SegmentId(1));
        assert_eq!(segment.kind(), &KindTag::Known(SegmentKind::Exit));
        assert!(!segment.has_divider());
        assert!(segment.parameters().is_empty());
    }

    #[test]
    fn test_param_falls_back_to_default() {
        let segment = line(&[(1, "")]);
        assert_eq!(segment.param(0), "10");
        assert_eq!(segment.param(1), "#00a3c2");
        assert_eq!(segment.raw_param(1), Some(""));
    }

    #[test]
    fn test_param_prefers_stored_value() {
        let segment = line(&[(0, "5"), (1, "#112233")]);
        assert_eq!(segment.param(0), "5");
        assert_eq!(segment.param(1), "#112233");
    }

    #[test]
    fn test_undeclared_slot_is_empty() {
        let segment = line(&[]);
        assert_eq!(segment.param(9), "");
    }
}
