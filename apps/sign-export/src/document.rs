//! JSON description of a sign.
//!
//! ```json
//! {
//!   "background": "#041c31",
//!   "segments": [
//!     { "kind": "Exit", "params": { "0": "C" }, "divider": true },
//!     { "kind": "Line", "params": { "0": "5", "1": "#a6217f" } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use sign_layout::{Composition, CompositionError, KindTag, SegmentId, parse_fill};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("a sign needs at least one segment")]
    NoSegments,

    #[error("unrecognised background colour {0:?}")]
    Background(String),

    #[error("segment {index}: {source}")]
    Segment {
        index: usize,
        #[source]
        source: CompositionError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignDocument {
    #[serde(default)]
    pub background: Option<String>,
    pub segments: Vec<SegmentDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SegmentDocument {
    pub kind: String,
    #[serde(default)]
    pub params: BTreeMap<usize, String>,
    #[serde(default)]
    pub divider: bool,
}

impl SignDocument {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build the composition. Unknown kinds are kept as-is and left to the layout policy.
    pub fn to_composition(&self) -> Result<Composition, DocumentError> {
        if self.segments.is_empty() {
            return Err(DocumentError::NoSegments);
        }

        let mut composition = Composition::new();
        if let Some(background) = &self.background {
            let color =
                parse_fill(background).ok_or_else(|| DocumentError::Background(background.clone()))?;
            composition.set_background(color);
        }

        for (index, segment) in self.segments.iter().enumerate() {
            let id = if index == 0 {
                SegmentId(1)
            } else {
                composition.add_segment()
            };
            segment
                .apply(&mut composition, id)
                .map_err(|source| DocumentError::Segment { index, source })?;
        }
        Ok(composition)
    }
}

impl SegmentDocument {
    fn apply(&self, composition: &mut Composition, id: SegmentId) -> Result<(), CompositionError> {
        let kind = KindTag::parse(&self.kind);
        if let KindTag::Unknown(tag) = &kind {
            log::warn!("segment {id} has unrecognised kind {tag:?}");
        }
        composition.set_kind(id, kind)?;
        for (&slot, value) in &self.params {
            composition.set_parameter(id, slot, value)?;
        }
        composition.set_divider(id, self.divider)
    }
}
