//! The closed set of segment kinds and their fixed widths.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Width of one standard sign cell in pixels.
pub const CELL: u32 = 128;

/// Direction of an arrow segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    NorthEast,
    SouthWest,
    NorthWest,
    SouthEast,
    East,
    West,
    North,
    South,
}

impl ArrowDirection {
    pub const ALL: [ArrowDirection; 8] = [
        ArrowDirection::NorthEast,
        ArrowDirection::SouthWest,
        ArrowDirection::NorthWest,
        ArrowDirection::SouthEast,
        ArrowDirection::East,
        ArrowDirection::West,
        ArrowDirection::North,
        ArrowDirection::South,
    ];

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::NorthEast | Self::SouthWest | Self::NorthWest | Self::SouthEast
        )
    }

    /// Asset path and clockwise rotation in degrees.
    ///
    /// Diagonals share the 45° artwork (which points south-east), cardinals
    /// share the straight artwork (which points east).
    pub fn asset(self) -> (&'static str, f64) {
        let degrees = match self {
            Self::SouthEast | Self::East => 0.0,
            Self::SouthWest | Self::South => 90.0,
            Self::NorthWest | Self::West => 180.0,
            Self::NorthEast | Self::North => 270.0,
        };
        if self.is_diagonal() {
            (ARROW_DIAGONAL_ASSET, degrees)
        } else {
            (ARROW_ASSET, degrees)
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::NorthEast => "↗",
            Self::SouthWest => "↙",
            Self::NorthWest => "↖",
            Self::SouthEast => "↘",
            Self::East => "→",
            Self::West => "←",
            Self::North => "↑",
            Self::South => "↓",
        }
    }
}

pub const ARROW_ASSET: &str = "logos/arrow.svg";
pub const ARROW_DIAGONAL_ASSET: &str = "logos/arrow-45.svg";
pub const TOILET_ASSET: &str = "logos/toilet.svg";

/// A segment kind the layout engine knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SegmentKind {
    /// Green "EXIT / 出" pictogram.
    #[default]
    Exit,
    Arrow(ArrowDirection),
    Toilet,
    Blank1,
    /// Line number badge spanning the full two cells.
    Line,
    /// Line number badge inset from both edges.
    LineSpaced,
    Blank2,
    /// Bilingual "towards / next stop / terminus" text.
    Destination,
    /// Exit letter plus bilingual exit name.
    ExitText,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 16] = [
        SegmentKind::Exit,
        SegmentKind::Arrow(ArrowDirection::NorthEast),
        SegmentKind::Arrow(ArrowDirection::SouthWest),
        SegmentKind::Arrow(ArrowDirection::NorthWest),
        SegmentKind::Arrow(ArrowDirection::SouthEast),
        SegmentKind::Arrow(ArrowDirection::East),
        SegmentKind::Arrow(ArrowDirection::West),
        SegmentKind::Arrow(ArrowDirection::North),
        SegmentKind::Arrow(ArrowDirection::South),
        SegmentKind::Toilet,
        SegmentKind::Blank1,
        SegmentKind::Line,
        SegmentKind::LineSpaced,
        SegmentKind::Blank2,
        SegmentKind::Destination,
        SegmentKind::ExitText,
    ];

    /// Fixed horizontal extent of the segment in pixels.
    pub const fn width(self) -> u32 {
        match self {
            Self::ExitText => 4 * CELL,
            Self::Line | Self::LineSpaced | Self::Blank2 => 2 * CELL,
            Self::Destination => 3 * CELL,
            Self::Exit | Self::Arrow(_) | Self::Toilet | Self::Blank1 => CELL,
        }
    }

    /// The tag the editor emits for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exit => "Exit",
            Self::Arrow(dir) => dir.glyph(),
            Self::Toilet => "toilet",
            Self::Blank1 => "blank1",
            Self::Line => "Line",
            Self::LineSpaced => "Line-space",
            Self::Blank2 => "blank2",
            Self::Destination => "To",
            Self::ExitText => "ExitText",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown segment kind {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for SegmentKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_owned()))
    }
}

/// The kind recorded on a segment.
///
/// Tags outside the known set are kept verbatim so that compositions coming
/// from a newer editor still lay out; see [`crate::FallbackPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KindTag {
    Known(SegmentKind),
    Unknown(String),
}

impl KindTag {
    pub fn parse(tag: &str) -> Self {
        match tag.parse() {
            Ok(kind) => Self::Known(kind),
            Err(ParseKindError(tag)) => Self::Unknown(tag),
        }
    }

    pub fn known(&self) -> Option<SegmentKind> {
        match self {
            Self::Known(kind) => Some(*kind),
            Self::Unknown(_) => None,
        }
    }

    /// Unknown tags occupy a single cell.
    pub fn width(&self) -> u32 {
        self.known().map_or(CELL, SegmentKind::width)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(kind) => kind.as_str(),
            Self::Unknown(tag) => tag,
        }
    }
}

impl Default for KindTag {
    fn default() -> Self {
        Self::Known(SegmentKind::default())
    }
}

impl From<SegmentKind> for KindTag {
    fn from(kind: SegmentKind) -> Self {
        Self::Known(kind)
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_match_cell_table() {
        assert_eq!(SegmentKind::ExitText.width(), 512);
        assert_eq!(SegmentKind::Line.width(), 256);
        assert_eq!(SegmentKind::LineSpaced.width(), 256);
        assert_eq!(SegmentKind::Destination.width(), 384);
        assert_eq!(SegmentKind::Blank2.width(), 256);
        for kind in [
            SegmentKind::Exit,
            SegmentKind::Toilet,
            SegmentKind::Blank1,
        ] {
            assert_eq!(kind.width(), 128);
        }
        for dir in ArrowDirection::ALL {
            assert_eq!(SegmentKind::Arrow(dir).width(), 128);
        }
    }

    #[test]
    fn test_tags_round_trip_through_strings() {
        for kind in SegmentKind::ALL {
            assert_eq!(kind.as_str().parse::<SegmentKind>(), Ok(kind));
        }
        assert_eq!(
            "→".parse::<SegmentKind>(),
            Ok(SegmentKind::Arrow(ArrowDirection::East))
        );
    }

    #[test]
    fn test_unknown_tag_is_kept_and_takes_one_cell() {
        let tag = KindTag::parse("escalator");
        assert_eq!(tag, KindTag::Unknown("escalator".into()));
        assert_eq!(tag.width(), 128);
        assert_eq!(tag.to_string(), "escalator");
    }

    #[test]
    fn test_arrow_assets_share_artwork_by_family() {
        for dir in ArrowDirection::ALL {
            let (asset, degrees) = dir.asset();
            if dir.is_diagonal() {
                assert_eq!(asset, ARROW_DIAGONAL_ASSET);
            } else {
                assert_eq!(asset, ARROW_ASSET);
            }
            assert_eq!(degrees % 90.0, 0.0);
        }
        assert_eq!(ArrowDirection::North.asset().1, 270.0);
        assert_eq!(ArrowDirection::SouthWest.asset().1, 90.0);
    }
}
