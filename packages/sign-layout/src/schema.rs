//! Per-kind parameter slots.
//!
//! Slot indices are positions in the kind's slot list and are part of the
//! contract with the editor: they key [`crate::Segment`] parameters.

use crate::kind::SegmentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    Text,
    Enum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumOption {
    pub value: &'static str,
    /// Translation key for the option's label.
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSlot {
    pub value_type: ValueType,
    /// Translation key for the slot's label.
    pub label: &'static str,
    /// Value used by the layout when the slot is absent or empty.
    pub default: &'static str,
    /// Hint shown by the editor in an empty input.
    pub placeholder: &'static str,
    pub max_length: Option<usize>,
    pub options: &'static [EnumOption],
}

impl ParamSlot {
    const fn number(label: &'static str, default: &'static str) -> Self {
        Self {
            value_type: ValueType::Number,
            label,
            default,
            placeholder: default,
            max_length: None,
            options: &[],
        }
    }

    const fn text(label: &'static str, default: &'static str) -> Self {
        Self {
            value_type: ValueType::Text,
            label,
            default,
            placeholder: default,
            max_length: None,
            options: &[],
        }
    }

    const fn choice(
        label: &'static str,
        default: &'static str,
        options: &'static [EnumOption],
    ) -> Self {
        Self {
            value_type: ValueType::Enum,
            label,
            default,
            placeholder: default,
            max_length: None,
            options,
        }
    }

    const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Clamp `value` to `max_length` characters.
    pub fn clamp<'a>(&self, value: &'a str) -> &'a str {
        match self.max_length {
            Some(max) => match value.char_indices().nth(max) {
                Some((end, _)) => &value[..end],
                None => value,
            },
            None => value,
        }
    }

    pub fn is_option(&self, value: &str) -> bool {
        self.options.iter().any(|opt| opt.value == value)
    }
}

const ALIGN_OPTIONS: &[EnumOption] = &[
    EnumOption {
        value: "R",
        label: "blocks.styles.specials.align_right",
    },
    EnumOption {
        value: "L",
        label: "blocks.styles.specials.align_left",
    },
    EnumOption {
        value: "C",
        label: "blocks.styles.specials.align_center",
    },
];

const LINE_TYPE_OPTIONS: &[EnumOption] = &[
    EnumOption {
        value: "NM",
        label: "blocks.styles.specials.normal_line",
    },
    EnumOption {
        value: "LOOP",
        label: "blocks.styles.specials.loop_line",
    },
    EnumOption {
        value: "T",
        label: "blocks.styles.specials.terminal_station",
    },
];

// The exit pictogram renders nothing until an alignment is picked, so its
// layout default is empty even though the editor suggests "C".
const EXIT_SLOTS: &[ParamSlot] =
    &[ParamSlot::choice("blocks.styles.specials.text_align", "", ALIGN_OPTIONS).placeholder("C")];

const LINE_SLOTS: &[ParamSlot] = &[
    ParamSlot::number("blocks.styles.specials.line_number", "10"),
    ParamSlot::text("blocks.styles.specials.line_color", "#00a3c2"),
];

const EXIT_TEXT_SLOTS: &[ParamSlot] = &[
    ParamSlot::text("blocks.styles.specials.exit_letter", "A").max_length(1),
    ParamSlot::text("blocks.styles.specials.exit_lower", "").max_length(1),
    ParamSlot::text("blocks.styles.specials.exit_zh", "蓝靛厂南路"),
    ParamSlot::text("blocks.styles.specials.exit_en", "Landianchang South Rd."),
];

const DESTINATION_SLOTS: &[ParamSlot] = &[
    ParamSlot::text("blocks.styles.specials.terminal_zh", "").placeholder("宛平城"),
    ParamSlot::text("blocks.styles.specials.terminal_en", "").placeholder("Wanpingcheng"),
    ParamSlot::choice("blocks.styles.specials.text_align", "R", ALIGN_OPTIONS),
    ParamSlot::choice("blocks.styles.specials.line_type", "NM", LINE_TYPE_OPTIONS),
];

/// Slots declared for `kind`, in slot-index order.
pub fn slots(kind: SegmentKind) -> &'static [ParamSlot] {
    match kind {
        SegmentKind::Exit => EXIT_SLOTS,
        SegmentKind::Line | SegmentKind::LineSpaced => LINE_SLOTS,
        SegmentKind::ExitText => EXIT_TEXT_SLOTS,
        SegmentKind::Destination => DESTINATION_SLOTS,
        SegmentKind::Arrow(_) | SegmentKind::Toilet | SegmentKind::Blank1 | SegmentKind::Blank2 => {
            &[]
        }
    }
}

pub fn slot(kind: SegmentKind, index: usize) -> Option<&'static ParamSlot> {
    slots(kind).get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_counts() {
        assert_eq!(slots(SegmentKind::Exit).len(), 1);
        assert_eq!(slots(SegmentKind::Line).len(), 2);
        assert_eq!(slots(SegmentKind::LineSpaced).len(), 2);
        assert_eq!(slots(SegmentKind::ExitText).len(), 4);
        assert_eq!(slots(SegmentKind::Destination).len(), 4);
        assert!(slots(SegmentKind::Toilet).is_empty());
        assert!(slots(SegmentKind::Blank2).is_empty());
    }

    #[test]
    fn test_clamp_counts_chars_not_bytes() {
        let letter = slot(SegmentKind::ExitText, 0).unwrap();
        assert_eq!(letter.clamp("AB"), "A");
        assert_eq!(letter.clamp("出口"), "出");
        assert_eq!(letter.clamp(""), "");

        let name = slot(SegmentKind::ExitText, 2).unwrap();
        assert_eq!(name.clamp("蓝靛厂南路"), "蓝靛厂南路");
    }

    #[test]
    fn test_enum_slots_list_their_options() {
        let align = slot(SegmentKind::Destination, 2).unwrap();
        assert_eq!(align.value_type, ValueType::Enum);
        assert!(align.is_option("C"));
        assert!(!align.is_option("X"));

        let line_type = slot(SegmentKind::Destination, 3).unwrap();
        assert!(line_type.is_option("LOOP"));
    }

    #[test]
    fn test_exit_alignment_has_no_layout_default() {
        let align = slot(SegmentKind::Exit, 0).unwrap();
        assert_eq!(align.default, "");
        assert_eq!(align.placeholder, "C");
    }
}
