//! XML text escaping.

use std::fmt;

/// Displays a string with XML special characters replaced by entities.
/// Characters XML 1.0 does not allow in a document are dropped.
pub(crate) struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some((pos, c)) = rest
            .char_indices()
            .find(|&(_, c)| matches!(c, '&' | '<' | '>' | '"' | '\'') || !is_xml_char(c))
        {
            f.write_str(&rest[..pos])?;
            f.write_str(match c {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' => "&quot;",
                '\'' => "&apos;",
                _ => "",
            })?;
            rest = &rest[pos + c.len_utf8()..];
        }
        f.write_str(rest)
    }
}

/// The `Char` production of XML 1.0.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{d7ff}' | '\u{e000}'..='\u{fffd}' | '\u{10000}'..='\u{10ffff}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            Escaped(r#"<a href="x">'&'</a>"#).to_string(),
            "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_leaves_plain_and_wide_text_alone() {
        assert_eq!(Escaped("蓝靛厂南路").to_string(), "蓝靛厂南路");
        assert_eq!(Escaped("").to_string(), "");
    }

    #[test]
    fn test_drops_characters_xml_forbids() {
        assert_eq!(Escaped("Gate\u{1}B").to_string(), "GateB");
        assert_eq!(Escaped("a\u{0}\u{1b}\u{fffe}b").to_string(), "ab");
        assert_eq!(Escaped("a\tb\nc").to_string(), "a\tb\nc");
        assert_eq!(Escaped("\u{8}<\u{7f}").to_string(), "&lt;\u{7f}");
    }
}
