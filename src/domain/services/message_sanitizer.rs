/// Normalise free text posted by a chat widget.
///
/// Strips markup tags, drops control characters, collapses runs of whitespace
/// into a single space and trims the ends. The result is plain single-line
/// text; an empty result means the visitor sent nothing usable.
pub fn sanitize_text_field(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    let mut pending_space = false;

    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if in_tag {
            if c == '>' {
                in_tag = false;
            }
            continue;
        }

        // A '<' only opens a tag when followed by a letter, '/', '!' or '?'.
        if c == '<' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?') {
                    in_tag = true;
                    continue;
                }
            }
        }

        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if c.is_control() {
            continue;
        }

        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        assert_eq!(
            sanitize_text_field("  <b>Hello</b>\n\n  there\t<script>x</script> "),
            "Hello there x"
        );
    }

    #[test]
    fn keeps_comparison_operators() {
        assert_eq!(sanitize_text_field("is 3 < 5 and 7 > 2?"), "is 3 < 5 and 7 > 2?");
    }

    #[test]
    fn drops_control_characters() {
        assert_eq!(sanitize_text_field("a\u{0000}b\u{0007}c"), "abc");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(sanitize_text_field(" \n\t "), "");
        assert_eq!(sanitize_text_field("<p></p>"), "");
    }
}
