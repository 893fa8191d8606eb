/// Characters kept from a body before the ellipsis marker is appended.
pub const SAMPLE_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

/// Flatten line breaks to spaces and cap the length at `SAMPLE_CHARS`
/// characters plus `ELLIPSIS`. Applying it twice yields the same string.
pub fn sanitize(s: &str) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    match flat.char_indices().nth(SAMPLE_CHARS) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len());
            out.push_str(&flat[..cut]);
            out.push_str(ELLIPSIS);
            out
        }
        None => flat,
    }
}

/// Decode a raw body prefix (lossily, a cap may split a code point) and sanitize it.
pub fn sanitize_bytes(body: &[u8]) -> String {
    sanitize(&String::from_utf8_lossy(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_breaks_become_spaces() {
        assert_eq!(sanitize("a\r\nb\nc"), "a  b c");
    }

    #[test]
    fn short_input_untouched() {
        let s = "x".repeat(SAMPLE_CHARS);
        assert_eq!(sanitize(&s), s);
    }

    #[test]
    fn long_input_truncated_with_marker() {
        let s = "y".repeat(500);
        let out = sanitize(&s);
        assert_eq!(out.chars().count(), SAMPLE_CHARS + ELLIPSIS.len());
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn multibyte_is_not_split() {
        let s = "é".repeat(300);
        let out = sanitize(&s);
        assert_eq!(out.chars().filter(|c| *c == 'é').count(), SAMPLE_CHARS);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let inputs = [
            String::from("short body"),
            "x".repeat(SAMPLE_CHARS),
            "y".repeat(SAMPLE_CHARS + 1),
            "z".repeat(5000),
            "line\r\n".repeat(80),
            "\r\n\n\r".repeat(100),
            "日本語\n".repeat(120),
            String::new(),
        ];
        for input in &inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input of {} chars", input.chars().count());
            assert!(!once.contains('\n') && !once.contains('\r'));
            assert!(once.chars().count() <= SAMPLE_CHARS + ELLIPSIS.len());
        }
    }

    #[test]
    fn truncated_code_point_is_replaced() {
        let bytes = "héllo".as_bytes();
        let out = sanitize_bytes(&bytes[..2]);
        assert_eq!(out, "h\u{FFFD}");
    }
}
