//! Text sanitization shared by the inbound and outbound paths

/// Escape `<` and `>` into their HTML entities.
///
/// All other characters, including `&`, are left untouched. The same
/// function is applied to user input after admission and to backend
/// replies before display, and each message goes through it exactly once.
pub fn sanitize(text: &str) -> String {
    if !text.contains(['<', '>']) {
        return text.to_string();
    }
    text.replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> String {
        text.replace("&lt;", "<").replace("&gt;", ">")
    }

    #[test]
    fn test_sanitize_script_tag() {
        assert_eq!(
            sanitize("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_sanitize_leaves_plain_text_unchanged() {
        assert_eq!(
            sanitize("How do I set up a firewall?"),
            "How do I set up a firewall?"
        );
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("Tom & Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_sanitized_output_has_no_angle_brackets() {
        let inputs = [
            "a < b",
            "b > a",
            "<<>>",
            "<img src=x onerror=alert(1)>",
            "plain",
            "ünïcödé <tag> 日本語",
        ];
        for input in inputs {
            let out = sanitize(input);
            assert!(!out.contains('<'), "{out}");
            assert!(!out.contains('>'), "{out}");
            assert_eq!(decode(&out), input);
        }
    }

    #[test]
    fn test_sanitize_does_not_touch_existing_entities() {
        assert_eq!(sanitize("&lt;b&gt;"), "&lt;b&gt;");
    }
}
