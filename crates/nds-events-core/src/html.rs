//! HTML helpers for admin cells and widget markup.

use std::sync::LazyLock;

use regex::Regex;

/// Regex matching an HTML tag, including tags that span lines.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag regex"));

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Removes HTML tags, keeping their text content.
pub fn strip_tags(s: &str) -> String {
    TAG_REGEX.replace_all(s, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(html_escape("<b>\"hi\"</b>"), "&lt;b&gt;&quot;hi&quot;&lt;/b&gt;");
        assert_eq!(html_escape("it's"), "it&#x27;s");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>Upcoming</b> Events"), "Upcoming Events");
        assert_eq!(strip_tags("<script>x</script>"), "x");
        assert_eq!(strip_tags("  plain  "), "plain");
        assert_eq!(strip_tags("<a\nhref=\"#\">multi</a>"), "multi");
    }
}
