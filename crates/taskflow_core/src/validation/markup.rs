//! Disallowed markup detection and stripping for user-supplied text.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

const DISALLOWED_PATTERNS: [&str; 11] = [
    r"(?is)<script\b.*?</script>",
    r"(?i)javascript:",
    r"(?i)on\w+\s*=",
    r"(?i)<iframe",
    r"(?i)<object",
    r"(?i)<embed",
    r"(?i)<link",
    r"(?i)<meta",
    r"(?i)expression\s*\(",
    r"(?i)vbscript:",
    r"(?i)data:text/html",
];

static DISALLOWED: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(DISALLOWED_PATTERNS).expect("disallowed markup patterns must compile")
});

static STRIP_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(DISALLOWED_PATTERNS[0]).expect("script pattern must compile"));
static STRIP_JS_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(DISALLOWED_PATTERNS[1]).expect("scheme pattern must compile"));
static STRIP_EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(DISALLOWED_PATTERNS[2]).expect("handler pattern must compile"));

/// Returns whether `text` matches any disallowed markup pattern.
pub fn contains_disallowed_markup(text: &str) -> bool {
    DISALLOWED.is_match(text)
}

/// Removes script blocks, `javascript:` schemes and inline event handlers,
/// then trims surrounding whitespace.
pub fn sanitize_text(text: &str) -> String {
    let text = STRIP_SCRIPT.replace_all(text, "");
    let text = STRIP_JS_SCHEME.replace_all(&text, "");
    let text = STRIP_EVENT_HANDLER.replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{contains_disallowed_markup, sanitize_text};

    #[test]
    fn detects_every_pattern_case_insensitively() {
        let samples = [
            "<script>x</script>",
            "<SCRIPT type=\"text/javascript\">\nalert(1)\n</Script>",
            "JavaScript:alert(1)",
            "<img onerror = x>",
            "<iframe src=x>",
            "<OBJECT data=x>",
            "<embed src=x>",
            "<link rel=x>",
            "<meta charset=x>",
            "width: expression (1)",
            "VBScript:msgbox",
            "data:text/html;base64,xx",
        ];
        for sample in samples {
            assert!(contains_disallowed_markup(sample), "{sample}");
        }
    }

    #[test]
    fn plain_text_passes() {
        assert!(!contains_disallowed_markup("Write <b>bold</b> release notes"));
        assert!(!contains_disallowed_markup("Ship the online docs"));
    }

    #[test]
    fn sanitize_strips_dangerous_fragments_and_trims() {
        assert_eq!(sanitize_text("  Alpha<script>evil()</script>  "), "Alpha");
        assert_eq!(sanitize_text("javascript:go"), "go");
        assert_eq!(sanitize_text("<a onclick=\"x\">"), "<a \"x\">");
        assert_eq!(sanitize_text("Roadmap"), "Roadmap");
    }
}
