//! Removal of executable markup from user-supplied post bodies.

use ammonia::Builder as AmmoniaBuilder;

const EXCERPT_ELLIPSIS: &str = "…";

/// Strips scripts, event-handler attributes and non-http(s) URLs while keeping
/// ordinary formatting markup.
pub struct BodySanitizer {
    builder: AmmoniaBuilder<'static>,
}

impl BodySanitizer {
    pub fn new() -> Self {
        Self {
            builder: build_body_sanitizer(),
        }
    }

    pub fn clean(&self, text: &str) -> String {
        self.builder.clean(text).to_string()
    }

    /// Clean at most `max_chars` characters of `text`, closing any element the cut left open.
    pub fn excerpt(&self, text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => self.clean(text),
            Some((cut, _)) => {
                let mut excerpt = self.clean(&text[..cut]);
                excerpt.push_str(EXCERPT_ELLIPSIS);
                excerpt
            }
        }
    }
}

impl Default for BodySanitizer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_body_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    builder.add_tags(&["figure", "figcaption", "section", "mark", "s"]);
    builder.add_generic_attributes(&["class", "title", "lang", "dir"]);
    builder.add_tag_attributes("img", &["width", "height", "loading"]);
    builder.add_tag_attributes("a", &["target"]);

    builder
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn script_elements_are_removed_with_their_content() {
        let sanitizer = BodySanitizer::new();
        let cleaned = sanitizer.clean("<p>Hello</p><script>alert('x')</script><p>World</p>");
        assert_snapshot!(cleaned, @"<p>Hello</p><p>World</p>");
    }

    #[test]
    fn surrounding_text_survives() {
        let sanitizer = BodySanitizer::new();
        let cleaned = sanitizer.clean("Before <script>steal(document.cookie)</script> after");
        assert_snapshot!(cleaned, @"Before  after");
    }

    #[test]
    fn event_handlers_are_dropped() {
        let sanitizer = BodySanitizer::new();
        let cleaned =
            sanitizer.clean(r#"<img src="https://example.com/a.png" onerror="alert(1)">"#);
        assert_snapshot!(cleaned, @r#"<img src="https://example.com/a.png">"#);
    }

    #[test]
    fn javascript_urls_are_dropped() {
        let sanitizer = BodySanitizer::new();
        let cleaned = sanitizer.clean(r#"<a href="javascript:alert(1)">click</a>"#);
        assert!(!cleaned.contains("javascript"));
        assert!(cleaned.contains("click"));
    }

    #[test]
    fn formatting_markup_is_kept() {
        let sanitizer = BodySanitizer::new();
        let cleaned = sanitizer.clean("<p><strong>bold</strong> and <em>soft</em></p>");
        assert_snapshot!(cleaned, @"<p><strong>bold</strong> and <em>soft</em></p>");
    }

    #[test]
    fn excerpt_returns_short_bodies_whole() {
        let sanitizer = BodySanitizer::new();
        assert_eq!(sanitizer.excerpt("<p>short</p>", 100), "<p>short</p>");
    }

    #[test]
    fn excerpt_closes_elements_left_open_by_the_cut() {
        let sanitizer = BodySanitizer::new();
        let excerpt = sanitizer.excerpt("<p>abcdefghij</p>", 8);
        assert_snapshot!(excerpt, @"<p>abcde</p>…");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let sanitizer = BodySanitizer::new();
        let excerpt = sanitizer.excerpt("ééééé", 3);
        assert_eq!(excerpt, "ééé…");
    }
}
