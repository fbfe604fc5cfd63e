//! Card image rendering for `/api/og`.
//!
//! Produces a 1200x630 SVG card: category gradient, title, description
//! and footer. Text is word-wrapped by character count, which is close
//! enough for the fixed sans-serif face used.

use bloom_common::ImageCategory;

use crate::frame::render::escape_markup;

/// Title shown when the query has none
pub const DEFAULT_TITLE: &str = "SkillBloom";

/// Description shown when the query has none
pub const DEFAULT_DESCRIPTION: &str = "Bloom your skills, get recognized";

const TITLE_LINE_CHARS: usize = 32;
const TITLE_MAX_LINES: usize = 2;
const DESCRIPTION_LINE_CHARS: usize = 56;
const DESCRIPTION_MAX_LINES: usize = 3;

/// Card image renderer
pub struct CardRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 630,
        }
    }
}

impl CardRenderer {
    /// Render a card as an SVG document
    pub fn render(&self, title: &str, description: &str, category: ImageCategory) -> String {
        let (primary, accent) = category.palette();
        let center = self.width / 2;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        svg.push_str(&format!(
            r#"<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="{primary}"/><stop offset="100%" stop-color="{accent}"/></linearGradient></defs>"#
        ));
        svg.push_str(r#"<rect width="100%" height="100%" fill="url(#bg)"/>"#);

        // Logo
        svg.push_str(&format!(
            r#"<text x="{center}" y="150" font-size="80" text-anchor="middle">🌱</text>"#
        ));

        let title_lines = wrap(title, TITLE_LINE_CHARS, TITLE_MAX_LINES);
        let mut y = 250;
        for line in &title_lines {
            svg.push_str(&format!(
                r#"<text x="{center}" y="{y}" font-family="sans-serif" font-size="48" font-weight="bold" fill="white" text-anchor="middle">{}</text>"#,
                escape_markup(line)
            ));
            y += 58;
        }

        y += 12;
        for line in wrap(description, DESCRIPTION_LINE_CHARS, DESCRIPTION_MAX_LINES) {
            svg.push_str(&format!(
                r#"<text x="{center}" y="{y}" font-family="sans-serif" font-size="24" fill="white" fill-opacity="0.9" text-anchor="middle">{}</text>"#,
                escape_markup(&line)
            ));
            y += 34;
        }

        svg.push_str(&format!(
            r#"<text x="{center}" y="{}" font-family="sans-serif" font-size="18" fill="white" fill-opacity="0.7" text-anchor="middle">SkillBloom • Powered by Base</text>"#,
            self.height - 40
        ));

        svg.push_str("</svg>");
        svg
    }
}

/// Greedy word wrap; the last kept line gets an ellipsis if text remains
fn wrap(text: &str, line_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word: String = word.chars().take(line_chars).collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > line_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push_str("...");
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_uses_category_palette() {
        let svg = CardRenderer::default().render("Hi", "There", ImageCategory::Credentials);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r##"stop-color="#10B981""##));
        assert!(svg.contains(r##"stop-color="#34D399""##));
        assert!(svg.contains(r#"width="1200" height="630""#));
    }

    #[test]
    fn test_card_escapes_text() {
        let svg = CardRenderer::default().render("<script>", "Tom & \"Jerry\" O'Neil", ImageCategory::Default);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(svg.contains("Tom &amp; &quot;Jerry&quot; O&#39;Neil"));
    }

    #[test]
    fn test_wrap_limits_lines() {
        assert_eq!(wrap("one two three", 7, 3), ["one two", "three"]);
        assert_eq!(wrap("aa bb cc dd", 2, 2), ["aa", "bb..."]);
        assert!(wrap("   ", 10, 2).is_empty());
        // Overlong words are clipped rather than overflowing
        assert_eq!(wrap("abcdefghij", 4, 1), ["abcd"]);
    }
}
