//! Terminal rendering of HTML answers.

use carebot_common::DecisionTag;
use html2text::from_read;
use owo_colors::OwoColorize;

/// Fallback when $COLUMNS is unset or unusable
pub const DEFAULT_WIDTH: usize = 80;

pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .filter(|w| *w >= 20)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Plain text for an HTML answer fragment
pub fn html_to_text(html: &str, width: usize) -> String {
    from_read(html.as_bytes(), width).trim_end().to_string()
}

/// Colored decision tag for `route` output
pub fn tag_label(tag: DecisionTag) -> String {
    let name = tag.as_str();
    match tag {
        DecisionTag::Emergency => name.red().bold().to_string(),
        DecisionTag::GeneratedError => name.yellow().to_string(),
        DecisionTag::OffTopic | DecisionTag::EmptyInput => name.dimmed().to_string(),
        _ => name.green().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carebot_common::KnowledgeBase;

    #[test]
    fn test_html_to_text_keeps_content() {
        let text = html_to_text("<strong>Rest</strong><br><ul><li>Drink water</li></ul>", 80);
        assert!(text.contains("Rest"));
        assert!(text.contains("Drink water"));
        assert!(!text.contains("<li>"));
    }

    #[test]
    fn test_knowledge_answer_renders_disclaimer() {
        let html = KnowledgeBase::builtin().render("cough").unwrap();
        let text = html_to_text(&html, 100);
        assert!(text.contains("Direct Answer:"));
        assert!(text.contains("I am an AI, not a doctor"));
    }

    #[test]
    fn test_tag_label_contains_name() {
        for tag in DecisionTag::ALL {
            assert!(tag_label(tag).contains(tag.as_str()));
        }
    }
}
