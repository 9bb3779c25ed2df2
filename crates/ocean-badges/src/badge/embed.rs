use super::svg::{escape, Element};
use serde::Serialize;

const ALT_TEXT: &str = "Big Five personality badge";

/// Copy-paste snippets that embed a stored badge and link to its profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedSnippets {
    pub badge_url: String,
    pub profile_url: String,
    pub html: String,
    pub markdown: String,
}

impl EmbedSnippets {
    pub fn new(public_base_url: &str, result_id: &str) -> Self {
        let base = public_base_url.trim_end_matches('/');
        let badge_url = badge_url(base, result_id);
        let profile_url = profile_url(base, result_id);

        let image = Element::new("img")
            .attr("src", badge_url.as_str())
            .attr("alt", ALT_TEXT)
            .render();
        let html = format!(
            "<a href=\"{}\">\n  {image}\n</a>",
            escape(&profile_url)
        );
        let markdown = format!("[![{ALT_TEXT}]({badge_url})]({profile_url})");

        Self {
            badge_url,
            profile_url,
            html,
            markdown,
        }
    }
}

pub fn badge_url(public_base_url: &str, result_id: &str) -> String {
    format!(
        "{}/api/v1/badges/{result_id}.svg",
        public_base_url.trim_end_matches('/')
    )
}

pub fn profile_url(public_base_url: &str, result_id: &str) -> String {
    format!(
        "{}/result/{result_id}",
        public_base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_html_and_markdown_snippets() {
        let snippets = EmbedSnippets::new("https://ocean.example/", "abc-123");

        assert_eq!(
            snippets.badge_url,
            "https://ocean.example/api/v1/badges/abc-123.svg"
        );
        assert_eq!(snippets.profile_url, "https://ocean.example/result/abc-123");
        assert_eq!(
            snippets.html,
            "<a href=\"https://ocean.example/result/abc-123\">\n  <img src=\"https://ocean.example/api/v1/badges/abc-123.svg\" alt=\"Big Five personality badge\"/>\n</a>"
        );
        assert_eq!(
            snippets.markdown,
            "[![Big Five personality badge](https://ocean.example/api/v1/badges/abc-123.svg)](https://ocean.example/result/abc-123)"
        );
    }
}
