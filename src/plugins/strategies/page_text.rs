use scraper::Html;

use crate::keywords::{KeywordSet, normalize_text};
use crate::models::ClassificationResult;
use crate::plugins::traits::AvailabilityStrategy;

/// Elements whose text content is never rendered.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Keyword scan over the page's visible text.
///
/// Unavailable phrases are checked before available ones, so a page that says
/// "out of stock" anywhere is never reported as available because it also
/// renders an "add to cart" label elsewhere.
#[derive(Debug, Clone)]
pub struct PageTextStrategy {
    keywords: KeywordSet,
}

impl PageTextStrategy {
    pub fn new(keywords: KeywordSet) -> Self {
        Self { keywords }
    }
}

/// Normalized text of every rendered text node, in document order.
pub fn visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        text.push_str(fragment);
        text.push(' ');
    }

    normalize_text(&text)
}

impl AvailabilityStrategy for PageTextStrategy {
    fn name(&self) -> &str {
        "page_text"
    }

    fn classify(&self, document: &Html) -> Option<ClassificationResult> {
        let text = visible_text(document);

        if let Some(phrase) = self.keywords.find_unavailable(&text) {
            return Some(ClassificationResult::unavailable(format!("keyword match: '{}'", phrase)));
        }
        if let Some(phrase) = self.keywords.find_available(&text) {
            return Some(ClassificationResult::available(format!("keyword match: '{}'", phrase)));
        }
        None
    }
}
