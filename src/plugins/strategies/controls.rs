use scraper::{ElementRef, Html, Selector};

use crate::keywords::{KeywordSet, normalize_text};
use crate::models::ClassificationResult;
use crate::plugins::traits::AvailabilityStrategy;

const CONTROL_SELECTOR: &str = "button, a, input";

/// Inspects the labels of interactive controls in document order.
///
/// Within one control an available phrase takes priority over an unavailable
/// one; the first control that mentions either decides.
#[derive(Debug, Clone)]
pub struct ControlLabelStrategy {
    keywords: KeywordSet,
}

impl ControlLabelStrategy {
    pub fn new(keywords: KeywordSet) -> Self {
        Self { keywords }
    }
}

/// Rendered text of the control, or its `value` attribute when it has none
/// (e.g. `<input type="submit" value="Kup teraz">`).
fn control_label(element: &ElementRef) -> String {
    let text = normalize_text(&element.text().collect::<Vec<_>>().join(" "));
    if !text.is_empty() {
        return text;
    }
    element
        .value()
        .attr("value")
        .map(normalize_text)
        .unwrap_or_default()
}

impl AvailabilityStrategy for ControlLabelStrategy {
    fn name(&self) -> &str {
        "control_labels"
    }

    fn classify(&self, document: &Html) -> Option<ClassificationResult> {
        let selector = Selector::parse(CONTROL_SELECTOR).ok()?;

        for element in document.select(&selector) {
            let label = control_label(&element);
            if label.is_empty() {
                continue;
            }
            let reason = || format!("control label: '{}'", label);
            if self.keywords.find_available(&label).is_some() {
                return Some(ClassificationResult::available(reason()));
            }
            if self.keywords.find_unavailable(&label).is_some() {
                return Some(ClassificationResult::unavailable(reason()));
            }
        }

        None
    }
}
