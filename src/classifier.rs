use scraper::Html;
use tracing::debug;

use crate::keywords::KeywordSet;
use crate::models::ClassificationResult;
use crate::plugins::strategies::{ControlLabelStrategy, PageTextStrategy, StructuredDataStrategy};
use crate::plugins::traits::AvailabilityStrategy;

pub const INDETERMINATE_REASON: &str = "no unambiguous availability indicator";

pub type StrategyBox = Box<dyn AvailabilityStrategy>;

/// Ordered chain of availability strategies. The first definitive verdict
/// wins; when every strategy abstains the page is indeterminate.
pub struct AvailabilityClassifier {
    strategies: Vec<StrategyBox>,
}

impl AvailabilityClassifier {
    pub fn new(strategies: Vec<StrategyBox>) -> Self {
        Self { strategies }
    }

    /// Structured data first, then visible text, then control labels.
    pub fn with_keywords(keywords: KeywordSet) -> Self {
        Self::new(vec![
            Box::new(StructuredDataStrategy::new()),
            Box::new(PageTextStrategy::new(keywords.clone())),
            Box::new(ControlLabelStrategy::new(keywords)),
        ])
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Parses `html` and runs the chain over it.
    pub fn classify_html(&self, html: &str) -> ClassificationResult {
        let document = Html::parse_document(html);
        self.classify(&document)
    }

    pub fn classify(&self, document: &Html) -> ClassificationResult {
        for strategy in &self.strategies {
            if let Some(result) = strategy.classify(document) {
                debug!(
                    "Strategy {} decided {}: {}",
                    strategy.name(),
                    result.status,
                    result.reason
                );
                return result;
            }
            debug!("Strategy {} had no opinion", strategy.name());
        }
        ClassificationResult::indeterminate(INDETERMINATE_REASON)
    }
}

impl Default for AvailabilityClassifier {
    fn default() -> Self {
        Self::with_keywords(KeywordSet::default())
    }
}
