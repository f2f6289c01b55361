use scraper::Html;

use crate::models::ClassificationResult;

/// One source of availability evidence.
///
/// A strategy either returns a definitive verdict or `None` for "no opinion",
/// in which case the classifier moves on to the next strategy in its chain.
pub trait AvailabilityStrategy: Send + Sync {
    /// Plugin metadata
    fn name(&self) -> &str;

    fn classify(&self, document: &Html) -> Option<ClassificationResult>;
}
