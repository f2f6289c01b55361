use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::models::{AvailabilityStatus, ClassificationResult};
use crate::plugins::traits::AvailabilityStrategy;
use crate::utils::error::{AppError, Result};

const LD_JSON_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Reads schema.org `Offer.availability` from embedded JSON-LD blocks.
///
/// Blocks are visited in document order and the first offer that carries a
/// recognizable availability value decides the verdict.
#[derive(Debug, Default, Clone)]
pub struct StructuredDataStrategy;

impl StructuredDataStrategy {
    pub fn new() -> Self {
        Self
    }

    fn parse_block(raw: &str) -> Result<Value> {
        serde_json::from_str(raw).map_err(|e| AppError::Parse {
            message: format!("invalid JSON-LD block: {}", e),
        })
    }

    /// Top-level nodes of a block, with `@graph` members expanded in place.
    fn nodes(block: &Value) -> Vec<&Value> {
        let top: Vec<&Value> = match block {
            Value::Object(_) => vec![block],
            Value::Array(items) => items.iter().collect(),
            _ => return Vec::new(),
        };

        let mut nodes = Vec::with_capacity(top.len());
        for node in top {
            nodes.push(node);
            if let Some(Value::Array(graph)) = node.get("@graph") {
                nodes.extend(graph.iter());
            }
        }
        nodes
    }

    fn offers(node: &Value) -> Vec<&Value> {
        match node.get("offers") {
            Some(offer @ Value::Object(_)) => vec![offer],
            Some(Value::Array(offers)) => offers.iter().collect(),
            _ => Vec::new(),
        }
    }

    fn availability(offer: &Value) -> Option<&str> {
        ["availability", "availabilityStarts"].iter().find_map(|name| {
            offer
                .get(*name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
    }

    fn scan_block(&self, block: &Value) -> Option<ClassificationResult> {
        for node in Self::nodes(block) {
            for offer in Self::offers(node) {
                let Some(raw) = Self::availability(offer) else {
                    continue;
                };
                if let Some(status) = status_from_availability(raw) {
                    return Some(ClassificationResult::new(
                        status,
                        format!("schema.org structured data ({})", raw),
                    ));
                }
            }
        }
        None
    }
}

/// Maps a schema.org availability value (usually an IRI such as
/// `http://schema.org/InStock`) to a status, case-insensitively.
pub fn status_from_availability(raw: &str) -> Option<AvailabilityStatus> {
    let value = raw.to_lowercase();
    if value.contains("instock") {
        Some(AvailabilityStatus::Available)
    } else if value.contains("outofstock") || value.contains("oos") {
        Some(AvailabilityStatus::Unavailable)
    } else {
        None
    }
}

impl AvailabilityStrategy for StructuredDataStrategy {
    fn name(&self) -> &str {
        "structured_data"
    }

    fn classify(&self, document: &Html) -> Option<ClassificationResult> {
        let selector = Selector::parse(LD_JSON_SELECTOR).ok()?;

        for (index, script) in document.select(&selector).enumerate() {
            let raw = script.text().collect::<String>();
            let block = match Self::parse_block(&raw) {
                Ok(block) => block,
                Err(e) => {
                    debug!("Skipping structured-data block #{}: {}", index, e);
                    continue;
                }
            };

            if let Some(result) = self.scan_block(&block) {
                return Some(result);
            }
        }

        None
    }
}
