//! Classifier contract and the rule-table classifier

use crate::category::Category;
use crate::error::ClassifyResult;
use crate::rules::{DEFAULT_RULE_ID, RuleTable};
use figclass_features::FeatureVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Outcome of classifying one feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Assigned category
    pub category: Category,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Identifier of the rule (or model) that produced the label
    pub matched_rule: String,
    /// The vector that was classified
    pub features: FeatureVector,
}

impl ClassificationResult {
    /// Result for a vector no rule accepted
    pub fn unmatched(features: FeatureVector) -> Self {
        Self {
            category: Category::Unknown,
            confidence: 0.0,
            matched_rule: DEFAULT_RULE_ID.to_string(),
            features,
        }
    }

    /// Whether a rule (rather than the fallback) produced the label
    pub fn is_match(&self) -> bool {
        self.matched_rule != DEFAULT_RULE_ID
    }
}

/// A scoring strategy from feature vectors to categories.
///
/// Implementations must be deterministic and free of shared mutable state,
/// so one classifier can serve many threads.
pub trait FigureClassifier: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Classify one feature vector
    fn classify(&self, features: &FeatureVector) -> ClassificationResult;
}

/// Classifier driven by an ordered [`RuleTable`]
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    table: RuleTable,
}

impl RuleClassifier {
    /// Create a classifier from a validated table.
    pub fn new(table: RuleTable) -> ClassifyResult<Self> {
        table.validate()?;
        Ok(Self { table })
    }

    /// Classifier using the built-in rule table
    pub fn with_default_rules() -> Self {
        Self {
            table: RuleTable::default_table().clone(),
        }
    }

    /// The active rule table
    pub fn table(&self) -> &RuleTable {
        &self.table
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

impl FigureClassifier for RuleClassifier {
    fn name(&self) -> &str {
        "rules"
    }

    fn classify(&self, features: &FeatureVector) -> ClassificationResult {
        for rule in self.table.rules() {
            match rule.evaluate(features) {
                Some(confidence) => {
                    debug!(
                        "Rule '{}' matched: {} (confidence {:.3})",
                        rule.id, rule.category, confidence
                    );
                    return ClassificationResult {
                        category: rule.category,
                        confidence,
                        matched_rule: rule.id.clone(),
                        features: *features,
                    };
                }
                None => trace!("Rule '{}' rejected", rule.id),
            }
        }
        debug!("No rule matched, category unknown");
        ClassificationResult::unmatched(*features)
    }
}
