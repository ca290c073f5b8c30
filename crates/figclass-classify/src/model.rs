//! Fitted linear scoring model
//!
//! [`LinearModel`] is the statistical counterpart of the rule table: one
//! weight per feature and a bias for each category, combined into softmax
//! probabilities. It consumes the same [`FeatureVector`] and produces the
//! same [`ClassificationResult`], so it can replace [`RuleClassifier`]
//! anywhere a [`FigureClassifier`] is expected. Weights are fitted
//! elsewhere and loaded from JSON.
//!
//! [`RuleClassifier`]: crate::RuleClassifier

use crate::category::Category;
use crate::classifier::{ClassificationResult, FigureClassifier};
use crate::error::{ClassifyError, ClassifyResult};
use figclass_features::{FeatureName, FeatureVector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Identifier reported as `matched_rule` by the linear model
pub const LINEAR_RULE_ID: &str = "linear";

/// Weights of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassWeights {
    /// Category these weights score
    pub category: Category,
    /// Constant term
    #[serde(default)]
    pub bias: f64,
    /// Per-feature weights; missing features weigh zero
    #[serde(default)]
    pub weights: BTreeMap<FeatureName, f64>,
}

impl ClassWeights {
    /// Create weights for one category
    pub fn new(category: Category, bias: f64, weights: &[(FeatureName, f64)]) -> Self {
        Self {
            category,
            bias,
            weights: weights.iter().copied().collect(),
        }
    }

    /// Linear score `bias + sum(w_f * x_f)`
    pub fn score(&self, features: &FeatureVector) -> f64 {
        self.bias
            + self
                .weights
                .iter()
                .map(|(&name, &w)| w * features.get(name))
                .sum::<f64>()
    }
}

/// Softmax over per-category linear scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    classes: Vec<ClassWeights>,
    /// Below this winning probability the figure is left unknown
    #[serde(default)]
    min_confidence: f64,
}

impl LinearModel {
    /// Create a model from per-category weights.
    pub fn new(classes: Vec<ClassWeights>, min_confidence: f64) -> ClassifyResult<Self> {
        let model = Self {
            classes,
            min_confidence,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate a model from JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use figclass_classify::LinearModel;
    ///
    /// let json = r#"{"classes": [
    ///     {"category": "text_block", "weights": {"text_ratio": 8.0}},
    ///     {"category": "photograph", "bias": 0.5, "weights": {"color_diversity": 20.0}}
    /// ]}"#;
    /// let model = LinearModel::from_json(json).unwrap();
    /// assert_eq!(model.classes().len(), 2);
    /// ```
    pub fn from_json(json: &str) -> ClassifyResult<Self> {
        let model: LinearModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Serialize the model to pretty-printed JSON
    pub fn to_json(&self) -> ClassifyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Per-category weights
    pub fn classes(&self) -> &[ClassWeights] {
        &self.classes
    }

    /// Minimum winning probability
    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Softmax probabilities in class order
    pub fn probabilities(&self, features: &FeatureVector) -> Vec<f64> {
        let scores: Vec<f64> = self.classes.iter().map(|c| c.score(features)).collect();
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }

    /// Check the model invariants: at least one class, unique categories
    /// other than `unknown`, finite parameters.
    pub fn validate(&self) -> ClassifyResult<()> {
        if self.classes.is_empty() {
            return Err(ClassifyError::InvalidModel("model has no classes".to_string()));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ClassifyError::InvalidModel(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        let mut seen = HashSet::new();
        for class in &self.classes {
            if class.category == Category::Unknown {
                return Err(ClassifyError::InvalidModel(
                    "category 'unknown' cannot be scored".to_string(),
                ));
            }
            if !seen.insert(class.category) {
                return Err(ClassifyError::InvalidModel(format!(
                    "duplicate category '{}'",
                    class.category
                )));
            }
            let finite = class.bias.is_finite() && class.weights.values().all(|w| w.is_finite());
            if !finite {
                return Err(ClassifyError::InvalidModel(format!(
                    "non-finite parameter for '{}'",
                    class.category
                )));
            }
        }
        Ok(())
    }
}

impl FigureClassifier for LinearModel {
    fn name(&self) -> &str {
        LINEAR_RULE_ID
    }

    fn classify(&self, features: &FeatureVector) -> ClassificationResult {
        let probs = self.probabilities(features);
        // First class wins ties
        let best = probs
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            });

        match best {
            Some((i, p)) if p.is_finite() && p >= self.min_confidence => {
                let category = self.classes[i].category;
                debug!("Linear model: {} (p = {:.3})", category, p);
                ClassificationResult {
                    category,
                    confidence: p.clamp(0.0, 1.0),
                    matched_rule: LINEAR_RULE_ID.to_string(),
                    features: *features,
                }
            }
            _ => {
                debug!("Linear model below min_confidence, category unknown");
                ClassificationResult::unmatched(*features)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class() -> LinearModel {
        LinearModel::new(
            vec![
                ClassWeights::new(Category::TextBlock, 0.0, &[(FeatureName::TextRatio, 10.0)]),
                ClassWeights::new(Category::Photograph, 1.0, &[]),
            ],
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = two_class();
        let v = FeatureVector::from_pairs(&[(FeatureName::TextRatio, 0.3)]).unwrap();
        let p = model.probabilities(&v);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // Scores 3 vs 1
        let expected = 1.0 / (1.0 + (-2.0f64).exp());
        assert!((p[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_classify_argmax() {
        let model = two_class();
        let text = FeatureVector::from_pairs(&[(FeatureName::TextRatio, 0.5)]).unwrap();
        let r = model.classify(&text);
        assert_eq!(r.category, Category::TextBlock);
        assert_eq!(r.matched_rule, "linear");
        let plain = FeatureVector::from_pairs(&[]).unwrap();
        assert_eq!(model.classify(&plain).category, Category::Photograph);
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        let model = LinearModel::new(
            vec![
                ClassWeights::new(Category::Chart, 0.0, &[]),
                ClassWeights::new(Category::Diagram, 0.0, &[]),
            ],
            0.0,
        )
        .unwrap();
        let r = model.classify(&FeatureVector::from_pairs(&[]).unwrap());
        assert_eq!(r.category, Category::Chart);
        assert!((r.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_min_confidence_falls_back() {
        let model = LinearModel::new(
            vec![
                ClassWeights::new(Category::Chart, 0.0, &[]),
                ClassWeights::new(Category::Diagram, 0.0, &[]),
            ],
            0.9,
        )
        .unwrap();
        let r = model.classify(&FeatureVector::from_pairs(&[]).unwrap());
        assert_eq!(r.category, Category::Unknown);
        assert_eq!(r.matched_rule, "default");
    }

    #[test]
    fn test_invalid_models() {
        assert!(LinearModel::new(vec![], 0.0).is_err());
        let dup = vec![
            ClassWeights::new(Category::Chart, 0.0, &[]),
            ClassWeights::new(Category::Chart, 1.0, &[]),
        ];
        assert!(LinearModel::new(dup, 0.0).is_err());
        let unknown = vec![ClassWeights::new(Category::Unknown, 0.0, &[])];
        assert!(LinearModel::new(unknown, 0.0).is_err());
        let nan = vec![ClassWeights::new(Category::Chart, f64::NAN, &[])];
        assert!(LinearModel::new(nan, 0.0).is_err());
        let chart = vec![ClassWeights::new(Category::Chart, 0.0, &[])];
        assert!(LinearModel::new(chart, 1.5).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let model = two_class();
        let back = LinearModel::from_json(&model.to_json().unwrap()).unwrap();
        assert_eq!(back, model);
        assert!(LinearModel::from_json(r#"{"classes": []}"#).is_err());
    }
}
