//! Accuracy of a classifier on labeled feature vectors
//!
//! Thresholds of a rule table are calibrated by running candidate tables
//! over a labeled validation set and comparing the confusion counts.

use crate::category::Category;
use crate::classifier::FigureClassifier;
use figclass_features::FeatureVector;
use std::collections::BTreeMap;
use tracing::debug;

/// A feature vector with its expected category
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub expected: Category,
}

impl LabeledSample {
    /// Create a labeled sample
    pub fn new(features: FeatureVector, expected: Category) -> Self {
        Self { features, expected }
    }
}

/// Confusion counts of one evaluation run
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Number of samples
    pub total: usize,
    /// Samples whose prediction matched the label
    pub correct: usize,
    /// Counts keyed by (expected, predicted)
    pub confusion: BTreeMap<(Category, Category), usize>,
    /// Indices of misclassified samples
    pub misclassified: Vec<usize>,
}

impl Evaluation {
    /// Classify every sample and tally the outcomes.
    pub fn run(classifier: &dyn FigureClassifier, samples: &[LabeledSample]) -> Self {
        let mut confusion = BTreeMap::new();
        let mut misclassified = Vec::new();
        for (i, sample) in samples.iter().enumerate() {
            let predicted = classifier.classify(&sample.features).category;
            *confusion.entry((sample.expected, predicted)).or_insert(0) += 1;
            if predicted != sample.expected {
                misclassified.push(i);
            }
        }
        let eval = Self {
            total: samples.len(),
            correct: samples.len() - misclassified.len(),
            confusion,
            misclassified,
        };
        debug!(
            "Evaluated '{}': {}/{} correct",
            classifier.name(),
            eval.correct,
            eval.total
        );
        eval
    }

    /// Fraction of correct predictions (0 for an empty set)
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    /// Samples labeled `expected` that were predicted as `predicted`
    pub fn count(&self, expected: Category, predicted: Category) -> usize {
        self.confusion.get(&(expected, predicted)).copied().unwrap_or(0)
    }

    /// Share of samples labeled `category` that were recovered, if any exist
    pub fn recall(&self, category: Category) -> Option<f64> {
        let labeled: usize = Category::ALL.iter().map(|&p| self.count(category, p)).sum();
        (labeled > 0).then(|| self.count(category, category) as f64 / labeled as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RuleClassifier;
    use figclass_features::FeatureName;

    fn sample(pairs: &[(FeatureName, f64)], expected: Category) -> LabeledSample {
        LabeledSample::new(FeatureVector::from_pairs(pairs).unwrap(), expected)
    }

    #[test]
    fn test_confusion_counts() {
        let samples = vec![
            sample(&[(FeatureName::TextRatio, 0.6), (FeatureName::ColorDiversity, 0.03)], Category::TextBlock),
            sample(&[], Category::Unknown),
            // Labeled chart, but no rule accepts an empty vector
            sample(&[], Category::Chart),
        ];
        let eval = Evaluation::run(&RuleClassifier::default(), &samples);
        assert_eq!(eval.total, 3);
        assert_eq!(eval.correct, 2);
        assert_eq!(eval.misclassified, vec![2]);
        assert_eq!(eval.count(Category::Chart, Category::Unknown), 1);
        assert!((eval.accuracy() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(eval.recall(Category::Chart), Some(0.0));
        assert_eq!(eval.recall(Category::TextBlock), Some(1.0));
        assert_eq!(eval.recall(Category::Icon), None);
    }

    #[test]
    fn test_empty_set() {
        let eval = Evaluation::run(&RuleClassifier::default(), &[]);
        assert_eq!(eval.accuracy(), 0.0);
        assert!(eval.confusion.is_empty());
    }
}
