//! Aggregate statistics over a classified batch

use crate::category::Category;
use crate::classifier::ClassificationResult;
use crate::pipeline::FigureReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of a batch of figure reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Figures in the batch
    pub total: usize,
    /// Figures that failed before classification
    pub failed: usize,
    /// Successful results per category
    pub distribution: BTreeMap<Category, usize>,
    /// Mean confidence over successful results (0 when there are none)
    pub average_confidence: f64,
}

impl BatchSummary {
    /// Summarize the reports of one batch.
    pub fn from_reports(reports: &[FigureReport]) -> Self {
        let mut summary = Self::from_results(reports.iter().filter_map(FigureReport::result));
        summary.total = reports.len();
        summary.failed = reports.iter().filter(|r| r.outcome.is_err()).count();
        summary
    }

    /// Summarize successful results only.
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ClassificationResult>) -> Self {
        let mut distribution = BTreeMap::new();
        let mut n = 0usize;
        let mut confidence = 0.0;
        for r in results {
            *distribution.entry(r.category).or_insert(0) += 1;
            confidence += r.confidence;
            n += 1;
        }
        Self {
            total: n,
            failed: 0,
            distribution,
            average_confidence: if n == 0 { 0.0 } else { confidence / n as f64 },
        }
    }

    /// Successfully classified figures
    pub fn classified(&self) -> usize {
        self.total - self.failed
    }

    /// Number of distinct categories among successful results
    pub fn distinct_categories(&self) -> usize {
        self.distribution.len()
    }

    /// Count for one category
    pub fn count(&self, category: Category) -> usize {
        self.distribution.get(&category).copied().unwrap_or(0)
    }

    /// Most frequent category; ties go to the earlier category in [`Category::ALL`]
    pub fn most_common(&self) -> Option<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.count(*c) > 0)
            .fold(None, |best: Option<Category>, c| match best {
                Some(b) if self.count(b) >= self.count(c) => Some(b),
                _ => Some(c),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifyError;
    use crate::pipeline::FigureMeta;
    use figclass_features::FeatureVector;

    fn result(category: Category, confidence: f64) -> ClassificationResult {
        ClassificationResult {
            category,
            confidence,
            matched_rule: category.key().to_string(),
            features: FeatureVector::from_pairs(&[]).unwrap(),
        }
    }

    fn meta(index: usize) -> FigureMeta {
        FigureMeta {
            index,
            page: 1,
            bbox: None,
            width: 10,
            height: 10,
        }
    }

    #[test]
    fn test_from_reports() {
        let reports = vec![
            FigureReport { meta: meta(0), outcome: Ok(result(Category::Chart, 0.8)) },
            FigureReport { meta: meta(1), outcome: Ok(result(Category::Chart, 0.4)) },
            FigureReport { meta: meta(2), outcome: Ok(result(Category::Table, 0.6)) },
            FigureReport {
                meta: meta(3),
                outcome: Err(ClassifyError::InvalidParameters("bad".to_string())),
            },
        ];
        let s = BatchSummary::from_reports(&reports);
        assert_eq!(s.total, 4);
        assert_eq!(s.failed, 1);
        assert_eq!(s.classified(), 3);
        assert_eq!(s.count(Category::Chart), 2);
        assert_eq!(s.count(Category::Icon), 0);
        assert_eq!(s.distinct_categories(), 2);
        assert_eq!(s.most_common(), Some(Category::Chart));
        assert!((s.average_confidence - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_empty_batch() {
        let s = BatchSummary::from_reports(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.average_confidence, 0.0);
        assert_eq!(s.most_common(), None);
    }

    #[test]
    fn test_serializes_category_keys() {
        let s = BatchSummary::from_results(&[result(Category::TextBlock, 1.0)]);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"text_block\":1"));
    }
}
