//! Declarative rule tables
//!
//! A [`RuleTable`] is an ordered list of [`Rule`]s. Each rule is a
//! conjunction of threshold [`Predicate`]s over named features and carries
//! one [`Category`]. The table is plain data: it serializes to JSON, can be
//! loaded from a calibrated file, and its order is the only tie-break
//! between rules that accept the same vector.
//!
//! # Margins
//!
//! A satisfied predicate reports how far the value lies past its threshold,
//! scaled by the predicate's span and clamped to [0, 1]:
//!
//! | Predicate | Satisfied when | Margin |
//! |---|---|---|
//! | `above` | `v > threshold` | `(v - threshold) / span` |
//! | `below` | `v < threshold` | `(threshold - v) / span` |
//! | `near` | `abs(v - target) < tolerance` | `1 - abs(v - target) / tolerance` |
//! | `max_side_at_most` | size hint present, `max_side <= limit` | `(limit - max_side) / limit` |
//!
//! A rule's confidence is the mean margin of its predicates.

use crate::category::Category;
use crate::error::{ClassifyError, ClassifyResult};
use figclass_features::{FeatureName, FeatureVector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Smallest span a constructor assigns by default
pub const MIN_SPAN: f64 = 0.01;

/// Identifier reported when no rule matched
pub const DEFAULT_RULE_ID: &str = "default";

/// One threshold test over a feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// `feature > threshold`
    Above {
        feature: FeatureName,
        threshold: f64,
        /// Distance past the threshold that counts as full confidence
        span: f64,
    },
    /// `feature < threshold`
    Below {
        feature: FeatureName,
        threshold: f64,
        span: f64,
    },
    /// `abs(feature - target) < tolerance`
    Near {
        feature: FeatureName,
        target: f64,
        tolerance: f64,
    },
    /// The figure's longer side is at most `limit` pixels
    MaxSideAtMost { limit: u32 },
}

impl Predicate {
    /// `feature > threshold`, full confidence at the top of the feature's range
    pub fn above(feature: FeatureName, threshold: f64) -> Self {
        let room = if feature.is_unit_interval() {
            1.0 - threshold
        } else {
            threshold
        };
        Predicate::Above {
            feature,
            threshold,
            span: room.max(MIN_SPAN),
        }
    }

    /// `feature < threshold`, full confidence at zero
    pub fn below(feature: FeatureName, threshold: f64) -> Self {
        Predicate::Below {
            feature,
            threshold,
            span: threshold.max(MIN_SPAN),
        }
    }

    /// `abs(feature - target) < tolerance`
    pub fn near(feature: FeatureName, target: f64, tolerance: f64) -> Self {
        Predicate::Near {
            feature,
            target,
            tolerance,
        }
    }

    /// Longer side of the figure at most `limit` pixels
    pub fn max_side_at_most(limit: u32) -> Self {
        Predicate::MaxSideAtMost { limit }
    }

    /// Replace the span of an `above` or `below` predicate.
    ///
    /// Other predicates are returned unchanged.
    pub fn with_span(self, span: f64) -> Self {
        match self {
            Predicate::Above {
                feature, threshold, ..
            } => Predicate::Above {
                feature,
                threshold,
                span,
            },
            Predicate::Below {
                feature, threshold, ..
            } => Predicate::Below {
                feature,
                threshold,
                span,
            },
            other => other,
        }
    }

    /// The feature this predicate reads, if any
    pub fn feature(&self) -> Option<FeatureName> {
        match *self {
            Predicate::Above { feature, .. }
            | Predicate::Below { feature, .. }
            | Predicate::Near { feature, .. } => Some(feature),
            Predicate::MaxSideAtMost { .. } => None,
        }
    }

    /// Normalized margin in [0, 1], or `None` if the predicate fails.
    pub fn margin(&self, features: &FeatureVector) -> Option<f64> {
        let m = match *self {
            Predicate::Above {
                feature,
                threshold,
                span,
            } => {
                let v = features.get(feature);
                if v <= threshold {
                    return None;
                }
                (v - threshold) / span
            }
            Predicate::Below {
                feature,
                threshold,
                span,
            } => {
                let v = features.get(feature);
                if v >= threshold {
                    return None;
                }
                (threshold - v) / span
            }
            Predicate::Near {
                feature,
                target,
                tolerance,
            } => {
                let d = (features.get(feature) - target).abs();
                if d >= tolerance {
                    return None;
                }
                1.0 - d / tolerance
            }
            Predicate::MaxSideAtMost { limit } => {
                let side = features.size_hint()?.max_side();
                if side > limit {
                    return None;
                }
                (limit - side) as f64 / limit.max(1) as f64
            }
        };
        Some(m.clamp(0.0, 1.0))
    }

    /// Whether the predicate holds
    pub fn is_satisfied(&self, features: &FeatureVector) -> bool {
        self.margin(features).is_some()
    }

    fn validate(&self) -> Result<(), String> {
        match *self {
            Predicate::Above {
                threshold, span, ..
            }
            | Predicate::Below {
                threshold, span, ..
            } => {
                if !threshold.is_finite() {
                    return Err(format!("{self}: threshold must be finite"));
                }
                if !(span > 0.0 && span.is_finite()) {
                    return Err(format!("{self}: span must be positive, got {span}"));
                }
            }
            Predicate::Near {
                target, tolerance, ..
            } => {
                if !target.is_finite() {
                    return Err(format!("{self}: target must be finite"));
                }
                if !(tolerance > 0.0 && tolerance.is_finite()) {
                    return Err(format!("{self}: tolerance must be positive, got {tolerance}"));
                }
            }
            Predicate::MaxSideAtMost { limit } => {
                if limit == 0 {
                    return Err("max_side_at_most: limit must be positive".to_string());
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Above {
                feature, threshold, ..
            } => write!(f, "{feature} > {threshold}"),
            Predicate::Below {
                feature, threshold, ..
            } => write!(f, "{feature} < {threshold}"),
            Predicate::Near {
                feature,
                target,
                tolerance,
            } => write!(f, "|{feature} - {target}| < {tolerance}"),
            Predicate::MaxSideAtMost { limit } => write!(f, "max_side <= {limit}"),
        }
    }
}

/// A conjunction of predicates that assigns one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Identifier reported as `matched_rule`
    pub id: String,
    /// Category assigned when every predicate holds
    pub category: Category,
    /// Predicates, all of which must hold
    pub predicates: Vec<Predicate>,
}

impl Rule {
    /// Create a new rule
    pub fn new(id: impl Into<String>, category: Category, predicates: Vec<Predicate>) -> Self {
        Self {
            id: id.into(),
            category,
            predicates,
        }
    }

    /// Confidence of this rule for `features`, or `None` if any predicate fails.
    ///
    /// Stops at the first failing predicate.
    pub fn evaluate(&self, features: &FeatureVector) -> Option<f64> {
        if self.predicates.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        for p in &self.predicates {
            sum += p.margin(features)?;
        }
        Some((sum / self.predicates.len() as f64).clamp(0.0, 1.0))
    }
}

/// Ordered rule list; the first matching rule wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

static DEFAULT_TABLE: LazyLock<RuleTable> = LazyLock::new(|| RuleTable {
    rules: default_rules(),
});

/// Built-in rules, most discriminative first.
///
/// `text_block` and `table` precede the generic rules because dense edges
/// alone fit several categories; `diagram` is the catch-all for edge-rich
/// flat figures nothing else claimed.
fn default_rules() -> Vec<Rule> {
    use FeatureName::*;
    vec![
        Rule::new(
            "text_block",
            Category::TextBlock,
            vec![
                Predicate::above(TextRatio, 0.25).with_span(0.35),
                Predicate::below(ColorDiversity, 0.06),
            ],
        ),
        Rule::new(
            "table",
            Category::Table,
            vec![
                Predicate::above(LineDensity, 0.05).with_span(0.25),
                Predicate::above(RectScore, 0.5).with_span(0.4),
                Predicate::below(ColorDiversity, 0.08),
                // Colored bars are charts even when ruled
                Predicate::below(SaturationMean, 0.08),
            ],
        ),
        Rule::new(
            "chart",
            Category::Chart,
            vec![
                Predicate::above(RectScore, 0.3).with_span(0.5),
                Predicate::above(ColorDiversity, 0.0001).with_span(0.01),
                Predicate::below(Symmetry, 0.9).with_span(0.3),
            ],
        ),
        Rule::new(
            "icon",
            Category::Icon,
            vec![
                Predicate::near(AspectRatio, 1.0, 0.35),
                Predicate::below(ColorDiversity, 0.05),
                Predicate::max_side_at_most(128),
                Predicate::above(EdgeDensity, 0.02).with_span(0.2),
            ],
        ),
        Rule::new(
            "photograph",
            Category::Photograph,
            vec![
                Predicate::above(ColorDiversity, 0.01).with_span(0.04),
                Predicate::below(EdgeDensity, 0.15),
                Predicate::below(CircleScore, 0.5),
                // Solid fills mirror exactly
                Predicate::below(Symmetry, 1.0),
            ],
        ),
        Rule::new(
            "diagram",
            Category::Diagram,
            vec![
                Predicate::above(EdgeDensity, 0.04).with_span(0.2),
                Predicate::below(ColorDiversity, 0.08),
            ],
        ),
    ]
}

impl RuleTable {
    /// Create a table from rules in priority order.
    pub fn new(rules: Vec<Rule>) -> ClassifyResult<Self> {
        let table = Self { rules };
        table.validate()?;
        Ok(table)
    }

    /// The built-in table, built once per process
    pub fn default_table() -> &'static RuleTable {
        &DEFAULT_TABLE
    }

    /// Parse and validate a table from JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use figclass_classify::RuleTable;
    ///
    /// let json = r#"{"rules": [{
    ///     "id": "flat_icon",
    ///     "category": "icon",
    ///     "predicates": [
    ///         {"op": "below", "feature": "color_diversity", "threshold": 0.05, "span": 0.05},
    ///         {"op": "max_side_at_most", "limit": 64}
    ///     ]
    /// }]}"#;
    /// let table = RuleTable::from_json(json).unwrap();
    /// assert_eq!(table.rules()[0].id, "flat_icon");
    /// ```
    pub fn from_json(json: &str) -> ClassifyResult<Self> {
        let table: RuleTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Serialize the table to pretty-printed JSON
    pub fn to_json(&self) -> ClassifyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by identifier
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// First rule accepting `features`, with its confidence
    pub fn first_match(&self, features: &FeatureVector) -> Option<(&Rule, f64)> {
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(features).map(|c| (rule, c)))
    }

    /// Check the table invariants.
    ///
    /// Rule ids must be non-empty, unique and distinct from
    /// [`DEFAULT_RULE_ID`]; every rule needs at least one predicate and may
    /// not assign [`Category::Unknown`]; spans and tolerances must be
    /// positive.
    pub fn validate(&self) -> ClassifyResult<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            let invalid = |msg: String| ClassifyError::InvalidRuleTable(format!("rule '{}': {msg}", rule.id));
            if rule.id.is_empty() || rule.id == DEFAULT_RULE_ID {
                return Err(invalid("reserved or empty identifier".to_string()));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(invalid("duplicate identifier".to_string()));
            }
            if rule.predicates.is_empty() {
                return Err(invalid("no predicates".to_string()));
            }
            if rule.category == Category::Unknown {
                return Err(invalid("category 'unknown' is reserved for unmatched figures".to_string()));
            }
            for p in &rule.predicates {
                p.validate().map_err(invalid)?;
            }
        }
        Ok(())
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::default_table().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figclass_features::SizeHint;

    fn fv(pairs: &[(FeatureName, f64)]) -> FeatureVector {
        FeatureVector::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_above_margin() {
        let p = Predicate::above(FeatureName::TextRatio, 0.2).with_span(0.4);
        assert_eq!(p.margin(&fv(&[(FeatureName::TextRatio, 0.2)])), None);
        let m = p.margin(&fv(&[(FeatureName::TextRatio, 0.3)])).unwrap();
        assert!((m - 0.25).abs() < 1e-12);
        assert_eq!(p.margin(&fv(&[(FeatureName::TextRatio, 0.9)])), Some(1.0));
    }

    #[test]
    fn test_below_default_span() {
        let p = Predicate::below(FeatureName::ColorDiversity, 0.08);
        let m = p.margin(&fv(&[(FeatureName::ColorDiversity, 0.02)])).unwrap();
        assert!((m - 0.75).abs() < 1e-12);
        assert_eq!(p.margin(&fv(&[(FeatureName::ColorDiversity, 0.08)])), None);
        // All-zero vector sits at full margin
        assert_eq!(p.margin(&fv(&[])), Some(1.0));
    }

    #[test]
    fn test_near_margin() {
        let p = Predicate::near(FeatureName::AspectRatio, 1.0, 0.5);
        assert_eq!(p.margin(&fv(&[(FeatureName::AspectRatio, 1.0)])), Some(1.0));
        let m = p.margin(&fv(&[(FeatureName::AspectRatio, 1.25)])).unwrap();
        assert!((m - 0.5).abs() < 1e-12);
        assert_eq!(p.margin(&fv(&[(FeatureName::AspectRatio, 2.0)])), None);
    }

    #[test]
    fn test_max_side_needs_size_hint() {
        let p = Predicate::max_side_at_most(100);
        let bare = fv(&[]);
        assert_eq!(p.margin(&bare), None);
        let small = bare.with_size_hint(SizeHint::new(25, 10));
        assert_eq!(p.margin(&small), Some(0.75));
        let large = bare.with_size_hint(SizeHint::new(40, 101));
        assert_eq!(p.margin(&large), None);
    }

    #[test]
    fn test_rule_confidence_is_mean_margin() {
        let rule = Rule::new(
            "r",
            Category::Chart,
            vec![
                Predicate::above(FeatureName::RectScore, 0.5).with_span(0.5),
                Predicate::below(FeatureName::Symmetry, 0.5),
            ],
        );
        let c = rule
            .evaluate(&fv(&[(FeatureName::RectScore, 0.75), (FeatureName::Symmetry, 0.0)]))
            .unwrap();
        assert!((c - 0.75).abs() < 1e-12);
        assert!(rule.evaluate(&fv(&[(FeatureName::Symmetry, 0.0)])).is_none());
    }

    #[test]
    fn test_default_table_order() {
        let ids: Vec<&str> = RuleTable::default_table()
            .rules()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["text_block", "table", "chart", "icon", "photograph", "diagram"]);
        assert!(RuleTable::default_table().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let ok = || Predicate::above(FeatureName::EdgeDensity, 0.1);
        let dup = vec![
            Rule::new("a", Category::Diagram, vec![ok()]),
            Rule::new("a", Category::Chart, vec![ok()]),
        ];
        assert!(RuleTable::new(dup).is_err());
        assert!(RuleTable::new(vec![Rule::new("a", Category::Diagram, vec![])]).is_err());
        assert!(RuleTable::new(vec![Rule::new("default", Category::Diagram, vec![ok()])]).is_err());
        assert!(RuleTable::new(vec![Rule::new("u", Category::Unknown, vec![ok()])]).is_err());
        let zero_span = Rule::new("z", Category::Diagram, vec![ok().with_span(0.0)]);
        assert!(RuleTable::new(vec![zero_span]).is_err());
        let zero_tol = Rule::new("t", Category::Icon, vec![Predicate::near(FeatureName::AspectRatio, 1.0, 0.0)]);
        assert!(RuleTable::new(vec![zero_tol]).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let table = RuleTable::default_table();
        let json = table.to_json().unwrap();
        assert!(json.contains("\"op\": \"max_side_at_most\""));
        let back = RuleTable::from_json(&json).unwrap();
        assert_eq!(&back, table);
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{"rules": [{"id": "x", "category": "chart", "predicates": []}]}"#;
        assert!(matches!(
            RuleTable::from_json(json),
            Err(ClassifyError::InvalidRuleTable(_))
        ));
        assert!(matches!(RuleTable::from_json("{"), Err(ClassifyError::Json(_))));
    }

    #[test]
    fn test_predicate_display() {
        let p = Predicate::above(FeatureName::LineDensity, 0.05);
        assert_eq!(p.to_string(), "line_density > 0.05");
        assert_eq!(Predicate::max_side_at_most(64).to_string(), "max_side <= 64");
    }
}
