//! figclass-classify - Rule-based figure classification
//!
//! Maps a [`FeatureVector`](figclass_features::FeatureVector) to a
//! [`ClassificationResult`]: a [`Category`] from a closed taxonomy, a
//! confidence in [0, 1] and the identifier of the rule that fired.
//!
//! # Overview
//!
//! - [`RuleTable`]: ordered, serializable rules; the first match wins
//! - [`RuleClassifier`]: the default [`FigureClassifier`], driven by a table
//! - [`LinearModel`]: fitted per-category weights behind the same trait
//! - [`Pipeline`]: extraction plus classification, with isolated batches
//! - [`BatchSummary`], [`Evaluation`]: batch statistics and labeled accuracy
//!
//! # Example
//!
//! ```
//! use figclass_classify::{Category, FigureClassifier, RuleClassifier};
//! use figclass_features::{FeatureName, FeatureVector};
//!
//! let features = FeatureVector::from_pairs(&[
//!     (FeatureName::TextRatio, 0.6),
//!     (FeatureName::ColorDiversity, 0.03),
//! ])
//! .unwrap();
//! let result = RuleClassifier::with_default_rules().classify(&features);
//! assert_eq!(result.category, Category::TextBlock);
//! assert_eq!(result.matched_rule, "text_block");
//! ```

pub mod category;
pub mod classifier;
mod error;
pub mod evaluation;
pub mod model;
pub mod pipeline;
pub mod rules;
pub mod summary;

pub use error::{ClassifyError, ClassifyResult};

// Types
pub use category::Category;
pub use classifier::{ClassificationResult, FigureClassifier, RuleClassifier};
pub use evaluation::{Evaluation, LabeledSample};
pub use model::{ClassWeights, LINEAR_RULE_ID, LinearModel};
pub use pipeline::{FigureMeta, FigureReport, FigureSource, PageRect, Pipeline, PipelineOptions};
pub use rules::{DEFAULT_RULE_ID, MIN_SPAN, Predicate, Rule, RuleTable};
pub use summary::BatchSummary;
