//! Extraction plus classification over single figures and batches
//!
//! A [`Pipeline`] owns one [`FigureClassifier`] and the extraction options.
//! Batches are processed figure by figure with no shared mutable state:
//! each figure gets its own `Result` inside a [`FigureReport`], so an
//! invalid buffer fails only its own entry.
//!
//! With the `parallel` feature (default) batches run on the rayon thread
//! pool when [`PipelineOptions::parallel`] is set; results keep input
//! order either way.

use crate::classifier::{ClassificationResult, FigureClassifier, RuleClassifier};
use crate::error::{ClassifyError, ClassifyResult};
use figclass_core::RasterImage;
use figclass_features::{ExtractOptions, extract_features_with_diagnostics};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Options for a [`Pipeline`]
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Feature extraction options
    pub extract: ExtractOptions,
    /// Classify batches in parallel (default: true)
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            parallel: true,
        }
    }
}

impl PipelineOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction options
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Enable or disable parallel batch processing
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate options
    pub fn validate(&self) -> ClassifyResult<()> {
        self.extract.validate()?;
        Ok(())
    }
}

/// Position of a figure on its page, in page units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PageRect {
    /// Create a new page rectangle
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// A decoded figure as handed over by the extraction layer
#[derive(Debug, Clone)]
pub struct FigureSource {
    /// Page number (1-based)
    pub page: u32,
    /// Location on the page, when known
    pub bbox: Option<PageRect>,
    pub width: u32,
    pub height: u32,
    /// Channels per pixel; must be 3
    pub channels: u32,
    /// Interleaved pixel bytes
    pub data: Vec<u8>,
}

impl FigureSource {
    /// Create a figure from raw pixel data
    pub fn new(page: u32, width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        Self {
            page,
            bbox: None,
            width,
            height,
            channels,
            data,
        }
    }

    /// Create a figure from an already validated image
    pub fn from_image(page: u32, image: &RasterImage) -> Self {
        Self::new(
            page,
            image.width(),
            image.height(),
            image.channels(),
            image.as_bytes().to_vec(),
        )
    }

    /// Set the page bounding box
    pub fn with_bbox(mut self, bbox: PageRect) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Validate the buffer into a [`RasterImage`].
    pub fn to_image(&self) -> ClassifyResult<RasterImage> {
        Ok(RasterImage::new(
            self.width,
            self.height,
            self.channels,
            self.data.clone(),
        )?)
    }

    /// Metadata of this figure at position `index` in a batch
    pub fn meta(&self, index: usize) -> FigureMeta {
        FigureMeta {
            index,
            page: self.page,
            bbox: self.bbox,
            width: self.width,
            height: self.height,
        }
    }
}

/// Batch position and page metadata of a figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureMeta {
    /// Position in the input batch
    pub index: usize,
    pub page: u32,
    pub bbox: Option<PageRect>,
    pub width: u32,
    pub height: u32,
}

/// Per-figure outcome of a batch
#[derive(Debug)]
pub struct FigureReport {
    pub meta: FigureMeta,
    pub outcome: ClassifyResult<ClassificationResult>,
}

impl FigureReport {
    /// The classification, if the figure was valid
    pub fn result(&self) -> Option<&ClassificationResult> {
        self.outcome.as_ref().ok()
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&ClassifyError> {
        self.outcome.as_ref().err()
    }
}

/// Feature extraction followed by classification
pub struct Pipeline {
    classifier: Box<dyn FigureClassifier>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline around any classifier.
    pub fn new(classifier: impl FigureClassifier + 'static, options: PipelineOptions) -> ClassifyResult<Self> {
        options.validate()?;
        Ok(Self {
            classifier: Box::new(classifier),
            options,
        })
    }

    /// Pipeline with the built-in rule table and default options
    pub fn with_default_rules() -> Self {
        Self {
            classifier: Box::new(RuleClassifier::with_default_rules()),
            options: PipelineOptions::default(),
        }
    }

    /// The active classifier
    pub fn classifier(&self) -> &dyn FigureClassifier {
        self.classifier.as_ref()
    }

    /// The pipeline options
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Extract features from `image` and classify them.
    pub fn classify(&self, image: &RasterImage) -> ClassifyResult<ClassificationResult> {
        let extraction = extract_features_with_diagnostics(image, &self.options.extract)?;
        Ok(self.classifier.classify(&extraction.features))
    }

    /// Validate a raw figure buffer, then classify it.
    pub fn classify_source(&self, source: &FigureSource) -> ClassifyResult<ClassificationResult> {
        let image = source.to_image()?;
        self.classify(&image)
    }

    /// Classify every figure; one report per figure, in input order.
    pub fn classify_batch(&self, figures: &[FigureSource]) -> Vec<FigureReport> {
        self.classify_batch_with_progress(figures, |_, _| {})
    }

    /// Like [`classify_batch`](Self::classify_batch), calling
    /// `progress(done, total)` after each figure.
    ///
    /// In parallel mode the calls come from worker threads; every count in
    /// `1..=total` is reported exactly once, not necessarily in order.
    pub fn classify_batch_with_progress<F>(&self, figures: &[FigureSource], progress: F) -> Vec<FigureReport>
    where
        F: Fn(usize, usize) + Sync,
    {
        let total = figures.len();
        debug!(
            "Classifying batch of {} figures with '{}'",
            total,
            self.classifier.name()
        );
        let done = AtomicUsize::new(0);
        let process = |(index, source): (usize, &FigureSource)| {
            let report = self.report(index, source);
            progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);
            report
        };

        #[cfg(feature = "parallel")]
        {
            if self.options.parallel {
                use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
                return figures.par_iter().enumerate().map(&process).collect();
            }
        }

        figures.iter().enumerate().map(&process).collect()
    }

    fn report(&self, index: usize, source: &FigureSource) -> FigureReport {
        let outcome = self.classify_source(source);
        if let Err(e) = &outcome {
            warn!("Figure {} (page {}) failed: {}", index, source.page, e);
        }
        FigureReport {
            meta: source.meta(index),
            outcome,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
