//! Feature extraction
//!
//! Computes the twelve schema features from one [`RasterImage`]:
//!
//! | Feature | Computation |
//! |---|---|
//! | `aspect_ratio` | width / height |
//! | `brightness` | mean BT.601 luminance |
//! | `contrast` | 2 x luminance stddev (stddev of [0, 1] data is at most 0.5) |
//! | `edge_density` | Sobel edge pixels over all pixels |
//! | `color_diversity` | distinct 4-bit-per-channel colors over all pixels |
//! | `text_ratio` | glyph bounding-box area over all pixels |
//! | `line_density` | pixels on long straight edge runs over all pixels |
//! | `circle_score` | mean circularity of significant contours |
//! | `rect_score` | fraction of significant contours with four corners |
//! | `symmetry` | 1 - mean absolute RGB difference to the mirror image |
//! | `saturation_mean` | mean HSV saturation |
//! | `hue_variance` | circular hue variance over chromatic pixels |
//!
//! Contours and glyphs are taken from the minority class of an Otsu
//! binarization, which is the ink for typical figures on a light page.
//! A square contour scores pi / 4 on `circle_score`, a disc close to 1.

use crate::diagnostics::{DegenerateFeatureWarning, DegenerateReason, NeutralValue};
use crate::error::FeatureResult;
use crate::options::ExtractOptions;
use crate::schema::{FEATURE_COUNT, FeatureName, FeatureVector, SizeHint};
use crate::text::{minority_foreground, text_ratio};
use figclass_color::{color_content, compute_otsu_threshold, palette_diversity, rgb_to_hsv, threshold_to_mask};
use figclass_core::{LumaPlane, RGB_CHANNELS, RasterImage, color};
use figclass_filter::{detect_line_runs, edge_map, min_line_length};
use figclass_region::analyze_contours;
use tracing::{debug, warn};

/// Variance below this is treated as exactly zero
const VARIANCE_EPSILON: f64 = 1e-12;

/// A feature vector together with the diagnostics raised while computing it
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// The extracted features
    pub features: FeatureVector,
    /// Features that fell back to a neutral value
    pub warnings: Vec<DegenerateFeatureWarning>,
}

impl Extraction {
    /// Whether any feature was defaulted
    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Accumulates feature values and warnings during extraction
struct Builder {
    values: [f64; FEATURE_COUNT],
    warnings: Vec<DegenerateFeatureWarning>,
}

impl Builder {
    fn new() -> Self {
        Self {
            values: [0.0; FEATURE_COUNT],
            warnings: Vec::new(),
        }
    }

    fn set(&mut self, name: FeatureName, value: f64) {
        self.values[name.index()] = value;
    }

    fn neutral(&mut self, name: FeatureName, neutral: NeutralValue, reason: DegenerateReason) {
        self.values[name.index()] = neutral.value();
        self.warnings
            .push(DegenerateFeatureWarning::new(name, neutral, reason));
    }

    fn finish(self, image: &RasterImage) -> FeatureResult<Extraction> {
        let features = FeatureVector::from_values(self.values)?
            .with_size_hint(SizeHint::new(image.width(), image.height()));
        for w in &self.warnings {
            debug!("Degenerate feature: {}", w);
        }
        Ok(Extraction {
            features,
            warnings: self.warnings,
        })
    }
}

/// Extract features with default options.
///
/// # Example
///
/// ```
/// use figclass_core::RasterImage;
/// use figclass_features::{FeatureName, extract_features};
///
/// let img = RasterImage::filled(40, 20, [200, 200, 200]).unwrap();
/// let fv = extract_features(&img).unwrap();
/// assert_eq!(fv.get(FeatureName::AspectRatio), 2.0);
/// assert_eq!(fv.get(FeatureName::Contrast), 0.0);
/// assert_eq!(fv.get(FeatureName::Symmetry), 1.0);
/// ```
pub fn extract_features(image: &RasterImage) -> FeatureResult<FeatureVector> {
    extract_features_with_options(image, &ExtractOptions::default())
}

/// Extract features with explicit options.
pub fn extract_features_with_options(
    image: &RasterImage,
    options: &ExtractOptions,
) -> FeatureResult<FeatureVector> {
    Ok(extract_features_with_diagnostics(image, options)?.features)
}

/// Extract features and report every feature that fell back to a neutral value.
///
/// # Errors
///
/// Returns an error only for invalid options; a valid [`RasterImage`]
/// always yields a vector.
pub fn extract_features_with_diagnostics(
    image: &RasterImage,
    options: &ExtractOptions,
) -> FeatureResult<Extraction> {
    options.validate()?;

    let extraction = if image.is_uniform() {
        extract_uniform(image, options)?
    } else {
        extract_general(image, options)?
    };

    debug!(
        "Extracted features for {}x{} image: {}",
        image.width(),
        image.height(),
        extraction.features
    );
    Ok(extraction)
}

/// Solid fills: every spatial feature is defined by convention.
fn extract_uniform(image: &RasterImage, options: &ExtractOptions) -> FeatureResult<Extraction> {
    warn!(
        "Uniform {}x{} image, spatial features set to neutral values",
        image.width(),
        image.height()
    );
    let mut b = Builder::new();
    let [r, g, bl] = image.pixel(0, 0).unwrap_or_default();

    b.set(FeatureName::AspectRatio, image.aspect_ratio());
    b.set(FeatureName::Brightness, color::luma(r, g, bl));
    b.set(
        FeatureName::ColorDiversity,
        palette_diversity(image, options.palette_bits)?,
    );

    let uniform = DegenerateReason::UniformImage;
    b.neutral(FeatureName::Contrast, NeutralValue::Zero, uniform);
    b.neutral(FeatureName::EdgeDensity, NeutralValue::Zero, uniform);
    b.neutral(FeatureName::TextRatio, NeutralValue::Zero, uniform);
    b.neutral(FeatureName::LineDensity, NeutralValue::Zero, uniform);
    b.neutral(FeatureName::CircleScore, NeutralValue::Zero, uniform);
    b.neutral(FeatureName::RectScore, NeutralValue::Zero, uniform);
    b.neutral(FeatureName::Symmetry, NeutralValue::One, uniform);

    let hsv = rgb_to_hsv(r, g, bl);
    b.set(FeatureName::SaturationMean, hsv.s);
    if hsv.is_chromatic(options.min_chroma_saturation, options.min_chroma_value) {
        // A single hue has no spread
        b.set(FeatureName::HueVariance, 0.0);
    } else {
        b.neutral(
            FeatureName::HueVariance,
            NeutralValue::Zero,
            DegenerateReason::NoChromaticPixels,
        );
    }

    b.finish(image)
}

fn extract_general(image: &RasterImage, options: &ExtractOptions) -> FeatureResult<Extraction> {
    let mut b = Builder::new();
    let (w, h) = image.dimensions();
    let plane = image.to_luma();

    b.set(FeatureName::AspectRatio, image.aspect_ratio());
    b.set(FeatureName::Brightness, plane.mean().clamp(0.0, 1.0));
    b.set(FeatureName::Contrast, contrast(&plane));

    // Edges and straight runs
    let edges = edge_map(&plane, &options.edge_options())?;
    b.set(FeatureName::EdgeDensity, edges.density());
    let min_len = min_line_length(w, h, options.min_line_fraction, options.min_line_length);
    let lines = detect_line_runs(&edges.mask, min_len)?;
    b.set(FeatureName::LineDensity, lines.density());

    b.set(
        FeatureName::ColorDiversity,
        palette_diversity(image, options.palette_bits)?,
    );

    // Binarization drives text and contour features
    match compute_otsu_threshold(&plane) {
        Some(t) => {
            let foreground = minority_foreground(threshold_to_mask(&plane, t)?);

            match text_ratio(&plane, &foreground, options.text_background_max_std)? {
                (ratio, None) => b.set(FeatureName::TextRatio, ratio),
                (_, Some(reason)) => b.neutral(FeatureName::TextRatio, NeutralValue::Zero, reason),
            }

            let shapes = analyze_contours(&foreground, &options.contour_options(image.pixel_count()))?;
            if shapes.is_empty() {
                let reason = DegenerateReason::NoSignificantContours;
                b.neutral(FeatureName::CircleScore, NeutralValue::Zero, reason);
                b.neutral(FeatureName::RectScore, NeutralValue::Zero, reason);
            } else {
                let n = shapes.len() as f64;
                let circle: f64 = shapes.iter().map(|s| s.circularity).sum();
                let quads = shapes.iter().filter(|s| s.is_quadrilateral()).count();
                b.set(FeatureName::CircleScore, (circle / n).clamp(0.0, 1.0));
                b.set(FeatureName::RectScore, quads as f64 / n);
            }
        }
        None => {
            let reason = DegenerateReason::SingleGrayLevel;
            b.neutral(FeatureName::TextRatio, NeutralValue::Zero, reason);
            b.neutral(FeatureName::CircleScore, NeutralValue::Zero, reason);
            b.neutral(FeatureName::RectScore, NeutralValue::Zero, reason);
        }
    }

    b.set(FeatureName::Symmetry, symmetry(image));

    let stats = color_content(image, options.min_chroma_saturation, options.min_chroma_value);
    b.set(FeatureName::SaturationMean, stats.saturation_mean);
    match stats.hue_variance {
        Some(v) => b.set(FeatureName::HueVariance, v),
        None => b.neutral(
            FeatureName::HueVariance,
            NeutralValue::Zero,
            DegenerateReason::NoChromaticPixels,
        ),
    }

    b.finish(image)
}

/// Luminance stddev scaled to [0, 1].
pub fn contrast(plane: &LumaPlane) -> f64 {
    let std = plane.std_dev();
    if std * std < VARIANCE_EPSILON {
        return 0.0;
    }
    (2.0 * std).clamp(0.0, 1.0)
}

/// Similarity between an image and its left-right mirror.
///
/// `1 - mean |c(x, y) - c(w - 1 - x, y)| / 255` over all three channels;
/// exactly 1.0 for a mirror-symmetric image. Colors of equal luminance
/// still count as different.
pub fn symmetry(image: &RasterImage) -> f64 {
    let ch = RGB_CHANNELS as usize;
    let w = image.width() as usize;
    let bytes = image.as_bytes();
    let mut total: u64 = 0;
    for row in bytes.chunks_exact(w * ch) {
        for x in 0..w {
            let left = &row[x * ch..(x + 1) * ch];
            let right = &row[(w - 1 - x) * ch..(w - x) * ch];
            total += left
                .iter()
                .zip(right)
                .map(|(&a, &b)| u64::from(a.abs_diff(b)))
                .sum::<u64>();
        }
    }
    let max = 255.0 * bytes.len() as f64;
    (1.0 - total as f64 / max).clamp(0.0, 1.0)
}
