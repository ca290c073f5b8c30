//! Contour shape descriptors
//!
//! - [`circularity`]: `4 * pi * area / perimeter^2`, 1.0 for a disc
//! - [`approximate_polygon`]: Douglas-Peucker simplification of a closed border
//! - [`analyze_contours`]: outer borders of significant components with their
//!   circularity and polygon vertex count

use crate::ccbord::{Border, BorderPoint, trace_outer_border};
use crate::conncomp::{ConnectivityType, find_connected_components};
use crate::error::{RegionError, RegionResult};
use figclass_core::{BinaryMask, PixelBox};

/// Polygons with at least this many vertices are treated as curved outlines
pub const CURVED_MIN_VERTICES: usize = 6;

/// Options for contour extraction
#[derive(Debug, Clone)]
pub struct ContourOptions {
    /// Minimum component size in pixels (default: 24)
    pub min_area: u32,
    /// Polygon tolerance as a fraction of the contour perimeter (default: 0.02)
    pub epsilon_fraction: f64,
    /// Lower bound of the polygon tolerance in pixels (default: 1.0)
    pub min_epsilon: f64,
    /// Skip components clipped by the image border (default: true)
    pub skip_border_touching: bool,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            min_area: 24,
            epsilon_fraction: 0.02,
            min_epsilon: 1.0,
            skip_border_touching: true,
        }
    }
}

impl ContourOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum component size
    pub fn with_min_area(mut self, min_area: u32) -> Self {
        self.min_area = min_area;
        self
    }

    /// Set the polygon tolerance fraction
    pub fn with_epsilon_fraction(mut self, fraction: f64) -> Self {
        self.epsilon_fraction = fraction;
        self
    }

    /// Keep or skip components that touch the image border
    pub fn with_skip_border_touching(mut self, skip: bool) -> Self {
        self.skip_border_touching = skip;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RegionResult<()> {
        if !(self.epsilon_fraction > 0.0 && self.epsilon_fraction < 0.5) {
            return Err(RegionError::InvalidParameters(
                "epsilon_fraction must be in (0, 0.5)".to_string(),
            ));
        }
        if !(self.min_epsilon >= 0.0 && self.min_epsilon.is_finite()) {
            return Err(RegionError::InvalidParameters(
                "min_epsilon must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shape description of one contour
#[derive(Debug, Clone)]
pub struct ContourShape {
    /// Bounding box of the component
    pub bounds: PixelBox,
    /// Component size in pixels
    pub pixel_count: u32,
    /// Border path length
    pub perimeter: f64,
    /// Area enclosed by the border path
    pub area: f64,
    /// `4 * pi * area / perimeter^2`, clamped to [0, 1]
    pub circularity: f64,
    /// Vertex count of the simplified polygon
    pub vertex_count: usize,
}

impl ContourShape {
    /// Four-corner outline (axis-aligned or rotated rectangle)
    pub fn is_quadrilateral(&self) -> bool {
        self.vertex_count == 4
    }

    /// Outline too smooth to be a low-order polygon
    pub fn is_curved(&self) -> bool {
        self.vertex_count >= CURVED_MIN_VERTICES
    }
}

/// Circularity `4 * pi * area / perimeter^2`, clamped to [0, 1].
///
/// Returns 0.0 for a degenerate (zero-length) perimeter.
pub fn circularity(area: f64, perimeter: f64) -> f64 {
    if perimeter <= 0.0 || area <= 0.0 {
        return 0.0;
    }
    (4.0 * std::f64::consts::PI * area / (perimeter * perimeter)).clamp(0.0, 1.0)
}

/// Simplify a closed border with the Douglas-Peucker algorithm.
///
/// The border is split at its first point and the point farthest from it;
/// each half is simplified as an open polyline and the halves are joined.
/// The returned polygon is implicitly closed.
pub fn approximate_polygon(points: &[BorderPoint], epsilon: f64) -> Vec<BorderPoint> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let origin = points[0];
    let far = (1..n)
        .max_by(|&a, &b| {
            dist2(origin, points[a])
                .partial_cmp(&dist2(origin, points[b]))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(n / 2);

    let mut first_half = simplify_open(&points[..=far], epsilon);
    let mut closing: Vec<BorderPoint> = points[far..].to_vec();
    closing.push(origin);
    let second_half = simplify_open(&closing, epsilon);

    // Drop the shared endpoints of the second half
    if second_half.len() > 2 {
        first_half.extend_from_slice(&second_half[1..second_half.len() - 1]);
    }
    first_half
}

fn simplify_open(points: &[BorderPoint], epsilon: f64) -> Vec<BorderPoint> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0usize, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (mut best, mut best_d) = (start, -1.0f64);
        for i in start + 1..end {
            let d = segment_distance(points[i], points[start], points[end]);
            if d > best_d {
                best = i;
                best_d = d;
            }
        }
        if best_d > epsilon {
            keep[best] = true;
            stack.push((start, best));
            stack.push((best, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

fn dist2(a: BorderPoint, b: BorderPoint) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    dx * dx + dy * dy
}

/// Perpendicular distance from `p` to the line through `a` and `b`.
fn segment_distance(p: BorderPoint, a: BorderPoint, b: BorderPoint) -> f64 {
    let len2 = dist2(a, b);
    if len2 == 0.0 {
        return dist2(p, a).sqrt();
    }
    let cross = (b.x - a.x) as f64 * (a.y - p.y) as f64 - (a.x - p.x) as f64 * (b.y - a.y) as f64;
    cross.abs() / len2.sqrt()
}

/// Describe a traced border.
pub fn describe_border(border: &Border, bounds: PixelBox, pixel_count: u32, options: &ContourOptions) -> ContourShape {
    let perimeter = border.perimeter();
    let area = border.enclosed_area();
    let epsilon = (perimeter * options.epsilon_fraction).max(options.min_epsilon);
    let polygon = approximate_polygon(&border.points, epsilon);
    ContourShape {
        bounds,
        pixel_count,
        perimeter,
        area,
        circularity: circularity(area, perimeter),
        vertex_count: polygon.len(),
    }
}

/// Extract the outer contours of all significant foreground components.
pub fn analyze_contours(mask: &BinaryMask, options: &ContourOptions) -> RegionResult<Vec<ContourShape>> {
    options.validate()?;
    let (labels, comps) = find_connected_components(mask, ConnectivityType::EightWay)?;
    let (w, h) = mask.dimensions();

    let mut shapes = Vec::new();
    for comp in &comps {
        if comp.pixel_count < options.min_area {
            continue;
        }
        if options.skip_border_touching && comp.bounds.touches_image_border(w, h) {
            continue;
        }
        let border = trace_outer_border(&labels, comp)?;
        shapes.push(describe_border(&border, comp.bounds, comp.pixel_count, options));
    }
    Ok(shapes)
}
