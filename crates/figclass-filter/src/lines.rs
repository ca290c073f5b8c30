//! Straight-line detection over an edge map
//!
//! Lines are found as maximal runs of consecutive edge pixels along the four
//! principal directions (horizontal, vertical, both diagonals). A run counts
//! as a line when it is at least `min_length` pixels long. This is the run
//! length form of an opening with long linear structuring elements.

use crate::{FilterError, FilterResult};
use figclass_core::BinaryMask;

/// Default minimum run length in pixels
pub const DEFAULT_MIN_LINE_LENGTH: u32 = 12;

/// Default minimum run length as a fraction of the shorter image side
pub const DEFAULT_MIN_LINE_FRACTION: f64 = 0.1;

/// Scan direction for line runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineDirection {
    /// Left to right along rows
    Horizontal,
    /// Top to bottom along columns
    Vertical,
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl LineDirection {
    /// All scan directions
    pub const ALL: [LineDirection; 4] = [
        LineDirection::Horizontal,
        LineDirection::Vertical,
        LineDirection::Diagonal,
        LineDirection::AntiDiagonal,
    ];

    fn step(self) -> (i64, i64) {
        match self {
            LineDirection::Horizontal => (1, 0),
            LineDirection::Vertical => (0, 1),
            LineDirection::Diagonal => (1, 1),
            LineDirection::AntiDiagonal => (-1, 1),
        }
    }
}

/// Result of line detection
#[derive(Debug, Clone)]
pub struct LineRuns {
    /// Pixels lying on at least one accepted run
    pub mask: BinaryMask,
    /// Number of accepted runs per direction, indexed like [`LineDirection::ALL`]
    pub run_counts: [usize; 4],
}

impl LineRuns {
    /// Line pixels divided by all pixels
    pub fn density(&self) -> f64 {
        self.mask.coverage()
    }

    /// Total number of accepted runs
    pub fn total_runs(&self) -> usize {
        self.run_counts.iter().sum()
    }
}

/// Minimum run length for an image: `max(floor, fraction * shorter side)`.
pub fn min_line_length(width: u32, height: u32, fraction: f64, floor: u32) -> u32 {
    let side = width.min(height) as f64;
    ((side * fraction).round() as u32).max(floor)
}

/// Detect straight runs of edge pixels.
///
/// # Arguments
///
/// * `edges` - Binary edge map
/// * `min_length` - Minimum run length in pixels (>= 2)
pub fn detect_line_runs(edges: &BinaryMask, min_length: u32) -> FilterResult<LineRuns> {
    if min_length < 2 {
        return Err(FilterError::InvalidParameters(format!(
            "min_length must be at least 2, got {min_length}"
        )));
    }

    let (w, h) = (edges.width() as i64, edges.height() as i64);
    let mut lines = BinaryMask::new(edges.width(), edges.height())?;
    let mut run_counts = [0usize; 4];

    for (i, dir) in LineDirection::ALL.iter().enumerate() {
        let (dx, dy) = dir.step();
        for (sx, sy) in scan_starts(*dir, w, h) {
            let (mut x, mut y) = (sx, sy);
            let mut run_start: Option<(i64, i64)> = None;
            let mut run_len = 0u32;
            loop {
                let inside = x >= 0 && y >= 0 && x < w && y < h;
                if inside && edges.get(x, y) {
                    if run_start.is_none() {
                        run_start = Some((x, y));
                    }
                    run_len += 1;
                } else {
                    if let Some(start) = run_start.take() {
                        if run_len >= min_length {
                            mark_run(&mut lines, start, (dx, dy), run_len)?;
                            run_counts[i] += 1;
                        }
                    }
                    run_len = 0;
                }
                if !inside {
                    break;
                }
                x += dx;
                y += dy;
            }
        }
    }

    Ok(LineRuns {
        mask: lines,
        run_counts,
    })
}

/// Starting pixels of every scan line for a direction.
fn scan_starts(dir: LineDirection, w: i64, h: i64) -> Vec<(i64, i64)> {
    match dir {
        LineDirection::Horizontal => (0..h).map(|y| (0, y)).collect(),
        LineDirection::Vertical => (0..w).map(|x| (x, 0)).collect(),
        LineDirection::Diagonal => (0..w)
            .map(|x| (x, 0))
            .chain((1..h).map(|y| (0, y)))
            .collect(),
        LineDirection::AntiDiagonal => (0..w)
            .map(|x| (x, 0))
            .chain((1..h).map(|y| (w - 1, y)))
            .collect(),
    }
}

fn mark_run(
    lines: &mut BinaryMask,
    start: (i64, i64),
    step: (i64, i64),
    len: u32,
) -> FilterResult<()> {
    let (mut x, mut y) = start;
    for _ in 0..len {
        lines.set(x as u32, y as u32, true)?;
        x += step.0;
        y += step.1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_run() {
        let edges = BinaryMask::from_fn(30, 5, |x, y| y == 2 && x >= 5 && x < 25).unwrap();
        let runs = detect_line_runs(&edges, 10).unwrap();
        assert_eq!(runs.mask.count(), 20);
        assert_eq!(runs.run_counts, [1, 0, 0, 0]);
    }

    #[test]
    fn test_short_run_rejected() {
        let edges = BinaryMask::from_fn(30, 5, |x, y| y == 2 && x < 5).unwrap();
        let runs = detect_line_runs(&edges, 10).unwrap();
        assert_eq!(runs.mask.count(), 0);
        assert_eq!(runs.total_runs(), 0);
    }

    #[test]
    fn test_vertical_and_diagonal_runs() {
        let edges = BinaryMask::from_fn(20, 20, |x, y| x == 3 || x == y).unwrap();
        let runs = detect_line_runs(&edges, 15).unwrap();
        assert_eq!(runs.run_counts[1], 1);
        assert_eq!(runs.run_counts[2], 1);
        // Both lines share pixel (3, 3)
        assert_eq!(runs.mask.count(), 39);
    }

    #[test]
    fn test_anti_diagonal_run() {
        let edges = BinaryMask::from_fn(12, 12, |x, y| x + y == 11).unwrap();
        let runs = detect_line_runs(&edges, 12).unwrap();
        assert_eq!(runs.run_counts[3], 1);
        assert_eq!(runs.mask.count(), 12);
    }

    #[test]
    fn test_min_line_length() {
        assert_eq!(min_line_length(400, 300, 0.1, 12), 30);
        assert_eq!(min_line_length(50, 50, 0.1, 12), 12);
    }

    #[test]
    fn test_invalid_min_length() {
        let edges = BinaryMask::new(4, 4).unwrap();
        assert!(detect_line_runs(&edges, 1).is_err());
    }
}
