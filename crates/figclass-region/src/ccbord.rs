//! Border tracing for connected components
//!
//! This module traces the outer border of a labeled component with the
//! 8-connected border-following algorithm and turns it into a chain code.
//! Components must be labeled with [`ConnectivityType::EightWay`] so that
//! every pixel reached by the tracer belongs to the component.
//!
//! [`ConnectivityType::EightWay`]: crate::ConnectivityType::EightWay

use crate::conncomp::{ConnectedComponent, LabelMap};
use crate::error::{RegionError, RegionResult};

/// Direction for border traversal (8-connected, clockwise from West)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// West (-1, 0)
    West = 0,
    /// Northwest (-1, -1)
    NorthWest = 1,
    /// North (0, -1)
    North = 2,
    /// Northeast (1, -1)
    NorthEast = 3,
    /// East (1, 0)
    East = 4,
    /// Southeast (1, 1)
    SouthEast = 5,
    /// South (0, 1)
    South = 6,
    /// Southwest (-1, 1)
    SouthWest = 7,
}

impl Direction {
    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> i32 {
        XPOSTAB[self as usize]
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> i32 {
        YPOSTAB[self as usize]
    }

    /// Whether a step in this direction is diagonal
    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.dx() != 0 && self.dy() != 0
    }

    /// Step length in pixels (1 or sqrt 2)
    #[inline]
    pub fn step_length(self) -> f64 {
        if self.is_diagonal() {
            std::f64::consts::SQRT_2
        } else {
            1.0
        }
    }

    /// Get direction from x,y offsets
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        if dx.abs() > 1 || dy.abs() > 1 || (dx == 0 && dy == 0) {
            return None;
        }
        let idx = DIRTAB[(1 + dy) as usize][(1 + dx) as usize];
        if idx < 0 {
            None
        } else {
            Some(Self::from_index(idx as usize))
        }
    }

    /// Create direction from index (0-7)
    #[inline]
    fn from_index(idx: usize) -> Self {
        match idx % 8 {
            0 => Direction::West,
            1 => Direction::NorthWest,
            2 => Direction::North,
            3 => Direction::NorthEast,
            4 => Direction::East,
            5 => Direction::SouthEast,
            6 => Direction::South,
            _ => Direction::SouthWest,
        }
    }
}

/// X offset for each direction
const XPOSTAB: [i32; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

/// Y offset for each direction
const YPOSTAB: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Direction lookup table: DIRTAB[1+dy][1+dx] gives direction index
const DIRTAB: [[i32; 3]; 3] = [[1, 2, 3], [0, -1, 4], [7, 6, 5]];

/// A point on a border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderPoint {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl BorderPoint {
    /// Create a new border point
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move in the given direction
    #[inline]
    pub fn moved(self, dir: Direction) -> Self {
        Self {
            x: self.x + dir.dx(),
            y: self.y + dir.dy(),
        }
    }
}

/// The closed outer border of one component
#[derive(Debug, Clone, Default)]
pub struct Border {
    /// Border pixels in clockwise traversal order; the last point connects
    /// back to the first
    pub points: Vec<BorderPoint>,
}

impl Border {
    /// Get the number of points in this border
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the border is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Length of the closed border path (axis steps 1, diagonal steps sqrt 2)
    pub fn perimeter(&self) -> f64 {
        chain_length(&to_chain_code(&self.points))
    }

    /// Area enclosed by the border path (shoelace formula over pixel centers)
    pub fn enclosed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i64 = (0..n)
            .map(|i| {
                let p = self.points[i];
                let q = self.points[(i + 1) % n];
                p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64
            })
            .sum();
        twice.abs() as f64 / 2.0
    }
}

/// Find the next border pixel clockwise around `p`, starting after the
/// background neighbor at direction index `qpos`.
///
/// Returns the new pixel and the direction (from the new pixel) of the last
/// background neighbor examined.
fn next_border_pixel(
    labels: &LabelMap,
    label: u32,
    p: BorderPoint,
    qpos: usize,
) -> Option<(BorderPoint, usize)> {
    for i in 1..8 {
        let pos = (qpos + i) % 8;
        let n = p.moved(Direction::from_index(pos));
        if labels.get(n.x as i64, n.y as i64) == label {
            let prev = p.moved(Direction::from_index((pos + 7) % 8));
            let back = Direction::from_offset(prev.x - n.x, prev.y - n.y)?;
            return Some((n, back as usize));
        }
    }
    None
}

/// Trace the outer border of a component.
///
/// Tracing starts at the component's seed (its first pixel in raster order)
/// and stops when the first move would be repeated.
pub fn trace_outer_border(labels: &LabelMap, component: &ConnectedComponent) -> RegionResult<Border> {
    let label = component.label;
    let first = BorderPoint::new(component.seed.0 as i32, component.seed.1 as i32);
    if labels.get(first.x as i64, first.y as i64) != label {
        return Err(RegionError::TraceFailed {
            label,
            reason: "seed pixel does not carry the component label".to_string(),
        });
    }

    // The west neighbor of the raster-order seed is never in the component
    let Some((second, q1)) = next_border_pixel(labels, label, first, Direction::West as usize)
    else {
        return Ok(Border {
            points: vec![first],
        });
    };

    let max_steps = 4 * component.pixel_count as usize + 8;
    let mut points = vec![first];
    let (mut cur, mut q) = (second, q1);
    for _ in 0..max_steps {
        let Some((next, nq)) = next_border_pixel(labels, label, cur, q) else {
            return Err(RegionError::TraceFailed {
                label,
                reason: "border pixel without foreground neighbor".to_string(),
            });
        };
        if cur == first && next == second {
            return Ok(Border { points });
        }
        points.push(cur);
        cur = next;
        q = nq;
    }

    Err(RegionError::TraceFailed {
        label,
        reason: format!("border did not close within {max_steps} steps"),
    })
}

/// Convert a closed sequence of border points to a chain code.
///
/// The final step from the last point back to the first is included.
/// Repeated points are skipped.
pub fn to_chain_code(points: &[BorderPoint]) -> Vec<Direction> {
    if points.len() < 2 {
        return Vec::new();
    }
    let n = points.len();
    (0..n)
        .filter_map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            Direction::from_offset(q.x - p.x, q.y - p.y)
        })
        .collect()
}

/// Length of a chain code path (axis steps 1, diagonal steps sqrt 2).
pub fn chain_length(chain: &[Direction]) -> f64 {
    chain.iter().map(|d| d.step_length()).sum()
}
