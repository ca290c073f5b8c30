//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected components
//! in binary masks. It uses a Union-Find (disjoint set) data structure for
//! two-pass labeling.

use crate::error::RegionResult;
use figclass_core::{BinaryMask, PixelBox};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// A connected component in a mask
#[derive(Debug, Clone)]
pub struct ConnectedComponent {
    /// Unique label for this component (1-based)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: PixelBox,
    /// First pixel of the component in raster order (top-most, then left-most)
    pub seed: (u32, u32),
}

/// Per-pixel component labels; 0 is background.
#[derive(Debug, Clone)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
}

impl LabelMap {
    /// Get the width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Label at (x, y); coordinates outside the map read as background.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> u32 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0;
        }
        self.labels[y as usize * self.width as usize + x as usize]
    }

    /// Largest label in the map (= number of components)
    pub fn max_label(&self) -> u32 {
        self.labels.iter().copied().max().unwrap_or(0)
    }
}

/// Union-Find with path halving
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // Index 0 is the background label
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

/// Label all connected components in a binary mask
///
/// Labels are consecutive, starting at 1, in raster order of each
/// component's first pixel.
pub fn label_components(mask: &BinaryMask, connectivity: ConnectivityType) -> RegionResult<LabelMap> {
    let (w, h) = mask.dimensions();
    let mut provisional = vec![0u32; w as usize * h as usize];
    let mut uf = UnionFind::new();

    // Already visited neighbors: W, NW, N, NE
    let neighbors: &[(i64, i64)] = match connectivity {
        ConnectivityType::FourWay => &[(-1, 0), (0, -1)],
        ConnectivityType::EightWay => &[(-1, 0), (-1, -1), (0, -1), (1, -1)],
    };

    for y in 0..h as i64 {
        for x in 0..w as i64 {
            if !mask.get(x, y) {
                continue;
            }
            let mut current = 0u32;
            for &(dx, dy) in neighbors {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as i64 {
                    continue;
                }
                let n = provisional[ny as usize * w as usize + nx as usize];
                if n == 0 {
                    continue;
                }
                if current == 0 {
                    current = n;
                } else if current != n {
                    uf.union(current, n);
                }
            }
            if current == 0 {
                current = uf.make_set();
            }
            provisional[y as usize * w as usize + x as usize] = current;
        }
    }

    // Second pass: resolve roots and renumber in raster order
    let mut remap = vec![0u32; uf.parent.len()];
    let mut next_label = 0u32;
    for label in provisional.iter_mut() {
        if *label == 0 {
            continue;
        }
        let root = uf.find(*label);
        if remap[root as usize] == 0 {
            next_label += 1;
            remap[root as usize] = next_label;
        }
        *label = remap[root as usize];
    }

    Ok(LabelMap {
        width: w,
        height: h,
        labels: provisional,
    })
}

/// Collect per-component statistics from a label map.
pub fn components_from_labels(labels: &LabelMap) -> Vec<ConnectedComponent> {
    let n = labels.max_label() as usize;
    let mut comps: Vec<Option<ConnectedComponent>> = vec![None; n];

    for y in 0..labels.height {
        for x in 0..labels.width {
            let label = labels.labels[y as usize * labels.width as usize + x as usize];
            if label == 0 {
                continue;
            }
            let entry = comps[label as usize - 1].get_or_insert_with(|| ConnectedComponent {
                label,
                pixel_count: 0,
                bounds: PixelBox::default(),
                seed: (x, y),
            });
            entry.pixel_count += 1;
            entry.bounds.include_point(x as i32, y as i32);
        }
    }

    comps.into_iter().flatten().collect()
}

/// Find all connected components in a binary mask
///
/// Returns a vector of connected components, each with a label, pixel count,
/// bounding box and seed pixel, sorted by label.
pub fn find_connected_components(
    mask: &BinaryMask,
    connectivity: ConnectivityType,
) -> RegionResult<(LabelMap, Vec<ConnectedComponent>)> {
    let labels = label_components(mask, connectivity)?;
    let comps = components_from_labels(&labels);
    Ok((labels, comps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(width: u32, height: u32, pixels: &[(u32, u32)]) -> BinaryMask {
        let mut mask = BinaryMask::new(width, height).unwrap();
        for &(x, y) in pixels {
            mask.set(x, y, true).unwrap();
        }
        mask
    }

    #[test]
    fn test_count_components() {
        let mask = mask_from(10, 10, &[(0, 0), (1, 0), (5, 5), (6, 5), (8, 8)]);
        let (labels, comps) = find_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        assert_eq!(comps.len(), 3);
        assert_eq!(labels.max_label(), 3);
        assert_eq!(comps[0].pixel_count, 2);
        assert_eq!(comps[0].seed, (0, 0));
    }

    #[test]
    fn test_diagonal_connectivity() {
        let mask = mask_from(5, 5, &[(0, 0), (1, 1), (2, 2)]);
        let (_, four) = find_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        let (_, eight) = find_connected_components(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(four.len(), 3);
        assert_eq!(eight.len(), 1);
    }

    #[test]
    fn test_u_shape_merges() {
        // Two arms joined at the bottom need a union in the first pass
        let mask = mask_from(5, 3, &[(0, 0), (4, 0), (0, 1), (4, 1), (0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);
        let (_, comps) = find_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].pixel_count, 9);
        assert_eq!(comps[0].bounds, PixelBox::new(0, 0, 5, 3));
    }

    #[test]
    fn test_empty_mask() {
        let mask = BinaryMask::new(4, 4).unwrap();
        let (labels, comps) = find_connected_components(&mask, ConnectivityType::EightWay).unwrap();
        assert!(comps.is_empty());
        assert_eq!(labels.max_label(), 0);
    }
}
