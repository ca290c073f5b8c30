//! Deterministic synthetic figures
//!
//! Every fixture is a pure function of its arguments. Pseudo-random content
//! comes from [`SimpleRng`] with a fixed seed, so regression values are
//! stable across runs and platforms.

use crate::error::{TestError, TestResult};
use figclass_core::RasterImage;

/// White background
pub const WHITE: [u8; 3] = [255, 255, 255];
/// Black ink
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Bar colors used by [`bar_chart`]
pub const BAR_COLORS: [[u8; 3]; 4] = [
    [220, 60, 60],
    [60, 90, 200],
    [60, 170, 80],
    [240, 160, 40],
];

/// 5x7 glyph bitmaps (one row per byte, bit 4 = leftmost column)
const GLYPHS: [[u8; 7]; 6] = [
    // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
    // T
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
    // L
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
    // H
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
    // O
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
    // F
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
];

/// Glyph cell geometry for [`text_block`]
pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
const GLYPH_ADVANCE: u32 = 7;
const LINE_PITCH: u32 = 11;
const TEXT_MARGIN: u32 = 4;

/// Simple linear congruential generator for reproducible randomness
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a generator from a seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed as u64 }
    }

    /// Next raw 64-bit state
    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Uniform value in [0, 1]
    pub fn next_f64(&mut self) -> f64 {
        // High bits of an LCG are the well-distributed ones
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in [-amplitude, amplitude]
    pub fn next_offset(&mut self, amplitude: i32) -> i32 {
        let span = (2 * amplitude + 1) as f64;
        ((self.next_f64() * span) as i32).min(2 * amplitude) - amplitude
    }
}

fn build<F>(name: &str, width: u32, height: u32, f: F) -> TestResult<RasterImage>
where
    F: FnMut(u32, u32) -> [u8; 3],
{
    RasterImage::from_fn(width, height, f).map_err(|source| TestError::Fixture {
        name: name.to_string(),
        source,
    })
}

/// Single-color image
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> TestResult<RasterImage> {
    build("solid", width, height, |_, _| rgb)
}

/// Gray ramp from black (left) to white (right)
pub fn horizontal_gradient(width: u32, height: u32) -> TestResult<RasterImage> {
    let span = width.saturating_sub(1).max(1) as f64;
    build("horizontal_gradient", width, height, |x, _| {
        let v = (x as f64 / span * 255.0).round() as u8;
        [v, v, v]
    })
}

/// Colored pattern that is exactly symmetric about the vertical center line
pub fn mirrored_pattern(width: u32, height: u32) -> TestResult<RasterImage> {
    build("mirrored_pattern", width, height, |x, y| {
        let d = x.min(width - 1 - x);
        [
            ((d * 7 + y * 3) % 256) as u8,
            ((d * d + y) % 256) as u8,
            ((d * 13) % 256) as u8,
        ]
    })
}

/// Filled dark disc centered on a white square
pub fn disc(size: u32, radius: f64) -> TestResult<RasterImage> {
    let c = (size as f64 - 1.0) / 2.0;
    build("disc", size, size, |x, y| {
        let dx = x as f64 - c;
        let dy = y as f64 - c;
        if dx * dx + dy * dy <= radius * radius {
            [30, 30, 30]
        } else {
            WHITE
        }
    })
}

/// Three separated dark rectangles on white
pub fn rectangles(width: u32, height: u32) -> TestResult<RasterImage> {
    let boxes = [
        (width / 10, height / 10, width / 4, height / 3),
        (width / 2, height / 8, width / 3, height / 4),
        (width / 5, height / 2 + height / 10, width / 2, height / 4),
    ];
    build("rectangles", width, height, |x, y| {
        let inside = boxes
            .iter()
            .any(|&(bx, by, bw, bh)| x >= bx && x < bx + bw && y >= by && y < by + bh);
        if inside { [40, 40, 40] } else { WHITE }
    })
}

/// Ruled table: black 1-pixel grid lines with a white margin
pub fn table_grid(width: u32, height: u32, rows: u32, cols: u32) -> TestResult<RasterImage> {
    let margin = 10u32;
    let inner_w = width.saturating_sub(2 * margin + 1);
    let inner_h = height.saturating_sub(2 * margin + 1);
    let on_rule = |v: u32, inner: u32, n: u32| {
        if v < margin || v > margin + inner {
            return false;
        }
        (0..=n).any(|i| v == margin + i * inner / n.max(1))
    };
    build("table_grid", width, height, |x, y| {
        let in_x = x >= margin && x <= margin + inner_w;
        let in_y = y >= margin && y <= margin + inner_h;
        if (in_y && on_rule(x, inner_w, cols)) || (in_x && on_rule(y, inner_h, rows)) {
            BLACK
        } else {
            WHITE
        }
    })
}

/// Lines of small black glyphs on white, like a scanned paragraph
pub fn text_block(width: u32, height: u32) -> TestResult<RasterImage> {
    build("text_block", width, height, |x, y| {
        if x < TEXT_MARGIN || y < TEXT_MARGIN {
            return WHITE;
        }
        let (cx, cy) = (x - TEXT_MARGIN, y - TEXT_MARGIN);
        let (col, row) = (cx / GLYPH_ADVANCE, cy / LINE_PITCH);
        let (gx, gy) = (cx % GLYPH_ADVANCE, cy % LINE_PITCH);
        // Keep whole glyphs inside the right and bottom margins
        let fits_x = TEXT_MARGIN + (col + 1) * GLYPH_ADVANCE <= width - TEXT_MARGIN;
        let fits_y = TEXT_MARGIN + row * LINE_PITCH + GLYPH_HEIGHT <= height - TEXT_MARGIN;
        if !fits_x || !fits_y || gx >= GLYPH_WIDTH || gy >= GLYPH_HEIGHT {
            return WHITE;
        }
        let glyph = &GLYPHS[((row * 5 + col * 3) % GLYPHS.len() as u32) as usize];
        if glyph[gy as usize] & (1 << (GLYPH_WIDTH - 1 - gx)) != 0 {
            BLACK
        } else {
            WHITE
        }
    })
}

/// Number of glyphs drawn by [`text_block`] for the given size
pub fn text_block_glyph_count(width: u32, height: u32) -> u32 {
    let usable_w = width.saturating_sub(2 * TEXT_MARGIN);
    let usable_h = height.saturating_sub(2 * TEXT_MARGIN);
    let cols = usable_w / GLYPH_ADVANCE;
    let rows = if usable_h >= GLYPH_HEIGHT {
        (usable_h - GLYPH_HEIGHT) / LINE_PITCH + 1
    } else {
        0
    };
    cols * rows
}

/// Bar chart: black axes and four solid bars floating just above the x axis
pub fn bar_chart(width: u32, height: u32) -> TestResult<RasterImage> {
    let axis_x = width / 10;
    let axis_y = height - height / 10;
    let slot = (width - axis_x) / (BAR_COLORS.len() as u32 + 1);
    let bar_w = slot / 2;
    let heights = [60u32, 85, 40, 70];
    build("bar_chart", width, height, |x, y| {
        let on_axis = (x >= axis_x && x < axis_x + 2 && y >= height / 10 && y < axis_y + 2)
            || (y >= axis_y && y < axis_y + 2 && x >= axis_x && x < width - width / 20);
        if on_axis {
            return BLACK;
        }
        for (i, color) in BAR_COLORS.iter().enumerate() {
            let left = axis_x + slot / 2 + i as u32 * slot + 4;
            let top = axis_y - 3 - (axis_y - height / 5) * heights[i] / 100;
            if x >= left && x < left + bar_w && y >= top && y < axis_y - 3 {
                return *color;
            }
        }
        WHITE
    })
}

/// Continuous-tone image: smooth color ramps plus seeded blue-channel noise
pub fn noise_photo(width: u32, height: u32, seed: u32) -> TestResult<RasterImage> {
    let mut rng = SimpleRng::new(seed);
    let sx = width.saturating_sub(1).max(1) as f64;
    let sy = height.saturating_sub(1).max(1) as f64;
    build("noise_photo", width, height, |x, y| {
        let r = (x as f64 / sx * 255.0).round() as i32;
        let g = (y as f64 / sy * 255.0).round() as i32;
        let b = 60 + ((x + y) as f64 / (sx + sy) * 100.0).round() as i32 + rng.next_offset(8);
        [r as u8, g as u8, b.clamp(0, 255) as u8]
    })
}

/// Small two-color icon: a red disc on white
pub fn icon(size: u32) -> TestResult<RasterImage> {
    let c = (size as f64 - 1.0) / 2.0;
    let radius = size as f64 * 0.32;
    build("icon", size, size, |x, y| {
        let dx = x as f64 - c;
        let dy = y as f64 - c;
        if dx * dx + dy * dy <= radius * radius {
            [210, 40, 40]
        } else {
            WHITE
        }
    })
}
