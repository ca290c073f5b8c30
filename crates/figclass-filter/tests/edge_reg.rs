//! Edge and line regression test
//!
//! Runs the Sobel edge map and the straight-run line detector over the
//! synthetic figures and checks the resulting pixel counts.

use figclass_core::RasterImage;
use figclass_filter::{
    DEFAULT_MIN_LINE_FRACTION, DEFAULT_MIN_LINE_LENGTH, EdgeOptions, detect_line_runs, edge_map,
    min_line_length, sobel_magnitude,
};
use figclass_test::{RegParams, fixtures};

struct Expected {
    name: &'static str,
    image: RasterImage,
    threshold: f64,
    edges: usize,
    lines: usize,
    runs: [usize; 4],
}

#[test]
fn edge_reg() {
    let mut rp = RegParams::new("edge");

    let cases = vec![
        Expected {
            name: "table",
            image: fixtures::table_grid(200, 200, 5, 5).expect("table"),
            threshold: 0.288965384,
            edges: 4200,
            lines: 4180,
            runs: [12, 12, 0, 0],
        },
        Expected {
            name: "rectangles",
            image: fixtures::rectangles(160, 120).expect("rectangles"),
            threshold: 0.170493396,
            edges: 1092,
            lines: 1092,
            runs: [12, 12, 0, 0],
        },
        Expected {
            name: "disc",
            image: fixtures::disc(100, 30.0).expect("disc"),
            threshold: 0.138737535,
            edges: 480,
            lines: 252,
            runs: [4, 4, 4, 4],
        },
        // Smooth ramps never clear the magnitude floor
        Expected {
            name: "photo",
            image: fixtures::noise_photo(128, 128, 7).expect("photo"),
            threshold: 0.08,
            edges: 0,
            lines: 0,
            runs: [0, 0, 0, 0],
        },
        Expected {
            name: "solid",
            image: fixtures::solid(40, 30, [90, 120, 200]).expect("solid"),
            threshold: 0.08,
            edges: 0,
            lines: 0,
            runs: [0, 0, 0, 0],
        },
    ];

    let options = EdgeOptions::default();
    for case in &cases {
        let (w, h) = case.image.dimensions();
        let plane = case.image.to_luma();
        let edges = edge_map(&plane, &options).expect("edge map");
        rp.compare_values(case.threshold, edges.threshold, 1e-6);
        rp.compare_values(case.edges as f64, edges.mask.count() as f64, 0.0);

        let min_len = min_line_length(w, h, DEFAULT_MIN_LINE_FRACTION, DEFAULT_MIN_LINE_LENGTH);
        let runs = detect_line_runs(&edges.mask, min_len).expect("line runs");
        rp.compare_values(case.lines as f64, runs.mask.count() as f64, 0.0);
        rp.compare_flag(true, runs.run_counts == case.runs);

        // Every line pixel is an edge pixel
        let subset = runs
            .mask
            .as_slice()
            .iter()
            .zip(edges.mask.as_slice())
            .all(|(&l, &e)| !l || e);
        rp.compare_flag(true, subset);

        eprintln!(
            "  {}: threshold={:.4} edges={} min_len={} lines={} runs={:?}",
            case.name,
            edges.threshold,
            edges.mask.count(),
            min_len,
            runs.mask.count(),
            runs.run_counts
        );
    }

    // Table line density as seen by feature extraction
    let table = &cases[0].image;
    let edges = edge_map(&table.to_luma(), &options).expect("edge map");
    let runs = detect_line_runs(&edges.mask, 20).expect("line runs");
    rp.compare_values(0.1045, runs.density(), 1e-12);
    rp.compare_values(24.0, runs.total_runs() as f64, 0.0);

    // Gradient magnitudes stay normalized
    let field = sobel_magnitude(&cases[1].image.to_luma());
    let in_range = field.values().iter().all(|&m| (0.0..=1.0).contains(&m));
    rp.compare_flag(true, in_range);

    // A stricter k keeps fewer edge pixels
    let loose = edge_map(&table.to_luma(), &EdgeOptions::new().with_k(0.0)).expect("loose");
    let strict = edge_map(&table.to_luma(), &EdgeOptions::new().with_k(3.0)).expect("strict");
    rp.compare_flag(true, strict.mask.count() <= loose.mask.count());

    let bad = edge_map(&table.to_luma(), &EdgeOptions::new().with_floor(1.5));
    rp.compare_flag(true, bad.is_err());

    assert!(rp.cleanup());
}
