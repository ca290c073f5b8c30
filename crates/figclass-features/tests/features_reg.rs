//! Feature extraction regression test
//!
//! Extracts the full feature vector from synthetic figures and checks the
//! values that are fixed by construction: neutral values for solid fills,
//! exact mirror symmetry, color-aware asymmetry, glyph coverage of a text block, and the contour
//! scores of discs, rectangles and ruled tables.

use figclass_core::RasterImage;
use figclass_features::{
    DegenerateReason, ExtractOptions, FeatureName, FeatureVector, extract_features,
    extract_features_with_diagnostics,
};
use figclass_test::{RegParams, fixtures};
use std::f64::consts::{FRAC_PI_4, PI};

fn check_schema(rp: &mut RegParams, fv: &FeatureVector) {
    rp.compare_values(12.0, fv.iter().count() as f64, 0.0);
    for (name, value) in fv.iter() {
        rp.compare_flag(true, value.is_finite());
        if name.is_unit_interval() {
            rp.compare_range(0.0, 1.0, value);
        } else {
            rp.compare_flag(true, value > 0.0);
        }
    }
}

#[test]
fn features_reg() {
    let mut rp = RegParams::new("features");

    // --- Test 1: solid fills yield neutral values ---
    for &(w, h) in &[(1u32, 1u32), (64, 64), (200, 40)] {
        let img = fixtures::solid(w, h, fixtures::WHITE).expect("solid");
        let ex = extract_features_with_diagnostics(&img, &ExtractOptions::default())
            .expect("extract solid");
        let fv = ex.features;
        check_schema(&mut rp, &fv);
        rp.compare_values(0.0, fv.get(FeatureName::Contrast), 0.0);
        rp.compare_values(0.0, fv.get(FeatureName::EdgeDensity), 0.0);
        rp.compare_values(1.0, fv.get(FeatureName::Symmetry), 0.0);
        rp.compare_values(0.0, fv.get(FeatureName::CircleScore), 0.0);
        rp.compare_values(0.0, fv.get(FeatureName::RectScore), 0.0);
        rp.compare_values(0.0, fv.get(FeatureName::TextRatio), 0.0);
        rp.compare_values(0.0, fv.get(FeatureName::HueVariance), 0.0);
        rp.compare_values(1.0, fv.get(FeatureName::Brightness), 1e-9);
        rp.compare_values(w as f64 / h as f64, fv.get(FeatureName::AspectRatio), 1e-12);
        rp.compare_values(1.0 / (w * h) as f64, fv.get(FeatureName::ColorDiversity), 1e-12);
        let uniform = ex
            .warnings
            .iter()
            .filter(|w| w.reason == DegenerateReason::UniformImage)
            .count();
        rp.compare_values(7.0, uniform as f64, 0.0);
        eprintln!("  solid {}x{}: {} warnings", w, h, ex.warnings.len());
    }

    // --- Test 2: mirror symmetry ---
    let sym = fixtures::mirrored_pattern(61, 40).expect("mirrored");
    let fv = extract_features(&sym).expect("extract mirrored");
    check_schema(&mut rp, &fv);
    rp.compare_values(1.0, fv.get(FeatureName::Symmetry), 0.0);

    let ramp = fixtures::horizontal_gradient(64, 16).expect("gradient");
    let fv = extract_features(&ramp).expect("extract gradient");
    check_schema(&mut rp, &fv);
    // mean |2x - 63| / 63 over x = 0..64 is 32 / 63
    rp.compare_values(1.0 - 32.0 / 63.0, fv.get(FeatureName::Symmetry), 0.01);
    rp.compare_values(0.0, fv.get(FeatureName::SaturationMean), 0.0);
    rp.compare_values(0.0, fv.get(FeatureName::HueVariance), 0.0);
    eprintln!("  gradient symmetry: {:.4}", fv.get(FeatureName::Symmetry));

    // Equal luminance, different color: 0.114 * 38 == 0.299 * 11 + 0.587 + 0.114 * 4
    let split = RasterImage::from_fn(40, 40, |x, _| if x < 20 { [0, 0, 38] } else { [11, 1, 4] })
        .expect("split");
    let plane = split.to_luma();
    let mirrored_plane = split.mirrored_horizontal().to_luma();
    let luma_equal = plane
        .values()
        .iter()
        .zip(mirrored_plane.values())
        .all(|(a, b)| (a - b).abs() < 1e-12);
    rp.compare_flag(true, luma_equal);
    rp.compare_flag(false, split.mirrored_horizontal() == split);
    let fv = extract_features(&split).expect("extract split");
    check_schema(&mut rp, &fv);
    // (11 + 1 + 34) / (3 * 255) per pixel
    rp.compare_values(1.0 - 46.0 / 765.0, fv.get(FeatureName::Symmetry), 1e-9);
    rp.compare_flag(true, fv.get(FeatureName::Symmetry) < 1.0);
    eprintln!("  split symmetry: {:.4}", fv.get(FeatureName::Symmetry));

    // --- Test 3: text block ---
    let (tw, th) = (160, 100);
    let text = fixtures::text_block(tw, th).expect("text");
    let fv = extract_features(&text).expect("extract text");
    check_schema(&mut rp, &fv);
    let glyph_area = fixtures::text_block_glyph_count(tw, th) * fixtures::GLYPH_WIDTH * fixtures::GLYPH_HEIGHT;
    let expected = glyph_area as f64 / (tw * th) as f64;
    rp.compare_values(expected, fv.get(FeatureName::TextRatio), 1e-9);
    rp.compare_flag(true, fv.get(FeatureName::TextRatio) > 0.25);
    rp.compare_values(2.0 / (tw * th) as f64, fv.get(FeatureName::ColorDiversity), 1e-12);
    eprintln!("  text: {}", fv);

    // --- Test 4: disc ---
    let disc = fixtures::disc(100, 30.0).expect("disc");
    let fv = extract_features(&disc).expect("extract disc");
    check_schema(&mut rp, &fv);
    rp.compare_range(0.8, 1.0, fv.get(FeatureName::CircleScore));
    rp.compare_values(0.0, fv.get(FeatureName::RectScore), 0.0);
    rp.compare_values(0.0, fv.get(FeatureName::TextRatio), 0.0);
    rp.compare_range(0.01, 0.5, fv.get(FeatureName::EdgeDensity));
    rp.compare_values(1.0, fv.get(FeatureName::Symmetry), 1e-9);
    eprintln!("  disc: {}", fv);

    // --- Test 5: rectangles ---
    let rects = fixtures::rectangles(160, 120).expect("rectangles");
    let fv = extract_features(&rects).expect("extract rectangles");
    check_schema(&mut rp, &fv);
    rp.compare_values(1.0, fv.get(FeatureName::RectScore), 0.0);
    // Mean of 4 pi A / P^2 over the three outlines
    let circularity = |area: f64, perimeter: f64| 4.0 * PI * area / (perimeter * perimeter);
    let expected = (circularity(1521.0, 156.0) + circularity(1508.0, 162.0) + circularity(2291.0, 216.0)) / 3.0;
    rp.compare_values(expected, fv.get(FeatureName::CircleScore), 1e-9);
    rp.compare_range(0.7, 0.71, fv.get(FeatureName::CircleScore));
    eprintln!("  rectangles: {}", fv);

    // A lone square still scores pi / 4
    let square = RasterImage::from_fn(100, 100, |x, y| {
        if (30..70).contains(&x) && (30..70).contains(&y) {
            fixtures::BLACK
        } else {
            fixtures::WHITE
        }
    })
    .expect("square");
    let fv = extract_features(&square).expect("extract square");
    check_schema(&mut rp, &fv);
    rp.compare_values(FRAC_PI_4, fv.get(FeatureName::CircleScore), 1e-9);
    rp.compare_values(1.0, fv.get(FeatureName::RectScore), 0.0);
    rp.compare_values(1.0, fv.get(FeatureName::Symmetry), 0.0);

    // --- Test 6: ruled table ---
    let table = fixtures::table_grid(200, 200, 5, 5).expect("table");
    let fv = extract_features(&table).expect("extract table");
    check_schema(&mut rp, &fv);
    rp.compare_range(0.05, 0.3, fv.get(FeatureName::LineDensity));
    rp.compare_values(1.0, fv.get(FeatureName::RectScore), 0.0);
    rp.compare_values(0.0, fv.get(FeatureName::TextRatio), 0.0);
    rp.compare_range(0.0, 0.001, fv.get(FeatureName::ColorDiversity));
    rp.compare_values(FRAC_PI_4, fv.get(FeatureName::CircleScore), 1e-9);
    eprintln!("  table: {}", fv);

    // --- Test 7: bar chart ---
    let chart = fixtures::bar_chart(200, 150).expect("chart");
    let fv = extract_features(&chart).expect("extract chart");
    check_schema(&mut rp, &fv);
    rp.compare_range(0.7, 1.0, fv.get(FeatureName::RectScore));
    rp.compare_range(0.0, 0.999, fv.get(FeatureName::Symmetry));
    rp.compare_range(0.01, 1.0, fv.get(FeatureName::SaturationMean));
    eprintln!("  chart: {}", fv);

    // --- Test 8: continuous-tone photo ---
    let photo = fixtures::noise_photo(128, 128, 7).expect("photo");
    let fv = extract_features(&photo).expect("extract photo");
    check_schema(&mut rp, &fv);
    rp.compare_range(0.01, 1.0, fv.get(FeatureName::ColorDiversity));
    rp.compare_values(0.0, fv.get(FeatureName::EdgeDensity), 0.0);
    rp.compare_values(0.0, fv.get(FeatureName::LineDensity), 0.0);
    rp.compare_range(0.0, 0.999, fv.get(FeatureName::Symmetry));
    rp.compare_range(0.01, 1.0, fv.get(FeatureName::HueVariance));
    eprintln!("  photo: {}", fv);

    // --- Test 9: extraction is deterministic ---
    let again = extract_features(&photo).expect("extract photo again");
    rp.compare_flag(true, again == fv);

    assert!(rp.cleanup());
}
