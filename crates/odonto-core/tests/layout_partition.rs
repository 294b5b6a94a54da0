//! Integration tests: every tooth box is partitioned exactly by its five
//! region quads, across a range of surface sizes.

use odonto_core::*;

const SIZES: [(f32, f32); 5] = [
    (800.0, 600.0),
    (1000.0, 600.0),
    (320.0, 240.0),
    (1920.0, 1080.0),
    (400.0, 900.0),
];

#[test]
fn region_areas_sum_to_box_area() {
    for (w, h) in SIZES {
        let layout = compute_layout(w, h, &FDI_SEQUENCE);
        for tooth in layout.iter() {
            let total: f32 = tooth.regions.iter().map(Quad::area).sum();
            let expected = tooth.bounds.area();
            assert!(
                (total - expected).abs() <= expected * 1e-4 + 1e-3,
                "{} at {w}x{h}: regions {total}, box {expected}",
                tooth.tooth
            );
        }
    }
}

#[test]
fn interior_points_fall_in_exactly_one_region() {
    const STEPS: usize = 23;
    for (w, h) in SIZES {
        let layout = compute_layout(w, h, &FDI_SEQUENCE);
        for tooth in layout.iter() {
            let b = tooth.bounds;
            for i in 0..STEPS {
                for j in 0..STEPS {
                    let p = Point::new(
                        b.x1 + b.width() * (i as f32 + 0.41) / STEPS as f32,
                        b.y1 + b.height() * (j as f32 + 0.53) / STEPS as f32,
                    );
                    let hits = tooth.regions.iter().filter(|q| q.contains(p)).count();
                    assert_eq!(
                        hits, 1,
                        "{} at {w}x{h}: point ({}, {}) in {hits} regions",
                        tooth.tooth, p.x, p.y
                    );
                }
            }
        }
    }
}

/// Touching edges do not count.
fn overlaps(a: &Bounds, b: &Bounds) -> bool {
    a.x1 < b.x2 && a.x2 > b.x1 && a.y1 < b.y2 && a.y2 > b.y1
}

#[test]
fn boxes_never_overlap() {
    for (w, h) in SIZES {
        let layout = compute_layout(w, h, &FDI_SEQUENCE);
        let teeth: Vec<_> = layout.iter().collect();
        for (i, a) in teeth.iter().enumerate() {
            for b in &teeth[i + 1..] {
                assert!(
                    !overlaps(&a.bounds, &b.bounds),
                    "{} overlaps {} at {w}x{h}",
                    a.tooth,
                    b.tooth
                );
            }
        }
    }
}

#[test]
fn chart_fits_inside_the_surface() {
    for (w, h) in SIZES {
        let layout = compute_layout(w, h, &FDI_SEQUENCE);
        for tooth in layout.iter() {
            let b = tooth.bounds;
            assert!(b.x1 >= 0.0 && b.x2 <= w, "{} x out of {w}", tooth.tooth);
            assert!(b.y1 >= 0.0 && b.y2 <= h, "{} y out of {h}", tooth.tooth);
        }
    }
}
