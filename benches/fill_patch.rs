#![feature(test)]
extern crate test;

use fillpatch::geometry::{Geometry, GeometryConfig};
use fillpatch::index_box::IndexBox;
use fillpatch::layout::DisjointBoxLayout;
use fillpatch::level_data::{Components, LevelData};
use fillpatch::problem_domain::ProblemDomain;
use fillpatch::stencil::StencilGeometry;
use fillpatch::PiecewiseLinearFillPatch;

const NUM_BLOCKS: i64 = 8;
const BLOCK_SIZE: i64 = 16;
const RATIO: i64 = 2;
const RADIUS: i64 = 2;




/**
 * A coarse level tiled by NUM_BLOCKS x NUM_BLOCKS blocks, and a fine level
 * refining every block in the central half of it.
 */
fn levels() -> (DisjointBoxLayout<2>, DisjointBoxLayout<2>, ProblemDomain<2>) {
    let blocks = |range: std::ops::Range<i64>, size: i64| {
        let mut boxes = Vec::new();
        for i in range.clone() {
            for j in range.clone() {
                boxes.push(IndexBox::from_bounds([i * size, j * size], [(i + 1) * size - 1, (j + 1) * size - 1]))
            }
        }
        boxes
    };
    let n = NUM_BLOCKS * BLOCK_SIZE;
    let domain = ProblemDomain::new(IndexBox::from_bounds([0, 0], [n - 1, n - 1]), [true, true]);
    let coarse = DisjointBoxLayout::new(blocks(0..NUM_BLOCKS, BLOCK_SIZE)).unwrap().sorted();
    let fine = DisjointBoxLayout::new(blocks(NUM_BLOCKS / 2..3 * NUM_BLOCKS / 2, BLOCK_SIZE)).unwrap().sorted();
    (fine, coarse, domain)
}




// ============================================================================
#[bench]
fn stencil_construction(b: &mut test::Bencher) {
    let (fine, coarse, domain) = levels();
    let geometry = StencilGeometry {
        fine: &fine,
        coarse: &coarse,
        domain: &domain,
        ratio: RATIO,
        interp_radius: RADIUS,
    };
    b.iter(|| geometry.build_all(true));
}




// ============================================================================
#[bench]
fn fill_interp_cartesian(b: &mut test::Bencher) {
    let (fine, coarse, domain) = levels();
    let mut fill_patch = PiecewiseLinearFillPatch::new();
    fill_patch.define(&fine, &coarse, 5, &domain, RATIO, 0.01, RADIUS, false, &GeometryConfig::cartesian());

    let old = LevelData::from_function(&coarse, 5, 0, |c, s| s.iter_mut().for_each(|x| *x = c[0] as f64));
    let new = LevelData::from_function(&coarse, 5, 0, |c, s| s.iter_mut().for_each(|x| *x = c[1] as f64));
    let mut fine_data = LevelData::new(&fine, 5, RADIUS);

    b.iter(|| fill_patch.fill_interp(&mut fine_data, Some(&old), Some(&new), 0.5, Components::all(5)));
}




// ============================================================================
#[bench]
fn fill_interp_spherical(b: &mut test::Bencher) {
    let (fine, coarse, domain) = levels();
    let geometry = GeometryConfig::new(Geometry::Spherical, [1.0, 0.0, 0.0], 1.0);
    let mut fill_patch = PiecewiseLinearFillPatch::new();
    fill_patch.define(&fine, &coarse, 5, &domain, RATIO, 0.01, RADIUS, false, &geometry);

    let new = LevelData::from_function(&coarse, 5, 0, |c, s| s.iter_mut().for_each(|x| *x = 1.0 + c[0] as f64));
    let mut fine_data = LevelData::new(&fine, 5, RADIUS);

    b.iter(|| fill_patch.fill_interp(&mut fine_data, None, Some(&new), 1.0, Components::all(5)));
}
