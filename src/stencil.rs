use core::fmt;
use rayon::prelude::*;
use crate::cell_set::IndexCellSet;
use crate::index_box::IndexBox;
use crate::int_vect::IntVect;
use crate::layout::DisjointBoxLayout;
use crate::problem_domain::ProblemDomain;




/**
 * Partition of a patch's coarse interpolation cells according to which of
 * their two neighbors along one axis hold valid coarse data.
 *
 * - `centered`: both neighbors are covered
 * - `low`: the upper neighbor is missing, so the slope looks down
 * - `high`: the lower neighbor is missing, so the slope looks up
 * - `flat`: neither neighbor is covered; the slope there is zero
 */
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectionalStencil<const D: usize> {
    pub centered: IndexCellSet<D>,
    pub low: IndexCellSet<D>,
    pub high: IndexCellSet<D>,
    pub flat: IndexCellSet<D>,
}




/**
 * Interpolation metadata for one fine patch, derived purely from the
 * geometry of the fine and coarse layouts.
 */
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatchStencil<const D: usize> {

    /// Fine cells, in the patch's ghost region, receiving interpolated data
    pub fine_interp: IndexCellSet<D>,

    /// Coarse cells underlying `fine_interp`
    pub coarse_interp: IndexCellSet<D>,

    /// The coarse interpolation cells plus their immediate neighbors
    pub coarse_total: IndexCellSet<D>,

    /// Per-axis slope stencils; empty in piecewise-constant mode
    pub directions: Vec<DirectionalStencil<D>>,
}




/**
 * The level-wide inputs of stencil construction.
 */
#[derive(Clone, Copy, Debug)]
pub struct StencilGeometry<'a, const D: usize> {
    pub fine: &'a DisjointBoxLayout<D>,
    pub coarse: &'a DisjointBoxLayout<D>,
    pub domain: &'a ProblemDomain<D>,
    pub ratio: i64,
    pub interp_radius: i64,
}




// ============================================================================
impl<const D: usize> DirectionalStencil<D> {

    pub fn len(&self) -> usize {
        self.centered.len() + self.low.len() + self.high.len() + self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}




// ============================================================================
impl<'a, const D: usize> StencilGeometry<'a, D> {


    /**
     * Build the stencil of every fine patch. Patches are processed in
     * parallel; each result depends only on the global box geometry, so the
     * output is independent of the order in which patches are visited.
     */
    pub fn build_all(&self, slopes: bool) -> Vec<PatchStencil<D>> {
        (0..self.fine.len())
            .into_par_iter()
            .map(|n| self.build(n, slopes))
            .collect()
    }


    /**
     * Build the stencil for the fine patch with the given index. If `slopes`
     * is false only the interpolation cell sets are computed.
     */
    pub fn build(&self, patch: usize, slopes: bool) -> PatchStencil<D> {
        let fine_box = self.fine[patch];
        let ghost_box = self.domain.clip(&fine_box.grow(self.interp_radius).coarsen(self.ratio));
        let coarse_interp = self.coarse_interp(&fine_box, &ghost_box);

        let directions = if slopes {
            let coarse_boxes = self.with_images(self.coarse.iter(), &ghost_box);
            (0..D).map(|axis| classify(&coarse_interp, &coarse_boxes, axis)).collect()
        } else {
            Vec::new()
        };

        let fine_domain = self.domain.refine(self.ratio);
        let fine_region = fine_domain.clip(&fine_box.grow(self.interp_radius));
        let mut fine_interp = coarse_interp.refine(self.ratio);
        fine_interp.intersect_box(&fine_region);

        PatchStencil {
            fine_interp,
            coarse_total: coarse_interp.grow(1),
            coarse_interp,
            directions,
        }
    }


    /**
     * Return the coarse cells under the ghost region of `fine_box` that are
     * not covered by any coarsened fine patch (the patch's own included) or
     * by a periodic image of one.
     */
    fn coarse_interp(&self, fine_box: &IndexBox<D>, ghost_box: &IndexBox<D>) -> IndexCellSet<D> {
        let sorted = self.fine.is_sorted() && self.coarse.is_sorted();
        let near_periodic = self.domain.refine(self.ratio).is_near_periodic(fine_box, self.interp_radius);
        let prune = sorted && !near_periodic;
        let mut result = IndexCellSet::from_box(ghost_box);

        for fine_other in self.fine.iter() {
            let test_box = fine_other.coarsen(self.ratio);

            if prune && test_box.hi()[0] < ghost_box.lo()[0] {
                continue
            }
            if prune && test_box.lo()[0] > ghost_box.hi()[0] {
                break
            }
            for b in self.with_images(std::iter::once(&test_box), ghost_box) {
                result.subtract_box(&b)
            }
        }
        result
    }


    /**
     * Return the given boxes together with their periodic images, where
     * those are needed. Images are skipped for boxes (and ghost regions)
     * lying at least one cell away from every periodic boundary.
     */
    fn with_images<'b, I>(&self, boxes: I, ghost_box: &IndexBox<D>) -> Vec<IndexBox<D>>
    where
        I: IntoIterator<Item = &'b IndexBox<D>>
    {
        let test_box = self.domain.periodic_test_box();
        let shifts = self.domain.periodic_shifts();
        let ghost_inside = test_box.contains_box(ghost_box);
        let mut result = Vec::new();

        for b in boxes {
            result.push(*b);

            if self.domain.is_periodic() && !test_box.contains_box(b) && !ghost_inside {
                result.extend(shifts.iter().map(|&s| b.shift(s)))
            }
        }
        result
    }
}




/**
 * Classify the interpolation cells along one axis by shifting them onto
 * their neighbors and removing every neighbor covered by a coarse box.
 */
fn classify<const D: usize>(interp: &IndexCellSet<D>, coarse_boxes: &[IndexBox<D>], axis: usize) -> DirectionalStencil<D> {
    let e = IntVect::<D>::basis(axis);
    let mut upper = interp.shift(e);
    let mut lower = interp.shift(-e);

    for b in coarse_boxes {
        upper.subtract_box(b);
        lower.subtract_box(b);
    }

    let mut low = upper.shift(-e);
    let mut high = lower.shift(e);
    let mut flat = low.clone();
    flat.intersect(&high);
    low.subtract(&flat);
    high.subtract(&flat);

    let mut centered = interp.clone();
    centered.subtract(&low);
    centered.subtract(&high);
    centered.subtract(&flat);

    DirectionalStencil { centered, low, high, flat }
}




// ============================================================================
impl<const D: usize> fmt::Display for PatchStencil<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fine interp: {}", self.fine_interp)?;
        writeln!(f, "coarse interp: {}", self.coarse_interp)?;

        for (axis, d) in self.directions.iter().enumerate() {
            writeln!(f, "  [{}] centered: {}", axis, d.centered)?;
            writeln!(f, "  [{}] low: {}", axis, d.low)?;
            writeln!(f, "  [{}] high: {}", axis, d.high)?;
            writeln!(f, "  [{}] flat: {}", axis, d.flat)?;
        }
        Ok(())
    }
}
