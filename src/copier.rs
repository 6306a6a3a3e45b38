use rayon::prelude::*;
use crate::index_box::IndexBox;
use crate::int_vect::IntVect;
use crate::layout::DisjointBoxLayout;
use crate::level_data::{Components, LevelData};
use crate::problem_domain::ProblemDomain;




/// A trait for an object that moves field data between two levels with
/// different layouts. The copier is built once for a pair of layouts and a
/// ghost width, and then reused for every copy.
///
/// Implementations must replicate each source cell's value into every
/// destination cell, within the destination patch grown by the ghost width,
/// which has the same global index (after identification of periodic images).
/// Destination cells not covered by any source patch are left untouched.
///
pub trait RegionCopier<const D: usize> {
    /// Copy the component block `comps` from `source` to `dest`.
    ///
    fn copy_to(&self, source: &LevelData<D>, dest: &mut LevelData<D>, comps: Components);
}




/// One contiguous piece of data motion: the cells of `region` in the
/// destination patch `dest` are read from the source patch `source` at
/// `region - shift`.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotionItem<const D: usize> {
    pub source: usize,
    pub region: IndexBox<D>,
    pub shift: IntVect<D>,
}




/// An in-process `RegionCopier`. All patches of both layouts are assumed to
/// live in this address space. The motion plan is grouped by destination
/// patch, so destinations can be filled in parallel.
///
#[derive(Clone, Debug, Default)]
pub struct LocalCopier<const D: usize> {
    plan: Vec<Vec<MotionItem<D>>>,
}




// ============================================================================
impl<const D: usize> LocalCopier<D> {

    /// Build the motion plan from `source` patches to `dest` patches grown by
    /// `ghost` cells.
    ///
    pub fn new(
        source: &DisjointBoxLayout<D>,
        dest: &DisjointBoxLayout<D>,
        domain: &ProblemDomain<D>,
        ghost: i64,
    ) -> Self {
        let shifts: Vec<_> = std::iter::once(IntVect::zero())
            .chain(domain.periodic_shifts())
            .collect();

        let plan = dest
            .iter()
            .map(|d| {
                let grown = d.grow(ghost);
                let mut items = Vec::new();

                for (n, s) in source.iter().enumerate() {
                    for &shift in &shifts {
                        if let Some(region) = s.shift(shift).intersection(&grown) {
                            items.push(MotionItem { source: n, region, shift })
                        }
                    }
                }
                items
            })
            .collect();

        Self { plan }
    }
}

impl<const D: usize> RegionCopier<D> for LocalCopier<D> {
    fn copy_to(&self, source: &LevelData<D>, dest: &mut LevelData<D>, comps: Components) {
        assert_eq!(
            self.plan.len(),
            dest.len(),
            "copier was built for a different destination layout");

        dest.arrays_mut()
            .par_iter_mut()
            .zip(self.plan.par_iter())
            .for_each(|(array, items)| {
                for item in items {
                    array.copy_from(&source[item.source], &item.region, item.shift, comps)
                }
            });
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::index_box::IndexBox;
    use crate::int_vect::IntVect;
    use crate::layout::DisjointBoxLayout;
    use crate::level_data::{Components, LevelData};
    use crate::problem_domain::ProblemDomain;
    use super::{LocalCopier, RegionCopier};

    #[test]
    fn copier_fills_ghost_cells_through_periodic_images() {
        let domain = ProblemDomain::new(IndexBox::from_bounds([0], [15]), [true]);
        let source = DisjointBoxLayout::new(vec![
            IndexBox::from_bounds([0], [7]),
            IndexBox::from_bounds([8], [15]),
        ]).unwrap();
        let dest = DisjointBoxLayout::new(vec![IndexBox::from_bounds([0], [3])]).unwrap();

        let src_data = LevelData::from_function(&source, 1, 0, |c, s| s[0] = c[0] as f64);
        let mut dst_data = LevelData::new(&dest, 1, 2);

        let copier = LocalCopier::new(&source, &dest, &domain, 2);
        copier.copy_to(&src_data, &mut dst_data, Components::all(1));

        assert_eq!(dst_data[0].get(&IntVect([-2]), 0), 14.0);
        assert_eq!(dst_data[0].get(&IntVect([-1]), 0), 15.0);
        assert_eq!(dst_data[0].get(&IntVect([0]), 0), 0.0);
        assert_eq!(dst_data[0].get(&IntVect([5]), 0), 5.0);
    }

    #[test]
    fn uncovered_destination_cells_are_untouched() {
        let domain: ProblemDomain<1> = IndexBox::from_bounds([0], [15]).into();
        let source = DisjointBoxLayout::new(vec![IndexBox::from_bounds([0], [7])]).unwrap();
        let dest = DisjointBoxLayout::new(vec![IndexBox::from_bounds([6], [9])]).unwrap();

        let src_data = LevelData::from_function(&source, 1, 0, |_, s| s[0] = 1.0);
        let mut dst_data = LevelData::new(&dest, 1, 1);
        dst_data[0].fill(-1.0);

        LocalCopier::new(&source, &dest, &domain, 1).copy_to(&src_data, &mut dst_data, Components::all(1));

        assert_eq!(dst_data[0].get(&IntVect([7]), 0), 1.0);
        assert_eq!(dst_data[0].get(&IntVect([8]), 0), -1.0);
    }
}
