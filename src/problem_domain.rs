use crate::index_box::IndexBox;
use crate::int_vect::IntVect;




/**
 * The global index range of one refinement level, together with a
 * periodicity flag for each axis. Along a periodic axis, cells outside the
 * domain box are identified with their images shifted by whole periods.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProblemDomain<const D: usize> {
    domain_box: IndexBox<D>,
    periodic: [bool; D],
}




// ============================================================================
impl<const D: usize> ProblemDomain<D> {

    pub fn new(domain_box: IndexBox<D>, periodic: [bool; D]) -> Self {
        assert!(!domain_box.is_empty(), "problem domain box is empty");
        Self { domain_box, periodic }
    }

    pub fn domain_box(&self) -> IndexBox<D> {
        self.domain_box
    }


    /**
     * Determine whether any axis is periodic.
     */
    pub fn is_periodic(&self) -> bool {
        self.periodic.iter().any(|&p| p)
    }


    /**
     * Return the period (the domain extent) on each axis.
     */
    pub fn period(&self) -> IntVect<D> {
        self.domain_box.size()
    }

    pub fn refine(&self, ratio: i64) -> Self {
        Self::new(self.domain_box.refine(ratio), self.periodic)
    }

    pub fn coarsen(&self, ratio: i64) -> Self {
        Self::new(self.domain_box.coarsen(ratio), self.periodic)
    }


    /**
     * Intersect a box with this domain. Only the non-periodic axes are
     * clipped; along periodic axes the box is returned unchanged, since cells
     * there have valid periodic images.
     */
    pub fn clip(&self, b: &IndexBox<D>) -> IndexBox<D> {
        let mut lo = b.lo();
        let mut hi = b.hi();

        for axis in 0..D {
            if !self.periodic[axis] {
                lo[axis] = lo[axis].max(self.domain_box.lo()[axis]);
                hi[axis] = hi[axis].min(self.domain_box.hi()[axis]);
            }
        }
        IndexBox::from_corners(lo, hi)
    }


    /**
     * Return the domain box, trimmed by one cell on both sides of every
     * periodic axis. A box contained in this region cannot touch a periodic
     * image of any cell within one cell of it.
     */
    pub fn periodic_test_box(&self) -> IndexBox<D> {
        let mut result = self.domain_box;

        for axis in 0..D {
            if self.periodic[axis] {
                result = result.grow_axis(axis, -1);
            }
        }
        result
    }


    /**
     * Determine whether a box lies within `radius` cells of the domain
     * boundary on any periodic axis.
     */
    pub fn is_near_periodic(&self, b: &IndexBox<D>, radius: i64) -> bool {
        (0..D).filter(|&axis| self.periodic[axis]).any(|axis| {
            (b.lo()[axis] - self.domain_box.lo()[axis]).abs() <= radius ||
            (b.hi()[axis] - self.domain_box.hi()[axis]).abs() <= radius
        })
    }


    /**
     * Return the shift vectors mapping a cell onto each of its periodic
     * images: every nonzero combination of -1, 0, +1 periods along the
     * periodic axes. The result is empty for a non-periodic domain.
     */
    pub fn periodic_shifts(&self) -> Vec<IntVect<D>> {
        let period = self.period();
        let mut shifts = vec![IntVect::<D>::zero()];

        for axis in (0..D).filter(|&axis| self.periodic[axis]) {
            shifts = shifts
                .into_iter()
                .flat_map(|s| (-1..=1).map(move |n| s.shift(axis, n * period[axis])))
                .collect();
        }
        shifts.retain(|s| *s != IntVect::zero());
        shifts
    }


    /**
     * Return the image of a cell inside the domain box, wrapping along
     * periodic axes. Cells outside a non-periodic axis are returned as is.
     */
    pub fn wrap(&self, cell: &IntVect<D>) -> IntVect<D> {
        let lo = self.domain_box.lo();
        let period = self.period();
        let mut result = *cell;

        for axis in (0..D).filter(|&axis| self.periodic[axis]) {
            result[axis] = lo[axis] + (cell[axis] - lo[axis]).rem_euclid(period[axis]);
        }
        result
    }
}




// ============================================================================
impl<const D: usize> From<IndexBox<D>> for ProblemDomain<D> {
    fn from(domain_box: IndexBox<D>) -> Self {
        Self::new(domain_box, [false; D])
    }
}
