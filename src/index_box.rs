use core::fmt;
use crate::int_vect::IntVect;




/**
 * An axis-aligned rectangular region in a discrete `D`-dimensional index
 * space. Both bounds are inclusive. A box whose upper bound is below its
 * lower bound on any axis is empty; empty boxes arise naturally from
 * intersections and negative growth, and contain no cells.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexBox<const D: usize> {
    lo: IntVect<D>,
    hi: IntVect<D>,
}




// ============================================================================
impl<const D: usize> IndexBox<D> {


    pub fn new(lo: IntVect<D>, hi: IntVect<D>) -> Self {

        assert!(
            lo.all(&hi, |l, h| l <= h),
            "index box has negative volume: {:?} {:?}", lo, hi);

        Self { lo, hi }
    }


    /**
     * Less imposing factory function, taking the bounds as plain arrays.
     */
    pub fn from_bounds(lo: [i64; D], hi: [i64; D]) -> Self {
        Self::new(IntVect(lo), IntVect(hi))
    }


    /**
     * Construct a box from its corners without checking the volume; the
     * result may be empty.
     */
    pub(crate) fn from_corners(lo: IntVect<D>, hi: IntVect<D>) -> Self {
        Self { lo, hi }
    }


    /**
     * Return a box containing only the given cell.
     */
    pub fn from_cell(cell: IntVect<D>) -> Self {
        Self { lo: cell, hi: cell }
    }


    /**
     * Return the minimum index (inclusive).
     */
    pub fn lo(&self) -> IntVect<D> {
        self.lo
    }


    /**
     * Return the maximum index (inclusive).
     */
    pub fn hi(&self) -> IntVect<D> {
        self.hi
    }

    pub fn is_empty(&self) -> bool {
        !self.lo.all(&self.hi, |l, h| l <= h)
    }


    /**
     * Return the number of cells on each axis.
     */
    pub fn size(&self) -> IntVect<D> {
        (self.hi - self.lo + IntVect::unit()).map(|n| n.max(0))
    }


    /**
     * Return the number of cells in this box.
     */
    pub fn len(&self) -> usize {
        self.size().0.iter().map(|&n| n as usize).product()
    }


    /**
     * Determine whether this box contains the given cell.
     */
    pub fn contains(&self, cell: &IntVect<D>) -> bool {
        self.lo.all(cell, |l, i| l <= i) && cell.all(&self.hi, |i, h| i <= h)
    }


    /**
     * Determine whether another box is a subset of this one. The empty box
     * is a subset of every box.
     */
    pub fn contains_box(&self, other: &Self) -> bool {
        other.is_empty() || (self.contains(&other.lo) && self.contains(&other.hi))
    }


    /**
     * Return the intersection of two boxes, or `None` if they do not overlap.
     */
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let result = Self {
            lo: self.lo.max_components(&other.lo),
            hi: self.hi.min_components(&other.hi),
        };
        if result.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }


    /**
     * Expand this box by the given number of cells on each side of every
     * axis. A negative argument trims the box, possibly to empty.
     */
    pub fn grow(&self, delta: i64) -> Self {
        Self {
            lo: self.lo - IntVect::splat(delta),
            hi: self.hi + IntVect::splat(delta),
        }
    }


    /**
     * Expand this box by the given number of cells on both sides of a single
     * axis.
     */
    pub fn grow_axis(&self, axis: usize, delta: i64) -> Self {
        Self {
            lo: self.lo.shift(axis, -delta),
            hi: self.hi.shift(axis, delta),
        }
    }


    /**
     * Return the box of coarse cells which cover this box, when the index
     * space is coarsened by the given ratio.
     */
    pub fn coarsen(&self, ratio: i64) -> Self {
        Self {
            lo: self.lo.coarsen(ratio),
            hi: self.hi.coarsen(ratio),
        }
    }


    /**
     * Return the box of fine cells covered by this box, when the index space
     * is refined by the given ratio.
     */
    pub fn refine(&self, ratio: i64) -> Self {
        Self {
            lo: self.lo.refine(ratio),
            hi: self.hi.refine(ratio) + IntVect::splat(ratio - 1),
        }
    }

    pub fn shift(&self, delta: IntVect<D>) -> Self {
        Self {
            lo: self.lo + delta,
            hi: self.hi + delta,
        }
    }


    /**
     * Return the linear offset for the given cell, in a row-major memory
     * buffer aligned with the start of this box.
     */
    pub fn row_major_offset(&self, cell: &IntVect<D>) -> usize {
        let size = self.size();
        let mut offset = 0;

        for axis in 0..D {
            offset = offset * size[axis] as usize + (cell[axis] - self.lo[axis]) as usize;
        }
        offset
    }


    /**
     * Return an iterator which traverses the box in row-major order (C-like;
     * the final index increases fastest).
     */
    pub fn iter(&self) -> BoxIter<D> {
        BoxIter {
            next: if self.is_empty() { None } else { Some(self.lo) },
            lo: self.lo,
            hi: self.hi,
        }
    }
}




// ============================================================================
impl<const D: usize> fmt::Display for IndexBox<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?} {:?})", self.lo.0, self.hi.0)
    }
}

impl<const D: usize> IntoIterator for &IndexBox<D> {
    type Item = IntVect<D>;
    type IntoIter = BoxIter<D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}




/**
 * Row-major iterator over the cells of an `IndexBox`.
 */
pub struct BoxIter<const D: usize> {
    next: Option<IntVect<D>>,
    lo: IntVect<D>,
    hi: IntVect<D>,
}




// ============================================================================
impl<const D: usize> Iterator for BoxIter<D> {
    type Item = IntVect<D>;

    fn next(&mut self) -> Option<IntVect<D>> {
        let current = self.next?;
        let mut cell = current;

        self.next = None;

        for axis in (0..D).rev() {
            if cell[axis] < self.hi[axis] {
                cell[axis] += 1;
                self.next = Some(cell);
                break;
            }
            cell[axis] = self.lo[axis];
        }
        Some(current)
    }
}
