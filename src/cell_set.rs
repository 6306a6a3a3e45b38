use core::fmt;
use core::iter::FromIterator;
use std::collections::btree_set::{self, BTreeSet};
use crate::index_box::IndexBox;
use crate::int_vect::IntVect;




/**
 * A sparse set of cells in a `D`-dimensional index space. Supports the
 * boolean algebra needed to describe irregular regions that cannot be
 * expressed as a single box. Cells are kept in lexicographic order, so
 * traversal is deterministic.
 */
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexCellSet<const D: usize> {
    cells: BTreeSet<IntVect<D>>,
}




// ============================================================================
impl<const D: usize> IndexCellSet<D> {

    pub fn new() -> Self {
        Self { cells: BTreeSet::new() }
    }

    pub fn from_box(b: &IndexBox<D>) -> Self {
        b.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, cell: &IntVect<D>) -> bool {
        self.cells.contains(cell)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, IntVect<D>> {
        self.cells.iter()
    }


    /**
     * Remove every cell contained in the given box.
     */
    pub fn subtract_box(&mut self, b: &IndexBox<D>) {
        if b.len() < self.cells.len() {
            for cell in b.iter() {
                self.cells.remove(&cell);
            }
        } else {
            self.cells.retain(|c| !b.contains(c))
        }
    }


    /**
     * Keep only the cells contained in the given box.
     */
    pub fn intersect_box(&mut self, b: &IndexBox<D>) {
        self.cells.retain(|c| b.contains(c))
    }

    pub fn subtract(&mut self, other: &Self) {
        if other.len() < self.len() {
            for cell in other.iter() {
                self.cells.remove(cell);
            }
        } else {
            self.cells.retain(|c| !other.contains(c))
        }
    }

    pub fn intersect(&mut self, other: &Self) {
        self.cells.retain(|c| other.contains(c))
    }

    pub fn union(&mut self, other: &Self) {
        self.cells.extend(other.iter().copied())
    }


    /**
     * Translate every cell by the given vector.
     */
    pub fn shift(&self, delta: IntVect<D>) -> Self {
        self.cells.iter().map(|&c| c + delta).collect()
    }


    /**
     * Replace each cell by the box of cells within `radius` of it along every
     * axis (corners included).
     */
    pub fn grow(&self, radius: i64) -> Self {
        self.cells
            .iter()
            .flat_map(|&c| IndexBox::from_cell(c).grow(radius).iter())
            .collect()
    }


    /**
     * Replace each cell by the fine cells it covers under the given
     * refinement ratio.
     */
    pub fn refine(&self, ratio: i64) -> Self {
        self.cells
            .iter()
            .flat_map(|&c| IndexBox::from_cell(c).refine(ratio).iter())
            .collect()
    }


    /**
     * Replace each cell by the coarse cell containing it.
     */
    pub fn coarsen(&self, ratio: i64) -> Self {
        self.cells.iter().map(|c| c.coarsen(ratio)).collect()
    }
}




// ============================================================================
impl<const D: usize> FromIterator<IntVect<D>> for IndexCellSet<D> {
    fn from_iter<I: IntoIterator<Item = IntVect<D>>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl<'a, const D: usize> IntoIterator for &'a IndexCellSet<D> {
    type Item = &'a IntVect<D>;
    type IntoIter = btree_set::Iter<'a, IntVect<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<const D: usize> fmt::Display for IndexCellSet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (n, cell) in self.cells.iter().enumerate() {
            if n > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:?}", cell.0)?;
        }
        write!(f, "}}")
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::index_box::IndexBox;
    use crate::int_vect::IntVect;
    use super::IndexCellSet;

    #[test]
    fn subtracting_a_box_leaves_a_frame() {
        let mut set = IndexCellSet::from_box(&IndexBox::from_bounds([0, 0], [3, 3]));
        set.subtract_box(&IndexBox::from_bounds([1, 1], [2, 2]));
        assert_eq!(set.len(), 12);
        assert!(!set.contains(&IntVect([1, 2])));
        assert!(set.contains(&IntVect([0, 2])));

        set.subtract_box(&IndexBox::from_bounds([-100, -100], [100, 1]));
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn grow_includes_corners() {
        let set: IndexCellSet<2> = vec![IntVect([0, 0])].into_iter().collect();
        let grown = set.grow(1);
        assert_eq!(grown.len(), 9);
        assert!(grown.contains(&IntVect([-1, 1])));
    }

    #[test]
    fn refine_then_coarsen_is_identity() {
        let set: IndexCellSet<2> = vec![IntVect([1, -1]), IntVect([6, 0])].into_iter().collect();
        let fine = set.refine(2);
        assert_eq!(fine.len(), 8);
        assert!(fine.contains(&IntVect([3, -1])));
        assert_eq!(fine.coarsen(2), set);
    }

    #[test]
    fn set_algebra_works() {
        let a = IndexCellSet::from_box(&IndexBox::from_bounds([0], [5]));
        let b = IndexCellSet::from_box(&IndexBox::from_bounds([3], [8]));
        let mut u = a.clone();
        u.union(&b);
        assert_eq!(u.len(), 9);
        let mut i = a.clone();
        i.intersect(&b);
        assert_eq!(i, IndexCellSet::from_box(&IndexBox::from_bounds([3], [5])));
        let mut d = a.clone();
        d.subtract(&b);
        assert_eq!(d.shift(IntVect([10])), IndexCellSet::from_box(&IndexBox::from_bounds([10], [12])));
    }
}
