use core::ops::Index;
use crate::error::Error;
use crate::index_box::IndexBox;
use crate::int_vect::IntVect;
use crate::problem_domain::ProblemDomain;




/**
 * An ordered collection of non-overlapping boxes ("patches") making up one
 * refinement level. Each patch is identified by its position in the
 * collection, which is stable for the life of the layout; per-patch data
 * elsewhere in the crate is stored in vectors indexed the same way.
 *
 * A layout may be declared sorted (lexicographically on the lower corner),
 * which enables short-circuiting searches over its boxes.
 */
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisjointBoxLayout<const D: usize> {
    boxes: Vec<IndexBox<D>>,
    sorted: bool,
}




// ============================================================================
impl<const D: usize> DisjointBoxLayout<D> {


    /**
     * Create a layout from a list of boxes, returning an error if any two of
     * them overlap or any is empty.
     */
    pub fn new(boxes: Vec<IndexBox<D>>) -> Result<Self, Error> {
        for (n, a) in boxes.iter().enumerate() {
            if a.is_empty() {
                return Err(Error::InvalidConfig(format!("layout box {} is empty", a)))
            }
            for b in &boxes[n + 1..] {
                if a.intersects(b) {
                    return Err(Error::OverlappingBoxes(a.to_string(), b.to_string()))
                }
            }
        }
        Ok(Self { boxes, sorted: false })
    }


    /**
     * Return a copy of this layout with boxes ordered lexicographically by
     * their lower corner, and flagged as sorted. Patch indexes refer to the
     * new ordering.
     */
    pub fn sorted(&self) -> Self {
        let mut boxes = self.boxes.clone();
        boxes.sort_by_key(|b| b.lo());
        Self { boxes, sorted: true }
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }


    /**
     * A layout with no boxes does not describe a level. Fill patches built
     * against such a coarse layout are left undefined.
     */
    pub fn is_closed(&self) -> bool {
        !self.boxes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn boxes(&self) -> &[IndexBox<D>] {
        &self.boxes
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexBox<D>> + '_ {
        self.boxes.iter()
    }


    /**
     * Coarsen every box by the given ratio. Boxes of a properly nested fine
     * level are aligned to the ratio, so the result remains disjoint.
     */
    pub fn coarsen(&self, ratio: i64) -> Self {
        Self {
            boxes: self.boxes.iter().map(|b| b.coarsen(ratio)).collect(),
            sorted: self.sorted,
        }
    }

    pub fn refine(&self, ratio: i64) -> Self {
        Self {
            boxes: self.boxes.iter().map(|b| b.refine(ratio)).collect(),
            sorted: self.sorted,
        }
    }


    /**
     * Determine whether this layout is consistent with the given domain:
     * every box must lie inside the domain box. Boxes are never allowed to
     * straddle a periodic boundary.
     */
    pub fn check_periodic(&self, domain: &ProblemDomain<D>) -> bool {
        self.boxes.iter().all(|b| domain.domain_box().contains_box(b))
    }


    /**
     * Determine whether the given cell, or one of its periodic images, is
     * covered by a box in this layout.
     */
    pub fn covers(&self, cell: &IntVect<D>, domain: &ProblemDomain<D>) -> bool {
        let image = domain.wrap(cell);
        self.boxes.iter().any(|b| b.contains(&image))
    }
}




// ============================================================================
impl<const D: usize> Index<usize> for DisjointBoxLayout<D> {
    type Output = IndexBox<D>;

    fn index(&self, patch: usize) -> &IndexBox<D> {
        &self.boxes[patch]
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::index_box::IndexBox;
    use crate::int_vect::IntVect;
    use crate::problem_domain::ProblemDomain;
    use super::DisjointBoxLayout;

    #[test]
    fn overlapping_boxes_are_rejected() {
        let result = DisjointBoxLayout::new(vec![
            IndexBox::from_bounds([0, 0], [7, 7]),
            IndexBox::from_bounds([7, 7], [9, 9]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn sorting_orders_by_lower_corner() {
        let layout = DisjointBoxLayout::new(vec![
            IndexBox::from_bounds([8, 0], [15, 7]),
            IndexBox::from_bounds([0, 8], [7, 15]),
            IndexBox::from_bounds([0, 0], [7, 7]),
        ]).unwrap().sorted();

        assert!(layout.is_sorted());
        assert_eq!(layout[0].lo(), IntVect([0, 0]));
        assert_eq!(layout[1].lo(), IntVect([0, 8]));
        assert_eq!(layout[2].lo(), IntVect([8, 0]));
    }

    #[test]
    fn coverage_includes_periodic_images() {
        let domain = ProblemDomain::new(IndexBox::from_bounds([0], [15]), [true]);
        let layout = DisjointBoxLayout::new(vec![IndexBox::from_bounds([12], [15])]).unwrap();
        assert!(layout.covers(&IntVect([-1]), &domain));
        assert!(!layout.covers(&IntVect([16]), &domain));
        assert!(layout.check_periodic(&domain));
        assert!(!DisjointBoxLayout::<1>::default().is_closed());
    }
}
