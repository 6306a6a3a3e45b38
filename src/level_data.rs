use core::ops::{Index, IndexMut, Range};
use crate::index_box::IndexBox;
use crate::int_vect::IntVect;
use crate::layout::DisjointBoxLayout;




/**
 * A ghosted array of field values covering a rectangular region. Each cell
 * holds `num_comps` values, stored contiguously; cells are laid out in
 * row-major order over the region.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct FieldArray<const D: usize> {
    region: IndexBox<D>,
    num_comps: usize,
    data: Vec<f64>,
}




// ============================================================================
impl<const D: usize> FieldArray<D> {


    /**
     * Generate a zero-filled array covering the given region.
     */
    pub fn zeros(region: IndexBox<D>, num_comps: usize) -> Self {
        assert!(num_comps > 0, "field array needs at least one component");

        Self {
            region,
            num_comps,
            data: vec![0.0; region.len() * num_comps],
        }
    }


    /**
     * Generate an array covering the given region, with values defined from
     * a closure.
     */
    pub fn from_function<F>(region: IndexBox<D>, num_comps: usize, f: F) -> Self
    where
        F: Fn(IntVect<D>, &mut [f64])
    {
        let mut result = Self::zeros(region, num_comps);

        for (cell, slice) in region.iter().zip(result.data.chunks_exact_mut(num_comps)) {
            f(cell, slice)
        }
        result
    }

    pub fn region(&self) -> IndexBox<D> {
        self.region
    }

    pub fn num_comps(&self) -> usize {
        self.num_comps
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, cell: &IntVect<D>, comp: usize) -> f64 {
        self.data[self.offset(cell) + comp]
    }

    pub fn get_mut(&mut self, cell: &IntVect<D>, comp: usize) -> &mut f64 {
        let n = self.offset(cell);
        &mut self.data[n + comp]
    }

    pub fn get_slice(&self, cell: &IntVect<D>) -> &[f64] {
        let n = self.offset(cell);
        &self.data[n..n + self.num_comps]
    }

    pub fn get_slice_mut(&mut self, cell: &IntVect<D>) -> &mut [f64] {
        let n = self.offset(cell);
        &mut self.data[n..n + self.num_comps]
    }

    pub fn fill(&mut self, value: f64) {
        for x in self.data.iter_mut() {
            *x = value
        }
    }


    /**
     * Multiply the given range of components by a constant, in every cell.
     */
    pub fn scale(&mut self, factor: f64, comps: Range<usize>) {
        for slice in self.data.chunks_exact_mut(self.num_comps) {
            for x in &mut slice[comps.clone()] {
                *x *= factor
            }
        }
    }


    /**
     * Add the given range of components of another array, which must cover
     * the same region, into this one.
     */
    pub fn plus(&mut self, other: &Self, comps: Range<usize>) {
        assert!(
            self.region == other.region && self.num_comps == other.num_comps,
            "cannot add field arrays with different shapes");

        for (a, b) in self.data.chunks_exact_mut(self.num_comps).zip(other.data.chunks_exact(self.num_comps)) {
            for c in comps.clone() {
                a[c] += b[c]
            }
        }
    }


    /**
     * Copy values from a source array into the cells of `region` (given in
     * this array's index space). A destination cell `i` receives the source
     * value at `i - shift`. Source components starting at `comps.src` land in
     * destination components starting at `comps.dest`.
     */
    pub fn copy_from(&mut self, source: &Self, region: &IndexBox<D>, shift: IntVect<D>, comps: Components) {
        for cell in region.iter() {
            let src = source.get_slice(&(cell - shift));
            let dst = self.get_slice_mut(&cell);
            dst[comps.dest_range()].copy_from_slice(&src[comps.src_range()]);
        }
    }

    fn offset(&self, cell: &IntVect<D>) -> usize {
        self.validate_index(cell);
        self.region.row_major_offset(cell) * self.num_comps
    }

    fn validate_index(&self, cell: &IntVect<D>) {
        if !self.region.contains(cell) {
            panic!("index {:?} out of range on field array {}", cell.0, self.region);
        }
    }
}




/**
 * Describes a block of components to be read from a source field and written
 * into a (possibly different) block of a destination field.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Components {
    pub src: usize,
    pub dest: usize,
    pub count: usize,
}




// ============================================================================
impl Components {

    pub fn new(src: usize, dest: usize, count: usize) -> Self {
        Self { src, dest, count }
    }


    /**
     * Select the first `count` components, mapped onto themselves.
     */
    pub fn all(count: usize) -> Self {
        Self { src: 0, dest: 0, count }
    }

    pub fn src_range(&self) -> Range<usize> {
        self.src..self.src + self.count
    }

    pub fn dest_range(&self) -> Range<usize> {
        self.dest..self.dest + self.count
    }


    /**
     * Return the same source block, mapped onto itself.
     */
    pub fn in_place(&self) -> Self {
        Self { src: self.src, dest: self.src, count: self.count }
    }
}




/**
 * Field data for every patch of a `DisjointBoxLayout`. Each patch's array
 * covers the patch box grown by the ghost width; arrays are stored in the
 * layout's patch order.
 */
#[derive(Clone, Debug)]
pub struct LevelData<const D: usize> {
    layout: DisjointBoxLayout<D>,
    num_comps: usize,
    ghost: i64,
    arrays: Vec<FieldArray<D>>,
}




// ============================================================================
impl<const D: usize> LevelData<D> {

    pub fn new(layout: &DisjointBoxLayout<D>, num_comps: usize, ghost: i64) -> Self {
        Self::from_function(layout, num_comps, ghost, |_, _| {})
    }

    pub fn from_function<F>(layout: &DisjointBoxLayout<D>, num_comps: usize, ghost: i64, f: F) -> Self
    where
        F: Fn(IntVect<D>, &mut [f64])
    {
        assert!(ghost >= 0, "ghost width must be non-negative");

        let arrays = layout
            .iter()
            .map(|b| FieldArray::from_function(b.grow(ghost), num_comps, &f))
            .collect();

        Self {
            layout: layout.clone(),
            num_comps,
            ghost,
            arrays,
        }
    }

    pub fn layout(&self) -> &DisjointBoxLayout<D> {
        &self.layout
    }

    pub fn num_comps(&self) -> usize {
        self.num_comps
    }

    pub fn ghost(&self) -> i64 {
        self.ghost
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn arrays(&self) -> &[FieldArray<D>] {
        &self.arrays
    }

    pub fn arrays_mut(&mut self) -> &mut [FieldArray<D>] {
        &mut self.arrays
    }
}




// ============================================================================
impl<const D: usize> Index<usize> for LevelData<D> {
    type Output = FieldArray<D>;

    fn index(&self, patch: usize) -> &FieldArray<D> {
        &self.arrays[patch]
    }
}

impl<const D: usize> IndexMut<usize> for LevelData<D> {
    fn index_mut(&mut self, patch: usize) -> &mut FieldArray<D> {
        &mut self.arrays[patch]
    }
}
