use core::ops::{Add, Sub, Mul, Neg, Index, IndexMut};




/**
 * A statically-sized vector of signed 64-bit integers, used to label cells
 * in a `D`-dimensional index space. Ordering is lexicographic, with axis 0
 * the most significant.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntVect<const D: usize>(pub [i64; D]);




// ============================================================================
impl<const D: usize> IntVect<D> {

    pub fn zero() -> Self {
        Self([0; D])
    }

    pub fn unit() -> Self {
        Self([1; D])
    }

    pub fn splat(value: i64) -> Self {
        Self([value; D])
    }


    /**
     * Return the unit vector along the given axis.
     */
    pub fn basis(axis: usize) -> Self {
        assert!(axis < D, "axis {} out of range for a {}d index", axis, D);
        let mut data = [0; D];
        data[axis] = 1;
        Self(data)
    }


    /**
     * Return the index of the coarse cell containing this one, when the
     * index space is coarsened by the given ratio. Negative indexes round
     * toward negative infinity.
     */
    pub fn coarsen(&self, ratio: i64) -> Self {
        self.map(|i| i.div_euclid(ratio))
    }


    /**
     * Return the lower-most fine cell covered by this cell, when the index
     * space is refined by the given ratio.
     */
    pub fn refine(&self, ratio: i64) -> Self {
        self.map(|i| i * ratio)
    }

    pub fn shift(&self, axis: usize, delta: i64) -> Self {
        let mut result = *self;
        result.0[axis] += delta;
        result
    }

    pub fn map<F: Fn(i64) -> i64>(&self, f: F) -> Self {
        let mut data = self.0;
        for x in data.iter_mut() {
            *x = f(*x)
        }
        Self(data)
    }

    pub fn all<F: Fn(i64, i64) -> bool>(&self, other: &Self, f: F) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(&a, &b)| f(a, b))
    }


    /**
     * Return the component-wise minimum. This is not `Ord::min`, which
     * compares lexicographically.
     */
    pub fn min_components(&self, other: &Self) -> Self {
        let mut data = self.0;
        for (x, y) in data.iter_mut().zip(other.0.iter()) {
            *x = (*x).min(*y)
        }
        Self(data)
    }

    pub fn max_components(&self, other: &Self) -> Self {
        let mut data = self.0;
        for (x, y) in data.iter_mut().zip(other.0.iter()) {
            *x = (*x).max(*y)
        }
        Self(data)
    }
}




// ============================================================================
impl<const D: usize> Add<IntVect<D>> for IntVect<D> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let mut data = self.0;
        for (x, y) in data.iter_mut().zip(other.0.iter()) {
            *x += y
        }
        Self(data)
    }
}

impl<const D: usize> Sub<IntVect<D>> for IntVect<D> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let mut data = self.0;
        for (x, y) in data.iter_mut().zip(other.0.iter()) {
            *x -= y
        }
        Self(data)
    }
}

impl<const D: usize> Mul<i64> for IntVect<D> {
    type Output = Self;

    fn mul(self, a: i64) -> Self {
        self.map(|x| x * a)
    }
}

impl<const D: usize> Mul<IntVect<D>> for IntVect<D> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut data = self.0;
        for (x, y) in data.iter_mut().zip(other.0.iter()) {
            *x *= y
        }
        Self(data)
    }
}

impl<const D: usize> Neg for IntVect<D> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|x| -x)
    }
}




// ============================================================================
impl<const D: usize> Index<usize> for IntVect<D> {
    type Output = i64;

    fn index(&self, axis: usize) -> &i64 {
        &self.0[axis]
    }
}

impl<const D: usize> IndexMut<usize> for IntVect<D> {
    fn index_mut(&mut self, axis: usize) -> &mut i64 {
        &mut self.0[axis]
    }
}

impl<const D: usize> From<[i64; D]> for IntVect<D> {
    fn from(data: [i64; D]) -> Self {
        Self(data)
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::IntVect;

    #[test]
    fn coarsening_rounds_toward_negative_infinity() {
        assert_eq!(IntVect([5, -1, -4]).coarsen(2), IntVect([2, -1, -2]));
        assert_eq!(IntVect([-5]).coarsen(4), IntVect([-2]));
        assert_eq!(IntVect([3, 3]).refine(2), IntVect([6, 6]));
    }

    #[test]
    fn ordering_is_lexicographic_on_axis_zero_first() {
        assert!(IntVect([0, 9]) < IntVect([1, 0]));
        assert!(IntVect([1, 0]) < IntVect([1, 1]));
    }

    #[test]
    fn component_extrema_differ_from_ordering() {
        let a = IntVect([0, 9]);
        let b = IntVect([1, 0]);
        assert_eq!(a.min_components(&b), IntVect([0, 0]));
        assert_eq!(a.max_components(&b), IntVect([1, 9]));
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn arithmetic_works() {
        let a = IntVect([1, 2, 3]);
        let b = IntVect::basis(1);
        assert_eq!(a + b, IntVect([1, 3, 3]));
        assert_eq!(a - b * 2, IntVect([1, 0, 3]));
        assert_eq!(-a, IntVect([-1, -2, -3]));
        assert_eq!(a * IntVect([2, 0, 1]), IntVect([2, 0, 3]));
    }
}
