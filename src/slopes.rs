use core::ops::Range;
use crate::cell_set::IndexCellSet;
use crate::index_box::IndexBox;
use crate::int_vect::IntVect;
use crate::level_data::FieldArray;
use crate::stencil::DirectionalStencil;




/**
 * Compute undivided differences of `data` along `axis`, at the cells of the
 * given stencil, for the components in `comps`. Centered cells get the
 * centered difference, one-sided cells the difference toward their covered
 * neighbor, and flat cells a zero slope. Other cells of `slope` are not
 * touched.
 */
pub fn simple_slopes<const D: usize>(
    slope: &mut FieldArray<D>,
    data: &FieldArray<D>,
    axis: usize,
    stencil: &DirectionalStencil<D>,
    comps: Range<usize>)
{
    let e = IntVect::<D>::basis(axis);

    for cell in &stencil.centered {
        for c in comps.clone() {
            *slope.get_mut(cell, c) = 0.5 * (data.get(&(*cell + e), c) - data.get(&(*cell - e), c))
        }
    }
    for cell in &stencil.low {
        for c in comps.clone() {
            *slope.get_mut(cell, c) = data.get(cell, c) - data.get(&(*cell - e), c)
        }
    }
    for cell in &stencil.high {
        for c in comps.clone() {
            *slope.get_mut(cell, c) = data.get(&(*cell + e), c) - data.get(cell, c)
        }
    }
    for cell in &stencil.flat {
        for c in comps.clone() {
            *slope.get_mut(cell, c) = 0.0
        }
    }
}




/**
 * Limit the directional slopes jointly, so that a linear reconstruction
 * evaluated anywhere within half a cell of the center stays inside the range
 * spanned by the cell and its available neighbors (the 3^D box around it).
 * At each cell, all slopes are scaled by the same factor
 *
 * eta = min(1, min(v - min, max - v) / (0.5 * sum |s_d|))
 *
 * The `available` predicate decides which neighbors hold valid data.
 */
pub fn limit_slopes<const D: usize, F>(
    slopes: &mut [FieldArray<D>],
    data: &FieldArray<D>,
    cells: &IndexCellSet<D>,
    available: F,
    comps: Range<usize>)
where
    F: Fn(&IntVect<D>) -> bool
{
    assert_eq!(slopes.len(), D, "need one slope array per axis");

    let neighborhood = IndexBox::<D>::from_cell(IntVect::zero()).grow(1);

    for cell in cells {
        let neighbors: Vec<_> = neighborhood
            .iter()
            .filter(|o| *o != IntVect::zero())
            .map(|o| *cell + o)
            .filter(|n| available(n))
            .collect();

        for c in comps.clone() {
            let v = data.get(cell, c);
            let (mn, mx) = neighbors
                .iter()
                .map(|n| data.get(n, c))
                .fold((v, v), |(mn, mx), x| (mn.min(x), mx.max(x)));

            let total: f64 = slopes.iter().map(|s| s.get(cell, c).abs()).sum();

            if total > 0.0 {
                let eta = ((v - mn).min(mx - v) / (0.5 * total)).min(1.0);

                for s in slopes.iter_mut() {
                    *s.get_mut(cell, c) *= eta
                }
            }
        }
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::cell_set::IndexCellSet;
    use crate::index_box::IndexBox;
    use crate::int_vect::IntVect;
    use crate::level_data::FieldArray;
    use crate::stencil::DirectionalStencil;
    use super::{limit_slopes, simple_slopes};

    fn set(cells: &[[i64; 1]]) -> IndexCellSet<1> {
        cells.iter().map(|&c| IntVect(c)).collect()
    }

    #[test]
    fn simple_slopes_follow_the_stencil() {
        let region = IndexBox::from_bounds([0], [9]);
        let data = FieldArray::from_function(region, 1, |c, s| s[0] = (c[0] * c[0]) as f64);
        let mut slope = FieldArray::zeros(region, 1);
        let stencil = DirectionalStencil {
            centered: set(&[[4]]),
            low: set(&[[5]]),
            high: set(&[[3]]),
            flat: set(&[[8]]),
        };
        slope.fill(-1.0);
        simple_slopes(&mut slope, &data, 0, &stencil, 0..1);

        assert_eq!(slope.get(&IntVect([4]), 0), 8.0);
        assert_eq!(slope.get(&IntVect([5]), 0), 9.0);
        assert_eq!(slope.get(&IntVect([3]), 0), 7.0);
        assert_eq!(slope.get(&IntVect([8]), 0), 0.0);
        assert_eq!(slope.get(&IntVect([7]), 0), -1.0);
    }

    #[test]
    fn limiter_keeps_linear_data_unchanged() {
        let region = IndexBox::from_bounds([0, 0], [4, 4]);
        let data = FieldArray::from_function(region, 1, |c, s| s[0] = (c[0] + 2 * c[1]) as f64);
        let mut slopes = vec![
            FieldArray::from_function(region, 1, |_, s| s[0] = 1.0),
            FieldArray::from_function(region, 1, |_, s| s[0] = 2.0),
        ];
        let cells = IndexCellSet::from_box(&IndexBox::from_bounds([1, 1], [3, 3]));
        limit_slopes(&mut slopes, &data, &cells, |n| region.contains(n), 0..1);

        for cell in &cells {
            assert_eq!(slopes[0].get(cell, 0), 1.0);
            assert_eq!(slopes[1].get(cell, 0), 2.0);
        }
    }

    #[test]
    fn limiter_flattens_extrema() {
        let region = IndexBox::from_bounds([0], [4]);
        let data = FieldArray::from_function(region, 1, |c, s| s[0] = if c[0] == 2 { 1.0 } else { 0.0 });
        let mut slopes = vec![FieldArray::from_function(region, 1, |_, s| s[0] = 0.5)];
        limit_slopes(&mut slopes, &data, &set(&[[2]]), |n| region.contains(n), 0..1);
        assert_eq!(slopes[0].get(&IntVect([2]), 0), 0.0);
    }

    #[test]
    fn limiter_bounds_the_reconstruction() {
        let region = IndexBox::from_bounds([0, 0], [4, 4]);
        let data = FieldArray::from_function(region, 1, |c, s| s[0] = if c[0] >= 2 && c[1] >= 2 { 1.0 } else { 0.0 });
        let mut slopes = vec![
            FieldArray::from_function(region, 1, |_, s| s[0] = 0.5),
            FieldArray::from_function(region, 1, |_, s| s[0] = 0.5),
        ];
        let cells = IndexCellSet::from_box(&IndexBox::from_bounds([1, 1], [3, 3]));
        limit_slopes(&mut slopes, &data, &cells, |n| region.contains(n), 0..1);

        for cell in &cells {
            let v = data.get(cell, 0);
            let reach = 0.5 * (slopes[0].get(cell, 0).abs() + slopes[1].get(cell, 0).abs());
            assert!(v + reach <= 1.0 + 1e-14);
            assert!(v - reach >= -1e-14);
        }
    }

    #[test]
    fn unavailable_neighbors_are_ignored() {
        let region = IndexBox::from_bounds([0], [4]);
        let data = FieldArray::from_function(region, 1, |c, s| s[0] = c[0] as f64);
        let mut slopes = vec![FieldArray::from_function(region, 1, |_, s| s[0] = 1.0)];
        limit_slopes(&mut slopes, &data, &set(&[[2]]), |n| n[0] != 3, 0..1);
        assert_eq!(slopes[0].get(&IntVect([2]), 0), 0.0);
    }
}
