use std::convert::TryFrom;
use std::io::{Read, Write};
use serde::{Deserialize, Serialize};
use crate::error::Error;
use crate::int_vect::IntVect;




/**
 * Coordinate system of the mesh. The integer tags match the numbering used
 * in problem configuration files.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Geometry {
    Cartesian,
    Cylindrical,
    Spherical,
    SphericalLogRadius,
    Polar,
    PolarLogRadius,
}




// ============================================================================
impl Geometry {

    pub fn all() -> [Geometry; 6] {
        use Geometry::*;
        [Cartesian, Cylindrical, Spherical, SphericalLogRadius, Polar, PolarLogRadius]
    }

    pub fn tag(&self) -> i32 {
        match self {
            Geometry::Cartesian => 1,
            Geometry::Cylindrical => 2,
            Geometry::Spherical => 3,
            Geometry::SphericalLogRadius => 4,
            Geometry::Polar => 5,
            Geometry::PolarLogRadius => 6,
        }
    }
}

impl TryFrom<i32> for Geometry {
    type Error = Error;

    fn try_from(tag: i32) -> Result<Self, Error> {
        Geometry::all()
            .iter()
            .find(|g| g.tag() == tag)
            .copied()
            .ok_or(Error::UnknownGeometry(tag))
    }
}




/**
 * Everything the interpolator needs to know about the mapping from index
 * space to physical space: the coordinate system, the physical coordinates
 * of the lower corner of the domain, and the ratio of the cell spacing on
 * axis 1 to that on axis 0.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub geometry: Geometry,
    pub lower: [f64; 3],
    pub x2_stretch: f64,
}




// ============================================================================
impl Default for GeometryConfig {
    fn default() -> Self {
        Self::cartesian()
    }
}

impl GeometryConfig {

    pub fn cartesian() -> Self {
        Self {
            geometry: Geometry::Cartesian,
            lower: [0.0; 3],
            x2_stretch: 1.0,
        }
    }

    pub fn new(geometry: Geometry, lower: [f64; 3], x2_stretch: f64) -> Self {
        Self { geometry, lower, x2_stretch }
    }

    pub fn is_cartesian(&self) -> bool {
        self.geometry == Geometry::Cartesian
    }


    /**
     * Read a configuration encoded as CBOR.
     */
    pub fn from_cbor<R: Read>(reader: R) -> Result<Self, Error> {
        ciborium::de::from_reader(reader).map_err(|e| Error::InvalidConfig(e.to_string()))
    }


    /**
     * Write this configuration encoded as CBOR.
     */
    pub fn to_cbor<W: Write>(&self, writer: W) -> Result<(), Error> {
        ciborium::ser::into_writer(self, writer).map_err(|e| Error::InvalidConfig(e.to_string()))
    }


    /**
     * Return the cell spacing along the given axis, for a level whose
     * spacing on axis 0 is `dx`.
     */
    pub fn spacing(&self, axis: usize, dx: f64) -> f64 {
        if axis == 1 {
            dx * self.x2_stretch
        } else {
            dx
        }
    }


    /**
     * Return the physical coordinates of the lower and upper faces of cell
     * `index` along the given axis.
     */
    pub fn faces(&self, axis: usize, index: i64, dx: f64) -> (f64, f64) {
        let h = self.spacing(axis, dx);
        let l = self.lower[axis] + index as f64 * h;
        (l, l + h)
    }


    /**
     * Return the ratio of the true cell volume to its Cartesian volume (the
     * mean metric factor over the cell). Conserved quantities are stored
     * multiplied by this factor, so dividing by it recovers the cell average
     * of the underlying field.
     */
    pub fn volume_factor<const D: usize>(&self, cell: &IntVect<D>, dx: f64) -> f64 {
        let (x1l, x1r) = self.faces(0, cell[0], dx);

        let radial = match self.geometry {
            Geometry::Cartesian => 1.0,
            Geometry::Cylindrical | Geometry::Polar => (0.5 * (x1l + x1r)).abs(),
            Geometry::Spherical => (x1r.powi(3) - x1l.powi(3)) / (3.0 * dx),
            Geometry::SphericalLogRadius => ((3.0 * x1r).exp() - (3.0 * x1l).exp()) / (3.0 * dx),
            Geometry::PolarLogRadius => ((2.0 * x1r).exp() - (2.0 * x1l).exp()) / (2.0 * dx),
        };

        match self.geometry {
            Geometry::Spherical | Geometry::SphericalLogRadius if D > 1 => {
                let (x2l, x2r) = self.faces(1, cell[1], dx);
                radial * (x2l.cos() - x2r.cos()) / (x2r - x2l)
            }
            _ => radial,
        }
    }


    /**
     * Return the coefficient multiplying the coarse slope along `axis` when
     * reconstructing the value in `fine`, a cell on a level with spacing `dx`
     * refined by `ratio` from its parent. The coefficient is the offset of
     * the fine cell's volume centroid from the coarse one, in units of the
     * coarse cell, measured in the coordinate in which the cell volume is
     * linear. This makes the linear correction integrate to zero over the
     * parent cell, so the reconstruction is conservative.
     */
    pub fn interp_coef<const D: usize>(&self, fine: &IntVect<D>, axis: usize, dx: f64, ratio: i64) -> f64 {
        let indf = fine[axis];
        let indc = indf.div_euclid(ratio);

        match self.volume_coordinate(axis, D) {
            None => {
                let offset = indf - ratio * indc;
                -0.5 + (offset as f64 + 0.5) / ratio as f64
            }
            Some(xi) => {
                let (fl, fr) = self.faces(axis, indf, dx);
                let (cl, cr) = self.faces(axis, indc, dx * ratio as f64);
                0.5 * (xi(fl) + xi(fr) - xi(cl) - xi(cr)) / (xi(cr) - xi(cl))
            }
        }
    }

    fn volume_coordinate(&self, axis: usize, dim: usize) -> Option<fn(f64) -> f64> {
        match (self.geometry, axis) {
            (Geometry::Cylindrical, 0) | (Geometry::Polar, 0) => Some(square),
            (Geometry::Spherical, 0) => Some(cube),
            (Geometry::SphericalLogRadius, 0) => Some(exp3),
            (Geometry::PolarLogRadius, 0) => Some(exp2),
            (Geometry::Spherical, 1) | (Geometry::SphericalLogRadius, 1) if dim > 1 => Some(f64::cos),
            _ => None,
        }
    }
}

fn square(x: f64) -> f64 {
    x * x
}

fn cube(x: f64) -> f64 {
    x * x * x
}

fn exp2(x: f64) -> f64 {
    (2.0 * x).exp()
}

fn exp3(x: f64) -> f64 {
    (3.0 * x).exp()
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::convert::TryFrom;
    use crate::index_box::IndexBox;
    use crate::int_vect::IntVect;
    use super::{Geometry, GeometryConfig};

    fn config(geometry: Geometry) -> GeometryConfig {
        GeometryConfig::new(geometry, [1.0, 0.4, 0.0], 1.5)
    }

    #[test]
    fn tags_round_trip_and_unknown_tags_fail() {
        for g in Geometry::all().iter() {
            assert_eq!(Geometry::try_from(g.tag()).unwrap(), *g);
        }
        assert!(Geometry::try_from(7).is_err());
        assert!(Geometry::try_from(0).is_err());
    }

    #[test]
    fn cartesian_coefficients_span_the_parent_cell() {
        let c = GeometryConfig::cartesian();
        assert_eq!(c.interp_coef(&IntVect([4]), 0, 0.1, 2), -0.25);
        assert_eq!(c.interp_coef(&IntVect([5]), 0, 0.1, 2), 0.25);
        assert_eq!(c.interp_coef(&IntVect([-1]), 0, 0.1, 4), 0.375);
        assert_eq!(c.volume_factor(&IntVect([3, 3]), 0.1), 1.0);
    }

    #[test]
    fn fine_volume_factors_average_to_the_coarse_factor() {
        let dx = 0.05;
        let ratio = 2;

        for &g in Geometry::all().iter() {
            let c = config(g);
            let coarse = IntVect([3, 2]);
            let children = IndexBox::from_cell(coarse).refine(ratio);
            let mean = children.iter().map(|f| c.volume_factor(&f, dx)).sum::<f64>() / children.len() as f64;
            let parent = c.volume_factor(&coarse, dx * ratio as f64);
            assert!((mean - parent).abs() < 1e-12 * parent.abs(), "{:?}: {} != {}", g, mean, parent);
        }
    }

    #[test]
    fn volume_weighted_coefficients_sum_to_zero() {
        let dx = 0.05;
        let ratio = 4;

        for &g in Geometry::all().iter() {
            let c = config(g);
            let children = IndexBox::from_cell(IntVect([2, 5])).refine(ratio);

            for axis in 0..2 {
                let terms: Vec<f64> = children
                    .iter()
                    .map(|f| c.volume_factor(&f, dx) * c.interp_coef(&f, axis, dx, ratio))
                    .collect();
                let moment: f64 = terms.iter().sum();
                let scale: f64 = terms.iter().map(|t| t.abs()).sum();
                assert!(moment.abs() < 1e-12 * scale, "{:?} axis {}: {}", g, axis, moment);

                for f in children.iter() {
                    assert!(c.interp_coef(&f, axis, dx, ratio).abs() < 0.5);
                }
            }
        }
    }

    #[test]
    fn config_survives_cbor_encoding() {
        let c = config(Geometry::SphericalLogRadius);
        let mut buffer = Vec::new();
        c.to_cbor(&mut buffer).unwrap();
        assert_eq!(GeometryConfig::from_cbor(&buffer[..]).unwrap(), c);
        assert!(GeometryConfig::from_cbor(&[0xff_u8][..]).is_err());
    }
}
