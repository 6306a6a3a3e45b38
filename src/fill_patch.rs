use log::{debug, info, trace};
use rayon::prelude::*;
use crate::copier::{LocalCopier, RegionCopier};
use crate::geometry::GeometryConfig;
use crate::layout::DisjointBoxLayout;
use crate::level_data::{Components, FieldArray, LevelData};
use crate::problem_domain::ProblemDomain;
use crate::slopes::{limit_slopes, simple_slopes};
use crate::stencil::{PatchStencil, StencilGeometry};




/// Radius of the slope stencil on the coarse level.
const STENCIL_RADIUS: i64 = 1;




/**
 * Fills the ghost cells of a fine level which lie outside every fine patch,
 * by piecewise-linear interpolation in space (and linear interpolation in
 * time) from the next coarser level.
 *
 * The object is built once for a pair of level layouts by `define`, which
 * derives all the interpolation metadata and allocates the working buffers.
 * It must be re-defined whenever either layout changes. Until a successful
 * `define` the object is undefined and the fill operations panic.
 */
#[derive(Clone, Debug, Default)]
pub struct PiecewiseLinearFillPatch<const D: usize> {
    state: Option<Defined<D>>,
}




#[derive(Clone, Debug)]
struct Defined<const D: usize> {
    ratio: i64,
    dx: f64,
    interp_radius: i64,
    domain: ProblemDomain<D>,
    geometry: GeometryConfig,
    fine_layout: DisjointBoxLayout<D>,
    coarse_layout: DisjointBoxLayout<D>,
    copier: LocalCopier<D>,
    stencils: Vec<PatchStencil<D>>,
    buffer: LevelData<D>,
    slopes: Option<Vec<Vec<FieldArray<D>>>>,
}




// ============================================================================
impl<const D: usize> PiecewiseLinearFillPatch<D> {

    pub fn new() -> Self {
        Self { state: None }
    }


    /**
     * Build the interpolation metadata and working buffers.
     *
     * - `fine`: layout of the level whose ghost cells are filled
     * - `coarse`: layout of the next coarser level
     * - `num_comps`: number of field components in the coarse data
     * - `domain`: problem domain of the coarse level
     * - `ratio`: refinement ratio between the levels
     * - `dx`: cell spacing of the fine level along axis 0
     * - `interp_radius`: width of the fine ghost region to fill
     * - `pw_const_only`: skip the slope machinery; only
     *   `fill_interp_pw_const_space` may then be used
     * - `geometry`: coordinate system used for volume weighting
     *
     * If the coarse layout is empty the object is left undefined. Any
     * previous definition is discarded.
     */
    #[allow(clippy::too_many_arguments)]
    pub fn define(
        &mut self,
        fine: &DisjointBoxLayout<D>,
        coarse: &DisjointBoxLayout<D>,
        num_comps: usize,
        domain: &ProblemDomain<D>,
        ratio: i64,
        dx: f64,
        interp_radius: i64,
        pw_const_only: bool,
        geometry: &GeometryConfig)
    {
        assert!((1..=3).contains(&D), "fill patch supports one to three dimensions");
        assert!(ratio >= 2, "refinement ratio must be at least 2");
        assert!(interp_radius >= 0, "interpolation radius must be non-negative");
        assert!(dx > 0.0, "grid spacing must be positive");
        assert!(
            fine.check_periodic(&domain.refine(ratio)),
            "fine layout does not fit in the refined problem domain");

        self.state = None;

        if !coarse.is_closed() {
            info!("coarse layout is empty; fill patch left undefined");
            return
        }

        assert!(
            coarse.check_periodic(domain),
            "coarse layout does not fit in the problem domain");

        let coarsened_fine = fine.coarsen(ratio);
        let slope_radius = (interp_radius + ratio - 1) / ratio;
        let ghost = slope_radius + STENCIL_RADIUS;

        let copier = LocalCopier::new(coarse, &coarsened_fine, domain, ghost);
        let buffer = LevelData::new(&coarsened_fine, num_comps, ghost);

        let slopes = if pw_const_only {
            None
        } else {
            Some(coarsened_fine
                .iter()
                .map(|b| (0..D).map(|_| FieldArray::zeros(b.grow(slope_radius), num_comps)).collect())
                .collect())
        };

        let stencils = StencilGeometry {
            fine,
            coarse,
            domain,
            ratio,
            interp_radius,
        }.build_all(!pw_const_only);

        info!(
            "fill patch: {} fine patches over {} coarse, ratio {}, radius {} (slope {}, ghost {}), {:?}{}",
            fine.len(),
            coarse.len(),
            ratio,
            interp_radius,
            slope_radius,
            ghost,
            geometry.geometry,
            if pw_const_only { ", piecewise constant" } else { "" });

        for (n, s) in stencils.iter().enumerate() {
            debug!(
                "patch {} {}: {} fine cells from {} coarse cells",
                n, fine[n], s.fine_interp.len(), s.coarse_interp.len());
        }

        self.state = Some(Defined {
            ratio,
            dx,
            interp_radius,
            domain: *domain,
            geometry: geometry.clone(),
            fine_layout: fine.clone(),
            coarse_layout: coarse.clone(),
            copier,
            stencils,
            buffer,
            slopes,
        })
    }

    pub fn is_defined(&self) -> bool {
        self.state.is_some()
    }


    /**
     * Return the per-patch interpolation metadata, in the order of the fine
     * layout's patches. The slice is empty if the object is undefined.
     */
    pub fn stencils(&self) -> &[PatchStencil<D>] {
        match &self.state {
            Some(state) => &state.stencils,
            None => &[],
        }
    }


    /**
     * Fill the interpolation region of the fine level's ghost cells from the
     * coarse level, interpolating linearly in time between the `old` and
     * `new` coarse data with weight `coef` on the new data, and linearly in
     * space. A snapshot is absent if it is `None` or has no patches; at least
     * one must be present. Coarse components `comps.src..` are written into
     * fine components `comps.dest..`.
     */
    pub fn fill_interp(
        &mut self,
        fine: &mut LevelData<D>,
        old: Option<&LevelData<D>>,
        new: Option<&LevelData<D>>,
        coef: f64,
        comps: Components)
    {
        let state = self.state_mut();

        assert!(
            (0.0..=1.0).contains(&coef),
            "time interpolation coefficient {} is outside [0, 1]", coef);
        assert!(
            state.slopes.is_some(),
            "fill patch was defined for piecewise-constant interpolation only");

        let old = old.filter(|d| !d.is_empty());
        let new = new.filter(|d| !d.is_empty());

        state.check_levels(fine, old.iter().chain(new.iter()).copied(), comps);
        trace!("fill interp: coef {} components {:?}", coef, comps);

        state.time_interp(old, new, coef, comps);
        state.normalize(comps);
        state.fill_constant_interp(fine, comps);
        state.compute_slopes(comps);
        state.increment_linear_interp(fine, comps);
    }


    /**
     * Fill the interpolation region of the fine level's ghost cells by
     * piecewise-constant interpolation from a single coarse snapshot.
     */
    pub fn fill_interp_pw_const_space(
        &mut self,
        fine: &mut LevelData<D>,
        coarse: &LevelData<D>,
        comps: Components)
    {
        let state = self.state_mut();

        state.check_levels(fine, std::iter::once(coarse), comps);
        trace!("fill interp piecewise constant: components {:?}", comps);

        state.clear_buffer();
        state.copier.copy_to(coarse, &mut state.buffer, comps.in_place());
        state.normalize(comps);
        state.fill_constant_interp(fine, comps);
    }


    /**
     * Write every patch's stencil to the log at debug level.
     */
    pub fn log_stencils(&self) {
        for (n, stencil) in self.stencils().iter().enumerate() {
            debug!("grid {}:\n{}", n, stencil);
        }
    }

    fn state_mut(&mut self) -> &mut Defined<D> {
        match self.state.as_mut() {
            Some(state) => state,
            None => panic!("fill patch used before a successful define"),
        }
    }
}




// ============================================================================
impl<const D: usize> Defined<D> {

    fn check_levels<'a, I>(&self, fine: &LevelData<D>, coarse: I, comps: Components)
    where
        I: IntoIterator<Item = &'a LevelData<D>>
    {
        assert!(
            fine.layout() == &self.fine_layout,
            "fine data does not match the layout the fill patch was defined with");
        assert!(
            fine.ghost() >= self.interp_radius,
            "fine data has {} ghost cells, fewer than the interpolation radius {}", fine.ghost(), self.interp_radius);
        assert!(
            comps.dest + comps.count <= fine.num_comps(),
            "destination components {:?} out of range", comps.dest_range());
        assert!(
            comps.src + comps.count <= self.buffer.num_comps(),
            "source components {:?} out of range", comps.src_range());

        for level in coarse {
            assert!(
                level.layout() == &self.coarse_layout,
                "coarse data does not match the layout the fill patch was defined with");
            assert!(
                level.layout().check_periodic(&self.domain),
                "coarse data does not fit in the problem domain");
            assert!(
                comps.src + comps.count <= level.num_comps(),
                "source components {:?} out of range", comps.src_range());
        }
    }

    fn clear_buffer(&mut self) {
        self.buffer.arrays_mut().par_iter_mut().for_each(|a| a.fill(0.0));
    }


    /**
     * Blend the coarse snapshots into the working buffer. A single snapshot,
     * or a coefficient of exactly 0 or 1, is copied without arithmetic.
     */
    fn time_interp(&mut self, old: Option<&LevelData<D>>, new: Option<&LevelData<D>>, coef: f64, comps: Components) {
        let buffer_comps = comps.in_place();
        let range = comps.src_range();

        self.clear_buffer();

        match (old, new) {
            (None, None) => {
                panic!("no old coarse data and no new coarse data")
            }
            (None, Some(new)) => {
                self.copier.copy_to(new, &mut self.buffer, buffer_comps)
            }
            (Some(old), None) => {
                self.copier.copy_to(old, &mut self.buffer, buffer_comps)
            }
            (Some(_), Some(new)) if coef == 1.0 => {
                self.copier.copy_to(new, &mut self.buffer, buffer_comps)
            }
            (Some(old), Some(_)) if coef == 0.0 => {
                self.copier.copy_to(old, &mut self.buffer, buffer_comps)
            }
            (Some(old), Some(new)) => {
                let mut scratch = LevelData::new(self.buffer.layout(), self.buffer.num_comps(), self.buffer.ghost());

                self.copier.copy_to(new, &mut self.buffer, buffer_comps);
                self.copier.copy_to(old, &mut scratch, buffer_comps);

                self.buffer
                    .arrays_mut()
                    .par_iter_mut()
                    .zip(scratch.arrays_mut().par_iter_mut())
                    .for_each(|(a, b)| {
                        a.scale(coef, range.clone());
                        b.scale(1.0 - coef, range.clone());
                        a.plus(b, range.clone());
                    });
            }
        }
    }


    /**
     * Divide the buffered coarse data by the coarse cell volume factors,
     * converting conserved densities to primitive cell averages.
     */
    fn normalize(&mut self, comps: Components) {
        if self.geometry.is_cartesian() {
            return
        }
        let geometry = &self.geometry;
        let dx = self.dx * self.ratio as f64;
        let range = comps.src_range();

        self.buffer
            .arrays_mut()
            .par_iter_mut()
            .zip(self.stencils.par_iter())
            .for_each(|(data, stencil)| {
                for cell in &stencil.coarse_total {
                    let w = geometry.volume_factor(cell, dx);

                    for x in &mut data.get_slice_mut(cell)[range.clone()] {
                        *x /= w
                    }
                }
            });
    }


    /**
     * Inject the buffered coarse value into every fine interpolation cell,
     * multiplied by the fine cell volume factor.
     */
    fn fill_constant_interp(&self, fine: &mut LevelData<D>, comps: Components) {
        let geometry = &self.geometry;
        let dx = self.dx;
        let ratio = self.ratio;

        fine.arrays_mut()
            .par_iter_mut()
            .zip(self.stencils.par_iter())
            .zip(self.buffer.arrays().par_iter())
            .for_each(|((fine_data, stencil), coarse_data)| {
                for cell in &stencil.fine_interp {
                    let w = geometry.volume_factor(cell, dx);
                    let src = &coarse_data.get_slice(&cell.coarsen(ratio))[comps.src_range()];
                    let dst = &mut fine_data.get_slice_mut(cell)[comps.dest_range()];

                    for (d, s) in dst.iter_mut().zip(src) {
                        *d = s * w
                    }
                }
            });
    }


    /**
     * Compute the simple slopes along every axis, then limit them jointly.
     * Limiting considers only neighbors inside the problem domain which are
     * covered by the coarse layout.
     */
    fn compute_slopes(&mut self, comps: Components) {
        let domain = &self.domain;
        let coarse = &self.coarse_layout;
        let range = comps.src_range();
        let slopes = match self.slopes.as_mut() {
            Some(slopes) => slopes,
            None => return,
        };

        slopes
            .par_iter_mut()
            .zip(self.stencils.par_iter())
            .zip(self.buffer.arrays().par_iter())
            .for_each(|((slope, stencil), data)| {
                for (axis, directional) in stencil.directions.iter().enumerate() {
                    simple_slopes(&mut slope[axis], data, axis, directional, range.clone());
                }

                let valid = domain.clip(&slope[0].region().grow(2));
                let available = |cell: &_| valid.contains(cell) && coarse.covers(cell, domain);

                limit_slopes(slope, data, &stencil.coarse_interp, available, range.clone());
            });
    }


    /**
     * Add the linear correction along every axis to the fine interpolation
     * cells.
     */
    fn increment_linear_interp(&self, fine: &mut LevelData<D>, comps: Components) {
        let geometry = &self.geometry;
        let dx = self.dx;
        let ratio = self.ratio;
        let slopes = match self.slopes.as_ref() {
            Some(slopes) => slopes,
            None => return,
        };

        fine.arrays_mut()
            .par_iter_mut()
            .zip(self.stencils.par_iter())
            .zip(slopes.par_iter())
            .for_each(|((fine_data, stencil), slope)| {
                for cell in &stencil.fine_interp {
                    let coarse_cell = cell.coarsen(ratio);
                    let w = geometry.volume_factor(cell, dx);

                    for (axis, s) in slope.iter().enumerate() {
                        let c = geometry.interp_coef(cell, axis, dx, ratio) * w;
                        let src = &s.get_slice(&coarse_cell)[comps.src_range()];
                        let dst = &mut fine_data.get_slice_mut(cell)[comps.dest_range()];

                        for (d, x) in dst.iter_mut().zip(src) {
                            *d += c * x
                        }
                    }
                }
            });
    }
}
