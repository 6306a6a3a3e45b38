//! Fillpatch fills the ghost cells of fine grid patches in a block-structured
//! adaptive mesh refinement (AMR) hierarchy, by interpolating from the next
//! coarser level. Interpolation is piecewise linear in space, with slopes
//! limited jointly in all directions so no new extrema are created, and
//! linear in time between two coarse snapshots. Periodic domains and
//! curvilinear (cylindrical, spherical, polar and log-radius) coordinates
//! are supported; in curvilinear coordinates the reconstruction conserves
//! the volume-integrated quantity.
//!
//! The interpolation metadata is derived once per pair of level layouts, in
//! `PiecewiseLinearFillPatch::define`, and reused for every fill until the
//! hierarchy is regridded.

pub mod cell_set;
pub mod copier;
pub mod error;
pub mod fill_patch;
pub mod geometry;
pub mod index_box;
pub mod int_vect;
pub mod layout;
pub mod level_data;
pub mod problem_domain;
pub mod slopes;
pub mod stencil;

pub use error::Error;
pub use fill_patch::PiecewiseLinearFillPatch;
