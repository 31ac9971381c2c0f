//! # exosky
//!
//! Star-catalog **sky maps as seen from an exoplanet**.
//!
//! Star records (position, apparent magnitude, BP-RP color index) come in from
//! a catalog source; [`StarRenderMapper`] turns each one into the visual
//! attributes a scatter plot needs (position, marker size, marker color); an
//! optional plotting layer draws the chart.
//!
//! ## Example
//!
//! ```no_run
//! use exosky::{catalogs, ColorPolicy, MapperConfig, StarRenderMapper};
//!
//! let stars = catalogs::bright_stars::bright_stars();
//!
//! let mapper = StarRenderMapper::new(MapperConfig {
//!     color_policy: ColorPolicy::Temperature,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let batch = mapper.map(&stars);
//! println!("{} stars mapped, {} skipped", batch.len(), batch.skipped_count());
//! for attrs in batch.iter() {
//!     println!("{:?} size={:.2} rgb={:?}", attrs.position, attrs.size, attrs.color.to_rgb8());
//! }
//! ```
//!
//! ## Mapping overview
//!
//! 1. **Validation**: records with non-finite fields, RA outside `[0, 360)` or
//!    Dec outside `[-90, 90]` are skipped and reported in
//!    [`MappedBatch::skipped`]; the batch is never aborted.
//! 2. **Size**: `size = k · 10^(-m/5)`, brighter stars render larger.
//! 3. **Color**: BP-RP is clamped to `[-0.5, 2.0]` and placed on a five-stop
//!    blue → white → yellow → orange → red ramp, either directly
//!    ([`ColorPolicy::BpRp`], the default) or through an empirical effective
//!    temperature ([`ColorPolicy::Temperature`]).
//! 4. **Position**: RA/Dec as plane coordinates, or an *approximate*
//!    galactic-like longitude/latitude placed at an arbitrary radius for 3D
//!    views ([`Projection::Galactic3d`]). The 3D mode is illustrative only.

pub mod catalogs;
pub mod color;
mod error;
pub mod mapper;
#[cfg(feature = "plot")]
pub mod plot;
pub mod projection;
pub mod star;

pub use color::{ColorPolicy, Rgb};
pub use error::*;
pub use mapper::{
    magnitude_to_size, MappedBatch, MapperConfig, PlotPosition, StarRenderMapper, VisualAttributes,
};
pub use projection::{Projection, RadialDistance, SceneBounds};
pub use star::*;

// 3D positions are plain f64 vectors; the mapper is illustrative, not astrometric.
pub type Vector3 = nalgebra::Vector3<f64>;
