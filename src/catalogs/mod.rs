//! Star sources feeding the mapper: an embedded bright-star list, a seeded
//! synthetic sample, and Gaia DR3 rows (CSV or, with the `fetch` feature,
//! straight from the Gaia archive).

pub mod bright_stars;
pub mod gaia;
pub mod synthetic;
