//! Plot positions for mapped stars.
//!
//! The 2D mode plots equatorial coordinates directly. The 3D mode shifts right
//! ascension by a fixed offset to get a galactic-like longitude, keeps the
//! declination as latitude, and places each star at an arbitrary radius.
//! This is **not** an equatorial → galactic rotation; it exists to give
//! 3D views a plausible spread and must not be used for astrometry.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

use crate::{MapError, Vector3};

/// Longitude offset (degrees) applied to right ascension in the 3D mode.
pub const GALACTIC_LONGITUDE_OFFSET_DEG: f64 = 123.932;

/// Approximate galactic-like `(l, b)` in degrees from `(ra, dec)` in degrees.
///
/// `l = (ra + 123.932) mod 360`, `b = dec`.
pub fn equatorial_to_galactic_approx(ra_deg: f64, dec_deg: f64) -> (f64, f64) {
    let l = (ra_deg + GALACTIC_LONGITUDE_OFFSET_DEG).rem_euclid(360.0);
    (l, dec_deg)
}

/// Cartesian point at longitude `l_deg`, latitude `b_deg` and distance `r`.
pub fn spherical_to_cartesian(l_deg: f64, b_deg: f64, r: f64) -> Vector3 {
    let (lsin, lcos) = l_deg.to_radians().sin_cos();
    let (bsin, bcos) = b_deg.to_radians().sin_cos();
    Vector3::new(r * bcos * lcos, r * bcos * lsin, r * bsin)
}

/// Where each star's (non-physical) distance comes from in the 3D mode.
#[derive(Debug, Clone, PartialEq)]
pub enum RadialDistance {
    /// Every star at the same distance.
    Fixed(f64),
    /// Independent uniform draws in `[min, max)`, reproducible by `seed`.
    Uniform { min: f64, max: f64, seed: u64 },
}

impl Default for RadialDistance {
    fn default() -> Self {
        RadialDistance::Uniform {
            min: 1.0,
            max: 10.0,
            seed: 42,
        }
    }
}

impl RadialDistance {
    pub fn validate(&self) -> Result<(), MapError> {
        match *self {
            RadialDistance::Fixed(r) if !(r.is_finite() && r > 0.0) => Err(
                MapError::invalid_radial_distance(format!("fixed distance must be > 0, got {r}")),
            ),
            RadialDistance::Uniform { min, max, .. }
                if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) =>
            {
                Err(MapError::invalid_radial_distance(format!(
                    "uniform bounds must satisfy 0 < min < max, got [{min}, {max})"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Validate and build the distribution the mapper samples from.
    pub(crate) fn distribution(&self) -> Result<RadialDistribution, MapError> {
        self.validate()?;
        Ok(match *self {
            RadialDistance::Fixed(r) => RadialDistribution::Fixed(r),
            RadialDistance::Uniform { min, max, seed } => RadialDistribution::Uniform {
                dist: Uniform::new(min, max)
                    .map_err(|e| MapError::invalid_radial_distance(e.to_string()))?,
                seed,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) enum RadialDistribution {
    Fixed(f64),
    Uniform { dist: Uniform<f64>, seed: u64 },
}

impl RadialDistribution {
    /// A fresh sampler; every sampler from the same distribution yields the
    /// same sequence.
    pub(crate) fn sampler(&self) -> RadialSampler {
        match self {
            RadialDistribution::Fixed(r) => RadialSampler::Fixed(*r),
            RadialDistribution::Uniform { dist, seed } => RadialSampler::Uniform {
                dist: *dist,
                rng: StdRng::seed_from_u64(*seed),
            },
        }
    }
}

pub(crate) enum RadialSampler {
    Fixed(f64),
    Uniform { dist: Uniform<f64>, rng: StdRng },
}

impl RadialSampler {
    pub(crate) fn next_distance(&mut self) -> f64 {
        match self {
            RadialSampler::Fixed(r) => *r,
            RadialSampler::Uniform { dist, rng } => dist.sample(rng),
        }
    }
}

/// How star positions are laid out.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Projection {
    /// 2D: `x = ra`, `y = dec`, both in degrees.
    #[default]
    Equatorial,
    /// 3D: approximate galactic longitude/latitude at an arbitrary radius.
    Galactic3d { radial: RadialDistance },
}

impl Projection {
    pub fn is_3d(&self) -> bool {
        matches!(self, Projection::Galactic3d { .. })
    }
}

/// Center and cubic half-extent of a 3D point cloud.
///
/// The center is the mean position; the half-range is half of the largest
/// per-axis extent, so a cube of side `2 * half_range` around the center
/// contains every point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    pub center: Vector3,
    pub half_range: f64,
}

impl SceneBounds {
    /// `None` for an empty set. A single point (or any zero-extent set)
    /// gets a unit half-range.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vector3>,
    {
        let mut n = 0usize;
        let mut sum = Vector3::zeros();
        let mut lo = Vector3::repeat(f64::INFINITY);
        let mut hi = Vector3::repeat(f64::NEG_INFINITY);
        for p in points {
            n += 1;
            sum += p;
            lo = lo.inf(p);
            hi = hi.sup(p);
        }
        if n == 0 {
            return None;
        }
        let extent = (hi - lo).max();
        let half_range = if extent > 0.0 { extent / 2.0 } else { 1.0 };
        Some(Self {
            center: sum / n as f64,
            half_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitude_offset_wraps() {
        let (l, b) = equatorial_to_galactic_approx(0.0, 12.5);
        assert!((l - 123.932).abs() < 1e-12);
        assert_eq!(b, 12.5);

        let (l, _) = equatorial_to_galactic_approx(300.0, 0.0);
        assert!((l - 63.932).abs() < 1e-9);
        assert!((0.0..360.0).contains(&l));
    }

    #[test]
    fn cartesian_has_requested_radius() {
        for &(l, b, r) in &[(0.0, 0.0, 1.0), (123.9, 45.0, 7.5), (359.0, -89.0, 2.0)] {
            let p = spherical_to_cartesian(l, b, r);
            assert!((p.norm() - r).abs() < 1e-12);
        }
        let north = spherical_to_cartesian(10.0, 90.0, 3.0);
        assert!((north.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn uniform_sampler_is_reproducible_and_bounded() {
        let radial = RadialDistance::Uniform {
            min: 1.0,
            max: 10.0,
            seed: 7,
        };
        let dist = radial.distribution().unwrap();
        let mut a = dist.sampler();
        let mut b = dist.sampler();
        for _ in 0..1000 {
            let ra = a.next_distance();
            assert_eq!(ra, b.next_distance());
            assert!((1.0..10.0).contains(&ra));
        }
    }

    #[test]
    fn invalid_radial_distances_are_rejected() {
        assert!(RadialDistance::Fixed(0.0).validate().is_err());
        assert!(RadialDistance::Fixed(f64::NAN).validate().is_err());
        assert!(RadialDistance::Uniform {
            min: 5.0,
            max: 5.0,
            seed: 0
        }
        .validate()
        .is_err());
        assert!(RadialDistance::Uniform {
            min: -1.0,
            max: 5.0,
            seed: 0
        }
        .validate()
        .is_err());
        assert!(RadialDistance::default().validate().is_ok());
    }

    #[test]
    fn scene_bounds_center_and_range() {
        let pts = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(4.0, 1.0, -1.0),
            Vector3::new(2.0, 2.0, 1.0),
        ];
        let bounds = SceneBounds::from_points(&pts).unwrap();
        assert!((bounds.center - Vector3::new(2.0, 1.0, 0.0)).norm() < 1e-12);
        assert_eq!(bounds.half_range, 2.0);

        assert!(SceneBounds::from_points(&Vec::<Vector3>::new()).is_none());
        let single = SceneBounds::from_points(&pts[..1]).unwrap();
        assert_eq!(single.half_range, 1.0);
    }
}
