//! The star → visual attribute mapping.
//!
//! [`StarRenderMapper::map`] is a pure function of its input and its
//! [`MapperConfig`]: the same stars under the same configuration always map to
//! the same attributes, including the seeded radii of the 3D mode.

use tracing::debug;

use crate::color::{ramp_color, ColorPolicy, Rgb};
use crate::projection::{
    equatorial_to_galactic_approx, spherical_to_cartesian, Projection, RadialDistribution,
};
use crate::{InvalidKind, InvalidRecord, MapError, RecordField, StarRecord, Vector3};

/// Marker size for an apparent magnitude: `size_scale · 10^(-magnitude / 5)`.
///
/// Strictly decreasing in magnitude for any `size_scale > 0`.
pub fn magnitude_to_size(magnitude: f64, size_scale: f64) -> f64 {
    size_scale * 10f64.powf(-magnitude / 5.0)
}

/// Parameters controlling the mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct MapperConfig {
    /// `k` in `size = k · 10^(-m/5)`. Must be finite and > 0. Default 20.
    pub size_scale: f64,
    /// How BP-RP is placed on the color ramp. Default [`ColorPolicy::BpRp`].
    pub color_policy: ColorPolicy,
    /// 2D equatorial or 3D approximate-galactic layout. Default 2D.
    pub projection: Projection,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            size_scale: 20.0,
            color_policy: ColorPolicy::default(),
            projection: Projection::default(),
        }
    }
}

impl MapperConfig {
    pub fn validate(&self) -> Result<(), MapError> {
        if !(self.size_scale.is_finite() && self.size_scale > 0.0) {
            return Err(MapError::InvalidSizeScale(self.size_scale));
        }
        if let Projection::Galactic3d { radial } = &self.projection {
            radial.validate()?;
        }
        Ok(())
    }
}

/// Plot position of a mapped star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotPosition {
    /// `x` = right ascension, `y` = declination, in degrees.
    Planar { x: f64, y: f64 },
    /// Illustrative 3D position; see [`Projection::Galactic3d`].
    Spatial(Vector3),
}

/// Per-star output of the mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualAttributes {
    /// Index of the source record in the mapper input.
    pub index: usize,
    pub id: u64,
    pub position: PlotPosition,
    /// Marker size (area-like units, > 0).
    pub size: f64,
    /// Value fed to the color scale: clamped BP-RP or temperature in Kelvin,
    /// depending on the policy.
    pub color_value: f64,
    /// Position along the color ramp, 0 = blue, 1 = red.
    pub ramp_position: f64,
    pub color: Rgb,
}

/// Mapper output: the mapped stars plus every record that was skipped.
///
/// `len() + skipped_count()` always equals the input length.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedBatch {
    pub attributes: Vec<VisualAttributes>,
    pub skipped: Vec<InvalidRecord>,
    /// Policy the colors were computed with, for color bars.
    pub color_policy: ColorPolicy,
}

impl MappedBatch {
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Input indices of the skipped records, ascending.
    pub fn skipped_indices(&self) -> Vec<usize> {
        self.skipped.iter().map(|s| s.index).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VisualAttributes> {
        self.attributes.iter()
    }

    /// 3D positions of the mapped stars (empty in the 2D mode).
    pub fn spatial_positions(&self) -> Vec<Vector3> {
        self.attributes
            .iter()
            .filter_map(|a| match a.position {
                PlotPosition::Spatial(p) => Some(p),
                PlotPosition::Planar { .. } => None,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a MappedBatch {
    type Item = &'a VisualAttributes;
    type IntoIter = std::slice::Iter<'a, VisualAttributes>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

fn spatial_position(star: &StarRecord, distance: f64) -> PlotPosition {
    let (l, b) = equatorial_to_galactic_approx(star.ra_deg, star.dec_deg);
    PlotPosition::Spatial(spherical_to_cartesian(l, b, distance))
}

/// Maps star records to visual attributes under a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct StarRenderMapper {
    config: MapperConfig,
    /// Present in the 3D mode only.
    radial: Option<RadialDistribution>,
}

impl StarRenderMapper {
    /// Validate `config` once; [`map`](Self::map) is infallible afterwards.
    pub fn new(config: MapperConfig) -> Result<Self, MapError> {
        config.validate()?;
        let radial = match &config.projection {
            Projection::Galactic3d { radial } => Some(radial.distribution()?),
            Projection::Equatorial => None,
        };
        Ok(Self { config, radial })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Map every record, skipping (and reporting) the invalid ones.
    ///
    /// Output order follows input order. In the 3D mode radii are drawn only
    /// for records that pass validation, in input order.
    pub fn map(&self, stars: &[StarRecord]) -> MappedBatch {
        let mut sampler = self.radial.as_ref().map(RadialDistribution::sampler);

        let mut attributes = Vec::with_capacity(stars.len());
        let mut skipped = Vec::new();

        for (index, star) in stars.iter().enumerate() {
            match self.map_one(index, star) {
                Ok((size, color_value, ramp_position)) => {
                    let position = match sampler.as_mut() {
                        Some(sampler) => spatial_position(star, sampler.next_distance()),
                        None => PlotPosition::Planar {
                            x: star.ra_deg,
                            y: star.dec_deg,
                        },
                    };
                    attributes.push(VisualAttributes {
                        index,
                        id: star.id,
                        position,
                        size,
                        color_value,
                        ramp_position,
                        color: ramp_color(ramp_position),
                    });
                }
                Err(invalid) => {
                    debug!("Skipping {}", invalid);
                    skipped.push(invalid);
                }
            }
        }

        debug!(
            "Mapped {} of {} stars ({} skipped)",
            attributes.len(),
            stars.len(),
            skipped.len()
        );

        MappedBatch {
            attributes,
            skipped,
            color_policy: self.config.color_policy,
        }
    }

    /// Size, color value and ramp position for one record.
    fn map_one(&self, index: usize, star: &StarRecord) -> Result<(f64, f64, f64), InvalidRecord> {
        let invalid = |field, value, kind| InvalidRecord {
            index,
            id: star.id,
            field,
            value,
            kind,
        };

        star.validate()
            .map_err(|(field, value, kind)| invalid(field, value, kind))?;

        // Extreme magnitudes over/underflow the power law.
        let size = magnitude_to_size(star.magnitude, self.config.size_scale);
        if !(size.is_finite() && size > 0.0) {
            return Err(invalid(
                RecordField::Magnitude,
                star.magnitude,
                InvalidKind::OutOfRange,
            ));
        }

        let policy = self.config.color_policy;
        let color_value = policy.scale_value(star.bp_rp);
        Ok((size, color_value, policy.ramp_position_for_value(color_value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RadialDistance;

    fn star(id: u64, magnitude: f64, bp_rp: f64) -> StarRecord {
        StarRecord::new(id, 120.0, 30.0, magnitude, bp_rp)
    }

    #[test]
    fn regression_fixture_default_config() {
        let mapper = StarRenderMapper::default();
        let batch = mapper.map(&[star(1, 0.0, 0.0)]);
        assert_eq!(batch.len(), 1);
        let a = &batch.attributes[0];
        assert_eq!(a.size, 20.0);
        assert!((a.ramp_position - 0.2).abs() < 1e-12);
        assert!((a.color.r - 0.8).abs() < 1e-12);
        assert!((a.color.g - 0.8).abs() < 1e-12);
        assert!((a.color.b - 1.0).abs() < 1e-12);
        assert_eq!(a.position, PlotPosition::Planar { x: 120.0, y: 30.0 });
    }

    #[test]
    fn brighter_stars_are_larger() {
        let mags: Vec<f64> = (-30..=80).map(|i| i as f64 * 0.1).collect();
        for pair in mags.windows(2) {
            assert!(magnitude_to_size(pair[0], 20.0) > magnitude_to_size(pair[1], 20.0));
        }
        // Five magnitudes = a factor of ten in size
        let ratio = magnitude_to_size(1.0, 0.8) / magnitude_to_size(6.0, 0.8);
        assert!((ratio - 10.0).abs() < 1e-9);
    }

    #[test]
    fn nan_magnitude_is_skipped_and_counted() {
        let mapper = StarRenderMapper::default();
        let stars = vec![star(1, 1.0, 0.5), star(2, f64::NAN, 0.5), star(3, 2.0, 0.5)];
        let batch = mapper.map(&stars);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.skipped_count(), 1);
        assert_eq!(batch.skipped_indices(), vec![1]);
        let skipped = &batch.skipped[0];
        assert_eq!(skipped.id, 2);
        assert_eq!(skipped.field, RecordField::Magnitude);
        assert_eq!(skipped.kind, InvalidKind::NonFinite);
        // Order is preserved around the gap
        let ids: Vec<u64> = batch.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(batch.attributes[1].index, 2);
    }

    #[test]
    fn overflowing_magnitude_is_out_of_range() {
        let mapper = StarRenderMapper::default();
        let batch = mapper.map(&[star(9, -5000.0, 0.0), star(10, 5000.0, 0.0)]);
        assert!(batch.is_empty());
        assert_eq!(batch.skipped_count(), 2);
        assert!(batch
            .skipped
            .iter()
            .all(|s| s.field == RecordField::Magnitude && s.kind == InvalidKind::OutOfRange));
    }

    #[test]
    fn temperature_policy_reports_kelvin() {
        let mapper = StarRenderMapper::new(MapperConfig {
            color_policy: ColorPolicy::Temperature,
            ..Default::default()
        })
        .unwrap();
        let batch = mapper.map(&[star(1, 1.0, -0.5), star(2, 1.0, 2.0)]);
        assert!(batch.attributes[0].color_value > batch.attributes[1].color_value);
        assert!(batch.attributes[0].ramp_position.abs() < 1e-12);
        assert!((batch.attributes[1].ramp_position - 1.0).abs() < 1e-12);
        assert_eq!(batch.color_policy, ColorPolicy::Temperature);
    }

    #[test]
    fn galactic_mode_places_stars_at_fixed_radius() {
        let mapper = StarRenderMapper::new(MapperConfig {
            projection: Projection::Galactic3d {
                radial: RadialDistance::Fixed(5.0),
            },
            ..Default::default()
        })
        .unwrap();
        let stars = [star(1, 1.0, 0.0), StarRecord::new(2, 236.068, 0.0, 1.0, 0.0)];
        let batch = mapper.map(&stars);
        let positions = batch.spatial_positions();
        assert_eq!(positions.len(), 2);
        for p in &positions {
            assert!((p.norm() - 5.0).abs() < 1e-9);
        }
        // RA 236.068 + 123.932 wraps to l = 0 on the equator
        assert!((positions[1] - Vector3::new(5.0, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn galactic_mode_is_deterministic() {
        let mapper = StarRenderMapper::new(MapperConfig {
            projection: Projection::Galactic3d {
                radial: RadialDistance::default(),
            },
            ..Default::default()
        })
        .unwrap();
        let stars: Vec<StarRecord> = (0..50)
            .map(|i| StarRecord::new(i, i as f64 * 7.0, (i as f64) - 25.0, 4.0, 0.3))
            .collect();
        assert_eq!(mapper.map(&stars), mapper.map(&stars));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        for k in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = StarRenderMapper::new(MapperConfig {
                size_scale: k,
                ..Default::default()
            })
            .unwrap_err();
            assert!(matches!(err, MapError::InvalidSizeScale(_)));
        }
        let err = StarRenderMapper::new(MapperConfig {
            projection: Projection::Galactic3d {
                radial: RadialDistance::Fixed(-2.0),
            },
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, MapError::InvalidRadialDistance { .. }));
    }

    #[test]
    fn empty_input_maps_to_empty_batch() {
        let batch = StarRenderMapper::default().map(&[]);
        assert!(batch.is_empty());
        assert_eq!(batch.skipped_count(), 0);
    }
}
