use crate::{InvalidKind, RecordField};

/// A catalog star as consumed by the mapper.
///
/// Positions are equatorial, in degrees. The magnitude is an apparent
/// magnitude (lower = brighter); for Gaia sources it is `phot_g_mean_mag`.
/// Missing catalog values are carried as NaN and rejected by [`StarRecord::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    pub id: u64,
    pub name: Option<String>,
    /// Right ascension in degrees, `[0, 360)`.
    pub ra_deg: f64,
    /// Declination in degrees, `[-90, 90]`.
    pub dec_deg: f64,
    pub magnitude: f64,
    /// Gaia BP-RP color index.
    pub bp_rp: f64,
}

impl StarRecord {
    pub fn new(id: u64, ra_deg: f64, dec_deg: f64, magnitude: f64, bp_rp: f64) -> Self {
        Self {
            id,
            name: None,
            ra_deg,
            dec_deg,
            magnitude,
            bp_rp,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check every field against its domain.
    ///
    /// Fields are checked in declaration order and the first failure is
    /// returned. BP-RP only needs to be finite; out-of-range colors are
    /// clamped by the color mapping rather than rejected.
    pub fn validate(&self) -> Result<(), (RecordField, f64, InvalidKind)> {
        let fields = [
            (RecordField::RightAscension, self.ra_deg),
            (RecordField::Declination, self.dec_deg),
            (RecordField::Magnitude, self.magnitude),
            (RecordField::ColorIndex, self.bp_rp),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err((field, value, InvalidKind::NonFinite));
            }
        }
        if !(0.0..360.0).contains(&self.ra_deg) {
            return Err((
                RecordField::RightAscension,
                self.ra_deg,
                InvalidKind::OutOfRange,
            ));
        }
        if !(-90.0..=90.0).contains(&self.dec_deg) {
            return Err((RecordField::Declination, self.dec_deg, InvalidKind::OutOfRange));
        }
        Ok(())
    }
}
