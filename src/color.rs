//! Marker colors from the BP-RP color index.
//!
//! Every star color is a point on one fixed five-stop ramp,
//! blue → white → yellow → orange → red, with equally spaced stops and
//! per-channel linear interpolation. A star's BP-RP is first clamped to
//! [`BP_RP_MIN`]..=[`BP_RP_MAX`]; values outside that domain land on the
//! nearest ramp end and are never extrapolated.
//!
//! Two policies place the clamped color index on the ramp:
//!
//! - [`ColorPolicy::BpRp`]: linear in BP-RP. This is the default.
//! - [`ColorPolicy::Temperature`]: linear in the empirical effective
//!   temperature from [`bp_rp_to_temperature`], hottest at the blue end.
//!
//! Both are monotonic in BP-RP and agree at the domain ends.

/// Bluest BP-RP the ramp resolves.
pub const BP_RP_MIN: f64 = -0.5;
/// Reddest BP-RP the ramp resolves.
pub const BP_RP_MAX: f64 = 2.0;

/// Scale of the empirical temperature relation, in Kelvin.
pub const TEMPERATURE_SCALE_K: f64 = 6400.0;

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Quantize to 8 bits per channel.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

/// Ramp stops, matching the named colors `blue`, `white`, `yellow`,
/// `orange` (#FFA500) and `red`.
pub const STAR_RAMP: [Rgb; 5] = [
    Rgb::new(0.0, 0.0, 1.0),
    Rgb::new(1.0, 1.0, 1.0),
    Rgb::new(1.0, 1.0, 0.0),
    Rgb::new(1.0, 165.0 / 255.0, 0.0),
    Rgb::new(1.0, 0.0, 0.0),
];

/// Color at ramp position `t` (0 = blue, 1 = red). `t` is clamped to `[0, 1]`.
pub fn ramp_color(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let segments = (STAR_RAMP.len() - 1) as f64;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(STAR_RAMP.len() - 2);
    let frac = scaled - idx as f64;
    STAR_RAMP[idx].lerp(&STAR_RAMP[idx + 1], frac)
}

/// Clamp a BP-RP color index into the ramp's domain.
pub fn clamp_bp_rp(bp_rp: f64) -> f64 {
    bp_rp.clamp(BP_RP_MIN, BP_RP_MAX)
}

/// Approximate effective temperature (K) from BP-RP.
///
/// `T = 6400 · (1 / (0.92·x + 1.7) + 1 / (0.92·x + 0.62))`, with `x` the
/// clamped color index. The relation is a rough two-term empirical fit; it is
/// strictly decreasing on the clamped domain (the second pole sits at
/// x ≈ -0.674, outside it).
pub fn bp_rp_to_temperature(bp_rp: f64) -> f64 {
    let x = clamp_bp_rp(bp_rp);
    TEMPERATURE_SCALE_K * (1.0 / (0.92 * x + 1.7) + 1.0 / (0.92 * x + 0.62))
}

/// How the color index is placed on [`STAR_RAMP`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPolicy {
    /// Linear in clamped BP-RP.
    #[default]
    BpRp,
    /// Linear in the temperature derived from clamped BP-RP.
    ///
    /// The temperature range is about 4410 K to 45160 K and most of it is
    /// spent on the hottest colors, so ordinary stars sit near the red end:
    /// BP-RP 0.0 lands at ramp position ~0.76 (orange) and 0.5 at ~0.89.
    Temperature,
}

impl ColorPolicy {
    /// The scalar this policy feeds to the color scale: clamped BP-RP, or
    /// temperature in Kelvin.
    pub fn scale_value(&self, bp_rp: f64) -> f64 {
        match self {
            ColorPolicy::BpRp => clamp_bp_rp(bp_rp),
            ColorPolicy::Temperature => bp_rp_to_temperature(bp_rp),
        }
    }

    /// Range of [`scale_value`](Self::scale_value) as `(low, high)`.
    pub fn value_range(&self) -> (f64, f64) {
        match self {
            ColorPolicy::BpRp => (BP_RP_MIN, BP_RP_MAX),
            ColorPolicy::Temperature => (
                bp_rp_to_temperature(BP_RP_MAX),
                bp_rp_to_temperature(BP_RP_MIN),
            ),
        }
    }

    /// Ramp position in `[0, 1]` for a scale value.
    pub fn ramp_position_for_value(&self, value: f64) -> f64 {
        let (lo, hi) = self.value_range();
        let t = match self {
            ColorPolicy::BpRp => (value - lo) / (hi - lo),
            // Hot stars sit at the blue end.
            ColorPolicy::Temperature => (hi - value) / (hi - lo),
        };
        t.clamp(0.0, 1.0)
    }

    /// Inverse of [`ramp_position_for_value`](Self::ramp_position_for_value).
    pub fn value_at_ramp_position(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let (lo, hi) = self.value_range();
        match self {
            ColorPolicy::BpRp => lo + t * (hi - lo),
            ColorPolicy::Temperature => hi - t * (hi - lo),
        }
    }

    /// Ramp position in `[0, 1]` for a raw BP-RP.
    pub fn ramp_position(&self, bp_rp: f64) -> f64 {
        self.ramp_position_for_value(self.scale_value(bp_rp))
    }

    pub fn color(&self, bp_rp: f64) -> Rgb {
        ramp_color(self.ramp_position(bp_rp))
    }

    /// Axis label for a color bar.
    pub fn label(&self) -> &'static str {
        match self {
            ColorPolicy::BpRp => "BP-RP Color Index",
            ColorPolicy::Temperature => "Temperature (K)",
        }
    }
}
