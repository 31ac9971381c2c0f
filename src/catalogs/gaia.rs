//! Gaia DR3 star rows.
//!
//! Rows come from CSV with a header line, either a file exported from the
//! Gaia archive or the body of a TAP `sync` query (see [`bright_star_query`]).
//! Columns are looked up by name, case-insensitively; `source_id`, `ra`,
//! `dec` and `phot_g_mean_mag` are required, `bp_rp`, `phot_bp_mean_mag` and
//! `phot_rp_mean_mag` are optional.
//!
//! Empty, missing or non-numeric cells are read as NaN rather than rejected, so
//! that incomplete rows reach the mapper and are reported there with the rest
//! of the skipped records. Only rows without a usable `source_id` are dropped
//! by the reader.

use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context};
use tracing::{debug, info, warn};

use crate::StarRecord;

/// Gaia archive TAP synchronous query endpoint.
pub const GAIA_TAP_SYNC_URL: &str = "https://gea.esac.esa.int/tap-server/tap/sync";

#[derive(Debug, Clone, PartialEq)]
pub struct GaiaStar {
    pub source_id: u64,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub phot_g_mean_mag: f64,
    /// NaN when the row has no `bp_rp` column or cell.
    pub bp_rp: f64,
    pub phot_bp_mean_mag: Option<f64>,
    pub phot_rp_mean_mag: Option<f64>,
}

impl GaiaStar {
    /// BP-RP color index, falling back to `phot_bp_mean_mag - phot_rp_mean_mag`
    /// when the catalog value is missing. NaN when neither is available.
    pub fn color_index(&self) -> f64 {
        if self.bp_rp.is_finite() {
            return self.bp_rp;
        }
        match (self.phot_bp_mean_mag, self.phot_rp_mean_mag) {
            (Some(bp), Some(rp)) => bp - rp,
            _ => f64::NAN,
        }
    }
}

impl From<&GaiaStar> for StarRecord {
    fn from(star: &GaiaStar) -> Self {
        StarRecord::new(
            star.source_id,
            star.ra_deg,
            star.dec_deg,
            star.phot_g_mean_mag,
            star.color_index(),
        )
    }
}

/// Convert Gaia rows to mapper input.
pub fn to_star_records(stars: &[GaiaStar]) -> Vec<StarRecord> {
    stars.iter().map(StarRecord::from).collect()
}

struct Columns {
    source_id: usize,
    ra: usize,
    dec: usize,
    g_mag: usize,
    bp_rp: Option<usize>,
    bp_mag: Option<usize>,
    rp_mag: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> anyhow::Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| anyhow!("Gaia CSV is missing column '{}'", name))
        };
        Ok(Self {
            source_id: require("source_id")?,
            ra: require("ra")?,
            dec: require("dec")?,
            g_mag: require("phot_g_mean_mag")?,
            bp_rp: find("bp_rp"),
            bp_mag: find("phot_bp_mean_mag"),
            rp_mag: find("phot_rp_mean_mag"),
        })
    }
}

/// Parse an optional float cell. Empty or absent cells are `None`; cells that
/// are not numbers (`--`, `null`, ...) are logged and also read as `None`.
fn parse_cell(
    record: &csv::StringRecord,
    idx: Option<usize>,
    column: &str,
    line: u64,
) -> Option<f64> {
    match idx.and_then(|i| record.get(i)).map(str::trim) {
        None | Some("") => None,
        Some(s) => match s.parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Gaia CSV line {}: {} = '{}' is not a number", line, column, s);
                None
            }
        },
    }
}

/// Parse Gaia CSV from any reader.
///
/// Only a missing header or a required column makes this fail. Short rows
/// and unreadable numbers become NaN fields; rows without a usable
/// `source_id` are dropped and counted in the log.
pub fn parse_gaia_csv<R: Read>(reader: R) -> anyhow::Result<Vec<GaiaStar>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);
    let cols = Columns::from_headers(rdr.headers()?)?;

    let mut stars = Vec::new();
    let mut dropped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let source_id = record
            .get(cols.source_id)
            .and_then(|s| s.trim().parse::<u64>().ok());
        let Some(source_id) = source_id else {
            debug!("Gaia CSV line {}: no usable source_id, row dropped", line);
            dropped += 1;
            continue;
        };
        let float = |idx, column| parse_cell(&record, idx, column, line);
        stars.push(GaiaStar {
            source_id,
            ra_deg: float(Some(cols.ra), "ra").unwrap_or(f64::NAN),
            dec_deg: float(Some(cols.dec), "dec").unwrap_or(f64::NAN),
            phot_g_mean_mag: float(Some(cols.g_mag), "phot_g_mean_mag").unwrap_or(f64::NAN),
            bp_rp: float(cols.bp_rp, "bp_rp").unwrap_or(f64::NAN),
            phot_bp_mean_mag: float(cols.bp_mag, "phot_bp_mean_mag"),
            phot_rp_mean_mag: float(cols.rp_mag, "phot_rp_mean_mag"),
        });
    }
    if dropped > 0 {
        warn!("Dropped {} Gaia rows without a usable source_id", dropped);
    }
    Ok(stars)
}

/// Read a Gaia CSV file.
pub fn read_gaia_csv<P: AsRef<Path>>(file: P) -> anyhow::Result<Vec<GaiaStar>> {
    let path = file.as_ref();
    let f = std::fs::File::open(path)
        .with_context(|| format!("Failed to open Gaia CSV {}", path.display()))?;
    let stars = parse_gaia_csv(f)?;
    info!("Loaded {} Gaia rows from {}", stars.len(), path.display());
    Ok(stars)
}

/// ADQL for the `limit` brightest Gaia DR3 sources with G < `max_mag` and
/// complete photometry, brightest first.
pub fn bright_star_query(limit: usize, max_mag: f64) -> String {
    format!(
        "SELECT TOP {limit} \
         source_id, ra, dec, bp_rp, phot_g_mean_mag, phot_bp_mean_mag, phot_rp_mean_mag \
         FROM gaiadr3.gaia_source \
         WHERE phot_g_mean_mag < {max_mag} \
         AND bp_rp IS NOT NULL \
         AND phot_bp_mean_mag IS NOT NULL \
         AND phot_rp_mean_mag IS NOT NULL \
         ORDER BY phot_g_mean_mag ASC"
    )
}

/// Run [`bright_star_query`] against the Gaia archive and parse the result.
///
/// This is a single blocking request; nothing is cached.
#[cfg(feature = "fetch")]
pub fn fetch_gaia_stars(limit: usize, max_mag: f64) -> anyhow::Result<Vec<GaiaStar>> {
    let query = bright_star_query(limit, max_mag);
    info!(
        "Querying Gaia archive for up to {} stars with G < {}",
        limit, max_mag
    );

    let resp = ureq::get(GAIA_TAP_SYNC_URL)
        .query("REQUEST", "doQuery")
        .query("LANG", "ADQL")
        .query("FORMAT", "csv")
        .query("QUERY", &query)
        .call()
        .with_context(|| format!("Gaia TAP query to {} failed", GAIA_TAP_SYNC_URL))?;

    let body = resp.into_body().read_to_string()?;
    let stars = parse_gaia_csv(body.as_bytes())?;
    info!("Received {} Gaia rows", stars.len());
    Ok(stars)
}
