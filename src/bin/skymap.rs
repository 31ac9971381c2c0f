//! Render a sky map as seen from an exoplanet.
//!
//! Usage:
//! ```text
//! skymap --source bright --output plots/skymap.png
//! skymap --source synthetic --count 500 --mode 3d --size-scale 50 --output plots/skymap_3d.png
//! skymap --source gaia-csv --input data/gaia_bright_stars.csv --color temperature --size-scale 0.8
//! ```
//!
//! Set `RUST_LOG=debug` to see every skipped record.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use exosky::catalogs::{bright_stars, gaia, synthetic};
use exosky::plot::{render_sky_map, render_sky_map_3d, PlotOptions};
use exosky::{ColorPolicy, MapperConfig, Projection, RadialDistance, StarRecord, StarRenderMapper};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// The 31 brightest stars (embedded)
    Bright,
    /// Seeded random sample
    Synthetic,
    /// Gaia CSV file given with --input
    GaiaCsv,
    /// Live query against the Gaia archive (requires the `fetch` feature)
    GaiaFetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    #[value(name = "2d")]
    Flat,
    #[value(name = "3d")]
    Spatial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorArg {
    BpRp,
    Temperature,
}

impl From<ColorArg> for ColorPolicy {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::BpRp => ColorPolicy::BpRp,
            ColorArg::Temperature => ColorPolicy::Temperature,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "skymap",
    version,
    about = "Render a star map as seen from an exoplanet",
    long_about = None
)]
struct Args {
    /// Where the stars come from
    #[arg(long, value_enum, default_value_t = Source::Bright)]
    source: Source,

    /// Input CSV for --source gaia-csv
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of stars (synthetic sample size, or Gaia query limit)
    #[arg(short = 'n', long, default_value_t = synthetic::DEFAULT_COUNT)]
    count: usize,

    /// Seed for the synthetic sample and 3D radii
    #[arg(long, default_value_t = synthetic::DEFAULT_SEED)]
    seed: u64,

    /// Faintest G magnitude for --source gaia-fetch
    #[arg(long, default_value_t = 6.0)]
    max_mag: f64,

    /// 2D RA/Dec map or illustrative 3D view
    #[arg(long, value_enum, default_value_t = Mode::Flat)]
    mode: Mode,

    /// Color scale
    #[arg(long, value_enum, default_value_t = ColorArg::BpRp)]
    color: ColorArg,

    /// Marker size constant k in k * 10^(-mag/5)
    #[arg(long, default_value_t = 20.0)]
    size_scale: f64,

    /// Planet name used in the title
    #[arg(long, default_value = "Planet X")]
    planet: String,

    /// Output image (.png or .svg)
    #[arg(short, long, default_value = "plots/skymap.png")]
    output: PathBuf,
}

fn load_stars(args: &Args) -> anyhow::Result<Vec<StarRecord>> {
    match args.source {
        Source::Bright => Ok(bright_stars::bright_stars()),
        Source::Synthetic => Ok(synthetic::generate_stars(args.count, args.seed)),
        Source::GaiaCsv => {
            let Some(input) = &args.input else {
                bail!("--source gaia-csv requires --input <PATH>");
            };
            Ok(gaia::to_star_records(&gaia::read_gaia_csv(input)?))
        }
        Source::GaiaFetch => fetch(args),
    }
}

#[cfg(feature = "fetch")]
fn fetch(args: &Args) -> anyhow::Result<Vec<StarRecord>> {
    Ok(gaia::to_star_records(&gaia::fetch_gaia_stars(
        args.count,
        args.max_mag,
    )?))
}

#[cfg(not(feature = "fetch"))]
fn fetch(_args: &Args) -> anyhow::Result<Vec<StarRecord>> {
    bail!("--source gaia-fetch needs skymap built with `--features fetch`")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let stars = load_stars(&args)?;
    info!("Loaded {} stars from {:?} source", stars.len(), args.source);

    let projection = match args.mode {
        Mode::Flat => Projection::Equatorial,
        Mode::Spatial => Projection::Galactic3d {
            radial: RadialDistance::Uniform {
                min: 1.0,
                max: 10.0,
                seed: args.seed,
            },
        },
    };
    let mapper = StarRenderMapper::new(MapperConfig {
        size_scale: args.size_scale,
        color_policy: args.color.into(),
        projection,
    })?;

    let batch = mapper.map(&stars);
    if batch.skipped_count() > 0 {
        warn!(
            "Skipped {} of {} records with missing or invalid fields",
            batch.skipped_count(),
            stars.len()
        );
    }

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let options = PlotOptions::for_planet(&args.planet);
    match args.mode {
        Mode::Flat => render_sky_map(&args.output, &batch, &options)?,
        Mode::Spatial => render_sky_map_3d(&args.output, &batch, &options)?,
    }

    println!("Sky map saved to: {}", args.output.display());
    Ok(())
}
