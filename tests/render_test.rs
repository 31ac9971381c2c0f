//! File-backed tests: Gaia CSV on disk, and sky maps written to a temp dir.

use std::io::Write;

use exosky::catalogs::gaia;
use exosky::StarRenderMapper;

#[test]
fn read_gaia_csv_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# exported from the Gaia archive").unwrap();
    writeln!(file, "source_id,ra,dec,bp_rp,phot_g_mean_mag").unwrap();
    writeln!(file, "1,101.287,-16.716,0.01,-1.46").unwrap();
    writeln!(file, "2,95.988,-52.696,0.16,-0.74").unwrap();
    writeln!(file, "3,213.915,19.182,,-0.05").unwrap();
    file.flush().unwrap();

    let stars = gaia::read_gaia_csv(file.path()).unwrap();
    assert_eq!(stars.len(), 3);

    let batch = StarRenderMapper::default().map(&gaia::to_star_records(&stars));
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.skipped_indices(), vec![2]);
}

#[test]
fn missing_gaia_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = gaia::read_gaia_csv(dir.path().join("nope.csv")).unwrap_err();
    assert!(err.to_string().contains("nope.csv"));
}

// Text layout needs system fonts, which CI images often lack.
#[cfg(feature = "plot")]
#[test]
#[ignore]
fn render_2d_and_3d_maps() {
    use exosky::catalogs::{bright_stars, synthetic};
    use exosky::plot::{render_sky_map, render_sky_map_3d, PlotOptions};
    use exosky::{MapperConfig, Projection, RadialDistance};

    let dir = tempfile::tempdir().unwrap();
    let options = PlotOptions::for_planet("Test World");

    let flat = StarRenderMapper::default().map(&bright_stars::bright_stars());
    let svg = dir.path().join("bright.svg");
    render_sky_map(&svg, &flat, &options).unwrap();
    let text = std::fs::read_to_string(&svg).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains("View From Test World"));

    let spatial = StarRenderMapper::new(MapperConfig {
        size_scale: 50.0,
        projection: Projection::Galactic3d {
            radial: RadialDistance::default(),
        },
        ..Default::default()
    })
    .unwrap()
    .map(&synthetic::generate_stars(200, 1));
    let png = dir.path().join("synthetic_3d.png");
    render_sky_map_3d(&png, &spatial, &options).unwrap();
    assert!(std::fs::metadata(&png).unwrap().len() > 0);
}
