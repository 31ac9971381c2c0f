//! Sky-map rendering with plotters.
//!
//! Both renderers pick the backend from the output extension: `.svg` writes
//! SVG, anything else a bitmap (PNG by default).
//!
//! Marker sizes from the mapper are area-like (as in a scatter plot's `s`),
//! so the drawn circle radius is `sqrt(size)`, clamped to a visible range.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::color::{ramp_color, ColorPolicy};
use crate::mapper::{MappedBatch, PlotPosition};
use crate::{Rgb, SceneBounds};

/// Camera elevation of the 3D view, in degrees.
pub const ELEVATION_DEG: f64 = 20.0;
/// Camera azimuth of the 3D view, in degrees.
pub const AZIMUTH_DEG: f64 = 45.0;

const MARKER_ALPHA: f64 = 0.8;
const COLOR_BAR_WIDTH: i32 = 130;
const COLOR_BAR_STEPS: usize = 100;

const GRID_COLOR: RGBColor = RGBColor(128, 128, 128);
/// Spacing of the 2D grid lines, in degrees.
const GRID_STEP_DEG: f64 = 30.0;
/// Spacing of the dots along a grid line, in degrees.
const GRID_DOT_STEP_DEG: f64 = 1.5;

/// Chart appearance.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    /// Image size in pixels.
    pub width: u32,
    pub height: u32,
    /// Smallest drawn marker radius, in pixels.
    pub min_marker_radius: f64,
    /// Largest drawn marker radius, in pixels.
    pub max_marker_radius: f64,
    pub show_color_bar: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "View From Planet X".to_string(),
            width: 1500,
            height: 1200,
            min_marker_radius: 1.0,
            max_marker_radius: 30.0,
            show_color_bar: true,
        }
    }
}

impl PlotOptions {
    /// Options with the `View From {planet}` title.
    pub fn for_planet(planet: &str) -> Self {
        Self {
            title: format!("View From {}", planet),
            ..Default::default()
        }
    }

    fn marker_radius(&self, size: f64) -> i32 {
        size.sqrt()
            .clamp(self.min_marker_radius, self.max_marker_radius)
            .round() as i32
    }
}

fn to_plot_color(c: &Rgb) -> RGBColor {
    let (r, g, b) = c.to_rgb8();
    RGBColor(r, g, b)
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Render a 2D (RA/Dec) sky map.
///
/// Right ascension increases to the left, as on the sky. Stars mapped in the
/// 3D mode are ignored.
pub fn render_sky_map<P: AsRef<Path>>(
    path: P,
    batch: &MappedBatch,
    options: &PlotOptions,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dims = (options.width, options.height);
    if is_svg(path) {
        draw_sky_map(SVGBackend::new(path, dims).into_drawing_area(), batch, options)?;
    } else {
        draw_sky_map(BitMapBackend::new(path, dims).into_drawing_area(), batch, options)?;
    }
    info!("Saved sky map with {} stars to {}", batch.len(), path.display());
    Ok(())
}

/// Render a 3D sky map centered on the mapped stars.
///
/// Axes are hidden; the galactic-like `z` axis points up. Stars mapped in the
/// 2D mode are ignored.
pub fn render_sky_map_3d<P: AsRef<Path>>(
    path: P,
    batch: &MappedBatch,
    options: &PlotOptions,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dims = (options.width, options.height);
    if is_svg(path) {
        draw_sky_map_3d(SVGBackend::new(path, dims).into_drawing_area(), batch, options)?;
    } else {
        draw_sky_map_3d(BitMapBackend::new(path, dims).into_drawing_area(), batch, options)?;
    }
    info!("Saved 3D sky map with {} stars to {}", batch.len(), path.display());
    Ok(())
}

/// Dots tracing the RA/Dec grid lines, in plotted coordinates.
fn dotted_grid_points() -> Vec<(f64, f64)> {
    let lines = |max: f64| {
        let n = (max / GRID_STEP_DEG).round() as usize;
        (0..=n).map(|i| i as f64 * GRID_STEP_DEG)
    };
    let dots = |max: f64| {
        let n = (max / GRID_DOT_STEP_DEG).round() as usize;
        (0..=n).map(|i| i as f64 * GRID_DOT_STEP_DEG)
    };

    let mut points = Vec::new();
    for x in lines(360.0) {
        points.extend(dots(180.0).map(|d| (x, d - 90.0)));
    }
    for y in lines(180.0) {
        points.extend(dots(360.0).map(|d| (d, y - 90.0)));
    }
    points
}

fn split_color_bar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    options: &PlotOptions,
) -> (DrawingArea<DB, Shift>, Option<DrawingArea<DB, Shift>>) {
    if options.show_color_bar && options.width as i32 > 2 * COLOR_BAR_WIDTH {
        let (chart, bar) = root.split_horizontally(options.width as i32 - COLOR_BAR_WIDTH);
        (chart, Some(bar))
    } else {
        (root.clone(), None)
    }
}

fn draw_sky_map<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    batch: &MappedBatch,
    options: &PlotOptions,
) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&BLACK)?;
    let (chart_area, bar_area) = split_color_bar(&root, options);

    // Plotted x is 360 - RA so that RA runs 360 → 0 left to right.
    let mut chart = ChartBuilder::on(&chart_area)
        .caption(&options.title, ("sans-serif", 30).into_font().color(&WHITE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..360.0f64, -90.0f64..90.0f64)?;

    chart
        .configure_mesh()
        .x_labels(13)
        .y_labels(7)
        .x_label_formatter(&|x| format!("{:.0}", 360.0 - x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .axis_desc_style(("sans-serif", 18).into_font().color(&WHITE))
        .label_style(("sans-serif", 14).into_font().color(&WHITE))
        .axis_style(WHITE.mix(0.6))
        .disable_mesh()
        .x_desc("Right Ascension")
        .y_desc("Declination")
        .draw()?;

    // plotters meshes are solid, so the grid is drawn as dots.
    chart.draw_series(
        dotted_grid_points()
            .into_iter()
            .map(|p| Circle::new(p, 1, GRID_COLOR.mix(0.5).filled())),
    )?;

    chart.draw_series(batch.iter().filter_map(|a| match a.position {
        PlotPosition::Planar { x, y } => Some(Circle::new(
            (360.0 - x, y),
            options.marker_radius(a.size),
            to_plot_color(&a.color).mix(MARKER_ALPHA).filled(),
        )),
        PlotPosition::Spatial(_) => None,
    }))?;

    if let Some(bar) = bar_area {
        draw_color_bar(&bar, batch.color_policy, &WHITE)?;
    }

    root.present()?;
    Ok(())
}

fn draw_sky_map_3d<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    batch: &MappedBatch,
    options: &PlotOptions,
) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&BLACK)?;
    let (chart_area, bar_area) = split_color_bar(&root, options);

    let positions = batch.spatial_positions();
    let bounds = SceneBounds::from_points(&positions).unwrap_or(SceneBounds {
        center: crate::Vector3::zeros(),
        half_range: 1.0,
    });
    let c = bounds.center;
    let h = bounds.half_range;

    let title = format!("{} ({} Stars)", options.title, batch.len());
    // plotters' 3D y axis is vertical, so galactic z is plotted as y.
    let mut chart = ChartBuilder::on(&chart_area)
        .caption(title, ("sans-serif", 30).into_font().color(&WHITE))
        .margin(20)
        .build_cartesian_3d(c.x - h..c.x + h, c.z - h..c.z + h, c.y - h..c.y + h)?;

    chart.with_projection(|mut pb| {
        pb.pitch = ELEVATION_DEG.to_radians();
        pb.yaw = AZIMUTH_DEG.to_radians();
        pb.scale = 0.9;
        pb.into_matrix()
    });

    chart.draw_series(batch.iter().filter_map(|a| match a.position {
        PlotPosition::Spatial(p) => Some(Circle::new(
            (p.x, p.z, p.y),
            options.marker_radius(a.size),
            to_plot_color(&a.color).mix(MARKER_ALPHA).filled(),
        )),
        PlotPosition::Planar { .. } => None,
    }))?;

    if let Some(bar) = bar_area {
        draw_color_bar(&bar, batch.color_policy, &WHITE)?;
    }

    root.present()?;
    Ok(())
}

/// Vertical color bar spanning the policy's value range.
fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    policy: ColorPolicy,
    text: &RGBColor,
) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    let (lo, hi) = policy.value_range();
    let mut bar = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(60)
        .margin_right(10)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0f64..1.0f64, lo..hi)?;

    bar.configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(6)
        .y_label_formatter(&|v| match policy {
            ColorPolicy::BpRp => format!("{:.1}", v),
            ColorPolicy::Temperature => format!("{:.0}", v),
        })
        .y_desc(policy.label())
        .axis_desc_style(("sans-serif", 16).into_font().color(text))
        .label_style(("sans-serif", 13).into_font().color(text))
        .axis_style(text.mix(0.6))
        .draw()?;

    bar.draw_series((0..COLOR_BAR_STEPS).map(|i| {
        let t0 = i as f64 / COLOR_BAR_STEPS as f64;
        let t1 = (i + 1) as f64 / COLOR_BAR_STEPS as f64;
        let v0 = policy.value_at_ramp_position(t0);
        let v1 = policy.value_at_ramp_position(t1);
        let color = to_plot_color(&ramp_color((t0 + t1) / 2.0));
        Rectangle::new([(0.0, v0), (1.0, v1)], color.filled())
    }))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_radius_is_clamped() {
        let opts = PlotOptions::default();
        assert_eq!(opts.marker_radius(0.0001), 1);
        assert_eq!(opts.marker_radius(16.0), 4);
        assert_eq!(opts.marker_radius(1.0e6), 30);
    }

    #[test]
    fn svg_detection() {
        assert!(is_svg(Path::new("plots/map.SVG")));
        assert!(!is_svg(Path::new("plots/map.png")));
        assert!(!is_svg(Path::new("plots/map")));
    }

    #[test]
    fn grid_dots_lie_on_grid_lines() {
        let on_line = |v: f64, offset: f64| ((v + offset) / GRID_STEP_DEG).fract().abs() < 1e-9;
        let points = dotted_grid_points();
        assert!(!points.is_empty());
        for &(x, y) in &points {
            assert!((0.0..=360.0).contains(&x) && (-90.0..=90.0).contains(&y));
            assert!(on_line(x, 0.0) || on_line(y, 90.0), "({}, {}) off the grid", x, y);
        }
        // Both meridians and parallels are traced, including the edges
        assert!(points.contains(&(180.0, 0.0)));
        assert!(points.contains(&(360.0, -90.0)));
        assert!(points.iter().filter(|p| p.1 == 30.0).count() > 100);
    }

    #[test]
    fn planet_title() {
        assert_eq!(PlotOptions::for_planet("Kepler-22b").title, "View From Kepler-22b");
    }
}
