//! Drawing figures with plotters.

use crate::types::{x_to_date, Figure, SeriesKind};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, instrument};
use viewstat_common::{Result, ViewstatError};

/// Turns a [`Figure`] into an image.
pub trait FigureRenderer {
    /// Write the figure to `path`; the extension picks the format.
    fn render_to_file(&self, figure: &Figure, path: &Path) -> Result<()>;

    /// Render the figure as an SVG document.
    fn render_svg(&self, figure: &Figure) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// Output format chosen from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Png,
    Svg,
}

impl FileKind {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            _ => Err(ViewstatError::graph(format!(
                "Unsupported image file '{}': expected .png or .svg",
                path.display()
            ))),
        }
    }
}

/// [`FigureRenderer`] backed by the plotters bitmap and SVG backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersRenderer;

impl PlottersRenderer {
    pub fn new() -> Self {
        Self
    }

    fn ensure_drawable(figure: &Figure) -> Result<()> {
        if figure.is_empty() {
            return Err(ViewstatError::graph(format!(
                "Nothing to draw for '{}': the figure has no data",
                figure.title
            )));
        }
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, figure: &Figure, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&RGBColor::from(figure.style.background))?;

        let (x_min, x_max) = figure.x_bounds();
        let (y_min, y_max) = figure.y_bounds();

        let title_font = (figure.style.font_family.as_str(), figure.style.title_font_size);
        let mut chart = ChartBuilder::on(root)
            .caption(&figure.title, title_font)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let x_axis = figure.x_axis;
        let x_formatter = move |x: &f64| x_to_date(*x).map(|d| x_axis.label(d)).unwrap_or_default();

        {
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(figure.x_label.as_str())
                .y_desc(figure.y_label.as_str())
                .x_label_formatter(&x_formatter);
            if !figure.style.show_grid {
                mesh.disable_mesh();
            }
            mesh.draw()?;
        }

        let mut labeled: Vec<&str> = Vec::new();
        for series in &figure.series {
            let color = RGBAColor::from(series.color);
            let points = series.xy();
            let first_of_label = !labeled.contains(&series.label.as_str());

            match series.kind {
                SeriesKind::Line => {
                    let anno = chart.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?;
                    if first_of_label {
                        anno.label(series.label.as_str()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                    }
                    chart.draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))?;
                }
                SeriesKind::Points => {
                    let anno = chart.draw_series(
                        points.iter().map(|&(x, y)| Circle::new((x, y), 5, color.filled())),
                    )?;
                    if first_of_label {
                        anno.label(series.label.as_str())
                            .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
                    }
                }
            }

            if first_of_label {
                labeled.push(series.label.as_str());
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        Ok(())
    }
}

impl FigureRenderer for PlottersRenderer {
    #[instrument(skip_all, fields(title = %figure.title, path = %path.display()))]
    fn render_to_file(&self, figure: &Figure, path: &Path) -> Result<()> {
        Self::ensure_drawable(figure)?;
        let kind = FileKind::from_path(path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let size = (figure.width, figure.height);
        match kind {
            FileKind::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw(figure, &root)?;
                root.present()?;
            }
            FileKind::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw(figure, &root)?;
                root.present()?;
            }
        }

        info!("Successfully rendered '{}' to {}", figure.title, path.display());
        Ok(())
    }

    fn render_svg(&self, figure: &Figure) -> Result<String> {
        Self::ensure_drawable(figure)?;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (figure.width, figure.height)).into_drawing_area();
            self.draw(figure, &root)?;
            root.present()?;
        }
        Ok(svg)
    }

    fn name(&self) -> &'static str {
        "plotters"
    }
}
