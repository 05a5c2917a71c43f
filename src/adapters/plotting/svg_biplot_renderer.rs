//! SVG Biplot Renderer - Implementation of BiplotRenderer using `plotters`.
//!
//! Writes two files per pair into the output directory:
//! - `<slug>.svg` - the biplot (rows as blue numbered circles, columns as
//!   red labelled squares, grey axes through the origin)
//! - `<slug>_legend.svg` - the number-to-category legend on a wheat box
//!
//! Labels are placed with [`LabelLayout`] in pixel space after the chart's
//! coordinate system is known, then drawn directly on the root area.

use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::analysis::{LabelLayout, LabelRequest, PlacedLabel, Rect};
use crate::ports::{BiplotRenderer, BiplotSpec, RenderError, RenderedBiplot};

const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: f64 = 22.0;
const ROW_FONT_SIZE: f64 = 13.0;
const COLUMN_FONT_SIZE: f64 = 14.0;
const LEGEND_FONT_SIZE: f64 = 14.0;
const LEGEND_LINE_HEIGHT: i32 = 22;
const MARKER_SIZE: i32 = 6;
/// Average glyph width as a share of font size, for label box estimates.
const GLYPH_WIDTH_RATIO: f64 = 0.6;
/// Share of the data span added around the outermost points.
const AXIS_PADDING: f64 = 0.15;

const AXIS_GREY: RGBColor = RGBColor(128, 128, 128);
const LEADER_GREY: RGBColor = RGBColor(211, 211, 211);
const WHEAT: RGBColor = RGBColor(245, 222, 179);

/// Renders biplots as SVG files.
///
/// # Usage
///
/// ```rust,ignore
/// let renderer = SvgBiplotRenderer::new("plots").with_size(1400, 1000);
/// let rendered = renderer.render(&spec)?;
/// println!("{}", rendered.chart_path.display());
/// ```
#[derive(Debug, Clone)]
pub struct SvgBiplotRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
    legend_size: (u32, u32),
    layout: LabelLayout,
}

impl SvgBiplotRenderer {
    /// Creates a renderer writing into `output_dir` at 1400x1000.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            size: (1400, 1000),
            legend_size: (500, 600),
            layout: LabelLayout::default(),
        }
    }

    /// Sets the chart size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Sets the label layout tuning.
    pub fn with_layout(mut self, layout: LabelLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the directory files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn draw_chart(&self, spec: &BiplotSpec, path: &Path) -> Result<bool, RenderError> {
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| RenderError::DrawingArea(e.to_string()))?;

        let x_range = axis_range(spec.all_points().map(|p| p.x));
        let y_range = axis_range(spec.all_points().map(|p| p.y));

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, (FONT, TITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), y_range.clone())
            .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(&spec.x_axis_label)
            .y_desc(&spec.y_axis_label)
            .label_style((FONT, 12.0))
            .draw()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        let axis_style = AXIS_GREY.stroke_width(1);
        chart
            .draw_series(LineSeries::new(
                vec![(x_range.start, 0.0), (x_range.end, 0.0)],
                axis_style,
            ))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;
        chart
            .draw_series(LineSeries::new(
                vec![(0.0, y_range.start), (0.0, y_range.end)],
                axis_style,
            ))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        chart
            .draw_series(
                spec.rows
                    .points
                    .iter()
                    .map(|p| Circle::new((p.x, p.y), MARKER_SIZE, BLUE.filled())),
            )
            .map_err(|e| RenderError::Drawing(e.to_string()))?
            .label(spec.rows.name.as_str())
            .legend(|(x, y)| Circle::new((x, y), MARKER_SIZE - 1, BLUE.filled()));

        chart
            .draw_series(spec.columns.points.iter().map(|p| {
                EmptyElement::at((p.x, p.y))
                    + Rectangle::new(
                        [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                        RED.filled(),
                    )
            }))
            .map_err(|e| RenderError::Drawing(e.to_string()))?
            .label(spec.columns.name.as_str())
            .legend(|(x, y)| {
                Rectangle::new(
                    [
                        (x - MARKER_SIZE + 1, y - MARKER_SIZE + 1),
                        (x + MARKER_SIZE - 1, y + MARKER_SIZE - 1),
                    ],
                    RED.filled(),
                )
            });

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        let to_pixels = |x: f64, y: f64| {
            let (px, py) = chart.backend_coord(&(x, y));
            (f64::from(px), f64::from(py))
        };

        let mut requests = Vec::new();
        for point in &spec.rows.points {
            let size = text_size(&point.label, ROW_FONT_SIZE);
            let offset = (f64::from(MARKER_SIZE) + 2.0, -(size.1 + 2.0));
            requests.push(LabelRequest::new(&point.label, to_pixels(point.x, point.y), size, offset));
        }
        for point in &spec.columns.points {
            let size = text_size(&point.label, COLUMN_FONT_SIZE);
            let offset = (f64::from(MARKER_SIZE) + 2.0, f64::from(MARKER_SIZE));
            requests.push(LabelRequest::new(&point.label, to_pixels(point.x, point.y), size, offset));
        }
        let anchors: Vec<(f64, f64)> = requests.iter().map(|r| r.anchor).collect();

        let (x_pixels, y_pixels) = chart.plotting_area().get_pixel_range();
        let bounds = pixel_bounds(x_pixels, y_pixels);
        let layout = self.layout.arrange(&requests, &anchors, bounds);
        debug!(
            slug = %spec.slug,
            iterations = layout.iterations,
            resolved = layout.resolved,
            "Placed biplot labels"
        );

        let row_count = spec.rows.points.len();
        for (index, placed) in layout.labels.iter().enumerate() {
            if placed.needs_leader {
                root.draw(&PathElement::new(
                    vec![to_backend(placed.anchor), to_backend(nearest_edge(placed))],
                    LEADER_GREY.stroke_width(1),
                ))
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
            }
            let style = if index < row_count {
                (FONT, ROW_FONT_SIZE)
                    .into_font()
                    .style(FontStyle::Bold)
                    .color(&BLUE)
            } else {
                (FONT, COLUMN_FONT_SIZE).into_font().color(&RED)
            };
            root.draw(&Text::new(
                placed.text.clone(),
                to_backend((placed.bounds.x, placed.bounds.y)),
                style,
            ))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        root.present().map_err(|e| RenderError::FileSave {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(layout.resolved)
    }

    fn draw_legend(&self, spec: &BiplotSpec, path: &Path) -> Result<(), RenderError> {
        let lines = spec.legend.len() as i32 + 2;
        let (width, min_height) = self.legend_size;
        let height = (min_height as i32).max(lines * LEGEND_LINE_HEIGHT + 60) as u32;

        let root = SVGBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| RenderError::DrawingArea(e.to_string()))?;

        let margin = 20;
        let box_bottom = margin + lines * LEGEND_LINE_HEIGHT + 20;
        root.draw(&Rectangle::new(
            [(margin, margin), (width as i32 - margin, box_bottom)],
            WHEAT.mix(0.8).filled(),
        ))
        .map_err(|e| RenderError::Drawing(e.to_string()))?;
        root.draw(&Rectangle::new(
            [(margin, margin), (width as i32 - margin, box_bottom)],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| RenderError::Drawing(e.to_string()))?;

        let bold = (FONT, LEGEND_FONT_SIZE).into_font().style(FontStyle::Bold);
        let regular = (FONT, LEGEND_FONT_SIZE).into_font();
        let left = margin + 12;

        root.draw(&Text::new(
            format!("{}:", spec.legend_title),
            (left, margin + 12),
            bold.clone(),
        ))
        .map_err(|e| RenderError::Drawing(e.to_string()))?;

        for (line, entry) in spec.legend.iter().enumerate() {
            let y = margin + 12 + (line as i32 + 2) * LEGEND_LINE_HEIGHT;
            let key = format!("{}:", entry.key);
            let key_width = text_size(&key, LEGEND_FONT_SIZE).0 as i32 + 6;
            root.draw(&Text::new(key, (left, y), bold.clone()))
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
            root.draw(&Text::new(entry.category.clone(), (left + key_width, y), regular.clone()))
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        root.present().map_err(|e| RenderError::FileSave {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl BiplotRenderer for SvgBiplotRenderer {
    fn render(&self, spec: &BiplotSpec) -> Result<RenderedBiplot, RenderError> {
        validate(spec)?;

        std::fs::create_dir_all(&self.output_dir).map_err(|e| RenderError::FileSave {
            path: self.output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let chart_path = self.output_dir.join(format!("{}.svg", spec.slug));
        let legend_path = self.output_dir.join(format!("{}_legend.svg", spec.slug));

        let labels_resolved = self.draw_chart(spec, &chart_path)?;
        if !labels_resolved {
            warn!(slug = %spec.slug, "Some biplot labels still overlap");
        }
        self.draw_legend(spec, &legend_path)?;

        Ok(RenderedBiplot {
            chart_path,
            legend_path,
            labels_resolved,
        })
    }
}

fn validate(spec: &BiplotSpec) -> Result<(), RenderError> {
    if spec.rows.points.is_empty() || spec.columns.points.is_empty() {
        return Err(RenderError::InvalidData(
            "Biplot needs at least one row and one column point".to_string(),
        ));
    }
    if let Some(point) = spec.all_points().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(RenderError::InvalidData(format!(
            "Point '{}' has non-finite coordinates",
            point.label
        )));
    }
    if spec.slug.is_empty() {
        return Err(RenderError::InvalidData("Biplot slug is empty".to_string()));
    }
    Ok(())
}

/// Data range covering every value and the origin, padded on both sides.
fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = max - min;
    if span < 1e-9 {
        return -1.0..1.0;
    }
    let pad = span * AXIS_PADDING;
    (min - pad)..(max + pad)
}

fn text_size(text: &str, font_size: f64) -> (f64, f64) {
    (text.chars().count() as f64 * font_size * GLYPH_WIDTH_RATIO, font_size)
}

fn pixel_bounds(x: Range<i32>, y: Range<i32>) -> Rect {
    Rect::new(
        f64::from(x.start),
        f64::from(y.start),
        f64::from(x.end - x.start),
        f64::from(y.end - y.start),
    )
}

/// Point on the label box closest to its anchor.
fn nearest_edge(label: &PlacedLabel) -> (f64, f64) {
    let b = &label.bounds;
    (
        label.anchor.0.clamp(b.x, b.x + b.width),
        label.anchor.1.clamp(b.y, b.y + b.height),
    )
}

fn to_backend((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}
