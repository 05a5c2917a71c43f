//! Biplot Renderer Port - Drawing correspondence-analysis maps.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::analysis::{AnalysisPair, CorrespondenceAnalysis};

/// One plotted category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiplotPoint {
    /// Text drawn next to the point.
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// A named group of points sharing a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiplotSeries {
    pub name: String,
    pub points: Vec<BiplotPoint>,
}

/// Maps a short on-chart key back to its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub key: String,
    pub category: String,
}

/// Everything a renderer needs to draw one biplot and its legend.
///
/// Row categories are drawn as numbered points and listed in the legend,
/// since their labels tend to be long. Column categories carry their own
/// text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiplotSpec {
    /// File-name-safe identifier for the outputs.
    pub slug: String,
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub rows: BiplotSeries,
    pub columns: BiplotSeries,
    pub legend_title: String,
    pub legend: Vec<LegendEntry>,
}

impl BiplotSpec {
    /// Builds the plot description for a fitted analysis.
    pub fn from_analysis(pair: &AnalysisPair, analysis: &CorrespondenceAnalysis) -> Self {
        let table = analysis.table();
        let explained = analysis.explained_inertia();

        let legend: Vec<LegendEntry> = table
            .row_labels()
            .iter()
            .enumerate()
            .map(|(i, category)| LegendEntry {
                key: (i + 1).to_string(),
                category: category.clone(),
            })
            .collect();

        let rows = BiplotSeries {
            name: pair.row.clone(),
            points: legend
                .iter()
                .zip(analysis.row_plane())
                .map(|(entry, (x, y))| BiplotPoint {
                    label: entry.key.clone(),
                    x,
                    y,
                })
                .collect(),
        };
        let columns = BiplotSeries {
            name: pair.column.clone(),
            points: table
                .column_labels()
                .iter()
                .zip(analysis.column_plane())
                .map(|(label, (x, y))| BiplotPoint {
                    label: label.clone(),
                    x,
                    y,
                })
                .collect(),
        };

        let axis_label = |axis: usize| match explained.get(axis) {
            Some(share) => format!("Dimensão {} ({})", axis + 1, share),
            None => format!("Dimensão {}", axis + 1),
        };

        Self {
            slug: pair.slug(),
            title: format!("Análise de Correspondência: {}", pair.title()),
            x_axis_label: axis_label(0),
            y_axis_label: axis_label(1),
            rows,
            columns,
            legend_title: format!("Legenda das Categorias de {}", pair.row),
            legend,
        }
    }

    /// Iterates over every plotted point, rows first.
    pub fn all_points(&self) -> impl Iterator<Item = &BiplotPoint> {
        self.rows.points.iter().chain(self.columns.points.iter())
    }
}

/// Files written for one biplot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBiplot {
    pub chart_path: PathBuf,
    pub legend_path: PathBuf,
    /// False if some labels still overlapped when layout gave up.
    pub labels_resolved: bool,
}

/// Port for drawing biplots.
///
/// # Contract
///
/// Implementations must:
/// - Produce the chart and its legend as separate artifacts
/// - Keep category labels from overlapping where possible
/// - Reject specs with no points or non-finite coordinates
pub trait BiplotRenderer: Send + Sync {
    /// Renders one biplot and its legend.
    fn render(&self, spec: &BiplotSpec) -> Result<RenderedBiplot, RenderError>;
}

/// Errors that can occur while rendering.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid plot data: {0}")]
    InvalidData(String),

    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to {path}: {message}")]
    FileSave { path: String, message: String },
}
