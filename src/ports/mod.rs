//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `SurveySource` - Reads raw survey responses
//! - `BiplotRenderer` - Draws correspondence-analysis biplots and legends
//! - `ReportWriter` - Presents results (console tables, JSON lines)

mod biplot_renderer;
mod report_writer;
mod survey_source;

pub use biplot_renderer::{
    BiplotPoint, BiplotRenderer, BiplotSeries, BiplotSpec, LegendEntry, RenderError,
    RenderedBiplot,
};
pub use report_writer::{
    AssociationReport, CorrespondenceReport, NoticeKind, PairNotice, ReportError, ReportWriter,
};
pub use survey_source::{SourceError, SurveySource};
