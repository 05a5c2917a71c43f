//! Analysis Module - Pure statistical services over prepared survey data.
//!
//! # Components
//!
//! - `ContingencyTable` - Cross-tabulated counts for two questions
//! - `CorrespondenceAnalysis` - Principal coordinates for a biplot
//! - `SingularValueDecomposition` - Truncated SVD (nalgebra) backing the analysis
//! - `ChiSquareTest` / `cramers_v` - Independence test and effect size
//! - `LabelLayout` - Collision avoidance for biplot annotations
//! - `AnalysisPlan` - Which question pairs to analyze
//!
//! All functions are pure (no side effects). Rendering and reporting live
//! behind ports.

mod analysis_plan;
mod chi_square;
mod contingency_table;
mod correspondence;
mod cramers_v;
mod decomposition;
mod label_layout;

pub use analysis_plan::{AnalysisPair, AnalysisPlan};
pub use chi_square::ChiSquareTest;
pub use contingency_table::{ContingencyTable, ContingencyTableBuilder};
pub use correspondence::{CorrespondenceAnalysis, PLANE_COMPONENTS};
pub use cramers_v::{cramers_v, cramers_v_for};
pub use decomposition::SingularValueDecomposition;
pub use label_layout::{LabelLayout, LabelRequest, LayoutResult, PlacedLabel, Rect};
