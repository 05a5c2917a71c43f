//! Domain layer containing the survey model and the statistics.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (errors, percentages, significance levels)
//! - `survey` - Response table, question catalog and cleaning pipeline
//! - `analysis` - Contingency tables, correspondence analysis, chi-square,
//!   Cramér's V and biplot label layout

pub mod analysis;
pub mod foundation;
pub mod survey;
