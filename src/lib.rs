//! Survey Insights - Categorical survey analysis
//!
//! Loads a questionnaire export, cleans it, and runs correspondence analysis
//! (rendered as SVG biplots) and chi-square association tests over pairs of
//! questions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
