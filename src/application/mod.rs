//! Application layer - Handlers that run the survey operations.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod error;
pub mod handlers;

pub use error::AppError;
pub use handlers::{
    AssociationHandler, CorrespondenceHandler, InspectColumnsHandler, InspectColumnsResult,
    LoadSurveyHandler, PairOutcome, RunAssociationCommand, RunCorrespondenceCommand, RunSummary,
};
