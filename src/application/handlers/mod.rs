//! Application handlers.
//!
//! Handlers that orchestrate domain operations over the ports.

pub mod analysis;
pub mod survey;

mod outcome;

pub use analysis::{
    AssociationHandler, CorrespondenceHandler, RunAssociationCommand, RunCorrespondenceCommand,
};
pub use outcome::{PairOutcome, RunSummary};
pub use survey::{InspectColumnsHandler, InspectColumnsResult, LoadSurveyHandler};
