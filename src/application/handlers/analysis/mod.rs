//! Analysis handlers.
//!
//! Each handler walks the analysis plan, runs one statistical procedure per
//! pair, and reports every pair as completed, skipped, or failed.

mod run_association;
mod run_correspondence;

pub use run_association::{AssociationHandler, RunAssociationCommand};
pub use run_correspondence::{CorrespondenceHandler, RunCorrespondenceCommand};
