//! Report module - summarizing training results

pub mod model_report;
pub mod summary;

pub use model_report::*;
pub use summary::*;
