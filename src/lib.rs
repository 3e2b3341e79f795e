//! Pricefit: House Price Training Library
//!
//! Loads a tabular housing dataset, imputes, encodes and standardizes it,
//! fits an ordinary least squares model on a fixed feature subset, and
//! saves the fitted model as a JSON artifact.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
