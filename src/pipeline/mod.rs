//! Pipeline module - the training stages and their sequencing

pub mod config;
pub mod encode;
pub mod error;
pub mod evaluate;
pub mod impute;
pub mod loader;
pub mod model;
pub mod persist;
pub mod runner;
pub mod scale;
pub mod schema;
pub mod select;
pub mod split;

pub use config::*;
pub use encode::*;
pub use error::*;
pub use evaluate::*;
pub use impute::*;
pub use loader::*;
pub use model::*;
pub use persist::*;
pub use runner::*;
pub use scale::*;
pub use schema::*;
pub use select::*;
pub use split::*;
