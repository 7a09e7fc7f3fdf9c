//! Error types

mod config;
mod export;
mod field;
mod import;
mod update;
mod validation;

pub use config::*;
pub use export::*;
pub use field::*;
pub use import::*;
pub use update::*;
pub use validation::*;
