pub mod config;
pub mod error;
pub mod models;
pub mod conversion; // unit family conversion tables
pub mod calculator; // weight-based and liquid dose
pub mod frequency; // single dose / total supply
pub mod helpers;
pub mod dispense; // form request -> display quantities
pub mod commands; // JSON boundary

pub use commands::run;
pub use dispense::{calculate, calculate_for_display, try_calculate, DoseCalculation, DoseRequest};
pub use error::DoseError;
