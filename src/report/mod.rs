//! Report module - rendering and exporting dashboard views

pub mod dashboard;
pub mod json_export;

pub use dashboard::*;
pub use json_export::*;
