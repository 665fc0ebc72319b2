//! Pipeline module - loader, cleaner, enricher, anomaly detection, filtering and aggregation
//!
//! ```text
//!  CSV bytes ──▶ loader ──▶ cleaner ──▶ enrich ──▶ Dataset
//!                                                   │
//!                              ┌────────────────────┼──────────────┐
//!                              ▼                    ▼              ▼
//!                          anomaly              filter ──▶ aggregate
//!                     (full dataset)                 │
//!                                                    └──▶ export (CSV)
//! ```

pub mod aggregate;
pub mod analysis;
pub mod anomaly;
pub mod cleaner;
pub mod enrich;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;

pub use aggregate::*;
pub use analysis::*;
pub use anomaly::*;
pub use cleaner::*;
pub use enrich::*;
pub use error::PipelineError;
pub use export::*;
pub use filter::*;
pub use loader::*;
pub use model::*;
pub use schema::DelayKind;
