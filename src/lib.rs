//! Flightdelay: Flight Delay Analytics Library
//!
//! Loads a flight delay CSV, cleans and enriches it, and computes the
//! KPIs, group-by tables and IQR anomalies shown for a filtered view.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
