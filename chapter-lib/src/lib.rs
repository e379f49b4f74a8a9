//! Chapter console domain library
//!
//! Dynamic table records, the opportunity/project/insight domain model, and the
//! session contract the console pages authenticate through.

pub mod auth;
pub mod error;
pub mod model;
