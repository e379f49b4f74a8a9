//! Chapter console host.
//!
//! Loads a dataset, builds the opportunities, project-response and insight
//! tables on top of `chapter-table`, persists column visibility and the
//! recently viewed list, and renders a page as plain text.

pub mod cli;
pub mod data;
pub mod error;
pub mod pages;
pub mod paths;
pub mod render;
pub mod session;
pub mod settings;
pub mod store;
pub mod tables;
