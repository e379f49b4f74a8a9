//! Error types

mod auth;
mod field;

pub use auth::*;
pub use field::*;
