//! Domain model: dynamic table records and the typed resources they are
//! flattened from.

mod company;
mod icp;
mod insight;
mod opportunity;
mod project;
mod record;
mod record_serde;
mod value;

pub use company::*;
pub use icp::*;
pub use insight::*;
pub use opportunity::*;
pub use project::*;
pub use record::*;
pub use value::*;
