//! CLI command implementations.

pub mod add;
pub mod ask;
pub mod edit;
pub mod feedback;
pub mod list;
pub mod stats;
pub mod tags;
pub mod util;
