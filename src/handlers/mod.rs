//! HTTP handlers for the admin pages and the config export.

pub mod gate;
pub mod listing;
pub use gate::*;
pub use listing::*;
