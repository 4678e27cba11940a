//! SQL text for the listing pages: whitelisted identifiers inline, filter values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
