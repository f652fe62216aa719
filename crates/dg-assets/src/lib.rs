//! dg-assets: Room type to asset key mapping for generated dungeons.

pub mod mapping;
pub mod table;

pub use mapping::*;
pub use table::*;
