//! Procedural generation for the starfield backdrop and pickup placement.

pub mod placement;
pub mod starfield;

pub use placement::*;
pub use starfield::*;
