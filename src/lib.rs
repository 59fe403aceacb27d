#![warn(rust_2018_idioms)]

//! Font container decoding and glyph outline geometry for font editors.
//!
//! * `eot` reads and writes Embedded OpenType containers, extracting the embedded sfnt data.
//! * `outline` holds glyph contours as editable paths and transforms groups of them as rigid
//!   bodies: moving, rotating, mirroring and flipping while keeping fills correct.

/// Reading and writing of binary data.
pub mod binary;
/// Reading and writing of the Embedded OpenType format.
pub mod eot;
pub mod error;
pub mod outline;
pub mod size;

pub use pathfinder_geometry;
