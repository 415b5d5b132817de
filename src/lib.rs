//! Batch conversion of Canon CR2 raw frames into FITS images.
//!
//! The crate is organized around [`image_pipeline`] for the per-file
//! decode/encode work, [`scan`] for directory enumeration, and [`batch`]
//! for driving the two together over a whole directory.

pub mod batch;
pub mod image_pipeline;
pub mod logger;
pub mod scan;
