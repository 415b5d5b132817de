//! FITS writing module
//!
//! This module provides primary-HDU FITS file writing for the decoded
//! camera frames.

mod standard_fits_writer;
mod writer;
pub mod header;
pub mod types;

pub use standard_fits_writer::StandardFitsWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder};
pub use writer::FitsWriter;
