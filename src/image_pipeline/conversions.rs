//! Pipeline conversions module
//!
//! This module contains orchestration logic for the RAW to FITS conversion.

mod raw_to_fits;


pub use raw_to_fits::RawToFitsPipeline;
