//! Image processing pipeline module
//!
//! This module provides a structured approach to the CR2 to FITS
//! conversion, with separate modules for RAW reading, demosaicing,
//! FITS writing, and conversion orchestration.

pub mod common;
pub mod conversions;
pub mod debayer;
pub mod fits;
pub mod raw;

pub use common::{ConversionError, Result};

pub use raw::{CameraMetadata, RawImageData, RawImageReader, RawLoaderReader};

pub use debayer::{CpuDebayer, RgbImageData};

pub use fits::{ConversionConfig, ConversionConfigBuilder, FitsWriter, StandardFitsWriter};

pub use conversions::RawToFitsPipeline;
