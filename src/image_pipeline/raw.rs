//! RAW image reading module
//!
//! This module provides format-agnostic RAW image reading capabilities.

mod rawloader_reader;
mod reader;
pub mod types;

pub use rawloader_reader::RawLoaderReader;
pub use reader::RawImageReader;
pub use types::{CameraMetadata, RawImageData};
