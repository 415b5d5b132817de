//! Types for debayering operations

use crate::image_pipeline::raw::CameraMetadata;

/// RGB image data after debayering
#[derive(Debug, Clone)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u16>,
    /// Actual bits per sample (16 after normalization)
    pub bits_per_sample: u32,
    /// Camera make and model, carried over from the RAW frame
    pub metadata: CameraMetadata,
}
