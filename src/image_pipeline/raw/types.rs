//! RAW image data types

/// Camera identification recorded by the RAW container.
///
/// Carried through the pipeline so the FITS header can state which
/// instrument produced the frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraMetadata {
    /// Camera manufacturer, cleaned of vendor noise (e.g. "Canon").
    pub make: String,
    /// Camera model (e.g. "EOS 550D").
    pub model: String,
}

impl CameraMetadata {
    /// The make and model joined into a single instrument name.
    ///
    /// Empty when the RAW container carried neither.
    pub fn instrument(&self) -> String {
        format!("{} {}", self.make, self.model).trim().to_string()
    }
}

/// Represents decoded RAW image data
#[derive(Debug, Clone)]
pub struct RawImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Components per pixel; 1 for a Bayer mosaic
    pub cpp: usize,
    /// Raw pixel data (single channel Bayer pattern)
    pub data: Vec<u16>,
    /// Actual bits per sample from the sensor (e.g. 12, 14, or 16)
    pub bits_per_sample: u32,
    /// Color filter array layout as reported by the decoder (e.g. "RGGB")
    pub cfa_pattern: String,
    /// Per-channel sensor black levels
    pub blacklevels: [u16; 4],
    /// Per-channel sensor saturation levels
    pub whitelevels: [u16; 4],
    /// As-shot white balance coefficients; NaN when unknown
    pub wb_coeffs: [f32; 4],
    /// Camera make and model
    pub metadata: CameraMetadata,
}
