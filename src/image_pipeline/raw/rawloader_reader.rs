//! RAW image reader implementation using the rawloader library.
//!
//! Decodes the CR2 container (and any other RAW format rawloader knows)
//! into sensor samples plus the metadata the later pipeline stages need:
//! the CFA layout and sensor levels for demosaicing, and the camera
//! identification for the FITS header.

use std::io::Cursor;

use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::{CameraMetadata, RawImageData};

/// RAW image reader that uses the rawloader library for decoding.
pub struct RawLoaderReader;

/// Default bit depth when no white level information is available from the RAW file.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// The bit width of the u16 data type, used for calculating actual bits per sample.
const U16_BITS: u32 = 16;

impl RawImageReader for RawLoaderReader {
    /// Reads and decodes RAW image data from a byte array.
    ///
    /// This method:
    /// 1. Decodes the RAW file using rawloader
    /// 2. Converts the data to u16 format (handles both integer and float RAW data)
    /// 3. Calculates the actual bits per sample from the sensor's white level metadata
    fn read_raw(&self, data: &[u8]) -> Result<RawImageData> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;

        debug!(
            "Decoded image: {}x{} ({} {})",
            width, height, decoded.clean_make, decoded.clean_model
        );

        // Convert RAW data to u16 format
        // Integer data is cast directly, float data (normalized 0.0-1.0) is scaled to u16 range
        let data: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(values) => values.iter().map(|&v| v as u16).collect(),
            RawloaderImageData::Float(values) => values
                .iter()
                .map(|&v| (v * u16::MAX as f32) as u16)
                .collect(),
        };

        // The white level is the maximum pixel value the sensor can produce,
        // which tells us the actual bit depth (e.g. 12-bit, 14-bit, 16-bit).
        let max_white_level = decoded.whitelevels.iter().max().copied().unwrap_or(u16::MAX);
        let bits_per_sample = if max_white_level == 0 {
            DEFAULT_BITS_PER_SAMPLE
        } else {
            // Minimum bits needed to represent the max value,
            // e.g. max_white_level = 16383 (0x3FFF) -> 14 bits
            U16_BITS - max_white_level.leading_zeros()
        };

        debug!(
            "Calculated bits_per_sample: {} (max white level: {})",
            bits_per_sample, max_white_level
        );

        Ok(RawImageData {
            width,
            height,
            cpp: decoded.cpp,
            data,
            bits_per_sample,
            cfa_pattern: decoded.cfa.name.clone(),
            blacklevels: decoded.blacklevels,
            whitelevels: decoded.whitelevels,
            wb_coeffs: decoded.wb_coeffs,
            metadata: CameraMetadata {
                make: decoded.clean_make,
                model: decoded.clean_model,
            },
        })
    }
}
