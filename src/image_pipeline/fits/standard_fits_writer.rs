use std::io::Write;

use chrono::Utc;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::fits::header::{HeaderBuilder, padded_len};
use crate::image_pipeline::fits::types::ConversionConfig;
use crate::image_pipeline::fits::writer::FitsWriter;
use crate::image_pipeline::raw::types::{CameraMetadata, RawImageData};

/// Offset for storing unsigned 16-bit samples in signed 16-bit words.
const BZERO_U16: f64 = 32768.0;

pub struct StandardFitsWriter;

impl StandardFitsWriter {
    fn build_header(
        naxes: &[usize],
        metadata: &CameraMetadata,
        source: Option<&str>,
    ) -> HeaderBuilder {
        let mut header = HeaderBuilder::new()
            .logical("SIMPLE", true, "conforms to FITS standard")
            .integer("BITPIX", 16, "bits per data value")
            .integer("NAXIS", naxes.len() as i64, "number of axes");
        for (i, &dim) in naxes.iter().enumerate() {
            header = header.integer(&format!("NAXIS{}", i + 1), dim as i64, "");
        }
        header = header
            .float("BZERO", BZERO_U16, "offset for unsigned 16-bit data")
            .float("BSCALE", 1.0, "physical = BZERO + BSCALE * stored")
            .string(
                "DATE",
                &Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
                "file creation date (UTC)",
            );

        let instrument = metadata.instrument();
        if !instrument.is_empty() {
            header = header.string("INSTRUME", &instrument, "camera");
        }
        if let Some(source) = source {
            header = header.history(&format!("Converted from {}", source));
        }
        header
    }

    /// Append samples as big-endian signed words with the BZERO offset applied.
    fn push_samples<I: Iterator<Item = u16>>(buffer: &mut Vec<u8>, samples: I) {
        for v in samples {
            let stored = (v as i32 - BZERO_U16 as i32) as i16;
            buffer.extend_from_slice(&stored.to_be_bytes());
        }
    }
}

impl FitsWriter for StandardFitsWriter {
    fn write_fits(
        &self,
        image: &RawImageData,
        source: Option<&str>,
        output: &mut dyn Write,
        _config: &ConversionConfig,
    ) -> Result<()> {
        debug!("Encoding FITS image: {}x{}", image.width, image.height);

        if image.data.len() != image.width * image.height {
            return Err(ConversionError::EncodeError(format!(
                "sample count {} does not match {}x{}",
                image.data.len(),
                image.width,
                image.height
            )));
        }

        let header =
            Self::build_header(&[image.width, image.height], &image.metadata, source);
        let mut buffer = header.finish();
        Self::push_samples(&mut buffer, image.data.iter().copied());
        buffer.resize(padded_len(buffer.len()), 0);

        output.write_all(&buffer)?;

        debug!("FITS encoding complete");
        Ok(())
    }

    fn write_rgb_fits(
        &self,
        image: &RgbImageData,
        source: Option<&str>,
        output: &mut dyn Write,
        _config: &ConversionConfig,
    ) -> Result<()> {
        debug!("Encoding RGB FITS image: {}x{}", image.width, image.height);

        let plane_len = image.width * image.height;
        if image.data.len() != plane_len * 3 {
            return Err(ConversionError::EncodeError(format!(
                "sample count {} does not match {}x{}x3",
                image.data.len(),
                image.width,
                image.height
            )));
        }

        let header =
            Self::build_header(&[image.width, image.height, 3], &image.metadata, source);
        let mut buffer = header.finish();
        // Interleaved RGB becomes plane order: NAXIS3 runs over the color planes.
        for plane in 0..3 {
            Self::push_samples(
                &mut buffer,
                (0..plane_len).map(|i| image.data[i * 3 + plane]),
            );
        }
        buffer.resize(padded_len(buffer.len()), 0);

        output.write_all(&buffer)?;

        debug!("FITS encoding complete");
        Ok(())
    }
}
