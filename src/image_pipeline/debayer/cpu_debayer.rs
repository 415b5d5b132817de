use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::raw::RawImageData;

/// Linear demosaic of a Bayer mosaic into an RGB frame.
///
/// The output stays linear: black level subtraction, normalization over
/// the sensor range, and white balance are applied, scaled to the full
/// 16-bit range. No display transform is performed.
pub struct CpuDebayer;

impl CpuDebayer {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, raw_image: &RawImageData) -> Result<RgbImageData> {
        let width = raw_image.width;
        let height = raw_image.height;

        if raw_image.cpp != 1 {
            return Err(ConversionError::UnsupportedFormat(format!(
                "{} components per pixel, expected a Bayer mosaic",
                raw_image.cpp
            )));
        }
        let cfa = cfa_from_pattern(&raw_image.cfa_pattern)?;

        debug!(
            "Demosaicing {}x{} mosaic, CFA {}",
            width, height, raw_image.cfa_pattern
        );

        // The bayer crate only handles 8 and 16 bit samples.
        let (bayer_depth, raster_depth, bytes_per_sample) = if raw_image.bits_per_sample <= 8 {
            (BayerDepth::Depth8, RasterDepth::Depth8, 1)
        } else {
            (BayerDepth::Depth16LE, RasterDepth::Depth16, 2)
        };

        let bayer_bytes: Vec<u8> = if bytes_per_sample == 1 {
            raw_image.data.iter().map(|&v| v as u8).collect()
        } else {
            raw_image
                .data
                .iter()
                .flat_map(|&v| v.to_le_bytes())
                .collect()
        };

        let mut rgb_buf = vec![0u8; width * height * 3 * bytes_per_sample];
        let mut raster = RasterMut::new(width, height, raster_depth, &mut rgb_buf);

        bayer::run_demosaic(
            &mut Cursor::new(&bayer_bytes[..]),
            bayer_depth,
            cfa,
            Demosaic::Linear,
            &mut raster,
        )
        .map_err(|e| ConversionError::DecodeError(format!("demosaic failed: {:?}", e)))?;

        let black = raw_image.blacklevels[0] as f32;
        let white = raw_image.whitelevels[0] as f32;
        let range = (white - black).max(1.0);
        let wb = wb_multipliers(raw_image.wb_coeffs);

        let data: Vec<u16> = rgb_buf
            .chunks_exact(bytes_per_sample)
            .enumerate()
            .map(|(i, sample)| {
                let v = if bytes_per_sample == 1 {
                    sample[0] as f32
                } else {
                    u16::from_le_bytes([sample[0], sample[1]]) as f32
                };
                let lin = ((v - black).max(0.0) / range) * wb[i % 3];
                (lin * u16::MAX as f32).clamp(0.0, u16::MAX as f32) as u16
            })
            .collect();

        Ok(RgbImageData {
            width,
            height,
            data,
            bits_per_sample: 16,
            metadata: raw_image.metadata.clone(),
        })
    }
}

/// Green-normalized white balance multipliers for R, G, B.
///
/// RAW containers report absent coefficients as NaN; those channels fall
/// back to 1.0.
fn wb_multipliers(coeffs: [f32; 4]) -> [f32; 3] {
    let mut wb = [1.0f32; 3];
    let green = coeffs[1];
    if green.is_finite() && green > 0.0 {
        for (channel, w) in wb.iter_mut().enumerate() {
            let c = coeffs[channel];
            if c.is_finite() && c > 0.0 {
                *w = c / green;
            }
        }
    }
    wb
}

fn cfa_from_pattern(pattern: &str) -> Result<CFA> {
    match pattern {
        "RGGB" => Ok(CFA::RGGB),
        "BGGR" => Ok(CFA::BGGR),
        "GRBG" => Ok(CFA::GRBG),
        "GBRG" => Ok(CFA::GBRG),
        other => Err(ConversionError::UnsupportedFormat(format!(
            "CFA pattern '{}'",
            other
        ))),
    }
}
