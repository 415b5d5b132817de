use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::fits::types::ConversionConfig;
use crate::image_pipeline::raw::types::RawImageData;

/// Writes decoded frames as FITS primary HDUs.
///
/// `source` is the base name of the originating file, recorded in the
/// header's HISTORY when known.
pub trait FitsWriter {
    fn write_fits(
        &self,
        image: &RawImageData,
        source: Option<&str>,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>;

    fn write_rgb_fits(
        &self,
        image: &RgbImageData,
        source: Option<&str>,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>;
}
